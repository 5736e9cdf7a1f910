use crate::{
    foundation::{
        core::Rgba8,
        error::{SnapError, SnapResult},
    },
    shapes::{DEFAULT_STROKE_WIDTH, ShapeKind, parse_kinds},
};

/// Settings for one approximation run.
///
/// Field names serialize in camelCase (`amountOfShapes`, `shapeTypes`, ...),
/// and every field falls back to its default when missing from JSON.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct SnapConfig {
    /// Total number of commit steps.
    pub amount_of_shapes: u32,
    /// Independent random restarts per commit.
    pub amount_of_attempts: u32,
    /// Mutation rounds per attempt.
    pub amount_of_mutations: u32,
    /// Consecutive non-improving rounds after which an attempt stops early.
    pub patience: u32,
    /// Opacity of every placed shape.
    pub alpha: u8,
    /// Initial canvas color. `None` uses the target's mean color.
    pub background_color: Option<Rgba8>,
    /// Allow-list of shape tags the factory draws from.
    pub shape_types: Vec<String>,
    /// Stroke width for `Cubic` curves.
    pub stroke_width: f64,
    pub seed: u64,
}

impl Default for SnapConfig {
    fn default() -> Self {
        Self {
            amount_of_shapes: 100,
            amount_of_attempts: 10,
            amount_of_mutations: 1000,
            patience: 100,
            alpha: 128,
            background_color: None,
            shape_types: ShapeKind::ALL.iter().map(|k| k.tag().to_owned()).collect(),
            stroke_width: DEFAULT_STROKE_WIDTH,
            seed: 0x5EED,
        }
    }
}

impl SnapConfig {
    pub fn from_json(text: &str) -> SnapResult<Self> {
        serde_json::from_str(text).map_err(|e| SnapError::serde(e.to_string()))
    }

    pub fn to_json(&self) -> SnapResult<String> {
        serde_json::to_string_pretty(self).map_err(|e| SnapError::serde(e.to_string()))
    }

    pub fn validate(&self) -> SnapResult<()> {
        let counts = [
            ("amountOfShapes", self.amount_of_shapes),
            ("amountOfAttempts", self.amount_of_attempts),
            ("amountOfMutations", self.amount_of_mutations),
            ("patience", self.patience),
        ];
        for (name, value) in counts {
            if value == 0 {
                return Err(SnapError::invalid_configuration(format!(
                    "{name} must be > 0"
                )));
            }
        }
        if !self.stroke_width.is_finite() || self.stroke_width <= 0.0 {
            return Err(SnapError::invalid_configuration(
                "strokeWidth must be a positive number",
            ));
        }
        self.shape_kinds().map(|_| ())
    }

    /// Parsed allow-list.
    pub fn shape_kinds(&self) -> SnapResult<Vec<ShapeKind>> {
        parse_kinds(&self.shape_types)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_validate() {
        SnapConfig::default().validate().unwrap();
    }

    #[test]
    fn missing_fields_take_defaults() {
        let cfg = SnapConfig::from_json(r#"{ "amountOfShapes": 3, "alpha": 255 }"#).unwrap();
        assert_eq!(cfg.amount_of_shapes, 3);
        assert_eq!(cfg.alpha, 255);
        assert_eq!(cfg.amount_of_attempts, SnapConfig::default().amount_of_attempts);
        assert_eq!(cfg.shape_types.len(), 4);
    }

    #[test]
    fn background_color_parses() {
        let cfg = SnapConfig::from_json(
            r#"{ "backgroundColor": { "r": 1, "g": 2, "b": 3, "a": 255 } }"#,
        )
        .unwrap();
        assert_eq!(cfg.background_color, Some(Rgba8::opaque(1, 2, 3)));
    }

    #[test]
    fn json_roundtrip_preserves_fields() {
        let cfg = SnapConfig {
            amount_of_shapes: 7,
            shape_types: vec!["Cubic".to_owned()],
            seed: 99,
            ..SnapConfig::default()
        };
        assert_eq!(SnapConfig::from_json(&cfg.to_json().unwrap()).unwrap(), cfg);
    }

    #[test]
    fn malformed_json_is_a_serde_error() {
        let err = SnapConfig::from_json("{ nope").unwrap_err();
        assert!(matches!(err, SnapError::Serde(_)));
    }

    #[test]
    fn zero_counts_are_rejected() {
        for cfg in [
            SnapConfig { amount_of_shapes: 0, ..SnapConfig::default() },
            SnapConfig { amount_of_attempts: 0, ..SnapConfig::default() },
            SnapConfig { amount_of_mutations: 0, ..SnapConfig::default() },
            SnapConfig { patience: 0, ..SnapConfig::default() },
        ] {
            let err = cfg.validate().unwrap_err();
            assert!(matches!(err, SnapError::InvalidConfiguration(_)), "{err}");
        }
    }

    #[test]
    fn allow_list_problems_are_reported() {
        let empty = SnapConfig { shape_types: vec![], ..SnapConfig::default() };
        assert!(matches!(empty.validate().unwrap_err(), SnapError::InvalidConfiguration(_)));

        let unknown = SnapConfig {
            shape_types: vec!["Rect".to_owned(), "Rhombus".to_owned()],
            ..SnapConfig::default()
        };
        assert!(matches!(unknown.validate().unwrap_err(), SnapError::UnknownShapeKind(_)));
    }

    #[test]
    fn bad_stroke_width_is_rejected() {
        let cfg = SnapConfig { stroke_width: -1.0, ..SnapConfig::default() };
        assert!(matches!(cfg.validate().unwrap_err(), SnapError::InvalidConfiguration(_)));
    }
}
