/// Convenience result type used across Shapesnap.
pub type SnapResult<T> = Result<T, SnapError>;

/// Top-level error taxonomy used by the search engine.
#[derive(thiserror::Error, Debug)]
pub enum SnapError {
    /// Non-positive counts, an empty shape allow-list, or other unusable settings.
    #[error("invalid configuration: {0}")]
    InvalidConfiguration(String),

    /// The shape allow-list names a variant this crate does not implement.
    #[error("unknown shape kind: {0}")]
    UnknownShapeKind(String),

    /// A color was requested over zero pixels. Callers must guard against this.
    #[error("scanline color requested for an empty scanline set")]
    EmptyScanlineSet,

    /// Errors when serializing or deserializing configuration or output.
    #[error("serialization error: {0}")]
    Serde(String),

    /// Wrapped lower-level error from dependencies or IO.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl SnapError {
    /// Build a [`SnapError::InvalidConfiguration`] value.
    pub fn invalid_configuration(msg: impl Into<String>) -> Self {
        Self::InvalidConfiguration(msg.into())
    }

    /// Build a [`SnapError::UnknownShapeKind`] value.
    pub fn unknown_shape_kind(tag: impl Into<String>) -> Self {
        Self::UnknownShapeKind(tag.into())
    }

    /// Build a [`SnapError::Serde`] value.
    pub fn serde(msg: impl Into<String>) -> Self {
        Self::Serde(msg.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_prefixes_are_stable() {
        assert!(
            SnapError::invalid_configuration("x")
                .to_string()
                .contains("invalid configuration:")
        );
        assert!(
            SnapError::unknown_shape_kind("Rhombus")
                .to_string()
                .contains("unknown shape kind: Rhombus")
        );
        assert!(
            SnapError::serde("x")
                .to_string()
                .contains("serialization error:")
        );
        assert!(
            SnapError::EmptyScanlineSet
                .to_string()
                .contains("empty scanline set")
        );
    }

    #[test]
    fn other_preserves_source() {
        let base = std::io::Error::other("boom");
        let err = SnapError::Other(anyhow::Error::new(base));
        assert!(err.to_string().contains("boom"));
    }
}
