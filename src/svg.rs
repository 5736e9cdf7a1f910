//! Standalone SVG assembly for committed shapes.

use crate::{
    foundation::core::{Rgba8, Vertex},
    search::optimizer::CommittedShape,
    shapes::ShapeDescription,
};

// Shape vertices address pixel centers while SVG user units address pixel edges.
const CENTER_SHIFT: &str = r#" transform="translate(0.5 0.5)""#;

fn opacity(a: u8) -> String {
    let s = format!("{:.4}", f64::from(a) / 255.0);
    s.trim_end_matches('0').trim_end_matches('.').to_owned()
}

fn fill(color: Rgba8) -> String {
    format!(
        r#"fill="{}" fill-opacity="{}""#,
        color.hex_rgb(),
        opacity(color.a)
    )
}

fn points(vertices: &[Vertex]) -> String {
    vertices
        .iter()
        .map(|v| format!("{},{}", v.x, v.y))
        .collect::<Vec<_>>()
        .join(" ")
}

/// Markup for one shape in `color`.
pub fn element(description: &ShapeDescription, color: Rgba8) -> String {
    match description {
        ShapeDescription::Rect {
            x,
            y,
            width,
            height,
        } => format!(
            r#"<rect x="{x}" y="{y}" width="{width}" height="{height}" {}/>"#,
            fill(color)
        ),
        ShapeDescription::Polygon { points: vertices } => format!(
            r#"<polygon points="{}" {}{CENTER_SHIFT}/>"#,
            points(vertices),
            fill(color)
        ),
        ShapeDescription::Ellipse { cx, cy, rx, ry } => format!(
            r#"<ellipse cx="{cx}" cy="{cy}" rx="{rx}" ry="{ry}" {}{CENTER_SHIFT}/>"#,
            fill(color)
        ),
        ShapeDescription::Path { d, stroke_width } => format!(
            r#"<path d="{d}" fill="none" stroke="{}" stroke-opacity="{}" stroke-width="{stroke_width}" stroke-linecap="butt"{CENTER_SHIFT}/>"#,
            color.hex_rgb(),
            opacity(color.a)
        ),
    }
}

/// Full document: a background rectangle, then every shape in commit order.
///
/// Shapes whose footprint is empty drew nothing on the canvas and are left out.
pub fn document(width: u32, height: u32, background: Rgba8, shapes: &[CommittedShape]) -> String {
    let mut out = format!(
        r#"<svg xmlns="http://www.w3.org/2000/svg" width="{width}" height="{height}" viewBox="0 0 {width} {height}">"#
    );
    out.push('\n');
    out.push_str(&format!(
        r#"<rect x="0" y="0" width="{width}" height="{height}" {}/>"#,
        fill(background)
    ));
    out.push('\n');
    for shape in shapes {
        if shape.shape.rasterize().is_empty() {
            continue;
        }
        out.push_str(&element(&shape.description(), shape.color));
        out.push('\n');
    }
    out.push_str("</svg>\n");
    out
}
