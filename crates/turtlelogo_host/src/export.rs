//! SVG export of a turtle trace.

use std::path::Path;

use svg::node::element::{Line, Rectangle};
use svg::Document;
use turtlelogo::LineSegment;

fn line(seg: &LineSegment) -> Line {
    Line::new()
        .set("x1", seg.x1)
        .set("y1", seg.y1)
        .set("x2", seg.x2)
        .set("y2", seg.y2)
        .set("stroke", seg.color.to_string())
        .set("stroke-width", seg.width)
        .set("stroke-linecap", "round")
}

/// Builds a `width` by `height` document with one line per segment, in the
/// order they were drawn, on a white background.
pub fn document(segments: &[LineSegment], width: f64, height: f64) -> Document {
    let background = Rectangle::new()
        .set("width", width)
        .set("height", height)
        .set("fill", "#ffffff");

    segments.iter().fold(
        Document::new()
            .set("viewBox", (0.0, 0.0, width, height))
            .set("width", width)
            .set("height", height)
            .add(background),
        |doc, seg| doc.add(line(seg)),
    )
}

pub fn save(path: impl AsRef<Path>, segments: &[LineSegment], width: f64, height: f64) -> anyhow::Result<()> {
    let path = path.as_ref();
    log::info!("writing {} segments to {}", segments.len(), path.display());
    svg::save(path, &document(segments, width, height))?;
    Ok(())
}
