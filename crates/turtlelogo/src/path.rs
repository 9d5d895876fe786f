use crate::palette::Color;

/// A straight line drawn by the turtle, with the pen it was drawn with.
#[derive(Clone, Debug, PartialEq)]
pub struct LineSegment {
    pub x1: f64,
    pub y1: f64,
    pub x2: f64,
    pub y2: f64,
    pub color: Color,
    pub width: f64,
}

impl LineSegment {
    pub fn length(&self) -> f64 {
        (self.x2 - self.x1).hypot(self.y2 - self.y1)
    }
}

/// Everything the turtle has drawn since the last clear, in drawing order.
///
/// Segments are only ever appended; the only other mutation is [`PathRecorder::clear`],
/// which drops the whole log.
#[derive(Clone, Debug, Default)]
pub struct PathRecorder {
    segments: Vec<LineSegment>,
}

impl PathRecorder {
    pub fn push(&mut self, segment: LineSegment) {
        self.segments.push(segment);
    }

    pub fn clear(&mut self) {
        self.segments.clear();
    }

    pub fn segments(&self) -> &[LineSegment] {
        &self.segments
    }

    pub fn len(&self) -> usize {
        self.segments.len()
    }

    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }
}
