/// Glyph geometry types

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub const ORIGIN: Point = Point { x: 0.0, y: 0.0 };

    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub fn distance(&self, other: &Point) -> f64 {
        (other.x - self.x).hypot(other.y - self.y)
    }
}

/// One pen path, in draw order.
pub type Stroke = Vec<Point>;

/// Strokes of one character, in writing order.
pub type StrokeSet = Vec<Stroke>;

/// A stroke element pulled out of glyph markup, before interpretation.
#[derive(Debug, Clone, PartialEq)]
pub struct StrokePath {
    pub index: u32,
    pub id: String,
    pub data: String,
}
