//! Geometry: compass/circle construction, axis-snapped lines, hit regions.
//!
//! Everything here is pure and operates in canvas coordinates.

#[cfg(test)]
#[path = "geometry_test.rs"]
mod geometry_test;

use std::f64::consts::FRAC_PI_2;

use crate::doc::Circle;
use crate::viewport::Point;

/// Axis-aligned rectangle in canvas coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Rect {
    #[must_use]
    pub fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self { x, y, width, height }
    }

    /// Whether `pt` lies inside the rectangle (edges inclusive).
    #[must_use]
    pub fn contains(&self, pt: Point) -> bool {
        pt.x >= self.x && pt.x <= self.x + self.width && pt.y >= self.y && pt.y <= self.y + self.height
    }
}

/// A straight segment between two points.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Segment {
    pub from: Point,
    pub to: Point,
}

/// Euclidean distance between two points.
#[must_use]
pub fn distance(a: Point, b: Point) -> f64 {
    (b.x - a.x).hypot(b.y - a.y)
}

/// Orientation of the compass icon while a circle is being drawn: the
/// direction from the pivot to the cursor, rotated a quarter turn.
#[must_use]
pub fn compass_angle(pivot: Point, cursor: Point) -> f64 {
    (cursor.y - pivot.y).atan2(cursor.x - pivot.x) + FRAC_PI_2
}

/// The circle centred on `pivot` passing through `cursor`.
#[must_use]
pub fn circle_from(pivot: Point, cursor: Point, color: &str) -> Circle {
    Circle {
        x: pivot.x,
        y: pivot.y,
        radius: distance(pivot, cursor),
        color: color.to_owned(),
    }
}

/// Snap a drag from `start` to `end` onto the dominant axis.
///
/// Horizontal when `|dx| > |dy|`, otherwise vertical. The segment always
/// starts at `start`; diagonal segments are never produced.
#[must_use]
pub fn snap_line(start: Point, end: Point) -> Segment {
    let dx = (end.x - start.x).abs();
    let dy = (end.y - start.y).abs();
    let to = if dx > dy {
        Point::new(end.x, start.y)
    } else {
        Point::new(start.x, end.y)
    };
    Segment { from: start, to }
}

/// Square region cleared by the eraser, centred on `center`.
#[must_use]
pub fn eraser_rect(center: Point, line_width: f64) -> Rect {
    Rect::new(center.x - line_width, center.y - line_width, line_width * 2.0, line_width * 2.0)
}
