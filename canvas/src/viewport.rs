//! Zoom viewport and the screen → canvas coordinate conversion.
//!
//! Every pointer event is converted exactly once, at the engine boundary, by
//! [`Viewport::screen_to_canvas`]. Nothing downstream ever sees screen
//! coordinates.

#[cfg(test)]
#[path = "viewport_test.rs"]
mod viewport_test;

use serde::{Deserialize, Serialize};

use crate::consts::{MAX_SCALE, MIN_SCALE};

/// A point in either screen or canvas space.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    #[must_use]
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Component-wise difference `self - other`.
    #[must_use]
    pub fn sub(self, other: Point) -> Point {
        Point::new(self.x - other.x, self.y - other.y)
    }

    /// Component-wise sum `self + other`.
    #[must_use]
    pub fn add(self, other: Point) -> Point {
        Point::new(self.x + other.x, self.y + other.y)
    }
}

/// Uniform zoom applied to the visible canvas.
///
/// The canvas is scaled from its top-left corner, so there is no pan: a
/// pointer offset relative to the element divided by `scale` is the canvas
/// coordinate.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    scale: f64,
}

impl Default for Viewport {
    fn default() -> Self {
        Self { scale: 1.0 }
    }
}

impl Viewport {
    /// Current zoom scale (1.0 = no zoom).
    #[must_use]
    pub fn scale(&self) -> f64 {
        self.scale
    }

    /// Set the zoom scale, clamped to `[MIN_SCALE, MAX_SCALE]`.
    /// Non-finite or non-positive values leave the scale unchanged.
    pub fn set_scale(&mut self, scale: f64) {
        if !scale.is_finite() || scale <= 0.0 {
            return;
        }
        self.scale = scale.clamp(MIN_SCALE, MAX_SCALE);
    }

    /// Multiply the scale by `factor`, clamped.
    pub fn zoom_by(&mut self, factor: f64) {
        self.set_scale(self.scale * factor);
    }

    /// Convert an element-relative screen point (CSS pixels) to canvas coordinates.
    #[must_use]
    pub fn screen_to_canvas(&self, screen: Point) -> Point {
        Point {
            x: screen.x / self.scale,
            y: screen.y / self.scale,
        }
    }

    /// Convert a canvas point back to element-relative screen coordinates.
    ///
    /// Hosts use this to position the draft text editor over the canvas.
    #[must_use]
    pub fn canvas_to_screen(&self, canvas: Point) -> Point {
        Point {
            x: canvas.x * self.scale,
            y: canvas.y * self.scale,
        }
    }
}
