//! Document model: snapshots, vector overlays, history entries, board content.
//!
//! This module defines the data that makes up a whiteboard: the opaque raster
//! `Snapshot`, the vector `Circle` and `TextBox` overlays that are redrawn
//! over it every frame, the `HistoryEntry` checkpoint used by undo/redo, and
//! `BoardContent`, the payload handed to the document store on save.
//!
//! Field names on the wire follow the stored board documents (`lineWidth`,
//! `textBoxes`), so content saved by one host loads in another.

#[cfg(test)]
#[path = "doc_test.rs"]
mod doc_test;

use serde::{Deserialize, Serialize};

use crate::consts::{DEFAULT_COLOR, DEFAULT_FONT, DEFAULT_LINE_WIDTH, DEFAULT_TEXT_COLOR, DEFAULT_TEXT_SIZE};
use crate::input::Tool;
use crate::viewport::Point;

/// Opaque encoded image of the stroke raster (a data URL in the browser).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Snapshot(String);

impl Snapshot {
    #[must_use]
    pub fn new(encoded: impl Into<String>) -> Self {
        Self(encoded.into())
    }

    /// The encoded image string.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    #[must_use]
    pub fn into_string(self) -> String {
        self.0
    }
}

/// A compass circle, kept as vector data and stroked as a ring every frame.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Circle {
    /// Centre x in canvas coordinates.
    pub x: f64,
    /// Centre y in canvas coordinates.
    pub y: f64,
    pub radius: f64,
    /// CSS color of the ring.
    #[serde(default)]
    pub color: String,
}

impl Circle {
    #[must_use]
    pub fn center(&self) -> Point {
        Point::new(self.x, self.y)
    }
}

/// A styled text annotation anchored at its top-left corner.
#[allow(clippy::struct_excessive_bools)]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TextBox {
    pub x: f64,
    pub y: f64,
    #[serde(default)]
    pub text: String,
    /// Font family name, e.g. `"Arial"`.
    pub font: String,
    /// Font size in canvas pixels.
    pub size: f64,
    pub color: String,
    #[serde(default)]
    pub bold: bool,
    #[serde(default)]
    pub italic: bool,
    #[serde(default)]
    pub underline: bool,
}

impl TextBox {
    /// An empty box at `at` with the default style.
    #[must_use]
    pub fn new(at: Point) -> Self {
        Self {
            x: at.x,
            y: at.y,
            text: String::new(),
            font: DEFAULT_FONT.to_owned(),
            size: DEFAULT_TEXT_SIZE,
            color: DEFAULT_TEXT_COLOR.to_owned(),
            bold: false,
            italic: false,
            underline: false,
        }
    }

    #[must_use]
    pub fn anchor(&self) -> Point {
        Point::new(self.x, self.y)
    }

    /// CSS font shorthand, e.g. `"italic bold 20px Arial"`.
    #[must_use]
    pub fn css_font(&self) -> String {
        let italic = if self.italic { "italic " } else { "" };
        let bold = if self.bold { "bold " } else { "" };
        format!("{italic}{bold}{}px {}", self.size, self.font)
    }
}

/// A full checkpoint of the canvas: raster plus vector overlays.
///
/// `Default` is the empty canvas.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct HistoryEntry {
    pub snapshot: Option<Snapshot>,
    #[serde(default)]
    pub text_boxes: Vec<TextBox>,
    #[serde(default)]
    pub circles: Vec<Circle>,
}

impl HistoryEntry {
    /// Whether restoring this entry needs an image decode.
    #[must_use]
    pub fn needs_decode(&self) -> bool {
        self.snapshot.is_some()
    }
}

/// Everything persisted for a board, minus store-assigned identity.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BoardContent {
    pub snapshot: Option<Snapshot>,
    pub tool: Option<Tool>,
    pub color: String,
    pub line_width: f64,
    #[serde(default)]
    pub text_boxes: Vec<TextBox>,
    #[serde(default)]
    pub circles: Vec<Circle>,
}

impl Default for BoardContent {
    fn default() -> Self {
        Self {
            snapshot: None,
            tool: Some(Tool::default()),
            color: DEFAULT_COLOR.to_owned(),
            line_width: DEFAULT_LINE_WIDTH,
            text_boxes: Vec::new(),
            circles: Vec::new(),
        }
    }
}

impl BoardContent {
    /// The checkpoint this content restores to.
    #[must_use]
    pub fn to_entry(&self) -> HistoryEntry {
        HistoryEntry {
            snapshot: self.snapshot.clone(),
            text_boxes: self.text_boxes.clone(),
            circles: self.circles.clone(),
        }
    }
}
