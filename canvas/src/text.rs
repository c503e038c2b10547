//! Text-box model: committed annotations, drafts, hit regions.
//!
//! Text boxes are structured data kept beside the raster, never inside it.
//! A draft is an uncommitted [`TextBox`]; the engine holds at most one (in
//! [`crate::input::InteractionMode::EditingText`]) and hands it to
//! [`TextLayer::commit`] when the user presses "Done".

#[cfg(test)]
#[path = "text_test.rs"]
mod text_test;

use crate::consts::{
    GLYPH_ADVANCE_RATIO, LINE_HEIGHT_RATIO, TEXT_BOX_MIN_WIDTH, TEXT_BOX_PADDING_X, TEXT_BOX_PADDING_Y,
};
use crate::doc::TextBox;
use crate::geometry::Rect;
use crate::viewport::Point;

/// One edit applied to an open draft from the text toolbar or editor.
#[derive(Debug, Clone, PartialEq)]
pub enum DraftEdit {
    /// Replace the draft's text.
    Text(String),
    /// Change the font family.
    Font(String),
    /// Change the font size; non-positive sizes are ignored.
    Size(f64),
    /// Change the text color.
    Color(String),
    ToggleBold,
    ToggleItalic,
    ToggleUnderline,
}

impl DraftEdit {
    /// Apply this edit to `draft`.
    pub fn apply(self, draft: &mut TextBox) {
        match self {
            Self::Text(text) => draft.text = text,
            Self::Font(font) => draft.font = font,
            Self::Size(size) => {
                if size.is_finite() && size > 0.0 {
                    draft.size = size;
                }
            }
            Self::Color(color) => draft.color = color,
            Self::ToggleBold => draft.bold = !draft.bold,
            Self::ToggleItalic => draft.italic = !draft.italic,
            Self::ToggleUnderline => draft.underline = !draft.underline,
        }
    }
}

/// Approximate on-screen region of a text box, anchored at its top-left.
#[must_use]
pub fn text_bounds(tb: &TextBox) -> Rect {
    #[allow(clippy::cast_precision_loss)]
    let chars = tb.text.chars().count() as f64;
    let width = (chars * tb.size * GLYPH_ADVANCE_RATIO + TEXT_BOX_PADDING_X).max(TEXT_BOX_MIN_WIDTH);
    let height = tb.size * LINE_HEIGHT_RATIO + TEXT_BOX_PADDING_Y;
    Rect::new(tb.x, tb.y, width, height)
}

/// The committed text boxes of a board, in draw order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TextLayer {
    boxes: Vec<TextBox>,
}

impl TextLayer {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// A fresh draft at `at` with the default style.
    #[must_use]
    pub fn open_draft(at: Point) -> TextBox {
        TextBox::new(at)
    }

    /// Append `draft` to the committed boxes. Empty text is committed as-is.
    /// Returns the index of the new box.
    pub fn commit(&mut self, draft: TextBox) -> usize {
        self.boxes.push(draft);
        self.boxes.len() - 1
    }

    /// Move box `index` by `(dx, dy)`. Returns `false` if there is no such box.
    pub fn drag(&mut self, index: usize, dx: f64, dy: f64) -> bool {
        let Some(tb) = self.boxes.get_mut(index) else {
            return false;
        };
        tb.x += dx;
        tb.y += dy;
        true
    }

    /// Move box `index` so its anchor is at `to`.
    pub fn move_to(&mut self, index: usize, to: Point) -> bool {
        let Some(tb) = self.boxes.get_mut(index) else {
            return false;
        };
        tb.x = to.x;
        tb.y = to.y;
        true
    }

    /// Index of the topmost box whose region contains `pt`.
    #[must_use]
    pub fn hit(&self, pt: Point) -> Option<usize> {
        self.boxes.iter().rposition(|tb| text_bounds(tb).contains(pt))
    }

    #[must_use]
    pub fn get(&self, index: usize) -> Option<&TextBox> {
        self.boxes.get(index)
    }

    #[must_use]
    pub fn boxes(&self) -> &[TextBox] {
        &self.boxes
    }

    /// Replace all boxes, e.g. when restoring a checkpoint.
    pub fn replace(&mut self, boxes: Vec<TextBox>) {
        self.boxes = boxes;
    }

    /// Remove every committed box.
    pub fn reset(&mut self) {
        self.boxes.clear();
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.boxes.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.boxes.is_empty()
    }
}
