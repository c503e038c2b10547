//! Input model: tools, mouse buttons, toolbar state, and the interaction mode.
//!
//! `Tool` is what the toolbar has selected. `InteractionMode` is the single
//! gesture (or draft) in progress between pointer-down and pointer-up; it
//! replaces a pile of independent "is dragging X" flags so only legal
//! combinations can exist.

#[cfg(test)]
#[path = "input_test.rs"]
mod input_test;

use serde::{Deserialize, Serialize};

use crate::consts::{
    COMPASS_HOME, COMPASS_SIZE, DEFAULT_COLOR, DEFAULT_LINE_WIDTH, MAX_LINE_WIDTH, MIN_LINE_WIDTH, RULER_HOME,
    RULER_LENGTH, RULER_THICKNESS,
};
use crate::doc::TextBox;
use crate::geometry::Rect;
use crate::viewport::Point;

/// Which tool is active. The neutral state is `Option<Tool>::None`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Tool {
    /// Freehand stroke (default).
    #[default]
    Pen,
    /// Clear a square around the cursor.
    Eraser,
    /// Axis-snapped straight line.
    Line,
    /// Place a text box.
    Text,
    /// Construct a circle from a pivot and a radius point.
    Compass,
}

impl Tool {
    /// Whether this tool writes to the stroke raster.
    #[must_use]
    pub fn paints_raster(self) -> bool {
        matches!(self, Self::Pen | Self::Eraser | Self::Line)
    }
}

/// Mouse button identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Button {
    /// Left mouse button (or single-finger tap).
    Primary,
    /// Middle mouse button (scroll wheel click).
    Middle,
    /// Right mouse button (or two-finger tap).
    Secondary,
}

impl Button {
    /// Map a DOM `MouseEvent.button` value.
    #[must_use]
    pub fn from_dom(button: i16) -> Self {
        match button {
            1 => Self::Middle,
            2 => Self::Secondary,
            _ => Self::Primary,
        }
    }
}

/// The draggable compass icon.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CompassGuide {
    /// Top-left corner of the icon.
    pub position: Point,
    /// Icon rotation in radians.
    pub angle: f64,
}

impl Default for CompassGuide {
    fn default() -> Self {
        Self { position: Point::new(COMPASS_HOME.0, COMPASS_HOME.1), angle: 0.0 }
    }
}

impl CompassGuide {
    #[must_use]
    pub fn bounds(&self) -> Rect {
        Rect::new(self.position.x, self.position.y, COMPASS_SIZE, COMPASS_SIZE)
    }
}

/// The draggable ruler guide shown alongside the line tool.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RulerGuide {
    pub visible: bool,
    /// Top-left corner of the ruler.
    pub position: Point,
}

impl Default for RulerGuide {
    fn default() -> Self {
        Self { visible: false, position: Point::new(RULER_HOME.0, RULER_HOME.1) }
    }
}

impl RulerGuide {
    #[must_use]
    pub fn bounds(&self) -> Rect {
        Rect::new(self.position.x, self.position.y, RULER_LENGTH, RULER_THICKNESS)
    }
}

/// Persistent toolbar state visible to the compositor.
#[derive(Debug, Clone, PartialEq)]
pub struct UiState {
    /// Active tool; `None` is the neutral toolbar state.
    pub tool: Option<Tool>,
    /// Stroke color as a CSS color string.
    pub color: String,
    /// Stroke width in canvas pixels.
    pub line_width: f64,
    pub ruler: RulerGuide,
    pub compass: CompassGuide,
}

impl Default for UiState {
    fn default() -> Self {
        Self {
            tool: Some(Tool::default()),
            color: DEFAULT_COLOR.to_owned(),
            line_width: DEFAULT_LINE_WIDTH,
            ruler: RulerGuide::default(),
            compass: CompassGuide::default(),
        }
    }
}

impl UiState {
    /// Set the stroke width, clamped to the slider range.
    pub fn set_line_width(&mut self, width: f64) {
        if width.is_finite() {
            self.line_width = width.clamp(MIN_LINE_WIDTH, MAX_LINE_WIDTH);
        }
    }
}

/// The gesture or draft currently in progress.
///
/// Each active variant carries what is needed to continue the gesture on
/// pointer-move and finish (or revert) it on pointer-up / cancel.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum InteractionMode {
    /// Nothing in progress.
    #[default]
    Idle,
    /// A pen stroke; `last` is the previous point of the path.
    Stroking { last: Point },
    /// The eraser is held down.
    Erasing,
    /// A line drag started at `start`.
    PlacingLine { start: Point },
    /// The ruler is being dragged; `grab` is the pointer offset from its corner.
    DraggingRuler { grab: Point, origin: Point },
    /// The compass icon is being dragged.
    DraggingCompass { grab: Point, origin: Point },
    /// A compass pivot has been placed; the next press starts the radius.
    PivotSet { pivot: Point },
    /// A circle is being sized from `pivot` to `current`.
    ConstructingCircle { pivot: Point, current: Point },
    /// Committed text box `index` is being dragged.
    DraggingTextBox { index: usize, grab: Point, origin: Point },
    /// A text box draft is open for editing.
    EditingText(TextBox),
}

impl InteractionMode {
    /// Whether the pointer is captured by this gesture.
    #[must_use]
    pub fn captures_pointer(&self) -> bool {
        matches!(
            self,
            Self::Stroking { .. }
                | Self::Erasing
                | Self::PlacingLine { .. }
                | Self::DraggingRuler { .. }
                | Self::DraggingCompass { .. }
                | Self::ConstructingCircle { .. }
                | Self::DraggingTextBox { .. }
        )
    }

    /// The open draft, if any.
    #[must_use]
    pub fn draft(&self) -> Option<&TextBox> {
        match self {
            Self::EditingText(draft) => Some(draft),
            _ => None,
        }
    }

    /// The compass session as `(pivot, current)`, if one is active.
    #[must_use]
    pub fn compass_session(&self) -> Option<(Point, Option<Point>)> {
        match self {
            Self::PivotSet { pivot } => Some((*pivot, None)),
            Self::ConstructingCircle { pivot, current } => Some((*pivot, Some(*current))),
            _ => None,
        }
    }
}
