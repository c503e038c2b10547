//! Shared numeric constants for the canvas crate.

// ── Raster ──────────────────────────────────────────────────────

/// Width of the stroke raster in canvas pixels.
pub const CANVAS_WIDTH: u32 = 3000;

/// Height of the stroke raster in canvas pixels.
pub const CANVAS_HEIGHT: u32 = 3000;

// ── Pen / eraser ────────────────────────────────────────────────

/// Stroke color selected when the engine starts.
pub const DEFAULT_COLOR: &str = "#000000";

/// Stroke width selected when the engine starts.
pub const DEFAULT_LINE_WIDTH: f64 = 2.0;

/// Smallest line width the width slider allows.
pub const MIN_LINE_WIDTH: f64 = 1.0;

/// Largest line width the width slider allows.
pub const MAX_LINE_WIDTH: f64 = 30.0;

// ── Zoom ────────────────────────────────────────────────────────

/// Scale multiplier applied by one zoom-in step.
pub const ZOOM_IN_FACTOR: f64 = 1.2;

/// Scale multiplier applied by one zoom-out step.
pub const ZOOM_OUT_FACTOR: f64 = 0.8;

/// Minimum zoom scale.
pub const MIN_SCALE: f64 = 0.1;

/// Maximum zoom scale.
pub const MAX_SCALE: f64 = 3.0;

// ── History ─────────────────────────────────────────────────────

/// Default number of undo checkpoints retained.
pub const MAX_HISTORY_ENTRIES: usize = 50;

// ── Compass ─────────────────────────────────────────────────────

/// Side length of the square compass icon hit region, in canvas pixels.
pub const COMPASS_SIZE: f64 = 100.0;

/// Where the compass icon sits after a reset.
pub const COMPASS_HOME: (f64, f64) = (100.0, 100.0);

/// Stroke width of committed circles.
pub const CIRCLE_LINE_WIDTH: f64 = 2.0;

/// Fallback ring color when a stored circle has no color.
pub const CIRCLE_FALLBACK_COLOR: &str = "#4299E1";

/// Color of the dashed in-progress circle.
pub const PREVIEW_COLOR: &str = "#ECC94B";

/// Dash and gap length of the in-progress circle.
pub const PREVIEW_DASH: f64 = 5.0;

// ── Ruler ───────────────────────────────────────────────────────

/// Length of the ruler guide.
pub const RULER_LENGTH: f64 = 400.0;

/// Thickness of the ruler guide.
pub const RULER_THICKNESS: f64 = 40.0;

/// Where the ruler sits when first shown.
pub const RULER_HOME: (f64, f64) = (100.0, 100.0);

// ── Text ────────────────────────────────────────────────────────

/// Font family of a new draft.
pub const DEFAULT_FONT: &str = "Arial";

/// Font size of a new draft, in canvas pixels.
pub const DEFAULT_TEXT_SIZE: f64 = 20.0;

/// Text color of a new draft.
pub const DEFAULT_TEXT_COLOR: &str = "#000000";

/// Font families offered by the text toolbar.
pub const FONT_CHOICES: [&str; 4] = ["Arial", "Courier New", "Georgia", "Times New Roman"];

/// Font sizes offered by the text toolbar.
pub const TEXT_SIZE_CHOICES: [f64; 4] = [14.0, 18.0, 24.0, 32.0];

/// Horizontal offset from a text box anchor to where its text is centred.
pub const TEXT_OFFSET_X: f64 = 40.0;

/// Vertical offset from a text box anchor to where its text is centred.
pub const TEXT_OFFSET_Y: f64 = 20.0;

/// Minimum width of a text box hit region.
pub const TEXT_BOX_MIN_WIDTH: f64 = 80.0;

/// Horizontal padding added around measured text.
pub const TEXT_BOX_PADDING_X: f64 = 20.0;

/// Vertical padding added around a text line.
pub const TEXT_BOX_PADDING_Y: f64 = 12.0;

/// Average glyph advance as a fraction of the font size, for hit regions.
pub const GLYPH_ADVANCE_RATIO: f64 = 0.6;

/// Line height as a multiple of the font size.
pub const LINE_HEIGHT_RATIO: f64 = 1.2;
