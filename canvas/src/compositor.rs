//! Layer compositor: builds the visible frame and guards background decodes.
//!
//! A frame is a display list ([`Frame`]) built from read-only views of the
//! engine state and replayed onto the 2D context by [`crate::render::draw`].
//! Layers, bottom first:
//!
//! 1. the stroke raster (the background)
//! 2. committed circles, stroked as rings
//! 3. the dashed in-progress compass circle and its pivot marker
//! 4. committed text boxes
//! 5. guides: draft outline, ruler, compass icon
//!
//! Restoring a snapshot needs an image decode that completes later. Each
//! restore gets a new generation; a completion carrying an older generation
//! is stale and must be dropped so it cannot overwrite a newer background.

#[cfg(test)]
#[path = "compositor_test.rs"]
mod compositor_test;

use crate::consts::{
    CIRCLE_FALLBACK_COLOR, CIRCLE_LINE_WIDTH, PREVIEW_COLOR, PREVIEW_DASH, TEXT_OFFSET_X, TEXT_OFFSET_Y,
};
use crate::doc::{Circle, HistoryEntry, Snapshot, TextBox};
use crate::geometry::{Rect, distance};
use crate::input::{InteractionMode, Tool, UiState};
use crate::text::text_bounds;
use crate::viewport::Point;

// =============================================================
// Display list
// =============================================================

/// One drawing instruction, in canvas coordinates.
#[derive(Debug, Clone, PartialEq)]
pub enum DrawOp {
    /// Blit the stroke raster at the origin.
    Raster,
    /// An unfilled circle.
    Ring { center: Point, radius: f64, color: String, line_width: f64 },
    /// A dashed unfilled circle.
    DashedRing { center: Point, radius: f64, color: String, dash: f64 },
    /// Small filled dot marking the compass pivot.
    PivotMarker { at: Point },
    /// Centred text.
    Text { center: Point, text: String, font: String, size: f64, color: String, underline: bool },
    /// Outline of the open draft.
    DraftOutline { bounds: Rect },
    /// The ruler guide.
    Ruler { bounds: Rect },
    /// The compass icon, rotated about its centre.
    CompassIcon { bounds: Rect, angle: f64 },
}

/// Everything needed to paint one frame.
#[derive(Debug, Clone, PartialEq)]
pub struct Frame {
    /// Uniform zoom applied after resetting the transform.
    pub scale: f64,
    /// Raster width in canvas pixels.
    pub width: f64,
    /// Raster height in canvas pixels.
    pub height: f64,
    pub ops: Vec<DrawOp>,
}

/// Read-only view of the state a frame is built from.
pub struct Scene<'a> {
    pub width: f64,
    pub height: f64,
    pub scale: f64,
    pub circles: &'a [Circle],
    pub text_boxes: &'a [TextBox],
    pub mode: &'a InteractionMode,
    pub ui: &'a UiState,
}

/// Build the frame for `scene`.
#[must_use]
pub fn compose(scene: &Scene<'_>) -> Frame {
    let mut ops = vec![DrawOp::Raster];

    for circle in scene.circles {
        ops.push(ring_op(circle));
    }

    if let Some((pivot, current)) = scene.mode.compass_session() {
        if let Some(current) = current {
            ops.push(DrawOp::DashedRing {
                center: pivot,
                radius: distance(pivot, current),
                color: PREVIEW_COLOR.to_owned(),
                dash: PREVIEW_DASH,
            });
        }
        ops.push(DrawOp::PivotMarker { at: pivot });
    }

    for tb in scene.text_boxes {
        ops.push(text_op(tb));
    }

    if let Some(draft) = scene.mode.draft() {
        ops.push(DrawOp::DraftOutline { bounds: text_bounds(draft) });
    }
    if scene.ui.ruler.visible {
        ops.push(DrawOp::Ruler { bounds: scene.ui.ruler.bounds() });
    }
    if scene.ui.tool == Some(Tool::Compass) {
        ops.push(DrawOp::CompassIcon { bounds: scene.ui.compass.bounds(), angle: scene.ui.compass.angle });
    }

    Frame { scale: scene.scale, width: scene.width, height: scene.height, ops }
}

fn ring_op(circle: &Circle) -> DrawOp {
    let color = if circle.color.is_empty() {
        CIRCLE_FALLBACK_COLOR.to_owned()
    } else {
        circle.color.clone()
    };
    DrawOp::Ring { center: circle.center(), radius: circle.radius, color, line_width: CIRCLE_LINE_WIDTH }
}

fn text_op(tb: &TextBox) -> DrawOp {
    DrawOp::Text {
        center: Point::new(tb.x + TEXT_OFFSET_X, tb.y + TEXT_OFFSET_Y),
        text: tb.text.clone(),
        font: tb.css_font(),
        size: tb.size,
        color: tb.color.clone(),
        underline: tb.underline,
    }
}

// =============================================================
// Background decode tracking
// =============================================================

/// Request for the host to decode `snapshot` and report back.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecodeTicket {
    generation: u64,
    snapshot: Snapshot,
}

impl DecodeTicket {
    #[must_use]
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// The snapshot the host should decode.
    #[must_use]
    pub fn snapshot(&self) -> &Snapshot {
        &self.snapshot
    }
}

/// The state a pending decode will restore once it lands.
#[derive(Debug, Clone, PartialEq)]
pub struct PendingRestore {
    pub entry: HistoryEntry,
    /// Record the state as a new checkpoint once the decode lands (board
    /// loads, and edits made while the decode was pending).
    pub checkpoint_after: bool,
}

/// Tracks the current background generation and the restore awaiting decode.
#[derive(Debug, Clone, Default)]
pub struct Compositor {
    generation: u64,
    pending: Option<(u64, PendingRestore)>,
}

impl Compositor {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Start restoring `entry` from `snapshot`, superseding any earlier request.
    pub fn request_decode(&mut self, snapshot: Snapshot, restore: PendingRestore) -> DecodeTicket {
        self.generation += 1;
        self.pending = Some((self.generation, restore));
        DecodeTicket { generation: self.generation, snapshot }
    }

    /// Claim the restore for a finished decode.
    ///
    /// Returns `None` when the ticket is stale (a newer background was set or
    /// the canvas was reset since it was issued).
    pub fn finish_decode(&mut self, ticket: &DecodeTicket) -> Option<PendingRestore> {
        if ticket.generation != self.generation {
            return None;
        }
        match self.pending.take() {
            Some((generation, restore)) if generation == ticket.generation => Some(restore),
            other => {
                self.pending = other;
                None
            }
        }
    }

    /// Drop any pending restore; outstanding tickets become stale.
    pub fn invalidate(&mut self) {
        self.generation += 1;
        self.pending = None;
    }

    /// Ask the pending restore, if any, to checkpoint when it lands.
    ///
    /// Returns `false` when nothing is pending and the caller can checkpoint
    /// right away.
    pub fn defer_checkpoint(&mut self) -> bool {
        match &mut self.pending {
            Some((_, restore)) => {
                restore.checkpoint_after = true;
                true
            }
            None => false,
        }
    }

    /// Whether a restore is waiting for its decode.
    #[must_use]
    pub fn is_restoring(&self) -> bool {
        self.pending.is_some()
    }

    /// The entry a pending decode will restore.
    #[must_use]
    pub fn pending_entry(&self) -> Option<&HistoryEntry> {
        self.pending.as_ref().map(|(_, restore)| &restore.entry)
    }

    #[must_use]
    pub fn generation(&self) -> u64 {
        self.generation
    }
}
