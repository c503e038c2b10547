use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement};

use crate::compositor::{self, Compositor, DecodeTicket, Frame, PendingRestore, Scene};
use crate::consts::{
    CANVAS_HEIGHT, CANVAS_WIDTH, DEFAULT_COLOR, DEFAULT_LINE_WIDTH, MAX_HISTORY_ENTRIES, ZOOM_IN_FACTOR,
    ZOOM_OUT_FACTOR,
};
use crate::doc::{BoardContent, Circle, HistoryEntry, TextBox};
use crate::geometry::{circle_from, compass_angle, eraser_rect, snap_line};
use crate::history::History;
use crate::input::{Button, InteractionMode, Tool, UiState};
use crate::raster::{CanvasRaster, DecodeError, Raster, RasterError, StrokeStyle, context_2d};
use crate::render;
use crate::text::{DraftEdit, TextLayer};
use crate::viewport::{Point, Viewport};

#[cfg(test)]
#[path = "engine_test.rs"]
mod engine_test;

/// Actions returned from input handlers for the host to process.
#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    RenderNeeded,
    /// Decode the ticket's snapshot and pass the result to `on_decode_complete`.
    DecodeRequested(DecodeTicket),
    /// A new history checkpoint was recorded.
    Checkpointed,
    /// Route all pointer events to the canvas until `ReleasePointer`.
    CapturePointer,
    ReleasePointer,
    /// Show the text editor for a draft anchored at `at` (canvas coordinates).
    DraftOpened { at: Point },
    /// Hide the text editor.
    DraftClosed,
    SetCursor(String),
}

/// Startup settings for an engine.
#[derive(Debug, Clone, PartialEq)]
pub struct EngineConfig {
    /// Raster width in canvas pixels.
    pub width: u32,
    /// Raster height in canvas pixels.
    pub height: u32,
    pub max_history: usize,
    pub default_color: String,
    pub default_line_width: f64,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            width: CANVAS_WIDTH,
            height: CANVAS_HEIGHT,
            max_history: MAX_HISTORY_ENTRIES,
            default_color: DEFAULT_COLOR.to_owned(),
            default_line_width: DEFAULT_LINE_WIDTH,
        }
    }
}

/// Core engine state: all logic that doesn't depend on the visible canvas.
///
/// Generic over the [`Raster`] so it can be tested without WASM/browser
/// dependencies.
pub struct EngineCore<R: Raster> {
    pub raster: R,
    pub viewport: Viewport,
    pub ui: UiState,
    pub mode: InteractionMode,
    pub history: History,
    pub text: TextLayer,
    pub circles: Vec<Circle>,
    pub compositor: Compositor,
}

impl<R: Raster> EngineCore<R> {
    #[must_use]
    pub fn new(raster: R) -> Self {
        Self::with_config(raster, &EngineConfig::default())
    }

    #[must_use]
    pub fn with_config(raster: R, config: &EngineConfig) -> Self {
        let mut ui = UiState { color: config.default_color.clone(), ..UiState::default() };
        ui.set_line_width(config.default_line_width);
        Self {
            raster,
            viewport: Viewport::default(),
            ui,
            mode: InteractionMode::Idle,
            history: History::new(config.max_history),
            text: TextLayer::new(),
            circles: Vec::new(),
            compositor: Compositor::new(),
        }
    }

    // --- Toolbar ---

    /// Select `tool`. Re-selecting the active text or compass tool deselects it.
    pub fn select_tool(&mut self, tool: Tool) -> Vec<Action> {
        let next = if self.ui.tool == Some(tool) && matches!(tool, Tool::Text | Tool::Compass) {
            None
        } else {
            Some(tool)
        };
        self.switch_tool(next)
    }

    /// Put the toolbar in its neutral state.
    pub fn clear_tool(&mut self) -> Vec<Action> {
        self.switch_tool(None)
    }

    /// Show or hide the ruler. Showing it selects the line tool.
    pub fn toggle_ruler(&mut self) -> Vec<Action> {
        let show = !self.ui.ruler.visible;
        let actions = self.switch_tool(if show { Some(Tool::Line) } else { None });
        self.ui.ruler.visible = show;
        actions
    }

    pub fn set_color(&mut self, color: &str) {
        color.clone_into(&mut self.ui.color);
    }

    pub fn set_line_width(&mut self, width: f64) {
        self.ui.set_line_width(width);
    }

    pub fn zoom_in(&mut self) -> Vec<Action> {
        self.viewport.zoom_by(ZOOM_IN_FACTOR);
        vec![Action::RenderNeeded]
    }

    pub fn zoom_out(&mut self) -> Vec<Action> {
        self.viewport.zoom_by(ZOOM_OUT_FACTOR);
        vec![Action::RenderNeeded]
    }

    pub fn set_scale(&mut self, scale: f64) -> Vec<Action> {
        self.viewport.set_scale(scale);
        vec![Action::RenderNeeded]
    }

    fn switch_tool(&mut self, tool: Option<Tool>) -> Vec<Action> {
        let mut actions = Vec::new();
        self.abandon(&mut actions);
        self.ui.tool = tool;
        self.ui.compass.angle = 0.0;
        actions.push(Action::SetCursor(cursor_for(tool).to_owned()));
        actions.push(Action::RenderNeeded);
        actions
    }

    // --- Pointer input ---

    /// Handle a pointer press at an element-relative screen position.
    pub fn on_pointer_down(&mut self, screen_pt: Point, button: Button) -> Vec<Action> {
        if button != Button::Primary || self.mode.captures_pointer() {
            return Vec::new();
        }
        let pt = self.viewport.screen_to_canvas(screen_pt);
        let mut actions = Vec::new();

        if let InteractionMode::EditingText(_) = self.mode {
            self.mode = InteractionMode::Idle;
            actions.push(Action::DraftClosed);
        }

        if self.ui.ruler.visible && self.ui.ruler.bounds().contains(pt) && self.mode == InteractionMode::Idle {
            let origin = self.ui.ruler.position;
            self.begin(InteractionMode::DraggingRuler { grab: pt.sub(origin), origin }, &mut actions);
            return actions;
        }

        if let Some(index) = self.hit_text_box(pt) {
            let origin = self.text.get(index).map_or(pt, TextBox::anchor);
            self.begin(InteractionMode::DraggingTextBox { index, grab: pt.sub(origin), origin }, &mut actions);
            return actions;
        }

        match self.ui.tool {
            Some(tool) if tool.paints_raster() && self.compositor.is_restoring() => {
                log::debug!("ignoring {tool:?} press while a restore is pending");
            }
            Some(Tool::Pen) => self.begin(InteractionMode::Stroking { last: pt }, &mut actions),
            Some(Tool::Eraser) => self.begin(InteractionMode::Erasing, &mut actions),
            Some(Tool::Line) => self.begin(InteractionMode::PlacingLine { start: pt }, &mut actions),
            Some(Tool::Text) => {
                self.mode = InteractionMode::EditingText(TextLayer::open_draft(pt));
                actions.push(Action::DraftOpened { at: pt });
                actions.push(Action::RenderNeeded);
            }
            Some(Tool::Compass) => self.compass_down(pt, &mut actions),
            None => {}
        }
        actions
    }

    /// Handle pointer motion at an element-relative screen position.
    pub fn on_pointer_move(&mut self, screen_pt: Point) -> Vec<Action> {
        let pt = self.viewport.screen_to_canvas(screen_pt);
        match &mut self.mode {
            InteractionMode::Stroking { last } => {
                let from = std::mem::replace(last, pt);
                let style = self.stroke_style();
                report_raster_error("stroke", self.raster.stroke_segment(from, pt, &style));
            }
            InteractionMode::Erasing => {
                report_raster_error("erase", self.raster.clear_rect(eraser_rect(pt, self.ui.line_width)));
            }
            InteractionMode::DraggingRuler { grab, .. } => self.ui.ruler.position = pt.sub(*grab),
            InteractionMode::DraggingCompass { grab, .. } => self.ui.compass.position = pt.sub(*grab),
            InteractionMode::ConstructingCircle { pivot, current } => {
                *current = pt;
                self.ui.compass.angle = compass_angle(*pivot, pt);
            }
            InteractionMode::DraggingTextBox { index, grab, .. } => {
                if let Some(from) = self.text.get(*index).map(TextBox::anchor) {
                    let delta = pt.sub(*grab).sub(from);
                    self.text.drag(*index, delta.x, delta.y);
                }
            }
            InteractionMode::PlacingLine { .. }
            | InteractionMode::Idle
            | InteractionMode::PivotSet { .. }
            | InteractionMode::EditingText(_) => return Vec::new(),
        }
        vec![Action::RenderNeeded]
    }

    /// Handle a pointer release at an element-relative screen position.
    pub fn on_pointer_up(&mut self, screen_pt: Point) -> Vec<Action> {
        if !self.mode.captures_pointer() {
            return Vec::new();
        }
        let pt = self.viewport.screen_to_canvas(screen_pt);
        let mut actions = vec![Action::ReleasePointer];

        match std::mem::take(&mut self.mode) {
            InteractionMode::Stroking { .. } | InteractionMode::Erasing => self.checkpoint(&mut actions),
            InteractionMode::PlacingLine { start } => {
                let seg = snap_line(start, pt);
                let style = self.stroke_style();
                report_raster_error("line", self.raster.stroke_segment(seg.from, seg.to, &style));
                self.checkpoint(&mut actions);
            }
            InteractionMode::ConstructingCircle { pivot, .. } => {
                self.circles.push(circle_from(pivot, pt, &self.ui.color));
                self.ui.compass.angle = 0.0;
                self.checkpoint(&mut actions);
            }
            InteractionMode::DraggingTextBox { index, origin, .. } => {
                if self.text.get(index).is_some_and(|tb| tb.anchor() != origin) {
                    self.checkpoint(&mut actions);
                }
            }
            InteractionMode::DraggingRuler { .. }
            | InteractionMode::DraggingCompass { .. }
            | InteractionMode::Idle
            | InteractionMode::PivotSet { .. }
            | InteractionMode::EditingText(_) => {}
        }
        actions.push(Action::RenderNeeded);
        actions
    }

    /// The pointer was lost mid-gesture (e.g. the window blurred).
    ///
    /// Strokes keep what was drawn, lines and circles are discarded, drags
    /// return to where they started.
    pub fn on_pointer_cancel(&mut self) -> Vec<Action> {
        if !self.mode.captures_pointer() {
            return Vec::new();
        }
        let mut actions = Vec::new();
        self.abandon(&mut actions);
        actions.push(Action::RenderNeeded);
        actions
    }

    fn compass_down(&mut self, pt: Point, actions: &mut Vec<Action>) {
        match self.mode {
            InteractionMode::PivotSet { pivot } => {
                self.ui.compass.angle = compass_angle(pivot, pt);
                self.begin(InteractionMode::ConstructingCircle { pivot, current: pt }, actions);
            }
            _ if self.ui.compass.bounds().contains(pt) => {
                let origin = self.ui.compass.position;
                self.begin(InteractionMode::DraggingCompass { grab: pt.sub(origin), origin }, actions);
            }
            _ => {
                self.mode = InteractionMode::PivotSet { pivot: pt };
                actions.push(Action::RenderNeeded);
            }
        }
    }

    fn begin(&mut self, mode: InteractionMode, actions: &mut Vec<Action>) {
        self.mode = mode;
        actions.push(Action::CapturePointer);
        actions.push(Action::RenderNeeded);
    }

    /// End whatever is in progress without completing it.
    fn abandon(&mut self, actions: &mut Vec<Action>) {
        let mode = std::mem::take(&mut self.mode);
        if mode.captures_pointer() {
            actions.push(Action::ReleasePointer);
        }
        match mode {
            InteractionMode::Stroking { .. } | InteractionMode::Erasing => self.checkpoint(actions),
            InteractionMode::DraggingRuler { origin, .. } => self.ui.ruler.position = origin,
            InteractionMode::DraggingCompass { origin, .. } => self.ui.compass.position = origin,
            InteractionMode::DraggingTextBox { index, origin, .. } => {
                self.text.move_to(index, origin);
            }
            InteractionMode::ConstructingCircle { .. } => self.ui.compass.angle = 0.0,
            InteractionMode::EditingText(_) => actions.push(Action::DraftClosed),
            InteractionMode::Idle | InteractionMode::PlacingLine { .. } | InteractionMode::PivotSet { .. } => {}
        }
    }

    fn hit_text_box(&self, pt: Point) -> Option<usize> {
        if self.mode != InteractionMode::Idle {
            return None;
        }
        self.text.hit(pt)
    }

    fn stroke_style(&self) -> StrokeStyle {
        StrokeStyle { color: self.ui.color.clone(), width: self.ui.line_width }
    }

    // --- Text drafts ---

    /// Apply an edit to the open draft. No-op without a draft.
    pub fn edit_draft(&mut self, edit: DraftEdit) -> Vec<Action> {
        let InteractionMode::EditingText(draft) = &mut self.mode else {
            return Vec::new();
        };
        edit.apply(draft);
        vec![Action::RenderNeeded]
    }

    /// Commit the open draft as a text box.
    pub fn commit_draft(&mut self) -> Vec<Action> {
        let InteractionMode::EditingText(draft) = std::mem::take(&mut self.mode) else {
            return Vec::new();
        };
        self.text.commit(draft);
        let mut actions = vec![Action::DraftClosed];
        self.checkpoint(&mut actions);
        actions.push(Action::RenderNeeded);
        actions
    }

    /// Discard the open draft.
    pub fn cancel_draft(&mut self) -> Vec<Action> {
        let InteractionMode::EditingText(_) = self.mode else {
            return Vec::new();
        };
        self.mode = InteractionMode::Idle;
        vec![Action::DraftClosed, Action::RenderNeeded]
    }

    // --- History ---

    /// Record the current canvas as a checkpoint.
    ///
    /// While a restore is pending the raster is not yet the state on screen,
    /// so the checkpoint is taken when the decode lands instead.
    fn checkpoint(&mut self, actions: &mut Vec<Action>) {
        if self.compositor.defer_checkpoint() {
            log::debug!("checkpoint deferred until the pending restore lands");
            return;
        }
        match self.raster.snapshot() {
            Ok(snapshot) => {
                let entry = HistoryEntry {
                    snapshot: Some(snapshot),
                    text_boxes: self.text.boxes().to_vec(),
                    circles: self.circles.clone(),
                };
                if self.history.checkpoint(entry) {
                    actions.push(Action::Checkpointed);
                }
            }
            Err(err) => log::warn!("checkpoint skipped: {err}"),
        }
    }

    pub fn undo(&mut self) -> Vec<Action> {
        let mut actions = Vec::new();
        self.abandon(&mut actions);
        if let Some(entry) = self.history.undo() {
            self.restore(entry, false, &mut actions);
        }
        actions.push(Action::RenderNeeded);
        actions
    }

    pub fn redo(&mut self) -> Vec<Action> {
        let mut actions = Vec::new();
        self.abandon(&mut actions);
        if let Some(entry) = self.history.redo() {
            self.restore(entry, false, &mut actions);
        }
        actions.push(Action::RenderNeeded);
        actions
    }

    /// Show `entry`. Vector layers apply now; a snapshot is restored once the
    /// host has decoded it.
    fn restore(&mut self, entry: HistoryEntry, checkpoint_after: bool, actions: &mut Vec<Action>) {
        self.text.replace(entry.text_boxes.clone());
        self.circles.clone_from(&entry.circles);

        match entry.snapshot.clone() {
            Some(snapshot) => {
                let ticket = self.compositor.request_decode(snapshot, PendingRestore { entry, checkpoint_after });
                actions.push(Action::DecodeRequested(ticket));
            }
            None => {
                self.compositor.invalidate();
                report_raster_error("clear", self.raster.clear());
                if checkpoint_after {
                    self.checkpoint(actions);
                }
            }
        }
    }

    /// Finish a restore once the host has decoded its snapshot.
    ///
    /// Stale tickets are dropped. Only the raster changes here: the vector
    /// layers were applied when the restore started and may have been edited
    /// since. A failed decode leaves an empty background under them.
    pub fn on_decode_complete(&mut self, ticket: &DecodeTicket, result: Result<R::Image, DecodeError>) -> Vec<Action> {
        let Some(restore) = self.compositor.finish_decode(ticket) else {
            log::debug!("dropping stale decode (generation {})", ticket.generation());
            return Vec::new();
        };

        match result {
            Ok(image) => {
                if let Err(err) = self.raster.restore(&image) {
                    log::warn!("restore failed, clearing background: {err}");
                    report_raster_error("clear", self.raster.clear());
                }
            }
            Err(err) => {
                log::warn!("{err}; clearing background");
                report_raster_error("clear", self.raster.clear());
            }
        }

        let mut actions = Vec::new();
        if restore.checkpoint_after {
            self.checkpoint(&mut actions);
        }
        actions.push(Action::RenderNeeded);
        actions
    }

    // --- Boards ---

    /// Replace the canvas with a saved board. History restarts from it.
    pub fn load_board(&mut self, content: &BoardContent) -> Vec<Action> {
        let mut actions = Vec::new();
        self.abandon(&mut actions);
        self.history.clear();
        self.ui.tool = content.tool;
        self.ui.color.clone_from(&content.color);
        self.ui.set_line_width(content.line_width);
        self.ui.compass.angle = 0.0;
        actions.push(Action::SetCursor(cursor_for(content.tool).to_owned()));
        self.restore(content.to_entry(), true, &mut actions);
        actions.push(Action::RenderNeeded);
        actions
    }

    /// The board as it would be saved now.
    ///
    /// While a restore is pending the snapshot being restored is used, not the
    /// stale raster.
    ///
    /// # Errors
    ///
    /// Returns `RasterError::Encode` if the raster cannot be snapshotted.
    pub fn board_content(&self) -> Result<BoardContent, RasterError> {
        let snapshot = match self.compositor.pending_entry() {
            Some(entry) => entry.snapshot.clone(),
            None => Some(self.raster.snapshot()?),
        };
        Ok(BoardContent {
            snapshot,
            tool: self.ui.tool,
            color: self.ui.color.clone(),
            line_width: self.ui.line_width,
            text_boxes: self.text.boxes().to_vec(),
            circles: self.circles.clone(),
        })
    }

    /// Checkpoint and return the content to save.
    ///
    /// # Errors
    ///
    /// Returns `RasterError::Encode` if the raster cannot be snapshotted.
    pub fn prepare_save(&mut self) -> Result<BoardContent, RasterError> {
        let mut actions = Vec::new();
        self.checkpoint(&mut actions);
        self.board_content()
    }

    /// Back to a blank canvas with no tool selected.
    pub fn reset(&mut self) -> Vec<Action> {
        let mut actions = Vec::new();
        let mode = std::mem::take(&mut self.mode);
        if mode.captures_pointer() {
            actions.push(Action::ReleasePointer);
        }
        if mode.draft().is_some() {
            actions.push(Action::DraftClosed);
        }

        self.compositor.invalidate();
        report_raster_error("clear", self.raster.clear());
        self.history.clear();
        self.circles.clear();
        self.text.reset();
        self.viewport = Viewport::default();
        self.ui.tool = None;
        self.ui.ruler = UiState::default().ruler;
        self.ui.compass = UiState::default().compass;

        actions.push(Action::SetCursor(cursor_for(None).to_owned()));
        actions.push(Action::RenderNeeded);
        actions
    }

    // --- Queries ---

    /// The display list for the current state.
    #[must_use]
    pub fn frame(&self) -> Frame {
        compositor::compose(&Scene {
            width: f64::from(self.raster.width()),
            height: f64::from(self.raster.height()),
            scale: self.viewport.scale(),
            circles: &self.circles,
            text_boxes: self.text.boxes(),
            mode: &self.mode,
            ui: &self.ui,
        })
    }

    #[must_use]
    pub fn tool(&self) -> Option<Tool> {
        self.ui.tool
    }

    #[must_use]
    pub fn scale(&self) -> f64 {
        self.viewport.scale()
    }

    /// The open draft, if any.
    #[must_use]
    pub fn draft(&self) -> Option<&TextBox> {
        self.mode.draft()
    }

    #[must_use]
    pub fn can_undo(&self) -> bool {
        self.history.can_undo()
    }

    #[must_use]
    pub fn can_redo(&self) -> bool {
        self.history.can_redo()
    }
}

fn cursor_for(tool: Option<Tool>) -> &'static str {
    match tool {
        Some(Tool::Pen | Tool::Line | Tool::Compass) => "crosshair",
        Some(Tool::Eraser) => "cell",
        Some(Tool::Text) => "text",
        None => "default",
    }
}

fn report_raster_error(op: &str, result: Result<(), RasterError>) {
    if let Err(err) = result {
        log::warn!("{op} failed: {err}");
    }
}

/// The full canvas engine. Wraps `EngineCore` and owns the visible canvas element.
pub struct Engine {
    canvas: HtmlCanvasElement,
    ctx: CanvasRenderingContext2d,
    pub core: EngineCore<CanvasRaster>,
}

impl Engine {
    /// Create an engine drawing to `canvas`, with an offscreen stroke raster.
    ///
    /// # Errors
    ///
    /// Returns `Err` if a 2D context or the offscreen canvas cannot be created.
    pub fn new(canvas: HtmlCanvasElement) -> Result<Self, wasm_bindgen::JsValue> {
        Self::with_config(canvas, &EngineConfig::default())
    }

    /// # Errors
    ///
    /// Returns `Err` if a 2D context or the offscreen canvas cannot be created.
    pub fn with_config(canvas: HtmlCanvasElement, config: &EngineConfig) -> Result<Self, wasm_bindgen::JsValue> {
        let raster = CanvasRaster::new(config.width, config.height)?;
        let ctx = context_2d(&canvas)?;
        Ok(Self { canvas, ctx, core: EngineCore::with_config(raster, config) })
    }

    // --- Delegated toolbar ---

    pub fn select_tool(&mut self, tool: Tool) -> Vec<Action> {
        self.core.select_tool(tool)
    }

    pub fn clear_tool(&mut self) -> Vec<Action> {
        self.core.clear_tool()
    }

    pub fn toggle_ruler(&mut self) -> Vec<Action> {
        self.core.toggle_ruler()
    }

    pub fn set_color(&mut self, color: &str) {
        self.core.set_color(color);
    }

    pub fn set_line_width(&mut self, width: f64) {
        self.core.set_line_width(width);
    }

    pub fn zoom_in(&mut self) -> Vec<Action> {
        self.core.zoom_in()
    }

    pub fn zoom_out(&mut self) -> Vec<Action> {
        self.core.zoom_out()
    }

    pub fn undo(&mut self) -> Vec<Action> {
        self.core.undo()
    }

    pub fn redo(&mut self) -> Vec<Action> {
        self.core.redo()
    }

    pub fn reset(&mut self) -> Vec<Action> {
        self.core.reset()
    }

    // --- Input events ---

    pub fn on_pointer_down(&mut self, screen_pt: Point, button: Button) -> Vec<Action> {
        self.core.on_pointer_down(screen_pt, button)
    }

    pub fn on_pointer_move(&mut self, screen_pt: Point) -> Vec<Action> {
        self.core.on_pointer_move(screen_pt)
    }

    pub fn on_pointer_up(&mut self, screen_pt: Point) -> Vec<Action> {
        self.core.on_pointer_up(screen_pt)
    }

    pub fn on_pointer_cancel(&mut self) -> Vec<Action> {
        self.core.on_pointer_cancel()
    }

    pub fn edit_draft(&mut self, edit: DraftEdit) -> Vec<Action> {
        self.core.edit_draft(edit)
    }

    pub fn commit_draft(&mut self) -> Vec<Action> {
        self.core.commit_draft()
    }

    pub fn cancel_draft(&mut self) -> Vec<Action> {
        self.core.cancel_draft()
    }

    pub fn on_decode_complete(
        &mut self,
        ticket: &DecodeTicket,
        result: Result<web_sys::HtmlImageElement, DecodeError>,
    ) -> Vec<Action> {
        self.core.on_decode_complete(ticket, result)
    }

    // --- Boards ---

    pub fn load_board(&mut self, content: &BoardContent) -> Vec<Action> {
        self.core.load_board(content)
    }

    /// # Errors
    ///
    /// Returns `RasterError::Encode` if the raster cannot be snapshotted.
    pub fn prepare_save(&mut self) -> Result<BoardContent, RasterError> {
        self.core.prepare_save()
    }

    // --- Render ---

    /// Draw the current state to the canvas, resizing it to the zoomed raster.
    ///
    /// # Errors
    ///
    /// Returns `Err` if any `Canvas2D` call fails.
    pub fn render(&self) -> Result<(), wasm_bindgen::JsValue> {
        let frame = self.core.frame();
        let width = scaled_px(frame.width, frame.scale);
        let height = scaled_px(frame.height, frame.scale);
        if self.canvas.width() != width {
            self.canvas.set_width(width);
        }
        if self.canvas.height() != height {
            self.canvas.set_height(height);
        }
        render::draw(&self.ctx, &frame, self.core.raster.element())
    }
}

#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn scaled_px(len: f64, scale: f64) -> u32 {
    (len * scale).round().max(0.0) as u32
}
