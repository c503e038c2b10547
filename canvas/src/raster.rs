//! The stroke raster: a fixed-size bitmap that pen, eraser and line strokes
//! are drawn into immediately.
//!
//! The engine only talks to the [`Raster`] trait. In the browser the raster
//! is an offscreen `<canvas>` ([`CanvasRaster`]); snapshots are PNG data
//! URLs and restoring one needs an asynchronous image decode, which the host
//! performs (see [`decode_snapshot`] on wasm32) before handing the decoded
//! image back through `EngineCore::on_decode_complete`.

use wasm_bindgen::{JsCast, JsValue};
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement, HtmlImageElement};

use crate::doc::Snapshot;
use crate::geometry::Rect;
use crate::viewport::Point;

/// Color and width of a raster stroke.
#[derive(Debug, Clone, PartialEq)]
pub struct StrokeStyle {
    pub color: String,
    pub width: f64,
}

/// Failure reported by a raster backend.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RasterError {
    /// A drawing call on the backing surface failed.
    #[error("raster draw failed: {0}")]
    Draw(String),
    /// The raster could not be encoded as a snapshot.
    #[error("snapshot encode failed: {0}")]
    Encode(String),
}

/// A snapshot could not be turned back into an image.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DecodeError {
    #[error("snapshot could not be decoded: {0}")]
    Invalid(String),
}

/// A fixed-size bitmap mutated only through drawing primitives.
pub trait Raster {
    /// A decoded snapshot, ready to be drawn back into the raster.
    type Image;

    fn width(&self) -> u32;

    fn height(&self) -> u32;

    /// Stroke a round-capped segment.
    ///
    /// # Errors
    ///
    /// Returns `RasterError::Draw` if the backend rejects the call.
    fn stroke_segment(&mut self, from: Point, to: Point, style: &StrokeStyle) -> Result<(), RasterError>;

    /// Make every pixel inside `rect` transparent.
    ///
    /// # Errors
    ///
    /// Returns `RasterError::Draw` if the backend rejects the call.
    fn clear_rect(&mut self, rect: Rect) -> Result<(), RasterError>;

    /// Clear the whole raster.
    ///
    /// # Errors
    ///
    /// Returns `RasterError::Draw` if the backend rejects the call.
    fn clear(&mut self) -> Result<(), RasterError> {
        let rect = Rect::new(0.0, 0.0, f64::from(self.width()), f64::from(self.height()));
        self.clear_rect(rect)
    }

    /// Encode the current pixels.
    ///
    /// # Errors
    ///
    /// Returns `RasterError::Encode` if the pixels cannot be encoded.
    fn snapshot(&self) -> Result<Snapshot, RasterError>;

    /// Replace the current pixels with a decoded snapshot drawn at the origin.
    ///
    /// # Errors
    ///
    /// Returns `RasterError::Draw` if the backend rejects the call.
    fn restore(&mut self, image: &Self::Image) -> Result<(), RasterError>;
}

// =============================================================
// Browser raster
// =============================================================

/// Raster backed by an offscreen `<canvas>` element.
pub struct CanvasRaster {
    canvas: HtmlCanvasElement,
    ctx: CanvasRenderingContext2d,
}

impl CanvasRaster {
    /// Create an offscreen canvas of the given size.
    ///
    /// # Errors
    ///
    /// Returns `Err` if there is no document or the 2D context is unavailable.
    pub fn new(width: u32, height: u32) -> Result<Self, JsValue> {
        let document = web_sys::window()
            .and_then(|w| w.document())
            .ok_or_else(|| JsValue::from_str("no document available"))?;
        let canvas: HtmlCanvasElement = document.create_element("canvas")?.dyn_into()?;
        canvas.set_width(width);
        canvas.set_height(height);
        let ctx = context_2d(&canvas)?;
        ctx.set_line_cap("round");
        ctx.set_line_join("round");
        Ok(Self { canvas, ctx })
    }

    /// The backing element, drawn by the compositor as the background layer.
    #[must_use]
    pub fn element(&self) -> &HtmlCanvasElement {
        &self.canvas
    }
}

impl Raster for CanvasRaster {
    type Image = HtmlImageElement;

    fn width(&self) -> u32 {
        self.canvas.width()
    }

    fn height(&self) -> u32 {
        self.canvas.height()
    }

    fn stroke_segment(&mut self, from: Point, to: Point, style: &StrokeStyle) -> Result<(), RasterError> {
        self.ctx.set_stroke_style_str(&style.color);
        self.ctx.set_line_width(style.width);
        self.ctx.begin_path();
        self.ctx.move_to(from.x, from.y);
        self.ctx.line_to(to.x, to.y);
        self.ctx.stroke();
        Ok(())
    }

    fn clear_rect(&mut self, rect: Rect) -> Result<(), RasterError> {
        self.ctx.clear_rect(rect.x, rect.y, rect.width, rect.height);
        Ok(())
    }

    fn snapshot(&self) -> Result<Snapshot, RasterError> {
        self.canvas
            .to_data_url()
            .map(Snapshot::new)
            .map_err(|e| RasterError::Encode(js_error_text(&e)))
    }

    fn restore(&mut self, image: &HtmlImageElement) -> Result<(), RasterError> {
        self.clear()?;
        self.ctx
            .draw_image_with_html_image_element(image, 0.0, 0.0)
            .map_err(|e| RasterError::Draw(js_error_text(&e)))
    }
}

/// Fetch the 2D context of a canvas element.
///
/// # Errors
///
/// Returns `Err` if the browser refuses to create a 2D context.
pub fn context_2d(canvas: &HtmlCanvasElement) -> Result<CanvasRenderingContext2d, JsValue> {
    canvas
        .get_context("2d")?
        .ok_or_else(|| JsValue::from_str("2d context unavailable"))?
        .dyn_into::<CanvasRenderingContext2d>()
        .map_err(JsValue::from)
}

/// Decode a snapshot into an image element.
///
/// Completes once the browser has fully decoded the image, so the result can
/// be drawn synchronously.
///
/// # Errors
///
/// Returns `DecodeError::Invalid` if the snapshot is not a decodable image.
#[cfg(target_arch = "wasm32")]
pub async fn decode_snapshot(snapshot: &Snapshot) -> Result<HtmlImageElement, DecodeError> {
    let image = HtmlImageElement::new().map_err(|e| DecodeError::Invalid(js_error_text(&e)))?;
    image.set_src(snapshot.as_str());
    wasm_bindgen_futures::JsFuture::from(image.decode())
        .await
        .map_err(|e| DecodeError::Invalid(js_error_text(&e)))?;
    Ok(image)
}

pub(crate) fn js_error_text(err: &JsValue) -> String {
    err.as_string().unwrap_or_else(|| format!("{err:?}"))
}
