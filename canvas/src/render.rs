//! Rendering: replays a [`Frame`] onto a 2D context.
//!
//! This module is the only place that draws to the visible
//! [`web_sys::CanvasRenderingContext2d`]. It receives a finished display list
//! and produces pixels; it does not mutate any application state.
//!
//! All fallible `Canvas2D` calls propagate errors via `Result<(), JsValue>`.
//! The top-level caller ([`crate::engine::Engine::render`]) handles the result.

use std::f64::consts::PI;

use wasm_bindgen::JsValue;
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement};

use crate::compositor::{DrawOp, Frame};
use crate::geometry::Rect;
use crate::viewport::Point;

/// Radius of the compass pivot marker.
const PIVOT_RADIUS: f64 = 4.0;

/// Dash length of the draft outline.
const DRAFT_DASH: f64 = 4.0;

/// Spacing between ruler ticks.
const RULER_TICK_SPACING: f64 = 10.0;

/// Draw `frame`, using `raster` as the background layer.
///
/// The transform is reset before scaling so zoom never compounds across
/// frames.
///
/// # Errors
///
/// Returns `Err` if any `Canvas2D` call fails (e.g. invalid context state).
pub fn draw(ctx: &CanvasRenderingContext2d, frame: &Frame, raster: &HtmlCanvasElement) -> Result<(), JsValue> {
    ctx.set_transform(1.0, 0.0, 0.0, 1.0, 0.0, 0.0)?;
    ctx.clear_rect(0.0, 0.0, frame.width * frame.scale, frame.height * frame.scale);
    ctx.scale(frame.scale, frame.scale)?;

    for op in &frame.ops {
        draw_op(ctx, op, raster)?;
    }
    Ok(())
}

fn draw_op(ctx: &CanvasRenderingContext2d, op: &DrawOp, raster: &HtmlCanvasElement) -> Result<(), JsValue> {
    match op {
        DrawOp::Raster => ctx.draw_image_with_html_canvas_element(raster, 0.0, 0.0),
        DrawOp::Ring { center, radius, color, line_width } => draw_ring(ctx, *center, *radius, color, *line_width),
        DrawOp::DashedRing { center, radius, color, dash } => {
            ctx.save();
            set_dash(ctx, *dash)?;
            draw_ring(ctx, *center, *radius, color, 1.0)?;
            ctx.restore();
            Ok(())
        }
        DrawOp::PivotMarker { at } => {
            ctx.begin_path();
            ctx.arc(at.x, at.y, PIVOT_RADIUS, 0.0, 2.0 * PI)?;
            ctx.set_fill_style_str("#E53E3E");
            ctx.fill();
            Ok(())
        }
        DrawOp::Text { center, text, font, size, color, underline } => {
            draw_text(ctx, *center, text, font, *size, color, *underline)
        }
        DrawOp::DraftOutline { bounds } => {
            ctx.save();
            set_dash(ctx, DRAFT_DASH)?;
            ctx.set_stroke_style_str("#1E90FF");
            ctx.set_line_width(1.0);
            ctx.stroke_rect(bounds.x, bounds.y, bounds.width, bounds.height);
            ctx.restore();
            Ok(())
        }
        DrawOp::Ruler { bounds } => {
            draw_ruler(ctx, *bounds);
            Ok(())
        }
        DrawOp::CompassIcon { bounds, angle } => draw_compass(ctx, *bounds, *angle),
    }
}

fn draw_ring(ctx: &CanvasRenderingContext2d, center: Point, radius: f64, color: &str, width: f64) -> Result<(), JsValue> {
    ctx.begin_path();
    ctx.arc(center.x, center.y, radius, 0.0, 2.0 * PI)?;
    ctx.set_stroke_style_str(color);
    ctx.set_line_width(width);
    ctx.stroke();
    Ok(())
}

fn draw_text(
    ctx: &CanvasRenderingContext2d,
    center: Point,
    text: &str,
    font: &str,
    size: f64,
    color: &str,
    underline: bool,
) -> Result<(), JsValue> {
    ctx.save();
    ctx.set_font(font);
    ctx.set_fill_style_str(color);
    ctx.set_text_align("center");
    ctx.set_text_baseline("middle");
    ctx.fill_text(text, center.x, center.y)?;

    if underline && !text.is_empty() {
        let width = ctx.measure_text(text).map_or(0.0, |m| m.width());
        let y = center.y + size * 0.5;
        ctx.begin_path();
        ctx.move_to(center.x - width / 2.0, y);
        ctx.line_to(center.x + width / 2.0, y);
        ctx.set_stroke_style_str(color);
        ctx.set_line_width((size / 15.0).max(1.0));
        ctx.stroke();
    }

    ctx.restore();
    Ok(())
}

fn draw_ruler(ctx: &CanvasRenderingContext2d, bounds: Rect) {
    ctx.save();
    ctx.set_fill_style_str("rgba(255, 236, 179, 0.85)");
    ctx.fill_rect(bounds.x, bounds.y, bounds.width, bounds.height);
    ctx.set_stroke_style_str("#8D6E63");
    ctx.set_line_width(1.0);
    ctx.stroke_rect(bounds.x, bounds.y, bounds.width, bounds.height);

    ctx.begin_path();
    let mut offset = RULER_TICK_SPACING;
    let mut tick = 1_u32;
    while offset < bounds.width {
        let len = if tick % 5 == 0 { bounds.height * 0.5 } else { bounds.height * 0.25 };
        ctx.move_to(bounds.x + offset, bounds.y);
        ctx.line_to(bounds.x + offset, bounds.y + len);
        offset += RULER_TICK_SPACING;
        tick += 1;
    }
    ctx.stroke();
    ctx.restore();
}

/// Two legs hinged at the top of the icon, rotated about its centre.
fn draw_compass(ctx: &CanvasRenderingContext2d, bounds: Rect, angle: f64) -> Result<(), JsValue> {
    let cx = bounds.x + bounds.width / 2.0;
    let cy = bounds.y + bounds.height / 2.0;
    let hw = bounds.width / 2.0;
    let hh = bounds.height / 2.0;

    ctx.save();
    ctx.translate(cx, cy)?;
    ctx.rotate(angle)?;

    ctx.set_stroke_style_str("#4A5568");
    ctx.set_line_width(3.0);
    ctx.begin_path();
    ctx.move_to(0.0, -hh);
    ctx.line_to(-hw * 0.5, hh);
    ctx.move_to(0.0, -hh);
    ctx.line_to(hw * 0.5, hh);
    ctx.stroke();

    ctx.begin_path();
    ctx.arc(0.0, -hh, 5.0, 0.0, 2.0 * PI)?;
    ctx.set_fill_style_str("#4A5568");
    ctx.fill();

    ctx.restore();
    Ok(())
}

fn set_dash(ctx: &CanvasRenderingContext2d, dash: f64) -> Result<(), JsValue> {
    let dash_array = js_sys::Array::new();
    dash_array.push(&dash.into());
    dash_array.push(&dash.into());
    ctx.set_line_dash(&dash_array)
}
