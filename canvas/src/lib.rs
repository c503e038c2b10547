//! Canvas core for the whiteboard: drawing tools, layers, and undo history.
//!
//! This crate is compiled to WebAssembly and runs in the browser. It owns the
//! full lifecycle of the drawing surface: translating raw pointer events into
//! raster strokes and vector overlays, keeping the undo/redo history, and
//! composing the visible frame. The host JavaScript layer is responsible only
//! for wiring DOM events to the engine, decoding snapshots when asked, and
//! persisting the resulting [`doc::BoardContent`].
//!
//! ## Module layout
//!
//! | Module | Role |
//! |--------|------|
//! | [`engine`] | Top-level engine and testable [`engine::EngineCore`] |
//! | [`input`] | Tools, toolbar state and the interaction mode |
//! | [`doc`] | Snapshots, circles, text boxes, history entries, board content |
//! | [`geometry`] | Compass circles, snapped lines, eraser and hit regions |
//! | [`history`] | Bounded linear undo/redo |
//! | [`text`] | Committed text boxes, drafts and their hit regions |
//! | [`compositor`] | Frame display list and the stale-decode guard |
//! | [`raster`] | The stroke raster trait and its offscreen-canvas backend |
//! | [`render`] | Replays a frame onto the visible 2D context |
//! | [`viewport`] | Zoom and the screen → canvas conversion |
//! | [`consts`] | Shared constants (sizes, limits, default styles) |

pub mod compositor;
pub mod consts;
pub mod doc;
pub mod engine;
pub mod geometry;
pub mod history;
pub mod input;
pub mod raster;
pub mod render;
pub mod text;
pub mod viewport;

#[cfg(test)]
pub(crate) mod testing;
