//! In-memory raster for native tests.
//!
//! Records every primitive as text, so a snapshot is the exact drawing
//! history and restoring it reproduces the same snapshot.

use crate::doc::Snapshot;
use crate::geometry::Rect;
use crate::raster::{Raster, RasterError, StrokeStyle};
use crate::viewport::Point;

#[derive(Debug, Clone, Default)]
pub struct MemoryRaster {
    pub content: String,
    pub fail_snapshot: bool,
}

impl MemoryRaster {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of primitives recorded since the last clear/restore.
    pub fn op_count(&self) -> usize {
        self.content.split(';').filter(|s| !s.is_empty()).count()
    }
}

impl Raster for MemoryRaster {
    type Image = String;

    fn width(&self) -> u32 {
        64
    }

    fn height(&self) -> u32 {
        64
    }

    fn stroke_segment(&mut self, from: Point, to: Point, style: &StrokeStyle) -> Result<(), RasterError> {
        self.content.push_str(&format!(
            "L{},{}>{},{}:{}:{};",
            from.x, from.y, to.x, to.y, style.color, style.width
        ));
        Ok(())
    }

    fn clear_rect(&mut self, rect: Rect) -> Result<(), RasterError> {
        if rect.x <= 0.0 && rect.y <= 0.0 && rect.width >= 64.0 && rect.height >= 64.0 {
            self.content.clear();
        } else {
            self.content
                .push_str(&format!("C{},{},{},{};", rect.x, rect.y, rect.width, rect.height));
        }
        Ok(())
    }

    fn snapshot(&self) -> Result<Snapshot, RasterError> {
        if self.fail_snapshot {
            return Err(RasterError::Encode("forced".into()));
        }
        Ok(Snapshot::new(format!("mem:{}", self.content)))
    }

    fn restore(&mut self, image: &String) -> Result<(), RasterError> {
        self.content = image.strip_prefix("mem:").unwrap_or(image).to_owned();
        Ok(())
    }
}
