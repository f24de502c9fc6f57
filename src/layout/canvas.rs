use crate::foundation::color::Rgb8;
use crate::foundation::core::Size;
use crate::foundation::error::{ReelError, ReelResult};
use crate::layout::grid::{GridStrategy, SlotContent, Spacing, placements};
use crate::raster::Frame;
use crate::raster::buffer::RasterBuffer;

/// What a frame is painted on before tiles are placed.
#[derive(Clone, Debug, PartialEq)]
pub enum Background {
    /// Solid color.
    Fill(Rgb8),
    /// Opaque image already sized to the canvas.
    Image(RasterBuffer),
}

/// Frame geometry shared by every frame of a run.
#[derive(Clone, Debug, PartialEq)]
pub struct CanvasSpec {
    size: Size,
    spacing: Spacing,
    grid: GridStrategy,
    background: Background,
}

impl CanvasSpec {
    /// Validate and assemble a canvas spec.
    pub fn new(
        size: Size,
        spacing: Spacing,
        grid: GridStrategy,
        background: Background,
    ) -> ReelResult<Self> {
        if size.is_empty() {
            return Err(ReelError::validation("canvas width/height must be non-zero"));
        }
        grid.validate()?;
        if let Background::Image(img) = &background {
            if img.size() != size {
                return Err(ReelError::validation(format!(
                    "background image is {}x{}, canvas is {}x{}",
                    img.width(),
                    img.height(),
                    size.width,
                    size.height
                )));
            }
            if !img.is_opaque() {
                return Err(ReelError::validation("background image must be opaque"));
            }
        }
        Ok(Self {
            size,
            spacing,
            grid,
            background,
        })
    }

    /// Frame size.
    pub fn size(&self) -> Size {
        self.size
    }

    /// Padding and gaps.
    pub fn spacing(&self) -> Spacing {
        self.spacing
    }

    /// Slot arrangement.
    pub fn grid(&self) -> &GridStrategy {
        &self.grid
    }

    /// Background paint.
    pub fn background(&self) -> &Background {
        &self.background
    }

    /// A frame containing only the background.
    pub fn base_canvas(&self) -> Frame {
        match &self.background {
            Background::Fill(color) => {
                RasterBuffer::filled(self.size.width, self.size.height, *color)
            }
            Background::Image(img) => img.clone(),
        }
    }
}

/// Composite `batch` onto a fresh canvas with every slot shifted right by `x_offset`.
///
/// A slot is drawn only when its shifted extent lies fully inside the canvas horizontally;
/// otherwise it is left out of this frame entirely. Vertical overflow is clipped.
pub fn layout(batch: &[RasterBuffer], spec: &CanvasSpec, x_offset: i64) -> ReelResult<Frame> {
    let mut canvas = spec.base_canvas();
    let canvas_width = i64::from(spec.size.width);

    for slot in placements(batch, &spec.grid, spec.spacing) {
        let x = slot.origin.x + x_offset;
        if x < 0 || x + i64::from(slot.size.width) > canvas_width {
            continue;
        }
        match slot.content {
            SlotContent::Tile(i) => {
                let tile = batch.get(i).ok_or_else(|| {
                    ReelError::validation(format!("slot refers to missing tile {i}"))
                })?;
                canvas.composite_over(tile, x, slot.origin.y)?;
            }
            SlotContent::Placeholder(color) => {
                canvas.fill_rect(x, slot.origin.y, slot.size.width, slot.size.height, color);
            }
        }
    }
    Ok(canvas)
}

#[cfg(test)]
#[path = "../../tests/unit/layout/canvas.rs"]
mod tests;
