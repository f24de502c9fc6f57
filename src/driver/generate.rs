use crate::animation::slide::AnimationSpec;
use crate::assets::decode::ImageDecoder;
use crate::caption::compose::compose;
use crate::config::{CanvasSizing, CaptionedItem, GridConfig, ReelConfig, check_canvas};
use crate::driver::plan::FramePlan;
use crate::driver::run::{RenderStats, run};
use crate::encode::sink::FrameSink;
use crate::foundation::core::{Fps, Size};
use crate::foundation::error::{ReelError, ReelResult};
use crate::layout::canvas::{Background, CanvasSpec, layout};
use crate::layout::grid::uniform_flow_size;
use crate::raster::Frame;
use crate::raster::buffer::RasterBuffer;
use crate::text::renderer::TextRenderer;
use crate::tile::preprocess::{FitMode, preprocess};

/// Decoded, captioned batches plus the fixed geometry they render on.
///
/// Everything that can fail on input data fails while preparing, so rendering never starts on a
/// reel it cannot finish.
#[derive(Debug)]
pub struct PreparedReel {
    batches: Vec<Vec<RasterBuffer>>,
    canvas: CanvasSpec,
    anim: AnimationSpec,
    fps: Fps,
}

impl PreparedReel {
    /// Decode, fit and caption every item, then fix the canvas.
    ///
    /// Errors from an item are tagged with the index of the batch it belongs to.
    #[tracing::instrument(skip_all, fields(items = items.len()))]
    pub fn prepare(
        items: &[CaptionedItem],
        config: &ReelConfig,
        decoder: &dyn ImageDecoder,
        text: &mut dyn TextRenderer,
    ) -> ReelResult<Self> {
        config.validate()?;
        let fps = config.fps()?;
        let anim = config.animation_spec()?;

        let mut batches = Vec::with_capacity(items.len().div_ceil(config.batch_size));
        for (index, chunk) in items.chunks(config.batch_size).enumerate() {
            let batch = chunk
                .iter()
                .map(|item| prepare_tile(item, config, decoder, text))
                .collect::<ReelResult<Vec<_>>>()
                .map_err(|e| e.in_batch(index))?;
            batches.push(batch);
        }

        let size = canvas_size(config, &batches)?;
        let background = match &config.layout.background_image {
            Some(resource) => Background::Image(background_image(resource, size, config, decoder)?),
            None => Background::Fill(config.layout.background_color),
        };
        let canvas = CanvasSpec::new(
            size,
            config.layout.spacing(),
            config.grid_strategy()?,
            background,
        )?;
        tracing::info!(
            batches = batches.len(),
            width = size.width,
            height = size.height,
            "reel prepared"
        );

        Ok(Self {
            batches,
            canvas,
            anim,
            fps,
        })
    }

    /// Captioned tiles, grouped by batch.
    pub fn batches(&self) -> &[Vec<RasterBuffer>] {
        &self.batches
    }

    /// Frame geometry and background.
    pub fn canvas(&self) -> &CanvasSpec {
        &self.canvas
    }

    /// Slide and hold counts.
    pub fn animation(&self) -> &AnimationSpec {
        &self.anim
    }

    /// Frame counts the render will produce.
    pub fn plan(&self) -> FramePlan {
        FramePlan::new(
            self.canvas.size(),
            self.batches.iter().map(Vec::len),
            &self.anim,
        )
    }

    /// Lay out a single frame of batch `index` shifted by `x_offset`.
    pub fn frame(&self, index: usize, x_offset: i64) -> ReelResult<Frame> {
        let batch = self.batches.get(index).ok_or_else(|| {
            ReelError::validation(format!(
                "batch {index} out of range (reel has {})",
                self.batches.len()
            ))
        })?;
        layout(batch, &self.canvas, x_offset)
    }

    /// Stream the whole reel to `sink`.
    pub fn render(&self, sink: &mut dyn FrameSink) -> ReelResult<RenderStats> {
        run(&self.batches, &self.canvas, &self.anim, self.fps, sink)
    }
}

/// Decode, fit and caption one item.
pub fn prepare_tile(
    item: &CaptionedItem,
    config: &ReelConfig,
    decoder: &dyn ImageDecoder,
    text: &mut dyn TextRenderer,
) -> ReelResult<RasterBuffer> {
    let source = decoder.decode(&item.image)?;
    let tile = preprocess(&source, config.tile.width, config.tile.height, config.tile.fit)?;
    compose(&tile, &item.caption, &config.caption, text)
}

fn canvas_size(config: &ReelConfig, batches: &[Vec<RasterBuffer>]) -> ReelResult<Size> {
    let size = match (config.layout.canvas, config.layout.grid) {
        (CanvasSizing::Fixed { width, height }, _) => Size::new(width, height),
        (CanvasSizing::Derived, GridConfig::Quad { .. }) => {
            config.quad_canvas_size()?.round_up_even()
        }
        (CanvasSizing::Derived, GridConfig::Flow { per_row }) => {
            uniform_flow_size(batches, per_row, config.layout.spacing())?.round_up_even()
        }
    };
    check_canvas(size)?;
    Ok(size)
}

fn background_image(
    resource: &str,
    size: Size,
    config: &ReelConfig,
    decoder: &dyn ImageDecoder,
) -> ReelResult<RasterBuffer> {
    let source = decoder.decode(resource)?;
    let mut bg = preprocess(&source, size.width, size.height, FitMode::Stretch)?;
    bg.flatten_over(config.layout.background_color);
    Ok(bg)
}

/// Turn `items` into a video written to `sink`.
///
/// Every batch is prepared before the sink is opened, so a bad image or caption leaves no partial
/// output behind.
pub fn generate_video(
    items: &[CaptionedItem],
    config: &ReelConfig,
    decoder: &dyn ImageDecoder,
    text: &mut dyn TextRenderer,
    sink: &mut dyn FrameSink,
) -> ReelResult<RenderStats> {
    PreparedReel::prepare(items, config, decoder, text)?.render(sink)
}

#[cfg(test)]
#[path = "../../tests/unit/driver/generate.rs"]
mod tests;
