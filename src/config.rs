use crate::animation::ease::Ease;
use crate::animation::slide::AnimationSpec;
use crate::caption::compose::CaptionSpec;
use crate::encode::ffmpeg::VideoCodec;
use crate::foundation::color::Rgb8;
use crate::foundation::core::{Fps, Point, Size};
use crate::foundation::error::{ReelError, ReelResult};
use crate::layout::grid::{GridStrategy, Spacing};
use crate::text::renderer::{ApproxTextRenderer, FontTextRenderer, TextRenderer};
use crate::tile::preprocess::FitMode;
use std::path::{Path, PathBuf};

/// One image and the caption shown beneath it.
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CaptionedItem {
    /// Resource id handed to the image decoder.
    pub image: String,
    /// Caption text; may be empty.
    #[serde(default)]
    pub caption: String,
}

impl CaptionedItem {
    /// Pair an image resource with its caption.
    pub fn new(image: impl Into<String>, caption: impl Into<String>) -> Self {
        Self {
            image: image.into(),
            caption: caption.into(),
        }
    }
}

/// Target size and fit of every tile.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct TileConfig {
    pub width: u32,
    pub height: u32,
    pub fit: FitMode,
}

impl Default for TileConfig {
    fn default() -> Self {
        Self {
            width: 300,
            height: 400,
            fit: FitMode::Cover,
        }
    }
}

/// Slot arrangement as written in config files.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum GridConfig {
    /// 2×2 fixed anchors; empty slots optionally painted.
    Quad {
        #[serde(default)]
        placeholder: Option<Rgb8>,
    },
    /// Rows of `per_row` tiles.
    Flow { per_row: usize },
}

/// How the frame size is chosen.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum CanvasSizing {
    /// Exactly this size.
    Fixed { width: u32, height: u32 },
    /// Smallest size fitting every batch, rounded up to even.
    Derived,
}

/// Frame geometry and background.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct LayoutConfig {
    pub grid: GridConfig,
    pub side_padding: u32,
    pub top_padding: u32,
    pub gap_x: u32,
    pub gap_y: u32,
    pub canvas: CanvasSizing,
    pub background_color: Rgb8,
    /// Resource id of an image stretched over the whole canvas.
    pub background_image: Option<String>,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            grid: GridConfig::Flow { per_row: 2 },
            side_padding: 50,
            top_padding: 30,
            gap_x: 40,
            gap_y: 60,
            canvas: CanvasSizing::Derived,
            background_color: Rgb8::new(10, 40, 90),
            background_image: None,
        }
    }
}

impl LayoutConfig {
    /// Padding and gaps as used by the layout engine.
    pub fn spacing(&self) -> Spacing {
        Spacing {
            side_padding: self.side_padding,
            top_padding: self.top_padding,
            gap_x: self.gap_x,
            gap_y: self.gap_y,
        }
    }
}

/// Everything needed to turn a list of captioned images into a video.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ReelConfig {
    pub fps: u32,
    /// Hold duration of each batch, in seconds.
    pub seconds_per_batch: f64,
    /// Slide-in duration, in seconds.
    pub slide_seconds: f64,
    pub ease: Ease,
    /// Tiles per frame.
    pub batch_size: usize,
    pub tile: TileConfig,
    pub caption: CaptionSpec,
    pub layout: LayoutConfig,
    pub codec: VideoCodec,
    /// Font file for captions. Without one, captions are measured approximately and not drawn.
    pub font: Option<PathBuf>,
    pub items: Vec<CaptionedItem>,
}

impl Default for ReelConfig {
    fn default() -> Self {
        Self {
            fps: 30,
            seconds_per_batch: 3.0,
            slide_seconds: 1.0,
            ease: Ease::Linear,
            batch_size: 4,
            tile: TileConfig::default(),
            caption: CaptionSpec::default(),
            layout: LayoutConfig::default(),
            codec: VideoCodec::default(),
            font: None,
            items: Vec::new(),
        }
    }
}

impl ReelConfig {
    /// Parse a JSON config.
    pub fn from_json(json: &str) -> ReelResult<Self> {
        use anyhow::Context as _;
        let cfg: Self = serde_json::from_str(json).context("parse reel config JSON")?;
        cfg.validate()?;
        Ok(cfg)
    }

    /// Read and parse a JSON config file.
    pub fn from_file(path: &Path) -> ReelResult<Self> {
        use anyhow::Context as _;
        let json = std::fs::read_to_string(path)
            .with_context(|| format!("read config '{}'", path.display()))?;
        Self::from_json(&json)
    }

    /// Reject configurations that cannot render.
    pub fn validate(&self) -> ReelResult<()> {
        self.fps()?;
        self.animation_spec()?;
        if self.tile.width == 0 || self.tile.height == 0 {
            return Err(ReelError::validation("tile width/height must be non-zero"));
        }
        self.caption.validate()?;
        let block = self.block_size()?;
        if block.width > MAX_SIDE || block.height > MAX_SIDE {
            return Err(ReelError::validation(format!(
                "captioned tile {}x{} exceeds {MAX_SIDE} pixels",
                block.width, block.height
            )));
        }
        let l = &self.layout;
        for (name, v) in [
            ("side_padding", l.side_padding),
            ("top_padding", l.top_padding),
            ("gap_x", l.gap_x),
            ("gap_y", l.gap_y),
        ] {
            if v > MAX_SIDE {
                return Err(ReelError::validation(format!(
                    "layout {name} {v} exceeds {MAX_SIDE} pixels"
                )));
            }
        }
        if self.batch_size == 0 {
            return Err(ReelError::validation("batch_size must be > 0"));
        }
        match self.layout.grid {
            GridConfig::Quad { .. } if self.batch_size > 4 => {
                return Err(ReelError::validation(format!(
                    "quad grid holds 4 tiles, batch_size is {}",
                    self.batch_size
                )));
            }
            GridConfig::Flow { per_row: 0 } => {
                return Err(ReelError::validation("flow grid per_row must be > 0"));
            }
            _ => {}
        }
        if let CanvasSizing::Fixed { width, height } = self.layout.canvas {
            check_canvas(Size::new(width, height))?;
        }
        if let Some(item) = self.items.iter().find(|i| i.image.trim().is_empty()) {
            return Err(ReelError::validation(format!(
                "item with caption {:?} has no image",
                item.caption
            )));
        }
        Ok(())
    }

    /// Frame rate.
    pub fn fps(&self) -> ReelResult<Fps> {
        Fps::whole(self.fps)
    }

    /// Slide and hold frame counts.
    pub fn animation_spec(&self) -> ReelResult<AnimationSpec> {
        AnimationSpec::from_timing(
            self.fps()?,
            self.slide_seconds,
            self.seconds_per_batch,
            self.ease,
        )
    }

    /// Size reserved for one captioned tile (tile plus its tallest band).
    pub fn block_size(&self) -> ReelResult<Size> {
        let band = self.caption.max_band_height()?;
        let height = self
            .tile
            .height
            .checked_add(band)
            .ok_or_else(|| ReelError::validation("tile height plus caption band overflows"))?;
        Ok(Size::new(self.tile.width, height))
    }

    /// Grid strategy with anchors resolved against the padding.
    pub fn grid_strategy(&self) -> ReelResult<GridStrategy> {
        let l = &self.layout;
        Ok(match l.grid {
            GridConfig::Quad { placeholder } => GridStrategy::quad(
                Point::new(i64::from(l.side_padding), i64::from(l.top_padding)),
                self.block_size()?,
                l.gap_x,
                l.gap_y,
                placeholder,
            ),
            GridConfig::Flow { per_row } => GridStrategy::FlowGrid { per_row },
        })
    }

    /// Canvas size for a quad grid whose size is derived: two blocks across and down.
    pub fn quad_canvas_size(&self) -> ReelResult<Size> {
        let l = &self.layout;
        let block = self.block_size()?;
        let side = |pad: u32, extent: u32, gap: u32| {
            pad.checked_mul(2)
                .and_then(|p| extent.checked_mul(2).and_then(|e| p.checked_add(e)))
                .and_then(|v| v.checked_add(gap))
                .ok_or_else(|| ReelError::validation("quad canvas size overflows"))
        };
        Ok(Size::new(
            side(l.side_padding, block.width, l.gap_x)?,
            side(l.top_padding, block.height, l.gap_y)?,
        ))
    }

    /// Build the caption text renderer, resolving `font` against `base_dir`.
    pub fn text_renderer(&self, base_dir: &Path) -> ReelResult<Box<dyn TextRenderer>> {
        match &self.font {
            Some(font) => {
                let path = base_dir.join(font);
                let renderer = FontTextRenderer::from_file(&path, self.caption.font_size)?;
                tracing::debug!(font = %path.display(), family = renderer.family_name(), "font loaded");
                Ok(Box::new(renderer))
            }
            None => {
                let captions = self.items.iter().filter(|i| !i.caption.trim().is_empty()).count();
                if captions > 0 {
                    tracing::warn!(
                        captions,
                        "no font configured; caption bands will be blank"
                    );
                }
                Ok(Box::new(ApproxTextRenderer::new(self.caption.font_size)))
            }
        }
    }
}

/// Largest frame side, in pixels.
pub(crate) const MAX_SIDE: u32 = u16::MAX as u32;

/// Reject frames with a zero or oversized side.
pub(crate) fn check_canvas(size: Size) -> ReelResult<()> {
    if size.is_empty() {
        return Err(ReelError::validation("canvas width/height must be non-zero"));
    }
    if size.width > MAX_SIDE || size.height > MAX_SIDE {
        return Err(ReelError::validation(format!(
            "canvas {}x{} exceeds {MAX_SIDE} pixels",
            size.width, size.height
        )));
    }
    Ok(())
}

#[cfg(test)]
#[path = "../tests/unit/config/config.rs"]
mod tests;
