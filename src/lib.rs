//! gridreel turns an ordered list of captioned images into a deterministic showcase video.
//!
//! Images are fitted to a fixed tile size, given a wrapped caption band, grouped into batches and
//! laid out on a grid. The first batch is held on screen; every later batch slides in from the
//! right edge and is then held. Frames stream one at a time into a [`FrameSink`], normally
//! [`FfmpegSink`].
//!
//! - Describe the reel with a [`ReelConfig`]
//! - Call [`generate_video`], or [`PreparedReel::prepare`] to inspect frames before rendering
#![forbid(unsafe_code)]

mod animation;
mod assets;
mod caption;
mod config;
mod driver;
mod encode;
mod foundation;
mod layout;
mod raster;
mod text;
mod tile;

pub use crate::foundation::color::Rgb8;
pub use crate::foundation::core::{Fps, FrameIndex, Point, Size};
pub use crate::foundation::error::{ReelError, ReelResult};

pub use crate::raster::Frame;
pub use crate::raster::buffer::RasterBuffer;

pub use crate::assets::decode::{
    FsImageDecoder, ImageDecoder, MemoryImageDecoder, decode_image_bytes, decode_svg_bytes,
};
pub use crate::tile::preprocess::{CoverGeometry, FitMode, cover_geometry, preprocess};

pub use crate::caption::compose::{BandHeight, CaptionSpec, compose, wrap_caption};
pub use crate::text::renderer::{ApproxTextRenderer, FontTextRenderer, TextRenderer};
pub use crate::text::wrap::{WrapBudget, wrap_words};

pub use crate::layout::canvas::{Background, CanvasSpec, layout};
pub use crate::layout::grid::{
    GridStrategy, Placement, SlotContent, Spacing, flow_bounds, placements, uniform_flow_size,
};

pub use crate::animation::ease::Ease;
pub use crate::animation::slide::{
    AnimationSpec, Hold, SlideIn, hold, slide_in, slide_offset, slide_offsets,
};

pub use crate::encode::ffmpeg::{FfmpegSink, FfmpegSinkOpts, VideoCodec, is_ffmpeg_on_path};
pub use crate::encode::sink::{FrameSink, InMemorySink, SinkConfig};

pub use crate::config::{
    CanvasSizing, CaptionedItem, GridConfig, LayoutConfig, ReelConfig, TileConfig,
};
pub use crate::driver::generate::{PreparedReel, generate_video, prepare_tile};
pub use crate::driver::plan::{BatchPlan, FramePlan};
pub use crate::driver::run::{RenderStats, run};
