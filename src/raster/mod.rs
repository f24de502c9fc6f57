//! Premultiplied RGBA8 pixel buffers and source-over compositing.

pub(crate) mod buffer;
pub(crate) mod composite;

/// A full-canvas raster handed to a [`crate::FrameSink`].
pub type Frame = buffer::RasterBuffer;
