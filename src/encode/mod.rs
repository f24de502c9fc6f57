//! Frame sinks: the video encoder boundary.

pub(crate) mod ffmpeg;
pub(crate) mod sink;
