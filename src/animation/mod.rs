//! Slide-in offsets and held frames.

pub(crate) mod ease;
pub(crate) mod slide;
