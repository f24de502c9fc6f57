use crate::animation::ease::Ease;
use crate::foundation::core::Fps;
use crate::foundation::error::{ReelError, ReelResult};
use crate::layout::canvas::{CanvasSpec, layout};
use crate::raster::Frame;
use crate::raster::buffer::RasterBuffer;

/// Frame counts for one batch's entrance and rest.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct AnimationSpec {
    /// Frames in the slide-in transition. Zero disables it.
    pub slide_frames: u64,
    /// Identical frames showing the resting layout.
    pub hold_frames: u64,
    /// Progress curve for the slide.
    pub ease: Ease,
}

impl AnimationSpec {
    /// Build from explicit counts.
    pub fn new(slide_frames: u64, hold_frames: u64, ease: Ease) -> ReelResult<Self> {
        if hold_frames == 0 {
            return Err(ReelError::validation("hold must last at least one frame"));
        }
        Ok(Self {
            slide_frames,
            hold_frames,
            ease,
        })
    }

    /// Derive counts from durations, flooring to whole frames.
    pub fn from_timing(fps: Fps, slide_secs: f64, hold_secs: f64, ease: Ease) -> ReelResult<Self> {
        for (name, secs) in [("slide", slide_secs), ("hold", hold_secs)] {
            if !secs.is_finite() || secs < 0.0 {
                return Err(ReelError::validation(format!(
                    "{name} duration must be finite and >= 0, got {secs}"
                )));
            }
        }
        Self::new(
            fps.secs_to_frames_floor(slide_secs),
            fps.secs_to_frames_floor(hold_secs),
            ease,
        )
    }
}

/// Horizontal offset of frame `f` in a slide of `slide_frames` frames.
///
/// Starts at `canvas_width` and approaches 0 without reaching it on the last frame;
/// the resting position is shown by the hold that follows.
pub fn slide_offset(f: u64, slide_frames: u64, canvas_width: u32, ease: Ease) -> i64 {
    if slide_frames == 0 {
        return 0;
    }
    let progress = f as f64 / slide_frames as f64;
    ((1.0 - ease.apply(progress)) * f64::from(canvas_width)).round() as i64
}

/// Every offset of a slide-in, in frame order.
pub fn slide_offsets(anim: &AnimationSpec, canvas_width: u32) -> impl Iterator<Item = i64> + '_ {
    (0..anim.slide_frames).map(move |f| slide_offset(f, anim.slide_frames, canvas_width, anim.ease))
}

/// Lazily rendered slide-in frames for one batch.
///
/// Each `next` lays out a single frame, so at most one is alive per iteration.
pub struct SlideIn<'a> {
    batch: &'a [RasterBuffer],
    canvas: &'a CanvasSpec,
    anim: AnimationSpec,
    next: u64,
}

impl Iterator for SlideIn<'_> {
    type Item = ReelResult<Frame>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.next >= self.anim.slide_frames {
            return None;
        }
        let offset = slide_offset(
            self.next,
            self.anim.slide_frames,
            self.canvas.size().width,
            self.anim.ease,
        );
        self.next += 1;
        Some(layout(self.batch, self.canvas, offset))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let left = usize::try_from(self.anim.slide_frames - self.next).unwrap_or(usize::MAX);
        (left, Some(left))
    }
}

impl ExactSizeIterator for SlideIn<'_> {}

/// Slide `batch` in from the right edge.
pub fn slide_in<'a>(
    batch: &'a [RasterBuffer],
    canvas: &'a CanvasSpec,
    anim: &AnimationSpec,
) -> SlideIn<'a> {
    SlideIn {
        batch,
        canvas,
        anim: *anim,
        next: 0,
    }
}

/// The resting frame of a batch and how many times to repeat it.
#[derive(Clone, Debug)]
pub struct Hold {
    frame: Frame,
    count: u64,
}

impl Hold {
    /// The resting frame.
    pub fn frame(&self) -> &Frame {
        &self.frame
    }

    /// Number of repetitions.
    pub fn count(&self) -> u64 {
        self.count
    }

    /// The resting frame repeated `count` times.
    pub fn frames(&self) -> impl Iterator<Item = &Frame> {
        (0..self.count).map(|_| &self.frame)
    }
}

/// Render the resting layout once for `anim.hold_frames` repetitions.
pub fn hold(batch: &[RasterBuffer], canvas: &CanvasSpec, anim: &AnimationSpec) -> ReelResult<Hold> {
    Ok(Hold {
        frame: layout(batch, canvas, 0)?,
        count: anim.hold_frames,
    })
}

#[cfg(test)]
#[path = "../../tests/unit/animation/slide.rs"]
mod tests;
