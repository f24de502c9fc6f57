use crate::animation::slide::AnimationSpec;
use crate::foundation::core::Size;

/// Frame counts for one batch.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize)]
pub struct BatchPlan {
    /// 0-based batch index.
    pub index: usize,
    /// Tiles in the batch.
    pub tiles: usize,
    /// Slide-in frames (always 0 for the first batch).
    pub slide_frames: u64,
    /// Held resting frames.
    pub hold_frames: u64,
}

impl BatchPlan {
    /// Frames this batch contributes.
    pub fn frames(&self) -> u64 {
        self.slide_frames + self.hold_frames
    }
}

/// Every frame the driver will emit, grouped by batch.
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize)]
pub struct FramePlan {
    /// Frame size.
    pub canvas: Size,
    /// Per-batch counts in output order.
    pub batches: Vec<BatchPlan>,
}

impl FramePlan {
    /// Plan batches of the given tile counts; the first batch does not slide in.
    pub fn new(
        canvas: Size,
        batch_sizes: impl IntoIterator<Item = usize>,
        anim: &AnimationSpec,
    ) -> Self {
        let batches = batch_sizes
            .into_iter()
            .enumerate()
            .map(|(index, tiles)| BatchPlan {
                index,
                tiles,
                slide_frames: if index == 0 { 0 } else { anim.slide_frames },
                hold_frames: anim.hold_frames,
            })
            .collect();
        Self { canvas, batches }
    }

    /// Total frames across all batches.
    pub fn total_frames(&self) -> u64 {
        self.batches.iter().map(BatchPlan::frames).sum()
    }
}
