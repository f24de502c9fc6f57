use crate::animation::slide::{AnimationSpec, hold, slide_in};
use crate::driver::plan::FramePlan;
use crate::encode::sink::{FrameSink, SinkConfig};
use crate::foundation::core::{Fps, FrameIndex};
use crate::foundation::error::ReelResult;
use crate::layout::canvas::CanvasSpec;
use crate::raster::Frame;
use crate::raster::buffer::RasterBuffer;

/// Summary of a finished run.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RenderStats {
    /// The plan that was executed.
    pub plan: FramePlan,
    /// Frames handed to the sink.
    pub frames_written: u64,
}

fn push(sink: &mut dyn FrameSink, next: &mut u64, frame: &Frame) -> ReelResult<()> {
    sink.push_frame(FrameIndex(*next), frame)?;
    *next += 1;
    Ok(())
}

/// Stream every batch to `sink`: the first batch is held, later batches slide in and then hold.
///
/// Batches must already be fully prepared; nothing here can fail except layout and the sink.
#[tracing::instrument(skip_all, fields(batches = batches.len()))]
pub fn run(
    batches: &[Vec<RasterBuffer>],
    canvas: &CanvasSpec,
    anim: &AnimationSpec,
    fps: Fps,
    sink: &mut dyn FrameSink,
) -> ReelResult<RenderStats> {
    let plan = FramePlan::new(canvas.size(), batches.iter().map(Vec::len), anim);

    sink.begin(SinkConfig {
        width: canvas.size().width,
        height: canvas.size().height,
        fps,
    })?;
    let mut written = 0u64;

    for (index, batch) in batches.iter().enumerate() {
        tracing::info!(
            batch = index + 1,
            of = batches.len(),
            tiles = batch.len(),
            "rendering batch"
        );
        if index > 0 {
            for frame in slide_in(batch, canvas, anim) {
                push(sink, &mut written, &frame?)?;
            }
        }
        let rest = hold(batch, canvas, anim)?;
        for frame in rest.frames() {
            push(sink, &mut written, frame)?;
        }
    }

    sink.end()?;
    debug_assert_eq!(written, plan.total_frames());
    tracing::info!(frames = written, "render finished");
    Ok(RenderStats {
        plan,
        frames_written: written,
    })
}

#[cfg(test)]
#[path = "../../tests/unit/driver/run.rs"]
mod tests;
