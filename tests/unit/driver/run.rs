use super::*;
use crate::animation::ease::Ease;
use crate::encode::sink::InMemorySink;
use crate::foundation::color::Rgb8;
use crate::foundation::core::Size;
use crate::foundation::error::ReelError;
use crate::layout::canvas::{Background, layout};
use crate::layout::grid::{GridStrategy, Spacing};

fn canvas() -> CanvasSpec {
    CanvasSpec::new(
        Size::new(24, 12),
        Spacing {
            side_padding: 4,
            top_padding: 2,
            gap_x: 2,
            gap_y: 2,
        },
        GridStrategy::FlowGrid { per_row: 2 },
        Background::Fill(Rgb8::new(10, 40, 90)),
    )
    .unwrap()
}

fn batches() -> Vec<Vec<RasterBuffer>> {
    vec![
        vec![RasterBuffer::filled(8, 6, Rgb8::new(255, 0, 0))],
        vec![
            RasterBuffer::filled(8, 6, Rgb8::new(0, 255, 0)),
            RasterBuffer::filled(8, 6, Rgb8::new(0, 0, 255)),
        ],
    ]
}

#[test]
fn first_batch_holds_then_later_batches_slide_and_hold() {
    let canvas = canvas();
    let batches = batches();
    let anim = AnimationSpec::new(3, 2, Ease::Linear).unwrap();
    let mut sink = InMemorySink::new();

    let stats = run(&batches, &canvas, &anim, Fps::whole(30).unwrap(), &mut sink).unwrap();
    assert_eq!(stats.frames_written, 2 + 3 + 2);
    assert_eq!(stats.plan.total_frames(), 7);
    assert!(sink.is_ended());

    let cfg = sink.config().unwrap();
    assert_eq!((cfg.width, cfg.height), (24, 12));

    let frames = sink.frames();
    let indices: Vec<u64> = frames.iter().map(|(i, _)| i.0).collect();
    assert_eq!(indices, (0..7).collect::<Vec<_>>());

    let rest0 = layout(&batches[0], &canvas, 0).unwrap();
    let rest1 = layout(&batches[1], &canvas, 0).unwrap();
    assert_eq!(frames[0].1, rest0);
    assert_eq!(frames[1].1, rest0);
    // Slide starts fully off-canvas.
    assert_eq!(frames[2].1, canvas.base_canvas());
    assert_eq!(frames[4].1, layout(&batches[1], &canvas, 8).unwrap());
    assert_eq!(frames[5].1, rest1);
    assert_eq!(frames[6].1, rest1);
}

#[test]
fn no_batches_still_opens_and_closes_the_sink() {
    let anim = AnimationSpec::new(3, 2, Ease::Linear).unwrap();
    let mut sink = InMemorySink::new();
    let stats = run(&[], &canvas(), &anim, Fps::whole(30).unwrap(), &mut sink).unwrap();
    assert_eq!(stats.frames_written, 0);
    assert!(sink.config().is_some());
    assert!(sink.is_ended());
}

struct FailAt {
    at: u64,
    ended: bool,
}

impl FrameSink for FailAt {
    fn begin(&mut self, _cfg: SinkConfig) -> ReelResult<()> {
        Ok(())
    }

    fn push_frame(&mut self, idx: FrameIndex, _frame: &Frame) -> ReelResult<()> {
        if idx.0 == self.at {
            return Err(ReelError::sink_write(idx.0, "disk full"));
        }
        Ok(())
    }

    fn end(&mut self) -> ReelResult<()> {
        self.ended = true;
        Ok(())
    }
}

#[test]
fn sink_errors_abort_the_run() {
    let anim = AnimationSpec::new(3, 2, Ease::Linear).unwrap();
    let mut sink = FailAt {
        at: 3,
        ended: false,
    };
    let err = run(&batches(), &canvas(), &anim, Fps::whole(30).unwrap(), &mut sink).unwrap_err();
    assert!(matches!(err, ReelError::SinkWriteFailed { frame: 3, .. }));
    assert!(!sink.ended);
}
