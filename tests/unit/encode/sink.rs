use super::*;
use crate::foundation::color::Rgb8;
use crate::raster::buffer::RasterBuffer;

fn cfg() -> SinkConfig {
    SinkConfig {
        width: 4,
        height: 2,
        fps: Fps::whole(30).unwrap(),
    }
}

#[test]
fn captures_frames_in_order() {
    let mut sink = InMemorySink::new();
    sink.begin(cfg()).unwrap();
    let a = RasterBuffer::filled(4, 2, Rgb8::WHITE);
    let b = RasterBuffer::filled(4, 2, Rgb8::BLACK);
    sink.push_frame(FrameIndex(0), &a).unwrap();
    sink.push_frame(FrameIndex(1), &b).unwrap();
    sink.end().unwrap();

    assert!(sink.is_ended());
    assert_eq!(sink.config(), Some(cfg()));
    assert_eq!(sink.frames().len(), 2);
    assert_eq!(sink.frames()[1], (FrameIndex(1), b));
}

#[test]
fn rejects_size_mismatch() {
    let mut sink = InMemorySink::new();
    sink.begin(cfg()).unwrap();
    let err = sink
        .push_frame(FrameIndex(0), &RasterBuffer::filled(2, 2, Rgb8::WHITE))
        .unwrap_err();
    assert!(matches!(err, ReelError::SinkWriteFailed { frame: 0, .. }));
    assert!(err.to_string().contains("2x2"));
    assert!(sink.frames().is_empty());
}

#[test]
fn rejects_out_of_order_and_unstarted_pushes() {
    let frame = RasterBuffer::filled(4, 2, Rgb8::WHITE);

    let mut sink = InMemorySink::new();
    assert!(sink.push_frame(FrameIndex(0), &frame).is_err());

    sink.begin(cfg()).unwrap();
    sink.push_frame(FrameIndex(3), &frame).unwrap();
    let err = sink.push_frame(FrameIndex(3), &frame).unwrap_err();
    assert!(matches!(err, ReelError::SinkWriteFailed { frame: 3, .. }));
}

#[test]
fn begin_resets_captured_frames() {
    let frame = RasterBuffer::filled(4, 2, Rgb8::WHITE);
    let mut sink = InMemorySink::new();
    sink.begin(cfg()).unwrap();
    sink.push_frame(FrameIndex(0), &frame).unwrap();
    sink.end().unwrap();

    sink.begin(cfg()).unwrap();
    assert!(sink.frames().is_empty());
    assert!(!sink.is_ended());
}
