use super::*;
use crate::assets::decode::MemoryImageDecoder;
use crate::caption::compose::CaptionSpec;
use crate::encode::sink::InMemorySink;
use crate::foundation::color::Rgb8;
use crate::text::renderer::ApproxTextRenderer;

fn small_config() -> ReelConfig {
    let mut cfg = ReelConfig {
        fps: 2,
        seconds_per_batch: 1.0,
        slide_seconds: 1.0,
        ..ReelConfig::default()
    };
    cfg.tile.width = 8;
    cfg.tile.height = 6;
    cfg.tile.fit = FitMode::Stretch;
    cfg.caption = CaptionSpec {
        max_lines: 1,
        line_spacing: 4,
        band_padding: 2,
        ..CaptionSpec::default()
    };
    cfg.layout.side_padding = 2;
    cfg.layout.top_padding = 2;
    cfg.layout.gap_x = 2;
    cfg.layout.gap_y = 2;
    cfg
}

fn decoder(n: usize) -> MemoryImageDecoder {
    let mut d = MemoryImageDecoder::new();
    for i in 0..n {
        let shade = 20 * i as u8 + 40;
        d.insert(format!("{i}.png"), RasterBuffer::filled(16, 12, Rgb8::new(shade, 0, 0)));
    }
    d
}

fn items(n: usize) -> Vec<CaptionedItem> {
    (0..n)
        .map(|i| CaptionedItem::new(format!("{i}.png"), format!("Lorem Ipsum {i}")))
        .collect()
}

#[test]
fn eight_items_in_batches_of_four() {
    let cfg = small_config();
    let mut text = ApproxTextRenderer::new(16.0);
    let mut sink = InMemorySink::new();

    let stats = generate_video(&items(8), &cfg, &decoder(8), &mut text, &mut sink).unwrap();

    // hold + (slide + hold)
    assert_eq!(stats.frames_written, 2 + 2 + 2);
    assert_eq!(stats.plan.batches.len(), 2);
    assert_eq!(stats.plan.canvas, Size::new(22, 30));
    assert_eq!(sink.frames().len(), 6);
    assert!(
        sink.frames()
            .iter()
            .all(|(_, f)| f.size() == Size::new(22, 30))
    );
}

#[test]
fn tiles_are_fitted_and_captioned() {
    let cfg = small_config();
    let mut text = ApproxTextRenderer::new(16.0);
    let reel = PreparedReel::prepare(&items(3), &cfg, &decoder(3), &mut text).unwrap();

    assert_eq!(reel.batches().len(), 1);
    let tile = &reel.batches()[0][0];
    assert_eq!(tile.size(), Size::new(8, 12));
    assert_eq!(tile.pixel(0, 0), Some([40, 0, 0, 255]));
    assert_eq!(tile.pixel(0, 11), Some([10, 40, 90, 255]));
}

#[test]
fn missing_image_fails_before_sink_opens() {
    let cfg = small_config();
    let mut list = items(8);
    list[5].image = "missing.png".into();
    let mut text = ApproxTextRenderer::new(16.0);
    let mut sink = InMemorySink::new();

    let err = generate_video(&list, &cfg, &decoder(8), &mut text, &mut sink).unwrap_err();
    assert_eq!(err.batch_index(), Some(1));
    assert!(matches!(
        err.innermost(),
        ReelError::ImageNotFound { resource } if resource == "missing.png"
    ));
    assert!(sink.config().is_none());
    assert!(sink.frames().is_empty());
}

#[test]
fn quad_grid_paints_placeholders_on_derived_canvas() {
    let mut cfg = small_config();
    let gray = Rgb8::new(90, 90, 90);
    cfg.layout.grid = GridConfig::Quad {
        placeholder: Some(gray),
    };
    let mut text = ApproxTextRenderer::new(16.0);
    let reel = PreparedReel::prepare(&items(3), &cfg, &decoder(3), &mut text).unwrap();

    assert_eq!(reel.canvas().size(), Size::new(22, 30));
    let frame = reel.frame(0, 0).unwrap();
    assert_eq!(frame.pixel(2, 2), Some([40, 0, 0, 255]));
    assert_eq!(frame.pixel(12, 2), Some([60, 0, 0, 255]));
    assert_eq!(frame.pixel(2, 16), Some([80, 0, 0, 255]));
    assert_eq!(frame.pixel(12, 16), Some([90, 90, 90, 255]));
    assert_eq!(frame.pixel(0, 0), Some([10, 40, 90, 255]));
}

#[test]
fn background_image_is_stretched_to_a_fixed_canvas() {
    let mut cfg = small_config();
    cfg.layout.canvas = CanvasSizing::Fixed {
        width: 40,
        height: 40,
    };
    cfg.layout.background_image = Some("bg.png".into());
    let decoder = decoder(1).with("bg.png", RasterBuffer::filled(4, 4, Rgb8::WHITE));
    let mut text = ApproxTextRenderer::new(16.0);

    let reel = PreparedReel::prepare(&items(1), &cfg, &decoder, &mut text).unwrap();
    assert_eq!(reel.canvas().size(), Size::new(40, 40));
    let frame = reel.frame(0, 0).unwrap();
    assert_eq!(frame.pixel(39, 39), Some([255, 255, 255, 255]));
    assert_eq!(frame.pixel(2, 2), Some([40, 0, 0, 255]));
}

#[test]
fn transparent_background_pixels_take_the_fill_color() {
    let mut cfg = small_config();
    cfg.layout.background_image = Some("bg.png".into());
    let decoder = decoder(1).with("bg.png", RasterBuffer::new(4, 4));
    let mut text = ApproxTextRenderer::new(16.0);

    let reel = PreparedReel::prepare(&items(1), &cfg, &decoder, &mut text).unwrap();
    assert_eq!(reel.frame(0, 0).unwrap().pixel(0, 0), Some([10, 40, 90, 255]));
    assert!(matches!(reel.canvas().background(), Background::Image(_)));
}

#[test]
fn frame_rejects_unknown_batch() {
    let cfg = small_config();
    let mut text = ApproxTextRenderer::new(16.0);
    let reel = PreparedReel::prepare(&items(2), &cfg, &decoder(2), &mut text).unwrap();
    assert!(reel.frame(1, 0).is_err());
    assert_eq!(reel.plan().total_frames(), 2);
}

#[test]
fn empty_item_list_renders_nothing() {
    let cfg = small_config();
    let mut text = ApproxTextRenderer::new(16.0);
    let mut sink = InMemorySink::new();
    let stats = generate_video(&[], &cfg, &decoder(0), &mut text, &mut sink).unwrap();
    assert_eq!(stats.frames_written, 0);
    assert_eq!(stats.plan.canvas, Size::new(4, 4));
}
