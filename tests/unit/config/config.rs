use super::*;
use crate::text::wrap::WrapBudget;

#[test]
fn defaults_follow_the_flow_grid_layout() {
    let cfg = ReelConfig::default();
    cfg.validate().unwrap();
    assert_eq!(cfg.fps, 30);
    assert_eq!(cfg.batch_size, 4);
    assert_eq!(cfg.tile.fit, FitMode::Cover);
    assert_eq!(cfg.layout.grid, GridConfig::Flow { per_row: 2 });
    assert_eq!(cfg.layout.canvas, CanvasSizing::Derived);
    assert_eq!(cfg.layout.background_color, Rgb8::new(10, 40, 90));

    let anim = cfg.animation_spec().unwrap();
    assert_eq!(anim.slide_frames, 30);
    assert_eq!(anim.hold_frames, 90);
}

#[test]
fn parses_minimal_json_with_defaults() {
    let cfg = ReelConfig::from_json(
        r#"{
            "items": [
                { "image": "1.jpg", "caption": "Lorem Ipsum 1" },
                { "image": "2.jpg" }
            ]
        }"#,
    )
    .unwrap();
    assert_eq!(cfg.items.len(), 2);
    assert_eq!(cfg.items[1], CaptionedItem::new("2.jpg", ""));
    assert_eq!(cfg.caption, CaptionSpec::default());
}

#[test]
fn parses_quad_layout_with_fixed_canvas() {
    let cfg = ReelConfig::from_json(
        r##"{
            "fps": 24,
            "ease": "decelerate",
            "codec": "xvid",
            "tile": { "width": 300, "height": 400, "fit": "stretch" },
            "caption": { "wrap": { "kind": "chars", "max_chars": 22 }, "band": "fit_lines" },
            "layout": {
                "grid": { "kind": "quad", "placeholder": "#ffffff" },
                "canvas": { "kind": "fixed", "width": 1280, "height": 720 },
                "background_color": [0, 0, 0],
                "background_image": "bg.png"
            }
        }"##,
    )
    .unwrap();
    assert_eq!(cfg.ease, Ease::Decelerate);
    assert_eq!(cfg.codec, VideoCodec::Xvid);
    assert_eq!(cfg.tile.fit, FitMode::Stretch);
    assert_eq!(
        cfg.caption.wrap,
        WrapBudget::Chars {
            max_chars: Some(22)
        }
    );
    assert_eq!(
        cfg.layout.grid,
        GridConfig::Quad {
            placeholder: Some(Rgb8::WHITE)
        }
    );
    assert_eq!(
        cfg.layout.canvas,
        CanvasSizing::Fixed {
            width: 1280,
            height: 720
        }
    );
    assert_eq!(cfg.layout.background_image.as_deref(), Some("bg.png"));
}

#[test]
fn unknown_fields_are_rejected() {
    assert!(ReelConfig::from_json(r#"{ "fsp": 30 }"#).is_err());
    assert!(ReelConfig::from_json(r#"{ "tile": { "widht": 3 } }"#).is_err());
}

#[test]
fn validation_catches_bad_values() {
    let bad = |f: fn(&mut ReelConfig)| {
        let mut cfg = ReelConfig::default();
        f(&mut cfg);
        cfg.validate().unwrap_err()
    };
    bad(|c| c.fps = 0);
    bad(|c| c.seconds_per_batch = 0.0);
    bad(|c| c.slide_seconds = -1.0);
    bad(|c| c.tile.width = 0);
    bad(|c| c.tile.height = 70_000);
    bad(|c| c.batch_size = 0);
    bad(|c| c.caption.line_spacing = 0);
    bad(|c| c.layout.grid = GridConfig::Flow { per_row: 0 });
    bad(|c| c.items.push(CaptionedItem::new(" ", "x")));
    bad(|c| c.layout.gap_x = 70_000);
    bad(|c| c.layout.side_padding = u32::MAX);
    bad(|c| {
        c.layout.canvas = CanvasSizing::Fixed {
            width: 70_000,
            height: 10,
        }
    });
    bad(|c| {
        c.layout.canvas = CanvasSizing::Fixed {
            width: 0,
            height: 10,
        }
    });
    let err = bad(|c| {
        c.layout.grid = GridConfig::Quad { placeholder: None };
        c.batch_size = 5;
    });
    assert!(matches!(err, ReelError::Validation(_)));
}

#[test]
fn quad_geometry_uses_reserved_block() {
    let mut cfg = ReelConfig::default();
    cfg.layout.grid = GridConfig::Quad { placeholder: None };
    assert_eq!(cfg.block_size().unwrap(), Size::new(300, 494));
    assert_eq!(cfg.quad_canvas_size().unwrap(), Size::new(740, 1108));

    let GridStrategy::FixedQuad { anchors, .. } = cfg.grid_strategy().unwrap() else {
        panic!("expected quad grid");
    };
    assert_eq!(anchors[0], Point::new(50, 30));
    assert_eq!(anchors[3], Point::new(390, 584));
}

#[test]
fn missing_font_falls_back_to_approximate_metrics() {
    let cfg = ReelConfig::default();
    let mut text = cfg.text_renderer(Path::new(".")).unwrap();
    assert_eq!(text.measure_width("abcd").unwrap(), 32.0);
}

#[test]
fn unreadable_font_is_an_error() {
    let mut cfg = ReelConfig::default();
    cfg.font = Some(PathBuf::from("definitely/missing/font.ttf"));
    assert!(cfg.text_renderer(Path::new(".")).is_err());
}

#[test]
fn huge_caption_line_counts_are_rejected_not_truncated() {
    let err = ReelConfig::from_json(r#"{"caption":{"max_lines":300000000,"line_spacing":21}}"#)
        .unwrap_err();
    assert!(matches!(err, ReelError::Validation(_)), "{err}");

    let err = ReelConfig::from_json(r#"{"caption":{"max_lines":4294967297}}"#).unwrap_err();
    assert!(matches!(err, ReelError::Validation(_)), "{err}");
}
