use super::*;

const RED: Rgb8 = Rgb8::new(255, 0, 0);
const BLUE: Rgb8 = Rgb8::new(0, 0, 255);

#[test]
fn filled_is_opaque_and_sized() {
    let b = RasterBuffer::filled(3, 2, RED);
    assert_eq!(b.size(), Size::new(3, 2));
    assert_eq!(b.data().len(), 3 * 2 * 4);
    assert!(b.is_opaque());
    assert_eq!(b.pixel(2, 1), Some([255, 0, 0, 255]));
    assert_eq!(b.pixel(3, 0), None);
}

#[test]
fn from_premul_rejects_wrong_length() {
    assert!(RasterBuffer::from_premul_rgba8(2, 2, vec![0; 15]).is_err());
    assert!(RasterBuffer::from_premul_rgba8(2, 2, vec![0; 16]).is_ok());
}

#[test]
fn extend_below_keeps_original_rows() {
    let tile = RasterBuffer::filled(4, 2, RED);
    let out = tile.extend_below(3, BLUE);
    assert_eq!(out.size(), Size::new(4, 5));
    assert!(out.region_eq(&RasterBuffer::filled(4, 5, RED), 0, 0, 4, 2));
    assert!(out.region_eq(&RasterBuffer::filled(4, 5, BLUE), 0, 2, 4, 3));
}

#[test]
fn composite_over_clips_at_edges() {
    let mut canvas = RasterBuffer::filled(4, 4, BLUE);
    let tile = RasterBuffer::filled(3, 3, RED);
    canvas.composite_over(&tile, 2, -1).unwrap();

    assert_eq!(canvas.pixel(2, 0), Some([255, 0, 0, 255]));
    assert_eq!(canvas.pixel(3, 1), Some([255, 0, 0, 255]));
    assert_eq!(canvas.pixel(3, 2), Some([0, 0, 255, 255]));
    assert_eq!(canvas.pixel(1, 0), Some([0, 0, 255, 255]));

    // Entirely outside: no-op.
    let before = canvas.clone();
    canvas.composite_over(&tile, 10, 10).unwrap();
    assert_eq!(canvas, before);
}

#[test]
fn composite_over_respects_alpha() {
    let mut canvas = RasterBuffer::filled(1, 1, BLUE);
    let clear = RasterBuffer::new(1, 1);
    canvas.composite_over(&clear, 0, 0).unwrap();
    assert_eq!(canvas.pixel(0, 0), Some([0, 0, 255, 255]));
}

#[test]
fn fill_rect_is_clipped() {
    let mut b = RasterBuffer::filled(3, 3, BLUE);
    b.fill_rect(-1, 1, 2, 5, RED);
    assert_eq!(b.pixel(0, 1), Some([255, 0, 0, 255]));
    assert_eq!(b.pixel(0, 2), Some([255, 0, 0, 255]));
    assert_eq!(b.pixel(1, 1), Some([0, 0, 255, 255]));
    assert_eq!(b.pixel(0, 0), Some([0, 0, 255, 255]));
}

#[test]
fn flatten_and_rgb24() {
    let mut b = RasterBuffer::new(2, 1);
    b.flatten_over(Rgb8::new(10, 20, 30));
    assert!(b.is_opaque());

    let mut rgb = vec![0u8; 6];
    b.write_rgb24(&mut rgb).unwrap();
    assert_eq!(rgb, vec![10, 20, 30, 10, 20, 30]);
    assert!(b.write_rgb24(&mut [0u8; 5]).is_err());
}

#[test]
fn region_eq_rejects_out_of_bounds() {
    let a = RasterBuffer::filled(2, 2, RED);
    assert!(a.region_eq(&a.clone(), 0, 0, 2, 2));
    assert!(!a.region_eq(&a.clone(), 1, 0, 2, 2));
}

#[test]
fn rgba_image_roundtrip_preserves_bytes() {
    let a = RasterBuffer::filled(2, 3, RED);
    let b = RasterBuffer::from_rgba_image(a.to_rgba_image().unwrap());
    assert_eq!(a, b);
}
