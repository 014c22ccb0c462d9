use std::io::Cursor;

use super::*;

#[test]
fn decode_image_png_dimensions_and_pixels() {
    let src = RgbaImage::from_raw(2, 1, vec![100u8, 50, 200, 128, 1, 2, 3, 255]).unwrap();

    let mut buf = Vec::new();
    image::DynamicImage::ImageRgba8(src)
        .write_to(&mut Cursor::new(&mut buf), image::ImageFormat::Png)
        .unwrap();

    let decoded = decode_image(&buf, "mem.png").unwrap();
    assert_eq!(decoded.dimensions(), (2, 1));
    assert_eq!(decoded.get_pixel(0, 0).0, [100, 50, 200, 128]);
    assert_eq!(decoded.get_pixel(1, 0).0, [1, 2, 3, 255]);
}

#[test]
fn corrupt_and_empty_inputs_are_image_load_errors() {
    let err = decode_image(b"definitely not a png", "bad.png").unwrap_err();
    match err {
        CompositorError::ImageLoad { source_ref, .. } => assert_eq!(source_ref, "bad.png"),
        other => panic!("unexpected error: {other}"),
    }

    assert!(matches!(
        decode_image(&[], "empty.png"),
        Err(CompositorError::ImageLoad { .. })
    ));
}
