use super::*;

#[test]
fn parses_hex_and_arrays() {
    let c: ColorRgba = serde_json::from_str("\"#009688\"").unwrap();
    assert_eq!(c, ColorRgba::rgb(0, 150, 136));

    let c: ColorRgba = serde_json::from_str("\"4db6acE6\"").unwrap();
    assert_eq!(c, ColorRgba::rgba(77, 182, 172, 230));

    let c: ColorRgba = serde_json::from_str("[1, 2, 3]").unwrap();
    assert_eq!(c, ColorRgba::rgb(1, 2, 3));

    let c: ColorRgba = serde_json::from_str("[1, 2, 3, 4]").unwrap();
    assert_eq!(c, ColorRgba::rgba(1, 2, 3, 4));
}

#[test]
fn serializes_as_rgba_array() {
    let c = ColorRgba::rgba(1, 2, 3, 4);
    let json = serde_json::to_string(&c).unwrap();
    assert_eq!(json, "[1,2,3,4]");
    assert_eq!(serde_json::from_str::<ColorRgba>(&json).unwrap(), c);
}

#[test]
fn rejects_malformed_colors() {
    assert!(serde_json::from_str::<ColorRgba>("\"#12345\"").is_err());
    assert!(serde_json::from_str::<ColorRgba>("\"#zzzzzz\"").is_err());
    assert!(serde_json::from_str::<ColorRgba>("[1, 2]").is_err());
    assert!(serde_json::from_str::<ColorRgba>("[1, 2, 300]").is_err());
}

#[test]
fn premul_scales_channels_by_alpha() {
    assert_eq!(ColorRgba::rgb(10, 20, 30).to_premul(), [10, 20, 30, 255]);
    assert_eq!(ColorRgba::rgba(200, 100, 50, 0).to_premul(), [0, 0, 0, 0]);
    assert_eq!(
        ColorRgba::rgba(255, 255, 255, 128).to_premul(),
        [128, 128, 128, 128]
    );
    assert_eq!(ColorRgba::WHITE.to_premul_scaled(0.0), [0, 0, 0, 0]);
    assert_eq!(ColorRgba::WHITE.to_premul_scaled(f64::NAN), [0, 0, 0, 0]);
}

#[test]
fn lerp_hits_endpoints() {
    let a = ColorRgba::rgb(77, 182, 172);
    let b = ColorRgba::rgb(0, 150, 136);
    assert_eq!(a.lerp(b, 0.0), a);
    assert_eq!(a.lerp(b, 1.0), b);
    assert_eq!(a.lerp(b, 2.0), b);
}

#[test]
fn same_rgb_ignores_alpha() {
    assert!(ColorRgba::WHITE.same_rgb(ColorRgba::WHITE.with_alpha(10)));
    assert!(!ColorRgba::WHITE.same_rgb(ColorRgba::BLACK));
}
