use super::*;
use crate::geometry::mask::{Shape, generate_mask};
use crate::render::sprite::MAX_SPRITE_DIMENSION;

fn solid_photo(w: u32, h: u32) -> RgbaImage {
    RgbaImage::from_pixel(w, h, image::Rgba([200, 30, 30, 255]))
}

#[test]
fn sprite_is_photo_plus_padding() {
    let style = FrameStyle::default();
    let pad = style.glow_padding();
    assert_eq!(pad, 14);

    let photo = solid_photo(60, 40);
    let mask = generate_mask(Shape::RoundedRect { corner_radius: 8.0 }, 60, 40).unwrap();
    let sprite = render_bubble(&photo, &mask, &style).unwrap();
    assert_eq!(
        (sprite.width(), sprite.height()),
        (60 + 2 * pad, 40 + 2 * pad)
    );
}

#[test]
fn ring_alpha_decreases_outward() {
    let style = FrameStyle::default();
    let alphas: Vec<u8> = (0..style.ring_count).map(|i| style.ring_alpha(i)).collect();
    assert_eq!(alphas[0], style.glow_peak_alpha);
    for pair in alphas.windows(2) {
        assert!(pair[0] > pair[1], "{alphas:?}");
    }
    assert!(*alphas.last().unwrap() > 0);
    assert_eq!(style.ring_alpha(style.ring_count), 0);
}

#[test]
fn glow_alpha_falls_off_along_a_ray() {
    let style = FrameStyle {
        highlight_alpha: 0,
        ..FrameStyle::default()
    };
    let photo = solid_photo(50, 50);
    let mask = generate_mask(Shape::Circle, 50, 50).unwrap();
    let sprite = render_bubble(&photo, &mask, &style).unwrap();

    let pad = style.glow_padding();
    let cy = pad + 25;
    let glow_start = pad + 50 + style.border_width;
    let mut prev = u8::MAX;
    for x in glow_start..sprite.width() {
        let a = sprite.pixel(x, cy).unwrap()[3];
        assert!(a <= prev, "alpha rose at x={x}");
        prev = a;
    }
    // Innermost glow pixel is visible, last column is the faintest ring.
    assert!(sprite.pixel(glow_start, cy).unwrap()[3] > 0);
    assert!(sprite.pixel(sprite.width() - 1, cy).unwrap()[3] < style.glow_peak_alpha);
}

#[test]
fn photo_sits_in_the_middle_and_corners_stay_clear() {
    let style = FrameStyle::default();
    let photo = solid_photo(40, 40);
    let mask = generate_mask(Shape::Circle, 40, 40).unwrap();
    let sprite = render_bubble(&photo, &mask, &style).unwrap();

    let pad = style.glow_padding();
    assert_eq!(sprite.pixel(pad + 20, pad + 30), Some([200, 30, 30, 255]));
    assert_eq!(sprite.pixel(0, 0), Some([0, 0, 0, 0]));
    let last = sprite.width() - 1;
    assert_eq!(sprite.pixel(last, last), Some([0, 0, 0, 0]));
}

#[test]
fn border_is_opaque_just_outside_the_photo() {
    let style = FrameStyle {
        highlight_alpha: 0,
        ..FrameStyle::default()
    };
    let photo = solid_photo(40, 40);
    let mask = generate_mask(Shape::Circle, 40, 40).unwrap();
    let sprite = render_bubble(&photo, &mask, &style).unwrap();

    let pad = style.glow_padding();
    let y = pad + 20;
    let x = pad + 40 + 1;
    let px = sprite.pixel(x, y).unwrap();
    assert_eq!(px[3], 255);
    assert_ne!(px, [200, 30, 30, 255]);
}

#[test]
fn highlight_only_touches_the_upper_left_interior() {
    let base = FrameStyle {
        highlight_alpha: 0,
        ..FrameStyle::default()
    };
    let lit = FrameStyle::default();
    let photo = solid_photo(80, 80);
    let mask = generate_mask(Shape::Circle, 80, 80).unwrap();
    let a = render_bubble(&photo, &mask, &base).unwrap();
    let b = render_bubble(&photo, &mask, &lit).unwrap();

    let pad = lit.glow_padding();
    let mid = pad + 40;
    let mut changed = 0;
    for y in 0..a.height() {
        for x in 0..a.width() {
            if a.pixel(x, y) != b.pixel(x, y) {
                changed += 1;
                assert!(x < mid && y < mid, "highlight outside upper-left at ({x},{y})");
            }
        }
    }
    assert!(changed > 0);
}

#[test]
fn rejects_mismatched_mask_and_bad_style() {
    let photo = solid_photo(10, 10);
    let mask = generate_mask(Shape::Circle, 10, 12).unwrap();
    assert!(matches!(
        render_bubble(&photo, &mask, &FrameStyle::default()),
        Err(CompositorError::InvalidDimension(_))
    ));

    let mask = generate_mask(Shape::Circle, 10, 10).unwrap();
    let style = FrameStyle {
        ring_step: 0.0,
        ..FrameStyle::default()
    };
    assert!(matches!(
        render_bubble(&photo, &mask, &style),
        Err(CompositorError::Validation(_))
    ));
}

#[test]
fn rendering_is_deterministic() {
    let photo = solid_photo(30, 20);
    let mask = generate_mask(Shape::RoundedRect { corner_radius: 5.0 }, 30, 20).unwrap();
    let a = render_bubble(&photo, &mask, &FrameStyle::default()).unwrap();
    let b = render_bubble(&photo, &mask, &FrameStyle::default()).unwrap();
    assert_eq!(a.as_bytes(), b.as_bytes());
}

#[test]
fn validate_bounds_border_and_ring_count() {
    let wide_border = FrameStyle {
        border_width: u32::MAX,
        ..FrameStyle::default()
    };
    assert!(matches!(wide_border.validate(), Err(CompositorError::Validation(_))));
    assert_eq!(wide_border.glow_padding(), u32::MAX);

    let many_rings = FrameStyle {
        ring_count: u32::MAX,
        ring_step: 1e-9,
        ..FrameStyle::default()
    };
    assert!(matches!(many_rings.validate(), Err(CompositorError::Validation(_))));
    assert_eq!(many_rings.ring_alpha(0), many_rings.glow_peak_alpha);

    let photo = solid_photo(8, 8);
    let mask = generate_mask(Shape::Circle, 8, 8).unwrap();
    assert!(render_bubble(&photo, &mask, &wide_border).is_err());
}

#[test]
fn oversized_sprite_is_an_error() {
    let style = FrameStyle {
        border_width: MAX_BORDER_WIDTH,
        ..FrameStyle::default()
    };
    let photo = solid_photo(MAX_SPRITE_DIMENSION, 1);
    let mask = generate_mask(Shape::Circle, MAX_SPRITE_DIMENSION, 1).unwrap();
    assert!(matches!(
        render_bubble(&photo, &mask, &style),
        Err(CompositorError::InvalidDimension(_))
    ));
}
