use super::*;

#[test]
fn mask_dimensions_match_request() {
    for (w, h) in [(1, 1), (7, 3), (64, 64), (120, 45)] {
        for shape in [Shape::Circle, Shape::RoundedRect { corner_radius: 6.0 }] {
            let m = generate_mask(shape, w, h).unwrap();
            assert_eq!((m.width(), m.height()), (w, h));
            assert_eq!(m.as_slice().len(), (w * h) as usize);
        }
    }
}

#[test]
fn zero_dimension_is_invalid() {
    assert!(matches!(
        generate_mask(Shape::Circle, 0, 10),
        Err(CompositorError::InvalidDimension(_))
    ));
    assert!(matches!(
        generate_mask(Shape::RoundedRect { corner_radius: 2.0 }, 10, 0),
        Err(CompositorError::InvalidDimension(_))
    ));
}

#[test]
fn circle_is_empty_outside_radius_and_close_to_pi_r_squared() {
    let (w, h) = (101u32, 80u32);
    let m = generate_mask(Shape::Circle, w, h).unwrap();
    let r = f64::from(w.min(h)) / 2.0;
    let (cx, cy) = (f64::from(w) / 2.0, f64::from(h) / 2.0);

    for y in 0..h {
        for x in 0..w {
            let dx = f64::from(x) + 0.5 - cx;
            let dy = f64::from(y) + 0.5 - cy;
            if (dx * dx + dy * dy).sqrt() > r {
                assert_eq!(m.get(x, y), Some(0), "pixel ({x},{y}) outside radius");
            }
        }
    }

    let area = std::f64::consts::PI * r * r;
    let count = m.covered_pixels() as f64;
    // Hard edge: error bounded by the perimeter band.
    assert!((count - area).abs() <= 2.0 * std::f64::consts::PI * r);
    assert!((count - area).abs() / area < 0.03);
}

#[test]
fn rounded_rect_clears_only_the_corners() {
    let m = generate_mask(Shape::RoundedRect { corner_radius: 10.0 }, 40, 30).unwrap();
    assert_eq!(m.get(0, 0), Some(0));
    assert_eq!(m.get(39, 0), Some(0));
    assert_eq!(m.get(0, 29), Some(0));
    assert_eq!(m.get(39, 29), Some(0));
    assert_eq!(m.get(20, 0), Some(255));
    assert_eq!(m.get(0, 15), Some(255));
    assert_eq!(m.get(20, 15), Some(255));
    assert_eq!(m.get(40, 15), None);
}

#[test]
fn zero_radius_rounded_rect_is_full() {
    let m = generate_mask(Shape::RoundedRect { corner_radius: 0.0 }, 9, 5).unwrap();
    assert_eq!(m.covered_pixels(), 45);
}

#[test]
fn apply_multiplies_alpha() {
    let img = RgbaImage::from_pixel(4, 4, image::Rgba([10, 20, 30, 255]));
    let m = generate_mask(Shape::Circle, 4, 4).unwrap();
    let out = m.apply(&img).unwrap();
    assert_eq!(out.get_pixel(0, 0).0, [10, 20, 30, 0]);
    assert_eq!(out.get_pixel(2, 2).0, [10, 20, 30, 255]);

    let other = RgbaImage::new(3, 4);
    assert!(matches!(
        m.apply(&other),
        Err(CompositorError::InvalidDimension(_))
    ));
}
