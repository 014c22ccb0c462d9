use super::*;
use crate::foundation::core::ColorRgba;
use crate::render::decor::render_orb;
use crate::render::frame::TEAL;
use image::RgbaImage;

fn solid_sprite(w: u32, h: u32, color: ColorRgba) -> Sprite {
    let img = RgbaImage::from_pixel(w, h, image::Rgba([color.r, color.g, color.b, color.a]));
    Sprite::from_rgba_image(&img).unwrap()
}

#[test]
fn transparent_sprite_leaves_canvas_untouched() {
    let mut canvas = Canvas::new(40, 30, ColorRgba::rgb(12, 34, 56)).unwrap();
    let before = canvas.clone();
    let sprite = Sprite::new(16, 16).unwrap();
    composite(&mut canvas, &sprite, 20, 15);
    assert_eq!(canvas, before);
}

#[test]
fn later_sprite_wins_on_overlap() {
    let mut canvas = Canvas::new(40, 40, ColorRgba::WHITE).unwrap();
    let red = ColorRgba::rgb(255, 0, 0);
    let blue = ColorRgba::rgb(0, 0, 255);
    composite(&mut canvas, &solid_sprite(10, 10, red), 15, 15);
    composite(&mut canvas, &solid_sprite(10, 10, blue), 20, 20);

    assert_eq!(canvas.pixel(17, 17), Some(blue.to_premul()));
    assert_eq!(canvas.pixel(12, 12), Some(red.to_premul()));
    assert_eq!(canvas.pixel(23, 23), Some(blue.to_premul()));
    assert_eq!(canvas.pixel(30, 30), Some(ColorRgba::WHITE.to_premul()));
}

#[test]
fn anchor_is_the_sprite_center() {
    let mut canvas = Canvas::new(20, 20, ColorRgba::WHITE).unwrap();
    let black = ColorRgba::BLACK;
    composite(&mut canvas, &solid_sprite(4, 4, black), 10, 10);
    for y in 0..20 {
        for x in 0..20 {
            let inside = (8..12).contains(&x) && (8..12).contains(&y);
            let expected = if inside { black } else { ColorRgba::WHITE };
            assert_eq!(canvas.pixel(x, y), Some(expected.to_premul()), "({x},{y})");
        }
    }
}

#[test]
fn partially_out_of_bounds_draws_only_the_visible_part() {
    let mut canvas = Canvas::new(20, 20, ColorRgba::WHITE).unwrap();
    let black = ColorRgba::BLACK;
    composite(&mut canvas, &solid_sprite(10, 10, black), 0, 0);
    for y in 0..20 {
        for x in 0..20 {
            let inside = x < 5 && y < 5;
            let expected = if inside { black } else { ColorRgba::WHITE };
            assert_eq!(canvas.pixel(x, y), Some(expected.to_premul()), "({x},{y})");
        }
    }

    composite(&mut canvas, &solid_sprite(10, 10, black), 24, 24);
    assert_eq!(canvas.pixel(19, 19), Some(black.to_premul()));
    assert_eq!(canvas.pixel(18, 18), Some(ColorRgba::WHITE.to_premul()));
}

#[test]
fn fully_outside_is_a_noop() {
    let mut canvas = Canvas::new(10, 10, ColorRgba::WHITE).unwrap();
    let before = canvas.clone();
    let sprite = solid_sprite(4, 4, ColorRgba::BLACK);
    composite(&mut canvas, &sprite, -100, 5);
    composite(&mut canvas, &sprite, 5, 1_000);
    composite(&mut canvas, &sprite, i64::from(i32::MAX), i64::from(i32::MIN));
    assert_eq!(canvas, before);
}

#[test]
fn extreme_anchors_are_clipped() {
    let mut canvas = Canvas::new(10, 10, ColorRgba::WHITE).unwrap();
    let before = canvas.clone();
    let orb = render_orb(4, TEAL, 40).unwrap();
    let sprite = solid_sprite(5, 5, ColorRgba::BLACK);
    for s in [&orb, &sprite] {
        composite(&mut canvas, s, i64::MAX, 5);
        composite(&mut canvas, s, 5, i64::MAX);
        composite(&mut canvas, s, i64::MIN, 5);
        composite(&mut canvas, s, i64::MIN, i64::MIN);
        composite(&mut canvas, s, i64::MAX, i64::MIN);
    }
    assert_eq!(canvas, before);
}

#[test]
fn translucent_sprite_blends_over() {
    let mut canvas = Canvas::new(4, 4, ColorRgba::WHITE).unwrap();
    composite(
        &mut canvas,
        &solid_sprite(4, 4, ColorRgba::BLACK.with_alpha(128)),
        2,
        2,
    );
    assert_eq!(canvas.pixel(1, 1), Some([127, 127, 127, 255]));
}
