use super::*;

#[test]
fn identical_inputs_produce_identical_sprites() {
    let font = LabelFont::Builtin;
    let style = LabelStyle::new(ColorRgba::WHITE, TEAL, 24.0);
    let a = render_label("Hello!", &font, &style).unwrap();
    let b = render_label("Hello!", &font, &style).unwrap();
    assert_eq!((a.width(), a.height()), (b.width(), b.height()));
    assert_eq!(a.as_bytes(), b.as_bytes());
}

#[test]
fn size_is_body_plus_tail() {
    let font = LabelFont::Builtin;
    let style = LabelStyle::default();
    let sprite = render_label("BBB", &font, &style).unwrap();

    let extent = font.measure("BBB", style.font_size);
    let body_w = extent.width.ceil() as u32 + 2 * style.padding_x;
    let body_h = extent.height.ceil() as u32 + 2 * style.padding_y;
    assert_eq!(sprite.width(), body_w);
    assert_eq!(sprite.height(), body_h + style.tail_height);
}

#[test]
fn tail_hangs_below_the_midpoint_only() {
    let font = LabelFont::Builtin;
    let style = LabelStyle::default();
    let sprite = render_label("CBC", &font, &style).unwrap();

    let tail_row = sprite.height() - style.tail_height / 2;
    let mid = sprite.width() / 2;
    assert!(sprite.pixel(mid, tail_row).unwrap()[3] > 0);
    assert_eq!(sprite.pixel(0, tail_row).unwrap()[3], 0);
    assert_eq!(sprite.pixel(sprite.width() - 1, tail_row).unwrap()[3], 0);
}

#[test]
fn neutral_background_gets_an_accent_stroke() {
    let font = LabelFont::Builtin;
    let white = LabelStyle::new(ColorRgba::WHITE, TEAL, 16.0);
    let sprite = render_label("Hi", &font, &white).unwrap();

    // Left edge, vertically centered in the body: stroke, tinted toward teal.
    let body_h = sprite.height() - white.tail_height;
    let px = sprite.pixel(0, body_h / 2).unwrap();
    assert!(px[3] > 0);
    assert!(px[0] < px[1], "expected teal stroke, got {px:?}");

    let teal = LabelStyle::new(TEAL, ColorRgba::WHITE, 16.0);
    let plain = render_label("Hi", &font, &teal).unwrap();
    let inner = plain.pixel(3, body_h / 2).unwrap();
    assert_eq!(inner, TEAL.with_alpha(230).to_premul());
}

#[test]
fn text_is_drawn_inside_the_body() {
    let font = LabelFont::Builtin;
    let style = LabelStyle::new(TEAL, ColorRgba::WHITE, 16.0);
    let with_text = render_label("Hello", &font, &style).unwrap();
    let blank = render_label("     ", &font, &style).unwrap();
    assert_eq!(
        (with_text.width(), with_text.height()),
        (blank.width(), blank.height())
    );
    assert_ne!(with_text.as_bytes(), blank.as_bytes());

    // The tail region never carries text.
    let body_h = with_text.height() - style.tail_height;
    for y in body_h..with_text.height() {
        for x in 0..with_text.width() {
            assert_eq!(with_text.pixel(x, y), blank.pixel(x, y));
        }
    }
}

#[test]
fn rejects_bad_font_size() {
    let style = LabelStyle::new(TEAL, ColorRgba::WHITE, 0.0);
    assert!(matches!(
        render_label("x", &LabelFont::Builtin, &style),
        Err(CompositorError::Validation(_))
    ));
}

#[test]
fn oversized_labels_are_errors_not_panics() {
    let font = LabelFont::Builtin;
    let huge_font = LabelStyle::new(TEAL, ColorRgba::WHITE, 1.0e10);
    assert!(matches!(
        render_label("Hi", &font, &huge_font),
        Err(CompositorError::InvalidDimension(_))
    ));

    let huge_padding = LabelStyle {
        padding_x: u32::MAX,
        ..LabelStyle::default()
    };
    assert!(matches!(
        render_label("Hi", &font, &huge_padding),
        Err(CompositorError::InvalidDimension(_))
    ));

    let huge_tail = LabelStyle {
        tail_height: u32::MAX,
        ..LabelStyle::default()
    };
    assert!(matches!(
        render_label("Hi", &font, &huge_tail),
        Err(CompositorError::InvalidDimension(_))
    ));
}
