use crate::compose::canvas::Canvas;
use crate::foundation::math::over;
use crate::render::sprite::Sprite;

/// Blend `sprite` over `canvas` with its center at `(anchor_x, anchor_y)`.
///
/// The top-left corner lands at `anchor - size / 2` (integer division). Parts outside the
/// canvas are clipped; zero-alpha sprite pixels leave the canvas untouched.
pub fn composite(canvas: &mut Canvas, sprite: &Sprite, anchor_x: i64, anchor_y: i64) {
    let left = anchor_x.saturating_sub(i64::from(sprite.width() / 2));
    let top = anchor_y.saturating_sub(i64::from(sprite.height() / 2));

    let cw = i64::from(canvas.width());
    let ch = i64::from(canvas.height());
    let x0 = left.max(0);
    let y0 = top.max(0);
    let x1 = left.saturating_add(i64::from(sprite.width())).min(cw);
    let y1 = top.saturating_add(i64::from(sprite.height())).min(ch);
    if x0 >= x1 || y0 >= y1 {
        return;
    }

    let src = sprite.as_bytes();
    let sw = sprite.width() as usize;
    let span = (x1 - x0) as usize * 4;
    let dst = canvas.as_bytes_mut();

    for y in y0..y1 {
        let sy = (y - top) as usize;
        let sx = (x0 - left) as usize;
        let s_off = (sy * sw + sx) * 4;
        let d_off = (y as usize * cw as usize + x0 as usize) * 4;

        let s_row = &src[s_off..s_off + span];
        let d_row = &mut dst[d_off..d_off + span];
        for (d, s) in d_row.chunks_exact_mut(4).zip(s_row.chunks_exact(4)) {
            if s[3] == 0 {
                continue;
            }
            let out = over([d[0], d[1], d[2], d[3]], [s[0], s[1], s[2], s[3]]);
            d.copy_from_slice(&out);
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/compose/composite.rs"]
mod tests;
