use crate::foundation::core::PremulRgba8;

pub(crate) fn mul_div255_u16(x: u16, y: u16) -> u16 {
    (((u32::from(x) * u32::from(y)) + 127) / 255) as u16
}

pub(crate) fn mul_div255_u8(x: u16, y: u16) -> u8 {
    mul_div255_u16(x, y) as u8
}

/// Premultiplied source-over: `dst = src + dst * (1 - src.a)`.
pub(crate) fn over(dst: PremulRgba8, src: PremulRgba8) -> PremulRgba8 {
    if src[3] == 0 {
        return dst;
    }
    if src[3] == 255 {
        return src;
    }

    let inv = 255u16 - u16::from(src[3]);
    let mut out = [0u8; 4];
    for i in 0..4 {
        let dc = mul_div255_u8(u16::from(dst[i]), inv);
        out[i] = src[i].saturating_add(dc);
    }
    out
}

pub(crate) fn premultiply_rgba8_in_place(rgba: &mut [u8]) {
    for px in rgba.chunks_exact_mut(4) {
        let a = u16::from(px[3]);
        if a == 0 {
            px[0] = 0;
            px[1] = 0;
            px[2] = 0;
            continue;
        }
        px[0] = mul_div255_u8(u16::from(px[0]), a);
        px[1] = mul_div255_u8(u16::from(px[1]), a);
        px[2] = mul_div255_u8(u16::from(px[2]), a);
    }
}

/// Coverage of a pixel centered at signed distance `d` for a filled region `d <= 0`,
/// with a one-pixel linear ramp across the boundary.
pub(crate) fn fill_coverage(d: f64) -> f64 {
    (0.5 - d).clamp(0.0, 1.0)
}

/// Coverage of a pixel centered at signed distance `d` for the band `inner <= d <= outer`.
pub(crate) fn band_coverage(d: f64, inner: f64, outer: f64) -> f64 {
    if outer <= inner {
        return 0.0;
    }
    let from_inner = d - inner + 0.5;
    let from_outer = outer - d + 0.5;
    from_inner.min(from_outer).min(outer - inner).clamp(0.0, 1.0)
}
