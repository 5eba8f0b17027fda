use crate::foundation::core::Rgba8;

/// Straight-alpha "over": composite `src` on top of `dst`.
///
/// A fully transparent source leaves `dst` untouched; a fully opaque source replaces it.
pub fn over(dst: Rgba8, src: Rgba8) -> Rgba8 {
    if src.a == 0 {
        return dst;
    }

    let sa = f64::from(src.a) / 255.0;
    let da = f64::from(dst.a) / 255.0;
    let oa = sa + da * (1.0 - sa);
    if oa == 0.0 {
        return Rgba8::TRANSPARENT;
    }

    // Evaluated as `d * da * (1 - sa)` left to right; regrouping shifts half-way values.
    let channel = |s: u8, d: u8| -> u8 {
        round_u8((f64::from(s) * sa + f64::from(d) * da * (1.0 - sa)) / oa)
    };

    Rgba8 {
        r: channel(src.r, dst.r),
        g: channel(src.g, dst.g),
        b: channel(src.b, dst.b),
        a: round_u8(oa * 255.0),
    }
}

/// Composite `src` into one 4-byte RGBA slot.
pub fn over_in_place(dst: &mut [u8; 4], src: Rgba8) {
    *dst = over(Rgba8::from_array(*dst), src).to_array();
}

// Half-up rounding; the weighted mean never leaves [0, 255].
fn round_u8(v: f64) -> u8 {
    (v + 0.5) as u8
}

#[cfg(test)]
#[path = "../../tests/unit/raster/blend.rs"]
mod tests;
