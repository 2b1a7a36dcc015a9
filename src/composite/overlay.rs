use crate::foundation::math::mul_div255_u32;
use crate::pixel::model::{Pixel, Rgba};

/// How a painted pixel combines with the pixel already in the destination.
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize,
)]
pub enum OverlayMode {
    /// Replace the destination unconditionally; source alpha is copied, not blended.
    Overwrite,
    /// Source-over alpha compositing.
    #[default]
    Blend,
}

impl std::fmt::Display for OverlayMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Overwrite => f.write_str("overwrite"),
            Self::Blend => f.write_str("blend"),
        }
    }
}

/// Replace `dst` with `src` expressed in the destination mode.
pub fn overwrite(dst: Pixel, src: Pixel) -> Pixel {
    src.convert(dst.mode())
}

/// Straight-alpha source-over of `src` onto `dst`, with `opacity` (0..=255) scaling the
/// source alpha. The result keeps the destination mode.
///
/// For an opaque destination each channel is `src*sa + dst*(1-sa)` rounded.
pub fn blend(dst: Pixel, src: Pixel, opacity: u8) -> Pixel {
    let mode = dst.mode();
    let sa = mul_div255_u32(u32::from(src.alpha()), u32::from(opacity));
    if sa == 0 {
        return dst;
    }
    if sa == 255 {
        return src.convert(mode);
    }

    let s = src.to_rgba();
    let d = dst.to_rgba();
    Pixel::Rgba(over(d, s, sa)).convert(mode)
}

/// Apply `mode` with fractional `coverage` (0..=255), as produced by the rasterizer and by
/// glyph masks. Overwrite paints only where coverage reaches half.
pub fn composite(dst: Pixel, src: Pixel, mode: OverlayMode, coverage: u8) -> Pixel {
    match mode {
        OverlayMode::Overwrite => {
            if coverage >= 128 {
                overwrite(dst, src)
            } else {
                dst
            }
        }
        OverlayMode::Blend => blend(dst, src, coverage),
    }
}

fn over(d: Rgba, s: Rgba, sa: u32) -> Rgba {
    let da = u32::from(d.a);
    let inv = 255 - sa;
    let out_a = sa + mul_div255_u32(da, inv);
    if out_a == 0 {
        return Rgba::transparent();
    }

    // colors weighted by their effective coverage, then un-premultiplied by out_a
    let den = out_a * 255;
    let mix = |sc: u8, dc: u8| -> u8 {
        let num = u32::from(sc) * sa * 255 + u32::from(dc) * da * inv;
        ((num + den / 2) / den).min(255) as u8
    };

    Rgba {
        r: mix(s.r, d.r),
        g: mix(s.g, d.g),
        b: mix(s.b, d.b),
        a: out_a.min(255) as u8,
    }
}

#[cfg(test)]
#[path = "../../tests/unit/composite/overlay.rs"]
mod tests;
