use smallvec::SmallVec;

use std::f32::consts::PI;

/// Resampling filter used by [`crate::Image::resize`].
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize,
)]
pub enum ResizeAlgorithm {
    /// Nearest source pixel; the same as Box when upscaling.
    Nearest,
    /// Area average over the output footprint.
    Box,
    /// Linear interpolation.
    Bilinear,
    /// Hamming-windowed sinc, support 1.
    Hamming,
    /// Catmull-Rom cubic, support 2.
    #[default]
    Bicubic,
    /// Mitchell-Netravali cubic (B = C = 1/3), support 2.
    Mitchell,
    /// Lanczos windowed sinc, support 3.
    Lanczos3,
}

impl ResizeAlgorithm {
    /// Kernel support radius in source pixels at scale 1, for the convolution filters.
    fn support(self) -> Option<f32> {
        match self {
            Self::Nearest | Self::Box => None,
            Self::Bilinear | Self::Hamming => Some(1.0),
            Self::Bicubic | Self::Mitchell => Some(2.0),
            Self::Lanczos3 => Some(3.0),
        }
    }

    fn weight(self, x: f32) -> f32 {
        match self {
            Self::Nearest | Self::Box => 0.0,
            Self::Bilinear => bilinear(x),
            Self::Hamming => hamming(x),
            Self::Bicubic => bicubic(x),
            Self::Mitchell => mitchell(x),
            Self::Lanczos3 => lanczos3(x),
        }
    }
}

/// Contiguous source taps for one output sample.
#[derive(Clone, Debug, PartialEq)]
pub(crate) struct Taps {
    pub(crate) start: usize,
    pub(crate) weights: SmallVec<[f32; 8]>,
}

/// Build the taps of every output sample along one axis.
///
/// Taps that fall outside `0..in_size` are folded onto the edge pixel, and each weight set
/// is normalized to sum to one.
pub(crate) fn coefficients(algorithm: ResizeAlgorithm, in_size: usize, out_size: usize) -> Vec<Taps> {
    debug_assert!(in_size > 0 && out_size > 0);
    let scale = in_size as f32 / out_size as f32;

    match (algorithm, algorithm.support()) {
        (_, Some(support)) => (0..out_size)
            .map(|i| convolution_taps(algorithm, support, scale, in_size, i))
            .collect(),
        (ResizeAlgorithm::Box, None) if scale > 1.0 => {
            (0..out_size).map(|i| box_taps(scale, in_size, i)).collect()
        }
        _ => (0..out_size)
            .map(|i| Taps {
                start: nearest_index(scale, in_size, i),
                weights: SmallVec::from_slice(&[1.0]),
            })
            .collect(),
    }
}

fn nearest_index(scale: f32, in_size: usize, i: usize) -> usize {
    let src = ((i as f32 + 0.5) * scale).floor();
    (src.max(0.0) as usize).min(in_size - 1)
}

/// Exact overlap of the output footprint `[i*scale, (i+1)*scale)` with each source pixel.
fn box_taps(scale: f32, in_size: usize, i: usize) -> Taps {
    let lo = i as f32 * scale;
    let hi = ((i + 1) as f32 * scale).min(in_size as f32);
    let start = (lo.floor() as usize).min(in_size - 1);
    let end = (hi.ceil() as usize).clamp(start + 1, in_size);

    let mut weights: SmallVec<[f32; 8]> = (start..end)
        .map(|j| (hi.min((j + 1) as f32) - lo.max(j as f32)).max(0.0))
        .collect();
    normalize(&mut weights);
    Taps { start, weights }
}

fn convolution_taps(
    algorithm: ResizeAlgorithm,
    support: f32,
    scale: f32,
    in_size: usize,
    i: usize,
) -> Taps {
    // widen the kernel when downscaling so every source pixel contributes
    let filterscale = scale.max(1.0);
    let support = support * filterscale;
    let center = (i as f32 + 0.5) * scale;

    let left = (center - support).floor() as i64;
    let right = (center + support).ceil() as i64;
    let last = in_size as i64 - 1;
    let start = left.clamp(0, last);
    let end = (right - 1).clamp(0, last);

    let mut weights: SmallVec<[f32; 8]> = SmallVec::from_elem(0.0, (end - start + 1) as usize);
    for j in left..right {
        let w = algorithm.weight((j as f32 + 0.5 - center) / filterscale);
        let slot = (j.clamp(0, last) - start) as usize;
        weights[slot] += w;
    }
    normalize(&mut weights);
    Taps {
        start: start as usize,
        weights,
    }
}

fn normalize(weights: &mut [f32]) {
    let sum: f32 = weights.iter().sum();
    if sum != 0.0 {
        for w in weights.iter_mut() {
            *w /= sum;
        }
    }
}

fn sinc(x: f32) -> f32 {
    if x == 0.0 {
        1.0
    } else {
        let px = PI * x;
        px.sin() / px
    }
}

fn bilinear(x: f32) -> f32 {
    (1.0 - x.abs()).max(0.0)
}

fn hamming(x: f32) -> f32 {
    let x = x.abs();
    if x == 0.0 {
        1.0
    } else if x >= 1.0 {
        0.0
    } else {
        sinc(x) * (0.54 + 0.46 * (PI * x).cos())
    }
}

fn bicubic(x: f32) -> f32 {
    const A: f32 = -0.5;
    let x = x.abs();
    if x < 1.0 {
        ((A + 2.0) * x - (A + 3.0)) * x * x + 1.0
    } else if x < 2.0 {
        ((A * x - 5.0 * A) * x + 8.0 * A) * x - 4.0 * A
    } else {
        0.0
    }
}

fn mitchell(x: f32) -> f32 {
    const B: f32 = 1.0 / 3.0;
    const C: f32 = 1.0 / 3.0;
    let x = x.abs();
    if x < 1.0 {
        ((12.0 - 9.0 * B - 6.0 * C) * x * x * x
            + (-18.0 + 12.0 * B + 6.0 * C) * x * x
            + (6.0 - 2.0 * B))
            / 6.0
    } else if x < 2.0 {
        ((-B - 6.0 * C) * x * x * x
            + (6.0 * B + 30.0 * C) * x * x
            + (-12.0 * B - 48.0 * C) * x
            + (8.0 * B + 24.0 * C))
            / 6.0
    } else {
        0.0
    }
}

fn lanczos3(x: f32) -> f32 {
    if x.abs() < 3.0 {
        sinc(x) * sinc(x / 3.0)
    } else {
        0.0
    }
}

#[cfg(test)]
#[path = "../../tests/unit/resample/kernel.rs"]
mod tests;
