use rayon::prelude::*;

use crate::resample::kernel::Taps;

/// Interleaved `f32` plane: `width * height * channels` samples.
#[derive(Clone, Debug)]
pub(crate) struct Plane {
    pub(crate) width: usize,
    pub(crate) height: usize,
    pub(crate) channels: usize,
    pub(crate) samples: Vec<f32>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum Axis {
    Horizontal,
    Vertical,
}

/// One weighted-sum pass along `axis`, producing `taps.len()` samples on that axis.
///
/// With a pool the output rows are filled in parallel; the result is identical either way.
pub(crate) fn weighted_pass(
    src: &Plane,
    taps: &[Taps],
    axis: Axis,
    pool: Option<&rayon::ThreadPool>,
) -> Plane {
    let (width, height) = match axis {
        Axis::Horizontal => (taps.len(), src.height),
        Axis::Vertical => (src.width, taps.len()),
    };
    let channels = src.channels;
    let row_len = width * channels;
    let mut samples = vec![0.0f32; row_len * height];

    if row_len == 0 {
        return Plane {
            width,
            height,
            channels,
            samples,
        };
    }

    let fill_row = |(y, row): (usize, &mut [f32])| match axis {
        Axis::Horizontal => horizontal_row(src, taps, y, row),
        Axis::Vertical => vertical_row(src, &taps[y], row),
    };

    match pool {
        Some(pool) => pool.install(|| {
            samples
                .par_chunks_mut(row_len)
                .enumerate()
                .for_each(fill_row)
        }),
        None => samples.chunks_mut(row_len).enumerate().for_each(fill_row),
    }

    Plane {
        width,
        height,
        channels,
        samples,
    }
}

fn horizontal_row(src: &Plane, taps: &[Taps], y: usize, out: &mut [f32]) {
    let c = src.channels;
    let row = &src.samples[y * src.width * c..(y + 1) * src.width * c];
    for (x, tap) in taps.iter().enumerate() {
        let dst = &mut out[x * c..(x + 1) * c];
        for (k, &w) in tap.weights.iter().enumerate() {
            let s = &row[(tap.start + k) * c..(tap.start + k + 1) * c];
            for (d, v) in dst.iter_mut().zip(s) {
                *d += w * v;
            }
        }
    }
}

fn vertical_row(src: &Plane, tap: &Taps, out: &mut [f32]) {
    let stride = src.width * src.channels;
    for (k, &w) in tap.weights.iter().enumerate() {
        let sy = tap.start + k;
        let s = &src.samples[sy * stride..(sy + 1) * stride];
        for (d, v) in out.iter_mut().zip(s) {
            *d += w * v;
        }
    }
}
