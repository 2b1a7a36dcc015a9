//! Image resizing through separable filter passes.

pub(crate) mod kernel;
pub(crate) mod pass;

pub use kernel::ResizeAlgorithm;

use crate::buffer::image::{Image, pixel_count};
use crate::foundation::error::{RastelError, RastelResult};
use crate::foundation::math::round_to_u8;
use crate::pixel::model::{Pixel, PixelMode};
use kernel::coefficients;
use pass::{Axis, Plane, weighted_pass};

/// Row parallelism for large resamples.
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct ResampleThreading {
    pub parallel: bool,
    /// Worker count for the pool; `None` lets rayon decide.
    pub threads: Option<usize>,
    /// Outputs smaller than this stay on the calling thread.
    pub min_parallel_pixels: usize,
}

impl Default for ResampleThreading {
    fn default() -> Self {
        Self {
            parallel: false,
            threads: None,
            min_parallel_pixels: 1 << 16,
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct ResampleOpts {
    pub threading: ResampleThreading,
}

/// Resize `source` to `width x height` with the default options.
pub fn resample(
    source: &Image,
    width: u32,
    height: u32,
    algorithm: ResizeAlgorithm,
) -> RastelResult<Image> {
    resample_with(source, width, height, algorithm, &ResampleOpts::default())
}

/// Resize `source` to `width x height`.
///
/// A zero-area target yields a zero-area image of the target size; a zero-area source
/// yields a `0x0` image. Axes whose size does not change are copied untouched.
#[tracing::instrument(skip(source, opts), fields(source_dims = ?source.dimensions()))]
pub fn resample_with(
    source: &Image,
    width: u32,
    height: u32,
    algorithm: ResizeAlgorithm,
    opts: &ResampleOpts,
) -> RastelResult<Image> {
    let out_len = pixel_count(width, height)?;
    let threads = &opts.threading;
    if threads.threads == Some(0) {
        return Err(RastelError::validation(
            "resample threading 'threads' must be >= 1 when set",
        ));
    }

    let mode = source.mode();
    if out_len == 0 {
        return Ok(source.with_data(width, height, mode, Vec::new()));
    }
    if source.is_empty() {
        return Ok(source.with_data(0, 0, mode, Vec::new()));
    }
    if (width, height) == source.dimensions() {
        return Ok(source.clone());
    }
    out_len
        .checked_mul(mode.channel_count())
        .ok_or_else(|| RastelError::invalid_dimensions(format!("{width}x{height} overflows")))?;

    let pool = if threads.parallel && out_len >= threads.min_parallel_pixels {
        Some(build_thread_pool(threads.threads)?)
    } else {
        None
    };

    let mut plane = to_plane(source);
    if width != source.width() {
        let taps = coefficients(algorithm, plane.width, width as usize);
        plane = weighted_pass(&plane, &taps, Axis::Horizontal, pool.as_ref());
    }
    if height != source.height() {
        let taps = coefficients(algorithm, plane.height, height as usize);
        plane = weighted_pass(&plane, &taps, Axis::Vertical, pool.as_ref());
    }

    Ok(source.with_data(width, height, mode, from_plane(&plane, mode)))
}

fn build_thread_pool(threads: Option<usize>) -> RastelResult<rayon::ThreadPool> {
    let mut builder = rayon::ThreadPoolBuilder::new();
    if let Some(n) = threads {
        builder = builder.num_threads(n);
    }
    builder
        .build()
        .map_err(|e| anyhow::anyhow!("failed to build rayon thread pool: {e}").into())
}

/// Expand into float samples; Rgba is premultiplied.
fn to_plane(image: &Image) -> Plane {
    let channels = image.mode().channel_count();
    let mut samples = Vec::with_capacity(image.len() * channels);
    for p in image.data() {
        let c = p.channels();
        match p {
            Pixel::Rgba(px) => {
                let a = f32::from(px.a) / 255.0;
                samples.extend([
                    f32::from(px.r) * a,
                    f32::from(px.g) * a,
                    f32::from(px.b) * a,
                    f32::from(px.a),
                ]);
            }
            _ => samples.extend(c[..channels].iter().map(|&v| f32::from(v))),
        }
    }
    Plane {
        width: image.width() as usize,
        height: image.height() as usize,
        channels,
        samples,
    }
}

fn from_plane(plane: &Plane, mode: PixelMode) -> Vec<Pixel> {
    plane
        .samples
        .chunks_exact(plane.channels)
        .map(|s| {
            let mut c = [0u8; 4];
            if mode == PixelMode::Rgba {
                let a = s[3].clamp(0.0, 255.0);
                c[3] = round_to_u8(a);
                if c[3] > 0 {
                    for (slot, v) in c.iter_mut().zip(&s[..3]) {
                        *slot = round_to_u8(v * 255.0 / a);
                    }
                }
            } else {
                for (slot, v) in c.iter_mut().zip(s) {
                    *slot = round_to_u8(*v);
                }
            }
            Pixel::from_bytes(mode, c)
        })
        .collect()
}

#[cfg(test)]
#[path = "../../tests/unit/resample/resample.rs"]
mod tests;
