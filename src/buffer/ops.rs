use smallvec::SmallVec;

use crate::buffer::image::Image;
use crate::foundation::error::{RastelError, RastelResult};
use crate::pixel::model::{Pixel, PixelMode};

/// Per-channel planes returned by [`Image::bands`].
pub type Bands = SmallVec<[Image; 4]>;

impl Image {
    /// Crop in place to the half-open region `[x1, x2) x [y1, y2)`.
    ///
    /// Requires `x1 <= x2 <= width` and `y1 <= y2 <= height`. The result is always
    /// `(x2 - x1) x (y2 - y1)`, so an empty region leaves a zero-area image such as `0 x h`.
    pub fn crop(&mut self, x1: u32, y1: u32, x2: u32, y2: u32) -> RastelResult<()> {
        let (w, h) = self.dimensions();
        if x1 > x2 || x2 > w || y1 > y2 || y2 > h {
            return Err(RastelError::out_of_bounds(format!(
                "crop ({x1}, {y1})..({x2}, {y2}) does not fit {w}x{h} image"
            )));
        }

        let cw = (x2 - x1) as usize;
        let ch = (y2 - y1) as usize;
        let mut data = Vec::with_capacity(cw * ch);
        if cw > 0 {
            let src = self.data();
            for y in y1 as usize..y2 as usize {
                let row = y * w as usize;
                data.extend_from_slice(&src[row + x1 as usize..row + x2 as usize]);
            }
        }

        *self = self.with_data(x2 - x1, y2 - y1, self.mode(), data);
        Ok(())
    }

    /// Reflect left to right, in place.
    pub fn mirror(&mut self) {
        let w = self.width() as usize;
        if w == 0 {
            return;
        }
        for row in self.data_mut().chunks_exact_mut(w) {
            row.reverse();
        }
    }

    /// Reflect top to bottom, in place.
    pub fn flip(&mut self) {
        let w = self.width() as usize;
        let h = self.height() as usize;
        let data = self.data_mut();
        for y in 0..h / 2 {
            let (top, bottom) = data.split_at_mut((h - 1 - y) * w);
            top[y * w..(y + 1) * w].swap_with_slice(&mut bottom[..w]);
        }
    }

    /// Complement every channel; alpha is left alone and Bit pixels are negated.
    pub fn invert(&mut self) {
        for p in self.data_mut() {
            *p = p.inverted();
        }
    }

    /// Split an Rgb or Rgba image into one L image per channel.
    pub fn bands(&self) -> RastelResult<Bands> {
        let count = match self.mode() {
            PixelMode::Rgb => 3,
            PixelMode::Rgba => 4,
            other => {
                return Err(RastelError::unsupported_mode(format!(
                    "bands needs an RGB or RGBA image, got {other}"
                )));
            }
        };
        let (w, h) = self.dimensions();
        Ok((0..count)
            .map(|c| {
                let data = self
                    .data()
                    .iter()
                    .map(|p| Pixel::l(p.channels()[c]))
                    .collect();
                self.with_data(w, h, PixelMode::L, data)
            })
            .collect())
    }

    /// Merge 3 (Rgb) or 4 (Rgba) equally sized L bands.
    pub fn from_bands(bands: &[Image]) -> RastelResult<Self> {
        let mode = match bands.len() {
            3 => PixelMode::Rgb,
            4 => PixelMode::Rgba,
            n => return Err(RastelError::InvalidBandCount(n)),
        };
        let first = &bands[0];
        for band in bands {
            if band.mode() != PixelMode::L {
                return Err(RastelError::unsupported_mode(format!(
                    "bands must be L images, got {}",
                    band.mode()
                )));
            }
            if band.dimensions() != first.dimensions() {
                return Err(RastelError::dimension_mismatch(format!(
                    "band is {}x{}, expected {}x{}",
                    band.width(),
                    band.height(),
                    first.width(),
                    first.height()
                )));
            }
        }

        let data = (0..first.len())
            .map(|i| {
                let mut c = [0u8; 4];
                for (slot, band) in c.iter_mut().zip(bands) {
                    *slot = band.data()[i].luminance();
                }
                Pixel::from_bytes(mode, c)
            })
            .collect();
        Ok(first.with_data(first.width(), first.height(), mode, data))
    }

    /// New image carrying this one's overlay mode and format but the given pixels.
    pub(crate) fn with_data(&self, width: u32, height: u32, mode: PixelMode, data: Vec<Pixel>) -> Self {
        let mut out = Self::from_raw_parts(width, height, mode, data);
        out.set_overlay_mode(self.overlay_mode());
        out.set_format(self.format());
        out
    }
}

#[cfg(test)]
#[path = "../../tests/unit/buffer/ops.rs"]
mod tests;
