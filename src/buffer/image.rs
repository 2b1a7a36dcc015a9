use std::path::Path;

use crate::codec::format::ImageFormat;
use crate::codec::image_codec::{Decoded, Decoder, Encodable, Encoder, ImageCodec};
use crate::composite::overlay::{OverlayMode, blend, composite, overwrite};
use crate::draw::raster::Draw;
use crate::foundation::error::{RastelError, RastelResult};
use crate::foundation::math::mul_div255_u8;
use crate::pixel::model::{Pixel, PixelMode};
use crate::resample::{ResizeAlgorithm, resample};

/// A still image: `width * height` pixels of one [`PixelMode`], stored row-major.
///
/// The buffer owns its pixels; paste and draw copy or combine values, never alias.
/// Equality compares dimensions, mode and pixels only.
#[derive(Clone, Debug)]
pub struct Image {
    width: u32,
    height: u32,
    mode: PixelMode,
    data: Vec<Pixel>,
    overlay: OverlayMode,
    format: Option<ImageFormat>,
}

impl PartialEq for Image {
    fn eq(&self, other: &Self) -> bool {
        self.width == other.width
            && self.height == other.height
            && self.mode == other.mode
            && self.data == other.data
    }
}

impl Eq for Image {}

impl Image {
    /// Create a `width x height` image with every pixel set to `fill`.
    ///
    /// Zero on either axis is rejected; use [`Image::empty`] for a zero-area buffer.
    pub fn new(width: u32, height: u32, fill: impl Into<Pixel>) -> RastelResult<Self> {
        if width == 0 || height == 0 {
            return Err(RastelError::invalid_dimensions(format!(
                "image must be at least 1x1, got {width}x{height} (use Image::empty for zero-area)"
            )));
        }
        let len = pixel_count(width, height)?;
        let fill = fill.into();
        Ok(Self::from_raw_parts(
            width,
            height,
            fill.mode(),
            vec![fill; len],
        ))
    }

    /// A zero-area image of the given mode.
    pub fn empty(mode: PixelMode) -> Self {
        Self::from_raw_parts(0, 0, mode, Vec::new())
    }

    /// Shape a flat pixel list into rows of `width`.
    ///
    /// The mode is taken from the first pixel; later pixels are converted into it.
    pub fn from_pixels(width: u32, pixels: impl IntoIterator<Item = Pixel>) -> RastelResult<Self> {
        if width == 0 {
            return Err(RastelError::invalid_dimensions("width must be > 0"));
        }
        let pixels: Vec<Pixel> = pixels.into_iter().collect();
        let Some(first) = pixels.first() else {
            return Err(RastelError::invalid_dimensions(
                "pixel list is empty (use Image::empty for zero-area)",
            ));
        };
        let mode = first.mode();
        if pixels.len() % width as usize != 0 {
            return Err(RastelError::dimension_mismatch(format!(
                "{} pixels cannot be shaped into rows of width {width}",
                pixels.len()
            )));
        }
        let height = u32::try_from(pixels.len() / width as usize)
            .map_err(|_| RastelError::invalid_dimensions("height exceeds u32"))?;
        let data = pixels.into_iter().map(|p| p.convert(mode)).collect();
        Ok(Self::from_raw_parts(width, height, mode, data))
    }

    pub(crate) fn from_raw_parts(width: u32, height: u32, mode: PixelMode, data: Vec<Pixel>) -> Self {
        debug_assert_eq!(data.len(), width as usize * height as usize);
        Self {
            width,
            height,
            mode,
            data,
            overlay: OverlayMode::default(),
            format: None,
        }
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn dimensions(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    pub fn mode(&self) -> PixelMode {
        self.mode
    }

    /// Number of pixels.
    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Row-major pixel slice.
    pub fn data(&self) -> &[Pixel] {
        &self.data
    }

    pub(crate) fn data_mut(&mut self) -> &mut [Pixel] {
        &mut self.data
    }

    /// Pixels grouped into rows.
    pub fn pixels(&self) -> Vec<Vec<Pixel>> {
        if self.width == 0 {
            return vec![Vec::new(); self.height as usize];
        }
        self.data
            .chunks_exact(self.width as usize)
            .map(<[Pixel]>::to_vec)
            .collect()
    }

    /// Overlay mode used by [`Image::paste`] without a mask and by shapes that do not set
    /// their own.
    pub fn overlay_mode(&self) -> OverlayMode {
        self.overlay
    }

    pub fn set_overlay_mode(&mut self, mode: OverlayMode) {
        self.overlay = mode;
    }

    pub fn with_overlay_mode(mut self, mode: OverlayMode) -> Self {
        self.overlay = mode;
        self
    }

    /// Format this image was decoded from, if any.
    pub fn format(&self) -> Option<ImageFormat> {
        self.format
    }

    pub(crate) fn set_format(&mut self, format: Option<ImageFormat>) {
        self.format = format;
    }

    pub(crate) fn index_of(&self, x: u32, y: u32) -> RastelResult<usize> {
        if x >= self.width || y >= self.height {
            return Err(RastelError::out_of_bounds(format!(
                "pixel ({x}, {y}) outside {}x{} image",
                self.width, self.height
            )));
        }
        Ok(y as usize * self.width as usize + x as usize)
    }

    pub fn pixel(&self, x: u32, y: u32) -> RastelResult<Pixel> {
        Ok(self.data[self.index_of(x, y)?])
    }

    /// Set one pixel; the value is converted into the image mode.
    pub fn set_pixel(&mut self, x: u32, y: u32, pixel: impl Into<Pixel>) -> RastelResult<()> {
        let idx = self.index_of(x, y)?;
        self.data[idx] = pixel.into().convert(self.mode);
        Ok(())
    }

    /// Composite one pixel at signed coordinates; anything off the image is skipped.
    pub(crate) fn paint(&mut self, x: i64, y: i64, src: Pixel, mode: OverlayMode, coverage: u8) {
        if coverage == 0 || x < 0 || y < 0 || x >= i64::from(self.width) || y >= i64::from(self.height) {
            return;
        }
        let idx = y as usize * self.width as usize + x as usize;
        self.data[idx] = composite(self.data[idx], src, mode, coverage);
    }

    /// A copy of this image converted to `mode`.
    pub fn convert(&self, mode: PixelMode) -> Self {
        let data = self.data.iter().map(|p| p.convert(mode)).collect();
        self.with_data(self.width, self.height, mode, data)
    }

    /// Paste `src` with its top-left corner at `(x, y)`.
    ///
    /// Without a mask the pixels combine through this image's overlay mode. A mask (Bit or
    /// L, same dimensions as `src`) takes precedence over the overlay mode: a Bit mask
    /// overwrites where it is on, an L mask blends with `src alpha * mask / 255`.
    /// Source pixels that land outside this image are skipped.
    pub fn paste(&mut self, x: u32, y: u32, src: &Image, mask: Option<&Image>) -> RastelResult<()> {
        if let Some(mask) = mask {
            check_mask(mask, src.dimensions())?;
        }

        for sy in 0..src.height {
            let dy = u64::from(y) + u64::from(sy);
            if dy >= u64::from(self.height) {
                break;
            }
            for sx in 0..src.width {
                let dx = u64::from(x) + u64::from(sx);
                if dx >= u64::from(self.width) {
                    break;
                }
                let si = sy as usize * src.width as usize + sx as usize;
                let di = dy as usize * self.width as usize + dx as usize;
                let s = src.data[si];
                let d = self.data[di];
                self.data[di] = match mask.map(|m| m.data[si]) {
                    None => composite(d, s, self.overlay, 255),
                    Some(Pixel::Bit(on)) => {
                        if on.0 {
                            overwrite(d, s)
                        } else {
                            d
                        }
                    }
                    Some(m) => blend(d, s, m.luminance()),
                };
            }
        }
        Ok(())
    }

    /// Scale this image's alpha by the luminance of `mask` (Bit on counts as 255).
    ///
    /// Only defined for Rgba images; the mask must have this image's dimensions.
    pub fn mask_alpha(&mut self, mask: &Image) -> RastelResult<()> {
        if self.mode != PixelMode::Rgba {
            return Err(RastelError::unsupported_mode(format!(
                "mask_alpha needs an RGBA image, got {}",
                self.mode
            )));
        }
        check_mask(mask, self.dimensions())?;

        for (p, m) in self.data.iter_mut().zip(&mask.data) {
            if let Pixel::Rgba(px) = p {
                px.a = mul_div255_u8(px.a, m.luminance());
            }
        }
        Ok(())
    }

    /// Draw a shape or text entity onto this image in place.
    pub fn draw<D: Draw + ?Sized>(&mut self, entity: &D) -> RastelResult<()> {
        entity.draw(self)
    }

    /// Resize in place.
    pub fn resize(&mut self, width: u32, height: u32, algorithm: ResizeAlgorithm) -> RastelResult<()> {
        *self = self.resized(width, height, algorithm)?;
        Ok(())
    }

    /// Resized copy.
    pub fn resized(&self, width: u32, height: u32, algorithm: ResizeAlgorithm) -> RastelResult<Self> {
        resample(self, width, height, algorithm)
    }

    /// Decode an image from bytes; `format` skips signature sniffing.
    ///
    /// Animated inputs yield their first frame.
    pub fn from_bytes(bytes: &[u8], format: Option<ImageFormat>) -> RastelResult<Self> {
        ImageCodec::default().decode(bytes, format)?.into_image()
    }

    /// Open a file, inferring the format from its extension.
    pub fn open(path: impl AsRef<Path>) -> RastelResult<Self> {
        let path = path.as_ref();
        let format = ImageFormat::from_path(path)?;
        let bytes = std::fs::read(path)?;
        Decoded::into_image(ImageCodec::default().decode(&bytes, Some(format))?)
    }

    pub fn encode(&self, format: ImageFormat) -> RastelResult<Vec<u8>> {
        ImageCodec::default().encode(Encodable::Image(self), format)
    }

    /// Save to a file, inferring the format from its extension.
    pub fn save(&self, path: impl AsRef<Path>) -> RastelResult<()> {
        let path = path.as_ref();
        let format = ImageFormat::from_path(path)?;
        self.save_as(path, format)
    }

    pub fn save_as(&self, path: impl AsRef<Path>, format: ImageFormat) -> RastelResult<()> {
        let bytes = self.encode(format)?;
        std::fs::write(path, bytes)?;
        Ok(())
    }
}

pub(crate) fn pixel_count(width: u32, height: u32) -> RastelResult<usize> {
    (width as usize)
        .checked_mul(height as usize)
        .ok_or_else(|| RastelError::invalid_dimensions(format!("{width}x{height} overflows")))
}

fn check_mask(mask: &Image, expected: (u32, u32)) -> RastelResult<()> {
    if !matches!(mask.mode, PixelMode::Bit | PixelMode::L) {
        return Err(RastelError::unsupported_mode(format!(
            "mask must be bitpixel or L, got {}",
            mask.mode
        )));
    }
    if mask.dimensions() != expected {
        return Err(RastelError::dimension_mismatch(format!(
            "mask is {}x{}, expected {}x{}",
            mask.width, mask.height, expected.0, expected.1
        )));
    }
    Ok(())
}

#[cfg(test)]
#[path = "../../tests/unit/buffer/image.rs"]
mod tests;
