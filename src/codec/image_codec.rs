use std::io::Cursor;
use std::time::Duration;

use image::AnimationDecoder;

use crate::buffer::image::Image;
use crate::codec::format::ImageFormat;
use crate::foundation::error::{RastelError, RastelResult};
use crate::pixel::model::{Pixel, PixelMode};
use crate::sequence::frame::Frame;
use crate::sequence::image_sequence::{ImageSequence, LoopCount};

/// Result of decoding: a still image or an animation.
#[derive(Clone, Debug, PartialEq)]
pub enum Decoded {
    Image(Image),
    Sequence(ImageSequence),
}

impl Decoded {
    /// The still image, or the first frame of an animation.
    pub fn into_image(self) -> RastelResult<Image> {
        match self {
            Self::Image(image) => Ok(image),
            Self::Sequence(seq) => seq
                .into_frames()
                .into_iter()
                .next()
                .map(Frame::into_image)
                .ok_or_else(|| RastelError::decode("animation has no frames")),
        }
    }

    /// An animation; a still image becomes a single frame.
    pub fn into_sequence(self) -> ImageSequence {
        match self {
            Self::Image(image) => ImageSequence::from_frames(vec![Frame::new(image)]),
            Self::Sequence(seq) => seq,
        }
    }
}

/// Content handed to an [`Encoder`].
#[derive(Clone, Copy, Debug)]
pub enum Encodable<'a> {
    Image(&'a Image),
    Sequence(&'a ImageSequence),
}

pub trait Decoder {
    /// Decode `bytes`; without a hint the format is sniffed from the signature.
    fn decode(&self, bytes: &[u8], hint: Option<ImageFormat>) -> RastelResult<Decoded>;
}

pub trait Encoder {
    fn encode(&self, content: Encodable<'_>, format: ImageFormat) -> RastelResult<Vec<u8>>;
}

#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct CodecOpts {
    /// JPEG quality, 1..=100.
    pub jpeg_quality: u8,
}

impl Default for CodecOpts {
    fn default() -> Self {
        Self { jpeg_quality: 90 }
    }
}

/// [`Decoder`] and [`Encoder`] over the `image` crate.
#[derive(Clone, Debug, Default)]
pub struct ImageCodec {
    pub opts: CodecOpts,
}

impl ImageCodec {
    pub fn new(opts: CodecOpts) -> Self {
        Self { opts }
    }

    fn decode_animation(&self, bytes: &[u8], format: ImageFormat) -> RastelResult<Option<Decoded>> {
        let frames = match format {
            ImageFormat::Gif => {
                let decoder =
                    image::codecs::gif::GifDecoder::new(Cursor::new(bytes)).map_err(decode_error)?;
                decoder.into_frames().collect_frames().map_err(decode_error)?
            }
            ImageFormat::Png => {
                let decoder =
                    image::codecs::png::PngDecoder::new(Cursor::new(bytes)).map_err(decode_error)?;
                if !decoder.is_apng().map_err(decode_error)? {
                    return Ok(None);
                }
                let apng = decoder.apng().map_err(decode_error)?;
                apng.into_frames().collect_frames().map_err(decode_error)?
            }
            ImageFormat::WebP => {
                let decoder = image::codecs::webp::WebPDecoder::new(Cursor::new(bytes))
                    .map_err(decode_error)?;
                if !decoder.has_animation() {
                    return Ok(None);
                }
                decoder.into_frames().collect_frames().map_err(decode_error)?
            }
            _ => return Ok(None),
        };

        tracing::debug!(%format, frames = frames.len(), "decoded animation");
        if frames.len() <= 1 {
            // single-frame animations come back as still images
            return Ok(frames.into_iter().next().map(|f| {
                let mut image = from_dynamic(image::DynamicImage::ImageRgba8(f.into_buffer()));
                image.set_format(Some(format));
                Decoded::Image(image)
            }));
        }

        let frames = frames
            .into_iter()
            .map(|f| {
                let delay = Duration::from(f.delay());
                let mut image = from_dynamic(image::DynamicImage::ImageRgba8(f.into_buffer()));
                image.set_format(Some(format));
                Frame::new(image).with_delay(delay)
            })
            .collect();
        Ok(Some(Decoded::Sequence(ImageSequence::from_frames(frames))))
    }

    fn encode_image(&self, image: &Image, format: ImageFormat) -> RastelResult<Vec<u8>> {
        if image.is_empty() {
            return Err(RastelError::encode("cannot encode a zero-area image"));
        }
        let dynamic = to_dynamic(image)?;
        let mut buf = Vec::new();
        match format {
            ImageFormat::Jpeg => {
                let quality = self.jpeg_quality()?;
                dynamic
                    .write_with_encoder(image::codecs::jpeg::JpegEncoder::new_with_quality(
                        &mut buf, quality,
                    ))
                    .map_err(encode_error)?;
            }
            _ => dynamic
                .write_to(&mut Cursor::new(&mut buf), format.to_image())
                .map_err(encode_error)?,
        }
        Ok(buf)
    }

    fn encode_gif(&self, seq: &ImageSequence) -> RastelResult<Vec<u8>> {
        let mut buf = Vec::new();
        {
            let mut encoder = image::codecs::gif::GifEncoder::new(&mut buf);
            let repeat = match seq.loop_count() {
                LoopCount::Infinite => image::codecs::gif::Repeat::Infinite,
                LoopCount::Exactly(n) => {
                    let n = u16::try_from(n).map_err(|_| {
                        RastelError::encode(format!("gif loop count {n} exceeds {}", u16::MAX))
                    })?;
                    image::codecs::gif::Repeat::Finite(n)
                }
            };
            encoder.set_repeat(repeat).map_err(encode_error)?;

            let mut frames = Vec::with_capacity(seq.len());
            for frame in seq.frames() {
                let rgba = frame.image().convert(PixelMode::Rgba);
                let buffer = rgba_buffer(&rgba)?;
                frames.push(image::Frame::from_parts(
                    buffer,
                    0,
                    0,
                    image::Delay::from_saturating_duration(frame.delay()),
                ));
            }
            encoder.encode_frames(frames).map_err(encode_error)?;
        }
        Ok(buf)
    }

    fn jpeg_quality(&self) -> RastelResult<u8> {
        match self.opts.jpeg_quality {
            q @ 1..=100 => Ok(q),
            q => Err(RastelError::validation(format!(
                "jpeg_quality must be in 1..=100, got {q}"
            ))),
        }
    }
}

impl Decoder for ImageCodec {
    #[tracing::instrument(skip(self, bytes), fields(len = bytes.len()))]
    fn decode(&self, bytes: &[u8], hint: Option<ImageFormat>) -> RastelResult<Decoded> {
        let format = match hint {
            Some(format) => format,
            None => image::guess_format(bytes)
                .ok()
                .and_then(ImageFormat::from_image)
                .ok_or(RastelError::UnknownFormat)?,
        };
        tracing::debug!(%format, hinted = hint.is_some(), "decode");

        if format.supports_animation()
            && let Some(decoded) = self.decode_animation(bytes, format)?
        {
            return Ok(decoded);
        }

        let dynamic =
            image::load_from_memory_with_format(bytes, format.to_image()).map_err(decode_error)?;
        let mut image = from_dynamic(dynamic);
        image.set_format(Some(format));
        Ok(Decoded::Image(image))
    }
}

impl Encoder for ImageCodec {
    #[tracing::instrument(skip(self, content))]
    fn encode(&self, content: Encodable<'_>, format: ImageFormat) -> RastelResult<Vec<u8>> {
        match content {
            Encodable::Image(image) => self.encode_image(image, format),
            Encodable::Sequence(seq) => match (seq.len(), format) {
                (0, _) => Err(RastelError::encode("cannot encode an empty sequence")),
                (_, ImageFormat::Gif) => self.encode_gif(seq),
                (1, _) => self.encode_image(seq.frames()[0].image(), format),
                (n, _) => Err(RastelError::encode(format!(
                    "{format} cannot hold {n} frames; use gif for animations"
                ))),
            },
        }
    }
}

// input is always in memory, so an I/O failure here means truncated data
fn decode_error(e: image::ImageError) -> RastelError {
    RastelError::decode(e.to_string())
}

fn encode_error(e: image::ImageError) -> RastelError {
    match e {
        image::ImageError::IoError(io) => RastelError::Io(io),
        other => RastelError::encode(other.to_string()),
    }
}

fn from_dynamic(dynamic: image::DynamicImage) -> Image {
    let (width, height) = (dynamic.width(), dynamic.height());
    let (mode, data): (PixelMode, Vec<Pixel>) = match dynamic {
        image::DynamicImage::ImageLuma8(buf) => (
            PixelMode::L,
            buf.into_raw().into_iter().map(Pixel::l).collect(),
        ),
        image::DynamicImage::ImageRgb8(buf) => (
            PixelMode::Rgb,
            buf.pixels()
                .map(|p| Pixel::rgb(p.0[0], p.0[1], p.0[2]))
                .collect(),
        ),
        other @ image::DynamicImage::ImageLuma16(_) => (
            PixelMode::L,
            other.to_luma8().into_raw().into_iter().map(Pixel::l).collect(),
        ),
        other if !other.color().has_alpha() => (
            PixelMode::Rgb,
            other
                .to_rgb8()
                .pixels()
                .map(|p| Pixel::rgb(p.0[0], p.0[1], p.0[2]))
                .collect(),
        ),
        other => (
            PixelMode::Rgba,
            other
                .to_rgba8()
                .pixels()
                .map(|p| Pixel::rgba(p.0[0], p.0[1], p.0[2], p.0[3]))
                .collect(),
        ),
    };
    Image::from_raw_parts(width, height, mode, data)
}

fn to_dynamic(image: &Image) -> RastelResult<image::DynamicImage> {
    let (w, h) = image.dimensions();
    let channels = image.mode().channel_count();
    let raw: Vec<u8> = image
        .data()
        .iter()
        .flat_map(|p| {
            let c = p.channels();
            c.into_iter().take(channels)
        })
        .collect();
    let mismatch = || RastelError::encode("pixel data does not match image dimensions");
    Ok(match image.mode() {
        PixelMode::Bit | PixelMode::L => image::DynamicImage::ImageLuma8(
            image::GrayImage::from_raw(w, h, raw).ok_or_else(mismatch)?,
        ),
        PixelMode::Rgb => image::DynamicImage::ImageRgb8(
            image::RgbImage::from_raw(w, h, raw).ok_or_else(mismatch)?,
        ),
        PixelMode::Rgba => image::DynamicImage::ImageRgba8(
            image::RgbaImage::from_raw(w, h, raw).ok_or_else(mismatch)?,
        ),
    })
}

fn rgba_buffer(image: &Image) -> RastelResult<image::RgbaImage> {
    match to_dynamic(image)? {
        image::DynamicImage::ImageRgba8(buf) => Ok(buf),
        other => Ok(other.to_rgba8()),
    }
}

#[cfg(test)]
#[path = "../../tests/unit/codec/image_codec.rs"]
mod tests;
