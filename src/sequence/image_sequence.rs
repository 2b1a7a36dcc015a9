use std::iter::FusedIterator;
use std::path::Path;

use crate::buffer::image::Image;
use crate::codec::format::ImageFormat;
use crate::codec::image_codec::{Decoder, Encodable, Encoder, ImageCodec};
use crate::foundation::error::RastelResult;
use crate::pixel::model::{Pixel, PixelMode, Rgba};
use crate::sequence::frame::{DisposalMethod, Frame};

/// How many times an animation plays.
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize,
)]
pub enum LoopCount {
    #[default]
    Infinite,
    /// GIF output holds at most `u16::MAX` repetitions; larger counts fail to encode.
    Exactly(u32),
}

/// Frames of an animation plus a one-way cursor.
///
/// Iterating yields clones of the frames from the cursor onwards. Once exhausted the
/// sequence stays exhausted; build a new one from [`ImageSequence::frames`] to traverse
/// again.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ImageSequence {
    frames: Vec<Frame>,
    cursor: usize,
    loop_count: LoopCount,
}

impl ImageSequence {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_frames(frames: Vec<Frame>) -> Self {
        Self {
            frames,
            ..Self::default()
        }
    }

    pub fn push_frame(&mut self, frame: Frame) {
        self.frames.push(frame);
    }

    pub fn with_frame(mut self, frame: Frame) -> Self {
        self.push_frame(frame);
        self
    }

    /// All frames, regardless of the cursor.
    pub fn frames(&self) -> &[Frame] {
        &self.frames
    }

    pub fn first_frame(&self) -> Option<&Frame> {
        self.frames.first()
    }

    pub fn len(&self) -> usize {
        self.frames.len()
    }

    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }

    /// Frames the cursor has not yet yielded.
    pub fn remaining(&self) -> usize {
        self.frames.len() - self.cursor
    }

    pub fn loop_count(&self) -> LoopCount {
        self.loop_count
    }

    pub fn set_loop_count(&mut self, loop_count: LoopCount) {
        self.loop_count = loop_count;
    }

    pub fn with_loop_count(mut self, loop_count: LoopCount) -> Self {
        self.loop_count = loop_count;
        self
    }

    pub fn into_frames(self) -> Vec<Frame> {
        self.frames
    }

    /// Render every frame as a full RGBA canvas, applying each frame's disposal before the
    /// next one is drawn.
    ///
    /// The canvas is as large as the largest frame; frames are drawn at its origin.
    #[tracing::instrument(skip(self), fields(frames = self.frames.len()))]
    pub fn coalesced(&self) -> RastelResult<Self> {
        let width = self.frames.iter().map(|f| f.image().width()).max().unwrap_or(0);
        let height = self.frames.iter().map(|f| f.image().height()).max().unwrap_or(0);
        if width == 0 || height == 0 {
            return Ok(Self::from_frames(self.frames.clone()).with_loop_count(self.loop_count));
        }

        let mut canvas = Image::new(width, height, Rgba::transparent())?;
        let mut out = Vec::with_capacity(self.frames.len());
        for frame in &self.frames {
            let before = match frame.disposal() {
                DisposalMethod::Previous => Some(canvas.clone()),
                _ => None,
            };
            let src = frame.image().convert(PixelMode::Rgba);
            canvas.paste(0, 0, &src, None)?;
            out.push(
                Frame::new(canvas.clone())
                    .with_delay(frame.delay())
                    .with_disposal(frame.disposal()),
            );

            match frame.disposal() {
                DisposalMethod::Keep => {}
                DisposalMethod::Background => {
                    let (w, h) = src.dimensions();
                    let stride = width as usize;
                    for row in canvas.data_mut().chunks_exact_mut(stride).take(h as usize) {
                        row[..w as usize].fill(Pixel::Rgba(Rgba::transparent()));
                    }
                }
                DisposalMethod::Previous => {
                    if let Some(before) = before {
                        canvas = before;
                    }
                }
            }
        }
        Ok(Self::from_frames(out).with_loop_count(self.loop_count))
    }

    /// Decode an animation from bytes; a still image becomes one frame.
    pub fn from_bytes(bytes: &[u8], format: Option<ImageFormat>) -> RastelResult<Self> {
        Ok(ImageCodec::default().decode(bytes, format)?.into_sequence())
    }

    pub fn open(path: impl AsRef<Path>) -> RastelResult<Self> {
        let path = path.as_ref();
        let format = ImageFormat::from_path(path)?;
        let bytes = std::fs::read(path)?;
        Self::from_bytes(&bytes, Some(format))
    }

    pub fn encode(&self, format: ImageFormat) -> RastelResult<Vec<u8>> {
        ImageCodec::default().encode(Encodable::Sequence(self), format)
    }

    pub fn save(&self, path: impl AsRef<Path>) -> RastelResult<()> {
        let path = path.as_ref();
        let format = ImageFormat::from_path(path)?;
        std::fs::write(path, self.encode(format)?)?;
        Ok(())
    }
}

impl Iterator for ImageSequence {
    type Item = Frame;

    fn next(&mut self) -> Option<Frame> {
        let frame = self.frames.get(self.cursor)?.clone();
        self.cursor += 1;
        Some(frame)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining(), Some(self.remaining()))
    }
}

impl ExactSizeIterator for ImageSequence {}

impl FusedIterator for ImageSequence {}

impl FromIterator<Frame> for ImageSequence {
    fn from_iter<I: IntoIterator<Item = Frame>>(iter: I) -> Self {
        Self::from_frames(iter.into_iter().collect())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/sequence/image_sequence.rs"]
mod tests;
