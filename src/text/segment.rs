use crate::buffer::image::Image;
use crate::composite::overlay::OverlayMode;
use crate::draw::raster::Draw;
use crate::foundation::error::RastelResult;
use crate::pixel::model::Pixel;
use crate::text::flow::{Flow, Paint, Run, WrapStyle, flow, paint_flow};
use crate::text::font::{Font, check_size};

/// A run of text in one font, drawn from `position` (top-left of the first line).
#[derive(Clone, Debug)]
pub struct TextSegment {
    pub font: Font,
    pub text: String,
    pub fill: Pixel,
    pub position: (u32, u32),
    pub size: f32,
    pub overlay: OverlayMode,
    /// Wrap width in pixels; `None` only breaks on newlines.
    pub width: Option<u32>,
    pub wrap: WrapStyle,
}

impl TextSegment {
    /// A segment at the font's optimal size, blended at the origin.
    pub fn new(font: &Font, text: impl Into<String>, fill: impl Into<Pixel>) -> Self {
        Self {
            font: font.clone(),
            text: text.into(),
            fill: fill.into(),
            position: (0, 0),
            size: font.optimal_size(),
            overlay: OverlayMode::Blend,
            width: None,
            wrap: WrapStyle::Word,
        }
    }

    pub fn with_position(mut self, x: u32, y: u32) -> Self {
        self.position = (x, y);
        self
    }

    pub fn with_size(mut self, size: f32) -> Self {
        self.size = size;
        self
    }

    pub fn with_overlay_mode(mut self, mode: OverlayMode) -> Self {
        self.overlay = mode;
        self
    }

    pub fn with_width(mut self, width: u32) -> Self {
        self.width = Some(width);
        self
    }

    pub fn with_wrap(mut self, wrap: WrapStyle) -> Self {
        self.wrap = wrap;
        self
    }

    pub(crate) fn run(&self) -> RastelResult<Run<'_>> {
        check_size(self.size)?;
        Ok(Run {
            font: &self.font,
            text: &self.text,
            size: self.size,
        })
    }

    pub(crate) fn paint(&self) -> Paint {
        Paint {
            fill: self.fill,
            overlay: self.overlay,
        }
    }

    fn flow(&self) -> RastelResult<Flow> {
        flow(
            &[self.run()?],
            self.width.map(|w| w as f32),
            self.wrap,
        )
    }

    /// Width and height of the laid-out text, rounded up to whole pixels.
    pub fn dimensions(&self) -> RastelResult<(u32, u32)> {
        let flow = self.flow()?;
        Ok((flow.width().ceil() as u32, flow.height().ceil() as u32))
    }
}

impl Draw for TextSegment {
    #[tracing::instrument(skip(self, image), fields(chars = self.text.chars().count()))]
    fn draw(&self, image: &mut Image) -> RastelResult<()> {
        let run = self.run()?;
        let flow = flow(&[run], self.width.map(|w| w as f32), self.wrap)?;
        let origin = (self.position.0 as f32, self.position.1 as f32);
        paint_flow(image, &[run], &[self.paint()], &flow, origin, |_| 0.0)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/text/segment.rs"]
mod tests;
