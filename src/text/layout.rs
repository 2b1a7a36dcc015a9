use kurbo::Rect;

use crate::buffer::image::Image;
use crate::draw::raster::Draw;
use crate::foundation::error::RastelResult;
use crate::text::flow::{Flow, WrapStyle, flow, paint_flow};
use crate::text::segment::TextSegment;

#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize,
)]
pub enum HorizontalAnchor {
    #[default]
    Left,
    Center,
    Right,
}

#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize,
)]
pub enum VerticalAnchor {
    #[default]
    Top,
    Center,
    Bottom,
}

impl HorizontalAnchor {
    fn offset(self, extent: f64) -> f64 {
        match self {
            Self::Left => 0.0,
            Self::Center => extent / 2.0,
            Self::Right => extent,
        }
    }
}

impl VerticalAnchor {
    fn offset(self, extent: f64) -> f64 {
        match self {
            Self::Top => 0.0,
            Self::Center => extent / 2.0,
            Self::Bottom => extent,
        }
    }
}

/// Several segments flowed inline as one block.
///
/// Segment positions are ignored; the block is placed relative to `position` according
/// to the anchors, which also align each line inside the block. Metrics are recomputed on
/// every query since segments stay mutable.
#[derive(Clone, Debug, Default)]
pub struct TextLayout {
    pub segments: Vec<TextSegment>,
    pub position: (u32, u32),
    /// Wrap width in pixels; `None` only breaks on newlines.
    pub width: Option<u32>,
    pub x_anchor: HorizontalAnchor,
    pub y_anchor: VerticalAnchor,
    pub wrap: WrapStyle,
}

impl TextLayout {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_position(mut self, x: u32, y: u32) -> Self {
        self.position = (x, y);
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

    pub fn with_anchors(mut self, x: HorizontalAnchor, y: VerticalAnchor) -> Self {
        self.x_anchor = x;
        self.y_anchor = y;
        self
    }

    /// Anchor the block's center on `position`.
    pub fn centered(self) -> Self {
        self.with_anchors(HorizontalAnchor::Center, VerticalAnchor::Center)
    }

    pub fn push_segment(&mut self, segment: TextSegment) {
        self.segments.push(segment);
    }

    pub fn with_segment(mut self, segment: TextSegment) -> Self {
        self.push_segment(segment);
        self
    }

    fn flow(&self) -> RastelResult<Flow> {
        let runs = self
            .segments
            .iter()
            .map(TextSegment::run)
            .collect::<RastelResult<Vec<_>>>()?;
        flow(&runs, self.width.map(|w| w as f32), self.wrap)
    }

    fn block(&self, flow: &Flow) -> Rect {
        let w = f64::from(flow.width());
        let h = f64::from(flow.height());
        let x = f64::from(self.position.0) - self.x_anchor.offset(w);
        let y = f64::from(self.position.1) - self.y_anchor.offset(h);
        Rect::new(x, y, x + w, y + h)
    }

    pub fn width(&self) -> RastelResult<u32> {
        Ok(self.dimensions()?.0)
    }

    pub fn height(&self) -> RastelResult<u32> {
        Ok(self.dimensions()?.1)
    }

    /// Block size rounded up to whole pixels.
    pub fn dimensions(&self) -> RastelResult<(u32, u32)> {
        let flow = self.flow()?;
        Ok((flow.width().ceil() as u32, flow.height().ceil() as u32))
    }

    /// `(x1, y1, x2, y2)` of the anchored block in image coordinates, rounded outwards.
    pub fn bounding_box(&self) -> RastelResult<(i64, i64, i64, i64)> {
        let r = self.block(&self.flow()?).expand();
        Ok((r.x0 as i64, r.y0 as i64, r.x1 as i64, r.y1 as i64))
    }
}

impl Draw for TextLayout {
    #[tracing::instrument(skip(self, image), fields(segments = self.segments.len()))]
    fn draw(&self, image: &mut Image) -> RastelResult<()> {
        let runs = self
            .segments
            .iter()
            .map(TextSegment::run)
            .collect::<RastelResult<Vec<_>>>()?;
        let paints: Vec<_> = self.segments.iter().map(TextSegment::paint).collect();
        let flow = flow(&runs, self.width.map(|w| w as f32), self.wrap)?;

        let block = self.block(&flow);
        let block_width = block.width() as f32;
        let anchor = self.x_anchor;
        paint_flow(
            image,
            &runs,
            &paints,
            &flow,
            (block.x0 as f32, block.y0 as f32),
            |line_width| anchor.offset(f64::from(block_width - line_width)) as f32,
        )
    }
}

#[cfg(test)]
#[path = "../../tests/unit/text/layout.rs"]
mod tests;
