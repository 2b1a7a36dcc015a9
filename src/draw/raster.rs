use crate::buffer::image::Image;
use crate::composite::overlay::OverlayMode;
use crate::foundation::error::RastelResult;
use crate::foundation::math::coverage_to_u8;
use crate::pixel::model::Pixel;

/// Something that paints itself onto an [`Image`] in place.
pub trait Draw {
    fn draw(&self, image: &mut Image) -> RastelResult<()>;
}

impl<T: Draw + ?Sized> Draw for &T {
    fn draw(&self, image: &mut Image) -> RastelResult<()> {
        (**self).draw(image)
    }
}

impl<T: Draw + ?Sized> Draw for Box<T> {
    fn draw(&self, image: &mut Image) -> RastelResult<()> {
        (**self).draw(image)
    }
}

/// Half-open integer pixel box `[x0, x1) x [y0, y1)`; may extend past the image.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) struct PixelBox {
    pub(crate) x0: i64,
    pub(crate) y0: i64,
    pub(crate) x1: i64,
    pub(crate) y1: i64,
}

impl PixelBox {
    pub(crate) fn new(x: i64, y: i64, w: i64, h: i64) -> Self {
        Self {
            x0: x,
            y0: y,
            x1: x + w,
            y1: y + h,
        }
    }

    /// Grow (positive) or shrink (negative) every side by `by`.
    pub(crate) fn outset(self, by: i64) -> Self {
        Self {
            x0: self.x0 - by,
            y0: self.y0 - by,
            x1: self.x1 + by,
            y1: self.y1 + by,
        }
    }

    pub(crate) fn is_empty(self) -> bool {
        self.x0 >= self.x1 || self.y0 >= self.y1
    }

    pub(crate) fn contains(self, x: i64, y: i64) -> bool {
        x >= self.x0 && x < self.x1 && y >= self.y0 && y < self.y1
    }

    /// Intersection with the image area.
    pub(crate) fn clip(self, image: &Image) -> Self {
        Self {
            x0: self.x0.max(0),
            y0: self.y0.max(0),
            x1: self.x1.min(i64::from(image.width())),
            y1: self.y1.min(i64::from(image.height())),
        }
    }
}

/// Paint every pixel of `outer` that is not inside `hole`.
pub(crate) fn paint_box(
    image: &mut Image,
    outer: PixelBox,
    hole: Option<PixelBox>,
    color: Pixel,
    mode: OverlayMode,
) {
    let area = outer.clip(image);
    if area.is_empty() {
        return;
    }
    for y in area.y0..area.y1 {
        for x in area.x0..area.x1 {
            if hole.is_some_and(|h| h.contains(x, y)) {
                continue;
            }
            image.paint(x, y, color, mode, 255);
        }
    }
}

/// Length of `[d - 0.5, d + 0.5]` that falls inside `[lo, hi]`: the share of a one-pixel
/// footprint at signed distance `d` covered by the band.
pub(crate) fn band_coverage(d: f32, lo: f32, hi: f32) -> f32 {
    ((d + 0.5).min(hi) - (d - 0.5).max(lo)).clamp(0.0, 1.0)
}

/// Fractional coverage to a paint weight; without anti-aliasing it snaps to all or nothing.
pub(crate) fn coverage_weight(coverage: f32, antialias: bool) -> u8 {
    if antialias {
        coverage_to_u8(coverage)
    } else if coverage >= 0.5 {
        255
    } else {
        0
    }
}
