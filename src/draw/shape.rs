use crate::buffer::image::Image;
use crate::composite::overlay::OverlayMode;
use crate::draw::raster::{Draw, PixelBox, band_coverage, coverage_weight, paint_box};
use crate::foundation::error::{RastelError, RastelResult};
use crate::pixel::model::Pixel;

/// Where a border band sits relative to the shape edge.
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize,
)]
pub enum BorderPosition {
    /// Entirely inside the edge.
    Inset,
    /// Straddling the edge; the odd pixel goes inside.
    #[default]
    Center,
    /// Entirely outside the edge.
    Outset,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub struct Border {
    pub color: Pixel,
    pub thickness: u32,
    pub position: BorderPosition,
}

impl Border {
    pub fn new(color: impl Into<Pixel>, thickness: u32) -> Self {
        Self {
            color: color.into(),
            thickness,
            position: BorderPosition::default(),
        }
    }

    pub fn with_position(mut self, position: BorderPosition) -> Self {
        self.position = position;
        self
    }

    /// Distance from the edge to the outer and inner side of the band.
    fn extents(&self) -> (u32, u32) {
        let t = self.thickness;
        match self.position {
            BorderPosition::Inset => (0, t),
            BorderPosition::Center => (t / 2, t - t / 2),
            BorderPosition::Outset => (t, 0),
        }
    }
}

/// An axis-aligned rectangle with its top-left corner at `position`.
#[derive(Clone, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Rectangle {
    pub position: (u32, u32),
    pub size: Option<(u32, u32)>,
    pub border: Option<Border>,
    pub fill: Option<Pixel>,
    /// Falls back to the target image's overlay mode.
    pub overlay: Option<OverlayMode>,
}

impl Rectangle {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn at(x: u32, y: u32) -> Self {
        Self {
            position: (x, y),
            ..Self::default()
        }
    }

    /// Rectangle spanning `(x1, y1)` to `(x2, y2)`, exclusive of the far corner.
    pub fn from_bounding_box(x1: u32, y1: u32, x2: u32, y2: u32) -> Self {
        Self {
            position: (x1.min(x2), y1.min(y2)),
            size: Some((x1.abs_diff(x2), y1.abs_diff(y2))),
            ..Self::default()
        }
    }

    pub fn with_size(mut self, width: u32, height: u32) -> Self {
        self.size = Some((width, height));
        self
    }

    pub fn with_fill(mut self, fill: impl Into<Pixel>) -> Self {
        self.fill = Some(fill.into());
        self
    }

    pub fn with_border(mut self, border: Border) -> Self {
        self.border = Some(border);
        self
    }

    pub fn with_overlay_mode(mut self, mode: OverlayMode) -> Self {
        self.overlay = Some(mode);
        self
    }
}

impl Draw for Rectangle {
    fn draw(&self, image: &mut Image) -> RastelResult<()> {
        let (w, h) = match self.size {
            Some((w, h)) if w > 0 && h > 0 => (w, h),
            _ => {
                return Err(RastelError::incomplete_shape(
                    "rectangle needs a non-zero size",
                ));
            }
        };
        if self.fill.is_none() && self.border.is_none() {
            return Err(RastelError::incomplete_shape(
                "rectangle needs a fill or a border",
            ));
        }

        let mode = self.overlay.unwrap_or(image.overlay_mode());
        let rect = PixelBox::new(
            i64::from(self.position.0),
            i64::from(self.position.1),
            i64::from(w),
            i64::from(h),
        );

        let band = self.border.filter(|b| b.thickness > 0).map(|b| {
            let (out, inn) = b.extents();
            (
                b.color,
                rect.outset(i64::from(out)),
                rect.outset(-i64::from(inn)),
            )
        });

        if let Some(fill) = self.fill {
            match band {
                Some((_, _, inner)) => paint_box(image, inner, None, fill, mode),
                None => paint_box(image, rect, None, fill, mode),
            }
        }
        if let Some((color, outer, inner)) = band {
            paint_box(image, outer, Some(inner), color, mode);
        }
        Ok(())
    }
}

/// An axis-aligned ellipse centered on `position`.
#[derive(Clone, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Ellipse {
    pub position: (u32, u32),
    pub radii: Option<(u32, u32)>,
    pub border: Option<Border>,
    pub fill: Option<Pixel>,
    pub overlay: Option<OverlayMode>,
    /// Fractional edge coverage instead of all-or-nothing pixels.
    pub antialias: bool,
}

impl Ellipse {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn at(x: u32, y: u32) -> Self {
        Self {
            position: (x, y),
            ..Self::default()
        }
    }

    pub fn circle(x: u32, y: u32, radius: u32) -> Self {
        Self::at(x, y).with_radii(radius, radius)
    }

    /// Ellipse inscribed in the box from `(x1, y1)` to `(x2, y2)`.
    pub fn from_bounding_box(x1: u32, y1: u32, x2: u32, y2: u32) -> Self {
        let (lx, hx) = (x1.min(x2), x1.max(x2));
        let (ly, hy) = (y1.min(y2), y1.max(y2));
        Self::at(lx + (hx - lx) / 2, ly + (hy - ly) / 2).with_radii((hx - lx) / 2, (hy - ly) / 2)
    }

    pub fn with_radii(mut self, rx: u32, ry: u32) -> Self {
        self.radii = Some((rx, ry));
        self
    }

    pub fn with_fill(mut self, fill: impl Into<Pixel>) -> Self {
        self.fill = Some(fill.into());
        self
    }

    pub fn with_border(mut self, border: Border) -> Self {
        self.border = Some(border);
        self
    }

    pub fn with_overlay_mode(mut self, mode: OverlayMode) -> Self {
        self.overlay = Some(mode);
        self
    }

    pub fn with_antialiasing(mut self, antialias: bool) -> Self {
        self.antialias = antialias;
        self
    }
}

impl Draw for Ellipse {
    fn draw(&self, image: &mut Image) -> RastelResult<()> {
        let (rx, ry) = match self.radii {
            Some((rx, ry)) if rx > 0 && ry > 0 => (rx, ry),
            _ => {
                return Err(RastelError::incomplete_shape(
                    "ellipse needs non-zero radii",
                ));
            }
        };
        if self.fill.is_none() && self.border.is_none() {
            return Err(RastelError::incomplete_shape(
                "ellipse needs a fill or a border",
            ));
        }

        let mode = self.overlay.unwrap_or(image.overlay_mode());
        let border = self.border.filter(|b| b.thickness > 0);
        // band in signed-distance space, negative inside the curve
        let band = border.map(|b| {
            let (out, inn) = b.extents();
            (b.color, -(inn as f32), out as f32)
        });
        let fill_limit = band.map_or(0.0, |(_, lo, _)| lo);
        let reach = i64::from(border.map_or(0, |b| b.thickness)) + 1;

        let (cx, cy) = (i64::from(self.position.0), i64::from(self.position.1));
        let (rxf, ryf) = (rx as f32, ry as f32);
        let area = PixelBox::new(
            cx - i64::from(rx) - reach,
            cy - i64::from(ry) - reach,
            2 * (i64::from(rx) + reach) + 1,
            2 * (i64::from(ry) + reach) + 1,
        )
        .clip(image);

        for y in area.y0..area.y1 {
            for x in area.x0..area.x1 {
                let d = signed_distance((x - cx) as f32, (y - cy) as f32, rxf, ryf);
                if let Some(fill) = self.fill {
                    let cov = band_coverage(d, f32::NEG_INFINITY, fill_limit);
                    let w = coverage_weight(cov, self.antialias);
                    image.paint(x, y, fill, mode, w);
                }
                if let Some((color, lo, hi)) = band {
                    let w = coverage_weight(band_coverage(d, lo, hi), self.antialias);
                    image.paint(x, y, color, mode, w);
                }
            }
        }
        Ok(())
    }
}

/// First-order distance from `(dx, dy)` to the ellipse curve, negative inside.
fn signed_distance(dx: f32, dy: f32, rx: f32, ry: f32) -> f32 {
    let f = (dx / rx).powi(2) + (dy / ry).powi(2);
    let gx = 2.0 * dx / (rx * rx);
    let gy = 2.0 * dy / (ry * ry);
    let grad = (gx * gx + gy * gy).sqrt();
    if grad == 0.0 {
        // the center: as deep inside as the curve allows
        return -rx.min(ry);
    }
    (f - 1.0) / grad
}

#[cfg(test)]
#[path = "../../tests/unit/draw/shape.rs"]
mod tests;
