use std::fmt;
use std::path::Path;
use std::sync::Arc;

use crate::foundation::error::{RastelError, RastelResult};
use crate::text::parley_face::ParleyFace;

/// Vertical metrics of one line at a given size, in pixels.
///
/// `descent` is measured downwards and is positive.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct LineMetrics {
    pub ascent: f32,
    pub descent: f32,
    pub line_gap: f32,
}

impl LineMetrics {
    pub fn line_height(&self) -> f32 {
        self.ascent + self.descent + self.line_gap
    }
}

/// Coverage mask of one glyph.
///
/// `left` is the offset from the pen position to the first column and `top` the distance
/// from the baseline up to the first row.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct GlyphBitmap {
    pub width: u32,
    pub height: u32,
    pub left: i32,
    pub top: i32,
    pub coverage: Vec<u8>,
}

/// Source of glyph metrics and coverage.
///
/// Results must be deterministic for a given `(face, size, char)`.
pub trait FontFace: fmt::Debug + Send + Sync {
    fn line_metrics(&self, size: f32) -> RastelResult<LineMetrics>;

    /// Horizontal pen advance of `ch`.
    fn advance(&self, ch: char, size: f32) -> RastelResult<f32>;

    fn rasterize(&self, ch: char, size: f32) -> RastelResult<GlyphBitmap>;
}

/// A font face together with the size it renders best at.
#[derive(Clone, Debug)]
pub struct Font {
    face: Arc<dyn FontFace>,
    optimal_size: f32,
}

impl Font {
    /// Load a font file.
    pub fn open(path: impl AsRef<Path>, optimal_size: f32) -> RastelResult<Self> {
        let bytes = std::fs::read(path)?;
        Self::from_bytes(bytes, optimal_size)
    }

    /// Load a font from TrueType/OpenType bytes.
    pub fn from_bytes(bytes: impl Into<Vec<u8>>, optimal_size: f32) -> RastelResult<Self> {
        let face = ParleyFace::new(bytes.into())?;
        Self::from_face(Arc::new(face), optimal_size)
    }

    /// Wrap a custom face.
    pub fn from_face(face: Arc<dyn FontFace>, optimal_size: f32) -> RastelResult<Self> {
        check_size(optimal_size)?;
        Ok(Self { face, optimal_size })
    }

    pub fn optimal_size(&self) -> f32 {
        self.optimal_size
    }

    pub fn face(&self) -> &dyn FontFace {
        self.face.as_ref()
    }
}

pub(crate) fn check_size(size: f32) -> RastelResult<()> {
    if !size.is_finite() || size <= 0.0 {
        return Err(RastelError::validation(format!(
            "font size must be finite and > 0, got {size}"
        )));
    }
    Ok(())
}

#[cfg(test)]
#[path = "../../tests/unit/text/font.rs"]
mod tests;
