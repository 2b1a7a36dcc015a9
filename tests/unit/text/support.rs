use std::sync::Arc;

use crate::foundation::error::RastelResult;
use crate::text::font::{Font, FontFace, GlyphBitmap, LineMetrics};

/// Monospaced face whose glyphs are solid boxes sitting on the baseline.
///
/// At size `s`: advance `s/2`, ascent `3s/4`, descent `s/4`, no line gap.
#[derive(Debug)]
pub(crate) struct BlockFace;

impl FontFace for BlockFace {
    fn line_metrics(&self, size: f32) -> RastelResult<LineMetrics> {
        Ok(LineMetrics {
            ascent: size * 0.75,
            descent: size * 0.25,
            line_gap: 0.0,
        })
    }

    fn advance(&self, ch: char, size: f32) -> RastelResult<f32> {
        Ok(if ch == '\n' { 0.0 } else { size * 0.5 })
    }

    fn rasterize(&self, ch: char, size: f32) -> RastelResult<GlyphBitmap> {
        if ch.is_whitespace() {
            return Ok(GlyphBitmap::default());
        }
        let width = (size * 0.5) as u32;
        let height = (size * 0.75) as u32;
        Ok(GlyphBitmap {
            width,
            height,
            left: 0,
            top: height as i32,
            coverage: vec![255; (width * height) as usize],
        })
    }
}

pub(crate) fn block_font(size: f32) -> Font {
    Font::from_face(Arc::new(BlockFace), size).unwrap()
}
