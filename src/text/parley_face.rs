use std::borrow::Cow;
use std::fmt;
use std::sync::Mutex;

use crate::foundation::error::{RastelError, RastelResult};
use crate::text::font::{FontFace, GlyphBitmap, LineMetrics, check_size};

/// Padding around rendered glyphs so overhanging outlines are not cut off.
const GLYPH_PAD: u16 = 4;

#[derive(Clone, Copy, Debug, Default, PartialEq)]
struct GlyphBrush;

struct Contexts {
    font_ctx: parley::FontContext,
    layout_ctx: parley::LayoutContext<GlyphBrush>,
}

/// [`FontFace`] backed by parley for metrics and vello_cpu for glyph coverage.
pub struct ParleyFace {
    family_name: String,
    font_data: vello_cpu::peniko::FontData,
    contexts: Mutex<Contexts>,
}

impl fmt::Debug for ParleyFace {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ParleyFace")
            .field("family_name", &self.family_name)
            .finish_non_exhaustive()
    }
}

impl ParleyFace {
    pub fn new(bytes: Vec<u8>) -> RastelResult<Self> {
        let mut font_ctx = parley::FontContext::default();
        let families = font_ctx
            .collection
            .register_fonts(parley::fontique::Blob::from(bytes.clone()), None);
        let family_id = families
            .first()
            .map(|(id, _)| *id)
            .ok_or_else(|| RastelError::font_load("no font families registered from font bytes"))?;
        let family_name = font_ctx
            .collection
            .family_name(family_id)
            .ok_or_else(|| RastelError::font_load("registered font family has no name"))?
            .to_string();

        let font_data =
            vello_cpu::peniko::FontData::new(vello_cpu::peniko::Blob::from(bytes), 0);

        Ok(Self {
            family_name,
            font_data,
            contexts: Mutex::new(Contexts {
                font_ctx,
                layout_ctx: parley::LayoutContext::new(),
            }),
        })
    }

    pub fn family_name(&self) -> &str {
        &self.family_name
    }

    fn layout(&self, text: &str, size: f32) -> RastelResult<parley::Layout<GlyphBrush>> {
        check_size(size)?;
        let mut guard = self
            .contexts
            .lock()
            .map_err(|_| anyhow::anyhow!("font context lock poisoned"))?;
        let Contexts {
            font_ctx,
            layout_ctx,
        } = &mut *guard;

        let mut builder = layout_ctx.ranged_builder(font_ctx, text, 1.0, true);
        builder.push_default(parley::style::StyleProperty::FontStack(
            parley::style::FontStack::Source(Cow::Owned(self.family_name.clone())),
        ));
        builder.push_default(parley::style::StyleProperty::FontSize(size));
        builder.push_default(parley::style::StyleProperty::Brush(GlyphBrush));

        let mut layout: parley::Layout<GlyphBrush> = builder.build(text);
        layout.break_all_lines(None);
        Ok(layout)
    }
}

impl FontFace for ParleyFace {
    fn line_metrics(&self, size: f32) -> RastelResult<LineMetrics> {
        let layout = self.layout(" ", size)?;
        let line = layout
            .lines()
            .next()
            .ok_or_else(|| anyhow::anyhow!("empty layout for line metrics"))?;
        let m = line.metrics();
        Ok(LineMetrics {
            ascent: m.ascent,
            descent: m.descent,
            line_gap: m.leading,
        })
    }

    fn advance(&self, ch: char, size: f32) -> RastelResult<f32> {
        let mut buf = [0u8; 4];
        Ok(self.layout(ch.encode_utf8(&mut buf), size)?.full_width())
    }

    fn rasterize(&self, ch: char, size: f32) -> RastelResult<GlyphBitmap> {
        let mut buf = [0u8; 4];
        let layout = self.layout(ch.encode_utf8(&mut buf), size)?;
        let Some(line) = layout.lines().next() else {
            return Ok(GlyphBitmap::default());
        };
        let baseline = line.metrics().baseline;

        let pad = f32::from(GLYPH_PAD);
        let width = pixmap_side(layout.full_width() + 2.0 * pad)?;
        let height = pixmap_side(layout.height() + 2.0 * pad)?;

        let mut ctx = vello_cpu::RenderContext::new(width, height);
        ctx.set_paint(vello_cpu::peniko::Color::from_rgba8(255, 255, 255, 255));
        for item in line.items() {
            let parley::layout::PositionedLayoutItem::GlyphRun(run) = item else {
                continue;
            };
            let glyphs = run.positioned_glyphs().map(|g| vello_cpu::Glyph {
                id: g.id,
                x: g.x + pad,
                y: g.y + pad,
            });
            ctx.glyph_run(&self.font_data)
                .font_size(run.run().font_size())
                .fill_glyphs(glyphs);
        }
        ctx.flush();

        let mut pixmap = vello_cpu::Pixmap::new(width, height);
        ctx.render_to_pixmap(&mut pixmap);

        // white paint in premultiplied RGBA leaves coverage in every channel
        let coverage = pixmap
            .data_as_u8_slice()
            .chunks_exact(4)
            .map(|px| px[3])
            .collect();

        Ok(GlyphBitmap {
            width: u32::from(width),
            height: u32::from(height),
            left: -i32::from(GLYPH_PAD),
            top: (baseline + pad).round() as i32,
            coverage,
        })
    }
}

fn pixmap_side(v: f32) -> RastelResult<u16> {
    let side = v.ceil().max(1.0);
    if side > f32::from(u16::MAX) {
        return Err(RastelError::validation(format!(
            "glyph raster of {side}px exceeds the renderer limit"
        )));
    }
    Ok(side as u16)
}

#[cfg(test)]
#[path = "../../tests/unit/text/parley_face.rs"]
mod tests;
