//! Line breaking and glyph placement shared by segments and layouts.

use crate::buffer::image::Image;
use crate::composite::overlay::OverlayMode;
use crate::foundation::error::RastelResult;
use crate::pixel::model::Pixel;
use crate::text::font::{Font, LineMetrics};

/// How text breaks when it reaches the available width.
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize,
)]
pub enum WrapStyle {
    /// Only explicit newlines break lines.
    None,
    /// Break between words; a word wider than the line falls back to characters.
    #[default]
    Word,
    /// Break between any two characters.
    Character,
}

/// One span of uniformly styled text fed to [`flow`].
#[derive(Clone, Copy, Debug)]
pub(crate) struct Run<'a> {
    pub(crate) font: &'a Font,
    pub(crate) text: &'a str,
    pub(crate) size: f32,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub(crate) struct PlacedGlyph {
    pub(crate) run: usize,
    pub(crate) ch: char,
    pub(crate) x: f32,
    pub(crate) advance: f32,
}

#[derive(Clone, Debug, Default, PartialEq)]
pub(crate) struct Line {
    pub(crate) glyphs: Vec<PlacedGlyph>,
    pub(crate) width: f32,
    pub(crate) metrics: LineMetrics,
}

/// Lines produced by [`flow`], positioned relative to the block origin.
#[derive(Clone, Debug, Default, PartialEq)]
pub(crate) struct Flow {
    pub(crate) lines: Vec<Line>,
}

impl Flow {
    pub(crate) fn width(&self) -> f32 {
        self.lines.iter().map(|l| l.width).fold(0.0, f32::max)
    }

    /// Sum of line heights; the gap after the last line is not counted.
    pub(crate) fn height(&self) -> f32 {
        let total: f32 = self.lines.iter().map(|l| l.metrics.line_height()).sum();
        total - self.lines.last().map_or(0.0, |l| l.metrics.line_gap)
    }

    /// Top of each line, relative to the block top.
    pub(crate) fn line_tops(&self) -> impl Iterator<Item = f32> + '_ {
        self.lines.iter().scan(0.0f32, |top, line| {
            let this = *top;
            *top += line.metrics.line_height();
            Some(this)
        })
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum TokenKind {
    Word,
    Space,
    Newline,
}

struct Token<'a> {
    run: usize,
    text: &'a str,
    kind: TokenKind,
}

fn tokenize<'a>(runs: &[Run<'a>], wrap: WrapStyle) -> Vec<Token<'a>> {
    let mut out = Vec::new();
    for (run, r) in runs.iter().enumerate() {
        let mut rest = r.text;
        while let Some(ch) = rest.chars().next() {
            let kind = match ch {
                '\n' => TokenKind::Newline,
                c if c.is_whitespace() => TokenKind::Space,
                _ => TokenKind::Word,
            };
            let len = match (kind, wrap) {
                (TokenKind::Word, WrapStyle::Word) => rest
                    .find(char::is_whitespace)
                    .unwrap_or(rest.len()),
                _ => ch.len_utf8(),
            };
            out.push(Token {
                run,
                text: &rest[..len],
                kind,
            });
            rest = &rest[len..];
        }
    }
    out
}

struct LineBuilder<'r, 'a> {
    runs: &'r [Run<'a>],
    max_width: Option<f32>,
    wrap: WrapStyle,
    lines: Vec<Line>,
    current: Line,
    /// Runs with at least one glyph (or the newline) on the current line.
    used: Vec<usize>,
    /// Whether the current line began after a soft wrap.
    wrapped: bool,
}

impl<'r, 'a> LineBuilder<'r, 'a> {
    fn fits(&self, width: f32) -> bool {
        match (self.wrap, self.max_width) {
            (WrapStyle::None, _) | (_, None) => true,
            (_, Some(max)) => self.current.width + width <= max + f32::EPSILON,
        }
    }

    fn advance(&self, run: usize, text: &str) -> RastelResult<f32> {
        let r = &self.runs[run];
        let mut total = 0.0;
        for ch in text.chars() {
            total += r.font.face().advance(ch, r.size)?;
        }
        Ok(total)
    }

    fn push_glyphs(&mut self, run: usize, text: &str) -> RastelResult<()> {
        let r = &self.runs[run];
        for ch in text.chars() {
            let adv = r.font.face().advance(ch, r.size)?;
            self.current.glyphs.push(PlacedGlyph {
                run,
                ch,
                x: self.current.width,
                advance: adv,
            });
            self.current.width += adv;
        }
        if !self.used.contains(&run) {
            self.used.push(run);
        }
        Ok(())
    }

    fn finish_line(&mut self, wrapped: bool) -> RastelResult<()> {
        if wrapped {
            while self.current.glyphs.last().is_some_and(|g| g.ch.is_whitespace()) {
                self.current.glyphs.pop();
            }
            self.current.width = self.current.glyphs.last().map_or(0.0, |g| g.x + g.advance);
        }
        let mut metrics: Option<LineMetrics> = None;
        for &run in &self.used {
            let r = &self.runs[run];
            let m = r.font.face().line_metrics(r.size)?;
            metrics = Some(match metrics {
                None => m,
                Some(acc) => LineMetrics {
                    ascent: acc.ascent.max(m.ascent),
                    descent: acc.descent.max(m.descent),
                    line_gap: acc.line_gap.max(m.line_gap),
                },
            });
        }
        // a blank line takes the metrics of the run it sits in
        if metrics.is_none()
            && let Some(last) = self.lines.last()
        {
            metrics = Some(last.metrics);
        }
        self.current.metrics = metrics.unwrap_or_default();
        self.lines.push(std::mem::take(&mut self.current));
        self.used.clear();
        self.wrapped = wrapped;
        Ok(())
    }

    fn place(&mut self, token: &Token<'a>) -> RastelResult<()> {
        match token.kind {
            TokenKind::Newline => {
                if !self.used.contains(&token.run) {
                    self.used.push(token.run);
                }
                self.finish_line(false)
            }
            TokenKind::Space => {
                let width = self.advance(token.run, token.text)?;
                if self.current.glyphs.is_empty() && self.wrapped {
                    // spaces at a soft break are swallowed
                    return Ok(());
                }
                if !self.fits(width) {
                    return self.finish_line(true);
                }
                self.push_glyphs(token.run, token.text)
            }
            TokenKind::Word => {
                let width = self.advance(token.run, token.text)?;
                if self.fits(width) {
                    return self.push_glyphs(token.run, token.text);
                }
                if !self.current.glyphs.is_empty() {
                    self.finish_line(true)?;
                    if self.fits(width) {
                        return self.push_glyphs(token.run, token.text);
                    }
                }
                self.place_chars(token.run, token.text)
            }
        }
    }

    fn place_chars(&mut self, run: usize, text: &str) -> RastelResult<()> {
        let mut buf = [0u8; 4];
        for ch in text.chars() {
            let s: &str = ch.encode_utf8(&mut buf);
            let width = self.advance(run, s)?;
            if !self.fits(width) && !self.current.glyphs.is_empty() {
                self.finish_line(true)?;
            }
            self.push_glyphs(run, s)?;
        }
        Ok(())
    }
}

/// Break `runs` into lines no wider than `max_width` (when wrapping).
pub(crate) fn flow(runs: &[Run<'_>], max_width: Option<f32>, wrap: WrapStyle) -> RastelResult<Flow> {
    let mut builder = LineBuilder {
        runs,
        max_width,
        wrap,
        lines: Vec::new(),
        current: Line::default(),
        used: Vec::new(),
        wrapped: false,
    };
    for token in tokenize(runs, wrap) {
        builder.place(&token)?;
    }
    if !builder.current.glyphs.is_empty() || builder.lines.is_empty() {
        if builder.used.is_empty() && !runs.is_empty() {
            builder.used.push(runs.len() - 1);
        }
        builder.finish_line(false)?;
    }
    Ok(Flow {
        lines: builder.lines,
    })
}

/// Paint style of one run.
#[derive(Clone, Copy, Debug)]
pub(crate) struct Paint {
    pub(crate) fill: Pixel,
    pub(crate) overlay: OverlayMode,
}

/// Paint a flowed block with its top-left corner at `origin`.
///
/// `line_offset` shifts each line horizontally given its width.
pub(crate) fn paint_flow(
    image: &mut Image,
    runs: &[Run<'_>],
    paints: &[Paint],
    flow: &Flow,
    origin: (f32, f32),
    line_offset: impl Fn(f32) -> f32,
) -> RastelResult<()> {
    for (line, top) in flow.lines.iter().zip(flow.line_tops()) {
        let baseline = origin.1 + top + line.metrics.ascent;
        let dx = origin.0 + line_offset(line.width);
        for g in &line.glyphs {
            let run = &runs[g.run];
            let paint = paints[g.run];
            let bitmap = run.font.face().rasterize(g.ch, run.size)?;
            if bitmap.width == 0 || bitmap.height == 0 {
                continue;
            }
            let x0 = (dx + g.x).round() as i64 + i64::from(bitmap.left);
            let y0 = baseline.round() as i64 - i64::from(bitmap.top);
            let rows = bitmap.coverage.chunks_exact(bitmap.width as usize);
            for (by, row) in rows.enumerate() {
                for (bx, &cov) in row.iter().enumerate() {
                    image.paint(
                        x0 + bx as i64,
                        y0 + by as i64,
                        paint.fill,
                        paint.overlay,
                        cov,
                    );
                }
            }
        }
    }
    Ok(())
}

#[cfg(test)]
#[path = "../../tests/unit/text/flow.rs"]
mod tests;
