//! Glyph rasterization for surfaces that have no text engine of their own.

use iced::Point;
use std::collections::HashMap;
use std::sync::Arc;

/// Fonts tried when the figure was not given a font file.
const SYSTEM_FONTS: &[&str] = &[
    "/usr/share/fonts/truetype/dejavu/DejaVuSans.ttf",
    "/usr/share/fonts/TTF/DejaVuSans.ttf",
    "/usr/share/fonts/dejavu/DejaVuSans.ttf",
    "/usr/share/fonts/truetype/liberation/LiberationSans-Regular.ttf",
    "/usr/share/fonts/noto/NotoSans-Regular.ttf",
    "/System/Library/Fonts/Supplemental/Arial.ttf",
    "/Library/Fonts/Arial.ttf",
    "C:\\Windows\\Fonts\\arial.ttf",
];

type Glyph = (fontdue::Metrics, Vec<u8>);

/// A parsed font plus the glyphs rasterized from it so far, keyed by
/// character and half-pixel size.
#[derive(Clone)]
pub struct GlyphCache {
    font: Arc<fontdue::Font>,
    cache: HashMap<(char, u32), Glyph>,
}

impl std::fmt::Debug for GlyphCache {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GlyphCache")
            .field("cached", &self.cache.len())
            .finish_non_exhaustive()
    }
}

impl GlyphCache {
    pub fn from_bytes(data: &[u8]) -> Option<Self> {
        match fontdue::Font::from_bytes(data, fontdue::FontSettings::default()) {
            Ok(font) => Some(Self {
                font: Arc::new(font),
                cache: HashMap::new(),
            }),
            Err(err) => {
                log::warn!("failed to parse font data: {err}");
                None
            }
        }
    }

    /// First readable font among a few well-known system locations.
    pub fn system() -> Option<Self> {
        SYSTEM_FONTS.iter().find_map(|path| {
            let data = std::fs::read(path).ok()?;
            let glyphs = Self::from_bytes(&data)?;
            log::debug!("rasterizing text with {path}");
            Some(glyphs)
        })
    }

    /// Parses `data` when given, falling back to a system font.
    pub fn load(data: Option<&[u8]>) -> Option<Self> {
        data.and_then(Self::from_bytes).or_else(Self::system)
    }

    fn glyph(&mut self, ch: char, px: f32) -> &Glyph {
        let key = (ch, (px * 2.0).round() as u32);
        let font = &self.font;
        self.cache
            .entry(key)
            .or_insert_with(|| font.rasterize(ch, px))
    }

    /// Horizontal advance of `text` at `px` pixels.
    pub fn measure(&mut self, text: &str, px: f32) -> f32 {
        text.chars()
            .map(|ch| self.glyph(ch, px).0.advance_width)
            .sum()
    }

    /// Distance from the vertical middle of a line down to its baseline.
    pub fn baseline_offset(&self, px: f32) -> f32 {
        self.font
            .horizontal_line_metrics(px)
            .map_or(px * 0.35, |line| (line.ascent + line.descent) / 2.0)
    }

    /// Calls `plot(x, y, coverage)` for every pixel `text` touches, with the
    /// pen starting at `origin` on the baseline.
    pub fn rasterize(
        &mut self,
        text: &str,
        origin: Point,
        px: f32,
        mut plot: impl FnMut(i64, i64, u8),
    ) {
        let mut pen = origin.x;
        for ch in text.chars() {
            let (metrics, bitmap) = self.glyph(ch, px);
            let left = (pen + metrics.xmin as f32).round() as i64;
            let top = (origin.y - (metrics.ymin as f32 + metrics.height as f32)).round() as i64;

            if metrics.width > 0 {
                for (row, line) in bitmap.chunks(metrics.width).enumerate() {
                    for (col, &coverage) in line.iter().enumerate() {
                        if coverage > 0 {
                            plot(left + col as i64, top + row as i64, coverage);
                        }
                    }
                }
            }
            pen += metrics.advance_width;
        }
    }
}
