use crate::foundation::color::Rgb8;
use crate::foundation::error::{ReelError, ReelResult};
use crate::raster::buffer::RasterBuffer;
use crate::text::renderer::TextRenderer;
use crate::text::wrap::{WrapBudget, char_width, wrap_words};

/// How tall the caption band below a tile is.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BandHeight {
    /// Always reserve room for `max_lines` lines.
    #[default]
    Reserved,
    /// Size the band to the lines actually wrapped.
    FitLines,
}

/// Caption wrapping and band styling.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct CaptionSpec {
    /// Lines kept after wrapping; the rest are dropped.
    pub max_lines: usize,
    /// Font size in pixels.
    pub font_size: f32,
    /// Vertical distance between line tops, in pixels.
    pub line_spacing: u32,
    /// Extra band height beyond the lines, in pixels.
    pub band_padding: u32,
    /// Distance from the top of the band to the first line, in pixels.
    pub text_top_inset: u32,
    /// Line width budget.
    pub wrap: WrapBudget,
    /// Band sizing mode.
    pub band: BandHeight,
    /// Text fill color.
    pub text_color: Rgb8,
    /// Band background color.
    pub band_color: Rgb8,
}

impl Default for CaptionSpec {
    fn default() -> Self {
        Self {
            max_lines: 4,
            font_size: 16.0,
            line_spacing: 21,
            band_padding: 10,
            text_top_inset: 5,
            wrap: WrapBudget::default(),
            band: BandHeight::Reserved,
            text_color: Rgb8::WHITE,
            band_color: Rgb8::new(10, 40, 90),
        }
    }
}

impl CaptionSpec {
    /// Reject values the composer cannot honor.
    pub fn validate(&self) -> ReelResult<()> {
        if !self.font_size.is_finite() || self.font_size <= 0.0 {
            return Err(ReelError::validation(
                "caption font_size must be finite and > 0",
            ));
        }
        if self.line_spacing == 0 {
            return Err(ReelError::validation("caption line_spacing must be > 0"));
        }
        if let WrapBudget::Chars { max_chars: Some(0) } = self.wrap {
            return Err(ReelError::validation("caption max_chars must be > 0"));
        }
        self.max_band_height()?;
        Ok(())
    }

    /// Band height for a caption that wrapped into `line_count` lines.
    pub fn band_height(&self, line_count: usize) -> ReelResult<u32> {
        let lines = match self.band {
            BandHeight::Reserved => self.max_lines,
            BandHeight::FitLines => line_count.min(self.max_lines),
        };
        self.height_of(lines)
    }

    /// Tallest band this spec can produce.
    pub fn max_band_height(&self) -> ReelResult<u32> {
        self.height_of(self.max_lines)
    }

    fn height_of(&self, lines: usize) -> ReelResult<u32> {
        u32::try_from(lines)
            .ok()
            .and_then(|n| self.line_spacing.checked_mul(n))
            .and_then(|h| h.checked_add(self.band_padding))
            .ok_or_else(|| {
                ReelError::validation(format!(
                    "caption band of {lines} lines x {}px + {}px overflows",
                    self.line_spacing, self.band_padding
                ))
            })
    }
}

/// Wrap `text` for a tile of `tile_width` pixels.
pub fn wrap_caption(
    text: &str,
    tile_width: u32,
    spec: &CaptionSpec,
    renderer: &mut dyn TextRenderer,
) -> ReelResult<Vec<String>> {
    let budget = spec.wrap.limit(tile_width, spec.font_size);
    if spec.wrap.counts_chars() {
        wrap_words(text, budget, spec.max_lines, char_width)
    } else {
        wrap_words(text, budget, spec.max_lines, |s| renderer.measure_width(s))
    }
}

/// Append a caption band with wrapped, centered `text` below `tile`.
///
/// The tile's own pixels are left untouched.
pub fn compose(
    tile: &RasterBuffer,
    text: &str,
    spec: &CaptionSpec,
    renderer: &mut dyn TextRenderer,
) -> ReelResult<RasterBuffer> {
    let lines = wrap_caption(text, tile.width(), spec, renderer)?;
    let mut out = tile.extend_below(spec.band_height(lines.len())?, spec.band_color);

    let band_top = tile.height() + spec.text_top_inset;
    for (i, line) in lines.iter().enumerate() {
        let w = renderer.measure_width(line)?;
        let x = ((tile.width() as f32 - w) / 2.0).floor() as i32;
        let y = (band_top + i as u32 * spec.line_spacing) as i32;
        renderer.draw_text(&mut out, line, x, y, spec.text_color)?;
    }
    Ok(out)
}

#[cfg(test)]
#[path = "../../tests/unit/caption/compose.rs"]
mod tests;
