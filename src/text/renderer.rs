use std::path::Path;

use anyhow::Context as _;

use crate::foundation::color::Rgb8;
use crate::foundation::error::{ReelError, ReelResult};
use crate::raster::buffer::RasterBuffer;
use crate::raster::composite::over_in_place;

/// Font metrics and glyph drawing used by the caption composer.
pub trait TextRenderer {
    /// Rendered width of a single line of `text`, in pixels.
    fn measure_width(&mut self, text: &str) -> ReelResult<f32>;

    /// Draw a single line of `text` with its top-left corner at `(x, y)`.
    ///
    /// Glyphs falling outside `dst` are clipped.
    fn draw_text(
        &mut self,
        dst: &mut RasterBuffer,
        text: &str,
        x: i32,
        y: i32,
        color: Rgb8,
    ) -> ReelResult<()>;
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
/// RGBA8 brush color used by Parley text layout.
pub(crate) struct TextBrushRgba8 {
    pub(crate) r: u8,
    pub(crate) g: u8,
    pub(crate) b: u8,
    pub(crate) a: u8,
}

impl From<Rgb8> for TextBrushRgba8 {
    fn from(c: Rgb8) -> Self {
        Self {
            r: c.r,
            g: c.g,
            b: c.b,
            a: 255,
        }
    }
}

/// Text renderer backed by a single font file.
///
/// Shaping and measurement use `parley`; glyphs are rasterized with `vello_cpu` and composited
/// source-over into the destination buffer.
pub struct FontTextRenderer {
    font_ctx: parley::FontContext,
    layout_ctx: parley::LayoutContext<TextBrushRgba8>,
    family_name: String,
    font: vello_cpu::peniko::FontData,
    size_px: f32,
}

impl std::fmt::Debug for FontTextRenderer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FontTextRenderer")
            .field("family_name", &self.family_name)
            .field("size_px", &self.size_px)
            .finish_non_exhaustive()
    }
}

impl FontTextRenderer {
    /// Register `font_bytes` (TTF/OTF) for rendering at `size_px`.
    pub fn from_bytes(font_bytes: Vec<u8>, size_px: f32) -> ReelResult<Self> {
        if !size_px.is_finite() || size_px <= 0.0 {
            return Err(ReelError::validation("font size must be finite and > 0"));
        }

        let mut font_ctx = parley::FontContext::default();
        let families = font_ctx
            .collection
            .register_fonts(parley::fontique::Blob::from(font_bytes.clone()), None);
        let family_id = families
            .first()
            .map(|(id, _)| *id)
            .ok_or_else(|| ReelError::font("no font families registered from font bytes"))?;
        let family_name = font_ctx
            .collection
            .family_name(family_id)
            .ok_or_else(|| ReelError::font("registered font family has no name"))?
            .to_string();

        let font = vello_cpu::peniko::FontData::new(vello_cpu::peniko::Blob::from(font_bytes), 0);
        Ok(Self {
            font_ctx,
            layout_ctx: parley::LayoutContext::new(),
            family_name,
            font,
            size_px,
        })
    }

    /// Read a font file from disk.
    pub fn from_file(path: &Path, size_px: f32) -> ReelResult<Self> {
        let bytes = std::fs::read(path)
            .with_context(|| format!("failed to read font '{}'", path.display()))?;
        Self::from_bytes(bytes, size_px)
    }

    /// Family name the font registered under.
    pub fn family_name(&self) -> &str {
        &self.family_name
    }

    fn layout_line(&mut self, text: &str, brush: TextBrushRgba8) -> parley::Layout<TextBrushRgba8> {
        let mut builder = self
            .layout_ctx
            .ranged_builder(&mut self.font_ctx, text, 1.0, true);
        builder.push_default(parley::style::StyleProperty::FontStack(
            parley::style::FontStack::Source(std::borrow::Cow::Owned(self.family_name.clone())),
        ));
        builder.push_default(parley::style::StyleProperty::FontSize(self.size_px));
        builder.push_default(parley::style::StyleProperty::Brush(brush));

        let mut layout: parley::Layout<TextBrushRgba8> = builder.build(text);
        layout.break_all_lines(None);
        layout
    }
}

impl TextRenderer for FontTextRenderer {
    fn measure_width(&mut self, text: &str) -> ReelResult<f32> {
        if text.is_empty() {
            return Ok(0.0);
        }
        Ok(self.layout_line(text, TextBrushRgba8::default()).width())
    }

    fn draw_text(
        &mut self,
        dst: &mut RasterBuffer,
        text: &str,
        x: i32,
        y: i32,
        color: Rgb8,
    ) -> ReelResult<()> {
        if text.is_empty() {
            return Ok(());
        }
        let (w, h) = (
            u16::try_from(dst.width()).map_err(|_| too_large(dst))?,
            u16::try_from(dst.height()).map_err(|_| too_large(dst))?,
        );

        let layout = self.layout_line(text, color.into());
        let mut ctx = vello_cpu::RenderContext::new(w, h);
        ctx.set_transform(vello_cpu::kurbo::Affine::translate((
            f64::from(x),
            f64::from(y),
        )));
        for line in layout.lines() {
            for item in line.items() {
                let parley::layout::PositionedLayoutItem::GlyphRun(run) = item else {
                    continue;
                };
                let brush = run.style().brush;
                ctx.set_paint(vello_cpu::peniko::Color::from_rgba8(
                    brush.r, brush.g, brush.b, brush.a,
                ));
                // Positions include the run offset and the baseline, relative to the layout top.
                let glyphs = run.positioned_glyphs().map(|g| vello_cpu::Glyph {
                    id: g.id,
                    x: g.x,
                    y: g.y,
                });
                ctx.glyph_run(&self.font)
                    .font_size(run.run().font_size())
                    .fill_glyphs(glyphs);
            }
        }
        ctx.flush();

        let mut pixmap = vello_cpu::Pixmap::new(w, h);
        ctx.render_to_pixmap(&mut pixmap);
        over_in_place(dst.data_mut(), pixmap.data_as_u8_slice())
    }
}

fn too_large(dst: &RasterBuffer) -> ReelError {
    ReelError::validation(format!(
        "text target {}x{} exceeds the rasterizer limit of {}px",
        dst.width(),
        dst.height(),
        u16::MAX
    ))
}

/// Metrics-only renderer used when no font is configured.
///
/// Widths are estimated as `font_size / 2` per character. Nothing is drawn.
#[derive(Clone, Copy, Debug)]
pub struct ApproxTextRenderer {
    size_px: f32,
}

impl ApproxTextRenderer {
    /// Estimate metrics for a font of `size_px`.
    pub fn new(size_px: f32) -> Self {
        Self { size_px }
    }
}

impl TextRenderer for ApproxTextRenderer {
    fn measure_width(&mut self, text: &str) -> ReelResult<f32> {
        Ok(text.chars().count() as f32 * self.size_px / 2.0)
    }

    fn draw_text(
        &mut self,
        _dst: &mut RasterBuffer,
        _text: &str,
        _x: i32,
        _y: i32,
        _color: Rgb8,
    ) -> ReelResult<()> {
        Ok(())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/text/renderer.rs"]
mod tests;
