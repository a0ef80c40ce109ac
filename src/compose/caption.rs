//! Caption overlay
//!
//! Dialogue is laid out with Parley against the panel width, rasterized
//! into a solid caption box with the CPU renderer, and blended over the
//! bottom edge of the panel bitmap.

use std::borrow::Cow;

use image::RgbaImage;

use crate::compose::blend;
use crate::constants::{CAPTION_FONT_SIZE, CAPTION_PAD_X, CAPTION_PAD_Y};
use crate::error::ComicError;

/// RGBA8 brush color used by Parley text layout.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
struct CaptionBrush {
    r: u8,
    g: u8,
    b: u8,
    a: u8,
}

const CAPTION_TEXT: CaptionBrush = CaptionBrush {
    r: 20,
    g: 20,
    b: 20,
    a: 255,
};

/// Lays out and rasterizes caption text onto panel bitmaps.
///
/// Holds the Parley contexts plus the caption font, registered once at
/// construction.
pub struct CaptionRenderer {
    font_ctx: parley::FontContext,
    layout_ctx: parley::LayoutContext<CaptionBrush>,
    family_name: String,
    font: vello_cpu::peniko::FontData,
}

impl CaptionRenderer {
    /// Registers the caption font and prepares fresh Parley contexts.
    pub fn new(font_bytes: Vec<u8>) -> Result<Self, ComicError> {
        let mut font_ctx = parley::FontContext::default();

        let families = font_ctx
            .collection
            .register_fonts(parley::fontique::Blob::from(font_bytes.clone()), None);
        let family_id = families.first().map(|(id, _)| *id).ok_or_else(|| {
            ComicError::Compose("no font families registered from caption font".to_string())
        })?;
        let family_name = font_ctx
            .collection
            .family_name(family_id)
            .ok_or_else(|| ComicError::Compose("caption font family has no name".to_string()))?
            .to_string();

        let font = vello_cpu::peniko::FontData::new(vello_cpu::peniko::Blob::from(font_bytes), 0);

        Ok(Self {
            font_ctx,
            layout_ctx: parley::LayoutContext::new(),
            family_name,
            font,
        })
    }

    fn layout(&mut self, text: &str, max_width_px: f32) -> parley::Layout<CaptionBrush> {
        let mut builder = self
            .layout_ctx
            .ranged_builder(&mut self.font_ctx, text, 1.0, true);
        builder.push_default(parley::style::StyleProperty::FontStack(
            parley::style::FontStack::Source(Cow::Owned(self.family_name.clone())),
        ));
        builder.push_default(parley::style::StyleProperty::FontSize(CAPTION_FONT_SIZE));
        builder.push_default(parley::style::StyleProperty::Brush(CAPTION_TEXT));

        let mut layout: parley::Layout<CaptionBrush> = builder.build(text);
        layout.break_all_lines(Some(max_width_px));
        layout.align(
            Some(max_width_px),
            parley::Alignment::Start,
            parley::AlignmentOptions::default(),
        );
        layout
    }

    /// Blends a caption box holding `text` over the bottom of `panel`.
    ///
    /// Empty or `...` dialogue leaves the panel untouched.
    pub fn overlay_caption(
        &mut self,
        panel: &mut RgbaImage,
        text: &str,
    ) -> Result<(), ComicError> {
        let text = text.trim();
        if text.is_empty() || text == "..." {
            return Ok(());
        }

        let (width, height) = panel.dimensions();
        if width <= 2 * CAPTION_PAD_X || height <= 2 * CAPTION_PAD_Y {
            return Err(ComicError::Compose(format!(
                "panel {width}x{height} too small for a caption"
            )));
        }

        let max_text_width = (width - 2 * CAPTION_PAD_X) as f32;
        let layout = self.layout(text, max_text_width);
        let text_height = layout.height().ceil() as u32;
        let box_height = (text_height + 2 * CAPTION_PAD_Y).min(height);

        let box_width_u16 = u16::try_from(width)
            .map_err(|_| ComicError::Compose(format!("panel width {width} out of range")))?;
        let box_height_u16 = u16::try_from(box_height)
            .map_err(|_| ComicError::Compose(format!("caption height {box_height} out of range")))?;

        let mut ctx = vello_cpu::RenderContext::new(box_width_u16, box_height_u16);

        // Caption background with a thin rule along the top edge.
        ctx.set_paint(vello_cpu::peniko::Color::from_rgba8(255, 255, 252, 242));
        ctx.fill_rect(&vello_cpu::kurbo::Rect::new(
            0.0,
            0.0,
            f64::from(width),
            f64::from(box_height),
        ));
        ctx.set_paint(vello_cpu::peniko::Color::from_rgba8(20, 20, 20, 255));
        ctx.fill_rect(&vello_cpu::kurbo::Rect::new(0.0, 0.0, f64::from(width), 2.0));

        ctx.set_transform(vello_cpu::kurbo::Affine::translate((
            f64::from(CAPTION_PAD_X),
            f64::from(CAPTION_PAD_Y),
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

                let glyphs = run.glyphs().map(|g| vello_cpu::Glyph {
                    id: g.id,
                    x: g.x,
                    y: g.y,
                });
                ctx.glyph_run(&self.font)
                    .font_size(run.run().font_size())
                    .fill_glyphs(glyphs);
            }
        }

        let mut pixmap = vello_cpu::Pixmap::new(box_width_u16, box_height_u16);
        ctx.flush();
        ctx.render_to_pixmap(&mut pixmap);

        blend_box_at_bottom(panel, pixmap.data_as_u8_slice(), width, box_height);
        Ok(())
    }
}

fn blend_box_at_bottom(panel: &mut RgbaImage, box_pixels: &[u8], width: u32, box_height: u32) {
    let y_offset = panel.height() - box_height;
    for y in 0..box_height {
        for x in 0..width {
            let src_idx = ((y * width + x) * 4) as usize;
            let Some(src) = box_pixels.get(src_idx..src_idx + 4) else {
                continue;
            };
            let dst = panel.get_pixel_mut(x, y_offset + y);
            let out = blend::over(dst.0, [src[0], src[1], src[2], src[3]]);
            dst.0 = out;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Rgba;

    #[test]
    fn blank_dialogue_is_a_noop() {
        // Renderer construction needs real font bytes, but the no-dialogue
        // path never touches the font.
        let mut panel = RgbaImage::from_pixel(64, 64, Rgba([10, 10, 10, 255]));
        let before = panel.clone();

        let mut renderer = CaptionRenderer {
            font_ctx: parley::FontContext::default(),
            layout_ctx: parley::LayoutContext::new(),
            family_name: String::new(),
            font: vello_cpu::peniko::FontData::new(vello_cpu::peniko::Blob::from(Vec::new()), 0),
        };
        renderer.overlay_caption(&mut panel, "   ").expect("noop");
        renderer.overlay_caption(&mut panel, "...").expect("noop");
        assert_eq!(panel, before);
    }

    #[test]
    fn box_blending_only_touches_the_bottom_region() {
        let mut panel = RgbaImage::from_pixel(4, 8, Rgba([0, 0, 0, 255]));
        // An opaque white 4x2 box.
        let box_pixels = vec![255u8; 4 * 2 * 4];
        blend_box_at_bottom(&mut panel, &box_pixels, 4, 2);

        assert_eq!(panel.get_pixel(0, 5).0, [0, 0, 0, 255]);
        assert_eq!(panel.get_pixel(0, 6).0, [255, 255, 255, 255]);
        assert_eq!(panel.get_pixel(3, 7).0, [255, 255, 255, 255]);
    }

    #[test]
    fn rejects_panels_smaller_than_the_padding() {
        let mut panel = RgbaImage::from_pixel(8, 8, Rgba([0, 0, 0, 255]));
        let mut renderer = CaptionRenderer {
            font_ctx: parley::FontContext::default(),
            layout_ctx: parley::LayoutContext::new(),
            family_name: String::new(),
            font: vello_cpu::peniko::FontData::new(vello_cpu::peniko::Blob::from(Vec::new()), 0),
        };
        let err = renderer
            .overlay_caption(&mut panel, "hello")
            .expect_err("too small");
        assert!(matches!(err, ComicError::Compose(_)));
    }
}
