use ab_glyph::{point, Font, FontArc, ScaleFont};
use egui::{Color32, Pos2};
use image::RgbaImage;

use crate::error::{EditorError, EditorResult};
use crate::render::raster::blend_pixel;

/// Glyph rasterizer for text stamps, backed by egui's bundled proportional font.
#[derive(Clone)]
pub struct TextRenderer {
    font: Option<FontArc>,
}

impl std::fmt::Debug for TextRenderer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TextRenderer")
            .field("font_loaded", &self.font.is_some())
            .finish()
    }
}

impl Default for TextRenderer {
    fn default() -> Self {
        Self::new()
    }
}

impl TextRenderer {
    pub fn new() -> Self {
        let font = default_font_arc();
        if font.is_none() {
            log::warn!("No proportional font in egui's defaults, text stamping is disabled");
        }
        Self { font }
    }

    pub fn is_available(&self) -> bool {
        self.font.is_some()
    }

    /// Draws `text` with its baseline starting at `baseline`.
    pub fn stamp(
        &self,
        img: &mut RgbaImage,
        baseline: Pos2,
        text: &str,
        color: Color32,
        size: f32,
    ) -> EditorResult<()> {
        if text.trim().is_empty() {
            return Err(EditorError::EmptyText);
        }
        let font = self.font.as_ref().ok_or(EditorError::FontUnavailable)?;
        let scaled = font.as_scaled(size);
        let (width, height) = (img.width() as i32, img.height() as i32);

        let mut caret = point(baseline.x, baseline.y);
        let mut previous = None;
        for ch in text.chars() {
            let mut glyph = scaled.scaled_glyph(ch);
            if let Some(prev) = previous {
                caret.x += scaled.kern(prev, glyph.id);
            }
            glyph.position = caret;
            caret.x += scaled.h_advance(glyph.id);
            previous = Some(glyph.id);

            if let Some(outlined) = scaled.outline_glyph(glyph) {
                let bounds = outlined.px_bounds();
                outlined.draw(|x, y, coverage| {
                    let px = x as i32 + bounds.min.x as i32;
                    let py = y as i32 + bounds.min.y as i32;
                    if px >= 0 && py >= 0 && px < width && py < height {
                        blend_pixel(img, px as u32, py as u32, color, coverage);
                    }
                });
            }
        }
        Ok(())
    }
}

fn default_font_arc() -> Option<FontArc> {
    let definitions = egui::FontDefinitions::default();
    let family = definitions.families.get(&egui::FontFamily::Proportional)?;
    let font_name = family.first()?;
    let data = definitions.font_data.get(font_name)?;
    match data.font.clone() {
        std::borrow::Cow::Borrowed(bytes) => {
            ab_glyph::FontRef::try_from_slice_and_index(bytes, data.index)
                .map(FontArc::from)
                .ok()
        }
        std::borrow::Cow::Owned(bytes) => {
            ab_glyph::FontVec::try_from_vec_and_index(bytes, data.index)
                .map(FontArc::from)
                .ok()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Rgba;

    #[test]
    fn empty_text_is_rejected() {
        let renderer = TextRenderer::new();
        let mut img = RgbaImage::from_pixel(50, 50, Rgba([0, 0, 0, 255]));
        let result = renderer.stamp(&mut img, Pos2::new(5.0, 30.0), "   ", Color32::WHITE, 30.0);
        assert!(matches!(result, Err(EditorError::EmptyText)));
    }

    #[test]
    fn stamping_marks_pixels_above_the_baseline() {
        let renderer = TextRenderer::new();
        assert!(renderer.is_available());
        let mut img = RgbaImage::from_pixel(120, 60, Rgba([0, 0, 0, 255]));
        renderer
            .stamp(&mut img, Pos2::new(5.0, 40.0), "Hi", Color32::WHITE, 30.0)
            .unwrap();
        let lit = img.enumerate_pixels().filter(|(_, _, p)| p[0] > 0).count();
        assert!(lit > 0);
        assert!(img.enumerate_pixels().all(|(_, y, p)| y < 44 || p[0] == 0));
    }
}
