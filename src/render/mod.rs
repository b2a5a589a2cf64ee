pub mod raster;
pub mod text;

pub use text::TextRenderer;

use egui::{Color32, ColorImage, Context, Pos2, Rect, TextureHandle, TextureOptions, Vec2};
use image::RgbaImage;

use crate::geometry::hit_testing::handle_positions;
use crate::state::EditorContext;
use crate::widgets::CropHandle;

const SELECTION_COLOR: Color32 = Color32::from_rgb(30, 120, 255);
const CROP_BORDER: Color32 = Color32::from_rgb(102, 126, 234);
const POLYGON_TRAIL: Color32 = Color32::from_rgb(200, 200, 200);

/// Builds the displayed frame: committed pixels, then pending shapes, then
/// whatever overlay the active tool shows.
///
/// The surface itself is never touched. The frame buffer is kept between
/// calls and only reallocated when the raster size changes.
#[derive(Default)]
pub struct Compositor {
    frame: Option<RgbaImage>,
    texture: Option<TextureHandle>,
}

impl std::fmt::Debug for Compositor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Compositor")
            .field("frame", &self.frame.as_ref().map(|img| img.dimensions()))
            .field("has_texture", &self.texture.is_some())
            .finish()
    }
}

impl Compositor {
    pub fn new() -> Self {
        Self::default()
    }

    /// Renders the current view of `editor`, or `None` when nothing is loaded.
    pub fn compose(&mut self, editor: &EditorContext) -> Option<&RgbaImage> {
        let surface = editor.document().surface().ok()?;
        let pixels = surface.pixels();

        let frame = match self.frame.take() {
            Some(mut frame) if frame.dimensions() == pixels.dimensions() => {
                frame.copy_from_slice(pixels.as_raw());
                frame
            }
            _ => pixels.clone(),
        };
        let frame = self.frame.insert(frame);

        let handle_size = editor.config().handle_size;
        let shapes = editor.document().shapes();
        for shape in shapes.iter() {
            raster::draw_shape(frame, shape);
        }

        if let Some(selected) = shapes.selected() {
            raster::outline_rect(frame, selected.bounding_rect(), 1.0, SELECTION_COLOR);
            for (_, center) in handle_positions(selected) {
                raster::draw_handle(frame, center, handle_size);
            }
        }

        if let Some(rect) = editor.tool().as_crop_tool().and_then(|tool| tool.rect()) {
            draw_crop_overlay(frame, rect, editor.config().crop_shade_alpha, handle_size);
        }

        if let Some(tool) = editor.tool().as_shape_tool() {
            let builder = tool.polygon();
            if builder.is_building() {
                let style = editor.settings().shape_style();
                draw_polygon_preview(frame, builder.vertices(), &builder.preview_path(), style.stroke_color);
            }
        }

        Some(&*frame)
    }

    /// Composes and uploads the frame into a single reused egui texture.
    pub fn texture(&mut self, ctx: &Context, editor: &EditorContext) -> Option<&TextureHandle> {
        let image = to_color_image(self.compose(editor)?);
        match &mut self.texture {
            Some(handle) => handle.set(image, TextureOptions::NEAREST),
            None => {
                self.texture = Some(ctx.load_texture("editor_canvas", image, TextureOptions::NEAREST));
            }
        }
        self.texture.as_ref()
    }
}

pub fn to_color_image(img: &RgbaImage) -> ColorImage {
    let size = [img.width() as usize, img.height() as usize];
    ColorImage::from_rgba_unmultiplied(size, img.as_raw())
}

fn draw_crop_overlay(frame: &mut RgbaImage, rect: Rect, shade_alpha: u8, handle_size: f32) {
    let full = Rect::from_min_size(
        Pos2::ZERO,
        Vec2::new(frame.width() as f32, frame.height() as f32),
    );
    let shade = Color32::from_black_alpha(shade_alpha);
    let outside = [
        Rect::from_min_max(full.min, Pos2::new(full.max.x, rect.min.y)),
        Rect::from_min_max(Pos2::new(full.min.x, rect.max.y), full.max),
        Rect::from_min_max(Pos2::new(full.min.x, rect.min.y), Pos2::new(rect.min.x, rect.max.y)),
        Rect::from_min_max(Pos2::new(rect.max.x, rect.min.y), Pos2::new(full.max.x, rect.max.y)),
    ];
    for band in outside {
        if band.is_positive() {
            raster::fill_rect(frame, band, shade);
        }
    }
    raster::outline_rect(frame, rect, 2.0, CROP_BORDER);
    for handle in CropHandle::ALL {
        raster::draw_handle(frame, handle.position_on(rect), handle_size);
    }
}

fn draw_polygon_preview(frame: &mut RgbaImage, vertices: &[Pos2], path: &[Pos2], color: Color32) {
    raster::stroke_polyline(frame, vertices, 2.0, color);
    if let [.., last, cursor] = path {
        if path.len() > vertices.len() {
            raster::stroke_segment(frame, *last, *cursor, 1.0, POLYGON_TRAIL);
        }
    }
    for vertex in vertices {
        raster::draw_handle(frame, *vertex, 6.0);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::input::{EditorKey, InputEvent};
    use crate::tools::ToolKind;
    use image::Rgba;

    fn editor() -> EditorContext {
        let mut editor = EditorContext::default();
        editor
            .load_image(RgbaImage::from_pixel(100, 80, Rgba([200, 200, 200, 255])))
            .unwrap();
        editor
    }

    #[test]
    fn nothing_to_compose_before_load() {
        let mut compositor = Compositor::new();
        assert!(compositor.compose(&EditorContext::default()).is_none());
    }

    #[test]
    fn pending_shapes_show_without_touching_the_surface() {
        let mut editor = editor();
        editor.set_tool(ToolKind::Shape);
        editor.handle_input(InputEvent::PointerDown(Pos2::new(10.0, 10.0))).unwrap();
        editor.handle_input(InputEvent::PointerMove(Pos2::new(50.0, 50.0))).unwrap();
        editor.handle_input(InputEvent::PointerUp(Pos2::new(50.0, 50.0))).unwrap();

        let mut compositor = Compositor::new();
        let frame = compositor.compose(&editor).unwrap().clone();
        let fill = editor.settings().fill_color;
        assert_eq!(frame.get_pixel(30, 30).0, [fill.r(), fill.g(), fill.b(), 255]);
        let surface = editor.document().surface().unwrap();
        assert_eq!(surface.pixels().get_pixel(30, 30).0, [200, 200, 200, 255]);
    }

    #[test]
    fn crop_overlay_shades_outside_only() {
        let mut editor = editor();
        editor.set_tool(ToolKind::Crop);
        editor.handle_input(InputEvent::PointerDown(Pos2::new(20.0, 20.0))).unwrap();
        editor.handle_input(InputEvent::PointerMove(Pos2::new(80.0, 60.0))).unwrap();
        editor.handle_input(InputEvent::PointerUp(Pos2::new(80.0, 60.0))).unwrap();

        let mut compositor = Compositor::new();
        let frame = compositor.compose(&editor).unwrap();
        assert!(frame.get_pixel(2, 2)[0] < 150);
        assert_eq!(frame.get_pixel(50, 40).0, [200, 200, 200, 255]);

        editor.handle_input(InputEvent::Key(EditorKey::Cancel)).unwrap();
        let frame = compositor.compose(&editor).unwrap();
        assert_eq!(frame.get_pixel(2, 2).0, [200, 200, 200, 255]);
    }

    #[test]
    fn frame_follows_a_size_change() {
        let mut editor = editor();
        let mut compositor = Compositor::new();
        assert_eq!(compositor.compose(&editor).unwrap().dimensions(), (100, 80));
        editor.rotate_90().unwrap();
        assert_eq!(compositor.compose(&editor).unwrap().dimensions(), (80, 100));
    }
}
