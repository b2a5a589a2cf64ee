use egui::{Color32, Pos2, Rect, Sense, Vec2};

use crate::app::EditorApp;
use crate::error::EditorResult;
use crate::input::InputEvent;

/// Largest on-screen scale; small images are shown pixel for pixel.
const MAX_SCALE: f32 = 1.0;

pub fn central_panel(app: &mut EditorApp, ctx: &egui::Context) {
    egui::CentralPanel::default().show(ctx, |ui| {
        if !app.editor().is_loaded() {
            ui.centered_and_justified(|ui| {
                ui.label("Drop an image here, or pass a path on the command line.");
            });
            return;
        }

        let (width, height) = app.editor().document().dimensions();
        let image_size = Vec2::new(width as f32, height as f32);
        let available = ui.available_size();
        let (response, painter) = ui.allocate_painter(available, Sense::click_and_drag());

        let scale = (response.rect.width() / image_size.x)
            .min(response.rect.height() / image_size.y)
            .min(MAX_SCALE);
        let canvas = Rect::from_center_size(response.rect.center(), image_size * scale);

        let mut outcome: Option<EditorResult<()>> = None;
        let mut resized = false;
        {
            let (editor, compositor, input) = app.parts_mut();
            input.set_canvas(canvas, image_size);
            editor.set_view_scale(scale);

            let keyboard_free = !ctx.wants_keyboard_input();
            for event in input.process_input(ctx, keyboard_free) {
                let result = editor.handle_input(event);
                // Hover moves would wipe an error before it could be read.
                let hover = matches!(event, InputEvent::PointerMove(_));
                if result.is_err() || (!hover && outcome.is_none()) {
                    outcome = Some(result);
                }
            }

            // The event loop may have changed the raster size.
            let (width, height) = editor.document().dimensions();
            let image_size = Vec2::new(width as f32, height as f32);
            if image_size != input.image_size() {
                resized = true;
                let scale = (response.rect.width() / image_size.x)
                    .min(response.rect.height() / image_size.y)
                    .min(MAX_SCALE);
                input.set_canvas(
                    Rect::from_center_size(response.rect.center(), image_size * scale),
                    image_size,
                );
                editor.set_view_scale(scale);
            }

            if let Some(texture) = compositor.texture(ctx, editor) {
                let uv = Rect::from_min_max(Pos2::ZERO, Pos2::new(1.0, 1.0));
                painter.image(texture.id(), input.canvas_rect(), uv, Color32::WHITE);
            }

            if let Some(pos) = response.hover_pos().and_then(|p| input.to_raster(p)) {
                ctx.set_cursor_icon(editor.cursor_icon(pos));
            }
        }

        if let Some(result) = outcome {
            app.report(result);
        }
        if resized {
            app.sync_resize_form();
        }
    });
}
