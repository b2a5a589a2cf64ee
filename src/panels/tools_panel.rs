use egui::{Color32, ComboBox, DragValue, RichText, Slider, Ui};

use crate::app::EditorApp;
use crate::components::ToolButton;
use crate::filters::{FilterParams, Preset};
use crate::shape::{ArrowHeads, ShapeKind};
use crate::tools::ToolKind;

pub fn tools_panel(app: &mut EditorApp, ctx: &egui::Context) {
    egui::SidePanel::left("tools_panel")
        .resizable(true)
        .default_width(240.0)
        .show(ctx, |ui| {
            egui::ScrollArea::vertical().show(ui, |ui| {
                tool_strip(app, ui);
                ui.separator();
                tool_options(app, ui);
                ui.separator();
                adjustments(app, ui);
                ui.separator();
                transforms(app, ui);
                ui.separator();
                history(app, ui);
                ui.separator();
                status(app, ui);
            });
        });
}

fn tool_strip(app: &mut EditorApp, ui: &mut Ui) {
    ui.heading("Tools");
    let active = app.editor().tool_kind();
    ui.horizontal_wrapped(|ui| {
        for kind in ToolKind::ALL {
            if ToolButton::new(kind, active == kind).show(ui).clicked() {
                log::info!("Tool selected from UI: {}", kind.label());
                app.editor_mut().set_tool(kind);
            }
        }
    });
}

fn tool_options(app: &mut EditorApp, ui: &mut Ui) {
    let kind = app.editor().tool_kind();
    let settings = app.editor_mut().settings_mut();
    match kind {
        ToolKind::None => {
            ui.label("Pick a tool to start editing.");
        }
        ToolKind::Draw => {
            ui.horizontal(|ui| {
                ui.label("Color");
                ui.color_edit_button_srgba(&mut settings.brush_color);
            });
            ui.add(Slider::new(&mut settings.brush_size, 1.0..=50.0).text("Size"));
        }
        ToolKind::Crop => {
            ui.label("Drag to select. Enter applies, Esc cancels.");
        }
        ToolKind::Shape => {
            ComboBox::from_label("Shape")
                .selected_text(settings.shape_kind.label())
                .show_ui(ui, |ui| {
                    for shape in ShapeKind::ALL {
                        ui.selectable_value(&mut settings.shape_kind, shape, shape.label());
                    }
                });
            ui.horizontal(|ui| {
                ui.label("Stroke");
                ui.color_edit_button_srgba(&mut settings.stroke_color);
                ui.label("Fill");
                ui.color_edit_button_srgba(&mut settings.fill_color);
            });
            if !settings.shape_kind.is_segment() {
                ui.checkbox(&mut settings.filled, "Filled");
            }
            ui.add(Slider::new(&mut settings.line_width, 1.0..=20.0).text("Line width"));
            if settings.shape_kind == ShapeKind::Arrow {
                ui.horizontal(|ui| {
                    ui.radio_value(&mut settings.arrow_heads, ArrowHeads::Single, "Single");
                    ui.radio_value(&mut settings.arrow_heads, ArrowHeads::Double, "Double");
                });
            }
            if settings.shape_kind == ShapeKind::Polygon {
                ui.label("Click to add points. Double-click or Enter closes.");
            }
        }
        ToolKind::Text => {
            ui.text_edit_singleline(&mut settings.text);
            ui.horizontal(|ui| {
                ui.label("Color");
                ui.color_edit_button_srgba(&mut settings.text_color);
            });
            ui.add(Slider::new(&mut settings.font_size, 8.0..=120.0).text("Size"));
        }
    }
}

fn adjustments(app: &mut EditorApp, ui: &mut Ui) {
    ui.heading("Adjust");
    let loaded = app.editor().is_loaded();
    let mut params = app.editor().filter_params();
    let mut changed = false;
    ui.add_enabled_ui(loaded, |ui| {
        changed |= ui
            .add(Slider::new(&mut params.brightness, FilterParams::BRIGHTNESS_RANGE).text("Brightness"))
            .changed();
        changed |= ui
            .add(Slider::new(&mut params.contrast, FilterParams::CONTRAST_RANGE).text("Contrast"))
            .changed();
        changed |= ui
            .add(Slider::new(&mut params.saturation, FilterParams::SATURATION_RANGE).text("Saturation"))
            .changed();
        changed |= ui
            .add(Slider::new(&mut params.hue, FilterParams::HUE_RANGE).text("Hue"))
            .changed();
    });
    if changed {
        let result = app.editor_mut().preview_filters(params);
        app.report(result);
    }

    ui.horizontal(|ui| {
        let pending = !app.editor().filter_params().is_neutral();
        if ui.add_enabled(loaded && pending, egui::Button::new("Apply")).clicked() {
            let result = app.editor_mut().apply_filters();
            app.report(result);
        }
    });

    ui.label("Presets");
    ui.horizontal_wrapped(|ui| {
        for preset in Preset::ALL {
            if ui.add_enabled(loaded, egui::Button::new(preset.label())).clicked() {
                let result = app.editor_mut().apply_preset(preset);
                app.report(result);
            }
        }
    });
}

fn transforms(app: &mut EditorApp, ui: &mut Ui) {
    ui.heading("Transform");
    let loaded = app.editor().is_loaded();
    ui.horizontal(|ui| {
        let mut result = None;
        if ui.add_enabled(loaded, egui::Button::new("⬌ Flip H")).clicked() {
            result = Some(app.editor_mut().flip_horizontal());
        }
        if ui.add_enabled(loaded, egui::Button::new("⬍ Flip V")).clicked() {
            result = Some(app.editor_mut().flip_vertical());
        }
        if ui.add_enabled(loaded, egui::Button::new("⟳ Rotate")).clicked() {
            result = Some(app.editor_mut().rotate_90());
        }
        if let Some(result) = result {
            app.report(result);
            app.sync_resize_form();
        }
    });

    let mut form = app.resize;
    let mut width_changed = false;
    ui.horizontal(|ui| {
        width_changed = ui
            .add(DragValue::new(&mut form.width).range(1..=16384).prefix("W "))
            .changed();
        ui.add_enabled(
            !form.maintain_aspect,
            DragValue::new(&mut form.height).range(1..=16384).prefix("H "),
        );
    });
    ui.checkbox(&mut form.maintain_aspect, "Keep aspect ratio");
    if form.maintain_aspect && (width_changed || form != app.resize) {
        if let Ok(height) = app.editor().aspect_height(form.width) {
            form.height = height;
        }
    }
    app.resize = form;

    if ui.add_enabled(loaded, egui::Button::new("Resize")).clicked() {
        let result = app.editor_mut().resize_to(form.width, form.height);
        app.report(result);
        app.sync_resize_form();
    }
}

fn history(app: &mut EditorApp, ui: &mut Ui) {
    ui.heading("History");
    let loaded = app.editor().is_loaded();
    let mut result = None;
    ui.horizontal(|ui| {
        if ui.add_enabled(app.editor().can_undo(), egui::Button::new("↩ Undo")).clicked() {
            result = Some(app.editor_mut().undo().map(|_| ()));
        }
        if ui.add_enabled(app.editor().can_redo(), egui::Button::new("↪ Redo")).clicked() {
            result = Some(app.editor_mut().redo().map(|_| ()));
        }
    });
    ui.horizontal(|ui| {
        let has_shapes = !app.editor().document().shapes().is_empty();
        if ui.add_enabled(has_shapes, egui::Button::new("Burn shapes")).clicked() {
            result = Some(app.editor_mut().burn_shapes());
        }
        if ui.add_enabled(loaded, egui::Button::new("Reset")).clicked() {
            result = Some(app.editor_mut().reset());
        }
    });
    if let Some(result) = result {
        app.report(result);
        app.sync_resize_form();
    }
}

fn status(app: &EditorApp, ui: &mut Ui) {
    let status = app.editor().status();
    if let Some(file) = app.loaded_file() {
        ui.label(RichText::new(file).small());
    }
    if status.image_loaded {
        ui.label(format!("{} × {} px", status.width, status.height));
        ui.label(format!(
            "{} · {} · {} shapes",
            status.tool.label(),
            status.interaction,
            status.shape_count
        ));
        ui.label(format!(
            "History {} / {}",
            app.editor().history().cursor().map_or(0, |c| c + 1),
            app.editor().history().len()
        ));
    } else {
        ui.label("Drop an image onto the window to start.");
    }
    if let Some(err) = app.last_error() {
        ui.label(RichText::new(err).color(Color32::from_rgb(230, 80, 80)));
    }
}
