use egui::{Align2, Color32, FontId, Response, Sense, Stroke, Ui, Vec2};

use crate::tools::ToolKind;

const BUTTON_SIZE: Vec2 = Vec2::new(36.0, 36.0);
const SELECTED_FILL: Color32 = Color32::from_rgb(102, 126, 234);

/// Square icon button for the tool strip.
pub struct ToolButton {
    pub tool: ToolKind,
    pub selected: bool,
}

pub fn tool_icon(tool: ToolKind) -> &'static str {
    match tool {
        ToolKind::None => "🖱",
        ToolKind::Draw => "🖌",
        ToolKind::Crop => "✂",
        ToolKind::Shape => "⬛",
        ToolKind::Text => "🅰",
    }
}

impl ToolButton {
    pub fn new(tool: ToolKind, selected: bool) -> Self {
        Self { tool, selected }
    }

    pub fn show(&self, ui: &mut Ui) -> Response {
        let (rect, response) = ui.allocate_exact_size(BUTTON_SIZE, Sense::click());

        if ui.is_rect_visible(rect) {
            let bg_color = if self.selected {
                SELECTED_FILL
            } else if response.hovered() {
                Color32::from_gray(60)
            } else {
                Color32::from_gray(40)
            };
            ui.painter().rect_filled(rect, 4.0, bg_color);
            ui.painter().text(
                rect.center(),
                Align2::CENTER_CENTER,
                tool_icon(self.tool),
                FontId::proportional(20.0),
                Color32::WHITE,
            );
            if self.selected {
                ui.painter()
                    .rect_stroke(rect, 4.0, Stroke::new(2.0, Color32::WHITE));
            }
        }

        response.on_hover_text(self.tool.label())
    }
}
