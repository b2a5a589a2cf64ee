use egui::Color32;
use serde::{Deserialize, Serialize};

use crate::shape::{ArrowHeads, ShapeKind, ShapeStyle};

/// User-facing style choices for every tool. Persisted by the host app.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)] // if we add new fields, give them default values when deserializing old state
pub struct StyleSettings {
    pub brush_color: Color32,
    pub brush_size: f32,

    pub text: String,
    pub text_color: Color32,
    pub font_size: f32,

    pub shape_kind: ShapeKind,
    pub stroke_color: Color32,
    pub fill_color: Color32,
    pub filled: bool,
    pub line_width: f32,
    pub arrow_heads: ArrowHeads,
}

impl Default for StyleSettings {
    fn default() -> Self {
        Self {
            brush_color: Color32::from_rgb(255, 0, 0),
            brush_size: 5.0,
            text: String::new(),
            text_color: Color32::WHITE,
            font_size: 30.0,
            shape_kind: ShapeKind::Rectangle,
            stroke_color: Color32::from_rgb(0, 255, 0),
            fill_color: Color32::from_rgb(0, 255, 0),
            filled: true,
            line_width: 3.0,
            arrow_heads: ArrowHeads::Single,
        }
    }
}

impl StyleSettings {
    pub fn shape_style(&self) -> ShapeStyle {
        ShapeStyle {
            stroke_color: self.stroke_color,
            fill_color: self.fill_color,
            filled: self.filled,
            stroke_width: self.line_width,
        }
    }
}
