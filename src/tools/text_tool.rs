use egui::{CursorIcon, Pos2};

use crate::command::Command;
use crate::document::Document;
use crate::error::EditorError;
use crate::state::InteractionState;
use crate::tools::{Tool, ToolContext, ToolResult};

/// Waits for a click, then stamps the configured text with its baseline there.
#[derive(Debug, Clone, Default)]
pub struct TextTool;

impl TextTool {
    pub fn new() -> Self {
        Self
    }
}

impl Tool for TextTool {
    fn name(&self) -> &'static str {
        "Text"
    }

    fn cancel(&mut self, _doc: &mut Document) {}

    fn on_pointer_down(&mut self, pos: Pos2, doc: &mut Document, ctx: ToolContext<'_>) -> ToolResult {
        doc.surface()?;
        let text = ctx.settings.text.trim_end();
        if text.trim().is_empty() {
            return Err(EditorError::EmptyText);
        }
        Ok(Some(Command::StampText {
            position: pos,
            text: text.to_owned(),
            color: ctx.settings.text_color,
            size: ctx.settings.font_size,
        }))
    }

    fn on_pointer_move(&mut self, _pos: Pos2, _doc: &mut Document, _ctx: ToolContext<'_>) -> ToolResult {
        Ok(None)
    }

    fn on_pointer_up(&mut self, _pos: Pos2, _doc: &mut Document, _ctx: ToolContext<'_>) -> ToolResult {
        Ok(None)
    }

    fn interaction(&self) -> InteractionState {
        InteractionState::TextPending
    }

    fn cursor_icon(&self, _pos: Pos2, _doc: &Document, _ctx: ToolContext<'_>) -> CursorIcon {
        CursorIcon::Text
    }
}
