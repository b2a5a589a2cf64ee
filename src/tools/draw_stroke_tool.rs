use egui::{CursorIcon, Pos2};

use crate::command::{Command, Snapshot};
use crate::document::Document;
use crate::state::InteractionState;
use crate::tools::{Tool, ToolContext, ToolResult};

#[derive(Debug, Clone)]
pub enum DrawStrokeState {
    Idle,
    Drawing {
        last: Pos2,
        /// Document as it was before the stroke, for cancellation.
        backup: Box<Snapshot>,
    },
}

/// Freehand brush painting straight into the raster.
#[derive(Debug, Clone)]
pub struct DrawStrokeTool {
    state: DrawStrokeState,
}

impl Default for DrawStrokeTool {
    fn default() -> Self {
        Self::new()
    }
}

impl DrawStrokeTool {
    pub fn new() -> Self {
        Self {
            state: DrawStrokeState::Idle,
        }
    }

    pub fn state(&self) -> &DrawStrokeState {
        &self.state
    }
}

impl Tool for DrawStrokeTool {
    fn name(&self) -> &'static str {
        "DrawStroke"
    }

    fn cancel(&mut self, doc: &mut Document) {
        if let DrawStrokeState::Drawing { backup, .. } =
            std::mem::replace(&mut self.state, DrawStrokeState::Idle)
        {
            if let Err(err) = doc.restore(&backup) {
                log::warn!("Could not restore document after cancelled stroke: {err}");
            }
            log::debug!("Stroke cancelled");
        }
    }

    fn on_pointer_down(&mut self, pos: Pos2, doc: &mut Document, ctx: ToolContext<'_>) -> ToolResult {
        let backup = Box::new(doc.snapshot()?);
        // Shapes would otherwise float above the new paint.
        doc.burn_shapes()?;
        doc.surface_mut()?.stroke_segment(
            pos,
            pos,
            ctx.settings.brush_size,
            ctx.settings.brush_color,
        );
        self.state = DrawStrokeState::Drawing { last: pos, backup };
        Ok(None)
    }

    fn on_pointer_move(&mut self, pos: Pos2, doc: &mut Document, ctx: ToolContext<'_>) -> ToolResult {
        if let DrawStrokeState::Drawing { last, .. } = &mut self.state {
            doc.surface_mut()?.stroke_segment(
                *last,
                pos,
                ctx.settings.brush_size,
                ctx.settings.brush_color,
            );
            *last = pos;
        }
        Ok(None)
    }

    fn on_pointer_up(&mut self, _pos: Pos2, _doc: &mut Document, _ctx: ToolContext<'_>) -> ToolResult {
        match std::mem::replace(&mut self.state, DrawStrokeState::Idle) {
            DrawStrokeState::Drawing { .. } => Ok(Some(Command::FinishStroke)),
            DrawStrokeState::Idle => Ok(None),
        }
    }

    fn interaction(&self) -> InteractionState {
        match self.state {
            DrawStrokeState::Idle => InteractionState::Idle,
            DrawStrokeState::Drawing { .. } => InteractionState::Drawing,
        }
    }

    fn cursor_icon(&self, _pos: Pos2, _doc: &Document, _ctx: ToolContext<'_>) -> CursorIcon {
        CursorIcon::Crosshair
    }
}
