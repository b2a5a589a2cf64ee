use egui::{CursorIcon, Pos2};

use crate::command::Command;
use crate::config::EditorConfig;
use crate::document::Document;
use crate::error::EditorResult;
use crate::input::EditorKey;
use crate::settings::StyleSettings;
use crate::state::InteractionState;

/// Read-only inputs every tool handler gets alongside the document.
#[derive(Debug, Clone, Copy)]
pub struct ToolContext<'a> {
    pub settings: &'a StyleSettings,
    pub config: &'a EditorConfig,
    /// Screen points per raster pixel on the host's canvas.
    pub view_scale: f32,
}

/// What a tool handler produced: nothing, or a finalized edit to execute and record.
pub type ToolResult = EditorResult<Option<Command>>;

/// Tool trait defines the interface for all editing tools
pub trait Tool {
    /// Return the name of the tool
    fn name(&self) -> &'static str;

    /// Abandon any in-progress interaction, leaving the document exactly as
    /// it was before that interaction began. Called on tool switch, undo,
    /// redo and explicit cancel.
    fn cancel(&mut self, doc: &mut Document);

    /// Handle pointer press on the canvas.
    fn on_pointer_down(&mut self, pos: Pos2, doc: &mut Document, ctx: ToolContext<'_>) -> ToolResult;

    /// Handle pointer movement, pressed or not.
    fn on_pointer_move(&mut self, pos: Pos2, doc: &mut Document, ctx: ToolContext<'_>) -> ToolResult;

    /// Handle pointer release. Return a Command to **finalize** an action if applicable.
    fn on_pointer_up(&mut self, pos: Pos2, doc: &mut Document, ctx: ToolContext<'_>) -> ToolResult;

    fn on_double_click(&mut self, _pos: Pos2, _doc: &mut Document, _ctx: ToolContext<'_>) -> ToolResult {
        Ok(None)
    }

    /// Confirm/cancel keys. Undo and redo never reach tools.
    fn on_key(&mut self, key: EditorKey, doc: &mut Document, _ctx: ToolContext<'_>) -> ToolResult {
        if key == EditorKey::Cancel {
            self.cancel(doc);
        }
        Ok(None)
    }

    fn interaction(&self) -> InteractionState;

    /// Cursor affordance for the pointer hovering at `pos`.
    fn cursor_icon(&self, _pos: Pos2, _doc: &Document, _ctx: ToolContext<'_>) -> CursorIcon {
        CursorIcon::Default
    }
}

mod crop_tool;
mod draw_stroke_tool;
mod polygon_builder;
mod shape_tool;
mod text_tool;

pub use crop_tool::{CropState, CropTool};
pub use draw_stroke_tool::{DrawStrokeState, DrawStrokeTool};
pub use polygon_builder::PolygonBuilder;
pub use shape_tool::{ShapeState, ShapeTool};
pub use text_tool::TextTool;

/// The tool a user can pick.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ToolKind {
    #[default]
    None,
    Draw,
    Crop,
    Shape,
    Text,
}

impl ToolKind {
    pub const ALL: [ToolKind; 5] = [
        ToolKind::None,
        ToolKind::Draw,
        ToolKind::Crop,
        ToolKind::Shape,
        ToolKind::Text,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            ToolKind::None => "None",
            ToolKind::Draw => "Draw",
            ToolKind::Crop => "Crop",
            ToolKind::Shape => "Shape",
            ToolKind::Text => "Text",
        }
    }
}

/// No tool picked: pointer input is ignored.
#[derive(Debug, Clone, Default)]
pub struct NoTool;

impl Tool for NoTool {
    fn name(&self) -> &'static str {
        "None"
    }

    fn cancel(&mut self, _doc: &mut Document) {}

    fn on_pointer_down(&mut self, _pos: Pos2, _doc: &mut Document, _ctx: ToolContext<'_>) -> ToolResult {
        Ok(None)
    }

    fn on_pointer_move(&mut self, _pos: Pos2, _doc: &mut Document, _ctx: ToolContext<'_>) -> ToolResult {
        Ok(None)
    }

    fn on_pointer_up(&mut self, _pos: Pos2, _doc: &mut Document, _ctx: ToolContext<'_>) -> ToolResult {
        Ok(None)
    }

    fn interaction(&self) -> InteractionState {
        InteractionState::Idle
    }
}

/// Enum representing all available tool types
/// This allows us to avoid using Box<dyn Tool> and simplifies memory management
#[derive(Debug, Clone)]
pub enum ToolType {
    None(NoTool),
    Draw(DrawStrokeTool),
    Crop(CropTool),
    Shape(ShapeTool),
    Text(TextTool),
}

impl Default for ToolType {
    fn default() -> Self {
        ToolType::None(NoTool)
    }
}

impl ToolType {
    pub fn new(kind: ToolKind) -> Self {
        match kind {
            ToolKind::None => ToolType::None(NoTool),
            ToolKind::Draw => ToolType::Draw(DrawStrokeTool::new()),
            ToolKind::Crop => ToolType::Crop(CropTool::new()),
            ToolKind::Shape => ToolType::Shape(ShapeTool::new()),
            ToolKind::Text => ToolType::Text(TextTool::new()),
        }
    }

    pub fn kind(&self) -> ToolKind {
        match self {
            Self::None(_) => ToolKind::None,
            Self::Draw(_) => ToolKind::Draw,
            Self::Crop(_) => ToolKind::Crop,
            Self::Shape(_) => ToolKind::Shape,
            Self::Text(_) => ToolKind::Text,
        }
    }

    pub fn as_crop_tool(&self) -> Option<&CropTool> {
        match self {
            Self::Crop(tool) => Some(tool),
            _ => None,
        }
    }

    pub fn as_shape_tool(&self) -> Option<&ShapeTool> {
        match self {
            Self::Shape(tool) => Some(tool),
            _ => None,
        }
    }

    fn inner(&self) -> &dyn Tool {
        match self {
            Self::None(tool) => tool,
            Self::Draw(tool) => tool,
            Self::Crop(tool) => tool,
            Self::Shape(tool) => tool,
            Self::Text(tool) => tool,
        }
    }

    fn inner_mut(&mut self) -> &mut dyn Tool {
        match self {
            Self::None(tool) => tool,
            Self::Draw(tool) => tool,
            Self::Crop(tool) => tool,
            Self::Shape(tool) => tool,
            Self::Text(tool) => tool,
        }
    }
}

impl Tool for ToolType {
    fn name(&self) -> &'static str {
        self.inner().name()
    }

    fn cancel(&mut self, doc: &mut Document) {
        self.inner_mut().cancel(doc)
    }

    fn on_pointer_down(&mut self, pos: Pos2, doc: &mut Document, ctx: ToolContext<'_>) -> ToolResult {
        self.inner_mut().on_pointer_down(pos, doc, ctx)
    }

    fn on_pointer_move(&mut self, pos: Pos2, doc: &mut Document, ctx: ToolContext<'_>) -> ToolResult {
        self.inner_mut().on_pointer_move(pos, doc, ctx)
    }

    fn on_pointer_up(&mut self, pos: Pos2, doc: &mut Document, ctx: ToolContext<'_>) -> ToolResult {
        self.inner_mut().on_pointer_up(pos, doc, ctx)
    }

    fn on_double_click(&mut self, pos: Pos2, doc: &mut Document, ctx: ToolContext<'_>) -> ToolResult {
        self.inner_mut().on_double_click(pos, doc, ctx)
    }

    fn on_key(&mut self, key: EditorKey, doc: &mut Document, ctx: ToolContext<'_>) -> ToolResult {
        self.inner_mut().on_key(key, doc, ctx)
    }

    fn interaction(&self) -> InteractionState {
        self.inner().interaction()
    }

    fn cursor_icon(&self, pos: Pos2, doc: &Document, ctx: ToolContext<'_>) -> CursorIcon {
        self.inner().cursor_icon(pos, doc, ctx)
    }
}
