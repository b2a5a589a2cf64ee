use egui::{CursorIcon, Pos2};

use crate::command::Command;
use crate::document::Document;
use crate::geometry::{handle_test, transform};
use crate::input::EditorKey;
use crate::shape::{Shape, ShapeGeometry, ShapeId, ShapeKind};
use crate::state::{InteractionState, ShapePhase};
use crate::tools::{PolygonBuilder, Tool, ToolContext, ToolResult};
use crate::widgets::ShapeHandle;

/// Every live state remembers the selection it replaced, so a cancel can put it back.
#[derive(Debug, Clone, PartialEq)]
pub enum ShapeState {
    Idle,
    /// Dragging out a freshly created shape.
    Drawing {
        id: ShapeId,
        prior_selection: Option<ShapeId>,
    },
    Moving {
        id: ShapeId,
        original: ShapeGeometry,
        start: Pos2,
        prior_selection: Option<ShapeId>,
    },
    Resizing {
        id: ShapeId,
        handle: ShapeHandle,
        original: ShapeGeometry,
        start: Pos2,
        prior_selection: Option<ShapeId>,
    },
}

/// Creates, selects, moves and resizes vector shapes, and builds polygons.
#[derive(Debug, Clone)]
pub struct ShapeTool {
    state: ShapeState,
    polygon: PolygonBuilder,
    /// Selection in place when the polygon in progress was started.
    polygon_prior_selection: Option<ShapeId>,
}

impl Default for ShapeTool {
    fn default() -> Self {
        Self::new()
    }
}

impl ShapeTool {
    pub fn new() -> Self {
        Self {
            state: ShapeState::Idle,
            polygon: PolygonBuilder::new(),
            polygon_prior_selection: None,
        }
    }

    pub fn state(&self) -> &ShapeState {
        &self.state
    }

    pub fn polygon(&self) -> &PolygonBuilder {
        &self.polygon
    }

    fn finish_polygon(&mut self, ctx: ToolContext<'_>) -> ToolResult {
        let count = self.polygon.vertices().len();
        let shape = self.polygon.finish(ctx.settings.shape_style())?;
        self.polygon_prior_selection = None;
        log::info!("⬟ Polygon finished with {count} vertices");
        Ok(Some(Command::AddPolygon(shape)))
    }

    /// Puts the document back the way it was before the live drag started.
    fn abandon_drag(&mut self, doc: &mut Document) {
        let prior_selection = match std::mem::replace(&mut self.state, ShapeState::Idle) {
            ShapeState::Idle => return,
            ShapeState::Drawing { id, prior_selection } => {
                doc.shapes_mut().remove(id);
                prior_selection
            }
            ShapeState::Moving {
                id,
                original,
                prior_selection,
                ..
            }
            | ShapeState::Resizing {
                id,
                original,
                prior_selection,
                ..
            } => {
                if let Some(shape) = doc.shapes_mut().get_mut(id) {
                    shape.geometry = original;
                }
                prior_selection
            }
        };
        restore_selection(doc, prior_selection);
    }

    fn begin_interaction(&mut self, pos: Pos2, doc: &mut Document, ctx: ToolContext<'_>) -> ToolResult {
        let shapes = doc.shapes_mut();
        let prior_selection = shapes.selected_id();

        // 1. Handle on the current selection
        if let Some(selected) = shapes.selected() {
            if let Some(handle) = handle_test(selected, pos, ctx.config.handle_size) {
                log::debug!("Resizing {} via {handle:?}", selected.id);
                self.state = ShapeState::Resizing {
                    id: selected.id,
                    handle,
                    original: selected.geometry.clone(),
                    start: pos,
                    prior_selection,
                };
                return Ok(None);
            }
        }

        // 2. Body of any shape, topmost first
        if let Some(id) = shapes.topmost_hit(pos, ctx.config.hit_tolerance) {
            shapes.select(id);
            if let Some(shape) = shapes.get(id) {
                log::debug!("Moving {id}");
                self.state = ShapeState::Moving {
                    id,
                    original: shape.geometry.clone(),
                    start: pos,
                    prior_selection,
                };
            }
            return Ok(None);
        }

        // 3. Empty space: start something new
        shapes.clear_selection();
        let kind = ctx.settings.shape_kind;
        if kind == ShapeKind::Polygon {
            self.polygon_prior_selection = prior_selection;
            self.polygon.add_vertex(pos, ctx.view_scale);
            log::debug!("Polygon started at {pos:?}");
            return Ok(None);
        }
        if let Some(shape) = Shape::starting_at(kind, pos, ctx.settings.shape_style()) {
            let id = shapes.push_selected(shape.with_arrow_heads(ctx.settings.arrow_heads));
            self.state = ShapeState::Drawing { id, prior_selection };
        }
        Ok(None)
    }
}

impl Tool for ShapeTool {
    fn name(&self) -> &'static str {
        "Shape"
    }

    fn cancel(&mut self, doc: &mut Document) {
        if self.polygon.is_building() {
            self.polygon.cancel();
            restore_selection(doc, self.polygon_prior_selection.take());
        }
        self.abandon_drag(doc);
    }

    fn on_pointer_down(&mut self, pos: Pos2, doc: &mut Document, ctx: ToolContext<'_>) -> ToolResult {
        doc.surface()?;
        if self.polygon.is_building() {
            self.polygon.add_vertex(pos, ctx.view_scale);
            return Ok(None);
        }
        if self.state != ShapeState::Idle {
            // The release of the previous drag never arrived.
            log::debug!("Abandoning unfinished shape drag");
            self.abandon_drag(doc);
        }
        self.begin_interaction(pos, doc, ctx)
    }

    fn on_pointer_move(&mut self, pos: Pos2, doc: &mut Document, ctx: ToolContext<'_>) -> ToolResult {
        self.polygon.set_cursor(pos);
        match &self.state {
            ShapeState::Idle => {}
            ShapeState::Drawing { id, .. } => {
                if let Some(shape) = doc.shapes_mut().get_mut(*id) {
                    transform::update_extent(&mut shape.geometry, pos);
                }
            }
            ShapeState::Moving {
                id, original, start, ..
            } => {
                if let Some(shape) = doc.shapes_mut().get_mut(*id) {
                    shape.geometry = transform::translated(original, pos - *start);
                }
            }
            ShapeState::Resizing {
                id,
                handle,
                original,
                start,
                ..
            } => {
                if let Some(shape) = doc.shapes_mut().get_mut(*id) {
                    shape.geometry = transform::apply_handle_drag(
                        original,
                        *handle,
                        pos - *start,
                        ctx.config.min_shape_size,
                    );
                }
            }
        }
        Ok(None)
    }

    fn on_pointer_up(&mut self, _pos: Pos2, doc: &mut Document, _ctx: ToolContext<'_>) -> ToolResult {
        match std::mem::replace(&mut self.state, ShapeState::Idle) {
            ShapeState::Idle => Ok(None),
            ShapeState::Drawing { id, .. } => {
                let degenerate = doc
                    .shapes()
                    .get(id)
                    .and_then(|shape| shape.geometry.shape_box())
                    .is_some_and(|b| b.width.abs() < 1.0 && b.height.abs() < 1.0);
                if degenerate {
                    // A plain click leaves nothing behind.
                    doc.shapes_mut().remove(id);
                    return Ok(None);
                }
                Ok(Some(Command::CommitShape { id }))
            }
            ShapeState::Moving { id, original, .. } | ShapeState::Resizing { id, original, .. } => {
                let Some(shape) = doc.shapes().get(id) else {
                    return Ok(None);
                };
                if shape.geometry == original {
                    Ok(None)
                } else {
                    Ok(Some(Command::UpdateShape {
                        id,
                        geometry: shape.geometry.clone(),
                    }))
                }
            }
        }
    }

    fn on_double_click(&mut self, _pos: Pos2, _doc: &mut Document, ctx: ToolContext<'_>) -> ToolResult {
        if self.polygon.is_building() {
            self.finish_polygon(ctx)
        } else {
            Ok(None)
        }
    }

    fn on_key(&mut self, key: EditorKey, doc: &mut Document, ctx: ToolContext<'_>) -> ToolResult {
        match key {
            EditorKey::Confirm if self.polygon.is_building() => self.finish_polygon(ctx),
            EditorKey::Cancel => {
                self.cancel(doc);
                Ok(None)
            }
            _ => Ok(None),
        }
    }

    fn interaction(&self) -> InteractionState {
        if self.polygon.is_building() {
            return InteractionState::PolygonBuilding;
        }
        InteractionState::Shape(match self.state {
            ShapeState::Idle => ShapePhase::Idle,
            ShapeState::Drawing { .. } => ShapePhase::Drawing,
            ShapeState::Moving { .. } => ShapePhase::Moving,
            ShapeState::Resizing { .. } => ShapePhase::Resizing,
        })
    }

    fn cursor_icon(&self, pos: Pos2, doc: &Document, ctx: ToolContext<'_>) -> CursorIcon {
        match &self.state {
            ShapeState::Resizing { handle, .. } => return handle.cursor_icon(),
            ShapeState::Moving { .. } => return CursorIcon::Grabbing,
            ShapeState::Drawing { .. } => return CursorIcon::Crosshair,
            ShapeState::Idle => {}
        }
        if self.polygon.is_building() {
            return CursorIcon::Crosshair;
        }
        let shapes = doc.shapes();
        if let Some(handle) = shapes
            .selected()
            .and_then(|s| handle_test(s, pos, ctx.config.handle_size))
        {
            handle.cursor_icon()
        } else if shapes.topmost_hit(pos, ctx.config.hit_tolerance).is_some() {
            CursorIcon::Move
        } else {
            CursorIcon::Crosshair
        }
    }
}

fn restore_selection(doc: &mut Document, prior: Option<ShapeId>) {
    let shapes = doc.shapes_mut();
    match prior {
        Some(id) => shapes.select(id),
        None => shapes.clear_selection(),
    }
}
