use egui::{CursorIcon, Pos2, Rect, Vec2};

use crate::command::Command;
use crate::document::Document;
use crate::error::{EditorError, EditorResult};
use crate::geometry::hit_testing::rect_contains;
use crate::input::EditorKey;
use crate::state::{CropPhase, InteractionState};
use crate::tools::{Tool, ToolContext, ToolResult};
use crate::widgets::{handle_rect, CropHandle};

#[derive(Debug, Clone, PartialEq)]
pub enum CropState {
    Idle,
    /// Raw corners while dragging out a new rectangle.
    Creating { anchor: Pos2, current: Pos2 },
    Moving { original: Rect, start: Pos2 },
    Resizing {
        handle: CropHandle,
        original: Rect,
        start: Pos2,
    },
}

/// Interactive crop rectangle with eight resize handles.
#[derive(Debug, Clone)]
pub struct CropTool {
    state: CropState,
    rect: Option<Rect>,
}

impl Default for CropTool {
    fn default() -> Self {
        Self::new()
    }
}

fn clamp_point(pos: Pos2, bounds: Rect) -> Pos2 {
    pos.clamp(bounds.min, bounds.max)
}

/// Translation of `rect` by `delta`, clamped so it stays inside `bounds`.
pub fn moved_within(rect: Rect, delta: Vec2, bounds: Rect) -> Rect {
    let dx = delta
        .x
        .clamp(bounds.min.x - rect.min.x, (bounds.max.x - rect.max.x).max(bounds.min.x - rect.min.x));
    let dy = delta
        .y
        .clamp(bounds.min.y - rect.min.y, (bounds.max.y - rect.max.y).max(bounds.min.y - rect.min.y));
    rect.translate(Vec2::new(dx, dy))
}

/// Edge drag of `rect`, keeping opposite edges fixed, honoring `min_size` and `bounds`.
pub fn resized_within(rect: Rect, handle: CropHandle, delta: Vec2, bounds: Rect, min_size: f32) -> Rect {
    let mut r = rect;
    if handle.moves_left() {
        r.min.x = (rect.min.x + delta.x)
            .min(rect.max.x - min_size)
            .max(bounds.min.x);
    }
    if handle.moves_right() {
        r.max.x = (rect.max.x + delta.x)
            .max(rect.min.x + min_size)
            .min(bounds.max.x);
    }
    if handle.moves_top() {
        r.min.y = (rect.min.y + delta.y)
            .min(rect.max.y - min_size)
            .max(bounds.min.y);
    }
    if handle.moves_bottom() {
        r.max.y = (rect.max.y + delta.y)
            .max(rect.min.y + min_size)
            .min(bounds.max.y);
    }
    r
}

impl CropTool {
    pub fn new() -> Self {
        Self {
            state: CropState::Idle,
            rect: None,
        }
    }

    pub fn state(&self) -> &CropState {
        &self.state
    }

    /// The rectangle as currently shown, normalized.
    pub fn rect(&self) -> Option<Rect> {
        match self.state {
            CropState::Creating { anchor, current } => Some(Rect::from_two_pos(anchor, current)),
            _ => self.rect,
        }
    }

    fn bounds(doc: &Document) -> EditorResult<Rect> {
        let surface = doc.surface()?;
        Ok(Rect::from_min_size(
            Pos2::ZERO,
            Vec2::new(surface.width() as f32, surface.height() as f32),
        ))
    }

    fn handle_at(&self, pos: Pos2, handle_size: f32) -> Option<CropHandle> {
        let rect = self.rect?;
        CropHandle::ALL
            .into_iter()
            .find(|h| rect_contains(handle_rect(h.position_on(rect), handle_size), pos))
    }

    fn confirm(&mut self) -> ToolResult {
        let rect = self.rect.ok_or(EditorError::EmptyCropRegion)?;
        if rect.width() < 1.0 || rect.height() < 1.0 {
            return Err(EditorError::EmptyCropRegion);
        }
        log::info!("✂️ Applying crop {rect:?}");
        self.rect = None;
        self.state = CropState::Idle;
        Ok(Some(Command::Crop(rect)))
    }
}

impl Tool for CropTool {
    fn name(&self) -> &'static str {
        "Crop"
    }

    fn cancel(&mut self, _doc: &mut Document) {
        if self.rect.is_some() || self.state != CropState::Idle {
            log::debug!("Crop cancelled");
        }
        self.state = CropState::Idle;
        self.rect = None;
    }

    fn on_pointer_down(&mut self, pos: Pos2, doc: &mut Document, ctx: ToolContext<'_>) -> ToolResult {
        let bounds = Self::bounds(doc)?;

        if let Some(handle) = self.handle_at(pos, ctx.config.handle_size) {
            if let Some(original) = self.rect {
                self.state = CropState::Resizing {
                    handle,
                    original,
                    start: pos,
                };
                return Ok(None);
            }
        }

        if let Some(original) = self.rect.filter(|r| rect_contains(*r, pos)) {
            self.state = CropState::Moving {
                original,
                start: pos,
            };
            return Ok(None);
        }

        let anchor = clamp_point(pos, bounds);
        self.rect = None;
        self.state = CropState::Creating {
            anchor,
            current: anchor,
        };
        Ok(None)
    }

    fn on_pointer_move(&mut self, pos: Pos2, doc: &mut Document, ctx: ToolContext<'_>) -> ToolResult {
        if self.state == CropState::Idle {
            return Ok(None);
        }
        let bounds = Self::bounds(doc)?;
        match &mut self.state {
            CropState::Idle => {}
            CropState::Creating { current, .. } => *current = clamp_point(pos, bounds),
            CropState::Moving { original, start } => {
                self.rect = Some(moved_within(*original, pos - *start, bounds));
            }
            CropState::Resizing {
                handle,
                original,
                start,
            } => {
                self.rect = Some(resized_within(
                    *original,
                    *handle,
                    pos - *start,
                    bounds,
                    ctx.config.min_crop_size,
                ));
            }
        }
        Ok(None)
    }

    fn on_pointer_up(&mut self, _pos: Pos2, _doc: &mut Document, _ctx: ToolContext<'_>) -> ToolResult {
        if let CropState::Creating { anchor, current } =
            std::mem::replace(&mut self.state, CropState::Idle)
        {
            let rect = Rect::from_two_pos(anchor, current);
            // A plain click leaves no rectangle behind.
            self.rect = (rect.width() >= 1.0 && rect.height() >= 1.0).then_some(rect);
        }
        Ok(None)
    }

    fn on_key(&mut self, key: EditorKey, doc: &mut Document, _ctx: ToolContext<'_>) -> ToolResult {
        match key {
            EditorKey::Confirm => self.confirm(),
            EditorKey::Cancel => {
                self.cancel(doc);
                Ok(None)
            }
            EditorKey::Undo | EditorKey::Redo => Ok(None),
        }
    }

    fn interaction(&self) -> InteractionState {
        InteractionState::Crop(match self.state {
            CropState::Idle => CropPhase::Idle,
            CropState::Creating { .. } => CropPhase::Creating,
            CropState::Moving { .. } => CropPhase::Moving,
            CropState::Resizing { .. } => CropPhase::Resizing,
        })
    }

    fn cursor_icon(&self, pos: Pos2, _doc: &Document, ctx: ToolContext<'_>) -> CursorIcon {
        match &self.state {
            CropState::Resizing { handle, .. } => handle.cursor_icon(),
            CropState::Moving { .. } => CursorIcon::Grabbing,
            CropState::Creating { .. } => CursorIcon::Crosshair,
            CropState::Idle => {
                if let Some(handle) = self.handle_at(pos, ctx.config.handle_size) {
                    handle.cursor_icon()
                } else if self.rect.is_some_and(|r| rect_contains(r, pos)) {
                    CursorIcon::Move
                } else {
                    CursorIcon::Crosshair
                }
            }
        }
    }
}
