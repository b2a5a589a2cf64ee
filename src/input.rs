use egui::{Context, Key, PointerButton, Pos2, Rect, Vec2};

/// Keyboard commands understood by the editor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EditorKey {
    /// Enter: apply a crop or finish a polygon.
    Confirm,
    /// Escape: abandon the current interaction.
    Cancel,
    Undo,
    Redo,
}

/// Input in raster coordinates, as consumed by the editor core.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum InputEvent {
    PointerDown(Pos2),
    PointerMove(Pos2),
    PointerUp(Pos2),
    DoubleClick(Pos2),
    Key(EditorKey),
}

/// Converts raw egui input over the canvas widget into [`InputEvent`]s.
///
/// The raster is shown scaled into `canvas_rect`; positions are mapped back
/// into pixel space before they reach the editor.
#[derive(Debug, Clone)]
pub struct InputHandler {
    canvas_rect: Rect,
    image_size: Vec2,
    last_pointer_pos: Option<Pos2>,
    pointer_down: bool,
}

impl Default for InputHandler {
    fn default() -> Self {
        Self::new(Rect::NOTHING, Vec2::ZERO)
    }
}

impl InputHandler {
    pub fn new(canvas_rect: Rect, image_size: Vec2) -> Self {
        Self {
            canvas_rect,
            image_size,
            last_pointer_pos: None,
            pointer_down: false,
        }
    }

    /// Update the on-screen placement of the raster (e.g. if window is resized)
    pub fn set_canvas(&mut self, canvas_rect: Rect, image_size: Vec2) {
        self.canvas_rect = canvas_rect;
        self.image_size = image_size;
    }

    pub fn canvas_rect(&self) -> Rect {
        self.canvas_rect
    }

    pub fn image_size(&self) -> Vec2 {
        self.image_size
    }

    /// Screen-space → raster-space.
    pub fn to_raster(&self, screen: Pos2) -> Option<Pos2> {
        if !self.canvas_rect.is_positive() || self.image_size.x <= 0.0 || self.image_size.y <= 0.0 {
            return None;
        }
        let scale = self.canvas_rect.size() / self.image_size;
        let local = screen - self.canvas_rect.min;
        Some(Pos2::new(local.x / scale.x, local.y / scale.y))
    }

    /// Raster-space → screen-space.
    pub fn to_screen(&self, raster: Pos2) -> Pos2 {
        let scale = self.canvas_rect.size() / self.image_size;
        self.canvas_rect.min + Vec2::new(raster.x * scale.x, raster.y * scale.y)
    }

    /// Process raw egui input and generate editor events.
    ///
    /// Presses only count when they start inside the canvas; once a drag has
    /// started, moves and the release are reported wherever the pointer goes.
    pub fn process_input(&mut self, ctx: &Context, keyboard_free: bool) -> Vec<InputEvent> {
        let mut events = Vec::new();

        ctx.input(|input| {
            let hover = input.pointer.hover_pos();
            let in_canvas = hover.is_some_and(|p| self.canvas_rect.contains(p));

            if let Some(pos) = hover {
                if Some(pos) != self.last_pointer_pos && (in_canvas || self.pointer_down) {
                    if let Some(raster) = self.to_raster(pos) {
                        events.push(InputEvent::PointerMove(raster));
                    }
                }
                self.last_pointer_pos = Some(pos);
            }

            let button = PointerButton::Primary;
            if input.pointer.button_pressed(button) && in_canvas {
                if let Some(raster) = hover.and_then(|p| self.to_raster(p)) {
                    self.pointer_down = true;
                    events.push(InputEvent::PointerDown(raster));
                }
            }
            if input.pointer.button_released(button) && self.pointer_down {
                self.pointer_down = false;
                if let Some(raster) = self.last_pointer_pos.and_then(|p| self.to_raster(p)) {
                    events.push(InputEvent::PointerUp(raster));
                }
            }
            if input.pointer.button_double_clicked(button) && in_canvas {
                if let Some(raster) = hover.and_then(|p| self.to_raster(p)) {
                    events.push(InputEvent::DoubleClick(raster));
                }
            }

            if keyboard_free {
                if input.key_pressed(Key::Enter) {
                    events.push(InputEvent::Key(EditorKey::Confirm));
                }
                if input.key_pressed(Key::Escape) {
                    events.push(InputEvent::Key(EditorKey::Cancel));
                }
                if input.modifiers.command && input.key_pressed(Key::Z) {
                    if input.modifiers.shift {
                        events.push(InputEvent::Key(EditorKey::Redo));
                    } else {
                        events.push(InputEvent::Key(EditorKey::Undo));
                    }
                }
                if input.modifiers.command && input.key_pressed(Key::Y) {
                    events.push(InputEvent::Key(EditorKey::Redo));
                }
            }
        });

        events
    }
}
