//! The main context for the editor, owning the document, its history and the
//! active tool.
//!
//! The `EditorContext` is the primary interface of the editing engine. Hosts
//! feed it normalized [`InputEvent`]s and high-level commands (tool changes,
//! filters, geometric operations); it routes pointer input to the active tool,
//! executes the finalized [`Command`]s tools produce and records exactly one
//! history snapshot per successful edit.
//!
//! # Example
//!
//! ```rust,no_run
//! use eframe_image_editor::{EditorContext, InputEvent, ToolKind};
//! use egui::Pos2;
//!
//! let mut editor = EditorContext::default();
//! editor.load_image(image::RgbaImage::new(640, 480))?;
//! editor.set_tool(ToolKind::Shape);
//! editor.handle_input(InputEvent::PointerDown(Pos2::new(10.0, 10.0)))?;
//! editor.handle_input(InputEvent::PointerMove(Pos2::new(60.0, 40.0)))?;
//! editor.handle_input(InputEvent::PointerUp(Pos2::new(60.0, 40.0)))?;
//! assert!(editor.can_undo());
//! # Ok::<(), eframe_image_editor::EditorError>(())
//! ```

use egui::{CursorIcon, Pos2};
use image::RgbaImage;

use super::InteractionState;
use crate::command::{Command, CommandContext, History};
use crate::config::EditorConfig;
use crate::document::Document;
use crate::error::{EditorError, EditorResult};
use crate::filters::{FilterParams, Preset};
use crate::input::{EditorKey, InputEvent};
use crate::render::TextRenderer;
use crate::settings::StyleSettings;
use crate::surface::GeometricOp;
use crate::tools::{Tool, ToolContext, ToolKind, ToolType};

/// Read-only summary for status bars.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EditorStatus {
    pub width: u32,
    pub height: u32,
    pub image_loaded: bool,
    pub shape_count: usize,
    pub can_undo: bool,
    pub can_redo: bool,
    pub tool: ToolKind,
    pub interaction: InteractionState,
}

#[derive(Debug)]
pub struct EditorContext {
    document: Document,
    history: History,
    tool: ToolType,
    settings: StyleSettings,
    config: EditorConfig,
    filters: FilterParams,
    /// The image as first loaded, for reset.
    original: Option<RgbaImage>,
    text: TextRenderer,
    view_scale: f32,
}

impl Default for EditorContext {
    fn default() -> Self {
        Self::new(EditorConfig::default(), StyleSettings::default())
    }
}

impl EditorContext {
    pub fn new(config: EditorConfig, settings: StyleSettings) -> Self {
        Self {
            document: Document::new(),
            history: History::new(config.history_capacity),
            tool: ToolType::default(),
            settings,
            config,
            filters: FilterParams::NEUTRAL,
            original: None,
            text: TextRenderer::new(),
            view_scale: 1.0,
        }
    }

    pub fn document(&self) -> &Document {
        &self.document
    }

    pub fn history(&self) -> &History {
        &self.history
    }

    pub fn settings(&self) -> &StyleSettings {
        &self.settings
    }

    pub fn settings_mut(&mut self) -> &mut StyleSettings {
        &mut self.settings
    }

    pub fn config(&self) -> &EditorConfig {
        &self.config
    }

    pub fn filter_params(&self) -> FilterParams {
        self.filters
    }

    pub fn tool(&self) -> &ToolType {
        &self.tool
    }

    pub fn tool_kind(&self) -> ToolKind {
        self.tool.kind()
    }

    pub fn interaction(&self) -> InteractionState {
        self.tool.interaction()
    }

    pub fn is_loaded(&self) -> bool {
        self.document.is_loaded()
    }

    pub fn can_undo(&self) -> bool {
        self.history.can_undo()
    }

    pub fn can_redo(&self) -> bool {
        self.history.can_redo()
    }

    pub fn status(&self) -> EditorStatus {
        let (width, height) = self.document.dimensions();
        EditorStatus {
            width,
            height,
            image_loaded: self.is_loaded(),
            shape_count: self.document.shapes().len(),
            can_undo: self.can_undo(),
            can_redo: self.can_redo(),
            tool: self.tool_kind(),
            interaction: self.interaction(),
        }
    }

    /// Screen points per raster pixel, as the host currently displays the canvas.
    pub fn set_view_scale(&mut self, scale: f32) {
        if scale.is_finite() && scale > 0.0 {
            self.view_scale = scale;
        }
    }

    pub fn view_scale(&self) -> f32 {
        self.view_scale
    }

    fn tool_context(&self) -> ToolContext<'_> {
        ToolContext {
            settings: &self.settings,
            config: &self.config,
            view_scale: self.view_scale,
        }
    }

    pub fn cursor_icon(&self, pos: Pos2) -> CursorIcon {
        if !self.is_loaded() {
            return CursorIcon::Default;
        }
        self.tool.cursor_icon(pos, &self.document, self.tool_context())
    }

    /// Starts a new session on `pixels`: empty overlay, history holding just this state.
    pub fn load_image(&mut self, pixels: RgbaImage) -> EditorResult<()> {
        let original = pixels.clone();
        self.tool.cancel(&mut self.document);
        self.document.load(pixels)?;
        self.original = Some(original);
        self.filters = FilterParams::NEUTRAL;
        self.history.clear();
        self.record_snapshot()?;
        let (w, h) = self.document.dimensions();
        log::info!("🖼️ Loaded image {w}x{h}");
        Ok(())
    }

    /// Back to the image as first loaded, with history cleared.
    pub fn reset(&mut self) -> EditorResult<()> {
        let original = self.original.clone().ok_or(EditorError::NoImageLoaded)?;
        self.tool.cancel(&mut self.document);
        self.document.load(original)?;
        self.filters = FilterParams::NEUTRAL;
        self.history.clear();
        self.record_snapshot()?;
        log::info!("Reset to original image");
        Ok(())
    }

    /// Switch tools, abandoning whatever the previous tool had in progress.
    pub fn set_tool(&mut self, kind: ToolKind) {
        if self.tool.kind() == kind {
            return;
        }
        self.tool.cancel(&mut self.document);
        log::info!("🔧 Tool: {} → {}", self.tool.name(), kind.label());
        self.tool = ToolType::new(kind);
    }

    /// Route one input event. Validation failures leave every piece of state as it was.
    pub fn handle_input(&mut self, event: InputEvent) -> EditorResult<()> {
        if !self.is_loaded() {
            return Err(EditorError::NoImageLoaded);
        }

        match event {
            InputEvent::Key(EditorKey::Undo) => {
                self.undo()?;
                return Ok(());
            }
            InputEvent::Key(EditorKey::Redo) => {
                self.redo()?;
                return Ok(());
            }
            InputEvent::PointerDown(_) => self.settle_filters(),
            _ => {}
        }

        let before = self.tool.interaction();
        let ctx = ToolContext {
            settings: &self.settings,
            config: &self.config,
            view_scale: self.view_scale,
        };
        let doc = &mut self.document;
        let outcome = match event {
            InputEvent::PointerDown(pos) => self.tool.on_pointer_down(pos, doc, ctx),
            InputEvent::PointerMove(pos) => self.tool.on_pointer_move(pos, doc, ctx),
            InputEvent::PointerUp(pos) => self.tool.on_pointer_up(pos, doc, ctx),
            InputEvent::DoubleClick(pos) => self.tool.on_double_click(pos, doc, ctx),
            InputEvent::Key(key) => self.tool.on_key(key, doc, ctx),
        };

        let result = match outcome {
            Ok(Some(command)) => self.execute(command),
            Ok(None) => Ok(()),
            Err(err) => {
                log::warn!("{} rejected {event:?}: {err}", self.tool.name());
                Err(err)
            }
        };

        let after = self.tool.interaction();
        if before != after {
            if before.can_transition_to(&after) {
                log::debug!("Interaction {before} → {after}");
            } else {
                log::warn!("Unexpected interaction change {before} → {after}");
            }
        }
        result
    }

    /// Execute a finalized edit and record it.
    pub fn execute(&mut self, command: Command) -> EditorResult<()> {
        if !matches!(command, Command::ApplyFilters(_)) {
            self.settle_filters();
        }
        let mut ctx = CommandContext::new(&mut self.document, &self.text);
        if let Err(err) = command.execute(&mut ctx) {
            log::warn!("{} failed: {err}", command.name());
            return Err(err);
        }
        if command.ends_tool() {
            self.tool = ToolType::default();
        }
        self.record_snapshot()?;
        log::info!("✅ {} ({} snapshots)", command.name(), self.history.len());
        Ok(())
    }

    fn record_snapshot(&mut self) -> EditorResult<()> {
        let snapshot = self.document.snapshot()?;
        self.history.push(snapshot);
        Ok(())
    }

    /// A filter preview folds into whatever edit comes next; the sliders go back to neutral.
    fn settle_filters(&mut self) {
        if let Ok(surface) = self.document.surface_mut() {
            if surface.has_pending_filter() {
                surface.settle();
                self.filters = FilterParams::NEUTRAL;
            }
        }
    }

    fn discard_filters(&mut self) {
        if let Ok(surface) = self.document.surface_mut() {
            surface.discard_filter();
        }
        self.filters = FilterParams::NEUTRAL;
    }

    /// Returns true if a snapshot was restored.
    pub fn undo(&mut self) -> EditorResult<bool> {
        if !self.is_loaded() {
            return Err(EditorError::NoImageLoaded);
        }
        self.tool.cancel(&mut self.document);
        self.discard_filters();
        match self.history.undo() {
            Some(snapshot) => {
                self.document.restore(snapshot)?;
                log::info!("↩️ Undo (cursor {:?})", self.history.cursor());
                Ok(true)
            }
            None => Ok(false),
        }
    }

    /// Returns true if a snapshot was restored.
    pub fn redo(&mut self) -> EditorResult<bool> {
        if !self.is_loaded() {
            return Err(EditorError::NoImageLoaded);
        }
        self.tool.cancel(&mut self.document);
        self.discard_filters();
        match self.history.redo() {
            Some(snapshot) => {
                self.document.restore(snapshot)?;
                log::info!("↪️ Redo (cursor {:?})", self.history.cursor());
                Ok(true)
            }
            None => Ok(false),
        }
    }

    /// Live filter preview from the committed pixels. Never recorded.
    pub fn preview_filters(&mut self, params: FilterParams) -> EditorResult<()> {
        self.document.surface()?;
        self.tool.cancel(&mut self.document);
        self.document.burn_shapes()?;
        self.filters = params;
        self.document
            .surface_mut()?
            .apply_color_transform(|rgb| params.apply(rgb));
        Ok(())
    }

    /// Commits the current filter preview as one history entry.
    pub fn apply_filters(&mut self) -> EditorResult<()> {
        self.tool.cancel(&mut self.document);
        self.execute(Command::ApplyFilters(self.filters))?;
        self.filters = FilterParams::NEUTRAL;
        Ok(())
    }

    pub fn apply_preset(&mut self, preset: Preset) -> EditorResult<()> {
        self.tool.cancel(&mut self.document);
        self.execute(Command::ApplyPreset(preset))
    }

    pub fn apply_geometric_transform(&mut self, op: GeometricOp) -> EditorResult<()> {
        self.tool.cancel(&mut self.document);
        self.execute(Command::Transform(op))
    }

    pub fn flip_horizontal(&mut self) -> EditorResult<()> {
        self.apply_geometric_transform(GeometricOp::FlipHorizontal)
    }

    pub fn flip_vertical(&mut self) -> EditorResult<()> {
        self.apply_geometric_transform(GeometricOp::FlipVertical)
    }

    pub fn rotate_90(&mut self) -> EditorResult<()> {
        self.apply_geometric_transform(GeometricOp::Rotate90)
    }

    pub fn resize_to(&mut self, width: u32, height: u32) -> EditorResult<()> {
        self.apply_geometric_transform(GeometricOp::ResizeTo { width, height })
    }

    /// Height that keeps the current aspect ratio at `width`.
    pub fn aspect_height(&self, width: u32) -> EditorResult<u32> {
        let surface = self.document.surface()?;
        let ratio = surface.height() as f64 / surface.width() as f64;
        Ok(((width as f64 * ratio).round() as u32).max(1))
    }

    /// Rasterize all pending shapes as one recorded edit.
    pub fn burn_shapes(&mut self) -> EditorResult<()> {
        self.tool.cancel(&mut self.document);
        self.execute(Command::BurnShapes)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Rgba;

    fn loaded() -> EditorContext {
        let mut editor = EditorContext::default();
        editor
            .load_image(RgbaImage::from_pixel(40, 20, Rgba([100, 100, 100, 255])))
            .unwrap();
        editor
    }

    fn drag(editor: &mut EditorContext, from: (f32, f32), to: (f32, f32)) {
        editor.handle_input(InputEvent::PointerDown(Pos2::new(from.0, from.1))).unwrap();
        editor.handle_input(InputEvent::PointerMove(Pos2::new(to.0, to.1))).unwrap();
        editor.handle_input(InputEvent::PointerUp(Pos2::new(to.0, to.1))).unwrap();
    }

    #[test]
    fn input_before_load_is_rejected() {
        let mut editor = EditorContext::default();
        let err = editor.handle_input(InputEvent::PointerDown(Pos2::ZERO)).unwrap_err();
        assert!(matches!(err, EditorError::NoImageLoaded));
        assert!(matches!(editor.undo(), Err(EditorError::NoImageLoaded)));
    }

    #[test]
    fn load_leaves_a_single_snapshot() {
        let editor = loaded();
        assert_eq!(editor.history().len(), 1);
        assert!(!editor.can_undo());
        assert_eq!(editor.status().width, 40);
    }

    #[test]
    fn shape_drag_records_one_snapshot() {
        let mut editor = loaded();
        editor.set_tool(ToolKind::Shape);
        drag(&mut editor, (5.0, 5.0), (25.0, 15.0));
        assert_eq!(editor.history().len(), 2);
        assert_eq!(editor.document().shapes().len(), 1);

        assert!(editor.undo().unwrap());
        assert!(editor.document().shapes().is_empty());
        assert!(editor.redo().unwrap());
        assert_eq!(editor.document().shapes().len(), 1);
    }

    #[test]
    fn switching_tools_abandons_a_drag() {
        let mut editor = loaded();
        editor.set_tool(ToolKind::Shape);
        editor.handle_input(InputEvent::PointerDown(Pos2::new(5.0, 5.0))).unwrap();
        editor.handle_input(InputEvent::PointerMove(Pos2::new(25.0, 15.0))).unwrap();
        editor.set_tool(ToolKind::Draw);
        assert!(editor.document().shapes().is_empty());
        assert_eq!(editor.history().len(), 1);
        assert_eq!(editor.interaction(), InteractionState::Idle);
    }

    #[test]
    fn view_scale_ignores_degenerate_values() {
        let mut editor = EditorContext::default();
        editor.set_view_scale(0.5);
        editor.set_view_scale(0.0);
        editor.set_view_scale(f32::NAN);
        assert_eq!(editor.view_scale(), 0.5);
    }

    #[test]
    fn filter_previews_do_not_compound() {
        let mut editor = loaded();
        let brighter = FilterParams {
            brightness: 50.0,
            ..FilterParams::NEUTRAL
        };
        editor.preview_filters(brighter).unwrap();
        let once = *editor.document().surface().unwrap().pixels().get_pixel(0, 0);
        editor.preview_filters(brighter).unwrap();
        let twice = *editor.document().surface().unwrap().pixels().get_pixel(0, 0);
        assert_eq!(once, twice);
        assert_eq!(editor.history().len(), 1);

        editor.apply_filters().unwrap();
        assert_eq!(editor.history().len(), 2);
        assert!(editor.filter_params().is_neutral());
    }

    #[test]
    fn undo_discards_a_filter_preview() {
        let mut editor = loaded();
        editor
            .preview_filters(FilterParams {
                brightness: -80.0,
                ..FilterParams::NEUTRAL
            })
            .unwrap();
        editor.undo().unwrap();
        let pixel = editor.document().surface().unwrap().pixels().get_pixel(0, 0).0;
        assert_eq!(pixel, [100, 100, 100, 255]);
    }

    #[test]
    fn crop_confirm_releases_the_tool() {
        let mut editor = loaded();
        editor.set_tool(ToolKind::Crop);
        drag(&mut editor, (0.0, 0.0), (20.0, 10.0));
        editor.handle_input(InputEvent::Key(EditorKey::Confirm)).unwrap();
        assert_eq!(editor.document().dimensions(), (20, 10));
        assert_eq!(editor.tool_kind(), ToolKind::None);
        assert_eq!(editor.history().len(), 2);
    }

    #[test]
    fn rejected_resize_changes_nothing() {
        let mut editor = loaded();
        assert!(matches!(
            editor.resize_to(0, 10),
            Err(EditorError::InvalidDimensions { .. })
        ));
        assert_eq!(editor.document().dimensions(), (40, 20));
        assert_eq!(editor.history().len(), 1);
    }

    #[test]
    fn aspect_height_follows_ratio() {
        let editor = loaded();
        assert_eq!(editor.aspect_height(80).unwrap(), 40);
        assert_eq!(editor.aspect_height(1).unwrap(), 1);
    }

    #[test]
    fn reset_returns_to_the_loaded_image() {
        let mut editor = loaded();
        editor.flip_horizontal().unwrap();
        editor.rotate_90().unwrap();
        editor.reset().unwrap();
        assert_eq!(editor.document().dimensions(), (40, 20));
        assert_eq!(editor.history().len(), 1);
    }
}
