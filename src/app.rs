use std::path::PathBuf;

use image::RgbaImage;

use crate::config::EditorConfig;
use crate::error::EditorResult;
use crate::file_handler::FileHandler;
use crate::input::InputHandler;
use crate::panels::{central_panel, tools_panel};
use crate::render::Compositor;
use crate::settings::StyleSettings;
use crate::state::EditorContext;

/// Values typed into the resize form, kept until applied.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResizeForm {
    pub width: u32,
    pub height: u32,
    pub maintain_aspect: bool,
}

impl Default for ResizeForm {
    fn default() -> Self {
        Self {
            width: 0,
            height: 0,
            maintain_aspect: true,
        }
    }
}

/// The eframe host around an [`EditorContext`].
pub struct EditorApp {
    editor: EditorContext,
    compositor: Compositor,
    input: InputHandler,
    files: FileHandler,
    pub(crate) resize: ResizeForm,
    last_error: Option<String>,
}

impl EditorApp {
    /// Called once before the first frame.
    pub fn new(cc: &eframe::CreationContext<'_>, config: EditorConfig, image_path: Option<PathBuf>) -> Self {
        // Load previous style settings (if any).
        let settings: StyleSettings = cc
            .storage
            .and_then(|storage| eframe::get_value(storage, eframe::APP_KEY))
            .unwrap_or_default();

        let mut app = Self::with_editor(EditorContext::new(config, settings));
        if let Some(path) = image_path {
            let result = app.files.open(&path).and_then(|pixels| app.open_image(pixels));
            app.report(result);
        }
        app
    }

    pub fn with_editor(editor: EditorContext) -> Self {
        Self {
            editor,
            compositor: Compositor::new(),
            input: InputHandler::default(),
            files: FileHandler::new(),
            resize: ResizeForm::default(),
            last_error: None,
        }
    }

    pub fn editor(&self) -> &EditorContext {
        &self.editor
    }

    pub fn editor_mut(&mut self) -> &mut EditorContext {
        &mut self.editor
    }

    pub fn last_error(&self) -> Option<&str> {
        self.last_error.as_deref()
    }

    pub fn loaded_file(&self) -> Option<&str> {
        self.files.last_loaded()
    }

    pub fn open_image(&mut self, pixels: RgbaImage) -> EditorResult<()> {
        self.editor.load_image(pixels)?;
        self.sync_resize_form();
        Ok(())
    }

    /// Puts the current raster size back into the resize form.
    pub(crate) fn sync_resize_form(&mut self) {
        let (width, height) = self.editor.document().dimensions();
        self.resize.width = width;
        self.resize.height = height;
    }

    /// Remember the outcome of an operation for the status area.
    pub(crate) fn report(&mut self, result: EditorResult<()>) {
        match result {
            Ok(()) => self.last_error = None,
            Err(err) => {
                log::warn!("❌ {err}");
                self.last_error = Some(err.to_string());
            }
        }
    }

    pub(crate) fn parts_mut(&mut self) -> (&mut EditorContext, &mut Compositor, &mut InputHandler) {
        (&mut self.editor, &mut self.compositor, &mut self.input)
    }

    fn handle_dropped_files(&mut self, ctx: &egui::Context) {
        if let Some(decoded) = self.files.take_dropped_image(ctx) {
            let result = decoded.and_then(|pixels| self.open_image(pixels));
            self.report(result);
        }
    }
}

impl eframe::App for EditorApp {
    /// Called by the frame work to save state before shutdown.
    fn save(&mut self, storage: &mut dyn eframe::Storage) {
        eframe::set_value(storage, eframe::APP_KEY, self.editor.settings());
    }

    /// Called each time the UI needs repainting, which may be many times per second.
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.handle_dropped_files(ctx);
        tools_panel(self, ctx);
        central_panel(self, ctx);
    }
}
