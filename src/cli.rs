use std::path::PathBuf;

use clap::Parser;

use eframe_image_editor::EditorConfig;

/// Raster and vector image editor.
#[derive(Parser, Debug)]
#[command(name = "image_editor", version, about = "Edit an image with shapes, crops and color filters")]
pub struct CliArgs {
    /// Image to open at startup. Images can also be dropped onto the window.
    #[arg(value_name = "IMAGE")]
    pub image: Option<PathBuf>,

    /// JSON file overriding the editor defaults (history size, handle size, ...).
    #[arg(short, long, value_name = "FILE", env = "IMAGE_EDITOR_CONFIG")]
    pub config: Option<PathBuf>,
}

impl CliArgs {
    /// The config named on the command line, or defaults if there is none or it can't be read.
    pub fn load_config(&self) -> EditorConfig {
        let Some(path) = &self.config else {
            return EditorConfig::default();
        };
        match EditorConfig::from_path(path) {
            Ok(config) => {
                log::info!("⚙️ Loaded config from {}", path.display());
                config
            }
            Err(err) => {
                log::warn!("Ignoring config {}: {err}", path.display());
                EditorConfig::default()
            }
        }
    }
}
