use std::path::Path;

use egui::DroppedFile;
use image::RgbaImage;

use crate::error::EditorResult;

/// Picks up images dropped onto the window and decodes them for loading.
#[derive(Debug, Default)]
pub struct FileHandler {
    last_loaded: Option<String>,
}

impl FileHandler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Display name of the most recently loaded file.
    pub fn last_loaded(&self) -> Option<&str> {
        self.last_loaded.as_deref()
    }

    /// Decodes the first dropped image this frame, if any.
    ///
    /// Returns `None` when nothing usable was dropped. Non-image files are
    /// skipped with a warning.
    pub fn take_dropped_image(&mut self, ctx: &egui::Context) -> Option<EditorResult<RgbaImage>> {
        let dropped = ctx.input(|i| i.raw.dropped_files.clone());
        for file in &dropped {
            let name = file_name(file);
            if !is_image_file(file) {
                log::warn!("Dropped file is not a supported image: {name}");
                continue;
            }
            let decoded = match (&file.bytes, &file.path) {
                (Some(bytes), _) => {
                    log::info!("📂 Decoding dropped image {name} ({} bytes)", bytes.len());
                    decode_image_bytes(bytes)
                }
                (None, Some(path)) => load_image_file(path),
                (None, None) => continue,
            };
            if decoded.is_ok() {
                self.last_loaded = Some(name);
            }
            return Some(decoded);
        }
        None
    }

    pub fn open(&mut self, path: &Path) -> EditorResult<RgbaImage> {
        let pixels = load_image_file(path)?;
        self.last_loaded = Some(path.display().to_string());
        Ok(pixels)
    }
}

fn file_name(file: &DroppedFile) -> String {
    if let Some(path) = &file.path {
        path.display().to_string()
    } else if !file.name.is_empty() {
        file.name.clone()
    } else {
        "unknown".to_owned()
    }
}

/// MIME type first, then the extension.
pub fn is_image_file(file: &DroppedFile) -> bool {
    if !file.mime.is_empty() {
        return file.mime.starts_with("image/");
    }
    file.path.as_deref().is_some_and(has_image_extension)
}

pub fn has_image_extension(path: &Path) -> bool {
    path.extension()
        .map(|ext| ext.to_string_lossy().to_lowercase())
        .is_some_and(|ext| matches!(ext.as_str(), "png" | "jpg" | "jpeg" | "gif" | "webp" | "bmp"))
}

pub fn load_image_file(path: &Path) -> EditorResult<RgbaImage> {
    log::info!("📂 Opening {}", path.display());
    Ok(image::open(path)?.to_rgba8())
}

pub fn decode_image_bytes(bytes: &[u8]) -> EditorResult<RgbaImage> {
    Ok(image::load_from_memory(bytes)?.to_rgba8())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;
    use std::path::PathBuf;

    #[test]
    fn decodes_png_bytes() {
        let img = RgbaImage::from_pixel(3, 2, image::Rgba([1, 2, 3, 255]));
        let mut bytes = Vec::new();
        img.write_to(&mut Cursor::new(&mut bytes), image::ImageFormat::Png)
            .unwrap();
        let decoded = decode_image_bytes(&bytes).unwrap();
        assert_eq!(decoded.dimensions(), (3, 2));
        assert_eq!(decoded.get_pixel(2, 1).0, [1, 2, 3, 255]);
    }

    #[test]
    fn garbage_bytes_are_an_image_error() {
        assert!(matches!(
            decode_image_bytes(b"not an image"),
            Err(crate::error::EditorError::Image(_))
        ));
    }

    #[test]
    fn recognizes_image_extensions() {
        assert!(has_image_extension(Path::new("photo.JPG")));
        assert!(!has_image_extension(Path::new("notes.txt")));

        let dropped = DroppedFile {
            path: Some(PathBuf::from("scan.webp")),
            ..Default::default()
        };
        assert!(is_image_file(&dropped));
    }
}
