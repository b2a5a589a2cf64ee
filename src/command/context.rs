use crate::document::Document;
use crate::render::TextRenderer;

/// What a command may touch while it executes.
pub struct CommandContext<'a> {
    pub document: &'a mut Document,
    pub text: &'a TextRenderer,
}

impl<'a> CommandContext<'a> {
    pub fn new(document: &'a mut Document, text: &'a TextRenderer) -> Self {
        Self { document, text }
    }
}
