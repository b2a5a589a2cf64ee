#![warn(clippy::all, rust_2018_idioms)]

pub mod app;
pub mod command;
pub mod components;
pub mod config;
pub mod document;
pub mod error;
pub mod file_handler;
pub mod filters;
pub mod geometry;
pub mod input;
pub mod panels;
pub mod render;
pub mod settings;
pub mod shape;
pub mod state;
pub mod surface;
pub mod tools;
pub mod widgets;

pub use app::EditorApp;
pub use command::{Command, History, Snapshot};
pub use config::EditorConfig;
pub use document::Document;
pub use error::{EditorError, EditorResult};
pub use filters::{FilterParams, Preset};
pub use input::{EditorKey, InputEvent, InputHandler};
pub use render::Compositor;
pub use settings::StyleSettings;
pub use shape::{ArrowHeads, Shape, ShapeGeometry, ShapeId, ShapeKind, ShapeList, ShapeStyle};
pub use state::{EditorContext, EditorStatus, InteractionState};
pub use surface::{GeometricOp, RasterSurface};
pub use tools::{Tool, ToolKind, ToolType};
