mod context;
mod editor_state;

pub use context::{EditorContext, EditorStatus};
pub use editor_state::{CropPhase, InteractionState, ShapePhase};
