mod tool_button;

pub use tool_button::{tool_icon, ToolButton};
