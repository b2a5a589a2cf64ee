mod commands;
mod context;
mod history;

pub use commands::{crop_op, Command};
pub use context::CommandContext;
pub use history::{History, Snapshot};
