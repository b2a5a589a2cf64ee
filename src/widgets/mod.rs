pub mod resize_handle;

pub use resize_handle::{handle_rect, Corner, CropHandle, ShapeHandle};
