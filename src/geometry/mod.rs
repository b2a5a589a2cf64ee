pub mod hit_testing;
pub mod transform;

pub use hit_testing::{handle_test, hit_test};
