//! Shared utility functions.

mod text;

pub use text::{display_width, sanitize, truncate_to_width};
