//! Terminal User Interface module.
//!
//! This module provides the TUI for the news client, including:
//! - Main event loop (`run`)
//! - Input handling for browsing and the status-line input modes
//! - Background task event processing
//! - Rendering for the source selector, article feed, and chrome
//!
//! # Module Structure
//!
//! - `loop_runner` - Main event loop, terminal management, auto-refresh timer
//! - `input` - Keyboard input handling
//! - `events` - Background task spawning and event processing
//! - `render` - Frame layout dispatch
//! - `sources` - Source selector widget
//! - `articles` - Article feed widget (list, loading, empty states)
//! - `status` - Status bar widget

mod articles;
mod events;
mod input;
mod loop_runner;
mod render;
mod sources;
mod status;

// Re-export the public API
pub use loop_runner::{run, Action};
