//! Terminal input module (engine-facing).
//!
//! This module is intentionally independent of any UI framework beyond
//! `crossterm` key events. It maps keys into [`crate::types::Command`] and
//! buffers them until the next simulation tick drains them.

pub mod map;
pub mod queue;

pub use tetris_clone_types as types;

pub use map::{handle_key_event, is_quit_key};
pub use queue::CommandBuffer;
