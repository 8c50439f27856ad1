//! Terminal "game renderer" module.
//!
//! A small, game-oriented rendering layer: [`GameView`] turns a core
//! snapshot into a framebuffer, [`TerminalRenderer`] flushes framebuffers to
//! the terminal with crossterm, and [`RenderThrottle`] decides when a new
//! frame is worth drawing. No widget toolkit is involved; one board cell is
//! drawn two characters wide to keep it roughly square.

pub mod fb;
pub mod game_view;
pub mod render_throttle;
pub mod renderer;

pub use tetris_clone_core as core;
pub use tetris_clone_types as types;

pub use fb::{FrameBuffer, Glyph, Style};
pub use game_view::{AnchorY, GameView, Viewport};
pub use render_throttle::RenderThrottle;
pub use renderer::{encode_frame_into, TerminalRenderer};
