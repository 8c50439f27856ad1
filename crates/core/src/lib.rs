//! Core game logic module - pure, deterministic, and testable
//!
//! This module contains all the game rules, state management, and simulation logic.
//! It has **no dependencies** on terminal rendering or input devices, making it:
//!
//! - **Deterministic**: A seeded or scripted shape source reproduces a game exactly
//! - **Testable**: Every rule is reachable through plain function calls
//! - **Portable**: Any front end that can deliver commands and draw a snapshot can drive it
//!
//! # Module Structure
//!
//! - [`shapes`]: The seven tetrimino bit-masks and clockwise mask rotation
//! - [`piece`]: A positioned, rotatable shape instance
//! - [`board`]: The occupancy grid with collision, rotation legality, merge and line clearing
//! - [`scoring`]: Line clear table and bonus window multiplier
//! - [`session`]: The Playing/GameOver state machine driven one tick at a time
//! - [`rng`]: Injectable shape sources (uniform random or scripted)
//! - [`snapshot`]: Read-only render state for the presentation layer
//! - [`config`]: Board size, timing thresholds and scoring table
//!
//! # Game Rules
//!
//! - **Gravity**: The active piece falls one row every `move_delay` ticks
//! - **Locking**: Once gravity pushes a piece into the floor or the stack it is
//!   merged one row up, at its last legal position
//! - **Line clears**: 1/2/3/4+ rows score 100/300/500/800
//! - **Bonus window**: A lock within `bonus_threshold` ticks of the previous lock
//!   scores 1.5x
//! - **Game over**: The next piece cannot be placed at its spawn position
//!
//! # Example
//!
//! ```
//! use tetris_clone_core::{GameConfig, ScriptedShapes, Session};
//! use tetris_clone_types::{Command, ShapeKind};
//!
//! let shapes = ScriptedShapes::new(vec![ShapeKind::I]);
//! let mut session = Session::with_source(GameConfig::default(), shapes).unwrap();
//!
//! session.tick(&[Command::HardDrop]).unwrap();
//! assert_eq!(session.active().y, 19);
//!
//! // The piece locks on the next gravity step.
//! let mut locked = false;
//! while !locked {
//!     locked = session.tick(&[]).unwrap().locked;
//! }
//! assert_eq!(session.board().occupied_count(), 4);
//! assert_eq!(session.score(), 0);
//! ```
//!
//! # Timing
//!
//! One call to [`Session::tick`](session::Session::tick) is one tick. The
//! terminal runner maps a tick to `tick_ms` of wall-clock time.

pub mod board;
pub mod config;
pub mod error;
pub mod piece;
pub mod rng;
pub mod scoring;
pub mod session;
pub mod shapes;
pub mod snapshot;

pub use tetris_clone_types as types;

// Re-export commonly used types for convenience
pub use board::Board;
pub use config::GameConfig;
pub use error::{ConfigError, EngineError};
pub use piece::Piece;
pub use rng::{ScriptedShapes, ShapeSource, UniformShapes};
pub use scoring::{calculate_score, ScoreResult};
pub use session::{Session, TickReport};
pub use shapes::{mask_for, shape_mask, Mask};
pub use snapshot::{ActiveSnapshot, GameSnapshot};
