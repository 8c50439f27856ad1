//! Error types for the simulation core.
//!
//! None of these are reachable in normal play: commands are validated before
//! they touch the board. They surface logic defects loudly instead of letting
//! a bad index be clamped or wrapped.

use thiserror::Error;

/// Errors raised by the shape catalog, the board, and the session.
#[derive(Debug, Error)]
pub enum EngineError {
    #[error("unknown shape kind {0:?}")]
    UnknownShapeKind(String),

    #[error("board access out of bounds at ({x}, {y})")]
    OutOfBoundsAccess { x: i16, y: i16 },

    #[error(transparent)]
    Config(#[from] ConfigError),
}

/// Rejected game configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("board must be between {min}x{min} and {max}x{max} cells, got {columns}x{rows}")]
    BoardSize {
        columns: u16,
        rows: u16,
        min: u16,
        max: u16,
    },

    #[error("move_delay must be at least one tick")]
    ZeroMoveDelay,

    #[error("bonus multiplier denominator must be non-zero")]
    ZeroBonusDenominator,

    #[error("tick_ms and frame_ms must be non-zero")]
    ZeroTiming,

    #[error("config parse error: {0}")]
    Parse(#[from] serde_json::Error),
}
