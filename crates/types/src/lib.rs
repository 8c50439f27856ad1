//! Core types module - shared data structures and constants
//!
//! This module defines the fundamental types used throughout the application.
//! All types are pure data structures with no external dependencies, making them
//! usable in any context (simulation core, terminal rendering, input mapping).
//!
//! # Board Dimensions
//!
//! Default playfield dimensions (configurable at session construction):
//!
//! - **Columns**: 10 (indexed 0-9, left to right)
//! - **Rows**: 20 (indexed 0-19, top to bottom)
//! - **Spawn column**: `columns / 2 - 1` (4 on the default board), row 0
//!
//! # Timing Constants
//!
//! Timing values are in discrete ticks:
//!
//! | Constant | Value | Description |
//! |----------|-------|-------------|
//! | `DEFAULT_MOVE_DELAY` | 400 | Ticks between gravity steps |
//! | `DEFAULT_BONUS_THRESHOLD` | 3000 | Ticks after a lock during which the bonus applies |
//! | `DEFAULT_TICK_MS` | 1 | Real-time length of one tick in the terminal runner |
//! | `DEFAULT_FRAME_MS` | 16 | Render interval in the terminal runner |
//!
//! # Examples
//!
//! ```
//! use tetris_clone_types::{ShapeKind, DEFAULT_COLUMNS, DEFAULT_ROWS};
//!
//! // Parse from string (case-insensitive)
//! let parsed = ShapeKind::from_str("t").unwrap();
//! assert_eq!(parsed, ShapeKind::T);
//!
//! // Board dimensions
//! assert_eq!(DEFAULT_COLUMNS, 10);
//! assert_eq!(DEFAULT_ROWS, 20);
//! ```

/// Default board width in cells (10 columns)
pub const DEFAULT_COLUMNS: u16 = 10;

/// Default board height in cells (20 rows)
pub const DEFAULT_ROWS: u16 = 20;

/// Ticks between forced gravity steps.
pub const DEFAULT_MOVE_DELAY: u32 = 400;

/// Ticks after a lock event during which cleared rows score the bonus multiplier.
pub const DEFAULT_BONUS_THRESHOLD: u32 = 3000;

/// Real-time length of one simulation tick in the terminal runner (milliseconds).
pub const DEFAULT_TICK_MS: u32 = 1;

/// Render interval in the terminal runner (16ms ≈ 60 FPS).
pub const DEFAULT_FRAME_MS: u32 = 16;

/// Line clear scoring table
///
/// Points for clearing N rows in one lock:
/// - 0 rows: 0 points
/// - 1 row: 100 points
/// - 2 rows: 300 points
/// - 3 rows: 500 points
/// - 4 or more rows: 800 points
pub const LINE_SCORES: [u32; 5] = [0, 100, 300, 500, 800];

/// Bonus multiplier numerator (3/2 = 1.5x)
pub const BONUS_NUMERATOR: u32 = 3;

/// Bonus multiplier denominator
pub const BONUS_DENOMINATOR: u32 = 2;

/// The seven tetrimino shapes
///
/// Each shape has a distinct mask and default color:
/// - **I**: Cyan, horizontal bar
/// - **J**: Blue, J-shaped
/// - **L**: Orange, L-shaped (mirror of J)
/// - **O**: Yellow, 2x2 square
/// - **S**: Green, S-shaped
/// - **T**: Magenta, T-shaped
/// - **Z**: Red, Z-shaped (mirror of S)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ShapeKind {
    I,
    J,
    L,
    O,
    S,
    T,
    Z,
}

impl ShapeKind {
    /// Every shape, in catalog order.
    pub const ALL: [ShapeKind; 7] = [
        ShapeKind::I,
        ShapeKind::J,
        ShapeKind::L,
        ShapeKind::O,
        ShapeKind::S,
        ShapeKind::T,
        ShapeKind::Z,
    ];

    /// Parse shape kind from string (case-insensitive)
    ///
    /// # Examples
    ///
    /// ```
    /// use tetris_clone_types::ShapeKind;
    ///
    /// assert_eq!(ShapeKind::from_str("i"), Some(ShapeKind::I));
    /// assert_eq!(ShapeKind::from_str("O"), Some(ShapeKind::O));
    /// assert_eq!(ShapeKind::from_str("unknown"), None);
    /// ```
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "i" => Some(ShapeKind::I),
            "j" => Some(ShapeKind::J),
            "l" => Some(ShapeKind::L),
            "o" => Some(ShapeKind::O),
            "s" => Some(ShapeKind::S),
            "t" => Some(ShapeKind::T),
            "z" => Some(ShapeKind::Z),
            _ => None,
        }
    }

    /// Single uppercase letter naming the shape.
    pub fn as_str(&self) -> &'static str {
        match self {
            ShapeKind::I => "I",
            ShapeKind::J => "J",
            ShapeKind::L => "L",
            ShapeKind::O => "O",
            ShapeKind::S => "S",
            ShapeKind::T => "T",
            ShapeKind::Z => "Z",
        }
    }

    /// Color a freshly spawned piece of this shape carries.
    pub fn default_color(&self) -> Color {
        match self {
            ShapeKind::I => Color::new(80, 220, 220),
            ShapeKind::J => Color::new(80, 120, 220),
            ShapeKind::L => Color::new(255, 165, 0),
            ShapeKind::O => Color::new(240, 220, 80),
            ShapeKind::S => Color::new(100, 220, 120),
            ShapeKind::T => Color::new(200, 120, 220),
            ShapeKind::Z => Color::new(220, 80, 80),
        }
    }
}

/// 24-bit color tag carried by pieces and locked cells.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }
}

/// A cell on the game board
///
/// - `None`: Empty cell
/// - `Some(Color)`: Occupied by a locked piece of that color
pub type Cell = Option<Color>;

/// Discrete commands delivered by the presentation layer, one per keypress.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Command {
    /// Shift the active piece one column left
    MoveLeft,
    /// Shift the active piece one column right
    MoveRight,
    /// Rotate the active piece 90° clockwise
    RotateCw,
    /// Drop the active piece to the lowest non-colliding row
    HardDrop,
    /// Start a new game (only honored after game over)
    Restart,
    /// Stop the tick loop
    Quit,
}

/// Session lifecycle phase.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Phase {
    #[default]
    Playing,
    GameOver,
}

impl Phase {
    pub fn as_str(&self) -> &'static str {
        match self {
            Phase::Playing => "playing",
            Phase::GameOver => "game_over",
        }
    }
}
