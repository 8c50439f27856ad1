//! Game configuration - board size, timing thresholds and the scoring table
//!
//! Every field has a default, so a JSON file only needs the keys it overrides:
//!
//! ```
//! use tetris_clone_core::GameConfig;
//!
//! let config = GameConfig::from_json_str(r#"{ "columns": 12, "move_delay": 250 }"#).unwrap();
//! assert_eq!(config.columns, 12);
//! assert_eq!(config.rows, 20);
//! assert_eq!(config.move_delay, 250);
//! ```

use serde::Deserialize;

use crate::error::ConfigError;
use crate::types::{
    BONUS_DENOMINATOR, BONUS_NUMERATOR, DEFAULT_BONUS_THRESHOLD, DEFAULT_COLUMNS,
    DEFAULT_FRAME_MS, DEFAULT_MOVE_DELAY, DEFAULT_ROWS, DEFAULT_TICK_MS, LINE_SCORES,
};

/// Smallest accepted board side. Below 5 columns the I piece does not fit at
/// the spawn column.
pub const MIN_BOARD_SIDE: u16 = 5;

/// Largest accepted board side.
pub const MAX_BOARD_SIDE: u16 = 64;

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct GameConfig {
    pub columns: u16,
    pub rows: u16,
    /// Ticks between gravity steps.
    pub move_delay: u32,
    /// A lock within this many ticks of the previous lock scores the bonus.
    pub bonus_threshold: u32,
    /// Points indexed by rows cleared; the last entry covers 4 or more.
    pub line_scores: [u32; 5],
    pub bonus_numerator: u32,
    pub bonus_denominator: u32,
    /// Real-time length of one tick in the terminal runner.
    pub tick_ms: u32,
    /// Render interval in the terminal runner.
    pub frame_ms: u32,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            columns: DEFAULT_COLUMNS,
            rows: DEFAULT_ROWS,
            move_delay: DEFAULT_MOVE_DELAY,
            bonus_threshold: DEFAULT_BONUS_THRESHOLD,
            line_scores: LINE_SCORES,
            bonus_numerator: BONUS_NUMERATOR,
            bonus_denominator: BONUS_DENOMINATOR,
            tick_ms: DEFAULT_TICK_MS,
            frame_ms: DEFAULT_FRAME_MS,
        }
    }
}

impl GameConfig {
    /// Parse a (possibly partial) JSON document and validate the result.
    pub fn from_json_str(s: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(s)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let side_ok = |v: u16| (MIN_BOARD_SIDE..=MAX_BOARD_SIDE).contains(&v);
        if !side_ok(self.columns) || !side_ok(self.rows) {
            return Err(ConfigError::BoardSize {
                columns: self.columns,
                rows: self.rows,
                min: MIN_BOARD_SIDE,
                max: MAX_BOARD_SIDE,
            });
        }
        if self.move_delay == 0 {
            return Err(ConfigError::ZeroMoveDelay);
        }
        if self.bonus_denominator == 0 {
            return Err(ConfigError::ZeroBonusDenominator);
        }
        if self.tick_ms == 0 || self.frame_ms == 0 {
            return Err(ConfigError::ZeroTiming);
        }
        Ok(())
    }
}
