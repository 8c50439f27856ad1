//! Scoring module - line clear points and the bonus window multiplier
//!
//! A lock that clears rows earns the table value for the number of rows
//! (4 or more share the last entry). If the lock lands inside the bonus window
//! the points are multiplied by `numerator / denominator`, truncated.

use crate::config::GameConfig;

/// Score calculation result
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ScoreResult {
    /// Table points before the bonus.
    pub base: u32,
    pub total: u32,
    /// Whether the bonus multiplier was applied to a non-zero clear.
    pub bonus_applied: bool,
}

/// Table points for clearing `lines` rows in one lock.
pub fn line_clear_points(lines: usize, table: &[u32; 5]) -> u32 {
    table[lines.min(table.len() - 1)]
}

/// Apply the bonus multiplier to a point value, truncating.
pub fn apply_bonus(points: u32, numerator: u32, denominator: u32) -> u32 {
    points.saturating_mul(numerator) / denominator
}

/// Calculate the score for one lock event.
pub fn calculate_score(lines: usize, in_bonus_window: bool, config: &GameConfig) -> ScoreResult {
    let base = line_clear_points(lines, &config.line_scores);
    let bonus_applied = in_bonus_window && base > 0;
    let total = if bonus_applied {
        apply_bonus(base, config.bonus_numerator, config.bonus_denominator)
    } else {
        base
    };

    ScoreResult {
        base,
        total,
        bonus_applied,
    }
}
