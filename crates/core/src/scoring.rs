//! Scoring module - classic line-clear scoring scaled by difficulty
//!
//! - Line clears use the classic table times `(level + 1)`, then the difficulty scale.
//! - Rows removed by a line-eraser count as cleared lines; anything beyond four
//!   rows in one lock scores as four.
//! - Soft drop awards 1 point per cell, hard drop 2 per cell (not scaled).
//! - Locking a single-cell item awards a flat bonus.

use serde::{Deserialize, Serialize};

use crate::types::{Difficulty, DROP_INTERVALS, DROP_INTERVAL_MIN_MS, LINE_SCORES, SINGLE_ITEM_BONUS};

/// Final result handed to the leaderboard once a game ends
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoreRecord {
    pub score: u32,
    pub item_mode: bool,
    pub difficulty: Difficulty,
}

/// Calculate line clear score
/// lines: number of lines cleared in one lock
/// level: current level (0-based)
pub fn calculate_line_score(lines: usize, level: u32, difficulty: Difficulty) -> u32 {
    if lines == 0 {
        return 0;
    }
    let base = LINE_SCORES[lines.min(LINE_SCORES.len() - 1)] * (level + 1);
    let (num, den) = difficulty.score_scale();
    base.saturating_mul(num) / den
}

/// Calculate drop score
/// Soft drop: 1 point per cell, Hard drop: 2 points per cell
pub fn calculate_drop_score(cells: u32, is_hard_drop: bool) -> u32 {
    if is_hard_drop {
        cells * 2
    } else {
        cells
    }
}

/// Bonus for locking a single-cell item piece
pub fn single_item_bonus() -> u32 {
    SINGLE_ITEM_BONUS
}

/// Get drop interval in milliseconds for a level and difficulty
pub fn get_drop_interval_ms(level: u32, difficulty: Difficulty) -> u32 {
    let idx = (level as usize).min(DROP_INTERVALS.len() - 1);
    let (num, den) = difficulty.gravity_scale();
    (DROP_INTERVALS[idx] * num / den).max(DROP_INTERVAL_MIN_MS)
}
