//! Best-move search: pick the placement with the highest heuristic score
//!
//! The search is a greedy one-step lookahead. For every rotation (0..=3 clockwise
//! turns from the piece's current orientation) and every column the rotated shape
//! fits in, it drops the shape onto a scratch copy of the board, locks it, clears
//! full lines and scores the result. The live board and piece are only read.
//!
//! In item mode the scratch lock also resolves the piece's bomb or line-eraser
//! effect, so rows an eraser removes count as lines. Weight crushing is not
//! simulated; a weight is scored where it first lands.
//!
//! Ties keep the first candidate in (rotation, x) order, so repeated calls on the
//! same input return the same move.

use item_tetris_core::{apply_item_effect, Board, GameConfig, GameState, Shape};
use item_tetris_types::{BOARD_HEIGHT, BOARD_WIDTH};

/// A candidate placement and its heuristic value
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Move {
    /// Left column of the rotated shape
    pub x: i8,
    /// Clockwise quarter turns from the piece's current orientation
    pub rotation: u8,
    /// Row the shape's top lands on
    pub final_y: i8,
    pub score: f32,
}

/// Weights of the linear board evaluation
///
/// Height, holes and bumpiness are penalties; cleared lines are a reward.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HeuristicWeights {
    pub aggregate_height: f32,
    pub lines: f32,
    pub holes: f32,
    pub bumpiness: f32,
}

impl Default for HeuristicWeights {
    fn default() -> Self {
        Self {
            aggregate_height: -0.510066,
            lines: 0.760666,
            holes: -0.35663,
            bumpiness: -0.184483,
        }
    }
}

/// Measured board features after a simulated placement
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BoardFeatures {
    pub aggregate_height: u32,
    pub holes: u32,
    pub bumpiness: u32,
    pub lines: u32,
}

impl BoardFeatures {
    pub fn measure(board: &Board, lines: u32) -> Self {
        let mut heights = [0u32; BOARD_WIDTH as usize];
        for (x, h) in heights.iter_mut().enumerate() {
            *h = board.column_height(x);
        }

        let aggregate_height = heights.iter().sum();
        let bumpiness = heights.windows(2).map(|w| w[0].abs_diff(w[1])).sum();

        // A hole is an empty cell below the top of its column
        let holes = heights
            .iter()
            .enumerate()
            .map(|(x, &h)| {
                let top = BOARD_HEIGHT as u32 - h;
                (top..BOARD_HEIGHT as u32)
                    .filter(|&y| board.is_valid(x as i8, y as i8))
                    .count() as u32
            })
            .sum();

        Self {
            aggregate_height,
            holes,
            bumpiness,
            lines,
        }
    }
}

impl HeuristicWeights {
    pub fn evaluate(&self, f: &BoardFeatures) -> f32 {
        self.aggregate_height * f.aggregate_height as f32
            + self.lines * f.lines as f32
            + self.holes * f.holes as f32
            + self.bumpiness * f.bumpiness as f32
    }
}

/// Stateless best-move search for one game configuration
#[derive(Debug, Clone, Copy, Default)]
pub struct MoveSearch {
    config: GameConfig,
    weights: HeuristicWeights,
}

impl MoveSearch {
    pub fn new(config: GameConfig, weights: HeuristicWeights) -> Self {
        Self { config, weights }
    }

    /// Search with the default weights
    pub fn for_config(config: GameConfig) -> Self {
        Self::new(config, HeuristicWeights::default())
    }

    pub fn config(&self) -> GameConfig {
        self.config
    }

    pub fn weights(&self) -> HeuristicWeights {
        self.weights
    }

    /// Best placement for the game's active piece; `None` without one
    pub fn best_move_for(&self, state: &GameState) -> Option<Move> {
        let active = state.active()?;
        self.find_best_move(state.board(), &active.shape)
    }

    /// Best placement of `shape` on `board`
    ///
    /// Returns `None` only when every (rotation, column) pair is blocked at the
    /// spawn row.
    pub fn find_best_move(&self, board: &Board, shape: &Shape) -> Option<Move> {
        let mut best: Option<Move> = None;

        for rotation in 0..4u8 {
            let rotated = shape.rotated(rotation);
            let max_x = (BOARD_WIDTH - rotated.width()) as i8;

            for x in 0..=max_x {
                if board.collides(&rotated, x, 0) {
                    continue;
                }

                let final_y = board.drop_column(&rotated, x);

                let mut scratch = board.clone();
                scratch.lock(&rotated, x, final_y);
                let mut lines = 0;
                if self.config.item_mode {
                    if let Some((dx, dy, item)) = rotated.item_marker() {
                        let outcome = apply_item_effect(&mut scratch, item, (x + dx, final_y + dy));
                        lines += outcome.rows_erased.len() as u32;
                    }
                }
                lines += scratch.clear_full_rows().len() as u32;

                let score = self
                    .weights
                    .evaluate(&BoardFeatures::measure(&scratch, lines));

                let better = match best {
                    Some(b) => score > b.score,
                    None => true,
                };
                if better {
                    best = Some(Move {
                        x,
                        rotation,
                        final_y,
                        score,
                    });
                }
            }
        }

        best
    }
}
