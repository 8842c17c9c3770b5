//! Move search and move execution on top of `item-tetris-core`
//!
//! ```
//! use item_tetris_core::{GameConfig, GameState};
//! use item_tetris_engine::{apply_move, MoveSearch};
//!
//! let mut game = GameState::new(GameConfig::default());
//! game.start();
//!
//! let search = MoveSearch::default();
//! let mv = search.best_move_for(&game).unwrap();
//! apply_move(&mut game, &mv).unwrap();
//! assert_eq!(game.piece_id(), 2);
//! ```

pub mod place;
pub mod search;

pub use place::{apply_move, PlaceError};
pub use search::{BoardFeatures, HeuristicWeights, Move, MoveSearch};
