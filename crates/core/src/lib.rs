//! Core game logic - pure, deterministic, and testable
//!
//! This crate holds the game rules, state management, and simulation logic for
//! item-mode falling-block play. It has no dependencies on UI, networking, or
//! persistence, making it:
//!
//! - **Deterministic**: the same [`GameConfig`] (seed included) replays the same game
//! - **Testable**: every rule is exercised by unit tests
//! - **Portable**: runs headless, behind a terminal, or inside a GUI
//!
//! # Module Structure
//!
//! - [`board`]: 10x20 board with three lockstep grids (occupancy, tags, items)
//! - [`shape`]: tetromino and item shapes, rotation, embedded item markers
//! - [`items`]: item effects (weight, bomb, line-eraser, single) and the item spawn gate
//! - [`game_state`]: active piece, timing, the lock pipeline, scoring, game lifecycle
//! - [`rng`]: seeded RNG and difficulty-weighted piece generator
//! - [`scoring`]: line/drop scoring, gravity table, final score record
//! - [`config`]: game configuration from defaults, environment and arguments
//! - [`snapshot`]: read-only copy of a game for renderers
//! - [`versus`]: garbage exchange between two games
//!
//! # Game Rules
//!
//! - **Item mode**: every 10 cleared lines the next spawn is an item piece
//! - **Difficulty**: scales I-piece frequency, gravity and points
//! - **Lock Delay**: 450ms before a grounded piece locks, with 15 move/rotate reset limit
//! - **Weight**: crushes downward one row per gravity step instead of locking on contact
//! - **Ghost Piece**: shows where the current piece will land
//!
//! # Example
//!
//! ```
//! use item_tetris_core::{GameConfig, GameState};
//! use item_tetris_types::{Difficulty, GameAction};
//!
//! let mut game = GameState::new(GameConfig::new(true, Difficulty::Normal).with_seed(12345));
//! game.start();
//!
//! game.apply_action(GameAction::MoveRight);
//! game.apply_action(GameAction::Rotate);
//! game.apply_action(GameAction::HardDrop);
//!
//! assert!(game.score() > 0); // Hard drop awards points
//! ```
//!
//! # Timing
//!
//! Call [`GameState::tick`](game_state::GameState::tick) every frame with the elapsed
//! time (16ms nominal). Gravity starts at 1000ms per row and speeds up with level.

pub mod board;
pub mod config;
pub mod game_state;
pub mod items;
pub mod rng;
pub mod scoring;
pub mod shape;
pub mod snapshot;
pub mod versus;

pub use item_tetris_types as types;

// Re-export commonly used types for convenience
pub use board::{Board, RowList};
pub use config::{ConfigError, GameConfig};
pub use game_state::{ActivePiece, GameState, LineClearEvent};
pub use items::{apply_item_effect, weight_step, ItemManager, ItemOutcome, WeightStep};
pub use rng::{PieceGenerator, SimpleRng};
pub use scoring::{calculate_drop_score, calculate_line_score, ScoreRecord};
pub use shape::{Shape, ShapeKind};
pub use snapshot::{ActiveSnapshot, GameSnapshot};
