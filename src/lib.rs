//! Item Tetris (workspace facade crate).
//!
//! Re-exports `item_tetris::{core, engine, types}`; the implementation lives in
//! dedicated crates under `crates/`.

pub use item_tetris_core as core;
pub use item_tetris_engine as engine;
pub use item_tetris_types as types;
