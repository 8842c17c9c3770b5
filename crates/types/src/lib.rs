//! Core types module - shared data structures and constants
//!
//! This module defines the fundamental types used throughout the engine.
//! All types are plain data with no behaviour beyond parsing and lookup, making
//! them usable in any context (core logic, move search, rendering collaborators).
//!
//! # Board Dimensions
//!
//! Standard playfield dimensions:
//!
//! - **Width**: 10 columns (indexed 0-9)
//! - **Height**: 20 rows (indexed 0-19, row 0 at the top)
//! - **Spawn position**: horizontally centred, row 0
//!
//! # Game Timing Constants
//!
//! Timing values are in milliseconds:
//!
//! | Constant | Value | Description |
//! |----------|-------|-------------|
//! | `TICK_MS` | 16 | Fixed timestep interval (~60 FPS) |
//! | `BASE_DROP_MS` | 1000 | Gravity at level 0 |
//! | `SOFT_DROP_MULTIPLIER` | 10 | Soft drop is 10x faster |
//! | `LOCK_DELAY_MS` | 450 | Time before a grounded piece locks |
//! | `LOCK_RESET_LIMIT` | 15 | Max lock timer resets per piece |
//!
//! # Items
//!
//! With item mode enabled, every [`ITEM_SPAWN_INTERVAL`] cleared lines the next
//! piece is replaced by an item piece. See [`ItemKind`] for the effects.
//!
//! # Examples
//!
//! ```
//! use item_tetris_types::{Difficulty, GameAction, ItemKind, PieceKind, BOARD_HEIGHT, BOARD_WIDTH};
//!
//! // Parse from string (case-insensitive)
//! assert_eq!(PieceKind::from_str("t"), Some(PieceKind::T));
//! assert_eq!(Difficulty::from_str("HARD"), Some(Difficulty::Hard));
//!
//! // Item ids are stable and 0 means "no item"
//! assert_eq!(ItemKind::from_id(2), ItemKind::Bomb);
//! assert_eq!(ItemKind::None.id(), 0);
//!
//! // Parse game action
//! assert_eq!(GameAction::from_str("hardDrop"), Some(GameAction::HardDrop));
//!
//! // Board dimensions
//! assert_eq!(BOARD_WIDTH, 10);
//! assert_eq!(BOARD_HEIGHT, 20);
//! ```

use serde::{Deserialize, Serialize};

/// Board width in cells (10 columns)
pub const BOARD_WIDTH: u8 = 10;

/// Board height in cells (20 rows)
pub const BOARD_HEIGHT: u8 = 20;

/// Fixed timestep interval in milliseconds (16ms ≈ 60 FPS)
pub const TICK_MS: u32 = 16;

/// Base gravity interval at level 0 (1000ms = 1 second per row)
pub const BASE_DROP_MS: u32 = 1000;

/// Soft drop speed multiplier (10x normal speed)
pub const SOFT_DROP_MULTIPLIER: u32 = 10;

/// Lock delay when piece is grounded (450ms)
pub const LOCK_DELAY_MS: u32 = 450;

/// Maximum number of lock timer resets per piece (15)
pub const LOCK_RESET_LIMIT: u8 = 15;

/// Drop intervals by level (milliseconds per row)
///
/// Index 0 = Level 0, Index 8 = Level 8+
pub const DROP_INTERVALS: [u32; 9] = [BASE_DROP_MS, 800, 650, 500, 400, 320, 250, 200, 160];

/// Absolute minimum drop interval (100ms)
pub const DROP_INTERVAL_MIN_MS: u32 = 100;

/// Lines cleared between two item pieces
pub const ITEM_SPAWN_INTERVAL: u32 = 10;

/// Half-width of the square a bomb clears (1 = 3x3)
pub const BOMB_RADIUS: i8 = 1;

/// What a line-eraser removes on lock
pub const LINE_ERASER_MODE: EraseMode = EraseMode::Row;

/// Flat bonus for locking a single-cell item piece
pub const SINGLE_ITEM_BONUS: u32 = 50;

/// Metadata tag written for weight cells
pub const WEIGHT_TAG: u8 = 8;

/// Metadata tag written for single-item cells
pub const SINGLE_TAG: u8 = 9;

/// Metadata tag written for received garbage rows
pub const GARBAGE_TAG: u8 = 10;

/// Maximum garbage rows that may be queued on one board
pub const GARBAGE_QUEUE_LIMIT: u32 = 10;

/// Line clear scoring table (Classic Nintendo scoring)
///
/// Base points for clearing N lines at level 0:
/// - 0 lines: 0 points
/// - 1 line: 40 points
/// - 2 lines: 100 points
/// - 3 lines: 300 points
/// - 4 lines: 1200 points
///
/// Points are multiplied by (level + 1) and then scaled by difficulty.
pub const LINE_SCORES: [u32; 5] = [0, 40, 100, 300, 1200];


/// The seven tetromino piece kinds
///
/// Each piece has a distinct shape and color:
/// - **I**: Cyan, horizontal bar
/// - **O**: Yellow, 2x2 square
/// - **J**: Blue, J-shaped
/// - **L**: Orange, L-shaped (mirror of J)
/// - **S**: Green, S-shaped
/// - **Z**: Red, Z-shaped (mirror of S)
/// - **T**: Magenta, T-shaped
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PieceKind {
    I,
    O,
    J,
    L,
    S,
    Z,
    T,
}

impl PieceKind {
    /// All kinds in canonical order
    pub const ALL: [PieceKind; 7] = [
        PieceKind::I,
        PieceKind::O,
        PieceKind::J,
        PieceKind::L,
        PieceKind::S,
        PieceKind::Z,
        PieceKind::T,
    ];

    /// Parse piece kind from string (case-insensitive)
    ///
    /// # Examples
    ///
    /// ```
    /// use item_tetris_types::PieceKind;
    ///
    /// assert_eq!(PieceKind::from_str("i"), Some(PieceKind::I));
    /// assert_eq!(PieceKind::from_str("O"), Some(PieceKind::O));
    /// assert_eq!(PieceKind::from_str("unknown"), None);
    /// ```
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "i" => Some(PieceKind::I),
            "o" => Some(PieceKind::O),
            "j" => Some(PieceKind::J),
            "l" => Some(PieceKind::L),
            "s" => Some(PieceKind::S),
            "z" => Some(PieceKind::Z),
            "t" => Some(PieceKind::T),
            _ => None,
        }
    }

    /// Convert to lowercase string representation
    pub fn as_str(&self) -> &'static str {
        match self {
            PieceKind::I => "i",
            PieceKind::O => "o",
            PieceKind::J => "j",
            PieceKind::L => "l",
            PieceKind::S => "s",
            PieceKind::Z => "z",
            PieceKind::T => "t",
        }
    }

    /// Metadata tag written to the board for cells of this kind (1..=7)
    pub fn tag(&self) -> u8 {
        match self {
            PieceKind::I => 1,
            PieceKind::O => 2,
            PieceKind::J => 3,
            PieceKind::L => 4,
            PieceKind::S => 5,
            PieceKind::Z => 6,
            PieceKind::T => 7,
        }
    }
}

/// Item kinds carried by item pieces
///
/// The numeric id is what the shape overlay and the board item grid store;
/// `0` always means "no item".
///
/// - **Weight**: crushes the cells directly beneath it, one row per tick
/// - **Bomb**: clears a square around its marker on lock
/// - **LineEraser**: erases the row (and/or column) through its marker
/// - **Single**: a 1x1 piece worth a score bonus
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum ItemKind {
    #[default]
    None,
    Weight,
    Bomb,
    LineEraser,
    Single,
}

impl ItemKind {
    /// The item kinds an item piece can be spawned as
    pub const ALL: [ItemKind; 4] = [
        ItemKind::Weight,
        ItemKind::Bomb,
        ItemKind::LineEraser,
        ItemKind::Single,
    ];

    /// Stable numeric id (0 = none)
    pub fn id(&self) -> u8 {
        match self {
            ItemKind::None => 0,
            ItemKind::Weight => 1,
            ItemKind::Bomb => 2,
            ItemKind::LineEraser => 3,
            ItemKind::Single => 4,
        }
    }

    /// Map an id back to a kind; unknown ids read as `None`
    pub fn from_id(id: u8) -> Self {
        match id {
            1 => ItemKind::Weight,
            2 => ItemKind::Bomb,
            3 => ItemKind::LineEraser,
            4 => ItemKind::Single,
            _ => ItemKind::None,
        }
    }

    pub fn is_item(&self) -> bool {
        *self != ItemKind::None
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ItemKind::None => "none",
            ItemKind::Weight => "weight",
            ItemKind::Bomb => "bomb",
            ItemKind::LineEraser => "line_eraser",
            ItemKind::Single => "single",
        }
    }
}

/// Line-eraser reach
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EraseMode {
    /// Remove the marker's row, compacting the rows above
    Row,
    /// Empty every cell of the marker's column in place
    Column,
    /// Both of the above
    Cross,
}

/// Difficulty setting supplied by the settings collaborator
///
/// Difficulty tunes piece selection, gravity and score:
///
/// | | I weight | gravity | score |
/// |---|---|---|---|
/// | Easy | 12 | x6/5 slower | x4/5 |
/// | Normal | 10 | x1 | x1 |
/// | Hard | 8 | x4/5 faster | x6/5 |
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    Easy,
    #[default]
    Normal,
    Hard,
}

impl Difficulty {
    /// Parse difficulty from string (case-insensitive)
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "easy" => Some(Difficulty::Easy),
            "normal" => Some(Difficulty::Normal),
            "hard" => Some(Difficulty::Hard),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Difficulty::Easy => "easy",
            Difficulty::Normal => "normal",
            Difficulty::Hard => "hard",
        }
    }

    /// Relative selection weight of the I piece (others weigh 10)
    pub fn i_piece_weight(&self) -> u32 {
        match self {
            Difficulty::Easy => 12,
            Difficulty::Normal => 10,
            Difficulty::Hard => 8,
        }
    }

    /// Gravity interval scale as (numerator, denominator)
    pub fn gravity_scale(&self) -> (u32, u32) {
        match self {
            Difficulty::Easy => (6, 5),
            Difficulty::Normal => (1, 1),
            Difficulty::Hard => (4, 5),
        }
    }

    /// Line-clear score scale as (numerator, denominator)
    pub fn score_scale(&self) -> (u32, u32) {
        match self {
            Difficulty::Easy => (4, 5),
            Difficulty::Normal => (1, 1),
            Difficulty::Hard => (6, 5),
        }
    }
}

/// Game actions that can be applied to modify game state
///
/// These actions are used by both human input and the autoplay driver.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameAction {
    /// Move piece one cell left
    MoveLeft,
    /// Move piece one cell right
    MoveRight,
    /// Drop piece one cell down (with soft drop scoring)
    SoftDrop,
    /// Instantly drop piece to lowest valid position
    HardDrop,
    /// Rotate piece 90° clockwise
    Rotate,
    /// Toggle pause state
    Pause,
    /// Restart the game with the same configuration
    Restart,
}

impl GameAction {
    /// Parse action from string
    ///
    /// # Examples
    ///
    /// ```
    /// use item_tetris_types::GameAction;
    ///
    /// assert_eq!(GameAction::from_str("moveLeft"), Some(GameAction::MoveLeft));
    /// assert_eq!(GameAction::from_str("rotate"), Some(GameAction::Rotate));
    /// assert_eq!(GameAction::from_str("unknown"), None);
    /// ```
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "moveleft" => Some(GameAction::MoveLeft),
            "moveright" => Some(GameAction::MoveRight),
            "softdrop" => Some(GameAction::SoftDrop),
            "harddrop" => Some(GameAction::HardDrop),
            "rotate" => Some(GameAction::Rotate),
            "pause" => Some(GameAction::Pause),
            "restart" => Some(GameAction::Restart),
            _ => None,
        }
    }

    /// Convert to camelCase string
    pub fn as_str(&self) -> &'static str {
        match self {
            GameAction::MoveLeft => "moveLeft",
            GameAction::MoveRight => "moveRight",
            GameAction::SoftDrop => "softDrop",
            GameAction::HardDrop => "hardDrop",
            GameAction::Rotate => "rotate",
            GameAction::Pause => "pause",
            GameAction::Restart => "restart",
        }
    }
}
