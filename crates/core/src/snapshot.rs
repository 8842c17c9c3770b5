//! Read-only copy of a game for renderers and observers

use crate::board::Board;
use crate::game_state::ActivePiece;
use crate::shape::{ShapeKind, MAX_SHAPE_DIM};
use crate::types::{Difficulty, ItemKind, PieceKind, BOARD_HEIGHT, BOARD_WIDTH};

const W: usize = BOARD_WIDTH as usize;
const H: usize = BOARD_HEIGHT as usize;

pub type Grid = [[u8; W]; H];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ActiveSnapshot {
    pub kind: ShapeKind,
    pub x: i8,
    pub y: i8,
    pub width: u8,
    pub height: u8,
    /// Filled mask of the shape in its current orientation
    pub cells: [[u8; MAX_SHAPE_DIM]; MAX_SHAPE_DIM],
    /// Item marker (shape-relative), if the piece carries one
    pub marker: Option<(i8, i8, ItemKind)>,
}

impl From<ActivePiece> for ActiveSnapshot {
    fn from(value: ActivePiece) -> Self {
        let shape = value.shape;
        let mut cells = [[0u8; MAX_SHAPE_DIM]; MAX_SHAPE_DIM];
        for (dx, dy) in shape.filled_cells() {
            cells[dy as usize][dx as usize] = 1;
        }
        Self {
            kind: shape.kind(),
            x: value.x,
            y: value.y,
            width: shape.width(),
            height: shape.height(),
            cells,
            marker: shape.item_marker(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct GameSnapshot {
    pub occupancy: Grid,
    pub tags: Grid,
    pub items: Grid,
    pub active: Option<ActiveSnapshot>,
    pub ghost_y: Option<i8>,
    pub next: PieceKind,
    /// An earned item piece replaces `next` on the coming spawn
    pub item_pending: bool,
    pub item_mode: bool,
    pub difficulty: Difficulty,
    pub paused: bool,
    pub game_over: bool,
    pub piece_id: u32,
    pub score: u32,
    pub level: u32,
    pub lines: u32,
}

impl GameSnapshot {
    /// Copy all three board grids into the snapshot
    pub fn write_board(&mut self, board: &Board) {
        for (y, ((occ, tag), item)) in self
            .occupancy
            .iter_mut()
            .zip(self.tags.iter_mut())
            .zip(self.items.iter_mut())
            .enumerate()
        {
            let row = y * W..(y + 1) * W;
            occ.copy_from_slice(&board.occupancy()[row.clone()]);
            tag.copy_from_slice(&board.tags()[row.clone()]);
            item.copy_from_slice(&board.items()[row]);
        }
    }

    pub fn playable(&self) -> bool {
        !self.game_over && !self.paused
    }
}

impl Default for GameSnapshot {
    fn default() -> Self {
        Self {
            occupancy: [[0u8; W]; H],
            tags: [[0u8; W]; H],
            items: [[0u8; W]; H],
            active: None,
            ghost_y: None,
            next: PieceKind::I,
            item_pending: false,
            item_mode: false,
            difficulty: Difficulty::Normal,
            paused: false,
            game_over: false,
            piece_id: 0,
            score: 0,
            level: 0,
            lines: 0,
        }
    }
}
