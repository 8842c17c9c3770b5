//! Board module - manages the game grid
//!
//! The board is a 10x20 grid stored as three parallel flat arrays sharing one
//! row-major index (`y * WIDTH + x`):
//!
//! - **occupancy**: 1 if the cell is filled, 0 otherwise
//! - **tags**: opaque per-cell metadata for renderers and scoring (piece colour)
//! - **items**: the [`ItemKind`] id locked into the cell, 0 for none
//!
//! Every mutation writes all three arrays at the same index, and row moves copy
//! the same ranges in all three, so the grids never disagree.
//!
//! Coordinates: (x, y) where x ranges 0..9 (left to right), y ranges 0..19 (top to bottom)

use arrayvec::ArrayVec;

use crate::shape::Shape;
use crate::types::{ItemKind, BOARD_HEIGHT, BOARD_WIDTH};

/// Total number of cells on the board
const BOARD_SIZE: usize = (BOARD_WIDTH as usize) * (BOARD_HEIGHT as usize);

const WIDTH: usize = BOARD_WIDTH as usize;
const HEIGHT: usize = BOARD_HEIGHT as usize;

/// Row indices, bounded by the board height
pub type RowList = ArrayVec<usize, HEIGHT>;

/// Tags of one row, as they stood when the row was read
pub type RowContents = [u8; WIDTH];

/// Contents of several rows, parallel to a [`RowList`]
pub type RowContentsList = ArrayVec<RowContents, HEIGHT>;

/// The game board - 10 columns x 20 rows using flat array storage
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Board {
    occupancy: [u8; BOARD_SIZE],
    tags: [u8; BOARD_SIZE],
    items: [u8; BOARD_SIZE],
}

impl Board {
    /// Create a new empty board
    pub fn new() -> Self {
        Self {
            occupancy: [0; BOARD_SIZE],
            tags: [0; BOARD_SIZE],
            items: [0; BOARD_SIZE],
        }
    }

    /// Calculate flat index from (x, y) coordinates
    #[inline(always)]
    fn index(x: i8, y: i8) -> Option<usize> {
        if x < 0 || x >= BOARD_WIDTH as i8 || y < 0 || y >= BOARD_HEIGHT as i8 {
            return None;
        }
        Some((y as usize) * WIDTH + (x as usize))
    }

    /// Get width of the board
    pub fn width(&self) -> u8 {
        BOARD_WIDTH
    }

    /// Get height of the board
    pub fn height(&self) -> u8 {
        BOARD_HEIGHT
    }

    /// Occupancy value at (x, y); None if out of bounds
    pub fn get(&self, x: i8, y: i8) -> Option<u8> {
        Self::index(x, y).map(|idx| self.occupancy[idx])
    }

    /// Metadata tag at (x, y); None if out of bounds
    pub fn tag(&self, x: i8, y: i8) -> Option<u8> {
        Self::index(x, y).map(|idx| self.tags[idx])
    }

    /// Item locked into (x, y); None if out of bounds
    pub fn item(&self, x: i8, y: i8) -> Option<ItemKind> {
        Self::index(x, y).map(|idx| ItemKind::from_id(self.items[idx]))
    }

    /// Fill cell (x, y) with a tag and item
    /// Returns false if out of bounds
    pub fn set(&mut self, x: i8, y: i8, tag: u8, item: ItemKind) -> bool {
        match Self::index(x, y) {
            Some(idx) => {
                self.occupancy[idx] = 1;
                self.tags[idx] = tag;
                self.items[idx] = item.id();
                true
            }
            None => false,
        }
    }

    /// Empty cell (x, y) in all three grids
    /// Returns true if a filled cell was removed
    pub fn clear_cell(&mut self, x: i8, y: i8) -> bool {
        match Self::index(x, y) {
            Some(idx) => {
                let was_filled = self.occupancy[idx] != 0;
                self.occupancy[idx] = 0;
                self.tags[idx] = 0;
                self.items[idx] = 0;
                was_filled
            }
            None => false,
        }
    }

    /// Check if position is valid (within bounds and empty)
    pub fn is_valid(&self, x: i8, y: i8) -> bool {
        matches!(self.get(x, y), Some(0))
    }

    /// Check if position is occupied (within bounds and filled)
    pub fn is_occupied(&self, x: i8, y: i8) -> bool {
        matches!(self.get(x, y), Some(v) if v != 0)
    }

    /// Check if position is out of bounds
    pub fn is_out_of_bounds(&self, x: i8, y: i8) -> bool {
        Self::index(x, y).is_none()
    }

    /// True iff any filled cell of `shape` at (x, y) is out of bounds or overlaps
    pub fn collides(&self, shape: &Shape, x: i8, y: i8) -> bool {
        shape
            .filled_cells()
            .any(|(dx, dy)| !self.is_valid(x + dx, y + dy))
    }

    /// Move by (dx, dy) if the destination is free
    pub fn try_move(&self, shape: &Shape, from: (i8, i8), delta: (i8, i8)) -> Option<(i8, i8)> {
        let to = (from.0 + delta.0, from.1 + delta.1);
        (!self.collides(shape, to.0, to.1)).then_some(to)
    }

    /// Lowest legal row for `shape` dropped in column `x` starting at `from_y`
    ///
    /// Hard drop, gravity settling and the move search all land pieces through
    /// this routine.
    pub fn drop_from(&self, shape: &Shape, x: i8, from_y: i8) -> i8 {
        let mut y = from_y;
        while !self.collides(shape, x, y + 1) {
            y += 1;
        }
        y
    }

    /// Lowest legal row for `shape` dropped in column `x` from the top
    pub fn drop_column(&self, shape: &Shape, x: i8) -> i8 {
        self.drop_from(shape, x, 0)
    }

    /// Copy every filled cell of `shape` (tag and item ids included) onto the board
    ///
    /// Cells outside the board are skipped; overlapping cells are overwritten.
    /// Callers check [`Board::collides`] first.
    pub fn lock(&mut self, shape: &Shape, x: i8, y: i8) {
        let tag = shape.tag();
        for (dx, dy) in shape.filled_cells() {
            self.set(x + dx, y + dy, tag, shape.item_type_at(dx, dy));
        }
    }

    /// Check if a row is completely filled
    pub fn is_row_full(&self, y: usize) -> bool {
        if y >= HEIGHT {
            return false;
        }
        let start = y * WIDTH;
        self.occupancy[start..start + WIDTH].iter().all(|&c| c != 0)
    }

    /// Row indices that are completely filled, top to bottom
    pub fn find_full_lines(&self) -> RowList {
        (0..HEIGHT).filter(|&y| self.is_row_full(y)).collect()
    }

    /// Remove `rows` and compact everything above them downwards
    ///
    /// Each surviving row moves down by the number of removed rows beneath it and
    /// the vacated top rows are emptied. All three grids move in the same pass.
    /// Out-of-range and duplicate indices are ignored.
    pub fn clear_lines(&mut self, rows: &[usize]) {
        let mut remove = [false; HEIGHT];
        for &y in rows {
            if y < HEIGHT {
                remove[y] = true;
            }
        }

        let mut write_y = HEIGHT;
        for read_y in (0..HEIGHT).rev() {
            if remove[read_y] {
                continue;
            }
            write_y -= 1;
            if write_y != read_y {
                self.copy_row(read_y, write_y);
            }
        }

        for y in 0..write_y {
            self.empty_row(y);
        }

        debug_assert!(self.lockstep_holds());
    }

    /// Clear all full rows and return their indices, top to bottom
    pub fn clear_full_rows(&mut self) -> RowList {
        let rows = self.find_full_lines();
        if !rows.is_empty() {
            self.clear_lines(&rows);
        }
        rows
    }

    /// Tag row `y` as it currently stands
    pub fn row_tags(&self, y: usize) -> RowContents {
        let mut out = [0u8; WIDTH];
        if y < HEIGHT {
            out.copy_from_slice(&self.tags[y * WIDTH..(y + 1) * WIDTH]);
        }
        out
    }

    /// Push `count` garbage rows in from the bottom, shifting everything up
    ///
    /// Each new row is full except `hole_x`. Cells pushed past the top are lost.
    pub fn push_garbage(&mut self, count: usize, hole_x: usize, tag: u8) {
        let count = count.min(HEIGHT);
        if count == 0 {
            return;
        }

        for y in count..HEIGHT {
            self.copy_row(y, y - count);
        }

        for y in HEIGHT - count..HEIGHT {
            self.empty_row(y);
            for x in (0..WIDTH).filter(|&x| x != hole_x) {
                self.set(x as i8, y as i8, tag, ItemKind::None);
            }
        }

        debug_assert!(self.lockstep_holds());
    }

    fn copy_row(&mut self, from: usize, to: usize) {
        let src = from * WIDTH..from * WIDTH + WIDTH;
        let dst = to * WIDTH;
        self.occupancy.copy_within(src.clone(), dst);
        self.tags.copy_within(src.clone(), dst);
        self.items.copy_within(src, dst);
    }

    fn empty_row(&mut self, y: usize) {
        let range = y * WIDTH..(y + 1) * WIDTH;
        self.occupancy[range.clone()].fill(0);
        self.tags[range.clone()].fill(0);
        self.items[range].fill(0);
    }

    /// Empty cells carry no tag or item
    fn lockstep_holds(&self) -> bool {
        (0..BOARD_SIZE)
            .all(|i| self.occupancy[i] != 0 || (self.tags[i] == 0 && self.items[i] == 0))
    }

    /// Height of column `x`: rows from the bottom up to and including the topmost filled cell
    pub fn column_height(&self, x: usize) -> u32 {
        if x >= WIDTH {
            return 0;
        }
        (0..HEIGHT)
            .find(|&y| self.occupancy[y * WIDTH + x] != 0)
            .map_or(0, |y| (HEIGHT - y) as u32)
    }

    /// Number of filled cells
    pub fn occupied_count(&self) -> usize {
        self.occupancy.iter().filter(|&&c| c != 0).count()
    }

    /// Raw occupancy grid, row-major
    pub fn occupancy(&self) -> &[u8] {
        &self.occupancy
    }

    /// Raw metadata grid, row-major
    pub fn tags(&self) -> &[u8] {
        &self.tags
    }

    /// Raw item-id grid, row-major
    pub fn items(&self) -> &[u8] {
        &self.items
    }

    /// Clear the entire board
    pub fn clear(&mut self) {
        *self = Self::new();
    }

    /// Build a board from text rows (`.` empty, anything else filled), bottom-aligned
    ///
    /// Intended for tests and fixtures. Panics if a row is wider than the board or
    /// there are more rows than the board height.
    pub fn from_rows(rows: &[&str]) -> Self {
        assert!(rows.len() <= HEIGHT, "too many rows");
        let mut board = Self::new();
        let top = HEIGHT - rows.len();
        for (i, row) in rows.iter().enumerate() {
            assert!(row.len() <= WIDTH, "row wider than board");
            for (x, ch) in row.chars().enumerate() {
                if ch != '.' {
                    board.set(x as i8, (top + i) as i8, 1, ItemKind::None);
                }
            }
        }
        board
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}
