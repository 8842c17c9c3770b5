//! Items module - item piece construction and lock-time effects
//!
//! All item semantics live here. [`apply_item_effect`] is the single dispatch
//! point called when an item piece locks; [`weight_step`] drives the weight's
//! tick-by-tick descent before it locks.
//!
//! | Item | Effect |
//! |------|--------|
//! | Weight | crushes the row directly beneath it each tick, then locks when it rests |
//! | Bomb | clears a `(2 * BOMB_RADIUS + 1)` square around the marker |
//! | LineEraser | erases the marker's row and/or column ([`LINE_ERASER_MODE`]) |
//! | Single | no board effect, scoring bonus only |
//!
//! The regular full-line pass runs after the effect, on whatever board it leaves.

use tracing::debug;

use crate::board::{Board, RowContentsList, RowList};
use crate::rng::SimpleRng;
use crate::shape::Shape;
use crate::types::{
    EraseMode, ItemKind, PieceKind, BOARD_HEIGHT, BOARD_WIDTH, BOMB_RADIUS, ITEM_SPAWN_INTERVAL,
    LINE_ERASER_MODE,
};

/// What an item effect did to the board
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ItemOutcome {
    /// Filled cells emptied by the effect (rows erased by a line-eraser included)
    pub cells_removed: usize,
    /// Rows removed with compaction; these count as cleared lines
    pub rows_erased: RowList,
    /// Tag contents of each erased row before removal, parallel to `rows_erased`
    pub erased_contents: RowContentsList,
}

/// Resolve the effect of an item that just locked with its marker at `marker`
pub fn apply_item_effect(board: &mut Board, item: ItemKind, marker: (i8, i8)) -> ItemOutcome {
    let outcome = match item {
        ItemKind::Bomb => explode(board, marker),
        ItemKind::LineEraser => erase(board, marker, LINE_ERASER_MODE),
        // Weight does its work while descending; Single only scores.
        ItemKind::Weight | ItemKind::Single | ItemKind::None => ItemOutcome::default(),
    };

    if item.is_item() {
        debug!(
            item = item.as_str(),
            x = marker.0,
            y = marker.1,
            cells_removed = outcome.cells_removed,
            rows_erased = outcome.rows_erased.len(),
            "item effect resolved"
        );
    }

    outcome
}

fn explode(board: &mut Board, (cx, cy): (i8, i8)) -> ItemOutcome {
    let mut cells_removed = 0;
    for y in cy - BOMB_RADIUS..=cy + BOMB_RADIUS {
        for x in cx - BOMB_RADIUS..=cx + BOMB_RADIUS {
            if board.clear_cell(x, y) {
                cells_removed += 1;
            }
        }
    }
    ItemOutcome {
        cells_removed,
        ..ItemOutcome::default()
    }
}

fn erase(board: &mut Board, (mx, my): (i8, i8), mode: EraseMode) -> ItemOutcome {
    let mut outcome = ItemOutcome::default();

    if matches!(mode, EraseMode::Column | EraseMode::Cross) {
        for y in 0..BOARD_HEIGHT as i8 {
            if board.clear_cell(mx, y) {
                outcome.cells_removed += 1;
            }
        }
    }

    if matches!(mode, EraseMode::Row | EraseMode::Cross) && !board.is_out_of_bounds(mx, my) {
        let row = my as usize;
        outcome.cells_removed += (0..BOARD_WIDTH as i8)
            .filter(|&x| board.is_occupied(x, my))
            .count();
        outcome.erased_contents.push(board.row_tags(row));
        board.clear_lines(&[row]);
        outcome.rows_erased.push(row);
    }

    outcome
}

/// Result of one weight descent tick
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WeightStep {
    /// Cells beneath were destroyed; `fell` if the weight then moved down a row
    Crushed { cells: usize, fell: bool },
    /// Nothing beneath to crush, moved down a row
    Fell,
    /// Nothing to crush and no room to fall; the weight locks now
    Rested,
}

/// One tick of weight descent at (x, *y)
///
/// Destroys the single board cell directly beneath each filled weight cell (never
/// anything further down), then moves down one row if the space is now free.
pub fn weight_step(board: &mut Board, shape: &Shape, x: i8, y: &mut i8) -> WeightStep {
    let mut cells = 0;
    for (dx, dy) in shape.filled_cells() {
        if shape.item_type_at(dx, dy) != ItemKind::Weight || shape.is_filled(dx, dy + 1) {
            continue;
        }
        if board.clear_cell(x + dx, *y + dy + 1) {
            cells += 1;
        }
    }

    let fell = !board.collides(shape, x, *y + 1);
    if fell {
        *y += 1;
    }

    match (cells, fell) {
        (0, true) => WeightStep::Fell,
        (0, false) => WeightStep::Rested,
        (cells, fell) => WeightStep::Crushed { cells, fell },
    }
}

/// Item-mode flag plus the running cleared-line count that gates item spawns
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ItemManager {
    item_mode: bool,
    lines_cleared: u32,
    pending: bool,
}

impl ItemManager {
    pub fn new(item_mode: bool) -> Self {
        Self {
            item_mode,
            lines_cleared: 0,
            pending: false,
        }
    }

    pub fn item_mode(&self) -> bool {
        self.item_mode
    }

    /// Lines cleared since the start of the game
    pub fn lines_cleared(&self) -> u32 {
        self.lines_cleared
    }

    /// True iff item mode is on and `total_lines_cleared` is a positive multiple
    /// of [`ITEM_SPAWN_INTERVAL`]
    pub fn should_spawn_item(&self, total_lines_cleared: u32) -> bool {
        self.item_mode
            && total_lines_cleared > 0
            && total_lines_cleared % ITEM_SPAWN_INTERVAL == 0
    }

    /// Account for a line-clear event
    ///
    /// A multi-line clear can jump over a multiple of the interval (9 -> 11), so an
    /// item is queued whenever the total crosses a boundary, not only when it lands
    /// exactly on one.
    pub fn record_lines(&mut self, lines: u32) {
        if lines == 0 {
            return;
        }
        let before = self.lines_cleared / ITEM_SPAWN_INTERVAL;
        self.lines_cleared += lines;
        let crossed = self.lines_cleared / ITEM_SPAWN_INTERVAL > before;
        if self.item_mode && (crossed || self.should_spawn_item(self.lines_cleared)) {
            self.pending = true;
        }
    }

    pub fn item_pending(&self) -> bool {
        self.pending
    }

    /// Consume the pending flag
    pub fn take_pending(&mut self) -> bool {
        std::mem::take(&mut self.pending)
    }

    /// Build a uniformly chosen item piece; `None` when item mode is off
    ///
    /// Bomb and line-eraser ride on a random tetromino with the marker stamped on
    /// one of its cells.
    pub fn spawn_random_item(&self, rng: &mut SimpleRng) -> Option<Shape> {
        if !self.item_mode {
            return None;
        }

        let item = ItemKind::ALL[rng.next_range(ItemKind::ALL.len() as u32) as usize];
        let shape = match item {
            ItemKind::Weight => Shape::weight(),
            ItemKind::Single => Shape::single(),
            ItemKind::Bomb | ItemKind::LineEraser => carrier(item, rng),
            ItemKind::None => unreachable!("ItemKind::ALL holds item kinds only"),
        };
        Some(shape)
    }
}

fn carrier(item: ItemKind, rng: &mut SimpleRng) -> Shape {
    let kind = PieceKind::ALL[rng.next_range(PieceKind::ALL.len() as u32) as usize];
    let mut shape = Shape::tetromino(kind);
    let pick = rng.next_range(shape.filled_count() as u32) as usize;
    let cell = shape.filled_cells().nth(pick);
    if let Some((x, y)) = cell {
        shape.set_embedded_item(item, x, y);
    }
    shape
}
