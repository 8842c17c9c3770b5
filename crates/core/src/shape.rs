//! Shape module - piece geometry, clockwise rotation and item overlays
//!
//! A shape is a small rectangular grid (at most 4x4) of filled/empty cells with a
//! parallel item overlay of the same dimensions. Coordinates are `(x, y)` where `x`
//! is the column and `y` the row inside the shape's bounding box, `(0, 0)` top-left.
//!
//! Rotation is a pure 90° clockwise matrix transform: a filled cell at row `i`,
//! column `j` of an `R x C` grid lands at row `j`, column `R - 1 - i` of the new
//! `C x R` grid. The overlay is rotated in the same pass.

use crate::types::{ItemKind, PieceKind, SINGLE_TAG, WEIGHT_TAG};

/// Largest side of any shape's bounding box
pub const MAX_SHAPE_DIM: usize = 4;

type Grid = [[u8; MAX_SHAPE_DIM]; MAX_SHAPE_DIM];

const I_ROWS: &[&[u8]] = &[&[1, 1, 1, 1]];
const O_ROWS: &[&[u8]] = &[&[1, 1], &[1, 1]];
const J_ROWS: &[&[u8]] = &[&[1, 0, 0], &[1, 1, 1]];
const L_ROWS: &[&[u8]] = &[&[0, 0, 1], &[1, 1, 1]];
const S_ROWS: &[&[u8]] = &[&[0, 1, 1], &[1, 1, 0]];
const Z_ROWS: &[&[u8]] = &[&[1, 1, 0], &[0, 1, 1]];
const T_ROWS: &[&[u8]] = &[&[0, 1, 0], &[1, 1, 1]];
const WEIGHT_ROWS: &[&[u8]] = &[&[0, 1, 1, 0], &[1, 1, 1, 1]];
const SINGLE_ROWS: &[&[u8]] = &[&[1]];

/// Canonical rows for a tetromino in spawn orientation
pub fn canonical_rows(kind: PieceKind) -> &'static [&'static [u8]] {
    match kind {
        PieceKind::I => I_ROWS,
        PieceKind::O => O_ROWS,
        PieceKind::J => J_ROWS,
        PieceKind::L => L_ROWS,
        PieceKind::S => S_ROWS,
        PieceKind::Z => Z_ROWS,
        PieceKind::T => T_ROWS,
    }
}

/// What a shape is, independent of the items stamped on it
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ShapeKind {
    Tetromino(PieceKind),
    /// Fixed-orientation crusher; every cell carries [`ItemKind::Weight`]
    Weight,
    /// 1x1 bonus piece
    Single,
}

/// Descent bookkeeping for a weight piece
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct WeightState {
    /// Set on the first tick the weight cannot fall freely
    pub touched_ground: bool,
    /// Horizontal moves are allowed until the weight touches ground
    pub can_move: bool,
}

impl Default for WeightState {
    fn default() -> Self {
        Self {
            touched_ground: false,
            can_move: true,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Shape {
    kind: ShapeKind,
    width: u8,
    height: u8,
    /// `cells[y][x]`, 0 = empty, 1 = filled
    cells: Grid,
    /// `items[y][x]`, item id per cell (0 = none)
    items: Grid,
    /// Clockwise quarter turns applied since spawn (0..=3)
    rotation: u8,
    weight: Option<WeightState>,
}

impl Shape {
    fn from_rows(kind: ShapeKind, rows: &[&[u8]]) -> Self {
        let height = rows.len();
        let width = rows.first().map_or(0, |r| r.len());
        assert!(height <= MAX_SHAPE_DIM && width <= MAX_SHAPE_DIM);
        assert!(rows.iter().all(|r| r.len() == width));

        let mut cells = [[0u8; MAX_SHAPE_DIM]; MAX_SHAPE_DIM];
        for (y, row) in rows.iter().enumerate() {
            for (x, &v) in row.iter().enumerate() {
                cells[y][x] = u8::from(v != 0);
            }
        }

        Self {
            kind,
            width: width as u8,
            height: height as u8,
            cells,
            items: [[0u8; MAX_SHAPE_DIM]; MAX_SHAPE_DIM],
            rotation: 0,
            weight: None,
        }
    }

    /// Plain tetromino in spawn orientation
    pub fn tetromino(kind: PieceKind) -> Self {
        Self::from_rows(ShapeKind::Tetromino(kind), canonical_rows(kind))
    }

    /// Weight item piece: two pre-baked rows, every cell tagged as weight
    pub fn weight() -> Self {
        let mut shape = Self::from_rows(ShapeKind::Weight, WEIGHT_ROWS);
        shape.stamp_all(ItemKind::Weight);
        shape.weight = Some(WeightState::default());
        shape
    }

    /// Single-cell item piece
    pub fn single() -> Self {
        let mut shape = Self::from_rows(ShapeKind::Single, SINGLE_ROWS);
        shape.stamp_all(ItemKind::Single);
        shape
    }

    pub fn from_kind(kind: ShapeKind) -> Self {
        match kind {
            ShapeKind::Tetromino(k) => Self::tetromino(k),
            ShapeKind::Weight => Self::weight(),
            ShapeKind::Single => Self::single(),
        }
    }

    fn stamp_all(&mut self, item: ItemKind) {
        for y in 0..self.height as usize {
            for x in 0..self.width as usize {
                if self.cells[y][x] != 0 {
                    self.items[y][x] = item.id();
                }
            }
        }
    }

    pub fn kind(&self) -> ShapeKind {
        self.kind
    }

    pub fn width(&self) -> u8 {
        self.width
    }

    pub fn height(&self) -> u8 {
        self.height
    }

    /// Clockwise quarter turns applied since spawn (0..=3)
    pub fn rotation(&self) -> u8 {
        self.rotation
    }

    #[inline(always)]
    fn index(&self, x: i8, y: i8) -> Option<(usize, usize)> {
        if x < 0 || y < 0 || x >= self.width as i8 || y >= self.height as i8 {
            return None;
        }
        Some((y as usize, x as usize))
    }

    /// Cell value at `(x, y)`; 0 outside the bounding box
    pub fn cell(&self, x: i8, y: i8) -> u8 {
        self.index(x, y).map_or(0, |(r, c)| self.cells[r][c])
    }

    pub fn is_filled(&self, x: i8, y: i8) -> bool {
        self.cell(x, y) != 0
    }

    pub fn has_item_at(&self, x: i8, y: i8) -> bool {
        self.item_type_at(x, y).is_item()
    }

    /// Item at `(x, y)`; [`ItemKind::None`] outside the bounding box
    pub fn item_type_at(&self, x: i8, y: i8) -> ItemKind {
        self.index(x, y)
            .map_or(ItemKind::None, |(r, c)| ItemKind::from_id(self.items[r][c]))
    }

    /// Stamp one overlay cell with an item. Out-of-range coordinates are ignored.
    pub fn set_embedded_item(&mut self, item: ItemKind, x: i8, y: i8) {
        if let Some((r, c)) = self.index(x, y) {
            self.items[r][c] = item.id();
        }
    }

    /// Rotate 90° clockwise in place. Weight pieces never rotate.
    pub fn rotate(&mut self) {
        if self.kind == ShapeKind::Weight {
            return;
        }

        let rows = self.height as usize;
        let cols = self.width as usize;
        let mut cells = [[0u8; MAX_SHAPE_DIM]; MAX_SHAPE_DIM];
        let mut items = [[0u8; MAX_SHAPE_DIM]; MAX_SHAPE_DIM];

        for i in 0..rows {
            for j in 0..cols {
                cells[j][rows - 1 - i] = self.cells[i][j];
                items[j][rows - 1 - i] = self.items[i][j];
            }
        }

        self.cells = cells;
        self.items = items;
        self.width = rows as u8;
        self.height = cols as u8;
        self.rotation = (self.rotation + 1) % 4;
    }

    /// Copy of this shape rotated `turns` quarter turns clockwise
    pub fn rotated(&self, turns: u8) -> Self {
        let mut out = *self;
        for _ in 0..turns % 4 {
            out.rotate();
        }
        out
    }

    /// Offsets `(dx, dy)` of every filled cell, row-major
    pub fn filled_cells(&self) -> impl Iterator<Item = (i8, i8)> + '_ {
        (0..self.height as i8).flat_map(move |y| {
            (0..self.width as i8)
                .filter(move |&x| self.is_filled(x, y))
                .map(move |x| (x, y))
        })
    }

    pub fn filled_count(&self) -> usize {
        self.filled_cells().count()
    }

    /// The item this piece carries, if any (first marked cell, row-major)
    pub fn item_kind(&self) -> ItemKind {
        self.item_marker().map_or(ItemKind::None, |(_, _, item)| item)
    }

    /// Offset and kind of the first item-marked cell, row-major
    pub fn item_marker(&self) -> Option<(i8, i8, ItemKind)> {
        self.filled_cells().find_map(|(x, y)| {
            let item = self.item_type_at(x, y);
            item.is_item().then_some((x, y, item))
        })
    }

    /// Metadata tag written to the board for this piece's cells
    pub fn tag(&self) -> u8 {
        match self.kind {
            ShapeKind::Tetromino(kind) => kind.tag(),
            ShapeKind::Weight => WEIGHT_TAG,
            ShapeKind::Single => SINGLE_TAG,
        }
    }

    pub fn is_weight(&self) -> bool {
        self.weight.is_some()
    }

    pub fn weight_state(&self) -> Option<WeightState> {
        self.weight
    }

    /// Record ground contact; a touched weight can no longer be steered
    pub fn mark_touched(&mut self) {
        if let Some(state) = self.weight.as_mut() {
            state.touched_ground = true;
            state.can_move = false;
        }
    }

    /// Whether horizontal movement and rotation are still accepted
    pub fn can_steer(&self) -> bool {
        !matches!(self.weight, Some(w) if !w.can_move)
    }
}
