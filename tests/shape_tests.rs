//! Shape model tests - rotation algebra and item overlays

use item_tetris::core::{Shape, ShapeKind};
use item_tetris::types::{ItemKind, PieceKind};

fn cells(shape: &Shape) -> Vec<(i8, i8)> {
    shape.filled_cells().collect()
}

#[test]
fn test_four_rotations_are_identity() {
    for kind in PieceKind::ALL {
        let original = Shape::tetromino(kind);
        let mut shape = original;
        for _ in 0..4 {
            shape.rotate();
        }
        assert_eq!(shape, original, "Piece {:?} did not return to spawn", kind);
    }
}

#[test]
fn test_filled_count_invariant_under_rotation() {
    for kind in PieceKind::ALL {
        let mut shape = Shape::tetromino(kind);
        for turn in 0..4 {
            assert_eq!(shape.filled_count(), 4, "{:?} turn {}", kind, turn);
            shape.rotate();
        }
    }
}

#[test]
fn test_rotation_maps_row_col() {
    // L: [[0,0,1],[1,1,1]] -> cell (row i, col j) lands on (row j, col R-1-i)
    let l = Shape::tetromino(PieceKind::L);
    let r = l.rotated(1);
    assert_eq!((r.width(), r.height()), (2, 3));
    for (x, y) in cells(&l) {
        let (i, j) = (y, x);
        let rows = l.height() as i8;
        assert!(r.is_filled(rows - 1 - i, j), "cell ({}, {}) lost", x, y);
    }
}

#[test]
fn test_rotation_counter_wraps() {
    let mut s = Shape::tetromino(PieceKind::S);
    for expected in [1, 2, 3, 0, 1] {
        s.rotate();
        assert_eq!(s.rotation(), expected);
    }
}

#[test]
fn test_overlay_follows_rotation() {
    let mut t = Shape::tetromino(PieceKind::T);
    t.set_embedded_item(ItemKind::LineEraser, 1, 0);
    assert_eq!(t.item_kind(), ItemKind::LineEraser);

    for _ in 0..4 {
        t.rotate();
        let marked: Vec<_> = cells(&t)
            .into_iter()
            .filter(|&(x, y)| t.has_item_at(x, y))
            .collect();
        assert_eq!(marked.len(), 1);
        let (x, y) = marked[0];
        assert_eq!(t.item_type_at(x, y), ItemKind::LineEraser);
    }
    assert_eq!(t.item_marker(), Some((1, 0, ItemKind::LineEraser)));
}

#[test]
fn test_out_of_range_queries_are_safe() {
    let mut i = Shape::tetromino(PieceKind::I);
    i.set_embedded_item(ItemKind::Bomb, 3, 0);
    i.rotate();

    // Old horizontal coordinates are now out of range
    assert!(!i.has_item_at(3, 0));
    assert_eq!(i.item_type_at(3, 0), ItemKind::None);
    assert_eq!(i.cell(-1, 0), 0);
    assert_eq!(i.cell(0, 4), 0);
    assert!(!i.has_item_at(-1, -1));

    // Stamping out of range is ignored
    let mut o = Shape::tetromino(PieceKind::O);
    o.set_embedded_item(ItemKind::Bomb, 5, 5);
    assert_eq!(o.item_kind(), ItemKind::None);
}

#[test]
fn test_weight_is_fixed() {
    let weight = Shape::weight();
    assert_eq!(weight.kind(), ShapeKind::Weight);
    assert_eq!((weight.width(), weight.height()), (4, 2));
    assert_eq!(weight.rotated(1), weight);
    assert_eq!(weight.rotated(3), weight);
    assert!(cells(&weight)
        .iter()
        .all(|&(x, y)| weight.item_type_at(x, y) == ItemKind::Weight));

    let state = weight.weight_state().unwrap();
    assert!(!state.touched_ground);
    assert!(state.can_move);
}

#[test]
fn test_weight_touch_stops_steering() {
    let mut weight = Shape::weight();
    assert!(weight.can_steer());
    weight.mark_touched();
    assert!(!weight.can_steer());
    assert!(weight.weight_state().unwrap().touched_ground);

    // Marking a normal piece does nothing
    let mut t = Shape::tetromino(PieceKind::T);
    t.mark_touched();
    assert!(t.can_steer());
    assert!(t.weight_state().is_none());
}

#[test]
fn test_single_piece() {
    let single = Shape::single();
    assert_eq!(single.filled_count(), 1);
    assert_eq!(single.item_kind(), ItemKind::Single);
    assert_eq!(single.rotated(1).filled_count(), 1);
}

#[test]
fn test_from_kind_round_trip() {
    for kind in PieceKind::ALL {
        let shape = Shape::from_kind(ShapeKind::Tetromino(kind));
        assert_eq!(shape.kind(), ShapeKind::Tetromino(kind));
        assert_eq!(shape.tag(), kind.tag());
    }
    assert!(Shape::from_kind(ShapeKind::Weight).is_weight());
}
