//! Drive a live game to a chosen [`Move`]

use thiserror::Error;
use tracing::debug;

use item_tetris_core::GameState;
use item_tetris_types::{GameAction, BOARD_WIDTH};

use crate::search::Move;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum PlaceError {
    #[error("could not rotate to target rotation")]
    RotationBlocked,
    #[error("target x would place piece out of bounds")]
    XOutOfBounds,
    #[error("could not move to target x due to collision")]
    XBlocked,
    #[error("game is not playable")]
    NotPlayable,
    #[error("no active piece")]
    NoActive,
}

impl PlaceError {
    pub fn code(self) -> &'static str {
        match self {
            PlaceError::NotPlayable => "not_playable",
            PlaceError::NoActive => "no_active",
            PlaceError::RotationBlocked | PlaceError::XOutOfBounds | PlaceError::XBlocked => {
                "invalid_place"
            }
        }
    }
}

/// Rotate, shift and hard-drop the active piece to `mv`
///
/// On error the game is left exactly as it was.
pub fn apply_move(state: &mut GameState, mv: &Move) -> Result<(), PlaceError> {
    if !state.started() || state.paused() || state.game_over() {
        return Err(PlaceError::NotPlayable);
    }
    if state.active().is_none() {
        return Err(PlaceError::NoActive);
    }

    let snapshot = state.clone();
    let result = steer(state, mv);
    if result.is_err() {
        *state = snapshot;
    }
    result
}

fn steer(state: &mut GameState, mv: &Move) -> Result<(), PlaceError> {
    for _ in 0..mv.rotation % 4 {
        if !state.try_rotate() {
            return Err(PlaceError::RotationBlocked);
        }
    }

    let Some(active) = state.active() else {
        return Err(PlaceError::NoActive);
    };

    if mv.x < 0 || mv.x + active.shape.width() as i8 > BOARD_WIDTH as i8 {
        return Err(PlaceError::XOutOfBounds);
    }

    let dx = mv.x - active.x;
    let step = dx.signum();
    for _ in 0..dx.abs() {
        if !state.try_move(step, 0) {
            return Err(PlaceError::XBlocked);
        }
    }

    debug!(x = mv.x, rotation = mv.rotation, "placing piece");

    if !state.apply_action(GameAction::HardDrop) {
        return Err(PlaceError::NotPlayable);
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use item_tetris_core::{GameConfig, Shape};
    use item_tetris_types::PieceKind;

    fn started() -> GameState {
        let mut state = GameState::new(GameConfig::default());
        state.start();
        state
    }

    fn mv(x: i8, rotation: u8) -> Move {
        Move {
            x,
            rotation,
            final_y: 0,
            score: 0.0,
        }
    }

    #[test]
    fn place_rejected_when_paused() {
        let mut state = started();
        assert!(state.apply_action(GameAction::Pause));
        assert_eq!(apply_move(&mut state, &mv(0, 0)), Err(PlaceError::NotPlayable));
    }

    #[test]
    fn place_rejected_before_start() {
        let mut state = GameState::new(GameConfig::default());
        let err = apply_move(&mut state, &mv(0, 0)).unwrap_err();
        assert_eq!(err.code(), "not_playable");
    }

    #[test]
    fn place_out_of_bounds_leaves_state() {
        let mut state = started();
        assert!(state.spawn_shape(Shape::tetromino(PieceKind::O)));
        let before = state.active();

        let err = apply_move(&mut state, &mv(9, 0)).unwrap_err();

        assert_eq!(err, PlaceError::XOutOfBounds);
        assert_eq!(err.code(), "invalid_place");
        assert_eq!(state.active(), before);
    }

    #[test]
    fn place_rotates_shifts_and_drops() {
        let mut state = started();
        assert!(state.spawn_shape(Shape::tetromino(PieceKind::I)));

        apply_move(&mut state, &mv(0, 1)).unwrap();

        for y in 16..20 {
            assert!(state.board().is_occupied(0, y));
        }
        assert_eq!(state.board().occupied_count(), 4);
    }

    #[test]
    fn place_error_display() {
        assert_eq!(PlaceError::XBlocked.to_string(), "could not move to target x due to collision");
    }
}
