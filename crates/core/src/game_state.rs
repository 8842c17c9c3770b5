//! Game state module - owns the live board and the falling piece
//!
//! This module ties together the board, shapes, items, RNG and scoring. It handles
//! game timing, piece movement, rotation, the lock pipeline and game lifecycle.
//!
//! Lock pipeline, run to completion inside the call that triggered it:
//!
//! 1. copy the piece onto the board
//! 2. resolve the piece's item effect, if any
//! 3. find and clear full lines
//! 4. score, item accounting, line-clear event
//! 5. insert queued garbage and spawn the next piece

use tracing::{debug, info};

use crate::board::{Board, RowContentsList, RowList};
use crate::config::GameConfig;
use crate::items::{apply_item_effect, weight_step, ItemManager, WeightStep};
use crate::rng::{PieceGenerator, SimpleRng};
use crate::scoring::{
    calculate_drop_score, calculate_line_score, get_drop_interval_ms, single_item_bonus,
    ScoreRecord,
};
use crate::shape::Shape;
use crate::snapshot::{ActiveSnapshot, GameSnapshot};
use crate::types::*;

/// Horizontal offsets tried, in order, when a rotation collides in place
const ROTATION_KICKS: [i8; 5] = [0, -1, 1, -2, 2];

/// Active falling piece
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ActivePiece {
    pub shape: Shape,
    pub x: i8,
    pub y: i8,
}

impl ActivePiece {
    /// Place a shape at the spawn position: horizontally centred, top row
    pub fn spawn(shape: Shape) -> Self {
        Self {
            x: ((BOARD_WIDTH - shape.width()) / 2) as i8,
            y: 0,
            shape,
        }
    }

    /// Board coordinates of every filled cell
    pub fn cells(&self) -> impl Iterator<Item = (i8, i8)> + '_ {
        self.shape
            .filled_cells()
            .map(move |(dx, dy)| (self.x + dx, self.y + dy))
    }

    /// Check if all cells are at valid positions on the board
    pub fn is_valid(&self, board: &Board) -> bool {
        !board.collides(&self.shape, self.x, self.y)
    }

    /// Check if the piece is grounded (resting on something)
    pub fn is_grounded(&self, board: &Board) -> bool {
        board.collides(&self.shape, self.x, self.y + 1)
    }
}

/// Emitted when a lock removes at least one row
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LineClearEvent {
    /// Rows removed by this lock (line-eraser rows included)
    pub lines: u32,
    /// Removed row indices, each as it was at the moment of removal
    pub rows: RowList,
    /// Tag contents of each removed row, parallel to `rows`
    pub contents: RowContentsList,
    /// Item carried by the piece that triggered the clear
    pub item: ItemKind,
    /// Points awarded for the clear
    pub score: u32,
}

/// Complete game state
#[derive(Debug, Clone)]
pub struct GameState {
    config: GameConfig,
    board: Board,
    active: Option<ActivePiece>,
    rng: SimpleRng,
    generator: PieceGenerator,
    items: ItemManager,
    /// Monotonic id for spawned pieces
    piece_id: u32,
    last_event: Option<LineClearEvent>,
    pending_garbage: u32,
    score: u32,
    level: u32,
    lines: u32,
    drop_timer_ms: u32,
    lock_timer_ms: u32,
    lock_reset_count: u8,
    paused: bool,
    game_over: bool,
    started: bool,
    is_soft_dropping: bool,
    score_taken: bool,
}

impl GameState {
    /// Create a new game from an explicit configuration
    pub fn new(config: GameConfig) -> Self {
        let mut rng = SimpleRng::new(config.seed);
        let generator = PieceGenerator::new(config.difficulty, &mut rng);

        Self {
            config,
            board: Board::new(),
            active: None,
            rng,
            generator,
            items: ItemManager::new(config.item_mode),
            piece_id: 0,
            last_event: None,
            pending_garbage: 0,
            score: 0,
            level: 0,
            lines: 0,
            drop_timer_ms: 0,
            lock_timer_ms: 0,
            lock_reset_count: 0,
            paused: false,
            game_over: false,
            started: false,
            is_soft_dropping: false,
            score_taken: false,
        }
    }

    /// Start the game and spawn the first piece
    pub fn start(&mut self) {
        if self.started {
            return;
        }
        self.started = true;
        self.spawn_piece();
    }

    pub fn config(&self) -> GameConfig {
        self.config
    }

    pub fn started(&self) -> bool {
        self.started
    }

    pub fn paused(&self) -> bool {
        self.paused
    }

    pub fn game_over(&self) -> bool {
        self.game_over
    }

    pub fn piece_id(&self) -> u32 {
        self.piece_id
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn level(&self) -> u32 {
        self.level
    }

    pub fn lines(&self) -> u32 {
        self.lines
    }

    pub fn item_manager(&self) -> &ItemManager {
        &self.items
    }

    pub fn active(&self) -> Option<ActivePiece> {
        self.active
    }

    /// The tetromino that spawns next (an earned item piece may cut in first)
    pub fn next_piece(&self) -> PieceKind {
        self.generator.peek()
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    /// Mutable board access for fixtures and scenario setup
    pub fn board_mut(&mut self) -> &mut Board {
        &mut self.board
    }

    pub fn pending_garbage(&self) -> u32 {
        self.pending_garbage
    }

    pub fn snapshot_into(&self, out: &mut GameSnapshot) {
        out.write_board(&self.board);

        out.active = self.active.map(ActiveSnapshot::from);
        out.ghost_y = self.ghost_y();
        out.next = self.generator.peek();
        out.item_pending = self.items.item_pending();
        out.paused = self.paused;
        out.game_over = self.game_over;
        out.item_mode = self.config.item_mode;
        out.difficulty = self.config.difficulty;
        out.piece_id = self.piece_id;
        out.score = self.score;
        out.level = self.level;
        out.lines = self.lines;
    }

    pub fn snapshot(&self) -> GameSnapshot {
        let mut s = GameSnapshot::default();
        self.snapshot_into(&mut s);
        s
    }

    /// Spawn the next piece: an earned item piece if one is pending, otherwise
    /// the previewed tetromino
    pub fn spawn_piece(&mut self) -> bool {
        let item_shape = if self.items.take_pending() {
            self.items.spawn_random_item(&mut self.rng)
        } else {
            None
        };

        let shape = match item_shape {
            Some(shape) => {
                info!(item = shape.item_kind().as_str(), "item piece spawned");
                shape
            }
            None => Shape::tetromino(self.generator.draw(&mut self.rng)),
        };

        self.spawn_shape(shape)
    }

    /// Spawn a specific shape at the spawn position
    ///
    /// Queued garbage is inserted first. Returns false (and ends the game) if the
    /// spawn position is blocked.
    pub fn spawn_shape(&mut self, shape: Shape) -> bool {
        if self.game_over {
            return false;
        }

        self.insert_pending_garbage();

        let piece = ActivePiece::spawn(shape);
        if !piece.is_valid(&self.board) {
            self.active = None;
            self.set_game_over();
            return false;
        }

        self.active = Some(piece);
        self.piece_id = self.piece_id.wrapping_add(1);
        self.drop_timer_ms = 0;
        self.lock_timer_ms = 0;
        self.lock_reset_count = 0;

        true
    }

    /// End the game now, e.g. when a controller finds no legal placement
    pub fn end_game(&mut self) {
        self.active = None;
        self.set_game_over();
    }

    fn set_game_over(&mut self) {
        if !self.game_over {
            self.game_over = true;
            info!(score = self.score, lines = self.lines, "game over");
        }
    }

    /// Queue garbage rows sent by an opponent; they arrive on the next spawn
    pub fn receive_garbage(&mut self, rows: u32) {
        self.pending_garbage = self
            .pending_garbage
            .saturating_add(rows)
            .min(GARBAGE_QUEUE_LIMIT);
    }

    fn insert_pending_garbage(&mut self) {
        if self.pending_garbage == 0 {
            return;
        }
        let rows = std::mem::take(&mut self.pending_garbage);
        let hole = self.rng.next_range(BOARD_WIDTH as u32) as usize;
        self.board.push_garbage(rows as usize, hole, GARBAGE_TAG);
        debug!(rows, hole, "garbage inserted");
    }

    /// Get current drop interval based on level and difficulty
    pub fn drop_interval_ms(&self) -> u32 {
        let base = get_drop_interval_ms(self.level, self.config.difficulty);
        if self.is_soft_dropping {
            base / SOFT_DROP_MULTIPLIER
        } else {
            base
        }
    }

    /// Try to move the active piece
    pub fn try_move(&mut self, dx: i8, dy: i8) -> bool {
        let Some(active) = self.active else {
            return false;
        };

        if dx != 0 && !active.shape.can_steer() {
            return false;
        }

        let Some((x, y)) = self
            .board
            .try_move(&active.shape, (active.x, active.y), (dx, dy))
        else {
            return false;
        };

        self.active = Some(ActivePiece { x, y, ..active });

        // If we moved while grounded, reset lock timer (with limit)
        if dy != 0 || (dx != 0 && self.is_grounded()) {
            self.reset_lock_timer();
        }

        true
    }

    /// Try to rotate the active piece clockwise, kicking sideways if needed
    pub fn try_rotate(&mut self) -> bool {
        let Some(active) = self.active else {
            return false;
        };

        if !active.shape.can_steer() {
            return false;
        }

        let rotated = active.shape.rotated(1);
        if rotated == active.shape {
            // Weight pieces keep their orientation.
            return false;
        }

        for kick in ROTATION_KICKS {
            let x = active.x + kick;
            if !self.board.collides(&rotated, x, active.y) {
                self.active = Some(ActivePiece {
                    shape: rotated,
                    x,
                    y: active.y,
                });
                self.reset_lock_timer();
                return true;
            }
        }

        false
    }

    /// Reset the lock timer (with reset limit)
    fn reset_lock_timer(&mut self) {
        if self.lock_reset_count < LOCK_RESET_LIMIT {
            self.lock_timer_ms = 0;
            self.lock_reset_count += 1;
        }
    }

    /// Hard drop the active piece and lock it
    ///
    /// A weight piece lands at first contact and runs a single crush step. It
    /// locks only if that step finds it resting; otherwise gravity ticks (or
    /// further hard drops) keep crushing one row at a time.
    pub fn hard_drop(&mut self) -> u32 {
        let Some(active) = self.active else {
            return 0;
        };

        let landing_y = self.board.drop_from(&active.shape, active.x, active.y);
        let dropped = (landing_y - active.y) as u32;
        self.active = Some(ActivePiece {
            y: landing_y,
            ..active
        });

        if active.shape.is_weight() {
            if self.step_weight() == WeightStep::Rested {
                self.lock_piece();
            }
        } else {
            self.lock_piece();
        }

        calculate_drop_score(dropped, true)
    }

    /// One weight descent step on the active piece; does not lock
    fn step_weight(&mut self) -> WeightStep {
        let Some(mut active) = self.active else {
            return WeightStep::Rested;
        };
        active.shape.mark_touched();
        let step = weight_step(&mut self.board, &active.shape, active.x, &mut active.y);
        self.active = Some(active);
        if let WeightStep::Crushed { cells, .. } = step {
            debug!(cells, x = active.x, y = active.y, "weight crushed cells");
        }
        step
    }

    /// Lock the active piece onto the board and run the lock pipeline
    pub fn lock_piece(&mut self) {
        let Some(active) = self.active.take() else {
            return;
        };

        self.board.lock(&active.shape, active.x, active.y);

        let item = active.shape.item_kind();
        let mut rows = RowList::new();
        let mut contents = RowContentsList::new();
        let mut gained: u32 = 0;

        if item.is_item() {
            let marker = active
                .shape
                .item_marker()
                .map_or((active.x, active.y), |(dx, dy, _)| {
                    (active.x + dx, active.y + dy)
                });
            let outcome = apply_item_effect(&mut self.board, item, marker);
            for (y, tags) in outcome.rows_erased.iter().zip(outcome.erased_contents.iter()) {
                rows.push(*y);
                contents.push(*tags);
            }
            if item == ItemKind::Single {
                gained += single_item_bonus();
            }
        }

        let full = self.board.find_full_lines();
        for &y in &full {
            rows.push(y);
            contents.push(self.board.row_tags(y));
        }
        self.board.clear_lines(&full);

        let lines_cleared = rows.len() as u32;
        debug!(
            x = active.x,
            y = active.y,
            item = item.as_str(),
            lines = lines_cleared,
            "piece locked"
        );

        if lines_cleared > 0 {
            let line_score =
                calculate_line_score(rows.len(), self.level, self.config.difficulty);
            gained += line_score;

            self.lines += lines_cleared;
            self.level = self.lines / 10;
            self.items.record_lines(lines_cleared);

            self.last_event = Some(LineClearEvent {
                lines: lines_cleared,
                rows,
                contents,
                item,
                score: line_score,
            });
        }

        self.score += gained;

        if !self.game_over {
            self.spawn_piece();
        }
    }

    /// Take and clear the last line-clear event.
    pub fn take_last_event(&mut self) -> Option<LineClearEvent> {
        self.last_event.take()
    }

    /// Final score handoff; `Some` exactly once, after the game has ended
    pub fn take_score_record(&mut self) -> Option<ScoreRecord> {
        if !self.game_over || self.score_taken {
            return None;
        }
        self.score_taken = true;
        Some(ScoreRecord {
            score: self.score,
            item_mode: self.config.item_mode,
            difficulty: self.config.difficulty,
        })
    }

    /// Check if the active piece is on the ground
    pub fn is_grounded(&self) -> bool {
        match self.active {
            Some(ref piece) => piece.is_grounded(&self.board),
            None => false,
        }
    }

    /// Calculate the ghost piece Y position (where piece would land)
    pub fn ghost_y(&self) -> Option<i8> {
        let active = self.active?;
        Some(self.board.drop_from(&active.shape, active.x, active.y))
    }

    /// Main game tick - update timers and handle gravity
    ///
    /// Returns true if the piece moved, crushed or locked this tick.
    pub fn tick(&mut self, elapsed_ms: u32, soft_drop: bool) -> bool {
        if self.paused || self.game_over || !self.started {
            return false;
        }

        let Some(active) = self.active else {
            return false;
        };

        if soft_drop != self.is_soft_dropping {
            self.is_soft_dropping = soft_drop;
            // Apply the new speed immediately
            self.drop_timer_ms = 0;
        }

        let grounded = self.is_grounded();
        let weight = active.shape.weight_state();

        if grounded && weight.is_none() {
            self.lock_timer_ms += elapsed_ms;
            if self.lock_timer_ms >= LOCK_DELAY_MS {
                self.lock_piece();
                return true;
            }
            return false;
        }

        self.drop_timer_ms += elapsed_ms;
        if self.drop_timer_ms < self.drop_interval_ms() {
            return false;
        }
        self.drop_timer_ms = 0;

        if let Some(state) = weight {
            if grounded || state.touched_ground {
                if self.step_weight() == WeightStep::Rested {
                    self.lock_piece();
                }
                return true;
            }
        }

        if !self.try_move(0, 1) {
            return false;
        }
        if self.is_soft_dropping {
            self.score += calculate_drop_score(1, false);
        }
        true
    }

    /// Apply a game action
    pub fn apply_action(&mut self, action: GameAction) -> bool {
        if self.game_over && action != GameAction::Restart {
            return false;
        }
        if self.paused && !matches!(action, GameAction::Pause | GameAction::Restart) {
            return false;
        }

        match action {
            GameAction::MoveLeft => self.try_move(-1, 0),
            GameAction::MoveRight => self.try_move(1, 0),
            GameAction::SoftDrop => {
                let moved = self.try_move(0, 1);
                if moved {
                    self.score += calculate_drop_score(1, false);
                }
                moved
            }
            GameAction::HardDrop => {
                if self.active.is_none() {
                    return false;
                }
                let drop_score = self.hard_drop();
                self.score += drop_score;
                true
            }
            GameAction::Rotate => self.try_rotate(),
            GameAction::Pause => {
                self.paused = !self.paused;
                true
            }
            GameAction::Restart => {
                let config = self.config.with_seed(self.rng.state());
                *self = Self::new(config);
                self.start();
                true
            }
        }
    }
}

impl Default for GameState {
    fn default() -> Self {
        Self::new(GameConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn started(config: GameConfig) -> GameState {
        let mut state = GameState::new(config);
        state.start();
        state
    }

    #[test]
    fn test_new_game_state() {
        let state = GameState::new(GameConfig::default());

        assert!(!state.started);
        assert!(!state.game_over);
        assert!(!state.paused);
        assert_eq!(state.score, 0);
        assert_eq!(state.level, 0);
        assert_eq!(state.lines, 0);
        assert!(state.active.is_none());
    }

    #[test]
    fn test_game_start_spawns_centred() {
        let state = started(GameConfig::default());
        let piece = state.active.unwrap();
        assert_eq!(piece.y, 0);
        assert_eq!(
            piece.x,
            ((BOARD_WIDTH - piece.shape.width()) / 2) as i8
        );
        assert_eq!(state.piece_id, 1);
    }

    #[test]
    fn test_spawn_uses_preview() {
        let mut state = started(GameConfig::default());
        let next = state.next_piece();
        state.hard_drop();
        assert_eq!(
            state.active.unwrap().shape.kind(),
            crate::shape::ShapeKind::Tetromino(next)
        );
    }

    #[test]
    fn test_try_move() {
        let mut state = started(GameConfig::default());
        let initial_x = state.active.unwrap().x;

        assert!(state.try_move(1, 0));
        assert_eq!(state.active.unwrap().x, initial_x + 1);
        assert!(state.try_move(-1, 0));
        assert_eq!(state.active.unwrap().x, initial_x);

        // Can't move above the board
        assert!(!state.try_move(0, -1));
    }

    #[test]
    fn test_try_move_hits_wall() {
        let mut state = started(GameConfig::default());
        let mut moved = 0;
        for _ in 0..10 {
            if state.try_move(-1, 0) {
                moved += 1;
            }
        }
        assert!(moved <= 4);
        assert_eq!(state.active.unwrap().x, 0);
    }

    #[test]
    fn test_rotate_kicks_off_wall() {
        let mut state = started(GameConfig::default());
        assert!(state.spawn_shape(Shape::tetromino(PieceKind::I).rotated(1)));
        // Vertical I one column off the right wall
        for _ in 0..4 {
            assert!(state.try_move(1, 0));
        }
        assert_eq!(state.active.unwrap().x, 8);

        assert!(state.try_rotate());
        let piece = state.active.unwrap();
        assert_eq!(piece.shape.width(), 4);
        assert_eq!(piece.x, 6);
    }

    #[test]
    fn test_hard_drop_locks_and_scores() {
        let mut state = started(GameConfig::default());
        assert!(state.spawn_shape(Shape::tetromino(PieceKind::O)));

        assert!(state.apply_action(GameAction::HardDrop));

        assert!(state.board.is_occupied(4, 18));
        assert!(state.board.is_occupied(5, 19));
        assert_eq!(state.score, 18 * 2);
        assert!(state.active.is_some());
    }

    #[test]
    fn test_lock_clears_line_and_emits_event() {
        let mut state = started(GameConfig::default());
        for x in (0..10).filter(|&x| x != 4) {
            state.board.set(x, 19, 1, ItemKind::None);
        }
        state.spawn_shape(Shape::tetromino(PieceKind::I).rotated(1));
        let piece = state.active.unwrap();
        assert_eq!(piece.x, 4);

        state.hard_drop();

        let ev = state.take_last_event().expect("line clear event");
        assert_eq!(ev.lines, 1);
        assert_eq!(ev.rows.as_slice(), &[19]);
        assert_eq!(ev.contents[0][0], 1);
        assert_eq!(ev.contents[0][4], PieceKind::I.tag());
        assert_eq!(state.lines, 1);
        assert_eq!(state.board.occupied_count(), 3);
        assert!(state.take_last_event().is_none());
    }

    #[test]
    fn test_single_item_bonus() {
        let mut state = started(GameConfig::new(true, Difficulty::Normal));
        state.spawn_shape(Shape::single());
        let before = state.score;
        assert!(state.apply_action(GameAction::HardDrop));
        assert_eq!(state.score - before, SINGLE_ITEM_BONUS + 19 * 2);
        assert_eq!(state.board.item(4, 19), Some(ItemKind::Single));
    }

    #[test]
    fn test_bomb_lock_explodes() {
        let mut state = started(GameConfig::new(true, Difficulty::Normal));
        for y in 17..20 {
            for x in 0..9 {
                state.board.set(x, y, 1, ItemKind::None);
            }
        }
        let mut bomb = Shape::tetromino(PieceKind::O);
        bomb.set_embedded_item(ItemKind::Bomb, 0, 1);
        state.spawn_shape(bomb);

        state.hard_drop();

        // O lands on rows 15-16 at x 4-5; marker at (4, 16), 3x3 around it.
        for y in 15..=17 {
            for x in 3..=5 {
                assert!(state.board.is_valid(x, y), "({}, {})", x, y);
            }
        }
        assert!(state.board.is_occupied(4, 18));
        assert!(state.board.is_occupied(2, 17));
    }

    #[test]
    fn test_weight_tick_crushes_then_locks() {
        let mut state = started(GameConfig::new(true, Difficulty::Normal));
        for x in 1..10 {
            state.board.set(x, 19, 1, ItemKind::None);
        }
        state.spawn_shape(Shape::weight());
        let start_id = state.piece_id;

        // Run gravity until the weight has rested and locked
        let mut guard = 0;
        while state.piece_id == start_id && guard < 10_000 {
            state.tick(TICK_MS, false);
            guard += 1;
        }

        assert_ne!(state.piece_id, start_id);
        // Weight crushed row 19 under it, then locked at the floor
        assert_eq!(state.board.item(3, 19), Some(ItemKind::Weight));
        assert_eq!(state.board.item(4, 18), Some(ItemKind::Weight));
        assert!(state.board.is_occupied(1, 19));
        assert!(state.board.is_occupied(9, 19));
        assert!(state.board.is_valid(0, 19));
    }

    #[test]
    fn test_weight_hard_drop_crushes_one_row_per_drop() {
        let mut state = started(GameConfig::new(true, Difficulty::Normal));
        for y in 15..20 {
            for x in 0..9 {
                state.board.set(x, y, 1, ItemKind::None);
            }
        }
        state.spawn_shape(Shape::weight());
        let id = state.piece_id;

        let before = state.board.clone();
        assert!(state.apply_action(GameAction::HardDrop));

        let crushed_rows: Vec<i8> = (0..BOARD_HEIGHT as i8)
            .filter(|&y| {
                (0..BOARD_WIDTH as i8)
                    .any(|x| before.is_occupied(x, y) && !state.board.is_occupied(x, y))
            })
            .collect();
        assert_eq!(crushed_rows, vec![15]);
        assert_eq!(state.board.occupied_count(), 45 - 4);

        // Still falling, can no longer steer
        let active = state.active.unwrap();
        assert_eq!(state.piece_id, id);
        assert!(active.shape.weight_state().unwrap().touched_ground);
        assert!(!state.try_move(-1, 0));

        // Each further hard drop reaches one row deeper
        assert!(state.apply_action(GameAction::HardDrop));
        assert!(state.board.is_valid(3, 16));
        assert!(state.board.is_occupied(3, 17));

        let mut guard = 0;
        while state.piece_id == id && guard < 20 {
            state.apply_action(GameAction::HardDrop);
            guard += 1;
        }
        assert_ne!(state.piece_id, id);
        assert_eq!(state.board.item(3, 19), Some(ItemKind::Weight));
    }

    #[test]
    fn test_touched_weight_refuses_steering() {
        let mut state = started(GameConfig::new(true, Difficulty::Normal));
        state.spawn_shape(Shape::weight());
        assert!(state.try_move(1, 0));
        assert!(!state.try_rotate());

        while state.try_move(0, 1) {}
        state.step_weight();
        assert!(!state.try_move(-1, 0));
    }

    #[test]
    fn test_line_eraser_counts_as_line() {
        let mut state = started(GameConfig::new(true, Difficulty::Normal));
        state.board.set(0, 19, 1, ItemKind::None);
        let mut eraser = Shape::tetromino(PieceKind::I);
        eraser.set_embedded_item(ItemKind::LineEraser, 0, 0);
        state.spawn_shape(eraser);

        state.hard_drop();

        let ev = state.take_last_event().expect("eraser event");
        assert_eq!(ev.lines, 1);
        assert_eq!(ev.item, ItemKind::LineEraser);
        assert_eq!(state.board.occupied_count(), 0);
    }

    #[test]
    fn test_item_spawns_after_ten_lines() {
        let mut state = started(GameConfig::new(true, Difficulty::Normal));
        state.items.record_lines(10);
        assert!(state.snapshot().item_pending);
        state.hard_drop();
        let piece = state.active.unwrap();
        assert!(piece.shape.item_kind().is_item());
        assert!(!state.snapshot().item_pending);
    }

    #[test]
    fn test_no_items_when_disabled() {
        let mut state = started(GameConfig::default());
        state.items.record_lines(10);
        state.hard_drop();
        assert!(!state.active.unwrap().shape.item_kind().is_item());
    }

    #[test]
    fn test_garbage_arrives_on_spawn() {
        let mut state = started(GameConfig::default());
        state.receive_garbage(3);
        assert_eq!(state.pending_garbage(), 3);
        state.hard_drop();
        assert_eq!(state.pending_garbage(), 0);
        for y in 17..20 {
            let filled = (0..10).filter(|&x| state.board.is_occupied(x, y)).count();
            assert!(filled >= 9);
        }
    }

    #[test]
    fn test_garbage_queue_is_capped() {
        let mut state = started(GameConfig::default());
        state.receive_garbage(7);
        state.receive_garbage(7);
        assert_eq!(state.pending_garbage(), GARBAGE_QUEUE_LIMIT);
    }

    #[test]
    fn test_garbage_queue_saturates_on_huge_counts() {
        let mut state = started(GameConfig::default());
        state.receive_garbage(5);
        state.receive_garbage(u32::MAX);
        assert_eq!(state.pending_garbage(), GARBAGE_QUEUE_LIMIT);
        state.receive_garbage(u32::MAX);
        assert_eq!(state.pending_garbage(), GARBAGE_QUEUE_LIMIT);
    }

    #[test]
    fn test_game_over_and_score_record() {
        let mut state = started(GameConfig::new(true, Difficulty::Hard));
        for y in 0..2 {
            for x in 2..8 {
                state.board.set(x, y, 1, ItemKind::None);
            }
        }
        assert!(state.take_score_record().is_none());

        state.active = None;
        state.spawn_piece();

        assert!(state.game_over);
        let record = state.take_score_record().expect("record after game over");
        assert!(record.item_mode);
        assert_eq!(record.difficulty, Difficulty::Hard);
        assert!(state.take_score_record().is_none());
        assert!(!state.apply_action(GameAction::MoveLeft));
    }

    #[test]
    fn test_tick_gravity() {
        let mut state = started(GameConfig::default());
        let initial_y = state.active.unwrap().y;
        for _ in 0..70 {
            state.tick(TICK_MS, false);
        }
        assert!(state.active.unwrap().y > initial_y);
    }

    #[test]
    fn test_tick_locks_after_delay() {
        let mut state = started(GameConfig::default());
        while state.try_move(0, 1) {}
        let id = state.piece_id;
        let mut ticks = 0;
        while state.piece_id == id && ticks < 100 {
            state.tick(TICK_MS, false);
            ticks += 1;
        }
        assert_eq!(ticks, (LOCK_DELAY_MS + TICK_MS - 1) / TICK_MS);
    }

    #[test]
    fn test_drop_interval_ms() {
        let mut state = GameState::new(GameConfig::new(false, Difficulty::Normal));
        assert_eq!(state.drop_interval_ms(), 1000);
        state.level = 5;
        assert_eq!(state.drop_interval_ms(), 320);
        state.is_soft_dropping = true;
        assert_eq!(state.drop_interval_ms(), 32);
    }

    #[test]
    fn test_lock_reset_limit() {
        let mut state = started(GameConfig::default());
        for _ in 0..20 {
            state.reset_lock_timer();
        }
        assert_eq!(state.lock_reset_count, LOCK_RESET_LIMIT);
    }

    #[test]
    fn test_pause_stops_game() {
        let mut state = started(GameConfig::default());
        let initial_y = state.active.unwrap().y;
        assert!(state.apply_action(GameAction::Pause));
        for _ in 0..100 {
            state.tick(TICK_MS, false);
        }
        assert_eq!(state.active.unwrap().y, initial_y);
        assert!(!state.apply_action(GameAction::MoveLeft));
        assert!(state.apply_action(GameAction::Pause));
        assert!(!state.paused);
    }

    #[test]
    fn test_restart_keeps_config() {
        let mut state = started(GameConfig::new(true, Difficulty::Easy));
        state.hard_drop();
        assert!(state.apply_action(GameAction::Restart));
        assert!(state.started);
        assert_eq!(state.score, 0);
        assert_eq!(state.board.occupied_count(), 0);
        assert!(state.config.item_mode);
        assert_eq!(state.config.difficulty, Difficulty::Easy);
    }

    #[test]
    fn test_snapshot_mirrors_state() {
        let state = started(GameConfig::new(true, Difficulty::Hard));
        let snap = state.snapshot();
        let active = state.active.unwrap();
        assert_eq!(snap.active.map(|a| (a.x, a.y)), Some((active.x, active.y)));
        assert_eq!(snap.ghost_y, state.ghost_y());
        assert_eq!(snap.next, state.next_piece());
        assert!(snap.item_mode);
        assert_eq!(snap.difficulty, Difficulty::Hard);
    }
}
