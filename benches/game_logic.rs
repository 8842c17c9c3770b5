use criterion::{black_box, criterion_group, criterion_main, Criterion};
use item_tetris::core::{Board, GameConfig, GameState, Shape};
use item_tetris::engine::MoveSearch;
use item_tetris::types::{Difficulty, ItemKind, PieceKind};

fn bench_tick(c: &mut Criterion) {
    let mut state = GameState::new(GameConfig::new(true, Difficulty::Normal).with_seed(12345));
    state.start();

    c.bench_function("game_tick_16ms", |b| {
        b.iter(|| {
            state.tick(black_box(16), false);
        })
    });
}

fn bench_line_clear(c: &mut Criterion) {
    c.bench_function("clear_4_lines", |b| {
        b.iter(|| {
            let mut board = Board::new();
            // Fill bottom 4 rows
            for y in 16..20 {
                for x in 0..10 {
                    board.set(x, y, PieceKind::I.tag(), ItemKind::None);
                }
            }
            board.clear_full_rows();
        })
    });
}

fn bench_try_move(c: &mut Criterion) {
    let mut state = GameState::new(GameConfig::default().with_seed(12345));
    state.start();

    c.bench_function("try_move", |b| {
        b.iter(|| {
            state.try_move(1, 0);
            state.try_move(-1, 0);
        })
    });
}

fn bench_find_best_move(c: &mut Criterion) {
    let board = Board::from_rows(&[
        "...#......",
        "#.###..##.",
        "####.####.",
        "#########.",
    ]);
    let search = MoveSearch::default();
    let shape = Shape::tetromino(PieceKind::T);

    c.bench_function("find_best_move", |b| {
        b.iter(|| search.find_best_move(black_box(&board), black_box(&shape)))
    });
}

criterion_group!(
    benches,
    bench_tick,
    bench_line_clear,
    bench_try_move,
    bench_find_best_move
);
criterion_main!(benches);
