//! Headless autoplay runner (default binary).
//!
//! Plays one game with the best-move search and prints the final score record
//! as a single JSON line on stdout. Logs go to stderr.
//!
//! Configuration: `TETRIS_ITEM_MODE`, `TETRIS_DIFFICULTY`, `TETRIS_SEED`, then
//! `--items` / `--no-items`, `--difficulty <easy|normal|hard>`, `--seed <u32>`.

use anyhow::{anyhow, Context, Result};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use item_tetris::core::{GameConfig, GameState};
use item_tetris::engine::{apply_move, MoveSearch};
use item_tetris::types::GameAction;

/// Upper bound on placements so a strong search still terminates
const MAX_PIECES: u32 = 10_000;

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let args: Vec<String> = std::env::args().skip(1).collect();
    let config = GameConfig::default()
        .apply_env()
        .context("reading TETRIS_* environment")?
        .with_args(&args)
        .map_err(|e| anyhow!("[Autoplay] {} ({})", e, e.code()))?;

    info!(
        item_mode = config.item_mode,
        difficulty = config.difficulty.as_str(),
        seed = config.seed,
        "[Autoplay] starting"
    );

    let mut game = GameState::new(config);
    game.start();
    run(&mut game, &MoveSearch::for_config(config));

    info!(
        score = game.score(),
        lines = game.lines(),
        level = game.level(),
        pieces = game.piece_id(),
        "[Autoplay] finished"
    );

    if !game.game_over() {
        game.end_game();
    }
    let record = game
        .take_score_record()
        .ok_or_else(|| anyhow!("[Autoplay] no score record after game over"))?;
    println!("{}", serde_json::to_string(&record)?);

    Ok(())
}

fn run(game: &mut GameState, search: &MoveSearch) {
    while !game.game_over() && game.piece_id() < MAX_PIECES {
        if game.active().is_some_and(|a| !a.shape.can_steer()) {
            // Landed weight: keep crushing until it rests
            game.apply_action(GameAction::HardDrop);
        } else {
            let Some(mv) = search.best_move_for(game) else {
                info!("[Autoplay] no legal placement, topping out");
                game.end_game();
                break;
            };

            if let Err(e) = apply_move(game, &mv) {
                warn!(code = e.code(), "[Autoplay] {}; dropping in place", e);
                game.apply_action(GameAction::HardDrop);
            }
        }

        if let Some(ev) = game.take_last_event() {
            info!(
                lines = ev.lines,
                item = ev.item.as_str(),
                total = game.lines(),
                "[Autoplay] cleared"
            );
        }
    }
}
