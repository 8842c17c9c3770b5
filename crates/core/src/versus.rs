//! Two-player garbage exchange
//!
//! [`link`] returns two connected endpoints, one per board. Each side reports its
//! line clears with [`VersusEndpoint::send_clear`] and pulls incoming garbage into
//! its game with [`VersusEndpoint::drain_into`]. The games themselves never share
//! state; rows travel as plain counts over channels.

use std::sync::mpsc;

use tracing::debug;

use crate::game_state::{GameState, LineClearEvent};

/// Garbage rows sent for a clear of `lines` rows
///
/// Singles send nothing, doubles and triples send one row fewer than cleared, and
/// four or more send four.
pub fn garbage_for_clear(lines: u32) -> u32 {
    match lines {
        0 | 1 => 0,
        2 | 3 => lines - 1,
        _ => 4,
    }
}

#[derive(Debug)]
pub struct VersusEndpoint {
    tx: mpsc::Sender<u32>,
    rx: mpsc::Receiver<u32>,
}

/// Create a connected pair of endpoints
pub fn link() -> (VersusEndpoint, VersusEndpoint) {
    let (a_tx, b_rx) = mpsc::channel();
    let (b_tx, a_rx) = mpsc::channel();
    (
        VersusEndpoint { tx: a_tx, rx: a_rx },
        VersusEndpoint { tx: b_tx, rx: b_rx },
    )
}

impl VersusEndpoint {
    /// Send the garbage earned by `event` to the opponent
    ///
    /// Returns the number of rows sent; 0 if the clear earned none or the
    /// opponent has gone away.
    pub fn send_clear(&self, event: &LineClearEvent) -> u32 {
        let rows = garbage_for_clear(event.lines);
        if rows == 0 {
            return 0;
        }
        match self.tx.send(rows) {
            Ok(()) => {
                debug!(rows, "garbage sent");
                rows
            }
            Err(_) => 0,
        }
    }

    /// Queue every garbage message received so far on `game`
    ///
    /// Returns the number of rows received.
    pub fn drain_into(&self, game: &mut GameState) -> u32 {
        let mut total = 0;
        while let Ok(rows) = self.rx.try_recv() {
            game.receive_garbage(rows);
            total += rows;
        }
        total
    }
}
