//! RNG module - deterministic piece generation
//!
//! Pieces are drawn by weighted roulette over the seven kinds; the difficulty
//! setting only changes the weight of the I piece (see
//! [`Difficulty::i_piece_weight`]). Every random decision in a game (piece kinds,
//! item kinds, item markers, garbage holes) comes from one seeded [`SimpleRng`],
//! so a config and seed reproduce a game exactly.

use crate::types::{Difficulty, PieceKind};

/// Weight of every non-I piece in the roulette
const BASE_PIECE_WEIGHT: u32 = 10;

/// Simple LCG (Linear Congruential Generator) RNG
/// Uses constants from Numerical Recipes
#[derive(Debug, Clone)]
pub struct SimpleRng {
    state: u32,
}

impl SimpleRng {
    /// Create a new RNG with the given seed
    pub fn new(seed: u32) -> Self {
        // Avoid 0 seed which would produce all zeros
        let state = if seed == 0 { 1 } else { seed };
        Self { state }
    }

    /// Generate next random u32
    pub fn next_u32(&mut self) -> u32 {
        // LCG formula: (a * state + c) mod m
        // Using Numerical Recipes constants: a=1664525, c=1013904223, m=2^32
        self.state = self.state.wrapping_mul(1664525).wrapping_add(1013904223);
        self.state
    }

    /// Generate random value in range [0, max)
    ///
    /// Scales from the high bits: the low bits of a power-of-two LCG repeat with
    /// a tiny period.
    pub fn next_range(&mut self, max: u32) -> u32 {
        if max == 0 {
            return 0;
        }
        ((u64::from(self.next_u32()) * u64::from(max)) >> 32) as u32
    }

    /// Current internal state (for restarting with the same sequence)
    pub fn state(&self) -> u32 {
        self.state
    }
}

/// Weighted tetromino generator with a one-piece preview
#[derive(Debug, Clone)]
pub struct PieceGenerator {
    weights: [u32; 7],
    next: PieceKind,
}

impl PieceGenerator {
    pub fn new(difficulty: Difficulty, rng: &mut SimpleRng) -> Self {
        let weights = PieceKind::ALL.map(|kind| match kind {
            PieceKind::I => difficulty.i_piece_weight(),
            _ => BASE_PIECE_WEIGHT,
        });
        let next = roll(&weights, rng);
        Self { weights, next }
    }

    /// The kind the next `draw` returns
    pub fn peek(&self) -> PieceKind {
        self.next
    }

    /// Take the previewed kind and roll a new preview
    pub fn draw(&mut self, rng: &mut SimpleRng) -> PieceKind {
        let kind = self.next;
        self.next = roll(&self.weights, rng);
        kind
    }
}

fn roll(weights: &[u32; 7], rng: &mut SimpleRng) -> PieceKind {
    let total: u32 = weights.iter().sum();
    let mut pick = rng.next_range(total);
    for (kind, &w) in PieceKind::ALL.iter().zip(weights) {
        if pick < w {
            return *kind;
        }
        pick -= w;
    }
    PieceKind::ALL[PieceKind::ALL.len() - 1]
}
