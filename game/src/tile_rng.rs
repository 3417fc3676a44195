use std::collections::VecDeque;

use log::trace;
use rand::{Rng, SeedableRng, rngs::StdRng};
use serde::{Deserialize, Serialize};

use crate::twenty48_core::Board;

/// Chance that a spawned tile is a 4 instead of a 2.
pub const FOUR_PROBABILITY: f64 = 0.1;

/// Source of randomness for tile spawns.
///
/// Kept narrow so tests can script exact spawns without depending on a generator's stream.
pub trait TileRng {
    /// Uniform index in `0..len`. Callers never pass 0.
    fn pick(&mut self, len: usize) -> usize;

    /// True with the given probability.
    fn chance(&mut self, probability: f64) -> bool;
}

impl<T: TileRng + ?Sized> TileRng for &mut T {
    fn pick(&mut self, len: usize) -> usize {
        (**self).pick(len)
    }

    fn chance(&mut self, probability: f64) -> bool {
        (**self).chance(probability)
    }
}

#[derive(Debug, Clone)]
pub struct SeededTiles {
    rng: StdRng,
}

impl SeededTiles {
    pub fn from_seed(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }

    pub fn from_entropy() -> Self {
        Self {
            rng: StdRng::from_entropy(),
        }
    }
}

impl TileRng for SeededTiles {
    fn pick(&mut self, len: usize) -> usize {
        if len == 0 {
            return 0;
        }
        self.rng.gen_range(0..len)
    }

    fn chance(&mut self, probability: f64) -> bool {
        self.rng.gen_bool(probability.clamp(0.0, 1.0))
    }
}

/// Replays fixed answers. Once a queue runs dry it picks index 0 and never rolls a 4.
#[derive(Debug, Clone, Default)]
pub struct ScriptedTiles {
    picks: VecDeque<usize>,
    fours: VecDeque<bool>,
}

impl ScriptedTiles {
    pub fn new(picks: impl IntoIterator<Item = usize>, fours: impl IntoIterator<Item = bool>) -> Self {
        Self {
            picks: picks.into_iter().collect(),
            fours: fours.into_iter().collect(),
        }
    }
}

impl TileRng for ScriptedTiles {
    fn pick(&mut self, len: usize) -> usize {
        self.picks.pop_front().unwrap_or(0).min(len.saturating_sub(1))
    }

    fn chance(&mut self, _probability: f64) -> bool {
        self.fours.pop_front().unwrap_or(false)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Spawned {
    pub row: usize,
    pub col: usize,
    pub value: u32,
}

/// Places a 2 (or, one time in ten, a 4) on a uniformly chosen empty cell.
///
/// Empty cells are enumerated row-major and the cell is drawn before the value. A full board
/// is left untouched and yields `None`.
pub fn spawn_tile<R: TileRng + ?Sized>(board: &mut Board, rng: &mut R) -> Option<Spawned> {
    let empty: Vec<(usize, usize)> = board.empty_cells().collect();
    if empty.is_empty() {
        return None;
    }
    let index = rng.pick(empty.len()).min(empty.len() - 1);
    let (row, col) = empty[index];
    let value = if rng.chance(FOUR_PROBABILITY) { 4 } else { 2 };
    board.place(row, col, value);
    trace!("spawned {value} at ({row}, {col})");
    Some(Spawned { row, col, value })
}
