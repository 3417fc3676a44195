use engine::GameLogic;

use crate::tile_rng::SeededTiles;
use crate::twenty48_core::{Direction, Twenty48Core};

/// Set to `1` to let render-hash tests rewrite their stored logs.
pub const UPDATE_GOLDENS_ENV: &str = "TWENTY48_UPDATE_GOLDENS";

/// The rules as a pure `GameLogic`, for headless runs and render-hash scenarios.
///
/// Every state carries its own seeded tile source, so replaying the same seed and inputs always
/// produces the same boards.
#[derive(Debug, Clone, Copy)]
pub struct Twenty48Logic {
    seed: u64,
}

impl Twenty48Logic {
    pub fn new(seed: u64) -> Self {
        Self { seed }
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }
}

impl GameLogic for Twenty48Logic {
    type State = Twenty48Core;
    type Input = Direction;

    fn initial_state(&self) -> Self::State {
        let mut core = Twenty48Core::new(SeededTiles::from_seed(self.seed));
        core.initialize_game();
        core
    }

    fn step(&self, state: &Self::State, input: Self::Input) -> Self::State {
        let mut next = state.clone();
        next.apply(input);
        next
    }
}
