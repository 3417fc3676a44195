pub mod app;
pub mod graphics;
pub mod pixels_renderer;
pub mod regression;
pub mod surface;
pub mod ui;

/// Pure game rules: a starting state plus a transition per input.
pub trait GameLogic {
    type State;
    type Input;

    fn initial_state(&self) -> Self::State;
    fn step(&self, state: &Self::State, input: Self::Input) -> Self::State;
}

/// Drives a `GameLogic` without a window.
///
/// Only the current state is kept; each step replaces it.
#[derive(Debug)]
pub struct HeadlessRunner<G: GameLogic> {
    game: G,
    state: G::State,
    frame: usize,
}

impl<G: GameLogic> HeadlessRunner<G> {
    pub fn new(game: G) -> Self {
        let state = game.initial_state();
        Self {
            game,
            state,
            frame: 0,
        }
    }

    pub fn frame(&self) -> usize {
        self.frame
    }

    pub fn state(&self) -> &G::State {
        &self.state
    }

    pub fn game(&self) -> &G {
        &self.game
    }

    pub fn step(&mut self, input: G::Input) -> usize {
        self.state = self.game.step(&self.state, input);
        self.frame += 1;
        self.frame
    }

    pub fn run<I>(&mut self, inputs: I) -> usize
    where
        I: IntoIterator<Item = G::Input>,
    {
        let mut last_frame = self.frame();
        for input in inputs {
            last_frame = self.step(input);
        }
        last_frame
    }

    /// Back to the game's initial state at frame 0.
    pub fn reset(&mut self) {
        self.state = self.game.initial_state();
        self.frame = 0;
    }
}
