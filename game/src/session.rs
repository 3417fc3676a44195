use log::{error, info};

use crate::highscore::HighScoreStore;
use crate::tile_rng::{SeededTiles, TileRng};
use crate::twenty48_core::{Direction, Twenty48Core};
use crate::twenty48_ui::Frontend;
use crate::view::{GameView, GameViewEffect, GameViewEvent};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameInput {
    Move(Direction),
    Restart,
    Quit,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionFlow {
    /// The input was ignored or did not change the board.
    Unchanged,
    Changed,
    Exit,
}

/// One player's run of games: core rules, the Playing / GameOver view, and the best score.
pub struct GameSession<R: TileRng = SeededTiles, S: HighScoreStore = crate::highscore::HighScoreFile> {
    core: Twenty48Core<R>,
    view: GameView,
    best: u32,
    store: S,
}

impl<R: TileRng, S: HighScoreStore> GameSession<R, S> {
    /// Loads the best score and deals the starting tiles.
    pub fn new(rng: R, store: S) -> Self {
        let mut core = Twenty48Core::new(rng);
        core.initialize_game();
        Self::from_core(core, store)
    }

    /// Wraps an already-dealt core. A locked board starts in GameOver.
    pub fn from_core(core: Twenty48Core<R>, store: S) -> Self {
        let best = store.load_high_score();
        let view = if core.is_game_over() {
            GameView::GameOver
        } else {
            GameView::Playing
        };
        Self {
            core,
            view,
            best,
            store,
        }
    }

    pub fn core(&self) -> &Twenty48Core<R> {
        &self.core
    }

    pub fn view(&self) -> GameView {
        self.view
    }

    pub fn score(&self) -> u32 {
        self.core.score()
    }

    pub fn best(&self) -> u32 {
        self.best
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn handle(&mut self, input: GameInput) -> SessionFlow {
        match input {
            GameInput::Move(direction) => {
                if !self.view.is_playing() {
                    return SessionFlow::Unchanged;
                }
                let report = self.core.apply(direction);
                if !report.changed {
                    return SessionFlow::Unchanged;
                }
                if report.game_over {
                    info!(
                        "game over: score {}, max tile {}",
                        self.core.score(),
                        self.core.max_tile()
                    );
                    self.dispatch(GameViewEvent::BoardLocked);
                }
                SessionFlow::Changed
            }
            GameInput::Restart => match self.dispatch(GameViewEvent::Restart) {
                GameViewEffect::ResetBoard => SessionFlow::Changed,
                _ => SessionFlow::Unchanged,
            },
            GameInput::Quit => {
                self.dispatch(GameViewEvent::Quit);
                SessionFlow::Exit
            }
        }
    }

    fn dispatch(&mut self, event: GameViewEvent) -> GameViewEffect {
        let (next, effect) = self.view.handle(event);
        self.view = next;
        match effect {
            GameViewEffect::None => {}
            GameViewEffect::ResetBoard => {
                info!("restarting (last score {})", self.core.score());
                self.core.initialize_game();
            }
            GameViewEffect::RecordHighScore => self.record_high_score(),
        }
        effect
    }

    /// Persists the current score if it beats the best. Safe to call more than once.
    pub fn record_high_score(&mut self) {
        let score = self.core.score();
        if score <= self.best {
            return;
        }
        self.best = score;
        match self.store.save_high_score(score) {
            Ok(()) => info!("new high score: {score}"),
            Err(err) => error!("saving high score {score} failed: {err}"),
        }
    }

    pub fn present(&self, frontend: &mut dyn Frontend) {
        match self.view {
            GameView::GameOver => frontend.draw_game_over(self.core.score(), self.best),
            GameView::Playing | GameView::Exited => {
                frontend.draw(self.core.board(), self.core.score(), self.best)
            }
        }
    }

    /// Feeds inputs until Quit or the iterator ends, presenting the first frame and every change.
    pub fn run<I>(&mut self, inputs: I, frontend: &mut dyn Frontend) -> u32
    where
        I: IntoIterator<Item = GameInput>,
    {
        self.present(frontend);
        for input in inputs {
            match self.handle(input) {
                SessionFlow::Unchanged => {}
                SessionFlow::Changed => self.present(frontend),
                SessionFlow::Exit => break,
            }
        }
        self.core.score()
    }
}
