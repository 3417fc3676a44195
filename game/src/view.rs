use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameView {
    #[default]
    Playing,
    GameOver,
    /// Terminal; no event leaves it.
    Exited,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameViewEvent {
    /// The board has no legal move left.
    BoardLocked,
    Restart,
    Quit,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameViewEffect {
    None,
    ResetBoard,
    RecordHighScore,
}

impl GameView {
    /// Pure transition function for the Playing / GameOver loop.
    ///
    /// Side-effects (resetting the board, writing the high score) are reported via
    /// `GameViewEffect` so the session performs them and this stays trivially testable.
    pub fn handle(self, event: GameViewEvent) -> (GameView, GameViewEffect) {
        match (self, event) {
            (GameView::Playing, GameViewEvent::BoardLocked) => {
                (GameView::GameOver, GameViewEffect::RecordHighScore)
            }
            (GameView::GameOver, GameViewEvent::Restart) => {
                (GameView::Playing, GameViewEffect::ResetBoard)
            }
            (GameView::Playing | GameView::GameOver, GameViewEvent::Quit) => {
                (GameView::Exited, GameViewEffect::RecordHighScore)
            }

            // Ignore irrelevant events in the current state.
            (state, _) => (state, GameViewEffect::None),
        }
    }

    pub fn is_playing(self) -> bool {
        self == GameView::Playing
    }

    pub fn is_game_over(self) -> bool {
        self == GameView::GameOver
    }

    pub fn is_exited(self) -> bool {
        self == GameView::Exited
    }
}
