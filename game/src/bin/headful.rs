use std::path::PathBuf;

use anyhow::{Context, anyhow};
use clap::Parser;
use log::info;
use winit::dpi::PhysicalSize;
use winit::event::VirtualKeyCode;

use engine::app::{AppConfig, AppContext, AppFlow, GameApp, run_game};
use engine::graphics::Renderer2d;
use engine::regression::parse_flag;

use twenty48::highscore::HighScoreFile;
use twenty48::session::{GameInput, GameSession, SessionFlow};
use twenty48::tile_rng::SeededTiles;
use twenty48::twenty48_core::Direction;
use twenty48::twenty48_ui::{BASE_HEIGHT, BASE_WIDTH, RendererFrontend};

#[derive(Debug, Parser)]
#[command(name = "headful", version, about = "Play 2048 in a window")]
struct Cli {
    /// Seed for tile spawns; random when omitted.
    #[arg(long)]
    seed: Option<u64>,

    /// Where the best score is kept. Defaults to $TWENTY48_HIGHSCORE_PATH, then ./highscore.txt.
    #[arg(long)]
    highscore_file: Option<PathBuf>,

    #[arg(long, default_value_t = BASE_WIDTH)]
    width: u32,

    #[arg(long, default_value_t = BASE_HEIGHT)]
    height: u32,
}

const VSYNC_ENV: &str = "TWENTY48_VSYNC";

fn map_key_to_input(key: VirtualKeyCode) -> Option<GameInput> {
    match key {
        VirtualKeyCode::Left | VirtualKeyCode::A => Some(GameInput::Move(Direction::Left)),
        VirtualKeyCode::Right | VirtualKeyCode::D => Some(GameInput::Move(Direction::Right)),
        VirtualKeyCode::Up | VirtualKeyCode::W => Some(GameInput::Move(Direction::Up)),
        VirtualKeyCode::Down | VirtualKeyCode::S => Some(GameInput::Move(Direction::Down)),
        VirtualKeyCode::R => Some(GameInput::Restart),
        VirtualKeyCode::Q | VirtualKeyCode::Escape => Some(GameInput::Quit),
        _ => None,
    }
}

struct Twenty48App {
    seed: Option<u64>,
    store: HighScoreFile,
}

impl GameApp for Twenty48App {
    type State = GameSession<SeededTiles, HighScoreFile>;
    type Action = GameInput;

    fn init_state(&mut self, _ctx: &mut AppContext) -> Self::State {
        let rng = match self.seed {
            Some(seed) => SeededTiles::from_seed(seed),
            None => SeededTiles::from_entropy(),
        };
        let session = GameSession::new(rng, self.store.clone());
        info!(
            "high score file {} (best {})",
            self.store.path().display(),
            session.best()
        );
        session
    }

    fn map_key(&self, _state: &Self::State, key: VirtualKeyCode) -> Option<Self::Action> {
        map_key_to_input(key)
    }

    fn update_state(&mut self, state: &mut Self::State, action: Self::Action) -> AppFlow {
        match state.handle(action) {
            SessionFlow::Unchanged => AppFlow::Continue,
            SessionFlow::Changed => AppFlow::Redraw,
            SessionFlow::Exit => AppFlow::Exit,
        }
    }

    fn render(&mut self, state: &Self::State, renderer: &mut dyn Renderer2d) {
        state.present(&mut RendererFrontend::new(renderer));
    }

    fn on_exit(&mut self, state: &mut Self::State) {
        state.record_high_score();
        info!("exiting with score {} (best {})", state.score(), state.best());
    }
}

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let cli = Cli::parse();

    let store = match cli.highscore_file {
        Some(path) => HighScoreFile::new(path),
        None => HighScoreFile::from_env(),
    };
    let config = AppConfig {
        title: "2048".to_string(),
        desired_size: PhysicalSize::new(cli.width.max(1), cli.height.max(1)),
        clamp_to_monitor: true,
        vsync: parse_flag(std::env::var(VSYNC_ENV).ok().as_deref()),
    };

    run_game(config, Twenty48App { seed: cli.seed, store })
        .map_err(|e| anyhow!("{e}"))
        .context("window loop failed")
}
