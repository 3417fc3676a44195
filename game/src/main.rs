use clap::Parser;
use engine::HeadlessRunner;
use log::info;

use twenty48::playtest::Twenty48Logic;
use twenty48::twenty48_core::Direction;

/// Plays a seeded game with a fixed move cycle and prints where it ends up.
#[derive(Debug, Parser)]
#[command(name = "twenty48", version)]
struct Cli {
    #[arg(long, default_value_t = 2048)]
    seed: u64,

    /// Stop after this many moves even if the board is still open.
    #[arg(long, default_value_t = 5_000)]
    max_moves: usize,
}

const MOVE_CYCLE: [Direction; 4] = [
    Direction::Left,
    Direction::Down,
    Direction::Right,
    Direction::Down,
];

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let cli = Cli::parse();

    let mut runner = HeadlessRunner::new(Twenty48Logic::new(cli.seed));
    let mut moves = MOVE_CYCLE.into_iter().cycle();
    // Left/Down/Right alone can stall with the board still open; Up unsticks it.
    while runner.frame() < cli.max_moves && !runner.state().is_game_over() {
        let Some(direction) = moves.next() else {
            break;
        };
        let direction = if runner.state().board().can_move(direction) {
            direction
        } else {
            Direction::ALL
                .into_iter()
                .find(|&d| runner.state().board().can_move(d))
                .unwrap_or(direction)
        };
        runner.step(direction);
    }

    let core = runner.state();
    info!("seed {} finished after {} moves", cli.seed, runner.frame());
    print!("{}", core.board());
    println!(
        "score {} max tile {} game over {}",
        core.score(),
        core.max_tile(),
        core.is_game_over()
    );
}
