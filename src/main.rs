#[cfg(not(feature = "std"))]
fn main() {}

#[cfg(feature = "std")]
use battleship_solo::{
    init_logging, run_game, spawn_session, GameConfig, GameSession, ScoreLedger, SystemClock,
    BOARD_SIZE, NUM_SHIPS, SCORES_FILE, SHIP_LENGTH, TURN_BUDGET,
};
#[cfg(feature = "std")]
use clap::{Args, Parser, Subcommand};
#[cfg(feature = "std")]
use rand::rngs::SmallRng;
#[cfg(feature = "std")]
use rand::SeedableRng;
#[cfg(feature = "std")]
use std::path::PathBuf;

#[derive(Parser)]
#[command(author, version, about = "Single-player Battleship in the terminal", long_about = None)]
#[cfg(feature = "std")]
struct Cli {
    #[command(flatten)]
    game: GameArgs,
    /// File holding the high-score table.
    #[arg(long, default_value = SCORES_FILE)]
    scores: PathBuf,
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Args, Debug)]
#[cfg(feature = "std")]
struct GameArgs {
    /// Side length of the square board.
    #[arg(long, default_value_t = BOARD_SIZE)]
    size: usize,
    /// Number of ships to hide.
    #[arg(long, default_value_t = NUM_SHIPS)]
    ships: usize,
    /// Cells per ship.
    #[arg(long, default_value_t = SHIP_LENGTH)]
    ship_length: usize,
    /// Misses allowed before the game is lost.
    #[arg(long, default_value_t = TURN_BUDGET)]
    turns: u32,
    #[arg(long, help = "Fix RNG seed for reproducible games (e.g., --seed 12345)")]
    seed: Option<u64>,
}

#[cfg(feature = "std")]
impl From<&GameArgs> for GameConfig {
    fn from(args: &GameArgs) -> Self {
        GameConfig {
            size: args.size,
            ship_count: args.ships,
            ship_length: args.ship_length,
            turn_budget: args.turns,
        }
    }
}

#[derive(Subcommand)]
#[cfg(feature = "std")]
enum Commands {
    /// Play a game (the default).
    Play,
    /// Show the high-score table.
    Scores,
}

#[cfg(feature = "std")]
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_logging();
    let cli = Cli::parse();
    let ledger = ScoreLedger::new(&cli.scores);

    match cli.command.unwrap_or(Commands::Play) {
        Commands::Scores => {
            println!("{}", ledger.load_scores());
        }
        Commands::Play => {
            let config = GameConfig::from(&cli.game);
            let rng = match cli.game.seed {
                Some(s) => {
                    println!("Using fixed seed: {} (game will be reproducible)", s);
                    SmallRng::seed_from_u64(s)
                }
                None => SmallRng::from_rng(&mut rand::rng()),
            };
            let session = GameSession::new(config, rng, SystemClock::new())?
                .with_recorder(ledger.clone());
            let mut handle = spawn_session(session);

            let stdin = tokio::io::BufReader::new(tokio::io::stdin());
            run_game(&mut handle, &ledger, stdin, std::io::stdout()).await?;
            handle.shutdown().await;
        }
    }
    Ok(())
}
