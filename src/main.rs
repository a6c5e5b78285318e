use ai_snake::{
    board::{Board, BoardEvent, BoardSettings, TICK_DELAY},
    GameCommands, GameUpdates,
};
use clap::Parser;
use log::{error, info, warn};
use std::{io::BufRead, path::PathBuf, process::exit, time::Duration};
use tokio::{
    select,
    sync::mpsc::{channel, Receiver, Sender},
    time::{interval, MissedTickBehavior},
};

#[derive(Parser)]
#[command(name = "ai-snake")]
#[command(version, about = "Watch a snake play itself")]
struct Cli {
    /// JSON file with board settings; flags below override it
    #[arg(long)]
    settings: Option<PathBuf>,

    #[arg(long)]
    grid_size: Option<i32>,

    /// Seed for apple placement
    #[arg(long)]
    seed: Option<u64>,

    /// Milliseconds between ticks
    #[arg(long, default_value_t = TICK_DELAY.as_millis() as u64)]
    tick_ms: u64,

    /// Stop after this many ticks
    #[arg(long)]
    ticks: Option<u64>,

    /// Print every tick to stdout as a JSON line
    #[arg(long)]
    json: bool,

    #[arg(long)]
    relocate_food_on_reset: bool,
}

impl Cli {
    fn board_settings(&self) -> Result<BoardSettings, ai_snake::board::SettingsError> {
        let mut settings = match &self.settings {
            Some(path) => BoardSettings::from_json_file(path)?,
            None => BoardSettings::default(),
        };
        if let Some(grid_size) = self.grid_size {
            settings.grid_size = grid_size;
        }
        if let Some(seed) = self.seed {
            settings.seed = Some(seed);
        }
        settings.relocate_food_on_reset |= self.relocate_food_on_reset;
        Ok(settings)
    }
}

#[tokio::main]
async fn main() {
    colog::init();

    let cli = Cli::parse();

    let settings = match cli.board_settings() {
        Ok(settings) => settings,
        Err(e) => {
            error!("{}", e);
            exit(1);
        }
    };

    let board = match Board::new(settings) {
        Ok(board) => board,
        Err(e) => {
            error!("{}", e);
            exit(1);
        }
    };

    let (command_tx, command_rx) = channel(8);
    std::thread::spawn(move || read_commands(command_tx));

    if let Err(e) = game_loop(board, command_rx, &cli).await {
        error!("{}", e);
        exit(1);
    }
}

async fn game_loop(
    mut board: Board,
    mut commands: Receiver<GameCommands>,
    cli: &Cli,
) -> Result<(), ai_snake::board::BoardError> {
    let mut ticker = interval(Duration::from_millis(cli.tick_ms.max(1)));
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

    let ctrl_c = tokio::signal::ctrl_c();
    tokio::pin!(ctrl_c);

    let mut input_open = true;

    info!("starting on a {0}x{0} grid", board.grid_size());

    loop {
        // commands land between ticks, never inside one
        select! {
            command = commands.recv(), if input_open => {
                match command {
                    Some(GameCommands::Input { direction }) => board.turn(direction),
                    Some(GameCommands::Quit) => {
                        info!("quit requested");
                        break;
                    }
                    None => input_open = false,
                }
            }
            _ = &mut ctrl_c => {
                info!("interrupted");
                break;
            }
            _ = ticker.tick() => {
                let events = board.tick()?;

                for event in events.iter() {
                    if let BoardEvent::Collided { collision, final_score, top_score } = event {
                        info!("{:?} collision with score {} (top {})", collision, final_score, top_score);
                    }
                }

                if cli.json {
                    let update = GameUpdates::Ticked { board: board.snapshot(), events };
                    match serde_json::to_string(&update) {
                        Ok(line) => println!("{}", line),
                        Err(e) => warn!("could not encode update: {}", e),
                    }
                }

                if cli.ticks.is_some_and(|limit| board.ticks() >= limit) {
                    break;
                }
            }
        }
    }

    info!(
        "stopped after {} ticks, score {} top score {}",
        board.ticks(),
        board.score(),
        board.top_score().max(board.score())
    );

    Ok(())
}

/// Reads commands on a plain thread; tokio's stdin would hold up runtime shutdown.
fn read_commands(commands: Sender<GameCommands>) {
    for line in std::io::stdin().lock().lines() {
        let line = match line {
            Ok(line) => line,
            Err(e) => {
                error!("{}", e);
                break;
            }
        };
        if line.trim().is_empty() {
            continue;
        }
        match GameCommands::parse(&line) {
            Ok(command) => {
                if commands.blocking_send(command).is_err() {
                    break;
                }
            }
            Err(e) => warn!("ignoring {:?}: {}", line, e),
        }
    }
}
