use board::{BoardEvent, BoardSnapshot, Direction};
use serde::{Deserialize, Serialize};

pub mod ai;
pub mod board;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameCommands {
    Input { direction: Direction },
    Quit,
}

impl GameCommands {
    /// Accepts a bare direction (`up`, `a`, ...), `quit`/`q`, or a JSON command.
    pub fn parse(line: &str) -> Result<Self, serde_json::Error> {
        let line = line.trim();
        if matches!(line.to_ascii_lowercase().as_str(), "quit" | "q") {
            return Ok(GameCommands::Quit);
        }
        match line.parse::<Direction>() {
            Ok(direction) => Ok(GameCommands::Input { direction }),
            Err(_) => serde_json::from_str(line),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum GameUpdates {
    Ticked {
        board: BoardSnapshot,
        events: Vec<BoardEvent>,
    },
}
