use crate::ai::{Greedy, SnakeAI};
use log::{debug, trace};
use rand::{rngs::StdRng, SeedableRng};
use serde::{Deserialize, Serialize};
use std::{fmt, time::Duration};
use thiserror::Error;

pub mod food;
pub mod settings;
pub mod snake;

pub use food::Food;
pub use settings::{BoardSettings, SettingsError};
pub use snake::{Direction, Pos, Segment, Snake};

pub const GRID_SIZE: i32 = 16;
pub const INITIAL_LENGTH: usize = 4;
pub const TICK_DELAY: Duration = Duration::from_millis(20);

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BoardError {
    #[error("no free cell left for food on a {grid_size}x{grid_size} grid")]
    NoFreeCell { grid_size: i32 },
    #[error("invalid board settings: {0}")]
    InvalidSettings(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Collision {
    Wall,
    Tail,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BoardEvent {
    Turned {
        from: Direction,
        to: Direction,
    },
    AppleEaten {
        score: usize,
    },
    Collided {
        collision: Collision,
        final_score: usize,
        top_score: usize,
    },
}

/// Read-only copy of everything a renderer draws.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BoardSnapshot {
    pub grid_size: i32,
    pub segments: Vec<Segment>,
    pub food: Pos,
    pub score: usize,
    pub top_score: usize,
    pub ticks: u64,
}

/// The simulation: one snake, one apple, and the RNG that places it.
#[derive(Debug, Clone)]
pub struct Board {
    settings: BoardSettings,
    snake: Snake,
    food: Food,
    rng: StdRng,
    ticks: u64,
}

impl Board {
    pub fn new(settings: BoardSettings) -> Result<Self, BoardError> {
        settings.validate()?;

        let mut rng = match settings.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_os_rng(),
        };
        let snake = Self::spawn_snake(&settings);
        let food = Food::new(&snake, settings.grid_size, &mut rng)?;

        Ok(Self {
            settings,
            snake,
            food,
            rng,
            ticks: 0,
        })
    }

    /// Builds a board around an arbitrary snake and apple position.
    pub fn from_parts(settings: BoardSettings, snake: Snake, food: Pos) -> Result<Self, BoardError> {
        let mut board = Self::new(settings)?;
        board.snake = snake;
        board.food.pos = food;
        Ok(board)
    }

    fn spawn_snake(settings: &BoardSettings) -> Snake {
        let center = Pos::new(settings.grid_size / 2, settings.grid_size / 2);
        Snake::new(center, Direction::Up, settings.initial_length)
    }

    pub fn settings(&self) -> &BoardSettings {
        &self.settings
    }

    pub fn grid_size(&self) -> i32 {
        self.settings.grid_size
    }

    pub fn snake(&self) -> &Snake {
        &self.snake
    }

    pub fn food(&self) -> &Food {
        &self.food
    }

    pub fn score(&self) -> usize {
        self.food.score
    }

    pub fn top_score(&self) -> usize {
        self.food.top_score
    }

    pub fn ticks(&self) -> u64 {
        self.ticks
    }

    pub fn in_bounds(&self, pos: Pos) -> bool {
        (0..self.grid_size()).contains(&pos.x) && (0..self.grid_size()).contains(&pos.y)
    }

    pub fn snapshot(&self) -> BoardSnapshot {
        BoardSnapshot {
            grid_size: self.grid_size(),
            segments: self.snake.segments().copied().collect(),
            food: self.food.pos,
            score: self.food.score,
            top_score: self.food.top_score,
            ticks: self.ticks,
        }
    }

    /// Points the head at an absolute heading. Only call between ticks.
    pub fn turn(&mut self, dir: Direction) {
        self.snake.turn(dir);
    }

    pub fn tick(&mut self) -> Result<Vec<BoardEvent>, BoardError> {
        self.tick_with(&Greedy)
    }

    /// Runs one tick: decide, advance, eat, then check for collisions.
    ///
    /// A collision resets the snake and the score within the same tick; only a
    /// board with no room left for the apple returns an error.
    pub fn tick_with(&mut self, ai: &dyn SnakeAI) -> Result<Vec<BoardEvent>, BoardError> {
        let mut events = Vec::new();

        let from = self.snake.head().dir;
        let to = ai.choose_turn(self).apply(from);
        if to != from {
            self.snake.turn(to);
            events.push(BoardEvent::Turned { from, to });
        }

        self.snake.advance();

        if self.food.consumed_by(self.snake.head().pos) {
            self.snake.grow();
            self.food
                .on_consumed(&self.snake, self.settings.grid_size, &mut self.rng)?;
            debug!(
                "apple eaten, score {} length {}",
                self.food.score,
                self.snake.len()
            );
            events.push(BoardEvent::AppleEaten {
                score: self.food.score,
            });
        }

        if let Some(collision) = self.collision() {
            let final_score = self.food.score;
            self.food.on_reset(final_score);
            self.snake = Self::spawn_snake(&self.settings);
            if self.settings.relocate_food_on_reset {
                self.food
                    .place(&self.snake, self.settings.grid_size, &mut self.rng)?;
            }
            debug!(
                "{:?} collision at tick {}, score {} top {}",
                collision, self.ticks, final_score, self.food.top_score
            );
            events.push(BoardEvent::Collided {
                collision,
                final_score,
                top_score: self.food.top_score,
            });
        }

        self.ticks += 1;
        trace!("tick {} head {:?}", self.ticks, self.snake.head());

        Ok(events)
    }

    fn collision(&self) -> Option<Collision> {
        let head = self.snake.head().pos;
        if !self.in_bounds(head) {
            Some(Collision::Wall)
        } else if self.snake.occupies(head, true) {
            Some(Collision::Tail)
        } else {
            None
        }
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let head = self.snake.head().pos;
        for y in 0..self.grid_size() {
            for x in 0..self.grid_size() {
                let pos = Pos::new(x, y);
                let ch = if pos == head {
                    '@'
                } else if self.snake.occupies(pos, true) {
                    'o'
                } else if pos == self.food.pos {
                    '*'
                } else {
                    '.'
                };
                write!(f, "{}", ch)?;
            }
            writeln!(f)?;
        }
        write!(f, "score {} top {}", self.food.score, self.food.top_score)
    }
}
