use crate::board::{Board, Direction, Pos};
use rand::prelude::SliceRandom;
use serde::{Deserialize, Serialize};

pub const WALL_PENALTY: i32 = 300;
pub const APPLE_REWARD: i32 = 1000;
pub const APPROACH_REWARD: i32 = 3;
pub const TAIL_PENALTY: i32 = 500;

pub trait SnakeAI {
    fn choose_turn(&self, board: &Board) -> Turn;
}

/// A move expressed relative to the snake's current heading.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Turn {
    Straight,
    Left,
    Right,
}

// rows follow `Direction` declaration order, columns follow `Turn`
const TURN_TABLE: [[Direction; 3]; 4] = [
    [Direction::Up, Direction::Left, Direction::Right],
    [Direction::Down, Direction::Right, Direction::Left],
    [Direction::Left, Direction::Down, Direction::Up],
    [Direction::Right, Direction::Up, Direction::Down],
];

impl Turn {
    pub const ALL: [Turn; 3] = [Turn::Straight, Turn::Left, Turn::Right];

    /// The absolute heading this turn produces from `heading`.
    pub fn apply(self, heading: Direction) -> Direction {
        TURN_TABLE[heading as usize][self as usize]
    }
}

/// Scores moving one cell from `head` after taking `turn` off `heading`.
///
/// `body` is every segment except the head. Each body cell on the target
/// costs [`TAIL_PENALTY`], so duplicates stack.
pub fn score(
    grid_size: i32,
    heading: Direction,
    head: Pos,
    turn: Turn,
    food: Pos,
    body: impl IntoIterator<Item = Pos>,
) -> i32 {
    let target = head + turn.apply(heading);
    let mut reward = 0;

    if !(0..grid_size).contains(&target.x) || !(0..grid_size).contains(&target.y) {
        reward -= WALL_PENALTY;
    }

    if target == food {
        reward += APPLE_REWARD;
    }

    if (target.x - food.x).abs() < (head.x - food.x).abs() {
        reward += APPROACH_REWARD;
    }
    if (target.y - food.y).abs() < (head.y - food.y).abs() {
        reward += APPROACH_REWARD;
    }

    for pos in body {
        if pos == target {
            reward -= TAIL_PENALTY;
        }
    }

    reward
}

/// Keeps going straight unless a turn scores strictly better; a tie between
/// the two turns goes right.
pub fn select(straight: i32, left: i32, right: i32) -> Turn {
    if straight >= left && straight >= right {
        Turn::Straight
    } else if left > right {
        Turn::Left
    } else {
        Turn::Right
    }
}

/// One-step lookahead on walls, the apple and the snake's own body.
pub struct Greedy;

impl Greedy {
    pub fn evaluate(board: &Board, turn: Turn) -> i32 {
        let head = board.snake().head();
        score(
            board.grid_size(),
            head.dir,
            head.pos,
            turn,
            board.food().pos,
            board.snake().body().map(|part| part.pos),
        )
    }
}

impl SnakeAI for Greedy {
    fn choose_turn(&self, board: &Board) -> Turn {
        select(
            Self::evaluate(board, Turn::Straight),
            Self::evaluate(board, Turn::Left),
            Self::evaluate(board, Turn::Right),
        )
    }
}

/// Picks a random turn that does not run straight into a wall or the body.
pub struct RandomWalk;

impl SnakeAI for RandomWalk {
    fn choose_turn(&self, board: &Board) -> Turn {
        let head = board.snake().head();

        let mut turns = Turn::ALL;
        turns.shuffle(&mut rand::rng());

        turns
            .into_iter()
            .find(|turn| {
                let pos = head.pos + turn.apply(head.dir);
                board.in_bounds(pos) && !board.snake().occupies(pos, true)
            })
            .unwrap_or(Turn::Straight)
    }
}
