use super::{
    snake::{Pos, Snake},
    BoardError,
};
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// The single apple on the board, plus the scores it has earned.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Food {
    pub pos: Pos,
    pub score: usize,
    pub top_score: usize,
}

impl Food {
    pub fn new<R: Rng>(
        snake: &Snake,
        grid_size: i32,
        rng: &mut R,
    ) -> Result<Self, BoardError> {
        let mut food = Food {
            pos: Pos::default(),
            score: 0,
            top_score: 0,
        };
        food.place(snake, grid_size, rng)?;
        Ok(food)
    }

    /// Rejection-samples a random cell the snake does not cover.
    ///
    /// Fails up front with [`BoardError::NoFreeCell`] when no such cell exists,
    /// so the sampling loop always terminates.
    pub fn place<R: Rng>(
        &mut self,
        snake: &Snake,
        grid_size: i32,
        rng: &mut R,
    ) -> Result<(), BoardError> {
        let in_bounds = |pos: &Pos| (0..grid_size).contains(&pos.x) && (0..grid_size).contains(&pos.y);
        let covered: HashSet<Pos> = snake.segments().map(|s| s.pos).filter(in_bounds).collect();
        let cells = (grid_size.max(0) as usize).pow(2);
        if covered.len() >= cells {
            return Err(BoardError::NoFreeCell { grid_size });
        }

        loop {
            let pos = Pos::new(rng.random_range(0..grid_size), rng.random_range(0..grid_size));
            if !covered.contains(&pos) {
                self.pos = pos;
                return Ok(());
            }
        }
    }

    pub fn consumed_by(&self, head: Pos) -> bool {
        self.pos == head
    }

    /// Scores the apple and moves it. Call after the snake has grown so the
    /// new tail is avoided too.
    pub fn on_consumed<R: Rng>(
        &mut self,
        snake: &Snake,
        grid_size: i32,
        rng: &mut R,
    ) -> Result<(), BoardError> {
        self.score += 1;
        self.place(snake, grid_size, rng)
    }

    pub fn on_reset(&mut self, final_score: usize) {
        self.top_score = self.top_score.max(final_score);
        self.score = 0;
    }
}
