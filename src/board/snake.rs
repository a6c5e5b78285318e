use serde::{Deserialize, Serialize};
use std::{collections::VecDeque, fmt, ops::Add, str::FromStr};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    pub const ALL: [Direction; 4] = [
        Direction::Up,
        Direction::Down,
        Direction::Left,
        Direction::Right,
    ];

    pub fn opposite(self) -> Direction {
        match self {
            Direction::Up => Direction::Down,
            Direction::Down => Direction::Up,
            Direction::Left => Direction::Right,
            Direction::Right => Direction::Left,
        }
    }

    /// Screen coordinates: y grows downwards, so `Up` is -y.
    pub fn delta(self) -> (i32, i32) {
        match self {
            Direction::Up => (0, -1),
            Direction::Down => (0, 1),
            Direction::Left => (-1, 0),
            Direction::Right => (1, 0),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseDirectionError(String);

impl fmt::Display for ParseDirectionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown direction {:?}", self.0)
    }
}

impl std::error::Error for ParseDirectionError {}

impl FromStr for Direction {
    type Err = ParseDirectionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "up" | "w" => Ok(Direction::Up),
            "down" | "s" => Ok(Direction::Down),
            "left" | "a" => Ok(Direction::Left),
            "right" | "d" => Ok(Direction::Right),
            other => Err(ParseDirectionError(other.to_string())),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Pos {
    pub x: i32,
    pub y: i32,
}

impl Pos {
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }
}

impl Add<Direction> for Pos {
    type Output = Pos;

    fn add(self, dir: Direction) -> Pos {
        let (dx, dy) = dir.delta();
        Pos::new(self.x + dx, self.y + dy)
    }
}

/// One body cell plus the heading it moved with on the last advance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Segment {
    pub pos: Pos,
    pub dir: Direction,
}

/// Snake body ordered head (front) to tail (back). Never empty.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Snake {
    parts: VecDeque<Segment>,
}

impl Snake {
    /// Builds a snake of `length` segments (at least one) by growing from the head.
    pub fn new(head: Pos, dir: Direction, length: usize) -> Self {
        let mut snake = Snake {
            parts: VecDeque::from([Segment { pos: head, dir }]),
        };
        for _ in 1..length {
            snake.grow();
        }
        snake
    }

    /// Builds a snake from explicit segments, head first. Returns `None` when empty.
    pub fn from_segments(segments: impl IntoIterator<Item = Segment>) -> Option<Self> {
        let parts: VecDeque<Segment> = segments.into_iter().collect();
        if parts.is_empty() {
            None
        } else {
            Some(Snake { parts })
        }
    }

    pub fn head(&self) -> Segment {
        self.parts[0]
    }

    pub fn tail(&self) -> Segment {
        self.parts[self.parts.len() - 1]
    }

    pub fn len(&self) -> usize {
        self.parts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.parts.is_empty()
    }

    pub fn segments(&self) -> impl Iterator<Item = &Segment> {
        self.parts.iter()
    }

    /// Every segment except the head.
    pub fn body(&self) -> impl Iterator<Item = &Segment> {
        self.parts.iter().skip(1)
    }

    /// Moves the head one cell along its heading; every other segment takes
    /// the position and heading its predecessor had before the move.
    pub fn advance(&mut self) {
        let mut carried = self.parts[0];

        let head = &mut self.parts[0];
        head.pos = head.pos + head.dir;

        for part in self.parts.iter_mut().skip(1) {
            carried = std::mem::replace(part, carried);
        }
    }

    /// Appends a segment in the cell the tail just vacated.
    pub fn grow(&mut self) {
        let tail = self.tail();
        self.parts.push_back(Segment {
            pos: tail.pos + tail.dir.opposite(),
            dir: tail.dir,
        });
    }

    pub fn turn(&mut self, dir: Direction) {
        self.parts[0].dir = dir;
    }

    pub fn occupies(&self, pos: Pos, exclude_head: bool) -> bool {
        let skip = usize::from(exclude_head);
        self.parts.iter().skip(skip).any(|part| part.pos == pos)
    }

    pub fn reset(&mut self, head: Pos, dir: Direction, length: usize) {
        *self = Snake::new(head, dir, length);
    }
}
