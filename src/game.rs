// Reference snake game used for self-play
//
// The snake owns its body in a deque, the game owns the snake, the apple and a seeded RNG.
// Collision rules follow the browser game: leaving the board or touching any current body
// cell ends the game, including the cell the tail would vacate on this very move.

use log::debug;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::collections::VecDeque;

use crate::board::Board;
use crate::error::PlanError;
use crate::types::{BodyState, Direction, Position};

/// Starting body of the browser game, head first
pub const DEFAULT_BODY: [Position; 4] = [
    Position::new(7, 4),
    Position::new(7, 3),
    Position::new(7, 2),
    Position::new(7, 1),
];

/// Body container, head at the front
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Snake {
    body: VecDeque<Position>,
}

impl Snake {
    pub fn new(body: Vec<Position>) -> Result<Self, PlanError> {
        if body.is_empty() {
            return Err(PlanError::EmptyBody);
        }
        Ok(Snake {
            body: VecDeque::from(body),
        })
    }

    pub fn len(&self) -> usize {
        self.body.len()
    }

    pub fn is_empty(&self) -> bool {
        self.body.is_empty()
    }

    pub fn head(&self) -> Position {
        self.body[0]
    }

    pub fn tail(&self) -> Position {
        self.body[self.body.len() - 1]
    }

    pub fn contains(&self, pos: &Position) -> bool {
        self.body.contains(pos)
    }

    /// Pushes a new head; the tail is dropped unless the snake grows
    pub fn advance(&mut self, next: Position, grow: bool) {
        self.body.push_front(next);
        if !grow {
            self.body.pop_back();
        }
    }
}

impl Default for Snake {
    fn default() -> Self {
        Snake {
            body: DEFAULT_BODY.iter().copied().collect(),
        }
    }
}

impl BodyState for Snake {
    fn head(&self) -> Option<Position> {
        self.body.front().copied()
    }

    fn segments(&self) -> Vec<Position> {
        self.body.iter().copied().collect()
    }
}

/// Result of a single game step
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepOutcome {
    Moved,
    Ate,
    Collided,
}

#[derive(Debug, Clone)]
pub struct Game {
    board: Board,
    snake: Snake,
    apple: Option<Position>,
    score: u32,
    steps: usize,
    rng: StdRng,
}

impl Game {
    /// Starts a game with `body` on `board`, spawning the first apple from `seed`
    pub fn new(board: Board, body: Vec<Position>, seed: u64) -> Result<Self, PlanError> {
        if let Some((index, position)) = body
            .iter()
            .enumerate()
            .find(|(_, pos)| !board.in_bounds(pos))
        {
            return Err(PlanError::BodyOutOfBounds {
                index,
                position: *position,
            });
        }

        let mut game = Game {
            board,
            snake: Snake::new(body)?,
            apple: None,
            score: 0,
            steps: 0,
            rng: StdRng::seed_from_u64(seed),
        };
        game.apple = game.spawn_apple();
        Ok(game)
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn snake(&self) -> &Snake {
        &self.snake
    }

    /// Current apple; `None` once the body covers the whole board
    pub fn apple(&self) -> Option<Position> {
        self.apple
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn steps(&self) -> usize {
        self.steps
    }

    /// Picks a free cell uniformly at random
    fn spawn_apple(&mut self) -> Option<Position> {
        let free: Vec<Position> = self
            .board
            .cells()
            .filter(|pos| !self.snake.contains(pos))
            .collect();

        if free.is_empty() {
            return None;
        }
        Some(free[self.rng.random_range(0..free.len())])
    }

    /// Moves the snake one cell in `direction`
    pub fn step(&mut self, direction: Direction) -> StepOutcome {
        let next = direction.apply(&self.snake.head());

        if !self.board.in_bounds(&next) || self.snake.contains(&next) {
            debug!("Collision moving {} into {} after {} steps", direction, next, self.steps);
            return StepOutcome::Collided;
        }

        self.steps += 1;

        if Some(next) == self.apple {
            self.snake.advance(next, true);
            self.score += 1;
            self.apple = self.spawn_apple();
            StepOutcome::Ate
        } else {
            self.snake.advance(next, false);
            StepOutcome::Moved
        }
    }
}
