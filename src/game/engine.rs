use std::collections::HashSet;

use log::{debug, info};
use rand::{rngs::StdRng, seq::SliceRandom, Rng, SeedableRng};

use super::{
    action::Direction,
    config::{check_grid, GameConfig},
    error::GameError,
    state::{EndReason, GamePhase, GameSnapshot, GameState, Position, Snake},
};

/// Where the head of a fresh snake is placed, grid permitting
pub const START_HEAD: Position = Position::new(5, 10);

/// Random draws tried before falling back to scanning the free cells
const FOOD_DRAW_ATTEMPTS: usize = 64;

/// What a single tick did
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickOutcome {
    /// The game was not running; nothing changed
    Idle,
    /// The snake advanced one cell
    Moved { ate_food: bool },
    /// The game ended on this tick
    Ended(EndReason),
}

/// The game engine that owns the authoritative state of one game.
///
/// All mutation goes through `&mut self`, so ticks and direction requests are
/// serialized by the borrow checker. Timing is left to the caller, which
/// invokes [`GameEngine::tick`] at a fixed period while the game is running.
pub struct GameEngine {
    config: GameConfig,
    rng: StdRng,
    state: GameState,
}

impl GameEngine {
    /// Create a new game engine in the `Ready` phase
    pub fn new(config: GameConfig) -> Result<Self, GameError> {
        Self::with_rng(config, StdRng::from_entropy())
    }

    /// Create an engine whose food placement is reproducible
    pub fn with_seed(config: GameConfig, seed: u64) -> Result<Self, GameError> {
        Self::with_rng(config, StdRng::seed_from_u64(seed))
    }

    fn with_rng(config: GameConfig, mut rng: StdRng) -> Result<Self, GameError> {
        config.validate()?;
        let state = fresh_state(&config, config.grid_width, config.grid_height, &mut rng)?;

        Ok(Self { config, rng, state })
    }

    /// Replace the game with a fresh one on a `width` x `height` grid.
    ///
    /// The new game waits in `Ready` until [`GameEngine::start`] is called.
    pub fn reset(&mut self, grid_width: usize, grid_height: usize) -> Result<(), GameError> {
        self.state = fresh_state(&self.config, grid_width, grid_height, &mut self.rng)?;
        self.config.grid_width = grid_width;
        self.config.grid_height = grid_height;

        info!(
            "New game on {}x{} grid, snake length {}",
            grid_width,
            grid_height,
            self.state.snake.len()
        );
        Ok(())
    }

    /// Reset on the current grid and start immediately
    pub fn restart(&mut self) -> Result<(), GameError> {
        self.reset(self.config.grid_width, self.config.grid_height)?;
        self.start();
        Ok(())
    }

    /// Leave `Ready` and begin accepting ticks
    pub fn start(&mut self) {
        if self.state.phase == GamePhase::Ready {
            self.state.phase = GamePhase::Running;
            debug!("Game started");
        }
    }

    /// Buffer a turn for the next tick.
    ///
    /// A turn straight back into the neck is ignored, as is any request once
    /// the game is over. Several requests within one tick overwrite each other.
    pub fn request_direction(&mut self, direction: Direction) {
        if self.state.phase == GamePhase::Over {
            return;
        }
        if self.state.snake.direction.is_opposite(direction) {
            return;
        }

        self.state.pending_direction = direction;
    }

    /// Flip between `Running` and `Paused`; other phases are left alone
    pub fn toggle_pause(&mut self) -> GamePhase {
        self.state.phase = match self.state.phase {
            GamePhase::Running => GamePhase::Paused,
            GamePhase::Paused => GamePhase::Running,
            other => return other,
        };

        debug!("Phase is now {:?}", self.state.phase);
        self.state.phase
    }

    /// Advance the game by one cell
    pub fn tick(&mut self) -> TickOutcome {
        if self.state.phase != GamePhase::Running {
            return TickOutcome::Idle;
        }

        let direction = self.state.pending_direction;
        self.state.snake.direction = direction;
        self.state.ticks = self.state.ticks.saturating_add(1);

        let new_head = self.state.snake.head().moved_in_direction(direction);

        // The tail has not moved yet, so stepping onto it counts as a hit
        if !self.state.is_in_bounds(new_head) {
            return self.finish(EndReason::Wall);
        }
        if self.state.is_occupied_by_snake(new_head) {
            return self.finish(EndReason::SelfCollision);
        }

        let ate_food = self.state.food == Some(new_head);
        self.state.snake.advance(new_head, ate_food);

        if ate_food {
            self.state.score = self.state.score.saturating_add(self.config.score_increment);
            self.state.food = place_food(
                &self.state.snake,
                self.state.grid_width,
                self.state.grid_height,
                &mut self.rng,
            );
            debug!(
                "Food eaten at ({}, {}), score {}",
                new_head.x, new_head.y, self.state.score
            );

            if self.state.food.is_none() {
                return self.finish(EndReason::BoardFilled);
            }
        }

        TickOutcome::Moved { ate_food }
    }

    fn finish(&mut self, reason: EndReason) -> TickOutcome {
        self.state.phase = GamePhase::Over;
        self.state.end_reason = Some(reason);

        info!(
            "Game over ({:?}) after {} ticks, final score {}",
            reason, self.state.ticks, self.state.score
        );
        TickOutcome::Ended(reason)
    }

    pub fn is_over(&self) -> bool {
        self.state.phase == GamePhase::Over
    }

    pub fn score(&self) -> u32 {
        self.state.score
    }

    pub fn phase(&self) -> GamePhase {
        self.state.phase
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    /// Read-only access to the live state
    pub fn state(&self) -> &GameState {
        &self.state
    }

    /// Detached copy of the state for rendering
    pub fn snapshot(&self) -> GameSnapshot {
        self.state.snapshot()
    }

    #[cfg(test)]
    pub(crate) fn state_mut(&mut self) -> &mut GameState {
        &mut self.state
    }
}

/// Build the opening position for a grid.
///
/// The head goes to [`START_HEAD`] facing right. On narrow grids it is pulled
/// in so at least one cell is left ahead of it; a single-column grid starts
/// facing up instead. The body is shortened so that it stays on the grid and
/// leaves at least one cell free for food.
fn fresh_state(
    config: &GameConfig,
    grid_width: usize,
    grid_height: usize,
    rng: &mut impl Rng,
) -> Result<GameState, GameError> {
    check_grid(grid_width, grid_height)?;

    let free_cells = grid_width * grid_height - 1;
    let snake = if grid_width >= 2 {
        let head = Position::new(
            START_HEAD.x.min(grid_width as i32 - 2),
            START_HEAD.y.min(grid_height as i32 - 1),
        );
        let length = config
            .initial_snake_length
            .min(head.x as usize + 1)
            .min(free_cells);
        Snake::new(head, Direction::Right, length)
    } else {
        // check_grid guarantees at least two rows here
        let head = Position::new(0, START_HEAD.y.min(grid_height as i32 - 1));
        let length = config
            .initial_snake_length
            .min(grid_height - head.y as usize)
            .min(free_cells);
        Snake::new(head, Direction::Up, length)
    };

    let food = place_food(&snake, grid_width, grid_height, rng).ok_or_else(|| {
        GameError::InvalidConfiguration("no free cell left for food".to_string())
    })?;

    Ok(GameState::new(snake, food, grid_width, grid_height))
}

/// Pick a cell not covered by the snake, uniformly at random.
///
/// Tries plain rejection sampling first and falls back to choosing among the
/// free cells once the board is crowded. Returns `None` when no cell is free.
pub fn place_food(
    snake: &Snake,
    grid_width: usize,
    grid_height: usize,
    rng: &mut impl Rng,
) -> Option<Position> {
    if snake.len() >= grid_width * grid_height {
        return None;
    }

    for _ in 0..FOOD_DRAW_ATTEMPTS {
        let x = rng.gen_range(0..grid_width) as i32;
        let y = rng.gen_range(0..grid_height) as i32;
        let pos = Position::new(x, y);

        if !snake.occupies(pos) {
            return Some(pos);
        }
    }

    let occupied: HashSet<Position> = snake.segments().copied().collect();
    let free: Vec<Position> = (0..grid_height as i32)
        .flat_map(|y| (0..grid_width as i32).map(move |x| Position::new(x, y)))
        .filter(|pos| !occupied.contains(pos))
        .collect();

    free.choose(rng).copied()
}
