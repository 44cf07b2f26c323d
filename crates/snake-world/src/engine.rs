//! Grid simulation engine for a single snake.

use crate::body::BodyChain;
use crate::env::{Environment, Observation, ObservationSpace, SpaceInfo, SpaceType, StepInfo, StepResult};
use crate::grid::Grid;
use crate::render;
use rand::seq::SliceRandom;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use snake_core::{Action, CellState, EnvConfig, Error, Position, Result, TerminationCause};
use tracing::{debug, info, instrument, trace};

/// Reset state captured at construction
#[derive(Debug, Clone)]
struct Snapshot {
    grid: Grid,
    body: BodyChain,
    food: Position,
}

/// Owns the full state of one episode.
///
/// All operations take `&mut self` and run to completion without blocking.
/// Sharing one engine between threads needs a lock or a single owning thread
/// around it; the engine does no synchronization of its own.
#[derive(Debug, Clone)]
pub struct SnakeEngine {
    config: EnvConfig,
    initial: Snapshot,
    grid: Grid,
    body: BodyChain,
    food: Option<Position>,
    rng: ChaCha8Rng,
    step_index: u64,
    last_food_step: u64,
    head_dist_to_food: f64,
    terminated: bool,
    // Episode bookkeeping for logs
    episode: u64,
    episode_return: f32,
    food_eaten: u32,
}

impl SnakeEngine {
    /// Build the grid, place the initial layout and snapshot it
    pub fn new(config: EnvConfig) -> Result<Self> {
        config.validate()?;

        let mut grid = Grid::new(config.grid_size);
        let body = BodyChain::new(config.layout.body.iter().copied());
        for pos in body.iter() {
            grid.set(*pos, CellState::Body);
        }
        let food = config.layout.food;
        grid.set(food, CellState::Food);

        let head_dist_to_food = body.head().euclidean_distance(&food);
        let rng = ChaCha8Rng::seed_from_u64(config.seed);

        debug!(
            grid_size = config.grid_size,
            body_len = body.len(),
            food = %food,
            seed = config.seed,
            "Snake engine initialized"
        );

        Ok(Self {
            initial: Snapshot {
                grid: grid.clone(),
                body: body.clone(),
                food,
            },
            config,
            grid,
            body,
            food: Some(food),
            rng,
            step_index: 0,
            last_food_step: 0,
            head_dist_to_food,
            terminated: false,
            episode: 0,
            episode_return: 0.0,
            food_eaten: 0,
        })
    }

    /// Restore the initial layout. A seed reseeds the food respawn generator.
    #[instrument(skip(self), fields(episode = self.episode + 1))]
    pub fn reset(&mut self, seed: Option<u64>) -> Observation {
        self.grid = self.initial.grid.clone();
        self.body = self.initial.body.clone();
        self.food = Some(self.initial.food);
        self.step_index = 0;
        self.last_food_step = 0;
        self.head_dist_to_food = self.body.head().euclidean_distance(&self.initial.food);
        self.terminated = false;

        if let Some(seed) = seed {
            self.rng = ChaCha8Rng::seed_from_u64(seed);
        }

        self.episode += 1;
        self.episode_return = 0.0;
        self.food_eaten = 0;

        debug!(reseeded = seed.is_some(), "Episode reset");
        self.observe()
    }

    /// Read-only projection of the current state
    pub fn observe(&self) -> Observation {
        Observation {
            head: self.body.head(),
            heading: self.body.heading(),
            grid: self.grid.to_codes(),
        }
    }

    /// Advance one tick
    pub fn step(&mut self, action: Action) -> Result<StepResult<Observation>> {
        if self.terminated {
            return Err(Error::EpisodeTerminated { step: self.step_index });
        }

        let heading = self.body.heading();
        debug_assert!(heading.is_unit());
        let new_head = self.body.head().offset(heading.apply(action));

        let target = match self.grid.get(new_head) {
            Some(state) => state,
            None => return Ok(self.reject_move(new_head, TerminationCause::BoundaryExit)),
        };

        let mut reward = 0.0;
        let mut cause = None;
        let mut ate_food = false;

        match target {
            CellState::Wall => {
                return Ok(self.reject_move(new_head, TerminationCause::WallCollision));
            }
            CellState::Body => {
                return Ok(self.reject_move(new_head, TerminationCause::SelfCollision));
            }
            CellState::Food => {
                reward += self.config.rewards.per_food;
                self.body.push_head(new_head);
                self.grid.set(new_head, CellState::Body);
                self.last_food_step = self.step_index;
                self.food_eaten += 1;
                ate_food = true;

                self.food = self.respawn_food();
                if self.food.is_none() {
                    cause = Some(TerminationCause::GridFull);
                }
            }
            CellState::Empty => {
                self.body.push_head(new_head);
                self.grid.set(new_head, CellState::Body);
                if let Some(tail) = self.body.pop_tail() {
                    self.grid.set(tail, CellState::Empty);
                }
            }
        }

        reward += self.shaping_reward();

        let mut truncated = false;
        if cause.is_none()
            && self.step_index - self.last_food_step > self.config.max_steps_after_food
        {
            cause = Some(TerminationCause::Starvation);
            truncated = self.config.starvation_truncates;
        }

        let step = self.step_index;
        self.step_index += 1;
        self.episode_return += reward;
        self.terminated = cause.is_some();

        trace!(
            step,
            action = ?action,
            head = %new_head,
            reward,
            ate_food,
            body_len = self.body.len(),
            "Tick"
        );

        if let Some(cause) = cause {
            self.log_episode_end(cause);
        }

        Ok(StepResult {
            observation: self.observe(),
            reward,
            terminated: cause.is_some() && !truncated,
            truncated,
            info: StepInfo {
                step,
                cause,
                ate_food,
                body_len: self.body.len(),
            },
        })
    }

    /// End the episode without touching the grid or the body chain
    fn reject_move(&mut self, target: Position, cause: TerminationCause) -> StepResult<Observation> {
        // The step counter stays put: a rejected move is not a processed tick.
        let reward = self.config.rewards.wall_hit;
        self.terminated = true;
        self.episode_return += reward;

        debug!(
            step = self.step_index,
            target = %target,
            cause = %cause,
            "Move rejected"
        );
        self.log_episode_end(cause);

        StepResult {
            observation: self.observe(),
            reward,
            terminated: true,
            truncated: false,
            info: StepInfo {
                step: self.step_index,
                cause: Some(cause),
                ate_food: false,
                body_len: self.body.len(),
            },
        }
    }

    /// Place food on a uniformly chosen empty cell, `None` if the grid is full
    fn respawn_food(&mut self) -> Option<Position> {
        let empty = self.grid.empty_cells();
        let food = empty.choose(&mut self.rng).copied()?;
        self.grid.set(food, CellState::Food);
        trace!(food = %food, candidates = empty.len(), "Food respawned");
        Some(food)
    }

    /// Update the distance cache and return the shaping term
    fn shaping_reward(&mut self) -> f32 {
        let Some(food) = self.food else {
            return 0.0;
        };

        let previous = self.head_dist_to_food;
        self.head_dist_to_food = self.body.head().euclidean_distance(&food);

        let rewards = &self.config.rewards;
        if self.head_dist_to_food < previous {
            rewards.per_step_towards_food
        } else if self.head_dist_to_food > previous {
            rewards.per_step_away_from_food()
        } else {
            0.0
        }
    }

    fn log_episode_end(&self, cause: TerminationCause) {
        info!(
            event = "episode_end",
            episode = self.episode,
            steps = self.step_index,
            cause = %cause,
            episode_return = self.episode_return,
            food_eaten = self.food_eaten,
            body_len = self.body.len(),
            "Episode finished"
        );
    }

    pub fn observation_space(&self) -> ObservationSpace {
        let size = self.config.grid_size;
        ObservationSpace {
            head: SpaceInfo {
                shape: vec![2],
                dtype: SpaceType::Box { low: 0, high: size as i32 - 1 },
            },
            heading: SpaceInfo {
                shape: vec![2],
                dtype: SpaceType::Box { low: -1, high: 1 },
            },
            grid: SpaceInfo {
                shape: vec![size * size],
                dtype: SpaceType::Box { low: 0, high: 3 },
            },
        }
    }

    pub fn action_space(&self) -> SpaceInfo {
        SpaceInfo {
            shape: vec![],
            dtype: SpaceType::Discrete(Action::COUNT),
        }
    }

    pub fn config(&self) -> &EnvConfig {
        &self.config
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn body(&self) -> &BodyChain {
        &self.body
    }

    pub fn food(&self) -> Option<Position> {
        self.food
    }

    pub fn step_index(&self) -> u64 {
        self.step_index
    }

    pub fn last_food_step(&self) -> u64 {
        self.last_food_step
    }

    pub fn head_distance_to_food(&self) -> f64 {
        self.head_dist_to_food
    }

    pub fn is_terminated(&self) -> bool {
        self.terminated
    }

    /// Move the food to `pos`, bypassing the random respawn
    #[cfg(test)]
    fn place_food(&mut self, pos: Position) {
        if let Some(old) = self.food {
            self.grid.set(old, CellState::Empty);
        }
        self.grid.set(pos, CellState::Food);
        self.food = Some(pos);
        self.head_dist_to_food = self.body.head().euclidean_distance(&pos);
    }
}

impl Environment for SnakeEngine {
    type Observation = Observation;
    type Action = Action;

    fn reset(&mut self, seed: Option<u64>) -> Result<Self::Observation> {
        Ok(SnakeEngine::reset(self, seed))
    }

    fn step(&mut self, action: Self::Action) -> Result<StepResult<Self::Observation>> {
        SnakeEngine::step(self, action)
    }

    fn observe(&self) -> Self::Observation {
        SnakeEngine::observe(self)
    }

    fn render(&self) -> Vec<u8> {
        render::render_rgb(&self.grid)
    }
}
