//! Configuration types for the simulation.

use crate::{Error, Position, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::Path;

/// Reward constants
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RewardConfig {
    /// Penalty for leaving the grid, hitting the wall ring or the body
    pub wall_hit: f32,
    /// Bonus for eating food
    pub per_food: f32,
    /// Shaping bonus for moving strictly closer to the food.
    /// Moving strictly farther costs twice this amount.
    pub per_step_towards_food: f32,
}

impl Default for RewardConfig {
    fn default() -> Self {
        Self {
            wall_hit: -50.0,
            per_food: 100.0,
            per_step_towards_food: 5.0,
        }
    }
}

impl RewardConfig {
    /// Shaping penalty for moving strictly away from the food
    pub fn per_step_away_from_food(&self) -> f32 {
        -2.0 * self.per_step_towards_food
    }
}

/// Largest accepted grid side. Keeps `size * size` and `i32` coordinates in range.
pub const MAX_GRID_SIZE: usize = 1024;

/// Initial placement of the body chain and the food
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LayoutConfig {
    /// Body chain, tail first, head last
    pub body: Vec<Position>,
    /// Initial food cell
    pub food: Position,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            body: vec![Position::new(4, 3), Position::new(4, 4)],
            food: Position::new(3, 3),
        }
    }
}

impl LayoutConfig {
    /// Check the layout fits strictly inside the wall ring of a `grid_size` grid
    pub fn validate(&self, grid_size: usize) -> Result<()> {
        if grid_size < 3 {
            return Err(Error::Configuration(format!(
                "grid size {} leaves no interior inside the wall ring",
                grid_size
            )));
        }
        if grid_size > MAX_GRID_SIZE {
            return Err(Error::Configuration(format!(
                "grid size {} exceeds the maximum of {}",
                grid_size, MAX_GRID_SIZE
            )));
        }

        if self.body.len() < 2 {
            return Err(Error::Configuration(format!(
                "body chain needs at least 2 cells, got {}",
                self.body.len()
            )));
        }

        let interior = |pos: &Position| {
            let max = grid_size as i32 - 1;
            pos.row > 0 && pos.row < max && pos.col > 0 && pos.col < max
        };

        let mut seen = HashSet::with_capacity(self.body.len());
        for (idx, pos) in self.body.iter().enumerate() {
            if !interior(pos) {
                return Err(Error::Configuration(format!(
                    "body cell {} at {} is outside the interior of a {}x{} grid",
                    idx, pos, grid_size, grid_size
                )));
            }
            if !seen.insert(*pos) {
                return Err(Error::Configuration(format!(
                    "body cell {} at {} overlaps an earlier body cell",
                    idx, pos
                )));
            }
        }

        for (idx, pair) in self.body.windows(2).enumerate() {
            if !pair[0].is_adjacent(&pair[1]) {
                return Err(Error::Configuration(format!(
                    "body cells {} {} and {} {} are not axis-adjacent",
                    idx,
                    pair[0],
                    idx + 1,
                    pair[1]
                )));
            }
        }

        if !interior(&self.food) {
            return Err(Error::Configuration(format!(
                "food at {} is outside the interior of a {}x{} grid",
                self.food, grid_size, grid_size
            )));
        }
        if seen.contains(&self.food) {
            return Err(Error::Configuration(format!(
                "food at {} overlaps the body chain",
                self.food
            )));
        }

        Ok(())
    }
}

/// Environment configuration parameters
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EnvConfig {
    /// Side length of the square grid, wall ring included
    pub grid_size: usize,
    /// Seed for the food respawn generator
    pub seed: u64,
    /// Ticks allowed without eating before the episode ends
    pub max_steps_after_food: u64,
    /// Report starvation as truncation instead of termination
    pub starvation_truncates: bool,
    /// Reward constants
    pub rewards: RewardConfig,
    /// Initial body and food placement
    pub layout: LayoutConfig,
}

impl Default for EnvConfig {
    fn default() -> Self {
        Self {
            grid_size: 20,
            seed: 0,
            max_steps_after_food: 200, // avoid endless loops
            starvation_truncates: false,
            rewards: RewardConfig::default(),
            layout: LayoutConfig::default(),
        }
    }
}

impl EnvConfig {
    pub fn validate(&self) -> Result<()> {
        self.layout.validate(self.grid_size)
    }
}

/// Rollout runner configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RunnerConfig {
    /// Number of episodes to run
    pub episodes: u32,
    /// Hard cap on ticks per episode
    pub max_ticks_per_episode: u64,
    /// Seed for the random action source
    pub policy_seed: u64,
    /// Print the last frame of each episode as text
    pub render_final_frame: bool,
    /// Environment configuration
    pub env: EnvConfig,
}

impl Default for RunnerConfig {
    fn default() -> Self {
        Self {
            episodes: 10,
            max_ticks_per_episode: 10_000,
            policy_seed: 523,
            render_final_frame: false,
            env: EnvConfig::default(),
        }
    }
}

impl RunnerConfig {
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json(&json)
    }
}
