//! Environment trait and step types
//!
//! This module defines the contract between the simulation and whatever
//! decides on actions.

use serde::{Deserialize, Serialize};
use snake_core::{Heading, Position, Result, TerminationCause};

/// Core trait for step-based environments
pub trait Environment {
    /// Observation type
    type Observation;

    /// Action type
    type Action;

    /// Reset the environment and return initial observation.
    /// A seed reseeds the environment's own random source.
    fn reset(&mut self, seed: Option<u64>) -> Result<Self::Observation>;

    /// Step the environment with an action
    fn step(&mut self, action: Self::Action) -> Result<StepResult<Self::Observation>>;

    /// Current observation without changing state
    fn observe(&self) -> Self::Observation;

    /// RGB image of the current state
    fn render(&self) -> Vec<u8>;
}

/// Snapshot of what the agent sees after a tick
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Observation {
    /// Head cell
    pub head: Position,
    /// Movement direction, components in {-1, 0, 1}
    pub heading: Heading,
    /// Row-major cell codes, length N*N, values in {0, 1, 2, 3}
    pub grid: Vec<u8>,
}

/// Result of an environment step
#[derive(Debug, Clone)]
pub struct StepResult<O> {
    /// Next observation
    pub observation: O,

    /// Reward received
    pub reward: f32,

    /// Whether the episode terminated
    pub terminated: bool,

    /// Whether the episode was truncated
    pub truncated: bool,

    /// Additional info
    pub info: StepInfo,
}

impl<O> StepResult<O> {
    /// True if the episode is over for either reason
    pub fn done(&self) -> bool {
        self.terminated || self.truncated
    }
}

/// Additional step information
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StepInfo {
    /// Step index of the tick just processed
    pub step: u64,
    /// Why the episode ended, if it did
    pub cause: Option<TerminationCause>,
    /// Food was eaten this tick
    pub ate_food: bool,
    /// Body chain length after the tick
    pub body_len: usize,
}

/// Space information for observations and actions
#[derive(Debug, Clone, PartialEq)]
pub struct SpaceInfo {
    /// Shape of the space
    pub shape: Vec<usize>,

    /// Data type
    pub dtype: SpaceType,
}

/// Space data types
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SpaceType {
    /// Discrete space with n options
    Discrete(usize),

    /// Integer box with inclusive bounds
    Box { low: i32, high: i32 },
}

/// Named observation fields and their spaces
#[derive(Debug, Clone, PartialEq)]
pub struct ObservationSpace {
    pub head: SpaceInfo,
    pub heading: SpaceInfo,
    pub grid: SpaceInfo,
}
