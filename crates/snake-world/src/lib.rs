//! Grid snake simulation engine.
//!
//! This module implements the 2D grid, the snake's body chain and the
//! step-based environment that moves it.

pub mod body;
pub mod engine;
pub mod env;
pub mod grid;
pub mod render;

pub use body::BodyChain;
pub use engine::SnakeEngine;
pub use env::{Environment, Observation, ObservationSpace, SpaceInfo, SpaceType, StepInfo, StepResult};
pub use grid::Grid;
pub use render::{render_rgb, render_text};
