//! Episode loop and summary statistics.

use crate::policy::Policy;
use anyhow::Result;
use snake_core::{Action, TerminationCause};
use snake_world::SnakeEngine;
use std::collections::BTreeMap;
use tracing::{info, instrument, warn};

/// Outcome of one episode
#[derive(Debug, Clone, PartialEq)]
pub struct EpisodeSummary {
    pub steps: u64,
    pub total_reward: f32,
    pub food_eaten: u32,
    pub final_len: usize,
    /// `None` if the tick cap was reached first
    pub cause: Option<TerminationCause>,
}

/// Run one episode from a fresh reset
#[instrument(skip(engine, policy))]
pub fn run_episode(
    engine: &mut SnakeEngine,
    policy: &mut impl Policy,
    episode: u32,
    max_ticks: u64,
) -> Result<EpisodeSummary> {
    let mut observation = engine.reset(None);
    let mut summary = EpisodeSummary {
        steps: 0,
        total_reward: 0.0,
        food_eaten: 0,
        final_len: engine.body().len(),
        cause: None,
    };

    for _ in 0..max_ticks {
        let action = Action::from_index(policy.act(&observation))?;
        let result = engine.step(action)?;

        summary.steps += 1;
        summary.total_reward += result.reward;
        summary.final_len = result.info.body_len;
        if result.info.ate_food {
            summary.food_eaten += 1;
        }

        if result.done() {
            summary.cause = result.info.cause;
            break;
        }
        observation = result.observation;
    }

    if summary.cause.is_none() {
        warn!(episode, max_ticks, "Episode hit the tick cap");
    }

    info!(
        event = "episode_summary",
        episode,
        steps = summary.steps,
        total_reward = summary.total_reward,
        food_eaten = summary.food_eaten,
        final_len = summary.final_len,
        cause = summary.cause.map(|c| c.as_str()).unwrap_or("tick_cap"),
        "Episode complete"
    );

    Ok(summary)
}

/// Aggregate over all episodes of a run
#[derive(Debug, Clone, Default)]
pub struct RunSummary {
    pub episodes: u32,
    pub total_steps: u64,
    pub total_reward: f64,
    pub best_reward: Option<f32>,
    pub max_len: usize,
    pub total_food: u64,
    pub causes: BTreeMap<&'static str, u32>,
}

impl RunSummary {
    pub fn record(&mut self, episode: &EpisodeSummary) {
        self.episodes += 1;
        self.total_steps += episode.steps;
        self.total_reward += episode.total_reward as f64;
        self.best_reward = Some(match self.best_reward {
            Some(best) => best.max(episode.total_reward),
            None => episode.total_reward,
        });
        self.max_len = self.max_len.max(episode.final_len);
        self.total_food += episode.food_eaten as u64;

        let cause = episode.cause.map(|c| c.as_str()).unwrap_or("tick_cap");
        *self.causes.entry(cause).or_insert(0) += 1;
    }

    pub fn mean_reward(&self) -> f64 {
        if self.episodes == 0 {
            0.0
        } else {
            self.total_reward / self.episodes as f64
        }
    }

    pub fn mean_steps(&self) -> f64 {
        if self.episodes == 0 {
            0.0
        } else {
            self.total_steps as f64 / self.episodes as f64
        }
    }

    pub fn log(&self) {
        info!(
            event = "run_summary",
            episodes = self.episodes,
            mean_reward = format!("{:.2}", self.mean_reward()),
            best_reward = self.best_reward.unwrap_or(0.0),
            mean_steps = format!("{:.1}", self.mean_steps()),
            max_len = self.max_len,
            total_food = self.total_food,
            causes = ?self.causes,
            "Run complete"
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::policy::RandomPolicy;
    use snake_core::EnvConfig;
    use snake_world::Observation;

    struct Constant(i64);

    impl Policy for Constant {
        fn act(&mut self, _observation: &Observation) -> i64 {
            self.0
        }
    }

    #[test]
    fn test_straight_episode_hits_wall() {
        let mut engine = SnakeEngine::new(EnvConfig::default()).unwrap();
        let summary = run_episode(&mut engine, &mut Constant(1), 0, 1_000).unwrap();

        assert_eq!(summary.steps, 15);
        assert_eq!(summary.cause, Some(TerminationCause::WallCollision));
        assert_eq!(summary.total_reward, 14.0 * -10.0 - 50.0);
        assert_eq!(summary.final_len, 2);
    }

    #[test]
    fn test_tick_cap() {
        let mut engine = SnakeEngine::new(EnvConfig::default()).unwrap();
        // Right turns circle in place
        let summary = run_episode(&mut engine, &mut Constant(2), 0, 10).unwrap();
        assert_eq!(summary.steps, 10);
        assert_eq!(summary.cause, None);
    }

    #[test]
    fn test_invalid_action_propagates() {
        let mut engine = SnakeEngine::new(EnvConfig::default()).unwrap();
        let err = run_episode(&mut engine, &mut Constant(5), 0, 10).unwrap_err();
        assert!(err.to_string().contains("Invalid action index: 5"));
    }

    #[test]
    fn test_random_episodes_reuse_engine() {
        let mut engine = SnakeEngine::new(EnvConfig::default()).unwrap();
        let mut policy = RandomPolicy::new(523);
        let mut run = RunSummary::default();

        for episode in 0..5 {
            let summary = run_episode(&mut engine, &mut policy, episode, 10_000).unwrap();
            assert!(summary.cause.is_some());
            assert!(summary.final_len >= 2);
            run.record(&summary);
        }

        assert_eq!(run.episodes, 5);
        assert_eq!(run.causes.values().sum::<u32>(), 5);
        assert!(run.mean_steps() >= 1.0);
    }

    #[test]
    fn test_run_summary_means() {
        let mut run = RunSummary::default();
        assert_eq!(run.mean_reward(), 0.0);

        run.record(&EpisodeSummary {
            steps: 10,
            total_reward: 20.0,
            food_eaten: 1,
            final_len: 3,
            cause: Some(TerminationCause::SelfCollision),
        });
        run.record(&EpisodeSummary {
            steps: 30,
            total_reward: -40.0,
            food_eaten: 0,
            final_len: 2,
            cause: Some(TerminationCause::WallCollision),
        });

        assert_eq!(run.mean_reward(), -10.0);
        assert_eq!(run.mean_steps(), 20.0);
        assert_eq!(run.best_reward, Some(20.0));
        assert_eq!(run.max_len, 3);
        assert_eq!(run.total_food, 1);
        assert_eq!(run.causes.get("self_collision"), Some(&1));
        assert_eq!(run.causes.get("wall_collision"), Some(&1));
    }
}
