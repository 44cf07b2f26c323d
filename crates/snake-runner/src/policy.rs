//! Action sources for driving the engine.

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use snake_core::Action;
use snake_world::Observation;

/// Anything that picks an action index from an observation
pub trait Policy {
    fn act(&mut self, observation: &Observation) -> i64;
}

/// Uniform random choice over the action indices
#[derive(Debug, Clone)]
pub struct RandomPolicy {
    rng: ChaCha8Rng,
}

impl RandomPolicy {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: ChaCha8Rng::seed_from_u64(seed),
        }
    }
}

impl Policy for RandomPolicy {
    fn act(&mut self, _observation: &Observation) -> i64 {
        self.rng.gen_range(0..Action::COUNT as i64)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use snake_core::{Heading, Position};

    fn observation() -> Observation {
        Observation {
            head: Position::new(4, 4),
            heading: Heading::new(0, 1),
            grid: vec![0; 16],
        }
    }

    #[test]
    fn test_random_policy_range() {
        let mut policy = RandomPolicy::new(1);
        let obs = observation();
        let mut seen = [false; 3];
        for _ in 0..200 {
            let index = policy.act(&obs);
            assert!(Action::from_index(index).is_ok());
            seen[index as usize] = true;
        }
        assert!(seen.iter().all(|&s| s), "all actions should be sampled");
    }

    #[test]
    fn test_random_policy_seeded() {
        let obs = observation();
        let mut a = RandomPolicy::new(9);
        let mut b = RandomPolicy::new(9);
        for _ in 0..50 {
            assert_eq!(a.act(&obs), b.act(&obs));
        }
    }
}
