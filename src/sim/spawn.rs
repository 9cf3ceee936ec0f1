//! Periodic, probabilistic obstacle spawning
//!
//! Every fixed tick interval a single uniform draw picks the obstacle
//! variant; the new obstacle is appended straight onto the session's
//! obstacle list. There is no internal queue.

use rand::Rng;
use serde::{Deserialize, Serialize};

use super::entity::Obstacle;
use super::state::FieldConfig;
use crate::consts::{CACTUS_CHANCE, SPAWN_INTERVAL_TICKS};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Spawner {
    /// Ticks between spawn attempts
    pub interval_ticks: u64,
    /// Probability of a cactus per attempt; the remainder spawns a bird
    pub cactus_chance: f32,
}

impl Default for Spawner {
    fn default() -> Self {
        Self {
            interval_ticks: SPAWN_INTERVAL_TICKS,
            cactus_chance: CACTUS_CHANCE,
        }
    }
}

impl Spawner {
    /// Whether the given tick is a spawn tick
    pub fn due(&self, tick: u64) -> bool {
        tick % self.interval_ticks == 0
    }

    /// Run one spawn attempt if due, appending the result to `obstacles`.
    ///
    /// The variant draw is a single threshold on one uniform sample; it is
    /// never re-rolled.
    pub fn update(
        &self,
        tick: u64,
        field: &FieldConfig,
        rng: &mut impl Rng,
        obstacles: &mut Vec<Obstacle>,
    ) {
        if !self.due(tick) {
            return;
        }

        let obstacle = if rng.random::<f32>() < self.cactus_chance {
            Obstacle::cactus(field)
        } else {
            Obstacle::bird(field, rng)
        };
        log::debug!("tick {tick}: spawned {:?} at x={}", obstacle.kind, obstacle.pos.x);
        obstacles.push(obstacle);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::entity::ObstacleKind;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    #[test]
    fn test_spawn_cadence() {
        let spawner = Spawner::default();
        assert!(spawner.due(90));
        assert!(spawner.due(180));
        assert!(!spawner.due(1));
        assert!(!spawner.due(89));
        assert!(!spawner.due(91));
    }

    #[test]
    fn test_off_cadence_tick_spawns_nothing() {
        let spawner = Spawner::default();
        let field = FieldConfig::default();
        let mut rng = Pcg32::seed_from_u64(1);
        let mut obstacles = Vec::new();

        spawner.update(37, &field, &mut rng, &mut obstacles);
        assert!(obstacles.is_empty());
    }

    #[test]
    fn test_spawned_obstacle_starts_at_right_edge() {
        let spawner = Spawner::default();
        let field = FieldConfig::default();
        let mut rng = Pcg32::seed_from_u64(1);
        let mut obstacles = Vec::new();

        spawner.update(90, &field, &mut rng, &mut obstacles);
        assert_eq!(obstacles.len(), 1);
        assert_eq!(obstacles[0].pos.x, field.width);
    }

    #[test]
    fn test_variant_mix_roughly_matches_threshold() {
        let spawner = Spawner::default();
        let field = FieldConfig::default();
        let mut rng = Pcg32::seed_from_u64(99);
        let mut obstacles = Vec::new();

        for i in 1..=1000u64 {
            spawner.update(i * 90, &field, &mut rng, &mut obstacles);
        }
        assert_eq!(obstacles.len(), 1000);

        let cacti = obstacles
            .iter()
            .filter(|o| o.kind == ObstacleKind::Cactus)
            .count();
        // 70% +/- a generous margin for 1000 draws
        assert!((620..=780).contains(&cacti), "cacti = {cacti}");
    }
}
