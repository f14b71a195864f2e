//! Stable snapshot hashing for deterministic verification.

use std::hash::Hasher;

use xxhash_rust::xxh3::Xxh3;

use super::*;

impl Session {
    pub fn snapshot_hash(&self) -> u64 {
        let mut hasher = Xxh3::new();
        hasher.write_u64(self.seed);
        hasher.write_u64(self.tick);
        hasher.write_u32(self.score);
        hasher.write_u32(self.eaten);
        hasher.write_u8(match self.outcome {
            None => 0,
            Some(LevelOutcome::Cleared) => 1,
            Some(LevelOutcome::Caught) => 2,
        });
        for agent in self.agents() {
            hasher.write_i32(agent.location.x);
            hasher.write_i32(agent.location.y);
            hasher.write_u8(agent.facing as u8);
            hasher.write_u32(agent.freeze_ticks);
        }
        for goal in self.goals() {
            hasher.write_i32(goal.x);
            hasher.write_i32(goal.y);
        }
        hasher.finish()
    }
}
