use serde::{Deserialize, Serialize};

/// Who drives the player agent.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PlayerControl {
    /// Pathfinder-driven seeking.
    #[default]
    Auto,
    /// One move per queued `Session::steer` call; idle otherwise.
    Manual,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SessionConfig {
    pub seed: u64,
    pub player_control: PlayerControl,
    /// Ticks a pursuit monster stays put after spawning.
    pub pursuit_freeze_ticks: u32,
    pub seeking_history: usize,
    pub monster_history: usize,
    pub max_ticks_per_level: u32,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            seed: 30_006,
            player_control: PlayerControl::Auto,
            pursuit_freeze_ticks: 17,
            seeking_history: 100,
            monster_history: 10,
            max_ticks_per_level: 5_000,
        }
    }
}

impl SessionConfig {
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }
}
