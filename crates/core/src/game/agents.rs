//! Agent records and their per-agent random streams.

use rand_chacha::ChaCha8Rng;
use rand_chacha::rand_core::{Rng, SeedableRng};

use super::history::VisitedHistory;
use crate::types::{ActorKind, AgentId, AgentKind, Direction, Location, TurnSign};

#[derive(Clone, Debug)]
pub struct Agent {
    pub id: AgentId,
    pub actor: ActorKind,
    pub kind: AgentKind,
    pub spawn: Location,
    pub location: Location,
    pub facing: Direction,
    pub history: VisitedHistory,
    /// Remaining ticks before the agent may act.
    pub freeze_ticks: u32,
    rng: ChaCha8Rng,
}

impl Agent {
    pub(super) fn spawn(
        id: AgentId,
        actor: ActorKind,
        location: Location,
        history: usize,
        freeze_ticks: u32,
        seed: u64,
    ) -> Self {
        let kind = match actor {
            ActorKind::Player => AgentKind::Seeking,
            ActorKind::Monster(monster) => monster.agent_kind(),
        };
        Self {
            id,
            actor,
            kind,
            spawn: location,
            location,
            facing: Direction::North,
            history: VisitedHistory::new(history),
            freeze_ticks,
            rng: ChaCha8Rng::seed_from_u64(seed),
        }
    }

    /// Fair coin flip deciding which way the exploration cascade turns first.
    pub(super) fn draw_turn_sign(&mut self) -> TurnSign {
        if self.rng.next_u64() >> 63 == 0 {
            TurnSign::Clockwise
        } else {
            TurnSign::CounterClockwise
        }
    }
}

/// Splitmix-style mix of a base seed with a stream index.
pub(crate) fn mix_seed(seed: u64, stream: u64) -> u64 {
    let mut mixed = seed ^ stream.wrapping_mul(0x9E37_79B9_7F4A_7C15);
    mixed ^= mixed >> 30;
    mixed = mixed.wrapping_mul(0xBF58_476D_1CE4_E5B9);
    mixed ^= mixed >> 27;
    mixed = mixed.wrapping_mul(0x94D0_49BB_1331_11EB);
    mixed ^ (mixed >> 31)
}
