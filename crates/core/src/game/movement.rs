//! Per-tick move decision for a single agent.
//!
//! Portal transit happens first, so every later computation sees the
//! post-teleport position. The preferred candidate depends on the agent kind;
//! when it is rejected the exploration cascade picks the move instead.

use std::collections::BTreeSet;

use super::agents::Agent;
use super::pathfinding::find_path;
use crate::grid::{GridModel, PortalGraph};
use crate::types::{AgentKind, Direction, Location, MoveReason};

pub(super) struct MoveContext<'a> {
    pub grid: &'a GridModel,
    pub portals: &'a PortalGraph,
    pub goals: &'a BTreeSet<Location>,
    pub player: Location,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(super) struct MovePlan {
    pub teleport: Option<(Location, Location)>,
    pub to: Location,
    pub facing: Direction,
    pub reason: MoveReason,
}

impl MovePlan {
    pub(super) fn hold(agent: &Agent) -> Self {
        Self { teleport: None, to: agent.location, facing: agent.facing, reason: MoveReason::Held }
    }
}

pub(super) fn plan_move(agent: &mut Agent, ctx: &MoveContext<'_>) -> MovePlan {
    if agent.freeze_ticks > 0 {
        agent.freeze_ticks -= 1;
        return MovePlan::hold(agent);
    }

    let (position, teleport) = portal_transit(agent.location, ctx.portals);

    if let Some((candidate, facing)) = preferred_candidate(agent, ctx, position)
        && ctx.grid.is_passable(candidate)
        && !agent.history.contains(candidate)
    {
        return MovePlan { teleport, to: candidate, facing, reason: MoveReason::Preferred };
    }

    let (to, facing, reason) = exploration_cascade(agent, ctx.grid, position);
    MovePlan { teleport, to, facing, reason }
}

/// One manual step in `direction`; bumping a wall leaves the player in place.
pub(super) fn plan_steer(agent: &Agent, ctx: &MoveContext<'_>, direction: Direction) -> MovePlan {
    let (position, teleport) = portal_transit(agent.location, ctx.portals);
    let candidate = position.step(direction);
    if ctx.grid.is_passable(candidate) {
        return MovePlan { teleport, to: candidate, facing: direction, reason: MoveReason::Steered };
    }
    MovePlan { teleport, to: position, facing: agent.facing, reason: MoveReason::Held }
}

fn portal_transit(
    location: Location,
    portals: &PortalGraph,
) -> (Location, Option<(Location, Location)>) {
    match portals.partner(location) {
        Some(partner) => (partner, Some((location, partner))),
        None => (location, None),
    }
}

fn preferred_candidate(
    agent: &Agent,
    ctx: &MoveContext<'_>,
    position: Location,
) -> Option<(Location, Direction)> {
    match agent.kind {
        AgentKind::Seeking => {
            let path = find_path(ctx.grid, ctx.portals, position, ctx.goals);
            let next = *path.get(1)?;
            let facing = position.bearing_to(next);
            if next.manhattan(position) == 1 {
                Some((next, facing))
            } else {
                // The route starts with a portal jump; head toward the far end.
                Some((position.step(facing), facing))
            }
        }
        AgentKind::Pursuit => {
            let facing = position.bearing_to(ctx.player);
            Some((position.step(facing), facing))
        }
        AgentKind::Evasion => None,
    }
}

/// Turn, straight, opposite turn, reverse. The first passable cell wins.
///
/// History is not consulted here, so a cornered agent can always back out.
/// An agent walled in on all four sides holds its position.
pub(super) fn exploration_cascade(
    agent: &mut Agent,
    grid: &GridModel,
    position: Location,
) -> (Location, Direction, MoveReason) {
    let sign = agent.draw_turn_sign();
    let facing = agent.facing;
    let candidates = [
        (facing.turned(sign), MoveReason::Turn),
        (facing, MoveReason::Straight),
        (facing.turned(sign.opposite()), MoveReason::OppositeTurn),
        (facing.reverse(), MoveReason::Reverse),
    ];
    for (direction, reason) in candidates {
        let next = position.step(direction);
        if grid.is_passable(next) {
            return (next, direction, reason);
        }
    }
    tracing::trace!(?position, "agent enclosed on all sides");
    (position, facing, MoveReason::Held)
}
