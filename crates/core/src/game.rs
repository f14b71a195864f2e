//! One level in play: the grid, the agents on it and the tick loop that
//! advances them.

use std::collections::BTreeSet;
use std::iter;

use slotmap::SlotMap;
use thiserror::Error;

use crate::config::{PlayerControl, SessionConfig};
use crate::grid::{GridModel, PortalGraph};
use crate::level::GameMap;
use crate::types::*;

mod agents;
mod goals;
mod hash;
mod history;
mod movement;
pub mod pathfinding;

#[cfg(test)]
mod test_support;
#[cfg(test)]
mod tests;

pub use agents::Agent;
pub(crate) use agents::mix_seed;
pub use goals::GoalSet;
pub use history::VisitedHistory;

use movement::{MoveContext, MovePlan, plan_move, plan_steer};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SessionError {
    #[error("level {level} needs exactly one player spawn, found {count}")]
    PlayerSpawnCount { level: String, count: usize },
    #[error("no agent {0:?} in this session")]
    UnknownAgent(AgentId),
}

/// Receives every log event as the session produces it.
pub trait SessionObserver {
    fn on_event(&mut self, event: &LogEvent);
}

/// Result of advancing one agent by one step.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct AgentStep {
    pub agent: AgentId,
    pub from: Location,
    pub to: Location,
    pub reason: MoveReason,
    pub consumed: Option<ItemEvent>,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TickReport {
    pub tick: u64,
    pub steps: Vec<AgentStep>,
    pub outcome: Option<LevelOutcome>,
}

pub struct Session {
    seed: u64,
    level: String,
    control: PlayerControl,
    tick: u64,
    grid: GridModel,
    portals: PortalGraph,
    goals: GoalSet,
    agents: SlotMap<AgentId, Agent>,
    player_id: AgentId,
    monster_ids: Vec<AgentId>,
    score: u32,
    eaten: u32,
    pending_steer: Option<Direction>,
    outcome: Option<LevelOutcome>,
    log: Vec<LogEvent>,
    observer: Option<Box<dyn SessionObserver>>,
}

impl Session {
    pub fn new(map: &GameMap, config: &SessionConfig) -> Result<Self, SessionError> {
        let actors = map.actor_locations();
        let player_spawn = match actors.get(&ActorKind::Player).map(Vec::as_slice) {
            Some([spawn]) => *spawn,
            other => {
                return Err(SessionError::PlayerSpawnCount {
                    level: map.name.clone(),
                    count: other.map_or(0, <[Location]>::len),
                });
            }
        };

        let mut agents = SlotMap::with_key();
        let player_id = agents.insert_with_key(|id| {
            Agent::spawn(
                id,
                ActorKind::Player,
                player_spawn,
                config.seeking_history,
                0,
                mix_seed(config.seed, 0),
            )
        });

        let mut monster_ids = Vec::new();
        let monster_spawns = map.locations().filter_map(|(location, kind)| match kind.actor() {
            Some(ActorKind::Monster(monster)) => Some((location, monster)),
            _ => None,
        });
        for (index, (location, monster)) in monster_spawns.enumerate() {
            let freeze = match monster.agent_kind() {
                AgentKind::Pursuit => config.pursuit_freeze_ticks,
                _ => 0,
            };
            let id = agents.insert_with_key(|id| {
                Agent::spawn(
                    id,
                    ActorKind::Monster(monster),
                    location,
                    config.monster_history,
                    freeze,
                    mix_seed(config.seed, index as u64 + 1),
                )
            });
            monster_ids.push(id);
        }

        let grid = GridModel::from_map(map);
        let goals = GoalSet::from_grid(&grid);
        tracing::debug!(
            level = %map.name,
            monsters = monster_ids.len(),
            goals = goals.initial_targets(),
            "session started"
        );

        Ok(Self {
            seed: config.seed,
            level: map.name.clone(),
            control: config.player_control,
            tick: 0,
            portals: PortalGraph::from_map(map),
            grid,
            goals,
            agents,
            player_id,
            monster_ids,
            score: 0,
            eaten: 0,
            pending_steer: None,
            outcome: None,
            log: Vec::new(),
            observer: None,
        })
    }

    pub fn set_observer(&mut self, observer: Box<dyn SessionObserver>) {
        self.observer = Some(observer);
    }

    /// Queue one manual move. Only read when the player is under manual control;
    /// a newer call replaces a move that has not been taken yet.
    pub fn steer(&mut self, direction: Direction) {
        self.pending_steer = Some(direction);
    }

    /// Moves a single agent one step without running the tick bookkeeping.
    pub fn advance_agent(&mut self, id: AgentId) -> Result<AgentStep, SessionError> {
        if !self.agents.contains_key(id) {
            return Err(SessionError::UnknownAgent(id));
        }
        Ok(self.move_agent(id))
    }

    /// Player first, then monsters in spawn order, then one collision check.
    pub fn step_tick(&mut self) -> TickReport {
        if let Some(outcome) = self.outcome {
            return TickReport { tick: self.tick, steps: Vec::new(), outcome: Some(outcome) };
        }

        self.tick += 1;
        let mut steps = Vec::with_capacity(self.monster_ids.len() + 1);
        steps.push(self.move_agent(self.player_id));
        for index in 0..self.monster_ids.len() {
            steps.push(self.move_agent(self.monster_ids[index]));
        }

        let player_at = self.agents[self.player_id].location;
        let catcher =
            self.monster_ids.iter().copied().find(|id| self.agents[*id].location == player_at);
        if let Some(by) = catcher {
            tracing::debug!(level = %self.level, tick = self.tick, ?player_at, "player caught");
            self.outcome = Some(LevelOutcome::Caught);
            self.emit(LogEvent::PlayerCaught { at: player_at, by });
        } else if self.goals.is_cleared() {
            tracing::debug!(
                level = %self.level,
                tick = self.tick,
                score = self.score,
                "level cleared"
            );
            self.outcome = Some(LevelOutcome::Cleared);
            self.emit(LogEvent::LevelCleared { tick: self.tick });
        }

        TickReport { tick: self.tick, steps, outcome: self.outcome }
    }

    pub fn advance(&mut self, max_ticks: u32) -> AdvanceResult {
        if let Some(outcome) = self.outcome {
            return AdvanceResult {
                simulated_ticks: 0,
                stop_reason: AdvanceStopReason::Finished(outcome),
            };
        }

        let mut steps = 0;
        while steps < max_ticks {
            let report = self.step_tick();
            steps += 1;
            if let Some(outcome) = report.outcome {
                return AdvanceResult {
                    simulated_ticks: steps,
                    stop_reason: AdvanceStopReason::Finished(outcome),
                };
            }
        }

        AdvanceResult { simulated_ticks: steps, stop_reason: AdvanceStopReason::BudgetExhausted }
    }

    fn move_agent(&mut self, id: AgentId) -> AgentStep {
        let player = self.agents[self.player_id].location;
        let is_player = id == self.player_id;
        let steer = if is_player { self.pending_steer.take() } else { None };
        let finished = self.outcome.is_some();

        let agent = &mut self.agents[id];
        let from = agent.location;
        let ctx = MoveContext {
            grid: &self.grid,
            portals: &self.portals,
            goals: self.goals.targets(),
            player,
        };
        let plan = match (finished, is_player, self.control, steer) {
            (true, ..) => MovePlan::hold(agent),
            (false, true, PlayerControl::Manual, Some(direction)) => {
                plan_steer(agent, &ctx, direction)
            }
            (false, true, PlayerControl::Manual, None) => MovePlan::hold(agent),
            _ => plan_move(agent, &ctx),
        };

        agent.location = plan.to;
        agent.facing = plan.facing;
        if plan.reason != MoveReason::Held {
            agent.history.push(plan.to);
        }
        let kind = agent.kind;

        if let Some((portal, partner)) = plan.teleport {
            self.emit(LogEvent::Teleported { agent: id, from: portal, to: partner });
        }
        if plan.reason != MoveReason::Held {
            self.emit(LogEvent::AgentMoved { agent: id, kind, to: plan.to, reason: plan.reason });
        }

        let consumed = if is_player { self.consume(plan.to) } else { None };
        AgentStep { agent: id, from, to: plan.to, reason: plan.reason, consumed }
    }

    fn consume(&mut self, at: Location) -> Option<ItemEvent> {
        let kind = self.goals.consume(at)?;
        self.score += kind.score();
        if kind.is_goal() {
            self.eaten += 1;
        }
        let item = ItemEvent { kind, at };
        self.emit(LogEvent::ItemEaten { item, score: self.score });
        Some(item)
    }

    fn emit(&mut self, event: LogEvent) {
        if let Some(observer) = self.observer.as_mut() {
            observer.on_event(&event);
        }
        self.log.push(event);
    }

    pub fn level_name(&self) -> &str {
        &self.level
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    pub fn current_tick(&self) -> u64 {
        self.tick
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    /// Pills and gold eaten so far.
    pub fn eaten(&self) -> u32 {
        self.eaten
    }

    pub fn goals(&self) -> &BTreeSet<Location> {
        self.goals.targets()
    }

    pub fn outcome(&self) -> Option<LevelOutcome> {
        self.outcome
    }

    pub fn grid(&self) -> &GridModel {
        &self.grid
    }

    pub fn portals(&self) -> &PortalGraph {
        &self.portals
    }

    pub fn player_id(&self) -> AgentId {
        self.player_id
    }

    pub fn player(&self) -> &Agent {
        &self.agents[self.player_id]
    }

    pub fn agent(&self, id: AgentId) -> Option<&Agent> {
        self.agents.get(id)
    }

    /// Monsters in spawn order.
    pub fn monsters(&self) -> impl Iterator<Item = &Agent> + '_ {
        self.monster_ids.iter().map(|id| &self.agents[*id])
    }

    /// Player followed by monsters in spawn order.
    pub fn agents(&self) -> impl Iterator<Item = &Agent> + '_ {
        iter::once(self.player()).chain(self.monsters())
    }

    pub fn log(&self) -> &[LogEvent] {
        &self.log
    }
}
