//! Offline level certification run before a level is admitted to play.
//!
//! Four independent checks: a single player start, well-formed portal pairs,
//! enough collectibles, and every collectible reachable from the start.
//! Structural problems are collected into a report, never raised as errors.

mod reachability;
mod sequence;

pub use reachability::unreachable_goals;
pub use sequence::{LevelSequenceError, check_level_sequence};

use std::collections::BTreeSet;
use std::fmt;

use crate::grid::{GridModel, PortalGraph};
use crate::level::GameMap;
use crate::types::{ItemKind, Location, PortalId};

pub const MIN_COLLECTIBLES: usize = 2;

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum ValidationCheck {
    PlayerSpawn,
    PortalPairs,
    Collectibles,
    Reachability,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ValidationFailure {
    PlayerSpawnCount { locations: Vec<Location> },
    PortalCount { portal: PortalId, locations: Vec<Location> },
    TooFewCollectibles { pills: usize, golds: usize },
    /// `start` is `None` when there was no single spawn to search from; every
    /// collectible is then listed.
    Unreachable { start: Option<Location>, golds: Vec<Location>, pills: Vec<Location> },
}

impl ValidationFailure {
    pub fn check(&self) -> ValidationCheck {
        match self {
            ValidationFailure::PlayerSpawnCount { .. } => ValidationCheck::PlayerSpawn,
            ValidationFailure::PortalCount { .. } => ValidationCheck::PortalPairs,
            ValidationFailure::TooFewCollectibles { .. } => ValidationCheck::Collectibles,
            ValidationFailure::Unreachable { .. } => ValidationCheck::Reachability,
        }
    }
}

impl fmt::Display for ValidationFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ValidationFailure::PlayerSpawnCount { locations } if locations.is_empty() => {
                write!(f, "no start for PacMan")
            }
            ValidationFailure::PlayerSpawnCount { locations } => {
                let count = locations.len();
                write!(f, "more than one start for PacMan ({count}): {}", join_locations(locations))
            }
            ValidationFailure::PortalCount { portal, locations } => {
                write!(f, "portal {} count is not 2: {}", portal.name(), join_locations(locations))
            }
            ValidationFailure::TooFewCollectibles { pills, golds } => {
                write!(f, "less than {MIN_COLLECTIBLES} Gold and Pill: {pills} pill, {golds} gold")
            }
            ValidationFailure::Unreachable { start, golds, pills } => {
                let mut parts = Vec::new();
                if start.is_none() {
                    parts.push("no single start to search from".to_string());
                }
                if !golds.is_empty() {
                    parts.push(format!("Gold not accessible: {}", join_locations(golds)));
                }
                if !pills.is_empty() {
                    parts.push(format!("Pill not accessible: {}", join_locations(pills)));
                }
                write!(f, "{}", parts.join(" / "))
            }
        }
    }
}

fn join_locations(locations: &[Location]) -> String {
    locations.iter().map(Location::to_string).collect::<Vec<_>>().join("; ")
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ValidationReport {
    pub level: String,
    pub failures: Vec<ValidationFailure>,
}

impl ValidationReport {
    pub fn passed(&self) -> bool {
        self.failures.is_empty()
    }

    pub fn failed_checks(&self) -> BTreeSet<ValidationCheck> {
        self.failures.iter().map(ValidationFailure::check).collect()
    }

    /// One log line per failure, prefixed with the level name.
    pub fn messages(&self) -> Vec<String> {
        self.failures.iter().map(|failure| format!("Level {} - {failure}", self.level)).collect()
    }
}

pub fn validate(map: &GameMap) -> ValidationReport {
    let grid = GridModel::from_map(map);
    let portals = PortalGraph::from_map(map);
    let mut failures = Vec::new();

    let start = match check_player_spawn(map) {
        Ok(start) => Some(start),
        Err(failure) => {
            failures.push(failure);
            None
        }
    };
    failures.extend(check_portal_pairs(&portals));
    failures.extend(check_collectible_count(map));
    failures.extend(check_reachability(map, &grid, &portals, start));

    let report = ValidationReport { level: map.name.clone(), failures };
    if report.passed() {
        tracing::debug!(level = %report.level, "level passed validation");
    } else {
        for message in report.messages() {
            tracing::warn!("{message}");
        }
    }
    report
}

fn check_player_spawn(map: &GameMap) -> Result<Location, ValidationFailure> {
    match map.player_spawns().as_slice() {
        [start] => Ok(*start),
        locations => Err(ValidationFailure::PlayerSpawnCount { locations: locations.to_vec() }),
    }
}

fn check_portal_pairs(portals: &PortalGraph) -> Vec<ValidationFailure> {
    portals
        .malformed()
        .map(|(portal, locations)| ValidationFailure::PortalCount {
            portal,
            locations: locations.to_vec(),
        })
        .collect()
}

fn check_collectible_count(map: &GameMap) -> Option<ValidationFailure> {
    let pills = map.item_locations(ItemKind::Pill).len();
    let golds = map.item_locations(ItemKind::Gold).len();
    (pills + golds < MIN_COLLECTIBLES)
        .then_some(ValidationFailure::TooFewCollectibles { pills, golds })
}

fn check_reachability(
    map: &GameMap,
    grid: &GridModel,
    portals: &PortalGraph,
    start: Option<Location>,
) -> Option<ValidationFailure> {
    let golds = map.item_locations(ItemKind::Gold);
    let pills = map.item_locations(ItemKind::Pill);

    let Some(start) = start else {
        return Some(ValidationFailure::Unreachable { start: None, golds, pills });
    };

    let goals: BTreeSet<Location> = golds.iter().chain(pills.iter()).copied().collect();
    let unreachable = unreachable_goals(grid, portals, start, &goals);
    if unreachable.is_empty() {
        return None;
    }
    Some(ValidationFailure::Unreachable {
        start: Some(start),
        golds: golds.into_iter().filter(|gold| unreachable.contains(gold)).collect(),
        pills: pills.into_iter().filter(|pill| unreachable.contains(pill)).collect(),
    })
}
