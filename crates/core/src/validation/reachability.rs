//! Existence check: can every goal be reached from one start cell.

use std::collections::{BTreeSet, VecDeque};

use crate::grid::{GridModel, PortalGraph, traversal_neighbors};
use crate::types::Location;

/// Goals never dequeued by a breadth-first walk from `start`.
///
/// Walks the same edges as the pathfinder: passable orthogonal neighbors plus the
/// partner of any resolvable portal. Stops early once every goal has been seen.
pub fn unreachable_goals(
    grid: &GridModel,
    portals: &PortalGraph,
    start: Location,
    goals: &BTreeSet<Location>,
) -> BTreeSet<Location> {
    let mut remaining = goals.clone();
    if remaining.is_empty() || !grid.in_bounds(start) {
        return remaining;
    }

    let mut visited = vec![false; grid.width() * grid.height()];
    let mut queue = VecDeque::new();
    visited[grid.index(start)] = true;
    queue.push_back(start);

    while let Some(current) = queue.pop_front() {
        remaining.remove(&current);
        if remaining.is_empty() {
            break;
        }

        for neighbor in traversal_neighbors(grid, portals, current) {
            let idx = grid.index(neighbor);
            if !visited[idx] {
                visited[idx] = true;
                queue.push_back(neighbor);
            }
        }
    }

    remaining
}
