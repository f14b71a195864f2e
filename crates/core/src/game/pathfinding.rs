//! Multi-goal A* over the portal-augmented passability graph.
//! Callers treat an empty route as "nothing reachable" and fall back to exploration.

use std::collections::{BTreeMap, BTreeSet};

use crate::grid::{GridModel, PortalGraph, traversal_neighbors};
use crate::types::Location;

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord)]
struct OpenNode {
    f: u32,
    // Discovery order; earlier wins ties on `f`.
    seq: u64,
    location: Location,
}

#[derive(Clone, Copy, Debug)]
struct SearchNode {
    parent: Option<Location>,
    g: u32,
    seq: u64,
}

/// Shortest route from `start` to whichever goal is reached first, both ends included.
///
/// Edges cost 1, portal jumps included. The heuristic is the Manhattan distance to
/// the nearest goal, which portals can make optimistic in the wrong direction; the
/// result is a good route, not a certified shortest one, on portal-heavy layouts.
pub fn find_path(
    grid: &GridModel,
    portals: &PortalGraph,
    start: Location,
    goals: &BTreeSet<Location>,
) -> Vec<Location> {
    if goals.is_empty() || !grid.in_bounds(start) {
        return Vec::new();
    }

    let mut open_set = BTreeSet::new();
    let mut open_entries: BTreeMap<Location, OpenNode> = BTreeMap::new();
    let mut nodes: BTreeMap<Location, SearchNode> = BTreeMap::new();
    let mut next_seq = 0_u64;

    let start_node =
        OpenNode { f: nearest_goal_distance(start, goals), seq: next_seq, location: start };
    open_set.insert(start_node);
    open_entries.insert(start, start_node);
    nodes.insert(start, SearchNode { parent: None, g: 0, seq: next_seq });

    while let Some(current_node) = open_set.pop_first() {
        let current = current_node.location;
        open_entries.remove(&current);

        if goals.contains(&current) {
            return reconstruct_path(&nodes, current);
        }

        let Some(current_g) = nodes.get(&current).map(|node| node.g) else {
            continue;
        };

        for neighbor in traversal_neighbors(grid, portals, current) {
            let tentative_g = current_g + 1;
            let seq = match nodes.get(&neighbor) {
                Some(existing) if tentative_g >= existing.g => continue,
                Some(existing) => existing.seq,
                None => {
                    next_seq += 1;
                    next_seq
                }
            };

            if let Some(stale) = open_entries.remove(&neighbor) {
                open_set.remove(&stale);
            }
            nodes.insert(neighbor, SearchNode { parent: Some(current), g: tentative_g, seq });

            let node = OpenNode {
                f: tentative_g + nearest_goal_distance(neighbor, goals),
                seq,
                location: neighbor,
            };
            open_set.insert(node);
            open_entries.insert(neighbor, node);
        }
    }

    tracing::trace!(?start, goals = goals.len(), "no goal reachable");
    Vec::new()
}

fn nearest_goal_distance(location: Location, goals: &BTreeSet<Location>) -> u32 {
    goals.iter().map(|goal| location.manhattan(*goal)).min().unwrap_or(0)
}

fn reconstruct_path(nodes: &BTreeMap<Location, SearchNode>, goal: Location) -> Vec<Location> {
    let mut path = vec![goal];
    let mut current = goal;
    while let Some(parent) = nodes.get(&current).and_then(|node| node.parent) {
        path.push(parent);
        current = parent;
    }
    path.reverse();
    path
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::level::GameMap;

    fn level(rows: &[&str]) -> (GridModel, PortalGraph) {
        let map = GameMap::parse_rows("path", rows).expect("parse");
        (GridModel::from_map(&map), PortalGraph::from_map(&map))
    }

    fn goals(locations: &[Location]) -> BTreeSet<Location> {
        locations.iter().copied().collect()
    }

    #[test]
    fn straight_corridor_includes_both_ends() {
        let (grid, portals) = level(&["xxxxxxx", "x    .x", "xxxxxxx"]);
        let path = find_path(&grid, &portals, Location::new(1, 1), &goals(&[Location::new(5, 1)]));
        assert_eq!(path.len(), 5);
        assert_eq!(path.first(), Some(&Location::new(1, 1)));
        assert_eq!(path.last(), Some(&Location::new(5, 1)));
    }

    #[test]
    fn stops_at_the_nearest_goal() {
        let (grid, portals) = level(&["xxxxxxxxxx", "x.      .x", "xxxxxxxxxx"]);
        let targets = goals(&[Location::new(1, 1), Location::new(8, 1)]);
        let path = find_path(&grid, &portals, Location::new(4, 1), &targets);
        assert_eq!(path.last(), Some(&Location::new(1, 1)));
        assert_eq!(path.len(), 4);
    }

    #[test]
    fn start_on_a_goal_is_a_single_cell_route() {
        let (grid, portals) = level(&["xxx", "x x", "xxx"]);
        let start = Location::new(1, 1);
        assert_eq!(find_path(&grid, &portals, start, &goals(&[start])), vec![start]);
    }

    #[test]
    fn walled_off_goal_yields_empty_route() {
        let (grid, portals) = level(&["xxxxx", "x x.x", "xxxxx"]);
        let start = Location::new(1, 1);
        assert!(find_path(&grid, &portals, start, &goals(&[Location::new(3, 1)])).is_empty());
        assert!(find_path(&grid, &portals, start, &BTreeSet::new()).is_empty());
    }

    #[test]
    fn portal_jump_is_the_only_way_across() {
        let (grid, portals) = level(&["xxxxxxxxx", "x 1xxx1gx", "xxxxxxxxx"]);
        let path = find_path(&grid, &portals, Location::new(1, 1), &goals(&[Location::new(7, 1)]));
        assert_eq!(
            path,
            vec![Location::new(1, 1), Location::new(2, 1), Location::new(6, 1), Location::new(7, 1)]
        );
    }

    #[test]
    fn portal_beats_a_longer_open_detour() {
        let (grid, portals) = level(&["xxxxxxxxx", "x 1   1gx", "xxxxxxxxx"]);
        let path = find_path(&grid, &portals, Location::new(1, 1), &goals(&[Location::new(7, 1)]));
        assert_eq!(path.len(), 4, "portal route is three edges, the corridor six");
        assert!(path.contains(&Location::new(6, 1)));
        assert!(!path.contains(&Location::new(3, 1)));
    }

    #[test]
    fn equal_cost_routes_break_ties_by_discovery_order() {
        let (grid, portals) = level(&["xxxxx", "x   x", "x   x", "x   x", "xxxxx"]);
        let target = goals(&[Location::new(3, 3)]);
        let first = find_path(&grid, &portals, Location::new(1, 1), &target);
        let second = find_path(&grid, &portals, Location::new(1, 1), &target);
        assert_eq!(first, second);
        assert_eq!(
            first,
            vec![
                Location::new(1, 1),
                Location::new(2, 1),
                Location::new(3, 1),
                Location::new(3, 2),
                Location::new(3, 3),
            ]
        );
    }
}
