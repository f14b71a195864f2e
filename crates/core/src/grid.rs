//! Static level geometry: cell kinds, passability, and portal-augmented adjacency.
//! Built once per loaded level and never mutated afterward.

mod portals;

pub use portals::PortalGraph;

use thiserror::Error;

use crate::level::GameMap;
use crate::types::{CellKind, Direction, Location};

/// Queries outside the grid are caller bugs, not level data problems.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum GridError {
    #[error("location {location:?} is outside the {width}x{height} grid")]
    OutOfBounds { location: Location, width: usize, height: usize },
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GridModel {
    width: usize,
    height: usize,
    cells: Vec<CellKind>,
}

impl GridModel {
    pub fn from_map(map: &GameMap) -> Self {
        Self { width: map.width(), height: map.height(), cells: map.cells().to_vec() }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn in_bounds(&self, location: Location) -> bool {
        location.x >= 0
            && location.y >= 0
            && (location.x as usize) < self.width
            && (location.y as usize) < self.height
    }

    pub fn cell_kind(&self, location: Location) -> Result<CellKind, GridError> {
        if !self.in_bounds(location) {
            return Err(GridError::OutOfBounds {
                location,
                width: self.width,
                height: self.height,
            });
        }
        Ok(self.cells[self.index(location)])
    }

    pub fn is_passable(&self, location: Location) -> bool {
        self.cell_kind(location).is_ok_and(|kind| kind != CellKind::Wall)
    }

    /// In-bounds orthogonal neighbors in N, E, S, W order.
    pub fn neighbors4(&self, location: Location) -> Vec<Location> {
        Direction::ALL
            .into_iter()
            .map(|direction| location.step(direction))
            .filter(|next| self.in_bounds(*next))
            .collect()
    }

    /// Every location in row-major order.
    pub fn locations(&self) -> impl Iterator<Item = Location> + '_ {
        (0..self.height)
            .flat_map(move |y| (0..self.width).map(move |x| Location::new(x as i32, y as i32)))
    }

    pub(crate) fn index(&self, location: Location) -> usize {
        (location.y as usize) * self.width + (location.x as usize)
    }
}

/// Passable orthogonal neighbors, then the portal partner when one resolves.
///
/// Pathfinding and reachability both expand nodes through this, so the two
/// always agree on what counts as an edge.
pub fn traversal_neighbors(
    grid: &GridModel,
    portals: &PortalGraph,
    location: Location,
) -> Vec<Location> {
    let mut next: Vec<Location> = grid
        .neighbors4(location)
        .into_iter()
        .filter(|neighbor| grid.is_passable(*neighbor))
        .collect();
    if let Some(partner) = portals.partner(location) {
        next.push(partner);
    }
    next
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::PortalId;

    fn grid_from(rows: &[&str]) -> (GridModel, PortalGraph) {
        let map = GameMap::parse_rows("grid", rows).expect("parse");
        (GridModel::from_map(&map), PortalGraph::from_map(&map))
    }

    #[test]
    fn out_of_bounds_query_is_an_error() {
        let (grid, _) = grid_from(&["x.", ".x"]);
        assert_eq!(grid.cell_kind(Location::new(1, 0)), Ok(CellKind::Pill));
        assert_eq!(
            grid.cell_kind(Location::new(2, 0)),
            Err(GridError::OutOfBounds { location: Location::new(2, 0), width: 2, height: 2 })
        );
        assert!(grid.cell_kind(Location::new(-1, 1)).is_err());
    }

    #[test]
    fn only_walls_and_outside_cells_block_movement() {
        let (grid, _) = grid_from(&["x.gi", "1PT "]);
        assert!(!grid.is_passable(Location::new(0, 0)));
        for x in 1..4 {
            assert!(grid.is_passable(Location::new(x, 0)));
        }
        for x in 0..4 {
            assert!(grid.is_passable(Location::new(x, 1)));
        }
        assert!(!grid.is_passable(Location::new(4, 1)));
        assert!(!grid.is_passable(Location::new(0, -1)));
    }

    #[test]
    fn corner_has_two_neighbors() {
        let (grid, _) = grid_from(&["   ", "   ", "   "]);
        assert_eq!(
            grid.neighbors4(Location::new(0, 0)),
            vec![Location::new(1, 0), Location::new(0, 1)]
        );
        assert_eq!(grid.neighbors4(Location::new(1, 1)).len(), 4);
    }

    #[test]
    fn traversal_adds_portal_edge_after_orthogonal_moves() {
        let (grid, portals) = grid_from(&["1x ", "x  ", "  1"]);
        assert_eq!(
            traversal_neighbors(&grid, &portals, Location::new(0, 0)),
            vec![Location::new(2, 2)]
        );
        assert_eq!(
            traversal_neighbors(&grid, &portals, Location::new(2, 2)),
            vec![Location::new(2, 1), Location::new(1, 2), Location::new(0, 0)]
        );
        assert_eq!(portals.partner(Location::new(2, 2)), Some(Location::new(0, 0)));
        assert!(portals.malformed().all(|(portal, _)| portal != PortalId::White));
    }
}
