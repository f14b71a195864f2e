//! Parsed level input: the cell stream handed over by the level-loading side.
//! Spawn and portal coordinate lists are derived views over the same cells,
//! so they can never disagree with the grid.

use std::collections::BTreeMap;

use thiserror::Error;

use crate::types::{ActorKind, CellKind, ItemKind, Location, PortalId};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LevelParseError {
    #[error("level has no rows")]
    Empty,
    #[error("row {row} has {found} cells, expected {expected}")]
    RaggedRow { row: usize, expected: usize, found: usize },
    #[error("unknown glyph {glyph:?} at {location}")]
    UnknownGlyph { glyph: char, location: Location },
}

/// Only built through [`GameMap::parse_rows`], so `cells.len() == width * height`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GameMap {
    pub name: String,
    width: usize,
    height: usize,
    cells: Vec<CellKind>,
}

impl GameMap {
    pub fn parse_rows<S: AsRef<str>>(
        name: impl Into<String>,
        rows: &[S],
    ) -> Result<Self, LevelParseError> {
        let Some(first) = rows.first() else {
            return Err(LevelParseError::Empty);
        };
        let width = first.as_ref().chars().count();
        if width == 0 {
            return Err(LevelParseError::Empty);
        }

        let mut cells = Vec::with_capacity(width * rows.len());
        for (y, row) in rows.iter().enumerate() {
            let row = row.as_ref();
            let found = row.chars().count();
            if found != width {
                return Err(LevelParseError::RaggedRow { row: y, expected: width, found });
            }
            for (x, glyph) in row.chars().enumerate() {
                let kind = CellKind::from_glyph(glyph).ok_or(LevelParseError::UnknownGlyph {
                    glyph,
                    location: Location::new(x as i32, y as i32),
                })?;
                cells.push(kind);
            }
        }

        Ok(Self { name: name.into(), width, height: rows.len(), cells })
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub(crate) fn cells(&self) -> &[CellKind] {
        &self.cells
    }

    pub fn to_rows(&self) -> Vec<String> {
        self.cells
            .chunks(self.width.max(1))
            .map(|row| row.iter().map(|cell| cell.glyph()).collect())
            .collect()
    }

    pub fn in_bounds(&self, location: Location) -> bool {
        location.x >= 0
            && location.y >= 0
            && (location.x as usize) < self.width
            && (location.y as usize) < self.height
    }

    pub fn cell(&self, location: Location) -> Option<CellKind> {
        if !self.in_bounds(location) {
            return None;
        }
        Some(self.cells[self.index(location)])
    }

    pub fn set_cell(&mut self, location: Location, kind: CellKind) {
        if !self.in_bounds(location) {
            return;
        }
        let idx = self.index(location);
        self.cells[idx] = kind;
    }

    /// Every cell in row-major order.
    pub fn locations(&self) -> impl Iterator<Item = (Location, CellKind)> + '_ {
        self.cells.iter().enumerate().map(|(idx, kind)| {
            let location = Location::new((idx % self.width) as i32, (idx / self.width) as i32);
            (location, *kind)
        })
    }

    pub fn actor_locations(&self) -> BTreeMap<ActorKind, Vec<Location>> {
        let mut actors: BTreeMap<ActorKind, Vec<Location>> = BTreeMap::new();
        for (location, kind) in self.locations() {
            if let Some(actor) = kind.actor() {
                actors.entry(actor).or_default().push(location);
            }
        }
        actors
    }

    pub fn player_spawns(&self) -> Vec<Location> {
        self.actor_locations().remove(&ActorKind::Player).unwrap_or_default()
    }

    pub fn portal_locations(&self) -> BTreeMap<PortalId, Vec<Location>> {
        let mut portals: BTreeMap<PortalId, Vec<Location>> = BTreeMap::new();
        for (location, kind) in self.locations() {
            if let CellKind::Portal(portal) = kind {
                portals.entry(portal).or_default().push(location);
            }
        }
        portals
    }

    pub fn item_locations(&self, item: ItemKind) -> Vec<Location> {
        self.locations()
            .filter(|(_, kind)| kind.item() == Some(item))
            .map(|(location, _)| location)
            .collect()
    }

    fn index(&self, location: Location) -> usize {
        (location.y as usize) * self.width + (location.x as usize)
    }
}
