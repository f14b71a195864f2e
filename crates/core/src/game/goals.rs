//! Session-scoped edible items. The grid keeps the cell kinds it was loaded with; this
//! tracks what has not been eaten yet.

use std::collections::{BTreeMap, BTreeSet};

use crate::grid::GridModel;
use crate::types::{ItemKind, Location};

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GoalSet {
    items: BTreeMap<Location, ItemKind>,
    targets: BTreeSet<Location>,
    initial_targets: usize,
}

impl GoalSet {
    pub fn from_grid(grid: &GridModel) -> Self {
        let items: BTreeMap<Location, ItemKind> = grid
            .locations()
            .filter_map(|location| {
                let item = grid.cell_kind(location).ok()?.item()?;
                Some((location, item))
            })
            .collect();
        let targets: BTreeSet<Location> = items
            .iter()
            .filter(|(_, item)| item.is_goal())
            .map(|(location, _)| *location)
            .collect();
        let initial_targets = targets.len();
        Self { items, targets, initial_targets }
    }

    /// Uneaten pill and gold cells.
    pub fn targets(&self) -> &BTreeSet<Location> {
        &self.targets
    }

    pub fn initial_targets(&self) -> usize {
        self.initial_targets
    }

    /// All pills and gold eaten. Leftover ice does not hold the level open.
    pub fn is_cleared(&self) -> bool {
        self.targets.is_empty()
    }

    pub fn consume(&mut self, location: Location) -> Option<ItemKind> {
        let item = self.items.remove(&location)?;
        self.targets.remove(&location);
        Some(item)
    }
}
