//! Bounded recency buffer used to steer agents away from cells they just left.

use std::collections::VecDeque;

use crate::types::Location;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct VisitedHistory {
    capacity: usize,
    entries: VecDeque<Location>,
}

impl VisitedHistory {
    pub fn new(capacity: usize) -> Self {
        Self { capacity, entries: VecDeque::with_capacity(capacity) }
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Appends `location`, evicting the oldest entry once full.
    pub fn push(&mut self, location: Location) {
        if self.capacity == 0 {
            return;
        }
        if self.entries.len() == self.capacity {
            self.entries.pop_front();
        }
        self.entries.push_back(location);
    }

    pub fn contains(&self, location: Location) -> bool {
        self.entries.contains(&location)
    }

    /// Oldest first.
    pub fn iter(&self) -> impl Iterator<Item = Location> + '_ {
        self.entries.iter().copied()
    }
}
