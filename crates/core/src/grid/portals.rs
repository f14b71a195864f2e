//! Portal pairing, precomputed once per level.

use std::collections::{BTreeMap, HashMap};

use crate::level::GameMap;
use crate::types::{Location, PortalId};

/// Location → partner mapping for every well-formed portal pair.
///
/// Ids that appear once or three or more times never resolve a partner; they
/// are kept aside so the validator can report them.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct PortalGraph {
    partners: HashMap<Location, Location>,
    malformed: BTreeMap<PortalId, Vec<Location>>,
}

impl PortalGraph {
    pub fn from_map(map: &GameMap) -> Self {
        Self::from_groups(map.portal_locations())
    }

    pub fn from_groups(groups: BTreeMap<PortalId, Vec<Location>>) -> Self {
        let mut graph = Self::default();
        for (portal, locations) in groups {
            match locations.as_slice() {
                [first, second] => {
                    graph.partners.insert(*first, *second);
                    graph.partners.insert(*second, *first);
                }
                _ => {
                    graph.malformed.insert(portal, locations);
                }
            }
        }
        graph
    }

    pub fn partner(&self, location: Location) -> Option<Location> {
        self.partners.get(&location).copied()
    }

    pub fn pair_count(&self) -> usize {
        self.partners.len() / 2
    }

    pub fn malformed(&self) -> impl Iterator<Item = (PortalId, &[Location])> + '_ {
        self.malformed.iter().map(|(portal, locations)| (*portal, locations.as_slice()))
    }
}
