//! Shared fixtures for the session test suites.

use std::cell::RefCell;
use std::rc::Rc;

use super::*;

pub(super) fn map(rows: &[&str]) -> GameMap {
    GameMap::parse_rows("fixture", rows).expect("fixture rows parse")
}

pub(super) fn manual_config(pursuit_freeze_ticks: u32) -> SessionConfig {
    SessionConfig {
        player_control: PlayerControl::Manual,
        pursuit_freeze_ticks,
        ..SessionConfig::default()
    }
}

pub(super) fn session(rows: &[&str], config: &SessionConfig) -> Session {
    Session::new(&map(rows), config).expect("fixture has one player spawn")
}

/// One corridor holding a pill then a gold, no monsters.
pub(super) fn corridor_rows() -> [&'static str; 3] {
    ["xxxxx", "xP.gx", "xxxxx"]
}

/// Observer that shares its captured events with the test.
#[derive(Clone, Default)]
pub(super) struct Recorder {
    pub events: Rc<RefCell<Vec<LogEvent>>>,
}

impl SessionObserver for Recorder {
    fn on_event(&mut self, event: &LogEvent) {
        self.events.borrow_mut().push(event.clone());
    }
}
