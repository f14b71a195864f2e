pub mod campaign;
pub mod config;
pub mod game;
pub mod grid;
pub mod level;
pub mod types;
pub mod validation;

pub use campaign::{Campaign, CampaignError, CampaignOutcome, CampaignResult};
pub use config::{PlayerControl, SessionConfig};
pub use game::pathfinding::find_path;
pub use game::{Agent, AgentStep, Session, SessionError, SessionObserver, TickReport};
pub use grid::{GridError, GridModel, PortalGraph, traversal_neighbors};
pub use level::{GameMap, LevelParseError};
pub use types::*;
pub use validation::{
    LevelSequenceError, ValidationCheck, ValidationFailure, ValidationReport,
    check_level_sequence, unreachable_goals, validate,
};
