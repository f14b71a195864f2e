//! Multi-level play: validate the whole sequence up front, then play each
//! level with a fresh session until the player is caught or everything is
//! cleared.

use thiserror::Error;

use crate::config::SessionConfig;
use crate::game::{Session, SessionError, mix_seed};
use crate::level::GameMap;
use crate::types::{AdvanceStopReason, LevelOutcome};
use crate::validation::{ValidationReport, validate};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CampaignError {
    #[error("campaign has no levels")]
    Empty,
    #[error("level {index} failed validation: {}", report.messages().join("; "))]
    InvalidLevel { index: usize, report: Box<ValidationReport> },
    #[error(transparent)]
    Session(#[from] SessionError),
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CampaignOutcome {
    Won,
    Lost { level: usize },
    /// The level ran out of ticks before it was cleared or lost.
    Stalled { level: usize },
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CampaignResult {
    pub outcome: CampaignOutcome,
    pub score: u32,
    pub levels_played: usize,
    pub ticks: u64,
    /// Snapshot hash of the last session played.
    pub final_hash: u64,
}

#[derive(Clone, Debug)]
pub struct Campaign {
    levels: Vec<GameMap>,
    config: SessionConfig,
}

impl Campaign {
    pub fn new(levels: Vec<GameMap>, config: SessionConfig) -> Result<Self, CampaignError> {
        if levels.is_empty() {
            return Err(CampaignError::Empty);
        }
        for (index, level) in levels.iter().enumerate() {
            let report = validate(level);
            if !report.passed() {
                return Err(CampaignError::InvalidLevel { index, report: Box::new(report) });
            }
        }
        Ok(Self { levels, config })
    }

    pub fn levels(&self) -> &[GameMap] {
        &self.levels
    }

    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    pub fn run(&self) -> Result<CampaignResult, CampaignError> {
        self.run_with(|_| {})
    }

    /// Plays every level in order, calling `after_tick` once per simulated tick.
    pub fn run_with<F>(&self, mut after_tick: F) -> Result<CampaignResult, CampaignError>
    where
        F: FnMut(&Session),
    {
        let mut score = 0;
        let mut ticks = 0;
        let mut final_hash = 0;

        for (index, level) in self.levels.iter().enumerate() {
            let config = self.config.clone().with_seed(mix_seed(self.config.seed, index as u64));
            let mut session = Session::new(level, &config)?;

            let mut stop = AdvanceStopReason::BudgetExhausted;
            for _ in 0..self.config.max_ticks_per_level {
                let report = session.step_tick();
                after_tick(&session);
                if let Some(outcome) = report.outcome {
                    stop = AdvanceStopReason::Finished(outcome);
                    break;
                }
            }

            score += session.score();
            ticks += session.current_tick();
            final_hash = session.snapshot_hash();
            let levels_played = index + 1;

            let outcome = match stop {
                AdvanceStopReason::Finished(LevelOutcome::Cleared) => {
                    tracing::info!(level = %level.name, score, "level cleared");
                    continue;
                }
                AdvanceStopReason::Finished(LevelOutcome::Caught) => {
                    CampaignOutcome::Lost { level: index }
                }
                AdvanceStopReason::BudgetExhausted => CampaignOutcome::Stalled { level: index },
            };
            tracing::info!(level = %level.name, ?outcome, score, "campaign over");
            return Ok(CampaignResult { outcome, score, levels_played, ticks, final_hash });
        }

        tracing::info!(score, "campaign won");
        Ok(CampaignResult {
            outcome: CampaignOutcome::Won,
            score,
            levels_played: self.levels.len(),
            ticks,
            final_hash,
        })
    }
}
