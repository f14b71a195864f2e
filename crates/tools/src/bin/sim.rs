use std::path::PathBuf;

use anyhow::{Context, Result, bail};
use clap::Parser;
use torus_core::{Campaign, CampaignOutcome, CellKind, Session};
use torus_tools::level_file::load_levels;
use torus_tools::logging::init_tracing;
use torus_tools::settings::load_settings;

/// Headless autonomous play of a level or game folder.
#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Level JSON file or game folder
    path: PathBuf,
    #[arg(long, default_value = "torus.toml")]
    settings: PathBuf,
    /// Overrides the seed from the settings file
    #[arg(short, long)]
    seed: Option<u64>,
}

fn main() -> Result<()> {
    init_tracing();
    let args = Args::parse();

    let mut config = load_settings(&args.settings)?;
    if let Some(seed) = args.seed {
        config.seed = seed;
    }
    let levels = load_levels(&args.path)?;
    let campaign = Campaign::new(levels, config.clone())
        .with_context(|| format!("{} is not playable", args.path.display()))?;

    println!(
        "Simulating {} level(s) on seed {} for at most {} ticks each...",
        campaign.levels().len(),
        config.seed,
        config.max_ticks_per_level
    );

    let mut violations = Vec::new();
    let result = campaign.run_with(|session: &Session| {
        for agent in session.agents() {
            if session.grid().cell_kind(agent.location).ok() == Some(CellKind::Wall) {
                violations.push(format!(
                    "level {} tick {}: {:?} on a wall at {}",
                    session.level_name(),
                    session.current_tick(),
                    agent.kind,
                    agent.location
                ));
            }
        }
    })?;

    if !violations.is_empty() {
        bail!("invariant violated:\n{}", violations.join("\n"));
    }

    let outcome = match result.outcome {
        CampaignOutcome::Won => "won".to_string(),
        CampaignOutcome::Lost { level } => format!("lost on level {}", level + 1),
        CampaignOutcome::Stalled { level } => format!("stalled on level {}", level + 1),
    };
    println!("Outcome: {outcome}");
    println!("Levels played: {}", result.levels_played);
    println!("Score: {}", result.score);
    println!("Ticks: {}", result.ticks);
    println!("Snapshot Hash: {}", result.final_hash);
    Ok(())
}
