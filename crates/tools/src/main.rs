use std::fs;
use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::Parser;
use torus_tools::check::check_path;
use torus_tools::logging::init_tracing;

/// Certify a level file or a numbered game folder before play.
#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Level JSON file or game folder
    path: PathBuf,
    /// Where to write the diagnostic lines
    #[arg(short, long, default_value = "Log.txt")]
    log: PathBuf,
}

fn main() -> Result<ExitCode> {
    init_tracing();
    let args = Args::parse();

    let lines = check_path(&args.path)
        .with_context(|| format!("failed to check {}", args.path.display()))?;
    let mut log = lines.join("\n");
    if !log.is_empty() {
        log.push('\n');
    }
    fs::write(&args.log, log)
        .with_context(|| format!("failed to write log file {}", args.log.display()))?;

    if lines.is_empty() {
        println!("{}: all levels playable", args.path.display());
        return Ok(ExitCode::SUCCESS);
    }
    for line in &lines {
        eprintln!("{line}");
    }
    println!("{} problem(s), see {}", lines.len(), args.log.display());
    Ok(ExitCode::FAILURE)
}
