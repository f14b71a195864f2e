//! Level certification over a file or a game folder, producing log lines.

use std::path::{Path, PathBuf};

use anyhow::Result;
use torus_core::{check_level_sequence, validate};

use crate::level_file::{display_name, file_names, load_level};

/// Diagnostic lines for `path`; empty means every level is playable.
///
/// Unreadable or malformed files are reported as lines too, so one bad file
/// does not hide problems in the rest of the folder.
pub fn check_path(path: &Path) -> Result<Vec<String>> {
    let mut lines = Vec::new();

    let paths: Vec<PathBuf> = if path.is_dir() {
        match check_level_sequence(&file_names(path)?) {
            Ok(ordered) => ordered.into_iter().map(|name| path.join(name)).collect(),
            Err(err) => {
                lines.push(format!("Game {} - {err}", display_name(path)));
                return Ok(lines);
            }
        }
    } else {
        vec![path.to_path_buf()]
    };

    for level_path in paths {
        match load_level(&level_path) {
            Ok(map) => lines.extend(validate(&map).messages()),
            Err(err) => lines.push(format!("Level {} - {err:#}", display_name(&level_path))),
        }
    }
    Ok(lines)
}
