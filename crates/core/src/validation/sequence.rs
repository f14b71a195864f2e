//! Ordering rules for a folder of numbered level files.

use std::collections::BTreeMap;

use regex::Regex;
use thiserror::Error;

const LEVEL_FILE_PATTERN: &str = r"^(\d+).*\.json$";

#[derive(Debug, Error)]
pub enum LevelSequenceError {
    #[error("no maps found")]
    NoLevels,
    #[error("multiple maps at same level {number}: {}", .files.join("; "))]
    DuplicateLevel { number: u64, files: Vec<String> },
    #[error(transparent)]
    Pattern(#[from] regex::Error),
}

/// Picks the level files out of `file_names` and orders them by level number.
///
/// A level file name starts with its number and ends in `.json`; anything else is
/// ignored. Two files claiming the same number reject the whole folder.
pub fn check_level_sequence<S: AsRef<str>>(
    file_names: &[S],
) -> Result<Vec<String>, LevelSequenceError> {
    let pattern = Regex::new(LEVEL_FILE_PATTERN)?;
    let mut by_number: BTreeMap<u64, Vec<String>> = BTreeMap::new();

    for name in file_names {
        let name = name.as_ref();
        let Some(captures) = pattern.captures(name) else {
            continue;
        };
        let Ok(number) = captures[1].parse::<u64>() else {
            continue;
        };
        by_number.entry(number).or_default().push(name.to_string());
    }

    if by_number.is_empty() {
        return Err(LevelSequenceError::NoLevels);
    }

    let mut ordered = Vec::with_capacity(by_number.len());
    for (number, mut files) in by_number {
        if files.len() > 1 {
            files.sort();
            return Err(LevelSequenceError::DuplicateLevel { number, files });
        }
        ordered.append(&mut files);
    }
    Ok(ordered)
}
