//! JSON level documents: `{ "name": "...", "rows": ["xxxx", ...] }`.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use torus_core::{GameMap, check_level_sequence};

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct LevelFile {
    /// Defaults to the file name.
    #[serde(default)]
    pub name: Option<String>,
    pub rows: Vec<String>,
}

impl LevelFile {
    pub fn from_map(map: &GameMap) -> Self {
        Self { name: Some(map.name.clone()), rows: map.to_rows() }
    }
}

pub fn load_level(path: &Path) -> Result<GameMap> {
    let data = fs::read_to_string(path)
        .with_context(|| format!("failed to read level file {}", path.display()))?;
    let file: LevelFile = serde_json::from_str(&data)
        .with_context(|| format!("failed to parse level JSON {}", path.display()))?;
    let name = file.name.unwrap_or_else(|| display_name(path));
    let map = GameMap::parse_rows(name, &file.rows)
        .with_context(|| format!("malformed level rows in {}", path.display()))?;
    tracing::debug!(
        level = %map.name,
        width = map.width(),
        height = map.height(),
        "level loaded"
    );
    Ok(map)
}

pub fn save_level(path: &Path, map: &GameMap) -> Result<()> {
    let data = serde_json::to_string_pretty(&LevelFile::from_map(map))?;
    fs::write(path, data).with_context(|| format!("failed to write {}", path.display()))
}

/// Level files of a game folder in play order, or the path itself for a file.
pub fn level_paths(path: &Path) -> Result<Vec<PathBuf>> {
    if !path.is_dir() {
        return Ok(vec![path.to_path_buf()]);
    }
    let ordered = check_level_sequence(&file_names(path)?)
        .with_context(|| format!("game folder {} is not playable", path.display()))?;
    Ok(ordered.into_iter().map(|name| path.join(name)).collect())
}

/// Names of the regular files directly inside `dir`.
pub fn file_names(dir: &Path) -> Result<Vec<String>> {
    let mut names = Vec::new();
    for entry in fs::read_dir(dir).with_context(|| format!("failed to list {}", dir.display()))? {
        let entry = entry?;
        if entry.file_type()?.is_file() {
            names.push(entry.file_name().to_string_lossy().into_owned());
        }
    }
    Ok(names)
}

pub fn load_levels(path: &Path) -> Result<Vec<GameMap>> {
    level_paths(path)?.iter().map(|level| load_level(level)).collect()
}

pub(crate) fn display_name(path: &Path) -> String {
    path.file_name().map_or_else(
        || path.display().to_string(),
        |name| name.to_string_lossy().into_owned(),
    )
}
