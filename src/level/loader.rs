// ──────────────────────────────────────────────────────────────────────────
// level/loader.rs
//
//  *   levels/*.json  { "id": ..., "map": [[..]] }  ──>  Level  ──>  GridMap
// ──────────────────────────────────────────────────────────────────────────

use std::{fs, io, path::Path};

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::info;

use crate::world::Content;

/*──────────────────────────── Error type ───────────────────────────*/

#[derive(Error, Debug)]
pub enum LevelError {
    #[error("reading level `{path}`: {source}")]
    Io {
        path: String,
        #[source]
        source: io::Error,
    },

    /// `at` is the JSON path of the offending value (`map[3][1]`, …).
    #[error("parsing level json at {at}: {source}")]
    Parse {
        at: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("level grid is empty")]
    Empty,

    #[error("level row {row} has {found} cells, expected {expected}")]
    Ragged {
        row: usize,
        expected: usize,
        found: usize,
    },
}

/// Raw level exactly as stored on disk. The identifier is free to be
/// renamed; the grid is validated when it becomes a `GridMap`.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Level {
    pub id: String,
    pub map: Vec<Vec<Content>>,
}

/*====================================================================*/
/*                       Public API                                   */
/*====================================================================*/

/// Read and decode the level file at `path`.
pub fn load_level<P: AsRef<Path>>(path: P) -> Result<Level, LevelError> {
    let path = path.as_ref();
    let raw = fs::read_to_string(path).map_err(|source| LevelError::Io {
        path: path.display().to_string(),
        source,
    })?;
    let level = parse_level(&raw)?;
    info!(id = %level.id, rows = level.map.len(), "level loaded from {}", path.display());
    Ok(level)
}

/// Decode a level from JSON text.
pub fn parse_level(raw: &str) -> Result<Level, LevelError> {
    let mut deserializer = serde_json::Deserializer::from_str(raw);
    serde_path_to_error::deserialize(&mut deserializer).map_err(|error| {
        let at = error.path().to_string();
        LevelError::Parse {
            at,
            source: error.into_inner(),
        }
    })
}

/*──────────────────────────────── Tests ───────────────────────────────*/
