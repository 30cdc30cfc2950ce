mod generators;
mod loaders;

pub use generators::*;
pub use loaders::*;

use log::info;
use std::path::{Path, PathBuf};
use thiserror::Error;

const STATIC_COMPETITIONS_JSON: &str = include_str!("data/competitions.json");

#[derive(Debug, Error)]
pub enum LoaderError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("malformed competition data: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("team {id} is invalid: {reason}")]
    InvalidTeam { id: u32, reason: String },
    #[error("competition {id} is invalid: {reason}")]
    InvalidCompetition { id: u32, reason: String },
    #[error("sanction {0} must target exactly one team or one player")]
    InvalidSanction(u32),
}

pub struct DatabaseLoader;

impl DatabaseLoader {
    /// Loads the bundled sample data.
    pub fn load() -> Result<DatabaseEntity, LoaderError> {
        Self::parse(STATIC_COMPETITIONS_JSON)
    }

    pub fn load_from(path: &Path) -> Result<DatabaseEntity, LoaderError> {
        let json = std::fs::read_to_string(path).map_err(|source| LoaderError::Io {
            path: path.to_path_buf(),
            source,
        })?;

        info!("loading competitions from {}", path.display());

        Self::parse(&json)
    }

    pub fn parse(json: &str) -> Result<DatabaseEntity, LoaderError> {
        let database: DatabaseEntity = serde_json::from_str(json)?;

        info!(
            "database: {} teams, {} players, {} competitions, {} matches, {} sanctions",
            database.teams.len(),
            database.players.len(),
            database.competitions.len(),
            database.matches.len(),
            database.sanctions.len()
        );

        Ok(database)
    }
}
