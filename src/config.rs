use color_eyre::eyre::{Result, WrapErr};
use std::env;
use std::path::PathBuf;

pub const DEFAULT_LIVE_SECONDS: u64 = 5;
pub const DEFAULT_LOG_FILTER: &str = "info";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunMode {
    Table,
    Live,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    /// `None` means the bundled sample.
    pub competition_file: Option<PathBuf>,
    pub competition_id: Option<u32>,
    pub mode: RunMode,
    pub live_seconds: u64,
}

impl AppConfig {
    pub fn from_env() -> Result<Self> {
        Self::from_vars(|key| env::var(key).ok())
    }

    fn from_vars<F>(var: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let competition_id = var("COMPETITION_ID")
            .map(|value| value.trim().parse::<u32>())
            .transpose()
            .wrap_err("COMPETITION_ID must be a competition id")?;

        let live_seconds = var("LIVE_SECONDS")
            .map(|value| value.trim().parse::<u64>())
            .transpose()
            .wrap_err("LIVE_SECONDS must be a number of seconds")?
            .unwrap_or(DEFAULT_LIVE_SECONDS);

        let mode = match var("MODE") {
            Some(mode) if mode.eq_ignore_ascii_case("LIVE") => RunMode::Live,
            _ => RunMode::Table,
        };

        Ok(AppConfig {
            competition_file: var("COMPETITION_FILE")
                .filter(|path| !path.is_empty())
                .map(PathBuf::from),
            competition_id,
            mode,
            live_seconds,
        })
    }
}
