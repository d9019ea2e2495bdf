use std::path::PathBuf;

use crate::shared::AppError;

pub const TOURNAMENT_FILE_VAR: &str = "COUPE_TOURNAMENT_FILE";
pub const LOG_FILTER_VAR: &str = "COUPE_LOG";
pub const DEFAULT_LOG_FILTER: &str = "coupe=info";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub tournament_path: PathBuf,
    /// Used when `RUST_LOG` is not set.
    pub log_filter: String,
}

impl Config {
    /// Reads the first command-line argument, falling back to the environment.
    pub fn from_env() -> Result<Self, AppError> {
        Self::from_sources(std::env::args().nth(1), |key| std::env::var(key).ok())
    }

    pub fn from_sources(
        path_arg: Option<String>,
        var: impl Fn(&str) -> Option<String>,
    ) -> Result<Self, AppError> {
        let tournament_path = path_arg
            .or_else(|| var(TOURNAMENT_FILE_VAR))
            .filter(|path| !path.is_empty())
            .map(PathBuf::from)
            .ok_or_else(|| {
                AppError::Config(format!(
                    "no tournament file given; pass a path or set {}",
                    TOURNAMENT_FILE_VAR
                ))
            })?;

        let log_filter = var(LOG_FILTER_VAR).unwrap_or_else(|| DEFAULT_LOG_FILTER.to_string());

        Ok(Self {
            tournament_path,
            log_filter,
        })
    }
}
