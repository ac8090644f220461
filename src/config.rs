//! Runtime settings read from the environment (and `.env`, loaded by the CLI).

use crate::fetch::DEFAULT_API_URL;

pub const DEFAULT_LOG_FILE: &str = "logs/ferry_stats.log";

/// Settings for the CLI shell. The aggregation functions take none.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// `FERRY_API_URL`
    pub api_url: String,
    /// `FERRY_API_TOKEN`, sent as `Authorization: Token <value>` when present.
    pub api_token: Option<String>,
    /// `LOG_FILE_PATH`
    pub log_file_path: String,
}

impl Config {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds a config from an arbitrary variable lookup; blank values count as unset.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        Config {
            api_url: get("FERRY_API_URL").unwrap_or_else(|| DEFAULT_API_URL.to_string()),
            api_token: get("FERRY_API_TOKEN"),
            log_file_path: get("LOG_FILE_PATH").unwrap_or_else(|| DEFAULT_LOG_FILE.to_string()),
        }
    }
}
