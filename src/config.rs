use crate::error::{FaceitError, Result};

/// Cap on how many history items a single aggregation may pull upstream.
pub const DEFAULT_MAX_HISTORY_MATCHES: usize = 200;

/// Process configuration for the FACEIT client.
#[derive(Debug, Clone)]
pub struct Config {
    /// Server-side API key sent as a bearer token on every upstream call.
    pub api_key: String,
    /// Upper bound on history items fetched per player (pagination stops here).
    pub max_history_matches: usize,
}

impl Config {
    /// Build a config with the default history cap.
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            max_history_matches: DEFAULT_MAX_HISTORY_MATCHES,
        }
    }

    /// Resolve configuration from the process environment.
    ///
    /// Fails with [`FaceitError::MissingApiKey`] before any network call if
    /// `FACEIT_API_KEY` is unset or empty. `FACEIT_MAX_HISTORY_MATCHES`
    /// optionally overrides the per-player history cap.
    pub fn from_env() -> Result<Self> {
        let api_key = std::env::var("FACEIT_API_KEY")
            .ok()
            .filter(|key| !key.is_empty())
            .ok_or(FaceitError::MissingApiKey)?;
        let max_history_matches = std::env::var("FACEIT_MAX_HISTORY_MATCHES")
            .ok()
            .and_then(|value| value.parse().ok())
            .unwrap_or(DEFAULT_MAX_HISTORY_MATCHES);
        Ok(Self {
            api_key,
            max_history_matches,
        })
    }
}
