use anyhow::{Context, Result};
use std::env;

/// Environment variable holding the weather API key.
pub const API_KEY_VAR: &str = "SKYWX_API_KEY";

/// Environment variable holding the API base endpoint. The location string
/// is appended directly to this value, so it normally ends with `/`.
pub const API_URL_VAR: &str = "SKYWX_API_URL";

/// API credentials and endpoint, read once at startup and handed to the
/// client at construction.
#[derive(Debug, Clone)]
pub struct Config {
    pub api_key: String,
    pub base_url: String,
}

impl Config {
    /// Read both values from the environment.
    pub fn from_env() -> Result<Self> {
        let api_key = env::var(API_KEY_VAR).with_context(|| {
            format!(
                "{API_KEY_VAR} is not set.\n\
                 Hint: export your weather API key as {API_KEY_VAR}."
            )
        })?;
        let base_url = env::var(API_URL_VAR).with_context(|| {
            format!(
                "{API_URL_VAR} is not set.\n\
                 Hint: export the forecast endpoint URL as {API_URL_VAR}."
            )
        })?;

        Ok(Self { api_key, base_url })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // Single test so the process-global environment is not mutated from
    // parallel test threads.
    #[test]
    fn from_env_reads_both_values_and_reports_missing_ones() {
        env::set_var(API_KEY_VAR, "KEY");
        env::set_var(API_URL_VAR, "https://example.test/forecast/");

        let cfg = Config::from_env().expect("both variables set");
        assert_eq!(cfg.api_key, "KEY");
        assert_eq!(cfg.base_url, "https://example.test/forecast/");

        env::remove_var(API_URL_VAR);
        let err = Config::from_env().unwrap_err();
        assert!(err.to_string().contains(API_URL_VAR));

        env::remove_var(API_KEY_VAR);
    }
}
