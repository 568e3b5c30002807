//! Runtime configuration read from the environment (and an optional `.env` file).

use log::warn;
use std::time::Duration;

pub const DEFAULT_API_URL: &str = "http://localhost:8000";
pub const DEFAULT_TIMEOUT_SECS: u64 = 120;
pub const DEFAULT_TYPING_SPEED: usize = 3;

pub const API_URL_VAR: &str = "FLASHCARDS_API_URL";
pub const TIMEOUT_VAR: &str = "FLASHCARDS_REQUEST_TIMEOUT_SECS";
pub const TYPING_SPEED_VAR: &str = "FLASHCARDS_TYPING_SPEED";

#[derive(Clone, Debug)]
pub struct Config {
    /// Backend base URL without a trailing slash.
    pub api_url: String,
    pub request_timeout: Duration,
    /// Characters of an explanation revealed per frame.
    pub typing_chars_per_frame: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_url: DEFAULT_API_URL.to_string(),
            request_timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            typing_chars_per_frame: DEFAULT_TYPING_SPEED,
        }
    }
}

impl Config {
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds a config from any key lookup. Invalid values fall back to defaults.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(url) = lookup(API_URL_VAR) {
            let url = url.trim().trim_end_matches('/');
            if url.is_empty() {
                warn!("{} is empty, using {}", API_URL_VAR, DEFAULT_API_URL);
            } else {
                config.api_url = url.to_string();
            }
        }

        if let Some(raw) = lookup(TIMEOUT_VAR) {
            match raw.trim().parse::<u64>() {
                Ok(secs) if secs > 0 => config.request_timeout = Duration::from_secs(secs),
                _ => warn!(
                    "Ignoring invalid {}={:?}, using {}s",
                    TIMEOUT_VAR, raw, DEFAULT_TIMEOUT_SECS
                ),
            }
        }

        if let Some(raw) = lookup(TYPING_SPEED_VAR) {
            match raw.trim().parse::<usize>() {
                Ok(speed) if speed > 0 => config.typing_chars_per_frame = speed,
                _ => warn!(
                    "Ignoring invalid {}={:?}, using {}",
                    TYPING_SPEED_VAR, raw, DEFAULT_TYPING_SPEED
                ),
            }
        }

        config
    }
}
