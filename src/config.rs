use thiserror::Error;

/// Application-level constants
pub const APP_NAME: &str = "moodscan";
pub const APP_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Env var overriding the minimum accepted narrative length (chars).
pub const MIN_TEXT_LENGTH_ENV: &str = "MOODSCAN_MIN_TEXT_LENGTH";
/// Env var overriding the maximum accepted narrative length (chars).
pub const MAX_TEXT_LENGTH_ENV: &str = "MOODSCAN_MAX_TEXT_LENGTH";

/// Log filter used when `RUST_LOG` is unset.
pub fn default_log_filter() -> &'static str {
    "moodscan_lib=info"
}

#[derive(Error, Debug, PartialEq, Eq)]
pub enum InputError {
    #[error("Text too short: {actual} characters (minimum {min})")]
    TooShort { min: usize, actual: usize },

    #[error("Text too long: {actual} characters (maximum {max})")]
    TooLong { max: usize, actual: usize },
}

/// Length bounds enforced at the boundary, never inside the engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InputLimits {
    pub min_chars: usize,
    pub max_chars: usize,
}

impl Default for InputLimits {
    fn default() -> Self {
        Self {
            min_chars: 10,
            max_chars: 5000,
        }
    }
}

impl InputLimits {
    /// Defaults overridden by the environment. Unparseable values are ignored.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();
        let read = |key: &str, fallback: usize| match lookup(key) {
            Some(raw) => raw.trim().parse().unwrap_or_else(|_| {
                tracing::warn!(key, value = %raw, "Ignoring invalid input limit");
                fallback
            }),
            None => fallback,
        };

        Self {
            min_chars: read(MIN_TEXT_LENGTH_ENV, defaults.min_chars),
            max_chars: read(MAX_TEXT_LENGTH_ENV, defaults.max_chars),
        }
    }

    /// Character count of `text` must fall within the limits.
    pub fn check(&self, text: &str) -> Result<(), InputError> {
        let actual = text.chars().count();
        if actual < self.min_chars {
            return Err(InputError::TooShort {
                min: self.min_chars,
                actual,
            });
        }
        if actual > self.max_chars {
            return Err(InputError::TooLong {
                max: self.max_chars,
                actual,
            });
        }
        Ok(())
    }
}
