//! Keeper configuration.
//!
//! Hosts configure the keeper at startup by providing a `KeeperConfig`:
//! - `turn_duration_secs`: time a player has to move before the game expires
//! - `default_denom`: denomination used when a create request leaves it empty
//!
//! Settings are resolved with the following priority (highest to lowest):
//! 1. Environment variables (`CHECKERS_TURN_DURATION_SECS`, `CHECKERS_DEFAULT_DENOM`)
//! 2. A TOML document
//! 3. Built-in defaults
//!
//! ```
//! use checkers_ledger::core::KeeperConfig;
//! use std::time::Duration;
//!
//! let config = KeeperConfig::from_toml_str("turn_duration_secs = 60").unwrap();
//! assert_eq!(config.turn_duration(), Duration::from_secs(60));
//! assert_eq!(config.default_denom, "stake");
//! ```

use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;
use tracing::{debug, info, warn};

/// Default turn duration: 24 hours.
pub const DEFAULT_TURN_DURATION_SECS: u64 = 24 * 60 * 60;

/// Default wager denomination.
pub const DEFAULT_DENOM: &str = "stake";

const ENV_TURN_DURATION: &str = "CHECKERS_TURN_DURATION_SECS";
const ENV_DEFAULT_DENOM: &str = "CHECKERS_DEFAULT_DENOM";

/// Complete keeper configuration.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct KeeperConfig {
    /// Seconds added to the current time to compute every new deadline.
    pub turn_duration_secs: u64,

    /// Denomination substituted for an empty `denom` on game creation.
    pub default_denom: String,
}

impl Default for KeeperConfig {
    fn default() -> Self {
        Self {
            turn_duration_secs: DEFAULT_TURN_DURATION_SECS,
            default_denom: DEFAULT_DENOM.to_string(),
        }
    }
}

impl KeeperConfig {
    /// Create a configuration with built-in defaults.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the turn duration.
    #[must_use]
    pub fn with_turn_duration(mut self, duration: Duration) -> Self {
        assert!(duration.as_secs() > 0, "Turn duration must be at least one second");
        self.turn_duration_secs = duration.as_secs();
        self
    }

    /// Set the default denomination.
    #[must_use]
    pub fn with_default_denom(mut self, denom: impl Into<String>) -> Self {
        self.default_denom = denom.into();
        self
    }

    /// The turn duration as a `Duration`.
    #[must_use]
    pub fn turn_duration(&self) -> Duration {
        Duration::from_secs(self.turn_duration_secs)
    }

    /// Parse a TOML document. Missing keys keep their defaults, and a zero
    /// turn duration falls back to the default.
    pub fn from_toml_str(content: &str) -> Result<Self, toml::de::Error> {
        toml::from_str::<Self>(content).map(Self::validated)
    }

    fn validated(mut self) -> Self {
        if self.turn_duration_secs == 0 {
            warn!(
                "Ignoring turn_duration_secs = 0, using {}s",
                DEFAULT_TURN_DURATION_SECS
            );
            self.turn_duration_secs = DEFAULT_TURN_DURATION_SECS;
        }
        self
    }

    /// Load from a TOML file and apply environment overrides.
    ///
    /// Unreadable or unparsable files fall back to defaults.
    pub fn load_from_path(path: &Path) -> Self {
        let config = match std::fs::read_to_string(path) {
            Ok(content) => match Self::from_toml_str(&content) {
                Ok(config) => {
                    info!("Loaded keeper config from {}", path.display());
                    config
                }
                Err(e) => {
                    warn!("Failed to parse {}: {}, using defaults", path.display(), e);
                    Self::default()
                }
            },
            Err(e) => {
                warn!("Failed to read {}: {}, using defaults", path.display(), e);
                Self::default()
            }
        };
        config.apply_env_overrides()
    }

    /// Apply `CHECKERS_*` environment variable overrides.
    #[must_use]
    pub fn apply_env_overrides(self) -> Self {
        self.apply_overrides(|key| std::env::var(key).ok())
    }

    fn apply_overrides(mut self, lookup: impl Fn(&str) -> Option<String>) -> Self {
        if let Some(raw) = lookup(ENV_TURN_DURATION) {
            match raw.parse::<u64>() {
                Ok(secs) if secs > 0 => {
                    debug!("{} overrides turn duration: {}s", ENV_TURN_DURATION, secs);
                    self.turn_duration_secs = secs;
                }
                _ => warn!("Ignoring invalid {}={:?}", ENV_TURN_DURATION, raw),
            }
        }
        if let Some(denom) = lookup(ENV_DEFAULT_DENOM) {
            if denom.is_empty() {
                warn!("Ignoring empty {}", ENV_DEFAULT_DENOM);
            } else {
                debug!("{} overrides default denom: {}", ENV_DEFAULT_DENOM, denom);
                self.default_denom = denom;
            }
        }
        self
    }
}
