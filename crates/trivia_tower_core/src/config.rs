//! Game configuration: the level sequence plus animation and decay timings.

use std::path::Path;
use std::time::Duration;

use derive_getters::Getters;
use derive_more::{Display, Error};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, instrument};

use crate::level::{Level, LevelError, water_levels};

/// Complete configuration for one game session.
#[derive(Debug, Clone, PartialEq, Eq, Getters, Serialize, Deserialize)]
pub struct GameConfig {
    /// Levels in play order.
    levels: Vec<Level>,

    /// Delays used by the controller.
    #[serde(default)]
    timing: Timing,

    /// Shown with the level-complete dialog.
    #[serde(default = "charity_links")]
    links: Vec<Link>,
}

impl GameConfig {
    /// Creates a configuration with default timings.
    #[instrument(skip(levels), fields(levels = levels.len()))]
    pub fn new(levels: Vec<Level>) -> Self {
        Self {
            levels,
            timing: Timing::default(),
            links: charity_links(),
        }
    }

    /// Replaces the timings.
    pub fn with_timing(mut self, timing: Timing) -> Self {
        self.timing = timing;
        self
    }

    /// Replaces the learn-more links.
    pub fn with_links(mut self, links: Vec<Link>) -> Self {
        self.links = links;
        self
    }

    /// Loads configuration from a TOML or JSON file (chosen by extension).
    #[instrument(skip(path), fields(path = %path.as_ref().display()))]
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        debug!("Loading config from file");
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| {
            ConfigError::new(format!("Failed to read config file: {}", e))
        })?;

        let is_json = path
            .extension()
            .and_then(|ext| ext.to_str())
            .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));

        let config = if is_json {
            Self::from_json_str(&content)?
        } else {
            Self::from_toml_str(&content)?
        };

        info!(levels = config.levels.len(), "Config loaded successfully");
        Ok(config)
    }

    /// Parses configuration from TOML text.
    #[instrument(skip(content))]
    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        toml::from_str(content)
            .map_err(|e| ConfigError::new(format!("Failed to parse config: {}", e)))
    }

    /// Parses configuration from JSON text.
    #[instrument(skip(content))]
    pub fn from_json_str(content: &str) -> Result<Self, ConfigError> {
        serde_json::from_str(content)
            .map_err(|e| ConfigError::new(format!("Failed to parse config: {}", e)))
    }

    /// Validates every level up front.
    ///
    /// The controller validates each level again when it starts; this is
    /// for callers that want to reject a bad file before play begins.
    #[instrument(skip(self))]
    pub fn validate(&self) -> Result<(), LevelError> {
        for (index, level) in self.levels.iter().enumerate() {
            level.validate(index + 1)?;
        }
        Ok(())
    }
}

impl Default for GameConfig {
    fn default() -> Self {
        Self::new(water_levels())
    }
}

/// A labelled web address offered after a level is cleared.
#[derive(Debug, Clone, PartialEq, Eq, Getters, Serialize, Deserialize)]
pub struct Link {
    /// Text shown to the player.
    label: String,
    /// Where it points.
    url: String,
}

impl Link {
    /// Creates a link.
    pub fn new(label: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            url: url.into(),
        }
    }
}

/// The charity: water donate and about pages.
pub fn charity_links() -> Vec<Link> {
    vec![
        Link::new("Donate to charity: water", "https://www.charitywater.org/donate"),
        Link::new("About Us", "https://www.charitywater.org/about"),
    ]
}

/// Delays, in milliseconds, for the controller's scheduled callbacks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Getters, Serialize, Deserialize)]
#[serde(default)]
pub struct Timing {
    /// How long a matched pair stays highlighted before the board unlocks.
    match_reveal_ms: u64,
    /// How long a mismatched pair stays visible before flipping back.
    mismatch_reveal_ms: u64,
    /// How long a hint highlight lasts.
    hint_highlight_ms: u64,
    /// How long the combo banner stays highlighted.
    combo_flash_ms: u64,
    /// Delay between clearing a level and showing its dialog.
    level_complete_delay_ms: u64,
    /// Period of the passive score decay.
    decay_interval_ms: u64,
}

impl Default for Timing {
    fn default() -> Self {
        Self {
            match_reveal_ms: 500,
            mismatch_reveal_ms: 800,
            hint_highlight_ms: 900,
            combo_flash_ms: 400,
            level_complete_delay_ms: 600,
            decay_interval_ms: 10_000,
        }
    }
}

impl Timing {
    /// Match confirmation delay.
    pub fn match_reveal(&self) -> Duration {
        Duration::from_millis(self.match_reveal_ms)
    }

    /// Mismatch reveal delay.
    pub fn mismatch_reveal(&self) -> Duration {
        Duration::from_millis(self.mismatch_reveal_ms)
    }

    /// Hint highlight duration.
    pub fn hint_highlight(&self) -> Duration {
        Duration::from_millis(self.hint_highlight_ms)
    }

    /// Combo highlight duration.
    pub fn combo_flash(&self) -> Duration {
        Duration::from_millis(self.combo_flash_ms)
    }

    /// Level-complete dialog delay.
    pub fn level_complete_delay(&self) -> Duration {
        Duration::from_millis(self.level_complete_delay_ms)
    }

    /// Passive decay period. Never zero.
    pub fn decay_interval(&self) -> Duration {
        Duration::from_millis(self.decay_interval_ms.max(1))
    }
}

/// Configuration error.
#[derive(Debug, Clone, Display, Error)]
#[display("Config error: {} at {}:{}", message, file, line)]
pub struct ConfigError {
    /// Error message.
    pub message: String,
    /// Line number where error occurred.
    pub line: u32,
    /// Source file where error occurred.
    pub file: &'static str,
}

impl ConfigError {
    /// Creates a new configuration error.
    #[track_caller]
    #[instrument(skip(message))]
    pub fn new(message: String) -> Self {
        let loc = std::panic::Location::caller();
        Self {
            message,
            line: loc.line(),
            file: loc.file(),
        }
    }
}
