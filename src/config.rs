//! Placement policy for the editing layer.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::errors::ConfigError;

/// Rules the [`Editor`](crate::Editor) applies when supports are placed or moved.
///
/// The reaction solver assumes two supports on one level. Locking keeps the
/// editor inside that assumption; unlocking allows any number of supports at
/// any height, at which point the computed reactions lose physical meaning.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EditorConfig {
    /// Cap the support count and pin supports to `support_level`.
    pub locked_supports: bool,
    /// Largest number of supports accepted while locked.
    pub max_supports: usize,
    /// Height that locked supports snap to, in metres.
    pub support_level: f64,
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            locked_supports: true,
            max_supports: 2,
            support_level: 0.0,
        }
    }
}

impl EditorConfig {
    /// Configuration that places supports anywhere and without limit.
    #[must_use]
    pub fn unlocked() -> Self {
        Self {
            locked_supports: false,
            ..Self::default()
        }
    }

    /// Parse a configuration from JSON; missing fields take their defaults.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Parse`] for malformed JSON and
    /// [`ConfigError::TooFewSupports`] when `max_supports` is below two.
    ///
    /// # Examples
    /// ```
    /// use trussreact::EditorConfig;
    ///
    /// let config = EditorConfig::from_json_str(r#"{ "locked_supports": false }"#)
    ///     .expect("valid configuration");
    /// assert!(!config.locked_supports);
    /// assert_eq!(config.max_supports, 2);
    /// ```
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()
    }

    /// Read and parse a JSON configuration file.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Io`] when the file cannot be read, otherwise the
    /// errors of [`EditorConfig::from_json_str`].
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let text = fs::read_to_string(path)?;
        Self::from_json_str(&text)
    }

    /// Reject values the editor cannot honour.
    fn validate(self) -> Result<Self, ConfigError> {
        if self.max_supports < 2 {
            return Err(ConfigError::TooFewSupports(self.max_supports));
        }
        Ok(self)
    }
}
