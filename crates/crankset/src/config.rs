//! # Game Configuration
//!
//! One TOML file for the whole demo. The `[world]` table is the core's
//! [`WorldConfig`]; everything else is cosmetic frame content.
//!
//! ```toml
//! font_path = "/System/Fonts/Asheville-Sans-14-Bold.pft"
//!
//! [world]
//! seed = 7
//!
//! [bounce]
//! text = "Goodbye World!"
//!
//! [[captions]]
//! text = "Here is some example text"
//! x = 100
//! y = 100
//! ```

use std::fs;
use std::path::Path;

use crankset_core::{ConfigError, WorldConfig};
use serde::{Deserialize, Serialize};

use crate::bounce::BounceConfig;

/// Font the stock demo draws with.
pub const DEFAULT_FONT_PATH: &str = "/System/Fonts/Asheville-Sans-14-Bold.pft";

/// Fixed text drawn every frame.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Caption {
    /// Text to draw.
    pub text: String,
    /// Left edge.
    pub x: i32,
    /// Top edge.
    pub y: i32,
}

/// Placement of the frame-rate overlay.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct FpsOverlay {
    /// Draw the overlay at all.
    pub enabled: bool,
    /// Left edge.
    pub x: i32,
    /// Top edge.
    pub y: i32,
}

impl Default for FpsOverlay {
    fn default() -> Self {
        Self {
            enabled: true,
            x: 0,
            y: 0,
        }
    }
}

/// Everything [`Game::init`](crate::Game::init) needs.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct GameConfig {
    /// Font loaded at startup. Failing to load it aborts init.
    pub font_path: String,
    /// Core pools, spawn rules and setup objects.
    pub world: WorldConfig,
    /// Bouncing text.
    pub bounce: BounceConfig,
    /// Static captions, drawn after the bouncing text.
    pub captions: Vec<Caption>,
    /// Frame-rate overlay.
    pub fps: FpsOverlay,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            font_path: DEFAULT_FONT_PATH.to_owned(),
            world: WorldConfig::default(),
            bounce: BounceConfig::default(),
            captions: vec![Caption {
                text: "Here is some example text".to_owned(),
                x: 100,
                y: 100,
            }],
            fps: FpsOverlay::default(),
        }
    }
}

impl GameConfig {
    /// Parses and validates a TOML document. Missing keys take defaults.
    ///
    /// # Errors
    ///
    /// [`ConfigError::Parse`] on malformed TOML or unknown keys,
    /// [`ConfigError::Invalid`] if a value is out of range.
    pub fn from_toml_str(text: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    /// Reads, parses and validates a TOML file.
    ///
    /// # Errors
    ///
    /// [`ConfigError::Io`] if the file can't be read, otherwise as
    /// [`GameConfig::from_toml_str`].
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let text = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&text)
    }

    /// Checks the world and bounce settings.
    ///
    /// # Errors
    ///
    /// [`ConfigError::Invalid`] naming the first bad value.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.font_path.is_empty() {
            return Err(ConfigError::Invalid("font_path must not be empty".to_owned()));
        }
        if let Some(problem) = self.bounce.problem() {
            return Err(ConfigError::Invalid(problem));
        }
        self.world.validate()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_valid() {
        let config = GameConfig::default();
        config.validate().unwrap();
        assert_eq!(config.font_path, DEFAULT_FONT_PATH);
        assert_eq!(config.captions.len(), 1);
        assert!(config.fps.enabled);
    }

    #[test]
    fn test_empty_document_is_default() {
        assert_eq!(GameConfig::from_toml_str("").unwrap(), GameConfig::default());
    }

    #[test]
    fn test_partial_document() {
        let config = GameConfig::from_toml_str(
            r#"
            captions = []

            [world]
            seed = 7

            [world.capacities]
            objects = 4

            [bounce]
            dx = 3

            [fps]
            enabled = false
            "#,
        )
        .unwrap();

        assert_eq!(config.world.seed, 7);
        assert_eq!(config.world.capacities.objects, 4);
        assert_eq!(config.bounce.dx, 3);
        assert_eq!(config.bounce.text, "Goodbye World!");
        assert!(config.captions.is_empty());
        assert!(!config.fps.enabled);
    }

    #[test]
    fn test_rejects_unknown_keys() {
        assert!(matches!(
            GameConfig::from_toml_str("colour = 1"),
            Err(ConfigError::Parse(_))
        ));
    }

    #[test]
    fn test_rejects_bad_values() {
        assert!(matches!(
            GameConfig::from_toml_str("[bounce]\ntext_width = 401"),
            Err(ConfigError::Invalid(_))
        ));
        assert!(matches!(
            GameConfig::from_toml_str("[world.capacities]\nrenderers = 0"),
            Err(ConfigError::Invalid(_))
        ));
        assert!(matches!(
            GameConfig::from_toml_str("font_path = \"\""),
            Err(ConfigError::Invalid(_))
        ));
    }

    #[test]
    fn test_missing_file() {
        assert!(matches!(
            GameConfig::from_file("/definitely/not/here.toml"),
            Err(ConfigError::Io { .. })
        ));
    }
}
