//! # World Configuration
//!
//! Pool capacities, spawn policy and default shape, loaded once at startup
//! from TOML. Every field has a default matching the stock demo, so an
//! empty document is a valid config.
//!
//! ```toml
//! seed = 24301
//!
//! [capacities]
//! objects = 10
//! renderers = 10
//! resizers = 5
//! controllers = 3
//!
//! [spawn_area]
//! min_x = 10
//! max_x = 200
//! min_y = 10
//! max_y = 60
//!
//! [[setup]]
//! x = 100.0
//! y = 50.0
//! ```

use std::path::Path;

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::ecs::{Color, Controller, Renderer, SpawnLoadout};
use crate::error::ConfigError;

/// Complete configuration of a [`World`](crate::World).
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct WorldConfig {
    /// Seed for spawn positions.
    pub seed: u64,
    /// Slot count per pool.
    pub capacities: PoolCapacities,
    /// Rectangle random spawns land in.
    pub spawn_area: SpawnArea,
    /// Shape given to every new renderer.
    pub shape: ShapeDefaults,
    /// Optional components attached by input-triggered spawns.
    pub loadout: SpawnLoadout,
    /// Controller step and despawn policy.
    pub controller: ControllerConfig,
    /// Objects spawned when the world is built.
    pub setup: Vec<SetupObject>,
}

impl Default for WorldConfig {
    fn default() -> Self {
        Self {
            seed: 24_301,
            capacities: PoolCapacities::default(),
            spawn_area: SpawnArea::default(),
            shape: ShapeDefaults::default(),
            loadout: SpawnLoadout::FULL,
            controller: ControllerConfig::default(),
            setup: vec![SetupObject {
                x: 100.0,
                y: 50.0,
                loadout: None,
            }],
        }
    }
}

impl WorldConfig {
    /// Parses and validates a TOML document.
    ///
    /// # Errors
    ///
    /// [`ConfigError::Parse`] for malformed TOML or unknown keys,
    /// [`ConfigError::Invalid`] for values that fail [`validate`](Self::validate).
    pub fn from_toml_str(text: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    /// Reads, parses and validates a TOML file.
    ///
    /// # Errors
    ///
    /// [`ConfigError::Io`] if the file cannot be read, otherwise as
    /// [`from_toml_str`](Self::from_toml_str).
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&text)
    }

    /// Checks values the type system cannot.
    ///
    /// # Errors
    ///
    /// [`ConfigError::Invalid`] describing the first problem found.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.capacities.validate()?;
        self.spawn_area.validate()?;
        self.shape.validate()?;

        let setup = self.setup.len();
        if setup > self.capacities.objects || setup > self.capacities.renderers {
            return Err(ConfigError::Invalid(format!(
                "{setup} setup objects do not fit {} object / {} renderer slots",
                self.capacities.objects, self.capacities.renderers
            )));
        }

        Ok(())
    }
}

/// Slot count of each pool.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct PoolCapacities {
    /// Game object registry.
    pub objects: usize,
    /// Renderer pool.
    pub renderers: usize,
    /// Resizer pool.
    pub resizers: usize,
    /// Controller pool.
    pub controllers: usize,
}

impl Default for PoolCapacities {
    fn default() -> Self {
        Self {
            objects: 10,
            renderers: 10,
            resizers: 5,
            controllers: 3,
        }
    }
}

impl PoolCapacities {
    fn validate(&self) -> Result<(), ConfigError> {
        for (name, capacity) in [
            ("objects", self.objects),
            ("renderers", self.renderers),
            ("resizers", self.resizers),
            ("controllers", self.controllers),
        ] {
            if capacity == 0 || u32::try_from(capacity).is_err() {
                return Err(ConfigError::Invalid(format!(
                    "capacities.{name} must be between 1 and {}, got {capacity}",
                    u32::MAX
                )));
            }
        }
        Ok(())
    }
}

/// Inclusive pixel rectangle for random spawns.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SpawnArea {
    /// Leftmost spawn column.
    pub min_x: i32,
    /// Rightmost spawn column.
    pub max_x: i32,
    /// Topmost spawn row.
    pub min_y: i32,
    /// Bottom spawn row.
    pub max_y: i32,
}

impl Default for SpawnArea {
    fn default() -> Self {
        Self {
            min_x: 10,
            max_x: 200,
            min_y: 10,
            max_y: 60,
        }
    }
}

impl SpawnArea {
    /// Draws a position inside the rectangle.
    #[allow(clippy::cast_precision_loss)]
    pub fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> (f32, f32) {
        let x = rng.gen_range(self.min_x..=self.max_x);
        let y = rng.gen_range(self.min_y..=self.max_y);
        (x as f32, y as f32)
    }

    /// Returns `true` if the point lies inside the rectangle.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn contains(&self, x: f32, y: f32) -> bool {
        (self.min_x as f32..=self.max_x as f32).contains(&x)
            && (self.min_y as f32..=self.max_y as f32).contains(&y)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.min_x > self.max_x || self.min_y > self.max_y {
            return Err(ConfigError::Invalid(format!(
                "spawn_area is empty: x {}..={}, y {}..={}",
                self.min_x, self.max_x, self.min_y, self.max_y
            )));
        }
        Ok(())
    }
}

/// Shape given to every newly spawned renderer.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ShapeDefaults {
    /// Bounding box width.
    pub width: i32,
    /// Bounding box height.
    pub height: i32,
    /// Stroke width.
    pub line_width: i32,
    /// Arc start in degrees.
    pub start_angle: f32,
    /// Arc end in degrees.
    pub end_angle: f32,
    /// Stroke color.
    pub color: Color,
}

impl Default for ShapeDefaults {
    fn default() -> Self {
        Self {
            width: 25,
            height: 25,
            line_width: 5,
            start_angle: 0.0,
            end_angle: 360.0,
            color: Color::Black,
        }
    }
}

impl ShapeDefaults {
    /// Builds a renderer with this shape at a pixel position.
    #[must_use]
    pub const fn renderer_at(&self, pos_x: i32, pos_y: i32) -> Renderer {
        Renderer {
            pos_x,
            pos_y,
            width: self.width,
            height: self.height,
            line_width: self.line_width,
            start_angle: self.start_angle,
            end_angle: self.end_angle,
            color: self.color,
        }
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.width < 0 || self.height < 0 || self.line_width < 0 {
            return Err(ConfigError::Invalid(format!(
                "shape dimensions must be non-negative, got {}x{} stroke {}",
                self.width, self.height, self.line_width
            )));
        }
        if !(0.0..=360.0).contains(&self.start_angle) || !(0.0..=360.0).contains(&self.end_angle) {
            return Err(ConfigError::Invalid(format!(
                "shape angles must lie in 0..=360, got {}..{}",
                self.start_angle, self.end_angle
            )));
        }
        Ok(())
    }
}

/// Controller step and what happens to a controller when its owner despawns.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ControllerConfig {
    /// Horizontal step per tick.
    pub dx: i32,
    /// Vertical step per tick.
    pub dy: i32,
    /// Deactivate the controller together with its owner. When `false` the
    /// controller stays live and is re-linked by the next spawn into the
    /// same object slot.
    pub release_on_despawn: bool,
}

impl Default for ControllerConfig {
    fn default() -> Self {
        Self {
            dx: 2,
            dy: 2,
            release_on_despawn: false,
        }
    }
}

impl ControllerConfig {
    /// The controller record new spawns receive.
    #[must_use]
    pub const fn component(&self) -> Controller {
        Controller {
            dx: self.dx,
            dy: self.dy,
        }
    }
}

/// An object spawned at world construction.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SetupObject {
    /// Spawn column.
    pub x: f32,
    /// Spawn row.
    pub y: f32,
    /// Overrides the world loadout for this object.
    #[serde(default)]
    pub loadout: Option<SpawnLoadout>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    #[test]
    fn test_empty_document_is_default() {
        let config = WorldConfig::from_toml_str("").unwrap();
        assert_eq!(config, WorldConfig::default());
        assert_eq!(config.capacities.controllers, 3);
        assert_eq!(config.setup.len(), 1);
    }

    #[test]
    fn test_partial_document() {
        let config = WorldConfig::from_toml_str(
            r#"
            seed = 7
            setup = []

            [capacities]
            objects = 3

            [shape]
            color = "white"
            width = 40

            [controller]
            dx = 3
            release_on_despawn = true
            "#,
        )
        .unwrap();

        assert_eq!(config.seed, 7);
        assert_eq!(config.capacities.objects, 3);
        assert_eq!(config.capacities.renderers, 10);
        assert_eq!(config.shape.color, Color::White);
        assert_eq!(config.shape.width, 40);
        assert_eq!(config.shape.height, 25);
        assert_eq!(config.controller.component(), Controller { dx: 3, dy: 2 });
        assert!(config.controller.release_on_despawn);
        assert!(config.setup.is_empty());
    }

    #[test]
    fn test_setup_loadout_override() {
        let config = WorldConfig::from_toml_str(
            r"
            [[setup]]
            x = 1.0
            y = 2.0
            loadout = { resizer = false }
            ",
        )
        .unwrap();

        assert_eq!(
            config.setup[0].loadout,
            Some(SpawnLoadout {
                resizer: false,
                controller: true
            })
        );
    }

    #[test]
    fn test_rejects_bad_values() {
        assert!(matches!(
            WorldConfig::from_toml_str("[capacities]\nrenderers = 0"),
            Err(ConfigError::Invalid(_))
        ));
        assert!(matches!(
            WorldConfig::from_toml_str("[spawn_area]\nmin_x = 300"),
            Err(ConfigError::Invalid(_))
        ));
        assert!(matches!(
            WorldConfig::from_toml_str("[shape]\nline_width = -1"),
            Err(ConfigError::Invalid(_))
        ));
        assert!(matches!(
            WorldConfig::from_toml_str("[capacities]\nobjects = 1\n[[setup]]\nx = 0.0\ny = 0.0\n[[setup]]\nx = 1.0\ny = 1.0"),
            Err(ConfigError::Invalid(_))
        ));
        assert!(matches!(
            WorldConfig::from_toml_str("unknown_key = 1"),
            Err(ConfigError::Parse(_))
        ));
    }

    #[test]
    fn test_rejects_misspelled_loadout_keys() {
        assert!(matches!(
            WorldConfig::from_toml_str("[loadout]\nresizr = false"),
            Err(ConfigError::Parse(_))
        ));
        assert!(matches!(
            WorldConfig::from_toml_str("[[setup]]\nx = 1.0\ny = 1.0\nloadout = { controler = false }"),
            Err(ConfigError::Parse(_))
        ));

        let config = WorldConfig::from_toml_str("[loadout]\nresizer = false").unwrap();
        assert_eq!(
            config.loadout,
            SpawnLoadout {
                resizer: false,
                controller: true
            }
        );
    }

    #[test]
    fn test_missing_file() {
        let err = WorldConfig::from_file("/nonexistent/crankset.toml").unwrap_err();
        assert!(matches!(err, ConfigError::Io { .. }));
    }

    #[test]
    fn test_spawn_area_sampling_stays_inside() {
        let area = SpawnArea::default();
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        for _ in 0..1000 {
            let (x, y) = area.sample(&mut rng);
            assert!(area.contains(x, y), "({x}, {y}) outside {area:?}");
        }
    }

    #[test]
    fn test_shape_renderer() {
        let r = ShapeDefaults::default().renderer_at(100, 50);
        assert_eq!((r.pos_x, r.pos_y, r.width, r.height), (100, 50, 25, 25));
        assert_eq!(r.line_width, 5);
        assert_eq!(r.color, Color::Black);
    }
}
