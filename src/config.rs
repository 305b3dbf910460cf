/// Tunable game constants, loadable from a TOML file.
///
/// Every section is `#[serde(default)]`, so a file only needs the keys it
/// wants to override:
///
/// ```toml
/// [window]
/// width = 1024
///
/// [fleet]
/// speedup_scale = 1.2
/// ```

use std::fs;
use std::path::Path;

use serde::Deserialize;

use crate::error::ConfigError;

/// Largest accepted screen side, in pixels.
pub const MAX_SCREEN_SIDE: i32 = 16_384;

#[derive(Clone, Debug, Deserialize, PartialEq)]
#[serde(default)]
pub struct WindowConfig {
    pub width: i32,
    pub height: i32,
    pub bg_color: [u8; 3],
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            width: 800,
            height: 600,
            bg_color: [230, 230, 230],
        }
    }
}

#[derive(Clone, Debug, Deserialize, PartialEq)]
#[serde(default)]
pub struct ShipConfig {
    pub width: i32,
    pub height: i32,
    pub speed: f32,
}

impl Default for ShipConfig {
    fn default() -> Self {
        Self {
            width: 60,
            height: 48,
            speed: 5.0,
        }
    }
}

#[derive(Clone, Debug, Deserialize, PartialEq)]
#[serde(default)]
pub struct BulletConfig {
    pub width: i32,
    pub height: i32,
    pub speed: f32,
    pub color: [u8; 3],
    /// Maximum number of bullets alive at once.
    pub allowed: usize,
}

impl Default for BulletConfig {
    fn default() -> Self {
        Self {
            width: 3,
            height: 15,
            speed: 7.0,
            color: [60, 60, 60],
            allowed: 3,
        }
    }
}

#[derive(Clone, Debug, Deserialize, PartialEq)]
#[serde(default)]
pub struct FleetConfig {
    pub alien_speed: f32,
    pub drop_speed: i32,
    /// Per-level multiplier applied to ship, bullet and alien speeds.
    pub speedup_scale: f32,
    pub points_per_alien: u32,
}

impl Default for FleetConfig {
    fn default() -> Self {
        Self {
            alien_speed: 1.0,
            drop_speed: 10,
            speedup_scale: 1.1,
            points_per_alien: 10,
        }
    }
}

#[derive(Clone, Debug, Default, Deserialize, PartialEq)]
#[serde(default)]
pub struct GameConfig {
    pub window: WindowConfig,
    pub ship: ShipConfig,
    pub bullet: BulletConfig,
    pub fleet: FleetConfig,
}

impl GameConfig {
    pub fn from_toml_str(text: &str, origin: &str) -> Result<Self, ConfigError> {
        toml::from_str(text).map_err(|e| ConfigError::Parse {
            path: origin.to_string(),
            message: e.to_string(),
        })
    }

    pub fn load_from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let text = fs::read_to_string(path).map_err(|e| ConfigError::Read {
            path: path.display().to_string(),
            message: e.to_string(),
        })?;
        Self::from_toml_str(&text, &path.display().to_string())
    }

    /// Built-in defaults when `path` is `None`, otherwise the parsed file.
    /// The result is validated either way.
    pub fn load_or_default(path: Option<&Path>) -> Result<Self, ConfigError> {
        let config = match path {
            Some(p) => Self::load_from_file(p)?,
            None => Self::default(),
        };
        config.validate()?;
        Ok(config)
    }

    /// Reject values the simulation cannot run with.  Fleet-grid checks need
    /// the alien sprite size and live in [`crate::fleet::grid_dimensions`].
    pub fn validate(&self) -> Result<(), ConfigError> {
        positive_i32("window.width", self.window.width)?;
        positive_i32("window.height", self.window.height)?;
        at_most("window.width", self.window.width, MAX_SCREEN_SIDE)?;
        at_most("window.height", self.window.height, MAX_SCREEN_SIDE)?;
        positive_i32("ship.width", self.ship.width)?;
        positive_i32("ship.height", self.ship.height)?;
        positive_f32("ship.speed", self.ship.speed)?;
        positive_i32("bullet.width", self.bullet.width)?;
        positive_i32("bullet.height", self.bullet.height)?;
        positive_f32("bullet.speed", self.bullet.speed)?;
        positive_f32("fleet.alien_speed", self.fleet.alien_speed)?;
        positive_i32("fleet.drop_speed", self.fleet.drop_speed)?;

        if self.bullet.allowed == 0 {
            return Err(ConfigError::Invalid {
                field: "bullet.allowed",
                reason: "must allow at least one bullet".into(),
            });
        }
        if self.fleet.speedup_scale.is_nan() || self.fleet.speedup_scale <= 1.0 {
            return Err(ConfigError::Invalid {
                field: "fleet.speedup_scale",
                reason: format!("must be greater than 1.0, got {}", self.fleet.speedup_scale),
            });
        }
        if self.ship.width > self.window.width || self.ship.height > self.window.height {
            return Err(ConfigError::Invalid {
                field: "ship",
                reason: format!(
                    "{}x{} ship does not fit a {}x{} screen",
                    self.ship.width, self.ship.height, self.window.width, self.window.height
                ),
            });
        }
        Ok(())
    }
}

fn positive_i32(field: &'static str, value: i32) -> Result<(), ConfigError> {
    if value > 0 {
        Ok(())
    } else {
        Err(ConfigError::Invalid {
            field,
            reason: format!("must be positive, got {value}"),
        })
    }
}

fn positive_f32(field: &'static str, value: f32) -> Result<(), ConfigError> {
    // NaN fails this check too
    if value > 0.0 {
        Ok(())
    } else {
        Err(ConfigError::Invalid {
            field,
            reason: format!("must be positive, got {value}"),
        })
    }
}

fn at_most(field: &'static str, value: i32, max: i32) -> Result<(), ConfigError> {
    if value <= max {
        Ok(())
    } else {
        Err(ConfigError::Invalid {
            field,
            reason: format!("must be at most {max}, got {value}"),
        })
    }
}
