//! Tunables for the arena and every entity kind.
//!
//! Everything has a default, so a config file only needs the keys it
//! changes:
//!
//! ```toml
//! frame_ms = 16
//!
//! [enemy]
//! hp = 10
//! spawn_probability = 0.03
//! ```

use std::path::Path;

use anyhow::{ensure, Context, Result};
use serde::Deserialize;

use crate::geometry::{Size, Vector};
use crate::hp_bar::DEFAULT_HIDE_DELAY_MS;

#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct GameConfig {
    pub arena: Size,
    /// Target frame length; the loop sleeps out whatever a tick leaves over.
    pub frame_ms: u64,
    pub shooter: ShooterConfig,
    pub bullet: BulletConfig,
    pub enemy: EnemyConfig,
    pub hp_bar: HpBarConfig,
    pub display: DisplayConfig,
}

#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ShooterConfig {
    pub size: Size,
}

#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct BulletConfig {
    /// Side of the square stamp a bullet is drawn with.
    pub size: f64,
    /// Upward speed in arena units per second.
    pub speed: f64,
}

#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct EnemyConfig {
    pub size: Size,
    pub velocity: Vector,
    pub acceleration: Vector,
    /// Omit for no cap.
    pub max_speed: Option<f64>,
    pub mass: f64,
    pub hp: u32,
    /// Chance per tick that one enemy spawns.
    pub spawn_probability: f64,
}

#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct HpBarConfig {
    pub size: Size,
    /// From the enemy's position to the bar's top-centre.
    pub offset: Vector,
    pub hide_delay_ms: f64,
}

#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct DisplayConfig {
    pub show_crosshair: bool,
}

impl Default for GameConfig {
    fn default() -> Self {
        GameConfig {
            arena: Size::new(400.0, 600.0),
            frame_ms: 33, // ≈30 FPS
            shooter: ShooterConfig::default(),
            bullet: BulletConfig::default(),
            enemy: EnemyConfig::default(),
            hp_bar: HpBarConfig::default(),
            display: DisplayConfig::default(),
        }
    }
}

impl Default for ShooterConfig {
    fn default() -> Self {
        ShooterConfig {
            size: Size::new(40.0, 40.0),
        }
    }
}

impl Default for BulletConfig {
    fn default() -> Self {
        BulletConfig {
            size: 8.0,
            speed: 900.0,
        }
    }
}

impl Default for EnemyConfig {
    fn default() -> Self {
        EnemyConfig {
            size: Size::new(30.0, 30.0),
            velocity: Vector::new(0.0, 50.0),
            acceleration: Vector::new(0.0, 50.0),
            max_speed: Some(50.0),
            mass: 20.0,
            hp: 7,
            spawn_probability: 0.015,
        }
    }
}

impl Default for HpBarConfig {
    fn default() -> Self {
        HpBarConfig {
            size: Size::new(40.0, 8.0),
            // Centred over a default-sized enemy, a little above it.
            offset: Vector::new(15.0, -12.0),
            hide_delay_ms: DEFAULT_HIDE_DELAY_MS,
        }
    }
}

impl GameConfig {
    /// Read `path` if given, otherwise use the defaults. Either way the
    /// result is validated.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let config = match path {
            Some(path) => {
                let text = std::fs::read_to_string(path)
                    .with_context(|| format!("failed to read config {}", path.display()))?;
                Self::from_toml(&text)
                    .with_context(|| format!("invalid config {}", path.display()))?
            }
            None => Self::default(),
        };
        config.validate()?;
        Ok(config)
    }

    pub fn from_toml(text: &str) -> Result<Self> {
        Ok(toml::from_str(text)?)
    }

    /// Reject values the simulation cannot run with.
    pub fn validate(&self) -> Result<()> {
        ensure!(
            (0.0..=1.0).contains(&self.enemy.spawn_probability),
            "enemy.spawn_probability must be within [0, 1], got {}",
            self.enemy.spawn_probability
        );
        ensure!(
            self.enemy.mass > 0.0,
            "enemy.mass must be positive, got {}",
            self.enemy.mass
        );
        ensure!(self.enemy.hp > 0, "enemy.hp must be at least 1");
        if let Some(max) = self.enemy.max_speed {
            ensure!(max >= 0.0, "enemy.max_speed must not be negative, got {max}");
        }
        ensure!(self.bullet.speed >= 0.0, "bullet.speed must not be negative");
        ensure!(self.hp_bar.hide_delay_ms >= 0.0, "hp_bar.hide_delay_ms must not be negative");
        ensure!(self.frame_ms > 0, "frame_ms must be at least 1");
        ensure!(
            self.arena.w() > 0.0 && self.arena.h() > 0.0,
            "arena must have a non-zero width and height"
        );
        Ok(())
    }
}
