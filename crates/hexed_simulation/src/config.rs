//! Конфигурация симуляции (RON)
//!
//! Все поля имеют defaults, так что RON файл может задавать только то,
//! что отличается. Client грузит `assets/config/hexed.ron`, headless
//! binary и тесты используют `HexedConfig::default()`.

use bevy::prelude::*;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::movement::CharacterMovement;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse config: {0}")]
    Parse(#[from] ron::error::SpannedError),
}

/// Корневой config (Resource)
#[derive(Resource, Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HexedConfig {
    pub character: CharacterConfig,
    pub movement: CharacterMovement,
    pub projectile: ProjectileConfig,
    pub aoe: AoEConfig,
    /// Высота плоскости по которой трассируется курсор
    pub aim_plane_height: f32,
}

impl HexedConfig {
    pub fn from_ron_str(source: &str) -> Result<Self, ConfigError> {
        Ok(ron::from_str(source)?)
    }

    pub fn load_from_path(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let source = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_ron_str(&source)
    }
}

/// Настройки twin-stick персонажа
///
/// Живёт и как config, и как Component на самом персонаже.
#[derive(Component, Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CharacterConfig {
    /// Сила dash launch (world units/s)
    pub dash_impulse: f32,
    /// Смещение точки спавна projectile вперёд от персонажа
    pub projectile_offset: f32,
    /// Сила knockback при получении урона
    pub knockback_strength: f32,
    /// Cooldown AoE атаки (секунды)
    pub aoe_cooldown_time: f32,
    /// Items на старте
    pub starting_items: u32,
    /// Рисовать debug линии прицеливания
    pub draw_debug_aim: bool,
}

impl Default for CharacterConfig {
    fn default() -> Self {
        Self {
            dash_impulse: 1500.0,
            projectile_offset: 100.0,
            knockback_strength: 1000.0,
            aoe_cooldown_time: 5.0,
            starting_items: 0,
            draw_debug_aim: cfg!(debug_assertions),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProjectileConfig {
    pub speed: f32,
    pub lifetime: f32,
    pub damage: u32,
    pub radius: f32,
}

impl Default for ProjectileConfig {
    fn default() -> Self {
        Self {
            speed: 2000.0,
            lifetime: 2.0,
            damage: 1,
            radius: 15.0,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AoEConfig {
    pub radius: f32,
    pub lifetime: f32,
    pub damage: u32,
}

impl Default for AoEConfig {
    fn default() -> Self {
        Self {
            radius: 400.0,
            lifetime: 0.5,
            damage: 3,
        }
    }
}
