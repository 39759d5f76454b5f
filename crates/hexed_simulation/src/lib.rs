//! HexedUnreal Simulation Core
//!
//! Twin-stick shooter gameplay на Bevy 0.16 ECS (headless, без рендера)
//!
//! Слои:
//! - ECS = gameplay rules (aim, movement, dash, shoot, AoE, items)
//! - Client = input devices, камера, рендер, overlay (crate hexed_client)
//!
//! Порядок Update frame задаёт [`HexedSet`].

use bevy::prelude::*;

pub mod combat;
pub mod config;
pub mod debug_helper;
pub mod game_mode;
pub mod logger;
pub mod movement;
pub mod player;

pub use combat::{
    AoEAttack, CombatPlugin, DespawnAfter, Handgun, Projectile, Weapon, WeaponAttackIntent, WeaponAttacked,
    WeaponKind, WeaponKindPlugin, NO_OWNER,
};
pub use config::{ConfigError, HexedConfig};
pub use debug_helper::{screen_log, AimDebugLine, AimSource};
pub use game_mode::{GameMode, GameModePlugin, ItemsChanged};
pub use logger::{init_logger, log, log_error, log_info, log_warning, set_log_level, LogLevel};
pub use movement::{CharacterMovement, MovementInput, MovementPlugin, PhysicsBody};
pub use player::{
    player_character_bundle, spawn_player_character, AimState, DamageTaken, PickupCollected, Player, PlayerAction, PlayerDamaged,
    PlayerInputEvent, PlayerPlugin, TwinStickCharacter,
};

/// Фазы gameplay frame (выполняются строго по порядку)
#[derive(SystemSet, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HexedSet {
    /// Cursor trace + input routing + pickups + damage
    Input,
    /// Weapon base (begin play, cooldown gate)
    Combat,
    /// Aim angle → yaw
    Facing,
    /// Character integrator + projectile motion
    Movement,
    /// DespawnAfter
    Cleanup,
    /// ItemsChanged → GameMode
    Notify,
}

/// Главный plugin симуляции (объединяет все подсистемы)
///
/// `HexedConfig` можно вставить до plugin'а, иначе берутся defaults.
pub struct SimulationPlugin;

impl Plugin for SimulationPlugin {
    fn build(&self, app: &mut App) {
        app.configure_sets(
            Update,
            (
                HexedSet::Input,
                HexedSet::Combat,
                HexedSet::Facing,
                HexedSet::Movement,
                HexedSet::Cleanup,
                HexedSet::Notify,
            )
                .chain(),
        )
        .init_resource::<HexedConfig>()
        .add_plugins((PlayerPlugin, CombatPlugin, MovementPlugin, GameModePlugin));
    }
}

/// Создаёт minimal Bevy App для headless симуляции
pub fn create_headless_app(config: HexedConfig) -> App {
    let mut app = App::new();
    init_logger();
    app.add_plugins(MinimalPlugins)
        .insert_resource(config)
        .add_plugins(SimulationPlugin);

    app
}

/// Snapshot мира для сравнения детерминизма
pub fn world_snapshot<T: Component>(world: &mut World) -> Vec<u8>
where
    T: std::fmt::Debug,
{
    let mut snapshot = Vec::new();

    let mut query = world.query::<(Entity, &T)>();
    let mut entities: Vec<_> = query.iter(world).collect();

    // Сортируем по Entity ID для детерминизма
    entities.sort_by_key(|(entity, _)| entity.index());

    for (entity, component) in entities {
        snapshot.extend_from_slice(&entity.index().to_le_bytes());
        snapshot.extend_from_slice(format!("{:?}", component).as_bytes());
    }

    snapshot
}
