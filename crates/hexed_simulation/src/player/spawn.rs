//! Spawn helpers для player персонажа

use bevy::prelude::*;
use bevy_rapier3d::prelude::*;

use super::components::{AimState, Player, TwinStickCharacter};
use crate::combat::collision;
use crate::config::HexedConfig;
use crate::movement::{MovementInput, PhysicsBody};

/// Capsule персонажа (half-height, radius)
pub const CHARACTER_CAPSULE_HALF_HEIGHT: f32 = 54.0;
pub const CHARACTER_CAPSULE_RADIUS: f32 = 42.0;

/// Полный набор компонентов twin-stick персонажа
///
/// - Transform + gameplay state (Player, TwinStickCharacter, AimState)
/// - character tuning (CharacterConfig, CharacterMovement)
/// - kinematic physics (PhysicsBody, MovementInput, Rapier body/collider)
pub fn player_character_bundle(position: Vec3, config: &HexedConfig) -> impl Bundle {
    (
        Transform::from_translation(position),
        (
            Player,
            TwinStickCharacter::from_config(&config.character),
            AimState::default(),
            config.character.clone(),
            config.movement,
        ),
        (
            PhysicsBody::default(),
            MovementInput::default(),
            RigidBody::KinematicPositionBased,
            Collider::capsule_y(CHARACTER_CAPSULE_HALF_HEIGHT, CHARACTER_CAPSULE_RADIUS),
            Velocity::default(),
            collision::actor_groups(),
        ),
    )
}

pub fn spawn_player_character(commands: &mut Commands, position: Vec3, config: &HexedConfig) -> Entity {
    let entity = commands.spawn(player_character_bundle(position, config)).id();
    crate::logger::log_info(&format!("Spawned player character {:?} at {:?}", entity, position));
    entity
}
