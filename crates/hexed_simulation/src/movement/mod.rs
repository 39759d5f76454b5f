//! Movement domain - kinematic персонаж на плоскости земли
//!
//! Содержит:
//! - PhysicsBody (velocity + launch)
//! - MovementInput (накопленный input за frame)
//! - CharacterMovement (настройки + интегратор)

use bevy::prelude::*;

pub mod controller;

pub use controller::*;

use crate::HexedSet;

pub struct MovementPlugin;

impl Plugin for MovementPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(
            Update,
            (integrate_character_movement, sync_velocity_to_rapier)
                .chain()
                .in_set(HexedSet::Movement),
        );
    }
}
