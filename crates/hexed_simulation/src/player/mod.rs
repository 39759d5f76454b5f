//! Player domain - twin-stick персонаж
//!
//! Порядок выполнения (Update):
//! 1. HexedSet::Input - trace_cursor_ray → pickups → route_player_input → damage
//! 2. HexedSet::Facing - update_player_rotation (mouse aim + yaw)
//! 3. HexedSet::Notify - announce_spawned_characters (до GameMode)

use bevy::prelude::*;

pub mod aim;
pub mod components;
pub mod damage;
pub mod input;
pub mod spawn;

#[cfg(test)]
mod player_tests;

pub use aim::{AimTracePlane, CursorHit, CursorRay, CursorVisibility};
pub use components::*;
pub use damage::{DamageTaken, PlayerDamaged};
pub use input::{PickupCollected, PlayerAction, PlayerInputEvent};
pub use spawn::{player_character_bundle, spawn_player_character};

use crate::config::HexedConfig;
use crate::debug_helper::AimDebugLine;
use crate::HexedSet;

pub struct PlayerPlugin;

impl Plugin for PlayerPlugin {
    fn build(&self, app: &mut App) {
        app.add_event::<PlayerInputEvent>()
            .add_event::<PickupCollected>()
            .add_event::<DamageTaken>()
            .add_event::<AimDebugLine>()
            .init_resource::<CursorRay>()
            .init_resource::<CursorHit>()
            .init_resource::<CursorVisibility>();

        let plane_height = app
            .world()
            .get_resource::<HexedConfig>()
            .map(|config| config.aim_plane_height)
            .unwrap_or_default();
        app.insert_resource(AimTracePlane {
            height: plane_height,
            ..default()
        });

        app.add_systems(
            Update,
            (
                aim::trace_cursor_ray,
                // Pickup раньше input: AoE в том же frame уже видит новый item
                input::handle_pickups,
                input::route_player_input,
                damage::handle_player_damage,
            )
                .chain()
                .in_set(HexedSet::Input),
        );

        app.add_systems(Update, aim::update_player_rotation.in_set(HexedSet::Facing));

        app.add_systems(
            Update,
            input::announce_spawned_characters
                .in_set(HexedSet::Notify)
                .before(crate::game_mode::notify_game_mode),
        );
    }
}
