//! Combat module: weapon base, spawned projectiles/AoE, collision groups
//!
//! Порядок выполнения (HexedSet::Combat, Update):
//! 1. begin_play_weapons - стамп новых оружий
//! 2. WeaponKind hooks (begin_play, tick)
//! 3. process_weapon_attack_intents - cooldown gate → WeaponAttacked
//!
//! Projectile movement - HexedSet::Movement, despawn - HexedSet::Cleanup.

use bevy::prelude::*;

pub mod collision;
pub mod handgun;
pub mod projectile;
pub mod weapon;


pub use handgun::Handgun;
pub use projectile::{aoe_bundle, projectile_bundle, AoEAttack, DespawnAfter, Projectile};
pub use weapon::{
    Weapon, WeaponAttackIntent, WeaponAttacked, WeaponKind, WeaponKindPlugin, NO_OWNER,
};

use crate::HexedSet;

pub struct CombatPlugin;

impl Plugin for CombatPlugin {
    fn build(&self, app: &mut App) {
        app.add_event::<WeaponAttackIntent>()
            .add_event::<WeaponAttacked>();

        app.add_plugins(WeaponKindPlugin::<Handgun>::default());

        app.add_systems(
            Update,
            (
                weapon::begin_play_weapons,
                weapon::process_weapon_attack_intents,
            )
                .chain()
                .in_set(HexedSet::Combat),
        );

        app.add_systems(Update, projectile::move_projectiles.in_set(HexedSet::Movement));
        app.add_systems(Update, projectile::despawn_after_timeout.in_set(HexedSet::Cleanup));
    }
}
