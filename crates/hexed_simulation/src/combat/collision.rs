//! Collision groups (Rapier)
//!
//! ## Группы:
//! - GROUP_1: Actors (игрок, враги)
//! - GROUP_2: Environment (стены, препятствия)
//! - GROUP_3: Projectiles (пули)
//! - GROUP_4: Area effects (AoE сферы)
//! - GROUP_5: Aim trace channel (поверхности по которым трассируется курсор)

use bevy_rapier3d::prelude::*;

pub const ACTORS: Group = Group::GROUP_1;
pub const ENVIRONMENT: Group = Group::GROUP_2;
pub const PROJECTILES: Group = Group::GROUP_3;
pub const AREA_EFFECTS: Group = Group::GROUP_4;
pub const AIM_TRACE: Group = Group::GROUP_5;

/// Actors коллайдят с actors + environment
pub fn actor_groups() -> CollisionGroups {
    CollisionGroups::new(ACTORS, ACTORS | ENVIRONMENT)
}

/// Projectiles НЕ коллайдят друг с другом
pub fn projectile_groups() -> CollisionGroups {
    CollisionGroups::new(PROJECTILES, ACTORS | ENVIRONMENT)
}

/// AoE задевает только actors
pub fn area_effect_groups() -> CollisionGroups {
    CollisionGroups::new(AREA_EFFECTS, ACTORS)
}

/// Пол арены: environment + aim trace channel
pub fn aim_surface_groups() -> CollisionGroups {
    CollisionGroups::new(ENVIRONMENT | AIM_TRACE, ACTORS | PROJECTILES)
}
