//! Spawned combat entities: projectile + AoE area effect
//!
//! Оба типа спавнятся персонажем (Shoot / AoEAttack) и живут ограниченное
//! время через `DespawnAfter`. Hit resolution по врагам здесь не делается:
//! коллайдеры + collision groups готовы для host physics.

use bevy::prelude::*;
use bevy_rapier3d::prelude::*;

use crate::combat::collision;
use crate::config::{AoEConfig, ProjectileConfig};

/// Снаряд: летит вдоль forward своего spawn transform
#[derive(Component, Debug, Clone)]
pub struct Projectile {
    pub speed: f32,
    pub damage: u32,
    /// Кто выстрелил (для self-hit фильтра)
    pub owner: Entity,
}

/// Area effect: стоит на месте каста
#[derive(Component, Debug, Clone)]
pub struct AoEAttack {
    pub radius: f32,
    pub damage: u32,
    pub owner: Entity,
}

/// Компонент: деспавн по таймауту (абсолютное время симуляции)
#[derive(Component, Debug, Clone, Copy)]
pub struct DespawnAfter {
    pub despawn_time: f32,
}

pub fn projectile_bundle(
    transform: Transform,
    owner: Entity,
    config: &ProjectileConfig,
    now: f32,
) -> impl Bundle {
    (
        Projectile {
            speed: config.speed,
            damage: config.damage,
            owner,
        },
        transform,
        DespawnAfter {
            despawn_time: now + config.lifetime,
        },
        Collider::ball(config.radius),
        Sensor,
        collision::projectile_groups(),
    )
}

pub fn aoe_bundle(transform: Transform, owner: Entity, config: &AoEConfig, now: f32) -> impl Bundle {
    (
        AoEAttack {
            radius: config.radius,
            damage: config.damage,
            owner,
        },
        transform,
        DespawnAfter {
            despawn_time: now + config.lifetime,
        },
        Collider::ball(config.radius),
        Sensor,
        collision::area_effect_groups(),
    )
}

/// Система: projectile движется вперёд
pub fn move_projectiles(mut projectiles: Query<(&Projectile, &mut Transform)>, time: Res<Time>) {
    let delta = time.delta_secs();

    for (projectile, mut transform) in projectiles.iter_mut() {
        let forward = transform.forward().as_vec3();
        transform.translation += forward * projectile.speed * delta;
    }
}

/// Система: деспавн entities с истёкшим DespawnAfter
pub fn despawn_after_timeout(
    mut commands: Commands,
    query: Query<(Entity, &DespawnAfter)>,
    time: Res<Time>,
) {
    let current_time = time.elapsed_secs();

    for (entity, despawn_after) in query.iter() {
        if current_time >= despawn_after.despawn_time {
            crate::logger::log(&format!("⚰️ Despawning entity {:?} (timeout)", entity));
            commands.entity(entity).despawn();
        }
    }
}
