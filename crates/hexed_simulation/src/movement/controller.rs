//! Kinematic character movement (walk + launch + gravity)
//!
//! Архитектура:
//! - Rapier только для коллайдеров (RigidBody::KinematicPositionBased)
//! - Velocity интегрируем сами, ровно один шаг на frame
//! - Движение ограничено плоскостью земли (constrain to plane)

use bevy::prelude::*;
use bevy_rapier3d::prelude::*;
use serde::{Deserialize, Serialize};

/// World forward на плоскости земли (Bevy: -Z)
pub const WORLD_FORWARD: Vec3 = Vec3::NEG_Z;

/// World right на плоскости земли (Bevy: +X)
pub const WORLD_RIGHT: Vec3 = Vec3::X;

/// Перевод 2D вектора (x = forward, y = right) в world space
pub fn ground_to_world(axis: Vec2) -> Vec3 {
    WORLD_FORWARD * axis.x + WORLD_RIGHT * axis.y
}

/// Физическое тело персонажа (наша velocity, Rapier её только зеркалит)
#[derive(Component, Debug, Clone, Copy, Default, Reflect)]
#[reflect(Component)]
pub struct PhysicsBody {
    pub velocity: Vec3,
}

impl PhysicsBody {
    /// Launch: мгновенно задать velocity
    ///
    /// `override_xy` - заменить горизонтальную составляющую (иначе прибавить),
    /// `override_z` - то же для вертикальной (Bevy Y).
    pub fn launch(&mut self, launch_velocity: Vec3, override_xy: bool, override_z: bool) {
        if override_xy {
            self.velocity.x = launch_velocity.x;
            self.velocity.z = launch_velocity.z;
        } else {
            self.velocity.x += launch_velocity.x;
            self.velocity.z += launch_velocity.z;
        }

        if override_z {
            self.velocity.y = launch_velocity.y;
        } else {
            self.velocity.y += launch_velocity.y;
        }
    }

    pub fn horizontal_speed(&self) -> f32 {
        Vec2::new(self.velocity.x, self.velocity.z).length()
    }
}

/// Movement input за текущий frame (world space)
///
/// Накапливается из input событий, расходуется интегратором и обнуляется.
#[derive(Component, Debug, Clone, Copy, Default, Reflect)]
#[reflect(Component)]
pub struct MovementInput {
    pub direction: Vec3,
}

impl MovementInput {
    pub fn add(&mut self, world_direction: Vec3, scale: f32) {
        self.direction += world_direction * scale;
    }

    /// Забрать накопленный input (длина ≤ 1, только горизонталь)
    pub fn consume(&mut self) -> Vec3 {
        let pending = Vec3::new(self.direction.x, 0.0, self.direction.z).clamp_length_max(1.0);
        self.direction = Vec3::ZERO;
        pending
    }
}

/// Настройки движения персонажа (world units = сантиметры)
#[derive(Component, Debug, Clone, Copy, PartialEq, Reflect, Serialize, Deserialize)]
#[reflect(Component)]
#[serde(default)]
pub struct CharacterMovement {
    pub max_walk_speed: f32,
    pub max_acceleration: f32,
    pub braking_deceleration: f32,
    pub gravity: f32,
    pub gravity_scale: f32,
    /// Высота плоскости земли
    pub ground_height: f32,
}

impl Default for CharacterMovement {
    fn default() -> Self {
        Self {
            max_walk_speed: 600.0,
            max_acceleration: 1000.0,
            braking_deceleration: 2048.0,
            gravity: -980.0,
            gravity_scale: 1.5,
            ground_height: 0.0,
        }
    }
}

impl CharacterMovement {
    pub fn is_grounded(&self, translation: Vec3, body: &PhysicsBody) -> bool {
        translation.y <= self.ground_height + 0.01 && body.velocity.y <= 0.0
    }

    /// Один шаг интеграции
    ///
    /// Input разгоняет не выше max(max_walk_speed, текущая скорость), так что
    /// dash/knockback не обрезаются сразу, а гасятся торможением.
    pub fn step(&self, body: &mut PhysicsBody, input: Vec3, translation: &mut Vec3, delta: f32) {
        let mut horizontal = Vec3::new(body.velocity.x, 0.0, body.velocity.z);
        let speed = horizontal.length();
        let has_input = input.length_squared() > 0.0;

        if has_input {
            let speed_cap = speed.max(self.max_walk_speed);
            horizontal = (horizontal + input * self.max_acceleration * delta).clamp_length_max(speed_cap);
        }

        if !has_input || speed > self.max_walk_speed {
            let floor = if has_input { self.max_walk_speed } else { 0.0 };
            let current = horizontal.length();
            if current > floor {
                let braked = (current - self.braking_deceleration * delta).max(floor);
                horizontal = horizontal.normalize_or_zero() * braked;
            }
        }

        body.velocity.x = horizontal.x;
        body.velocity.z = horizontal.z;

        if !self.is_grounded(*translation, body) {
            body.velocity.y += self.gravity * self.gravity_scale * delta;
        }

        *translation += body.velocity * delta;

        if translation.y < self.ground_height {
            translation.y = self.ground_height;
            body.velocity.y = body.velocity.y.max(0.0);
        }
    }
}

/// Система: movement input + launch velocity → Transform
pub fn integrate_character_movement(
    mut query: Query<(&CharacterMovement, &mut MovementInput, &mut PhysicsBody, &mut Transform)>,
    time: Res<Time>,
) {
    let delta = time.delta_secs();

    for (movement, mut input, mut body, mut transform) in query.iter_mut() {
        let pending = input.consume();
        movement.step(&mut body, pending, &mut transform.translation, delta);
    }
}

/// Система: PhysicsBody.velocity → Rapier Velocity (для collision queries)
pub fn sync_velocity_to_rapier(mut query: Query<(&PhysicsBody, &mut Velocity)>) {
    for (body, mut rapier_velocity) in query.iter_mut() {
        rapier_velocity.linvel = body.velocity;
    }
}
