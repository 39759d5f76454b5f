//! Player character компоненты: marker, aim state, character state

use bevy::prelude::*;

use crate::config::CharacterConfig;
use crate::movement::ground_to_world;

/// Marker component для player-controlled entity
///
/// Input events адресуются единственному entity с этим компонентом.
/// Нет такого entity (или их несколько) → input молча игнорируется.
#[derive(Component, Debug, Clone, Copy, Default)]
pub struct Player;

/// Aim angle из 2D осей: `degrees(atan2(y, -x))`
pub fn aim_angle_from_axes(axis_x: f32, axis_y: f32) -> f32 {
    axis_y.atan2(-axis_x).to_degrees()
}

/// Yaw (градусы) → направление на плоскости земли
///
/// Yaw 0 смотрит в world forward, 90 - в world right.
pub fn yaw_direction(yaw_degrees: f32) -> Vec3 {
    let (sin, cos) = yaw_degrees.to_radians().sin_cos();
    ground_to_world(Vec2::new(cos, sin))
}

/// Look-at yaw от `from` к `to` на плоскости земли
///
/// None если точки совпадают по горизонтали (направление не определено).
pub fn look_at_yaw(from: Vec3, to: Vec3) -> Option<f32> {
    let delta = to - from;
    let forward = delta.dot(crate::movement::WORLD_FORWARD);
    let right = delta.dot(crate::movement::WORLD_RIGHT);

    if forward.abs() < f32::EPSILON && right.abs() < f32::EPSILON {
        return None;
    }

    Some(right.atan2(forward).to_degrees())
}

/// Заменить yaw, сохранив pitch/roll
pub fn facing_rotation(current: Quat, yaw_degrees: f32) -> Quat {
    let (_yaw, pitch, roll) = current.to_euler(EulerRot::YXZ);
    Quat::from_euler(EulerRot::YXZ, -yaw_degrees.to_radians(), pitch, roll)
}

/// Aim state: угол прицела + режим (мышь / стик)
///
/// Инвариант: режимы взаимоисключающие, переключает последний
/// "различающий" input (движение мыши → mouse, ненулевой стик → stick).
#[derive(Component, Debug, Clone, Copy, Default, PartialEq, Reflect)]
#[reflect(Component)]
pub struct AimState {
    /// Yaw (градусы)
    pub aim_angle: f32,
    pub using_mouse: bool,
}

impl AimState {
    /// Прицелиться по осям и выйти из mouse режима
    pub fn aim_with_axes(&mut self, axis_x: f32, axis_y: f32) {
        self.aim_angle = aim_angle_from_axes(axis_x, axis_y);
        self.using_mouse = false;
    }

    /// Stick aim: нулевой input игнорируется (aim не прыгает в покое)
    pub fn stick_aim(&mut self, axis: Vec2) -> bool {
        if axis.length_squared() <= 0.0 {
            return false;
        }

        self.aim_with_axes(axis.x, axis.y);
        true
    }

    pub fn enter_mouse_mode(&mut self) {
        self.using_mouse = true;
    }
}

/// Состояние twin-stick персонажа (movement memory, items, AoE cooldown)
#[derive(Component, Debug, Clone, PartialEq, Reflect)]
#[reflect(Component)]
pub struct TwinStickCharacter {
    /// Последний move input (каждая ось в [-1, 1] для нормального input)
    pub last_move_input: Vec2,

    /// Items (ресурс для AoE)
    pub items: u32,

    /// Время последнего AoE (None = ещё не кастовали)
    pub last_aoe_time: Option<f32>,

    /// Cooldown AoE (секунды)
    pub aoe_cooldown_time: f32,
}

impl TwinStickCharacter {
    pub fn from_config(config: &CharacterConfig) -> Self {
        Self {
            last_move_input: Vec2::ZERO,
            items: config.starting_items,
            last_aoe_time: None,
            aoe_cooldown_time: config.aoe_cooldown_time,
        }
    }

    pub fn record_move(&mut self, axis: Vec2) {
        self.last_move_input = axis;
    }

    /// Направление dash: последний move input, каждая ось clamp в [-1, 1]
    pub fn dash_direction(&self) -> Vec2 {
        Vec2::new(
            self.last_move_input.x.clamp(-1.0, 1.0),
            self.last_move_input.y.clamp(-1.0, 1.0),
        )
    }

    /// Dash launch velocity в world space
    pub fn dash_launch_velocity(&self, impulse: f32) -> Vec3 {
        ground_to_world(self.dash_direction()) * impulse
    }

    pub fn is_aoe_ready(&self, now: f32) -> bool {
        match self.last_aoe_time {
            Some(last) => now - last > self.aoe_cooldown_time,
            None => true,
        }
    }

    /// AoE cast: нужен хотя бы 1 item и готовый cooldown
    ///
    /// Отказ - тихий no-op (items и timestamp не меняются).
    pub fn try_aoe_attack(&mut self, now: f32) -> bool {
        if self.items == 0 || !self.is_aoe_ready(now) {
            return false;
        }

        self.last_aoe_time = Some(now);
        self.items -= 1;
        true
    }

    pub fn add_pickup(&mut self) -> u32 {
        self.items += 1;
        self.items
    }
}

/// Knockback: направление урона без вертикали × сила
pub fn knockback_velocity(damage_direction: Vec3, strength: f32) -> Vec3 {
    Vec3::new(damage_direction.x, 0.0, damage_direction.z) * strength
}

/// Transform спавна projectile: позиция сдвинута вперёд по facing персонажа
pub fn projectile_spawn_transform(character: &Transform, offset: f32) -> Transform {
    let mut spawn = *character;
    spawn.translation += character.rotation * (Vec3::NEG_Z * offset);
    spawn
}
