//! Mouse aim: cursor ray → trace plane → look-at yaw
//!
//! Client пишет `CursorRay` из `Camera::viewport_to_world` каждый frame.
//! Headless тесты пишут его напрямую.

use bevy::prelude::*;
use bevy_rapier3d::prelude::Group;

use super::components::{facing_rotation, look_at_yaw, AimState, Player};
use crate::combat::collision;

/// World-space луч из-под курсора (None = курсора нет / вне окна)
#[derive(Resource, Debug, Clone, Copy, Default)]
pub struct CursorRay {
    pub ray: Option<Ray3d>,
}

/// Плоскость по которой трассируется курсор (aim trace channel)
///
/// Совпадает с полом арены (коллайдеры с `collision::AIM_TRACE`).
#[derive(Resource, Debug, Clone, Copy)]
pub struct AimTracePlane {
    pub height: f32,
    /// Trace channel (collision group пола)
    pub channel: Group,
}

impl Default for AimTracePlane {
    fn default() -> Self {
        Self {
            height: 0.0,
            channel: collision::AIM_TRACE,
        }
    }
}

impl AimTracePlane {
    pub fn trace(&self, ray: Ray3d) -> Option<Vec3> {
        let origin = Vec3::new(0.0, self.height, 0.0);
        ray.intersect_plane(origin, InfinitePlane3d::new(Vec3::Y))
            .map(|distance| ray.get_point(distance))
    }
}

/// Точка попадания курсора за текущий frame
#[derive(Resource, Debug, Clone, Copy, Default)]
pub struct CursorHit {
    pub location: Option<Vec3>,
}

/// Запрос к host: показать/спрятать курсор мыши
#[derive(Resource, Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CursorVisibility {
    pub visible: bool,
}

/// System: CursorRay → CursorHit
pub fn trace_cursor_ray(
    cursor: Res<CursorRay>,
    plane: Res<AimTracePlane>,
    mut hit: ResMut<CursorHit>,
) {
    hit.location = cursor.ray.and_then(|ray| plane.trace(ray));
}

/// System (per-frame update): mouse aim + facing rotation
///
/// В mouse режиме aim пересчитывается из CursorHit (промах → угол не меняем).
/// Всегда применяет aim angle как yaw персонажа, pitch/roll сохраняются.
pub fn update_player_rotation(
    mut players: Query<(&mut AimState, &mut Transform), With<Player>>,
    hit: Res<CursorHit>,
) {
    for (mut aim, mut transform) in players.iter_mut() {
        if aim.using_mouse {
            if let Some(yaw) = hit
                .location
                .and_then(|location| look_at_yaw(transform.translation, location))
            {
                aim.aim_angle = yaw;
            }
        }

        transform.rotation = facing_rotation(transform.rotation, aim.aim_angle);
    }
}
