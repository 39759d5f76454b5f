use bevy::input::mouse::MouseWheel;
use bevy::prelude::*;
use bevy::render::camera::ScalingMode;
use hexed_simulation::HexedSet;

pub struct CameraPlugin;

impl Plugin for CameraPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(
            Update,
            (top_down_camera_zoom, follow_target)
                .chain()
                .after(HexedSet::Movement),
        );
    }
}

/// Top-down камера над персонажем (фиксированный угол, без вращения)
#[derive(Component)]
pub struct TopDownCamera {
    pub target: Option<Entity>,
    pub distance: f32,
    /// Наклон от вертикали (radians)
    pub tilt: f32,
    /// Высота видимой области (world units)
    pub view_height: f32,
    pub follow_speed: f32,
    pub zoom_speed: f32,
}

impl Default for TopDownCamera {
    fn default() -> Self {
        Self {
            target: None,
            distance: 1800.0,
            tilt: std::f32::consts::FRAC_PI_6, // 30°
            view_height: 2000.0,
            follow_speed: 8.0,
            zoom_speed: 100.0,
        }
    }
}

/// Orthographic проекция под `TopDownCamera::view_height`
pub fn top_down_projection(camera: &TopDownCamera) -> Projection {
    Projection::from(OrthographicProjection {
        scaling_mode: ScalingMode::FixedVertical {
            viewport_height: camera.view_height,
        },
        far: camera.distance * 4.0,
        ..OrthographicProjection::default_3d()
    })
}

/// Mouse wheel: zoom (меняем высоту видимой области)
fn top_down_camera_zoom(
    mut query: Query<(&mut TopDownCamera, &mut Projection)>,
    mut mouse_wheel: EventReader<MouseWheel>,
) {
    let (mut camera, mut projection) = match query.single_mut() {
        Ok(cam) => cam,
        Err(_) => return,
    };

    let mut zoomed = false;
    for wheel in mouse_wheel.read() {
        camera.view_height -= wheel.y * camera.zoom_speed;
        camera.view_height = camera.view_height.clamp(600.0, 6000.0);
        zoomed = true;
    }

    if zoomed {
        *projection = top_down_projection(&camera);
    }
}

/// Плавно догоняем target сверху
fn follow_target(
    mut cameras: Query<(&TopDownCamera, &mut Transform)>,
    targets: Query<&Transform, Without<TopDownCamera>>,
    time: Res<Time>,
) {
    for (camera, mut transform) in cameras.iter_mut() {
        let Some(focus) = camera.target.and_then(|target| targets.get(target).ok()) else {
            continue;
        };

        let offset = Vec3::new(0.0, camera.tilt.cos(), camera.tilt.sin()) * camera.distance;
        let desired = focus.translation + offset;
        let blend = (camera.follow_speed * time.delta_secs()).min(1.0);

        transform.translation = transform.translation.lerp(desired, blend);
        transform.look_at(transform.translation - offset, Vec3::Y);
    }
}
