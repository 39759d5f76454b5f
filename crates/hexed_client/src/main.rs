use anyhow::Context;
use bevy::prelude::*;
use bevy_rapier3d::prelude::*;
use hexed_simulation::combat::collision;
use hexed_simulation::{
    log_error, log_info, log_warning, spawn_player_character, ConfigError, HexedConfig, SimulationPlugin,
};

mod camera;
mod input;
mod overlay;
mod rendering;

use camera::CameraPlugin;
use input::InputPlugin;
use overlay::OverlayPlugin;
use rendering::RenderingSyncPlugin;

const CONFIG_PATH: &str = concat!(env!("CARGO_MANIFEST_DIR"), "/assets/config/hexed.ron");

/// Половина стороны арены (world units = сантиметры)
const ARENA_HALF_EXTENT: f32 = 2000.0;

fn main() {
    hexed_simulation::init_logger();
    let config = load_config().unwrap_or_else(|err| {
        // Нет файла → warning, битый RON → error (defaults в обоих случаях)
        if matches!(err.downcast_ref::<ConfigError>(), Some(ConfigError::Parse(_))) {
            log_error(&format!("❌ {:#}, using default config", err));
        } else {
            log_warning(&format!("⚠️ {:#}, using default config", err));
        }
        HexedConfig::default()
    });

    App::new()
        // Bevy defaults (rendering, input, time, etc.)
        .add_plugins(DefaultPlugins.set(WindowPlugin {
            primary_window: Some(Window {
                title: "HexedUnreal - Twin Stick".to_string(),
                resolution: (1280., 720.).into(),
                ..default()
            }),
            ..default()
        }))
        // Rapier держит коллайдеры (персонаж kinematic, снаряды/AoE sensors)
        .add_plugins(RapierPhysicsPlugin::<NoUserData>::default())
        // Simulation (headless ECS logic)
        .insert_resource(config)
        .add_plugins(SimulationPlugin)
        // Device input → PlayerInputEvent, cursor ray
        .add_plugins(InputPlugin)
        // Rendering sync (simulation → visuals)
        .add_plugins(RenderingSyncPlugin)
        // On-screen debug messages
        .add_plugins(OverlayPlugin)
        .add_plugins(CameraPlugin)
        .add_systems(Startup, setup_scene)
        .run();
}

fn load_config() -> anyhow::Result<HexedConfig> {
    let config = HexedConfig::load_from_path(CONFIG_PATH)
        .with_context(|| format!("loading {}", CONFIG_PATH))?;
    log_info(&format!("Loaded config from {}", CONFIG_PATH));
    Ok(config)
}

/// Spawn floor, lights, camera и player персонажа
fn setup_scene(
    mut commands: Commands,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
    config: Res<HexedConfig>,
) {
    // Floor: по нему трассируется курсор
    commands.spawn((
        Mesh3d(meshes.add(Plane3d::new(Vec3::Y, Vec2::splat(ARENA_HALF_EXTENT)))),
        MeshMaterial3d(materials.add(Color::srgb(0.25, 0.25, 0.3))),
        Transform::from_xyz(0.0, config.aim_plane_height, 0.0),
        RigidBody::Fixed,
        Collider::cuboid(ARENA_HALF_EXTENT, 1.0, ARENA_HALF_EXTENT),
        collision::aim_surface_groups(),
    ));

    // Directional light (sun)
    commands.spawn((
        DirectionalLight {
            illuminance: 10000.0,
            shadows_enabled: true,
            ..default()
        },
        Transform::from_rotation(Quat::from_rotation_x(-std::f32::consts::FRAC_PI_3)),
    ));

    commands.insert_resource(AmbientLight {
        color: Color::WHITE,
        brightness: 300.0,
        affects_lightmapped_meshes: false,
    });

    let player = spawn_player_character(&mut commands, Vec3::ZERO, &config);
    commands.entity(player).insert(rendering::NeedsVisual);

    let top_down = camera::TopDownCamera {
        target: Some(player),
        ..default()
    };
    let offset = Vec3::new(0.0, top_down.tilt.cos(), top_down.tilt.sin()) * top_down.distance;
    commands.spawn((
        Camera3d::default(),
        camera::top_down_projection(&top_down),
        Transform::from_translation(offset).looking_at(Vec3::ZERO, Vec3::Y),
        top_down,
    ));

    // Pickups по кругу вокруг старта
    for i in 0..6 {
        let angle = i as f32 * std::f32::consts::TAU / 6.0;
        let position = Vec3::new(angle.cos(), 0.0, angle.sin()) * 900.0;
        commands.spawn((
            rendering::Pickup,
            Transform::from_translation(position),
            rendering::NeedsVisual,
        ));
    }
}
