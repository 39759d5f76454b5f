//! Device input → PlayerInputEvent
//!
//! Keyboard + mouse и gamepad пишут одни и те же семантические действия.
//! Move шлётся только при ненулевых осях, StickAim каждый frame
//! (нулевой stick симуляция игнорирует).

use bevy::input::mouse::MouseMotion;
use bevy::prelude::*;
use bevy::window::PrimaryWindow;
use hexed_simulation::player::{CursorRay, CursorVisibility};
use hexed_simulation::{HexedSet, PlayerAction, PlayerInputEvent};

use crate::camera::TopDownCamera;

/// Dead zone стиков
const STICK_DEAD_ZONE: f32 = 0.15;

pub struct InputPlugin;

impl Plugin for InputPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(
            Update,
            // Stick последним: его aim перекрывает aim от Move в том же frame
            (update_cursor_ray, process_keyboard_mouse_input, process_gamepad_input)
                .chain()
                .before(HexedSet::Input),
        )
        .add_systems(Update, apply_cursor_visibility.after(HexedSet::Input));
    }
}

fn dead_zone(axis: Vec2) -> Vec2 {
    if axis.length() < STICK_DEAD_ZONE {
        Vec2::ZERO
    } else {
        axis
    }
}

/// Move только при ненулевых осях: в покое last move input (для dash) сохраняется
fn move_action(axis: Vec2) -> Option<PlayerAction> {
    (axis.length_squared() > 0.0).then_some(PlayerAction::Move(axis))
}

/// Keyboard/mouse: WASD move, мышь aim, Space dash, LMB shoot, RMB AoE
fn process_keyboard_mouse_input(
    keyboard: Res<ButtonInput<KeyCode>>,
    mouse_buttons: Res<ButtonInput<MouseButton>>,
    mut mouse_motion: EventReader<MouseMotion>,
    gamepads: Query<&Gamepad>,
    mut input_events: EventWriter<PlayerInputEvent>,
) {
    if mouse_motion.read().any(|motion| motion.delta != Vec2::ZERO) {
        input_events.write(PlayerAction::MouseAim.into());
    }

    let mut axis = Vec2::ZERO;
    if keyboard.pressed(KeyCode::KeyW) {
        axis.x += 1.0;
    }
    if keyboard.pressed(KeyCode::KeyS) {
        axis.x -= 1.0;
    }
    if keyboard.pressed(KeyCode::KeyD) {
        axis.y += 1.0;
    }
    if keyboard.pressed(KeyCode::KeyA) {
        axis.y -= 1.0;
    }

    // Gamepad left stick добавляется к клавиатуре (один Move за frame)
    for gamepad in gamepads.iter() {
        let stick = dead_zone(gamepad.left_stick());
        axis += Vec2::new(stick.y, stick.x);
    }
    if let Some(action) = move_action(axis) {
        input_events.write(action.into());
    }

    if keyboard.just_pressed(KeyCode::Space) {
        input_events.write(PlayerAction::Dash.into());
    }
    if mouse_buttons.just_pressed(MouseButton::Left) {
        input_events.write(PlayerAction::Shoot.into());
    }
    if mouse_buttons.just_pressed(MouseButton::Right) {
        input_events.write(PlayerAction::AoEAttack.into());
    }
}

/// Gamepad: right stick aim, South dash, RightTrigger shoot, LeftTrigger AoE
fn process_gamepad_input(gamepads: Query<&Gamepad>, mut input_events: EventWriter<PlayerInputEvent>) {
    for gamepad in gamepads.iter() {
        // Stick: x = вправо, y = вверх → aim оси (x = forward, y = right)
        let stick = dead_zone(gamepad.right_stick());
        input_events.write(PlayerAction::StickAim(Vec2::new(-stick.y, stick.x)).into());

        if gamepad.just_pressed(GamepadButton::South) {
            input_events.write(PlayerAction::Dash.into());
        }
        if gamepad.just_pressed(GamepadButton::RightTrigger2) {
            input_events.write(PlayerAction::Shoot.into());
        }
        if gamepad.just_pressed(GamepadButton::LeftTrigger2) {
            input_events.write(PlayerAction::AoEAttack.into());
        }
    }
}

fn cursor_world_ray(
    windows: &Query<&Window, With<PrimaryWindow>>,
    cameras: &Query<(&Camera, &GlobalTransform), With<TopDownCamera>>,
) -> Option<Ray3d> {
    let window = windows.single().ok()?;
    let position = window.cursor_position()?;
    let (camera, camera_transform) = cameras.single().ok()?;
    camera.viewport_to_world(camera_transform, position).ok()
}

/// Cursor position → world ray (None если курсор вне окна)
fn update_cursor_ray(
    windows: Query<&Window, With<PrimaryWindow>>,
    cameras: Query<(&Camera, &GlobalTransform), With<TopDownCamera>>,
    mut cursor_ray: ResMut<CursorRay>,
) {
    cursor_ray.ray = cursor_world_ray(&windows, &cameras);
}

fn apply_cursor_visibility(
    visibility: Res<CursorVisibility>,
    mut windows: Query<&mut Window, With<PrimaryWindow>>,
) {
    if !visibility.is_changed() {
        return;
    }

    if let Ok(mut window) = windows.single_mut() {
        window.cursor_options.visible = visibility.visible;
    }
}
