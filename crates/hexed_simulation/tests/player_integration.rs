//! Интеграционные тесты twin-stick персонажа
//!
//! App без TimePlugin: время двигаем вручную через `Time::advance_to`,
//! чтобы cooldown сценарии были точными.

use std::time::Duration;

use bevy::prelude::*;
use hexed_simulation::config::CharacterConfig;
use hexed_simulation::player::{CursorRay, CursorVisibility};
use hexed_simulation::*;

const FRAME: f32 = 1.0 / 60.0;

fn create_test_app(config: HexedConfig) -> App {
    let mut app = App::new();
    app.init_resource::<Time>()
        .insert_resource(config)
        .add_plugins(SimulationPlugin);
    app
}

fn test_config(starting_items: u32) -> HexedConfig {
    HexedConfig {
        character: CharacterConfig {
            starting_items,
            aoe_cooldown_time: 5.0,
            draw_debug_aim: true,
            ..Default::default()
        },
        ..Default::default()
    }
}

fn spawn_player(app: &mut App, config: &HexedConfig) -> Entity {
    app.world_mut()
        .spawn(player_character_bundle(Vec3::ZERO, config))
        .id()
}

/// Один frame в момент `seconds` (delta = разница с предыдущим frame)
fn update_at(app: &mut App, seconds: f32) {
    app.world_mut()
        .resource_mut::<Time>()
        .advance_to(Duration::from_secs_f32(seconds));
    app.update();
}

fn send(app: &mut App, action: PlayerAction) {
    app.world_mut().send_event(PlayerInputEvent::from(action));
}

fn count<T: Component>(app: &mut App) -> usize {
    let world = app.world_mut();
    world.query::<&T>().iter(world).count()
}

fn character(app: &App, entity: Entity) -> TwinStickCharacter {
    app.world()
        .get::<TwinStickCharacter>(entity)
        .cloned()
        .expect("player has TwinStickCharacter")
}

fn projectile_z(app: &mut App) -> f32 {
    let world = app.world_mut();
    let mut projectiles = world.query::<(&Projectile, &Transform)>();
    let (_, transform) = projectiles.single(world).expect("projectile alive");
    transform.translation.z
}

#[test]
fn test_spawn_announces_starting_items() {
    let config = test_config(3);
    let mut app = create_test_app(config.clone());
    spawn_player(&mut app, &config);

    update_at(&mut app, 0.0);

    let game_mode = app.world().resource::<GameMode>();
    assert_eq!(game_mode.items, 3);
    assert_eq!(game_mode.notifications, 1);
}

#[test]
fn test_aoe_cooldown_scenario() {
    let config = test_config(2);
    let mut app = create_test_app(config.clone());
    let player = spawn_player(&mut app, &config);

    // t=0: первый каст разрешён
    send(&mut app, PlayerAction::AoEAttack);
    update_at(&mut app, 0.0);
    assert_eq!(character(&app, player).items, 1);
    assert_eq!(count::<AoEAttack>(&mut app), 1);

    // t=3: cooldown ещё не прошёл
    send(&mut app, PlayerAction::AoEAttack);
    update_at(&mut app, 3.0);
    assert_eq!(character(&app, player).items, 1);
    assert_eq!(character(&app, player).last_aoe_time, Some(0.0));

    // t=6: каст разрешён, предыдущий AoE уже исчез по таймауту
    send(&mut app, PlayerAction::AoEAttack);
    update_at(&mut app, 6.0);
    assert_eq!(character(&app, player).items, 0);
    assert_eq!(count::<AoEAttack>(&mut app), 1);

    // spawn + 2 успешных каста, отказ не уведомляет
    let game_mode = app.world().resource::<GameMode>();
    assert_eq!(game_mode.items, 0);
    assert_eq!(game_mode.notifications, 3);
}

#[test]
fn test_aoe_without_items_is_silent() {
    let config = test_config(0);
    let mut app = create_test_app(config.clone());
    let player = spawn_player(&mut app, &config);

    update_at(&mut app, 0.0);
    send(&mut app, PlayerAction::AoEAttack);
    update_at(&mut app, 10.0);

    assert_eq!(count::<AoEAttack>(&mut app), 0);
    assert_eq!(character(&app, player).last_aoe_time, None);
    assert_eq!(app.world().resource::<GameMode>().notifications, 1);
}

#[test]
fn test_pickup_notifies_game_mode() {
    let config = test_config(0);
    let mut app = create_test_app(config.clone());
    let player = spawn_player(&mut app, &config);
    update_at(&mut app, 0.0);

    app.world_mut().send_event(PickupCollected { character: player });
    update_at(&mut app, FRAME);

    assert_eq!(character(&app, player).items, 1);
    let game_mode = app.world().resource::<GameMode>();
    assert_eq!(game_mode.items, 1);
    assert_eq!(game_mode.notifications, 2);

    // Pickup + AoE в одном frame: счётчик не изменился, но оба уведомления дошли
    app.world_mut().send_event(PickupCollected { character: player });
    send(&mut app, PlayerAction::AoEAttack);
    update_at(&mut app, 2.0 * FRAME);

    assert_eq!(character(&app, player).items, 1);
    assert_eq!(app.world().resource::<GameMode>().notifications, 4);
}

#[test]
fn test_shoot_spawns_projectile_in_front() {
    let config = test_config(0);
    let mut app = create_test_app(config.clone());
    let player = spawn_player(&mut app, &config);
    update_at(&mut app, 0.0);

    send(&mut app, PlayerAction::Shoot);
    update_at(&mut app, FRAME);

    let world = app.world_mut();
    let mut projectiles = world.query::<(&Projectile, &Transform, &DespawnAfter)>();
    let (projectile, transform, despawn) = projectiles
        .single(world)
        .expect("exactly one projectile");

    assert_eq!(projectile.owner, player);
    // Aim 0 → forward (-Z), offset 100 (+ максимум один frame полёта)
    let flown = config.projectile.speed * FRAME;
    assert!(transform.translation.x.abs() < 1e-3);
    assert!(transform.translation.y.abs() < 1e-3);
    assert!(transform.translation.z <= -100.0 + 1e-3);
    assert!(transform.translation.z >= -100.0 - flown - 1e-3);
    assert!((despawn.despawn_time - (FRAME + config.projectile.lifetime)).abs() < 1e-4);
}

#[test]
fn test_projectile_flies_and_despawns() {
    let config = test_config(0);
    let mut app = create_test_app(config.clone());
    spawn_player(&mut app, &config);
    update_at(&mut app, 0.0);

    send(&mut app, PlayerAction::Shoot);
    update_at(&mut app, 0.5);

    let before = projectile_z(&mut app);
    update_at(&mut app, 1.0);
    let after = projectile_z(&mut app);

    // 0.5s полёта вперёд на скорости 2000
    assert!((after - before + 1000.0).abs() < 1e-2);

    update_at(&mut app, 3.0);
    assert_eq!(count::<Projectile>(&mut app), 0);
}

#[test]
fn test_dash_launches_along_last_move_input() {
    let config = test_config(0);
    let mut app = create_test_app(config.clone());
    let player = spawn_player(&mut app, &config);
    update_at(&mut app, 0.0);

    send(&mut app, PlayerAction::Move(Vec2::new(1.0, 0.0)));
    send(&mut app, PlayerAction::Dash);
    update_at(&mut app, FRAME);

    let body = app.world().get::<PhysicsBody>(player).copied().expect("body");
    assert!(body.velocity.z < -1400.0, "dash velocity {:?}", body.velocity);
    assert!(body.velocity.x.abs() < 1e-3);

    let transform = app.world().get::<Transform>(player).copied().expect("transform");
    assert!(transform.translation.z < 0.0);
}

#[test]
fn test_move_input_walks_and_faces_movement() {
    let config = test_config(0);
    let mut app = create_test_app(config.clone());
    let player = spawn_player(&mut app, &config);
    update_at(&mut app, 0.0);

    // Move вправо, без мыши → персонаж разворачивается по движению
    for frame in 1..=30 {
        send(&mut app, PlayerAction::Move(Vec2::new(0.0, 1.0)));
        update_at(&mut app, frame as f32 * FRAME);
    }

    let transform = app.world().get::<Transform>(player).copied().expect("transform");
    assert!(transform.translation.x > 0.0);
    assert!((transform.forward().as_vec3() - Vec3::X).length() < 1e-3);

    let aim = app.world().get::<AimState>(player).copied().expect("aim");
    assert!((aim.aim_angle - 90.0).abs() < 1e-3);
    assert!(!app.world().resource::<CursorVisibility>().visible);

    let lines = app.world().resource::<Events<AimDebugLine>>();
    assert!(lines
        .iter_current_update_events()
        .any(|line| line.source == AimSource::Move));
}

#[test]
fn test_stick_aim_rotates_character() {
    let config = test_config(0);
    let mut app = create_test_app(config.clone());
    let player = spawn_player(&mut app, &config);
    update_at(&mut app, 0.0);

    send(&mut app, PlayerAction::StickAim(Vec2::new(0.0, 1.0)));
    update_at(&mut app, FRAME);

    let transform = app.world().get::<Transform>(player).copied().expect("transform");
    assert!((transform.forward().as_vec3() - Vec3::X).length() < 1e-3);

    let lines = app.world().resource::<Events<AimDebugLine>>();
    let line = lines
        .iter_current_update_events()
        .find(|line| line.source == AimSource::Stick)
        .expect("stick debug line");
    assert!((line.end - line.start - Vec3::X * 150.0).length() < 1e-3);
}

#[test]
fn test_mouse_aim_follows_cursor() {
    let config = test_config(0);
    let mut app = create_test_app(config.clone());
    let player = spawn_player(&mut app, &config);
    update_at(&mut app, 0.0);

    app.world_mut().resource_mut::<CursorRay>().ray =
        Some(Ray3d::new(Vec3::new(300.0, 1000.0, 0.0), Dir3::NEG_Y));
    send(&mut app, PlayerAction::MouseAim);
    update_at(&mut app, FRAME);

    let aim = app.world().get::<AimState>(player).copied().expect("aim");
    assert!(aim.using_mouse);
    assert!((aim.aim_angle - 90.0).abs() < 1e-3);
    assert!(app.world().resource::<CursorVisibility>().visible);

    // Курсор ушёл с поверхности → угол остаётся прежним
    app.world_mut().resource_mut::<CursorRay>().ray = None;
    update_at(&mut app, 2.0 * FRAME);
    let aim = app.world().get::<AimState>(player).copied().expect("aim");
    assert!((aim.aim_angle - 90.0).abs() < 1e-3);

    // Стик выводит из mouse режима, курсор игнорируется
    app.world_mut().resource_mut::<CursorRay>().ray =
        Some(Ray3d::new(Vec3::new(0.0, 1000.0, -300.0), Dir3::NEG_Y));
    send(&mut app, PlayerAction::StickAim(Vec2::new(1.0, 0.0)));
    update_at(&mut app, 3.0 * FRAME);
    let aim = app.world().get::<AimState>(player).copied().expect("aim");
    assert!(!aim.using_mouse);
    assert!((aim.aim_angle - 180.0).abs() < 1e-3);
}

#[derive(Resource, Default)]
struct DamageLog(Vec<PlayerDamaged>);

#[test]
fn test_damage_knockback_and_observer() {
    let config = test_config(0);
    let mut app = create_test_app(config.clone());
    app.init_resource::<DamageLog>();
    let player = spawn_player(&mut app, &config);
    app.world_mut()
        .entity_mut(player)
        .observe(|trigger: Trigger<PlayerDamaged>, mut log: ResMut<DamageLog>| {
            log.0.push(*trigger.event());
        });
    update_at(&mut app, 0.0);

    app.world_mut().send_event(DamageTaken {
        target: player,
        amount: 5.0,
        direction: Vec3::new(1.0, 0.5, 0.0),
    });
    update_at(&mut app, FRAME);

    let log = app.world().resource::<DamageLog>();
    assert_eq!(log.0.len(), 1);
    assert_eq!(log.0[0].amount, 5.0);
    assert_eq!(log.0[0].knockback, Vec3::new(1000.0, 0.0, 0.0));

    let body = app.world().get::<PhysicsBody>(player).copied().expect("body");
    assert!(body.velocity.x > 900.0);
    assert!(body.velocity.y.abs() < 1e-3);
}

#[test]
fn test_input_without_player_is_ignored() {
    let mut app = create_test_app(test_config(1));
    update_at(&mut app, 0.0);

    send(&mut app, PlayerAction::Shoot);
    send(&mut app, PlayerAction::AoEAttack);
    update_at(&mut app, FRAME);

    assert_eq!(count::<Projectile>(&mut app), 0);
    assert_eq!(count::<AoEAttack>(&mut app), 0);
    assert_eq!(app.world().resource::<GameMode>().notifications, 0);
}

#[test]
fn test_pickup_enables_aoe_in_same_frame() {
    let config = test_config(0);
    let mut app = create_test_app(config.clone());
    let player = spawn_player(&mut app, &config);
    update_at(&mut app, 0.0);

    app.world_mut().send_event(PickupCollected { character: player });
    send(&mut app, PlayerAction::AoEAttack);
    update_at(&mut app, FRAME);

    assert_eq!(character(&app, player).items, 0);
    assert_eq!(count::<AoEAttack>(&mut app), 1);

    // spawn + pickup + AoE cast
    let game_mode = app.world().resource::<GameMode>();
    assert_eq!(game_mode.items, 0);
    assert_eq!(game_mode.notifications, 3);
}

#[test]
fn test_dash_after_releasing_move_keeps_direction() {
    let config = test_config(0);
    let mut app = create_test_app(config.clone());
    let player = spawn_player(&mut app, &config);
    update_at(&mut app, 0.0);

    send(&mut app, PlayerAction::Move(Vec2::new(1.0, 0.0)));
    update_at(&mut app, FRAME);

    // Клавиши отпущены: Move не приходит, только Dash
    send(&mut app, PlayerAction::Dash);
    update_at(&mut app, 2.0 * FRAME);

    assert_eq!(character(&app, player).last_move_input, Vec2::new(1.0, 0.0));
    let body = app.world().get::<PhysicsBody>(player).copied().expect("body");
    assert!(body.velocity.z < -1400.0, "dash velocity {:?}", body.velocity);
    assert!(body.velocity.x.abs() < 1e-3);
}

#[test]
fn test_move_does_not_aim_in_mouse_mode() {
    let config = test_config(0);
    let mut app = create_test_app(config.clone());
    let player = spawn_player(&mut app, &config);
    update_at(&mut app, 0.0);

    // Mouse режим без попадания курсора: aim остаётся 0
    send(&mut app, PlayerAction::MouseAim);
    update_at(&mut app, FRAME);

    send(&mut app, PlayerAction::Move(Vec2::new(0.0, 1.0)));
    update_at(&mut app, 2.0 * FRAME);

    let aim = app.world().get::<AimState>(player).copied().expect("aim");
    assert_eq!(aim.aim_angle, 0.0);
    assert!(aim.using_mouse);
    assert!(app.world().resource::<CursorVisibility>().visible);

    let lines = app.world().resource::<Events<AimDebugLine>>();
    assert!(!lines
        .iter_current_update_events()
        .any(|line| line.source == AimSource::Move));

    // Движение при этом применяется
    let transform = app.world().get::<Transform>(player).copied().expect("transform");
    assert!(transform.translation.x > 0.0);
}

#[test]
fn test_stick_after_move_in_same_frame_wins_aim() {
    let config = test_config(0);
    let mut app = create_test_app(config.clone());
    let player = spawn_player(&mut app, &config);
    update_at(&mut app, 0.0);

    // Порядок как у client input: keyboard Move раньше gamepad стика
    send(&mut app, PlayerAction::Move(Vec2::new(0.0, 1.0)));
    send(&mut app, PlayerAction::StickAim(Vec2::new(1.0, 0.0)));
    update_at(&mut app, FRAME);

    let aim = app.world().get::<AimState>(player).copied().expect("aim");
    assert!((aim.aim_angle - 180.0).abs() < 1e-3);
    assert!(!aim.using_mouse);
}
