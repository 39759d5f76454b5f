//! Headless симуляция HexedUnreal
//!
//! Прогоняет scripted input для одного персонажа без рендера

use bevy::prelude::*;
use hexed_simulation::{
    create_headless_app, log_info, player_character_bundle, set_log_level, LogLevel, GameMode, HexedConfig, PickupCollected,
    PlayerAction, PlayerInputEvent, Projectile, TwinStickCharacter,
};

fn scripted_action(tick: u32) -> Option<PlayerAction> {
    match tick % 60 {
        0 => Some(PlayerAction::Move(Vec2::new(1.0, 0.5))),
        10 => Some(PlayerAction::StickAim(Vec2::new(0.0, 1.0))),
        20 => Some(PlayerAction::Shoot),
        30 => Some(PlayerAction::Dash),
        40 => Some(PlayerAction::AoEAttack),
        _ => None,
    }
}

fn main() {
    let mut config = HexedConfig::default();
    config.character.starting_items = 2;

    let mut app = create_headless_app(config.clone());
    // Per-event debug логи (выстрелы, despawn) в headless прогоне не нужны
    set_log_level(LogLevel::Info);
    log_info("Starting HexedUnreal headless simulation");

    let player = app
        .world_mut()
        .spawn(player_character_bundle(Vec3::ZERO, &config))
        .id();

    for tick in 0..600u32 {
        if let Some(action) = scripted_action(tick) {
            app.world_mut().send_event(PlayerInputEvent::from(action));
        }
        if tick == 300 {
            app.world_mut().send_event(PickupCollected { character: player });
        }

        app.update();

        if tick % 100 == 0 {
            let world = app.world_mut();
            let projectiles = world.query::<&Projectile>().iter(world).count();
            let transform = world.get::<Transform>(player).copied().unwrap_or_default();
            let items = world
                .get::<TwinStickCharacter>(player)
                .map(|character| character.items)
                .unwrap_or_default();
            log_info(&format!(
                "Tick {}: player at {:?}, items {}, projectiles {}",
                tick, transform.translation, items, projectiles
            ));
        }
    }

    let game_mode = app.world().resource::<GameMode>();
    log_info(&format!(
        "Simulation complete! GameMode: {} items, {} notifications",
        game_mode.items, game_mode.notifications
    ));
}
