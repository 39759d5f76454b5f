//! Player input routing
//!
//! # Архитектура
//!
//! ```text
//! Device input (keyboard / mouse / gamepad) - client
//!     ↓
//! PlayerInputEvent { action } (ECS event)
//!     ↓
//! route_player_input (ECS system, этот файл)
//!     ↓
//! AimState / MovementInput / PhysicsBody launch / spawn projectile, AoE
//! ```

use bevy::prelude::*;

use super::aim::CursorVisibility;
use super::components::{projectile_spawn_transform, AimState, Player, TwinStickCharacter};
use crate::combat::{aoe_bundle, projectile_bundle};
use crate::config::{CharacterConfig, HexedConfig};
use crate::debug_helper::{emit_aim_debug_line, AimDebugLine, AimSource};
use crate::game_mode::ItemsChanged;
use crate::movement::{ground_to_world, MovementInput, PhysicsBody};

/// Семантическое действие игрока
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PlayerAction {
    /// Move оси (x = forward, y = right), каждая в [-1, 1]
    Move(Vec2),
    /// Правый стик
    StickAim(Vec2),
    /// Мышь сдвинулась → mouse aim режим
    MouseAim,
    Dash,
    Shoot,
    AoEAttack,
}

/// Event: одно input действие для player-controlled персонажа
#[derive(Event, Debug, Clone, Copy, PartialEq)]
pub struct PlayerInputEvent {
    pub action: PlayerAction,
}

impl From<PlayerAction> for PlayerInputEvent {
    fn from(action: PlayerAction) -> Self {
        Self { action }
    }
}

/// Event: персонаж подобрал pickup
#[derive(Event, Debug, Clone, Copy)]
pub struct PickupCollected {
    pub character: Entity,
}

/// Player input system - раздаёт действия единственному Player
///
/// # Guards
/// - нет Player entity (или их несколько) → события пропускаются
///
/// # Side effects
/// - Shoot → spawn Projectile
/// - AoEAttack → spawn AoEAttack + ItemsChanged
/// - Move/StickAim → cursor hide, MouseAim → cursor show
pub fn route_player_input(
    mut commands: Commands,
    mut input_events: EventReader<PlayerInputEvent>,
    mut players: Query<
        (
            Entity,
            &mut TwinStickCharacter,
            &mut AimState,
            &CharacterConfig,
            &Transform,
            &mut PhysicsBody,
            &mut MovementInput,
        ),
        With<Player>,
    >,
    config: Res<HexedConfig>,
    time: Res<Time>,
    mut cursor: ResMut<CursorVisibility>,
    mut items_changed: EventWriter<ItemsChanged>,
    mut debug_lines: EventWriter<AimDebugLine>,
) {
    let Ok((entity, mut character, mut aim, tuning, transform, mut body, mut movement)) =
        players.single_mut()
    else {
        input_events.clear();
        return;
    };

    let now = time.elapsed_secs();

    for input in input_events.read() {
        match input.action {
            PlayerAction::Move(axis) => {
                character.record_move(axis);

                // Gamepad без правого стика: смотрим туда, куда идём
                if !aim.using_mouse && axis.length_squared() > 0.0 {
                    let rot = Vec2::new(-axis.x, axis.y);
                    aim.aim_with_axes(rot.x, rot.y);
                    cursor.visible = false;
                    emit_aim_debug_line(
                        tuning.draw_debug_aim,
                        &mut debug_lines,
                        transform.translation,
                        rot,
                        AimSource::Move,
                    );
                }

                movement.add(ground_to_world(Vec2::X), axis.x);
                movement.add(ground_to_world(Vec2::Y), axis.y);
            }
            PlayerAction::StickAim(axis) => {
                if aim.stick_aim(axis) {
                    cursor.visible = false;
                    emit_aim_debug_line(
                        tuning.draw_debug_aim,
                        &mut debug_lines,
                        transform.translation,
                        axis,
                        AimSource::Stick,
                    );
                }
            }
            PlayerAction::MouseAim => {
                aim.enter_mouse_mode();
                cursor.visible = true;
            }
            PlayerAction::Dash => {
                let launch = character.dash_launch_velocity(tuning.dash_impulse);
                body.launch(launch, true, true);
                crate::logger::log(&format!(
                    "💨 {:?} dash {:?} (speed {:.1})",
                    entity,
                    launch,
                    body.horizontal_speed()
                ));
            }
            PlayerAction::Shoot => {
                let spawn = projectile_spawn_transform(transform, tuning.projectile_offset);
                let projectile = commands
                    .spawn(projectile_bundle(spawn, entity, &config.projectile, now))
                    .id();
                crate::logger::log(&format!("🎯 {:?} shoot → projectile {:?}", entity, projectile));
            }
            PlayerAction::AoEAttack => {
                if !character.try_aoe_attack(now) {
                    continue;
                }

                let aoe = commands
                    .spawn(aoe_bundle(*transform, entity, &config.aoe, now))
                    .id();
                items_changed.write(ItemsChanged {
                    character: entity,
                    items: character.items,
                });
                crate::logger::log(&format!(
                    "💥 {:?} AoE {:?} at {:.3} (items left: {})",
                    entity, aoe, now, character.items
                ));
            }
        }
    }
}

/// System: PickupCollected → +1 item → ItemsChanged
pub fn handle_pickups(
    mut pickups: EventReader<PickupCollected>,
    mut characters: Query<&mut TwinStickCharacter>,
    mut items_changed: EventWriter<ItemsChanged>,
) {
    for pickup in pickups.read() {
        let Ok(mut character) = characters.get_mut(pickup.character) else {
            continue;
        };

        let items = character.add_pickup();
        items_changed.write(ItemsChanged {
            character: pickup.character,
            items,
        });
    }
}

/// System: новый персонаж сообщает стартовые items в GameMode
pub fn announce_spawned_characters(
    characters: Query<(Entity, &TwinStickCharacter), Added<TwinStickCharacter>>,
    mut items_changed: EventWriter<ItemsChanged>,
) {
    for (entity, character) in characters.iter() {
        items_changed.write(ItemsChanged {
            character: entity,
            items: character.items,
        });
    }
}
