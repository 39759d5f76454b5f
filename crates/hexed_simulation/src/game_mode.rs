//! Game mode - агрегатор items персонажей
//!
//! Персонаж отправляет `ItemsChanged` при каждом изменении счётчика
//! (pickup, AoE cast, spawn). GameMode получает ровно один `item_used` на событие.

use bevy::prelude::*;

use crate::HexedSet;

/// Event: у персонажа изменилось количество items
#[derive(Event, Debug, Clone, Copy, PartialEq, Eq)]
pub struct ItemsChanged {
    pub character: Entity,
    pub items: u32,
}

#[derive(Resource, Debug, Default, Clone)]
pub struct GameMode {
    /// Последнее сообщённое количество items
    pub items: u32,
    /// Сколько уведомлений пришло за всю игру
    pub notifications: u32,
}

impl GameMode {
    pub fn item_used(&mut self, items: u32) {
        self.items = items;
        self.notifications += 1;
    }
}

pub fn notify_game_mode(mut events: EventReader<ItemsChanged>, mut game_mode: ResMut<GameMode>) {
    for event in events.read() {
        game_mode.item_used(event.items);
        crate::logger::log(&format!(
            "GameMode: {:?} has {} items",
            event.character, event.items
        ));
    }
}

pub struct GameModePlugin;

impl Plugin for GameModePlugin {
    fn build(&self, app: &mut App) {
        app.add_event::<ItemsChanged>()
            .init_resource::<GameMode>()
            .add_systems(Update, notify_game_mode.in_set(HexedSet::Notify));
    }
}
