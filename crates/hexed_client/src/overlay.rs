//! On-screen debug overlay: `screen_log` сообщения поверх экрана
//!
//! Симуляция пишет в process-wide `OverlayPrinter`, здесь он кладёт
//! сообщения в очередь, а система раз в frame превращает их в UI Text.

use std::sync::{Arc, Mutex};

use bevy::prelude::*;
use hexed_simulation::debug_helper::{set_overlay_printer, OverlayPrinter, ScreenMessage};

pub struct OverlayPlugin;

impl Plugin for OverlayPlugin {
    fn build(&self, app: &mut App) {
        let queue = OverlayQueue::default();
        set_overlay_printer(Box::new(QueuePrinter(queue.0.clone())));

        app.insert_resource(queue)
            .add_systems(Startup, spawn_overlay_root)
            .add_systems(Update, (display_screen_messages, expire_screen_messages).chain());
    }
}

#[derive(Resource, Default, Clone)]
struct OverlayQueue(Arc<Mutex<Vec<ScreenMessage>>>);

struct QueuePrinter(Arc<Mutex<Vec<ScreenMessage>>>);

impl OverlayPrinter for QueuePrinter {
    fn display(&self, message: ScreenMessage) {
        if let Ok(mut queue) = self.0.lock() {
            queue.push(message);
        }
    }
}

/// Колонка сообщений (левый верхний угол)
#[derive(Component)]
struct OverlayRoot;

#[derive(Component)]
struct ScreenMessageNode {
    expires_at: f32,
}

fn spawn_overlay_root(mut commands: Commands) {
    commands.spawn((
        OverlayRoot,
        Node {
            position_type: PositionType::Absolute,
            top: Val::Px(8.0),
            left: Val::Px(8.0),
            flex_direction: FlexDirection::ColumnReverse,
            ..default()
        },
    ));
}

fn display_screen_messages(
    mut commands: Commands,
    queue: Res<OverlayQueue>,
    root: Query<Entity, With<OverlayRoot>>,
    time: Res<Time>,
) {
    let Ok(root) = root.single() else {
        return;
    };

    let messages: Vec<ScreenMessage> = match queue.0.lock() {
        Ok(mut pending) => pending.drain(..).collect(),
        Err(_) => return,
    };

    let now = time.elapsed_secs();
    for message in messages {
        commands.spawn((
            Text::new(message.text),
            TextFont {
                font_size: 16.0,
                ..default()
            },
            TextColor(message.color),
            ScreenMessageNode {
                expires_at: now + message.duration,
            },
            ChildOf(root),
        ));
    }
}

fn expire_screen_messages(
    mut commands: Commands,
    nodes: Query<(Entity, &ScreenMessageNode)>,
    time: Res<Time>,
) {
    let now = time.elapsed_secs();

    for (entity, node) in nodes.iter() {
        if now >= node.expires_at {
            commands.entity(entity).despawn();
        }
    }
}
