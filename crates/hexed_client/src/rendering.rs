use bevy::prelude::*;
use hexed_simulation::{AimDebugLine, AoEAttack, PickupCollected, Player, Projectile, HexedSet};

pub struct RenderingSyncPlugin;

impl Plugin for RenderingSyncPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(
            Update,
            (
                mark_spawned_combat_entities,
                spawn_visuals_for_new_entities,
                sync_transforms,
                despawn_orphaned_visuals,
            )
                .chain()
                .after(HexedSet::Cleanup),
        )
        .add_systems(Update, collect_pickups.before(HexedSet::Input))
        .add_systems(
            Update,
            (draw_aim_debug_lines, draw_aoe_areas).after(HexedSet::Input),
        );
    }
}

/// Radius подбора pickup'а
const PICKUP_RADIUS: f32 = 80.0;

/// Marker: simulation entity needs visual representation
#[derive(Component)]
pub struct NeedsVisual;

/// Link: visual entity → simulation entity
#[derive(Component)]
pub struct VisualOf(pub Entity);

/// Link: simulation entity → visual entity
#[derive(Component)]
pub struct HasVisual(pub Entity);

/// Pickup на арене (+1 item при касании)
#[derive(Component)]
pub struct Pickup;

/// Projectile/AoE спавнит симуляция, визуал навешиваем здесь
fn mark_spawned_combat_entities(
    mut commands: Commands,
    query: Query<Entity, Or<(Added<Projectile>, Added<AoEAttack>)>>,
) {
    for entity in query.iter() {
        commands.entity(entity).insert(NeedsVisual);
    }
}

/// Spawn visual representation для новых simulation entities
fn spawn_visuals_for_new_entities(
    mut commands: Commands,
    query: Query<
        (Entity, &Transform, Has<Player>, Option<&Projectile>, Has<Pickup>),
        With<NeedsVisual>,
    >,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
) {
    for (sim_entity, sim_transform, is_player, projectile, is_pickup) in query.iter() {
        let (mesh, color) = if is_player {
            (meshes.add(Capsule3d::new(42.0, 108.0)), Color::srgb(0.2, 0.4, 0.9))
        } else if projectile.is_some() {
            (meshes.add(Sphere::new(15.0)), Color::srgb(1.0, 0.8, 0.2))
        } else if is_pickup {
            (meshes.add(Cuboid::new(40.0, 40.0, 40.0)), Color::srgb(0.2, 0.9, 0.4))
        } else {
            // AoE рисуется gizmo кругом
            commands.entity(sim_entity).remove::<NeedsVisual>();
            continue;
        };

        let visual_entity = commands
            .spawn((
                Mesh3d(mesh),
                MeshMaterial3d(materials.add(StandardMaterial {
                    base_color: color,
                    ..default()
                })),
                *sim_transform,
                VisualOf(sim_entity),
            ))
            .id();

        // Link simulation ↔ visual
        commands
            .entity(sim_entity)
            .remove::<NeedsVisual>()
            .insert(HasVisual(visual_entity));
    }
}

/// Sync simulation transforms → visual transforms
fn sync_transforms(
    sim_query: Query<(&Transform, &HasVisual), Changed<Transform>>,
    mut visual_query: Query<&mut Transform, (With<VisualOf>, Without<HasVisual>)>,
) {
    for (sim_transform, has_visual) in sim_query.iter() {
        if let Ok(mut visual_transform) = visual_query.get_mut(has_visual.0) {
            *visual_transform = *sim_transform;
        }
    }
}

/// Simulation entity исчез (DespawnAfter, pickup) → убираем визуал
fn despawn_orphaned_visuals(
    mut commands: Commands,
    visuals: Query<(Entity, &VisualOf)>,
    sim_query: Query<(), With<HasVisual>>,
) {
    for (visual_entity, visual_of) in visuals.iter() {
        if sim_query.get(visual_of.0).is_err() {
            commands.entity(visual_entity).despawn();
        }
    }
}

/// Overlap персонажа с pickup'ом → PickupCollected
fn collect_pickups(
    mut commands: Commands,
    players: Query<(Entity, &Transform), With<Player>>,
    pickups: Query<(Entity, &Transform), With<Pickup>>,
    mut collected: EventWriter<PickupCollected>,
) {
    for (player, player_transform) in players.iter() {
        for (pickup, pickup_transform) in pickups.iter() {
            let offset = pickup_transform.translation - player_transform.translation;
            if Vec2::new(offset.x, offset.z).length() <= PICKUP_RADIUS {
                collected.write(PickupCollected { character: player });
                commands.entity(pickup).despawn();
            }
        }
    }
}

/// Debug линии прицеливания (один frame)
fn draw_aim_debug_lines(mut lines: EventReader<AimDebugLine>, mut gizmos: Gizmos) {
    for line in lines.read() {
        gizmos.line(line.start, line.end, line.source.color());
    }
}

fn draw_aoe_areas(areas: Query<(&AoEAttack, &Transform)>, mut gizmos: Gizmos) {
    for (area, transform) in areas.iter() {
        let isometry = bevy::math::Isometry3d::new(
            transform.translation,
            Quat::from_rotation_x(std::f32::consts::FRAC_PI_2),
        );
        gizmos.circle(isometry, area.radius, Color::srgb(0.9, 0.3, 0.9));
    }
}
