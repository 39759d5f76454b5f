//! Входящий урон: knockback + damage reaction hook
//!
//! Hook = entity observer. По умолчанию observer'ов нет (пустое поведение);
//! кастомная реакция вешается на персонажа:
//! ```ignore
//! commands.entity(player).observe(|trigger: Trigger<PlayerDamaged>| { ... });
//! ```

use bevy::prelude::*;

use super::components::{knockback_velocity, TwinStickCharacter};
use crate::config::CharacterConfig;
use crate::debug_helper::screen_log;
use crate::movement::PhysicsBody;

/// Event: урон по персонажу (от врагов / ловушек / host physics)
#[derive(Event, Debug, Clone, Copy)]
pub struct DamageTaken {
    pub target: Entity,
    pub amount: f32,
    /// World-space направление удара
    pub direction: Vec3,
}

/// Trigger: damage reaction hook (после knockback)
#[derive(Event, Debug, Clone, Copy)]
pub struct PlayerDamaged {
    pub amount: f32,
    pub knockback: Vec3,
}

/// System: DamageTaken → knockback launch → PlayerDamaged trigger
pub fn handle_player_damage(
    mut commands: Commands,
    mut damage_events: EventReader<DamageTaken>,
    mut characters: Query<(&CharacterConfig, &mut PhysicsBody), With<TwinStickCharacter>>,
) {
    for damage in damage_events.read() {
        let Ok((tuning, mut body)) = characters.get_mut(damage.target) else {
            continue;
        };

        let knockback = knockback_velocity(damage.direction, tuning.knockback_strength);

        screen_log("HandleDamage");
        body.launch(knockback, true, true);

        commands.trigger_targets(
            PlayerDamaged {
                amount: damage.amount,
                knockback,
            },
            damage.target,
        );
    }
}
