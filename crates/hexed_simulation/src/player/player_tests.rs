//! Tests for twin-stick character state (aim, dash, AoE, items).

#[cfg(test)]
mod tests {
    use bevy::prelude::*;

    use super::super::components::*;
    use crate::config::CharacterConfig;
    use crate::movement::{ground_to_world, WORLD_FORWARD, WORLD_RIGHT};

    fn assert_vec3_near(actual: Vec3, expected: Vec3) {
        assert!(
            (actual - expected).length() < 1e-3,
            "expected {:?}, got {:?}",
            expected,
            actual
        );
    }

    fn character_with_items(items: u32, cooldown: f32) -> TwinStickCharacter {
        let config = CharacterConfig {
            starting_items: items,
            aoe_cooldown_time: cooldown,
            ..Default::default()
        };
        TwinStickCharacter::from_config(&config)
    }

    #[test]
    fn test_stick_aim_angle() {
        let cases = [
            (Vec2::new(1.0, 0.0), 180.0),
            (Vec2::new(0.0, 1.0), 90.0),
            (Vec2::new(-1.0, 0.0), 0.0),
            (Vec2::new(1.0, 1.0), 135.0),
            (Vec2::new(0.0, -1.0), -90.0),
        ];

        for (axis, expected) in cases {
            let mut aim = AimState::default();
            assert!(aim.stick_aim(axis));
            assert!(
                (aim.aim_angle - expected).abs() < 1e-4,
                "axis {:?}: expected {}, got {}",
                axis,
                expected,
                aim.aim_angle
            );
            assert!(!aim.using_mouse);
        }
    }

    #[test]
    fn test_zero_stick_keeps_aim_and_mode() {
        let mut aim = AimState {
            aim_angle: 42.0,
            using_mouse: true,
        };

        assert!(!aim.stick_aim(Vec2::ZERO));
        assert_eq!(aim.aim_angle, 42.0);
        assert!(aim.using_mouse);
    }

    #[test]
    fn test_stick_aim_leaves_mouse_mode() {
        let mut aim = AimState::default();
        aim.enter_mouse_mode();
        assert!(aim.using_mouse);

        aim.stick_aim(Vec2::new(0.3, 0.4));
        assert!(!aim.using_mouse);
    }

    #[test]
    fn test_move_aim_faces_movement_direction() {
        // Move input передаёт зеркальный вектор (-x, y)
        for axis in [Vec2::new(1.0, 0.0), Vec2::new(0.0, 1.0), Vec2::new(-0.5, 0.5)] {
            let mut aim = AimState::default();
            aim.aim_with_axes(-axis.x, axis.y);

            let facing = yaw_direction(aim.aim_angle);
            assert_vec3_near(facing, ground_to_world(axis).normalize());
        }
    }

    #[test]
    fn test_yaw_direction_axes() {
        assert_vec3_near(yaw_direction(0.0), WORLD_FORWARD);
        assert_vec3_near(yaw_direction(90.0), WORLD_RIGHT);
        assert_vec3_near(yaw_direction(180.0), -WORLD_FORWARD);
    }

    #[test]
    fn test_facing_rotation_matches_yaw_direction() {
        for yaw in [0.0, 45.0, 90.0, 135.0, -120.0] {
            let rotation = facing_rotation(Quat::IDENTITY, yaw);
            assert_vec3_near(rotation * Vec3::NEG_Z, yaw_direction(yaw));
        }
    }

    #[test]
    fn test_facing_rotation_preserves_pitch() {
        let pitch = 0.3;
        let current = Quat::from_euler(EulerRot::YXZ, 1.0, pitch, 0.0);

        let rotation = facing_rotation(current, 90.0);
        let (yaw, new_pitch, roll) = rotation.to_euler(EulerRot::YXZ);

        assert!((yaw + 90.0_f32.to_radians()).abs() < 1e-4);
        assert!((new_pitch - pitch).abs() < 1e-4);
        assert!(roll.abs() < 1e-4);
    }

    #[test]
    fn test_look_at_yaw() {
        let from = Vec3::new(10.0, 0.0, 10.0);

        let yaw = look_at_yaw(from, from + WORLD_RIGHT * 50.0).unwrap();
        assert!((yaw - 90.0).abs() < 1e-4);

        let yaw = look_at_yaw(from, from + WORLD_FORWARD * 50.0 + Vec3::Y * 30.0).unwrap();
        assert!(yaw.abs() < 1e-4);

        assert!(look_at_yaw(from, from + Vec3::Y * 5.0).is_none());
    }

    #[test]
    fn test_dash_clamps_each_axis() {
        let mut character = character_with_items(0, 5.0);
        character.record_move(Vec2::new(5.0, -5.0));

        assert_eq!(character.dash_direction(), Vec2::new(1.0, -1.0));
        assert_vec3_near(
            character.dash_launch_velocity(1500.0),
            (WORLD_FORWARD - WORLD_RIGHT) * 1500.0,
        );
    }

    #[test]
    fn test_dash_without_move_input_is_zero() {
        let character = character_with_items(0, 5.0);
        assert_eq!(character.dash_launch_velocity(1500.0), Vec3::ZERO);
    }

    #[test]
    fn test_aoe_refused_without_items() {
        let mut character = character_with_items(0, 5.0);

        assert!(!character.try_aoe_attack(10.0));
        assert_eq!(character.items, 0);
        assert_eq!(character.last_aoe_time, None);
    }

    #[test]
    fn test_first_aoe_at_time_zero() {
        let mut character = character_with_items(1, 5.0);

        assert!(character.try_aoe_attack(0.0));
        assert_eq!(character.items, 0);
        assert_eq!(character.last_aoe_time, Some(0.0));
    }

    #[test]
    fn test_aoe_cooldown_scenario() {
        let mut character = character_with_items(2, 5.0);

        assert!(character.try_aoe_attack(0.0));
        assert_eq!(character.items, 1);

        // В cooldown: ни items, ни timestamp не меняются
        assert!(!character.try_aoe_attack(3.0));
        assert_eq!(character.items, 1);
        assert_eq!(character.last_aoe_time, Some(0.0));

        assert!(character.try_aoe_attack(6.0));
        assert_eq!(character.items, 0);
        assert_eq!(character.last_aoe_time, Some(6.0));
    }

    #[test]
    fn test_aoe_cooldown_is_strict() {
        let mut character = character_with_items(2, 5.0);

        assert!(character.try_aoe_attack(1.0));
        assert!(!character.try_aoe_attack(6.0));
        assert!(character.try_aoe_attack(6.5));
    }

    #[test]
    fn test_pickup_then_aoe_nets_zero() {
        let mut character = character_with_items(3, 5.0);

        assert_eq!(character.add_pickup(), 4);
        assert!(character.try_aoe_attack(0.0));
        assert_eq!(character.items, 3);
    }

    #[test]
    fn test_knockback_drops_vertical() {
        let knockback = knockback_velocity(Vec3::new(0.6, 0.9, -0.8), 1000.0);
        assert_vec3_near(knockback, Vec3::new(600.0, 0.0, -800.0));
    }

    #[test]
    fn test_projectile_spawns_in_front() {
        let character = Transform::from_xyz(10.0, 0.0, 20.0);
        let spawn = projectile_spawn_transform(&character, 100.0);
        assert_vec3_near(spawn.translation, Vec3::new(10.0, 0.0, -80.0));

        let turned = Transform::from_xyz(0.0, 0.0, 0.0).with_rotation(facing_rotation(Quat::IDENTITY, 90.0));
        let spawn = projectile_spawn_transform(&turned, 100.0);
        assert_vec3_near(spawn.translation, WORLD_RIGHT * 100.0);
        assert_eq!(spawn.rotation, turned.rotation);
    }
}
