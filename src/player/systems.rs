use bevy::prelude::*;

use super::components::{Player, Stance, Velocity, CROUCH_TRANSITION_SPEED, GROUND_LEVEL};
use crate::input::{ActionEvent, HeldActions, InputAction, MoveInput};
use crate::settings::{PlayerSettings, Settings};
use crate::world::{ROOM_HALF_DEPTH, ROOM_HALF_WIDTH};

/// Horizontal velocity for `input` (x right, y forward) relative to where
/// the player faces. Only yaw matters.
pub fn planar_velocity(forward: Vec3, input: Vec2, speed: f32) -> Vec3 {
    let forward_flat = Vec3::new(forward.x, 0.0, forward.z).normalize_or_zero();
    let right_flat = Vec3::new(-forward.z, 0.0, forward.x).normalize_or_zero();
    (forward_flat * input.y + right_flat * input.x) * speed
}

/// Ground speed for the current sprint and crouch state. Crouching wins.
pub fn movement_speed(settings: &PlayerSettings, sprinting: bool, crouching: bool) -> f32 {
    if crouching {
        settings.walk_speed * settings.crouch_multiplier
    } else if sprinting {
        settings.walk_speed * settings.sprint_multiplier
    } else {
        settings.walk_speed
    }
}

fn is_grounded(transform: &Transform, stance: &Stance) -> bool {
    transform.translation.y <= GROUND_LEVEL + stance.eye_height + 0.01
}

pub fn player_movement(
    move_input: Res<MoveInput>,
    held: Res<HeldActions>,
    mut actions: EventReader<ActionEvent>,
    settings: Res<Settings>,
    mut query: Query<(&Transform, &Stance, &mut Velocity), With<Player>>,
) {
    let Ok((transform, stance, mut velocity)) = query.get_single_mut() else {
        return;
    };

    let speed = movement_speed(
        &settings.player,
        held.is_held(InputAction::Sprint),
        held.is_held(InputAction::Crouch),
    );
    let horizontal = planar_velocity(*transform.forward(), move_input.0, speed);

    // Set horizontal velocity
    velocity.0.x = horizontal.x;
    velocity.0.z = horizontal.z;

    // Jump (only when grounded)
    let jump = actions
        .read()
        .any(|event| event.is_press(InputAction::Jump));
    if jump && is_grounded(transform, stance) {
        velocity.0.y = settings.player.jump_velocity;
    }
}

pub fn update_stance(
    time: Res<Time>,
    held: Res<HeldActions>,
    settings: Res<Settings>,
    mut query: Query<&mut Stance, With<Player>>,
) {
    let Ok(mut stance) = query.get_single_mut() else {
        return;
    };
    let target = if held.is_held(InputAction::Crouch) {
        settings.player.crouch_height
    } else {
        settings.player.height
    };
    let step = CROUCH_TRANSITION_SPEED * time.delta_secs();
    stance.eye_height += (target - stance.eye_height).clamp(-step, step);
}

pub fn apply_gravity(
    time: Res<Time>,
    settings: Res<Settings>,
    mut query: Query<(&Transform, &Stance, &mut Velocity), With<Player>>,
) {
    let Ok((transform, stance, mut velocity)) = query.get_single_mut() else {
        return;
    };

    if !is_grounded(transform, stance) {
        velocity.0.y -= settings.player.gravity * time.delta_secs();
    }
}

pub fn apply_velocity(
    time: Res<Time>,
    mut query: Query<(&mut Transform, &Stance, &mut Velocity), With<Player>>,
) {
    let Ok((mut transform, stance, mut velocity)) = query.get_single_mut() else {
        return;
    };

    // Apply velocity to position
    transform.translation += velocity.0 * time.delta_secs();

    // Ground collision
    if transform.translation.y < GROUND_LEVEL + stance.eye_height {
        transform.translation.y = GROUND_LEVEL + stance.eye_height;
        velocity.0.y = 0.0;
    }

    // Wall collisions (keep player inside room)
    transform.translation.x = transform.translation.x.clamp(-ROOM_HALF_WIDTH, ROOM_HALF_WIDTH);
    transform.translation.z = transform.translation.z.clamp(-ROOM_HALF_DEPTH, ROOM_HALF_DEPTH);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn forward_input_follows_facing() {
        let velocity = planar_velocity(Vec3::NEG_Z, Vec2::new(0.0, 1.0), 5.0);
        assert!((velocity - Vec3::new(0.0, 0.0, -5.0)).length() < 1e-5);
    }

    #[test]
    fn strafing_ignores_pitch() {
        let looking_down = Vec3::new(0.0, -0.7, -0.7);
        let velocity = planar_velocity(looking_down, Vec2::new(1.0, 0.0), 2.0);
        assert!((velocity - Vec3::new(2.0, 0.0, 0.0)).length() < 1e-5);
    }

    #[test]
    fn crouch_beats_sprint() {
        let settings = PlayerSettings::default();
        assert_eq!(movement_speed(&settings, false, false), 5.0);
        assert_eq!(movement_speed(&settings, true, false), 8.0);
        assert_eq!(movement_speed(&settings, true, true), 2.5);
    }
}
