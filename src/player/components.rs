use bevy::prelude::*;

/// Marker component for the player entity.
#[derive(Component)]
pub struct Player;

/// Velocity component for physics-based movement.
#[derive(Component, Default)]
pub struct Velocity(pub Vec3);

/// Camera controller for first-person mouse look.
#[derive(Component)]
pub struct CameraController {
    pub pitch: f32,
    pub yaw: f32,
}

impl Default for CameraController {
    fn default() -> Self {
        Self {
            pitch: 0.0,
            yaw: 0.0, // Identity faces -Z
        }
    }
}

/// Current eye height, eased between standing and crouching.
#[derive(Component)]
pub struct Stance {
    pub eye_height: f32,
}

/// How fast the eye height follows a crouch toggle, in meters per second.
pub const CROUCH_TRANSITION_SPEED: f32 = 6.0;

pub const GROUND_LEVEL: f32 = 0.0;
