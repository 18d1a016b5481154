use bevy::{prelude::*, window::CursorGrabMode};

use crate::input::LookInput;
use crate::player::{CameraController, Player};
use crate::settings::Settings;

/// Applies a mouse delta to yaw and pitch, keeping pitch within `pitch_limit`.
pub fn apply_look(
    controller: &mut CameraController,
    delta: Vec2,
    sensitivity: f32,
    pitch_limit: f32,
) {
    controller.yaw -= delta.x * sensitivity;
    controller.pitch -= delta.y * sensitivity;

    // Clamp pitch to prevent flipping
    controller.pitch = controller.pitch.clamp(-pitch_limit, pitch_limit);
}

pub fn mouse_look(
    look_input: Res<LookInput>,
    settings: Res<Settings>,
    mut query: Query<(&mut Transform, &mut CameraController), With<Player>>,
) {
    let Ok((mut transform, mut controller)) = query.get_single_mut() else {
        return;
    };

    apply_look(
        &mut controller,
        look_input.0,
        settings.player.mouse_sensitivity,
        settings.player.pitch_limit,
    );

    // Apply rotation
    transform.rotation = Quat::from_euler(EulerRot::YXZ, controller.yaw, controller.pitch, 0.0);
}

pub fn center_cursor(mut windows: Query<&mut Window>) {
    let Ok(mut window) = windows.get_single_mut() else {
        return;
    };

    // Only center cursor when it's grabbed and window is focused
    if window.cursor_options.grab_mode != CursorGrabMode::None && window.focused {
        let center = Vec2::new(window.width() / 2.0, window.height() / 2.0);
        window.set_cursor_position(Some(center));
    }
}
