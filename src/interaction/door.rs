use bevy::prelude::*;

use super::environment::{Actor, Environment, InteractionNotice};
use super::interactable::Behavior;
use super::tween::RotationTween;

/// Hinged door swinging about its vertical axis.
pub struct Door {
    /// Swing in degrees between closed and open.
    pub open_angle: f32,
    pub animation_speed: f32,
    pub open_prompt: String,
    pub close_prompt: String,
    pub open_sound: Option<String>,
    pub close_sound: Option<String>,
    closed_rotation: Quat,
    rotation: Quat,
    is_open: bool,
    animation: Option<RotationTween>,
}

impl Door {
    pub fn new(closed_rotation: Quat) -> Self {
        Self {
            open_angle: 90.0,
            animation_speed: 2.0,
            open_prompt: "Open door".to_string(),
            close_prompt: "Close door".to_string(),
            open_sound: None,
            close_sound: None,
            closed_rotation,
            rotation: closed_rotation,
            is_open: false,
            animation: None,
        }
    }

    pub fn with_swing(mut self, open_angle: f32, animation_speed: f32) -> Self {
        self.open_angle = open_angle;
        self.animation_speed = animation_speed;
        self
    }

    pub fn with_sounds(mut self, open: impl Into<String>, close: impl Into<String>) -> Self {
        self.open_sound = Some(open.into());
        self.close_sound = Some(close.into());
        self
    }

    pub fn is_open(&self) -> bool {
        self.is_open
    }

    pub fn is_animating(&self) -> bool {
        self.animation.is_some()
    }

    pub fn rotation(&self) -> Quat {
        self.rotation
    }

    fn target_rotation(&self) -> Quat {
        if self.is_open {
            self.closed_rotation * Quat::from_rotation_y(self.open_angle.to_radians())
        } else {
            self.closed_rotation
        }
    }
}

impl Behavior for Door {
    fn can_interact(&self, _actor: &Actor<'_>) -> bool {
        !self.is_animating()
    }

    fn perform(&mut self, entity: Entity, _actor: &mut Actor<'_>, env: &mut dyn Environment) {
        self.is_open = !self.is_open;
        self.animation = Some(RotationTween::new(
            self.rotation,
            self.target_rotation(),
            self.animation_speed,
        ));

        let sound = if self.is_open {
            &self.open_sound
        } else {
            &self.close_sound
        };
        if let Some(clip) = sound {
            env.play_sound(clip);
        }

        env.notify(InteractionNotice::DoorToggled {
            entity,
            open: self.is_open,
        });
    }

    fn prompt_text(&self) -> Option<String> {
        let prompt = if self.is_open {
            &self.close_prompt
        } else {
            &self.open_prompt
        };
        Some(prompt.clone())
    }

    fn tick(&mut self, _entity: Entity, dt: f32, _env: &mut dyn Environment) {
        let Some(animation) = self.animation.as_mut() else {
            return;
        };
        self.rotation = animation.advance(dt);
        if animation.is_finished() {
            self.animation = None;
        }
    }
}
