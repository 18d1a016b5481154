use bevy::prelude::*;

use super::environment::{Actor, Environment, InteractionNotice};
use super::interactable::Behavior;
use super::tween::RotationTween;

/// Two-position lever that switches connected objects on and off.
pub struct Lever {
    /// Handle throw in degrees about the local X axis.
    pub throw_angle: f32,
    pub animation_speed: f32,
    pub activate_prompt: String,
    pub deactivate_prompt: String,
    pub toggle_sound: Option<String>,
    /// Objects made active while the lever is on and inactive while off.
    pub connected: Vec<Entity>,
    rest_rotation: Quat,
    rotation: Quat,
    is_activated: bool,
    animation: Option<RotationTween>,
}

impl Lever {
    pub fn new(rest_rotation: Quat) -> Self {
        Self {
            throw_angle: -60.0,
            animation_speed: 3.0,
            activate_prompt: "Pull lever".to_string(),
            deactivate_prompt: "Reset lever".to_string(),
            toggle_sound: None,
            connected: Vec::new(),
            rest_rotation,
            rotation: rest_rotation,
            is_activated: false,
            animation: None,
        }
    }

    pub fn connect(mut self, object: Entity) -> Self {
        self.connected.push(object);
        self
    }

    pub fn with_sound(mut self, clip: impl Into<String>) -> Self {
        self.toggle_sound = Some(clip.into());
        self
    }

    pub fn is_activated(&self) -> bool {
        self.is_activated
    }

    pub fn is_animating(&self) -> bool {
        self.animation.is_some()
    }

    pub fn rotation(&self) -> Quat {
        self.rotation
    }

    /// Puts the lever straight into a state, e.g. when restoring a save.
    /// Does nothing while the handle is moving.
    pub fn set_state(&mut self, activated: bool, env: &mut dyn Environment) -> bool {
        if self.is_animating() {
            return false;
        }
        self.is_activated = activated;
        self.rotation = self.target_rotation();
        self.apply_connected(env);
        true
    }

    fn target_rotation(&self) -> Quat {
        if self.is_activated {
            self.rest_rotation * Quat::from_rotation_x(self.throw_angle.to_radians())
        } else {
            self.rest_rotation
        }
    }

    fn apply_connected(&self, env: &mut dyn Environment) {
        for object in &self.connected {
            env.set_active(*object, self.is_activated);
        }
    }
}

impl Behavior for Lever {
    fn can_interact(&self, _actor: &Actor<'_>) -> bool {
        !self.is_animating()
    }

    fn perform(&mut self, entity: Entity, _actor: &mut Actor<'_>, env: &mut dyn Environment) {
        self.is_activated = !self.is_activated;
        self.animation = Some(RotationTween::new(
            self.rotation,
            self.target_rotation(),
            self.animation_speed,
        ));
        if let Some(clip) = &self.toggle_sound {
            env.play_sound(clip);
        }
        self.apply_connected(env);
        env.notify(InteractionNotice::LeverToggled {
            entity,
            activated: self.is_activated,
        });
    }

    fn prompt_text(&self) -> Option<String> {
        let prompt = if self.is_activated {
            &self.deactivate_prompt
        } else {
            &self.activate_prompt
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
