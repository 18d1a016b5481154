use bevy::color::Mix;
use bevy::prelude::*;

use super::environment::{Actor, Environment, InteractionNotice};
use super::interactable::Behavior;

/// Seconds before a non-latching button switches itself off.
pub const AUTO_RESET_DELAY: f32 = 2.0;

/// Button that is held down to toggle.
///
/// A latching button (`stays_activated`) refuses further presses once on,
/// until [`HoldButton::reset`] is called. Otherwise it switches itself back
/// off after `auto_reset_delay`.
pub struct HoldButton {
    pub stays_activated: bool,
    pub auto_reset_delay: f32,
    /// How far the cap travels when fully pressed.
    pub press_depth: f32,
    pub idle_color: Color,
    pub active_color: Color,
    pub press_sound: Option<String>,
    is_activated: bool,
    press: f32,
    auto_reset: Option<Timer>,
}

impl HoldButton {
    pub fn new(stays_activated: bool) -> Self {
        Self {
            stays_activated,
            auto_reset_delay: AUTO_RESET_DELAY,
            press_depth: 0.05,
            idle_color: Color::srgb(0.7, 0.15, 0.15),
            active_color: Color::srgb(0.15, 0.8, 0.2),
            press_sound: None,
            is_activated: false,
            press: 0.0,
            auto_reset: None,
        }
    }

    pub fn with_sound(mut self, clip: impl Into<String>) -> Self {
        self.press_sound = Some(clip.into());
        self
    }

    pub fn is_activated(&self) -> bool {
        self.is_activated
    }

    /// Switches the button off and cancels any pending auto-deactivation.
    pub fn reset(&mut self, entity: Entity, env: &mut dyn Environment) {
        self.auto_reset = None;
        self.press = 0.0;
        if self.is_activated {
            self.set_activated(entity, false, env);
        }
    }

    /// How pressed the cap looks, from 0 (up) to 1 (down).
    pub fn press_amount(&self) -> f32 {
        if self.is_activated {
            1.0
        } else {
            self.press
        }
    }

    /// Cap displacement relative to its rest position.
    pub fn press_offset(&self) -> Vec3 {
        Vec3::NEG_Y * self.press_depth * self.press_amount()
    }

    pub fn color(&self) -> Color {
        let idle = self.idle_color.to_srgba();
        Color::Srgba(idle.mix(&self.active_color.to_srgba(), self.press_amount()))
    }

    fn set_activated(&mut self, entity: Entity, activated: bool, env: &mut dyn Environment) {
        self.is_activated = activated;
        env.notify(InteractionNotice::ButtonToggled { entity, activated });
    }
}

#[cfg(test)]
impl HoldButton {
    pub fn has_pending_reset(&self) -> bool {
        self.auto_reset.is_some()
    }
}

impl Behavior for HoldButton {
    fn can_interact(&self, _actor: &Actor<'_>) -> bool {
        !(self.is_activated && self.stays_activated)
    }

    fn perform(&mut self, entity: Entity, _actor: &mut Actor<'_>, env: &mut dyn Environment) {
        if let Some(clip) = &self.press_sound {
            env.play_sound(clip);
        }
        self.press = 0.0;
        if self.is_activated {
            self.auto_reset = None;
            self.set_activated(entity, false, env);
            return;
        }
        self.set_activated(entity, true, env);
        if !self.stays_activated {
            self.auto_reset = Some(Timer::from_seconds(
                self.auto_reset_delay.max(0.0),
                TimerMode::Once,
            ));
        }
    }

    fn hold_progress(&mut self, progress: f32) {
        self.press = progress;
    }

    fn tick(&mut self, entity: Entity, dt: f32, env: &mut dyn Environment) {
        let Some(timer) = self.auto_reset.as_mut() else {
            return;
        };
        timer.tick(std::time::Duration::from_secs_f32(dt));
        if timer.finished() {
            self.auto_reset = None;
            self.set_activated(entity, false, env);
        }
    }
}
