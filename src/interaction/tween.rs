use bevy::prelude::*;

/// Multi-frame rotation from one orientation to another.
///
/// Progress runs from 0 to 1 over one second at `speed == 1.0`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RotationTween {
    pub from: Quat,
    pub to: Quat,
    pub progress: f32,
    pub speed: f32,
}

impl RotationTween {
    pub fn new(from: Quat, to: Quat, speed: f32) -> Self {
        Self {
            from,
            to,
            progress: 0.0,
            speed,
        }
    }

    /// Steps the tween and returns the orientation for this frame.
    pub fn advance(&mut self, dt: f32) -> Quat {
        self.progress = (self.progress + dt * self.speed).min(1.0);
        if self.is_finished() {
            self.to
        } else {
            self.from.slerp(self.to, self.progress)
        }
    }

    pub fn is_finished(&self) -> bool {
        self.progress >= 1.0
    }
}
