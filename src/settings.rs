use std::path::{Path, PathBuf};

use bevy::prelude::*;
use serde::{Deserialize, Serialize};

pub const SETTINGS_PATH: &str = "assets/settings.json";

#[derive(Debug, thiserror::Error)]
pub enum SettingsError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("failed to parse {path}: {source}")]
    Parse {
        path: PathBuf,
        source: serde_json::Error,
    },
}

/// Movement and look tuning.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlayerSettings {
    pub walk_speed: f32,
    pub sprint_multiplier: f32,
    pub crouch_multiplier: f32,
    pub jump_velocity: f32,
    pub gravity: f32,
    pub height: f32,
    pub crouch_height: f32,
    pub mouse_sensitivity: f32,
    /// Radians; just under 90 degrees keeps the view from flipping.
    pub pitch_limit: f32,
}

impl Default for PlayerSettings {
    fn default() -> Self {
        Self {
            walk_speed: 5.0,
            sprint_multiplier: 1.6,
            crouch_multiplier: 0.5,
            jump_velocity: 8.0,
            gravity: 20.0,
            height: 1.8,
            crouch_height: 1.2,
            mouse_sensitivity: 0.003,
            pitch_limit: 1.5,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct InteractionSettings {
    /// Length of the targeting ray.
    pub max_distance: f32,
    /// Radius of the sphere each interactable is hit-tested as.
    pub hit_radius: f32,
    pub door_animation_speed: f32,
    pub lever_animation_speed: f32,
    pub button_hold_duration: f32,
    pub button_auto_reset: f32,
}

impl Default for InteractionSettings {
    fn default() -> Self {
        Self {
            max_distance: 4.0,
            hit_radius: 0.4,
            door_animation_speed: 2.0,
            lever_animation_speed: 3.0,
            button_hold_duration: 1.0,
            button_auto_reset: 2.0,
        }
    }
}

#[derive(Resource, Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub player: PlayerSettings,
    pub interaction: InteractionSettings,
}

impl Settings {
    pub fn load(path: impl AsRef<Path>) -> Result<Self, SettingsError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|source| SettingsError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let mut settings: Settings =
            serde_json::from_str(&text).map_err(|source| SettingsError::Parse {
                path: path.to_path_buf(),
                source,
            })?;
        settings.sanitize();
        Ok(settings)
    }

    /// Loads settings, falling back to defaults when the file is missing or
    /// broken.
    pub fn load_or_default(path: impl AsRef<Path>) -> Self {
        match Self::load(path) {
            Ok(settings) => settings,
            Err(SettingsError::Io { path, source })
                if source.kind() == std::io::ErrorKind::NotFound =>
            {
                info!("No settings at {}, using defaults", path.display());
                Self::default()
            }
            Err(e) => {
                warn!("{}; using defaults", e);
                Self::default()
            }
        }
    }

    /// Replaces values that must be positive with their defaults. Returns how
    /// many fields were replaced.
    pub fn sanitize(&mut self) -> usize {
        let player = PlayerSettings::default();
        let interaction = InteractionSettings::default();
        let mut fixed = 0;

        let mut check = |name: &str, value: &mut f32, fallback: f32| {
            if !(value.is_finite() && *value > 0.0) {
                warn!("Setting {} must be positive, got {}; using {}", name, value, fallback);
                *value = fallback;
                fixed += 1;
            }
        };

        check("player.walk_speed", &mut self.player.walk_speed, player.walk_speed);
        check(
            "player.sprint_multiplier",
            &mut self.player.sprint_multiplier,
            player.sprint_multiplier,
        );
        check(
            "player.crouch_multiplier",
            &mut self.player.crouch_multiplier,
            player.crouch_multiplier,
        );
        check("player.gravity", &mut self.player.gravity, player.gravity);
        check("player.height", &mut self.player.height, player.height);
        check("player.crouch_height", &mut self.player.crouch_height, player.crouch_height);
        check(
            "player.mouse_sensitivity",
            &mut self.player.mouse_sensitivity,
            player.mouse_sensitivity,
        );
        check("player.pitch_limit", &mut self.player.pitch_limit, player.pitch_limit);
        check(
            "interaction.max_distance",
            &mut self.interaction.max_distance,
            interaction.max_distance,
        );
        check("interaction.hit_radius", &mut self.interaction.hit_radius, interaction.hit_radius);
        check(
            "interaction.door_animation_speed",
            &mut self.interaction.door_animation_speed,
            interaction.door_animation_speed,
        );
        check(
            "interaction.lever_animation_speed",
            &mut self.interaction.lever_animation_speed,
            interaction.lever_animation_speed,
        );
        check(
            "interaction.button_auto_reset",
            &mut self.interaction.button_auto_reset,
            interaction.button_auto_reset,
        );

        // Zero is a valid hold: it completes on the next frame.
        if !(self.interaction.button_hold_duration >= 0.0) {
            warn!(
                "Setting interaction.button_hold_duration must not be negative; using {}",
                interaction.button_hold_duration
            );
            self.interaction.button_hold_duration = interaction.button_hold_duration;
            fixed += 1;
        }
        fixed
    }
}

pub struct SettingsPlugin;

impl Plugin for SettingsPlugin {
    fn build(&self, app: &mut App) {
        app.insert_resource(Settings::load_or_default(SETTINGS_PATH));
    }
}
