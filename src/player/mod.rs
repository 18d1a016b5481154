pub mod components;
pub mod systems;

use bevy::prelude::*;

pub use components::{CameraController, Player, Stance, Velocity};

use crate::game_manager::GameState;
use systems::{apply_gravity, apply_velocity, player_movement, update_stance};

pub struct PlayerPlugin;

impl Plugin for PlayerPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(
            Update,
            (player_movement, update_stance, apply_gravity, apply_velocity)
                .chain()
                .run_if(in_state(GameState::Playing)),
        );
    }
}
