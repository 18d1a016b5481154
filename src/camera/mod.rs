pub mod systems;

use bevy::prelude::*;

use crate::game_manager::GameState;
use systems::{center_cursor, mouse_look};

pub struct CameraPlugin;

impl Plugin for CameraPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(
            Update,
            (mouse_look, center_cursor).run_if(in_state(GameState::Playing)),
        );
    }
}
