pub mod machine;
pub mod systems;

use bevy::prelude::*;

pub use machine::{GameManager, GameState, GameStateChanged, Panel};
pub use systems::GameCommand;

use systems::{apply_game_commands, apply_initial_state, log_state_changes, route_state_actions};

pub struct GameManagerPlugin;

impl Plugin for GameManagerPlugin {
    fn build(&self, app: &mut App) {
        app.init_state::<GameState>()
            .init_resource::<GameManager>()
            .add_event::<GameCommand>()
            .add_event::<GameStateChanged>()
            .add_systems(PostStartup, apply_initial_state)
            .add_systems(
                Update,
                (route_state_actions, apply_game_commands, log_state_changes).chain(),
            );
    }
}
