pub mod actions;
pub mod systems;

use bevy::{input::InputSystem, prelude::*};

pub use actions::{
    ActionEvent, HeldActions, InputAction, InputBindings, InputGroup, InputGroups, LookInput,
    MoveInput, NavigateInput,
};

use systems::{dispatch_actions, read_axes, track_held_actions};

pub struct ActionInputPlugin;

impl Plugin for ActionInputPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<InputBindings>()
            .init_resource::<InputGroups>()
            .init_resource::<HeldActions>()
            .init_resource::<MoveInput>()
            .init_resource::<LookInput>()
            .init_resource::<NavigateInput>()
            .add_event::<ActionEvent>()
            .add_systems(
                PreUpdate,
                (dispatch_actions, read_axes, track_held_actions)
                    .chain()
                    .after(InputSystem),
            );
    }
}
