use bevy::{
    ecs::system::SystemParam,
    prelude::*,
    window::{CursorGrabMode, PrimaryWindow},
};

use super::machine::{GameManager, GameState, GameStateChanged, Panel, PointerMode, StateHost};
use crate::input::{ActionEvent, InputAction, InputGroup, InputGroups};

/// Requests to change the global game state.
#[derive(Event, Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameCommand {
    Set(GameState),
    Resume,
    Pause,
    TogglePause,
    OpenInventory,
    CloseInventory,
    StartDialogue,
    EndDialogue,
}

/// Applies state entry and exit actions to the running app.
#[derive(SystemParam)]
pub struct SceneStateHost<'w, 's> {
    groups: ResMut<'w, InputGroups>,
    time: ResMut<'w, Time<Virtual>>,
    windows: Query<'w, 's, &'static mut Window, With<PrimaryWindow>>,
    panels: Query<'w, 's, (&'static Panel, &'static mut Visibility)>,
    changes: EventWriter<'w, GameStateChanged>,
    mirror: ResMut<'w, NextState<GameState>>,
}

impl StateHost for SceneStateHost<'_, '_> {
    fn set_input_group(&mut self, group: InputGroup, enabled: bool) {
        self.groups.set(group, enabled);
    }

    fn set_time_scale(&mut self, scale: f32) {
        self.time.set_relative_speed(scale);
    }

    fn set_pointer(&mut self, mode: PointerMode) {
        // Headless runs have no window
        let Ok(mut window) = self.windows.get_single_mut() else {
            return;
        };
        match mode {
            PointerMode::Captured => {
                window.cursor_options.grab_mode = CursorGrabMode::Confined;
                window.cursor_options.visible = false;
            }
            PointerMode::Free => {
                window.cursor_options.grab_mode = CursorGrabMode::None;
                window.cursor_options.visible = true;
            }
        }
    }

    fn set_panel_visible(&mut self, panel: Panel, visible: bool) {
        for (kind, mut visibility) in self.panels.iter_mut() {
            if *kind == panel {
                *visibility = if visible {
                    Visibility::Inherited
                } else {
                    Visibility::Hidden
                };
            }
        }
    }

    fn state_changed(&mut self, change: GameStateChanged) {
        self.mirror.set(change.current);
        self.changes.send(change);
    }
}

/// What a UI or gameplay action asks of the state machine in `current`.
pub fn command_for(event: &ActionEvent, current: GameState) -> Option<GameCommand> {
    if event.is_press(InputAction::Pause) {
        return Some(GameCommand::TogglePause);
    }
    if event.is_press(InputAction::Cancel) {
        return match current {
            GameState::Paused => Some(GameCommand::Resume),
            GameState::Inventory => Some(GameCommand::CloseInventory),
            GameState::Dialogue => Some(GameCommand::EndDialogue),
            _ => None,
        };
    }
    if event.is_press(InputAction::Inventory) {
        return match current {
            GameState::Playing => Some(GameCommand::OpenInventory),
            GameState::Inventory => Some(GameCommand::CloseInventory),
            _ => None,
        };
    }
    None
}

pub fn apply_initial_state(manager: Res<GameManager>, mut host: SceneStateHost) {
    manager.enter_initial(&mut host);
}

pub fn route_state_actions(
    mut actions: EventReader<ActionEvent>,
    manager: Res<GameManager>,
    mut requests: EventWriter<GameCommand>,
) {
    for event in actions.read() {
        if let Some(command) = command_for(event, manager.current()) {
            requests.send(command);
        }
    }
}

pub fn apply_game_commands(
    mut requests: EventReader<GameCommand>,
    mut manager: ResMut<GameManager>,
    mut host: SceneStateHost,
) {
    for request in requests.read() {
        let host = &mut host;
        match *request {
            GameCommand::Set(state) => manager.set_state(state, host),
            GameCommand::Resume => manager.resume(host),
            GameCommand::Pause => manager.pause(host),
            GameCommand::TogglePause => manager.toggle_pause(host),
            GameCommand::OpenInventory => manager.open_inventory(host),
            GameCommand::CloseInventory => manager.close_inventory(host),
            GameCommand::StartDialogue => manager.start_dialogue(host),
            GameCommand::EndDialogue => manager.end_dialogue(host),
        };
    }
}

pub fn log_state_changes(mut changes: EventReader<GameStateChanged>) {
    for change in changes.read() {
        debug!("Now in {:?} (was {:?})", change.current, change.previous);
    }
}
