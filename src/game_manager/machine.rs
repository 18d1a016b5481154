use bevy::prelude::*;

use crate::input::InputGroup;

/// Global game mode deciding which input group is live and which panel shows.
///
/// [`GameManager`] owns the transitions; the Bevy state of the same type
/// mirrors it one frame later so systems can gate on `in_state`.
#[derive(States, Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum GameState {
    #[default]
    Playing,
    Paused,
    Menu,
    Inventory,
    Dialogue,
}

/// Panels owned by the state machine. Menus and dialogue bring their own UI.
#[derive(Component, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Panel {
    Pause,
    Inventory,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointerMode {
    /// Grabbed and hidden for mouse look.
    Captured,
    Free,
}

/// Entry actions of one state.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StateProfile {
    pub gameplay_input: bool,
    pub ui_input: bool,
    pub time_scale: f32,
    /// `None` leaves the pointer as the previous state had it.
    pub pointer: Option<PointerMode>,
    pub panel: Option<Panel>,
}

impl GameState {
    pub fn profile(self) -> StateProfile {
        let ui = StateProfile {
            gameplay_input: false,
            ui_input: true,
            time_scale: 1.0,
            pointer: Some(PointerMode::Free),
            panel: None,
        };
        match self {
            Self::Playing => StateProfile {
                gameplay_input: true,
                ui_input: false,
                pointer: Some(PointerMode::Captured),
                ..ui
            },
            Self::Paused => StateProfile {
                time_scale: 0.0,
                panel: Some(Panel::Pause),
                ..ui
            },
            Self::Menu => ui,
            Self::Inventory => StateProfile {
                panel: Some(Panel::Inventory),
                ..ui
            },
            Self::Dialogue => StateProfile { pointer: None, ..ui },
        }
    }
}

/// Fired once a transition has run its entry actions.
#[derive(Event, Debug, Clone, Copy, PartialEq, Eq)]
pub struct GameStateChanged {
    pub previous: GameState,
    pub current: GameState,
}

/// Engine side effects of state transitions.
pub trait StateHost {
    fn set_input_group(&mut self, group: InputGroup, enabled: bool);
    fn set_time_scale(&mut self, scale: f32);
    fn set_pointer(&mut self, mode: PointerMode);
    fn set_panel_visible(&mut self, panel: Panel, visible: bool);
    fn state_changed(&mut self, change: GameStateChanged);
}

/// The single owner of [`GameState`].
#[derive(Resource, Debug, Default)]
pub struct GameManager {
    current: GameState,
}

impl GameManager {
    pub fn current(&self) -> GameState {
        self.current
    }

    pub fn is_gameplay_active(&self) -> bool {
        self.current == GameState::Playing
    }

    /// Applies the entry actions of the current state without announcing it.
    /// Run once at startup.
    pub fn enter_initial(&self, host: &mut impl StateHost) {
        Self::enter(self.current, host);
    }

    /// Moves to `next`: exit actions of the old state, entry actions of the new
    /// one, then the change notification. Returns false for a self-transition.
    pub fn set_state(&mut self, next: GameState, host: &mut impl StateHost) -> bool {
        let previous = self.current;
        if next == previous {
            return false;
        }

        if let Some(panel) = previous.profile().panel {
            host.set_panel_visible(panel, false);
        }
        self.current = next;
        Self::enter(next, host);

        info!("Game state {:?} -> {:?}", previous, next);
        host.state_changed(GameStateChanged {
            previous,
            current: next,
        });
        true
    }

    fn enter(state: GameState, host: &mut impl StateHost) {
        let profile = state.profile();
        host.set_input_group(InputGroup::Player, profile.gameplay_input);
        host.set_input_group(InputGroup::Ui, profile.ui_input);
        host.set_time_scale(profile.time_scale);
        if let Some(pointer) = profile.pointer {
            host.set_pointer(pointer);
        }
        if let Some(panel) = profile.panel {
            host.set_panel_visible(panel, true);
        }
    }

    pub fn resume(&mut self, host: &mut impl StateHost) -> bool {
        self.set_state(GameState::Playing, host)
    }

    pub fn pause(&mut self, host: &mut impl StateHost) -> bool {
        self.set_state(GameState::Paused, host)
    }

    /// Playing and Paused flip into each other; other states are left alone.
    pub fn toggle_pause(&mut self, host: &mut impl StateHost) -> bool {
        match self.current {
            GameState::Playing => self.pause(host),
            GameState::Paused => self.resume(host),
            _ => false,
        }
    }

    pub fn open_inventory(&mut self, host: &mut impl StateHost) -> bool {
        self.set_state(GameState::Inventory, host)
    }

    pub fn close_inventory(&mut self, host: &mut impl StateHost) -> bool {
        self.set_state(GameState::Playing, host)
    }

    pub fn start_dialogue(&mut self, host: &mut impl StateHost) -> bool {
        self.set_state(GameState::Dialogue, host)
    }

    pub fn end_dialogue(&mut self, host: &mut impl StateHost) -> bool {
        self.set_state(GameState::Playing, host)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Clone, PartialEq)]
    enum HostCall {
        Input(InputGroup, bool),
        TimeScale(f32),
        Pointer(PointerMode),
        Panel(Panel, bool),
        Changed(GameStateChanged),
    }

    #[derive(Default)]
    struct RecordingHost {
        calls: Vec<HostCall>,
    }

    impl StateHost for RecordingHost {
        fn set_input_group(&mut self, group: InputGroup, enabled: bool) {
            self.calls.push(HostCall::Input(group, enabled));
        }

        fn set_time_scale(&mut self, scale: f32) {
            self.calls.push(HostCall::TimeScale(scale));
        }

        fn set_pointer(&mut self, mode: PointerMode) {
            self.calls.push(HostCall::Pointer(mode));
        }

        fn set_panel_visible(&mut self, panel: Panel, visible: bool) {
            self.calls.push(HostCall::Panel(panel, visible));
        }

        fn state_changed(&mut self, change: GameStateChanged) {
            self.calls.push(HostCall::Changed(change));
        }
    }

    #[test]
    fn starts_playing() {
        let manager = GameManager::default();
        assert_eq!(manager.current(), GameState::Playing);
        assert!(manager.is_gameplay_active());
    }

    #[test]
    fn self_transition_does_nothing() {
        let mut manager = GameManager::default();
        let mut host = RecordingHost::default();

        assert!(!manager.set_state(GameState::Playing, &mut host));
        assert!(host.calls.is_empty());
    }

    #[test]
    fn pause_and_resume_mirror_each_other() {
        let mut manager = GameManager::default();
        let mut host = RecordingHost::default();

        assert!(manager.set_state(GameState::Paused, &mut host));
        assert_eq!(
            host.calls,
            vec![
                HostCall::Input(InputGroup::Player, false),
                HostCall::Input(InputGroup::Ui, true),
                HostCall::TimeScale(0.0),
                HostCall::Pointer(PointerMode::Free),
                HostCall::Panel(Panel::Pause, true),
                HostCall::Changed(GameStateChanged {
                    previous: GameState::Playing,
                    current: GameState::Paused,
                }),
            ]
        );

        host.calls.clear();
        assert!(manager.set_state(GameState::Playing, &mut host));
        assert_eq!(
            host.calls,
            vec![
                HostCall::Panel(Panel::Pause, false),
                HostCall::Input(InputGroup::Player, true),
                HostCall::Input(InputGroup::Ui, false),
                HostCall::TimeScale(1.0),
                HostCall::Pointer(PointerMode::Captured),
                HostCall::Changed(GameStateChanged {
                    previous: GameState::Paused,
                    current: GameState::Playing,
                }),
            ]
        );
    }

    #[test]
    fn leaving_inventory_hides_its_panel_before_entering_next() {
        let mut manager = GameManager::default();
        let mut host = RecordingHost::default();
        manager.open_inventory(&mut host);
        assert!(host.calls.contains(&HostCall::Panel(Panel::Inventory, true)));

        host.calls.clear();
        manager.start_dialogue(&mut host);
        assert_eq!(host.calls[0], HostCall::Panel(Panel::Inventory, false));
        assert!(!host
            .calls
            .iter()
            .any(|call| matches!(call, HostCall::Pointer(_))));
        assert_eq!(manager.current(), GameState::Dialogue);
    }

    #[test]
    fn profile_table_matches_states() {
        let menu = GameState::Menu.profile();
        assert!(!menu.gameplay_input && menu.ui_input);
        assert_eq!(menu.time_scale, 1.0);
        assert_eq!(menu.pointer, Some(PointerMode::Free));
        assert_eq!(menu.panel, None);

        let inventory = GameState::Inventory.profile();
        assert_eq!(inventory.time_scale, 1.0);
        assert_eq!(inventory.panel, Some(Panel::Inventory));

        let dialogue = GameState::Dialogue.profile();
        assert_eq!(dialogue.pointer, None);
        assert_eq!(dialogue.panel, None);

        let playing = GameState::Playing.profile();
        assert!(playing.gameplay_input && !playing.ui_input);
    }

    #[test]
    fn toggle_pause_only_between_playing_and_paused() {
        let mut manager = GameManager::default();
        let mut host = RecordingHost::default();

        assert!(manager.toggle_pause(&mut host));
        assert_eq!(manager.current(), GameState::Paused);
        assert!(manager.toggle_pause(&mut host));
        assert_eq!(manager.current(), GameState::Playing);

        manager.open_inventory(&mut host);
        host.calls.clear();
        assert!(!manager.toggle_pause(&mut host));
        assert_eq!(manager.current(), GameState::Inventory);
        assert!(host.calls.is_empty());
    }

    #[test]
    fn convenience_transitions() {
        let mut manager = GameManager::default();
        let mut host = RecordingHost::default();

        manager.start_dialogue(&mut host);
        assert!(!manager.is_gameplay_active());
        manager.end_dialogue(&mut host);
        assert!(manager.is_gameplay_active());
        manager.open_inventory(&mut host);
        manager.close_inventory(&mut host);
        assert_eq!(manager.current(), GameState::Playing);
        manager.pause(&mut host);
        manager.resume(&mut host);
        assert_eq!(manager.current(), GameState::Playing);

        let changes = host
            .calls
            .iter()
            .filter(|call| matches!(call, HostCall::Changed(_)))
            .count();
        assert_eq!(changes, 6);
    }

    #[test]
    fn initial_entry_is_silent() {
        let manager = GameManager::default();
        let mut host = RecordingHost::default();

        manager.enter_initial(&mut host);
        assert!(host.calls.contains(&HostCall::Pointer(PointerMode::Captured)));
        assert!(!host
            .calls
            .iter()
            .any(|call| matches!(call, HostCall::Changed(_))));
    }
}
