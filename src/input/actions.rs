use std::collections::HashSet;

use bevy::prelude::*;

/// Named input actions dispatched to gameplay and UI.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum InputAction {
    Jump,
    Sprint,
    Crouch,
    Attack,
    Interact,
    Pause,
    Inventory,
    Previous,
    Next,
    Submit,
    Cancel,
    Navigate,
}

/// Action maps that can be switched on and off as a whole.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum InputGroup {
    Player,
    Ui,
}

impl InputAction {
    pub fn groups(self) -> &'static [InputGroup] {
        match self {
            Self::Jump
            | Self::Sprint
            | Self::Crouch
            | Self::Attack
            | Self::Interact
            | Self::Pause
            | Self::Previous
            | Self::Next => &[InputGroup::Player],
            Self::Inventory => &[InputGroup::Player, InputGroup::Ui],
            Self::Submit | Self::Cancel | Self::Navigate => &[InputGroup::Ui],
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActionPhase {
    Pressed,
    Released,
}

/// A discrete press or release of an action.
#[derive(Event, Debug, Clone, Copy, PartialEq, Eq)]
pub struct ActionEvent {
    pub action: InputAction,
    pub phase: ActionPhase,
}

impl ActionEvent {
    pub fn pressed(action: InputAction) -> Self {
        Self {
            action,
            phase: ActionPhase::Pressed,
        }
    }

    pub fn released(action: InputAction) -> Self {
        Self {
            action,
            phase: ActionPhase::Released,
        }
    }

    pub fn is_press(&self, action: InputAction) -> bool {
        self.action == action && self.phase == ActionPhase::Pressed
    }

    pub fn is_release(&self, action: InputAction) -> bool {
        self.action == action && self.phase == ActionPhase::Released
    }
}

/// Which action groups currently receive input.
#[derive(Resource, Debug, Clone, PartialEq, Eq)]
pub struct InputGroups {
    player: bool,
    ui: bool,
}

impl Default for InputGroups {
    fn default() -> Self {
        Self {
            player: true,
            ui: false,
        }
    }
}

impl InputGroups {
    pub fn set(&mut self, group: InputGroup, enabled: bool) {
        match group {
            InputGroup::Player => self.player = enabled,
            InputGroup::Ui => self.ui = enabled,
        }
    }

    pub fn is_enabled(&self, group: InputGroup) -> bool {
        match group {
            InputGroup::Player => self.player,
            InputGroup::Ui => self.ui,
        }
    }

    /// An action is live if any of its groups is enabled.
    pub fn allows(&self, action: InputAction) -> bool {
        action.groups().iter().any(|group| self.is_enabled(*group))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Binding {
    Key(KeyCode),
    Mouse(MouseButton),
}

/// Device buttons mapped to actions. One button may drive several actions.
#[derive(Resource, Debug, Clone)]
pub struct InputBindings {
    pub bindings: Vec<(Binding, InputAction)>,
}

impl Default for InputBindings {
    fn default() -> Self {
        use Binding::{Key, Mouse};

        Self {
            bindings: vec![
                (Key(KeyCode::Space), InputAction::Jump),
                (Key(KeyCode::ShiftLeft), InputAction::Sprint),
                (Key(KeyCode::ControlLeft), InputAction::Crouch),
                (Mouse(MouseButton::Left), InputAction::Attack),
                (Key(KeyCode::KeyE), InputAction::Interact),
                (Key(KeyCode::Escape), InputAction::Pause),
                (Key(KeyCode::Tab), InputAction::Inventory),
                (Key(KeyCode::KeyQ), InputAction::Previous),
                (Key(KeyCode::KeyR), InputAction::Next),
                (Key(KeyCode::Enter), InputAction::Submit),
                (Key(KeyCode::Escape), InputAction::Cancel),
                (Key(KeyCode::ArrowUp), InputAction::Navigate),
                (Key(KeyCode::ArrowDown), InputAction::Navigate),
                (Key(KeyCode::ArrowLeft), InputAction::Navigate),
                (Key(KeyCode::ArrowRight), InputAction::Navigate),
            ],
        }
    }
}

impl InputBindings {
    /// Turns this frame's button edges into action events for live groups.
    pub fn collect(
        &self,
        groups: &InputGroups,
        just_pressed: impl Fn(Binding) -> bool,
        just_released: impl Fn(Binding) -> bool,
    ) -> Vec<ActionEvent> {
        let mut events = Vec::new();
        for (binding, action) in &self.bindings {
            if !groups.allows(*action) {
                continue;
            }
            if just_pressed(*binding) {
                push_unique(&mut events, ActionEvent::pressed(*action));
            }
            if just_released(*binding) {
                push_unique(&mut events, ActionEvent::released(*action));
            }
        }
        events
    }
}

fn push_unique(events: &mut Vec<ActionEvent>, event: ActionEvent) {
    if !events.contains(&event) {
        events.push(event);
    }
}

/// Planar movement, x to the right and y forward, at most unit length.
#[derive(Resource, Debug, Default, Clone, Copy)]
pub struct MoveInput(pub Vec2);

/// Mouse look delta accumulated this frame.
#[derive(Resource, Debug, Default, Clone, Copy)]
pub struct LookInput(pub Vec2);

/// Menu navigation direction.
#[derive(Resource, Debug, Default, Clone, Copy)]
pub struct NavigateInput(pub Vec2);

/// Actions currently held down.
#[derive(Resource, Debug, Default)]
pub struct HeldActions(HashSet<InputAction>);

impl HeldActions {
    pub fn apply(&mut self, event: &ActionEvent) {
        match event.phase {
            ActionPhase::Pressed => {
                self.0.insert(event.action);
            }
            ActionPhase::Released => {
                self.0.remove(&event.action);
            }
        }
    }

    /// Drops held actions whose groups were switched off.
    pub fn retain_allowed(&mut self, groups: &InputGroups) {
        self.0.retain(|action| groups.allows(*action));
    }

    pub fn is_held(&self, action: InputAction) -> bool {
        self.0.contains(&action)
    }
}

/// Unit-length axis from four directional buttons.
pub fn axis(up: bool, down: bool, left: bool, right: bool) -> Vec2 {
    let mut direction = Vec2::ZERO;
    if up {
        direction.y += 1.0;
    }
    if down {
        direction.y -= 1.0;
    }
    if left {
        direction.x -= 1.0;
    }
    if right {
        direction.x += 1.0;
    }
    direction.normalize_or_zero()
}
