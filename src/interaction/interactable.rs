use bevy::prelude::*;

use super::collectible::CollectibleItem;
use super::door::Door;
use super::environment::{Actor, Environment, InteractionNotice};
use super::hold_button::HoldButton;
use super::lever::Lever;

/// Default maximum distance an interactable can be targeted from.
pub const DEFAULT_RANGE: f32 = 3.0;

/// Smallest range accepted; lower values are clamped up to it.
pub const MIN_RANGE: f32 = 0.01;

/// Variant behaviour plugged into an [`Interactable`].
pub trait Behavior: Send + Sync + 'static {
    fn can_interact(&self, _actor: &Actor<'_>) -> bool {
        true
    }

    /// The variant effect. Only called once `can_interact` passed.
    fn perform(&mut self, entity: Entity, actor: &mut Actor<'_>, env: &mut dyn Environment);

    /// Continuous feedback while a hold is in progress, `progress` in `[0, 1]`.
    fn hold_progress(&mut self, _progress: f32) {}

    /// Prompt derived from variant state, if any.
    fn prompt_text(&self) -> Option<String> {
        None
    }

    /// Per-frame stepping for animations and timers.
    fn tick(&mut self, _entity: Entity, _dt: f32, _env: &mut dyn Environment) {}
}

/// The known interactable variants, plus an open slot for anything else.
pub enum InteractableKind {
    Door(Door),
    Lever(Lever),
    HoldButton(HoldButton),
    Collectible(CollectibleItem),
    Custom(Box<dyn Behavior>),
}

impl InteractableKind {
    fn behavior(&self) -> &dyn Behavior {
        match self {
            Self::Door(door) => door,
            Self::Lever(lever) => lever,
            Self::HoldButton(button) => button,
            Self::Collectible(item) => item,
            Self::Custom(behavior) => behavior.as_ref(),
        }
    }

    fn behavior_mut(&mut self) -> &mut dyn Behavior {
        match self {
            Self::Door(door) => door,
            Self::Lever(lever) => lever,
            Self::HoldButton(button) => button,
            Self::Collectible(item) => item,
            Self::Custom(behavior) => behavior.as_mut(),
        }
    }
}

/// An object in the scene the player can target and act upon.
#[derive(Component)]
pub struct Interactable {
    pub prompt: String,
    pub requires_hold: bool,
    pub normal_color: Color,
    pub hover_color: Color,
    pub kind: InteractableKind,
    range: f32,
    hold_duration: f32,
    highlighted: bool,
}

impl Interactable {
    pub fn new(prompt: impl Into<String>, kind: InteractableKind) -> Self {
        Self {
            prompt: prompt.into(),
            requires_hold: false,
            normal_color: Color::srgb(0.6, 0.6, 0.6),
            hover_color: Color::srgb(0.9, 0.85, 0.5),
            kind,
            range: DEFAULT_RANGE,
            hold_duration: 0.0,
            highlighted: false,
        }
    }

    pub fn door(door: Door) -> Self {
        Self::new("Open door", InteractableKind::Door(door))
    }

    pub fn lever(lever: Lever) -> Self {
        Self::new("Pull lever", InteractableKind::Lever(lever))
    }

    pub fn hold_button(button: HoldButton, hold_duration: f32) -> Self {
        Self::new("Hold to press", InteractableKind::HoldButton(button)).with_hold(hold_duration)
    }

    pub fn collectible(item: CollectibleItem) -> Self {
        let prompt = format!("Pick up {}", item.item_name);
        Self::new(prompt, InteractableKind::Collectible(item))
    }

    pub fn with_range(mut self, range: f32) -> Self {
        self.set_range(range);
        self
    }

    /// Makes the interaction require a sustained press of `duration` seconds.
    pub fn with_hold(mut self, duration: f32) -> Self {
        self.requires_hold = true;
        self.hold_duration = duration.max(0.0);
        self
    }

    pub fn with_colors(mut self, normal: Color, hover: Color) -> Self {
        self.normal_color = normal;
        self.hover_color = hover;
        self
    }

    pub fn range(&self) -> f32 {
        self.range
    }

    pub fn set_range(&mut self, range: f32) {
        self.range = range.max(MIN_RANGE);
    }

    pub fn hold_duration(&self) -> f32 {
        self.hold_duration
    }

    pub fn can_interact(&self, actor: &Actor<'_>) -> bool {
        self.kind.behavior().can_interact(actor)
    }

    /// Runs the interaction if permitted. Returns whether it ran.
    pub fn interact(
        &mut self,
        entity: Entity,
        actor: &mut Actor<'_>,
        env: &mut dyn Environment,
    ) -> bool {
        if !self.can_interact(actor) {
            return false;
        }
        env.notify(InteractionNotice::BeforeInteract(entity));
        self.kind.behavior_mut().perform(entity, actor, env);
        env.notify(InteractionNotice::AfterInteract(entity));
        true
    }

    pub fn start_highlight(&mut self, entity: Entity, env: &mut dyn Environment) {
        if self.highlighted {
            return;
        }
        self.highlighted = true;
        env.notify(InteractionNotice::HighlightStarted(entity));
    }

    pub fn stop_highlight(&mut self, entity: Entity, env: &mut dyn Environment) {
        if !self.highlighted {
            return;
        }
        self.highlighted = false;
        env.notify(InteractionNotice::HighlightEnded(entity));
    }

    pub fn hold_progress(&mut self, progress: f32) {
        self.kind.behavior_mut().hold_progress(progress.clamp(0.0, 1.0));
    }

    pub fn prompt_text(&self) -> String {
        self.kind
            .behavior()
            .prompt_text()
            .unwrap_or_else(|| self.prompt.clone())
    }

    pub fn tick(&mut self, entity: Entity, dt: f32, env: &mut dyn Environment) {
        self.kind.behavior_mut().tick(entity, dt, env);
    }

    /// Colour the object should currently be drawn with.
    pub fn display_color(&self) -> Color {
        if self.highlighted {
            return self.hover_color;
        }
        match &self.kind {
            InteractableKind::HoldButton(button) => button.color(),
            _ => self.normal_color,
        }
    }

    pub fn as_lever_mut(&mut self) -> Option<&mut Lever> {
        match &mut self.kind {
            InteractableKind::Lever(lever) => Some(lever),
            _ => None,
        }
    }

    pub fn as_button_mut(&mut self) -> Option<&mut HoldButton> {
        match &mut self.kind {
            InteractableKind::HoldButton(button) => Some(button),
            _ => None,
        }
    }
}

#[cfg(test)]
impl Interactable {
    pub fn is_highlighted(&self) -> bool {
        self.highlighted
    }

    pub fn as_door(&self) -> Option<&Door> {
        match &self.kind {
            InteractableKind::Door(door) => Some(door),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::interaction::testing::{Counter, RecordingEnvironment};

    fn entity() -> Entity {
        Entity::from_raw(7)
    }

    #[test]
    fn highlight_transitions_notify_once() {
        let mut env = RecordingEnvironment::default();
        let mut object =
            Interactable::new("Use", InteractableKind::Custom(Box::new(Counter::default())));

        object.start_highlight(entity(), &mut env);
        object.start_highlight(entity(), &mut env);
        assert!(object.is_highlighted());
        object.stop_highlight(entity(), &mut env);
        object.stop_highlight(entity(), &mut env);
        assert!(!object.is_highlighted());

        assert_eq!(
            env.notices,
            vec![
                InteractionNotice::HighlightStarted(entity()),
                InteractionNotice::HighlightEnded(entity()),
            ]
        );
    }

    #[test]
    fn stop_without_highlight_is_silent() {
        let mut env = RecordingEnvironment::default();
        let mut object =
            Interactable::new("Use", InteractableKind::Custom(Box::new(Counter::default())));

        object.stop_highlight(entity(), &mut env);
        assert!(env.notices.is_empty());
    }

    #[test]
    fn interact_wraps_effect_in_before_and_after() {
        let mut env = RecordingEnvironment::default();
        let counter = Counter::default();
        let runs = counter.runs.clone();
        let mut object = Interactable::new("Use", InteractableKind::Custom(Box::new(counter)));
        let mut actor = Actor::new(Entity::from_raw(1));

        assert!(object.interact(entity(), &mut actor, &mut env));
        assert_eq!(runs.load(std::sync::atomic::Ordering::SeqCst), 1);
        assert_eq!(
            env.notices,
            vec![
                InteractionNotice::BeforeInteract(entity()),
                InteractionNotice::AfterInteract(entity()),
            ]
        );
    }

    #[test]
    fn refused_interaction_is_silent() {
        let mut env = RecordingEnvironment::default();
        let counter = Counter::refusing();
        let runs = counter.runs.clone();
        let mut object = Interactable::new("Use", InteractableKind::Custom(Box::new(counter)));
        let mut actor = Actor::new(Entity::from_raw(1));

        assert!(!object.interact(entity(), &mut actor, &mut env));
        assert_eq!(runs.load(std::sync::atomic::Ordering::SeqCst), 0);
        assert!(env.notices.is_empty());
    }

    #[test]
    fn configuration_is_clamped() {
        let object =
            Interactable::new("Use", InteractableKind::Custom(Box::new(Counter::default())))
                .with_range(-4.0)
                .with_hold(-1.0);

        assert_eq!(object.range(), MIN_RANGE);
        assert_eq!(object.hold_duration(), 0.0);
        assert!(object.requires_hold);
    }
}
