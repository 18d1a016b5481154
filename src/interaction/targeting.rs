use bevy::prelude::*;

use super::environment::{Actor, Environment, InteractionNotice};
use super::interactable::{Interactable, MIN_RANGE};

/// Default length of the interaction ray.
pub const DEFAULT_MAX_DISTANCE: f32 = 4.0;

/// Bitmask restricting which interactables a ray can see.
#[derive(Component, Debug, Clone, Copy, PartialEq, Eq)]
pub struct InteractionLayers(pub u32);

impl InteractionLayers {
    pub fn intersects(self, other: Self) -> bool {
        self.0 & other.0 != 0
    }
}

impl Default for InteractionLayers {
    fn default() -> Self {
        Self(1)
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RayHit {
    pub entity: Entity,
    pub distance: f32,
}

/// Where the targeting session finds interactables.
pub trait InteractableSource {
    /// Nearest interactable along `ray` within `max_distance`.
    fn cast(
        &self,
        ray: Ray3d,
        max_distance: f32,
        filter: Option<InteractionLayers>,
    ) -> Option<RayHit>;
    fn get(&self, entity: Entity) -> Option<&Interactable>;
    fn get_mut(&mut self, entity: Entity) -> Option<&mut Interactable>;
}

/// Distance along `ray` at which it passes within `radius` of `center`.
///
/// Objects are approximated as spheres; the distance reported is the one of
/// the point on the ray closest to the center.
pub fn ray_sphere_distance(
    ray: Ray3d,
    center: Vec3,
    radius: f32,
    max_distance: f32,
) -> Option<f32> {
    let to_object = center - ray.origin;
    let distance_along_ray = to_object.dot(*ray.direction);
    if distance_along_ray < 0.0 || distance_along_ray > max_distance {
        return None;
    }
    let closest_point = ray.origin + *ray.direction * distance_along_ray;
    ((center - closest_point).length() < radius).then_some(distance_along_ray)
}

/// Objects that currently refuse interaction show no prompt.
fn prompt_for(interactable: &Interactable, actor: &Actor<'_>) -> Option<String> {
    interactable
        .can_interact(actor)
        .then(|| interactable.prompt_text())
}

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum HoldState {
    #[default]
    Idle,
    Holding {
        elapsed: f32,
    },
}

/// Interact button edges seen this frame.
#[derive(Debug, Clone, Copy, Default)]
pub struct InteractInput {
    pub pressed: bool,
    pub released: bool,
}

/// What the prompt widgets should show.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct InteractionHud {
    pub prompt: Option<String>,
    pub hold_progress: Option<f32>,
}

/// Per-player targeting session: what is being looked at and any hold in
/// progress on it.
#[derive(Component)]
pub struct PlayerInteract {
    pub layers: Option<InteractionLayers>,
    max_distance: f32,
    enabled: bool,
    target: Option<Entity>,
    hold: HoldState,
    hud: InteractionHud,
}

impl Default for PlayerInteract {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_DISTANCE)
    }
}

impl PlayerInteract {
    pub fn new(max_distance: f32) -> Self {
        Self {
            layers: None,
            max_distance: max_distance.max(MIN_RANGE),
            enabled: true,
            target: None,
            hold: HoldState::Idle,
            hud: InteractionHud::default(),
        }
    }

    pub fn current_target(&self) -> Option<Entity> {
        self.target
    }

    pub fn hud(&self) -> &InteractionHud {
        &self.hud
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    pub fn max_distance(&self) -> f32 {
        self.max_distance
    }

    pub fn set_max_distance(&mut self, distance: f32) {
        self.max_distance = distance.max(MIN_RANGE);
    }

    /// Turning targeting off drops the target and any hold, as if it went
    /// out of sight.
    pub fn set_enabled(
        &mut self,
        enabled: bool,
        source: &mut impl InteractableSource,
        env: &mut dyn Environment,
    ) {
        if !enabled {
            self.clear_target(source, env);
        }
        self.enabled = enabled;
    }

    /// One frame of targeting: resolve the target, react to the interact
    /// button, then advance any hold.
    pub fn tick(
        &mut self,
        dt: f32,
        ray: Ray3d,
        input: InteractInput,
        source: &mut impl InteractableSource,
        actor: &mut Actor<'_>,
        env: &mut dyn Environment,
    ) {
        if !self.enabled {
            return;
        }

        self.update_target(ray, source, actor, env);

        let mut hold_started = false;
        if input.pressed {
            hold_started = self.press(source, actor, env);
        }
        if input.released {
            self.release(source, env);
        }
        if !hold_started {
            self.advance_hold(dt, source, actor, env);
        }
    }

    /// Interacts with `entity` directly, ignoring what is being looked at.
    pub fn force_interact(
        &mut self,
        entity: Entity,
        source: &mut impl InteractableSource,
        actor: &mut Actor<'_>,
        env: &mut dyn Environment,
    ) -> bool {
        let Some(interactable) = source.get_mut(entity) else {
            return false;
        };
        if !interactable.can_interact(actor) {
            return false;
        }
        env.notify(InteractionNotice::InteractionStarted(entity));
        let ran = interactable.interact(entity, actor, env);
        if ran {
            env.notify(InteractionNotice::InteractionCompleted(entity));
        }
        if self.target == Some(entity) {
            self.hud.prompt = prompt_for(interactable, actor);
        }
        ran
    }

    fn update_target(
        &mut self,
        ray: Ray3d,
        source: &mut impl InteractableSource,
        actor: &Actor<'_>,
        env: &mut dyn Environment,
    ) {
        let hit = source
            .cast(ray, self.max_distance, self.layers)
            .filter(|hit| {
                source
                    .get(hit.entity)
                    .is_some_and(|interactable| hit.distance <= interactable.range())
            })
            .map(|hit| hit.entity);

        if hit == self.target {
            if let Some(interactable) = hit.and_then(|entity| source.get(entity)) {
                self.hud.prompt = prompt_for(interactable, actor);
            }
            return;
        }

        self.clear_target(source, env);

        let Some(entity) = hit else {
            return;
        };
        if let Some(interactable) = source.get_mut(entity) {
            interactable.start_highlight(entity, env);
            self.hud.prompt = prompt_for(interactable, actor);
            self.target = Some(entity);
        }
    }

    fn clear_target(&mut self, source: &mut impl InteractableSource, env: &mut dyn Environment) {
        let Some(previous) = self.target.take() else {
            return;
        };
        self.cancel_hold(previous, source, env);
        if let Some(interactable) = source.get_mut(previous) {
            interactable.stop_highlight(previous, env);
        }
        self.hud.prompt = None;
    }

    /// Returns true when a hold was started.
    fn press(
        &mut self,
        source: &mut impl InteractableSource,
        actor: &mut Actor<'_>,
        env: &mut dyn Environment,
    ) -> bool {
        let Some(entity) = self.target else {
            return false;
        };
        if matches!(self.hold, HoldState::Holding { .. }) {
            return false;
        }
        let Some(interactable) = source.get_mut(entity) else {
            return false;
        };
        if !interactable.can_interact(actor) {
            return false;
        }

        env.notify(InteractionNotice::InteractionStarted(entity));
        if interactable.requires_hold {
            self.hold = HoldState::Holding { elapsed: 0.0 };
            self.hud.hold_progress = Some(0.0);
            interactable.hold_progress(0.0);
            return true;
        }

        if interactable.interact(entity, actor, env) {
            env.notify(InteractionNotice::InteractionCompleted(entity));
        }
        self.hud.prompt = prompt_for(interactable, actor);
        false
    }

    fn release(&mut self, source: &mut impl InteractableSource, env: &mut dyn Environment) {
        if let Some(entity) = self.target {
            self.cancel_hold(entity, source, env);
        }
    }

    fn cancel_hold(
        &mut self,
        entity: Entity,
        source: &mut impl InteractableSource,
        env: &mut dyn Environment,
    ) {
        if self.hold == HoldState::Idle {
            return;
        }
        self.hold = HoldState::Idle;
        self.hud.hold_progress = None;
        if let Some(interactable) = source.get_mut(entity) {
            interactable.hold_progress(0.0);
        }
        env.notify(InteractionNotice::InteractionCanceled(entity));
    }

    fn advance_hold(
        &mut self,
        dt: f32,
        source: &mut impl InteractableSource,
        actor: &mut Actor<'_>,
        env: &mut dyn Environment,
    ) {
        let HoldState::Holding { elapsed } = self.hold else {
            return;
        };
        let Some(entity) = self.target else {
            self.hold = HoldState::Idle;
            self.hud.hold_progress = None;
            return;
        };
        let Some(interactable) = source.get_mut(entity) else {
            self.hold = HoldState::Idle;
            self.hud.hold_progress = None;
            env.notify(InteractionNotice::InteractionCanceled(entity));
            return;
        };

        let elapsed = elapsed + dt;
        let duration = interactable.hold_duration();
        let progress = if duration > 0.0 { elapsed / duration } else { 1.0 };
        interactable.hold_progress(progress);

        if progress < 1.0 {
            self.hold = HoldState::Holding { elapsed };
            self.hud.hold_progress = Some(progress.clamp(0.0, 1.0));
            return;
        }

        self.hold = HoldState::Idle;
        self.hud.hold_progress = None;
        let notice = if interactable.interact(entity, actor, env) {
            InteractionNotice::InteractionCompleted(entity)
        } else {
            InteractionNotice::InteractionCanceled(entity)
        };
        env.notify(notice);
        self.hud.prompt = prompt_for(interactable, actor);
    }
}

#[cfg(test)]
impl PlayerInteract {
    pub fn hold_state(&self) -> HoldState {
        self.hold
    }
}
