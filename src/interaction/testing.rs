//! In-memory stand-ins for the engine, shared by the interaction tests.

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use bevy::prelude::*;

use super::environment::{Actor, Environment, InteractionNotice};
use super::interactable::{Behavior, Interactable};
use super::targeting::{ray_sphere_distance, InteractableSource, InteractionLayers, RayHit};

#[derive(Default)]
pub struct RecordingEnvironment {
    pub notices: Vec<InteractionNotice>,
    pub sounds: Vec<String>,
    pub effects: Vec<(String, Vec3)>,
    pub active: Vec<(Entity, bool)>,
    pub destroyed: Vec<(Entity, f32)>,
    pub placements: HashMap<Entity, (Vec3, Quat)>,
}

impl RecordingEnvironment {
    pub fn count(&self, wanted: &InteractionNotice) -> usize {
        self.notices.iter().filter(|notice| *notice == wanted).count()
    }
}

impl Environment for RecordingEnvironment {
    fn play_sound(&mut self, clip: &str) {
        self.sounds.push(clip.to_string());
    }

    fn spawn_effect(&mut self, effect: &str, position: Vec3, _rotation: Quat) {
        self.effects.push((effect.to_string(), position));
    }

    fn placement(&self, object: Entity) -> Option<(Vec3, Quat)> {
        self.placements.get(&object).copied()
    }

    fn set_active(&mut self, object: Entity, active: bool) {
        self.active.push((object, active));
    }

    fn destroy(&mut self, object: Entity, delay: f32) {
        self.destroyed.push((object, delay));
    }

    fn notify(&mut self, notice: InteractionNotice) {
        self.notices.push(notice);
    }
}

/// Behaviour that counts how often it ran.
#[derive(Default)]
pub struct Counter {
    pub runs: Arc<AtomicUsize>,
    refuse: bool,
}

impl Counter {
    pub fn refusing() -> Self {
        Self {
            refuse: true,
            ..default()
        }
    }
}

impl Behavior for Counter {
    fn can_interact(&self, _actor: &Actor<'_>) -> bool {
        !self.refuse
    }

    fn perform(&mut self, _entity: Entity, _actor: &mut Actor<'_>, _env: &mut dyn Environment) {
        self.runs.fetch_add(1, Ordering::SeqCst);
    }
}

pub struct Placed {
    pub entity: Entity,
    pub center: Vec3,
    pub radius: f32,
    pub layers: InteractionLayers,
    pub interactable: Interactable,
}

/// Spheres in space, hit-tested the same way the scene does it.
#[derive(Default)]
pub struct TestScene {
    pub objects: Vec<Placed>,
}

impl TestScene {
    pub fn place(&mut self, entity: Entity, center: Vec3, interactable: Interactable) {
        self.objects.push(Placed {
            entity,
            center,
            radius: 0.5,
            layers: InteractionLayers::default(),
            interactable,
        });
    }

    pub fn get(&self, entity: Entity) -> &Interactable {
        self.objects
            .iter()
            .find(|placed| placed.entity == entity)
            .map(|placed| &placed.interactable)
            .expect("object placed in the test scene")
    }

    pub fn remove(&mut self, entity: Entity) {
        self.objects.retain(|placed| placed.entity != entity);
    }
}

impl InteractableSource for TestScene {
    fn cast(
        &self,
        ray: Ray3d,
        max_distance: f32,
        filter: Option<InteractionLayers>,
    ) -> Option<RayHit> {
        self.objects
            .iter()
            .filter(|placed| filter.map_or(true, |mask| mask.intersects(placed.layers)))
            .filter_map(|placed| {
                ray_sphere_distance(ray, placed.center, placed.radius, max_distance)
                    .map(|distance| RayHit {
                        entity: placed.entity,
                        distance,
                    })
            })
            .min_by(|a, b| a.distance.total_cmp(&b.distance))
    }

    fn get(&self, entity: Entity) -> Option<&Interactable> {
        self.objects
            .iter()
            .find(|placed| placed.entity == entity)
            .map(|placed| &placed.interactable)
    }

    fn get_mut(&mut self, entity: Entity) -> Option<&mut Interactable> {
        self.objects
            .iter_mut()
            .find(|placed| placed.entity == entity)
            .map(|placed| &mut placed.interactable)
    }
}
