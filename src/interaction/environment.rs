use bevy::prelude::*;

use super::inventory::Inventory;

/// Notifications raised by interactables and the targeting session.
#[derive(Event, Debug, Clone, PartialEq)]
pub enum InteractionNotice {
    HighlightStarted(Entity),
    HighlightEnded(Entity),
    /// Fired right before a variant runs its effect.
    BeforeInteract(Entity),
    /// Fired right after a variant ran its effect.
    AfterInteract(Entity),
    InteractionStarted(Entity),
    InteractionCompleted(Entity),
    InteractionCanceled(Entity),
    DoorToggled { entity: Entity, open: bool },
    LeverToggled { entity: Entity, activated: bool },
    ButtonToggled { entity: Entity, activated: bool },
    ItemCollected {
        entity: Entity,
        item: String,
        quantity: u32,
    },
}

/// Engine operations the interaction core depends on.
pub trait Environment {
    fn play_sound(&mut self, clip: &str);
    fn spawn_effect(&mut self, effect: &str, position: Vec3, rotation: Quat);
    /// World placement of an object, if it still exists.
    fn placement(&self, object: Entity) -> Option<(Vec3, Quat)>;
    fn set_active(&mut self, object: Entity, active: bool);
    fn destroy(&mut self, object: Entity, delay: f32);
    fn notify(&mut self, notice: InteractionNotice);
}

/// Whoever triggers an interaction.
pub struct Actor<'a> {
    pub entity: Entity,
    pub inventory: Option<&'a mut Inventory>,
}

impl<'a> Actor<'a> {
    pub fn new(entity: Entity) -> Self {
        Self {
            entity,
            inventory: None,
        }
    }

    pub fn with_inventory(entity: Entity, inventory: &'a mut Inventory) -> Self {
        Self {
            entity,
            inventory: Some(inventory),
        }
    }
}
