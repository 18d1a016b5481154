use bevy::prelude::*;

use super::environment::{Actor, Environment, InteractionNotice};
use super::interactable::Behavior;

/// What happens to a collectible once picked up.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PickupDisposal {
    /// Despawn after `destroy_delay`, letting the pickup cue finish.
    #[default]
    Destroy,
    /// Keep the object around but inactive.
    Deactivate,
}

/// One-shot pickup that adds itself to the actor's inventory.
pub struct CollectibleItem {
    pub item_name: String,
    pub item_value: u32,
    pub pickup_sound: Option<String>,
    pub pickup_effect: Option<String>,
    pub disposal: PickupDisposal,
    pub destroy_delay: f32,
    picked_up: bool,
}

impl CollectibleItem {
    pub fn new(item_name: impl Into<String>, item_value: u32) -> Self {
        Self {
            item_name: item_name.into(),
            item_value,
            pickup_sound: None,
            pickup_effect: None,
            disposal: PickupDisposal::default(),
            destroy_delay: 0.5,
            picked_up: false,
        }
    }

    pub fn with_cues(mut self, sound: impl Into<String>, effect: impl Into<String>) -> Self {
        self.pickup_sound = Some(sound.into());
        self.pickup_effect = Some(effect.into());
        self
    }

    pub fn with_disposal(mut self, disposal: PickupDisposal) -> Self {
        self.disposal = disposal;
        self
    }
}

impl Behavior for CollectibleItem {
    fn can_interact(&self, _actor: &Actor<'_>) -> bool {
        !self.picked_up
    }

    fn perform(&mut self, entity: Entity, actor: &mut Actor<'_>, env: &mut dyn Environment) {
        self.picked_up = true;

        if let Some(inventory) = actor.inventory.as_deref_mut() {
            inventory.add(&self.item_name, self.item_value);
        }

        if let Some(clip) = &self.pickup_sound {
            env.play_sound(clip);
        }
        if let Some(effect) = &self.pickup_effect {
            if let Some((position, rotation)) = env.placement(entity) {
                env.spawn_effect(effect, position, rotation);
            }
        }

        env.notify(InteractionNotice::ItemCollected {
            entity,
            item: self.item_name.clone(),
            quantity: self.item_value,
        });

        match self.disposal {
            PickupDisposal::Destroy => env.destroy(entity, self.destroy_delay.max(0.0)),
            PickupDisposal::Deactivate => env.set_active(entity, false),
        }
    }
}
