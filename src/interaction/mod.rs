pub mod collectible;
pub mod door;
pub mod environment;
pub mod hold_button;
pub mod hud;
pub mod interactable;
pub mod inventory;
pub mod lever;
pub mod systems;
pub mod targeting;
pub mod tween;

#[cfg(test)]
pub mod testing;

use bevy::prelude::*;

pub use collectible::{CollectibleItem, PickupDisposal};
pub use door::Door;
pub use environment::{Actor, Environment, InteractionNotice};
pub use hold_button::HoldButton;
pub use interactable::{Behavior, Interactable, InteractableKind};
pub use inventory::Inventory;
pub use lever::Lever;
pub use systems::{ButtonRest, HitSphere, InteractionCommand};
pub use targeting::PlayerInteract;

use hud::{setup_interaction_hud, update_interaction_hud};
use systems::{
    advance_interactables, apply_interaction_commands, despawn_expired, drive_player_interaction,
    highlight_interactables, report_interaction_notices, sync_interactable_transforms,
    sync_interaction_enabled, sync_interaction_reach,
};

pub struct InteractionPlugin;

impl Plugin for InteractionPlugin {
    fn build(&self, app: &mut App) {
        app.add_event::<InteractionNotice>()
            .add_event::<InteractionCommand>()
            .add_systems(Startup, setup_interaction_hud)
            .add_systems(
                Update,
                (
                    sync_interaction_reach,
                    sync_interaction_enabled,
                    drive_player_interaction,
                    apply_interaction_commands,
                    advance_interactables,
                    sync_interactable_transforms,
                    highlight_interactables,
                    update_interaction_hud,
                )
                    .chain(),
            )
            .add_systems(Update, (despawn_expired, report_interaction_notices));
    }
}
