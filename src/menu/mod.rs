pub mod components;
pub mod notification;
pub mod screens;
pub mod styles;
pub mod systems;

use bevy::prelude::*;

pub use notification::NotificationEvent;
pub use screens::ShowDialogue;

use crate::game_manager::GameState;
use notification::{display_notifications, setup_notification_ui, update_notifications};
use screens::{
    despawn_screens, queue_dialogue, spawn_dialogue_screen, spawn_main_menu, PendingDialogue,
};
use systems::*;

pub struct MenuPlugin;

impl Plugin for MenuPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<MenuFocus>()
            .init_resource::<PendingDialogue>()
            .add_event::<NotificationEvent>()
            .add_event::<ShowDialogue>()
            .add_systems(
                Startup,
                (setup_pause_panel, setup_inventory_panel, setup_notification_ui),
            )
            .add_systems(OnEnter(GameState::Menu), spawn_main_menu)
            .add_systems(OnExit(GameState::Menu), despawn_screens)
            .add_systems(OnEnter(GameState::Dialogue), spawn_dialogue_screen)
            .add_systems(OnExit(GameState::Dialogue), despawn_screens)
            .add_systems(
                Update,
                (
                    queue_dialogue,
                    button_interaction,
                    handle_panel_clicks,
                    keyboard_panel_navigation,
                    update_inventory_list,
                    display_notifications,
                    update_notifications,
                ),
            );
    }
}
