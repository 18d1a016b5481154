use bevy::prelude::*;

/// What a panel button does when clicked or submitted.
#[derive(Component, Debug, Clone, Copy, PartialEq, Eq)]
pub enum PanelButton {
    Resume,
    MainMenu,
    CloseInventory,
    EndDialogue,
    Quit,
}

/// Screens spawned on entering a state and despawned on leaving it.
#[derive(Component)]
pub struct OverlayScreen;

/// Position of a button in keyboard navigation order within its panel.
#[derive(Component, Debug, Clone, Copy)]
pub struct FocusOrder(pub usize);

/// Marker for the container listing inventory entries.
#[derive(Component)]
pub struct InventoryList;

/// Marker for one rendered inventory line.
#[derive(Component)]
pub struct InventoryEntry;

/// Marker for the notification container in the top-left.
#[derive(Component)]
pub struct NotificationRoot;

/// Marker for a notification text element with remaining display time.
#[derive(Component)]
pub struct NotificationText(pub f32);
