use bevy::{app::AppExit, prelude::*};

use super::components::*;
use super::styles::*;
use crate::game_manager::{GameCommand, GameState, Panel};
use crate::input::{ActionEvent, InputAction, NavigateInput};
use crate::interaction::Inventory;
use crate::player::Player;

/// Keyboard focus among the buttons of the visible panel.
#[derive(Resource, Default)]
pub struct MenuFocus(pub usize);

/// Moves focus by `step`, wrapping around `count` entries.
pub fn next_focus(current: usize, count: usize, step: isize) -> usize {
    if count == 0 {
        return 0;
    }
    (current as isize + step).rem_euclid(count as isize) as usize
}

pub(super) fn spawn_button(
    parent: &mut ChildBuilder,
    action: PanelButton,
    order: usize,
    label: &str,
) {
    parent
        .spawn((
            action,
            FocusOrder(order),
            Button,
            button_style(),
            BackgroundColor(NORMAL_BUTTON),
        ))
        .with_children(|parent| {
            parent.spawn((
                Text::new(label),
                button_text_style(),
                TextColor(BUTTON_TEXT_COLOR),
            ));
        });
}

pub fn setup_pause_panel(mut commands: Commands) {
    commands
        .spawn((
            Panel::Pause,
            overlay_style(),
            BackgroundColor(PANEL_BACKGROUND),
            Visibility::Hidden,
        ))
        .with_children(|parent| {
            parent.spawn((
                Text::new("Paused"),
                title_text_style(),
                TextColor(TITLE_TEXT_COLOR),
                Node {
                    margin: UiRect::bottom(Val::Px(40.0)),
                    ..default()
                },
            ));
            spawn_button(parent, PanelButton::Resume, 0, "Resume");
            spawn_button(parent, PanelButton::MainMenu, 1, "Main menu");
            spawn_button(parent, PanelButton::Quit, 2, "Quit");
        });
}

pub fn setup_inventory_panel(mut commands: Commands) {
    commands
        .spawn((
            Panel::Inventory,
            overlay_style(),
            BackgroundColor(PANEL_BACKGROUND),
            Visibility::Hidden,
        ))
        .with_children(|parent| {
            parent.spawn((
                Text::new("Inventory"),
                title_text_style(),
                TextColor(TITLE_TEXT_COLOR),
                Node {
                    margin: UiRect::bottom(Val::Px(30.0)),
                    ..default()
                },
            ));
            parent.spawn((
                InventoryList,
                Node {
                    width: Val::Px(360.0),
                    min_height: Val::Px(120.0),
                    flex_direction: FlexDirection::Column,
                    align_items: AlignItems::Center,
                    row_gap: Val::Px(6.0),
                    ..default()
                },
            ));
            spawn_button(parent, PanelButton::CloseInventory, 0, "Close");
        });
}

pub fn button_interaction(
    mut interaction_query: Query<
        (&Interaction, &mut BackgroundColor),
        (Changed<Interaction>, With<Button>),
    >,
) {
    for (interaction, mut color) in interaction_query.iter_mut() {
        match *interaction {
            Interaction::Pressed => {
                *color = PRESSED_BUTTON.into();
            }
            Interaction::Hovered => {
                *color = HOVERED_BUTTON.into();
            }
            Interaction::None => {
                *color = NORMAL_BUTTON.into();
            }
        }
    }
}

/// State request behind a button; `None` for Quit.
pub fn command_for_button(button: PanelButton) -> Option<GameCommand> {
    match button {
        PanelButton::Resume => Some(GameCommand::Resume),
        PanelButton::MainMenu => Some(GameCommand::Set(GameState::Menu)),
        PanelButton::CloseInventory => Some(GameCommand::CloseInventory),
        PanelButton::EndDialogue => Some(GameCommand::EndDialogue),
        PanelButton::Quit => None,
    }
}

fn activate(
    button: PanelButton,
    requests: &mut EventWriter<GameCommand>,
    exit: &mut EventWriter<AppExit>,
) {
    match command_for_button(button) {
        Some(command) => {
            requests.send(command);
        }
        None => {
            exit.send(AppExit::Success);
        }
    }
}

pub fn handle_panel_clicks(
    interaction_query: Query<(&Interaction, &PanelButton), Changed<Interaction>>,
    mut requests: EventWriter<GameCommand>,
    mut exit: EventWriter<AppExit>,
) {
    for (interaction, button) in interaction_query.iter() {
        if *interaction == Interaction::Pressed {
            activate(*button, &mut requests, &mut exit);
        }
    }
}

/// Navigate and Submit drive the buttons of whichever panel is shown.
pub fn keyboard_panel_navigation(
    mut actions: EventReader<ActionEvent>,
    navigate: Res<NavigateInput>,
    mut focus: ResMut<MenuFocus>,
    panels: Query<(&Visibility, &Children), Or<(With<Panel>, With<OverlayScreen>)>>,
    mut buttons: Query<(&PanelButton, &FocusOrder, &mut BackgroundColor)>,
    mut requests: EventWriter<GameCommand>,
    mut exit: EventWriter<AppExit>,
) {
    let Some((_, children)) = panels
        .iter()
        .find(|(visibility, _)| **visibility != Visibility::Hidden)
    else {
        actions.clear();
        focus.0 = 0;
        return;
    };
    let count = children.iter().filter(|child| buttons.contains(**child)).count();

    let mut moved = false;
    for event in actions.read() {
        if event.is_press(InputAction::Navigate) {
            let step = if navigate.0.y > 0.0 || navigate.0.x < 0.0 { -1 } else { 1 };
            focus.0 = next_focus(focus.0, count, step);
            moved = true;
        }
        if event.is_press(InputAction::Submit) {
            let focused = children
                .iter()
                .filter_map(|child| buttons.get(*child).ok())
                .find(|(_, order, _)| order.0 == focus.0)
                .map(|(button, ..)| *button);
            if let Some(button) = focused {
                activate(button, &mut requests, &mut exit);
            }
        }
    }

    if !moved {
        return;
    }
    for child in children.iter() {
        if let Ok((_, order, mut color)) = buttons.get_mut(*child) {
            *color = if order.0 == focus.0 {
                HOVERED_BUTTON.into()
            } else {
                NORMAL_BUTTON.into()
            };
        }
    }
}

pub fn update_inventory_list(
    mut commands: Commands,
    inventories: Query<&Inventory, (With<Player>, Changed<Inventory>)>,
    list_query: Query<Entity, With<InventoryList>>,
    existing_entries: Query<Entity, With<InventoryEntry>>,
) {
    let Ok(inventory) = inventories.get_single() else {
        return;
    };
    let Ok(list) = list_query.get_single() else {
        return;
    };

    // Remove old entries
    for entity in existing_entries.iter() {
        commands.entity(entity).despawn_recursive();
    }

    commands.entity(list).with_children(|parent| {
        if inventory.is_empty() {
            parent.spawn((
                InventoryEntry,
                Text::new("Nothing yet"),
                entry_text_style(),
                TextColor(ENTRY_TEXT_COLOR),
            ));
        }
        for stack in inventory.items() {
            parent.spawn((
                InventoryEntry,
                Text::new(format!("{}  x{}", stack.name, stack.quantity)),
                entry_text_style(),
                TextColor(ENTRY_TEXT_COLOR),
            ));
        }
    });
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn focus_wraps_both_ways() {
        assert_eq!(next_focus(0, 2, 1), 1);
        assert_eq!(next_focus(1, 2, 1), 0);
        assert_eq!(next_focus(0, 2, -1), 1);
        assert_eq!(next_focus(3, 0, 1), 0);
    }

    #[test]
    fn buttons_map_to_state_requests() {
        assert_eq!(
            command_for_button(PanelButton::MainMenu),
            Some(GameCommand::Set(GameState::Menu))
        );
        assert_eq!(
            command_for_button(PanelButton::EndDialogue),
            Some(GameCommand::EndDialogue)
        );
        assert_eq!(command_for_button(PanelButton::Quit), None);
    }
}
