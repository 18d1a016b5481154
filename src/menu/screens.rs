use bevy::prelude::*;

use super::components::{OverlayScreen, PanelButton};
use super::styles::*;
use super::systems::spawn_button;

/// Asks the dialogue screen to show a line of text.
#[derive(Event, Debug, Clone)]
pub struct ShowDialogue(pub String);

/// Text the next dialogue screen opens with.
#[derive(Resource, Default)]
pub struct PendingDialogue(pub Option<String>);

pub fn queue_dialogue(
    mut events: EventReader<ShowDialogue>,
    mut pending: ResMut<PendingDialogue>,
) {
    if let Some(event) = events.read().last() {
        pending.0 = Some(event.0.clone());
    }
}

pub fn spawn_main_menu(mut commands: Commands) {
    commands
        .spawn((OverlayScreen, overlay_style(), BackgroundColor(PANEL_BACKGROUND)))
        .with_children(|parent| {
            parent.spawn((
                Text::new("Vestibule"),
                title_text_style(),
                TextColor(TITLE_TEXT_COLOR),
                Node {
                    margin: UiRect::bottom(Val::Px(40.0)),
                    ..default()
                },
            ));
            spawn_button(parent, PanelButton::Resume, 0, "Continue");
            spawn_button(parent, PanelButton::Quit, 1, "Quit");
        });
}

pub fn spawn_dialogue_screen(mut commands: Commands, mut pending: ResMut<PendingDialogue>) {
    let line = pending.0.take().unwrap_or_default();

    // Bottom strip; the scene stays visible above it
    commands
        .spawn((
            OverlayScreen,
            Node {
                width: Val::Percent(100.0),
                position_type: PositionType::Absolute,
                bottom: Val::Px(0.0),
                padding: UiRect::all(Val::Px(24.0)),
                flex_direction: FlexDirection::Column,
                align_items: AlignItems::Center,
                row_gap: Val::Px(12.0),
                ..default()
            },
            BackgroundColor(PANEL_BACKGROUND),
        ))
        .with_children(|parent| {
            parent.spawn((
                Text::new(line),
                entry_text_style(),
                TextColor(ENTRY_TEXT_COLOR),
            ));
            spawn_button(parent, PanelButton::EndDialogue, 0, "Continue");
        });
}

pub fn despawn_screens(mut commands: Commands, screens: Query<Entity, With<OverlayScreen>>) {
    for entity in screens.iter() {
        commands.entity(entity).despawn_recursive();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn latest_dialogue_line_wins() {
        let mut app = App::new();
        app.init_resource::<PendingDialogue>()
            .add_event::<ShowDialogue>()
            .add_systems(Update, queue_dialogue);

        app.world_mut().send_event(ShowDialogue("First".into()));
        app.world_mut().send_event(ShowDialogue("Second".into()));
        app.update();

        let pending = app.world().resource::<PendingDialogue>();
        assert_eq!(pending.0.as_deref(), Some("Second"));
    }
}
