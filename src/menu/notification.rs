use bevy::prelude::*;

use super::components::{NotificationRoot, NotificationText};

/// Event to display a notification message.
#[derive(Event)]
pub struct NotificationEvent(pub String);

/// Duration in seconds for notifications to display.
const NOTIFICATION_DURATION: f32 = 3.0;

/// Last stretch of a notification's life during which it fades out.
const FADE_DURATION: f32 = 0.75;

/// Older notifications are dropped beyond this many.
const MAX_VISIBLE: usize = 4;

/// Opacity for a notification with `remaining` seconds left.
pub fn fade_alpha(remaining: f32) -> f32 {
    (remaining / FADE_DURATION).clamp(0.0, 1.0)
}

pub fn setup_notification_ui(mut commands: Commands) {
    commands.spawn((
        NotificationRoot,
        Node {
            position_type: PositionType::Absolute,
            left: Val::Px(20.0),
            top: Val::Px(20.0),
            flex_direction: FlexDirection::Column,
            row_gap: Val::Px(8.0),
            ..default()
        },
    ));
}

/// Appends a line per event, trimming the oldest past `MAX_VISIBLE`.
pub fn display_notifications(
    mut commands: Commands,
    mut events: EventReader<NotificationEvent>,
    root_query: Query<(Entity, Option<&Children>), With<NotificationRoot>>,
) {
    let Ok((root, children)) = root_query.get_single() else {
        events.clear();
        return;
    };

    let messages: Vec<&str> = events.read().map(|event| event.0.as_str()).collect();
    if messages.is_empty() {
        return;
    }

    let existing: Vec<Entity> = children.map(|c| c.iter().copied().collect()).unwrap_or_default();
    let overflow = (existing.len() + messages.len()).saturating_sub(MAX_VISIBLE);
    for &old in existing.iter().take(overflow) {
        commands.entity(old).despawn_recursive();
    }

    let skip = messages.len().saturating_sub(MAX_VISIBLE);
    commands.entity(root).with_children(|parent| {
        for message in messages.into_iter().skip(skip) {
            parent.spawn((
                NotificationText(NOTIFICATION_DURATION),
                Text::new(message),
                TextFont {
                    font_size: 20.0,
                    ..default()
                },
                TextColor(Color::srgb(0.9, 0.9, 0.9)),
                BackgroundColor(Color::srgba(0.0, 0.0, 0.0, 0.7)),
                Node {
                    padding: UiRect::axes(Val::Px(12.0), Val::Px(6.0)),
                    ..default()
                },
            ));
        }
    });
}

/// Counts notifications down on real time so they still fade while paused.
pub fn update_notifications(
    mut commands: Commands,
    time: Res<Time<Real>>,
    mut query: Query<(
        Entity,
        &mut NotificationText,
        &mut TextColor,
        &mut BackgroundColor,
    )>,
) {
    for (entity, mut notification, mut text_color, mut background) in query.iter_mut() {
        notification.0 -= time.delta_secs();
        if notification.0 <= 0.0 {
            commands.entity(entity).despawn_recursive();
            continue;
        }
        let alpha = fade_alpha(notification.0);
        text_color.0.set_alpha(alpha);
        background.0.set_alpha(alpha * 0.7);
    }
}
