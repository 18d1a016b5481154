use bevy::prelude::*;

use super::targeting::PlayerInteract;
use crate::player::Player;

/// Marker for the interaction prompt label.
#[derive(Component)]
pub struct PromptText;

/// Marker for the hold progress bar frame.
#[derive(Component)]
pub struct HoldBar;

/// Marker for the filled part of the hold progress bar.
#[derive(Component)]
pub struct HoldBarFill;

const HOLD_BAR_WIDTH: f32 = 160.0;

pub fn setup_interaction_hud(mut commands: Commands) {
    // Bottom-centered column under the crosshair
    commands
        .spawn(Node {
            width: Val::Percent(100.0),
            position_type: PositionType::Absolute,
            bottom: Val::Percent(30.0),
            flex_direction: FlexDirection::Column,
            align_items: AlignItems::Center,
            row_gap: Val::Px(8.0),
            ..default()
        })
        .with_children(|parent| {
            parent.spawn((
                PromptText,
                Text::new(""),
                TextFont {
                    font_size: 22.0,
                    ..default()
                },
                TextColor(Color::srgb(0.95, 0.95, 0.95)),
                Visibility::Hidden,
            ));

            parent
                .spawn((
                    HoldBar,
                    Node {
                        width: Val::Px(HOLD_BAR_WIDTH),
                        height: Val::Px(8.0),
                        ..default()
                    },
                    BackgroundColor(Color::srgba(0.0, 0.0, 0.0, 0.6)),
                    Visibility::Hidden,
                ))
                .with_children(|bar| {
                    bar.spawn((
                        HoldBarFill,
                        Node {
                            width: Val::Px(0.0),
                            height: Val::Percent(100.0),
                            ..default()
                        },
                        BackgroundColor(Color::srgb(0.9, 0.8, 0.3)),
                    ));
                });
        });
}

pub fn update_interaction_hud(
    players: Query<&PlayerInteract, With<Player>>,
    mut prompt_query: Query<(&mut Text, &mut Visibility), With<PromptText>>,
    mut bar_query: Query<&mut Visibility, (With<HoldBar>, Without<PromptText>)>,
    mut fill_query: Query<&mut Node, With<HoldBarFill>>,
) {
    let Ok(session) = players.get_single() else {
        return;
    };
    let hud = session.hud();

    if let Ok((mut text, mut visibility)) = prompt_query.get_single_mut() {
        match &hud.prompt {
            Some(prompt) => {
                text.0 = format!("[E] {}", prompt);
                *visibility = Visibility::Inherited;
            }
            None => *visibility = Visibility::Hidden,
        }
    }

    if let Ok(mut visibility) = bar_query.get_single_mut() {
        *visibility = if hud.hold_progress.is_some() {
            Visibility::Inherited
        } else {
            Visibility::Hidden
        };
    }

    if let Ok(mut fill) = fill_query.get_single_mut() {
        fill.width = Val::Px(HOLD_BAR_WIDTH * hud.hold_progress.unwrap_or(0.0));
    }
}
