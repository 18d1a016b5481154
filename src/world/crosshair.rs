use bevy::prelude::*;

use crate::game_manager::GameManager;
use crate::interaction::PlayerInteract;
use crate::player::Player;

/// Marker for the crosshair container.
#[derive(Component)]
pub struct Crosshair;

/// Marker for the dot itself.
#[derive(Component)]
pub struct CrosshairDot;

const IDLE_SIZE: f32 = 4.0;
const TARGET_SIZE: f32 = 8.0;

/// Size and color of the dot depending on whether something is targeted.
pub fn crosshair_look(targeting: bool) -> (f32, Color) {
    if targeting {
        (TARGET_SIZE, Color::srgba(1.0, 0.85, 0.3, 0.9))
    } else {
        (IDLE_SIZE, Color::srgba(1.0, 1.0, 1.0, 0.7))
    }
}

pub fn setup_crosshair(mut commands: Commands) {
    let (size, color) = crosshair_look(false);

    // Crosshair container (centered on screen)
    commands
        .spawn((
            Crosshair,
            Node {
                width: Val::Percent(100.0),
                height: Val::Percent(100.0),
                justify_content: JustifyContent::Center,
                align_items: AlignItems::Center,
                position_type: PositionType::Absolute,
                ..default()
            },
        ))
        .with_children(|parent| {
            parent.spawn((
                CrosshairDot,
                Node {
                    width: Val::Px(size),
                    height: Val::Px(size),
                    ..default()
                },
                BackgroundColor(color),
            ));
        });
}

/// Grows the dot over a target and hides the crosshair outside gameplay.
pub fn update_crosshair(
    manager: Res<GameManager>,
    players: Query<&PlayerInteract, With<Player>>,
    mut container: Query<&mut Visibility, With<Crosshair>>,
    mut dots: Query<(&mut Node, &mut BackgroundColor), With<CrosshairDot>>,
) {
    if let Ok(mut visibility) = container.get_single_mut() {
        let wanted = if manager.is_gameplay_active() {
            Visibility::Inherited
        } else {
            Visibility::Hidden
        };
        visibility.set_if_neq(wanted);
    }

    let targeting = players
        .get_single()
        .is_ok_and(|session| session.current_target().is_some());
    let (size, color) = crosshair_look(targeting);
    for (mut node, mut background) in dots.iter_mut() {
        if node.width != Val::Px(size) {
            node.width = Val::Px(size);
            node.height = Val::Px(size);
            background.0 = color;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dot_grows_over_a_target() {
        let (idle, _) = crosshair_look(false);
        let (targeted, _) = crosshair_look(true);
        assert!(targeted > idle);
    }
}
