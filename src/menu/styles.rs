use bevy::prelude::*;

pub const NORMAL_BUTTON: Color = Color::srgb(0.15, 0.15, 0.15);
pub const HOVERED_BUTTON: Color = Color::srgb(0.25, 0.25, 0.25);
pub const PRESSED_BUTTON: Color = Color::srgb(0.35, 0.65, 0.35);

pub const PANEL_BACKGROUND: Color = Color::srgba(0.05, 0.05, 0.08, 0.85);
pub const BUTTON_TEXT_COLOR: Color = Color::srgb(0.9, 0.9, 0.9);
pub const TITLE_TEXT_COLOR: Color = Color::srgb(1.0, 1.0, 1.0);
pub const ENTRY_TEXT_COLOR: Color = Color::srgb(0.8, 0.8, 0.75);

/// Full-screen overlay that centers its children in a column.
pub fn overlay_style() -> Node {
    Node {
        width: Val::Percent(100.0),
        height: Val::Percent(100.0),
        position_type: PositionType::Absolute,
        flex_direction: FlexDirection::Column,
        justify_content: JustifyContent::Center,
        align_items: AlignItems::Center,
        ..default()
    }
}

pub fn button_style() -> Node {
    Node {
        width: Val::Px(220.0),
        height: Val::Px(54.0),
        margin: UiRect::all(Val::Px(8.0)),
        justify_content: JustifyContent::Center,
        align_items: AlignItems::Center,
        ..default()
    }
}

pub fn button_text_style() -> TextFont {
    TextFont {
        font_size: 24.0,
        ..default()
    }
}

pub fn title_text_style() -> TextFont {
    TextFont {
        font_size: 48.0,
        ..default()
    }
}

pub fn entry_text_style() -> TextFont {
    TextFont {
        font_size: 20.0,
        ..default()
    }
}
