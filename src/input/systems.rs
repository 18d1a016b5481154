use bevy::{input::mouse::MouseMotion, prelude::*};

use super::actions::{
    axis, ActionEvent, Binding, HeldActions, InputBindings, InputGroup, InputGroups, LookInput,
    MoveInput, NavigateInput,
};

pub fn dispatch_actions(
    keyboard_input: Res<ButtonInput<KeyCode>>,
    mouse_input: Res<ButtonInput<MouseButton>>,
    bindings: Res<InputBindings>,
    groups: Res<InputGroups>,
    mut events: EventWriter<ActionEvent>,
) {
    let just_pressed = |binding: Binding| match binding {
        Binding::Key(key) => keyboard_input.just_pressed(key),
        Binding::Mouse(button) => mouse_input.just_pressed(button),
    };
    let just_released = |binding: Binding| match binding {
        Binding::Key(key) => keyboard_input.just_released(key),
        Binding::Mouse(button) => mouse_input.just_released(button),
    };

    events.send_batch(bindings.collect(&groups, just_pressed, just_released));
}

pub fn read_axes(
    keyboard_input: Res<ButtonInput<KeyCode>>,
    mut mouse_motion: EventReader<MouseMotion>,
    groups: Res<InputGroups>,
    mut move_input: ResMut<MoveInput>,
    mut look_input: ResMut<LookInput>,
    mut navigate_input: ResMut<NavigateInput>,
) {
    if groups.is_enabled(InputGroup::Player) {
        move_input.0 = axis(
            keyboard_input.pressed(KeyCode::KeyW),
            keyboard_input.pressed(KeyCode::KeyS),
            keyboard_input.pressed(KeyCode::KeyA),
            keyboard_input.pressed(KeyCode::KeyD),
        );
        look_input.0 = mouse_motion.read().map(|event| event.delta).sum();
    } else {
        move_input.0 = Vec2::ZERO;
        look_input.0 = Vec2::ZERO;
        mouse_motion.clear();
    }

    navigate_input.0 = if groups.is_enabled(InputGroup::Ui) {
        axis(
            keyboard_input.pressed(KeyCode::ArrowUp),
            keyboard_input.pressed(KeyCode::ArrowDown),
            keyboard_input.pressed(KeyCode::ArrowLeft),
            keyboard_input.pressed(KeyCode::ArrowRight),
        )
    } else {
        Vec2::ZERO
    };
}

pub fn track_held_actions(
    mut events: EventReader<ActionEvent>,
    groups: Res<InputGroups>,
    mut held: ResMut<HeldActions>,
) {
    for event in events.read() {
        held.apply(event);
    }
    held.retain_allowed(&groups);
}
