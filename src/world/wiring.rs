use bevy::prelude::*;

use crate::game_manager::GameCommand;
use crate::interaction::{Actor, Behavior, Environment, InteractionCommand, InteractionNotice};
use crate::menu::ShowDialogue;

/// Something an interactable sets off after the player uses it.
#[derive(Debug, Clone, PartialEq)]
pub enum Wire {
    ResetButton(Entity),
    SetLever(Entity, bool),
    /// Interact with another object as if the player had.
    Trigger(Entity),
    Dialogue(String),
}

#[derive(Component, Debug, Default)]
pub struct Wires(pub Vec<Wire>);

/// Note on the wall. Its effect lives entirely in its wires.
pub struct Readable {
    pub page_sound: String,
}

impl Behavior for Readable {
    fn perform(&mut self, _entity: Entity, _actor: &mut Actor<'_>, env: &mut dyn Environment) {
        env.play_sound(&self.page_sound);
    }
}

pub fn fire_wires(
    mut notices: EventReader<InteractionNotice>,
    sources: Query<&Wires>,
    mut interactions: EventWriter<InteractionCommand>,
    mut game: EventWriter<GameCommand>,
    mut dialogue: EventWriter<ShowDialogue>,
) {
    for notice in notices.read() {
        let InteractionNotice::AfterInteract(source) = notice else {
            continue;
        };
        let Ok(wires) = sources.get(*source) else {
            continue;
        };
        for wire in &wires.0 {
            match wire {
                Wire::ResetButton(button) => {
                    interactions.send(InteractionCommand::ResetButton(*button));
                }
                Wire::SetLever(lever, activated) => {
                    interactions.send(InteractionCommand::SetLever(*lever, *activated));
                }
                Wire::Trigger(target) => {
                    interactions.send(InteractionCommand::Force(*target));
                }
                Wire::Dialogue(line) => {
                    dialogue.send(ShowDialogue(line.clone()));
                    game.send(GameCommand::StartDialogue);
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn wired_app() -> App {
        let mut app = App::new();
        app.add_event::<InteractionNotice>()
            .add_event::<InteractionCommand>()
            .add_event::<GameCommand>()
            .add_event::<ShowDialogue>()
            .add_systems(Update, fire_wires);
        app
    }

    fn sent<E: Event + Clone>(app: &App) -> Vec<E> {
        app.world()
            .resource::<Events<E>>()
            .iter_current_update_events()
            .cloned()
            .collect()
    }

    #[test]
    fn lever_use_resets_its_button() {
        let mut app = wired_app();
        let button = app.world_mut().spawn_empty().id();
        let lever = app
            .world_mut()
            .spawn(Wires(vec![Wire::ResetButton(button)]))
            .id();

        app.world_mut().send_event(InteractionNotice::BeforeInteract(lever));
        app.world_mut().send_event(InteractionNotice::AfterInteract(lever));
        app.update();

        assert_eq!(
            sent::<InteractionCommand>(&app),
            vec![InteractionCommand::ResetButton(button)]
        );
    }

    #[test]
    fn unwired_objects_do_nothing() {
        let mut app = wired_app();
        let plain = app.world_mut().spawn_empty().id();

        app.world_mut().send_event(InteractionNotice::AfterInteract(plain));
        app.update();

        assert!(sent::<InteractionCommand>(&app).is_empty());
        assert!(sent::<GameCommand>(&app).is_empty());
    }

    #[test]
    fn note_opens_a_dialogue() {
        let mut app = wired_app();
        let note = app
            .world_mut()
            .spawn(Wires(vec![Wire::Dialogue("Hello".into())]))
            .id();

        app.world_mut().send_event(InteractionNotice::AfterInteract(note));
        app.update();

        assert_eq!(sent::<GameCommand>(&app), vec![GameCommand::StartDialogue]);
        let lines: Vec<String> = sent::<ShowDialogue>(&app)
            .into_iter()
            .map(|line| line.0)
            .collect();
        assert_eq!(lines, vec!["Hello".to_string()]);
    }
}
