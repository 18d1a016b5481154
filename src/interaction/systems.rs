use bevy::{ecs::system::SystemParam, gltf::GltfAssetLabel, prelude::*};

use super::environment::{Actor, Environment, InteractionNotice};
use super::interactable::{Interactable, InteractableKind};
use super::inventory::Inventory;
use super::targeting::{
    ray_sphere_distance, InteractInput, InteractableSource, InteractionLayers, PlayerInteract,
    RayHit,
};
use crate::input::{ActionEvent, InputAction, InputGroup, InputGroups};
use crate::menu::NotificationEvent;
use crate::player::Player;
use crate::settings::Settings;

/// Seconds a spawned pickup effect stays around.
const EFFECT_LIFETIME: f32 = 1.5;

/// Overrides the default hit radius of an interactable.
#[derive(Component, Debug, Clone, Copy)]
pub struct HitSphere(pub f32);

/// Resting translation of a hold button's cap.
#[derive(Component, Debug, Clone, Copy)]
pub struct ButtonRest(pub Vec3);

/// Requests that act on interactables from outside the targeting session.
#[derive(Event, Debug, Clone, Copy, PartialEq)]
pub enum InteractionCommand {
    /// Switch a hold button off and cancel its auto-reset.
    ResetButton(Entity),
    /// Snap a lever into a state without animating it.
    SetLever(Entity, bool),
    /// Interact as the player, regardless of what they look at.
    Force(Entity),
}

/// Despawns the entity once the timer runs out.
#[derive(Component)]
pub struct DespawnAfter(pub Timer);

/// Interactables in the world, hit-tested as spheres around their origin.
#[derive(SystemParam)]
pub struct SceneInteractables<'w, 's> {
    settings: Res<'w, Settings>,
    query: Query<
        'w,
        's,
        (
            Entity,
            &'static GlobalTransform,
            &'static mut Interactable,
            Option<&'static HitSphere>,
            Option<&'static InteractionLayers>,
            Option<&'static Visibility>,
            Has<DespawnAfter>,
        ),
    >,
}

impl InteractableSource for SceneInteractables<'_, '_> {
    fn cast(
        &self,
        ray: Ray3d,
        max_distance: f32,
        filter: Option<InteractionLayers>,
    ) -> Option<RayHit> {
        let mut closest: Option<RayHit> = None;

        for (entity, transform, _, hit_sphere, layers, visibility, leaving) in self.query.iter() {
            // Hidden or about to be despawned
            if leaving || visibility == Some(&Visibility::Hidden) {
                continue;
            }
            let layers = layers.copied().unwrap_or_default();
            if filter.is_some_and(|mask| !mask.intersects(layers)) {
                continue;
            }
            let radius = hit_sphere.map_or(self.settings.interaction.hit_radius, |sphere| sphere.0);
            let Some(distance) =
                ray_sphere_distance(ray, transform.translation(), radius, max_distance)
            else {
                continue;
            };
            if closest.map_or(true, |hit| distance < hit.distance) {
                closest = Some(RayHit { entity, distance });
            }
        }

        closest
    }

    fn get(&self, entity: Entity) -> Option<&Interactable> {
        self.query
            .get(entity)
            .ok()
            .map(|(_, _, interactable, ..)| interactable)
    }

    fn get_mut(&mut self, entity: Entity) -> Option<&mut Interactable> {
        self.query
            .get_mut(entity)
            .ok()
            .map(|(_, _, interactable, ..)| interactable.into_inner())
    }
}

/// Engine side of the interaction core.
#[derive(SystemParam)]
pub struct SceneEnvironment<'w, 's> {
    commands: Commands<'w, 's>,
    asset_server: Option<Res<'w, AssetServer>>,
    placements: Query<'w, 's, &'static GlobalTransform>,
    notices: EventWriter<'w, InteractionNotice>,
}

impl Environment for SceneEnvironment<'_, '_> {
    fn play_sound(&mut self, clip: &str) {
        let Some(assets) = &self.asset_server else {
            return;
        };
        let source: Handle<AudioSource> = assets.load(clip.to_string());
        self.commands
            .spawn((AudioPlayer::new(source), PlaybackSettings::DESPAWN));
    }

    fn spawn_effect(&mut self, effect: &str, position: Vec3, rotation: Quat) {
        let Some(assets) = &self.asset_server else {
            return;
        };
        let scene = assets.load(GltfAssetLabel::Scene(0).from_asset(effect.to_string()));
        self.commands.spawn((
            SceneRoot(scene),
            Transform::from_translation(position).with_rotation(rotation),
            DespawnAfter(Timer::from_seconds(EFFECT_LIFETIME, TimerMode::Once)),
        ));
    }

    fn placement(&self, object: Entity) -> Option<(Vec3, Quat)> {
        let transform = self.placements.get(object).ok()?;
        let (_, rotation, translation) = transform.to_scale_rotation_translation();
        Some((translation, rotation))
    }

    fn set_active(&mut self, object: Entity, active: bool) {
        let Some(mut entity) = self.commands.get_entity(object) else {
            return;
        };
        entity.insert(if active {
            Visibility::Inherited
        } else {
            Visibility::Hidden
        });
    }

    fn destroy(&mut self, object: Entity, delay: f32) {
        let Some(mut entity) = self.commands.get_entity(object) else {
            return;
        };
        if delay <= 0.0 {
            entity.despawn_recursive();
        } else {
            entity.insert(DespawnAfter(Timer::from_seconds(delay, TimerMode::Once)));
        }
    }

    fn notify(&mut self, notice: InteractionNotice) {
        self.notices.send(notice);
    }
}

/// Keeps targeting switched on only while gameplay input is live.
pub fn sync_interaction_enabled(
    groups: Res<InputGroups>,
    mut players: Query<&mut PlayerInteract, With<Player>>,
    mut interactables: SceneInteractables,
    mut env: SceneEnvironment,
) {
    let Ok(mut session) = players.get_single_mut() else {
        return;
    };
    let enabled = groups.is_enabled(InputGroup::Player);
    if session.is_enabled() != enabled {
        session.set_enabled(enabled, &mut interactables, &mut env);
    }
}

/// Applies the configured reach whenever settings change.
pub fn sync_interaction_reach(
    settings: Res<Settings>,
    mut players: Query<&mut PlayerInteract, With<Player>>,
) {
    if !settings.is_changed() {
        return;
    }
    for mut session in players.iter_mut() {
        session.set_max_distance(settings.interaction.max_distance);
    }
}

/// Raycasts from the player's view and feeds the interact button to the
/// targeting session.
pub fn drive_player_interaction(
    time: Res<Time>,
    mut actions: EventReader<ActionEvent>,
    mut players: Query<
        (Entity, &GlobalTransform, &mut PlayerInteract, Option<&mut Inventory>),
        With<Player>,
    >,
    mut interactables: SceneInteractables,
    mut env: SceneEnvironment,
) {
    let mut input = InteractInput::default();
    for event in actions.read() {
        input.pressed |= event.is_press(InputAction::Interact);
        input.released |= event.is_release(InputAction::Interact);
    }

    let Ok((entity, transform, mut session, inventory)) = players.get_single_mut() else {
        return;
    };

    let ray = Ray3d {
        origin: transform.translation(),
        direction: transform.forward(),
    };
    let mut actor = Actor {
        entity,
        inventory: inventory.map(|inventory| inventory.into_inner()),
    };
    session.tick(
        time.delta_secs(),
        ray,
        input,
        &mut interactables,
        &mut actor,
        &mut env,
    );
}

pub fn apply_interaction_commands(
    mut requests: EventReader<InteractionCommand>,
    mut players: Query<(Entity, &mut PlayerInteract, Option<&mut Inventory>), With<Player>>,
    mut interactables: SceneInteractables,
    mut env: SceneEnvironment,
) {
    for request in requests.read() {
        match *request {
            InteractionCommand::ResetButton(entity) => {
                let button = interactables
                    .get_mut(entity)
                    .and_then(Interactable::as_button_mut);
                if let Some(button) = button {
                    button.reset(entity, &mut env);
                }
            }
            InteractionCommand::SetLever(entity, activated) => {
                let applied = interactables
                    .get_mut(entity)
                    .and_then(Interactable::as_lever_mut)
                    .is_some_and(|lever| lever.set_state(activated, &mut env));
                if !applied {
                    debug!("Lever {} is moving or gone, state left as is", entity);
                }
            }
            InteractionCommand::Force(entity) => {
                let Ok((player, mut session, inventory)) = players.get_single_mut() else {
                    continue;
                };
                let mut actor = Actor {
                    entity: player,
                    inventory: inventory.map(|inventory| inventory.into_inner()),
                };
                session.force_interact(entity, &mut interactables, &mut actor, &mut env);
            }
        }
    }
}

pub fn advance_interactables(
    time: Res<Time>,
    mut query: Query<(Entity, &mut Interactable)>,
    mut env: SceneEnvironment,
) {
    let dt = time.delta_secs();
    for (entity, mut interactable) in query.iter_mut() {
        interactable.tick(entity, dt, &mut env);
    }
}

/// Copies animated variant state onto transforms.
pub fn sync_interactable_transforms(
    mut query: Query<(&Interactable, &mut Transform, Option<&ButtonRest>)>,
) {
    for (interactable, mut transform, rest) in query.iter_mut() {
        match &interactable.kind {
            InteractableKind::Door(door) => transform.rotation = door.rotation(),
            InteractableKind::Lever(lever) => transform.rotation = lever.rotation(),
            InteractableKind::HoldButton(button) => {
                if let Some(rest) = rest {
                    transform.translation = rest.0 + button.press_offset();
                }
            }
            InteractableKind::Collectible(_) | InteractableKind::Custom(_) => {}
        }
    }
}

/// System to tint interactables for highlight and hold feedback.
pub fn highlight_interactables(
    interactables: Query<(&Interactable, &MeshMaterial3d<StandardMaterial>)>,
    mut materials: ResMut<Assets<StandardMaterial>>,
) {
    for (interactable, material_handle) in interactables.iter() {
        if let Some(material) = materials.get_mut(&material_handle.0) {
            material.base_color = interactable.display_color();
        }
    }
}

pub fn despawn_expired(
    mut commands: Commands,
    time: Res<Time>,
    mut query: Query<(Entity, &mut DespawnAfter)>,
) {
    for (entity, mut despawn) in query.iter_mut() {
        if despawn.0.tick(time.delta()).finished() {
            commands.entity(entity).despawn_recursive();
        }
    }
}

pub fn report_interaction_notices(
    mut notices: EventReader<InteractionNotice>,
    mut notifications: EventWriter<NotificationEvent>,
) {
    for notice in notices.read() {
        match notice {
            InteractionNotice::ItemCollected { item, quantity, .. } => {
                info!("Collected {} x{}", item, quantity);
                notifications.send(NotificationEvent(format!("Picked up {} x{}", item, quantity)));
            }
            InteractionNotice::LeverToggled { activated, .. } => {
                let state = if *activated { "on" } else { "off" };
                notifications.send(NotificationEvent(format!("Lever switched {}", state)));
            }
            InteractionNotice::ButtonToggled { entity, activated } => {
                info!("Button {} activated: {}", entity, activated);
            }
            other => debug!("{:?}", other),
        }
    }
}

#[cfg(test)]
mod tests {
    use bevy::ecs::system::RunSystemOnce;

    use super::*;
    use crate::interaction::collectible::CollectibleItem;
    use crate::interaction::hold_button::HoldButton;
    use crate::interaction::lever::Lever;
    use crate::interaction::testing::RecordingEnvironment;

    fn command_app() -> App {
        let mut app = App::new();
        app.init_resource::<Settings>()
            .add_event::<InteractionNotice>()
            .add_event::<InteractionCommand>()
            .add_systems(Update, apply_interaction_commands);
        app
    }

    fn notices(app: &App) -> Vec<InteractionNotice> {
        app.world()
            .resource::<Events<InteractionNotice>>()
            .iter_current_update_events()
            .cloned()
            .collect()
    }

    #[test]
    fn reset_command_unlocks_a_latched_button() {
        let mut app = command_app();
        let mut latched = Interactable::hold_button(HoldButton::new(true), 1.0);
        let player = Entity::from_raw(1);
        latched.interact(
            Entity::PLACEHOLDER,
            &mut Actor::new(player),
            &mut RecordingEnvironment::default(),
        );
        assert!(!latched.can_interact(&Actor::new(player)));

        let button = app
            .world_mut()
            .spawn((latched, GlobalTransform::default()))
            .id();
        app.world_mut().send_event(InteractionCommand::ResetButton(button));
        app.update();

        let latched = app.world().get::<Interactable>(button).expect("button");
        assert!(latched.can_interact(&Actor::new(player)));
        assert_eq!(
            notices(&app),
            vec![InteractionNotice::ButtonToggled {
                entity: button,
                activated: false,
            }]
        );
    }

    #[test]
    fn set_lever_command_snaps_and_switches_connected_objects() {
        let mut app = command_app();
        let lamp = app.world_mut().spawn(Visibility::Hidden).id();
        let lever = app
            .world_mut()
            .spawn((
                Interactable::lever(Lever::new(Quat::IDENTITY).connect(lamp)),
                GlobalTransform::default(),
            ))
            .id();

        app.world_mut().send_event(InteractionCommand::SetLever(lever, true));
        app.update();

        assert_eq!(
            app.world().get::<Visibility>(lamp),
            Some(&Visibility::Inherited)
        );
        let mut lever_state = app.world_mut().get_mut::<Interactable>(lever).expect("lever");
        assert!(lever_state
            .as_lever_mut()
            .is_some_and(|lever| lever.is_activated() && !lever.is_animating()));
        assert!(notices(&app).is_empty());
    }

    #[test]
    fn force_command_interacts_as_the_player() {
        let mut app = command_app();
        let player = app
            .world_mut()
            .spawn((Player, PlayerInteract::default(), Inventory::new()))
            .id();
        let coin = app
            .world_mut()
            .spawn((
                Interactable::collectible(CollectibleItem::new("Coin", 3)),
                GlobalTransform::from_translation(Vec3::new(50.0, 0.0, 0.0)),
            ))
            .id();

        app.world_mut().send_event(InteractionCommand::Force(coin));
        app.update();

        let inventory = app.world().get::<Inventory>(player).expect("inventory");
        assert_eq!(inventory.quantity("Coin"), 3);
        assert!(app.world().get::<DespawnAfter>(coin).is_some());
        assert!(notices(&app).contains(&InteractionNotice::InteractionCompleted(coin)));
    }

    fn first_hit(source: SceneInteractables) -> Option<Entity> {
        let ray = Ray3d {
            origin: Vec3::ZERO,
            direction: Dir3::NEG_Z,
        };
        source.cast(ray, 10.0, None).map(|hit| hit.entity)
    }

    #[test]
    fn objects_on_their_way_out_cannot_be_targeted() {
        let mut app = command_app();
        let coin = app
            .world_mut()
            .spawn((
                Interactable::collectible(CollectibleItem::new("Coin", 1)),
                GlobalTransform::from_translation(Vec3::new(0.0, 0.0, -2.0)),
            ))
            .id();
        let hit = app.world_mut().run_system_once(first_hit).expect("cast runs");
        assert_eq!(hit, Some(coin));

        app.world_mut()
            .entity_mut(coin)
            .insert(DespawnAfter(Timer::from_seconds(0.5, TimerMode::Once)));
        let hit = app.world_mut().run_system_once(first_hit).expect("cast runs");
        assert_eq!(hit, None);
    }
}
