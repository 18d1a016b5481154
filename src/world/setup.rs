use bevy::prelude::*;

use crate::interaction::{
    ButtonRest, CollectibleItem, Door, HitSphere, HoldButton, Interactable, InteractableKind,
    Inventory, Lever, PickupDisposal, PlayerInteract,
};
use crate::player::{CameraController, Player, Stance, Velocity};
use crate::settings::Settings;

use super::wiring::{Readable, Wire, Wires};
use super::{ROOM_DEPTH, ROOM_HEIGHT, ROOM_WIDTH, WALL_THICKNESS};

const NOTE_TEXT: &str = "The left button lights the lamp and stays down until the lever \
    is pulled. The right one swings the door from across the room.";

fn spawn_room(
    commands: &mut Commands,
    meshes: &mut Assets<Mesh>,
    materials: &mut Assets<StandardMaterial>,
) {
    let floor_material = materials.add(StandardMaterial {
        base_color: Color::srgb(0.4, 0.35, 0.3),
        ..default()
    });
    let wall_material = materials.add(StandardMaterial {
        base_color: Color::srgb(0.8, 0.75, 0.7),
        ..default()
    });
    let ceiling_material = materials.add(StandardMaterial {
        base_color: Color::srgb(0.9, 0.9, 0.9),
        ..default()
    });

    // Floor
    commands.spawn((
        Mesh3d(meshes.add(Plane3d::default().mesh().size(ROOM_WIDTH, ROOM_DEPTH))),
        MeshMaterial3d(floor_material),
        Transform::default(),
    ));

    // Ceiling
    commands.spawn((
        Mesh3d(meshes.add(Plane3d::default().mesh().size(ROOM_WIDTH, ROOM_DEPTH))),
        MeshMaterial3d(ceiling_material),
        Transform::from_xyz(0.0, ROOM_HEIGHT, 0.0)
            .with_rotation(Quat::from_rotation_x(std::f32::consts::PI)),
    ));

    // Walls: back, front, left, right
    let end_wall = Vec3::new(ROOM_WIDTH, ROOM_HEIGHT, WALL_THICKNESS);
    let side_wall = Vec3::new(WALL_THICKNESS, ROOM_HEIGHT, ROOM_DEPTH);
    let walls = [
        (end_wall, Vec3::new(0.0, 0.0, -ROOM_DEPTH / 2.0)),
        (end_wall, Vec3::new(0.0, 0.0, ROOM_DEPTH / 2.0)),
        (side_wall, Vec3::new(-ROOM_WIDTH / 2.0, 0.0, 0.0)),
        (side_wall, Vec3::new(ROOM_WIDTH / 2.0, 0.0, 0.0)),
    ];
    for (size, position) in walls {
        commands.spawn((
            Mesh3d(meshes.add(Cuboid::from_size(size))),
            MeshMaterial3d(wall_material.clone()),
            Transform::from_translation(position + Vec3::Y * ROOM_HEIGHT / 2.0),
        ));
    }

    // Point light (ceiling light)
    commands.spawn((
        PointLight {
            shadows_enabled: false,
            intensity: 2_000_000.0,
            range: 20.0,
            ..default()
        },
        Transform::from_xyz(0.0, ROOM_HEIGHT - 0.5, 0.0),
    ));
}

pub fn setup_world(
    mut commands: Commands,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
    settings: Res<Settings>,
) {
    spawn_room(&mut commands, &mut meshes, &mut materials);
    let tuning = &settings.interaction;
    let pedestal_material = materials.add(StandardMaterial {
        base_color: Color::srgb(0.3, 0.3, 0.32),
        ..default()
    });

    // Door standing in the middle of the right half
    let door_rotation = Quat::IDENTITY;
    let door = commands
        .spawn((
            Interactable::door(
                Door::new(door_rotation)
                    .with_swing(90.0, tuning.door_animation_speed)
                    .with_sounds("sounds/door_open.ogg", "sounds/door_close.ogg"),
            )
            .with_colors(Color::srgb(0.45, 0.3, 0.2), Color::srgb(0.65, 0.5, 0.3))
            .with_range(3.5),
            HitSphere(0.9),
            Mesh3d(meshes.add(Cuboid::new(1.0, 2.0, 0.1))),
            MeshMaterial3d(materials.add(StandardMaterial::default())),
            Transform::from_xyz(3.0, 1.0, -1.0).with_rotation(door_rotation),
        ))
        .id();

    // Lamp switched by the lever, off until pulled
    let lamp = commands
        .spawn((
            PointLight {
                color: Color::srgb(1.0, 0.75, 0.4),
                intensity: 400_000.0,
                range: 8.0,
                ..default()
            },
            Mesh3d(meshes.add(Sphere::new(0.12))),
            MeshMaterial3d(materials.add(StandardMaterial {
                base_color: Color::srgb(1.0, 0.8, 0.5),
                emissive: LinearRgba::rgb(4.0, 2.5, 1.0),
                ..default()
            })),
            Transform::from_xyz(-3.0, 2.6, -4.5),
            Visibility::Hidden,
        ))
        .id();

    let lever_rotation = Quat::IDENTITY;
    let mut lever = Lever::new(lever_rotation)
        .connect(lamp)
        .with_sound("sounds/lever.ogg");
    lever.animation_speed = tuning.lever_animation_speed;
    let lever = commands
        .spawn((
            Interactable::lever(lever),
            Mesh3d(meshes.add(Cuboid::new(0.08, 0.5, 0.08))),
            MeshMaterial3d(materials.add(StandardMaterial::default())),
            Transform::from_xyz(-3.0, 1.3, -4.7).with_rotation(lever_rotation),
        ))
        .id();

    // Two hold buttons on pedestals. The latching one lights the lamp and
    // stays down until the lever is pulled; the other swings the door.
    let buttons = [
        (-0.8, true, Wire::SetLever(lever, true)),
        (0.8, false, Wire::Trigger(door)),
    ];
    for (x, stays_activated, wire) in buttons {
        commands.spawn((
            Mesh3d(meshes.add(Cuboid::new(0.4, 1.0, 0.4))),
            MeshMaterial3d(pedestal_material.clone()),
            Transform::from_xyz(x, 0.5, -3.5),
        ));

        let mut button = HoldButton::new(stays_activated).with_sound("sounds/button.ogg");
        button.auto_reset_delay = tuning.button_auto_reset;
        let rest = Vec3::new(x, 1.05, -3.5);
        let button = commands
            .spawn((
                Interactable::hold_button(button, tuning.button_hold_duration),
                Wires(vec![wire]),
                ButtonRest(rest),
                HitSphere(0.25),
                Mesh3d(meshes.add(Cylinder::new(0.12, 0.1))),
                MeshMaterial3d(materials.add(StandardMaterial::default())),
                Transform::from_translation(rest),
            ))
            .id();
        if stays_activated {
            commands
                .entity(lever)
                .insert(Wires(vec![Wire::ResetButton(button)]));
        }
    }

    // Note by the buttons
    commands.spawn((
        Interactable::new(
            "Read note",
            InteractableKind::Custom(Box::new(Readable {
                page_sound: "sounds/page.ogg".to_string(),
            })),
        )
        .with_colors(Color::srgb(0.9, 0.88, 0.8), Color::srgb(1.0, 1.0, 0.85)),
        Wires(vec![Wire::Dialogue(NOTE_TEXT.to_string())]),
        HitSphere(0.3),
        Mesh3d(meshes.add(Cuboid::new(0.4, 0.3, 0.02))),
        MeshMaterial3d(materials.add(StandardMaterial::default())),
        Transform::from_xyz(0.0, 1.6, -4.85),
    ));

    // Collectibles
    let coin_mesh = meshes.add(Cylinder::new(0.15, 0.03));
    for position in [
        Vec3::new(-2.0, 0.3, 1.0),
        Vec3::new(2.5, 0.3, 2.0),
        Vec3::new(-3.5, 0.3, -2.0),
    ] {
        commands.spawn((
            Interactable::collectible(
                CollectibleItem::new("Coin", 5).with_cues("sounds/coin.ogg", "effects/sparkle.glb"),
            )
            .with_colors(Color::srgb(0.85, 0.7, 0.2), Color::srgb(1.0, 0.9, 0.4)),
            HitSphere(0.3),
            Mesh3d(coin_mesh.clone()),
            MeshMaterial3d(materials.add(StandardMaterial::default())),
            Transform::from_translation(position)
                .with_rotation(Quat::from_rotation_x(std::f32::consts::FRAC_PI_2)),
        ));
    }

    commands.spawn((
        Mesh3d(meshes.add(Cuboid::new(0.4, 1.0, 0.4))),
        MeshMaterial3d(pedestal_material),
        Transform::from_xyz(3.5, 0.5, 3.5),
    ));
    commands.spawn((
        Interactable::collectible(
            CollectibleItem::new("Brass Key", 1).with_disposal(PickupDisposal::Deactivate),
        )
        .with_colors(Color::srgb(0.7, 0.55, 0.25), Color::srgb(0.95, 0.8, 0.4)),
        HitSphere(0.25),
        Mesh3d(meshes.add(Cuboid::new(0.25, 0.05, 0.08))),
        MeshMaterial3d(materials.add(StandardMaterial::default())),
        Transform::from_xyz(3.5, 1.05, 3.5),
    ));

    // Player (Camera)
    let height = settings.player.height;
    commands.spawn((
        Player,
        CameraController::default(),
        Velocity::default(),
        Stance { eye_height: height },
        // Reach comes from settings once the interaction systems run
        PlayerInteract::default(),
        Inventory::new(),
        Camera3d::default(),
        Transform::from_xyz(0.0, height, 4.0),
    ));
}
