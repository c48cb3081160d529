//! Beehive demo application.
//!
//! Run with: `cargo run`

use bevy::prelude::*;
use bevy_beehive::prelude::*;

fn main() {
    App::new()
        .add_plugins(DefaultPlugins)
        .insert_resource(ClearColor(Color::srgb(0.53, 0.81, 0.92)))
        .add_plugins(BeeFlightPlugin)
        .add_plugins(BeehiveRenderPlugin)
        .add_systems(Startup, setup)
        .add_systems(Update, (handle_input, log_flight_events))
        .run();
}

fn setup(mut commands: Commands) -> Result {
    // Camera
    commands.spawn((
        Camera3d::default(),
        Transform::from_xyz(220.0, 100.0, 220.0).looking_at(Vec3::new(0.0, 30.0, 0.0), Vec3::Y),
    ));

    // Lighting
    commands.spawn(AmbientLight {
        color: Color::WHITE,
        brightness: 400.0,
        affects_lightmapped_meshes: true,
    });

    commands.spawn((
        DirectionalLight {
            illuminance: 10000.0,
            shadows_enabled: true,
            ..default()
        },
        Transform::from_xyz(-0.5, 1.0, 0.3).looking_at(Vec3::ZERO, Vec3::Y),
    ));

    commands.spawn((
        PointLight {
            intensity: 2_000_000.0,
            range: 600.0,
            ..default()
        },
        Transform::from_xyz(0.0, 200.0, 200.0),
    ));

    commands.spawn(Hive::at(Vec3::ZERO)?);

    println!("\n=== Beehive ===");
    println!("Controls:");
    println!("  P  - Toggle flight path gizmos");
    println!("===============\n");

    Ok(())
}

fn handle_input(
    keyboard: Res<ButtonInput<KeyCode>>,
    mut settings: ResMut<BeehiveRenderSettings>,
) {
    if keyboard.just_pressed(KeyCode::KeyP) {
        settings.toggle_paths();
    }
}

fn log_flight_events(mut events: MessageReader<FlightEvent>) {
    for event in events.read() {
        match event.kind {
            FlightEventKind::ArrivedAtHive => debug!("[{}] arrived at hive", event.entity),
            FlightEventKind::Respawned => debug!("[{}] respawned", event.entity),
        }
    }
}
