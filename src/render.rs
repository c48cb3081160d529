//! Meshes and debug gizmos for hives and bees.
//!
//! The flight model only produces positions and headings; this plugin gives
//! them something to look at. It needs Bevy's rendering plugins
//! (`DefaultPlugins`).

use bevy::prelude::*;

use crate::flight::Bee;
use crate::hive::Hive;

/// Display settings for the swarm.
#[derive(Resource, Debug, Clone)]
pub struct BeehiveRenderSettings {
    /// Whether to draw each bee's current path as a gizmo curve.
    pub show_paths: bool,
    /// Number of line segments per drawn path.
    pub curve_resolution: usize,
    /// Color of paths flown toward the hive.
    pub entering_color: Color,
    /// Color of paths flown away from the hive.
    pub exiting_color: Color,
}

impl Default for BeehiveRenderSettings {
    fn default() -> Self {
        Self {
            show_paths: false,
            curve_resolution: 32,
            entering_color: Color::srgba(1.0, 0.8, 0.0, 0.4),
            exiting_color: Color::srgba(0.3, 0.3, 0.3, 0.4),
        }
    }
}

impl BeehiveRenderSettings {
    /// Toggle path gizmos.
    pub fn toggle_paths(&mut self) {
        self.show_paths = !self.show_paths;
    }
}

/// Shared mesh and material handles.
#[derive(Resource)]
struct BeehiveAssets {
    bee_segment: Handle<Mesh>,
    bee_wing: Handle<Mesh>,
    bee_eye: Handle<Mesh>,
    stripe_yellow: Handle<StandardMaterial>,
    stripe_black: Handle<StandardMaterial>,
    wing: Handle<StandardMaterial>,
    eye: Handle<StandardMaterial>,
    hive_body: Handle<StandardMaterial>,
    solar_panel: Handle<StandardMaterial>,
    stilt: Handle<StandardMaterial>,
    entrance: Handle<StandardMaterial>,
}

impl FromWorld for BeehiveAssets {
    fn from_world(world: &mut World) -> Self {
        let mut meshes = world.resource_mut::<Assets<Mesh>>();
        let bee_segment = meshes.add(Sphere::new(1.5));
        let bee_wing = meshes.add(Cuboid::new(2.0, 2.0, 2.0));
        let bee_eye = meshes.add(Sphere::new(0.5));

        let mut materials = world.resource_mut::<Assets<StandardMaterial>>();
        Self {
            bee_segment,
            bee_wing,
            bee_eye,
            stripe_yellow: materials.add(Color::srgb(1.0, 0.8, 0.0)),
            stripe_black: materials.add(Color::BLACK),
            wing: materials.add(StandardMaterial {
                base_color: Color::srgba(1.0, 1.0, 1.0, 0.4),
                alpha_mode: AlphaMode::Blend,
                ..default()
            }),
            eye: materials.add(Color::WHITE),
            hive_body: materials.add(Color::WHITE),
            solar_panel: materials.add(Color::srgb(0.0, 0.2, 0.4)),
            stilt: materials.add(Color::srgb(0.59, 0.29, 0.0)),
            entrance: materials.add(Color::BLACK),
        }
    }
}

/// Plugin that draws hives and bees.
///
/// Add it alongside [`BeeFlightPlugin`](crate::flight::BeeFlightPlugin).
/// Path gizmos are off by default:
///
/// ```ignore
/// fn show_paths(mut settings: ResMut<BeehiveRenderSettings>) {
///     settings.show_paths = true;
/// }
/// ```
pub struct BeehiveRenderPlugin;

impl Plugin for BeehiveRenderPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<BeehiveRenderSettings>()
            .init_resource::<BeehiveAssets>()
            .add_systems(
                Update,
                (attach_hive_visuals, attach_bee_visuals, draw_bee_paths),
            );
    }
}

/// Build the hive model under each new hive entity.
///
/// Child transforms are relative to the hive's base point, so the body sits
/// on top of the stilts and the entrance marker lands on [`Hive::entrance`].
fn attach_hive_visuals(
    mut commands: Commands,
    mut meshes: ResMut<Assets<Mesh>>,
    assets: Res<BeehiveAssets>,
    hives: Query<(Entity, &Hive), Added<Hive>>,
) {
    for (entity, hive) in &hives {
        let dims = hive.dimensions();
        let body = meshes.add(Cuboid::new(dims.width, dims.height, dims.depth));
        let panel = meshes.add(Cuboid::new(dims.width * 0.8, 1.0, dims.depth * 0.8));
        let stilt = meshes.add(Cylinder::new(3.0, dims.stilt_height));
        let marker = meshes.add(Sphere::new(5.0));

        const STILT_INSET: f32 = 5.0;
        let half_w = dims.width / 2.0 - STILT_INSET;
        let half_d = dims.depth / 2.0 - STILT_INSET;
        let stilt_y = -dims.stilt_height / 2.0;

        commands
            .entity(entity)
            .insert(Transform::from_translation(hive.position()))
            .with_children(|parent| {
                parent.spawn((
                    Mesh3d(body),
                    MeshMaterial3d(assets.hive_body.clone()),
                    Transform::from_translation(hive.body_center() - hive.position()),
                ));
                parent.spawn((
                    Mesh3d(panel),
                    MeshMaterial3d(assets.solar_panel.clone()),
                    Transform::from_xyz(0.0, dims.height + 0.5, 0.0),
                ));
                for (x, z) in [
                    (half_w, half_d),
                    (half_w, -half_d),
                    (-half_w, half_d),
                    (-half_w, -half_d),
                ] {
                    parent.spawn((
                        Mesh3d(stilt.clone()),
                        MeshMaterial3d(assets.stilt.clone()),
                        Transform::from_xyz(x, stilt_y, z),
                    ));
                }
                parent.spawn((
                    Mesh3d(marker),
                    MeshMaterial3d(assets.entrance.clone()),
                    Transform::from_translation(hive.entrance() - hive.position()),
                ));
            });
    }
}

/// Build a striped bee model under each new bee. The nose points along +X.
fn attach_bee_visuals(
    mut commands: Commands,
    assets: Res<BeehiveAssets>,
    bees: Query<Entity, Added<Bee>>,
) {
    const SEGMENTS: usize = 4;
    const SEGMENT_LENGTH: f32 = 1.0;

    for entity in &bees {
        commands.entity(entity).with_children(|parent| {
            for i in 0..SEGMENTS {
                let material = if i % 2 == 0 {
                    assets.stripe_yellow.clone()
                } else {
                    assets.stripe_black.clone()
                };
                parent.spawn((
                    Mesh3d(assets.bee_segment.clone()),
                    MeshMaterial3d(material),
                    Transform::from_xyz(-1.5 + i as f32 * SEGMENT_LENGTH, 0.0, 0.0)
                        .with_scale(Vec3::new(1.0, 1.5, 1.5)),
                ));
            }

            // Wings
            for side in [1.0, -1.0] {
                parent.spawn((
                    Mesh3d(assets.bee_wing.clone()),
                    MeshMaterial3d(assets.wing.clone()),
                    Transform::from_xyz(0.0, 2.0, 2.0 * side)
                        .with_rotation(Quat::from_rotation_x(side * 45f32.to_radians()))
                        .with_scale(Vec3::new(2.0, 0.5, 3.0)),
                ));
            }

            // Head and eyes
            parent.spawn((
                Mesh3d(assets.bee_segment.clone()),
                MeshMaterial3d(assets.stripe_yellow.clone()),
                Transform::from_xyz(3.0, 0.0, 0.0),
            ));
            for side in [1.0, -1.0] {
                parent.spawn((
                    Mesh3d(assets.bee_eye.clone()),
                    MeshMaterial3d(assets.eye.clone()),
                    Transform::from_xyz(3.0, 0.6, 0.6 * side),
                ));
            }
        });
    }
}

/// Draw every bee's current path.
fn draw_bee_paths(
    settings: Res<BeehiveRenderSettings>,
    bees: Query<&Bee>,
    mut gizmos: Gizmos,
) {
    if !settings.show_paths {
        return;
    }

    for bee in &bees {
        let color = if bee.is_entering() {
            settings.entering_color
        } else {
            settings.exiting_color
        };
        gizmos.linestrip(bee.path().sample(settings.curve_resolution), color);
    }
}
