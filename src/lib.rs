//! # bevy_beehive
//!
//! A Bevy plugin that flies a swarm of bees in and out of a hive.
//!
//! ## Features
//!
//! - Each bee follows a procedurally generated cubic Bézier path
//! - Bees starting behind the hive swing wide around it instead of through it
//! - Endless round trips: fly in, turn around at the entrance, fly out, respawn
//! - Seedable randomness for reproducible swarms
//! - Phase changes reported as [`FlightEvent`](flight::FlightEvent) messages
//!
//! ## Quick Start
//!
//! ```ignore
//! use bevy::prelude::*;
//! use bevy_beehive::prelude::*;
//!
//! fn main() {
//!     App::new()
//!         .add_plugins(DefaultPlugins)
//!         .insert_resource(FlightConfig::default().with_bee_count(20))
//!         .add_plugins(BeeFlightPlugin)
//!         .add_plugins(BeehiveRenderPlugin) // Optional: meshes for hive and bees
//!         .add_systems(Startup, setup)
//!         .run();
//! }
//!
//! fn setup(mut commands: Commands) -> Result {
//!     commands.spawn((
//!         Camera3d::default(),
//!         Transform::from_xyz(300.0, 100.0, 300.0).looking_at(Vec3::ZERO, Vec3::Y),
//!     ));
//!
//!     // The swarm is spawned for each hive.
//!     commands.spawn(Hive::at(Vec3::ZERO)?);
//!     Ok(())
//! }
//! ```
//!
//! ## Plugins
//!
//! - [`BeeFlightPlugin`]: Bee spawning and the per-frame flight update (required)
//! - [`BeehiveRenderPlugin`]: Meshes and path gizmos (optional, `render` feature)
//! - [`SplinePlugin`]: Bézier type registration (added by `BeeFlightPlugin`)

pub mod config;
pub mod error;
pub mod flight;
pub mod geometry;
pub mod hive;
pub mod spline;

#[cfg(feature = "render")]
pub mod render;

pub use flight::BeeFlightPlugin;
pub use spline::SplinePlugin;

#[cfg(feature = "render")]
pub use render::BeehiveRenderPlugin;

/// Convenient re-exports of commonly used types.
pub mod prelude {
    pub use crate::config::{FlightConfig, FlightRng};
    pub use crate::error::FlightError;
    pub use crate::flight::{
        generate_path, Approach, ArcSide, Bee, BeeFlightPlugin, FlightEvent, FlightEventKind,
        FlightPhase, PlannedPath,
    };
    pub use crate::hive::{Hive, HiveDimensions};
    pub use crate::spline::{BezierPath, SplinePlugin};

    #[cfg(feature = "render")]
    pub use crate::render::{BeehiveRenderPlugin, BeehiveRenderSettings};
}
