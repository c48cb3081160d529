//! Bee flight: the per-bee state machine and the paths it flies.
//!
//! Every bee alternates between two phases along a cubic Bézier path that
//! ends at its hive's entrance:
//!
//! - **Entering**: progress rises from 0 to 1, carrying the bee from a point on
//!   the spawn sphere to the entrance.
//! - **Exiting**: on arrival the bee gets a fresh path from a random far point
//!   to the entrance and flies it backward, progress falling from 1 to 0. When
//!   it runs out, the bee respawns on the sphere and enters again.
//!
//! # Example
//!
//! ```rust,ignore
//! use bevy::prelude::*;
//! use bevy_beehive::prelude::*;
//!
//! fn setup(mut commands: Commands) -> Result {
//!     // Bees are spawned for each hive according to `FlightConfig`.
//!     commands.spawn(Hive::at(Vec3::ZERO)?);
//!     Ok(())
//! }
//! ```

mod components;
mod path;
mod systems;

pub use components::*;
pub use path::*;
pub use systems::{populate_swarm, sync_flight_rng, update_bees};

use bevy::prelude::*;

use crate::config::{FlightConfig, FlightRng};
use crate::hive::{Hive, HiveDimensions};
use crate::spline::SplinePlugin;

/// Plugin that spawns bees for each hive and flies them every frame.
///
/// Configure the swarm by inserting a [`FlightConfig`], before or after
/// adding the plugin. Phase changes are reported as [`FlightEvent`] messages.
pub struct BeeFlightPlugin;

impl Plugin for BeeFlightPlugin {
    fn build(&self, app: &mut App) {
        if !app.is_plugin_added::<SplinePlugin>() {
            app.add_plugins(SplinePlugin);
        }

        app.register_type::<Hive>()
            .register_type::<HiveDimensions>()
            .register_type::<Bee>()
            .register_type::<FlightPhase>()
            .register_type::<FlightConfig>()
            .init_resource::<FlightConfig>()
            .init_resource::<FlightRng>()
            .add_message::<FlightEvent>()
            .add_systems(
                Update,
                (
                    systems::sync_flight_rng,
                    systems::populate_swarm,
                    systems::update_bees,
                )
                    .chain(),
            );
    }
}
