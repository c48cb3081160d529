use bevy::prelude::*;

use crate::config::{FlightConfig, FlightRng};
use crate::geometry::heading_rotation;
use crate::hive::Hive;

use super::{Bee, FlightEvent};

/// Rebuild [`FlightRng`] when the config asks for a different seed.
///
/// Covers a [`FlightConfig`] inserted after the plugin was added, which the
/// generator never saw when it was initialized.
pub fn sync_flight_rng(config: Res<FlightConfig>, mut rng: ResMut<FlightRng>) {
    if config.is_changed() && rng.needs_reseed(&config) {
        debug!("reseeding flight rng with {:?}", config.seed);
        *rng = FlightRng::new(config.seed);
    }
}

/// Spawn the configured number of bees for every newly added hive.
pub fn populate_swarm(
    mut commands: Commands,
    hives: Query<(Entity, &Hive), Added<Hive>>,
    config: Res<FlightConfig>,
    mut rng: ResMut<FlightRng>,
) -> Result {
    for (hive_entity, hive) in &hives {
        config.validate()?;

        for _ in 0..config.bee_count {
            let bee = Bee::spawn(hive_entity, hive, &config, &mut **rng)?;
            let transform = Transform::from_translation(bee.position())
                .with_rotation(heading_rotation(bee.heading()));
            commands.spawn((bee, transform));
        }

        info!(
            "spawned {} bees for hive {hive_entity} (entrance {})",
            config.bee_count,
            hive.entrance()
        );
    }

    Ok(())
}

/// System that advances every bee by one frame.
///
/// Each bee only touches its own state and reads its hive, so the
/// order bees are visited in does not matter.
pub fn update_bees(
    mut bees: Query<(Entity, &mut Bee, &mut Transform)>,
    hives: Query<&Hive>,
    config: Res<FlightConfig>,
    mut rng: ResMut<FlightRng>,
    mut events: MessageWriter<FlightEvent>,
) {
    for (entity, mut bee, mut transform) in &mut bees {
        let Ok(hive) = hives.get(bee.hive()) else {
            debug!("bee {entity} has no hive, skipping");
            continue;
        };

        match bee.advance(hive, &config, &mut **rng) {
            Ok(Some(kind)) => {
                events.write(FlightEvent { entity, kind });
            }
            Ok(None) => {}
            Err(err) => {
                error!("bee {entity} failed to advance: {err}");
                continue;
            }
        }

        transform.translation = bee.position();
        transform.rotation = heading_rotation(bee.heading());
    }
}
