//! Tunables for the bee flight model and the random source it draws from.

use bevy::prelude::*;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::error::FlightError;

/// Parameter offset of the heading sample unless configured otherwise.
pub const DEFAULT_LOOKAHEAD: f32 = 0.01;

/// Settings for the bee swarm.
///
/// Insert this resource to override the defaults, before or after adding
/// [`BeeFlightPlugin`](crate::flight::BeeFlightPlugin); the plugin only
/// initializes it when missing.
#[derive(Resource, Debug, Clone, PartialEq, Reflect)]
#[reflect(Resource, Default)]
pub struct FlightConfig {
    /// Number of bees spawned for each hive.
    pub bee_count: usize,
    /// Lower bound of a phase's speed, in progress units per frame.
    pub min_speed: f32,
    /// Upper bound of a phase's speed, in progress units per frame.
    pub max_speed: f32,
    /// Radius of the sphere around the hive where bees respawn.
    /// Also bounds the horizontal extent of exit points.
    pub spawn_radius: f32,
    /// Half-height of the band spawn and exit points are drawn from.
    pub vertical_spread: f32,
    /// Parameter offset of the sample used to derive heading.
    pub lookahead: f32,
    /// Seed for [`FlightRng`]. `None` seeds from entropy.
    ///
    /// Whenever the config changes to a seed the generator was not built
    /// from, the generator is rebuilt from it before the next bee update.
    /// Clearing the seed keeps the current generator running.
    pub seed: Option<u64>,
}

impl Default for FlightConfig {
    fn default() -> Self {
        Self {
            bee_count: 10,
            min_speed: 0.002,
            max_speed: 0.006,
            spawn_radius: 400.0,
            vertical_spread: 100.0,
            lookahead: DEFAULT_LOOKAHEAD,
            seed: None,
        }
    }
}

impl FlightConfig {
    /// Set the number of bees per hive.
    pub fn with_bee_count(mut self, count: usize) -> Self {
        self.bee_count = count;
        self
    }

    /// Set the per-phase speed range.
    pub fn with_speed_range(mut self, min: f32, max: f32) -> Self {
        self.min_speed = min;
        self.max_speed = max;
        self
    }

    /// Set the spawn sphere radius.
    pub fn with_spawn_radius(mut self, radius: f32) -> Self {
        self.spawn_radius = radius;
        self
    }

    /// Seed the random source for reproducible runs.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Check that every value is in range.
    ///
    /// Speeds are capped at one progress unit per frame so a single step can
    /// cross at most one phase boundary.
    pub fn validate(&self) -> Result<(), FlightError> {
        if !(self.min_speed.is_finite() && self.min_speed > 0.0) {
            return Err(FlightError::InvalidConfig("min_speed must be positive"));
        }
        if !(self.max_speed.is_finite() && self.max_speed >= self.min_speed) {
            return Err(FlightError::InvalidConfig(
                "max_speed must not be below min_speed",
            ));
        }
        if self.max_speed > 1.0 {
            return Err(FlightError::InvalidConfig("max_speed must not exceed 1.0"));
        }
        if !(self.spawn_radius.is_finite() && self.spawn_radius > 0.0) {
            return Err(FlightError::InvalidConfig("spawn_radius must be positive"));
        }
        if !(self.vertical_spread.is_finite() && self.vertical_spread >= 0.0) {
            return Err(FlightError::InvalidConfig(
                "vertical_spread must not be negative",
            ));
        }
        if !(self.lookahead.is_finite() && self.lookahead > 0.0) {
            return Err(FlightError::InvalidConfig("lookahead must be positive"));
        }
        Ok(())
    }

    /// Draw a fresh phase speed.
    pub fn random_speed<R: Rng + ?Sized>(&self, rng: &mut R) -> f32 {
        rng.gen_range(self.min_speed..=self.max_speed)
    }

    /// Draw a height within the vertical band.
    pub(crate) fn random_height<R: Rng + ?Sized>(&self, rng: &mut R) -> f32 {
        rng.gen_range(-self.vertical_spread..=self.vertical_spread)
    }
}

/// Random source shared by every bee.
///
/// Path shapes, speeds and respawn points all draw from here, so a seeded
/// config replays the same flight.
#[derive(Resource, Debug, Clone, Deref, DerefMut)]
pub struct FlightRng {
    #[deref]
    rng: StdRng,
    seed: Option<u64>,
}

impl FlightRng {
    /// Create a generator from an optional seed.
    pub fn new(seed: Option<u64>) -> Self {
        let rng = match seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        Self { rng, seed }
    }

    /// The seed this generator was built from, `None` if from entropy.
    pub fn seed(&self) -> Option<u64> {
        self.seed
    }

    /// Whether `config` asks for a seed this generator was not built from.
    pub fn needs_reseed(&self, config: &FlightConfig) -> bool {
        config.seed.is_some() && config.seed != self.seed
    }
}

impl FromWorld for FlightRng {
    fn from_world(world: &mut World) -> Self {
        let seed = world.get_resource::<FlightConfig>().and_then(|c| c.seed);
        Self::new(seed)
    }
}
