use std::f32::consts::TAU;

use bevy::prelude::*;
use rand::Rng;

use crate::config::FlightConfig;
use crate::error::{ensure_finite, FlightError};
use crate::geometry::heading_from_displacement;
use crate::hive::Hive;
use crate::spline::BezierPath;

use super::path::generate_path;

/// Which half of the round trip a bee is on.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Reflect)]
#[reflect(Default)]
pub enum FlightPhase {
    /// Flying toward the hive; progress rises from 0 to 1.
    #[default]
    Entering,
    /// Flying away from the hive; progress falls from 1 to 0.
    Exiting,
}

impl FlightPhase {
    /// Sign applied to speed: `1.0` while entering, `-1.0` while exiting.
    pub fn direction(self) -> f32 {
        match self {
            Self::Entering => 1.0,
            Self::Exiting => -1.0,
        }
    }
}

/// A bee flying between the open air and its hive.
///
/// Each frame the bee moves `speed` along its current cubic Bézier path,
/// forward while entering and backward while exiting. The path always ends
/// at the hive entrance (`p3`), so arriving and leaving both happen at `t = 1`.
#[derive(Component, Debug, Clone, Reflect)]
#[reflect(Component)]
#[require(Transform, Visibility)]
pub struct Bee {
    hive: Entity,
    position: Vec3,
    progress: f32,
    speed: f32,
    phase: FlightPhase,
    path: BezierPath,
    heading: f32,
}

impl Bee {
    /// Create a bee at a random point on the spawn sphere around `hive`,
    /// heading for its entrance.
    pub fn spawn<R: Rng + ?Sized>(
        entity: Entity,
        hive: &Hive,
        config: &FlightConfig,
        rng: &mut R,
    ) -> Result<Self, FlightError> {
        let start = spawn_point(hive.position(), config, rng);
        let speed = config.random_speed(rng);
        Self::from_start(entity, hive, start, speed, config, rng)
    }

    /// Create a bee at `start` flying toward the entrance of `hive` at `speed`.
    ///
    /// The initial heading looks ahead by `config.lookahead`, like every
    /// later step.
    pub fn from_start<R: Rng + ?Sized>(
        entity: Entity,
        hive: &Hive,
        start: Vec3,
        speed: f32,
        config: &FlightConfig,
        rng: &mut R,
    ) -> Result<Self, FlightError> {
        if !(speed.is_finite() && speed > 0.0) {
            return Err(FlightError::InvalidConfig("bee speed must be positive"));
        }

        let planned = generate_path(start, hive.position(), hive.entrance(), rng)?;
        let mut bee = Self {
            hive: entity,
            position: start,
            progress: 0.0,
            speed,
            phase: FlightPhase::Entering,
            path: planned.curve,
            heading: 0.0,
        };
        bee.heading = bee.lookahead_heading(config.lookahead);
        Ok(bee)
    }

    /// The hive entity this bee belongs to.
    pub fn hive(&self) -> Entity {
        self.hive
    }

    /// Current position.
    pub fn position(&self) -> Vec3 {
        self.position
    }

    /// Facing angle in the XZ plane, `atan2(dz, dx)` of the direction of travel.
    pub fn heading(&self) -> f32 {
        self.heading
    }

    /// Curve parameter along the current path.
    pub fn progress(&self) -> f32 {
        self.progress
    }

    /// Progress covered per frame in the current phase.
    pub fn speed(&self) -> f32 {
        self.speed
    }

    /// Current phase.
    pub fn phase(&self) -> FlightPhase {
        self.phase
    }

    /// Control points of the current path.
    pub fn path(&self) -> &BezierPath {
        &self.path
    }

    /// Whether the bee is flying toward the hive.
    pub fn is_entering(&self) -> bool {
        self.phase == FlightPhase::Entering
    }

    /// Advance the bee by one frame.
    ///
    /// Moves progress by `speed` in the phase's direction, applies at most one
    /// phase transition when progress crosses a boundary, then re-evaluates
    /// position and heading. Returns the transition that fired, if any.
    pub fn advance<R: Rng + ?Sized>(
        &mut self,
        hive: &Hive,
        config: &FlightConfig,
        rng: &mut R,
    ) -> Result<Option<FlightEventKind>, FlightError> {
        let progress = self.progress + self.speed * self.phase.direction();

        let event = match self.phase {
            FlightPhase::Entering if progress >= 1.0 => {
                self.begin_exit(hive, config, rng)?;
                Some(FlightEventKind::ArrivedAtHive)
            }
            FlightPhase::Exiting if progress <= 0.0 => {
                self.respawn(hive, config, rng)?;
                Some(FlightEventKind::Respawned)
            }
            _ => {
                self.progress = progress;
                None
            }
        };

        self.position = self.path.evaluate(self.progress);
        self.heading = self.lookahead_heading(config.lookahead);
        Ok(event)
    }

    /// Turn around at the entrance onto a fresh outbound path.
    ///
    /// The outbound path still ends at the entrance, and progress restarts at
    /// 1, so the first exiting position is exactly where the bee arrived.
    fn begin_exit<R: Rng + ?Sized>(
        &mut self,
        hive: &Hive,
        config: &FlightConfig,
        rng: &mut R,
    ) -> Result<(), FlightError> {
        let entrance = hive.entrance();
        let mut path = generate_path(entrance, hive.position(), entrance, rng)?.curve;
        path.p3 = entrance;
        path.p0 = ensure_finite("exit point", exit_point(hive.position(), config, rng))?;

        self.position = entrance;
        self.path = path;
        self.progress = 1.0;
        self.phase = FlightPhase::Exiting;
        trace!("bee reached hive entrance {entrance}, leaving toward {}", path.p0);
        Ok(())
    }

    /// Start a new round trip from a random point on the spawn sphere.
    fn respawn<R: Rng + ?Sized>(
        &mut self,
        hive: &Hive,
        config: &FlightConfig,
        rng: &mut R,
    ) -> Result<(), FlightError> {
        let start = spawn_point(hive.position(), config, rng);
        let planned = generate_path(start, hive.position(), hive.entrance(), rng)?;

        self.position = start;
        self.path = planned.curve;
        self.progress = 0.0;
        self.speed = config.random_speed(rng);
        self.phase = FlightPhase::Entering;
        trace!("bee respawned at {start} with {:?} approach", planned.approach);
        Ok(())
    }

    fn lookahead_heading(&self, lookahead: f32) -> f32 {
        let ahead = self
            .path
            .evaluate(self.progress + lookahead * self.phase.direction());
        heading_from_displacement(ahead - self.position)
    }
}

/// Random point on the horizontal spawn circle around `center`, at a random
/// height.
fn spawn_point<R: Rng + ?Sized>(center: Vec3, config: &FlightConfig, rng: &mut R) -> Vec3 {
    let angle = rng.gen_range(0.0..TAU);
    center
        + Vec3::new(
            angle.cos() * config.spawn_radius,
            config.random_height(rng),
            angle.sin() * config.spawn_radius,
        )
}

/// Random far point around `center` a departing bee flies out to.
fn exit_point<R: Rng + ?Sized>(center: Vec3, config: &FlightConfig, rng: &mut R) -> Vec3 {
    let reach = config.spawn_radius;
    center
        + Vec3::new(
            rng.gen_range(-reach..=reach),
            config.random_height(rng),
            rng.gen_range(-reach..=reach),
        )
}

/// Message emitted when a bee changes phase.
#[derive(Message, Debug, Clone)]
pub struct FlightEvent {
    /// The bee entity.
    pub entity: Entity,
    /// The type of event.
    pub kind: FlightEventKind,
}

/// Types of flight events.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FlightEventKind {
    /// Bee reached the hive entrance and turned around.
    ArrivedAtHive,
    /// Bee finished leaving and restarted from the spawn sphere.
    Respawned,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::flight::path::{WIDE_ARC_DEPTH, WIDE_ARC_LATERAL};
    use crate::geometry::heading_direction;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn hive() -> Hive {
        Hive::at(Vec3::ZERO).unwrap()
    }

    fn entrance() -> Vec3 {
        hive().entrance()
    }

    fn fixed_speed_config(speed: f32) -> FlightConfig {
        FlightConfig::default().with_speed_range(speed, speed)
    }

    fn bee_at(start: Vec3, config: &FlightConfig, rng: &mut StdRng) -> Bee {
        Bee::from_start(Entity::PLACEHOLDER, &hive(), start, config.min_speed, config, rng)
            .unwrap()
    }

    #[test]
    fn test_spawned_bee_starts_on_sphere() {
        let config = FlightConfig::default();
        let mut rng = StdRng::seed_from_u64(11);
        let bee = Bee::spawn(Entity::PLACEHOLDER, &hive(), &config, &mut rng).unwrap();

        let horizontal = Vec2::new(bee.position().x, bee.position().z).length();
        assert!((horizontal - config.spawn_radius).abs() < 1e-2);
        assert!(bee.position().y.abs() <= config.vertical_spread);
        assert_eq!(bee.progress(), 0.0);
        assert!(bee.is_entering());
        assert_eq!(bee.path().p0, bee.position());
        assert_eq!(bee.path().p3, entrance());
        assert!((config.min_speed..=config.max_speed).contains(&bee.speed()));
    }

    #[test]
    fn test_rejects_non_positive_speed() {
        let config = FlightConfig::default();
        let mut rng = StdRng::seed_from_u64(12);
        let result = Bee::from_start(
            Entity::PLACEHOLDER,
            &hive(),
            Vec3::Z * 400.0,
            0.0,
            &config,
            &mut rng,
        );
        assert!(result.is_err());
    }

    #[test]
    fn test_arrives_at_entrance_from_front() {
        let config = fixed_speed_config(0.004);
        let mut rng = StdRng::seed_from_u64(13);
        let mut bee = bee_at(Vec3::new(0.0, 0.0, 400.0), &config, &mut rng);

        let mut arrival_step = None;
        for step in 1..=1000 {
            let event = bee.advance(&hive(), &config, &mut rng).unwrap();
            if event == Some(FlightEventKind::ArrivedAtHive) {
                arrival_step = Some(step);
                assert!((bee.position() - entrance()).length() < 1e-6);
                assert_eq!(bee.progress(), 1.0);
                assert_eq!(bee.phase(), FlightPhase::Exiting);
                break;
            }
            assert!(bee.progress() < 1.0);
            assert_eq!(bee.path().p3, entrance());
        }

        // Summing 0.004 in f32 first reaches 1 on step 250.
        let step = arrival_step.expect("bee never reached the hive");
        assert!(step <= 250, "arrived at step {step}");
    }

    #[test]
    fn test_behind_start_swings_wide() {
        let config = fixed_speed_config(0.004);
        let mut rng = StdRng::seed_from_u64(14);
        let bee = bee_at(Vec3::new(0.0, 0.0, -400.0), &config, &mut rng);

        assert_eq!(bee.path().p1.z, WIDE_ARC_DEPTH);
        assert_eq!(bee.path().p1.x.abs(), WIDE_ARC_LATERAL);
    }

    #[test]
    fn test_no_jump_across_arrival() {
        let config = fixed_speed_config(0.005);
        let mut rng = StdRng::seed_from_u64(15);
        let mut bee = bee_at(Vec3::new(250.0, 40.0, 300.0), &config, &mut rng);

        let mut arrived = false;
        for _ in 0..1000 {
            let before = bee.position();
            let old_path = *bee.path();
            let event = bee.advance(&hive(), &config, &mut rng).unwrap();
            if event == Some(FlightEventKind::ArrivedAtHive) {
                // One step covers at most `speed` of the old path's parameter.
                let max_tangent = (0..=10)
                    .map(|i| old_path.evaluate_tangent(1.0 - 0.005 * i as f32 / 10.0).length())
                    .fold(0.0, f32::max);
                assert!(bee.position().distance(before) <= max_tangent * 0.005 * 1.1 + 1e-3);
                assert_eq!(bee.position(), entrance());
                assert_eq!(bee.path().p3, entrance());

                // First exiting step stays next to the entrance.
                let at_entrance = bee.position();
                bee.advance(&hive(), &config, &mut rng).unwrap();
                assert!(bee.position().distance(at_entrance) < 10.0);
                assert_eq!(bee.phase(), FlightPhase::Exiting);
                arrived = true;
                break;
            }
        }
        assert!(arrived, "bee never reached the hive");
    }

    #[test]
    fn test_exit_path_leaves_from_entrance() {
        let config = fixed_speed_config(0.01);
        let mut rng = StdRng::seed_from_u64(16);
        let mut bee = Bee::spawn(Entity::PLACEHOLDER, &hive(), &config, &mut rng).unwrap();

        for _ in 0..1000 {
            if !bee.is_entering() {
                break;
            }
            bee.advance(&hive(), &config, &mut rng).unwrap();
        }
        assert!(!bee.is_entering(), "bee never reached the hive");

        let path = *bee.path();
        assert_eq!(path.p3, entrance());
        assert!(path.p0.x.abs() <= config.spawn_radius);
        assert!(path.p0.z.abs() <= config.spawn_radius);
        assert!(path.p0.y.abs() <= config.vertical_spread);
        assert!((path.evaluate(1.0) - entrance()).length() < 1e-4);
    }

    #[test]
    fn test_exit_then_respawn() {
        let config = fixed_speed_config(0.02);
        let mut rng = StdRng::seed_from_u64(17);
        let mut bee = Bee::spawn(Entity::PLACEHOLDER, &hive(), &config, &mut rng).unwrap();

        let mut events = Vec::new();
        for _ in 0..230 {
            if let Some(kind) = bee.advance(&hive(), &config, &mut rng).unwrap() {
                events.push(kind);
            }
            assert!((0.0..=1.0).contains(&bee.progress()));
            if bee.is_entering() {
                assert_eq!(bee.path().p3, entrance());
            }
        }

        // 50 or 51 steps per phase: two full round trips.
        assert_eq!(
            events,
            vec![
                FlightEventKind::ArrivedAtHive,
                FlightEventKind::Respawned,
                FlightEventKind::ArrivedAtHive,
                FlightEventKind::Respawned,
            ]
        );
    }

    #[test]
    fn test_respawn_restarts_entering_phase() {
        let config = fixed_speed_config(0.05);
        let mut rng = StdRng::seed_from_u64(18);
        let mut bee = Bee::spawn(Entity::PLACEHOLDER, &hive(), &config, &mut rng).unwrap();

        let respawned = (0..1000).any(|_| {
            bee.advance(&hive(), &config, &mut rng).unwrap() == Some(FlightEventKind::Respawned)
        });
        assert!(respawned, "bee never respawned");

        assert!(bee.is_entering());
        assert_eq!(bee.progress(), 0.0);
        assert_eq!(bee.position(), bee.path().p0);
        assert_eq!(bee.path().p3, entrance());
        let horizontal = Vec2::new(bee.position().x, bee.position().z).length();
        assert!((horizontal - config.spawn_radius).abs() < 1e-2);
    }

    #[test]
    fn test_heading_follows_travel() {
        let config = fixed_speed_config(0.004);
        let mut rng = StdRng::seed_from_u64(19);
        let mut bee = bee_at(Vec3::new(0.0, 0.0, 400.0), &config, &mut rng);

        for _ in 0..100 {
            let before = bee.position();
            bee.advance(&hive(), &config, &mut rng).unwrap();
            let travel = bee.position() - before;
            let facing = heading_direction(bee.heading());
            let planar = Vec3::new(travel.x, 0.0, travel.z);
            if planar.length() > 1e-3 {
                assert!(facing.dot(planar.normalize()) > 0.9);
            }
        }
    }

    #[test]
    fn test_initial_heading_uses_configured_lookahead() {
        let start = Vec3::new(300.0, 20.0, 250.0);
        for lookahead in [0.01, 0.3] {
            let config = FlightConfig {
                lookahead,
                ..fixed_speed_config(0.004)
            };
            let mut rng = StdRng::seed_from_u64(20);
            let bee = bee_at(start, &config, &mut rng);

            let expected = heading_from_displacement(bee.path().evaluate(lookahead) - start);
            assert!(
                (bee.heading() - expected).abs() < 1e-5,
                "lookahead {lookahead}: heading {} != {expected}",
                bee.heading()
            );
        }
    }

    #[test]
    fn test_offset_hive_spawns_and_exits_around_it() {
        let hive = Hive::at(Vec3::new(1000.0, 0.0, 500.0)).unwrap();
        let config = fixed_speed_config(0.05);
        let mut rng = StdRng::seed_from_u64(21);

        for _ in 0..20 {
            let bee = Bee::spawn(Entity::PLACEHOLDER, &hive, &config, &mut rng).unwrap();
            let offset = bee.position() - hive.position();
            let horizontal = Vec2::new(offset.x, offset.z).length();
            assert!((horizontal - config.spawn_radius).abs() < 1e-2, "{horizontal}");
            assert!(offset.y.abs() <= config.vertical_spread);
            assert_eq!(bee.path().p3, hive.entrance());
        }

        let mut bee = Bee::spawn(Entity::PLACEHOLDER, &hive, &config, &mut rng).unwrap();
        let arrived = (0..1000).any(|_| {
            bee.advance(&hive, &config, &mut rng).unwrap() == Some(FlightEventKind::ArrivedAtHive)
        });
        assert!(arrived, "bee never reached the offset hive");
        assert_eq!(bee.position(), hive.entrance());

        let far = bee.path().p0 - hive.position();
        assert!(far.x.abs() <= config.spawn_radius);
        assert!(far.z.abs() <= config.spawn_radius);
        assert!(far.y.abs() <= config.vertical_spread);
    }
}
