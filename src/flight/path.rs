//! Procedural approach paths from a start point to a hive entrance.

use bevy::prelude::*;
use rand::Rng;

use crate::error::{ensure_finite, FlightError};
use crate::spline::BezierPath;

/// Lateral reach of the first handle on a wide arc.
pub const WIDE_ARC_LATERAL: f32 = 200.0;
/// Depth of the first handle on a wide arc, well in front of the hive.
pub const WIDE_ARC_DEPTH: f32 = 150.0;
/// Depth of the second handle on a wide arc, near the front face.
pub const WIDE_ARC_NEAR_DEPTH: f32 = 80.0;

/// Lateral half-range of the first handle on a direct approach.
pub const DIRECT_LATERAL: f32 = 100.0;
/// Depth of the first handle on a direct approach.
pub const DIRECT_DEPTH: f32 = 100.0;
/// Depth of the second handle on a direct approach.
pub const DIRECT_NEAR_DEPTH: f32 = 60.0;

const HANDLE_VERTICAL: f32 = 50.0;
const NEAR_LATERAL: f32 = 50.0;
const NEAR_RISE: f32 = 30.0;

/// Which way a wide arc swings around the hive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Reflect)]
pub enum ArcSide {
    /// Swing around toward -X.
    Left,
    /// Swing around toward +X.
    Right,
}

impl ArcSide {
    /// Pick a side with equal probability.
    pub fn random<R: Rng + ?Sized>(rng: &mut R) -> Self {
        if rng.gen_bool(0.5) {
            Self::Right
        } else {
            Self::Left
        }
    }

    /// `-1.0` for left, `1.0` for right.
    pub fn sign(self) -> f32 {
        match self {
            Self::Left => -1.0,
            Self::Right => 1.0,
        }
    }
}

/// The shape family a path was drawn from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Reflect)]
pub enum Approach {
    /// Start was behind the hive; the path swings wide around it.
    WideArc { side: ArcSide },
    /// Start was level with or in front of the hive; the path heads straight in.
    Direct,
}

/// A generated path and the branch that produced it.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlannedPath {
    pub curve: BezierPath,
    pub approach: Approach,
}

/// Plan a path from `start` to the `entrance` of a hive standing at `origin`.
///
/// Handles are placed relative to `origin`, so the same shapes come out
/// wherever the hive stands. Starts behind the hive (`start.z < origin.z`)
/// get a wide arc on a random side so the curve does not cut through the
/// hive body. Every other start gets a direct approach.
pub fn generate_path<R: Rng + ?Sized>(
    start: Vec3,
    origin: Vec3,
    entrance: Vec3,
    rng: &mut R,
) -> Result<PlannedPath, FlightError> {
    if start.z < origin.z {
        let side = ArcSide::random(rng);
        Ok(PlannedPath {
            curve: wide_arc_path(start, origin, entrance, side, rng)?,
            approach: Approach::WideArc { side },
        })
    } else {
        Ok(PlannedPath {
            curve: direct_path(start, origin, entrance, rng)?,
            approach: Approach::Direct,
        })
    }
}

/// Path that swings out to `side` in front of the hive before closing in.
pub fn wide_arc_path<R: Rng + ?Sized>(
    start: Vec3,
    origin: Vec3,
    entrance: Vec3,
    side: ArcSide,
    rng: &mut R,
) -> Result<BezierPath, FlightError> {
    let start = ensure_finite("path start", start)?;
    let origin = ensure_finite("hive position", origin)?;
    let entrance = ensure_finite("hive entrance", entrance)?;

    let p1 = origin
        + Vec3::new(
            side.sign() * WIDE_ARC_LATERAL,
            rng.gen_range(-HANDLE_VERTICAL..HANDLE_VERTICAL),
            WIDE_ARC_DEPTH,
        );
    let p2 = origin + near_handle(WIDE_ARC_NEAR_DEPTH, rng);

    checked(BezierPath::new(start, p1, p2, entrance))
}

/// Path that heads for the front of the hive with modest lateral drift.
pub fn direct_path<R: Rng + ?Sized>(
    start: Vec3,
    origin: Vec3,
    entrance: Vec3,
    rng: &mut R,
) -> Result<BezierPath, FlightError> {
    let start = ensure_finite("path start", start)?;
    let origin = ensure_finite("hive position", origin)?;
    let entrance = ensure_finite("hive entrance", entrance)?;

    let p1 = origin
        + Vec3::new(
            rng.gen_range(-DIRECT_LATERAL..DIRECT_LATERAL),
            rng.gen_range(-HANDLE_VERTICAL..HANDLE_VERTICAL),
            DIRECT_DEPTH,
        );
    let p2 = origin + near_handle(DIRECT_NEAR_DEPTH, rng);

    checked(BezierPath::new(start, p1, p2, entrance))
}

fn near_handle<R: Rng + ?Sized>(depth: f32, rng: &mut R) -> Vec3 {
    Vec3::new(
        rng.gen_range(-NEAR_LATERAL..NEAR_LATERAL),
        rng.gen_range(0.0..NEAR_RISE),
        depth,
    )
}

fn checked(curve: BezierPath) -> Result<BezierPath, FlightError> {
    if curve.is_finite() {
        Ok(curve)
    } else {
        Err(FlightError::DegeneratePath)
    }
}
