//! Geometry utilities for orienting bees along their paths.

use bevy::prelude::*;

/// Planar heading of a displacement, measured in the XZ plane.
///
/// Returns `atan2(dz, dx)`: `0` points along +X, `π/2` along +Z.
/// The vertical component is ignored.
pub fn heading_from_displacement(delta: Vec3) -> f32 {
    delta.z.atan2(delta.x)
}

/// Rotation about +Y that turns a model's local +X axis toward `heading`.
///
/// Bee models are built nose-first along +X, so the returned rotation maps
/// +X onto `(cos h, 0, sin h)`. In Bevy's right-handed Y-up frame a positive
/// rotation about +Y carries +X toward -Z, hence the sign flip.
pub fn heading_rotation(heading: f32) -> Quat {
    Quat::from_rotation_y(-heading)
}

/// Unit vector in the XZ plane for a heading.
pub fn heading_direction(heading: f32) -> Vec3 {
    Vec3::new(heading.cos(), 0.0, heading.sin())
}
