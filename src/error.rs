use bevy::prelude::*;
use thiserror::Error;

/// Errors raised while building hives, validating configuration or planning
/// flight paths.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum FlightError {
    /// A point fed into the flight model had a NaN or infinite coordinate.
    #[error("{what} has a non-finite coordinate: {point}")]
    NonFinitePoint { what: &'static str, point: Vec3 },

    /// Hive dimensions must be positive and finite.
    #[error(
        "invalid hive dimensions: width {width}, height {height}, depth {depth}, stilt height {stilt_height}"
    )]
    InvalidHiveDimensions {
        width: f32,
        height: f32,
        depth: f32,
        stilt_height: f32,
    },

    /// A `FlightConfig` value is out of range.
    #[error("invalid flight config: {0}")]
    InvalidConfig(&'static str),

    /// A generated path ended up with non-finite control points.
    #[error("generated flight path is degenerate")]
    DegeneratePath,
}

/// Reject points with NaN or infinite coordinates.
pub(crate) fn ensure_finite(what: &'static str, point: Vec3) -> Result<Vec3, FlightError> {
    if point.is_finite() {
        Ok(point)
    } else {
        Err(FlightError::NonFinitePoint { what, point })
    }
}
