//! The stationary hive the swarm flies to and from.

use bevy::prelude::*;

use crate::error::{ensure_finite, FlightError};

/// Physical size of a hive.
#[derive(Debug, Clone, Copy, PartialEq, Reflect)]
#[reflect(Default)]
pub struct HiveDimensions {
    /// Extent along X.
    pub width: f32,
    /// Extent of the body along Y.
    pub height: f32,
    /// Extent along Z. The entrance sits on the +Z face.
    pub depth: f32,
    /// Length of the stilts the body stands on.
    pub stilt_height: f32,
}

impl Default for HiveDimensions {
    fn default() -> Self {
        Self {
            width: 60.0,
            height: 60.0,
            depth: 60.0,
            stilt_height: 40.0,
        }
    }
}

impl HiveDimensions {
    fn is_valid(&self) -> bool {
        [self.width, self.height, self.depth, self.stilt_height]
            .iter()
            .all(|v| v.is_finite() && *v > 0.0)
    }
}

/// A hive: a fixed landmark whose entrance every bee targets.
///
/// `position` is the bottom centre of the hive body; the stilts hang below it.
/// The entrance is on the front (+Z) face, level with the body's vertical
/// centre. Neither changes after construction.
#[derive(Component, Debug, Clone, Reflect)]
#[reflect(Component)]
#[require(Transform, Visibility)]
pub struct Hive {
    position: Vec3,
    dimensions: HiveDimensions,
    entrance: Vec3,
}

impl Hive {
    /// Create a hive at `position` with the given dimensions.
    pub fn new(position: Vec3, dimensions: HiveDimensions) -> Result<Self, FlightError> {
        let position = ensure_finite("hive position", position)?;
        if !dimensions.is_valid() {
            return Err(FlightError::InvalidHiveDimensions {
                width: dimensions.width,
                height: dimensions.height,
                depth: dimensions.depth,
                stilt_height: dimensions.stilt_height,
            });
        }

        let entrance = position + Vec3::new(0.0, dimensions.height / 2.0, dimensions.depth / 2.0);

        Ok(Self {
            position,
            dimensions,
            entrance,
        })
    }

    /// Create a hive with default dimensions.
    pub fn at(position: Vec3) -> Result<Self, FlightError> {
        Self::new(position, HiveDimensions::default())
    }

    /// Bottom centre of the hive body.
    pub fn position(&self) -> Vec3 {
        self.position
    }

    /// Centre of the hive body.
    pub fn body_center(&self) -> Vec3 {
        self.position + Vec3::Y * (self.dimensions.height / 2.0)
    }

    /// The point bees fly into.
    pub fn entrance(&self) -> Vec3 {
        self.entrance
    }

    /// Size of the hive.
    pub fn dimensions(&self) -> HiveDimensions {
        self.dimensions
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_entrance_at_origin() {
        let hive = Hive::at(Vec3::ZERO).unwrap();
        assert_eq!(hive.entrance(), Vec3::new(0.0, 30.0, 30.0));
        assert_eq!(hive.body_center().y, hive.entrance().y);
    }

    #[test]
    fn test_entrance_follows_position() {
        let hive = Hive::at(Vec3::new(100.0, -20.0, 5.0)).unwrap();
        assert_eq!(hive.entrance(), Vec3::new(100.0, 10.0, 35.0));
    }

    #[test]
    fn test_custom_dimensions() {
        let dims = HiveDimensions {
            width: 40.0,
            height: 80.0,
            depth: 20.0,
            stilt_height: 10.0,
        };
        let hive = Hive::new(Vec3::ZERO, dims).unwrap();
        assert_eq!(hive.entrance(), Vec3::new(0.0, 40.0, 10.0));
        assert_eq!(hive.dimensions(), dims);
    }

    #[test]
    fn test_rejects_bad_dimensions() {
        let dims = HiveDimensions {
            depth: -1.0,
            ..default()
        };
        assert!(matches!(
            Hive::new(Vec3::ZERO, dims),
            Err(FlightError::InvalidHiveDimensions { .. })
        ));
    }

    #[test]
    fn test_rejects_non_finite_position() {
        let err = Hive::at(Vec3::new(f32::NAN, 0.0, 0.0)).unwrap_err();
        assert!(matches!(err, FlightError::NonFinitePoint { .. }));
    }
}
