use bevy::prelude::*;

/// A single cubic Bézier segment.
///
/// Points `p0` and `p3` are on the curve, `p1` and `p2` are handles.
/// The four points are named fields rather than a list, so a path can never
/// carry the wrong number of control points.
#[derive(Debug, Clone, Copy, PartialEq, Default, Reflect)]
#[reflect(Default)]
pub struct BezierPath {
    /// Start anchor, reached at `t = 0`.
    pub p0: Vec3,
    /// Handle leaving `p0`.
    pub p1: Vec3,
    /// Handle entering `p3`.
    pub p2: Vec3,
    /// End anchor, reached at `t = 1`.
    pub p3: Vec3,
}

impl BezierPath {
    /// Create a segment from its four control points.
    pub fn new(p0: Vec3, p1: Vec3, p2: Vec3, p3: Vec3) -> Self {
        Self { p0, p1, p2, p3 }
    }

    /// Evaluate the curve at parameter `t`.
    ///
    /// `t` is not clamped: values slightly outside `[0, 1]` extrapolate the
    /// cubic polynomial past its end points.
    pub fn evaluate(&self, t: f32) -> Vec3 {
        let t2 = t * t;
        let t3 = t2 * t;
        let mt = 1.0 - t;
        let mt2 = mt * mt;
        let mt3 = mt2 * mt;

        self.p0 * mt3 + self.p1 * 3.0 * mt2 * t + self.p2 * 3.0 * mt * t2 + self.p3 * t3
    }

    /// Evaluate the first derivative at parameter `t`.
    pub fn evaluate_tangent(&self, t: f32) -> Vec3 {
        let t2 = t * t;
        let mt = 1.0 - t;
        let mt2 = mt * mt;

        (self.p1 - self.p0) * 3.0 * mt2
            + (self.p2 - self.p1) * 6.0 * mt * t
            + (self.p3 - self.p2) * 3.0 * t2
    }

    /// The control points in order.
    pub fn points(&self) -> [Vec3; 4] {
        [self.p0, self.p1, self.p2, self.p3]
    }

    /// Check that every coordinate of every control point is finite.
    pub fn is_finite(&self) -> bool {
        self.points().iter().all(|p| p.is_finite())
    }

    /// Sample the curve into `samples + 1` evenly spaced (in `t`) points.
    pub fn sample(&self, samples: usize) -> Vec<Vec3> {
        if samples == 0 {
            return vec![self.p0];
        }

        (0..=samples)
            .map(|i| self.evaluate(i as f32 / samples as f32))
            .collect()
    }
}
