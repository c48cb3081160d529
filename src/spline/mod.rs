mod types;

pub use types::BezierPath;

use bevy::prelude::*;

/// Plugin that registers the Bézier path type for reflection.
pub struct SplinePlugin;

impl Plugin for SplinePlugin {
    fn build(&self, app: &mut App) {
        app.register_type::<BezierPath>();
    }
}
