use super::{AtomicPosition, MotionMode, MotionParameters, SharedParameters};
use crate::error::MotionError;
use crate::geometry::Vec3;
use std::f64::consts::TAU;
use std::sync::Arc;

/// What the engine needs from the motion controller for one block.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct SourceState {
    pub position: Vec3,
    pub min_distance: f32,
}

/// Turns motion parameters and transport time into a source position.
///
/// Every computed position is published to an [`AtomicPosition`] that other threads can read
/// through [`Self::position_handle`].
#[derive(Debug, Default, Clone)]
pub struct MotionController {
    last_position: Arc<AtomicPosition>,
}

impl MotionController {
    pub fn new() -> Self {
        Self::default()
    }

    /// Computes the source position at `time` seconds and publishes it.
    ///
    /// Pure with respect to `parameters` and `time`: seeking backwards or jumping ahead yields
    /// the same position as reaching that time by playing.
    pub fn compute_position(&self, parameters: &MotionParameters, time: f64) -> Vec3 {
        let position = match parameters.mode {
            MotionMode::Static => parameters.static_position,
            MotionMode::Orbit => orbit_position(parameters, time),
            // Path interpolation is not defined yet.
            MotionMode::Path => Vec3::ORIGIN,
        };

        self.last_position.store(position);
        position
    }

    /// Reads the current parameters from `shared` and computes the source state at `time`.
    ///
    /// # Errors
    ///
    /// [`MotionError::InvalidMotionMode`] if the stored mode is out of range. The last
    /// position is left untouched in that case.
    pub fn update(&self, shared: &SharedParameters, time: f64) -> Result<SourceState, MotionError> {
        let parameters = shared.snapshot()?;

        Ok(SourceState {
            position: self.compute_position(&parameters, time),
            min_distance: parameters.min_distance,
        })
    }

    /// The position published by the last call to [`Self::compute_position`].
    pub fn last_position(&self) -> Vec3 {
        self.last_position.load()
    }

    /// A handle for reading the last position from another thread.
    pub fn position_handle(&self) -> Arc<AtomicPosition> {
        Arc::clone(&self.last_position)
    }
}

/// Position on the orbit at `time` seconds.
pub fn orbit_position(parameters: &MotionParameters, time: f64) -> Vec3 {
    // Reduce the angle in double precision so long sessions keep their accuracy.
    let theta = ((time + f64::from(parameters.phase)) * f64::from(parameters.speed)).rem_euclid(TAU);

    let mut point = Vec3::rotation_2d(theta as f32) * parameters.orbit_radius;
    point.x *= parameters.orbit_stretch;
    let point = point.rotate_z(parameters.orbit_rotation);

    tilt(point, parameters.orbit_axis.normalized()) + parameters.orbit_center
}

/// Below this, `axis` is treated as vertical: the rotation axis would not normalize.
const VERTICAL_EPSILON: f32 = 1e-6;

/// Rotates a point of the horizontal plane onto the plane whose normal is `axis`.
fn tilt(point: Vec3, axis: Vec3) -> Vec3 {
    if axis.is_origin() {
        return point;
    }

    let rotation_axis = Vec3::UP.cross(axis);
    if rotation_axis.magnitude() < VERTICAL_EPSILON {
        if axis.z > 0.0 {
            point
        } else {
            Vec3::new(-point.x, point.y, point.z)
        }
    } else {
        let angle = Vec3::UP.dot(axis).clamp(-1.0, 1.0).acos();
        point.axis_angle_rotate(rotation_axis.normalized(), angle)
    }
}
