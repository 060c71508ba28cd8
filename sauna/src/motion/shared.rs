//! Host-side parameter store, written by the UI or automation and read by the audio thread.

use super::parameters::*;
use super::{MotionMode, MotionParameters, PathNode};
use crate::error::MotionError;
use crate::geometry::Vec3;
use arc_swap::ArcSwap;
use atomic_float::AtomicF32;
use std::sync::atomic::{AtomicBool, AtomicU32, Ordering};
use std::sync::Arc;

#[derive(Debug)]
struct AtomicVec3 {
    x: AtomicF32,
    y: AtomicF32,
    z: AtomicF32,
}

impl AtomicVec3 {
    fn new(value: Vec3) -> Self {
        Self {
            x: AtomicF32::new(value.x),
            y: AtomicF32::new(value.y),
            z: AtomicF32::new(value.z),
        }
    }

    fn component(&self, axis: Axis) -> &AtomicF32 {
        match axis {
            Axis::X => &self.x,
            Axis::Y => &self.y,
            Axis::Z => &self.z,
        }
    }

    fn load(&self) -> Vec3 {
        Vec3::new(
            self.x.load(Ordering::Relaxed),
            self.y.load(Ordering::Relaxed),
            self.z.load(Ordering::Relaxed),
        )
    }
}

/// Lock-free storage for every motion parameter.
///
/// Each value is stored independently, so a snapshot taken while the host is writing may mix old
/// and new values. Parameters are smoothed by the next block anyway.
#[derive(Debug)]
pub struct SharedParameters {
    mode: AtomicU32,
    speed: AtomicF32,
    phase: AtomicF32,
    tempo_sync: AtomicBool,
    min_distance: AtomicF32,
    static_position: AtomicVec3,
    orbit_center: AtomicVec3,
    orbit_axis: AtomicVec3,
    orbit_radius: AtomicF32,
    orbit_stretch: AtomicF32,
    orbit_rotation: AtomicF32,
    path_nodes: ArcSwap<Vec<PathNode>>,
}

impl Default for SharedParameters {
    fn default() -> Self {
        Self::from(&MotionParameters::default())
    }
}

impl From<&MotionParameters> for SharedParameters {
    fn from(parameters: &MotionParameters) -> Self {
        let parameters = parameters.clamped();

        Self {
            mode: AtomicU32::new(parameters.mode.index()),
            speed: AtomicF32::new(parameters.speed),
            phase: AtomicF32::new(parameters.phase),
            tempo_sync: AtomicBool::new(parameters.tempo_sync),
            min_distance: AtomicF32::new(parameters.min_distance),
            static_position: AtomicVec3::new(parameters.static_position),
            orbit_center: AtomicVec3::new(parameters.orbit_center),
            orbit_axis: AtomicVec3::new(parameters.orbit_axis),
            orbit_radius: AtomicF32::new(parameters.orbit_radius),
            orbit_stretch: AtomicF32::new(parameters.orbit_stretch),
            orbit_rotation: AtomicF32::new(parameters.orbit_rotation),
            path_nodes: ArcSwap::new(parameters.path_nodes),
        }
    }
}

impl SharedParameters {
    pub fn new() -> Self {
        Self::default()
    }

    /// Reads every parameter into a [`MotionParameters`].
    ///
    /// Does not allocate: the path nodes are shared, not copied.
    ///
    /// # Errors
    ///
    /// [`MotionError::InvalidMotionMode`] if the stored mode index names no mode.
    pub fn snapshot(&self) -> Result<MotionParameters, MotionError> {
        let mode = MotionMode::try_from(self.mode.load(Ordering::Relaxed))?;

        Ok(MotionParameters {
            mode,
            speed: self.speed.load(Ordering::Relaxed),
            phase: self.phase.load(Ordering::Relaxed),
            tempo_sync: self.tempo_sync.load(Ordering::Relaxed),
            min_distance: self.min_distance.load(Ordering::Relaxed),
            static_position: self.static_position.load(),
            orbit_center: self.orbit_center.load(),
            orbit_axis: self.orbit_axis.load(),
            orbit_radius: self.orbit_radius.load(Ordering::Relaxed),
            orbit_stretch: self.orbit_stretch.load(Ordering::Relaxed),
            orbit_rotation: self.orbit_rotation.load(Ordering::Relaxed),
            path_nodes: self.path_nodes.load_full(),
        })
    }

    pub fn set_mode(&self, mode: MotionMode) {
        self.mode.store(mode.index(), Ordering::Relaxed);
    }

    /// Stores a raw choice index as sent by the host, without validating it.
    ///
    /// An unknown index surfaces as [`MotionError::InvalidMotionMode`] on the next [`Self::snapshot`].
    pub fn set_mode_index(&self, index: u32) {
        self.mode.store(index, Ordering::Relaxed);
    }

    pub fn mode_index(&self) -> u32 {
        self.mode.load(Ordering::Relaxed)
    }

    pub fn set_tempo_sync(&self, tempo_sync: bool) {
        self.tempo_sync.store(tempo_sync, Ordering::Relaxed);
    }

    pub fn tempo_sync(&self) -> bool {
        self.tempo_sync.load(Ordering::Relaxed)
    }

    /// Sets a float parameter, clamped into its range.
    ///
    /// Returns the value actually stored, or `None` if `parameter` is not a float parameter.
    pub fn set(&self, parameter: ParameterId, value: f32) -> Option<f32> {
        let range = parameter.float_range()?;
        let value = range.clamp(value);
        self.float(parameter)?.store(value, Ordering::Relaxed);
        Some(value)
    }

    /// Current value of a float parameter, `None` if `parameter` is not a float parameter.
    pub fn get(&self, parameter: ParameterId) -> Option<f32> {
        self.float(parameter)
            .map(|value| value.load(Ordering::Relaxed))
    }

    pub fn set_static_position(&self, position: Vec3) {
        self.set_vector(ParameterId::StaticPosition, position);
    }

    pub fn set_orbit_center(&self, center: Vec3) {
        self.set_vector(ParameterId::OrbitCenter, center);
    }

    pub fn set_orbit_axis(&self, axis: Vec3) {
        self.set_vector(ParameterId::OrbitAxis, axis);
    }

    /// Replaces the path travelled in [`MotionMode::Path`].
    pub fn set_path_nodes(&self, nodes: Vec<PathNode>) {
        self.path_nodes.store(Arc::new(nodes));
    }

    /// Puts every parameter back to its default value.
    pub fn reset(&self) {
        let defaults = MotionParameters::default();
        self.set_mode(defaults.mode);
        self.set_tempo_sync(defaults.tempo_sync);
        for parameter in ParameterId::ALL {
            if let Some(range) = parameter.float_range() {
                self.set(parameter, range.default);
            }
        }
        self.set_path_nodes(Vec::new());
    }

    fn set_vector(&self, parameter: fn(Axis) -> ParameterId, value: Vec3) {
        for axis in Axis::ALL {
            self.set(parameter(axis), axis.of(value));
        }
    }

    fn float(&self, parameter: ParameterId) -> Option<&AtomicF32> {
        let value = match parameter {
            ParameterId::Speed => &self.speed,
            ParameterId::Phase => &self.phase,
            ParameterId::MinDistance => &self.min_distance,
            ParameterId::StaticPosition(axis) => self.static_position.component(axis),
            ParameterId::OrbitCenter(axis) => self.orbit_center.component(axis),
            ParameterId::OrbitAxis(axis) => self.orbit_axis.component(axis),
            ParameterId::OrbitRadius => &self.orbit_radius,
            ParameterId::OrbitStretch => &self.orbit_stretch,
            ParameterId::OrbitRotation => &self.orbit_rotation,
            ParameterId::TempoSync | ParameterId::Mode => return None,
        };
        Some(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::DEFAULT_SOURCE_POSITION;

    #[test]
    fn test_default_snapshot() {
        let shared = SharedParameters::new();
        let snapshot = shared.snapshot().unwrap();

        assert_eq!(snapshot, MotionParameters::default());
        assert_eq!(snapshot.static_position, DEFAULT_SOURCE_POSITION);
    }

    #[test]
    fn test_invalid_mode_index() {
        let shared = SharedParameters::new();
        shared.set_mode_index(7);

        assert_eq!(
            shared.snapshot(),
            Err(MotionError::InvalidMotionMode { index: 7 })
        );

        shared.set_mode(MotionMode::Orbit);
        assert_eq!(shared.snapshot().unwrap().mode, MotionMode::Orbit);
    }

    #[test]
    fn test_set_clamps() {
        let shared = SharedParameters::new();

        assert_eq!(shared.set(ParameterId::Speed, 100.0), Some(10.0));
        assert_eq!(
            shared.set(ParameterId::OrbitAxis(Axis::X), -4.0),
            Some(-1.0)
        );
        assert_eq!(shared.set(ParameterId::Mode, 1.0), None);
        assert_eq!(shared.get(ParameterId::Speed), Some(10.0));
    }

    #[test]
    fn test_set_vector() {
        let shared = SharedParameters::new();
        shared.set_orbit_center(Vec3::new(1.0, -20.0, 3.0));

        assert_eq!(
            shared.snapshot().unwrap().orbit_center,
            Vec3::new(1.0, -10.0, 3.0)
        );
    }

    #[test]
    fn test_path_nodes_are_shared() {
        let shared = SharedParameters::new();
        shared.set_path_nodes(vec![PathNode {
            position: Vec3::new(1.0, 0.0, 0.0),
            next_duration: 2.0,
        }]);

        let a = shared.snapshot().unwrap();
        let b = shared.snapshot().unwrap();
        assert!(Arc::ptr_eq(&a.path_nodes, &b.path_nodes));
        assert_eq!(a.path_nodes.len(), 1);
    }

    #[test]
    fn test_reset() {
        let shared = SharedParameters::new();
        shared.set_mode(MotionMode::Path);
        shared.set(ParameterId::OrbitRadius, 7.0);
        shared.set_tempo_sync(false);

        shared.reset();

        assert_eq!(shared.snapshot().unwrap(), MotionParameters::default());
    }
}
