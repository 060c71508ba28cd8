//! Motion parameter set, ranges and host-facing metadata.

use super::MotionMode;
use crate::geometry::{Vec3, DEFAULT_SOURCE_POSITION};
use std::f32::consts::{PI, TAU};
use std::sync::Arc;

/// Closed range of a float parameter, with the value it takes on a fresh instance.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct FloatRange {
    pub min: f32,
    pub max: f32,
    pub default: f32,
}

impl FloatRange {
    pub const fn new(min: f32, max: f32, default: f32) -> Self {
        Self { min, max, default }
    }

    /// Clamps `value` into the range. NaN maps to the default.
    pub fn clamp(&self, value: f32) -> f32 {
        if value.is_nan() {
            self.default
        } else {
            value.clamp(self.min, self.max)
        }
    }

    pub fn contains(&self, value: f32) -> bool {
        (self.min..=self.max).contains(&value)
    }
}

pub const SPEED_RANGE: FloatRange = FloatRange::new(0.01, 10.0, 1.0);
pub const PHASE_RANGE: FloatRange = FloatRange::new(0.0, TAU, 0.0);
pub const MIN_DISTANCE_RANGE: FloatRange = FloatRange::new(0.1, 10.0, 0.2);
pub const ORBIT_RADIUS_RANGE: FloatRange = FloatRange::new(0.0, 10.0, 2.0);
pub const ORBIT_STRETCH_RANGE: FloatRange = FloatRange::new(0.0, 10.0, 1.0);
pub const ORBIT_ROTATION_RANGE: FloatRange = FloatRange::new(-PI, PI, 0.0);

/// Per-axis bounds of the static position (defaults come from [`DEFAULT_SOURCE_POSITION`]).
pub const STATIC_POSITION_BOUNDS: (f32, f32) = (-2.0, 2.0);
pub const ORBIT_CENTER_BOUNDS: (f32, f32) = (-10.0, 10.0);
pub const ORBIT_AXIS_BOUNDS: (f32, f32) = (-1.0, 1.0);

pub const DEFAULT_ORBIT_AXIS: Vec3 = Vec3::UP;
pub const DEFAULT_TEMPO_SYNC: bool = true;

/// A component of a vector parameter.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum Axis {
    X,
    Y,
    Z,
}

impl Axis {
    pub const ALL: [Self; 3] = [Self::X, Self::Y, Self::Z];

    pub const fn index(self) -> usize {
        match self {
            Self::X => 0,
            Self::Y => 1,
            Self::Z => 2,
        }
    }

    pub fn of(self, vector: Vec3) -> f32 {
        vector.to_array()[self.index()]
    }
}

/// Every parameter the host exposes.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum ParameterId {
    Speed,
    Phase,
    TempoSync,
    MinDistance,
    Mode,
    StaticPosition(Axis),
    OrbitCenter(Axis),
    OrbitAxis(Axis),
    OrbitRadius,
    OrbitStretch,
    OrbitRotation,
}

/// Value domain of a parameter.
#[derive(Debug, Copy, Clone, PartialEq)]
pub enum ParameterKind {
    Float(FloatRange),
    Bool { default: bool },
    Choice {
        options: &'static [&'static str],
        default: u32,
    },
}

/// Registration data for one host parameter.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct ParameterInfo {
    /// Stable identifier, used by hosts for automation and state.
    pub id: &'static str,

    /// Name shown to the user.
    pub name: &'static str,

    pub kind: ParameterKind,
}

impl ParameterId {
    /// Registration order.
    pub const ALL: [Self; 17] = [
        Self::Speed,
        Self::Phase,
        Self::TempoSync,
        Self::MinDistance,
        Self::Mode,
        Self::StaticPosition(Axis::X),
        Self::StaticPosition(Axis::Y),
        Self::StaticPosition(Axis::Z),
        Self::OrbitCenter(Axis::X),
        Self::OrbitCenter(Axis::Y),
        Self::OrbitCenter(Axis::Z),
        Self::OrbitAxis(Axis::X),
        Self::OrbitAxis(Axis::Y),
        Self::OrbitAxis(Axis::Z),
        Self::OrbitRadius,
        Self::OrbitStretch,
        Self::OrbitRotation,
    ];

    pub fn info(self) -> ParameterInfo {
        let (id, name, kind) = match self {
            Self::Speed => ("speed", "Speed", ParameterKind::Float(SPEED_RANGE)),
            Self::Phase => ("phase", "Phase", ParameterKind::Float(PHASE_RANGE)),
            Self::TempoSync => (
                "tempoSync",
                "Tempo sync",
                ParameterKind::Bool {
                    default: DEFAULT_TEMPO_SYNC,
                },
            ),
            Self::MinDistance => (
                "minDistance",
                "Min. Distance",
                ParameterKind::Float(MIN_DISTANCE_RANGE),
            ),
            Self::Mode => (
                "mode",
                "Mode",
                ParameterKind::Choice {
                    options: &MotionMode::NAMES,
                    default: MotionMode::Static.index(),
                },
            ),
            Self::StaticPosition(axis) => {
                let (id, name) = match axis {
                    Axis::X => ("staticPositionX", "Right"),
                    Axis::Y => ("staticPositionY", "Forward"),
                    Axis::Z => ("staticPositionZ", "Up"),
                };
                let (min, max) = STATIC_POSITION_BOUNDS;
                let range = FloatRange::new(min, max, axis.of(DEFAULT_SOURCE_POSITION));
                (id, name, ParameterKind::Float(range))
            }
            Self::OrbitCenter(axis) => {
                let (id, name) = match axis {
                    Axis::X => ("orbitCenterX", "Orbit center X position"),
                    Axis::Y => ("orbitCenterY", "Orbit center Y position"),
                    Axis::Z => ("orbitCenterZ", "Orbit center Z position"),
                };
                let (min, max) = ORBIT_CENTER_BOUNDS;
                (id, name, ParameterKind::Float(FloatRange::new(min, max, 0.0)))
            }
            Self::OrbitAxis(axis) => {
                let (id, name) = match axis {
                    Axis::X => ("orbitAxisX", "Orbit axis X"),
                    Axis::Y => ("orbitAxisY", "Orbit axis Y"),
                    Axis::Z => ("orbitAxisZ", "Orbit axis Z"),
                };
                let (min, max) = ORBIT_AXIS_BOUNDS;
                let range = FloatRange::new(min, max, axis.of(DEFAULT_ORBIT_AXIS));
                (id, name, ParameterKind::Float(range))
            }
            Self::OrbitRadius => (
                "orbitRadius",
                "Orbit radius",
                ParameterKind::Float(ORBIT_RADIUS_RANGE),
            ),
            Self::OrbitStretch => (
                "orbitStretch",
                "Orbit stretch",
                ParameterKind::Float(ORBIT_STRETCH_RANGE),
            ),
            Self::OrbitRotation => (
                "orbitRotation",
                "Orbit stretch rotation",
                ParameterKind::Float(ORBIT_ROTATION_RANGE),
            ),
        };

        ParameterInfo { id, name, kind }
    }

    /// Looks a parameter up by its host identifier.
    pub fn from_id(id: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|parameter| parameter.info().id == id)
    }

    /// Range of a float parameter, `None` for the mode and tempo sync switches.
    pub fn float_range(self) -> Option<FloatRange> {
        match self.info().kind {
            ParameterKind::Float(range) => Some(range),
            _ => None,
        }
    }
}

/// A point the source travels through in [`MotionMode::Path`].
#[derive(Debug, Copy, Clone, Default, PartialEq)]
pub struct PathNode {
    pub position: Vec3,

    /// Seconds spent travelling to the next node.
    pub next_duration: f32,
}

/// The full parameter set read by the motion controller once per block.
#[derive(Debug, Clone, PartialEq)]
pub struct MotionParameters {
    pub mode: MotionMode,

    /// Angular rate of the orbit, in radians per second.
    pub speed: f32,

    /// Time offset of the orbit, in seconds before scaling by [`Self::speed`].
    pub phase: f32,

    /// Reserved: not used by position computation.
    pub tempo_sync: bool,

    /// Distance below which the source is not attenuated.
    pub min_distance: f32,

    pub static_position: Vec3,

    pub orbit_center: Vec3,

    /// Normal of the orbit plane. Normalized before use.
    pub orbit_axis: Vec3,

    pub orbit_radius: f32,

    /// Scale of the orbit along the right axis, applied before [`Self::orbit_rotation`].
    pub orbit_stretch: f32,

    /// Rotation of the stretched orbit around the up axis, in radians.
    pub orbit_rotation: f32,

    pub path_nodes: Arc<Vec<PathNode>>,
}

impl Default for MotionParameters {
    fn default() -> Self {
        Self {
            mode: MotionMode::default(),
            speed: SPEED_RANGE.default,
            phase: PHASE_RANGE.default,
            tempo_sync: DEFAULT_TEMPO_SYNC,
            min_distance: MIN_DISTANCE_RANGE.default,
            static_position: DEFAULT_SOURCE_POSITION,
            orbit_center: Vec3::ORIGIN,
            orbit_axis: DEFAULT_ORBIT_AXIS,
            orbit_radius: ORBIT_RADIUS_RANGE.default,
            orbit_stretch: ORBIT_STRETCH_RANGE.default,
            orbit_rotation: ORBIT_ROTATION_RANGE.default,
            path_nodes: Arc::default(),
        }
    }
}

impl MotionParameters {
    /// Returns a copy with every value clamped into its parameter range.
    pub fn clamped(&self) -> Self {
        let clamp_vector = |vector: Vec3, (min, max): (f32, f32), default: Vec3| {
            let clamp = |value: f32, default: f32| {
                if value.is_nan() {
                    default
                } else {
                    value.clamp(min, max)
                }
            };
            Vec3::new(
                clamp(vector.x, default.x),
                clamp(vector.y, default.y),
                clamp(vector.z, default.z),
            )
        };

        Self {
            mode: self.mode,
            speed: SPEED_RANGE.clamp(self.speed),
            phase: PHASE_RANGE.clamp(self.phase),
            tempo_sync: self.tempo_sync,
            min_distance: MIN_DISTANCE_RANGE.clamp(self.min_distance),
            static_position: clamp_vector(
                self.static_position,
                STATIC_POSITION_BOUNDS,
                DEFAULT_SOURCE_POSITION,
            ),
            orbit_center: clamp_vector(self.orbit_center, ORBIT_CENTER_BOUNDS, Vec3::ORIGIN),
            orbit_axis: clamp_vector(self.orbit_axis, ORBIT_AXIS_BOUNDS, DEFAULT_ORBIT_AXIS),
            orbit_radius: ORBIT_RADIUS_RANGE.clamp(self.orbit_radius),
            orbit_stretch: ORBIT_STRETCH_RANGE.clamp(self.orbit_stretch),
            orbit_rotation: ORBIT_ROTATION_RANGE.clamp(self.orbit_rotation),
            path_nodes: Arc::clone(&self.path_nodes),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ids_are_unique() {
        let mut ids: Vec<&str> = ParameterId::ALL
            .iter()
            .map(|parameter| parameter.info().id)
            .collect();
        ids.sort_unstable();
        ids.dedup();
        assert_eq!(ids.len(), ParameterId::ALL.len());
    }

    #[test]
    fn test_from_id() {
        assert_eq!(
            ParameterId::from_id("orbitAxisZ"),
            Some(ParameterId::OrbitAxis(Axis::Z))
        );
        assert_eq!(ParameterId::from_id("minDistance"), Some(ParameterId::MinDistance));
        assert_eq!(ParameterId::from_id("volume"), None);
    }

    #[test]
    fn test_defaults_match_parameter_info() {
        let defaults = MotionParameters::default();

        assert_eq!(
            ParameterId::StaticPosition(Axis::Y).float_range().unwrap().default,
            defaults.static_position.y
        );
        assert_eq!(
            ParameterId::OrbitAxis(Axis::Z).float_range().unwrap().default,
            defaults.orbit_axis.z
        );
        assert_eq!(
            ParameterId::MinDistance.float_range().unwrap().default,
            defaults.min_distance
        );
        assert_eq!(ParameterId::Mode.float_range(), None);
    }

    #[test]
    fn test_clamped() {
        let parameters = MotionParameters {
            speed: 0.0,
            min_distance: 50.0,
            static_position: Vec3::new(-3.0, f32::NAN, 1.0),
            orbit_rotation: 4.0,
            ..Default::default()
        }
        .clamped();

        assert_eq!(parameters.speed, 0.01);
        assert_eq!(parameters.min_distance, 10.0);
        assert_eq!(parameters.static_position, Vec3::new(-2.0, 0.5, 1.0));
        assert_eq!(parameters.orbit_rotation, PI);
    }

    #[test]
    fn test_float_range() {
        assert!(SPEED_RANGE.contains(1.0));
        assert!(!SPEED_RANGE.contains(0.0));
        assert_eq!(PHASE_RANGE.clamp(f32::NAN), 0.0);
    }
}
