//! Source motion: parameters, the host-side parameter store and position computation.

mod mode;
pub use mode::MotionMode;

pub mod parameters;
pub use parameters::{MotionParameters, ParameterId, ParameterInfo, PathNode};

mod shared;
pub use shared::SharedParameters;

mod snapshot;
pub use snapshot::AtomicPosition;

mod controller;
pub use controller::{orbit_position, MotionController, SourceState};
