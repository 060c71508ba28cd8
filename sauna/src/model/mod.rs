//! Models evaluated against the source-listener distance.

pub mod distance_attenuation;
pub use distance_attenuation::*;

pub mod air_absorption;
pub use air_absorption::*;
