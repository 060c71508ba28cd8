//! Vectors and coordinate conventions.

mod vec3;
pub use vec3::Vec3;

mod vector3;
pub use vector3::Vector3;

mod equalizer;
pub use equalizer::Equalizer;

/// Where the listener sits. The listener never moves.
pub const LISTENER_POSITION: Vec3 = Vec3::ORIGIN;

/// Straight ahead of the listener, half a meter away.
pub const DEFAULT_SOURCE_POSITION: Vec3 = Vec3::new(0.0, 0.5, 0.0);
