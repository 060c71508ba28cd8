/*!
Motion and rendering core of a binaural spatializer.

A [`MotionController`] turns motion parameters (a static position, or an orbit around a
tilted, stretched circle) and the transport time into a source position. A
[`SpatialAudioEngine`] renders a mono or stereo input from that position: binaural rendering
through an HRTF, then distance attenuation and air absorption for a listener at the origin.
[`SaunaProcessor`] ties both to a plugin host's prepare/process/release lifecycle.

Positions use x = right, y = forward, z = up.

# Backends

Rendering goes through a [`SpatialBackend`]. [`NativeBackend`] is implemented in Rust and
needs nothing else. With the `steam-audio` feature, `SteamBackend` renders through Steam Audio.

# Example

```
use sauna::{SaunaProcessor, MotionMode, ParameterId, Vec3};

let mut processor: SaunaProcessor = SaunaProcessor::default();
processor.prepare(48000.0, 256).unwrap();

let parameters = processor.parameters();
parameters.set_mode(MotionMode::Orbit);
parameters.set(ParameterId::OrbitRadius, 3.0);
parameters.set_orbit_axis(Vec3::UP);

let mut left = vec![0.0; 256];
let mut right = vec![0.0; 256];
processor
    .process_block(&mut [&mut left[..], &mut right[..]], 1, Some(1.5))
    .unwrap();

let position = processor.position_handle().load();
assert!((position.magnitude() - 3.0).abs() < 1e-4);
```
*/

pub mod audio_buffer;
pub use audio_buffer::*;

pub mod audio_settings;
pub use audio_settings::*;

pub mod backend;
pub use backend::*;

pub mod effect;
pub use effect::*;

pub mod engine;
pub use engine::*;

pub mod error;
pub use error::*;

pub mod geometry;
pub use geometry::*;

pub mod hrtf;
pub use hrtf::*;

pub mod model;
pub use model::*;

pub mod motion;
pub use motion::*;

pub mod processor;
pub use processor::*;
