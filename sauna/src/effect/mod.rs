//! The two rendering stages of the engine.

mod binaural;
pub use binaural::BinauralRenderer;

mod direct;
pub use direct::DirectRenderer;
