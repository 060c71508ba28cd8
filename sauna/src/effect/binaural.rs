use crate::audio_buffer::Sample;
use crate::backend::{BinauralEffect, BinauralEffectParams};
use crate::geometry::{Vec3, DEFAULT_SOURCE_POSITION};
use crate::hrtf::HrtfInterpolation;

/// Renders the source from its direction relative to the listener.
#[derive(Debug)]
pub struct BinauralRenderer<E> {
    effect: E,
    params: BinauralEffectParams,
}

impl<E: BinauralEffect> BinauralRenderer<E> {
    pub fn new(effect: E, interpolation: HrtfInterpolation, spatial_blend: f32) -> Self {
        Self {
            effect,
            params: BinauralEffectParams {
                direction: DEFAULT_SOURCE_POSITION.to_steam(),
                interpolation,
                spatial_blend,
            },
        }
    }

    /// Points the renderer at `direction`, in the plugin's convention.
    ///
    /// The zero vector has no direction, so [`DEFAULT_SOURCE_POSITION`] is used in its place.
    pub fn set_direction(&mut self, direction: Vec3) {
        let direction = if direction.is_origin() {
            DEFAULT_SOURCE_POSITION
        } else {
            direction
        };
        self.params.direction = direction.to_steam();
    }

    pub fn params(&self) -> &BinauralEffectParams {
        &self.params
    }

    /// Renders up to two channels of `input` into `output`.
    pub fn render(&mut self, input: &[&[Sample]], output: [&mut [Sample]; 2]) {
        let input = &input[..input.len().min(2)];
        self.effect.apply(&self.params, input, output);
    }

    pub fn reset(&mut self) {
        self.effect.reset();
    }
}
