//! Binaural rendering followed by distance attenuation and air absorption.

use crate::audio_buffer::{AudioBuffer, Sample};
use crate::audio_settings::AudioSettings;
use crate::backend::SpatialBackend;
use crate::effect::{BinauralRenderer, DirectRenderer};
use crate::error::{AudioError, EngineInitError, InitStage};
use crate::geometry::{Vec3, DEFAULT_SOURCE_POSITION};
use crate::hrtf::{HrtfInterpolation, HrtfSettings};
use crate::model::AirAbsorptionModel;
use crate::motion::parameters::MIN_DISTANCE_RANGE;

/// How the engine renders, fixed at construction.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct SpatializerSettings {
    pub hrtf: HrtfSettings,

    /// HRTF interpolation used by the binaural stage.
    pub interpolation: HrtfInterpolation,

    /// Amount of spatialized audio in the binaural output, from 0.0 (dry) to 1.0.
    pub spatial_blend: f32,

    pub air_absorption: AirAbsorptionModel,
}

impl Default for SpatializerSettings {
    fn default() -> Self {
        Self {
            hrtf: HrtfSettings::default(),
            interpolation: HrtfInterpolation::Bilinear,
            spatial_blend: 1.0,
            air_absorption: AirAbsorptionModel::default(),
        }
    }
}

/// Spatializes one source for a listener at the origin.
///
/// Every buffer is sized at construction: processing never allocates. Blocks may be shorter
/// than the frame size, but never longer.
#[derive(Debug)]
pub struct SpatialAudioEngine<B: SpatialBackend> {
    backend: B,
    audio_settings: AudioSettings,
    binaural: BinauralRenderer<B::Binaural>,
    direct: DirectRenderer<B::Direct>,
    output: AudioBuffer,
}

impl<B: SpatialBackend> SpatialAudioEngine<B> {
    /// Creates the effects and the output buffer.
    ///
    /// If a later resource fails, the ones already acquired are released before returning.
    ///
    /// # Errors
    ///
    /// [`EngineInitError`] naming the resource that could not be created.
    pub fn try_new(
        backend: B,
        audio_settings: &AudioSettings,
        settings: &SpatializerSettings,
    ) -> Result<Self, EngineInitError> {
        let output = AudioBuffer::try_new(2, audio_settings.frame_size as usize)
            .map_err(|reason| EngineInitError::new(InitStage::ScratchBuffer, reason))?;

        let binaural_effect = backend.binaural_effect(audio_settings, &settings.hrtf)?;
        let direct_effect = backend.direct_effect(audio_settings, 2)?;

        let mut engine = Self {
            binaural: BinauralRenderer::new(
                binaural_effect,
                settings.interpolation,
                settings.spatial_blend,
            ),
            direct: DirectRenderer::new(direct_effect, settings.air_absorption),
            backend,
            audio_settings: *audio_settings,
            output,
        };
        engine.set_params(DEFAULT_SOURCE_POSITION, MIN_DISTANCE_RANGE.default);

        tracing::debug!(
            sampling_rate = audio_settings.sampling_rate,
            frame_size = audio_settings.frame_size,
            "spatial audio engine created"
        );

        Ok(engine)
    }

    /// Moves the source to `position`, in the plugin's convention.
    pub fn set_params(&mut self, position: Vec3, min_distance: f32) -> &mut Self {
        self.binaural.set_direction(position);
        self.direct
            .set_params(&self.backend, position, min_distance);
        self
    }

    /// Spatializes `buffer` in place.
    ///
    /// The first `input_channels` channels (at most 2) are the source. With no input channel,
    /// the output is silence.
    ///
    /// # Errors
    ///
    /// - [`AudioError::ChannelCountMismatch`] if `buffer` does not have exactly 2 channels.
    /// - [`AudioError::FrameSizeExceeded`] if a channel is longer than the frame size.
    pub fn process_block(
        &mut self,
        buffer: &mut [&mut [Sample]],
        input_channels: usize,
    ) -> Result<&mut Self, AudioError> {
        if buffer.len() != 2 {
            return Err(AudioError::ChannelCountMismatch {
                actual: buffer.len(),
            });
        }

        let num_samples = buffer[0].len().min(buffer[1].len());
        let frame_size = self.output.num_samples();
        if num_samples > frame_size {
            return Err(AudioError::FrameSizeExceeded {
                num_samples,
                frame_size,
            });
        }

        let [left, right] = self.output.stereo_mut(num_samples);

        if input_channels == 0 {
            left.fill(0.0);
            right.fill(0.0);
        } else {
            let input = [&buffer[0][..num_samples], &buffer[1][..num_samples]];
            self.binaural
                .render(&input[..input_channels.min(2)], [&mut *left, &mut *right]);
        }

        self.direct.render([&mut *left, &mut *right]);

        buffer[0][..num_samples].copy_from_slice(left);
        buffer[1][..num_samples].copy_from_slice(right);

        Ok(self)
    }

    /// Clears the effects' internal state, e.g. after a transport jump.
    pub fn reset(&mut self) {
        self.binaural.reset();
        self.direct.reset();
        self.output.clear();
    }

    pub fn audio_settings(&self) -> &AudioSettings {
        &self.audio_settings
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    pub fn binaural_renderer(&self) -> &BinauralRenderer<B::Binaural> {
        &self.binaural
    }

    pub fn direct_renderer(&self) -> &DirectRenderer<B::Direct> {
        &self.direct
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::NativeBackend;
    use crate::error::InitFailure;
    use approx::assert_relative_eq;

    fn engine(frame_size: u32) -> SpatialAudioEngine<NativeBackend> {
        let audio_settings = AudioSettings {
            sampling_rate: 48000,
            frame_size,
        };
        SpatialAudioEngine::try_new(NativeBackend, &audio_settings, &SpatializerSettings::default())
            .unwrap()
    }

    #[test]
    fn test_initial_params() {
        let engine = engine(64);

        assert_eq!(engine.direct_renderer().recompute_count(), 1);
        assert_eq!(
            engine.binaural_renderer().params().direction,
            DEFAULT_SOURCE_POSITION.to_steam()
        );
        // Half a meter away with a 0.2 m minimum distance.
        assert_relative_eq!(engine.direct_renderer().params().gain(), 0.4, epsilon = 1e-6);
    }

    #[test]
    fn test_zero_frame_size() {
        let audio_settings = AudioSettings {
            sampling_rate: 48000,
            frame_size: 0,
        };

        let error =
            SpatialAudioEngine::try_new(NativeBackend, &audio_settings, &SpatializerSettings::default())
                .unwrap_err();
        assert_eq!(
            error,
            EngineInitError::new(InitStage::ScratchBuffer, InitFailure::InitializationFailure)
        );
    }

    #[test]
    fn test_frame_size_exceeded() {
        let mut engine = engine(4);
        let (mut left, mut right) = ([0.0; 8], [0.0; 8]);

        let error = engine
            .process_block(&mut [&mut left[..], &mut right[..]], 2)
            .unwrap_err();
        assert_eq!(
            error,
            AudioError::FrameSizeExceeded {
                num_samples: 8,
                frame_size: 4
            }
        );
    }

    #[test]
    fn test_short_block_is_accepted() {
        let mut engine = engine(16);
        let (mut left, mut right) = ([0.5; 5], [0.5; 5]);

        engine
            .process_block(&mut [&mut left[..], &mut right[..]], 2)
            .unwrap();
        assert!(left.iter().chain(&right).all(|sample| sample.is_finite()));
    }

    #[test]
    fn test_no_input_channel_is_silence() {
        let mut engine = engine(8);
        let (mut left, mut right) = ([1.0; 8], [1.0; 8]);

        engine
            .set_params(Vec3::new(1.0, 1.0, 0.0), 0.2)
            .process_block(&mut [&mut left[..], &mut right[..]], 0)
            .unwrap();
        assert_eq!(left, [0.0; 8]);
        assert_eq!(right, [0.0; 8]);
    }
}
