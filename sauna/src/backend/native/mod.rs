mod binaural;
pub use binaural::NativeBinauralEffect;

mod direct;
pub use direct::NativeDirectEffect;

use super::SpatialBackend;
use crate::audio_settings::AudioSettings;
use crate::error::{EngineInitError, InitFailure, InitStage};
use crate::geometry::{Equalizer, Vector3};
use crate::hrtf::HrtfSettings;
use crate::model::{self, AirAbsorptionModel, DistanceAttenuationModel};

/// Pure-Rust spatialization: a spherical-head binaural model and a three-band direct path.
#[derive(Debug, Default, Copy, Clone)]
pub struct NativeBackend;

impl NativeBackend {
    pub fn new() -> Self {
        Self
    }
}

impl SpatialBackend for NativeBackend {
    type Binaural = NativeBinauralEffect;
    type Direct = NativeDirectEffect;

    fn binaural_effect(
        &self,
        audio_settings: &AudioSettings,
        hrtf_settings: &HrtfSettings,
    ) -> Result<Self::Binaural, EngineInitError> {
        if !hrtf_settings.volume.is_finite() || hrtf_settings.volume < 0.0 {
            return Err(EngineInitError::new(
                InitStage::Hrtf,
                InitFailure::InitializationFailure,
            ));
        }

        NativeBinauralEffect::try_new(audio_settings, hrtf_settings)
            .map_err(|reason| EngineInitError::new(InitStage::BinauralEffect, reason))
    }

    fn direct_effect(
        &self,
        audio_settings: &AudioSettings,
        num_channels: usize,
    ) -> Result<Self::Direct, EngineInitError> {
        NativeDirectEffect::try_new(audio_settings, num_channels)
            .map_err(|reason| EngineInitError::new(InitStage::DirectEffect, reason))
    }

    fn distance_attenuation(
        &self,
        source: Vector3,
        listener: Vector3,
        model: &DistanceAttenuationModel,
    ) -> f32 {
        model::distance_attenuation(source, listener, model)
    }

    fn air_absorption(
        &self,
        source: Vector3,
        listener: Vector3,
        model: &AirAbsorptionModel,
    ) -> Equalizer<3> {
        model::air_absorption(source, listener, model)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_hrtf_volume() {
        let hrtf_settings = HrtfSettings {
            volume: f32::NAN,
            ..Default::default()
        };

        let error = NativeBackend
            .binaural_effect(&AudioSettings::default(), &hrtf_settings)
            .unwrap_err();
        assert_eq!(error.stage, InitStage::Hrtf);
    }

    #[test]
    fn test_zero_frame_size() {
        let audio_settings = AudioSettings {
            sampling_rate: 44100,
            frame_size: 0,
        };

        let error = NativeBackend.direct_effect(&audio_settings, 2).unwrap_err();
        assert_eq!(
            error,
            EngineInitError::new(InitStage::DirectEffect, InitFailure::InitializationFailure)
        );
    }
}
