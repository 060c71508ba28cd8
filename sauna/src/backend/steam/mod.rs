//! Rendering through Steam Audio.

mod context;
pub use context::Context;

mod hrtf;
pub use hrtf::Hrtf;

mod binaural;
pub use binaural::SteamBinauralEffect;

mod direct;
pub use direct::SteamDirectEffect;

use super::SpatialBackend;
use crate::audio_settings::AudioSettings;
use crate::error::{EngineInitError, InitFailure, InitStage};
use crate::geometry::{Equalizer, Vector3};
use crate::hrtf::HrtfSettings;
use crate::model::{AirAbsorptionModel, DistanceAttenuationModel};

/// Maps a Steam Audio status code.
fn check(status: audionimbus_sys::IPLerror) -> Result<(), InitFailure> {
    match InitFailure::from_status(status as i32) {
        Some(failure) => Err(failure),
        None => Ok(()),
    }
}

/// Renders through Steam Audio.
///
/// Each engine built on this backend loads its own HRTF, sized to the engine's audio settings.
#[derive(Debug, Clone)]
pub struct SteamBackend {
    context: Context,
}

impl SteamBackend {
    /// Creates the Steam Audio context.
    ///
    /// # Errors
    ///
    /// [`EngineInitError`] with [`InitStage::Context`] if the library refuses to create one.
    pub fn try_new() -> Result<Self, EngineInitError> {
        let context =
            Context::try_new().map_err(|reason| EngineInitError::new(InitStage::Context, reason))?;
        Ok(Self { context })
    }
}

impl SpatialBackend for SteamBackend {
    type Binaural = SteamBinauralEffect;
    type Direct = SteamDirectEffect;

    fn binaural_effect(
        &self,
        audio_settings: &AudioSettings,
        hrtf_settings: &HrtfSettings,
    ) -> Result<Self::Binaural, EngineInitError> {
        let hrtf = Hrtf::try_new(&self.context, audio_settings, hrtf_settings)
            .map_err(|reason| EngineInitError::new(InitStage::Hrtf, reason))?;

        SteamBinauralEffect::try_new(&self.context, audio_settings, hrtf)
            .map_err(|reason| EngineInitError::new(InitStage::BinauralEffect, reason))
    }

    fn direct_effect(
        &self,
        audio_settings: &AudioSettings,
        num_channels: usize,
    ) -> Result<Self::Direct, EngineInitError> {
        SteamDirectEffect::try_new(&self.context, audio_settings, num_channels)
            .map_err(|reason| EngineInitError::new(InitStage::DirectEffect, reason))
    }

    fn distance_attenuation(
        &self,
        source: Vector3,
        listener: Vector3,
        model: &DistanceAttenuationModel,
    ) -> f32 {
        unsafe {
            audionimbus_sys::iplDistanceAttenuationCalculate(
                self.context.raw_ptr(),
                source.into(),
                listener.into(),
                &mut audionimbus_sys::IPLDistanceAttenuationModel::from(model),
            )
        }
    }

    fn air_absorption(
        &self,
        source: Vector3,
        listener: Vector3,
        model: &AirAbsorptionModel,
    ) -> Equalizer<3> {
        let mut air_absorption = Equalizer::flat();

        unsafe {
            audionimbus_sys::iplAirAbsorptionCalculate(
                self.context.raw_ptr(),
                source.into(),
                listener.into(),
                &mut audionimbus_sys::IPLAirAbsorptionModel::from(model),
                air_absorption.as_mut_ptr(),
            );
        }

        air_absorption
    }
}
