//! The spatialization library the engine renders through.
//!
//! [`NativeBackend`] is a dependency-free DSP implementation. With the `steam-audio` feature,
//! `SteamBackend` renders through Steam Audio instead.

use crate::audio_buffer::Sample;
use crate::audio_settings::AudioSettings;
use crate::error::EngineInitError;
use crate::geometry::{Equalizer, Vector3};
use crate::hrtf::{HrtfInterpolation, HrtfSettings};
use crate::model::{AirAbsorptionModel, DistanceAttenuationModel};

mod native;
pub use native::{NativeBackend, NativeBinauralEffect, NativeDirectEffect};

#[cfg(feature = "steam-audio")]
mod steam;
#[cfg(feature = "steam-audio")]
pub use steam::{SteamBackend, SteamBinauralEffect, SteamDirectEffect};

/// Creates effects and evaluates the distance models.
///
/// Effects are owned resources: dropping one releases everything it acquired.
pub trait SpatialBackend {
    type Binaural: BinauralEffect;
    type Direct: DirectEffect;

    /// Loads an HRTF and creates a binaural effect that renders through it.
    ///
    /// # Errors
    ///
    /// [`EngineInitError`] naming the resource that could not be created.
    fn binaural_effect(
        &self,
        audio_settings: &AudioSettings,
        hrtf_settings: &HrtfSettings,
    ) -> Result<Self::Binaural, EngineInitError>;

    /// Creates a direct effect processing `num_channels` channels.
    ///
    /// # Errors
    ///
    /// [`EngineInitError`] if the effect could not be created.
    fn direct_effect(
        &self,
        audio_settings: &AudioSettings,
        num_channels: usize,
    ) -> Result<Self::Direct, EngineInitError>;

    /// Gain between 0.0 and 1.0 for a source heard from `listener`.
    fn distance_attenuation(
        &self,
        source: Vector3,
        listener: Vector3,
        model: &DistanceAttenuationModel,
    ) -> f32;

    /// Per-band gains for a source heard from `listener`.
    fn air_absorption(
        &self,
        source: Vector3,
        listener: Vector3,
        model: &AirAbsorptionModel,
    ) -> Equalizer<3>;
}

/// Spatializes a point source from its direction relative to the listener.
pub trait BinauralEffect: std::fmt::Debug {
    /// Renders `input` (1 or 2 channels) into the 2-channel `output`.
    ///
    /// Every channel has the same number of samples. Does not allocate.
    fn apply(&mut self, params: &BinauralEffectParams, input: &[&[Sample]], output: [&mut [Sample]; 2]);

    /// Clears internal filter state.
    fn reset(&mut self);
}

/// Applies distance-dependent gain and filtering in place.
pub trait DirectEffect: std::fmt::Debug {
    /// Filters every channel of `buffer` in place. Does not allocate.
    fn apply(&mut self, params: &DirectEffectParams, buffer: [&mut [Sample]; 2]);

    /// Clears internal filter state.
    fn reset(&mut self);
}

/// Parameters for applying a binaural effect to an audio buffer.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct BinauralEffectParams {
    /// Unit vector pointing from the listener towards the source, in the backend's convention.
    pub direction: Vector3,

    /// The interpolation technique to use.
    pub interpolation: HrtfInterpolation,

    /// Amount to blend input audio with spatialized audio.
    ///
    /// When set to 0.0, output audio is not spatialized at all and is close to input audio.
    /// If set to 1.0, output audio is fully spatialized.
    pub spatial_blend: f32,
}

bitflags::bitflags! {
    /// Which terms of [`DirectEffectParams`] a direct effect applies.
    #[derive(Debug, Copy, Clone, PartialEq, Eq)]
    pub struct DirectEffectFlags: u32 {
        const APPLY_DISTANCE_ATTENUATION = 1 << 0;
        const APPLY_AIR_ABSORPTION = 1 << 1;
    }
}

/// Parameters for applying a direct effect to an audio buffer.
#[derive(Debug, Copy, Clone, Default, PartialEq)]
pub struct DirectEffectParams {
    /// Optional distance attenuation, with a value between 0.0 and 1.0.
    pub distance_attenuation: Option<f32>,

    /// Optional air absorption.
    pub air_absorption: Option<Equalizer<3>>,
}

impl DirectEffectParams {
    pub fn flags(&self) -> DirectEffectFlags {
        let mut flags = DirectEffectFlags::empty();
        flags.set(
            DirectEffectFlags::APPLY_DISTANCE_ATTENUATION,
            self.distance_attenuation.is_some(),
        );
        flags.set(
            DirectEffectFlags::APPLY_AIR_ABSORPTION,
            self.air_absorption.is_some(),
        );
        flags
    }

    /// Broadband gain: the distance attenuation, or 1.0 when it is not applied.
    pub fn gain(&self) -> f32 {
        self.distance_attenuation.unwrap_or(1.0)
    }

    /// Per-band gains: the air absorption, or flat when it is not applied.
    pub fn band_gains(&self) -> Equalizer<3> {
        self.air_absorption.unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_direct_effect_flags() {
        assert!(DirectEffectParams::default().flags().is_empty());

        let params = DirectEffectParams {
            distance_attenuation: Some(0.5),
            air_absorption: Some(Equalizer([0.9, 0.8, 0.7])),
        };
        assert_eq!(
            params.flags(),
            DirectEffectFlags::APPLY_DISTANCE_ATTENUATION | DirectEffectFlags::APPLY_AIR_ABSORPTION
        );
        assert_eq!(params.gain(), 0.5);
    }

    #[test]
    fn test_unapplied_terms_are_neutral() {
        let params = DirectEffectParams::default();
        assert_eq!(params.gain(), 1.0);
        assert_eq!(params.band_gains(), Equalizer::flat());
    }
}
