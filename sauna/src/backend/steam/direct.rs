use super::{check, Context};
use crate::audio_buffer::Sample;
use crate::audio_settings::AudioSettings;
use crate::backend::{DirectEffect, DirectEffectFlags, DirectEffectParams};
use crate::error::InitFailure;

/// Steam Audio direct effect.
#[derive(Debug)]
pub struct SteamDirectEffect(audionimbus_sys::IPLDirectEffect);

impl SteamDirectEffect {
    pub fn try_new(
        context: &Context,
        audio_settings: &AudioSettings,
        num_channels: usize,
    ) -> Result<Self, InitFailure> {
        let mut direct_effect = Self(std::ptr::null_mut());

        check(unsafe {
            audionimbus_sys::iplDirectEffectCreate(
                context.raw_ptr(),
                &mut audionimbus_sys::IPLAudioSettings::from(audio_settings),
                &mut audionimbus_sys::IPLDirectEffectSettings {
                    numChannels: num_channels as i32,
                },
                &mut direct_effect.0,
            )
        })?;

        Ok(direct_effect)
    }
}

impl From<&DirectEffectParams> for audionimbus_sys::IPLDirectEffectParams {
    fn from(params: &DirectEffectParams) -> Self {
        let mut flags = audionimbus_sys::IPLDirectEffectFlags(<_>::default());
        let requested = params.flags();
        if requested.contains(DirectEffectFlags::APPLY_DISTANCE_ATTENUATION) {
            flags |= audionimbus_sys::IPLDirectEffectFlags::IPL_DIRECTEFFECTFLAGS_APPLYDISTANCEATTENUATION;
        }
        if requested.contains(DirectEffectFlags::APPLY_AIR_ABSORPTION) {
            flags |=
                audionimbus_sys::IPLDirectEffectFlags::IPL_DIRECTEFFECTFLAGS_APPLYAIRABSORPTION;
        }

        Self {
            flags,
            transmissionType:
                audionimbus_sys::IPLTransmissionType::IPL_TRANSMISSIONTYPE_FREQINDEPENDENT,
            distanceAttenuation: params.gain(),
            airAbsorption: *params.band_gains(),
            directivity: 1.0,
            occlusion: 1.0,
            transmission: [1.0; 3],
        }
    }
}

impl DirectEffect for SteamDirectEffect {
    /// This effect CAN be applied in-place.
    fn apply(&mut self, params: &DirectEffectParams, buffer: [&mut [Sample]; 2]) {
        let [left, right] = buffer;
        let num_samples = left.len().min(right.len());
        let mut ptrs = [left.as_mut_ptr(), right.as_mut_ptr()];

        let mut audio_buffer = audionimbus_sys::IPLAudioBuffer {
            numChannels: 2,
            numSamples: num_samples as i32,
            data: ptrs.as_mut_ptr(),
        };
        let audio_buffer: *mut audionimbus_sys::IPLAudioBuffer = &mut audio_buffer;

        unsafe {
            audionimbus_sys::iplDirectEffectApply(
                self.0,
                &mut audionimbus_sys::IPLDirectEffectParams::from(params),
                audio_buffer,
                audio_buffer,
            );
        }
    }

    fn reset(&mut self) {
        unsafe { audionimbus_sys::iplDirectEffectReset(self.0) };
    }
}

impl Drop for SteamDirectEffect {
    fn drop(&mut self) {
        unsafe { audionimbus_sys::iplDirectEffectRelease(&mut self.0) }
    }
}

unsafe impl Send for SteamDirectEffect {}
