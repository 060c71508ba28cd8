use super::{check, Context, Hrtf};
use crate::audio_buffer::Sample;
use crate::audio_settings::AudioSettings;
use crate::backend::{BinauralEffect, BinauralEffectParams};
use crate::error::InitFailure;

/// Steam Audio binaural effect, holding on to the HRTF it renders through.
#[derive(Debug)]
pub struct SteamBinauralEffect {
    effect: audionimbus_sys::IPLBinauralEffect,
    hrtf: Hrtf,
}

impl SteamBinauralEffect {
    pub fn try_new(
        context: &Context,
        audio_settings: &AudioSettings,
        hrtf: Hrtf,
    ) -> Result<Self, InitFailure> {
        let mut binaural_effect = Self {
            effect: std::ptr::null_mut(),
            hrtf,
        };

        check(unsafe {
            audionimbus_sys::iplBinauralEffectCreate(
                context.raw_ptr(),
                &mut audionimbus_sys::IPLAudioSettings::from(audio_settings),
                &mut audionimbus_sys::IPLBinauralEffectSettings {
                    hrtf: binaural_effect.hrtf.raw_ptr(),
                },
                &mut binaural_effect.effect,
            )
        })?;

        Ok(binaural_effect)
    }
}

impl BinauralEffect for SteamBinauralEffect {
    fn apply(
        &mut self,
        params: &BinauralEffectParams,
        input: &[&[Sample]],
        output: [&mut [Sample]; 2],
    ) {
        let [left, right] = output;
        let num_samples = left.len().min(right.len());

        let mut input_ptrs = [std::ptr::null_mut::<Sample>(); 2];
        let num_input_channels = input.len().min(2);
        for (ptr, channel) in input_ptrs.iter_mut().zip(input) {
            *ptr = channel.as_ptr() as *mut Sample;
        }
        let mut output_ptrs = [left.as_mut_ptr(), right.as_mut_ptr()];

        let mut input_buffer = audionimbus_sys::IPLAudioBuffer {
            numChannels: num_input_channels as i32,
            numSamples: num_samples as i32,
            data: input_ptrs.as_mut_ptr(),
        };
        let mut output_buffer = audionimbus_sys::IPLAudioBuffer {
            numChannels: 2,
            numSamples: num_samples as i32,
            data: output_ptrs.as_mut_ptr(),
        };

        let mut binaural_effect_params = audionimbus_sys::IPLBinauralEffectParams {
            direction: params.direction.into(),
            interpolation: params.interpolation.into(),
            spatialBlend: params.spatial_blend,
            hrtf: self.hrtf.raw_ptr(),
            peakDelays: std::ptr::null_mut(),
        };

        unsafe {
            audionimbus_sys::iplBinauralEffectApply(
                self.effect,
                &mut binaural_effect_params,
                &mut input_buffer,
                &mut output_buffer,
            );
        }
    }

    fn reset(&mut self) {
        unsafe { audionimbus_sys::iplBinauralEffectReset(self.effect) };
    }
}

impl Drop for SteamBinauralEffect {
    fn drop(&mut self) {
        unsafe { audionimbus_sys::iplBinauralEffectRelease(&mut self.effect) }
    }
}

unsafe impl Send for SteamBinauralEffect {}
