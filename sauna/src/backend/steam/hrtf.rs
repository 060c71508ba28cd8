use super::{check, Context};
use crate::audio_settings::AudioSettings;
use crate::error::InitFailure;
use crate::hrtf::HrtfSettings;

/// Steam Audio's built-in HRTF dataset, loaded for one sampling rate and frame size.
#[derive(Debug)]
pub struct Hrtf(audionimbus_sys::IPLHRTF);

impl Hrtf {
    pub fn try_new(
        context: &Context,
        audio_settings: &AudioSettings,
        hrtf_settings: &HrtfSettings,
    ) -> Result<Self, InitFailure> {
        let mut hrtf = Self(std::ptr::null_mut());

        check(unsafe {
            audionimbus_sys::iplHRTFCreate(
                context.raw_ptr(),
                &mut audionimbus_sys::IPLAudioSettings::from(audio_settings),
                &mut audionimbus_sys::IPLHRTFSettings::from(hrtf_settings),
                &mut hrtf.0,
            )
        })?;

        Ok(hrtf)
    }

    pub fn raw_ptr(&self) -> audionimbus_sys::IPLHRTF {
        self.0
    }
}

impl Drop for Hrtf {
    fn drop(&mut self) {
        unsafe { audionimbus_sys::iplHRTFRelease(&mut self.0) }
    }
}

unsafe impl Send for Hrtf {}
unsafe impl Sync for Hrtf {}
