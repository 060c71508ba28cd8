//! Host stream format an engine is built for.

/// Negotiated in `prepare`. A different rate or block size means building a new engine.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct AudioSettings {
    /// Sampling rate, in Hz.
    pub sampling_rate: u32,

    /// Largest block the engine accepts, in samples per channel.
    pub frame_size: u32,
}

impl Default for AudioSettings {
    fn default() -> Self {
        Self {
            sampling_rate: 48000,
            frame_size: 1024,
        }
    }
}

#[cfg(feature = "steam-audio")]
impl From<&AudioSettings> for audionimbus_sys::IPLAudioSettings {
    fn from(settings: &AudioSettings) -> Self {
        Self {
            samplingRate: settings.sampling_rate as i32,
            frameSize: settings.frame_size as i32,
        }
    }
}
