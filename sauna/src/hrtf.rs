//! How the binaural stage loads and samples its HRTF.

/// Fixed when an engine is built. Changing them means preparing a new engine.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct HrtfSettings {
    /// Linear gain on the binaural output. Must be finite and not negative.
    pub volume: f32,

    pub volume_normalization: VolumeNormalization,
}

impl Default for HrtfSettings {
    fn default() -> Self {
        Self {
            volume: 1.0,
            volume_normalization: VolumeNormalization::RootMeanSquared,
        }
    }
}

#[cfg(feature = "steam-audio")]
impl From<&HrtfSettings> for audionimbus_sys::IPLHRTFSettings {
    fn from(settings: &HrtfSettings) -> Self {
        Self {
            type_: audionimbus_sys::IPLHRTFType::IPL_HRTFTYPE_DEFAULT,
            sofaFileName: std::ptr::null(),
            sofaData: std::ptr::null(),
            sofaDataSize: 0,
            volume: settings.volume,
            normType: settings.volume_normalization.into(),
        }
    }
}

/// Whether loudness is kept constant as the source moves around the head.
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq)]
pub enum VolumeNormalization {
    /// Lateral sources sound quieter than frontal ones.
    None,

    /// The combined level of both ears is the same for every direction.
    #[default]
    RootMeanSquared,
}

#[cfg(feature = "steam-audio")]
impl From<VolumeNormalization> for audionimbus_sys::IPLHRTFNormType {
    fn from(volume_normalization: VolumeNormalization) -> Self {
        match volume_normalization {
            VolumeNormalization::None => audionimbus_sys::IPLHRTFNormType::IPL_HRTFNORMTYPE_NONE,
            VolumeNormalization::RootMeanSquared => {
                audionimbus_sys::IPLHRTFNormType::IPL_HRTFNORMTYPE_RMS
            }
        }
    }
}

/// How the binaural stage renders directions between measured or quantized ones.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub enum HrtfInterpolation {
    /// Snap to the closest direction. The native backend rounds interaural delays to whole
    /// samples, which can click on fast orbits.
    Nearest,

    /// Blend between neighbors. The native backend reads fractional delays.
    #[default]
    Bilinear,
}

#[cfg(feature = "steam-audio")]
impl From<HrtfInterpolation> for audionimbus_sys::IPLHRTFInterpolation {
    fn from(hrtf_interpolation: HrtfInterpolation) -> Self {
        match hrtf_interpolation {
            HrtfInterpolation::Nearest => {
                audionimbus_sys::IPLHRTFInterpolation::IPL_HRTFINTERPOLATION_NEAREST
            }
            HrtfInterpolation::Bilinear => {
                audionimbus_sys::IPLHRTFInterpolation::IPL_HRTFINTERPOLATION_BILINEAR
            }
        }
    }
}
