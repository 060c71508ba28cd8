//! Frequency-dependent attenuation of sound over distance.

use crate::geometry::{Equalizer, Vector3};

/// Decay rates of the default model, per meter, for the low, mid and high bands.
pub const DEFAULT_AIR_ABSORPTION_COEFFICIENTS: [f32; 3] = [0.0002, 0.0017, 0.0182];

/// An air absorption model that can be used for modeling frequency-dependent attenuation of sound over distance.
#[derive(Debug, Copy, Clone, Default, PartialEq)]
pub enum AirAbsorptionModel {
    /// The default air absorption model.
    /// This is an exponential falloff, with decay rates derived from physical properties of air.
    #[default]
    Default,

    /// An exponential falloff.
    /// You can configure the decay rates for each frequency band.
    Exponential {
        /// The exponential falloff coefficients to use.
        coefficients: [f32; 3],
    },
}

impl AirAbsorptionModel {
    pub fn coefficients(&self) -> [f32; 3] {
        match self {
            Self::Default => DEFAULT_AIR_ABSORPTION_COEFFICIENTS,
            Self::Exponential { coefficients } => *coefficients,
        }
    }

    /// Per-band gains for a source `distance` meters away.
    pub fn evaluate(&self, distance: f32) -> Equalizer<3> {
        Equalizer(self.coefficients().map(|coefficient| (-coefficient * distance).exp()))
    }
}

#[cfg(feature = "steam-audio")]
impl From<&AirAbsorptionModel> for audionimbus_sys::IPLAirAbsorptionModel {
    fn from(model: &AirAbsorptionModel) -> Self {
        let (type_, coefficients) = match model {
            AirAbsorptionModel::Default => (
                audionimbus_sys::IPLAirAbsorptionModelType::IPL_AIRABSORPTIONTYPE_DEFAULT,
                <[f32; 3]>::default(),
            ),
            AirAbsorptionModel::Exponential { coefficients } => (
                audionimbus_sys::IPLAirAbsorptionModelType::IPL_AIRABSORPTIONTYPE_EXPONENTIAL,
                *coefficients,
            ),
        };

        Self {
            type_,
            coefficients,
            callback: None,
            userData: std::ptr::null_mut(),
            dirty: audionimbus_sys::IPLbool::IPL_FALSE,
        }
    }
}

/// Calculates the air absorption coefficients between a source and a listener.
pub fn air_absorption(
    source: Vector3,
    listener: Vector3,
    model: &AirAbsorptionModel,
) -> Equalizer<3> {
    model.evaluate(source.distance(listener))
}
