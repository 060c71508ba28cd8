use crate::geometry::Vector3;

/// A distance attenuation model that can be used for modeling attenuation of sound over distance.
#[derive(Debug, Copy, Clone, Default, PartialEq)]
pub enum DistanceAttenuationModel {
    /// The default distance attenuation model.
    /// This is an inverse distance falloff, with all sounds within 1 meter of the listener rendered without distance attenuation.
    #[default]
    Default,

    /// An inverse distance falloff.
    /// You can configure the minimum distance, within which distance attenuation is not applied.
    InverseDistance {
        /// No distance attenuation is applied to any sound whose distance from the listener is less than this value.
        min_distance: f32,
    },
}

impl DistanceAttenuationModel {
    /// Distance below which the model leaves sound unattenuated.
    pub fn min_distance(&self) -> f32 {
        match self {
            Self::Default => 1.0,
            Self::InverseDistance { min_distance } => *min_distance,
        }
    }

    /// Attenuation for a source `distance` meters away, between 0.0 and 1.0.
    ///
    /// Exactly 1.0 at or below the minimum distance.
    pub fn evaluate(&self, distance: f32) -> f32 {
        let min_distance = self.min_distance();
        if distance <= min_distance {
            1.0
        } else {
            min_distance / distance
        }
    }
}

#[cfg(feature = "steam-audio")]
impl From<&DistanceAttenuationModel> for audionimbus_sys::IPLDistanceAttenuationModel {
    fn from(model: &DistanceAttenuationModel) -> Self {
        let (type_, min_distance) = match model {
            DistanceAttenuationModel::Default => (
                audionimbus_sys::IPLDistanceAttenuationModelType::IPL_DISTANCEATTENUATIONTYPE_DEFAULT,
                f32::default(),
            ),
            DistanceAttenuationModel::InverseDistance { min_distance } => (
                audionimbus_sys::IPLDistanceAttenuationModelType::IPL_DISTANCEATTENUATIONTYPE_INVERSEDISTANCE,
                *min_distance,
            ),
        };

        Self {
            type_,
            minDistance: min_distance,
            callback: None,
            userData: std::ptr::null_mut(),
            dirty: audionimbus_sys::IPLbool::IPL_FALSE,
        }
    }
}

/// Calculates the distance attenuation between a source and a listener.
pub fn distance_attenuation(
    source: Vector3,
    listener: Vector3,
    model: &DistanceAttenuationModel,
) -> f32 {
    model.evaluate(source.distance(listener))
}
