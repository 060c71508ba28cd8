use crate::audio_buffer::Sample;
use crate::backend::{DirectEffect, DirectEffectParams, SpatialBackend};
use crate::geometry::{Vec3, LISTENER_POSITION};
use crate::model::{AirAbsorptionModel, DistanceAttenuationModel};

/// Applies distance attenuation and air absorption to the binaural output.
///
/// The models are only evaluated again when the source position or minimum distance change.
#[derive(Debug)]
pub struct DirectRenderer<E> {
    effect: E,
    air_absorption_model: AirAbsorptionModel,
    params: DirectEffectParams,
    inputs: Option<(Vec3, f32)>,
    recompute_count: u64,
}

impl<E: DirectEffect> DirectRenderer<E> {
    pub fn new(effect: E, air_absorption_model: AirAbsorptionModel) -> Self {
        Self {
            effect,
            air_absorption_model,
            params: DirectEffectParams::default(),
            inputs: None,
            recompute_count: 0,
        }
    }

    pub fn set_params<B: SpatialBackend>(&mut self, backend: &B, position: Vec3, min_distance: f32) {
        if self.inputs == Some((position, min_distance)) {
            return;
        }

        let source = position.to_steam();
        let listener = LISTENER_POSITION.to_steam();

        self.params = DirectEffectParams {
            distance_attenuation: Some(backend.distance_attenuation(
                source,
                listener,
                &DistanceAttenuationModel::InverseDistance { min_distance },
            )),
            air_absorption: Some(backend.air_absorption(
                source,
                listener,
                &self.air_absorption_model,
            )),
        };
        self.inputs = Some((position, min_distance));
        self.recompute_count += 1;
    }

    pub fn params(&self) -> &DirectEffectParams {
        &self.params
    }

    /// How many times the models have been evaluated.
    pub fn recompute_count(&self) -> u64 {
        self.recompute_count
    }

    /// Filters the binaural output in place.
    pub fn render(&mut self, buffer: [&mut [Sample]; 2]) {
        self.effect.apply(&self.params, buffer);
    }

    /// Clears filter state. The cached model results stay valid.
    pub fn reset(&mut self) {
        self.effect.reset();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::NativeBackend;
    use crate::audio_settings::AudioSettings;
    use approx::assert_relative_eq;

    fn renderer() -> DirectRenderer<<NativeBackend as SpatialBackend>::Direct> {
        let effect = NativeBackend
            .direct_effect(&AudioSettings::default(), 2)
            .unwrap();
        DirectRenderer::new(effect, AirAbsorptionModel::default())
    }

    #[test]
    fn test_unchanged_inputs_skip_recompute() {
        let mut renderer = renderer();

        renderer.set_params(&NativeBackend, Vec3::new(0.0, 3.0, 0.0), 0.5);
        let params = *renderer.params();
        renderer.set_params(&NativeBackend, Vec3::new(0.0, 3.0, 0.0), 0.5);

        assert_eq!(renderer.recompute_count(), 1);
        assert_eq!(*renderer.params(), params);

        renderer.set_params(&NativeBackend, Vec3::new(0.0, 3.0, 0.1), 0.5);
        assert_eq!(renderer.recompute_count(), 2);

        renderer.set_params(&NativeBackend, Vec3::new(0.0, 3.0, 0.1), 0.6);
        assert_eq!(renderer.recompute_count(), 3);
    }

    #[test]
    fn test_within_min_distance_is_unattenuated() {
        let mut renderer = renderer();
        renderer.set_params(&NativeBackend, Vec3::new(0.1, 0.1, 0.0), 0.2);

        assert_eq!(renderer.params().distance_attenuation, Some(1.0));
    }

    #[test]
    fn test_inverse_distance_uses_min_distance() {
        let mut renderer = renderer();
        renderer.set_params(&NativeBackend, Vec3::new(0.0, 4.0, 0.0), 2.0);

        assert_relative_eq!(renderer.params().gain(), 0.5);
    }
}
