use crate::audio_buffer::Sample;
use crate::audio_settings::AudioSettings;
use crate::backend::{BinauralEffect, BinauralEffectParams};
use crate::error::InitFailure;
use crate::geometry::{Vec3, Vector3};
use crate::hrtf::{HrtfInterpolation, HrtfSettings, VolumeNormalization};
use std::f32::consts::{FRAC_PI_2, TAU};

const HEAD_RADIUS: f32 = 0.0875;
const SPEED_OF_SOUND: f32 = 343.0;

/// Level difference at the far ear for a source at 90 degrees.
const MAX_ILD_DB: f32 = 10.0;

/// Head-shadow cutoff at the far ear for a source at 90 degrees.
const SHADOW_CUTOFF: f32 = 1_500.0;

const ELEVATION_DAMPING: f32 = 0.3;

/// Rendering parameters of one ear.
#[derive(Debug, Copy, Clone, PartialEq)]
struct Ear {
    /// Delay in samples.
    delay: f32,
    gain: f32,
    /// One-pole low-pass coefficient. 1.0 lets everything through.
    coefficient: f32,
}

impl Ear {
    const OPEN: Self = Self {
        delay: 0.0,
        gain: 1.0,
        coefficient: 1.0,
    };

    fn lerp(self, target: Self, t: f32) -> Self {
        Self {
            delay: self.delay + (target.delay - self.delay) * t,
            gain: self.gain + (target.gain - self.gain) * t,
            coefficient: self.coefficient + (target.coefficient - self.coefficient) * t,
        }
    }
}

/// Spherical-head binaural renderer.
///
/// Models interaural time difference with the Woodworth formula, interaural level difference
/// with a gain and a head-shadow low-pass on the far ear, and damps sources above or below the
/// listener. Parameter changes are ramped across a block.
#[derive(Debug)]
pub struct NativeBinauralEffect {
    sample_rate: f32,
    volume: f32,
    volume_normalization: VolumeNormalization,
    delay_line: Vec<Sample>,
    write_position: usize,
    shadow: [f32; 2],
    ears: Option<[Ear; 2]>,
}

impl NativeBinauralEffect {
    pub fn try_new(
        audio_settings: &AudioSettings,
        hrtf_settings: &HrtfSettings,
    ) -> Result<Self, InitFailure> {
        if audio_settings.sampling_rate == 0 || audio_settings.frame_size == 0 {
            return Err(InitFailure::InitializationFailure);
        }

        let sample_rate = audio_settings.sampling_rate as f32;
        let max_delay = Self::max_delay(sample_rate);
        let len = max_delay.ceil() as usize + 2;

        let mut delay_line = Vec::new();
        delay_line
            .try_reserve_exact(len)
            .map_err(|_| InitFailure::OutOfMemory)?;
        delay_line.resize(len, 0.0);

        Ok(Self {
            sample_rate,
            volume: hrtf_settings.volume,
            volume_normalization: hrtf_settings.volume_normalization,
            delay_line,
            write_position: 0,
            shadow: [0.0; 2],
            ears: None,
        })
    }

    /// Largest interaural delay, in samples, for a source at 90 degrees.
    fn max_delay(sample_rate: f32) -> f32 {
        HEAD_RADIUS / SPEED_OF_SOUND * (FRAC_PI_2 + 1.0) * sample_rate
    }

    /// Left and right ear parameters for a source in `direction`.
    fn ears(&self, direction: Vector3, interpolation: HrtfInterpolation) -> [Ear; 2] {
        let direction = Vec3::from(direction).normalized();
        let direction = if direction.is_origin() {
            Vec3::new(0.0, 1.0, 0.0)
        } else {
            direction
        };

        // Angle off the median plane, positive to the right.
        let lateral = direction.x.clamp(-1.0, 1.0).asin();
        let elevation = direction.z.clamp(-1.0, 1.0).asin();
        let shadow = lateral.abs() / FRAC_PI_2;

        let mut delay =
            HEAD_RADIUS / SPEED_OF_SOUND * (lateral.abs() + lateral.abs().sin()) * self.sample_rate;
        if interpolation == HrtfInterpolation::Nearest {
            delay = delay.round();
        }

        let side_coefficient = 1.0 - (-TAU * SHADOW_CUTOFF / self.sample_rate).exp();

        let far = Ear {
            delay,
            gain: 10.0_f32.powf(-MAX_ILD_DB * shadow / 20.0),
            coefficient: 1.0 + (side_coefficient - 1.0) * shadow,
        };

        let [mut left, mut right] = if lateral >= 0.0 {
            [far, Ear::OPEN]
        } else {
            [Ear::OPEN, far]
        };

        let mut gain = self.volume * (1.0 - ELEVATION_DAMPING * elevation.abs() / FRAC_PI_2);
        if self.volume_normalization == VolumeNormalization::RootMeanSquared {
            gain *= (2.0 / (left.gain * left.gain + right.gain * right.gain)).sqrt();
        }
        left.gain *= gain;
        right.gain *= gain;

        [left, right]
    }

    fn read(&self, delay: f32) -> Sample {
        let len = self.delay_line.len();
        let whole = delay.floor();
        let fraction = delay - whole;
        let whole = whole as usize;

        let a = self.delay_line[(self.write_position + len - whole) % len];
        let b = self.delay_line[(self.write_position + len - whole - 1) % len];
        a + (b - a) * fraction
    }
}

impl BinauralEffect for NativeBinauralEffect {
    fn apply(
        &mut self,
        params: &BinauralEffectParams,
        input: &[&[Sample]],
        output: [&mut [Sample]; 2],
    ) {
        let [left, right] = output;
        let num_samples = left.len().min(right.len());

        let target = self.ears(params.direction, params.interpolation);
        let start = self.ears.unwrap_or(target);
        let blend = params.spatial_blend.clamp(0.0, 1.0);
        let step = 1.0 / num_samples.max(1) as f32;

        for i in 0..num_samples {
            let dry = match input {
                [] => [0.0, 0.0],
                [mono] => [mono[i], mono[i]],
                [l, r, ..] => [l[i], r[i]],
            };

            self.delay_line[self.write_position] = 0.5 * (dry[0] + dry[1]);

            let t = (i + 1) as f32 * step;
            let mut wet = [0.0; 2];
            for (ear, (from, to)) in start.iter().zip(&target).enumerate() {
                let mut ear_params = from.lerp(*to, t);
                if params.interpolation == HrtfInterpolation::Nearest {
                    ear_params.delay = ear_params.delay.round();
                }

                let delayed = self.read(ear_params.delay);
                self.shadow[ear] += ear_params.coefficient * (delayed - self.shadow[ear]);
                wet[ear] = self.shadow[ear] * ear_params.gain;
            }

            left[i] = blend * wet[0] + (1.0 - blend) * dry[0];
            right[i] = blend * wet[1] + (1.0 - blend) * dry[1];

            self.write_position = (self.write_position + 1) % self.delay_line.len();
        }

        self.ears = Some(target);
    }

    fn reset(&mut self) {
        self.delay_line.fill(0.0);
        self.write_position = 0;
        self.shadow = [0.0; 2];
        self.ears = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const RIGHT: Vector3 = Vector3::new(1.0, 0.0, 0.0);
    const AHEAD: Vector3 = Vector3::new(0.0, 0.0, -1.0);

    fn effect() -> NativeBinauralEffect {
        NativeBinauralEffect::try_new(&AudioSettings::default(), &HrtfSettings::default()).unwrap()
    }

    fn params(direction: Vector3) -> BinauralEffectParams {
        BinauralEffectParams {
            direction,
            interpolation: HrtfInterpolation::Bilinear,
            spatial_blend: 1.0,
        }
    }

    fn energy(samples: &[Sample]) -> f32 {
        samples.iter().map(|sample| sample * sample).sum()
    }

    #[test]
    fn test_invalid_settings() {
        let audio_settings = AudioSettings {
            sampling_rate: 0,
            frame_size: 256,
        };
        assert_eq!(
            NativeBinauralEffect::try_new(&audio_settings, &HrtfSettings::default()).unwrap_err(),
            InitFailure::InitializationFailure
        );
    }

    #[test]
    fn test_source_ahead_is_balanced() {
        let mut effect = effect();
        let input = vec![1.0; 256];
        let (mut left, mut right) = (vec![0.0; 256], vec![0.0; 256]);

        effect.apply(&params(AHEAD), &[&input[..]], [&mut left[..], &mut right[..]]);

        assert_eq!(left, right);
    }

    #[test]
    fn test_source_right_favors_right_ear() {
        let mut effect = effect();
        let input: Vec<Sample> = (0..512).map(|i| (i as f32 * 0.3).sin()).collect();
        let (mut left, mut right) = (vec![0.0; 512], vec![0.0; 512]);

        effect.apply(&params(RIGHT), &[&input[..]], [&mut left[..], &mut right[..]]);

        assert!(energy(&right) > energy(&left));
    }

    #[test]
    fn test_far_ear_is_delayed() {
        let mut effect = effect();
        let mut input = vec![0.0; 64];
        input[0] = 1.0;
        let (mut left, mut right) = (vec![0.0; 64], vec![0.0; 64]);

        effect.apply(
            &BinauralEffectParams {
                interpolation: HrtfInterpolation::Nearest,
                ..params(RIGHT)
            },
            &[&input[..]],
            [&mut left[..], &mut right[..]],
        );

        let first = |samples: &[Sample]| samples.iter().position(|sample| *sample != 0.0);
        assert_eq!(first(&right), Some(0));
        assert!(first(&left).unwrap() > 20);
    }

    #[test]
    fn test_zero_blend_is_dry() {
        let mut effect = effect();
        let l = vec![0.25; 32];
        let r = vec![-0.5; 32];
        let (mut left, mut right) = (vec![0.0; 32], vec![0.0; 32]);

        effect.apply(
            &BinauralEffectParams {
                spatial_blend: 0.0,
                ..params(RIGHT)
            },
            &[&l[..], &r[..]],
            [&mut left[..], &mut right[..]],
        );

        assert_eq!(left, l);
        assert_eq!(right, r);
    }

    #[test]
    fn test_reset_clears_delay_line() {
        let mut effect = effect();
        let input = vec![1.0; 16];
        let (mut left, mut right) = (vec![0.0; 16], vec![0.0; 16]);
        effect.apply(&params(RIGHT), &[&input[..]], [&mut left[..], &mut right[..]]);

        effect.reset();

        let silence = vec![0.0; 16];
        effect.apply(&params(RIGHT), &[&silence[..]], [&mut left[..], &mut right[..]]);
        assert!(left.iter().chain(&right).all(|sample| *sample == 0.0));
    }
}
