use crate::audio_buffer::Sample;
use crate::audio_settings::AudioSettings;
use crate::backend::{DirectEffect, DirectEffectParams};
use crate::error::InitFailure;
use crate::geometry::Equalizer;
use std::f32::consts::TAU;

/// Crossover frequencies between the low, mid and high bands.
const CROSSOVERS: [f32; 2] = [800.0, 8_000.0];

/// Splits a signal into three bands that sum back to the input.
#[derive(Debug, Default, Copy, Clone)]
struct BandSplitter {
    low: f32,
    high: f32,
}

impl BandSplitter {
    fn split(&mut self, coefficients: [f32; 2], input: Sample) -> [Sample; 3] {
        self.low += coefficients[0] * (input - self.low);
        self.high += coefficients[1] * (input - self.high);

        let low = self.low;
        let high = input - self.high;
        [low, input - low - high, high]
    }
}

/// Applies distance attenuation and air absorption as a ramped three-band gain.
#[derive(Debug)]
pub struct NativeDirectEffect {
    coefficients: [f32; 2],
    splitters: Vec<BandSplitter>,
    gains: Option<(f32, Equalizer<3>)>,
}

impl NativeDirectEffect {
    pub fn try_new(audio_settings: &AudioSettings, num_channels: usize) -> Result<Self, InitFailure> {
        if audio_settings.sampling_rate == 0 || audio_settings.frame_size == 0 || num_channels == 0 {
            return Err(InitFailure::InitializationFailure);
        }

        let sample_rate = audio_settings.sampling_rate as f32;
        let coefficients = CROSSOVERS
            .map(|frequency| 1.0 - (-TAU * frequency.min(0.45 * sample_rate) / sample_rate).exp());

        let mut splitters = Vec::new();
        splitters
            .try_reserve_exact(num_channels)
            .map_err(|_| InitFailure::OutOfMemory)?;
        splitters.resize(num_channels, BandSplitter::default());

        Ok(Self {
            coefficients,
            splitters,
            gains: None,
        })
    }
}

impl DirectEffect for NativeDirectEffect {
    fn apply(&mut self, params: &DirectEffectParams, buffer: [&mut [Sample]; 2]) {
        let target = (params.gain(), params.band_gains());
        let (start_gain, start_bands) = self.gains.unwrap_or(target);
        let (target_gain, target_bands) = target;

        for (channel, splitter) in buffer.into_iter().zip(&mut self.splitters) {
            let step = 1.0 / channel.len().max(1) as f32;

            for (i, sample) in channel.iter_mut().enumerate() {
                let t = (i + 1) as f32 * step;
                let gain = start_gain + (target_gain - start_gain) * t;

                let bands = splitter.split(self.coefficients, *sample);
                *sample = gain
                    * bands
                        .iter()
                        .zip(start_bands.iter().zip(target_bands.iter()))
                        .map(|(band, (from, to))| band * (from + (to - from) * t))
                        .sum::<f32>();
            }
        }

        self.gains = Some(target);
    }

    fn reset(&mut self) {
        self.splitters.fill(BandSplitter::default());
        self.gains = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn effect() -> NativeDirectEffect {
        NativeDirectEffect::try_new(&AudioSettings::default(), 2).unwrap()
    }

    #[test]
    fn test_invalid_channel_count() {
        assert_eq!(
            NativeDirectEffect::try_new(&AudioSettings::default(), 0).unwrap_err(),
            InitFailure::InitializationFailure
        );
    }

    #[test]
    fn test_neutral_params_pass_through() {
        let mut effect = effect();
        let input: Vec<Sample> = (0..128).map(|i| (i as f32 * 0.05).sin()).collect();
        let (mut left, mut right) = (input.clone(), input.clone());

        effect.apply(&DirectEffectParams::default(), [&mut left[..], &mut right[..]]);

        for (output, input) in left.iter().zip(&input) {
            assert_relative_eq!(*output, *input, epsilon = 1e-5);
        }
        assert_eq!(left, right);
    }

    #[test]
    fn test_distance_attenuation_scales() {
        let mut effect = effect();
        let (mut left, mut right) = (vec![1.0; 64], vec![-1.0; 64]);
        let params = DirectEffectParams {
            distance_attenuation: Some(0.25),
            air_absorption: None,
        };

        effect.apply(&params, [&mut left[..], &mut right[..]]);

        assert_relative_eq!(left[63], 0.25, epsilon = 1e-5);
        assert_relative_eq!(right[63], -0.25, epsilon = 1e-5);
    }

    #[test]
    fn test_gain_changes_are_ramped() {
        let mut effect = effect();
        let (mut left, mut right) = (vec![1.0; 8], vec![1.0; 8]);
        effect.apply(
            &DirectEffectParams {
                distance_attenuation: Some(1.0),
                air_absorption: None,
            },
            [&mut left[..], &mut right[..]],
        );

        let (mut left, mut right) = (vec![1.0; 8], vec![1.0; 8]);
        effect.apply(
            &DirectEffectParams {
                distance_attenuation: Some(0.0),
                air_absorption: None,
            },
            [&mut left[..], &mut right[..]],
        );

        assert!(left.windows(2).all(|pair| pair[1] <= pair[0]));
        assert_relative_eq!(left[7], 0.0, epsilon = 1e-6);
        assert!(left[0] > 0.5);
    }

    #[test]
    fn test_air_absorption_damps_highs() {
        let mut effect = effect();
        // Alternating samples sit at the Nyquist frequency.
        let nyquist: Vec<Sample> = (0..256).map(|i| if i % 2 == 0 { 1.0 } else { -1.0 }).collect();
        let (mut left, mut right) = (nyquist.clone(), nyquist.clone());
        let params = DirectEffectParams {
            distance_attenuation: None,
            air_absorption: Some(Equalizer([1.0, 1.0, 0.1])),
        };

        effect.apply(&params, [&mut left[..], &mut right[..]]);

        let peak = left[128..].iter().fold(0.0_f32, |peak, sample| peak.max(sample.abs()));
        assert!(peak < 0.6);
    }

    #[test]
    fn test_silence_stays_silent() {
        let mut effect = effect();
        let (mut left, mut right) = (vec![0.0; 4], vec![0.0; 4]);
        let params = DirectEffectParams {
            distance_attenuation: Some(0.4),
            air_absorption: Some(Equalizer([0.9, 0.8, 0.7])),
        };

        effect.apply(&params, [&mut left[..], &mut right[..]]);

        assert_eq!(left, [0.0; 4]);
        assert_eq!(right, [0.0; 4]);
    }
}
