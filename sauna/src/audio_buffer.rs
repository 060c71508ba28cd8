//! Owned, deinterleaved audio storage used as the engine's scratch output.

use crate::error::InitFailure;

/// An audio sample.
pub type Sample = f32;

/// A block of deinterleaved audio owned by the engine.
///
/// Samples are stored channel after channel (i.e., `[L0, L1, ..., R0, R1, ...]`).
/// Storage is allocated once, at construction, and never grows.
#[derive(Debug, Clone)]
pub struct AudioBuffer {
    data: Vec<Sample>,
    num_channels: usize,
    num_samples: usize,
}

impl AudioBuffer {
    /// Allocates a zeroed buffer of `num_channels` channels holding `num_samples` samples each.
    ///
    /// # Errors
    ///
    /// - [`InitFailure::InitializationFailure`] if either dimension is 0.
    /// - [`InitFailure::OutOfMemory`] if the allocation fails.
    pub fn try_new(num_channels: usize, num_samples: usize) -> Result<Self, InitFailure> {
        if num_channels == 0 || num_samples == 0 {
            return Err(InitFailure::InitializationFailure);
        }

        let len = num_channels
            .checked_mul(num_samples)
            .ok_or(InitFailure::OutOfMemory)?;

        let mut data = Vec::new();
        data.try_reserve_exact(len)
            .map_err(|_| InitFailure::OutOfMemory)?;
        data.resize(len, 0.0);

        Ok(Self {
            data,
            num_channels,
            num_samples,
        })
    }

    /// Returns the number of channels of the audio buffer.
    pub fn num_channels(&self) -> usize {
        self.num_channels
    }

    /// Returns the number of samples per channel in the audio buffer.
    pub fn num_samples(&self) -> usize {
        self.num_samples
    }

    pub fn channel(&self, index: usize) -> &[Sample] {
        let start = index * self.num_samples;
        &self.data[start..start + self.num_samples]
    }

    pub fn channel_mut(&mut self, index: usize) -> &mut [Sample] {
        let start = index * self.num_samples;
        &mut self.data[start..start + self.num_samples]
    }

    /// Returns an iterator over channels.
    pub fn channels(&self) -> impl Iterator<Item = &[Sample]> + '_ {
        self.data.chunks_exact(self.num_samples)
    }

    /// Returns an iterator over mutable channels.
    pub fn channels_mut(&mut self) -> impl Iterator<Item = &mut [Sample]> + '_ {
        self.data.chunks_exact_mut(self.num_samples)
    }

    /// Borrows the first `len` samples of the first two channels, mutably.
    ///
    /// # Panics
    ///
    /// If the buffer has fewer than two channels or `len` exceeds [`Self::num_samples`].
    pub fn stereo_mut(&mut self, len: usize) -> [&mut [Sample]; 2] {
        assert!(self.num_channels >= 2, "audio buffer is not stereo");
        assert!(len <= self.num_samples, "length exceeds the frame size");

        let (left, rest) = self.data.split_at_mut(self.num_samples);
        [&mut left[..len], &mut rest[..len]]
    }

    /// Fills every channel with silence.
    pub fn clear(&mut self) {
        self.data.fill(0.0);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_try_new_is_zeroed() {
        let buffer = AudioBuffer::try_new(2, 4).unwrap();
        assert_eq!(buffer.num_channels(), 2);
        assert_eq!(buffer.num_samples(), 4);
        assert!(buffer.channels().all(|channel| channel == [0.0; 4]));
    }

    #[test]
    fn test_try_new_empty() {
        assert_eq!(
            AudioBuffer::try_new(0, 16).unwrap_err(),
            InitFailure::InitializationFailure
        );
        assert_eq!(
            AudioBuffer::try_new(2, 0).unwrap_err(),
            InitFailure::InitializationFailure
        );
    }

    #[test]
    fn test_try_new_overflow() {
        assert_eq!(
            AudioBuffer::try_new(usize::MAX, 2).unwrap_err(),
            InitFailure::OutOfMemory
        );
    }

    #[test]
    fn test_channels_are_deinterleaved() {
        let mut buffer = AudioBuffer::try_new(2, 3).unwrap();
        buffer.channel_mut(0).copy_from_slice(&[1.0, 2.0, 3.0]);
        buffer.channel_mut(1).copy_from_slice(&[4.0, 5.0, 6.0]);

        let channels: Vec<&[Sample]> = buffer.channels().collect();
        assert_eq!(channels[0], &[1.0, 2.0, 3.0]);
        assert_eq!(channels[1], &[4.0, 5.0, 6.0]);
    }

    #[test]
    fn test_stereo_mut_prefix() {
        let mut buffer = AudioBuffer::try_new(2, 4).unwrap();
        {
            let [left, right] = buffer.stereo_mut(2);
            left.fill(1.0);
            right.fill(-1.0);
        }

        assert_eq!(buffer.channel(0), &[1.0, 1.0, 0.0, 0.0]);
        assert_eq!(buffer.channel(1), &[-1.0, -1.0, 0.0, 0.0]);

        buffer.clear();
        assert!(buffer.channels().all(|channel| channel == [0.0; 4]));
    }
}
