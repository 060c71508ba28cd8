//! Owns the engine across the host's prepare/release cycles and runs it once per block.

use crate::audio_buffer::Sample;
use crate::audio_settings::AudioSettings;
use crate::backend::{NativeBackend, SpatialBackend};
use crate::engine::{SpatialAudioEngine, SpatializerSettings};
use crate::error::{AudioError, EngineInitError, ProcessError};
use crate::motion::{AtomicPosition, MotionController, SharedParameters};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Instant;

/// A bus channel layout, as negotiated with the host.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum ChannelLayout {
    Disabled,
    Mono,
    Stereo,
    Discrete(usize),
}

impl ChannelLayout {
    pub fn from_channels(num_channels: usize) -> Self {
        match num_channels {
            0 => Self::Disabled,
            1 => Self::Mono,
            2 => Self::Stereo,
            n => Self::Discrete(n),
        }
    }

    pub fn num_channels(&self) -> usize {
        match self {
            Self::Disabled => 0,
            Self::Mono => 1,
            Self::Stereo => 2,
            Self::Discrete(n) => *n,
        }
    }
}

/// Output must be stereo. Input may be mono or stereo.
pub fn is_layout_supported(input: ChannelLayout, output: ChannelLayout) -> bool {
    output == ChannelLayout::Stereo && matches!(input, ChannelLayout::Mono | ChannelLayout::Stereo)
}

/// Whether an engine is available to process audio.
#[derive(Debug)]
pub enum EngineState<B: SpatialBackend> {
    /// Not prepared yet, released, or the last preparation failed.
    Uninitialized,
    Ready(SpatialAudioEngine<B>),
}

/// The audio-thread side of the plugin.
///
/// Hosts call [`Self::prepare`] before playback, [`Self::process_block`] once per block, and
/// [`Self::release`] when playback stops. Parameters are written through the
/// [`SharedParameters`] handle from any thread.
#[derive(Debug)]
pub struct SaunaProcessor<B: SpatialBackend + Clone = NativeBackend> {
    backend: B,
    settings: SpatializerSettings,
    parameters: Arc<SharedParameters>,
    controller: MotionController,
    state: EngineState<B>,
    last_error: Option<ProcessError>,
    /// Why the previous block was bypassed, if it was.
    bypass: Option<ProcessError>,
    last_block_micros: Arc<AtomicU64>,
}

impl Default for SaunaProcessor<NativeBackend> {
    fn default() -> Self {
        Self::new(NativeBackend, SpatializerSettings::default())
    }
}

impl<B: SpatialBackend + Clone> SaunaProcessor<B> {
    pub fn new(backend: B, settings: SpatializerSettings) -> Self {
        Self {
            backend,
            settings,
            parameters: Arc::new(SharedParameters::default()),
            controller: MotionController::new(),
            state: EngineState::Uninitialized,
            last_error: None,
            bypass: None,
            last_block_micros: Arc::new(AtomicU64::new(0)),
        }
    }

    /// Builds a new engine for `sample_rate` and `block_size`, replacing any previous one.
    ///
    /// # Errors
    ///
    /// [`EngineInitError`] if the engine could not be built. The processor is left
    /// uninitialized and passes audio through until a later call succeeds.
    pub fn prepare(&mut self, sample_rate: f64, block_size: usize) -> Result<(), EngineInitError> {
        self.state = EngineState::Uninitialized;

        let audio_settings = AudioSettings {
            sampling_rate: sample_rate.round() as u32,
            frame_size: u32::try_from(block_size).unwrap_or(u32::MAX),
        };

        match SpatialAudioEngine::try_new(self.backend.clone(), &audio_settings, &self.settings) {
            Ok(engine) => {
                self.state = EngineState::Ready(engine);
                self.last_error = None;
                self.bypass = None;
                Ok(())
            }
            Err(error) => {
                tracing::error!(%error, sample_rate, block_size, "failed to prepare spatial audio engine");
                Err(error)
            }
        }
    }

    /// Drops the engine.
    pub fn release(&mut self) {
        if matches!(self.state, EngineState::Ready(_)) {
            tracing::debug!("spatial audio engine released");
        }
        self.state = EngineState::Uninitialized;
    }

    pub fn is_ready(&self) -> bool {
        matches!(self.state, EngineState::Ready(_))
    }

    pub fn state(&self) -> &EngineState<B> {
        &self.state
    }

    /// Moves the source for `transport_time` seconds (0.0 without a playhead) and spatializes
    /// `buffer` in place.
    ///
    /// On error, the buffer is left as it came in and the error is kept as
    /// [`Self::last_error`]. A warning is logged when blocks start being bypassed, or when the
    /// reason changes, not for every bypassed block.
    ///
    /// # Errors
    ///
    /// - [`AudioError::NotReady`] if no engine is prepared.
    /// - [`ProcessError::Motion`] if the motion parameters are invalid.
    /// - Any [`AudioError`] from [`SpatialAudioEngine::process_block`].
    pub fn process_block(
        &mut self,
        buffer: &mut [&mut [Sample]],
        input_channels: usize,
        transport_time: Option<f64>,
    ) -> Result<(), ProcessError> {
        let result = self.spatialize(buffer, input_channels, transport_time.unwrap_or(0.0));

        match result {
            Ok(()) => self.bypass = None,
            Err(error) => {
                if self.bypass != Some(error) {
                    tracing::warn!(%error, "block left unspatialized");
                }
                self.bypass = Some(error);
                self.last_error = Some(error);
            }
        }

        result
    }

    fn spatialize(
        &mut self,
        buffer: &mut [&mut [Sample]],
        input_channels: usize,
        time: f64,
    ) -> Result<(), ProcessError> {
        let EngineState::Ready(engine) = &mut self.state else {
            return Err(AudioError::NotReady.into());
        };

        let start = Instant::now();

        let source = self.controller.update(&self.parameters, time)?;
        engine
            .set_params(source.position, source.min_distance)
            .process_block(buffer, input_channels)?;

        let elapsed = u64::try_from(start.elapsed().as_micros()).unwrap_or(u64::MAX);
        self.last_block_micros.store(elapsed, Ordering::Relaxed);

        Ok(())
    }

    /// Clears the engine's filter state, e.g. after the transport jumped.
    pub fn reset(&mut self) {
        if let EngineState::Ready(engine) = &mut self.state {
            engine.reset();
        }
    }

    /// The host-facing parameter store.
    pub fn parameters(&self) -> Arc<SharedParameters> {
        Arc::clone(&self.parameters)
    }

    /// A handle to the last computed source position, for visualization.
    pub fn position_handle(&self) -> Arc<AtomicPosition> {
        self.controller.position_handle()
    }

    /// The error that made the last failed block pass through unspatialized.
    pub fn last_error(&self) -> Option<ProcessError> {
        self.last_error
    }

    /// How long the last spatialized block took, in microseconds.
    pub fn last_block_micros(&self) -> u64 {
        self.last_block_micros.load(Ordering::Relaxed)
    }

    /// A handle to [`Self::last_block_micros`] that can be read from another thread.
    pub fn block_timing_handle(&self) -> Arc<AtomicU64> {
        Arc::clone(&self.last_block_micros)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::AtomicUsize;

    #[test]
    fn test_layouts() {
        use ChannelLayout::*;

        assert!(is_layout_supported(Mono, Stereo));
        assert!(is_layout_supported(Stereo, Stereo));
        assert!(!is_layout_supported(Stereo, Mono));
        assert!(!is_layout_supported(Discrete(3), Stereo));
        assert!(!is_layout_supported(Disabled, Stereo));
        assert_eq!(ChannelLayout::from_channels(2), Stereo);
        assert_eq!(Discrete(6).num_channels(), 6);
    }

    #[test]
    fn test_prepare_release() {
        let mut processor = SaunaProcessor::<NativeBackend>::default();
        assert!(!processor.is_ready());

        processor.prepare(44100.0, 256).unwrap();
        assert!(processor.is_ready());

        processor.release();
        assert!(!processor.is_ready());
    }

    #[test]
    fn test_failed_prepare_stays_uninitialized() {
        let mut processor = SaunaProcessor::<NativeBackend>::default();
        processor.prepare(48000.0, 128).unwrap();

        assert!(processor.prepare(48000.0, 0).is_err());
        assert!(!processor.is_ready());
    }

    #[test]
    fn test_debug_output() {
        let mut processor = SaunaProcessor::<NativeBackend>::default();
        processor.prepare(48000.0, 64).unwrap();

        assert!(format!("{:?}", processor.state()).starts_with("Ready"));
        assert!(!format!("{processor:?}").is_empty());
    }

    #[derive(Clone, Default)]
    struct WarningCounter(Arc<AtomicUsize>);

    impl<S: tracing::Subscriber> tracing_subscriber::Layer<S> for WarningCounter {
        fn on_event(&self, event: &tracing::Event<'_>, _ctx: tracing_subscriber::layer::Context<'_, S>) {
            if *event.metadata().level() == tracing::Level::WARN {
                self.0.fetch_add(1, Ordering::Relaxed);
            }
        }
    }

    #[test]
    fn test_repeated_bypass_warns_once() {
        use tracing_subscriber::layer::SubscriberExt;

        let warnings = WarningCounter::default();
        let subscriber = tracing_subscriber::registry().with(warnings.clone());

        tracing::subscriber::with_default(subscriber, || {
            let mut processor = SaunaProcessor::<NativeBackend>::default();
            let (mut left, mut right) = ([0.0; 32], [0.0; 32]);

            for _ in 0..5 {
                let _ = processor.process_block(&mut [&mut left[..], &mut right[..]], 2, None);
            }
            assert_eq!(warnings.0.load(Ordering::Relaxed), 1);

            processor.prepare(48000.0, 32).unwrap();
            let parameters = processor.parameters();
            parameters.set_mode_index(9);
            for _ in 0..5 {
                let _ = processor.process_block(&mut [&mut left[..], &mut right[..]], 2, None);
            }
            assert_eq!(warnings.0.load(Ordering::Relaxed), 2);

            // Recovering and failing again is a new episode.
            parameters.set_mode_index(0);
            processor
                .process_block(&mut [&mut left[..], &mut right[..]], 2, None)
                .unwrap();
            parameters.set_mode_index(9);
            let _ = processor.process_block(&mut [&mut left[..], &mut right[..]], 2, None);
            assert_eq!(warnings.0.load(Ordering::Relaxed), 3);
            assert_eq!(
                processor.last_error(),
                Some(ProcessError::Motion(crate::error::MotionError::InvalidMotionMode {
                    index: 9
                }))
            );
        });
    }
}
