//! Errors surfaced by the engine, the motion controller and the processor.

/// Why the spatialization backend refused to create a resource.
#[derive(Debug, PartialEq, Eq, Copy, Clone)]
pub enum InitFailure {
    /// The system ran out of memory.
    OutOfMemory,

    /// An error occurred while initializing an external dependency (e.g. HRTF data).
    InitializationFailure,

    /// An unspecified error occurred inside the backend.
    InternalError,

    /// The backend returned a status code this crate does not know about.
    Unknown(i32),
}

impl InitFailure {
    /// Maps a raw backend status code, `None` meaning success.
    pub const fn from_status(status: i32) -> Option<Self> {
        match status {
            0 => None,
            1 => Some(Self::InternalError),
            2 => Some(Self::OutOfMemory),
            3 => Some(Self::InitializationFailure),
            code => Some(Self::Unknown(code)),
        }
    }
}

impl std::fmt::Display for InitFailure {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match self {
            Self::OutOfMemory => write!(f, "out of memory"),
            Self::InitializationFailure => write!(f, "initialization failure"),
            Self::InternalError => write!(f, "internal error"),
            Self::Unknown(code) => write!(f, "unknown error code {code}"),
        }
    }
}

/// Resource whose acquisition failed while constructing an engine.
#[derive(Debug, PartialEq, Eq, Copy, Clone)]
pub enum InitStage {
    Context,
    Hrtf,
    BinauralEffect,
    DirectEffect,
    ScratchBuffer,
}

impl std::fmt::Display for InitStage {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        let name = match self {
            Self::Context => "context",
            Self::Hrtf => "HRTF",
            Self::BinauralEffect => "binaural effect",
            Self::DirectEffect => "direct effect",
            Self::ScratchBuffer => "output buffer",
        };
        write!(f, "{name}")
    }
}

/// Construction of a [`crate::SpatialAudioEngine`] failed.
///
/// Fatal to the engine instance: nothing may be processed until a new engine is built.
#[derive(Debug, PartialEq, Eq, Copy, Clone)]
pub struct EngineInitError {
    pub stage: InitStage,
    pub reason: InitFailure,
}

impl EngineInitError {
    pub const fn new(stage: InitStage, reason: InitFailure) -> Self {
        Self { stage, reason }
    }
}

impl std::error::Error for EngineInitError {}

impl std::fmt::Display for EngineInitError {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "failed to create {}: {}", self.stage, self.reason)
    }
}

/// Errors that can occur when processing a block of audio.
#[derive(Debug, PartialEq, Eq, Copy, Clone)]
pub enum AudioError {
    /// The buffer handed to the engine is not stereo.
    ChannelCountMismatch { actual: usize },

    /// The block holds more samples than the engine was sized for.
    FrameSizeExceeded { num_samples: usize, frame_size: usize },

    /// No engine is ready: the processor is not prepared, or construction failed.
    NotReady,
}

impl std::error::Error for AudioError {}

impl std::fmt::Display for AudioError {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match self {
            Self::ChannelCountMismatch { actual } => {
                write!(f, "effect requires exactly 2 channels, but was given {actual}")
            }
            Self::FrameSizeExceeded {
                num_samples,
                frame_size,
            } => write!(
                f,
                "block of {num_samples} samples exceeds the frame size of {frame_size}"
            ),
            Self::NotReady => write!(f, "spatial audio engine is not ready"),
        }
    }
}

/// Errors raised while computing the source position.
#[derive(Debug, PartialEq, Eq, Copy, Clone)]
pub enum MotionError {
    /// The mode parameter holds an index outside of the known modes.
    InvalidMotionMode { index: u32 },
}

impl std::error::Error for MotionError {}

impl std::fmt::Display for MotionError {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match self {
            Self::InvalidMotionMode { index } => write!(f, "undefined mode {index}"),
        }
    }
}

/// Any error that made the processor skip spatialization of a block.
#[derive(Debug, PartialEq, Eq, Copy, Clone)]
pub enum ProcessError {
    Audio(AudioError),
    Motion(MotionError),
}

impl std::error::Error for ProcessError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Audio(error) => Some(error),
            Self::Motion(error) => Some(error),
        }
    }
}

impl std::fmt::Display for ProcessError {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match self {
            Self::Audio(error) => write!(f, "{error}"),
            Self::Motion(error) => write!(f, "{error}"),
        }
    }
}

impl From<AudioError> for ProcessError {
    fn from(error: AudioError) -> Self {
        Self::Audio(error)
    }
}

impl From<MotionError> for ProcessError {
    fn from(error: MotionError) -> Self {
        Self::Motion(error)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_status() {
        assert_eq!(InitFailure::from_status(0), None);
        assert_eq!(InitFailure::from_status(1), Some(InitFailure::InternalError));
        assert_eq!(InitFailure::from_status(2), Some(InitFailure::OutOfMemory));
        assert_eq!(
            InitFailure::from_status(3),
            Some(InitFailure::InitializationFailure)
        );
        assert_eq!(InitFailure::from_status(42), Some(InitFailure::Unknown(42)));
    }

    #[test]
    fn test_engine_init_error_message() {
        let error = EngineInitError::new(InitStage::Hrtf, InitFailure::OutOfMemory);
        assert_eq!(error.to_string(), "failed to create HRTF: out of memory");

        let error = EngineInitError::new(InitStage::DirectEffect, InitFailure::Unknown(-7));
        assert_eq!(
            error.to_string(),
            "failed to create direct effect: unknown error code -7"
        );
    }

    #[test]
    fn test_channel_count_mismatch_message() {
        let error = AudioError::ChannelCountMismatch { actual: 3 };
        assert_eq!(
            error.to_string(),
            "effect requires exactly 2 channels, but was given 3"
        );
    }

    #[test]
    fn test_process_error_source() {
        use std::error::Error;

        let error = ProcessError::from(MotionError::InvalidMotionMode { index: 5 });
        assert_eq!(error.to_string(), "undefined mode 5");
        assert!(error.source().is_some());
    }
}
