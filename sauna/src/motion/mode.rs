use crate::error::MotionError;

/// How the source moves.
///
/// Hosts store this as a choice index (0, 1, 2).
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq, Hash)]
pub enum MotionMode {
    /// The source stays at a fixed position.
    #[default]
    Static,

    /// The source circles around a center, on a tilted and stretched orbit.
    Orbit,

    /// The source follows a sequence of path nodes.
    Path,
}

impl MotionMode {
    pub const ALL: [Self; 3] = [Self::Static, Self::Orbit, Self::Path];

    /// Choice labels, in index order.
    pub const NAMES: [&'static str; 3] = ["Static", "Orbit", "Path"];

    pub const fn index(self) -> u32 {
        match self {
            Self::Static => 0,
            Self::Orbit => 1,
            Self::Path => 2,
        }
    }

    pub const fn name(self) -> &'static str {
        Self::NAMES[self.index() as usize]
    }
}

impl TryFrom<u32> for MotionMode {
    type Error = MotionError;

    fn try_from(index: u32) -> Result<Self, Self::Error> {
        match index {
            0 => Ok(Self::Static),
            1 => Ok(Self::Orbit),
            2 => Ok(Self::Path),
            index => Err(MotionError::InvalidMotionMode { index }),
        }
    }
}

impl From<MotionMode> for u32 {
    fn from(mode: MotionMode) -> Self {
        mode.index()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_index_round_trip() {
        for mode in MotionMode::ALL {
            assert_eq!(MotionMode::try_from(mode.index()), Ok(mode));
        }
    }

    #[test]
    fn test_out_of_range_index() {
        assert_eq!(
            MotionMode::try_from(3),
            Err(MotionError::InvalidMotionMode { index: 3 })
        );
    }

    #[test]
    fn test_names() {
        assert_eq!(MotionMode::Orbit.name(), "Orbit");
        assert_eq!(MotionMode::default(), MotionMode::Static);
    }
}
