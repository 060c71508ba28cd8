use crate::geometry::{Vec3, DEFAULT_SOURCE_POSITION};
use atomic_float::AtomicF32;
use std::sync::atomic::{AtomicU32, Ordering};

/// The last computed source position, published by the audio thread for UI readers.
///
/// A sequence lock: a writer claims the sequence by moving it from even to odd, stores the
/// components and moves it back to even. Concurrent writers wait for each other. Readers retry until they see the same even sequence on both sides
/// of their loads, so they never observe a half-written position. Neither side blocks or
/// allocates.
#[derive(Debug)]
pub struct AtomicPosition {
    sequence: AtomicU32,
    x: AtomicF32,
    y: AtomicF32,
    z: AtomicF32,
}

impl AtomicPosition {
    pub fn new(position: Vec3) -> Self {
        Self {
            sequence: AtomicU32::new(0),
            x: AtomicF32::new(position.x),
            y: AtomicF32::new(position.y),
            z: AtomicF32::new(position.z),
        }
    }

    /// Publishes `position`.
    pub fn store(&self, position: Vec3) {
        let sequence = self.claim();
        std::sync::atomic::fence(Ordering::Release);

        self.x.store(position.x, Ordering::Relaxed);
        self.y.store(position.y, Ordering::Relaxed);
        self.z.store(position.z, Ordering::Relaxed);

        self.sequence
            .store(sequence.wrapping_add(2), Ordering::Release);
    }

    /// Moves the sequence from even to odd, returning the even value.
    fn claim(&self) -> u32 {
        loop {
            let sequence = self.sequence.load(Ordering::Relaxed);
            if sequence % 2 == 1 {
                std::hint::spin_loop();
                continue;
            }

            if self
                .sequence
                .compare_exchange_weak(
                    sequence,
                    sequence.wrapping_add(1),
                    Ordering::Acquire,
                    Ordering::Relaxed,
                )
                .is_ok()
            {
                return sequence;
            }
        }
    }

    pub fn load(&self) -> Vec3 {
        loop {
            let before = self.sequence.load(Ordering::Acquire);
            if before % 2 == 1 {
                std::hint::spin_loop();
                continue;
            }

            let position = Vec3::new(
                self.x.load(Ordering::Relaxed),
                self.y.load(Ordering::Relaxed),
                self.z.load(Ordering::Relaxed),
            );

            std::sync::atomic::fence(Ordering::Acquire);
            if self.sequence.load(Ordering::Relaxed) == before {
                return position;
            }
        }
    }
}

impl Default for AtomicPosition {
    fn default() -> Self {
        Self::new(DEFAULT_SOURCE_POSITION)
    }
}
