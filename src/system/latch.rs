//! Reaction capture latch
//!
//! Hands the stop-button edge event from the button watcher context to the
//! game loop. The watcher runs off the GPIO interrupt and must do minimal
//! work, so the producer side is a wait-free atomic test-and-set: the first
//! edge per round stores its timestamp and flips the flag, later edges are
//! no-ops. The game loop drains the latch with [`ReactionLatch::take`],
//! which also disarms it for the next round.
//!
//! The latch only captures while armed. The game loop arms it strictly
//! after entering the reaction phase, so a press during the randomized
//! wait can never leak into the latch; false starts are caught exclusively
//! by the wait loop's direct polling.

use core::sync::atomic::{AtomicBool, AtomicU32, Ordering};

/// Single-capture timestamp latch shared between the stop-button watcher
/// and the game loop.
pub struct ReactionLatch {
    /// Capture gate, set only while the round is in the reaction phase
    armed: AtomicBool,
    /// Whether a capture happened this round, set at most once per round
    captured: AtomicBool,
    /// Timestamp of the capture, ms. Valid only while `captured` is set.
    captured_at_ms: AtomicU32,
}

/// Global latch instance, the only data shared between the two contexts
pub static REACTION_LATCH: ReactionLatch = ReactionLatch::new();

impl ReactionLatch {
    pub const fn new() -> Self {
        Self {
            armed: AtomicBool::new(false),
            captured: AtomicBool::new(false),
            captured_at_ms: AtomicU32::new(0),
        }
    }

    /// Opens the latch for capture
    ///
    /// Called by the game loop once the round has entered the reaction
    /// phase and the go-signal timestamp has been recorded.
    pub fn arm(&self) {
        self.armed.store(true, Ordering::Release);
    }

    /// Records a stop-button edge at `now_ms`
    ///
    /// Returns true if this edge was captured. Edges while the latch is
    /// closed, and any edge after the first, are ignored without touching
    /// the stored timestamp. Safe to call from the watcher context
    /// concurrently with [`Self::take`]: the timestamp is stored before
    /// the flag is published, so a reader that observes the flag also
    /// observes the timestamp.
    pub fn try_capture(&self, now_ms: u32) -> bool {
        if !self.armed.load(Ordering::Acquire) {
            return false;
        }
        if self.captured.load(Ordering::Relaxed) {
            return false;
        }
        self.captured_at_ms.store(now_ms, Ordering::Relaxed);
        self.captured
            .compare_exchange(false, true, Ordering::Release, Ordering::Relaxed)
            .is_ok()
    }

    /// Returns whether a capture is waiting to be drained
    ///
    /// Cheap enough for the game loop's per-tick polling; the actual drain
    /// happens once per round through [`Self::take`].
    pub fn is_captured(&self) -> bool {
        self.captured.load(Ordering::Acquire)
    }

    /// Drains the latch, returning the capture timestamp if one arrived
    ///
    /// Disarms first so no new capture can slip in behind the read, then
    /// clears the captured flag. After this call the latch is empty and
    /// closed, ready for the next round's [`Self::arm`].
    pub fn take(&self) -> Option<u32> {
        self.armed.store(false, Ordering::Release);
        if self.captured.swap(false, Ordering::Acquire) {
            Some(self.captured_at_ms.load(Ordering::Relaxed))
        } else {
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn capture_while_unarmed_is_ignored() {
        let latch = ReactionLatch::new();
        assert!(!latch.try_capture(123));
        assert_eq!(latch.take(), None);
    }

    #[test]
    fn first_capture_wins_second_is_a_noop() {
        let latch = ReactionLatch::new();
        latch.arm();
        assert!(!latch.is_captured());
        assert!(latch.try_capture(500));
        assert!(latch.is_captured());
        assert!(!latch.try_capture(620));
        // The first timestamp is preserved.
        assert_eq!(latch.take(), Some(500));
    }

    #[test]
    fn take_clears_and_disarms() {
        let latch = ReactionLatch::new();
        latch.arm();
        assert!(latch.try_capture(40));
        assert_eq!(latch.take(), Some(40));
        // Empty after the drain.
        assert_eq!(latch.take(), None);
        // And closed: a late edge from the previous round cannot land.
        assert!(!latch.try_capture(41));
    }

    #[test]
    fn rearming_starts_a_fresh_round() {
        let latch = ReactionLatch::new();
        latch.arm();
        assert!(latch.try_capture(10));
        assert_eq!(latch.take(), Some(10));
        latch.arm();
        assert_eq!(latch.take(), None);
        latch.arm();
        assert!(latch.try_capture(900));
        assert_eq!(latch.take(), Some(900));
    }
}
