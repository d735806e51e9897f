//! Button debouncing
//!
//! Mechanical buttons produce bursts of spurious transitions when pressed.
//! The filter accepts at most one press per guard window and swallows the
//! rest, comparing millisecond timestamps with wrapping arithmetic so a
//! clock rollover cannot lock the filter up.

/// Guard window within which repeated presses are ignored (ms)
pub const DEBOUNCE_WINDOW_MS: u32 = 50;

/// Per-input-line debounce state
///
/// One instance per monitored line. The filter is purely a function of its
/// own state and the caller-supplied timestamp, so it carries no clock or
/// pin dependency of its own.
pub struct DebounceFilter {
    /// Timestamp of the last accepted press, ms. None until the first press.
    last_accepted_at_ms: Option<u32>,
}

impl DebounceFilter {
    /// Creates a filter that will accept the first press unconditionally
    pub const fn new() -> Self {
        Self {
            last_accepted_at_ms: None,
        }
    }

    /// Reports a raw press at `now_ms` and returns whether it counts
    ///
    /// Returns true at most once per guard window. A rejected press has no
    /// side effects, so a burst of bounce edges cannot push the window
    /// forward and starve a genuine press.
    pub fn accept(&mut self, now_ms: u32) -> bool {
        if let Some(last) = self.last_accepted_at_ms {
            if now_ms.wrapping_sub(last) < DEBOUNCE_WINDOW_MS {
                return false;
            }
        }
        self.last_accepted_at_ms = Some(now_ms);
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn first_press_is_accepted() {
        let mut filter = DebounceFilter::new();
        assert!(filter.accept(0));
    }

    #[test]
    fn bounce_within_window_is_rejected() {
        let mut filter = DebounceFilter::new();
        assert!(filter.accept(100));
        assert!(!filter.accept(101));
        assert!(!filter.accept(120));
        assert!(!filter.accept(149));
    }

    #[test]
    fn press_at_window_boundary_is_accepted() {
        let mut filter = DebounceFilter::new();
        assert!(filter.accept(100));
        assert!(filter.accept(150));
    }

    #[test]
    fn at_most_one_accept_per_window() {
        let mut filter = DebounceFilter::new();
        // Raw edges every 10 ms for half a second.
        let mut accepted = 0;
        for t in (0..500).step_by(10) {
            if filter.accept(t) {
                accepted += 1;
            }
        }
        assert_eq!(accepted, 10);
    }

    #[test]
    fn rejected_press_does_not_extend_the_window() {
        let mut filter = DebounceFilter::new();
        assert!(filter.accept(0));
        assert!(!filter.accept(49));
        // Window is measured from the accepted press at t=0, not the bounce.
        assert!(filter.accept(50));
    }

    #[test]
    fn survives_timestamp_wraparound() {
        let mut filter = DebounceFilter::new();
        assert!(filter.accept(u32::MAX - 10));
        assert!(!filter.accept(u32::MAX));
        // 40 ms after the accepted press, crossing the rollover.
        assert!(!filter.accept(29));
        assert!(filter.accept(39));
    }
}
