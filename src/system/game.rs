//! Round lifecycle logic
//!
//! Pure state for one reaction round: the randomized pre-delay with
//! false-start detection ([`ArmedWait`]) and the round state machine
//! ([`GameMachine`]). Neither touches hardware or the clock directly;
//! the game loop task feeds them millisecond timestamps and sampled pin
//! levels, which keeps every transition testable on the host.

use defmt::Format;

/// Polling interval of the armed wait (ms)
pub const WAIT_TICK_MS: u32 = 10;

/// Shortest randomized pre-delay (ms)
pub const MIN_DELAY_MS: u32 = 1000;

/// Longest randomized pre-delay (ms)
pub const MAX_DELAY_MS: u32 = 5000;

/// Phase of the current round
///
/// Exactly one instance lives inside [`GameMachine`]; all mutation goes
/// through its transition methods so an impossible combination (scoring a
/// round that was never armed, arming twice) cannot be represented.
#[derive(Debug, Clone, Copy, PartialEq, Format)]
pub enum RoundState {
    /// Waiting for a start press
    Idle,
    /// Randomized pre-delay running, watching for a false start
    Armed,
    /// Go-signal emitted, waiting for the stop press
    Reacting,
    /// Valid reaction captured, result on display
    Scored,
    /// False start, penalty on display
    Penalized,
}

/// How an armed wait ended
#[derive(Debug, Clone, Copy, PartialEq, Format)]
pub enum WaitOutcome {
    /// The full delay elapsed without a premature press
    Completed,
    /// The stop input was asserted before the delay elapsed
    Aborted {
        /// Time into the wait at which the press was seen (ms)
        elapsed_ms: u32,
    },
}

/// One randomized pre-delay with per-tick false-start polling
///
/// The caller sleeps one tick, samples the raw stop level (deliberately not
/// debounced: any assertion during the wait is a false start), and feeds it
/// to [`Self::tick`] until an outcome comes back.
pub struct ArmedWait {
    delay_ms: u32,
    elapsed_ms: u32,
}

impl ArmedWait {
    /// Starts a wait of `delay_ms` total
    pub fn new(delay_ms: u32) -> Self {
        Self {
            delay_ms,
            elapsed_ms: 0,
        }
    }

    /// Advances the wait by one tick
    ///
    /// `stop_asserted` is the raw stop level sampled after the tick's
    /// sleep. A premature press aborts immediately, before the delay check,
    /// so a press on the final tick still counts as a false start.
    pub fn tick(&mut self, stop_asserted: bool) -> Option<WaitOutcome> {
        self.elapsed_ms = self.elapsed_ms.saturating_add(WAIT_TICK_MS);
        if stop_asserted {
            Some(WaitOutcome::Aborted {
                elapsed_ms: self.elapsed_ms,
            })
        } else if self.elapsed_ms >= self.delay_ms {
            Some(WaitOutcome::Completed)
        } else {
            None
        }
    }
}

/// Timestamps of one round, ms
///
/// `reaction_at_ms` is only ever populated from a drained latch capture,
/// which in turn is only armed after `go_signal_at_ms` is recorded, so the
/// elapsed time is non-negative by construction.
#[derive(Debug, Clone, Copy, Default)]
pub struct RoundTiming {
    pub armed_at_ms: u32,
    pub go_signal_at_ms: u32,
    pub reaction_at_ms: Option<u32>,
}

/// The round state machine
///
/// Sole owner and mutator of round-level state. The game loop task calls
/// the transition methods and performs the matching display/LED/buzzer
/// side effects; everything in here stays side-effect free.
pub struct GameMachine {
    state: RoundState,
    timing: RoundTiming,
}

impl GameMachine {
    pub const fn new() -> Self {
        Self {
            state: RoundState::Idle,
            timing: RoundTiming {
                armed_at_ms: 0,
                go_signal_at_ms: 0,
                reaction_at_ms: None,
            },
        }
    }

    pub fn state(&self) -> RoundState {
        self.state
    }

    pub fn timing(&self) -> &RoundTiming {
        &self.timing
    }

    /// Idle -> Armed on a debounced start press
    ///
    /// Returns false without any state change when a round is already in
    /// progress, so repeated start presses cannot re-arm.
    pub fn arm(&mut self, now_ms: u32) -> bool {
        if self.state != RoundState::Idle {
            return false;
        }
        self.timing = RoundTiming {
            armed_at_ms: now_ms,
            go_signal_at_ms: 0,
            reaction_at_ms: None,
        };
        self.state = RoundState::Armed;
        true
    }

    /// Armed -> Reacting once the randomized wait completed
    ///
    /// Records the go-signal timestamp; the caller must arm the capture
    /// latch only after this has returned.
    pub fn signal_go(&mut self, now_ms: u32) {
        debug_assert_eq!(self.state, RoundState::Armed);
        self.timing.go_signal_at_ms = now_ms;
        self.state = RoundState::Reacting;
    }

    /// Armed -> Penalized on a premature stop press
    ///
    /// No timing is recorded for a penalized round.
    pub fn false_start(&mut self) {
        debug_assert_eq!(self.state, RoundState::Armed);
        self.timing.reaction_at_ms = None;
        self.state = RoundState::Penalized;
    }

    /// Reacting -> Scored once the latch delivered a capture
    ///
    /// Returns the elapsed reaction time in whole milliseconds, computed
    /// with wrapping arithmetic so a timestamp rollover between go-signal
    /// and capture still yields the correct duration.
    pub fn score(&mut self, captured_at_ms: u32) -> u32 {
        debug_assert_eq!(self.state, RoundState::Reacting);
        self.timing.reaction_at_ms = Some(captured_at_ms);
        self.state = RoundState::Scored;
        captured_at_ms.wrapping_sub(self.timing.go_signal_at_ms)
    }

    /// Any state -> Idle, clearing all per-round timing
    pub fn reset(&mut self) {
        self.timing = RoundTiming {
            armed_at_ms: 0,
            go_signal_at_ms: 0,
            reaction_at_ms: None,
        };
        self.state = RoundState::Idle;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wait_completes_after_the_full_delay() {
        let mut wait = ArmedWait::new(200);
        for _ in 0..19 {
            assert_eq!(wait.tick(false), None);
        }
        assert_eq!(wait.tick(false), Some(WaitOutcome::Completed));
    }

    #[test]
    fn premature_press_aborts_within_one_tick() {
        // Press lands 200 ms into a 1000..5000 ms wait.
        let mut wait = ArmedWait::new(3470);
        for _ in 0..19 {
            assert_eq!(wait.tick(false), None);
        }
        assert_eq!(
            wait.tick(true),
            Some(WaitOutcome::Aborted { elapsed_ms: 200 })
        );
    }

    #[test]
    fn press_on_the_final_tick_is_still_a_false_start() {
        let mut wait = ArmedWait::new(WAIT_TICK_MS);
        assert_eq!(
            wait.tick(true),
            Some(WaitOutcome::Aborted {
                elapsed_ms: WAIT_TICK_MS
            })
        );
    }

    #[test]
    fn successful_round_scores_the_elapsed_time() {
        let mut game = GameMachine::new();
        assert!(game.arm(1_000));
        game.signal_go(3_250);
        assert_eq!(game.state(), RoundState::Reacting);
        assert_eq!(game.score(3_600), 350);
        assert_eq!(game.state(), RoundState::Scored);
    }

    #[test]
    fn elapsed_time_survives_timestamp_wraparound() {
        let mut game = GameMachine::new();
        assert!(game.arm(u32::MAX - 2_000));
        game.signal_go(u32::MAX - 100);
        assert_eq!(game.score(249), 350);
    }

    #[test]
    fn start_press_is_ignored_outside_idle() {
        let mut game = GameMachine::new();
        assert!(game.arm(0));
        assert!(!game.arm(10));
        game.signal_go(1_500);
        assert!(!game.arm(1_600));
        game.score(1_800);
        assert!(!game.arm(1_900));
    }

    #[test]
    fn false_start_records_no_timing() {
        let mut game = GameMachine::new();
        assert!(game.arm(0));
        game.false_start();
        assert_eq!(game.state(), RoundState::Penalized);
        assert_eq!(game.timing().reaction_at_ms, None);
    }

    #[test]
    fn reset_returns_to_idle_and_clears_timing() {
        let mut game = GameMachine::new();
        assert!(game.arm(100));
        game.signal_go(1_400);
        game.score(1_700);
        game.reset();
        assert_eq!(game.state(), RoundState::Idle);
        assert_eq!(game.timing().reaction_at_ms, None);
        assert_eq!(game.timing().go_signal_at_ms, 0);
        // A fresh round can start.
        assert!(game.arm(10_000));
    }
}
