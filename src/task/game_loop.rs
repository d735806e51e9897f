//! Game Loop Task
//!
//! The foreground control loop driving the round lifecycle
//! Idle -> Armed -> Reacting -> Scored/Penalized -> Idle. It is the only
//! task that mutates round state; the stop-button watcher only feeds the
//! raw level mirror and the reaction latch.
//!
//! The correctness hinge is the order at the go-signal: the state machine
//! transitions to Reacting and records the go timestamp first, and the
//! latch is armed strictly after that. A press during the randomized wait
//! is therefore only ever seen by this loop's direct polling (false
//! start), never by the latch.

use crate::system::buzzer_command::{self, Command};
use crate::system::debounce::DebounceFilter;
use crate::system::display_message::{self, Message};
use crate::system::game::{
    ArmedWait, GameMachine, WaitOutcome, MAX_DELAY_MS, MIN_DELAY_MS, WAIT_TICK_MS,
};
use crate::system::latch::REACTION_LATCH;
use crate::system::resources::GameResources;
use crate::task::stop_watch;
use defmt::{debug, info};
use embassy_rp::gpio::{Input, Level, Output, Pull};
use embassy_time::{Duration, Instant, Timer};
use nanorand::{Rng, WyRand};

/// Sleep per iteration of the wait and latch polling loops
const POLL_TICK: Duration = Duration::from_millis(WAIT_TICK_MS as u64);

/// Red LED blinks signalling a false start
const PENALTY_BLINKS: u32 = 3;

/// On/off time of one penalty blink
const PENALTY_BLINK_INTERVAL: Duration = Duration::from_millis(200);

/// Pause on the penalty message before the next round can start
const PENALTY_COOLDOWN: Duration = Duration::from_millis(2000);

/// How long a measured result stays on the display
const RESULT_HOLD: Duration = Duration::from_millis(5000);

/// Go-signal tone frequency (Hz)
const GO_TONE_HZ: u32 = 3000;

/// Go-signal tone length
const GO_TONE_DURATION: Duration = Duration::from_millis(300);

fn now_ms() -> u32 {
    Instant::now().as_millis() as u32
}

/// Main game control loop
#[embassy_executor::task]
pub async fn game_loop(r: GameResources) {
    let mut start_btn = Input::new(r.start_btn, Pull::Up);
    let mut green_led = Output::new(r.green_led, Level::Low);
    let mut red_led = Output::new(r.red_led, Level::Low);

    let mut game = GameMachine::new();
    let mut start_debounce = DebounceFilter::new();
    let mut rng: Option<WyRand> = None;

    info!("Game loop started");
    display_message::update(Message::ReadyPrompt);

    loop {
        // Idle: wait for a debounced start press. While a round is running
        // this loop is elsewhere, so extra presses land on a dead pin.
        start_btn.wait_for_falling_edge().await;
        let pressed_at = now_ms();
        if !start_debounce.accept(pressed_at) {
            continue;
        }
        if !game.arm(pressed_at) {
            continue;
        }
        info!("Round armed");

        // Armed: green light, then the randomized wait. The stop level is
        // sampled raw every tick; any assertion is a false start.
        green_led.set_high();
        display_message::update(Message::GetReady);
        let rng = rng.get_or_insert_with(|| WyRand::new_seed(Instant::now().as_ticks()));
        let delay_ms = rng.generate_range(MIN_DELAY_MS..=MAX_DELAY_MS);
        debug!("Pre-delay of {} ms drawn", delay_ms);

        let mut wait = ArmedWait::new(delay_ms);
        let outcome = loop {
            Timer::after(POLL_TICK).await;
            if let Some(outcome) = wait.tick(stop_watch::stop_is_asserted()) {
                break outcome;
            }
        };

        match outcome {
            WaitOutcome::Aborted { elapsed_ms } => {
                info!("False start {} ms into the wait", elapsed_ms);
                game.false_start();
                green_led.set_low();
                display_message::update(Message::FalseStart);
                for _ in 0..PENALTY_BLINKS {
                    red_led.set_high();
                    Timer::after(PENALTY_BLINK_INTERVAL).await;
                    red_led.set_low();
                    Timer::after(PENALTY_BLINK_INTERVAL).await;
                }
                Timer::after(PENALTY_COOLDOWN).await;
            }
            WaitOutcome::Completed => {
                // Go-signal. State transition and go timestamp first, latch
                // armed last.
                let go_at = now_ms();
                game.signal_go(go_at);
                green_led.set_low();
                red_led.set_high();
                buzzer_command::update(Command::Beep {
                    freq_hz: GO_TONE_HZ,
                    duration: GO_TONE_DURATION,
                });
                display_message::update(Message::ReactNow);
                REACTION_LATCH.arm();
                info!("Go-signal fired");

                // Reacting: poll until the watcher's capture shows up, then
                // drain the latch exactly once.
                let captured_at = loop {
                    Timer::after(POLL_TICK).await;
                    if REACTION_LATCH.is_captured() {
                        if let Some(at) = REACTION_LATCH.take() {
                            break at;
                        }
                    }
                };

                let elapsed_ms = game.score(captured_at);
                red_led.set_low();
                // Cut the go-tone short; its own auto-off may still fire
                // later as a no-op.
                buzzer_command::update(Command::Silence);
                info!("Reaction time: {} ms", elapsed_ms);
                display_message::update(Message::Result(elapsed_ms));
                Timer::after(RESULT_HOLD).await;
            }
        }

        // Idle re-entry: latch drained and closed, round state cleared.
        let _ = REACTION_LATCH.take();
        game.reset();
        display_message::update(Message::ReadyPrompt);
    }
}
