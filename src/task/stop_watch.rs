//! Stop-button watcher
//!
//! Background context for reaction capture. Wakes on GPIO edges of the
//! stop button, mirrors the raw pressed level for the game loop's
//! false-start polling, and on each press hands the timestamp to the
//! reaction latch. Nothing else happens here: no display or buzzer calls,
//! no allocation, bounded work per edge.

use core::sync::atomic::{AtomicBool, Ordering};

use crate::system::latch::REACTION_LATCH;
use crate::system::resources::StopButtonResources;
use defmt::debug;
use embassy_rp::gpio::{Input, Level, Pull};
use embassy_time::Instant;

/// Raw stop-button level, true while pressed
///
/// Updated on every edge so the armed wait sees even a press-and-release
/// that falls between two of its polling ticks.
static STOP_ASSERTED: AtomicBool = AtomicBool::new(false);

/// Returns the raw, non-debounced stop-button level
pub fn stop_is_asserted() -> bool {
    STOP_ASSERTED.load(Ordering::Relaxed)
}

/// Stop-button edge watcher task
#[embassy_executor::task]
pub async fn stop_button_watch(r: StopButtonResources) {
    let mut btn = Input::new(r.stop_btn, Pull::Up);
    STOP_ASSERTED.store(btn.get_level() == Level::Low, Ordering::Relaxed);

    loop {
        btn.wait_for_any_edge().await;
        let pressed = btn.get_level() == Level::Low;
        STOP_ASSERTED.store(pressed, Ordering::Relaxed);
        if pressed {
            let now_ms = Instant::now().as_millis() as u32;
            if REACTION_LATCH.try_capture(now_ms) {
                debug!("Stop press captured at {} ms", now_ms);
            }
        }
    }
}
