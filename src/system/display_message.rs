//! Display Message Module
//!
//! This module provides functionality for signaling status messages to the
//! display task. It uses an embassy-sync Signal for thread-safe
//! communication across different parts of the system.

use defmt::Format;
use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use embassy_sync::signal::Signal;

/// Signal for display messages
///
/// Only the latest message matters, so a Signal (last-writer-wins) fits
/// better than a queue here.
pub static DISPLAY: Signal<CriticalSectionRawMutex, Message> = Signal::new();

/// Sends a new message to the display
///
/// It's a synchronous operation that doesn't require awaiting; the game
/// loop fires and forgets.
pub fn update(message: Message) {
    DISPLAY.signal(message);
}

/// Waits for the next display message
pub async fn wait() -> Message {
    DISPLAY.wait().await
}

/// Status messages shown on the OLED
#[derive(Debug, Clone, Copy, Format)]
pub enum Message {
    /// Idle prompt: press start to play
    ReadyPrompt,
    /// Round armed, randomized wait running
    GetReady,
    /// Go-signal fired, press stop now
    ReactNow,
    /// False start penalty
    FalseStart,
    /// Measured reaction time in whole milliseconds
    Result(u32),
}
