//! Buzzer Command Module
//!
//! This module provides functionality for signaling buzzer commands to the
//! buzzer task. It uses an embassy-sync Signal for thread-safe
//! communication across different parts of the system.

use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use embassy_sync::signal::Signal;
use embassy_time::Duration;

/// Signal for buzzer commands
///
/// A new command replaces any pending one, so a `Silence` issued right
/// after a `Beep` wins even if the buzzer task has not run in between.
pub static BUZZER: Signal<CriticalSectionRawMutex, Command> = Signal::new();

/// Sends a new buzzer command
///
/// It's a synchronous operation that doesn't require awaiting; the game
/// loop fires and forgets.
pub fn update(command: Command) {
    BUZZER.signal(command);
}

/// Waits for the next buzzer command
pub async fn wait() -> Command {
    BUZZER.wait().await
}

/// Enum representing buzzer commands
#[derive(Debug, Clone, Copy)]
pub enum Command {
    /// Play a tone at the given frequency, self-silencing after the
    /// duration unless another command arrives first
    Beep {
        freq_hz: u32,
        duration: Duration,
    },
    /// Cut the tone immediately; a no-op when nothing is playing
    Silence,
}
