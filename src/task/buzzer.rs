//! Buzzer Task
//!
//! Drives the go-signal tone on the piezo buzzer via PWM. The task owns
//! its auto-off alarm: a `Beep` plays for its duration and self-silences
//! unless a new command arrives first. `Silence` just cuts the duty cycle,
//! so silencing an already quiet buzzer is a no-op.

use crate::system::buzzer_command::{self, Command};
use crate::system::resources::BuzzerResources;
use defmt::debug;
use embassy_futures::select::{select, Either};
use embassy_rp::pwm::{self, Pwm, SetDutyCycle};
use embassy_time::Timer;

/// Buzzer control task
#[embassy_executor::task]
pub async fn buzzer(r: BuzzerResources) {
    let mut pwm = Pwm::new_output_b(r.slice, r.pin, pwm::Config::default());
    let _ = pwm.set_duty_cycle_fully_off();

    let mut cmd = buzzer_command::wait().await;
    loop {
        match cmd {
            Command::Silence => {
                let _ = pwm.set_duty_cycle_fully_off();
                cmd = buzzer_command::wait().await;
            }
            Command::Beep { freq_hz, duration } => {
                debug!("Beep at {} Hz for {} ms", freq_hz, duration.as_millis());
                pwm.set_config(&tone_config(freq_hz));
                let _ = pwm.set_duty_cycle_percent(50);

                // Auto-off alarm, preempted by whatever command comes next
                match select(Timer::after(duration), buzzer_command::wait()).await {
                    Either::First(()) => {
                        let _ = pwm.set_duty_cycle_fully_off();
                        cmd = buzzer_command::wait().await;
                    }
                    Either::Second(next) => cmd = next,
                }
            }
        }
    }
}

/// Builds a PWM config whose period matches the requested tone frequency
fn tone_config(freq_hz: u32) -> pwm::Config {
    let clock_freq_hz = embassy_rp::clocks::clk_sys_freq();

    // Minimum divider that keeps the period within the 16-bit counter
    let divider = ((clock_freq_hz / freq_hz) / 65535 + 1) as u8;
    let period = (clock_freq_hz / (freq_hz * divider as u32)) as u16 - 1;

    let mut config = pwm::Config::default();
    config.divider = divider.into();
    config.top = period;
    config
}
