//! Reaction timer firmware entry point
//!
//! Initializes system and spawns control tasks.

#![cfg_attr(target_os = "none", no_std)]
#![cfg_attr(target_os = "none", no_main)]

#[cfg(target_os = "none")]
use crate::task::{
    buzzer::buzzer, display::display, game_loop::game_loop, stop_watch::stop_button_watch,
};
#[cfg(target_os = "none")]
use embassy_executor::Spawner;
#[cfg(target_os = "none")]
use embassy_rp::block::ImageDef;
#[cfg(target_os = "none")]
use embassy_rp::config::Config;
#[cfg(target_os = "none")]
use system::resources::{
    self, AssignedResources, BuzzerResources, GameResources, StopButtonResources,
};
use {defmt_rtt as _, panic_probe as _};

/// Firmware image type for bootloader
#[cfg(target_os = "none")]
#[link_section = ".start_block"]
#[used]
pub static IMAGE_DEF: ImageDef = ImageDef::secure_exe();

/// System core modules
mod system;
/// Task implementations
#[cfg(target_os = "none")]
mod task;

/// Firmware entry point
#[cfg(target_os = "none")]
#[embassy_executor::main]
async fn main(spawner: Spawner) {
    let p = embassy_rp::init(Config::default());

    // Bring up the shared I2C bus before spawning anything that uses it.
    let i2c_bus = resources::init_i2c(p.I2C1, p.PIN_15, p.PIN_14);

    // Split the remaining pins into per-task resource groups.
    let r = split_resources!(p);

    // Spawn the watcher before the game loop so the stop-level mirror is
    // live by the time the first round can be armed.
    spawner.spawn(stop_button_watch(r.stop_button)).unwrap();
    spawner.spawn(buzzer(r.buzzer)).unwrap();
    spawner.spawn(display(i2c_bus)).unwrap();
    spawner.spawn(game_loop(r.game)).unwrap();
}

/// Host builds (unit tests) have no firmware entry point.
#[cfg(not(target_os = "none"))]
fn main() {}
