//! Hardware Resource Management
//!
//! Allocates the board's pins and peripherals to the tasks that own them:
//! - Game loop: start button plus the two indicator LEDs
//! - Stop-button watcher: the stop button pin
//! - Buzzer: PWM slice and pin for the go-signal tone
//! - Display: SSD1306 OLED on the shared I2C1 bus
//!
//! The I2C bus sits behind a mutex so further bus devices can be added
//! without re-plumbing the display task. It is initialized once from
//! `main` before any task is spawned.

use assign_resources::assign_resources;
use embassy_rp::bind_interrupts;
use embassy_rp::i2c::{Async as I2cAsync, Config, I2c, InterruptHandler as I2cInterruptHandler};
use embassy_rp::peripherals::{self, I2C1, PIN_14, PIN_15};
use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use embassy_sync::mutex::Mutex;
use static_cell::StaticCell;

/// Shared I2C bus type used by the display task
pub type SharedI2cBus = Mutex<CriticalSectionRawMutex, I2c<'static, I2C1, I2cAsync>>;

static I2C_BUS: StaticCell<SharedI2cBus> = StaticCell::new();

/// Initializes the I2C1 peripheral and returns the shared bus handle.
///
/// This should only be called once during system initialization in main.rs,
/// before any tasks are spawned. Configures the bus for 400kHz fast mode,
/// which the SSD1306 supports.
pub fn init_i2c(i2c: I2C1, scl: PIN_15, sda: PIN_14) -> &'static SharedI2cBus {
    let mut config = Config::default();
    config.frequency = 400_000;
    let i2c = I2c::new_async(i2c, scl, sda, Irqs, config);
    I2C_BUS.init(Mutex::new(i2c))
}

assign_resources! {
    /// Start button and indicator LEDs, owned by the game loop
    game: GameResources {
        start_btn: PIN_5,
        green_led: PIN_11,
        red_led: PIN_13,
    },
    /// Stop button, owned by the edge watcher
    stop_button: StopButtonResources {
        stop_btn: PIN_6,
    },
    /// Buzzer PWM slice and pin for the go-signal tone
    buzzer: BuzzerResources {
        slice: PWM_SLICE2,
        pin: PIN_21,
    },
}

bind_interrupts!(pub struct Irqs {
    I2C1_IRQ => I2cInterruptHandler<I2C1>;
});
