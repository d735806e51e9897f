//! Display Task
//!
//! Renders game status text on the SSD1306 OLED over the shared I2C bus.
//! Messages arrive as fire-and-forget signals from the game loop; an I2C
//! hiccup drops the frame with a log line instead of taking the game down.

use core::fmt::Write;

use crate::system::display_message::{self, Message};
use crate::system::resources::SharedI2cBus;
use defmt::warn;
use embassy_embedded_hal::shared_bus::asynch::i2c::I2cDevice;
use embedded_graphics::{
    mono_font::{ascii::FONT_9X18_BOLD, MonoTextStyleBuilder},
    pixelcolor::BinaryColor,
    prelude::*,
    text::{Baseline, Text},
};
use heapless::String;
use ssd1306::{mode::DisplayConfigAsync, prelude::*, I2CDisplayInterface, Ssd1306Async};

/// Display rendering task
#[embassy_executor::task]
pub async fn display(i2c_bus: &'static SharedI2cBus) {
    let display_i2c = I2cDevice::new(i2c_bus);
    let interface = I2CDisplayInterface::new(display_i2c);
    let mut display = Ssd1306Async::new(interface, DisplaySize128x64, DisplayRotation::Rotate0)
        .into_buffered_graphics_mode();
    if display.init().await.is_err() {
        warn!("Display init failed, running without status text");
        return;
    }

    let text_style = MonoTextStyleBuilder::new()
        .font(&FONT_9X18_BOLD)
        .text_color(BinaryColor::On)
        .build();

    loop {
        let message = display_message::wait().await;

        let mut result_line: String<16> = String::new();
        let (line1, line2) = match message {
            Message::ReadyPrompt => ("Press A", "to start!"),
            Message::GetReady => ("Get ready...", ""),
            Message::ReactNow => ("Press B", "now!"),
            Message::FalseStart => ("Too soon!", ""),
            Message::Result(elapsed_ms) => {
                let _ = write!(result_line, "{} ms", elapsed_ms);
                ("Your time:", result_line.as_str())
            }
        };

        display.clear(BinaryColor::Off).unwrap();
        Text::with_baseline(line1, Point::zero(), text_style, Baseline::Top)
            .draw(&mut display)
            .unwrap();
        if !line2.is_empty() {
            Text::with_baseline(line2, Point::new(0, 24), text_style, Baseline::Top)
                .draw(&mut display)
                .unwrap();
        }

        if display.flush().await.is_err() {
            warn!("Display flush failed, dropping frame");
        }
    }
}
