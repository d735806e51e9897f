//! Core system components for the reaction timer
pub mod buzzer_command;
pub mod debounce;
pub mod display_message;
pub mod game;
pub mod latch;
pub mod resources;
