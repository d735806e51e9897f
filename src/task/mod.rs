//! Task implementations
pub mod buzzer;
pub mod display;
pub mod game_loop;
pub mod stop_watch;
