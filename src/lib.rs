pub mod board;
pub mod config;
pub mod input;
pub mod session;
pub mod tui;
pub mod wordle;
