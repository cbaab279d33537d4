//! Chat widget that polls a backend transcript and posts visitor messages.

pub mod common;
pub mod config;
pub mod console;
pub mod error;
pub mod network;
pub mod ui;
