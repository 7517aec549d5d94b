//! This module contains the logging infrastructure for the application.
//!
//! The terminal is owned by the renderer while the program runs, so log
//! events are collected into an in-memory buffer by a `tracing` layer and
//! replayed to stderr once the terminal has been restored.
pub mod buffer;
pub mod collector;

pub use buffer::{LogBuffer, LogEntry};
pub use collector::LogCollector;
