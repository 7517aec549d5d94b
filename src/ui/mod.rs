pub mod action;
pub mod dispatch;
pub mod event;
pub mod runner;
pub mod terminal;

pub use action::Action;
pub use runner::{run_tui, Exit};
