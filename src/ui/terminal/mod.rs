//! This module defines the drawing surface and the terminal lifecycle.
mod lifecycle;
mod render;

pub use lifecycle::TerminalGuard;
pub use render::CrosstermRenderer;

use anyhow::Result;

use crate::types::PlacedItem;

/// Something the event loop can draw its current state on.
pub trait Renderer {
    /// Current size in cells as `(width, height)`.
    fn viewport(&self) -> (u16, u16);

    fn resize(&mut self, width: u16, height: u16);

    /// Replaces whatever is on screen with the given labels.
    fn draw(&mut self, placed: &[PlacedItem]) -> Result<()>;

    /// Shows the end screen used once there is nothing left to place.
    fn draw_empty(&mut self) -> Result<()>;

    /// Hands the terminal back. Called once, when the loop stops.
    fn release(&mut self) -> Result<()>;
}
