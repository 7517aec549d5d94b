//! This module defines the actions an input event can resolve to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    /// Stops the program.
    Quit,
    /// Requests deletion of the object with the given identifier.
    Delete(String),
    /// The event has no effect.
    None,
}
