//! Trigger wiring: interaction records and the controller that binds them to a host.

/// Trigger controller and its wiring registry.
pub mod controller;
/// Declarative interaction records.
pub mod interaction;

pub use controller::{AppearState, ClickOutcome, ClickState, InteractionController, ScrollBinding};
pub use interaction::{Interaction, ScrollConfig, Trigger};
