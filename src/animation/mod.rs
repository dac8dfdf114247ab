//! Static catalogs: easing curves and effect presets.

/// Easing curves and cubic-bezier evaluation.
pub mod ease;
/// Named effect presets and their default endpoints.
pub mod preset;
