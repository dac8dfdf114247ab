//! Scroll progress measurement and the shared scroll animation loop.

/// Frame loop driving scroll-linked interactions.
pub mod animation_loop;
/// Page and element scroll progress.
pub mod tracker;

pub use animation_loop::{ScrollLoop, ScrollLoopOpts};
