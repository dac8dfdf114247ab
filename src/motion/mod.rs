//! Effect definitions and sibling staggering.

/// Hover/scroll/appear/loop effect model and sampling.
pub mod effect;
/// Per-child delay offsets.
pub mod stagger;
