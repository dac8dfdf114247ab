//! Property bags, the interpolation engine and renderable style composition.

/// Property bags and keyframes.
pub mod bag;
/// Interpolation engine and keyframe sampling.
pub mod interpolate;
/// Property keys, classes and value parsing.
pub mod property;
/// Renderable style composition (transform, filter, declarations).
pub mod render;
