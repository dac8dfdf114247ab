//! pagefx turns declarative trigger/effect records into per-frame style state for render targets.
//!
//! The engine is host-agnostic. A host implements [`host::Host`] over its render tree, registers
//! its targets by id, and forwards platform callbacks (clicks, intersections, frames, media
//! changes) to an [`InteractionController`]. Everything else is pure: easing, interpolation,
//! staggering and scroll progress can be used on their own.
#![forbid(unsafe_code)]

pub mod animation;
pub mod config;
pub mod document;
pub mod foundation;
pub mod host;
pub mod motion;
pub mod scroll;
pub mod style;
pub mod trigger;

pub use crate::animation::ease::{CubicBezier, Ease};
pub use crate::animation::preset::{Preset, preset_endpoints};
pub use crate::config::EngineConfig;
pub use crate::document::{Document, Scene};
pub use crate::foundation::core::{InteractionId, Point, Rect, ScrollMetrics, Size, TargetId};
pub use crate::foundation::error::{PagefxError, PagefxResult};
pub use crate::host::{Host, MemoryHost, MemoryTarget, RenderTarget, TargetRegistry};
pub use crate::motion::effect::Effect;
pub use crate::motion::stagger::{StaggerFrom, StaggerPolicy, stagger_delay};
pub use crate::scroll::ScrollLoop;
pub use crate::scroll::tracker::{element_visibility_progress, page_progress, ranged_progress};
pub use crate::style::bag::{Keyframe, PropertyBag};
pub use crate::style::interpolate::{Profile, interpolate, interpolate_with, sample_keyframes};
pub use crate::style::property::{PropertyKey, PropertyValue};
pub use crate::style::render::{RenderOpts, RenderableStyle, to_renderable};
pub use crate::trigger::{
    AppearState, ClickOutcome, ClickState, Interaction, InteractionController, ScrollBinding,
    Trigger,
};
