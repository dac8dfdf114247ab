//! Capabilities the engine needs from its environment.
//!
//! Nothing here touches a real rendering tree. Hosts implement these traits over whatever they
//! render with and call back into the controller (`handle_click`, `handle_intersection`,
//! `on_frame`, `on_media_change`) when the corresponding platform event fires.

use crate::foundation::core::{InteractionId, Rect, ScrollMetrics, TargetId};

/// Deterministic in-memory host used by tests and the CLI simulator.
pub mod memory;
/// Explicit id -> target registration.
pub mod registry;

pub use memory::{MemoryHost, MemoryTarget};
pub use registry::TargetRegistry;

/// A concrete node the engine mutates.
pub trait RenderTarget {
    fn set_style(&mut self, property: &str, value: &str);
    fn remove_style(&mut self, property: &str);
    fn add_class(&mut self, class: &str);
    fn remove_class(&mut self, class: &str);
    fn has_class(&self, class: &str) -> bool;
    fn set_attribute(&mut self, name: &str, value: &str);
    fn remove_attribute(&mut self, name: &str);

    /// Current layout box, in the same coordinate space as [`Host::viewport`].
    fn rect(&self) -> Rect;

    /// Scroll geometry when this node is used as a scroll container.
    fn scroll_metrics(&self) -> ScrollMetrics {
        let h = self.rect().height();
        ScrollMetrics {
            offset: 0.0,
            extent: h,
            viewport: h,
        }
    }
}

/// Options an intersection observer is created with.
#[derive(Clone, Debug, PartialEq)]
pub struct ObserverOptions {
    /// Fraction of the target that must be visible, `0..=1`.
    pub threshold: f64,
    /// CSS-style margin applied to the root bounds.
    pub root_margin: String,
    /// Scroll container acting as the observer root; the viewport when `None`.
    pub root: Option<TargetId>,
}

/// "Next frame" scheduling primitive.
pub trait FrameScheduler {
    /// Ask for one `on_frame` callback. Repeated requests before the frame fires coalesce.
    fn request_frame(&mut self);
}

/// Click listener management.
pub trait EventHost {
    fn listen_click(&mut self, interaction: &InteractionId, target: &TargetId);
    fn unlisten_click(&mut self, interaction: &InteractionId, target: &TargetId);
}

/// Intersection observation, one observer per interaction.
pub trait IntersectionHost {
    fn observe(&mut self, observer: &InteractionId, target: &TargetId, opts: &ObserverOptions);
    fn unobserve(&mut self, observer: &InteractionId, target: &TargetId);
    fn disconnect(&mut self, observer: &InteractionId);
}

/// Everything a controller needs from its environment.
pub trait Host: FrameScheduler + EventHost + IntersectionHost {
    type Target: RenderTarget;

    fn targets(&self) -> &TargetRegistry<Self::Target>;
    fn targets_mut(&mut self) -> &mut TargetRegistry<Self::Target>;

    /// Scroll geometry of the default (page) scrolling area.
    fn page_metrics(&self) -> ScrollMetrics;

    /// Visible viewport bounds.
    fn viewport(&self) -> Rect;

    /// Whether the platform can drive scroll-linked animation natively.
    fn supports_native_scroll_timeline(&self) -> bool;

    /// Whether the user asked for reduced motion.
    fn prefers_reduced_motion(&self) -> bool {
        false
    }
}
