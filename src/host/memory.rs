use std::collections::{BTreeMap, BTreeSet};

use crate::foundation::core::{InteractionId, Rect, ScrollMetrics, TargetId};
use crate::host::{
    EventHost, FrameScheduler, Host, IntersectionHost, ObserverOptions, RenderTarget,
    TargetRegistry,
};

/// Render target that records its style, class and attribute state.
#[derive(Clone, Debug, Default, serde::Serialize)]
pub struct MemoryTarget {
    #[serde(skip)]
    rect: Rect,
    #[serde(skip)]
    scroll: Option<ScrollMetrics>,
    styles: BTreeMap<String, String>,
    classes: BTreeSet<String>,
    attributes: BTreeMap<String, String>,
    #[serde(skip)]
    style_writes: usize,
}

impl MemoryTarget {
    pub fn new(rect: Rect) -> Self {
        Self {
            rect,
            ..Self::default()
        }
    }

    /// Make this target a scroll container with the given geometry.
    pub fn with_scroll(mut self, metrics: ScrollMetrics) -> Self {
        self.scroll = Some(metrics);
        self
    }

    pub fn set_rect(&mut self, rect: Rect) {
        self.rect = rect;
    }

    pub fn set_scroll_offset(&mut self, offset: f64) {
        let base = self.scroll_metrics();
        self.scroll = Some(ScrollMetrics { offset, ..base });
    }

    pub fn style(&self, property: &str) -> Option<&str> {
        self.styles.get(property).map(String::as_str)
    }

    pub fn styles(&self) -> &BTreeMap<String, String> {
        &self.styles
    }

    pub fn classes(&self) -> impl Iterator<Item = &str> {
        self.classes.iter().map(String::as_str)
    }

    pub fn attribute(&self, name: &str) -> Option<&str> {
        self.attributes.get(name).map(String::as_str)
    }

    /// Number of `set_style` calls received so far.
    pub fn style_writes(&self) -> usize {
        self.style_writes
    }
}

impl RenderTarget for MemoryTarget {
    fn set_style(&mut self, property: &str, value: &str) {
        self.style_writes += 1;
        self.styles.insert(property.to_owned(), value.to_owned());
    }

    fn remove_style(&mut self, property: &str) {
        self.styles.remove(property);
    }

    fn add_class(&mut self, class: &str) {
        self.classes.insert(class.to_owned());
    }

    fn remove_class(&mut self, class: &str) {
        self.classes.remove(class);
    }

    fn has_class(&self, class: &str) -> bool {
        self.classes.contains(class)
    }

    fn set_attribute(&mut self, name: &str, value: &str) {
        self.attributes.insert(name.to_owned(), value.to_owned());
    }

    fn remove_attribute(&mut self, name: &str) {
        self.attributes.remove(name);
    }

    fn rect(&self) -> Rect {
        self.rect
    }

    fn scroll_metrics(&self) -> ScrollMetrics {
        self.scroll.unwrap_or_else(|| {
            let h = self.rect.height();
            ScrollMetrics {
                offset: 0.0,
                extent: h,
                viewport: h,
            }
        })
    }
}

/// Host whose platform callbacks are recorded instead of dispatched.
///
/// Target rects live in page coordinates; the viewport slides down the page as the page scroll
/// offset changes. Tests drive the engine by mutating geometry and then delivering callbacks to
/// the controller by hand.
#[derive(Debug)]
pub struct MemoryHost {
    targets: TargetRegistry<MemoryTarget>,
    viewport_width: f64,
    page: ScrollMetrics,
    native_scroll_timeline: bool,
    reduced_motion: bool,
    frame_pending: bool,
    frame_requests: usize,
    click_listeners: BTreeSet<(InteractionId, TargetId)>,
    observed: BTreeMap<InteractionId, BTreeSet<TargetId>>,
    observer_options: BTreeMap<InteractionId, ObserverOptions>,
    disconnects: usize,
}

impl MemoryHost {
    /// Page of `page_height` px viewed through a `width` x `viewport_height` window.
    pub fn new(width: f64, viewport_height: f64, page_height: f64) -> Self {
        Self {
            targets: TargetRegistry::new(),
            viewport_width: width,
            page: ScrollMetrics {
                offset: 0.0,
                extent: page_height,
                viewport: viewport_height,
            },
            native_scroll_timeline: false,
            reduced_motion: false,
            frame_pending: false,
            frame_requests: 0,
            click_listeners: BTreeSet::new(),
            observed: BTreeMap::new(),
            observer_options: BTreeMap::new(),
            disconnects: 0,
        }
    }

    pub fn with_native_scroll_timeline(mut self, supported: bool) -> Self {
        self.native_scroll_timeline = supported;
        self
    }

    pub fn set_reduced_motion(&mut self, reduced: bool) {
        self.reduced_motion = reduced;
    }

    pub fn add_target(&mut self, id: &str, rect: Rect) {
        self.targets.register(TargetId::new(id), MemoryTarget::new(rect));
    }

    pub fn add_child_target(&mut self, id: &str, parent: &str, rect: Rect) {
        self.targets.register_child(
            TargetId::new(id),
            TargetId::new(parent),
            MemoryTarget::new(rect),
        );
    }

    /// Register a nested scroll container.
    pub fn add_scroll_container(&mut self, id: &str, rect: Rect, metrics: ScrollMetrics) {
        self.targets.register(
            TargetId::new(id),
            MemoryTarget::new(rect).with_scroll(metrics),
        );
    }

    pub fn target(&self, id: &str) -> Option<&MemoryTarget> {
        self.targets.get(&TargetId::new(id))
    }

    pub fn target_mut(&mut self, id: &str) -> Option<&mut MemoryTarget> {
        self.targets.get_mut(&TargetId::new(id))
    }

    /// Scroll the page; the offset is clamped into the scrollable range.
    pub fn scroll_page_to(&mut self, offset: f64) {
        self.page.offset = offset.clamp(0.0, self.page.overflow());
    }

    /// Consume a pending frame request, as a real host would when it runs the frame callback.
    pub fn take_frame_request(&mut self) -> bool {
        std::mem::take(&mut self.frame_pending)
    }

    pub fn frame_pending(&self) -> bool {
        self.frame_pending
    }

    /// Total `request_frame` calls, coalesced or not.
    pub fn frame_requests(&self) -> usize {
        self.frame_requests
    }

    pub fn click_listener_count(&self) -> usize {
        self.click_listeners.len()
    }

    pub fn is_listening(&self, interaction: &str, target: &str) -> bool {
        self.click_listeners
            .contains(&(InteractionId::new(interaction), TargetId::new(target)))
    }

    /// Targets still observed by `observer`.
    pub fn observed(&self, observer: &str) -> Vec<&TargetId> {
        self.observed
            .get(&InteractionId::new(observer))
            .map(|set| set.iter().collect())
            .unwrap_or_default()
    }

    pub fn observer_count(&self) -> usize {
        self.observed.len()
    }

    pub fn observer_options(&self, observer: &str) -> Option<&ObserverOptions> {
        self.observer_options.get(&InteractionId::new(observer))
    }

    pub fn disconnects(&self) -> usize {
        self.disconnects
    }
}

impl FrameScheduler for MemoryHost {
    fn request_frame(&mut self) {
        self.frame_requests += 1;
        self.frame_pending = true;
    }
}

impl EventHost for MemoryHost {
    fn listen_click(&mut self, interaction: &InteractionId, target: &TargetId) {
        self.click_listeners
            .insert((interaction.clone(), target.clone()));
    }

    fn unlisten_click(&mut self, interaction: &InteractionId, target: &TargetId) {
        self.click_listeners
            .remove(&(interaction.clone(), target.clone()));
    }
}

impl IntersectionHost for MemoryHost {
    fn observe(&mut self, observer: &InteractionId, target: &TargetId, opts: &ObserverOptions) {
        self.observed
            .entry(observer.clone())
            .or_default()
            .insert(target.clone());
        self.observer_options
            .insert(observer.clone(), opts.clone());
    }

    fn unobserve(&mut self, observer: &InteractionId, target: &TargetId) {
        if let Some(set) = self.observed.get_mut(observer) {
            set.remove(target);
        }
    }

    fn disconnect(&mut self, observer: &InteractionId) {
        if self.observed.remove(observer).is_some() {
            self.disconnects += 1;
        }
        self.observer_options.remove(observer);
    }
}

impl Host for MemoryHost {
    type Target = MemoryTarget;

    fn targets(&self) -> &TargetRegistry<MemoryTarget> {
        &self.targets
    }

    fn targets_mut(&mut self) -> &mut TargetRegistry<MemoryTarget> {
        &mut self.targets
    }

    fn page_metrics(&self) -> ScrollMetrics {
        self.page
    }

    fn viewport(&self) -> Rect {
        Rect::new(
            0.0,
            self.page.offset,
            self.viewport_width,
            self.page.offset + self.page.viewport,
        )
    }

    fn supports_native_scroll_timeline(&self) -> bool {
        self.native_scroll_timeline
    }

    fn prefers_reduced_motion(&self) -> bool {
        self.reduced_motion
    }
}
