use crate::foundation::core::{InteractionId, TargetId};
use crate::host::{Host, RenderTarget};
use crate::scroll::tracker::{element_visibility_progress, page_progress, ranged_progress};
use crate::style::bag::PropertyBag;
use crate::style::interpolate::{Profile, interpolate_with};
use crate::style::render::{DEFAULT_PERSPECTIVE_PX, RenderOpts, to_renderable};
use crate::trigger::interaction::{Interaction, Trigger};

/// Marker attribute naming the interaction that drives a target's scroll binding.
pub const DEFAULT_MARKER_ATTRIBUTE: &str = "data-scroll-interaction";

/// Tuning for [`ScrollLoop`].
#[derive(Clone, Debug, PartialEq)]
pub struct ScrollLoopOpts {
    /// Progress changes smaller than this are not written.
    pub epsilon: f64,
    pub perspective: f64,
    pub marker_attribute: String,
}

impl Default for ScrollLoopOpts {
    fn default() -> Self {
        Self {
            epsilon: 0.001,
            perspective: DEFAULT_PERSPECTIVE_PX,
            marker_attribute: DEFAULT_MARKER_ATTRIBUTE.to_owned(),
        }
    }
}

#[derive(Clone, Debug)]
struct LoopEntry {
    interaction: Interaction,
    target: TargetId,
    last_progress: Option<f64>,
}

/// One cooperative frame loop shared by every scroll-linked interaction of a context.
///
/// The loop never owns a timer. While it has entries it asks the host for a frame, and the host
/// answers by calling [`ScrollLoop::on_frame`]. Stopping only clears the running flag: a frame
/// that was already requested still ticks once, then requests nothing further.
#[derive(Clone, Debug, Default)]
pub struct ScrollLoop {
    entries: Vec<LoopEntry>,
    running: bool,
    opts: ScrollLoopOpts,
    root: Option<TargetId>,
    container: Option<TargetId>,
}

impl ScrollLoop {
    pub fn new(opts: ScrollLoopOpts) -> Self {
        Self {
            opts,
            ..Self::default()
        }
    }

    /// Restrict target lookups to the subtree at `root`.
    pub fn set_root(&mut self, root: Option<TargetId>) {
        self.root = root;
    }

    /// Measure progress against a nested scroll container instead of the page.
    pub fn set_container(&mut self, container: Option<TargetId>) {
        self.container = container;
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn contains(&self, id: &InteractionId, target: &TargetId) -> bool {
        self.entries
            .iter()
            .any(|e| &e.interaction.id == id && &e.target == target)
    }

    /// Last progress written for `(id, target)`, if any tick wrote one.
    pub fn progress(&self, id: &InteractionId, target: &TargetId) -> Option<f64> {
        self.entries
            .iter()
            .find(|e| &e.interaction.id == id && &e.target == target)
            .and_then(|e| e.last_progress)
    }

    /// Add `(interaction, target)` to the loop. A pair that is already present is left alone.
    ///
    /// Returns whether a new entry was added. The first entry starts the loop.
    pub fn register<H: Host>(
        &mut self,
        host: &mut H,
        interaction: &Interaction,
        target: &TargetId,
    ) -> bool {
        if !interaction.is_scroll_driven() {
            tracing::debug!(id = %interaction.id, "not a scroll interaction, not registering");
            return false;
        }
        if self.contains(&interaction.id, target) {
            tracing::debug!(id = %interaction.id, target_id = %target, "already registered");
            return false;
        }

        if let Some(node) = host.targets_mut().resolve_mut(target, self.root.as_ref()) {
            node.set_attribute(&self.opts.marker_attribute, interaction.id.as_str());
        }
        self.entries.push(LoopEntry {
            interaction: interaction.clone(),
            target: target.clone(),
            last_progress: None,
        });

        if !self.running {
            self.running = true;
            host.request_frame();
        }
        true
    }

    /// Remove every entry of `id` (only the one for `target` when given).
    ///
    /// Returns the number removed. An emptied loop stops.
    pub fn unregister<H: Host>(
        &mut self,
        host: &mut H,
        id: &InteractionId,
        target: Option<&TargetId>,
    ) -> usize {
        let (removed, kept): (Vec<_>, Vec<_>) = std::mem::take(&mut self.entries)
            .into_iter()
            .partition(|e| &e.interaction.id == id && target.is_none_or(|t| t == &e.target));
        self.entries = kept;

        for e in &removed {
            self.strip_marker(host, &e.target);
        }
        if self.entries.is_empty() {
            self.running = false;
        }
        removed.len()
    }

    /// Drop every entry and stop. Safe to call any number of times.
    pub fn clear<H: Host>(&mut self, host: &mut H) {
        for e in std::mem::take(&mut self.entries) {
            self.strip_marker(host, &e.target);
        }
        self.running = false;
    }

    /// Swap in new records for entries whose interaction id matches, forcing a rewrite next
    /// tick. Used when styles change but wiring does not.
    pub fn refresh_records(&mut self, records: &[Interaction]) {
        for e in &mut self.entries {
            if let Some(r) = records.iter().find(|r| r.id == e.interaction.id) {
                e.interaction = r.clone();
                e.last_progress = None;
            }
        }
    }

    /// Frame callback: tick once, then keep the loop alive while it runs and has entries.
    pub fn on_frame<H: Host>(&mut self, host: &mut H) -> usize {
        let written = self.update(host);
        if self.running && !self.entries.is_empty() {
            host.request_frame();
        }
        written
    }

    /// Recompute every entry's progress and write the ones that moved.
    ///
    /// Entries whose target cannot be resolved are skipped for this tick. Returns the number of
    /// targets written.
    pub fn update<H: Host>(&mut self, host: &mut H) -> usize {
        let mut written = 0;
        for i in 0..self.entries.len() {
            let Some(raw) = self.raw_progress(host, &self.entries[i]) else {
                tracing::debug!(target_id = %self.entries[i].target, "scroll target not resolved");
                continue;
            };
            let entry = &self.entries[i];
            let (start, end) = entry.interaction.window();
            let progress = ranged_progress(raw, start, end);
            if entry
                .last_progress
                .is_some_and(|last| (progress - last).abs() < self.opts.epsilon)
            {
                continue;
            }

            let (from, to) = entry.interaction.endpoints();
            let bag = interpolate_with(Profile::Interaction, &from, &to, progress);
            let opts = RenderOpts {
                perspective: self.opts.perspective,
            };
            if write_style(host, self.root.as_ref(), &entry.target, &bag, opts) {
                tracing::trace!(
                    id = %entry.interaction.id,
                    target_id = %entry.target,
                    progress,
                    "scroll write"
                );
                self.entries[i].last_progress = Some(progress);
                written += 1;
            }
        }
        written
    }

    fn raw_progress<H: Host>(&self, host: &H, entry: &LoopEntry) -> Option<f64> {
        let targets = host.targets();
        let container = self.container.as_ref().and_then(|c| targets.get(c));
        match entry.interaction.trigger {
            Trigger::PageScroll => {
                targets.resolve(&entry.target, self.root.as_ref())?;
                let metrics = container
                    .map(RenderTarget::scroll_metrics)
                    .unwrap_or_else(|| host.page_metrics());
                Some(page_progress(metrics))
            }
            Trigger::WhileScrolling => {
                let element = targets.resolve(&entry.target, self.root.as_ref())?.rect();
                let bounds = container
                    .map(RenderTarget::rect)
                    .unwrap_or_else(|| host.viewport());
                Some(element_visibility_progress(element, bounds))
            }
            _ => None,
        }
    }

    fn strip_marker<H: Host>(&self, host: &mut H, target: &TargetId) {
        if let Some(node) = host.targets_mut().resolve_mut(target, self.root.as_ref()) {
            node.remove_attribute(&self.opts.marker_attribute);
        }
    }
}

/// Render `bag` and write its declarations to `target`. Returns `false` when the target does
/// not resolve.
pub(crate) fn write_style<H: Host>(
    host: &mut H,
    root: Option<&TargetId>,
    target: &TargetId,
    bag: &PropertyBag,
    opts: RenderOpts,
) -> bool {
    let Some(node) = host.targets_mut().resolve_mut(target, root) else {
        return false;
    };
    for (property, value) in to_renderable(bag, opts).declarations() {
        node.set_style(&property, &value);
    }
    true
}
