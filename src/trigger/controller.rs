use std::collections::{BTreeMap, BTreeSet};

use crate::config::EngineConfig;
use crate::foundation::core::{InteractionId, TargetId};
use crate::host::{Host, RenderTarget};
use crate::scroll::animation_loop::{ScrollLoop, write_style};
use crate::style::interpolate::{Profile, interpolate_with};
use crate::trigger::interaction::{Interaction, Trigger, wiring_signature};

/// Toggle state of a click interaction.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ClickState {
    #[default]
    Inactive,
    Active,
}

/// Per-target state of an appear interaction. `Visible` is terminal.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AppearState {
    Pending,
    Visible,
}

/// How a scroll interaction ended up bound.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ScrollBinding {
    /// Registered with the shared frame loop.
    FrameLoop,
    /// Marker attribute only; the host animates natively.
    Native,
    /// End state written once; nothing animates.
    ReducedMotion,
}

/// Result of delivering a click to the controller.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ClickOutcome {
    /// No listener is wired for that interaction.
    Ignored,
    /// The interaction toggled. The host should stop the event from propagating further when
    /// `stop_propagation` is set.
    Toggled { active: bool, stop_propagation: bool },
}

#[derive(Clone, Debug)]
struct ClickWiring {
    trigger: TargetId,
    targets: Vec<TargetId>,
}

#[derive(Clone, Debug, Default)]
struct ObserverWiring {
    targets: BTreeMap<TargetId, AppearState>,
    disconnected: bool,
}

impl ObserverWiring {
    fn has_pending(&self) -> bool {
        self.targets.values().any(|s| *s == AppearState::Pending)
    }
}

#[derive(Clone, Debug)]
struct ScrollWiring {
    targets: Vec<TargetId>,
    binding: ScrollBinding,
}

/// Everything a controller has wired, owned by that controller.
#[derive(Clone, Debug, Default)]
struct WiringRegistry {
    click_state: BTreeMap<InteractionId, ClickState>,
    click_listeners: BTreeMap<InteractionId, ClickWiring>,
    observers: BTreeMap<InteractionId, ObserverWiring>,
    /// Load and hover interactions: present, but nothing to bind.
    acknowledged: BTreeSet<InteractionId>,
    scroll_bound: BTreeMap<InteractionId, ScrollWiring>,
    /// Targets that already appeared. Outlives cleanup so a refresh never replays them.
    appeared: BTreeSet<(InteractionId, TargetId)>,
}

/// Binds declarative interactions to a host's render targets.
///
/// The controller owns the host for its lifetime. Host callbacks come back in through
/// [`handle_click`](Self::handle_click), [`handle_intersection`](Self::handle_intersection),
/// [`on_frame`](Self::on_frame) and [`on_media_change`](Self::on_media_change).
#[derive(Debug)]
pub struct InteractionController<H: Host> {
    host: H,
    config: EngineConfig,
    root: Option<TargetId>,
    container: Option<TargetId>,
    interactions: Vec<Interaction>,
    registry: WiringRegistry,
    scroll_loop: ScrollLoop,
}

impl<H: Host> InteractionController<H> {
    pub fn new(host: H, config: EngineConfig) -> Self {
        let scroll_loop = ScrollLoop::new(config.loop_opts());
        Self {
            host,
            config,
            root: None,
            container: None,
            interactions: Vec::new(),
            registry: WiringRegistry::default(),
            scroll_loop,
        }
    }

    /// Scope every target lookup to the subtree at `root`.
    pub fn with_root(mut self, root: impl Into<String>) -> Self {
        let root = TargetId::new(root);
        self.scroll_loop.set_root(Some(root.clone()));
        self.root = Some(root);
        self
    }

    /// Measure scroll progress against a nested container. This always selects the frame loop.
    pub fn with_scroll_container(mut self, container: impl Into<String>) -> Self {
        let container = TargetId::new(container);
        self.scroll_loop.set_container(Some(container.clone()));
        self.container = Some(container);
        self
    }

    /// Construct, load `interactions` and wire them.
    pub fn mount(host: H, config: EngineConfig, interactions: Vec<Interaction>) -> Self {
        let mut ctl = Self::new(host, config);
        ctl.interactions = interactions;
        ctl.setup_all();
        ctl
    }

    /// Tear everything down and hand the host back.
    pub fn unmount(mut self) -> H {
        self.cleanup_all();
        self.host
    }

    pub fn host(&self) -> &H {
        &self.host
    }

    pub fn host_mut(&mut self) -> &mut H {
        &mut self.host
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn interactions(&self) -> &[Interaction] {
        &self.interactions
    }

    pub fn scroll_loop(&self) -> &ScrollLoop {
        &self.scroll_loop
    }

    /// Replace the interaction list.
    ///
    /// Wiring is rebuilt only when the structural identity (id, trigger, trigger target, target
    /// ids) changed; otherwise the new records are swapped in place. Returns whether a refresh
    /// ran.
    pub fn set_interactions(&mut self, interactions: Vec<Interaction>) -> bool {
        let rewire = wiring_signature(&self.interactions) != wiring_signature(&interactions);
        self.interactions = interactions;
        if rewire {
            self.refresh();
        } else {
            self.scroll_loop.refresh_records(&self.interactions);
        }
        rewire
    }

    /// Whether scroll interactions run on the shared frame loop rather than natively.
    pub fn uses_frame_loop(&self) -> bool {
        self.config.force_frame_loop
            || self.container.is_some()
            || !self.host.supports_native_scroll_timeline()
    }

    fn reduced_motion(&self) -> bool {
        self.config.respect_reduced_motion && self.host.prefers_reduced_motion()
    }

    fn resolves(&self, id: &TargetId) -> bool {
        self.host.targets().resolve(id, self.root.as_ref()).is_some()
    }

    fn resolved_targets(&self, interaction: &Interaction) -> Vec<TargetId> {
        interaction
            .target_ids
            .iter()
            .filter(|t| self.resolves(t))
            .cloned()
            .collect()
    }

    /// Wire every interaction not wired yet. Idempotent.
    #[tracing::instrument(skip(self), fields(interactions = self.interactions.len()))]
    pub fn setup_all(&mut self) {
        let list = std::mem::take(&mut self.interactions);
        for interaction in &list {
            self.setup_one(interaction);
        }
        self.interactions = list;
    }

    fn setup_one(&mut self, interaction: &Interaction) {
        match interaction.trigger {
            Trigger::Click => self.setup_click(interaction),
            Trigger::Appear => self.setup_appear(interaction),
            Trigger::WhileScrolling | Trigger::PageScroll => self.setup_scroll(interaction),
            Trigger::Load | Trigger::Hover => {
                self.registry.acknowledged.insert(interaction.id.clone());
            }
        }
    }

    fn setup_click(&mut self, interaction: &Interaction) {
        let id = &interaction.id;
        if self.registry.click_listeners.contains_key(id) {
            return;
        }
        let Some(trigger) = interaction.event_target().filter(|t| self.resolves(t)) else {
            tracing::debug!(%id, "click trigger target not resolved, skipping");
            return;
        };
        let trigger = trigger.clone();
        self.host.listen_click(id, &trigger);
        self.registry.click_listeners.insert(
            id.clone(),
            ClickWiring {
                trigger,
                targets: interaction.target_ids.clone(),
            },
        );
        self.registry.click_state.entry(id.clone()).or_default();
    }

    fn setup_appear(&mut self, interaction: &Interaction) {
        let id = &interaction.id;
        if self.registry.observers.contains_key(id) {
            return;
        }
        let targets = self.resolved_targets(interaction);
        if targets.is_empty() {
            tracing::debug!(%id, "no appear target resolved, skipping");
            return;
        }

        let mut wiring = ObserverWiring::default();
        if self.reduced_motion() {
            let class = self.config.visible_class(id.as_str());
            for t in targets {
                self.add_class(&t, &class);
                self.registry.appeared.insert((id.clone(), t.clone()));
                wiring.targets.insert(t, AppearState::Visible);
            }
            wiring.disconnected = true;
            self.registry.observers.insert(id.clone(), wiring);
            return;
        }

        let opts = self.config.observer_options(self.container.clone());
        for t in targets {
            if self.registry.appeared.contains(&(id.clone(), t.clone())) {
                wiring.targets.insert(t, AppearState::Visible);
                continue;
            }
            self.host.observe(id, &t, &opts);
            wiring.targets.insert(t, AppearState::Pending);
        }
        // Nothing observed means there is no host observer to disconnect later.
        wiring.disconnected = !wiring.has_pending();
        self.registry.observers.insert(id.clone(), wiring);
    }

    fn setup_scroll(&mut self, interaction: &Interaction) {
        let id = &interaction.id;
        if self.registry.scroll_bound.contains_key(id) {
            return;
        }
        let targets = self.resolved_targets(interaction);
        if targets.is_empty() {
            tracing::debug!(%id, "no scroll target resolved, skipping");
            return;
        }

        let binding = if self.reduced_motion() {
            let (from, to) = interaction.endpoints();
            let end = interpolate_with(Profile::Interaction, &from, &to, 1.0);
            let opts = self.config.render_opts();
            for t in &targets {
                write_style(&mut self.host, self.root.as_ref(), t, &end, opts);
            }
            ScrollBinding::ReducedMotion
        } else if self.uses_frame_loop() {
            for t in &targets {
                self.scroll_loop.register(&mut self.host, interaction, t);
            }
            ScrollBinding::FrameLoop
        } else {
            let attr = self.config.scroll_marker_attribute.clone();
            for t in &targets {
                if let Some(node) = self.host.targets_mut().resolve_mut(t, self.root.as_ref()) {
                    node.set_attribute(&attr, id.as_str());
                }
            }
            ScrollBinding::Native
        };
        self.registry
            .scroll_bound
            .insert(id.clone(), ScrollWiring { targets, binding });
    }

    /// Remove every listener, observer and loop entry, and strip the markers they left.
    ///
    /// Visible markers from appear interactions stay; they are terminal. Safe to call any number
    /// of times.
    #[tracing::instrument(skip(self))]
    pub fn cleanup_all(&mut self) {
        let listeners = std::mem::take(&mut self.registry.click_listeners);
        let states = std::mem::take(&mut self.registry.click_state);
        for (id, wiring) in &listeners {
            self.host.unlisten_click(id, &wiring.trigger);
            if states.get(id) == Some(&ClickState::Active) {
                let class = self.config.active_class(id.as_str());
                for t in &wiring.targets {
                    self.remove_class(t, &class);
                }
            }
        }

        for (id, wiring) in std::mem::take(&mut self.registry.observers) {
            if !wiring.disconnected {
                self.host.disconnect(&id);
            }
        }

        self.scroll_loop.clear(&mut self.host);
        let attr = self.config.scroll_marker_attribute.clone();
        for wiring in std::mem::take(&mut self.registry.scroll_bound).into_values() {
            if wiring.binding != ScrollBinding::Native {
                continue;
            }
            for t in &wiring.targets {
                if let Some(node) = self.host.targets_mut().resolve_mut(t, self.root.as_ref()) {
                    node.remove_attribute(&attr);
                }
            }
        }

        self.registry.acknowledged.clear();
    }

    /// Cleanup then setup.
    #[tracing::instrument(skip(self))]
    pub fn refresh(&mut self) {
        self.cleanup_all();
        self.setup_all();
    }

    /// Deliver a click on the trigger target of `id`.
    ///
    /// Toggles the interaction and writes its active class to every target at once.
    pub fn handle_click(&mut self, id: &InteractionId) -> ClickOutcome {
        let Some(wiring) = self.registry.click_listeners.get(id) else {
            return ClickOutcome::Ignored;
        };
        let state = self.registry.click_state.entry(id.clone()).or_default();
        *state = match *state {
            ClickState::Inactive => ClickState::Active,
            ClickState::Active => ClickState::Inactive,
        };
        let active = *state == ClickState::Active;

        let class = self.config.active_class(id.as_str());
        for t in &wiring.targets {
            let Some(node) = self.host.targets_mut().resolve_mut(t, self.root.as_ref()) else {
                continue;
            };
            if active {
                node.add_class(&class);
            } else {
                node.remove_class(&class);
            }
        }
        ClickOutcome::Toggled {
            active,
            stop_propagation: true,
        }
    }

    /// Deliver an intersection change for `target` under observer `id`.
    ///
    /// The first intersection marks the target visible and stops observing it; the observer is
    /// disconnected once no target is pending. Returns whether a marker was added.
    pub fn handle_intersection(
        &mut self,
        id: &InteractionId,
        target: &TargetId,
        intersecting: bool,
    ) -> bool {
        if !intersecting {
            return false;
        }
        let Some(wiring) = self.registry.observers.get_mut(id) else {
            return false;
        };
        if wiring.disconnected || wiring.targets.get(target) != Some(&AppearState::Pending) {
            return false;
        }
        wiring.targets.insert(target.clone(), AppearState::Visible);
        let done = !wiring.has_pending();
        if done {
            wiring.disconnected = true;
        }
        self.registry
            .appeared
            .insert((id.clone(), target.clone()));

        let class = self.config.visible_class(id.as_str());
        self.add_class(target, &class);
        self.host.unobserve(id, target);
        if done {
            self.host.disconnect(id);
        }
        true
    }

    /// Strip the visible marker from every appeared target.
    ///
    /// Observers are not re-armed: a target that appeared once never appears again for the
    /// lifetime of this controller.
    pub fn reset_appear_interactions(&mut self) {
        let appeared: Vec<_> = self.registry.appeared.iter().cloned().collect();
        for (id, t) in appeared {
            let class = self.config.visible_class(id.as_str());
            self.remove_class(&t, &class);
        }
    }

    /// Frame callback from the host.
    pub fn on_frame(&mut self) -> usize {
        self.scroll_loop.on_frame(&mut self.host)
    }

    /// The host's reduced-motion preference changed.
    pub fn on_media_change(&mut self) {
        self.refresh();
    }

    pub fn click_state(&self, id: &InteractionId) -> Option<ClickState> {
        self.registry.click_state.get(id).copied()
    }

    pub fn appear_state(&self, id: &InteractionId, target: &TargetId) -> Option<AppearState> {
        self.registry
            .observers
            .get(id)
            .and_then(|w| w.targets.get(target))
            .copied()
    }

    pub fn scroll_binding(&self, id: &InteractionId) -> Option<ScrollBinding> {
        self.registry.scroll_bound.get(id).map(|w| w.binding)
    }

    /// Whether `id` currently has any wiring (listener, observer, loop entry or acknowledgement).
    pub fn is_wired(&self, id: &InteractionId) -> bool {
        let r = &self.registry;
        r.click_listeners.contains_key(id)
            || r.observers.contains_key(id)
            || r.scroll_bound.contains_key(id)
            || r.acknowledged.contains(id)
    }

    fn add_class(&mut self, target: &TargetId, class: &str) {
        if let Some(node) = self.host.targets_mut().resolve_mut(target, self.root.as_ref()) {
            node.add_class(class);
        }
    }

    fn remove_class(&mut self, target: &TargetId, class: &str) {
        if let Some(node) = self.host.targets_mut().resolve_mut(target, self.root.as_ref()) {
            node.remove_class(class);
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/trigger/controller.rs"]
mod tests;
