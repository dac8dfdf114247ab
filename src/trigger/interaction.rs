use crate::animation::ease::Ease;
use crate::animation::preset::preset_endpoints;
use crate::foundation::core::{InteractionId, TargetId};
use crate::foundation::error::{PagefxError, PagefxResult};
use crate::style::bag::PropertyBag;

/// Event class that activates an interaction.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize, serde::Deserialize,
)]
#[serde(rename_all = "kebab-case")]
pub enum Trigger {
    Click,
    Hover,
    Load,
    Appear,
    WhileScrolling,
    PageScroll,
}

impl Trigger {
    /// Scroll-linked triggers are driven by the shared frame loop (or natively).
    pub fn is_scroll(self) -> bool {
        matches!(self, Self::WhileScrolling | Self::PageScroll)
    }
}

/// Scroll window, in percent of the raw progress range.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScrollConfig {
    #[serde(default)]
    pub start_offset: f64,
    #[serde(default = "default_end_offset")]
    pub end_offset: f64,
}

fn default_end_offset() -> f64 {
    100.0
}

impl Default for ScrollConfig {
    fn default() -> Self {
        Self {
            start_offset: 0.0,
            end_offset: default_end_offset(),
        }
    }
}

fn default_duration() -> f64 {
    300.0
}

/// Declarative page interaction: a trigger bound to a set of targets and a style delta.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Interaction {
    pub id: InteractionId,
    pub trigger: Trigger,
    /// Node that receives the trigger event; the first target when unset.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub trigger_target_id: Option<TargetId>,
    #[serde(default)]
    pub target_ids: Vec<TargetId>,
    /// Preset name supplying default endpoints.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub effect_kind: Option<String>,
    /// Milliseconds.
    #[serde(default = "default_duration")]
    pub duration: f64,
    /// Timing of time-based transitions. Scroll-linked progress is written as is.
    #[serde(default)]
    pub easing: Ease,
    /// Milliseconds.
    #[serde(default)]
    pub delay: f64,
    /// End state of the interaction.
    #[serde(default)]
    pub style_delta: PropertyBag,
    /// Start state; derived from `effect_kind` when unset.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub from: Option<PropertyBag>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub scroll_config: Option<ScrollConfig>,
}

/// The fields that decide how an interaction is wired.
///
/// Two interaction lists with equal signatures need no rewiring even if their style deltas or
/// timings differ.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct WiringSignature {
    pub id: InteractionId,
    pub trigger: Trigger,
    pub trigger_target: Option<TargetId>,
    pub target_ids: Vec<TargetId>,
}

impl Interaction {
    pub fn new(id: impl Into<String>, trigger: Trigger) -> Self {
        Self {
            id: InteractionId::new(id),
            trigger,
            trigger_target_id: None,
            target_ids: Vec::new(),
            effect_kind: None,
            duration: default_duration(),
            easing: Ease::default(),
            delay: 0.0,
            style_delta: PropertyBag::new(),
            from: None,
            scroll_config: None,
        }
    }

    pub fn target(mut self, id: impl Into<String>) -> Self {
        self.target_ids.push(TargetId::new(id));
        self
    }

    pub fn trigger_target(mut self, id: impl Into<String>) -> Self {
        self.trigger_target_id = Some(TargetId::new(id));
        self
    }

    pub fn effect_kind(mut self, preset: impl Into<String>) -> Self {
        self.effect_kind = Some(preset.into());
        self
    }

    pub fn easing(mut self, ease: Ease) -> Self {
        self.easing = ease;
        self
    }

    pub fn from_style(mut self, from: PropertyBag) -> Self {
        self.from = Some(from);
        self
    }

    pub fn to_style(mut self, to: PropertyBag) -> Self {
        self.style_delta = to;
        self
    }

    pub fn scroll_window(mut self, start_offset: f64, end_offset: f64) -> Self {
        self.scroll_config = Some(ScrollConfig {
            start_offset,
            end_offset,
        });
        self
    }

    /// Node whose events activate this interaction.
    pub fn event_target(&self) -> Option<&TargetId> {
        self.trigger_target_id
            .as_ref()
            .or_else(|| self.target_ids.first())
    }

    /// `(start%, end%)` of the scroll window.
    pub fn window(&self) -> (f64, f64) {
        let cfg = self.scroll_config.unwrap_or_default();
        (cfg.start_offset, cfg.end_offset)
    }

    pub fn is_scroll_driven(&self) -> bool {
        self.trigger.is_scroll()
    }

    /// `(from, to)` with the preset named by `effect_kind` underneath the explicit bags.
    pub fn endpoints(&self) -> (PropertyBag, PropertyBag) {
        let (preset_from, preset_to) = match &self.effect_kind {
            Some(kind) => preset_endpoints(kind),
            None => (PropertyBag::new(), PropertyBag::new()),
        };
        let from = match &self.from {
            Some(f) => preset_from.merged(f),
            None => preset_from,
        };
        (from, preset_to.merged(&self.style_delta))
    }

    pub fn signature(&self) -> WiringSignature {
        WiringSignature {
            id: self.id.clone(),
            trigger: self.trigger,
            trigger_target: self.trigger_target_id.clone(),
            target_ids: self.target_ids.clone(),
        }
    }

    pub fn validate(&self) -> PagefxResult<()> {
        if self.id.as_str().is_empty() {
            return Err(PagefxError::validation("interaction id must not be empty"));
        }
        if !self.duration.is_finite() || self.duration < 0.0 {
            return Err(PagefxError::validation(format!(
                "interaction '{}': duration must be finite and >= 0",
                self.id
            )));
        }
        if let Some(cfg) = self.scroll_config {
            let ok = |v: f64| v.is_finite() && (0.0..=100.0).contains(&v);
            if !ok(cfg.start_offset) || !ok(cfg.end_offset) {
                return Err(PagefxError::validation(format!(
                    "interaction '{}': scroll offsets must be within 0..=100",
                    self.id
                )));
            }
        }
        Ok(())
    }
}

/// Structural identity of a whole interaction list, in list order.
pub fn wiring_signature(list: &[Interaction]) -> Vec<WiringSignature> {
    list.iter().map(Interaction::signature).collect()
}
