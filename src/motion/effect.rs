use crate::animation::ease::Ease;
use crate::animation::preset::preset_endpoints;
use crate::foundation::core::{Rect, ScrollMetrics, TargetId, clamp01};
use crate::foundation::error::{PagefxError, PagefxResult};
use crate::host::ObserverOptions;
use crate::motion::stagger::{StaggerPolicy, stagger_delay};
use crate::scroll::tracker::{element_visibility_progress, page_progress, ranged_progress};
use crate::style::bag::{Keyframe, PropertyBag, validate_keyframes};
use crate::style::interpolate::{Profile, interpolate, sample_keyframes};
use crate::style::property::{Numeric, PropertyKey, PropertyValue};
use crate::style::render::{RenderOpts, RenderableStyle, to_renderable};

fn default_true() -> bool {
    true
}

fn default_duration() -> f64 {
    600.0
}

/// Partial style written over one child's sampled state.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct ChildOverride {
    pub index: usize,
    #[serde(default)]
    pub style: PropertyBag,
}

/// Fields shared by every effect kind.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EffectBase {
    #[serde(default = "default_true")]
    pub enabled: bool,
    #[serde(default)]
    pub from: PropertyBag,
    #[serde(default)]
    pub to: PropertyBag,
    /// Supersedes `from`/`to` when non-empty.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub keyframes: Option<Vec<Keyframe>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub preset: Option<String>,
    /// Milliseconds.
    #[serde(default = "default_duration")]
    pub duration: f64,
    /// Milliseconds.
    #[serde(default)]
    pub delay: f64,
    #[serde(default)]
    pub easing: Ease,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub transform_origin: Option<String>,
    /// Perspective depth in px for 3-D transforms.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub perspective: Option<f64>,
    #[serde(default)]
    pub apply_to_children: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stagger: Option<StaggerPolicy>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub child_overrides: Vec<ChildOverride>,
    #[serde(default)]
    pub will_change: bool,
}

impl Default for EffectBase {
    fn default() -> Self {
        Self {
            enabled: true,
            from: PropertyBag::new(),
            to: PropertyBag::new(),
            keyframes: None,
            preset: None,
            duration: default_duration(),
            delay: 0.0,
            easing: Ease::default(),
            transform_origin: None,
            perspective: None,
            apply_to_children: false,
            stagger: None,
            child_overrides: Vec::new(),
            will_change: false,
        }
    }
}

impl EffectBase {
    pub fn validate(&self) -> PagefxResult<()> {
        if !self.duration.is_finite() || self.duration < 0.0 {
            return Err(PagefxError::validation("effect duration must be finite and >= 0"));
        }
        if !self.delay.is_finite() {
            return Err(PagefxError::validation("effect delay must be finite"));
        }
        if let Some(p) = self.perspective {
            if !p.is_finite() || p <= 0.0 {
                return Err(PagefxError::validation("effect perspective must be > 0"));
            }
        }
        if let Some(s) = &self.stagger {
            if !s.amount.is_finite() {
                return Err(PagefxError::validation("stagger amount must be finite"));
            }
        }
        if let Some(keys) = &self.keyframes {
            validate_keyframes(keys)?;
        }
        Ok(())
    }

    /// `(from, to)` with the preset's defaults underneath the explicit bags.
    pub fn endpoints(&self) -> (PropertyBag, PropertyBag) {
        match &self.preset {
            Some(name) => {
                let (from, to) = preset_endpoints(name);
                (from.merged(&self.from), to.merged(&self.to))
            }
            None => (self.from.clone(), self.to.clone()),
        }
    }

    /// Style at timeline `progress`. A disabled effect samples to an empty bag.
    pub fn sample(&self, progress: f64) -> PropertyBag {
        if !self.enabled {
            return PropertyBag::new();
        }
        match self.keyframes.as_deref() {
            Some(keys) if !keys.is_empty() => {
                sample_keyframes(Profile::Effect, keys, self.easing, progress)
            }
            _ => {
                let (from, to) = self.endpoints();
                interpolate(&from, &to, self.easing.apply(clamp01(progress)))
            }
        }
    }

    /// Timeline progress `elapsed_ms` after the effect was triggered, honoring `delay`.
    pub fn time_progress(&self, elapsed_ms: f64) -> f64 {
        let local = elapsed_ms - self.delay;
        if self.duration <= 0.0 {
            return if local >= 0.0 { 1.0 } else { 0.0 };
        }
        clamp01(local / self.duration)
    }

    /// Timeline shift of child `index` of `total`, as a fraction of `duration`.
    pub fn child_shift(&self, index: usize, total: usize) -> f64 {
        if !self.apply_to_children || self.duration <= 0.0 {
            return 0.0;
        }
        match &self.stagger {
            Some(policy) => stagger_delay(index, total, policy) / self.duration,
            None => 0.0,
        }
    }

    /// Style of child `index` of `total` when the group timeline sits at `progress`.
    ///
    /// The child runs `stagger_delay / duration` behind the group, and its override (if any)
    /// is written on top.
    pub fn child_sample(&self, index: usize, total: usize, progress: f64) -> PropertyBag {
        let local = clamp01(progress) - self.child_shift(index, total);
        let bag = self.sample(local);
        match self.child_overrides.iter().find(|o| o.index == index) {
            Some(o) if self.enabled => bag.merged(&o.style),
            _ => bag,
        }
    }

    /// Render `bag` with this effect's origin, perspective and `will-change` hints.
    pub fn render_bag(&self, bag: &PropertyBag, opts: RenderOpts) -> RenderableStyle {
        let opts = RenderOpts {
            perspective: self.perspective.unwrap_or(opts.perspective),
        };
        let mut style = to_renderable(bag, opts);
        if self.will_change {
            let names = style.property_names();
            if !names.is_empty() {
                style.will_change = Some(names.join(", "));
            }
        }
        if style.transform.is_some() {
            style.transform_origin = self.transform_origin.clone();
        }
        style
    }

    pub fn renderable(&self, progress: f64, opts: RenderOpts) -> RenderableStyle {
        self.render_bag(&self.sample(progress), opts)
    }
}

/// Where along the viewport a scroll effect fires.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum TriggerPoint {
    Top,
    #[default]
    Center,
    Bottom,
}

impl TriggerPoint {
    /// Offset factor from the viewport top.
    pub fn factor(self) -> f64 {
        match self {
            Self::Top => 0.0,
            Self::Center => 0.5,
            Self::Bottom => 1.0,
        }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Axis {
    X,
    #[default]
    Y,
}

#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Parallax {
    /// Travel per unit progress, in hundreds of px. Negative speeds move with the scroll.
    pub speed: f64,
    #[serde(default)]
    pub axis: Axis,
}

#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Pin {
    /// Pinned distance in px.
    pub duration: f64,
    /// Reserve layout space for the pinned distance.
    #[serde(default = "default_true")]
    pub spacing: bool,
}

/// What a scroll effect measures its progress against.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum RelativeTo {
    #[default]
    Page,
    Parent,
    #[serde(rename = "self")]
    Element,
}

#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScrollRange {
    /// Percent.
    #[serde(default)]
    pub start: f64,
    /// Percent.
    #[serde(default = "default_range_end")]
    pub end: f64,
    #[serde(default)]
    pub relative_to: RelativeTo,
}

fn default_range_end() -> f64 {
    100.0
}

impl Default for ScrollRange {
    fn default() -> Self {
        Self {
            start: 0.0,
            end: default_range_end(),
            relative_to: RelativeTo::Page,
        }
    }
}

/// Geometry a scroll effect can read its progress from.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ScrollSources {
    pub page: ScrollMetrics,
    pub viewport: Rect,
    pub element: Rect,
    /// Parent container bounds; the viewport stands in when absent.
    pub parent: Option<Rect>,
}

#[derive(Clone, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HoverEffect {
    #[serde(flatten)]
    pub base: EffectBase,
}

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScrollEffect {
    #[serde(flatten)]
    pub base: EffectBase,
    #[serde(default)]
    pub trigger_point: TriggerPoint,
    /// Bind progress to scroll position; otherwise the effect jumps to its end state once
    /// raw progress passes the trigger point.
    #[serde(default = "default_true")]
    pub scrub: bool,
    /// Fraction of the remaining distance left behind per tick, `0..1`.
    #[serde(default)]
    pub smoothing: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parallax: Option<Parallax>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pin: Option<Pin>,
    /// Map vertical progress onto horizontal travel across the overflow.
    #[serde(default)]
    pub horizontal: bool,
    #[serde(default)]
    pub range: ScrollRange,
}

impl Default for ScrollEffect {
    fn default() -> Self {
        Self {
            base: EffectBase::default(),
            trigger_point: TriggerPoint::default(),
            scrub: true,
            smoothing: 0.0,
            parallax: None,
            pin: None,
            horizontal: false,
            range: ScrollRange::default(),
        }
    }
}

impl ScrollEffect {
    pub fn trigger_offset(&self) -> f64 {
        self.trigger_point.factor()
    }

    /// Layout space the host should reserve for pinning, in px.
    pub fn pin_spacing(&self) -> f64 {
        match self.pin {
            Some(pin) if pin.spacing => pin.duration.max(0.0),
            _ => 0.0,
        }
    }

    /// Raw progress from the source `range.relative_to` selects.
    pub fn raw_progress(&self, sources: &ScrollSources) -> f64 {
        match self.range.relative_to {
            RelativeTo::Page => page_progress(sources.page),
            RelativeTo::Element => element_visibility_progress(sources.element, sources.viewport),
            RelativeTo::Parent => element_visibility_progress(
                sources.element,
                sources.parent.unwrap_or(sources.viewport),
            ),
        }
    }

    /// Timeline progress for `raw` scroll progress.
    pub fn progress(&self, raw: f64) -> f64 {
        let p = ranged_progress(raw, self.range.start, self.range.end);
        if self.scrub {
            p
        } else if clamp01(raw) >= self.trigger_offset() {
            1.0
        } else {
            0.0
        }
    }

    /// Ease `previous` toward `target` by the configured smoothing.
    pub fn smoothed(&self, previous: f64, target: f64) -> f64 {
        let keep = self.smoothing.clamp(0.0, 0.99);
        previous + (target - previous) * (1.0 - keep)
    }

    /// Style for `raw` scroll progress, with parallax and horizontal travel applied.
    ///
    /// `metrics` is the geometry of the scroll area the horizontal remap spans.
    pub fn sample_scroll(&self, raw: f64, metrics: ScrollMetrics) -> PropertyBag {
        let p = self.progress(raw);
        let mut bag = self.base.sample(p);
        if !self.base.enabled {
            return bag;
        }
        if let Some(parallax) = self.parallax {
            let key = match parallax.axis {
                Axis::X => PropertyKey::TranslateX,
                Axis::Y => PropertyKey::TranslateY,
            };
            add_px(&mut bag, key, -p * parallax.speed * 100.0);
        }
        if self.horizontal {
            add_px(&mut bag, PropertyKey::TranslateX, -p * metrics.overflow());
        }
        bag
    }

    pub fn validate(&self) -> PagefxResult<()> {
        self.base.validate()?;
        let pct = |v: f64| v.is_finite() && (0.0..=100.0).contains(&v);
        if !pct(self.range.start) || !pct(self.range.end) {
            return Err(PagefxError::validation("scroll range must be within 0..=100"));
        }
        if !(0.0..1.0).contains(&self.smoothing) {
            return Err(PagefxError::validation("scroll smoothing must be within 0..1"));
        }
        if let Some(p) = self.parallax {
            if !p.speed.is_finite() {
                return Err(PagefxError::validation("parallax speed must be finite"));
            }
        }
        Ok(())
    }
}

fn add_px(bag: &mut PropertyBag, key: PropertyKey, delta: f64) {
    let base = bag
        .numeric(key)
        .unwrap_or_else(|| Numeric::new(0.0, Some("px".to_owned())));
    let unit = base.unit.clone().or_else(|| Some("px".to_owned()));
    bag.insert(key, PropertyValue::from(Numeric::new(base.value + delta, unit)));
}

/// How an appear effect is started.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum AppearTrigger {
    Load,
    #[default]
    InView,
}

fn default_threshold() -> f64 {
    0.1
}

fn default_root_margin() -> String {
    "0px 0px -50px 0px".to_owned()
}

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AppearEffect {
    #[serde(flatten)]
    pub base: EffectBase,
    #[serde(default)]
    pub trigger: AppearTrigger,
    #[serde(default = "default_true")]
    pub once: bool,
    #[serde(default = "default_threshold")]
    pub threshold: f64,
    #[serde(default = "default_root_margin")]
    pub root_margin: String,
}

impl Default for AppearEffect {
    fn default() -> Self {
        Self {
            base: EffectBase::default(),
            trigger: AppearTrigger::default(),
            once: true,
            threshold: default_threshold(),
            root_margin: default_root_margin(),
        }
    }
}

impl AppearEffect {
    pub fn observer_options(&self, root: Option<TargetId>) -> ObserverOptions {
        ObserverOptions {
            threshold: clamp01(self.threshold),
            root_margin: self.root_margin.clone(),
            root,
        }
    }

    pub fn validate(&self) -> PagefxResult<()> {
        self.base.validate()?;
        if !(0.0..=1.0).contains(&self.threshold) {
            return Err(PagefxError::validation("appear threshold must be within 0..=1"));
        }
        Ok(())
    }
}

/// Event that starts or stops a loop effect.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum LoopCue {
    #[default]
    Load,
    Hover,
    Click,
    InView,
}

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoopEffect {
    #[serde(flatten)]
    pub base: EffectBase,
    /// Repeat forever instead of playing once.
    #[serde(rename = "loop", default = "default_true")]
    pub repeat: bool,
    /// Alternate direction every cycle.
    #[serde(default)]
    pub reverse: bool,
    #[serde(default)]
    pub start_on: LoopCue,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stop_on: Option<LoopCue>,
}

impl Default for LoopEffect {
    fn default() -> Self {
        Self {
            base: EffectBase::default(),
            repeat: true,
            reverse: false,
            start_on: LoopCue::default(),
            stop_on: None,
        }
    }
}

impl LoopEffect {
    /// Timeline progress `elapsed_ms` after the loop started.
    ///
    /// Repeating loops wrap each `duration`; reversing ones run forward then back. A
    /// non-repeating loop plays a single cycle (forward and, when reversing, back) and holds.
    pub fn progress_at(&self, elapsed_ms: f64) -> f64 {
        let d = self.base.duration;
        let local = elapsed_ms - self.base.delay;
        if local <= 0.0 || !local.is_finite() {
            return 0.0;
        }
        if d <= 0.0 {
            return if self.reverse { 0.0 } else { 1.0 };
        }
        let span = if self.reverse { 2.0 * d } else { d };
        if !self.repeat && local >= span {
            return if self.reverse { 0.0 } else { 1.0 };
        }
        let pos = local % span;
        if pos < d {
            pos / d
        } else {
            (span - pos) / d
        }
    }

    pub fn sample_at(&self, elapsed_ms: f64) -> PropertyBag {
        self.base.sample(self.progress_at(elapsed_ms))
    }
}

/// A rich effect definition, tagged by `kind`.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum Effect {
    Hover(HoverEffect),
    Scroll(ScrollEffect),
    Appear(AppearEffect),
    Loop(LoopEffect),
}

impl Effect {
    pub fn kind_name(&self) -> &'static str {
        match self {
            Self::Hover(_) => "hover",
            Self::Scroll(_) => "scroll",
            Self::Appear(_) => "appear",
            Self::Loop(_) => "loop",
        }
    }

    pub fn base(&self) -> &EffectBase {
        match self {
            Self::Hover(e) => &e.base,
            Self::Scroll(e) => &e.base,
            Self::Appear(e) => &e.base,
            Self::Loop(e) => &e.base,
        }
    }

    pub fn base_mut(&mut self) -> &mut EffectBase {
        match self {
            Self::Hover(e) => &mut e.base,
            Self::Scroll(e) => &mut e.base,
            Self::Appear(e) => &mut e.base,
            Self::Loop(e) => &mut e.base,
        }
    }

    pub fn validate(&self) -> PagefxResult<()> {
        match self {
            Self::Hover(e) => e.base.validate(),
            Self::Scroll(e) => e.validate(),
            Self::Appear(e) => e.validate(),
            Self::Loop(e) => e.base.validate(),
        }
    }

    pub fn endpoints(&self) -> (PropertyBag, PropertyBag) {
        self.base().endpoints()
    }

    pub fn sample(&self, progress: f64) -> PropertyBag {
        self.base().sample(progress)
    }

    pub fn child_style(&self, index: usize, total: usize, progress: f64) -> PropertyBag {
        self.base().child_sample(index, total, progress)
    }

    pub fn renderable(&self, progress: f64, opts: RenderOpts) -> RenderableStyle {
        self.base().renderable(progress, opts)
    }

    pub fn child_renderable(
        &self,
        index: usize,
        total: usize,
        progress: f64,
        opts: RenderOpts,
    ) -> RenderableStyle {
        let base = self.base();
        base.render_bag(&base.child_sample(index, total, progress), opts)
    }

    pub fn from_json_str(s: &str) -> PagefxResult<Self> {
        let effect: Self = serde_json::from_str(s)?;
        effect.validate()?;
        Ok(effect)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/motion/effect.rs"]
mod tests;
