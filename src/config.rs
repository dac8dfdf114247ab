use crate::foundation::core::TargetId;
use crate::foundation::error::{PagefxError, PagefxResult};
use crate::host::ObserverOptions;
use crate::scroll::animation_loop::{DEFAULT_MARKER_ATTRIBUTE, ScrollLoopOpts};
use crate::style::render::{DEFAULT_PERSPECTIVE_PX, RenderOpts};

/// Tunables for an [`crate::trigger::controller::InteractionController`].
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct EngineConfig {
    /// Visible fraction that counts as "appeared".
    pub appear_threshold: f64,
    /// Margin applied to the observer root; the negative bottom fires slightly early.
    pub appear_root_margin: String,
    /// Scroll progress deltas below this are not written.
    pub progress_epsilon: f64,
    /// Perspective depth in px for 3-D transforms.
    pub default_perspective: f64,
    pub active_class_prefix: String,
    pub visible_class_prefix: String,
    pub scroll_marker_attribute: String,
    /// Drive scroll interactions from the frame loop even when the host animates natively.
    pub force_frame_loop: bool,
    /// Honor the host's reduced-motion preference.
    pub respect_reduced_motion: bool,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            appear_threshold: 0.1,
            appear_root_margin: "0px 0px -50px 0px".to_owned(),
            progress_epsilon: 0.001,
            default_perspective: DEFAULT_PERSPECTIVE_PX,
            active_class_prefix: "interaction-active-".to_owned(),
            visible_class_prefix: "interaction-visible-".to_owned(),
            scroll_marker_attribute: DEFAULT_MARKER_ATTRIBUTE.to_owned(),
            force_frame_loop: false,
            respect_reduced_motion: true,
        }
    }
}

impl EngineConfig {
    /// Parse and validate a JSON config. Missing fields take their defaults.
    pub fn from_json_str(s: &str) -> PagefxResult<Self> {
        let cfg: Self = serde_json::from_str(s)?;
        cfg.validate()?;
        Ok(cfg)
    }

    pub fn validate(&self) -> PagefxResult<()> {
        if !(0.0..=1.0).contains(&self.appear_threshold) {
            return Err(PagefxError::validation(
                "appearThreshold must be within 0..=1",
            ));
        }
        if !self.progress_epsilon.is_finite() || self.progress_epsilon < 0.0 {
            return Err(PagefxError::validation(
                "progressEpsilon must be finite and >= 0",
            ));
        }
        if !self.default_perspective.is_finite() || self.default_perspective <= 0.0 {
            return Err(PagefxError::validation("defaultPerspective must be > 0"));
        }
        for (name, value) in [
            ("activeClassPrefix", &self.active_class_prefix),
            ("visibleClassPrefix", &self.visible_class_prefix),
            ("scrollMarkerAttribute", &self.scroll_marker_attribute),
        ] {
            if value.trim().is_empty() {
                return Err(PagefxError::validation(format!("{name} must not be empty")));
            }
        }
        Ok(())
    }

    pub fn active_class(&self, id: &str) -> String {
        format!("{}{id}", self.active_class_prefix)
    }

    pub fn visible_class(&self, id: &str) -> String {
        format!("{}{id}", self.visible_class_prefix)
    }

    pub fn render_opts(&self) -> RenderOpts {
        RenderOpts {
            perspective: self.default_perspective,
        }
    }

    pub fn loop_opts(&self) -> ScrollLoopOpts {
        ScrollLoopOpts {
            epsilon: self.progress_epsilon,
            perspective: self.default_perspective,
            marker_attribute: self.scroll_marker_attribute.clone(),
        }
    }

    pub fn observer_options(&self, root: Option<TargetId>) -> ObserverOptions {
        ObserverOptions {
            threshold: self.appear_threshold,
            root_margin: self.appear_root_margin.clone(),
            root,
        }
    }
}
