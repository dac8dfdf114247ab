use std::collections::BTreeMap;

use crate::config::EngineConfig;
use crate::foundation::core::{Rect, ScrollMetrics};
use crate::foundation::error::{PagefxError, PagefxResult};
use crate::host::{Host, MemoryHost};
use crate::motion::effect::Effect;
use crate::trigger::controller::InteractionController;
use crate::trigger::interaction::Interaction;

/// Declarative records handed to the engine at mount time.
#[derive(Clone, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Document {
    pub interactions: Vec<Interaction>,
    pub effects: Vec<Effect>,
}

impl Document {
    pub fn from_json_str(s: &str) -> PagefxResult<Self> {
        let doc: Self = serde_json::from_str(s)?;
        doc.validate()?;
        Ok(doc)
    }

    pub fn validate(&self) -> PagefxResult<()> {
        for i in &self.interactions {
            i.validate()?;
        }
        for (idx, e) in self.effects.iter().enumerate() {
            e.validate().map_err(|err| {
                PagefxError::validation(format!("effect #{idx} ({}): {err}", e.kind_name()))
            })?;
        }
        Ok(())
    }
}

/// Page geometry of a simulated scene.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageSpec {
    pub width: f64,
    pub viewport_height: f64,
    pub height: f64,
}

/// One render target of a simulated scene, rect in page coordinates.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TargetSpec {
    pub id: String,
    pub rect: Rect,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parent: Option<String>,
    /// Present when the target is a nested scroll container.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub scroll: Option<ScrollMetrics>,
}

/// A self-contained page replayed against [`MemoryHost`].
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Scene {
    pub page: PageSpec,
    #[serde(default)]
    pub targets: Vec<TargetSpec>,
    #[serde(default)]
    pub interactions: Vec<Interaction>,
    /// Page scroll offset for each simulated frame.
    #[serde(default)]
    pub scroll_offsets: Vec<f64>,
    #[serde(default)]
    pub config: EngineConfig,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub root: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub container: Option<String>,
    #[serde(default)]
    pub native_scroll_timeline: bool,
    #[serde(default)]
    pub reduced_motion: bool,
}

/// Styles of every target after one simulated frame.
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub struct FrameReport {
    pub frame: usize,
    pub offset: f64,
    pub written: usize,
    pub styles: BTreeMap<String, BTreeMap<String, String>>,
}

impl Scene {
    pub fn from_json_str(s: &str) -> PagefxResult<Self> {
        let scene: Self = serde_json::from_str(s)?;
        scene.config.validate()?;
        for i in &scene.interactions {
            i.validate()?;
        }
        Ok(scene)
    }

    /// Build the host and mount a controller over it.
    pub fn mount(&self) -> InteractionController<MemoryHost> {
        let mut host = MemoryHost::new(self.page.width, self.page.viewport_height, self.page.height)
            .with_native_scroll_timeline(self.native_scroll_timeline);
        host.set_reduced_motion(self.reduced_motion);
        for t in &self.targets {
            match (&t.parent, t.scroll) {
                (_, Some(metrics)) => host.add_scroll_container(&t.id, t.rect, metrics),
                (Some(parent), None) => host.add_child_target(&t.id, parent, t.rect),
                (None, None) => host.add_target(&t.id, t.rect),
            }
        }

        let mut ctl = InteractionController::new(host, self.config.clone());
        if let Some(root) = &self.root {
            ctl = ctl.with_root(root.clone());
        }
        if let Some(container) = &self.container {
            ctl = ctl.with_scroll_container(container.clone());
        }
        ctl.set_interactions(self.interactions.clone());
        ctl
    }

    /// Replay every scroll offset as one frame and report target styles after each.
    pub fn run(&self) -> Vec<FrameReport> {
        let mut ctl = self.mount();
        let mut reports = Vec::with_capacity(self.scroll_offsets.len());
        for (frame, &offset) in self.scroll_offsets.iter().enumerate() {
            let host = ctl.host_mut();
            host.scroll_page_to(offset);
            if let Some(container) = &self.container {
                if let Some(node) = host.target_mut(container) {
                    node.set_scroll_offset(offset);
                }
            }
            let written = if ctl.host_mut().take_frame_request() {
                ctl.on_frame()
            } else {
                0
            };
            let host = ctl.host();
            let styles = self
                .targets
                .iter()
                .filter_map(|t| {
                    host.target(&t.id)
                        .map(|node| (t.id.clone(), node.styles().clone()))
                })
                .collect();
            reports.push(FrameReport {
                frame,
                offset: host.page_metrics().offset,
                written,
                styles,
            });
        }
        reports
    }
}
