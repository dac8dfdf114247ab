use std::fmt;

pub use kurbo::{Point, Rect, Size};

/// Identifier of a render target registered by the host.
#[derive(
    Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize, serde::Deserialize,
)]
#[serde(transparent)]
pub struct TargetId(pub String);

impl TargetId {
    /// Create a target id from any string-like value.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Borrow the raw identifier.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for TargetId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for TargetId {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

/// Identifier of a declarative interaction record.
#[derive(
    Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize, serde::Deserialize,
)]
#[serde(transparent)]
pub struct InteractionId(pub String);

impl InteractionId {
    /// Create an interaction id from any string-like value.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Borrow the raw identifier.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for InteractionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for InteractionId {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

/// Clamp `v` into `[0, 1]`. NaN maps to 0.
pub fn clamp01(v: f64) -> f64 {
    if v.is_nan() { 0.0 } else { v.clamp(0.0, 1.0) }
}

/// Scroll geometry along the vertical axis of a scrollable area.
#[derive(Clone, Copy, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScrollMetrics {
    /// Current scroll offset in px.
    pub offset: f64,
    /// Total scrollable content extent in px.
    pub extent: f64,
    /// Visible viewport extent in px.
    pub viewport: f64,
}

impl ScrollMetrics {
    /// Distance that can actually be scrolled; zero when content fits.
    pub fn overflow(self) -> f64 {
        (self.extent - self.viewport).max(0.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clamp01_handles_nan_and_bounds() {
        assert_eq!(clamp01(f64::NAN), 0.0);
        assert_eq!(clamp01(-3.0), 0.0);
        assert_eq!(clamp01(7.0), 1.0);
        assert_eq!(clamp01(0.25), 0.25);
    }

    #[test]
    fn ids_serialize_as_plain_strings() {
        let id = TargetId::new("hero");
        assert_eq!(serde_json::to_string(&id).unwrap(), "\"hero\"");
        let back: InteractionId = serde_json::from_str("\"i1\"").unwrap();
        assert_eq!(back.as_str(), "i1");
    }

    #[test]
    fn overflow_never_negative() {
        let m = ScrollMetrics {
            offset: 0.0,
            extent: 400.0,
            viewport: 800.0,
        };
        assert_eq!(m.overflow(), 0.0);
    }
}
