use std::fmt;
use std::str::FromStr;

use crate::foundation::error::{PagefxError, PagefxResult};

/// How a property is carried between two states.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PropertyClass {
    /// Linearly interpolable number with an optional unit suffix.
    Numeric,
    /// Discrete value switched at the progress midpoint.
    Color,
}

/// Named visual property understood by the interpolator.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize, serde::Deserialize,
)]
#[serde(rename_all = "camelCase")]
pub enum PropertyKey {
    Opacity,
    Scale,
    ScaleX,
    ScaleY,
    TranslateX,
    TranslateY,
    TranslateZ,
    Rotate,
    RotateX,
    RotateY,
    Skew,
    SkewX,
    SkewY,
    Blur,
    Brightness,
    Contrast,
    Saturate,
    Grayscale,
    HueRotate,
    BackdropBlur,
    Width,
    Height,
    BorderWidth,
    BorderRadius,
    PaddingTop,
    PaddingRight,
    PaddingBottom,
    PaddingLeft,
    MarginTop,
    MarginRight,
    MarginBottom,
    MarginLeft,
    ShadowX,
    ShadowY,
    ShadowBlur,
    ShadowSpread,
    BackgroundColor,
    Color,
    BorderColor,
    ShadowColor,
}

impl PropertyKey {
    /// Every key, in declaration order.
    pub const ALL: [PropertyKey; 40] = [
        Self::Opacity,
        Self::Scale,
        Self::ScaleX,
        Self::ScaleY,
        Self::TranslateX,
        Self::TranslateY,
        Self::TranslateZ,
        Self::Rotate,
        Self::RotateX,
        Self::RotateY,
        Self::Skew,
        Self::SkewX,
        Self::SkewY,
        Self::Blur,
        Self::Brightness,
        Self::Contrast,
        Self::Saturate,
        Self::Grayscale,
        Self::HueRotate,
        Self::BackdropBlur,
        Self::Width,
        Self::Height,
        Self::BorderWidth,
        Self::BorderRadius,
        Self::PaddingTop,
        Self::PaddingRight,
        Self::PaddingBottom,
        Self::PaddingLeft,
        Self::MarginTop,
        Self::MarginRight,
        Self::MarginBottom,
        Self::MarginLeft,
        Self::ShadowX,
        Self::ShadowY,
        Self::ShadowBlur,
        Self::ShadowSpread,
        Self::BackgroundColor,
        Self::Color,
        Self::BorderColor,
        Self::ShadowColor,
    ];

    /// camelCase authoring name (`translateX`, `backgroundColor`, ...).
    pub fn name(self) -> &'static str {
        match self {
            Self::Opacity => "opacity",
            Self::Scale => "scale",
            Self::ScaleX => "scaleX",
            Self::ScaleY => "scaleY",
            Self::TranslateX => "translateX",
            Self::TranslateY => "translateY",
            Self::TranslateZ => "translateZ",
            Self::Rotate => "rotate",
            Self::RotateX => "rotateX",
            Self::RotateY => "rotateY",
            Self::Skew => "skew",
            Self::SkewX => "skewX",
            Self::SkewY => "skewY",
            Self::Blur => "blur",
            Self::Brightness => "brightness",
            Self::Contrast => "contrast",
            Self::Saturate => "saturate",
            Self::Grayscale => "grayscale",
            Self::HueRotate => "hueRotate",
            Self::BackdropBlur => "backdropBlur",
            Self::Width => "width",
            Self::Height => "height",
            Self::BorderWidth => "borderWidth",
            Self::BorderRadius => "borderRadius",
            Self::PaddingTop => "paddingTop",
            Self::PaddingRight => "paddingRight",
            Self::PaddingBottom => "paddingBottom",
            Self::PaddingLeft => "paddingLeft",
            Self::MarginTop => "marginTop",
            Self::MarginRight => "marginRight",
            Self::MarginBottom => "marginBottom",
            Self::MarginLeft => "marginLeft",
            Self::ShadowX => "shadowX",
            Self::ShadowY => "shadowY",
            Self::ShadowBlur => "shadowBlur",
            Self::ShadowSpread => "shadowSpread",
            Self::BackgroundColor => "backgroundColor",
            Self::Color => "color",
            Self::BorderColor => "borderColor",
            Self::ShadowColor => "shadowColor",
        }
    }

    /// Interpolation class of this key.
    pub fn class(self) -> PropertyClass {
        match self {
            Self::BackgroundColor | Self::Color | Self::BorderColor | Self::ShadowColor => {
                PropertyClass::Color
            }
            _ => PropertyClass::Numeric,
        }
    }

    /// Member of the composed transform descriptor.
    pub fn is_transform(self) -> bool {
        matches!(
            self,
            Self::Scale
                | Self::ScaleX
                | Self::ScaleY
                | Self::TranslateX
                | Self::TranslateY
                | Self::TranslateZ
                | Self::Rotate
                | Self::RotateX
                | Self::RotateY
                | Self::Skew
                | Self::SkewX
                | Self::SkewY
        )
    }

    /// Transform component that needs a perspective wrapper to be visible.
    pub fn is_3d(self) -> bool {
        matches!(self, Self::RotateX | Self::RotateY | Self::TranslateZ)
    }

    /// Member of the composed `filter` descriptor.
    pub fn is_filter(self) -> bool {
        matches!(
            self,
            Self::Blur
                | Self::Brightness
                | Self::Contrast
                | Self::Saturate
                | Self::Grayscale
                | Self::HueRotate
        )
    }

    /// Neutral base assumed for a side that leaves this key undefined.
    ///
    /// Only opacity (100), scale (1) and rotation (0) have one; everything else snaps to the
    /// side that is defined.
    pub fn neutral(self) -> Option<f64> {
        match self {
            Self::Opacity => Some(100.0),
            Self::Scale | Self::ScaleX | Self::ScaleY => Some(1.0),
            Self::Rotate | Self::RotateX | Self::RotateY => Some(0.0),
            _ => None,
        }
    }

    /// Unit used when rendering a bare number.
    pub fn default_unit(self) -> &'static str {
        match self {
            Self::Opacity | Self::Scale | Self::ScaleX | Self::ScaleY => "",
            Self::Rotate
            | Self::RotateX
            | Self::RotateY
            | Self::Skew
            | Self::SkewX
            | Self::SkewY
            | Self::HueRotate => "deg",
            Self::Brightness | Self::Contrast | Self::Saturate | Self::Grayscale => "%",
            Self::BackgroundColor | Self::Color | Self::BorderColor | Self::ShadowColor => "",
            _ => "px",
        }
    }
}

impl fmt::Display for PropertyKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for PropertyKey {
    type Err = PagefxError;

    fn from_str(s: &str) -> PagefxResult<Self> {
        Self::ALL
            .iter()
            .copied()
            .find(|k| k.name() == s)
            .ok_or_else(|| PagefxError::validation(format!("unknown property '{s}'")))
    }
}

/// Authored property value: a bare number or a string such as `"40px"` or `"#ff0000"`.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(untagged)]
pub enum PropertyValue {
    Number(f64),
    Text(String),
}

impl PropertyValue {
    /// Numeric view of this value. Unparseable text reads as `0` with no unit.
    pub fn numeric(&self) -> Numeric {
        match self {
            Self::Number(v) if v.is_finite() => Numeric::new(*v, None),
            Self::Number(_) => Numeric::new(0.0, None),
            Self::Text(s) => Numeric::parse(s),
        }
    }

    /// Raw text, formatting numbers without a unit.
    pub fn as_text(&self) -> String {
        match self {
            Self::Number(v) => format_number(*v),
            Self::Text(s) => s.clone(),
        }
    }
}

impl From<f64> for PropertyValue {
    fn from(value: f64) -> Self {
        Self::Number(value)
    }
}

impl From<&str> for PropertyValue {
    fn from(value: &str) -> Self {
        Self::Text(value.to_owned())
    }
}

impl From<String> for PropertyValue {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

impl From<Numeric> for PropertyValue {
    fn from(value: Numeric) -> Self {
        match value.unit {
            None => Self::Number(value.value),
            Some(unit) => Self::Text(format!("{}{unit}", format_number(value.value))),
        }
    }
}

/// Number plus optional unit suffix.
#[derive(Clone, Debug, PartialEq)]
pub struct Numeric {
    pub value: f64,
    pub unit: Option<String>,
}

impl Numeric {
    pub fn new(value: f64, unit: Option<String>) -> Self {
        Self { value, unit }
    }

    /// Parse `"12.5px"`, `"-3"`, `"1e2%"`. Anything without a leading number is `0`.
    pub fn parse(s: &str) -> Self {
        let s = s.trim();
        let split = numeric_prefix_len(s);
        let value = s[..split].parse::<f64>().ok().filter(|v| v.is_finite());
        match value {
            Some(v) => {
                let unit = s[split..].trim();
                Self::new(v, (!unit.is_empty()).then(|| unit.to_owned()))
            }
            None => Self::new(0.0, None),
        }
    }

    /// Render with the explicit unit, or `fallback_unit` when none was authored.
    pub fn css(&self, fallback_unit: &str) -> String {
        let unit = self.unit.as_deref().unwrap_or(fallback_unit);
        format!("{}{unit}", format_number(self.value))
    }
}

fn numeric_prefix_len(s: &str) -> usize {
    let bytes = s.as_bytes();
    let mut i = 0usize;
    if matches!(bytes.first(), Some(b'+' | b'-')) {
        i += 1;
    }
    let mut seen_digit = false;
    let mut seen_dot = false;
    while i < bytes.len() {
        match bytes[i] {
            b'0'..=b'9' => seen_digit = true,
            b'.' if !seen_dot => seen_dot = true,
            _ => break,
        }
        i += 1;
    }
    if !seen_digit {
        return 0;
    }
    // Exponent only when followed by digits, so `1em` keeps its unit.
    if i + 1 < bytes.len() && matches!(bytes[i], b'e' | b'E') {
        let mut j = i + 1;
        if matches!(bytes[j], b'+' | b'-') {
            j += 1;
        }
        if j < bytes.len() && bytes[j].is_ascii_digit() {
            while j < bytes.len() && bytes[j].is_ascii_digit() {
                j += 1;
            }
            i = j;
        }
    }
    i
}

/// Format a number compactly: integers without a fraction, others with at most 4 decimals.
pub fn format_number(v: f64) -> String {
    if !v.is_finite() {
        return "0".to_owned();
    }
    let rounded = (v * 10_000.0).round() / 10_000.0;
    if rounded == 0.0 {
        return "0".to_owned();
    }
    format!("{rounded}")
}
