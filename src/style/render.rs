use std::fmt;

use smallvec::SmallVec;

use crate::foundation::core::clamp01;
use crate::style::bag::PropertyBag;
use crate::style::property::{Numeric, PropertyKey, PropertyValue, format_number};

/// Perspective depth used when a 3-D component is present and no explicit depth is given.
pub const DEFAULT_PERSPECTIVE_PX: f64 = 1000.0;

const DEFAULT_SHADOW_COLOR: &str = "rgba(0, 0, 0, 0.25)";

/// Options for [`to_renderable`].
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RenderOpts {
    /// Perspective depth in px for the wrapper prepended to 3-D transforms.
    pub perspective: f64,
}

impl Default for RenderOpts {
    fn default() -> Self {
        Self {
            perspective: DEFAULT_PERSPECTIVE_PX,
        }
    }
}

/// One transform function inside a [`TransformDescriptor`].
#[derive(Clone, Debug, PartialEq)]
pub struct TransformOp {
    pub key: PropertyKey,
    pub value: Numeric,
}

impl fmt::Display for TransformOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}({})",
            self.key.name(),
            self.value.css(self.key.default_unit())
        )
    }
}

/// Ordered transform: optional perspective, then scale, rotate, translate and skew components.
#[derive(Clone, Debug, PartialEq)]
pub struct TransformDescriptor {
    pub perspective: Option<f64>,
    pub ops: SmallVec<[TransformOp; 8]>,
}

const TRANSFORM_ORDER: [PropertyKey; 12] = [
    PropertyKey::Scale,
    PropertyKey::ScaleX,
    PropertyKey::ScaleY,
    PropertyKey::Rotate,
    PropertyKey::RotateX,
    PropertyKey::RotateY,
    PropertyKey::TranslateX,
    PropertyKey::TranslateY,
    PropertyKey::TranslateZ,
    PropertyKey::Skew,
    PropertyKey::SkewX,
    PropertyKey::SkewY,
];

impl TransformDescriptor {
    /// Gather the transform components of `bag`. `None` when there are none.
    pub fn from_bag(bag: &PropertyBag, perspective: f64) -> Option<Self> {
        let ops: SmallVec<[TransformOp; 8]> = TRANSFORM_ORDER
            .iter()
            .filter_map(|&key| bag.numeric(key).map(|value| TransformOp { key, value }))
            .collect();
        if ops.is_empty() {
            return None;
        }
        let perspective = ops.iter().any(|op| op.key.is_3d()).then_some(perspective);
        Some(Self { perspective, ops })
    }
}

impl fmt::Display for TransformDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        if let Some(p) = self.perspective {
            write!(f, "perspective({}px)", format_number(p))?;
            first = false;
        }
        for op in &self.ops {
            if !first {
                f.write_str(" ")?;
            }
            write!(f, "{op}")?;
            first = false;
        }
        Ok(())
    }
}

/// Ordered filter chain: blur, brightness, contrast, saturate, grayscale, hue-rotate.
#[derive(Clone, Debug, PartialEq)]
pub struct FilterDescriptor {
    pub ops: SmallVec<[(PropertyKey, Numeric); 6]>,
}

const FILTER_ORDER: [PropertyKey; 6] = [
    PropertyKey::Blur,
    PropertyKey::Brightness,
    PropertyKey::Contrast,
    PropertyKey::Saturate,
    PropertyKey::Grayscale,
    PropertyKey::HueRotate,
];

impl FilterDescriptor {
    /// Gather the filter components of `bag`. `None` when no filter property is set.
    pub fn from_bag(bag: &PropertyBag) -> Option<Self> {
        let ops: SmallVec<[(PropertyKey, Numeric); 6]> = FILTER_ORDER
            .iter()
            .filter_map(|&key| bag.numeric(key).map(|v| (key, v)))
            .collect();
        (!ops.is_empty()).then_some(Self { ops })
    }
}

impl fmt::Display for FilterDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, (key, value)) in self.ops.iter().enumerate() {
            if i > 0 {
                f.write_str(" ")?;
            }
            let name = match key {
                PropertyKey::HueRotate => "hue-rotate",
                other => other.name(),
            };
            write!(f, "{name}({})", value.css(key.default_unit()))?;
        }
        Ok(())
    }
}

/// Concrete style ready to be written to a render target.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct RenderableStyle {
    /// CSS opacity in `[0, 1]` (bags carry opacity as a percentage).
    pub opacity: Option<f64>,
    pub transform: Option<TransformDescriptor>,
    pub filter: Option<FilterDescriptor>,
    /// `backdrop-filter: blur(..)`.
    pub backdrop_blur: Option<Numeric>,
    /// Box geometry declarations (`width`, `padding-top`, ...) in declaration order.
    pub box_props: Vec<(&'static str, String)>,
    /// Color declarations in declaration order.
    pub colors: Vec<(&'static str, String)>,
    pub box_shadow: Option<String>,
    pub transform_origin: Option<String>,
    pub will_change: Option<String>,
}

impl RenderableStyle {
    /// `(css-property, value)` pairs in a stable order.
    pub fn declarations(&self) -> Vec<(String, String)> {
        let mut out = Vec::new();
        if let Some(o) = self.opacity {
            out.push(("opacity".to_owned(), format_number(o)));
        }
        if let Some(t) = &self.transform {
            out.push(("transform".to_owned(), t.to_string()));
        }
        if let Some(origin) = &self.transform_origin {
            out.push(("transform-origin".to_owned(), origin.clone()));
        }
        if let Some(fl) = &self.filter {
            out.push(("filter".to_owned(), fl.to_string()));
        }
        if let Some(b) = &self.backdrop_blur {
            out.push(("backdrop-filter".to_owned(), format!("blur({})", b.css("px"))));
        }
        for (name, value) in self.box_props.iter().chain(self.colors.iter()) {
            out.push(((*name).to_owned(), value.clone()));
        }
        if let Some(s) = &self.box_shadow {
            out.push(("box-shadow".to_owned(), s.clone()));
        }
        if let Some(w) = &self.will_change {
            out.push(("will-change".to_owned(), w.clone()));
        }
        out
    }

    /// Names of every CSS property [`RenderableStyle::declarations`] would emit.
    pub fn property_names(&self) -> Vec<String> {
        self.declarations().into_iter().map(|(k, _)| k).collect()
    }
}

fn css_name(key: PropertyKey) -> &'static str {
    match key {
        PropertyKey::Width => "width",
        PropertyKey::Height => "height",
        PropertyKey::BorderWidth => "border-width",
        PropertyKey::BorderRadius => "border-radius",
        PropertyKey::PaddingTop => "padding-top",
        PropertyKey::PaddingRight => "padding-right",
        PropertyKey::PaddingBottom => "padding-bottom",
        PropertyKey::PaddingLeft => "padding-left",
        PropertyKey::MarginTop => "margin-top",
        PropertyKey::MarginRight => "margin-right",
        PropertyKey::MarginBottom => "margin-bottom",
        PropertyKey::MarginLeft => "margin-left",
        PropertyKey::BackgroundColor => "background-color",
        PropertyKey::Color => "color",
        PropertyKey::BorderColor => "border-color",
        other => other.name(),
    }
}

const BOX_KEYS: [PropertyKey; 12] = [
    PropertyKey::Width,
    PropertyKey::Height,
    PropertyKey::BorderWidth,
    PropertyKey::BorderRadius,
    PropertyKey::PaddingTop,
    PropertyKey::PaddingRight,
    PropertyKey::PaddingBottom,
    PropertyKey::PaddingLeft,
    PropertyKey::MarginTop,
    PropertyKey::MarginRight,
    PropertyKey::MarginBottom,
    PropertyKey::MarginLeft,
];

const COLOR_KEYS: [PropertyKey; 3] = [
    PropertyKey::BackgroundColor,
    PropertyKey::Color,
    PropertyKey::BorderColor,
];

const SHADOW_KEYS: [PropertyKey; 5] = [
    PropertyKey::ShadowX,
    PropertyKey::ShadowY,
    PropertyKey::ShadowBlur,
    PropertyKey::ShadowSpread,
    PropertyKey::ShadowColor,
];

/// Materialize a single static state (no interpolation).
pub fn to_renderable(bag: &PropertyBag, opts: RenderOpts) -> RenderableStyle {
    let opacity = bag
        .numeric(PropertyKey::Opacity)
        .map(|n| clamp01(n.value / 100.0));

    let box_props = BOX_KEYS
        .iter()
        .filter_map(|&k| bag.numeric(k).map(|n| (css_name(k), n.css(k.default_unit()))))
        .collect();

    let colors = COLOR_KEYS
        .iter()
        .filter_map(|&k| bag.get(k).map(|v| (css_name(k), v.as_text())))
        .collect();

    let box_shadow = SHADOW_KEYS.iter().any(|k| bag.contains(*k)).then(|| {
        let len = |k: PropertyKey| {
            bag.numeric(k)
                .unwrap_or_else(|| Numeric::new(0.0, None))
                .css("px")
        };
        let color = bag
            .get(PropertyKey::ShadowColor)
            .map(PropertyValue::as_text)
            .unwrap_or_else(|| DEFAULT_SHADOW_COLOR.to_owned());
        format!(
            "{} {} {} {} {color}",
            len(PropertyKey::ShadowX),
            len(PropertyKey::ShadowY),
            len(PropertyKey::ShadowBlur),
            len(PropertyKey::ShadowSpread),
        )
    });

    RenderableStyle {
        opacity,
        transform: TransformDescriptor::from_bag(bag, opts.perspective),
        filter: FilterDescriptor::from_bag(bag),
        backdrop_blur: bag.numeric(PropertyKey::BackdropBlur),
        box_props,
        colors,
        box_shadow,
        transform_origin: None,
        will_change: None,
    }
}
