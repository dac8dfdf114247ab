use crate::animation::ease::Ease;
use crate::foundation::core::clamp01;
use crate::style::bag::{Keyframe, PropertyBag};
use crate::style::property::{Numeric, PropertyClass, PropertyKey, PropertyValue};

/// Interpolation contract for animatable values.
pub trait Lerp: Sized {
    /// Interpolate from `a` to `b` with normalized factor `t` in `[0, 1]`.
    fn lerp(a: &Self, b: &Self, t: f64) -> Self;
}

impl Lerp for f64 {
    fn lerp(a: &Self, b: &Self, t: f64) -> Self {
        a + (b - a) * t
    }
}

impl Lerp for Numeric {
    fn lerp(a: &Self, b: &Self, t: f64) -> Self {
        Numeric {
            value: f64::lerp(&a.value, &b.value, t),
            unit: b.unit.clone().or_else(|| a.unit.clone()),
        }
    }
}

/// Which property set an interpolation runs over.
///
/// Rich effects animate the full catalog; page interactions use a smaller, style-delta oriented
/// subset. Both go through the same engine.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Profile {
    #[default]
    Effect,
    Interaction,
}

impl Profile {
    /// Whether `key` takes part in interpolation under this profile.
    pub fn admits(self, key: PropertyKey) -> bool {
        match self {
            Self::Effect => true,
            Self::Interaction => matches!(
                key,
                PropertyKey::Opacity
                    | PropertyKey::Scale
                    | PropertyKey::ScaleX
                    | PropertyKey::ScaleY
                    | PropertyKey::TranslateX
                    | PropertyKey::TranslateY
                    | PropertyKey::TranslateZ
                    | PropertyKey::Rotate
                    | PropertyKey::RotateX
                    | PropertyKey::RotateY
                    | PropertyKey::Skew
                    | PropertyKey::SkewX
                    | PropertyKey::SkewY
                    | PropertyKey::Blur
                    | PropertyKey::Brightness
                    | PropertyKey::BorderRadius
                    | PropertyKey::BackgroundColor
                    | PropertyKey::Color
                    | PropertyKey::BorderColor
            ),
        }
    }
}

/// Interpolate two property bags over the full effect profile.
pub fn interpolate(from: &PropertyBag, to: &PropertyBag, progress: f64) -> PropertyBag {
    interpolate_with(Profile::Effect, from, to, progress)
}

/// Interpolate two property bags, restricted to the keys `profile` admits.
///
/// `progress` is clamped to `[0, 1]`. Per key:
/// - numeric on both sides: linear, unit from `to` when it has one, else from `from`;
/// - numeric on one side: the neutral base of opacity/scale/rotate stands in for the missing
///   side; other keys hold the defined value;
/// - color: `from` below the midpoint, `to` from it on, falling back to whichever side exists.
pub fn interpolate_with(
    profile: Profile,
    from: &PropertyBag,
    to: &PropertyBag,
    progress: f64,
) -> PropertyBag {
    let t = clamp01(progress);
    let mut keys: Vec<PropertyKey> = from.keys().chain(to.keys()).collect();
    keys.sort_unstable();
    keys.dedup();

    keys.into_iter()
        .filter(|k| profile.admits(*k))
        .filter_map(|key| blend(key, from.get(key), to.get(key), t).map(|v| (key, v)))
        .collect()
}

fn blend(
    key: PropertyKey,
    from: Option<&PropertyValue>,
    to: Option<&PropertyValue>,
    t: f64,
) -> Option<PropertyValue> {
    match key.class() {
        PropertyClass::Color => {
            let (near, far) = if t < 0.5 { (from, to) } else { (to, from) };
            near.or(far).cloned()
        }
        PropertyClass::Numeric => {
            let (a, b) = match (from.map(PropertyValue::numeric), to.map(PropertyValue::numeric)) {
                (Some(a), Some(b)) => (a, b),
                (None, None) => return None,
                (Some(only), None) | (None, Some(only)) => match key.neutral() {
                    Some(base) => {
                        let base = Numeric::new(base, only.unit.clone());
                        if from.is_some() { (only, base) } else { (base, only) }
                    }
                    None => return Some(only.into()),
                },
            };
            Some(Numeric::lerp(&a, &b, t).into())
        }
    }
}

/// Sample a keyframe timeline at `progress`.
///
/// Offsets are read as ascending percentages without validation. Before the first offset the
/// first keyframe holds, after the last offset the last keyframe holds. Inside a segment the
/// segment's own easing applies, falling back to `ease`.
pub fn sample_keyframes(
    profile: Profile,
    keys: &[Keyframe],
    ease: Ease,
    progress: f64,
) -> PropertyBag {
    let Some(first) = keys.first() else {
        return PropertyBag::new();
    };
    let at = clamp01(progress) * 100.0;

    let idx = keys.partition_point(|k| k.offset <= at);
    if idx == 0 {
        return restrict(profile, &first.props);
    }
    if idx >= keys.len() {
        return restrict(profile, &keys[keys.len() - 1].props);
    }

    let a = &keys[idx - 1];
    let b = &keys[idx];
    let span = b.offset - a.offset;
    if span <= 0.0 {
        return restrict(profile, &a.props);
    }
    let local = (at - a.offset) / span;
    let eased = a.easing.unwrap_or(ease).apply(local);
    interpolate_with(profile, &a.props, &b.props, eased)
}

fn restrict(profile: Profile, bag: &PropertyBag) -> PropertyBag {
    bag.iter()
        .filter(|(k, _)| profile.admits(*k))
        .map(|(k, v)| (k, v.clone()))
        .collect()
}

#[cfg(test)]
#[path = "../../tests/unit/style/interpolate.rs"]
mod tests;
