use crate::style::bag::PropertyBag;
use crate::style::property::PropertyKey;

/// Named effect preset.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Preset {
    Fade,
    FadeUp,
    FadeDown,
    FadeLeft,
    FadeRight,
    SlideUp,
    SlideDown,
    SlideLeft,
    SlideRight,
    ZoomIn,
    ZoomOut,
    FlipX,
    FlipY,
    Bounce,
    BlurIn,
    RotateIn,
    FadeZoom,
    SlideBlur,
}

const NAMED: &[(&str, Preset)] = &[
    ("fade", Preset::Fade),
    ("fadeUp", Preset::FadeUp),
    ("fadeDown", Preset::FadeDown),
    ("fadeLeft", Preset::FadeLeft),
    ("fadeRight", Preset::FadeRight),
    ("slideUp", Preset::SlideUp),
    ("slideDown", Preset::SlideDown),
    ("slideLeft", Preset::SlideLeft),
    ("slideRight", Preset::SlideRight),
    ("zoomIn", Preset::ZoomIn),
    ("zoomOut", Preset::ZoomOut),
    ("flipX", Preset::FlipX),
    ("flipY", Preset::FlipY),
    ("bounce", Preset::Bounce),
    ("blurIn", Preset::BlurIn),
    ("rotateIn", Preset::RotateIn),
    ("fadeZoom", Preset::FadeZoom),
    ("slideBlur", Preset::SlideBlur),
];

impl Preset {
    /// Look up a preset by name, ignoring case, `-` and `_`.
    pub fn from_name(name: &str) -> Option<Self> {
        let wanted = fold(name);
        NAMED
            .iter()
            .find(|(n, _)| fold(n) == wanted)
            .map(|(_, p)| *p)
    }

    pub fn name(self) -> &'static str {
        NAMED
            .iter()
            .find(|(_, p)| *p == self)
            .map(|(n, _)| *n)
            .unwrap_or("fade")
    }

    /// Default `(from, to)` property bags.
    pub fn endpoints(self) -> (PropertyBag, PropertyBag) {
        use PropertyKey as K;

        let shown = || PropertyBag::new().with(K::Opacity, 100.0);
        match self {
            Self::Fade => (PropertyBag::new().with(K::Opacity, 0.0), shown()),
            Self::FadeUp => fade_from(K::TranslateY, "40px"),
            Self::FadeDown => fade_from(K::TranslateY, "-40px"),
            Self::FadeLeft => fade_from(K::TranslateX, "40px"),
            Self::FadeRight => fade_from(K::TranslateX, "-40px"),
            Self::SlideUp => slide_from(K::TranslateY, "100px"),
            Self::SlideDown => slide_from(K::TranslateY, "-100px"),
            Self::SlideLeft => slide_from(K::TranslateX, "100px"),
            Self::SlideRight => slide_from(K::TranslateX, "-100px"),
            Self::ZoomIn => (
                PropertyBag::new().with(K::Opacity, 0.0).with(K::Scale, 0.8),
                shown().with(K::Scale, 1.0),
            ),
            Self::ZoomOut => (
                PropertyBag::new().with(K::Opacity, 0.0).with(K::Scale, 1.2),
                shown().with(K::Scale, 1.0),
            ),
            Self::FlipX => (
                PropertyBag::new().with(K::Opacity, 0.0).with(K::RotateX, 90.0),
                shown().with(K::RotateX, 0.0),
            ),
            Self::FlipY => (
                PropertyBag::new().with(K::Opacity, 0.0).with(K::RotateY, 90.0),
                shown().with(K::RotateY, 0.0),
            ),
            Self::Bounce => (
                PropertyBag::new()
                    .with(K::Opacity, 0.0)
                    .with(K::Scale, 0.3)
                    .with(K::TranslateY, "-60px"),
                shown().with(K::Scale, 1.0).with(K::TranslateY, "0px"),
            ),
            Self::BlurIn => (
                PropertyBag::new().with(K::Opacity, 0.0).with(K::Blur, "12px"),
                shown().with(K::Blur, "0px"),
            ),
            Self::RotateIn => (
                PropertyBag::new().with(K::Opacity, 0.0).with(K::Rotate, -15.0),
                shown().with(K::Rotate, 0.0),
            ),
            Self::FadeZoom => (
                PropertyBag::new()
                    .with(K::Opacity, 0.0)
                    .with(K::Scale, 0.9)
                    .with(K::TranslateY, "20px"),
                shown().with(K::Scale, 1.0).with(K::TranslateY, "0px"),
            ),
            Self::SlideBlur => (
                PropertyBag::new()
                    .with(K::Opacity, 0.0)
                    .with(K::TranslateY, "60px")
                    .with(K::Blur, "8px"),
                shown().with(K::TranslateY, "0px").with(K::Blur, "0px"),
            ),
        }
    }
}

fn fade_from(axis: PropertyKey, distance: &str) -> (PropertyBag, PropertyBag) {
    (
        PropertyBag::new()
            .with(PropertyKey::Opacity, 0.0)
            .with(axis, distance),
        PropertyBag::new()
            .with(PropertyKey::Opacity, 100.0)
            .with(axis, "0px"),
    )
}

fn slide_from(axis: PropertyKey, distance: &str) -> (PropertyBag, PropertyBag) {
    (
        PropertyBag::new().with(axis, distance),
        PropertyBag::new().with(axis, "0px"),
    )
}

fn fold(name: &str) -> String {
    name.chars()
        .filter(|c| !matches!(c, '-' | '_' | ' '))
        .map(|c| c.to_ascii_lowercase())
        .collect()
}

/// Default `(from, to)` bags for a preset name; unknown names yield two empty (neutral) bags.
pub fn preset_endpoints(name: &str) -> (PropertyBag, PropertyBag) {
    match Preset::from_name(name) {
        Some(p) => p.endpoints(),
        None => {
            tracing::debug!(preset = name, "unknown preset, using neutral endpoints");
            (PropertyBag::new(), PropertyBag::new())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::style::property::PropertyValue;

    #[test]
    fn every_preset_resolves_by_name() {
        for (name, preset) in NAMED {
            assert_eq!(Preset::from_name(name), Some(*preset));
            assert_eq!(preset.name(), *name);
        }
        assert_eq!(Preset::from_name("fade-up"), Some(Preset::FadeUp));
        assert_eq!(Preset::from_name("ZOOM_IN"), Some(Preset::ZoomIn));
    }

    #[test]
    fn presets_share_keys_between_endpoints() {
        for (_, preset) in NAMED {
            let (from, to) = preset.endpoints();
            let a: Vec<_> = from.keys().collect();
            let b: Vec<_> = to.keys().collect();
            assert_eq!(a, b, "{}", preset.name());
        }
    }

    #[test]
    fn fade_up_moves_and_reveals() {
        let (from, to) = Preset::FadeUp.endpoints();
        assert_eq!(from.get(PropertyKey::Opacity), Some(&PropertyValue::Number(0.0)));
        assert_eq!(to.get(PropertyKey::TranslateY), Some(&PropertyValue::Text("0px".into())));
    }

    #[test]
    fn unknown_preset_is_neutral() {
        let (from, to) = preset_endpoints("explode");
        assert!(from.is_empty());
        assert!(to.is_empty());
    }

    #[test]
    fn interaction_profile_admits_every_preset_key() {
        use crate::style::interpolate::Profile;

        for (name, preset) in NAMED {
            let (from, to) = preset.endpoints();
            for key in from.keys().chain(to.keys()) {
                assert!(
                    Profile::Interaction.admits(key),
                    "{name} uses {key:?}, which interactions would drop"
                );
            }
        }
    }
}
