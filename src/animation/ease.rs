use std::fmt;

/// Cubic-bezier timing curve with fixed endpoints `(0,0)` and `(1,1)`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CubicBezier {
    /// First control point x, clamped to `[0, 1]`.
    pub x1: f64,
    /// First control point y (may overshoot).
    pub y1: f64,
    /// Second control point x, clamped to `[0, 1]`.
    pub x2: f64,
    /// Second control point y (may overshoot).
    pub y2: f64,
}

impl CubicBezier {
    /// Build a curve; x control values are clamped so the curve stays a function of time.
    pub fn new(x1: f64, y1: f64, x2: f64, y2: f64) -> Self {
        Self {
            x1: x1.clamp(0.0, 1.0),
            y1,
            x2: x2.clamp(0.0, 1.0),
            y2,
        }
    }

    fn coord(t: f64, p1: f64, p2: f64) -> f64 {
        // Bernstein form with p0 = 0, p3 = 1.
        let u = 1.0 - t;
        3.0 * u * u * t * p1 + 3.0 * u * t * t * p2 + t * t * t
    }

    fn coord_derivative(t: f64, p1: f64, p2: f64) -> f64 {
        let u = 1.0 - t;
        3.0 * u * u * p1 + 6.0 * u * t * (p2 - p1) + 3.0 * t * t * (1.0 - p2)
    }

    /// Solve for the curve parameter whose x equals `x`.
    fn solve_t(&self, x: f64) -> f64 {
        let mut t = x;
        for _ in 0..8 {
            let err = Self::coord(t, self.x1, self.x2) - x;
            if err.abs() < 1e-7 {
                return t;
            }
            let d = Self::coord_derivative(t, self.x1, self.x2);
            if d.abs() < 1e-6 {
                break;
            }
            t -= err / d;
        }

        // Newton stalled; fall back to bisection which always converges on a monotonic x(t).
        let (mut lo, mut hi) = (0.0, 1.0);
        t = x;
        for _ in 0..40 {
            let v = Self::coord(t, self.x1, self.x2);
            if (v - x).abs() < 1e-7 {
                break;
            }
            if v < x {
                lo = t;
            } else {
                hi = t;
            }
            t = (lo + hi) / 2.0;
        }
        t
    }

    /// Map time fraction `x` in `[0, 1]` to eased progress.
    pub fn apply(&self, x: f64) -> f64 {
        let x = x.clamp(0.0, 1.0);
        if x == 0.0 || x == 1.0 {
            return x;
        }
        Self::coord(self.solve_t(x), self.y1, self.y2)
    }
}

/// Easing curves known to the catalog.
///
/// Every named entry resolves to [`CubicBezier`] parameters so the same curve can be evaluated
/// here and emitted as a CSS timing function for hosts that animate natively.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Ease {
    Linear,
    Ease,
    EaseIn,
    EaseOut,
    EaseInOut,
    InSine,
    OutSine,
    InOutSine,
    InQuad,
    OutQuad,
    InOutQuad,
    InCubic,
    OutCubic,
    InOutCubic,
    InQuart,
    OutQuart,
    InOutQuart,
    InQuint,
    OutQuint,
    InOutQuint,
    InExpo,
    OutExpo,
    InOutExpo,
    InCirc,
    OutCirc,
    InOutCirc,
    InBack,
    OutBack,
    InOutBack,
    /// Explicit `cubic-bezier(x1, y1, x2, y2)`.
    Custom(CubicBezier),
}

const NAMED: &[(&str, Ease)] = &[
    ("linear", Ease::Linear),
    ("ease", Ease::Ease),
    ("easeIn", Ease::EaseIn),
    ("easeOut", Ease::EaseOut),
    ("easeInOut", Ease::EaseInOut),
    ("easeInSine", Ease::InSine),
    ("easeOutSine", Ease::OutSine),
    ("easeInOutSine", Ease::InOutSine),
    ("easeInQuad", Ease::InQuad),
    ("easeOutQuad", Ease::OutQuad),
    ("easeInOutQuad", Ease::InOutQuad),
    ("easeInCubic", Ease::InCubic),
    ("easeOutCubic", Ease::OutCubic),
    ("easeInOutCubic", Ease::InOutCubic),
    ("easeInQuart", Ease::InQuart),
    ("easeOutQuart", Ease::OutQuart),
    ("easeInOutQuart", Ease::InOutQuart),
    ("easeInQuint", Ease::InQuint),
    ("easeOutQuint", Ease::OutQuint),
    ("easeInOutQuint", Ease::InOutQuint),
    ("easeInExpo", Ease::InExpo),
    ("easeOutExpo", Ease::OutExpo),
    ("easeInOutExpo", Ease::InOutExpo),
    ("easeInCirc", Ease::InCirc),
    ("easeOutCirc", Ease::OutCirc),
    ("easeInOutCirc", Ease::InOutCirc),
    ("easeInBack", Ease::InBack),
    ("easeOutBack", Ease::OutBack),
    ("easeInOutBack", Ease::InOutBack),
];

impl Default for Ease {
    fn default() -> Self {
        Self::Ease
    }
}

impl Ease {
    /// Look up an easing identifier.
    ///
    /// Accepts catalog names (`easeOutCubic`), CSS keywords (`ease-in-out`) and
    /// `cubic-bezier(...)`. Anything else resolves to [`Ease::Linear`].
    pub fn from_name(name: &str) -> Self {
        let trimmed = name.trim();
        if let Some(curve) = parse_cubic_bezier(trimmed) {
            return Self::Custom(curve);
        }

        let wanted = normalize_name(trimmed);
        NAMED
            .iter()
            .find(|(n, _)| normalize_name(n) == wanted)
            .map(|(_, e)| *e)
            .unwrap_or_else(|| {
                tracing::debug!(easing = trimmed, "unknown easing, using linear");
                Self::Linear
            })
    }

    /// Canonical catalog name (or `cubic-bezier(...)` for custom curves).
    pub fn name(self) -> String {
        match self {
            Self::Custom(c) => format!("cubic-bezier({}, {}, {}, {})", c.x1, c.y1, c.x2, c.y2),
            named => NAMED
                .iter()
                .find(|(_, e)| *e == named)
                .map(|(n, _)| (*n).to_owned())
                .unwrap_or_else(|| "linear".to_owned()),
        }
    }

    /// Curve parameters for this easing.
    pub fn params(self) -> CubicBezier {
        match self {
            Self::Linear => CubicBezier::new(0.0, 0.0, 1.0, 1.0),
            Self::Ease => CubicBezier::new(0.25, 0.1, 0.25, 1.0),
            Self::EaseIn => CubicBezier::new(0.42, 0.0, 1.0, 1.0),
            Self::EaseOut => CubicBezier::new(0.0, 0.0, 0.58, 1.0),
            Self::EaseInOut => CubicBezier::new(0.42, 0.0, 0.58, 1.0),
            Self::InSine => CubicBezier::new(0.12, 0.0, 0.39, 0.0),
            Self::OutSine => CubicBezier::new(0.61, 1.0, 0.88, 1.0),
            Self::InOutSine => CubicBezier::new(0.37, 0.0, 0.63, 1.0),
            Self::InQuad => CubicBezier::new(0.11, 0.0, 0.5, 0.0),
            Self::OutQuad => CubicBezier::new(0.5, 1.0, 0.89, 1.0),
            Self::InOutQuad => CubicBezier::new(0.45, 0.0, 0.55, 1.0),
            Self::InCubic => CubicBezier::new(0.32, 0.0, 0.67, 0.0),
            Self::OutCubic => CubicBezier::new(0.33, 1.0, 0.68, 1.0),
            Self::InOutCubic => CubicBezier::new(0.65, 0.0, 0.35, 1.0),
            Self::InQuart => CubicBezier::new(0.5, 0.0, 0.75, 0.0),
            Self::OutQuart => CubicBezier::new(0.25, 1.0, 0.5, 1.0),
            Self::InOutQuart => CubicBezier::new(0.76, 0.0, 0.24, 1.0),
            Self::InQuint => CubicBezier::new(0.64, 0.0, 0.78, 0.0),
            Self::OutQuint => CubicBezier::new(0.22, 1.0, 0.36, 1.0),
            Self::InOutQuint => CubicBezier::new(0.83, 0.0, 0.17, 1.0),
            Self::InExpo => CubicBezier::new(0.7, 0.0, 0.84, 0.0),
            Self::OutExpo => CubicBezier::new(0.16, 1.0, 0.3, 1.0),
            Self::InOutExpo => CubicBezier::new(0.87, 0.0, 0.13, 1.0),
            Self::InCirc => CubicBezier::new(0.55, 0.0, 1.0, 0.45),
            Self::OutCirc => CubicBezier::new(0.0, 0.55, 0.45, 1.0),
            Self::InOutCirc => CubicBezier::new(0.85, 0.0, 0.15, 1.0),
            Self::InBack => CubicBezier::new(0.36, 0.0, 0.66, -0.56),
            Self::OutBack => CubicBezier::new(0.34, 1.56, 0.64, 1.0),
            Self::InOutBack => CubicBezier::new(0.68, -0.6, 0.32, 1.6),
            Self::Custom(c) => c,
        }
    }

    /// Apply this easing function to normalized progress `t` in `[0, 1]`.
    pub fn apply(self, t: f64) -> f64 {
        let t = t.clamp(0.0, 1.0);
        match self {
            Self::Linear => t,
            other => other.params().apply(t),
        }
    }

    /// CSS timing-function string for this curve.
    pub fn css(self) -> String {
        match self {
            Self::Linear => "linear".to_owned(),
            Self::Ease => "ease".to_owned(),
            Self::EaseIn => "ease-in".to_owned(),
            Self::EaseOut => "ease-out".to_owned(),
            Self::EaseInOut => "ease-in-out".to_owned(),
            other => {
                let c = other.params();
                format!("cubic-bezier({}, {}, {}, {})", c.x1, c.y1, c.x2, c.y2)
            }
        }
    }
}

impl fmt::Display for Ease {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name())
    }
}

impl From<String> for Ease {
    fn from(value: String) -> Self {
        Self::from_name(&value)
    }
}

impl From<Ease> for String {
    fn from(value: Ease) -> Self {
        value.name()
    }
}

fn normalize_name(name: &str) -> String {
    name.chars()
        .filter(|c| !matches!(c, '-' | '_' | ' '))
        .map(|c| c.to_ascii_lowercase())
        .collect()
}

fn parse_cubic_bezier(s: &str) -> Option<CubicBezier> {
    let inner = s.strip_prefix("cubic-bezier(")?.strip_suffix(')')?;
    let mut vals = [0.0f64; 4];
    let mut count = 0usize;
    for part in inner.split(',') {
        if count == 4 {
            return None;
        }
        vals[count] = part.trim().parse().ok()?;
        count += 1;
    }
    if count != 4 || vals.iter().any(|v| !v.is_finite()) {
        return None;
    }
    Some(CubicBezier::new(vals[0], vals[1], vals[2], vals[3]))
}
