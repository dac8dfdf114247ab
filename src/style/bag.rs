use std::collections::BTreeMap;

use crate::animation::ease::Ease;
use crate::foundation::error::{PagefxError, PagefxResult};
use crate::style::property::{Numeric, PropertyKey, PropertyValue};

/// Sparse map of visual properties.
///
/// Deserializes from a plain JSON object keyed by camelCase property names. Unknown names are
/// dropped (logged at debug level) so records authored for newer property sets still load.
#[derive(Clone, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(
    from = "BTreeMap<String, PropertyValue>",
    into = "BTreeMap<String, PropertyValue>"
)]
pub struct PropertyBag {
    props: BTreeMap<PropertyKey, PropertyValue>,
}

impl PropertyBag {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style insert.
    pub fn with(mut self, key: PropertyKey, value: impl Into<PropertyValue>) -> Self {
        self.insert(key, value);
        self
    }

    pub fn insert(&mut self, key: PropertyKey, value: impl Into<PropertyValue>) {
        self.props.insert(key, value.into());
    }

    pub fn remove(&mut self, key: PropertyKey) -> Option<PropertyValue> {
        self.props.remove(&key)
    }

    pub fn get(&self, key: PropertyKey) -> Option<&PropertyValue> {
        self.props.get(&key)
    }

    /// Numeric view of `key`, if present.
    pub fn numeric(&self, key: PropertyKey) -> Option<Numeric> {
        self.get(key).map(PropertyValue::numeric)
    }

    pub fn contains(&self, key: PropertyKey) -> bool {
        self.props.contains_key(&key)
    }

    pub fn is_empty(&self) -> bool {
        self.props.is_empty()
    }

    pub fn len(&self) -> usize {
        self.props.len()
    }

    /// Iterate in [`PropertyKey`] order.
    pub fn iter(&self) -> impl Iterator<Item = (PropertyKey, &PropertyValue)> {
        self.props.iter().map(|(k, v)| (*k, v))
    }

    pub fn keys(&self) -> impl Iterator<Item = PropertyKey> + '_ {
        self.props.keys().copied()
    }

    /// Return `self` with every entry of `over` written on top.
    pub fn merged(&self, over: &PropertyBag) -> PropertyBag {
        let mut out = self.clone();
        for (k, v) in over.iter() {
            out.props.insert(k, v.clone());
        }
        out
    }
}

impl From<BTreeMap<String, PropertyValue>> for PropertyBag {
    fn from(raw: BTreeMap<String, PropertyValue>) -> Self {
        let mut bag = PropertyBag::new();
        for (name, value) in raw {
            match name.parse::<PropertyKey>() {
                Ok(key) => bag.insert(key, value),
                Err(_) => tracing::debug!(property = %name, "dropping unknown property"),
            }
        }
        bag
    }
}

impl From<PropertyBag> for BTreeMap<String, PropertyValue> {
    fn from(bag: PropertyBag) -> Self {
        bag.props
            .into_iter()
            .map(|(k, v)| (k.name().to_owned(), v))
            .collect()
    }
}

impl FromIterator<(PropertyKey, PropertyValue)> for PropertyBag {
    fn from_iter<I: IntoIterator<Item = (PropertyKey, PropertyValue)>>(iter: I) -> Self {
        Self {
            props: iter.into_iter().collect(),
        }
    }
}

/// One stop on an effect timeline.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Keyframe {
    /// Position along the timeline, `0..=100`.
    pub offset: f64,
    /// Easing toward the next keyframe; the effect easing applies when unset.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub easing: Option<Ease>,
    #[serde(flatten)]
    pub props: PropertyBag,
}

impl Keyframe {
    pub fn new(offset: f64, props: PropertyBag) -> Self {
        Self {
            offset,
            easing: None,
            props,
        }
    }
}

/// Check keyframe invariants.
///
/// Sampling never calls this: out-of-order offsets are tolerated there. Authoring tools call it
/// to surface mistakes early.
pub fn validate_keyframes(keys: &[Keyframe]) -> PagefxResult<()> {
    if let Some(k) = keys
        .iter()
        .find(|k| !k.offset.is_finite() || !(0.0..=100.0).contains(&k.offset))
    {
        return Err(PagefxError::animation(format!(
            "keyframe offset {} must be within 0..=100",
            k.offset
        )));
    }
    if !keys.windows(2).all(|w| w[0].offset <= w[1].offset) {
        return Err(PagefxError::animation(
            "keyframes must be sorted by offset",
        ));
    }
    Ok(())
}
