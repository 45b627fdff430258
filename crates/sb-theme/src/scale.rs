//! Ordered token scales (space, font sizes).
//!
//! A scale is a plain sequence; the index of a value is its step. The space
//! block shows it two ways:
//!
//! ```text
//! labeled:  [0]: 4   [1]: 8   [2]: 16   [3]: 32      (forward)
//! nested:   32 ⊃ 16 ⊃ 8 ⊃ 4                         (reverse, outermost first)
//! ```

use std::fmt;

use serde::{Deserialize, Serialize};

/// A single token value: a pixel number, or a CSS length such as `"1rem"`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ScaleValue {
    Number(f64),
    Text(String),
}

impl ScaleValue {
    /// The value in pixels, when it is a plain number or a `px` length.
    #[must_use]
    pub fn px(&self) -> Option<f64> {
        match self {
            Self::Number(n) => Some(*n),
            Self::Text(s) => s.trim().strip_suffix("px").unwrap_or(s).trim().parse().ok(),
        }
    }
}

impl fmt::Display for ScaleValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Number(n) => write!(f, "{n}"),
            Self::Text(s) => f.write_str(s),
        }
    }
}

impl From<f64> for ScaleValue {
    fn from(n: f64) -> Self {
        Self::Number(n)
    }
}

impl From<u32> for ScaleValue {
    fn from(n: u32) -> Self {
        Self::Number(f64::from(n))
    }
}

impl From<&str> for ScaleValue {
    fn from(s: &str) -> Self {
        Self::Text(s.to_string())
    }
}

/// One labeled step of a scale.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScaleStep {
    pub index: usize,
    pub value: ScaleValue,
}

impl fmt::Display for ScaleStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}]: {}", self.index, self.value)
    }
}

/// An ordered scale of token values.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Scale(Vec<ScaleValue>);

impl Scale {
    #[must_use]
    pub const fn new(values: Vec<ScaleValue>) -> Self {
        Self(values)
    }

    #[must_use]
    pub fn values(&self) -> &[ScaleValue] {
        &self.0
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Each value paired with its zero-based index, forward order.
    #[must_use]
    pub fn labeled(&self) -> Vec<ScaleStep> {
        self.0
            .iter()
            .enumerate()
            .map(|(index, value)| ScaleStep {
                index,
                value: value.clone(),
            })
            .collect()
    }

    /// Values in reverse order: the last (outermost) box first.
    #[must_use]
    pub fn nested(&self) -> Vec<ScaleValue> {
        self.0.iter().rev().cloned().collect()
    }

    /// The last value, which sizes the frame around the nested boxes.
    #[must_use]
    pub fn container(&self) -> Option<&ScaleValue> {
        self.0.last()
    }
}

impl<T: Into<ScaleValue>> FromIterator<T> for Scale {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        Self(iter.into_iter().map(Into::into).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn space() -> Scale {
        [4u32, 8, 16, 32].into_iter().collect()
    }

    #[test]
    fn labeled_is_forward_with_indices() {
        let text: Vec<String> = space().labeled().iter().map(ToString::to_string).collect();
        assert_eq!(text, ["[0]: 4", "[1]: 8", "[2]: 16", "[3]: 32"]);
    }

    #[test]
    fn nested_is_reversed() {
        let nested: Vec<String> = space().nested().iter().map(ToString::to_string).collect();
        assert_eq!(nested, ["32", "16", "8", "4"]);
    }

    #[test]
    fn container_is_last_value() {
        assert_eq!(space().container(), Some(&ScaleValue::Number(32.0)));
        assert_eq!(Scale::default().container(), None);
    }

    #[test]
    fn empty_scale_has_empty_views() {
        let scale = Scale::default();
        assert!(scale.labeled().is_empty());
        assert!(scale.nested().is_empty());
    }

    #[test]
    fn mixed_values_deserialize() {
        let scale: Scale = serde_json::from_str(r#"[0, 4.5, "1rem", "12px"]"#).unwrap();
        let text: Vec<String> = scale.values().iter().map(ToString::to_string).collect();
        assert_eq!(text, ["0", "4.5", "1rem", "12px"]);
        let px: Vec<Option<f64>> = scale.values().iter().map(ScaleValue::px).collect();
        assert_eq!(px, [Some(0.0), Some(4.5), None, Some(12.0)]);
    }

    #[test]
    fn integers_print_without_fraction() {
        assert_eq!(ScaleValue::Number(512.0).to_string(), "512");
    }
}
