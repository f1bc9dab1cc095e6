use std::collections::BTreeMap;
use std::fmt;

/// FieldKey identifies one measurement in a device frame.
/// The numeric position is the field index in the `;`-delimited line
/// (index 0 carries the header/command token).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum FieldKey {
    /// East/west wind component.
    U,
    /// North/south wind component.
    V,
    /// Vertical wind component.
    W,
    /// Ambient temperature.
    T,
}

impl FieldKey {
    /// Returns the canonical label used in diagnostics.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::U => "U",
            Self::V => "V",
            Self::W => "W",
            Self::T => "T",
        }
    }

    /// Field index in one delimited frame.
    pub const fn position(self) -> usize {
        match self {
            Self::U => 1,
            Self::V => 2,
            Self::W => 3,
            Self::T => 4,
        }
    }

    /// Return all field keys in protocol position order.
    pub const fn all() -> &'static [Self] {
        &[Self::U, Self::V, Self::W, Self::T]
    }
}

impl fmt::Display for FieldKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One decoded measurement set from a single frame.
///
/// The parser only ever constructs complete samples — all four keys bound to
/// finite values. [`Sample::from_parts`] can build partial samples for
/// exercising the publisher's missing-field handling.
#[derive(Debug, Clone, PartialEq)]
pub struct Sample {
    values: BTreeMap<FieldKey, f64>,
}

impl Sample {
    /// Build a complete sample from the four field values.
    pub fn new(u: f64, v: f64, w: f64, t: f64) -> Self {
        Self::from_parts([
            (FieldKey::U, u),
            (FieldKey::V, v),
            (FieldKey::W, w),
            (FieldKey::T, t),
        ])
    }

    /// Build a sample from an arbitrary subset of field bindings.
    pub fn from_parts(parts: impl IntoIterator<Item = (FieldKey, f64)>) -> Self {
        Self {
            values: parts.into_iter().collect(),
        }
    }

    /// Value bound to `key`, if present.
    pub fn get(&self, key: FieldKey) -> Option<f64> {
        self.values.get(&key).copied()
    }
}
