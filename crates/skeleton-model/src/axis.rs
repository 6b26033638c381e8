//! Spatial axes and 2D projection pairs.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ModelError;

/// One of the three recorded spatial axes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Axis {
    X,
    Y,
    Z,
}

impl Axis {
    pub const ALL: [Axis; 3] = [Axis::X, Axis::Y, Axis::Z];

    /// Lowercase letter used in column names.
    pub fn as_char(self) -> char {
        match self {
            Axis::X => 'x',
            Axis::Y => 'y',
            Axis::Z => 'z',
        }
    }

    /// Parse a single axis letter (case-insensitive).
    pub fn from_char(c: char) -> Option<Self> {
        match c.to_ascii_lowercase() {
            'x' => Some(Axis::X),
            'y' => Some(Axis::Y),
            'z' => Some(Axis::Z),
            _ => None,
        }
    }
}

impl From<Axis> for char {
    fn from(axis: Axis) -> char {
        axis.as_char()
    }
}

impl fmt::Display for Axis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_char())
    }
}

impl FromStr for Axis {
    type Err = ModelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut chars = s.trim().chars();
        match (chars.next(), chars.next()) {
            (Some(c), None) => Axis::from_char(c),
            _ => None,
        }
        .ok_or_else(|| ModelError::InvalidAxis {
            value: s.to_string(),
        })
    }
}

/// The two axes a 3D recording is projected onto.
///
/// Order matters: `first` feeds the horizontal dimension of every projected
/// point and `second` the vertical one. `(x, z)` gives a sagittal view of a
/// subject walking along x; `(y, z)` a frontal one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct AxisPair {
    pub first: Axis,
    pub second: Axis,
}

impl AxisPair {
    pub const fn new(first: Axis, second: Axis) -> Self {
        Self { first, second }
    }

    /// Both axes, in projection order.
    pub fn axes(&self) -> [Axis; 2] {
        [self.first, self.second]
    }
}

impl Default for AxisPair {
    fn default() -> Self {
        Self::new(Axis::Y, Axis::Z)
    }
}

impl fmt::Display for AxisPair {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.first, self.second)
    }
}

/// Accepts `"xz"`, `"x,z"`, `"x z"` and `"(x, z)"`.
impl FromStr for AxisPair {
    type Err = ModelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let letters: Vec<char> = s
            .chars()
            .filter(|c| !matches!(c, ' ' | ',' | '(' | ')' | '\''))
            .collect();

        let invalid = || ModelError::InvalidAxis {
            value: s.to_string(),
        };

        match letters.as_slice() {
            [a, b] => Ok(Self::new(
                Axis::from_char(*a).ok_or_else(invalid)?,
                Axis::from_char(*b).ok_or_else(invalid)?,
            )),
            _ => Err(invalid()),
        }
    }
}
