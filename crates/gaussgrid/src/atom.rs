use std::fmt::Display;

use approx::AbsDiffEq;
use serde::{Deserialize, Serialize};

/// A single atom record: an element label and its Cartesian coordinates. The
/// label is taken verbatim from the input and is not checked against the
/// periodic table
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Atom {
    pub element: String,
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl AbsDiffEq for Atom {
    type Epsilon = f64;

    fn default_epsilon() -> Self::Epsilon {
        1e-8
    }

    fn abs_diff_eq(&self, other: &Self, epsilon: Self::Epsilon) -> bool {
        let close = |a: f64, b: f64| (a - b).abs() < epsilon;
        self.element == other.element
            && close(self.x, other.x)
            && close(self.y, other.y)
            && close(self.z, other.z)
    }
}

impl Display for Atom {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{:2} {:15.10} {:15.10} {:15.10}",
            self.element, self.x, self.y, self.z
        )
    }
}

impl Atom {
    pub fn new(element: impl Into<String>, x: f64, y: f64, z: f64) -> Self {
        Self {
            element: element.into(),
            x,
            y,
            z,
        }
    }

    pub fn coord(&self) -> [f64; 3] {
        [self.x, self.y, self.z]
    }

    /// the label used when drawing the atom at position `index` in its
    /// molecule, numbered from 1. `C` at index 0 becomes `C1`
    pub fn label(&self, index: usize) -> String {
        format!("{}{}", self.element, index + 1)
    }
}
