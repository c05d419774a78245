//! The three categorical axes of the grid.
//!
//! x indexes clinics, y indexes lab areas and z indexes processes. Axes are
//! addressed externally by their lowercase key, which is what label click
//! targets carry.

use std::str::FromStr;

use crate::error::Error;

/// One of the three grid dimensions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum Axis {
    /// Clinics
    X,
    /// Lab areas
    Y,
    /// Processes
    Z,
}

impl Axis {
    /// All axes in x, y, z order.
    pub const ALL: [Self; 3] = [Self::X, Self::Y, Self::Z];

    /// Lowercase key used in label targets.
    pub const fn key(self) -> &'static str {
        match self {
            Self::X => "x",
            Self::Y => "y",
            Self::Z => "z",
        }
    }

    /// Position of this axis in an `[x, y, z]` triple.
    pub const fn slot(self) -> usize {
        match self {
            Self::X => 0,
            Self::Y => 1,
            Self::Z => 2,
        }
    }
}

impl FromStr for Axis {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "x" | "X" => Ok(Self::X),
            "y" | "Y" => Ok(Self::Y),
            "z" | "Z" => Ok(Self::Z),
            other => Err(Error::InvalidAxis(other.to_string())),
        }
    }
}

impl std::fmt::Display for Axis {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.key())
    }
}

/// Display names used for label text, one per axis.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AxisNames {
    pub x: String,
    pub y: String,
    pub z: String,
}

impl AxisNames {
    /// Name shown on labels along `axis`.
    pub fn get(&self, axis: Axis) -> &str {
        match axis {
            Axis::X => &self.x,
            Axis::Y => &self.y,
            Axis::Z => &self.z,
        }
    }
}

impl Default for AxisNames {
    fn default() -> Self {
        Self {
            x: "Clinic".to_string(),
            y: "Lab".to_string(),
            z: "Process".to_string(),
        }
    }
}
