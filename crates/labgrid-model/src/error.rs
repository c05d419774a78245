//! Error types for labgrid-model.

use thiserror::Error;

use crate::axis::Axis;
use crate::color::Rgb;

/// Result type for labgrid-model operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors raised while validating configuration or decoding input.
///
/// Grid building and filtering are total; these only surface at the
/// configuration and click-decoding boundaries.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum Error {
    /// An axis key other than `x`, `y` or `z`.
    #[error("invalid axis: {0:?}")]
    InvalidAxis(String),

    /// A label target that is not of the form `<axis>:<index>`.
    #[error("malformed label target: {0:?}")]
    MalformedTarget(String),

    /// An axis was configured with zero entries.
    #[error("axis {0} must have at least one entry")]
    ZeroAxisSize(Axis),

    /// A length or intensity that must be strictly positive.
    #[error("{field} must be positive, got {value}")]
    NonPositive { field: &'static str, value: f32 },

    /// Fewer palette colors than the grid needs to stay distinguishable.
    #[error("palette needs at least {min} colors, got {0}", min = crate::color::MIN_PALETTE_LEN)]
    PaletteTooSmall(usize),

    /// The same color appears twice in the palette.
    #[error("palette color {0} appears more than once")]
    PaletteDuplicate(Rgb),
}
