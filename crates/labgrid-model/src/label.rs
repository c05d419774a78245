//! Axis labels: click targets anchored just outside the grid.
//!
//! Labels along an axis run parallel to the display row through cell
//! (0, 0, 0), pushed [`LABEL_OFFSET_FACTOR`] cube lengths past the grid edge
//! on one orthogonal axis:
//!
//! | labeled axis | pushed along |
//! |--------------|--------------|
//! | x (clinics)  | -z           |
//! | y (labs)     | -x           |
//! | z (process)  | -y           |
//!
//! Label text counts from 1, the `index` counts from 0 and is what filtering
//! compares against cell coordinates.

use crate::axis::{Axis, AxisNames};
use crate::grid::{lattice_offset, GridDims, Lattice};

/// Distance past the grid edge, in cube lengths.
pub const LABEL_OFFSET_FACTOR: f32 = 1.5;

/// A clickable label for one index along one axis.
#[derive(Debug, Clone, PartialEq)]
pub struct AxisLabel {
    pub axis: Axis,
    /// Zero-based coordinate this label selects.
    pub index: usize,
    /// One-based display text, e.g. `"Clinic 1"` for index 0.
    pub text: String,
    /// World-space anchor.
    pub anchor: [f32; 3],
}

impl AxisLabel {
    /// Click target handed to the input decoder, `"<axis>:<index>"`.
    pub fn target(&self) -> String {
        format!("{}:{}", self.axis.key(), self.index)
    }
}

/// Axis along which labels for `axis` are pushed off the grid.
const fn pushed_axis(axis: Axis) -> Axis {
    match axis {
        Axis::X => Axis::Z,
        Axis::Y => Axis::X,
        Axis::Z => Axis::Y,
    }
}

/// Anchor of label `index` along `axis`.
pub fn label_anchor(axis: Axis, index: usize, dims: &GridDims, lattice: &Lattice) -> [f32; 3] {
    let mut anchor = [0.0; 3];
    for a in Axis::ALL {
        let i = if a == axis { index } else { 0 };
        anchor[a.slot()] = lattice_offset(i, dims.size(a), lattice.spacing);
    }
    anchor[pushed_axis(axis).slot()] -= lattice.cube_size * LABEL_OFFSET_FACTOR;
    anchor
}

/// Build `count` labels along `axis`.
pub fn build_axis_labels(
    axis: Axis,
    count: usize,
    dims: &GridDims,
    lattice: &Lattice,
    names: &AxisNames,
) -> Vec<AxisLabel> {
    let name = names.get(axis);
    (0..count)
        .map(|index| AxisLabel {
            axis,
            index,
            text: format!("{} {}", name, index + 1),
            anchor: label_anchor(axis, index, dims, lattice),
        })
        .collect()
}

/// Labels for every index of every axis, x first.
pub fn build_all_labels(dims: &GridDims, lattice: &Lattice, names: &AxisNames) -> Vec<AxisLabel> {
    Axis::ALL
        .iter()
        .flat_map(|&axis| build_axis_labels(axis, dims.size(axis), dims, lattice, names))
        .collect()
}
