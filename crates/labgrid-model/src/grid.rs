//! The cube lattice: cell coordinates, world positions and colors.
//!
//! Cells are laid out on a regular lattice centered on the origin. Along an
//! axis of size `n` the cell at index `i` sits at `(i - (n - 1)/2) * spacing`,
//! computed in floating point so even and odd sizes both come out symmetric:
//! the first and last cell on every axis are mirror images through zero.

use crate::axis::Axis;
use crate::color::{Palette, Rgb};
use crate::error::{Error, Result};

/// Opacity of a cell that matches the current selection.
pub const FULL_OPACITY: f32 = 1.0;

/// Opacity of a cell filtered out by the current selection.
pub const DIMMED_OPACITY: f32 = 0.3;

/// Axis sizes of the grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GridDims {
    /// Entries along x
    pub clinics: usize,
    /// Entries along y
    pub lab_areas: usize,
    /// Entries along z
    pub processes: usize,
}

impl GridDims {
    pub const fn new(clinics: usize, lab_areas: usize, processes: usize) -> Self {
        Self {
            clinics,
            lab_areas,
            processes,
        }
    }

    /// Number of entries along `axis`.
    pub const fn size(&self, axis: Axis) -> usize {
        match axis {
            Axis::X => self.clinics,
            Axis::Y => self.lab_areas,
            Axis::Z => self.processes,
        }
    }

    /// Total number of cells in the cross-product.
    pub const fn cell_count(&self) -> usize {
        self.clinics * self.lab_areas * self.processes
    }

    /// Every axis must hold at least one entry.
    pub fn validate(&self) -> Result<()> {
        for axis in Axis::ALL {
            if self.size(axis) == 0 {
                return Err(Error::ZeroAxisSize(axis));
            }
        }
        Ok(())
    }

    /// Iterate every coordinate, x outermost and z innermost.
    pub fn coords(&self) -> impl Iterator<Item = CellCoord> + '_ {
        let dims = *self;
        (0..dims.clinics).flat_map(move |x| {
            (0..dims.lab_areas)
                .flat_map(move |y| (0..dims.processes).map(move |z| CellCoord::new(x, y, z)))
        })
    }
}

impl Default for GridDims {
    fn default() -> Self {
        Self::new(5, 5, 5)
    }
}

/// Cube edge length and center-to-center distance.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Lattice {
    pub cube_size: f32,
    pub spacing: f32,
}

impl Lattice {
    pub const fn new(cube_size: f32, spacing: f32) -> Self {
        Self { cube_size, spacing }
    }

    /// Both lengths must be strictly positive and finite.
    pub fn validate(&self) -> Result<()> {
        positive("cube_size", self.cube_size)?;
        positive("spacing", self.spacing)
    }

    /// World position of a cell.
    pub fn position(&self, dims: &GridDims, coord: CellCoord) -> [f32; 3] {
        [
            lattice_offset(coord.x, dims.clinics, self.spacing),
            lattice_offset(coord.y, dims.lab_areas, self.spacing),
            lattice_offset(coord.z, dims.processes, self.spacing),
        ]
    }
}

impl Default for Lattice {
    fn default() -> Self {
        Self::new(0.5, 0.8)
    }
}

pub(crate) fn positive(field: &'static str, value: f32) -> Result<()> {
    if value > 0.0 && value.is_finite() {
        Ok(())
    } else {
        Err(Error::NonPositive { field, value })
    }
}

/// Offset of index `index` along an axis of `size` entries.
#[inline]
pub fn lattice_offset(index: usize, size: usize, spacing: f32) -> f32 {
    (index as f32 - (size as f32 - 1.0) / 2.0) * spacing
}

/// Integer coordinate of a cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CellCoord {
    pub x: usize,
    pub y: usize,
    pub z: usize,
}

impl CellCoord {
    pub const fn new(x: usize, y: usize, z: usize) -> Self {
        Self { x, y, z }
    }

    /// Coordinate along `axis`.
    #[inline]
    pub const fn get(&self, axis: Axis) -> usize {
        match axis {
            Axis::X => self.x,
            Axis::Y => self.y,
            Axis::Z => self.z,
        }
    }
}

impl std::fmt::Display for CellCoord {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({}, {}, {})", self.x, self.y, self.z)
    }
}

/// Render-facing visibility of a cell.
///
/// The transparency flag stays set at full opacity so the renderer never has
/// to switch a cell between blend states.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Visibility {
    pub opacity: f32,
    pub transparent: bool,
}

impl Visibility {
    pub const FULL: Self = Self {
        opacity: FULL_OPACITY,
        transparent: true,
    };

    pub const DIMMED: Self = Self {
        opacity: DIMMED_OPACITY,
        transparent: true,
    };

    /// Whether this is the full-opacity state.
    pub fn is_full(&self) -> bool {
        self.opacity >= FULL_OPACITY
    }
}

impl Default for Visibility {
    fn default() -> Self {
        Self::FULL
    }
}

/// One cube in the grid.
#[derive(Debug, Clone, PartialEq)]
pub struct Cell {
    pub coord: CellCoord,
    pub position: [f32; 3],
    pub color: Rgb,
    pub visibility: Visibility,
}

/// Build every cell of the grid at full visibility.
///
/// Deterministic in its inputs; color depends only on the z coordinate.
pub fn build_grid(dims: &GridDims, lattice: &Lattice, palette: &Palette) -> Vec<Cell> {
    let mut cells = Vec::with_capacity(dims.cell_count());
    cells.extend(dims.coords().map(|coord| Cell {
        coord,
        position: lattice.position(dims, coord),
        color: palette.color_for(coord.z),
        visibility: Visibility::FULL,
    }));
    cells
}
