//! Labgrid Model
//!
//! A static 3D grid of cubes spanning three categorical dimensions
//! (clinics × lab areas × processes), with single-axis filtering.
//!
//! # Structure
//!
//! - **Grid**: every (x, y, z) triple becomes a [`Cell`] with a lattice
//!   position centered on the origin and a color picked by its process (z)
//!   coordinate.
//! - **Labels**: one [`AxisLabel`] per index per axis, anchored just outside
//!   the grid. Label text is 1-based, the label index is 0-based.
//! - **Filtering**: [`FilterController`] holds the single active
//!   [`Selection`]. Selecting `(axis, index)` dims every cell whose coordinate
//!   on `axis` differs; resetting restores every cell.
//!
//! Nothing in this crate knows about rendering. A renderer reads
//! [`GridScene::cells`] and re-uploads whenever
//! [`FilterController::revision`] moves.

mod axis;
mod color;
mod config;
mod error;
mod filter;
mod grid;
mod input;
mod label;
mod scene;

pub use axis::{Axis, AxisNames};
pub use color::{Palette, Rgb, MIN_PALETTE_LEN};
pub use config::GridConfig;
pub use error::{Error, Result};
pub use filter::{FilterController, Selection};
pub use grid::{
    build_grid, lattice_offset, Cell, CellCoord, GridDims, Lattice, Visibility, DIMMED_OPACITY,
    FULL_OPACITY,
};
pub use input::{
    decode_label_target, DoubleClickDetector, FrameInput, InputEvent, DOUBLE_CLICK_RADIUS,
    DOUBLE_CLICK_WINDOW,
};
pub use label::{build_all_labels, build_axis_labels, label_anchor, AxisLabel, LABEL_OFFSET_FACTOR};
pub use scene::GridScene;

// Dimmed cells must stay visible but distinguishable
const _: () = assert!(DIMMED_OPACITY > 0.0 && DIMMED_OPACITY < FULL_OPACITY);
