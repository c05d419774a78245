//! Single-axis filtering of grid cells.
//!
//! The controller owns the cells and the current [`Selection`]. Every change
//! of selection recomputes the visibility of every cell from scratch, so cell
//! state is always a pure function of the selection and cell coordinates.

use crate::axis::Axis;
use crate::grid::{Cell, CellCoord, Visibility};

/// The active filter criterion.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Selection {
    /// No filter; every cell is fully visible
    #[default]
    None,
    /// Only cells whose coordinate on `axis` equals `index` are fully visible
    Axis { axis: Axis, index: usize },
}

impl Selection {
    /// Visibility a cell at `coord` must have under this selection.
    #[inline]
    pub fn visibility_of(&self, coord: CellCoord) -> Visibility {
        match *self {
            Selection::None => Visibility::FULL,
            Selection::Axis { axis, index } if coord.get(axis) == index => Visibility::FULL,
            Selection::Axis { .. } => Visibility::DIMMED,
        }
    }
}

impl std::fmt::Display for Selection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Selection::None => f.write_str("none"),
            Selection::Axis { axis, index } => write!(f, "{}={}", axis, index),
        }
    }
}

/// Owns the grid cells and applies selections to them.
#[derive(Debug, Clone)]
pub struct FilterController {
    cells: Vec<Cell>,
    selection: Selection,
    revision: u64,
}

impl FilterController {
    /// Take ownership of `cells` with no selection active.
    ///
    /// Cell visibility is normalized to the empty selection.
    pub fn new(cells: Vec<Cell>) -> Self {
        let mut controller = Self {
            cells,
            selection: Selection::None,
            revision: 0,
        };
        controller.recompute();
        controller
    }

    /// Keep only cells on `index` along `axis` at full opacity.
    ///
    /// An index no cell has dims the whole grid.
    pub fn select(&mut self, axis: Axis, index: usize) {
        self.selection = Selection::Axis { axis, index };
        self.recompute();
        self.revision += 1;
        tracing::debug!(
            %axis,
            index,
            visible = self.visible_count(),
            "filtering by axis"
        );
    }

    /// Clear the selection and restore every cell to full opacity.
    pub fn reset(&mut self) {
        self.selection = Selection::None;
        for cell in &mut self.cells {
            cell.visibility = Visibility::FULL;
        }
        self.revision += 1;
        tracing::debug!(visible = self.cells.len(), "selection reset");
    }

    fn recompute(&mut self) {
        let selection = self.selection;
        for cell in &mut self.cells {
            cell.visibility = selection.visibility_of(cell.coord);
        }
    }

    /// All cells in build order.
    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    /// The active selection.
    pub fn selection(&self) -> Selection {
        self.selection
    }

    /// Number of cells at full opacity.
    pub fn visible_count(&self) -> usize {
        self.cells.iter().filter(|c| c.visibility.is_full()).count()
    }

    /// Incremented on every `select` or `reset`.
    ///
    /// Renderers compare this against the revision they last uploaded.
    pub fn revision(&self) -> u64 {
        self.revision
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::color::Palette;
    use crate::grid::{build_grid, GridDims, Lattice};
    use proptest::prelude::*;

    fn controller(a: usize, b: usize, c: usize) -> FilterController {
        FilterController::new(build_grid(
            &GridDims::new(a, b, c),
            &Lattice::new(0.5, 0.8),
            &Palette::default(),
        ))
    }

    fn visibility_set(controller: &FilterController) -> Vec<Visibility> {
        controller.cells().iter().map(|c| c.visibility).collect()
    }

    fn arb_axis() -> impl Strategy<Value = Axis> {
        prop_oneof![Just(Axis::X), Just(Axis::Y), Just(Axis::Z)]
    }

    #[test]
    fn starts_unfiltered() {
        let ctl = controller(3, 3, 3);
        assert_eq!(ctl.selection(), Selection::None);
        assert_eq!(ctl.visible_count(), 27);
        assert_eq!(ctl.revision(), 0);
    }

    #[test]
    fn new_normalizes_stale_visibility() {
        let mut cells = build_grid(&GridDims::new(2, 2, 2), &Lattice::default(), &Palette::default());
        cells[3].visibility = Visibility::DIMMED;
        let ctl = FilterController::new(cells);
        assert_eq!(ctl.visible_count(), 8);
    }

    #[test]
    fn z_slab_stays_visible() {
        let mut ctl = controller(5, 5, 5);
        ctl.select(Axis::Z, 2);

        assert_eq!(ctl.visible_count(), 25);
        let dimmed = ctl
            .cells()
            .iter()
            .filter(|c| c.visibility == Visibility::DIMMED)
            .count();
        assert_eq!(dimmed, 100);
        for cell in ctl.cells() {
            assert_eq!(cell.visibility.is_full(), cell.coord.z == 2);
        }
    }

    #[test]
    fn out_of_range_dims_everything() {
        let mut ctl = controller(5, 5, 5);
        ctl.select(Axis::X, 999);
        assert_eq!(ctl.visible_count(), 0);
        assert!(ctl.cells().iter().all(|c| c.visibility == Visibility::DIMMED));
    }

    #[test]
    fn reset_keeps_transparency_enabled() {
        let mut ctl = controller(2, 2, 2);
        ctl.select(Axis::Y, 0);
        ctl.reset();
        for cell in ctl.cells() {
            assert_eq!(cell.visibility.opacity, 1.0);
            assert!(cell.visibility.transparent);
        }
    }

    #[test]
    fn switching_axis_replaces_previous_filter() {
        let mut ctl = controller(3, 4, 5);
        ctl.select(Axis::X, 1);
        ctl.select(Axis::Y, 3);
        assert_eq!(ctl.selection(), Selection::Axis { axis: Axis::Y, index: 3 });
        assert_eq!(ctl.visible_count(), 3 * 5);
        for cell in ctl.cells() {
            assert_eq!(cell.visibility.is_full(), cell.coord.y == 3);
        }
    }

    #[test]
    fn revision_counts_mutations() {
        let mut ctl = controller(2, 2, 2);
        ctl.select(Axis::X, 0);
        ctl.select(Axis::X, 0);
        ctl.reset();
        assert_eq!(ctl.revision(), 3);
    }

    #[test]
    fn selection_display() {
        assert_eq!(Selection::None.to_string(), "none");
        assert_eq!(Selection::Axis { axis: Axis::Z, index: 4 }.to_string(), "z=4");
    }

    proptest! {
        #[test]
        fn filter_invariant_holds(
            a in 1usize..6,
            b in 1usize..6,
            c in 1usize..6,
            axis in arb_axis(),
            index in 0usize..8,
        ) {
            let mut ctl = controller(a, b, c);
            ctl.select(axis, index);
            for cell in ctl.cells() {
                if cell.coord.get(axis) == index {
                    prop_assert_eq!(cell.visibility.opacity, 1.0);
                } else {
                    prop_assert_eq!(cell.visibility.opacity, 0.3);
                }
            }
        }

        #[test]
        fn reset_restores_after_any_history(
            history in proptest::collection::vec((arb_axis(), 0usize..8), 0..10),
        ) {
            let mut ctl = controller(4, 3, 5);
            for (axis, index) in history {
                ctl.select(axis, index);
            }
            ctl.reset();
            prop_assert_eq!(ctl.selection(), Selection::None);
            prop_assert!(ctl.cells().iter().all(|c| c.visibility == Visibility::FULL));
        }

        #[test]
        fn select_is_idempotent(axis in arb_axis(), index in 0usize..6) {
            let mut once = controller(4, 4, 4);
            once.select(axis, index);

            let mut twice = controller(4, 4, 4);
            twice.select(axis, index);
            twice.select(axis, index);

            prop_assert_eq!(visibility_set(&once), visibility_set(&twice));
        }

        #[test]
        fn visibility_depends_only_on_last_selection(
            history in proptest::collection::vec((arb_axis(), 0usize..6), 0..8),
            axis in arb_axis(),
            index in 0usize..6,
        ) {
            let mut fresh = controller(3, 3, 3);
            fresh.select(axis, index);

            let mut replayed = controller(3, 3, 3);
            for (a, i) in history {
                replayed.select(a, i);
            }
            replayed.select(axis, index);

            prop_assert_eq!(visibility_set(&fresh), visibility_set(&replayed));
        }
    }
}
