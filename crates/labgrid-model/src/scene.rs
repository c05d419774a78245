//! Owned scene context tying configuration, labels and filtering together.

use crate::config::GridConfig;
use crate::error::Result;
use crate::filter::{FilterController, Selection};
use crate::grid::{build_grid, Cell};
use crate::input::{FrameInput, InputEvent};
use crate::label::{build_all_labels, AxisLabel};

/// A complete grid scene, independent of any rendering surface.
///
/// Scenes share nothing, so several can run side by side (one per window,
/// or one per test).
#[derive(Debug, Clone)]
pub struct GridScene {
    config: GridConfig,
    labels: Vec<AxisLabel>,
    controller: FilterController,
}

impl GridScene {
    /// Validate `config` and build cells and labels from it.
    pub fn new(config: GridConfig) -> Result<Self> {
        config.validate()?;

        let cells = build_grid(&config.dims, &config.lattice, &config.palette);
        let labels = build_all_labels(&config.dims, &config.lattice, &config.axis_names);
        tracing::info!(
            cells = cells.len(),
            labels = labels.len(),
            "built grid scene"
        );

        Ok(Self {
            config,
            labels,
            controller: FilterController::new(cells),
        })
    }

    /// Apply a decoded input event.
    pub fn handle(&mut self, event: InputEvent) {
        match event {
            InputEvent::LabelPressed { axis, index } => self.controller.select(axis, index),
            InputEvent::DoubleClick => self.controller.reset(),
        }
    }

    /// Apply everything gathered in `frame`, leaving it empty.
    ///
    /// Returns true if any event was applied.
    pub fn apply_frame(&mut self, frame: &mut FrameInput) -> bool {
        let events = frame.take_events();
        for &event in &events {
            self.handle(event);
        }
        !events.is_empty()
    }

    pub fn config(&self) -> &GridConfig {
        &self.config
    }

    pub fn labels(&self) -> &[AxisLabel] {
        &self.labels
    }

    pub fn controller(&self) -> &FilterController {
        &self.controller
    }

    pub fn controller_mut(&mut self) -> &mut FilterController {
        &mut self.controller
    }

    pub fn cells(&self) -> &[Cell] {
        self.controller.cells()
    }

    pub fn selection(&self) -> Selection {
        self.controller.selection()
    }
}
