//! Decoding of pointer input into filter commands.
//!
//! This is the one place untrusted data enters the model: label targets come
//! back from the UI layer as strings and are parsed here. Anything malformed
//! is rejected so the caller can log and drop it.

use std::time::{Duration, Instant};

use crate::axis::Axis;
use crate::error::{Error, Result};

/// Longest gap between two presses that still counts as a double-click.
pub const DOUBLE_CLICK_WINDOW: Duration = Duration::from_millis(400);

/// Largest pointer travel, in physical pixels, between the two presses.
pub const DOUBLE_CLICK_RADIUS: f64 = 6.0;

/// A decoded user interaction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputEvent {
    /// Pointer went down on the label for `index` along `axis`
    LabelPressed { axis: Axis, index: usize },
    /// Double-click anywhere in the window
    DoubleClick,
}

/// Parse a `"<axis>:<index>"` label target.
///
/// Only the exact form [`AxisLabel::target`](crate::AxisLabel::target)
/// produces is accepted: a lowercase axis key and unsigned decimal digits,
/// with no whitespace or sign.
pub fn decode_label_target(target: &str) -> Result<InputEvent> {
    let malformed = || Error::MalformedTarget(target.to_string());

    let (key, digits) = target.split_once(':').ok_or_else(malformed)?;
    let axis = Axis::ALL
        .into_iter()
        .find(|axis| axis.key() == key)
        .ok_or_else(|| Error::InvalidAxis(key.to_string()))?;
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return Err(malformed());
    }
    let index = digits.parse::<usize>().map_err(|_| malformed())?;
    Ok(InputEvent::LabelPressed { axis, index })
}

/// Input gathered between two frames, applied together once the frame's
/// label presses are known.
///
/// A double-click always applies after the label presses of the same frame.
/// The second press of a double-click on a label also reaches the label
/// layer, and ordering the reset last keeps the grid unfiltered.
#[derive(Debug, Clone, Default)]
pub struct FrameInput {
    labels: Vec<InputEvent>,
    double_click: bool,
}

impl FrameInput {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a label press from its target string.
    pub fn label_target(&mut self, target: &str) -> Result<()> {
        let event = decode_label_target(target)?;
        self.labels.push(event);
        Ok(())
    }

    /// Record a completed double-click.
    pub fn double_click(&mut self) {
        self.double_click = true;
    }

    pub fn is_empty(&self) -> bool {
        self.labels.is_empty() && !self.double_click
    }

    /// Take the pending events in application order: label presses in the
    /// order they arrived, then at most one double-click.
    pub fn take_events(&mut self) -> Vec<InputEvent> {
        let mut events = std::mem::take(&mut self.labels);
        if std::mem::take(&mut self.double_click) {
            events.push(InputEvent::DoubleClick);
        }
        events
    }
}

/// Turns primary-button presses into double-click events.
///
/// The windowing layer only reports individual presses; this pairs them up.
/// A completed double-click consumes both presses, so a third quick press
/// starts a new pair.
#[derive(Debug, Clone)]
pub struct DoubleClickDetector {
    window: Duration,
    radius: f64,
    last_press: Option<(Instant, (f64, f64))>,
}

impl Default for DoubleClickDetector {
    fn default() -> Self {
        Self::new(DOUBLE_CLICK_WINDOW, DOUBLE_CLICK_RADIUS)
    }
}

impl DoubleClickDetector {
    pub fn new(window: Duration, radius: f64) -> Self {
        Self {
            window,
            radius,
            last_press: None,
        }
    }

    /// Record a press at `position`; returns true if it completes a double-click.
    pub fn press(&mut self, at: Instant, position: (f64, f64)) -> bool {
        if let Some((then, (x, y))) = self.last_press.take() {
            let quick = at.saturating_duration_since(then) <= self.window;
            let near = (position.0 - x).hypot(position.1 - y) <= self.radius;
            if quick && near {
                return true;
            }
        }
        self.last_press = Some((at, position));
        false
    }

    /// Forget any pending first press.
    pub fn clear(&mut self) {
        self.last_press = None;
    }
}
