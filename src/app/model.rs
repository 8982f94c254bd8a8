// SPDX-License-Identifier: GPL-3.0-or-later
// src/app/model.rs
//
// Display state and the observable holder the view layer watches.

use tokio::sync::watch;

use crate::constant::{ACCURACY_UNKNOWN, KMH_LABEL, KMH_PER_MPS, SPEED_PLACEHOLDER};
use crate::domain::location::AccuracyLabel;
use crate::domain::location::format::course_text;

// =============================================================================
// Speed unit
// =============================================================================

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpeedUnit {
    pub label: &'static str,
    /// Factor from meters per second to this unit.
    pub conversion: f64,
}

impl SpeedUnit {
    pub const KMH: SpeedUnit = SpeedUnit {
        label: KMH_LABEL,
        conversion: KMH_PER_MPS,
    };
}

impl Default for SpeedUnit {
    fn default() -> Self {
        Self::KMH
    }
}

// =============================================================================
// Display state
// =============================================================================

/// Display-ready values derived from the latest location update.
#[derive(Debug, Clone, PartialEq)]
pub struct DisplayState {
    pub location_available: bool,
    pub has_accurate_location: bool,
    pub speed_unit: SpeedUnit,
    pub speed_text: String,
    /// Raw speed in m/s backing a numeric `speed_text`, otherwise 0.
    pub speed_value: f64,
    pub course: f64,
    pub latitude_value: f64,
    pub longitude_value: f64,
    pub latitude_text: String,
    pub longitude_text: String,
    pub horizontal_accuracy: f64,
    pub stationary: bool,
}

impl DisplayState {
    /// The fixed state shown whenever no location is available.
    pub fn unavailable() -> Self {
        Self {
            location_available: false,
            has_accurate_location: false,
            speed_unit: SpeedUnit::KMH,
            speed_text: SPEED_PLACEHOLDER.to_string(),
            speed_value: 0.0,
            course: 0.0,
            latitude_value: 0.0,
            longitude_value: 0.0,
            latitude_text: String::new(),
            longitude_text: String::new(),
            horizontal_accuracy: ACCURACY_UNKNOWN,
            stationary: true,
        }
    }

    pub fn accuracy_label(&self) -> AccuracyLabel {
        AccuracyLabel::new(self.horizontal_accuracy, self.has_accurate_location)
    }

    pub fn course_text(&self) -> String {
        course_text(self.course)
    }
}

impl Default for DisplayState {
    fn default() -> Self {
        Self::unavailable()
    }
}

// =============================================================================
// Model
// =============================================================================

/// Holder of the latest display state.
///
/// Observers get the latest value pushed whenever it changes.
#[derive(Debug)]
pub struct DisplayModel {
    state: watch::Sender<DisplayState>,
}

impl DisplayModel {
    pub fn new() -> Self {
        let (state, _) = watch::channel(DisplayState::unavailable());
        Self { state }
    }

    /// Snapshot of the current state.
    pub fn current(&self) -> DisplayState {
        self.state.borrow().clone()
    }

    /// Receiver that is notified on every change.
    pub fn watch(&self) -> watch::Receiver<DisplayState> {
        self.state.subscribe()
    }

    /// Replace the state; observers are only woken when it actually changed.
    pub fn publish(&self, next: DisplayState) {
        self.state.send_if_modified(|current| {
            if *current == next {
                false
            } else {
                *current = next;
                true
            }
        });
    }

    pub fn reset(&self) {
        self.publish(DisplayState::unavailable());
    }
}

impl Default for DisplayModel {
    fn default() -> Self {
        Self::new()
    }
}
