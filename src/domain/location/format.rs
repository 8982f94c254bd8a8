// SPDX-License-Identifier: GPL-3.0-or-later
// src/domain/location/format.rs
//
// Validation thresholds and text formatting for location values.

use std::fmt;

use crate::constant::{
    ACCURACY_HUNDRED_METERS, ACCURACY_KILOMETER, COURSE_PLACEHOLDER, HEMISPHERE_NONE,
    MINUTES_PER_DEGREE, SPEED_PLACEHOLDER, SPEED_STATIONARY,
};

// =============================================================================
// Accuracy
// =============================================================================

/// Whether a fix is precise enough to trust its speed.
///
/// Accuracy-limited fixes are never accurate; otherwise the radius of
/// uncertainty must be positive and at most a hundred meters.
pub fn is_accurate(horizontal_accuracy: f64, accuracy_limited: bool) -> bool {
    !accuracy_limited && horizontal_accuracy > 0.0 && horizontal_accuracy <= ACCURACY_HUNDRED_METERS
}

/// Qualitative accuracy label shown above the speed.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum AccuracyLabel {
    /// Accuracy unknown (zero or negative radius).
    Low,
    /// Known but inaccurate, or worse than a kilometer.
    VeryLow(f64),
    /// Plain meter value.
    Meters(f64),
}

impl AccuracyLabel {
    pub fn new(horizontal_accuracy: f64, has_accurate_location: bool) -> Self {
        if horizontal_accuracy <= 0.0 {
            Self::Low
        } else if !has_accurate_location || horizontal_accuracy > ACCURACY_KILOMETER {
            Self::VeryLow(horizontal_accuracy)
        } else {
            Self::Meters(horizontal_accuracy)
        }
    }
}

impl fmt::Display for AccuracyLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Low => write!(f, "Low position accuracy"),
            Self::VeryLow(m) => write!(f, "Accuracy {m:.0} m (very low)"),
            Self::Meters(m) => write!(f, "Accuracy {m:.0} m"),
        }
    }
}

// =============================================================================
// Speed / course
// =============================================================================

/// Speed shown to the user: the raw value backing it and its text.
///
/// Stationary wins over everything; a numeric speed is only shown for an
/// accurate fix with a valid (non-negative) speed.
pub fn speed_text(speed_mps: f64, conversion: f64, accurate: bool, stationary: bool) -> (f64, String) {
    if stationary {
        (0.0, SPEED_STATIONARY.to_string())
    } else if accurate && speed_mps >= 0.0 {
        (speed_mps, format!("{:.0}", speed_mps * conversion))
    } else {
        (0.0, SPEED_PLACEHOLDER.to_string())
    }
}

/// Course in whole degrees, or a dash when invalid.
pub fn course_text(course: f64) -> String {
    if course >= 0.0 {
        format!("{course:.0}°")
    } else {
        COURSE_PLACEHOLDER.to_string()
    }
}

// =============================================================================
// Coordinates
// =============================================================================

/// Coordinate axis, which decides the hemisphere letters.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Axis {
    Latitude,
    Longitude,
}

impl Axis {
    /// Hemisphere letters as (negative, positive).
    fn hemispheres(self) -> (&'static str, &'static str) {
        match self {
            Axis::Latitude => ("S", "N"),
            Axis::Longitude => ("W", "E"),
        }
    }
}

/// Format decimal degrees as `"N 60° 9.000'"`.
///
/// Exactly zero gets a blank hemisphere marker.
pub fn format_coordinate(axis: Axis, coordinate: f64) -> String {
    let (negative, positive) = axis.hemispheres();
    let hemisphere = if coordinate == 0.0 {
        HEMISPHERE_NONE
    } else if coordinate > 0.0 {
        positive
    } else {
        negative
    };

    let abs = coordinate.abs();
    let degrees = abs.trunc();
    let minutes = abs.fract() * MINUTES_PER_DEGREE;

    format!("{hemisphere} {degrees:.0}° {minutes:.3}'")
}
