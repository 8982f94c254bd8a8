// SPDX-License-Identifier: GPL-3.0-or-later
// src/constant.rs
//
// Application constants that should not be changed by the user.

/// Conversion factor from meters per second to kilometers per hour.
pub const KMH_PER_MPS: f64 = 3.6;

/// Display label of the (only) speed unit.
pub const KMH_LABEL: &str = "km/h";

/// Horizontal accuracy limit in meters for a fix to count as accurate.
pub const ACCURACY_HUNDRED_METERS: f64 = 100.0;

/// Horizontal accuracy in meters above which the accuracy label says "very low".
pub const ACCURACY_KILOMETER: f64 = 1000.0;

/// Minutes per degree (decimal degrees to degrees + decimal minutes).
pub const MINUTES_PER_DEGREE: f64 = 60.0;

/// Speed text shown when no trustworthy speed is known.
pub const SPEED_PLACEHOLDER: &str = " - ";

/// Speed text shown while the device reports being stationary.
pub const SPEED_STATIONARY: &str = "0";

/// Hemisphere marker for a coordinate of exactly zero.
pub const HEMISPHERE_NONE: &str = " ";

/// Course text shown when the course is invalid.
pub const COURSE_PLACEHOLDER: &str = "-";

/// Horizontal accuracy of the unavailable display state (invalid).
pub const ACCURACY_UNKNOWN: f64 = -1.0;

/// Config directory name below the platform config dir.
pub const CONFIG_DIR: &str = "speedo";

/// File name of the persisted state flags.
pub const CONFIG_FILE: &str = "state.json";

/// Version of the persisted config layout.
pub const CONFIG_VERSION: u64 = 1;
