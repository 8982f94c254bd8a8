// SPDX-License-Identifier: GPL-3.0-or-later
// src/app/update.rs
//
// Reducer turning one location update into the next display state.

use crate::app::model::{DisplayState, SpeedUnit};
use crate::domain::location::format::{Axis, format_coordinate, is_accurate, speed_text};
use crate::domain::location::{LocationFix, LocationUpdate, UpdateFlags};

/// Derive the display state for one update from the source.
///
/// Denied permission and a missing fix both yield the unavailable state.
pub fn reduce(update: &LocationUpdate) -> DisplayState {
    if update.flags.permission_denied {
        return DisplayState::unavailable();
    }
    match update.location {
        Some(fix) => reduce_fix(&fix, &update.flags),
        None => DisplayState::unavailable(),
    }
}

/// Derive the display state for a fix.
pub fn reduce_fix(fix: &LocationFix, flags: &UpdateFlags) -> DisplayState {
    let unit = SpeedUnit::KMH;
    let accurate = is_accurate(fix.horizontal_accuracy, flags.accuracy_limited);
    let (speed_value, speed_text) = speed_text(fix.speed, unit.conversion, accurate, flags.stationary);

    DisplayState {
        location_available: true,
        has_accurate_location: accurate,
        speed_unit: unit,
        speed_text,
        speed_value,
        course: fix.course,
        latitude_value: fix.latitude,
        longitude_value: fix.longitude,
        latitude_text: format_coordinate(Axis::Latitude, fix.latitude),
        longitude_text: format_coordinate(Axis::Longitude, fix.longitude),
        horizontal_accuracy: fix.horizontal_accuracy,
        stationary: flags.stationary,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn moving() -> UpdateFlags {
        UpdateFlags::default()
    }

    #[test]
    fn test_accurate_iff_within_hundred_meters() {
        for (h, expected) in [(-1.0, false), (0.0, false), (5.0, true), (100.0, true), (101.0, false)] {
            let fix = LocationFix::new(60.0, 25.0).with_accuracy(h).with_speed(1.0);
            let state = reduce_fix(&fix, &moving());
            assert_eq!(state.has_accurate_location, expected, "accuracy {h}");
            assert!(state.location_available);
        }
    }

    #[test]
    fn test_accuracy_limited_fix() {
        let fix = LocationFix::new(60.0, 25.0).with_accuracy(20.0).with_speed(10.0);
        let flags = UpdateFlags {
            accuracy_limited: true,
            ..UpdateFlags::default()
        };
        let state = reduce_fix(&fix, &flags);
        assert!(!state.has_accurate_location);
        assert_eq!(state.speed_text, " - ");
        assert_eq!(state.speed_value, 0.0);
    }

    #[test]
    fn test_speed_in_kmh() {
        let fix = LocationFix::new(60.0, 25.0).with_accuracy(20.0).with_speed(8.33);
        let state = reduce_fix(&fix, &moving());
        assert_eq!(state.speed_text, "30");
        assert_eq!(state.speed_value, 8.33);
    }

    #[test]
    fn test_stationary_shows_zero() {
        let flags = UpdateFlags {
            stationary: true,
            ..UpdateFlags::default()
        };
        for speed in [-1.0, 3.0, 50.0] {
            let fix = LocationFix::new(60.0, 25.0).with_accuracy(2000.0).with_speed(speed);
            let state = reduce_fix(&fix, &flags);
            assert_eq!(state.speed_text, "0");
            assert!(state.stationary);
        }
    }

    #[test]
    fn test_fields_copied_through() {
        let fix = LocationFix::new(60.0, -25.5)
            .with_accuracy(20.0)
            .with_speed(30.0)
            .with_course(21.3);
        let state = reduce_fix(&fix, &moving());
        assert_eq!(state.course, 21.3);
        assert_eq!(state.horizontal_accuracy, 20.0);
        assert_eq!(state.latitude_text, "N 60° 0.000'");
        assert_eq!(state.longitude_text, "W 25° 30.000'");
        assert_eq!(state.latitude_value, 60.0);
        assert_eq!(state.longitude_value, -25.5);
        assert!(!state.stationary);
    }

    #[test]
    fn test_denied_and_missing_fix_are_unavailable() {
        assert_eq!(reduce(&LocationUpdate::denied()), DisplayState::unavailable());
        assert_eq!(reduce(&LocationUpdate::no_fix()), DisplayState::unavailable());

        // Denial wins even when the platform still attached a fix.
        let mut update = LocationUpdate::fix(LocationFix::new(1.0, 1.0).with_accuracy(5.0), moving());
        update.flags.permission_denied = true;
        let state = reduce(&update);
        assert!(!state.location_available);
        assert!(state.latitude_text.is_empty());
    }
}
