// SPDX-License-Identifier: GPL-3.0-or-later
// src/domain/location/fix.rs
//
// Raw location readings as delivered by a location source.

/// A single location reading.
///
/// Negative `horizontal_accuracy`, `speed` and `course` values mean the
/// platform could not determine them.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LocationFix {
    /// Latitude in decimal degrees, positive north.
    pub latitude: f64,
    /// Longitude in decimal degrees, positive east.
    pub longitude: f64,
    /// Radius of uncertainty in meters.
    pub horizontal_accuracy: f64,
    /// Ground speed in meters per second.
    pub speed: f64,
    /// Course over ground in degrees from true north.
    pub course: f64,
}

impl LocationFix {
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
            horizontal_accuracy: -1.0,
            speed: -1.0,
            course: -1.0,
        }
    }

    pub fn with_accuracy(mut self, meters: f64) -> Self {
        self.horizontal_accuracy = meters;
        self
    }

    pub fn with_speed(mut self, mps: f64) -> Self {
        self.speed = mps;
        self
    }

    pub fn with_course(mut self, degrees: f64) -> Self {
        self.course = degrees;
        self
    }
}

/// Metadata flags accompanying every update.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct UpdateFlags {
    /// The user has not granted location access.
    pub permission_denied: bool,
    /// Precision is reduced (e.g. approximate location only).
    pub accuracy_limited: bool,
    /// The device reports negligible motion.
    pub stationary: bool,
}

/// One element of a location source's update sequence.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct LocationUpdate {
    /// The fix, if the source had one.
    pub location: Option<LocationFix>,
    pub flags: UpdateFlags,
}

impl LocationUpdate {
    pub fn fix(location: LocationFix, flags: UpdateFlags) -> Self {
        Self {
            location: Some(location),
            flags,
        }
    }

    /// An update without a fix.
    pub fn no_fix() -> Self {
        Self::default()
    }

    /// An update telling that location access was denied.
    pub fn denied() -> Self {
        Self {
            location: None,
            flags: UpdateFlags {
                permission_denied: true,
                ..UpdateFlags::default()
            },
        }
    }
}
