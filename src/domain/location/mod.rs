// SPDX-License-Identifier: GPL-3.0-or-later
// src/domain/location/mod.rs
//
// Location domain module root.

pub mod fix;
pub mod format;

pub use fix::{LocationFix, LocationUpdate, UpdateFlags};
pub use format::{AccuracyLabel, Axis};
