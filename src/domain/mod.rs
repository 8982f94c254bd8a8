// SPDX-License-Identifier: GPL-3.0-or-later
// src/domain/mod.rs
//
// Domain layer: location readings and how they are validated and formatted.

pub mod location;
