// SPDX-License-Identifier: GPL-3.0-or-later
// src/ui/mod.rs
//
// Terminal view layer.

pub mod app;
pub mod view;

pub use app::SpeedoApp;
