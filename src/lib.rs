// SPDX-License-Identifier: GPL-3.0-or-later
// src/lib.rs
//
// Location-derived speed display: sources, reducer, subscription lifecycle
// and a terminal view.

pub mod app;
pub mod config;
pub mod constant;
pub mod domain;
pub mod receiver;
pub mod source;
pub mod ui;
