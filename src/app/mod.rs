// SPDX-License-Identifier: GPL-3.0-or-later
// src/app/mod.rs
//
// Application layer: display model, reducer and messages.

pub mod message;
pub mod model;
pub mod update;

pub use message::AppMessage;
pub use model::{DisplayModel, DisplayState, SpeedUnit};
