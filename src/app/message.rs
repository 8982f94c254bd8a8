// SPDX-License-Identifier: GPL-3.0-or-later
// src/app/message.rs
//
// Application messages: user commands and internal signals.

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppMessage {
    // Location updates.
    StartUpdates,
    StopUpdates,
    ToggleUpdates,

    // Background session.
    ToggleBackgroundActivity,

    // UI refresh.
    RefreshView,

    // Exit.
    Quit,
}
