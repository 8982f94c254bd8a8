// SPDX-License-Identifier: GPL-3.0-or-later
// src/ui/app.rs
//
// Terminal application wiring and main app struct.

use std::io::Write;
use std::sync::Arc;

use tokio::io::{AsyncBufReadExt, BufReader, Lines, Stdin};

use super::view;
use crate::app::message::AppMessage;
use crate::app::model::{DisplayModel, DisplayState};
use crate::config::Settings;
use crate::receiver::LocationReceiver;

/// Marker for an active background session.
#[derive(Debug)]
pub struct BackgroundSession;

impl BackgroundSession {
    fn begin() -> Self {
        log::info!("Background session active");
        Self
    }
}

impl Drop for BackgroundSession {
    fn drop(&mut self) {
        log::info!("Background session ended");
    }
}

/// Main application type.
pub struct SpeedoApp {
    pub model: Arc<DisplayModel>,
    pub receiver: LocationReceiver,
    pub settings: Arc<Settings>,
    background: Option<BackgroundSession>,
}

impl SpeedoApp {
    /// Build the app and restore what was running before the last exit.
    ///
    /// Must be called from within a tokio runtime.
    pub fn init(receiver: LocationReceiver, settings: Arc<Settings>) -> Self {
        let config = settings.get();
        let model = Arc::new(DisplayModel::new());
        receiver.attach(&model);

        let mut app = Self {
            model,
            receiver,
            settings,
            background: None,
        };

        // If location updates were previously active, restart them.
        if config.updates_started {
            log::info!("Resuming location updates from previous session");
            app.receiver.start_updates();
        }
        // Likewise re-establish a previously active background session.
        if config.background_activity {
            app.background = Some(BackgroundSession::begin());
        }
        app
    }

    /// Apply one message. Returns false when the app should exit.
    pub fn update(&mut self, message: AppMessage) -> bool {
        match message {
            AppMessage::StartUpdates => self.receiver.start(&self.model),
            AppMessage::StopUpdates => self.receiver.stop(),
            AppMessage::ToggleUpdates => self.receiver.toggle(&self.model),
            AppMessage::ToggleBackgroundActivity => {
                let active = !self.background_activity();
                self.set_background_activity(active);
            }
            AppMessage::RefreshView => self.render(&self.model.current()),
            AppMessage::Quit => return false,
        }
        true
    }

    pub fn background_activity(&self) -> bool {
        self.background.is_some()
    }

    pub fn set_background_activity(&mut self, active: bool) {
        if active && self.background.is_none() {
            self.background = Some(BackgroundSession::begin());
        } else if !active {
            self.background = None;
        }
        self.settings.set_background_activity(active);
    }

    /// Render on every display change and handle commands until quit.
    ///
    /// With `read_commands` false stdin is left alone (e.g. when it carries
    /// replayed updates) and only Ctrl-C ends the loop.
    pub async fn run(mut self, read_commands: bool) -> anyhow::Result<()> {
        let mut states = self.model.watch();
        let mut commands = read_commands.then(|| BufReader::new(tokio::io::stdin()).lines());

        self.render(&states.borrow_and_update().clone());
        if read_commands {
            log::info!("Commands: t toggle, s start, p stop, b background, r refresh, q quit");
        }

        loop {
            tokio::select! {
                changed = states.changed() => {
                    if changed.is_err() {
                        break;
                    }
                    let state = states.borrow_and_update().clone();
                    self.render(&state);
                }
                line = next_command(&mut commands) => {
                    match line? {
                        Some(line) => {
                            if let Some(message) = handle_command(&line)
                                && !self.update(message)
                            {
                                break;
                            }
                        }
                        None => commands = None,
                    }
                }
                signal = tokio::signal::ctrl_c() => {
                    signal?;
                    break;
                }
            }
        }

        log::info!("Exiting");
        Ok(())
    }

    fn render(&self, state: &DisplayState) {
        let mut out = std::io::stdout().lock();
        for line in view::view(state) {
            let _ = writeln!(out, "{line}");
        }
        let _ = writeln!(out);
        let _ = out.flush();
    }
}

async fn next_command(commands: &mut Option<Lines<BufReader<Stdin>>>) -> std::io::Result<Option<String>> {
    match commands {
        Some(lines) => lines.next_line().await,
        None => std::future::pending().await,
    }
}

/// Map a typed command into a high-level application message.
pub fn handle_command(line: &str) -> Option<AppMessage> {
    match line.trim().to_ascii_lowercase().as_str() {
        "t" | "toggle" => Some(AppMessage::ToggleUpdates),
        "s" | "start" => Some(AppMessage::StartUpdates),
        "p" | "stop" => Some(AppMessage::StopUpdates),
        "b" | "background" => Some(AppMessage::ToggleBackgroundActivity),
        "r" | "refresh" => Some(AppMessage::RefreshView),
        "q" | "quit" => Some(AppMessage::Quit),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::location::LocationUpdate;
    use crate::receiver::SubscriptionState;
    use crate::source::{PushHandle, PushSource};

    fn app_with(settings: Settings) -> (SpeedoApp, PushHandle) {
        let (source, handle) = PushSource::new();
        let settings = Arc::new(settings);
        let receiver = LocationReceiver::new(Arc::new(source), Arc::clone(&settings));
        (SpeedoApp::init(receiver, settings), handle)
    }

    #[test]
    fn test_handle_command() {
        assert_eq!(handle_command("t"), Some(AppMessage::ToggleUpdates));
        assert_eq!(handle_command(" Stop \n"), Some(AppMessage::StopUpdates));
        assert_eq!(handle_command("q"), Some(AppMessage::Quit));
        assert_eq!(handle_command("x"), None);
    }

    #[tokio::test]
    async fn test_fresh_start_is_idle() {
        let (app, handle) = app_with(Settings::in_memory());
        assert_eq!(app.receiver.state(), SubscriptionState::Idle);
        assert!(!app.background_activity());
        assert_eq!(handle.subscriptions(), 0);
        assert_eq!(app.receiver.observer_count(), 1);
    }

    #[tokio::test]
    async fn test_resumes_persisted_state() {
        let settings = Settings::in_memory();
        settings.set_updates_started(true);
        settings.set_background_activity(true);

        let (app, handle) = app_with(settings);
        assert_eq!(app.receiver.state(), SubscriptionState::Running);
        assert!(app.background_activity());
        assert_eq!(handle.subscriptions(), 1);
    }

    #[tokio::test]
    async fn test_messages_drive_receiver() {
        let (mut app, handle) = app_with(Settings::in_memory());

        assert!(app.update(AppMessage::StartUpdates));
        assert!(app.update(AppMessage::StartUpdates));
        assert_eq!(handle.subscriptions(), 1);
        assert!(app.settings.get().updates_started);

        assert!(app.update(AppMessage::ToggleUpdates));
        assert_eq!(app.receiver.state(), SubscriptionState::Idle);
        assert!(!app.model.current().location_available);

        assert!(app.update(AppMessage::ToggleUpdates));
        assert_eq!(app.receiver.state(), SubscriptionState::Running);
        assert!(handle.push(LocationUpdate::no_fix()));

        assert!(!app.update(AppMessage::Quit));
    }

    #[tokio::test]
    async fn test_background_toggle_persists() {
        let (mut app, _handle) = app_with(Settings::in_memory());
        app.update(AppMessage::ToggleBackgroundActivity);
        assert!(app.background_activity());
        assert!(app.settings.get().background_activity);

        app.update(AppMessage::ToggleBackgroundActivity);
        assert!(!app.background_activity());
        assert!(!app.settings.get().background_activity);
    }
}
