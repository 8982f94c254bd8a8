// SPDX-License-Identifier: GPL-3.0-or-later
// src/main.rs
//
// Entry point: parse arguments, set up logging, wire source, receiver and app.

use std::path::PathBuf;
use std::sync::Arc;

use clap::Parser;

use speedo::config::{ConfigHandler, Settings};
use speedo::receiver::LocationReceiver;
use speedo::source::{FixedSource, LocationSource, ReplaySource, Scenario};
use speedo::ui::SpeedoApp;

#[derive(Debug, Clone, Parser)]
#[command(name = "speedo", version, about = "Location-derived speed display")]
pub struct Args {
    /// Canned scenario to display.
    #[arg(long, value_enum, conflicts_with = "replay")]
    pub scenario: Option<Scenario>,

    /// Replay recorded updates from a JSON-lines file (`-` reads stdin).
    #[arg(long, value_name = "PATH")]
    pub replay: Option<PathBuf>,

    /// Do not start updates on launch (a previously running session still resumes).
    #[arg(long)]
    pub paused: bool,

    /// Mark a background session as active.
    #[arg(long)]
    pub background: bool,

    /// Directory holding the persisted state instead of the platform default.
    #[arg(long, value_name = "DIR")]
    pub config_dir: Option<PathBuf>,

    /// Enable debug logging.
    #[arg(short, long)]
    pub verbose: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    let default_filter = if args.verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_filter))
        .init();

    let handler = match args.config_dir {
        Some(ref dir) => Some(ConfigHandler::in_dir(dir)),
        None => match ConfigHandler::new() {
            Ok(handler) => Some(handler),
            Err(e) => {
                log::warn!("State will not be persisted: {e}");
                None
            }
        },
    };
    let settings = Arc::new(Settings::load(handler));

    let (source, stdin_taken): (Arc<dyn LocationSource>, bool) = match args.replay {
        Some(path) => {
            let replay = ReplaySource::from_arg(path);
            let stdin_taken = replay.reads_stdin();
            (Arc::new(replay), stdin_taken)
        }
        None => (
            Arc::new(FixedSource::new(args.scenario.unwrap_or_default())),
            false,
        ),
    };

    let receiver = LocationReceiver::new(source, Arc::clone(&settings));
    let mut app = SpeedoApp::init(receiver, settings);

    if args.background {
        app.set_background_activity(true);
    }
    if !args.paused {
        app.receiver.start(&app.model);
    }

    app.run(!stdin_taken).await
}
