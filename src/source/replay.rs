// SPDX-License-Identifier: GPL-3.0-or-later
// src/source/replay.rs
//
// Replays recorded updates from a JSON-lines file or stdin.

use std::path::PathBuf;
use std::time::Duration;

use futures_util::StreamExt;
use futures_util::stream;
use serde::Deserialize;
use tokio::io::{AsyncBufReadExt, AsyncRead, BufReader, Lines};

use super::{LocationSource, SourceError, SourceResult, UpdateStream};
use crate::domain::location::{LocationFix, LocationUpdate, UpdateFlags};

fn invalid() -> f64 {
    -1.0
}

/// One line of a replay file.
///
/// A record without both coordinates is an update without a fix.
#[derive(Debug, Clone, Deserialize)]
pub struct ReplayRecord {
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    #[serde(default = "invalid")]
    pub accuracy: f64,
    #[serde(default = "invalid")]
    pub speed: f64,
    #[serde(default = "invalid")]
    pub course: f64,
    #[serde(default)]
    pub accuracy_limited: bool,
    #[serde(default)]
    pub stationary: bool,
    #[serde(default)]
    pub denied: bool,
    /// Pause before this record is delivered.
    #[serde(default)]
    pub delay_ms: Option<u64>,
}

impl ReplayRecord {
    pub fn to_update(&self) -> LocationUpdate {
        let location = match (self.latitude, self.longitude) {
            (Some(latitude), Some(longitude)) => Some(LocationFix {
                latitude,
                longitude,
                horizontal_accuracy: self.accuracy,
                speed: self.speed,
                course: self.course,
            }),
            _ => None,
        };

        LocationUpdate {
            location,
            flags: UpdateFlags {
                permission_denied: self.denied,
                accuracy_limited: self.accuracy_limited,
                stationary: self.stationary,
            },
        }
    }
}

/// Parse one replay line. Blank lines and `#` comments yield `None`.
pub fn parse_line(line: &str, line_no: u64) -> SourceResult<Option<ReplayRecord>> {
    let trimmed = line.trim();
    if trimmed.is_empty() || trimmed.starts_with('#') {
        return Ok(None);
    }
    serde_json::from_str(trimmed)
        .map(Some)
        .map_err(|source| SourceError::Parse {
            line: line_no,
            source,
        })
}

type Reader = Box<dyn AsyncRead + Unpin + Send>;

enum ReplayState {
    Closed(Option<PathBuf>),
    Reading { lines: Lines<BufReader<Reader>>, line_no: u64 },
    Done,
}

/// Source reading recorded updates; `None` reads stdin.
#[derive(Debug, Clone, Default)]
pub struct ReplaySource {
    path: Option<PathBuf>,
}

impl ReplaySource {
    pub fn new(path: Option<PathBuf>) -> Self {
        Self { path }
    }

    /// Interpret a command line argument, where `-` means stdin.
    pub fn from_arg(arg: PathBuf) -> Self {
        if arg.as_os_str() == "-" {
            Self::new(None)
        } else {
            Self::new(Some(arg))
        }
    }

    pub fn reads_stdin(&self) -> bool {
        self.path.is_none()
    }
}

async fn open(path: Option<PathBuf>) -> SourceResult<Reader> {
    match path {
        Some(path) => {
            log::info!("Replaying location updates from {}", path.display());
            let file = tokio::fs::File::open(&path).await?;
            Ok(Box::new(file))
        }
        None => {
            log::info!("Replaying location updates from stdin");
            Ok(Box::new(tokio::io::stdin()))
        }
    }
}

async fn next_record(state: ReplayState) -> Option<(SourceResult<LocationUpdate>, ReplayState)> {
    let (mut lines, mut line_no) = match state {
        ReplayState::Done => return None,
        ReplayState::Reading { lines, line_no } => (lines, line_no),
        ReplayState::Closed(path) => match open(path).await {
            Ok(reader) => (BufReader::new(reader).lines(), 0),
            Err(e) => return Some((Err(e), ReplayState::Done)),
        },
    };

    loop {
        let line = match lines.next_line().await {
            Ok(Some(line)) => line,
            Ok(None) => return None,
            Err(e) => return Some((Err(e.into()), ReplayState::Done)),
        };
        line_no += 1;

        match parse_line(&line, line_no) {
            Ok(None) => continue,
            Ok(Some(record)) => {
                if let Some(ms) = record.delay_ms {
                    tokio::time::sleep(Duration::from_millis(ms)).await;
                }
                return Some((Ok(record.to_update()), ReplayState::Reading { lines, line_no }));
            }
            Err(e) => return Some((Err(e), ReplayState::Done)),
        }
    }
}

impl LocationSource for ReplaySource {
    fn live_updates(&self) -> UpdateStream {
        stream::unfold(ReplayState::Closed(self.path.clone()), next_record).boxed()
    }
}
