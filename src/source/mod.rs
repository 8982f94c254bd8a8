// SPDX-License-Identifier: GPL-3.0-or-later
// src/source/mod.rs
//
// Location sources: anything that can produce a live sequence of updates.

pub mod fixed;
pub mod push;
pub mod replay;

use futures_util::stream::BoxStream;
use thiserror::Error;

use crate::domain::location::LocationUpdate;

pub use fixed::{FixedSource, Scenario};
pub use push::{PushHandle, PushSource};
pub use replay::ReplaySource;

/// Failure of a running update stream. Terminates the subscription.
#[derive(Debug, Error)]
pub enum SourceError {
    #[error("location updates failed: {0}")]
    Failed(String),

    #[error("failed to read location updates: {0}")]
    Io(#[from] std::io::Error),

    #[error("invalid location update on line {line}: {source}")]
    Parse {
        line: u64,
        #[source]
        source: serde_json::Error,
    },
}

pub type SourceResult<T> = Result<T, SourceError>;

/// Live update sequence handed out by a source.
pub type UpdateStream = BoxStream<'static, SourceResult<LocationUpdate>>;

/// Platform capability delivering location updates.
pub trait LocationSource: Send + Sync {
    /// Begin a new subscription.
    ///
    /// Dropping the returned stream ends the subscription.
    fn live_updates(&self) -> UpdateStream;
}
