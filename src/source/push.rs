// SPDX-License-Identifier: GPL-3.0-or-later
// src/source/push.rs
//
// Source fed by the host: platform glue pushes updates through a handle.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex, PoisonError};

use futures_util::StreamExt;
use futures_util::stream;
use tokio::sync::mpsc;

use super::{LocationSource, SourceError, SourceResult, UpdateStream};
use crate::domain::location::LocationUpdate;

type Sender = mpsc::UnboundedSender<SourceResult<LocationUpdate>>;

#[derive(Debug, Default)]
struct Shared {
    /// Sender of the most recent subscription.
    current: Mutex<Option<Sender>>,
    subscriptions: AtomicUsize,
}

impl Shared {
    fn send(&self, item: SourceResult<LocationUpdate>) -> bool {
        let current = self.current.lock().unwrap_or_else(PoisonError::into_inner);
        match current.as_ref() {
            Some(tx) => tx.send(item).is_ok(),
            None => false,
        }
    }
}

/// Location source whose updates come from a [`PushHandle`].
#[derive(Debug)]
pub struct PushSource {
    shared: Arc<Shared>,
}

/// Sending side of a [`PushSource`].
#[derive(Debug, Clone)]
pub struct PushHandle {
    shared: Arc<Shared>,
}

impl PushSource {
    pub fn new() -> (Self, PushHandle) {
        let shared = Arc::new(Shared::default());
        (
            Self {
                shared: Arc::clone(&shared),
            },
            PushHandle { shared },
        )
    }
}

impl LocationSource for PushSource {
    fn live_updates(&self) -> UpdateStream {
        let (tx, rx) = mpsc::unbounded_channel();
        *self.shared.current.lock().unwrap_or_else(PoisonError::into_inner) = Some(tx);
        self.shared.subscriptions.fetch_add(1, Ordering::SeqCst);
        log::debug!("PushSource: new subscription");

        stream::unfold(rx, |mut rx| async move { rx.recv().await.map(|item| (item, rx)) })
        .boxed()
    }
}

impl PushHandle {
    /// Deliver an update. Returns false when nobody is subscribed.
    pub fn push(&self, update: LocationUpdate) -> bool {
        self.shared.send(Ok(update))
    }

    /// Fail the current subscription.
    pub fn fail<S: Into<String>>(&self, reason: S) -> bool {
        self.shared.send(Err(SourceError::Failed(reason.into())))
    }

    /// End the current subscription's stream.
    pub fn close(&self) {
        self.shared
            .current
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .take();
    }

    /// Whether a subscriber is still consuming updates.
    pub fn is_subscribed(&self) -> bool {
        self.shared
            .current
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .as_ref()
            .is_some_and(|tx| !tx.is_closed())
    }

    /// Number of subscriptions opened so far.
    pub fn subscriptions(&self) -> usize {
        self.shared.subscriptions.load(Ordering::SeqCst)
    }
}
