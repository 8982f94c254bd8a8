// SPDX-License-Identifier: GPL-3.0-or-later
// src/receiver/mod.rs
//
// Subscription lifecycle: owns the one live subscription to a location
// source and feeds every attached display model.

pub mod cancel;
pub mod registry;

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use futures_util::StreamExt;

use self::cancel::CancelToken;
use self::registry::ObserverRegistry;
use crate::app::model::DisplayModel;
use crate::app::update::reduce;
use crate::config::Settings;
use crate::domain::location::LocationUpdate;
use crate::source::{LocationSource, UpdateStream};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubscriptionState {
    Idle,
    Running,
}

#[derive(Debug)]
struct Subscription {
    /// Distinguishes this subscription from later ones.
    generation: u64,
    token: CancelToken,
}

#[derive(Debug)]
struct Shared {
    observers: ObserverRegistry,
    subscription: Mutex<Option<Subscription>>,
    next_generation: AtomicU64,
    settings: Arc<Settings>,
}

impl Shared {
    fn lock(&self) -> MutexGuard<'_, Option<Subscription>> {
        self.subscription.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Publish the result of one update if `generation` is still current.
    fn dispatch(&self, generation: u64, update: &LocationUpdate) {
        let slot = self.lock();
        if !slot.as_ref().is_some_and(|s| s.generation == generation) {
            log::debug!("Dropping update for stale subscription {generation}");
            return;
        }

        if update.flags.permission_denied {
            log::warn!("No location permission");
        } else if let Some(fix) = update.location {
            log::debug!("Setting speed to {}", fix.speed);
        } else {
            log::debug!("Update without location");
        }
        self.observers.publish(&reduce(update));
    }

    /// Move to Idle after the task ended on its own (failure, end of
    /// stream, external cancel). No-op once `generation` is superseded.
    fn finish(&self, generation: u64) {
        let mut slot = self.lock();
        if !slot.as_ref().is_some_and(|s| s.generation == generation) {
            return;
        }
        slot.take();
        self.settings.set_updates_started(false);
        self.observers.reset();
    }
}

/// Lifecycle of the location subscription.
///
/// `Idle -> Running` on [`start`](Self::start), back to `Idle` on
/// [`stop`](Self::stop), a stream failure or the end of the stream.
/// Every transition to Idle resets the attached models to unavailable.
pub struct LocationReceiver {
    source: Arc<dyn LocationSource>,
    shared: Arc<Shared>,
}

impl LocationReceiver {
    pub fn new(source: Arc<dyn LocationSource>, settings: Arc<Settings>) -> Self {
        Self {
            source,
            shared: Arc::new(Shared {
                observers: ObserverRegistry::new(),
                subscription: Mutex::new(None),
                next_generation: AtomicU64::new(1),
                settings,
            }),
        }
    }

    pub fn state(&self) -> SubscriptionState {
        if self.shared.lock().is_some() {
            SubscriptionState::Running
        } else {
            SubscriptionState::Idle
        }
    }

    pub fn updates_started(&self) -> bool {
        self.state() == SubscriptionState::Running
    }

    /// Feed `model` from the subscription without starting it.
    pub fn attach(&self, model: &Arc<DisplayModel>) {
        if self.shared.observers.attach(model) {
            log::debug!("Attached display model ({} total)", self.shared.observers.len());
        }
    }

    pub fn detach(&self, model: &Arc<DisplayModel>) {
        self.shared.observers.detach(model);
    }

    pub fn observer_count(&self) -> usize {
        self.shared.observers.len()
    }

    /// Attach `model` and start updates unless they are already running.
    ///
    /// Must be called from within a tokio runtime.
    pub fn start(&self, model: &Arc<DisplayModel>) {
        self.attach(model);
        self.start_updates();
    }

    /// Start updates for the already attached models.
    pub fn start_updates(&self) {
        let mut slot = self.shared.lock();
        if slot.is_some() {
            log::info!("LocationReceiver: start: updates are already running");
            return;
        }

        let generation = self.shared.next_generation.fetch_add(1, Ordering::SeqCst);
        let token = CancelToken::new();
        let updates = self.source.live_updates();
        *slot = Some(Subscription {
            generation,
            token: token.clone(),
        });
        self.shared.settings.set_updates_started(true);
        drop(slot);

        log::info!("LocationReceiver: start (subscription {generation})");
        tokio::spawn(consume(Arc::clone(&self.shared), updates, token, generation));
    }

    /// Cancel the subscription and reset every model. Idempotent.
    pub fn stop(&self) {
        let mut slot = self.shared.lock();
        if let Some(subscription) = slot.take() {
            log::info!("LocationReceiver: stop (subscription {})", subscription.generation);
            subscription.token.cancel();
        }
        self.shared.settings.set_updates_started(false);
        self.shared.observers.reset();
    }

    /// Stop when running, otherwise start feeding `model`.
    pub fn toggle(&self, model: &Arc<DisplayModel>) {
        if self.updates_started() {
            self.stop();
        } else {
            self.start(model);
        }
    }
}

impl Drop for LocationReceiver {
    /// Ends the task but keeps the persisted flag, so a later launch resumes.
    fn drop(&mut self) {
        if let Some(subscription) = self.shared.lock().take() {
            subscription.token.cancel();
        }
    }
}

/// Consume one subscription until it is cancelled, fails or ends.
async fn consume(shared: Arc<Shared>, mut updates: UpdateStream, token: CancelToken, generation: u64) {
    log::info!("Starting updater");

    loop {
        let next = tokio::select! {
            biased;
            _ = token.cancelled() => None,
            next = updates.next() => next,
        };

        if token.is_cancelled() {
            log::info!("Subscription {generation} was cancelled, stopping");
            shared.finish(generation);
            return;
        }

        match next {
            Some(Ok(update)) => shared.dispatch(generation, &update),
            Some(Err(e)) => {
                log::error!("Getting location updates failed: {e}");
                shared.finish(generation);
                return;
            }
            None => {
                log::info!("Location updates ended");
                shared.finish(generation);
                return;
            }
        }
    }
}
