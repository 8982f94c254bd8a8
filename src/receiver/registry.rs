// SPDX-License-Identifier: GPL-3.0-or-later
// src/receiver/registry.rs
//
// Non-owning set of display models fed by one subscription.

use std::sync::{Arc, Mutex, PoisonError, Weak};

use crate::app::model::{DisplayModel, DisplayState};

#[derive(Debug, Default)]
pub struct ObserverRegistry {
    observers: Mutex<Vec<Weak<DisplayModel>>>,
}

impl ObserverRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `model`. Returns false if it was already registered.
    pub fn attach(&self, model: &Arc<DisplayModel>) -> bool {
        let mut observers = self.lock();
        observers.retain(|weak| weak.strong_count() > 0);
        let target = Arc::downgrade(model);
        if observers.iter().any(|weak| weak.ptr_eq(&target)) {
            return false;
        }
        observers.push(target);
        true
    }

    pub fn detach(&self, model: &Arc<DisplayModel>) {
        let target = Arc::downgrade(model);
        self.lock()
            .retain(|weak| weak.strong_count() > 0 && !weak.ptr_eq(&target));
    }

    /// Push `state` to every live observer, pruning dropped ones.
    pub fn publish(&self, state: &DisplayState) {
        self.lock().retain(|weak| match weak.upgrade() {
            Some(model) => {
                model.publish(state.clone());
                true
            }
            None => false,
        });
    }

    pub fn reset(&self) {
        self.publish(&DisplayState::unavailable());
    }

    /// Number of live observers.
    pub fn len(&self) -> usize {
        let mut observers = self.lock();
        observers.retain(|weak| weak.strong_count() > 0);
        observers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Vec<Weak<DisplayModel>>> {
        self.observers.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn available() -> DisplayState {
        DisplayState {
            location_available: true,
            ..DisplayState::unavailable()
        }
    }

    #[test]
    fn test_attach_is_idempotent() {
        let registry = ObserverRegistry::new();
        let model = Arc::new(DisplayModel::new());
        assert!(registry.attach(&model));
        assert!(!registry.attach(&model));
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn test_publish_fans_out() {
        let registry = ObserverRegistry::new();
        let first = Arc::new(DisplayModel::new());
        let second = Arc::new(DisplayModel::new());
        registry.attach(&first);
        registry.attach(&second);

        registry.publish(&available());
        assert!(first.current().location_available);
        assert!(second.current().location_available);

        registry.reset();
        assert!(!first.current().location_available);
    }

    #[test]
    fn test_dropped_observer_is_pruned() {
        let registry = ObserverRegistry::new();
        let kept = Arc::new(DisplayModel::new());
        let dropped = Arc::new(DisplayModel::new());
        registry.attach(&kept);
        registry.attach(&dropped);
        drop(dropped);

        registry.publish(&available());
        assert_eq!(registry.len(), 1);
        assert!(kept.current().location_available);
    }

    #[test]
    fn test_detach() {
        let registry = ObserverRegistry::new();
        let model = Arc::new(DisplayModel::new());
        registry.attach(&model);
        registry.detach(&model);
        assert!(registry.is_empty());

        registry.publish(&available());
        assert!(!model.current().location_available);
    }
}
