// SPDX-License-Identifier: GPL-3.0-or-later
// src/source/fixed.rs
//
// Canned location scenarios for previews and offline runs.

use futures_util::StreamExt;
use futures_util::stream;

use super::{LocationSource, SourceError, UpdateStream};
use crate::domain::location::{LocationFix, LocationUpdate, UpdateFlags};

/// Canned situations a fixed source can simulate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum Scenario {
    /// Accurate fix at 60 N / 25 E, moving at 30 m/s.
    #[default]
    Good,
    /// The user did not grant location access.
    NoPermission,
    /// Approximate location only, speed and course unknown.
    PoorAccuracy,
}

impl Scenario {
    pub fn update(self) -> LocationUpdate {
        match self {
            Scenario::Good => LocationUpdate::fix(
                LocationFix::new(60.0, 25.0)
                    .with_accuracy(20.0)
                    .with_course(21.3)
                    .with_speed(30.0),
                UpdateFlags::default(),
            ),
            Scenario::NoPermission => LocationUpdate::denied(),
            Scenario::PoorAccuracy => LocationUpdate::fix(
                LocationFix::new(60.0, 25.0).with_accuracy(900.0),
                UpdateFlags {
                    accuracy_limited: true,
                    ..UpdateFlags::default()
                },
            ),
        }
    }
}

/// Source that emits one scenario update and then stays silent.
#[derive(Debug, Clone, Copy, Default)]
pub struct FixedSource {
    scenario: Scenario,
}

impl FixedSource {
    pub fn new(scenario: Scenario) -> Self {
        Self { scenario }
    }
}

impl LocationSource for FixedSource {
    fn live_updates(&self) -> UpdateStream {
        log::info!("FixedSource: start ({:?})", self.scenario);
        stream::once(std::future::ready(Ok::<_, SourceError>(self.scenario.update())))
            .chain(stream::pending())
            .boxed()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::update::reduce;

    #[test]
    fn test_good_scenario() {
        let state = reduce(&Scenario::Good.update());
        assert!(state.location_available);
        assert!(state.has_accurate_location);
        assert_eq!(state.speed_text, "108");
        assert_eq!(state.course_text(), "21°");
    }

    #[test]
    fn test_poor_accuracy_scenario() {
        let state = reduce(&Scenario::PoorAccuracy.update());
        assert!(state.location_available);
        assert!(!state.has_accurate_location);
        assert_eq!(state.speed_text, " - ");
        assert_eq!(state.accuracy_label().to_string(), "Accuracy 900 m (very low)");
    }

    #[test]
    fn test_no_permission_scenario() {
        let state = reduce(&Scenario::NoPermission.update());
        assert!(!state.location_available);
    }

    #[tokio::test]
    async fn test_emits_once_then_idles() {
        let mut updates = FixedSource::new(Scenario::Good).live_updates();
        assert!(updates.next().await.unwrap().is_ok());

        let next = tokio::time::timeout(std::time::Duration::from_millis(20), updates.next()).await;
        assert!(next.is_err());
    }
}
