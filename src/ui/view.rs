// SPDX-License-Identifier: GPL-3.0-or-later
// src/ui/view.rs
//
// Text rendering of the display state.

use crate::app::model::DisplayState;

/// Shown instead of the speed when no location is available.
pub const UNAVAILABLE_NOTICE: &str = "Location information is not available. \
     Make sure that you have permitted this app to use location data.";

/// Render `state` as screen lines.
pub fn view(state: &DisplayState) -> Vec<String> {
    if !state.location_available {
        return vec![UNAVAILABLE_NOTICE.to_string()];
    }

    vec![
        state.accuracy_label().to_string(),
        speed(state),
        format!("Course: {}", state.course_text()),
        String::new(),
        format!("Latitude: {}", state.latitude_text),
        format!("Longitude: {}", state.longitude_text),
    ]
}

fn speed(state: &DisplayState) -> String {
    format!("{} {}", state.speed_text, state.speed_unit.label)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::update::reduce;
    use crate::source::Scenario;

    #[test]
    fn test_unavailable_view() {
        assert_eq!(view(&DisplayState::unavailable()), vec![UNAVAILABLE_NOTICE.to_string()]);
    }

    #[test]
    fn test_good_fix_view() {
        let lines = view(&reduce(&Scenario::Good.update()));
        assert_eq!(
            lines,
            vec![
                "Accuracy 20 m",
                "108 km/h",
                "Course: 21°",
                "",
                "Latitude: N 60° 0.000'",
                "Longitude: E 25° 0.000'",
            ]
        );
    }

    #[test]
    fn test_poor_accuracy_view() {
        let lines = view(&reduce(&Scenario::PoorAccuracy.update()));
        assert_eq!(lines[0], "Accuracy 900 m (very low)");
        assert_eq!(lines[1], " -  km/h");
        assert_eq!(lines[2], "Course: -");
    }
}
