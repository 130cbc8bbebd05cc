//! Explicit view-state machine for the question/answer flow.
//!
//! The UI is a handful of screens driven by three facts: whether a verdict
//! exists, whether the share panel is open, and whether the last submission
//! failed. Modeling those as an enum keeps impossible combinations (a share
//! panel with no verdict, say) unrepresentable.

use crate::model::ComfortVerdict;

/// What a submission produced.
#[derive(Debug, Clone, PartialEq)]
pub enum SubmitOutcome {
    Verdict(ComfortVerdict),
    /// The resolver could not map the city name to coordinates.
    LocationNotFound,
    /// Geocoding or forecast fetch failed. Terminal for this request; the
    /// user has to resubmit.
    FetchFailed,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Event {
    Submit { city: String, outcome: SubmitOutcome },
    Clear,
    ToggleShare,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub enum View {
    /// The city prompt, with no result yet.
    #[default]
    Prompt,
    LocationError {
        city: String,
    },
    FetchError,
    Verdict {
        city: String,
        verdict: ComfortVerdict,
    },
    Sharing {
        city: String,
        verdict: ComfortVerdict,
    },
}

impl View {
    /// Apply one event. Total: event/state pairs that make no sense leave
    /// the view unchanged.
    pub fn apply(self, event: Event) -> View {
        match (self, event) {
            (_, Event::Clear) => View::Prompt,

            (_, Event::Submit { city, outcome }) => match outcome {
                SubmitOutcome::Verdict(verdict) => View::Verdict { city, verdict },
                SubmitOutcome::LocationNotFound => View::LocationError { city },
                SubmitOutcome::FetchFailed => View::FetchError,
            },

            (View::Verdict { city, verdict }, Event::ToggleShare) => {
                View::Sharing { city, verdict }
            }
            (View::Sharing { city, verdict }, Event::ToggleShare) => {
                View::Verdict { city, verdict }
            }

            // Nothing to share yet.
            (view, Event::ToggleShare) => view,
        }
    }

    pub fn has_result(&self) -> bool {
        matches!(self, View::Verdict { .. } | View::Sharing { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn verdict(avg: i32) -> ComfortVerdict {
        ComfortVerdict { average_night_temp_c: Some(avg), comfortable: avg < 20 }
    }

    fn submit(city: &str, outcome: SubmitOutcome) -> Event {
        Event::Submit { city: city.to_string(), outcome }
    }

    #[test]
    fn submit_with_verdict_shows_the_result() {
        let view = View::Prompt.apply(submit("Oslo", SubmitOutcome::Verdict(verdict(12))));

        assert_eq!(view, View::Verdict { city: "Oslo".to_string(), verdict: verdict(12) });
        assert!(view.has_result());
    }

    #[test]
    fn unresolved_city_shows_a_location_error() {
        let view = View::Prompt.apply(submit("Atlantis", SubmitOutcome::LocationNotFound));

        assert_eq!(view, View::LocationError { city: "Atlantis".to_string() });
        assert!(!view.has_result());
    }

    #[test]
    fn fetch_failure_shows_the_generic_error() {
        let view = View::Prompt.apply(submit("Oslo", SubmitOutcome::FetchFailed));

        assert_eq!(view, View::FetchError);
    }

    #[test]
    fn clear_always_returns_to_the_prompt() {
        let states = [
            View::Prompt,
            View::LocationError { city: "Atlantis".to_string() },
            View::FetchError,
            View::Verdict { city: "Oslo".to_string(), verdict: verdict(12) },
            View::Sharing { city: "Oslo".to_string(), verdict: verdict(12) },
        ];

        for state in states {
            assert_eq!(state.apply(Event::Clear), View::Prompt);
        }
    }

    #[test]
    fn toggle_share_flips_between_verdict_and_sharing() {
        let verdict_view = View::Verdict { city: "Oslo".to_string(), verdict: verdict(25) };

        let sharing = verdict_view.clone().apply(Event::ToggleShare);
        assert_eq!(sharing, View::Sharing { city: "Oslo".to_string(), verdict: verdict(25) });

        let back = sharing.apply(Event::ToggleShare);
        assert_eq!(back, verdict_view);
    }

    #[test]
    fn toggle_share_without_a_result_is_a_no_op() {
        assert_eq!(View::Prompt.apply(Event::ToggleShare), View::Prompt);
        assert_eq!(View::FetchError.apply(Event::ToggleShare), View::FetchError);
    }

    #[test]
    fn resubmitting_replaces_the_previous_result() {
        let view = View::Verdict { city: "Oslo".to_string(), verdict: verdict(12) }
            .apply(submit("Cairo", SubmitOutcome::Verdict(verdict(28))));

        assert_eq!(view, View::Verdict { city: "Cairo".to_string(), verdict: verdict(28) });
    }
}
