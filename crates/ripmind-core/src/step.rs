//! Step navigation for the letter flow.
//!
//! Exactly one [`Step`] is visible at a time. Front ends render visibility as a
//! projection of [`StepNavigator::active`] rather than keeping their own flags.

use tracing::debug;

/// One mutually exclusive screen of the letter flow.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Step {
    /// Choose whether to share a phone number
    Consent,
    /// Nickname (and phone, with consent)
    Identity,
    /// Letter body
    Content,
    /// Send live or bury in the archive
    Choice,
    /// Shown while a live letter is being sent
    SendingLive,
    /// Live letter done
    LiveComplete,
    /// Shown while a letter is being buried
    SendingArchive,
    /// Browse buried letters
    Archive,
    /// In-page wall of live letters
    LiveWall,
}

impl Step {
    /// Every step, in flow order
    pub const ALL: [Step; 9] = [
        Step::Consent,
        Step::Identity,
        Step::Content,
        Step::Choice,
        Step::SendingLive,
        Step::LiveComplete,
        Step::SendingArchive,
        Step::Archive,
        Step::LiveWall,
    ];

    /// Stable element id for this step
    pub fn id(&self) -> &'static str {
        match self {
            Step::Consent => "step-privacy",
            Step::Identity => "step-letter",
            Step::Content => "step-letter-content",
            Step::Choice => "step-choice",
            Step::SendingLive => "step-sending-donation",
            Step::LiveComplete => "step-donation-complete",
            Step::SendingArchive => "step-sending",
            Step::Archive => "step-ripmind",
            Step::LiveWall => "step-live",
        }
    }

    /// Look up a step by element id
    pub fn from_id(id: &str) -> Option<Step> {
        Step::ALL.into_iter().find(|s| s.id() == id)
    }
}

impl std::fmt::Display for Step {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.id())
    }
}

/// Tracks the single active step.
///
/// Nothing is active until the first [`go_to`](Self::go_to). There is no
/// history; going back is just another `go_to` with a target the caller knows.
#[derive(Debug, Clone, Default)]
pub struct StepNavigator {
    active: Option<Step>,
}

impl StepNavigator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Currently active step, if the flow has started
    pub fn active(&self) -> Option<Step> {
        self.active
    }

    pub fn is_active(&self, step: Step) -> bool {
        self.active == Some(step)
    }

    /// Deactivate everything and activate `step`.
    pub fn go_to(&mut self, step: Step) {
        if self.active != Some(step) {
            debug!(from = ?self.active, to = %step, "Step change");
        }
        self.active = Some(step);
    }

    /// Activate a step by element id.
    ///
    /// Unknown ids change nothing and return `None`.
    pub fn go_to_id(&mut self, id: &str) -> Option<Step> {
        match Step::from_id(id) {
            Some(step) => {
                self.go_to(step);
                Some(step)
            }
            None => {
                debug!(id, "Ignoring unknown step");
                None
            }
        }
    }

    /// Visibility of every step
    pub fn visibility(&self) -> impl Iterator<Item = (Step, bool)> + '_ {
        Step::ALL.into_iter().map(move |s| (s, self.is_active(s)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn active_count(nav: &StepNavigator) -> usize {
        nav.visibility().filter(|(_, visible)| *visible).count()
    }

    #[test]
    fn test_nothing_active_initially() {
        let nav = StepNavigator::new();
        assert_eq!(nav.active(), None);
        assert_eq!(active_count(&nav), 0);
    }

    #[test]
    fn test_go_to_activates_exactly_one() {
        let mut nav = StepNavigator::new();
        nav.go_to(Step::Identity);
        nav.go_to(Step::Content);

        assert_eq!(nav.active(), Some(Step::Content));
        assert!(!nav.is_active(Step::Identity));
        assert_eq!(active_count(&nav), 1);
    }

    #[test]
    fn test_go_to_is_idempotent() {
        let mut once = StepNavigator::new();
        once.go_to(Step::Archive);

        let mut twice = StepNavigator::new();
        twice.go_to(Step::Archive);
        twice.go_to(Step::Archive);

        let a: Vec<_> = once.visibility().collect();
        let b: Vec<_> = twice.visibility().collect();
        assert_eq!(a, b);
    }

    #[test]
    fn test_unknown_id_is_noop() {
        let mut nav = StepNavigator::new();
        nav.go_to(Step::Choice);

        assert_eq!(nav.go_to_id("step-nowhere"), None);
        assert_eq!(nav.active(), Some(Step::Choice));
    }

    #[test]
    fn test_ids_round_trip() {
        for step in Step::ALL {
            assert_eq!(Step::from_id(step.id()), Some(step));
        }
    }

    #[test]
    fn test_go_to_id() {
        let mut nav = StepNavigator::new();
        assert_eq!(nav.go_to_id("step-ripmind"), Some(Step::Archive));
        assert!(nav.is_active(Step::Archive));
    }
}
