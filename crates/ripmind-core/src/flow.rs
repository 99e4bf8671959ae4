//! The letter flow controller.
//!
//! [`LetterFlow`] owns the draft, the consent flag and the step navigator. It
//! is driven by user actions from a front end:
//!
//! ```text
//! Consent ──set_consent──▶ Identity ──validate_before_content──▶ Content
//!                                                                  │
//!                                                           finish_content
//!                                                                  ▼
//!          ┌──────────── submit(Live) ───────────────────────── Choice
//!          ▼                                                       │
//!   SendingLive ──(live delay)──▶ LiveComplete             submit(Archive)
//!                                                                  ▼
//!                        Archive ◀──(archive delay)──────── SendingArchive
//! ```
//!
//! With [`LiveMode::Wall`] a live letter goes straight to the in-page wall.
//!
//! Delays are returned as a [`PendingStep`] instead of being awaited, so a UI
//! can schedule them on its own runtime. [`LetterFlow::submit_and_wait`] does
//! both for callers that can block on the flow.
//!
//! # Example
//!
//! ```ignore
//! let mut flow = LetterFlow::new(store, FlowConfig::default());
//! flow.start();
//! flow.set_consent(false);
//! flow.draft_mut().set_nickname("Sam");
//! flow.validate_before_content()?;
//! flow.draft_mut().set_content("hello");
//! flow.finish_content();
//! let record = flow.submit_and_wait(Destination::Archive).await;
//! assert_eq!(flow.list().selected().map(|l| &l.id), Some(&record.id));
//! ```

use std::sync::Arc;
use std::time::Duration;

use chrono::{DateTime, Utc};
use tracing::{debug, error, info, warn};

use crate::config::{FlowConfig, LiveMode};
use crate::error::ValidationError;
use crate::list::LetterList;
use crate::notify::{HttpNotifier, Notifier, NotifyRequest};
use crate::step::{Step, StepNavigator};
use crate::store::LetterStore;
use crate::types::{Destination, FlowDraft, LetterRecord};

/// Query parameter value that opens the archive directly
pub const ARCHIVE_DEEP_LINK: &str = "ripmind";

/// Source of submission timestamps
pub trait Clock: Send + Sync {
    fn now(&self) -> DateTime<Utc>;
}

/// Wall-clock time
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// How the flow was entered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum EntryPoint {
    /// Normal start at the consent step
    #[default]
    Start,
    /// Deep link straight into the archive
    Archive,
}

impl EntryPoint {
    /// Parse a URL query string such as `?step=ripmind`.
    ///
    /// Anything other than `step=ripmind` is a normal start.
    pub fn from_query(query: &str) -> Self {
        let query = query.trim_start_matches('?');
        let deep_link = query
            .split('&')
            .filter_map(|pair| pair.split_once('='))
            .any(|(key, value)| key == "step" && value == ARCHIVE_DEEP_LINK);

        if deep_link {
            EntryPoint::Archive
        } else {
            EntryPoint::Start
        }
    }

    /// Parse the value of a `step` parameter on its own.
    pub fn from_step_param(value: Option<&str>) -> Self {
        match value {
            Some(ARCHIVE_DEEP_LINK) => EntryPoint::Archive,
            _ => EntryPoint::Start,
        }
    }
}

/// A transition to apply once `delay` has elapsed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PendingStep {
    pub target: Step,
    pub delay: Duration,
}

/// Result of [`LetterFlow::submit`].
#[derive(Debug, Clone)]
pub struct Submission {
    /// The letter as it was snapshotted from the draft
    pub record: LetterRecord,
    /// Delayed transition still to apply, if any
    pub pending: Option<PendingStep>,
}

/// Multi-step letter flow for one session.
pub struct LetterFlow {
    nav: StepNavigator,
    draft: FlowDraft,
    consent: bool,
    alert: Option<ValidationError>,
    store: LetterStore,
    list: LetterList,
    notifier: Option<Arc<dyn Notifier>>,
    clock: Arc<dyn Clock>,
    config: FlowConfig,
    last_created_at: Option<DateTime<Utc>>,
    /// Live letters posted this session, newest first
    wall: Vec<LetterRecord>,
    restart_available: bool,
}

impl LetterFlow {
    /// Create a flow over `store`.
    ///
    /// The notifier is an [`HttpNotifier`] on `config.notify_endpoint`, or none
    /// if the endpoint is unset.
    pub fn new(store: LetterStore, config: FlowConfig) -> Self {
        let notifier = config
            .notify_endpoint
            .as_ref()
            .map(|endpoint| Arc::new(HttpNotifier::new(endpoint.clone())) as Arc<dyn Notifier>);

        Self {
            nav: StepNavigator::new(),
            draft: FlowDraft::new(),
            consent: false,
            alert: None,
            store,
            list: LetterList::new(),
            notifier,
            clock: Arc::new(SystemClock),
            config,
            last_created_at: None,
            wall: Vec::new(),
            restart_available: true,
        }
    }

    /// Replace the notifier (or disable it with `None`).
    pub fn with_notifier(mut self, notifier: Option<Arc<dyn Notifier>>) -> Self {
        self.notifier = notifier;
        self
    }

    pub fn with_clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = clock;
        self
    }

    // ═══════════════════════════════════════════════════════════════════════
    // Entry
    // ═══════════════════════════════════════════════════════════════════════

    /// Begin at the consent step.
    pub fn start(&mut self) {
        self.go_to(Step::Consent);
    }

    /// Enter the flow. A deep link opens the archive and hides "restart".
    pub fn open(&mut self, entry: EntryPoint) {
        match entry {
            EntryPoint::Start => self.start(),
            EntryPoint::Archive => {
                self.restart_available = false;
                self.go_to(Step::Archive);
            }
        }
    }

    /// Clear the draft and consent and go back to the first step.
    pub fn restart(&mut self) {
        self.draft = FlowDraft::new();
        self.consent = false;
        self.restart_available = true;
        self.go_to(Step::Consent);
    }

    // ═══════════════════════════════════════════════════════════════════════
    // Navigation
    // ═══════════════════════════════════════════════════════════════════════

    /// Activate `step`.
    ///
    /// All transitions go through here; activating the archive always reloads
    /// the list, however it was reached.
    pub fn go_to(&mut self, step: Step) {
        self.nav.go_to(step);
        self.alert = None;
        if step == Step::Archive {
            self.list.refresh(&self.store);
        }
    }

    /// Activate a step by element id. Unknown ids are ignored.
    pub fn go_to_id(&mut self, id: &str) -> Option<Step> {
        let step = self.nav.go_to_id(id)?;
        self.go_to(step);
        Some(step)
    }

    /// Go back to a step the caller remembers. The draft is kept.
    pub fn go_back(&mut self, step: Step) {
        self.go_to(step);
    }

    pub fn active_step(&self) -> Option<Step> {
        self.nav.active()
    }

    pub fn navigator(&self) -> &StepNavigator {
        &self.nav
    }

    // ═══════════════════════════════════════════════════════════════════════
    // Input steps
    // ═══════════════════════════════════════════════════════════════════════

    /// Record whether the phone field is in play, then show the identity step.
    pub fn set_consent(&mut self, granted: bool) {
        self.consent = granted;
        self.go_to(Step::Identity);
    }

    pub fn consent(&self) -> bool {
        self.consent
    }

    /// The phone input is only shown with consent
    pub fn phone_field_visible(&self) -> bool {
        self.consent
    }

    /// Check the identity step and move on to the letter body.
    ///
    /// On failure the step is unchanged and [`alert`](Self::alert) holds the
    /// message to show.
    pub fn validate_before_content(&mut self) -> Result<(), ValidationError> {
        match self.check_identity() {
            Ok(()) => {
                self.go_to(Step::Content);
                Ok(())
            }
            Err(e) => {
                debug!("Identity step blocked: {:?}", e);
                self.alert = Some(e);
                Err(e)
            }
        }
    }

    fn check_identity(&self) -> Result<(), ValidationError> {
        if self.draft.nickname().trim().is_empty() {
            return Err(ValidationError::MissingNickname);
        }

        if self.consent {
            if self.draft.phone().trim().is_empty() {
                return Err(ValidationError::MissingPhone);
            }
            if !self.draft.acknowledged() {
                return Err(ValidationError::ConsentNotAcknowledged);
            }
        }

        Ok(())
    }

    /// Letter written, show the submission choice.
    pub fn finish_content(&mut self) {
        self.go_to(Step::Choice);
    }

    /// Message from the last blocked transition
    pub fn alert(&self) -> Option<ValidationError> {
        self.alert
    }

    pub fn dismiss_alert(&mut self) {
        self.alert = None;
    }

    pub fn draft(&self) -> &FlowDraft {
        &self.draft
    }

    pub fn draft_mut(&mut self) -> &mut FlowDraft {
        &mut self.draft
    }

    // ═══════════════════════════════════════════════════════════════════════
    // Submission
    // ═══════════════════════════════════════════════════════════════════════

    /// Snapshot the draft and send it to `destination`.
    ///
    /// The draft and consent are cleared. Archive writes happen immediately;
    /// the returned [`PendingStep`] must be applied with
    /// [`complete`](Self::complete) after its delay.
    pub fn submit(&mut self, destination: Destination) -> Submission {
        let created_at = self.next_created_at();
        let record = self.draft.to_record(self.consent, created_at);
        self.draft = FlowDraft::new();
        self.consent = false;

        info!(id = %record.id, ?destination, "Letter submitted");

        let pending = match destination {
            Destination::Live => match self.config.live_mode {
                LiveMode::Notify => {
                    self.go_to(Step::SendingLive);
                    self.spawn_notify(&record);
                    Some(PendingStep {
                        target: Step::LiveComplete,
                        delay: self.config.live_delay(),
                    })
                }
                LiveMode::Wall => {
                    self.wall.insert(0, record.clone());
                    self.go_to(Step::LiveWall);
                    None
                }
            },
            Destination::Archive => {
                self.go_to(Step::SendingArchive);
                if let Err(e) = self.store.append(&record) {
                    error!(id = %record.id, "Failed to archive letter: {}", e);
                }
                Some(PendingStep {
                    target: Step::Archive,
                    delay: self.config.archive_delay(),
                })
            }
        };

        Submission { record, pending }
    }

    /// Apply a delayed transition from [`submit`](Self::submit).
    pub fn complete(&mut self, pending: PendingStep) {
        self.go_to(pending.target);
    }

    /// Submit, wait out the delay, and apply the follow-up step.
    pub async fn submit_and_wait(&mut self, destination: Destination) -> LetterRecord {
        let Submission { record, pending } = self.submit(destination);
        if let Some(pending) = pending {
            tokio::time::sleep(pending.delay).await;
            self.complete(pending);
        }
        record
    }

    /// Fire-and-forget notification; the outcome is only logged.
    fn spawn_notify(&self, record: &LetterRecord) {
        let Some(notifier) = self.notifier.as_ref() else {
            debug!("Notifications disabled");
            return;
        };
        let Some(request) = NotifyRequest::from_record(record) else {
            debug!(id = %record.id, "Live letter has no phone, nothing to notify");
            return;
        };
        let handle = match tokio::runtime::Handle::try_current() {
            Ok(handle) => handle,
            Err(_) => {
                warn!(id = %record.id, "No async runtime, notification skipped");
                return;
            }
        };

        let id = record.id.clone();
        let send = notifier.notify(request);
        handle.spawn(async move {
            match send.await {
                Ok(()) => info!(%id, "Notification sent"),
                Err(e) => warn!(%id, "Notification failed: {}", e),
            }
        });
    }

    /// Now, nudged forward so timestamps strictly increase within the session.
    fn next_created_at(&mut self) -> DateTime<Utc> {
        let mut now = self.clock.now();
        if let Some(last) = self.last_created_at {
            if now <= last {
                now = last + chrono::Duration::milliseconds(1);
            }
        }
        self.last_created_at = Some(now);
        now
    }

    // ═══════════════════════════════════════════════════════════════════════
    // Views
    // ═══════════════════════════════════════════════════════════════════════

    pub fn list(&self) -> &LetterList {
        &self.list
    }

    pub fn list_mut(&mut self) -> &mut LetterList {
        &mut self.list
    }

    /// Live letters posted this session, newest first
    pub fn wall(&self) -> &[LetterRecord] {
        &self.wall
    }

    /// Whether the archive shows the "back to start" button
    pub fn restart_available(&self) -> bool {
        self.restart_available
    }

    pub fn store(&self) -> &LetterStore {
        &self.store
    }

    pub fn config(&self) -> &FlowConfig {
        &self.config
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn create_test_flow() -> (LetterFlow, TempDir) {
        let temp_dir = TempDir::new().unwrap();
        let store = LetterStore::open(temp_dir.path().join("test.redb")).unwrap();
        let flow = LetterFlow::new(store, FlowConfig::default()).with_notifier(None);
        (flow, temp_dir)
    }

    #[test]
    fn test_entry_point_from_query() {
        assert_eq!(EntryPoint::from_query("?step=ripmind"), EntryPoint::Archive);
        assert_eq!(EntryPoint::from_query("lang=ko&step=ripmind"), EntryPoint::Archive);
        assert_eq!(EntryPoint::from_query("step=live"), EntryPoint::Start);
        assert_eq!(EntryPoint::from_query(""), EntryPoint::Start);
        assert_eq!(EntryPoint::from_step_param(Some("ripmind")), EntryPoint::Archive);
        assert_eq!(EntryPoint::from_step_param(None), EntryPoint::Start);
    }

    #[test]
    fn test_nothing_active_before_start() {
        let (mut flow, _temp) = create_test_flow();
        assert_eq!(flow.active_step(), None);
        flow.start();
        assert_eq!(flow.active_step(), Some(Step::Consent));
    }

    #[test]
    fn test_consent_goes_to_identity_either_way() {
        let (mut flow, _temp) = create_test_flow();
        flow.start();
        flow.set_consent(false);
        assert_eq!(flow.active_step(), Some(Step::Identity));
        assert!(!flow.phone_field_visible());

        flow.go_back(Step::Consent);
        flow.set_consent(true);
        assert_eq!(flow.active_step(), Some(Step::Identity));
        assert!(flow.phone_field_visible());
    }

    #[test]
    fn test_blank_nickname_blocks() {
        let (mut flow, _temp) = create_test_flow();
        flow.start();
        flow.set_consent(false);
        flow.draft_mut().set_nickname("   ");

        assert_eq!(flow.validate_before_content(), Err(ValidationError::MissingNickname));
        assert_eq!(flow.active_step(), Some(Step::Identity));
        assert_eq!(flow.alert(), Some(ValidationError::MissingNickname));
    }

    #[test]
    fn test_consent_requires_acknowledgement() {
        let (mut flow, _temp) = create_test_flow();
        flow.start();
        flow.set_consent(true);
        flow.draft_mut().set_nickname("Sam");
        flow.draft_mut().set_phone("010-1111-2222");

        assert_eq!(
            flow.validate_before_content(),
            Err(ValidationError::ConsentNotAcknowledged)
        );

        flow.draft_mut().set_acknowledged(true);
        assert_eq!(flow.validate_before_content(), Ok(()));
        assert_eq!(flow.active_step(), Some(Step::Content));
        assert_eq!(flow.alert(), None);
    }

    #[test]
    fn test_phone_not_required_without_consent() {
        let (mut flow, _temp) = create_test_flow();
        flow.start();
        flow.set_consent(false);
        flow.draft_mut().set_nickname("Sam");
        assert!(flow.validate_before_content().is_ok());
    }

    #[test]
    fn test_back_navigation_keeps_draft() {
        let (mut flow, _temp) = create_test_flow();
        flow.start();
        flow.set_consent(false);
        flow.draft_mut().set_nickname("Sam");
        flow.validate_before_content().unwrap();
        flow.draft_mut().set_content("hello");

        flow.go_back(Step::Identity);
        assert_eq!(flow.draft().nickname(), "Sam");
        flow.validate_before_content().unwrap();
        assert_eq!(flow.draft().content(), "hello");
    }

    #[test]
    fn test_restart_clears_draft_and_consent() {
        let (mut flow, _temp) = create_test_flow();
        flow.start();
        flow.set_consent(true);
        flow.draft_mut().set_nickname("Sam");

        flow.restart();
        assert_eq!(flow.draft(), &FlowDraft::new());
        assert!(!flow.consent());
        assert_eq!(flow.active_step(), Some(Step::Consent));
    }

    #[test]
    fn test_deep_link_hides_restart() {
        let (mut flow, _temp) = create_test_flow();
        flow.open(EntryPoint::Archive);
        assert_eq!(flow.active_step(), Some(Step::Archive));
        assert!(!flow.restart_available());
    }

    #[test]
    fn test_step_id_refreshes_archive_and_clears_alert() {
        let (mut flow, _temp) = create_test_flow();
        flow.start();
        flow.set_consent(false);
        flow.draft_mut().set_nickname("Sam");
        flow.submit(Destination::Archive);

        flow.go_to(Step::Identity);
        assert!(flow.validate_before_content().is_err());
        assert!(flow.alert().is_some());

        assert_eq!(flow.go_to_id("step-ripmind"), Some(Step::Archive));
        assert_eq!(flow.active_step(), Some(Step::Archive));
        assert_eq!(flow.alert(), None);
        assert_eq!(flow.list().letters().len(), 1);
    }

    #[test]
    fn test_unknown_step_id_is_ignored() {
        let (mut flow, _temp) = create_test_flow();
        flow.start();
        assert_eq!(flow.go_to_id("step-missing"), None);
        assert_eq!(flow.active_step(), Some(Step::Consent));
    }

    #[test]
    fn test_archive_submit_writes_immediately() {
        let (mut flow, _temp) = create_test_flow();
        flow.start();
        flow.set_consent(false);
        flow.draft_mut().set_nickname("Sam");
        flow.draft_mut().set_content("hello");

        let submission = flow.submit(Destination::Archive);
        assert_eq!(flow.active_step(), Some(Step::SendingArchive));
        assert_eq!(flow.store().load(), vec![submission.record.clone()]);
        assert_eq!(
            submission.pending,
            Some(PendingStep {
                target: Step::Archive,
                delay: Duration::from_secs(2),
            })
        );
        assert_eq!(flow.draft(), &FlowDraft::new());

        flow.complete(submission.pending.unwrap());
        assert_eq!(flow.active_step(), Some(Step::Archive));
        assert_eq!(flow.list().selected(), Some(&submission.record));
    }

    #[test]
    fn test_live_submit_without_runtime_still_progresses() {
        let temp_dir = TempDir::new().unwrap();
        let store = LetterStore::open(temp_dir.path().join("test.redb")).unwrap();
        let mut flow = LetterFlow::new(store, FlowConfig::default());
        flow.start();
        flow.set_consent(true);
        flow.draft_mut().set_nickname("Sam");
        flow.draft_mut().set_phone("010-1111-2222");
        flow.draft_mut().set_acknowledged(true);

        let submission = flow.submit(Destination::Live);
        assert_eq!(flow.active_step(), Some(Step::SendingLive));
        assert_eq!(submission.pending.unwrap().target, Step::LiveComplete);
        assert!(flow.store().is_empty());
    }

    #[test]
    fn test_wall_mode_posts_newest_first() {
        let temp_dir = TempDir::new().unwrap();
        let store = LetterStore::open(temp_dir.path().join("test.redb")).unwrap();
        let config = FlowConfig {
            live_mode: LiveMode::Wall,
            ..FlowConfig::default()
        };
        let mut flow = LetterFlow::new(store, config);

        for name in ["AA", "BB"] {
            flow.start();
            flow.set_consent(false);
            flow.draft_mut().set_nickname(name);
            let submission = flow.submit(Destination::Live);
            assert!(submission.pending.is_none());
            assert_eq!(flow.active_step(), Some(Step::LiveWall));
        }

        let names: Vec<_> = flow.wall().iter().map(|l| l.nickname.as_str()).collect();
        assert_eq!(names, vec!["BB", "AA"]);
        assert!(flow.store().is_empty());
    }

    #[test]
    fn test_timestamps_strictly_increase_with_frozen_clock() {
        struct Frozen(DateTime<Utc>);
        impl Clock for Frozen {
            fn now(&self) -> DateTime<Utc> {
                self.0
            }
        }

        let (flow, _temp) = create_test_flow();
        let mut flow = flow.with_clock(Arc::new(Frozen(Utc::now())));
        let a = flow.submit(Destination::Archive).record;
        let b = flow.submit(Destination::Archive).record;
        assert!(b.created_at > a.created_at);
        assert_eq!(flow.store().len(), 2);
    }
}
