//! Edge case and boundary condition tests
//!
//! Unusual inputs, corrupted archives and odd navigation orders.

use chrono::{TimeZone, Utc};
use ripmind_core::store::ARCHIVE_SLOT;
use ripmind_core::{
    Destination, FlowConfig, FlowDraft, LetterFlow, LetterId, LetterList, LetterRecord,
    LetterStore, ListRow, Step, ValidationError,
};
use tempfile::TempDir;

fn open_store(temp_dir: &TempDir) -> LetterStore {
    LetterStore::open(temp_dir.path().join("ripmind.redb")).unwrap()
}

// ============================================================================
// Corrupted Storage
// ============================================================================

/// Each of these must load as an empty archive
#[test]
fn test_garbage_slot_values_load_empty() {
    let temp_dir = TempDir::new().unwrap();
    let store = open_store(&temp_dir);

    let garbage: [&[u8]; 6] = [
        b"",
        b"null",
        b"{}",
        b"[1, 2, 3]",
        b"[{\"id\": \"x\"}]",
        &[0xff, 0xfe, 0x00],
    ];

    for value in garbage {
        store.storage().write_slot(ARCHIVE_SLOT, value).unwrap();
        assert!(store.load().is_empty(), "slot {:?} should load empty", value);
    }
}

#[test]
fn test_list_over_corrupted_store_shows_placeholder() {
    let temp_dir = TempDir::new().unwrap();
    let store = open_store(&temp_dir);
    store.storage().write_slot(ARCHIVE_SLOT, b"oops").unwrap();

    let mut list = LetterList::with_timezone(Utc);
    list.refresh(&store);
    assert!(matches!(list.rows(), [ListRow::Placeholder(_)]));
}

#[test]
fn test_legacy_archive_is_readable() {
    let temp_dir = TempDir::new().unwrap();
    let store = open_store(&temp_dir);
    let legacy = br#"[
        {"id":"1718000000000","nickname":"AA","phone":"","content":"one","timestamp":"2024-06-10T06:13:20.000Z"},
        {"id":"1718000001000","nickname":"BB","phone":"01012345678","content":"two","timestamp":"2024-06-10T06:13:21.000Z"}
    ]"#;
    store.storage().write_slot(ARCHIVE_SLOT, legacy).unwrap();

    let letters = store.load();
    assert_eq!(letters.len(), 2);
    assert_eq!(letters[0].phone, None);
    assert_eq!(letters[1].phone.as_deref(), Some("01012345678"));

    let found = store.find(&LetterId::from_string("1718000001000")).unwrap();
    assert_eq!(found.content, "two");
}

#[test]
fn test_archive_submit_over_corrupted_store_leaves_it_untouched() {
    let temp_dir = TempDir::new().unwrap();
    let store = open_store(&temp_dir);
    let existing = br#"[
        {"id":"1718000000000","nickname":"AA","phone":"","content":"one","timestamp":"2024-06-10T06:13:20.000Z"},
        {"id":"1718000001000","nickname":"BB","phone":"","content":"two","timestamp":""}
    ]"#;
    store.storage().write_slot(ARCHIVE_SLOT, existing).unwrap();

    let mut flow = LetterFlow::new(store, FlowConfig::default()).with_notifier(None);
    flow.start();
    flow.set_consent(false);
    flow.draft_mut().set_nickname("CC");
    flow.validate_before_content().unwrap();
    flow.finish_content();

    let submission = flow.submit(Destination::Archive);
    assert_eq!(flow.active_step(), Some(Step::SendingArchive));
    flow.complete(submission.pending.unwrap());
    assert_eq!(flow.active_step(), Some(Step::Archive));

    let raw = flow.store().storage().read_slot(ARCHIVE_SLOT).unwrap().unwrap();
    assert_eq!(raw, existing.to_vec());
}

// ============================================================================
// Input Boundaries
// ============================================================================

#[test]
fn test_whitespace_phone_with_consent_is_missing() {
    let temp_dir = TempDir::new().unwrap();
    let mut flow = LetterFlow::new(open_store(&temp_dir), FlowConfig::default()).with_notifier(None);

    flow.start();
    flow.set_consent(true);
    flow.draft_mut().set_nickname("Sam");
    flow.draft_mut().set_phone(" \t ");
    flow.draft_mut().set_acknowledged(true);

    assert_eq!(flow.validate_before_content(), Err(ValidationError::MissingPhone));
}

#[test]
fn test_nickname_checked_before_phone() {
    let temp_dir = TempDir::new().unwrap();
    let mut flow = LetterFlow::new(open_store(&temp_dir), FlowConfig::default()).with_notifier(None);

    flow.start();
    flow.set_consent(true);
    assert_eq!(flow.validate_before_content(), Err(ValidationError::MissingNickname));
}

#[test]
fn test_one_character_nickname_row() {
    let mut draft = FlowDraft::new();
    draft.set_nickname("J");
    let record = draft.to_record(false, Utc.timestamp_opt(0, 0).unwrap());
    assert_eq!(record.short_nickname(), "J");
}

#[test]
fn test_empty_content_is_accepted() {
    let temp_dir = TempDir::new().unwrap();
    let mut flow = LetterFlow::new(open_store(&temp_dir), FlowConfig::default()).with_notifier(None);

    flow.start();
    flow.set_consent(false);
    flow.draft_mut().set_nickname("Sam");
    flow.validate_before_content().unwrap();
    flow.finish_content();

    let record = flow.submit(Destination::Archive).record;
    assert_eq!(record.content, "");
    assert_eq!(flow.store().len(), 1);
}

#[test]
fn test_clear_content_keeps_identity() {
    let mut draft = FlowDraft::new();
    draft.set_nickname("Sam");
    draft.set_content("a long letter");
    draft.clear_content();

    assert_eq!(draft.content(), "");
    assert_eq!(draft.nickname(), "Sam");
}

// ============================================================================
// Consent Invariant
// ============================================================================

/// Withdrawing consent after typing a phone must drop the phone
#[test]
fn test_withdrawn_consent_drops_phone() {
    let temp_dir = TempDir::new().unwrap();
    let mut flow = LetterFlow::new(open_store(&temp_dir), FlowConfig::default()).with_notifier(None);

    flow.start();
    flow.set_consent(true);
    flow.draft_mut().set_nickname("Sam");
    flow.draft_mut().set_phone("010-1234-5678");
    flow.go_back(Step::Consent);
    flow.set_consent(false);
    flow.validate_before_content().unwrap();

    let record = flow.submit(Destination::Archive).record;
    assert_eq!(record.phone, None);

    let stored: Vec<LetterRecord> = flow.store().load();
    assert_eq!(stored[0].phone, None);
}

#[test]
fn test_consent_cleared_after_submission() {
    let temp_dir = TempDir::new().unwrap();
    let mut flow = LetterFlow::new(open_store(&temp_dir), FlowConfig::default()).with_notifier(None);

    flow.start();
    flow.set_consent(true);
    flow.draft_mut().set_nickname("Sam");
    flow.draft_mut().set_phone("010-1234-5678");
    flow.draft_mut().set_acknowledged(true);
    flow.submit(Destination::Archive);

    assert!(!flow.consent());
    assert_eq!(flow.draft().phone(), "");
}
