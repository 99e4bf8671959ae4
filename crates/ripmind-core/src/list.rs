//! Archive list projection.
//!
//! [`LetterList`] turns the store's contents into display rows, newest first,
//! with a single selected row and a separately dismissible detail surface.

use chrono::{DateTime, Local, TimeZone, Utc};

use crate::store::LetterStore;
use crate::types::{format_timestamp, LetterId, LetterRecord};

/// Text of the placeholder row shown for an empty archive
pub const EMPTY_ARCHIVE_TEXT: &str = "No letters have been buried yet.";

/// One row of the archive list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ListRow {
    Letter {
        id: LetterId,
        /// Nickname truncated for the row
        nickname: String,
        /// `-YYYY.MM.DD HH:MM:SS`
        time_label: String,
    },
    /// The archive is empty
    Placeholder(&'static str),
}

/// Expanded view of the selected letter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LetterDetail {
    pub id: LetterId,
    /// e.g. `Sam's RIP MIND`
    pub title: String,
    /// e.g. `-2025.03.07 09:05:02 since`
    pub since: String,
    pub content: String,
}

/// Sorted, selectable view over the archive.
///
/// Times are rendered in the local timezone unless constructed with
/// [`LetterList::with_timezone`].
#[derive(Debug, Clone)]
pub struct LetterList<Tz: TimeZone = Local> {
    tz: Tz,
    letters: Vec<LetterRecord>,
    rows: Vec<ListRow>,
    selected: Option<usize>,
    detail: Option<LetterDetail>,
}

impl LetterList<Local> {
    pub fn new() -> Self {
        Self::with_timezone(Local)
    }
}

impl Default for LetterList<Local> {
    fn default() -> Self {
        Self::new()
    }
}

impl<Tz> LetterList<Tz>
where
    Tz: TimeZone,
    Tz::Offset: std::fmt::Display,
{
    pub fn with_timezone(tz: Tz) -> Self {
        Self {
            tz,
            letters: Vec::new(),
            rows: vec![ListRow::Placeholder(EMPTY_ARCHIVE_TEXT)],
            selected: None,
            detail: None,
        }
    }

    /// Reload from the store and rebuild the rows.
    ///
    /// The newest letter is selected; the detail surface is closed.
    pub fn refresh(&mut self, store: &LetterStore) {
        self.set_letters(store.load());
    }

    /// Rebuild the rows from an explicit set of letters.
    pub fn set_letters(&mut self, mut letters: Vec<LetterRecord>) {
        letters.sort_by(|a, b| b.created_at.cmp(&a.created_at));

        self.rows = if letters.is_empty() {
            vec![ListRow::Placeholder(EMPTY_ARCHIVE_TEXT)]
        } else {
            letters
                .iter()
                .map(|l| ListRow::Letter {
                    id: l.id.clone(),
                    nickname: l.short_nickname(),
                    time_label: format!("-{}", self.format(&l.created_at)),
                })
                .collect()
        };
        self.selected = if letters.is_empty() { None } else { Some(0) };
        self.detail = None;
        self.letters = letters;
    }

    pub fn rows(&self) -> &[ListRow] {
        &self.rows
    }

    /// Letters in display order (newest first)
    pub fn letters(&self) -> &[LetterRecord] {
        &self.letters
    }

    pub fn is_empty(&self) -> bool {
        self.letters.is_empty()
    }

    pub fn selected_index(&self) -> Option<usize> {
        self.selected
    }

    pub fn selected(&self) -> Option<&LetterRecord> {
        self.selected.and_then(|i| self.letters.get(i))
    }

    /// Select a row and open its detail.
    ///
    /// Deselects every other row. Out of range (or the placeholder) is a no-op.
    pub fn select(&mut self, index: usize) -> Option<&LetterDetail> {
        let letter = self.letters.get(index)?;
        let detail = LetterDetail {
            id: letter.id.clone(),
            title: format!("{}'s RIP MIND", letter.nickname),
            since: format!("-{} since", self.format(&letter.created_at)),
            content: letter.content.clone(),
        };

        self.selected = Some(index);
        self.detail = Some(detail);
        self.detail.as_ref()
    }

    /// Select the row holding `id`.
    pub fn select_id(&mut self, id: &LetterId) -> Option<&LetterDetail> {
        let index = self.letters.iter().position(|l| &l.id == id)?;
        self.select(index)
    }

    pub fn detail(&self) -> Option<&LetterDetail> {
        self.detail.as_ref()
    }

    /// Dismiss the detail surface. Selection is kept.
    pub fn close_detail(&mut self) {
        self.detail = None;
    }

    fn format(&self, at: &DateTime<Utc>) -> String {
        format_timestamp(at, &self.tz)
    }
}
