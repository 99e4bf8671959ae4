//! Core types for RIP MIND

use chrono::{DateTime, TimeZone, Utc};
use serde::{Deserialize, Serialize};
use ulid::Ulid;

/// Maximum nickname length accepted by the identity step (in characters).
pub const NICKNAME_MAX_CHARS: usize = 6;

/// Number of nickname characters shown in a list row.
pub const NICKNAME_ROW_CHARS: usize = 2;

/// Unique identifier for a letter.
///
/// New letters get a ULID derived from their creation time. The id is kept
/// opaque so archives written by older front ends (millisecond strings) still load.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LetterId(String);

impl LetterId {
    /// Generate a new id for a letter created at `at`
    pub fn generate(at: DateTime<Utc>) -> Self {
        Self(Ulid::from_datetime(at.into()).to_string())
    }

    /// Wrap an existing id string
    pub fn from_string(s: impl Into<String>) -> Self {
        Self(s.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for LetterId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// A submitted letter.
///
/// Built once from the [`FlowDraft`] at submission time and never mutated
/// afterwards. The on-disk field names match the archive slot layout
/// (`timestamp`, empty `phone` when absent).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LetterRecord {
    pub id: LetterId,
    /// Full nickname; list rows truncate it for display
    pub nickname: String,
    /// Contact number, only present when consent was granted
    #[serde(default, with = "phone_field")]
    pub phone: Option<String>,
    pub content: String,
    /// Submission time, assigned by the flow
    #[serde(rename = "timestamp")]
    pub created_at: DateTime<Utc>,
}

impl LetterRecord {
    /// Nickname cut to the list-row display length.
    pub fn short_nickname(&self) -> String {
        self.nickname.chars().take(NICKNAME_ROW_CHARS).collect()
    }

    /// Submission time as `YYYY.MM.DD HH:MM:SS` in the given timezone.
    pub fn formatted_time<Tz: TimeZone>(&self, tz: &Tz) -> String
    where
        Tz::Offset: std::fmt::Display,
    {
        format_timestamp(&self.created_at, tz)
    }

    /// How long ago the letter was written, e.g. `12 min ago`.
    pub fn relative_time(&self) -> String {
        self.age_at(Utc::now())
    }

    /// Age of the letter as seen at `now`. Future times read as `just now`.
    pub fn age_at(&self, now: DateTime<Utc>) -> String {
        let age = now.signed_duration_since(self.created_at);
        match (age.num_days(), age.num_hours(), age.num_minutes()) {
            (days, _, _) if days >= 2 => format!("{} days ago", days),
            (1, _, _) => "yesterday".to_string(),
            (_, hours, _) if hours >= 1 => format!("{} h ago", hours),
            (_, _, minutes) if minutes >= 1 => format!("{} min ago", minutes),
            _ => "just now".to_string(),
        }
    }
}

/// Format a timestamp as `YYYY.MM.DD HH:MM:SS` in `tz`.
pub fn format_timestamp<Tz: TimeZone>(at: &DateTime<Utc>, tz: &Tz) -> String
where
    Tz::Offset: std::fmt::Display,
{
    at.with_timezone(tz).format("%Y.%m.%d %H:%M:%S").to_string()
}

/// Blank phone numbers are stored as `""` and read back as `None`.
mod phone_field {
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(phone: &Option<String>, s: S) -> Result<S::Ok, S::Error> {
        s.serialize_str(phone.as_deref().unwrap_or(""))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(d: D) -> Result<Option<String>, D::Error> {
        let raw = Option::<String>::deserialize(d)?;
        Ok(raw.filter(|p| !p.trim().is_empty()))
    }
}

/// In-progress letter, owned by the flow until submission or restart.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FlowDraft {
    nickname: String,
    phone: String,
    content: String,
    /// The "I agree" checkbox on the identity step
    acknowledged: bool,
}

impl FlowDraft {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the nickname, keeping at most [`NICKNAME_MAX_CHARS`] characters.
    pub fn set_nickname(&mut self, nickname: &str) {
        self.nickname = nickname.chars().take(NICKNAME_MAX_CHARS).collect();
    }

    pub fn set_phone(&mut self, phone: &str) {
        self.phone = phone.to_string();
    }

    pub fn set_content(&mut self, content: &str) {
        self.content = content.to_string();
    }

    pub fn set_acknowledged(&mut self, acknowledged: bool) {
        self.acknowledged = acknowledged;
    }

    /// Erase the letter body ("erase all" on the letter step).
    pub fn clear_content(&mut self) {
        self.content.clear();
    }

    pub fn nickname(&self) -> &str {
        &self.nickname
    }

    pub fn phone(&self) -> &str {
        &self.phone
    }

    pub fn content(&self) -> &str {
        &self.content
    }

    pub fn acknowledged(&self) -> bool {
        self.acknowledged
    }

    /// Character counter shown under the nickname input, e.g. `(3 / 6)`.
    pub fn nickname_counter(&self) -> String {
        format!("({} / {})", self.nickname.chars().count(), NICKNAME_MAX_CHARS)
    }

    /// Snapshot the draft into an immutable record.
    ///
    /// The phone is only copied when `consent` is granted and non-blank.
    pub fn to_record(&self, consent: bool, created_at: DateTime<Utc>) -> LetterRecord {
        let phone = if consent && !self.phone.trim().is_empty() {
            Some(self.phone.clone())
        } else {
            None
        };

        LetterRecord {
            id: LetterId::generate(created_at),
            nickname: self.nickname.clone(),
            phone,
            content: self.content.clone(),
            created_at,
        }
    }
}

/// Where a finished letter goes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Destination {
    /// Send it now (notification or in-page wall, depending on [`crate::LiveMode`])
    Live,
    /// Bury it in the persisted RIP MIND archive
    Archive,
}
