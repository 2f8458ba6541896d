//! Derived views for the conversation history sidebar.

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use serde::{Deserialize, Serialize};

use nexus_types::message::Message;

const TITLE_CHARS: usize = 50;
const PREVIEW_CHARS: usize = 80;
const ELLIPSIS: &str = "...";

/// One past conversation as listed by `GET /history`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HistoryEntry {
    /// The conversation's session id
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub preview: String,
    /// ISO 8601; the backend may omit the offset
    pub timestamp: String,
}

impl HistoryEntry {
    /// Summarise the live conversation. `None` until something beyond the
    /// opening greeting has been said.
    pub fn from_conversation(
        session_id: &str,
        messages: &[Message],
        now: DateTime<Utc>,
    ) -> Option<Self> {
        if messages.len() <= 1 {
            return None;
        }

        let first_user = messages.iter().find(|m| m.is_user());
        let last_assistant = messages.iter().rev().find(|m| m.is_assistant());

        let title = match first_user {
            Some(m) => {
                let head = truncate(&m.content, TITLE_CHARS);
                if m.content.chars().count() > TITLE_CHARS {
                    format!("{}{}", head, ELLIPSIS)
                } else {
                    head
                }
            }
            None => "New Chat".to_string(),
        };

        let preview_source = last_assistant.or(first_user).map(|m| m.content.as_str());
        let preview = format!(
            "{}{}",
            truncate(preview_source.unwrap_or(""), PREVIEW_CHARS),
            ELLIPSIS
        );

        Some(Self {
            id: session_id.to_string(),
            title,
            preview,
            timestamp: now.to_rfc3339(),
        })
    }

    /// Calendar date of `timestamp`, if it parses
    pub fn date(&self) -> Option<NaiveDate> {
        if let Ok(dt) = DateTime::parse_from_rfc3339(&self.timestamp) {
            return Some(dt.with_timezone(&Utc).date_naive());
        }
        NaiveDateTime::parse_from_str(&self.timestamp, "%Y-%m-%dT%H:%M:%S%.f")
            .map(|dt| dt.date())
            .ok()
    }

    /// Case-insensitive match on title or preview
    pub fn matches(&self, term: &str) -> bool {
        let term = term.to_lowercase();
        self.title.to_lowercase().contains(&term) || self.preview.to_lowercase().contains(&term)
    }
}

/// Replace the entry with the same id in place, or insert at the front.
pub fn upsert(entries: &mut Vec<HistoryEntry>, entry: HistoryEntry) {
    match entries.iter_mut().find(|e| e.id == entry.id) {
        Some(existing) => *existing = entry,
        None => entries.insert(0, entry),
    }
}

pub fn remove(entries: &mut Vec<HistoryEntry>, id: &str) -> bool {
    let before = entries.len();
    entries.retain(|e| e.id != id);
    entries.len() != before
}

pub fn filter<'a>(entries: &'a [HistoryEntry], term: &str) -> Vec<&'a HistoryEntry> {
    entries.iter().filter(|e| e.matches(term)).collect()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DateGroup {
    Today,
    Yesterday,
    On(NaiveDate),
    Undated,
}

impl DateGroup {
    fn of(date: Option<NaiveDate>, today: NaiveDate) -> Self {
        match date {
            Some(d) if d == today => DateGroup::Today,
            Some(d) if today.pred_opt() == Some(d) => DateGroup::Yesterday,
            Some(d) => DateGroup::On(d),
            None => DateGroup::Undated,
        }
    }
}

impl std::fmt::Display for DateGroup {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DateGroup::Today => f.write_str("Today"),
            DateGroup::Yesterday => f.write_str("Yesterday"),
            DateGroup::On(d) => write!(f, "{}", d.format("%Y-%m-%d")),
            DateGroup::Undated => f.write_str("Earlier"),
        }
    }
}

/// Group entries by calendar day relative to `today`.
/// Groups appear in the order their first entry appears.
pub fn group_by_date<'a>(
    entries: &[&'a HistoryEntry],
    today: NaiveDate,
) -> Vec<(DateGroup, Vec<&'a HistoryEntry>)> {
    let mut groups: Vec<(DateGroup, Vec<&'a HistoryEntry>)> = Vec::new();
    for &entry in entries {
        let group = DateGroup::of(entry.date(), today);
        match groups.iter_mut().find(|(g, _)| *g == group) {
            Some((_, members)) => members.push(entry),
            None => groups.push((group, vec![entry])),
        }
    }
    groups
}

fn truncate(text: &str, max_chars: usize) -> String {
    text.chars().take(max_chars).collect()
}
