use chrono::{DateTime, Duration, NaiveDate, NaiveDateTime, Utc};
use serde::{Deserialize, Serialize};

/// A window bound as supplied by a caller: either an already-parsed instant
/// or raw text that still needs parsing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum TimeInput {
    At(DateTime<Utc>),
    Text(String),
}

impl From<DateTime<Utc>> for TimeInput {
    fn from(t: DateTime<Utc>) -> Self {
        TimeInput::At(t)
    }
}

impl From<&str> for TimeInput {
    fn from(s: &str) -> Self {
        TimeInput::Text(s.to_string())
    }
}

impl From<String> for TimeInput {
    fn from(s: String) -> Self {
        TimeInput::Text(s)
    }
}

impl TimeInput {
    /// `None` when the text is not a recognizable timestamp.
    pub fn resolve(&self) -> Option<DateTime<Utc>> {
        match self {
            TimeInput::At(t) => Some(*t),
            TimeInput::Text(s) => parse_timestamp(s),
        }
    }
}

const NAIVE_FORMATS: &[&str] = &["%Y-%m-%dT%H:%M:%S", "%Y-%m-%d %H:%M:%S", "%Y-%m-%dT%H:%M"];

/// Parse RFC 3339, a zone-less date-time (taken as UTC) or a bare date
/// (midnight UTC).
pub fn parse_timestamp(s: &str) -> Option<DateTime<Utc>> {
    let s = s.trim();
    if s.is_empty() {
        return None;
    }
    if let Ok(t) = DateTime::parse_from_rfc3339(s) {
        return Some(t.with_timezone(&Utc));
    }
    for fmt in NAIVE_FORMATS {
        if let Ok(t) = NaiveDateTime::parse_from_str(s, fmt) {
            return Some(t.and_utc());
        }
    }
    NaiveDate::parse_from_str(s, "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .map(|t| t.and_utc())
}

/// The `[since, before]` range activities are generated within.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Window {
    pub since: DateTime<Utc>,
    pub before: DateTime<Utc>,
}

impl Window {
    /// Resolve optional bounds against `now`. Missing or unparsable bounds
    /// become `now - default_days` and `now` respectively.
    pub fn resolve(
        since: Option<&TimeInput>,
        before: Option<&TimeInput>,
        now: DateTime<Utc>,
        default_days: u32,
    ) -> Self {
        let since = since
            .and_then(TimeInput::resolve)
            .unwrap_or_else(|| days_before(now, default_days));
        let before = before.and_then(TimeInput::resolve).unwrap_or(now);
        Self { since, before }
    }

    pub fn contains(&self, t: DateTime<Utc>) -> bool {
        self.since <= t && t <= self.before
    }
}

/// `now - days`, saturating at the earliest representable instant.
fn days_before(now: DateTime<Utc>, days: u32) -> DateTime<Utc> {
    Duration::try_days(i64::from(days))
        .and_then(|d| now.checked_sub_signed(d))
        .unwrap_or(DateTime::<Utc>::MIN_UTC)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
