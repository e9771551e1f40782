use serde::{Deserialize, Serialize};
use std::fmt;

// ---------------------------------------------------------------------------
// ActivityStatus
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ActivityStatus {
    Success,
    Failed,
    Skipped,
}

impl ActivityStatus {
    pub fn all() -> &'static [ActivityStatus] {
        &[
            ActivityStatus::Success,
            ActivityStatus::Failed,
            ActivityStatus::Skipped,
        ]
    }

    pub fn as_str(self) -> &'static str {
        match self {
            ActivityStatus::Success => "success",
            ActivityStatus::Failed => "failed",
            ActivityStatus::Skipped => "skipped",
        }
    }

    /// Map a roll in `0..100` onto the weighted status distribution:
    /// 80% success, 10% failed, 10% skipped.
    pub fn from_roll(roll: u32) -> ActivityStatus {
        match roll {
            0..=79 => ActivityStatus::Success,
            80..=89 => ActivityStatus::Failed,
            _ => ActivityStatus::Skipped,
        }
    }

    /// Interpret a user-supplied status filter.
    ///
    /// Returns `None` for anything that is not an exact status name, which
    /// callers treat as "no status filter".
    pub fn parse_filter(s: &str) -> Option<ActivityStatus> {
        Self::all().iter().copied().find(|st| st.as_str() == s)
    }
}

impl fmt::Display for ActivityStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
