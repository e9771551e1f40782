use crate::types::ActivityStatus;
use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use sha2::{Digest, Sha256};
use std::collections::BTreeMap;

/// One synthetic execution of an applet. Never persisted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Activity {
    pub id: String,
    /// Rendered as a string, like every other id on the wire.
    #[serde(with = "id_string")]
    pub applet_id: u64,
    pub status: ActivityStatus,
    #[serde(serialize_with = "serialize_ran_at")]
    pub ran_at: DateTime<Utc>,
    pub trigger_data: TriggerData,
    pub action_data: ActionData,
    pub error_message: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TriggerData {
    pub service: String,
    pub event: String,
    pub details: BTreeMap<String, String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ActionData {
    pub service: String,
    pub result: String,
    pub completed: bool,
}

fn serialize_ran_at<S: Serializer>(ran_at: &DateTime<Utc>, s: S) -> Result<S::Ok, S::Error> {
    s.serialize_str(&ran_at.to_rfc3339_opts(SecondsFormat::Secs, true))
}

mod id_string {
    use super::*;

    pub fn serialize<S: Serializer>(id: &u64, s: S) -> Result<S::Ok, S::Error> {
        s.collect_str(id)
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(d: D) -> Result<u64, D::Error> {
        let raw = String::deserialize(d)?;
        raw.parse().map_err(serde::de::Error::custom)
    }
}

impl Activity {
    pub fn is_success(&self) -> bool {
        self.status == ActivityStatus::Success
    }

    pub fn is_failed(&self) -> bool {
        self.status == ActivityStatus::Failed
    }

    pub fn is_skipped(&self) -> bool {
        self.status == ActivityStatus::Skipped
    }

    /// Every value a free-text search looks at, stringified.
    pub fn search_fields(&self) -> impl Iterator<Item = String> + '_ {
        let trigger = [&self.trigger_data.service, &self.trigger_data.event]
            .into_iter()
            .chain(self.trigger_data.details.values())
            .cloned();
        let action = [
            self.action_data.service.clone(),
            self.action_data.result.clone(),
            self.action_data.completed.to_string(),
        ];
        trigger
            .chain(action)
            .chain(self.error_message.iter().cloned())
            .chain(std::iter::once(self.status.as_str().to_string()))
    }

    /// Case-insensitive substring match over `search_fields`.
    ///
    /// `needle` must already be lowercased.
    pub fn matches_search(&self, needle: &str) -> bool {
        self.search_fields()
            .any(|field| field.to_lowercase().contains(needle))
    }
}

/// Stable id for the activity an applet ran at `ran_at`.
///
/// SHA-256 of `"{applet_id}-{unix_seconds}"`, first 16 bytes rendered as a
/// hyphenated UUID.
pub fn activity_id(applet_id: u64, ran_at: DateTime<Utc>) -> String {
    let digest = Sha256::digest(format!("{applet_id}-{}", ran_at.timestamp()).as_bytes());
    let mut bytes = [0u8; 16];
    bytes.copy_from_slice(&digest[..16]);
    uuid::Uuid::from_bytes(bytes).hyphenated().to_string()
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
