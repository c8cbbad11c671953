use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// The single running timer, persisted in `timer.json`.
#[derive(PartialEq, Eq, Debug, Serialize, Deserialize, Clone)]
#[serde(rename_all = "camelCase")]
pub struct TimerEntity {
    pub id: String,
    pub start_time: DateTime<Utc>,
}

/// An issue the user wants to keep in sight. Stored as an ordered list in `focus.json`, the order
/// of the list is the order of insertion.
#[derive(PartialEq, Eq, Debug, Serialize, Deserialize, Clone)]
pub struct FocusItemEntity {
    pub id: String,
    pub summary: String,
    pub created: DateTime<Utc>,
    pub url: String,
}
