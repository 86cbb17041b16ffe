//! Sync status domain models.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Lifecycle of one `(user, marketplace)` sync state machine.
///
/// `idle → syncing → {completed | error}`; `syncing` is set immediately
/// on entry so concurrent triggers can observe an in-progress run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SyncRunStatus {
    Idle,
    Syncing,
    Completed,
    Error,
}

impl SyncRunStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            SyncRunStatus::Idle => "idle",
            SyncRunStatus::Syncing => "syncing",
            SyncRunStatus::Completed => "completed",
            SyncRunStatus::Error => "error",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "idle" => Some(SyncRunStatus::Idle),
            "syncing" => Some(SyncRunStatus::Syncing),
            "completed" => Some(SyncRunStatus::Completed),
            "error" => Some(SyncRunStatus::Error),
            _ => None,
        }
    }
}

/// One row per `(user, marketplace)`: created on the first sync attempt,
/// updated at each phase transition, never deleted.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SyncStatusRecord {
    pub id: String,
    pub user_id: String,
    pub marketplace_id: String,
    pub status: SyncRunStatus,
    pub last_full_sync: Option<DateTime<Utc>>,
    pub total_listings: i64,
    pub error_message: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl SyncStatusRecord {
    /// Fresh record for a pair that has never synced.
    pub fn new(user_id: &str, marketplace_id: &str) -> Self {
        let now = Utc::now();
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            user_id: user_id.to_string(),
            marketplace_id: marketplace_id.to_string(),
            status: SyncRunStatus::Idle,
            last_full_sync: None,
            total_listings: 0,
            error_message: None,
            created_at: now,
            updated_at: now,
        }
    }
}
