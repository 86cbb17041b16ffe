//! Database model for sync status records.

use chrono::{NaiveDateTime, TimeZone, Utc};
use diesel::prelude::*;
use serde::{Deserialize, Serialize};

use crosslist_core::sync::{SyncRunStatus, SyncStatusRecord};

#[derive(
    Queryable,
    Identifiable,
    Insertable,
    AsChangeset,
    Selectable,
    PartialEq,
    Serialize,
    Deserialize,
    Debug,
    Clone,
)]
#[diesel(table_name = crate::schema::sync_status)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct SyncStatusDB {
    pub id: String,
    pub user_id: String,
    pub marketplace_id: String,
    pub status: String,
    pub last_full_sync: Option<NaiveDateTime>,
    pub total_listings: i64,
    pub error_message: Option<String>,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

impl From<SyncStatusDB> for SyncStatusRecord {
    fn from(db: SyncStatusDB) -> Self {
        Self {
            status: SyncRunStatus::parse(&db.status).unwrap_or(SyncRunStatus::Idle),
            id: db.id,
            user_id: db.user_id,
            marketplace_id: db.marketplace_id,
            last_full_sync: db.last_full_sync.map(|t| Utc.from_utc_datetime(&t)),
            total_listings: db.total_listings,
            error_message: db.error_message,
            created_at: Utc.from_utc_datetime(&db.created_at),
            updated_at: Utc.from_utc_datetime(&db.updated_at),
        }
    }
}

impl From<SyncStatusRecord> for SyncStatusDB {
    fn from(domain: SyncStatusRecord) -> Self {
        Self {
            id: domain.id,
            user_id: domain.user_id,
            marketplace_id: domain.marketplace_id,
            status: domain.status.as_str().to_string(),
            last_full_sync: domain.last_full_sync.map(|t| t.naive_utc()),
            total_listings: domain.total_listings,
            error_message: domain.error_message,
            created_at: domain.created_at.naive_utc(),
            updated_at: domain.updated_at.naive_utc(),
        }
    }
}
