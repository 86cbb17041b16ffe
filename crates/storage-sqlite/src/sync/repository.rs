//! Diesel-backed sync state repository.

use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use diesel::prelude::*;
use diesel::sqlite::SqliteConnection;

use crate::db::{get_connection, DbPool, WriteHandle};
use crate::errors::DieselErrorExt;
use crate::schema::sync_status;
use crate::schema::sync_status::dsl::*;

use crosslist_core::errors::{DatabaseError, Result};
use crosslist_core::sync::{SyncRunStatus, SyncStateRepositoryTrait, SyncStatusRecord};

use super::model::SyncStatusDB;

pub struct SyncStateRepository {
    pool: Arc<DbPool>,
    writer: WriteHandle,
}

impl SyncStateRepository {
    pub fn new(pool: Arc<DbPool>, writer: WriteHandle) -> Self {
        Self { pool, writer }
    }

    fn load_pair(
        conn: &mut SqliteConnection,
        user: &str,
        marketplace: &str,
    ) -> Result<Option<SyncStatusDB>> {
        sync_status::table
            .filter(user_id.eq(user))
            .filter(marketplace_id.eq(marketplace))
            .select(SyncStatusDB::as_select())
            .first::<SyncStatusDB>(conn)
            .optional()
            .map_err(|e| e.into_core_error())
    }
}

#[async_trait]
impl SyncStateRepositoryTrait for SyncStateRepository {
    fn get(&self, user: &str, marketplace: &str) -> Result<Option<SyncStatusRecord>> {
        let mut conn = get_connection(&self.pool)?;
        Ok(Self::load_pair(&mut conn, user, marketplace)?.map(SyncStatusRecord::from))
    }

    async fn mark_syncing(&self, user: &str, marketplace: &str) -> Result<SyncStatusRecord> {
        let user = user.to_string();
        let marketplace = marketplace.to_string();
        self.writer
            .exec(move |conn| {
                let now = Utc::now().naive_utc();
                match Self::load_pair(conn, &user, &marketplace)? {
                    Some(existing) => {
                        diesel::update(sync_status.find(&existing.id))
                            .set((
                                status.eq(SyncRunStatus::Syncing.as_str()),
                                error_message.eq(None::<String>),
                                updated_at.eq(now),
                            ))
                            .execute(conn)
                            .map_err(|e| e.into_core_error())?;
                        let refreshed = SyncStatusDB {
                            status: SyncRunStatus::Syncing.as_str().to_string(),
                            error_message: None,
                            updated_at: now,
                            ..existing
                        };
                        Ok(refreshed.into())
                    }
                    None => {
                        let mut record = SyncStatusRecord::new(&user, &marketplace);
                        record.status = SyncRunStatus::Syncing;
                        let row: SyncStatusDB = record.into();
                        diesel::insert_into(sync_status::table)
                            .values(&row)
                            .execute(conn)
                            .map_err(|e| e.into_core_error())?;
                        Ok(row.into())
                    }
                }
            })
            .await
    }

    async fn mark_completed(
        &self,
        user: &str,
        marketplace: &str,
        total: i64,
    ) -> Result<()> {
        let user = user.to_string();
        let marketplace = marketplace.to_string();
        self.writer
            .exec(move |conn| {
                let now = Utc::now().naive_utc();
                let affected = diesel::update(
                    sync_status
                        .filter(user_id.eq(&user))
                        .filter(marketplace_id.eq(&marketplace)),
                )
                .set((
                    status.eq(SyncRunStatus::Completed.as_str()),
                    total_listings.eq(total),
                    last_full_sync.eq(Some(now)),
                    error_message.eq(None::<String>),
                    updated_at.eq(now),
                ))
                .execute(conn)
                .map_err(|e| e.into_core_error())?;

                if affected == 0 {
                    return Err(
                        DatabaseError::NotFound(format!("{}/{}", user, marketplace)).into()
                    );
                }
                Ok(())
            })
            .await
    }

    async fn mark_error(&self, user: &str, marketplace: &str, message: &str) -> Result<()> {
        let user = user.to_string();
        let marketplace = marketplace.to_string();
        let message = message.to_string();
        self.writer
            .exec(move |conn| {
                let affected = diesel::update(
                    sync_status
                        .filter(user_id.eq(&user))
                        .filter(marketplace_id.eq(&marketplace)),
                )
                .set((
                    status.eq(SyncRunStatus::Error.as_str()),
                    error_message.eq(Some(message.clone())),
                    updated_at.eq(Utc::now().naive_utc()),
                ))
                .execute(conn)
                .map_err(|e| e.into_core_error())?;

                if affected == 0 {
                    return Err(
                        DatabaseError::NotFound(format!("{}/{}", user, marketplace)).into()
                    );
                }
                Ok(())
            })
            .await
    }
}
