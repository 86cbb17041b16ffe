//! Sync state repository trait.

use async_trait::async_trait;

use crate::errors::Result;

use super::sync_state_model::SyncStatusRecord;

/// Trait for sync status persistence.
///
/// Implementations upsert by `(user, marketplace)`; the record is
/// created on the first transition and never deleted.
#[async_trait]
pub trait SyncStateRepositoryTrait: Send + Sync {
    /// Current record for the pair, if any sync was ever attempted.
    fn get(&self, user_id: &str, marketplace_id: &str) -> Result<Option<SyncStatusRecord>>;

    /// Transition to `syncing`, creating the record if needed. Clears
    /// any previous error message.
    async fn mark_syncing(
        &self,
        user_id: &str,
        marketplace_id: &str,
    ) -> Result<SyncStatusRecord>;

    /// Terminal success: sets `completed`, `total_listings` and
    /// `last_full_sync = now`.
    async fn mark_completed(
        &self,
        user_id: &str,
        marketplace_id: &str,
        total_listings: i64,
    ) -> Result<()>;

    /// Terminal failure: sets `error` with the message.
    async fn mark_error(
        &self,
        user_id: &str,
        marketplace_id: &str,
        message: &str,
    ) -> Result<()>;
}
