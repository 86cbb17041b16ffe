//! Database model for audit log entries.

use chrono::NaiveDateTime;
use diesel::prelude::*;
use serde::{Deserialize, Serialize};

use crosslist_core::events::AuditEvent;

#[derive(
    Queryable, Identifiable, Insertable, Selectable, PartialEq, Serialize, Deserialize, Debug, Clone,
)]
#[diesel(table_name = crate::schema::audit_log)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct AuditLogDB {
    pub id: String,
    pub user_id: String,
    pub listing_id: Option<String>,
    pub product_id: Option<String>,
    pub event_type: String,
    pub event_data: String,
    pub created_at: NaiveDateTime,
}

impl From<AuditEvent> for AuditLogDB {
    fn from(event: AuditEvent) -> Self {
        // The serde tag doubles as the queryable event_type column.
        let data = serde_json::to_value(&event.kind).unwrap_or_default();
        let event_type = data
            .get("type")
            .and_then(|v| v.as_str())
            .unwrap_or("unknown")
            .to_string();

        Self {
            id: uuid::Uuid::new_v4().to_string(),
            user_id: event.user_id,
            listing_id: event.listing_id,
            product_id: event.product_id,
            event_type,
            event_data: data.to_string(),
            created_at: chrono::Utc::now().naive_utc(),
        }
    }
}
