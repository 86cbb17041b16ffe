//! SQLite-backed audit sink.
//!
//! `emit` pushes onto a bounded channel and returns immediately; a
//! spawned drain task performs the inserts through the writer actor.
//! Every failure path drops the event with a log line - audit problems
//! never propagate into business operations.

use diesel::prelude::*;
use log::warn;
use tokio::sync::mpsc;

use crate::db::WriteHandle;
use crate::errors::DieselErrorExt;
use crate::schema::audit_log;

use crosslist_core::events::{AuditEvent, AuditSink};

use super::model::AuditLogDB;

/// Queue depth before events are dropped. Sized for bursts from a full
/// reconciliation pass.
const AUDIT_QUEUE_CAPACITY: usize = 4096;

/// Audit sink that persists events to the `audit_log` table.
#[derive(Clone)]
pub struct SqliteAuditSink {
    tx: mpsc::Sender<AuditEvent>,
}

impl AuditSink for SqliteAuditSink {
    fn emit(&self, event: AuditEvent) {
        // try_send keeps emit non-blocking; a full queue sheds events.
        if let Err(e) = self.tx.try_send(event) {
            warn!("audit event dropped: {}", e);
        }
    }
}

/// Spawns the drain task and returns the sink handle.
pub fn spawn_audit_sink(writer: WriteHandle) -> SqliteAuditSink {
    let (tx, mut rx) = mpsc::channel::<AuditEvent>(AUDIT_QUEUE_CAPACITY);

    tokio::spawn(async move {
        while let Some(event) = rx.recv().await {
            let row: AuditLogDB = event.into();
            let result = writer
                .exec(move |conn| {
                    diesel::insert_into(audit_log::table)
                        .values(&row)
                        .execute(conn)
                        .map_err(|e| e.into_core_error())
                })
                .await;

            if let Err(e) = result {
                warn!("failed to persist audit event: {}", e);
            }
        }
    });

    SqliteAuditSink { tx }
}
