mod model;
mod sink;

pub use model::AuditLogDB;
pub use sink::{spawn_audit_sink, SqliteAuditSink};
