//! Audit store adapters. SQLite (libsql) or JSON Lines, chosen by configuration.

pub mod jsonl_repo;
pub mod sqlite_repo;

pub use jsonl_repo::JsonlAuditLog;
pub use sqlite_repo::SqliteAuditLog;

use crate::domain::DomainError;
use crate::ports::AuditLogPort;
use crate::shared::config::AuditBackend;
use std::path::Path;
use std::sync::Arc;
use tracing::info;

/// Open the configured backend under `data_dir`. `AuditBackend::None` yields `None`.
pub async fn open_audit_log(
    backend: AuditBackend,
    data_dir: &Path,
) -> Result<Option<Arc<dyn AuditLogPort>>, DomainError> {
    let log: Arc<dyn AuditLogPort> = match backend {
        AuditBackend::Sqlite => Arc::new(SqliteAuditLog::connect(data_dir).await?),
        AuditBackend::Jsonl => Arc::new(JsonlAuditLog::open(data_dir).await?),
        AuditBackend::None => {
            info!("audit store disabled");
            return Ok(None);
        }
    };
    Ok(Some(log))
}
