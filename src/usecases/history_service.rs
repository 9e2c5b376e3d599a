//! History service. Reads back audited evaluations and exports them.

use crate::adapters::export::records_to_csv;
use crate::domain::{DomainError, EvaluationRecord};
use crate::ports::AuditLogPort;
use std::path::Path;
use std::sync::Arc;
use tokio::fs;
use tracing::info;

/// Upper bound on records returned by a single listing.
pub const MAX_HISTORY_LIMIT: usize = 500;

pub struct HistoryService {
    audit: Arc<dyn AuditLogPort>,
}

impl HistoryService {
    pub fn new(audit: Arc<dyn AuditLogPort>) -> Self {
        Self { audit }
    }

    /// Most recent evaluations, newest first. `limit` is clamped to `1..=MAX_HISTORY_LIMIT`.
    pub async fn recent(&self, limit: usize) -> Result<Vec<EvaluationRecord>, DomainError> {
        self.audit
            .recent(limit.clamp(1, MAX_HISTORY_LIMIT))
            .await
    }

    /// Write every audited evaluation to `path` as CSV. Returns the number of rows written.
    pub async fn export_csv(&self, path: &Path) -> Result<usize, DomainError> {
        let records = self.audit.all().await?;
        let csv = records_to_csv(&records)
            .map_err(|e| DomainError::Export(format!("Failed to generate CSV: {}", e)))?;

        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)
                .await
                .map_err(|e| DomainError::Export(format!("Failed to create export dir: {}", e)))?;
        }
        fs::write(path, csv)
            .await
            .map_err(|e| DomainError::Export(format!("Failed to write export: {}", e)))?;

        info!(path = %path.display(), rows = records.len(), "history exported");
        Ok(records.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::persistence::JsonlAuditLog;
    use crate::domain::{EvaluationMode, NewEvaluation};

    fn entry(ck_value: f64) -> NewEvaluation {
        NewEvaluation {
            caller: "dr-lin".to_string(),
            mode: EvaluationMode::Myopathy,
            ck_value,
            transaminase: None,
            bilirubin: None,
            muscle_symptoms: false,
            recommendation: "Continue statin therapy.".to_string(),
            created_at: 1_704_067_200,
        }
    }

    #[tokio::test]
    async fn test_recent_clamps_limit() {
        let dir = tempfile::tempdir().unwrap();
        let log = Arc::new(JsonlAuditLog::open(dir.path()).await.unwrap());
        for ck in [10.0, 20.0, 30.0] {
            log.record(&entry(ck)).await.unwrap();
        }
        let service = HistoryService::new(log);

        let zero = service.recent(0).await.unwrap();
        assert_eq!(zero.len(), 1);
        assert_eq!(zero[0].ck_value, 30.0);
        assert_eq!(service.recent(10_000).await.unwrap().len(), 3);
    }

    #[tokio::test]
    async fn test_export_csv_writes_all_rows() {
        let dir = tempfile::tempdir().unwrap();
        let log = Arc::new(JsonlAuditLog::open(dir.path()).await.unwrap());
        log.record(&entry(10.0)).await.unwrap();
        log.record(&entry(20.0)).await.unwrap();
        let service = HistoryService::new(log);

        let out = dir.path().join("exports").join("history.csv");
        let rows = service.export_csv(&out).await.unwrap();
        assert_eq!(rows, 2);

        let written = std::fs::read_to_string(&out).unwrap();
        assert_eq!(written.lines().count(), 3);
        assert!(written.contains(",myopathy,10,"));
    }
}
