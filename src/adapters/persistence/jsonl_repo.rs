//! Implements AuditLogPort with an append-only JSON Lines file.
//!
//! One record per line in data/evaluations.jsonl. Ids are sequential; the next id
//! is recovered from the highest id on disk when the log is opened.

use crate::domain::{DomainError, EvaluationRecord, NewEvaluation};
use crate::ports::AuditLogPort;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tokio::fs;
use tokio::io::AsyncWriteExt;
use tokio::sync::Mutex;
use tracing::{info, warn};

pub const JSONL_FILE: &str = "evaluations.jsonl";

pub struct JsonlAuditLog {
    path: PathBuf,
    /// Next id to assign. Held across the append so ids and line order agree.
    next_id: Mutex<i64>,
}

impl JsonlAuditLog {
    /// Open (or create) the log in `base_dir`.
    pub async fn open(base_dir: impl AsRef<Path>) -> Result<Self, DomainError> {
        let base = base_dir.as_ref();
        fs::create_dir_all(base)
            .await
            .map_err(|e| DomainError::Audit(e.to_string()))?;
        let path = base.join(JSONL_FILE);
        Self::terminate_torn_line(&path).await?;
        let existing = Self::read_records(&path).await?;
        let next_id = existing.iter().map(|r| r.id).max().unwrap_or(0) + 1;
        info!(
            path = %path.display(),
            records = existing.len(),
            "JSONL audit log opened"
        );
        Ok(Self {
            path,
            next_id: Mutex::new(next_id),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// A non-empty file must end in `\n`, otherwise the next append lands on the
    /// fragment left by an interrupted write.
    async fn terminate_torn_line(path: &Path) -> Result<(), DomainError> {
        let bytes = match fs::read(path).await {
            Ok(b) => b,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(()),
            Err(e) => return Err(DomainError::Audit(e.to_string())),
        };
        if bytes.last().is_none_or(|&b| b == b'\n') {
            return Ok(());
        }
        warn!(path = %path.display(), "audit log ends with a partial line, terminating it");
        let mut f = fs::OpenOptions::new()
            .append(true)
            .open(path)
            .await
            .map_err(|e| DomainError::Audit(format!("open audit log: {}", e)))?;
        f.write_all(b"\n")
            .await
            .map_err(|e| DomainError::Audit(format!("append audit log: {}", e)))?;
        f.flush()
            .await
            .map_err(|e| DomainError::Audit(format!("flush audit log: {}", e)))?;
        Ok(())
    }

    /// All parseable records in file order. Corrupt lines are skipped with a warning.
    async fn read_records(path: &Path) -> Result<Vec<EvaluationRecord>, DomainError> {
        let content = match fs::read_to_string(path).await {
            Ok(s) => s,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(DomainError::Audit(e.to_string())),
        };
        let mut records = Vec::new();
        for (lineno, line) in content.lines().enumerate() {
            if line.trim().is_empty() {
                continue;
            }
            match serde_json::from_str::<EvaluationRecord>(line) {
                Ok(r) => records.push(r),
                Err(e) => warn!(
                    path = %path.display(),
                    line = lineno + 1,
                    error = %e,
                    "skipping corrupt audit line"
                ),
            }
        }
        Ok(records)
    }
}

#[async_trait::async_trait]
impl AuditLogPort for JsonlAuditLog {
    async fn record(&self, entry: &NewEvaluation) -> Result<EvaluationRecord, DomainError> {
        let mut next_id = self.next_id.lock().await;
        let record = entry.clone().into_record(*next_id);
        let mut line =
            serde_json::to_string(&record).map_err(|e| DomainError::Audit(e.to_string()))?;
        line.push('\n');

        let mut f = fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)
            .await
            .map_err(|e| DomainError::Audit(format!("open audit log: {}", e)))?;
        f.write_all(line.as_bytes())
            .await
            .map_err(|e| DomainError::Audit(format!("append audit log: {}", e)))?;
        f.flush()
            .await
            .map_err(|e| DomainError::Audit(format!("flush audit log: {}", e)))?;

        *next_id += 1;
        Ok(record)
    }

    async fn recent(&self, limit: usize) -> Result<Vec<EvaluationRecord>, DomainError> {
        let records = Self::read_records(&self.path).await?;
        Ok(records.into_iter().rev().take(limit).collect())
    }

    async fn all(&self) -> Result<Vec<EvaluationRecord>, DomainError> {
        Self::read_records(&self.path).await
    }
}
