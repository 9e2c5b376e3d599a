//! Outbound ports. Application calls into infrastructure.
//!
//! Implemented by adapters.

use crate::domain::{DomainError, EvaluationRecord, NewEvaluation};

/// Audit store. Records every evaluation with caller identity and timestamp.
#[async_trait::async_trait]
pub trait AuditLogPort: Send + Sync {
    /// Persist one evaluation. Returns the stored record with its assigned id.
    async fn record(&self, entry: &NewEvaluation) -> Result<EvaluationRecord, DomainError>;

    /// Up to `limit` most recent records, newest first.
    async fn recent(&self, limit: usize) -> Result<Vec<EvaluationRecord>, DomainError>;

    /// Every record, oldest first.
    async fn all(&self) -> Result<Vec<EvaluationRecord>, DomainError>;
}
