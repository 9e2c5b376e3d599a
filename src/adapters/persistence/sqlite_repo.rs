//! SQLite-backed audit log via libsql. Implements AuditLogPort.
//!
//! Single `evaluations` table in data/evaluations.db. Ids come from the rowid,
//! so "newest first" is `ORDER BY id DESC`.

use crate::domain::{DomainError, EvaluationMode, EvaluationRecord, NewEvaluation};
use crate::ports::AuditLogPort;
use libsql::{params, Connection, Database, Row};
use std::path::{Path, PathBuf};
use tracing::info;

pub const DB_FILE: &str = "evaluations.db";

const EVALUATIONS_TABLE: &str = r#"
CREATE TABLE IF NOT EXISTS evaluations (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    caller TEXT NOT NULL,
    mode TEXT NOT NULL,
    ck_value REAL NOT NULL,
    transaminase REAL,
    bilirubin REAL,
    muscle_symptoms INTEGER NOT NULL,
    recommendation TEXT NOT NULL,
    created_at INTEGER NOT NULL
)"#;
const EVALUATIONS_INDEX: &str =
    "CREATE INDEX IF NOT EXISTS idx_evaluations_created ON evaluations (created_at DESC)";

const SELECT_COLUMNS: &str = "SELECT id, caller, mode, ck_value, transaminase, bilirubin, muscle_symptoms, recommendation, created_at FROM evaluations";

fn repo_err(e: impl std::fmt::Display) -> DomainError {
    DomainError::Audit(e.to_string())
}

/// SQLite audit log. One database file in the given base directory.
pub struct SqliteAuditLog {
    db: Database,
    db_path: PathBuf,
}

impl SqliteAuditLog {
    /// Connect to (or create) the database and ensure the schema exists.
    /// Call this once at startup; the returned log is safe to share via Arc.
    pub async fn connect(base_dir: impl AsRef<Path>) -> Result<Self, DomainError> {
        let base = base_dir.as_ref();
        std::fs::create_dir_all(base).map_err(repo_err)?;
        let db_path = base.join(DB_FILE);
        let path_str = db_path.to_string_lossy();
        let db = libsql::Builder::new_local(path_str.as_ref())
            .build()
            .await
            .map_err(repo_err)?;
        let conn = db.connect().map_err(repo_err)?;

        // PRAGMA returns a row; drain it (execute fails when rows are returned).
        let mut wal_rows = conn
            .query("PRAGMA journal_mode=WAL", ())
            .await
            .map_err(|e| DomainError::Audit(format!("WAL pragma failed: {}", e)))?;
        while wal_rows.next().await.map_err(repo_err)?.is_some() {}

        conn.execute(EVALUATIONS_TABLE, ()).await.map_err(repo_err)?;
        conn.execute(EVALUATIONS_INDEX, ()).await.map_err(repo_err)?;

        info!(path = %db_path.display(), "SQLite audit log connected (WAL)");

        Ok(Self { db, db_path })
    }

    pub fn path(&self) -> &Path {
        &self.db_path
    }

    fn conn(&self) -> Result<Connection, DomainError> {
        self.db.connect().map_err(repo_err)
    }

    fn row_to_record(row: &Row) -> Result<EvaluationRecord, DomainError> {
        let mode: String = row.get(2).map_err(repo_err)?;
        let muscle_symptoms: i64 = row.get(6).map_err(repo_err)?;
        Ok(EvaluationRecord {
            id: row.get(0).map_err(repo_err)?,
            caller: row.get(1).map_err(repo_err)?,
            mode: mode.parse::<EvaluationMode>().map_err(DomainError::Audit)?,
            ck_value: row.get(3).map_err(repo_err)?,
            transaminase: row.get::<f64>(4).ok(),
            bilirubin: row.get::<f64>(5).ok(),
            muscle_symptoms: muscle_symptoms != 0,
            recommendation: row.get(7).map_err(repo_err)?,
            created_at: row.get(8).map_err(repo_err)?,
        })
    }

    async fn select(
        &self,
        sql: &str,
        params: impl libsql::params::IntoParams,
    ) -> Result<Vec<EvaluationRecord>, DomainError> {
        let conn = self.conn()?;
        let mut rows = conn.query(sql, params).await.map_err(repo_err)?;
        let mut records = Vec::new();
        while let Some(row) = rows.next().await.map_err(repo_err)? {
            records.push(Self::row_to_record(&row)?);
        }
        Ok(records)
    }
}

#[async_trait::async_trait]
impl AuditLogPort for SqliteAuditLog {
    async fn record(&self, entry: &NewEvaluation) -> Result<EvaluationRecord, DomainError> {
        let conn = self.conn()?;
        conn.execute(
            r#"
            INSERT INTO evaluations
                (caller, mode, ck_value, transaminase, bilirubin, muscle_symptoms, recommendation, created_at)
            VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)
            "#,
            params![
                entry.caller.as_str(),
                entry.mode.as_str(),
                entry.ck_value,
                entry.transaminase,
                entry.bilirubin,
                i64::from(entry.muscle_symptoms),
                entry.recommendation.as_str(),
                entry.created_at
            ],
        )
        .await
        .map_err(repo_err)?;
        let id = conn.last_insert_rowid();
        Ok(entry.clone().into_record(id))
    }

    async fn recent(&self, limit: usize) -> Result<Vec<EvaluationRecord>, DomainError> {
        let sql = format!("{} ORDER BY id DESC LIMIT ?1", SELECT_COLUMNS);
        self.select(&sql, params![limit as i64]).await
    }

    async fn all(&self) -> Result<Vec<EvaluationRecord>, DomainError> {
        let sql = format!("{} ORDER BY id ASC", SELECT_COLUMNS);
        self.select(&sql, ()).await
    }
}
