//! Application configuration. Paths, audit backend, HTTP bind address, thresholds.

use crate::domain::{DomainError, Thresholds};
use serde::Deserialize;
use std::str::FromStr;

pub const DEFAULT_DATA_DIR: &str = "./data";
pub const DEFAULT_OPERATOR: &str = "anonymous";
pub const DEFAULT_HOST: &str = "0.0.0.0";
pub const DEFAULT_PORT: u16 = 8080;
pub const DEFAULT_HISTORY_LIMIT: usize = 20;

/// Where evaluations are audited.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AuditBackend {
    #[default]
    Sqlite,
    Jsonl,
    None,
}

impl FromStr for AuditBackend {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "sqlite" => Ok(AuditBackend::Sqlite),
            "jsonl" => Ok(AuditBackend::Jsonl),
            "none" | "off" => Ok(AuditBackend::None),
            other => Err(DomainError::Config(format!(
                "unknown audit backend '{}' (expected sqlite, jsonl or none)",
                other
            ))),
        }
    }
}

#[derive(Debug, Deserialize, Default)]
pub struct AppConfig {
    /// Directory for the audit store and exports. Read from STATIN_GUARD_DATA_DIR.
    pub data_dir: Option<String>,

    /// Caller identity recorded for terminal sessions and header-less HTTP calls.
    /// Read from STATIN_GUARD_OPERATOR.
    pub operator: Option<String>,

    /// `sqlite` (default), `jsonl` or `none`. Read from STATIN_GUARD_AUDIT_BACKEND.
    #[serde(default)]
    pub audit_backend: Option<String>,

    /// HTTP bind host. Read from STATIN_GUARD_HOST.
    #[serde(default)]
    pub host: Option<String>,

    /// HTTP port. Read from STATIN_GUARD_PORT, falling back to PORT.
    #[serde(default)]
    pub port: Option<u16>,

    /// Default number of records listed by history views. Read from STATIN_GUARD_HISTORY_LIMIT.
    #[serde(default)]
    pub history_limit: Option<usize>,

    // ─────────────────────────────────────────────────────────────────────────
    // Threshold overrides (unset = clinical defaults)
    // ─────────────────────────────────────────────────────────────────────────
    /// CK upper limit of normal, U/L.
    #[serde(default)]
    pub uln_ck: Option<f64>,

    /// ALT/AST upper limit of normal, U/L.
    #[serde(default)]
    pub uln_transaminase: Option<f64>,

    /// Bilirubin cut-off, mg/dL.
    #[serde(default)]
    pub bilirubin_threshold: Option<f64>,
}

impl AppConfig {
    /// Any unreadable or mistyped key is an error; nothing falls back silently.
    pub fn load() -> Result<Self, config::ConfigError> {
        dotenv::dotenv().ok();
        let file = std::env::var("STATIN_GUARD_CONFIG").ok();
        let mut cfg = Self::from_sources(file.as_deref(), None)?;
        // PORT is read directly (no prefix) for container platforms that inject it.
        if cfg.port.is_none() {
            if let Ok(s) = std::env::var("PORT") {
                if let Ok(port) = s.parse::<u16>() {
                    cfg.port = Some(port);
                }
            }
        }
        Ok(cfg)
    }

    /// Build from an optional config file and an environment map (`None` = process env).
    fn from_sources(
        file: Option<&str>,
        env: Option<config::Map<String, String>>,
    ) -> Result<Self, config::ConfigError> {
        let mut c = config::Config::builder();
        if let Some(path) = file {
            c = c.add_source(config::File::with_name(path));
        }
        // Environment wins over the file.
        c = c.add_source(
            config::Environment::with_prefix("STATIN_GUARD")
                .try_parsing(true)
                .source(env),
        );
        c.build()?.try_deserialize()
    }

    pub fn data_dir_or_default(&self) -> &str {
        self.data_dir.as_deref().unwrap_or(DEFAULT_DATA_DIR)
    }

    pub fn operator_or_default(&self) -> &str {
        self.operator
            .as_deref()
            .filter(|s| !s.trim().is_empty())
            .unwrap_or(DEFAULT_OPERATOR)
    }

    /// Parsed audit backend. Defaults to SQLite.
    pub fn audit_backend(&self) -> Result<AuditBackend, DomainError> {
        self.audit_backend
            .as_deref()
            .map(str::parse)
            .transpose()
            .map(Option::unwrap_or_default)
    }

    pub fn host_or_default(&self) -> &str {
        self.host.as_deref().unwrap_or(DEFAULT_HOST)
    }

    pub fn port_or_default(&self) -> u16 {
        self.port.unwrap_or(DEFAULT_PORT)
    }

    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host_or_default(), self.port_or_default())
    }

    pub fn history_limit_or_default(&self) -> usize {
        self.history_limit.unwrap_or(DEFAULT_HISTORY_LIMIT)
    }

    /// Threshold set with any overrides applied and validated.
    pub fn thresholds(&self) -> Result<Thresholds, DomainError> {
        let defaults = Thresholds::default();
        Thresholds::new(
            self.uln_ck.unwrap_or(defaults.uln_ck),
            self.uln_transaminase.unwrap_or(defaults.uln_transaminase),
            self.bilirubin_threshold
                .unwrap_or(defaults.bilirubin_threshold),
        )
    }
}
