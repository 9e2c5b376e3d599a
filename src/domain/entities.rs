//! Domain entities. Pure data structures for the core business.
//!
//! No storage/IO types here. Adapters map rows and payloads into these.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Validated lab panel for the combined CK + liver evaluation.
///
/// Values are already checked by the request boundary (finite, non-negative).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EvaluationInput {
    /// Creatine kinase (U/L).
    pub ck_value: f64,
    /// ALT/AST (U/L).
    pub transaminase: f64,
    /// Total bilirubin (mg/dL).
    pub bilirubin: f64,
    pub muscle_symptoms: bool,
}

impl EvaluationInput {
    pub fn new(ck_value: f64, transaminase: f64, bilirubin: f64, muscle_symptoms: bool) -> Self {
        Self {
            ck_value,
            transaminase,
            bilirubin,
            muscle_symptoms,
        }
    }

    /// The CK-only part of the panel.
    pub fn myopathy(&self) -> MyopathyInput {
        MyopathyInput::new(self.ck_value, self.muscle_symptoms)
    }
}

/// Validated input for the CK-only evaluation.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MyopathyInput {
    pub ck_value: f64,
    pub muscle_symptoms: bool,
}

impl MyopathyInput {
    pub fn new(ck_value: f64, muscle_symptoms: bool) -> Self {
        Self {
            ck_value,
            muscle_symptoms,
        }
    }
}

/// Which evaluator produced an audited recommendation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EvaluationMode {
    /// CK and liver function.
    Combined,
    /// CK and muscle symptoms only.
    Myopathy,
}

impl EvaluationMode {
    pub fn as_str(self) -> &'static str {
        match self {
            EvaluationMode::Combined => "combined",
            EvaluationMode::Myopathy => "myopathy",
        }
    }
}

impl fmt::Display for EvaluationMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for EvaluationMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "combined" => Ok(EvaluationMode::Combined),
            "myopathy" => Ok(EvaluationMode::Myopathy),
            other => Err(format!("unknown evaluation mode: {}", other)),
        }
    }
}

/// Audit entry before the store assigns an id.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewEvaluation {
    pub caller: String,
    pub mode: EvaluationMode,
    pub ck_value: f64,
    /// Absent for myopathy-only evaluations.
    pub transaminase: Option<f64>,
    pub bilirubin: Option<f64>,
    pub muscle_symptoms: bool,
    /// Rendered recommendation text.
    pub recommendation: String,
    /// Unix seconds (UTC).
    pub created_at: i64,
}

impl NewEvaluation {
    pub fn into_record(self, id: i64) -> EvaluationRecord {
        EvaluationRecord {
            id,
            caller: self.caller,
            mode: self.mode,
            ck_value: self.ck_value,
            transaminase: self.transaminase,
            bilirubin: self.bilirubin,
            muscle_symptoms: self.muscle_symptoms,
            recommendation: self.recommendation,
            created_at: self.created_at,
        }
    }
}

/// A persisted evaluation as returned by the audit store.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EvaluationRecord {
    pub id: i64,
    pub caller: String,
    pub mode: EvaluationMode,
    pub ck_value: f64,
    pub transaminase: Option<f64>,
    pub bilirubin: Option<f64>,
    pub muscle_symptoms: bool,
    pub recommendation: String,
    pub created_at: i64,
}
