//! Core domain layer. No external I/O dependencies.
//!
//! Entities, thresholds and the decision engine live here. Dependencies flow inward.

pub mod engine;
pub mod entities;
pub mod errors;
pub mod recommendation;
pub mod thresholds;

pub use engine::{
    evaluate, CkGuidance, DecisionEngine, LiverGuidance, MyopathyEngine, MyopathyEvaluator,
    Phrasing, StatinEvaluator,
};
pub use entities::{
    EvaluationInput, EvaluationMode, EvaluationRecord, MyopathyInput, NewEvaluation,
};
pub use errors::{DomainError, RequestError};
pub use recommendation::{Recommendation, Statement, StatementKind};
pub use thresholds::Thresholds;
