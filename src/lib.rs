//! statin-guard: statin safety recommendations from CK and liver-function labs,
//! with Hexagonal Architecture around a pure decision engine.

pub mod adapters;
pub mod domain;
pub mod ports;
pub mod shared;
pub mod usecases;

pub use domain::{evaluate, DecisionEngine, EvaluationInput, Recommendation, Thresholds};
