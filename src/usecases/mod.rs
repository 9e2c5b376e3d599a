//! Application use cases. Orchestrate domain logic via ports.

pub mod evaluation_service;
pub mod history_service;
pub mod validation;

pub use evaluation_service::EvaluationService;
pub use history_service::{HistoryService, MAX_HISTORY_LIMIT};
