//! Evaluation use case: validate -> evaluate -> audit.
//!
//! The engines are pure; the only side effect here is the optional audit record,
//! written after the recommendation is computed. A failing audit store is logged
//! and never withholds a recommendation.

use crate::domain::{
    DecisionEngine, DomainError, EvaluationInput, EvaluationMode, MyopathyEngine,
    MyopathyEvaluator, MyopathyInput, NewEvaluation, Recommendation, StatinEvaluator, Statement,
    Thresholds,
};
use crate::ports::AuditLogPort;
use crate::usecases::validation;
use chrono::Utc;
use serde_json::Value;
use std::sync::Arc;
use tracing::{debug, info, warn};

pub struct EvaluationService {
    engine: Arc<dyn StatinEvaluator>,
    myopathy_engine: Arc<dyn MyopathyEvaluator>,
    audit: Option<Arc<dyn AuditLogPort>>,
}

impl EvaluationService {
    /// Create a service around explicit evaluators.
    ///
    /// # Arguments
    /// * `engine` - Combined CK + liver evaluator
    /// * `myopathy_engine` - Evaluator behind the CK-only tool
    /// * `audit` - Audit store; `None` disables recording
    pub fn new(
        engine: Arc<dyn StatinEvaluator>,
        myopathy_engine: Arc<dyn MyopathyEvaluator>,
        audit: Option<Arc<dyn AuditLogPort>>,
    ) -> Self {
        Self {
            engine,
            myopathy_engine,
            audit,
        }
    }

    /// Standard engines built from one threshold set.
    pub fn with_thresholds(thresholds: Thresholds, audit: Option<Arc<dyn AuditLogPort>>) -> Self {
        Self::new(
            Arc::new(DecisionEngine::new(thresholds)),
            Arc::new(MyopathyEngine::new(thresholds)),
            audit,
        )
    }

    pub fn is_audited(&self) -> bool {
        self.audit.is_some()
    }

    /// Validate a raw JSON body and run the combined evaluation.
    pub async fn evaluate_request(
        &self,
        payload: &Value,
        caller: &str,
    ) -> Result<Recommendation, DomainError> {
        let input = validation::parse_evaluation(payload).inspect_err(|e| {
            info!(caller, error = %e, "rejected evaluation request");
        })?;
        Ok(self.evaluate_input(input, caller).await)
    }

    /// Validate a raw JSON body and run the CK-only evaluation.
    pub async fn evaluate_myopathy_request(
        &self,
        payload: &Value,
        caller: &str,
    ) -> Result<Statement, DomainError> {
        let input = validation::parse_myopathy(payload).inspect_err(|e| {
            info!(caller, error = %e, "rejected myopathy request");
        })?;
        Ok(self.evaluate_myopathy_input(input, caller).await)
    }

    /// Combined evaluation of already-validated input.
    pub async fn evaluate_input(&self, input: EvaluationInput, caller: &str) -> Recommendation {
        let recommendation = self.engine.evaluate(input);
        debug!(
            caller,
            ck_value = input.ck_value,
            transaminase = input.transaminase,
            bilirubin = input.bilirubin,
            muscle_symptoms = input.muscle_symptoms,
            "evaluated panel"
        );
        self.record(NewEvaluation {
            caller: caller.to_string(),
            mode: EvaluationMode::Combined,
            ck_value: input.ck_value,
            transaminase: Some(input.transaminase),
            bilirubin: Some(input.bilirubin),
            muscle_symptoms: input.muscle_symptoms,
            recommendation: recommendation.to_string(),
            created_at: Utc::now().timestamp(),
        })
        .await;
        recommendation
    }

    /// CK-only evaluation of already-validated input.
    pub async fn evaluate_myopathy_input(&self, input: MyopathyInput, caller: &str) -> Statement {
        let statement = self.myopathy_engine.evaluate_myopathy(input);
        debug!(
            caller,
            ck_value = input.ck_value,
            muscle_symptoms = input.muscle_symptoms,
            "evaluated CK"
        );
        self.record(NewEvaluation {
            caller: caller.to_string(),
            mode: EvaluationMode::Myopathy,
            ck_value: input.ck_value,
            transaminase: None,
            bilirubin: None,
            muscle_symptoms: input.muscle_symptoms,
            recommendation: statement.to_string(),
            created_at: Utc::now().timestamp(),
        })
        .await;
        statement
    }

    async fn record(&self, entry: NewEvaluation) {
        let Some(audit) = &self.audit else {
            return;
        };
        match audit.record(&entry).await {
            Ok(record) => debug!(id = record.id, mode = %record.mode, "evaluation audited"),
            Err(e) => warn!(
                caller = %entry.caller,
                mode = %entry.mode,
                error = %e,
                "failed to audit evaluation"
            ),
        }
    }
}
