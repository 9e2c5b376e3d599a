//! Implements InputPort. Inquire-based interactive prompts.
//!
//! Replaces the desktop forms: one CK + liver panel, one CK-only panel, plus
//! history and CSV export when the audit store is enabled.

use crate::domain::{DomainError, EvaluationInput, EvaluationRecord, MyopathyInput};
use crate::ports::InputPort;
use crate::usecases::validation::{self, BILIRUBIN, CK_VALUE, TRANSAMINASE};
use crate::usecases::{EvaluationService, HistoryService};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use crossterm::style::Stylize;
use inquire::error::InquireError;
use inquire::ui::{Color, RenderConfig, StyleSheet, Styled};
use inquire::validator::Validation;
use inquire::{Confirm, CustomUserError, Select, Text};
use std::fmt;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::info;

/// Applies the prompt theme for all subsequent inquire prompts.
pub fn apply_theme() {
    let mut config = RenderConfig::default();
    config.prompt_prefix = Styled::new("›").with_fg(Color::LightCyan);
    config.answer = StyleSheet::new().with_fg(Color::LightGreen);
    config.highlighted_option_prefix = Styled::new("➤").with_fg(Color::LightCyan);
    inquire::set_global_render_config(config);
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum MenuItem {
    EvaluatePanel,
    EvaluateCk,
    History,
    Export,
    Quit,
}

impl MenuItem {
    const ALL: [MenuItem; 5] = [
        MenuItem::EvaluatePanel,
        MenuItem::EvaluateCk,
        MenuItem::History,
        MenuItem::Export,
        MenuItem::Quit,
    ];
}

impl fmt::Display for MenuItem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            MenuItem::EvaluatePanel => "Evaluate CK + liver function",
            MenuItem::EvaluateCk => "Evaluate CK only (myopathy)",
            MenuItem::History => "Recent evaluations",
            MenuItem::Export => "Export history to CSV",
            MenuItem::Quit => "Quit",
        })
    }
}

/// Esc / Ctrl-C yield `None` so the caller can step back to the menu.
fn answered<T>(result: Result<T, InquireError>) -> Result<Option<T>, DomainError> {
    match result {
        Ok(v) => Ok(Some(v)),
        Err(InquireError::OperationCanceled | InquireError::OperationInterrupted) => Ok(None),
        Err(e) => Err(DomainError::Ui(e.to_string())),
    }
}

/// Re-asks until the answer is a finite, non-negative number.
fn prompt_lab_value(label: &str, field: &'static str) -> Result<Option<f64>, DomainError> {
    let validator = move |input: &str| -> Result<Validation, CustomUserError> {
        match validation::parse_lab_value(field, input) {
            Ok(_) => Ok(Validation::Valid),
            Err(e) => Ok(Validation::Invalid(e.to_string().into())),
        }
    };
    let Some(raw) = answered(Text::new(label).with_validator(validator).prompt())? else {
        return Ok(None);
    };
    Ok(Some(validation::parse_lab_value(field, &raw)?))
}

fn prompt_symptoms() -> Result<Option<bool>, DomainError> {
    answered(
        Confirm::new("Muscle symptoms present?")
            .with_default(false)
            .prompt(),
    )
}

fn print_result(title: &str, body: &str) {
    println!();
    println!("{}", title.bold().cyan());
    println!("{}", body);
    println!();
}

fn format_record(r: &EvaluationRecord) -> String {
    let when = DateTime::<Utc>::from_timestamp(r.created_at, 0)
        .map(|dt| dt.format("%Y-%m-%d %H:%M UTC").to_string())
        .unwrap_or_else(|| "Unknown".to_string());
    let mut labs = format!("CK {} U/L", r.ck_value);
    if let (Some(t), Some(b)) = (r.transaminase, r.bilirubin) {
        labs.push_str(&format!(", ALT/AST {} U/L, bilirubin {} mg/dL", t, b));
    }
    if r.muscle_symptoms {
        labs.push_str(", symptoms");
    }
    let body: Vec<String> = r
        .recommendation
        .lines()
        .map(|line| format!("    {}", line))
        .collect();
    format!(
        "#{} {} [{}] by {}: {}\n{}",
        r.id,
        when,
        r.mode,
        r.caller,
        labs,
        body.join("\n")
    )
}

/// TUI adapter. Inquire prompts.
pub struct TuiInputPort {
    evaluations: Arc<EvaluationService>,
    history: Option<Arc<HistoryService>>,
    operator: String,
    history_limit: usize,
    export_dir: PathBuf,
}

impl TuiInputPort {
    pub fn new(
        evaluations: Arc<EvaluationService>,
        history: Option<Arc<HistoryService>>,
        operator: impl Into<String>,
        history_limit: usize,
        export_dir: PathBuf,
    ) -> Self {
        Self {
            evaluations,
            history,
            operator: operator.into(),
            history_limit,
            export_dir,
        }
    }

    async fn evaluate_panel(&self) -> Result<(), DomainError> {
        let Some(ck_value) = prompt_lab_value("CK value (U/L):", CK_VALUE)? else {
            return Ok(());
        };
        let Some(transaminase) = prompt_lab_value("Transaminase (ALT/AST) (U/L):", TRANSAMINASE)?
        else {
            return Ok(());
        };
        let Some(bilirubin) = prompt_lab_value("Total bilirubin (mg/dL):", BILIRUBIN)? else {
            return Ok(());
        };
        let Some(muscle_symptoms) = prompt_symptoms()? else {
            return Ok(());
        };

        let input = EvaluationInput::new(ck_value, transaminase, bilirubin, muscle_symptoms);
        let recommendation = self.evaluations.evaluate_input(input, &self.operator).await;
        print_result("Recommendation", &recommendation.to_string());
        Ok(())
    }

    async fn evaluate_ck(&self) -> Result<(), DomainError> {
        let Some(ck_value) = prompt_lab_value("CK value (U/L):", CK_VALUE)? else {
            return Ok(());
        };
        let Some(muscle_symptoms) = prompt_symptoms()? else {
            return Ok(());
        };

        let statement = self
            .evaluations
            .evaluate_myopathy_input(MyopathyInput::new(ck_value, muscle_symptoms), &self.operator)
            .await;
        print_result("Recommendation", &statement.to_string());
        Ok(())
    }

    async fn show_history(&self, history: &HistoryService) -> Result<(), DomainError> {
        let records = history.recent(self.history_limit).await?;
        if records.is_empty() {
            print_result("Recent evaluations", "No evaluations recorded yet.");
            return Ok(());
        }
        let body: Vec<String> = records.iter().map(format_record).collect();
        print_result("Recent evaluations", &body.join("\n\n"));
        Ok(())
    }

    async fn export_history(&self, history: &HistoryService) -> Result<(), DomainError> {
        let default_path = self.export_dir.join(format!(
            "evaluations_{}.csv",
            Utc::now().format("%Y%m%d_%H%M%S")
        ));
        let default_str = default_path.to_string_lossy();
        let Some(path) = answered(
            Text::new("Export to:")
                .with_default(default_str.as_ref())
                .prompt(),
        )?
        else {
            return Ok(());
        };

        let rows = history.export_csv(&PathBuf::from(path.trim())).await?;
        print_result(
            "Export complete",
            &format!("{} evaluation(s) written to {}", rows, path.trim()),
        );
        Ok(())
    }

    fn audit_disabled() {
        print_result(
            "Audit store disabled",
            "Set STATIN_GUARD_AUDIT_BACKEND to sqlite or jsonl to keep a history.",
        );
    }
}

#[async_trait]
impl InputPort for TuiInputPort {
    async fn run(&self) -> Result<(), DomainError> {
        loop {
            let choice = answered(
                Select::new("What would you like to do?", MenuItem::ALL.to_vec()).prompt(),
            )?;
            match choice {
                None | Some(MenuItem::Quit) => break,
                Some(MenuItem::EvaluatePanel) => self.evaluate_panel().await?,
                Some(MenuItem::EvaluateCk) => self.evaluate_ck().await?,
                Some(MenuItem::History) => match &self.history {
                    Some(history) => self.show_history(history).await?,
                    None => Self::audit_disabled(),
                },
                Some(MenuItem::Export) => match &self.history {
                    Some(history) => self.export_history(history).await?,
                    None => Self::audit_disabled(),
                },
            }
        }
        info!("interactive session finished");
        Ok(())
    }
}
