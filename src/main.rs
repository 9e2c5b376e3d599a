//! Wiring & DI. Entry point: bootstrap adapters, inject into services, run UI or HTTP API.
//! No business logic here.
//!
//! Usage: `statin-guard` (interactive prompts) or `statin-guard serve` (HTTP API).

use dotenv::dotenv;
use statin_guard::adapters::http::{self, AppState};
use statin_guard::adapters::persistence::open_audit_log;
use statin_guard::adapters::ui::tui::TuiInputPort;
use statin_guard::ports::InputPort;
use statin_guard::shared::config::AppConfig;
use statin_guard::usecases::{EvaluationService, HistoryService};
use std::path::PathBuf;
use std::sync::Arc;
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

enum Command {
    Interactive,
    Serve,
}

fn parse_command() -> anyhow::Result<Command> {
    match std::env::args().nth(1).as_deref() {
        None | Some("tui") => Ok(Command::Interactive),
        Some("serve") => Ok(Command::Serve),
        Some(other) => anyhow::bail!("unknown command '{}' (expected: tui, serve)", other),
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cwd = std::env::current_dir().unwrap_or_else(|_| PathBuf::from("."));
    let env_loaded = dotenv();
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .with(tracing_subscriber::fmt::layer())
        .init();

    match &env_loaded {
        Ok(path) => info!(path = %path.display(), "loaded .env"),
        Err(_) => info!(cwd = %cwd.display(), "no .env found (check CWD)"),
    }

    let command = parse_command()?;

    let cfg = AppConfig::load()?;

    let thresholds = cfg.thresholds()?;
    if !thresholds.is_default() {
        warn!(
            uln_ck = thresholds.uln_ck,
            uln_transaminase = thresholds.uln_transaminase,
            bilirubin_threshold = thresholds.bilirubin_threshold,
            "using non-default clinical thresholds"
        );
    }

    let data_path = PathBuf::from(cfg.data_dir_or_default());
    let data_dir_abs = data_path
        .canonicalize()
        .unwrap_or_else(|_| data_path.clone());
    info!(path = %data_dir_abs.display(), "data directory");

    // --- Audit store (optional) ---
    let audit = open_audit_log(cfg.audit_backend()?, &data_path).await?;

    // --- Services ---
    let evaluations = Arc::new(EvaluationService::with_thresholds(
        thresholds,
        audit.clone(),
    ));
    let history = audit.map(|a| Arc::new(HistoryService::new(a)));
    let operator = cfg.operator_or_default().to_string();

    match command {
        Command::Serve => {
            let state = AppState {
                evaluations,
                history,
                default_caller: operator,
                default_history_limit: cfg.history_limit_or_default(),
            };
            http::serve(state, &cfg.bind_addr()).await?;
        }
        Command::Interactive => {
            statin_guard::adapters::ui::init_ui();
            let input_port: Arc<dyn InputPort> = Arc::new(TuiInputPort::new(
                evaluations,
                history,
                operator,
                cfg.history_limit_or_default(),
                data_path.join("exports"),
            ));
            input_port.run().await?;
        }
    }

    Ok(())
}
