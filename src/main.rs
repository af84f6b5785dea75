use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand};
use rx_portal::types::PrescriptionRecord;
use rx_portal::{HttpBackend, PortalClient, PortalConfig, PortalError, PrescriptionUpload, ReportEntry};
use serde_json::{Value, json};

#[derive(Debug, thiserror::Error)]
enum CliError {
    #[error(transparent)]
    Portal(#[from] PortalError),
    #[error("could not read {path}: {source}")]
    ReadFile { path: String, source: std::io::Error },
    #[error("invalid JSON payload: {0}")]
    InvalidJson(#[from] serde_json::Error),
    #[error("timestamp formatting failed: {0}")]
    Timestamp(#[from] time::error::Format),
}

#[derive(Parser, Debug)]
#[command(name = "rx-portal", about = "Doctor portal client: prescriptions, reports, dashboard, risk profiles")]
struct Cli {
    /// Backend origin; overrides `PORTAL_BACKEND_URL`.
    #[arg(long)]
    base_url: Option<String>,

    #[arg(long, env = "PORTAL_USERNAME")]
    username: String,

    #[arg(long, env = "PORTAL_PASSWORD", hide_env_values = true)]
    password: String,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Log in and print the doctor id.
    Whoami,
    /// Upload a prescription (pdf, png, jpg, jpeg) for analysis.
    Upload {
        #[arg(long)]
        file: PathBuf,
        #[arg(long)]
        patient_id: String,
        #[arg(long, help = "Defaults to the current UTC time")]
        timestamp: Option<String>,
    },
    /// List a patient's stored prescription reports.
    Reports { patient_id: String },
    /// Show the doctor's uploads and summary metrics.
    Dashboard,
    /// Generate a patient's risk profile.
    RiskProfile { patient_id: String },
}

#[tokio::main]
async fn main() -> Result<(), CliError> {
    tracing_subscriber::fmt().with_writer(std::io::stderr).init();
    if let Err(e) = dotenvy::dotenv() {
        if !e.not_found() {
            tracing::warn!(error = %e, "failed to load .env");
        }
    }

    let cli = Cli::parse();
    let mut config = PortalConfig::from_env()?;
    if let Some(url) = &cli.base_url {
        config = config.with_backend_url(url)?;
    }
    let backend = HttpBackend::new(&config)?;
    tracing::debug!(backend = %backend.base_url(), "portal configured");

    let mut client = PortalClient::new(backend);
    client.login(&cli.username, &cli.password).await?;

    // Log out whatever the command's outcome.
    let outcome = run_command(&mut client, &config, cli.command).await;
    if let Err(CliError::Portal(e)) = &outcome {
        tracing::warn!(code = e.code(), local = e.is_local(), "command failed");
    }
    client.logout().await;

    print_json(&outcome?)
}

async fn run_command(
    client: &mut PortalClient<HttpBackend>,
    config: &PortalConfig,
    command: Command,
) -> Result<Value, CliError> {
    match command {
        Command::Whoami => Ok(json!({ "doctor_id": client.doctor_id() })),
        Command::Upload { file, patient_id, timestamp } => {
            let timestamp = match timestamp {
                Some(ts) => ts,
                None => now_timestamp()?,
            };
            let bytes = tokio::fs::read(&file)
                .await
                .map_err(|source| CliError::ReadFile { path: file.display().to_string(), source })?;
            let upload = PrescriptionUpload::new(file_name(&file), bytes, patient_id, timestamp);
            let result = client.upload_prescription(upload).await?;
            Ok(serde_json::to_value(result)?)
        }
        Command::Reports { patient_id } => {
            let entries = client.get_reports(&patient_id).await?;
            let rendered = entries
                .iter()
                .map(|entry| match entry {
                    ReportEntry::Record(record) => record_json(config, record),
                    ReportEntry::Malformed { .. } => Ok(serde_json::to_value(entry)?),
                })
                .collect::<Result<Vec<_>, CliError>>()?;
            Ok(json!({ "patient_id": patient_id.trim(), "reports": rendered }))
        }
        Command::Dashboard => {
            let dashboard = client.get_dashboard().await?;
            let uploads = dashboard
                .uploads
                .iter()
                .map(|record| record_json(config, record))
                .collect::<Result<Vec<_>, CliError>>()?;
            Ok(json!({ "metrics": dashboard.metrics, "uploads": uploads }))
        }
        Command::RiskProfile { patient_id } => {
            let profile = client.get_risk_profile(&patient_id).await?;
            if profile.is_empty() {
                tracing::warn!(patient_id = patient_id.trim(), "backend returned no risk profile");
            }
            Ok(json!({
                "patient_id": patient_id.trim(),
                "risk_profile": profile,
                "summary": profile.display_text(),
            }))
        }
    }
}

fn record_json(config: &PortalConfig, record: &PrescriptionRecord) -> Result<Value, CliError> {
    let mut value = serde_json::to_value(record)?;
    if let Value::Object(map) = &mut value {
        map.insert("status".to_owned(), Value::String("record".to_owned()));
        map.insert("ipfs_link".to_owned(), Value::String(config.ipfs_link(&record.cid)));
    }
    Ok(value)
}

fn file_name(path: &Path) -> String {
    path.file_name()
        .and_then(|n| n.to_str())
        .unwrap_or("prescription")
        .to_owned()
}

fn now_timestamp() -> Result<String, CliError> {
    let format = time::macros::format_description!("[year]-[month]-[day] [hour]:[minute]:[second]");
    Ok(time::OffsetDateTime::now_utc().format(&format)?)
}

fn print_json(value: &Value) -> Result<(), CliError> {
    let rendered = serde_json::to_string_pretty(value)?;
    println!("{rendered}");
    Ok(())
}
