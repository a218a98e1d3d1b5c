// SPDX-FileCopyrightText: 2026 Marquee Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! `marquee notify` command implementation.
//!
//! Reads the job snapshot and the host's job-scoped variables, runs one event
//! through the engine, prints the outcome JSON on stdout and writes the
//! updated variables back.

use std::io::{Read, Write};
use std::path::{Path, PathBuf};
use std::sync::Arc;

use chrono::{DateTime, Utc};
use clap::Args;
use marquee_config::{ConfigError, MarqueeConfig};
use marquee_core::{
    FileContext, HttpTransport, JobId, MarqueeError, MessageId, MessageStateStore,
    NotificationEvent, NotificationKind, NotificationMode,
};
use marquee_discord::JobVariablesStore;
use marquee_engine::{NotificationEngine, NotifyOutcome};
use marquee_transport::ReqwestTransport;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use tokio_util::sync::CancellationToken;
use tracing::{error, info, warn};

use crate::logging;

/// Arguments for `marquee notify`.
#[derive(Args, Debug)]
pub struct NotifyArgs {
    /// Lifecycle event: start_processing, transcode_success or transcode_error.
    #[arg(long)]
    pub kind: NotificationKind,

    /// Override the configured delivery mode (updates or sequential).
    #[arg(long)]
    pub mode: Option<NotificationMode>,

    /// Job snapshot JSON file, or `-` for stdin.
    #[arg(long, default_value = "-")]
    pub job: String,

    /// Host job-scoped variables file. Read before and rewritten after delivery.
    #[arg(long)]
    pub variables: Option<PathBuf>,
}

/// The host's view of the job at the time of the event.
#[derive(Debug, Clone, Deserialize)]
pub struct JobSnapshot {
    /// String or numeric job id; absent for ad-hoc runs.
    #[serde(default)]
    pub job_id: Option<Value>,
    #[serde(default)]
    pub job_start: Option<DateTime<Utc>>,
    #[serde(default)]
    pub library_name: String,
    pub file: FileContext,
}

impl JobSnapshot {
    pub fn job_id(&self) -> Option<JobId> {
        match self.job_id.as_ref()? {
            Value::String(s) if !s.trim().is_empty() => Some(JobId(s.trim().to_string())),
            Value::Number(n) => Some(JobId(n.to_string())),
            _ => None,
        }
    }

    pub fn into_event(self, kind: NotificationKind, now: DateTime<Utc>) -> NotificationEvent {
        NotificationEvent {
            kind,
            job_id: self.job_id(),
            file: self.file,
            library_name: self.library_name,
            job_start: self.job_start,
            now,
        }
    }
}

/// What `marquee notify` prints on stdout.
#[derive(Debug, Clone, Serialize)]
pub struct NotifyReport {
    pub output_number: u8,
    pub delivered: bool,
    pub message_id: Option<MessageId>,
    pub variables: Map<String, Value>,
}

impl NotifyReport {
    pub fn new(outcome: &NotifyOutcome, variables: Map<String, Value>) -> Self {
        Self {
            output_number: outcome.output_number(),
            delivered: outcome.delivered,
            message_id: outcome.message_id.clone(),
            variables,
        }
    }

    /// Process exit code for this report.
    pub fn exit_code(&self) -> i32 {
        if self.delivered { 0 } else { 1 }
    }
}

/// Run the `marquee notify` command and return the process exit code.
pub async fn run_notify(
    args: NotifyArgs,
    loaded: Result<MarqueeConfig, Vec<ConfigError>>,
) -> i32 {
    let mut config = match loaded {
        Ok(config) => config,
        Err(errors) => {
            marquee_config::render_errors(&errors);
            let variables = read_variables(args.variables.as_deref()).unwrap_or_default();
            return emit(&NotifyReport::new(&failed(), variables));
        }
    };
    if let Some(mode) = args.mode {
        config.discord.mode = mode;
    }

    logging::init_tracing(&config);

    let snapshot = match read_snapshot(&args.job) {
        Ok(snapshot) => snapshot,
        Err(e) => {
            error!(error = %e, "could not read job snapshot");
            let variables = read_variables(args.variables.as_deref()).unwrap_or_default();
            return emit(&NotifyReport::new(&failed(), variables));
        }
    };
    let variables = match read_variables(args.variables.as_deref()) {
        Ok(variables) => variables,
        Err(e) => {
            // Leave the host's file alone when it cannot be parsed.
            error!(error = %e, "could not read job variables");
            return emit(&NotifyReport::new(&failed(), Map::new()));
        }
    };

    let cancel = CancellationToken::new();
    let transport = match ReqwestTransport::new(&config.discord.user_agent) {
        Ok(transport) => transport.with_cancellation(cancel.clone()),
        Err(e) => {
            error!(error = %e, "could not build HTTP client");
            return emit(&NotifyReport::new(&failed(), variables));
        }
    };
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            warn!("interrupted, cancelling in-flight request");
            cancel.cancel();
        }
    });

    let event = snapshot.into_event(args.kind, Utc::now());
    let report = deliver(&config, Arc::new(transport), variables, &event).await;

    if let Some(path) = args.variables.as_deref()
        && let Err(e) = write_variables(path, &report.variables)
    {
        error!(error = %e, path = %path.display(), "could not write job variables");
    }
    emit(&report)
}

/// Validate `config`, run `event` and collect the updated variables.
pub async fn deliver(
    config: &MarqueeConfig,
    transport: Arc<dyn HttpTransport>,
    variables: Map<String, Value>,
    event: &NotificationEvent,
) -> NotifyReport {
    let store = Arc::new(JobVariablesStore::new(variables));
    let shared: Arc<dyn MessageStateStore> = store.clone();
    let outcome = match NotificationEngine::from_config(config, transport, shared) {
        Ok(engine) => engine.notify(event).await,
        Err(_) => failed(),
    };
    run_report(outcome, &store).await
}

async fn run_report(outcome: NotifyOutcome, store: &JobVariablesStore) -> NotifyReport {
    info!(
        delivered = outcome.delivered,
        output = outcome.output_number(),
        "notification finished"
    );
    NotifyReport::new(&outcome, store.snapshot().await)
}

fn failed() -> NotifyOutcome {
    NotifyOutcome {
        delivered: false,
        message_id: None,
    }
}

fn emit(report: &NotifyReport) -> i32 {
    match serde_json::to_string(report) {
        Ok(json) => println!("{json}"),
        Err(e) => eprintln!("marquee: could not encode outcome: {e}"),
    }
    report.exit_code()
}

/// Read the job snapshot from a file, or stdin when `source` is `-`.
pub fn read_snapshot(source: &str) -> Result<JobSnapshot, MarqueeError> {
    let raw = if source == "-" {
        let mut buf = String::new();
        std::io::stdin()
            .read_to_string(&mut buf)
            .map_err(|e| storage(e.into()))?;
        buf
    } else {
        std::fs::read_to_string(source).map_err(|e| storage(e.into()))?
    };
    parse_snapshot(&raw)
}

pub fn parse_snapshot(raw: &str) -> Result<JobSnapshot, MarqueeError> {
    serde_json::from_str(raw).map_err(|e| MarqueeError::Internal(format!("invalid job snapshot: {e}")))
}

/// Read the host's variables. A missing path or file means no variables yet.
pub fn read_variables(path: Option<&Path>) -> Result<Map<String, Value>, MarqueeError> {
    let Some(path) = path else {
        return Ok(Map::new());
    };
    let raw = match std::fs::read_to_string(path) {
        Ok(raw) => raw,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Map::new()),
        Err(e) => return Err(storage(e.into())),
    };
    if raw.trim().is_empty() {
        return Ok(Map::new());
    }
    match serde_json::from_str::<Value>(&raw).map_err(|e| storage(e.into()))? {
        Value::Object(map) => Ok(map),
        other => Err(MarqueeError::Internal(format!(
            "job variables must be a JSON object, got {}",
            type_name(&other)
        ))),
    }
}

/// Replace the variables file atomically.
pub fn write_variables(path: &Path, variables: &Map<String, Value>) -> Result<(), MarqueeError> {
    let dir = match path.parent() {
        Some(dir) if !dir.as_os_str().is_empty() => dir,
        _ => Path::new("."),
    };
    let mut tmp = tempfile::NamedTempFile::new_in(dir).map_err(|e| storage(e.into()))?;
    serde_json::to_writer_pretty(&mut tmp, variables).map_err(|e| storage(e.into()))?;
    tmp.write_all(b"\n").map_err(|e| storage(e.into()))?;
    tmp.persist(path).map_err(|e| storage(e.error.into()))?;
    Ok(())
}

fn storage(source: Box<dyn std::error::Error + Send + Sync>) -> MarqueeError {
    MarqueeError::Storage { source }
}

fn type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
