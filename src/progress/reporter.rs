use serde::Serialize;
use std::io::{self, Write};

const TOOL: &str = "spyder-index";

/// Structured progress event emitted to stderr after each file.
#[derive(Debug, Serialize)]
pub struct ProgressEvent {
    #[serde(rename = "type")]
    pub event_type: String,
    pub tool: String,
    pub path: String,
    pub processed: u64,
    pub total: u64,
    pub percent: f64,
    pub documents: u64,
    pub elapsed_ms: u64,
}

impl ProgressEvent {
    pub fn new(path: &str, processed: u64, total: u64, documents: u64, elapsed_ms: u64) -> Self {
        let percent = if total == 0 {
            100.0
        } else {
            (processed as f64 / total as f64 * 1000.0).round() / 10.0
        };
        Self {
            event_type: "progress".to_owned(),
            tool: TOOL.to_owned(),
            path: path.to_owned(),
            processed,
            total,
            percent,
            documents,
            elapsed_ms,
        }
    }
}

/// Structured warning emitted to stderr for files that produced no documents.
#[derive(Debug, Serialize)]
pub struct WarningEvent {
    #[serde(rename = "type")]
    pub event_type: String,
    pub tool: String,
    pub path: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub code: Option<String>,
    pub message: String,
}

/// Report progress to stderr as JSONL.
pub fn report_progress(event: &ProgressEvent) {
    let mut stderr = io::stderr().lock();
    let _ = write_event_line(&mut stderr, event);
}

/// Report a warning to stderr as JSONL with an optional warning code.
pub fn report_warning_code(path: &str, code: Option<&str>, message: &str) {
    let warning = WarningEvent {
        event_type: "warning".to_owned(),
        tool: TOOL.to_owned(),
        path: path.to_owned(),
        code: code.map(str::to_owned),
        message: message.to_owned(),
    };
    let mut stderr = io::stderr().lock();
    let _ = write_event_line(&mut stderr, &warning);
}

fn write_event_line<T: Serialize>(out: &mut dyn Write, event: &T) -> Result<(), String> {
    serde_json::to_writer(&mut *out, event)
        .map_err(|error| format!("failed to serialize progress event: {error}"))?;
    out.write_all(b"\n")
        .map_err(|error| format!("failed to write progress event newline: {error}"))?;
    out.flush()
        .map_err(|error| format!("failed to flush progress event output: {error}"))?;
    Ok(())
}
