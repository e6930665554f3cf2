#![forbid(unsafe_code)]

pub mod cli;
pub mod config;
pub mod document;
pub mod error;
pub mod loaders;
pub mod output;
pub mod pipeline;
pub mod progress;
pub mod readers;
pub mod refusal;

pub use document::{BaseDocument, Document, DocumentBuilder, ExternalDocument, Metadata};
pub use error::{DocumentError, LoadError, ReaderError};
pub use loaders::{DocumentLoader, HtmlLoader, LoadMode, LoadedDocument};
pub use readers::{BaseReader, HtmlReader};

use refusal::{RefusalCode, RefusalPayload};
use std::time::Instant;

/// Run the spyder-index CLI. Returns an exit code (0, 1, or 2).
pub fn run() -> u8 {
    use clap::Parser;
    use cli::Cli;

    let cli = Cli::parse();

    if cli.describe {
        return handle_describe();
    }
    if cli.schema {
        return handle_schema();
    }

    handle_load_mode(cli)
}

/// Load every input file and emit its documents as JSONL.
fn handle_load_mode(cli: cli::Cli) -> u8 {
    use cli::Outcome;
    use output::jsonl::write_jsonl;
    use progress::reporter::{ProgressEvent, report_progress, report_warning_code};

    if cli.files.is_empty() {
        let refusal = RefusalPayload::new(
            RefusalCode::NoInput,
            "No input files given",
            serde_json::json!({ "files": [] }),
        )
        .with_next_command("spyder-index <FILE>...");
        output_refusal_envelope(&refusal);
        return Outcome::Refusal.exit_code();
    }

    let jobs = config::resolve_jobs(cli.jobs);
    let started = Instant::now();
    let outcomes = pipeline::load_files_parallel(&cli.files, cli.mode, jobs);
    let total = outcomes.len() as u64;

    let mut documents = Vec::new();
    let mut failures = Vec::new();
    for (index, (path, outcome)) in cli.files.iter().zip(outcomes).enumerate() {
        let loaded = match outcome {
            Ok(file_documents) => {
                let count = file_documents.len();
                documents.extend(file_documents);
                count
            }
            Err(failure) => {
                report_warning_code(
                    &failure.path.display().to_string(),
                    Some(failure.code.as_str()),
                    &failure.message,
                );
                failures.push(failure);
                0
            }
        };

        if cli.progress {
            report_progress(&ProgressEvent::new(
                &path.display().to_string(),
                index as u64 + 1,
                total,
                loaded as u64,
                elapsed_ms(started),
            ));
        }
    }

    let outcome = Outcome::from_counts(cli.files.len(), failures.len());
    if outcome == Outcome::Refusal {
        let code = failures
            .first()
            .map(|failure| failure.code)
            .unwrap_or(RefusalCode::NoInput);
        let detail = serde_json::to_value(&failures)
            .map(|failures| serde_json::json!({ "failures": failures }))
            .unwrap_or(serde_json::Value::Null);
        let refusal = RefusalPayload::new(code, "No input file could be loaded", detail);
        output_refusal_envelope(&refusal);
        return outcome.exit_code();
    }

    let mut stdout = std::io::stdout();
    if let Err(error) = write_jsonl(&mut stdout, &documents) {
        eprintln!("Error writing output: {}", error);
        return Outcome::Refusal.exit_code();
    }

    outcome.exit_code()
}

/// Handle --describe flag: print operator.json and exit.
fn handle_describe() -> u8 {
    let operator = serde_json::json!({
        "name": "spyder-index",
        "version": env!("CARGO_PKG_VERSION"),
        "description": "Load HTML files into text documents with metadata",
        "pipeline_role": "reader",
        "input_format": "HTML",
        "output_format": "JSONL",
        "modes": [LoadMode::Single, LoadMode::Elements],
        "file_support": true,
        "stdin_support": false
    });

    if let Ok(json) = serde_json::to_string_pretty(&operator) {
        println!("{}", json);
        0
    } else {
        eprintln!("Error: Failed to serialize operator metadata");
        2
    }
}

/// Handle --schema flag: print JSON Schema of output records and exit.
fn handle_schema() -> u8 {
    let schema = serde_json::json!({
        "$schema": "http://json-schema.org/draft-07/schema#",
        "title": "spyder-index Document",
        "description": "One document loaded from an HTML file",
        "type": "object",
        "properties": {
            "doc_id": { "type": "string", "minLength": 1 },
            "metadata": { "type": "object" },
            "text": { "type": "string" }
        },
        "required": ["doc_id", "metadata", "text"]
    });

    if let Ok(json) = serde_json::to_string_pretty(&schema) {
        println!("{}", json);
        0
    } else {
        eprintln!("Error: Failed to serialize schema");
        2
    }
}

fn output_refusal_envelope(refusal: &RefusalPayload) {
    let mut stdout = std::io::stdout();
    if let Err(error) = output::jsonl::write_jsonl(&mut stdout, std::slice::from_ref(refusal)) {
        eprintln!("Error writing refusal: {}", error);
    }
}

fn elapsed_ms(started: Instant) -> u64 {
    u64::try_from(started.elapsed().as_millis()).unwrap_or(u64::MAX)
}
