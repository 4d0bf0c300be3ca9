//! # `popia sanitize`
//!
//! Classifies marketing contact lists by consent and prints the list
//! score, the flagged contacts, and a local integrity receipt of the file.
//!
//! Several files may be given. They are treated as successive selections of
//! one upload control: each supersedes the previous one, and only the last
//! readable file is reported. Files that cannot be read are skipped with a
//! warning.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::Args;
use popia_sanitizer::{sanitize, Contact, SanitizerPolicy, NO_EMAIL, UNKNOWN_NAME};
use popia_state::{update, Action, AppState, UploadState, UploadSupervisor};

use crate::config::CliConfig;

/// Arguments for `popia sanitize`.
#[derive(Args, Debug)]
pub struct SanitizeArgs {
    /// Contact list(s) in CSV with a header row. The last readable file wins.
    #[arg(required = true)]
    pub files: Vec<PathBuf>,

    /// Consent policy (standard or strict). Overrides the config file.
    #[arg(long)]
    pub policy: Option<SanitizerPolicy>,

    /// Print the upload state as JSON.
    #[arg(long)]
    pub json: bool,
}

/// Execute `popia sanitize`.
pub fn run_sanitize(args: &SanitizeArgs, config: &CliConfig) -> Result<u8> {
    let policy = args.policy.unwrap_or(config.sanitizer_policy);
    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .context("failed to start async runtime")?;
    let state = runtime.block_on(process_uploads(&args.files, policy))?;

    let Some(upload) = state.upload else {
        anyhow::bail!("none of the {} file(s) could be read", args.files.len());
    };
    if args.json {
        println!("{}", serde_json::to_string_pretty(&upload)?);
    } else {
        print!("{}", format_upload(&upload));
    }
    Ok(0)
}

/// Feed each readable file through the session state as a new upload,
/// then wait for the digest of the last one.
pub async fn process_uploads(files: &[PathBuf], policy: SanitizerPolicy) -> Result<AppState> {
    let mut supervisor = UploadSupervisor::new();
    let mut state = AppState::new(Default::default(), policy);

    for path in files {
        let content = match std::fs::read(path) {
            Ok(content) => content,
            Err(e) => {
                tracing::warn!(path = %path.display(), error = %e, "skipped unreadable file");
                continue;
            }
        };
        let file_name = display_name(path);
        let upload = supervisor.submit(file_name.clone(), content.clone());
        state = update(state, Action::BeginUpload { upload, file_name });
        let outcome = sanitize(&content, state.policy);
        state = update(state, Action::ContactsParsed { upload, outcome });
    }

    if let Some(done) = supervisor.join().await? {
        state = update(state, done.into());
    }
    Ok(state)
}

fn display_name(path: &Path) -> Option<String> {
    path.file_name().map(|n| n.to_string_lossy().into_owned())
}

/// Human-readable upload summary.
pub fn format_upload(upload: &UploadState) -> String {
    let mut lines = Vec::new();
    if let Some(name) = &upload.file_name {
        lines.push(format!("File: {name}"));
    }
    if let Some(outcome) = &upload.outcome {
        let result = &outcome.result;
        let report = &outcome.report;
        lines.push(format!("Policy: {}", result.policy));
        lines.push(format!(
            "Rows: {} parsed, {} empty skipped, {} malformed skipped",
            report.parsed, report.skipped_empty, report.skipped_malformed
        ));
        lines.push(format!("Consented: {}/{}", result.consented, result.total_rows));
        lines.push(format!("List Compliance: {}%", result.compliance_percent));
        if result.flagged.is_empty() {
            lines.push("No contacts flagged.".to_string());
        } else {
            lines.push(format!("Flagged Contacts ({}):", result.flagged.len()));
            lines.extend(result.flagged.iter().map(|flagged| {
                let line = flagged
                    .line
                    .map_or_else(|| "?".to_string(), |l| l.to_string());
                format!(
                    "  line {line}: {} - {}",
                    contact_label(&flagged.contact),
                    flagged.reason
                )
            }));
        }
    }
    if let Some(receipt) = &upload.receipt {
        lines.push(String::new());
        lines.push("Integrity Receipt:".to_string());
        lines.push(format!("  digest:    {}", receipt.digest));
        lines.push(format!("  size:      {} bytes", receipt.size_bytes));
        lines.push(format!("  timestamp: {}", receipt.computed_at));
        lines.push(format!("  status:    {}", receipt.status));
    }
    crate::join_lines(lines)
}

/// `Name <email>`, with missing parts shown as bracketed placeholders so they
/// cannot be mistaken for real values.
fn contact_label(contact: &Contact) -> String {
    let name = contact
        .name
        .clone()
        .unwrap_or_else(|| format!("[{UNKNOWN_NAME}]"));
    let email = contact
        .email
        .as_ref()
        .map_or_else(|| format!("[{NO_EMAIL}]"), |email| format!("<{email}>"));
    format!("{name} {email}")
}
