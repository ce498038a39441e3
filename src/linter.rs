use crate::cli::{Severity, Shell};
use crate::error::{ConvertError, Result};
use crate::types::config::ConverterConfig;
use crate::types::finding::LinterReport;
use serde_json::Value;
use std::path::{Path, PathBuf};
use std::process::Command;
use tracing::{debug, warn};
use walkdir::WalkDir;

const SHELL_EXTENSIONS: &[&str] = &["sh", "bash", "ksh", "dash"];

/// Expand the command-line inputs into the file list handed to the linter.
/// Files are kept as given; directories are walked for shell scripts.
pub fn collect_targets(inputs: &[PathBuf]) -> Result<Vec<PathBuf>> {
    let mut targets = Vec::new();
    for input in inputs {
        if !input.exists() {
            return Err(ConvertError::PathNotFound(input.display().to_string()));
        }
        if input.is_dir() {
            let mut scripts = list_scripts(input);
            scripts.sort();
            targets.extend(scripts);
        } else {
            targets.push(input.clone());
        }
    }
    Ok(targets)
}

fn list_scripts(root: &Path) -> Vec<PathBuf> {
    WalkDir::new(root)
        .into_iter()
        .filter_map(|entry| entry.ok())
        .filter(|entry| entry.file_type().is_file())
        .map(|entry| entry.path().to_path_buf())
        .filter(|path| {
            path.extension()
                .and_then(|extension| extension.to_str())
                .map(|extension| SHELL_EXTENSIONS.contains(&extension))
                .unwrap_or(false)
        })
        .collect()
}

/// Run the linter and return the raw report entries. A non-zero exit with
/// parseable output means "ran with findings" and is not an error.
pub fn run_linter(
    config: &ConverterConfig,
    shell: Shell,
    severity: Severity,
    targets: &[PathBuf],
) -> Result<Vec<Value>> {
    let command_name = config.linter_command();
    let mut command = Command::new(command_name);
    command
        .arg(format!("--shell={}", shell.as_flag()))
        .arg(format!("--severity={}", severity.as_flag()))
        .arg("--format=json1");
    if config.check_sourced() {
        command.arg("--check-sourced");
    }
    command.args(targets);

    debug!(command = command_name, targets = targets.len(), "running linter");
    let output = command
        .output()
        .map_err(|source| ConvertError::LinterLaunch {
            command: command_name.to_string(),
            source,
        })?;

    if !output.status.success() {
        warn!(
            status = %output.status,
            stderr = %stderr_context(&output.stderr),
            "linter exited non-zero; parsing its report anyway"
        );
    }

    parse_report(&output.stdout, &output.stderr)
}

pub fn parse_report(stdout: &[u8], stderr: &[u8]) -> Result<Vec<Value>> {
    match serde_json::from_slice::<LinterReport>(stdout) {
        Ok(report) => Ok(report.into_entries()),
        Err(error) => {
            let context = stderr_context(stderr);
            if context.is_empty() {
                Err(ConvertError::LinterReport(error.to_string()))
            } else {
                Err(ConvertError::LinterReport(format!(
                    "{error} (linter stderr: {context})"
                )))
            }
        }
    }
}

/// Best-effort probe of the linter's version for the SARIF tool descriptor.
pub fn detect_version(command_name: &str) -> Option<String> {
    let output = Command::new(command_name).arg("--version").output().ok()?;
    if !output.status.success() {
        return None;
    }
    let stdout = String::from_utf8_lossy(&output.stdout);
    stdout
        .lines()
        .find_map(|line| line.strip_prefix("version:"))
        .map(|version| version.trim().to_string())
        .filter(|version| !version.is_empty())
}

fn stderr_context(stderr: &[u8]) -> String {
    let text = String::from_utf8_lossy(stderr);
    let trimmed = text.trim();
    let lines: Vec<&str> = trimmed.lines().collect();
    let keep = lines.len().saturating_sub(5);
    lines[keep..].join(" | ")
}
