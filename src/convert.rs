use crate::cli::Shell;
use crate::docs::RuleDocs;
use crate::types::finding::{Finding, FindingFix};
use crate::types::sarif::{
    Artifact, ArtifactChange, ArtifactContent, ArtifactLocation, Fix, Location, Message,
    MultiformatMessageString, PhysicalLocation, Region, Replacement, ReportingDescriptor, Run,
    SarifLog, SarifResult, Tool, ToolComponent, SCHEMA_URL, VERSION,
};
use serde_json::Value;
use sha2::{Digest, Sha256};
use std::collections::HashMap;
use tracing::warn;

pub const RULE_PREFIX: &str = "SC";
pub const TOOL_NAME: &str = "ShellCheck";
pub const TOOL_INFORMATION_URI: &str = "https://www.shellcheck.net/";
pub const RULE_HELP_URI_BASE: &str = "https://www.shellcheck.net/wiki";

/// Maps parsed linter report entries to a SARIF log. Rules and artifacts
/// are deduplicated with stable, first-seen index assignment; every
/// well-formed entry maps to exactly one result.
pub struct Converter {
    shell: Shell,
    docs: RuleDocs,
    tool_version: Option<String>,
    rule_indices: HashMap<String, usize>,
    artifact_indices: HashMap<String, usize>,
    rules: Vec<ReportingDescriptor>,
    artifacts: Vec<Artifact>,
    results: Vec<SarifResult>,
}

impl Converter {
    pub fn new(shell: Shell, docs: RuleDocs, tool_version: Option<String>) -> Self {
        Self {
            shell,
            docs,
            tool_version,
            rule_indices: HashMap::new(),
            artifact_indices: HashMap::new(),
            rules: Vec::new(),
            artifacts: Vec::new(),
            results: Vec::new(),
        }
    }

    pub fn convert(mut self, entries: &[Value]) -> SarifLog {
        for entry in entries {
            match serde_json::from_value::<Finding>(entry.clone()) {
                Ok(finding) => self.push_finding(&finding),
                Err(error) => warn!(%error, %entry, "skipping malformed finding"),
            }
        }
        self.into_log()
    }

    fn push_finding(&mut self, finding: &Finding) {
        let code = format!("{RULE_PREFIX}{}", finding.code);
        let rule_index = self.ensure_rule(&code, &finding.message);
        let uri = normalize_path(&finding.file);
        let artifact_index = self.ensure_artifact(&uri);

        let region = build_region(
            finding.start_line(),
            finding.start_column(),
            finding.end_line(),
            finding.end_column(),
            Some(self.shell.source_language().to_string()),
        );

        let location = Location {
            id: Some(path_id(&uri)),
            physical_location: PhysicalLocation {
                artifact_location: ArtifactLocation {
                    uri: uri.clone(),
                    index: Some(artifact_index),
                },
                region,
            },
        };

        let fixes = finding
            .fix
            .as_ref()
            .and_then(|fix| fix_for(fix, &uri, artifact_index));

        self.results.push(SarifResult {
            rule_id: code,
            rule_index,
            message: Message {
                text: finding.message.clone(),
            },
            locations: vec![location],
            fixes,
        });
    }

    fn ensure_rule(&mut self, code: &str, message: &str) -> usize {
        if let Some(&index) = self.rule_indices.get(code) {
            return index;
        }

        let full_text = self
            .docs
            .lookup(code)
            .unwrap_or_else(|| message.to_string());
        let rule = ReportingDescriptor {
            id: code.to_string(),
            name: code.to_string(),
            short_description: MultiformatMessageString {
                text: message.to_string(),
            },
            full_description: MultiformatMessageString {
                text: full_text.clone(),
            },
            help: MultiformatMessageString { text: full_text },
            help_uri: format!("{RULE_HELP_URI_BASE}/{code}"),
        };

        let index = self.rules.len();
        self.rules.push(rule);
        self.rule_indices.insert(code.to_string(), index);
        index
    }

    fn ensure_artifact(&mut self, uri: &str) -> usize {
        if let Some(&index) = self.artifact_indices.get(uri) {
            return index;
        }

        let index = self.artifacts.len();
        self.artifacts.push(Artifact {
            location: ArtifactLocation {
                uri: uri.to_string(),
                index: Some(index),
            },
            source_language: Some(self.shell.source_language().to_string()),
        });
        self.artifact_indices.insert(uri.to_string(), index);
        index
    }

    fn into_log(self) -> SarifLog {
        SarifLog {
            schema: SCHEMA_URL.to_string(),
            version: VERSION.to_string(),
            runs: vec![Run {
                tool: Tool {
                    driver: ToolComponent {
                        name: TOOL_NAME.to_string(),
                        version: self.tool_version,
                        information_uri: TOOL_INFORMATION_URI.to_string(),
                        rules: self.rules,
                    },
                },
                artifacts: self.artifacts,
                results: self.results,
                default_source_language: Some(self.shell.source_language().to_string()),
            }],
        }
    }
}

/// A fix is emitted only when at least one replacement carries actual
/// replacement text; every replacement references the deduplicated artifact.
fn fix_for(fix: &FindingFix, uri: &str, artifact_index: usize) -> Option<Vec<Fix>> {
    if fix
        .replacements
        .iter()
        .all(|replacement| replacement.replacement.is_empty())
    {
        return None;
    }

    let description = fix
        .replacements
        .first()
        .map(|replacement| replacement.replacement.clone())
        .unwrap_or_default();

    let replacements = fix
        .replacements
        .iter()
        .map(|replacement| Replacement {
            deleted_region: build_region(
                replacement.start_line(),
                replacement.start_column(),
                replacement.end_line(),
                replacement.end_column(),
                None,
            ),
            inserted_content: ArtifactContent {
                text: replacement.replacement.clone(),
            },
        })
        .collect();

    Some(vec![Fix {
        description: Message { text: description },
        artifact_changes: vec![ArtifactChange {
            artifact_location: ArtifactLocation {
                uri: uri.to_string(),
                index: Some(artifact_index),
            },
            replacements,
        }],
    }])
}

fn build_region(
    start_line: u64,
    start_column: u64,
    end_line: u64,
    end_column: u64,
    source_language: Option<String>,
) -> Region {
    let char_length = if end_line == start_line {
        end_column
            .checked_sub(start_column)
            .filter(|length| *length > 0)
    } else {
        None
    };

    Region {
        start_line,
        start_column,
        end_line,
        end_column,
        char_length,
        source_language,
    }
}

/// OS-neutral form of a report path; the deduplication key for artifacts.
fn normalize_path(path: &str) -> String {
    path.replace('\\', "/")
}

/// Stable numeric identifier for a normalized path: the first 8 bytes of
/// its SHA-256 digest.
fn path_id(path: &str) -> u64 {
    let digest = Sha256::digest(path.as_bytes());
    let mut bytes = [0u8; 8];
    bytes.copy_from_slice(&digest[..8]);
    u64::from_be_bytes(bytes)
}
