use crate::error::ConvertError;
use serde::Deserialize;
use std::time::Duration;

pub const DEFAULT_LINTER_COMMAND: &str = "shellcheck";
pub const DEFAULT_DOCS_BASE_URL: &str =
    "https://raw.githubusercontent.com/wiki/koalaman/shellcheck";
pub const DEFAULT_DOCS_TIMEOUT_SECS: u64 = 5;

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ConverterConfig {
    pub linter: Option<LinterConfig>,
    pub docs: Option<DocsConfig>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LinterConfig {
    pub command: Option<String>,
    pub check_sourced: Option<bool>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct DocsConfig {
    pub enabled: Option<bool>,
    pub base_url: Option<String>,
    pub timeout_secs: Option<u64>,
}

impl ConverterConfig {
    pub fn linter_command(&self) -> &str {
        self.linter
            .as_ref()
            .and_then(|linter| linter.command.as_deref())
            .unwrap_or(DEFAULT_LINTER_COMMAND)
    }

    pub fn check_sourced(&self) -> bool {
        self.linter
            .as_ref()
            .and_then(|linter| linter.check_sourced)
            .unwrap_or(true)
    }

    pub fn docs_enabled(&self) -> bool {
        self.docs
            .as_ref()
            .and_then(|docs| docs.enabled)
            .unwrap_or(true)
    }

    pub fn docs_base_url(&self) -> &str {
        self.docs
            .as_ref()
            .and_then(|docs| docs.base_url.as_deref())
            .unwrap_or(DEFAULT_DOCS_BASE_URL)
    }

    pub fn docs_timeout(&self) -> Duration {
        let secs = self
            .docs
            .as_ref()
            .and_then(|docs| docs.timeout_secs)
            .unwrap_or(DEFAULT_DOCS_TIMEOUT_SECS);
        Duration::from_secs(secs)
    }

    pub fn validate(&self) -> Result<(), ConvertError> {
        if self.linter_command().trim().is_empty() {
            return Err(ConvertError::ConfigParse(
                "linter.command must be a non-empty command name".to_string(),
            ));
        }

        if let Some(docs) = &self.docs {
            if docs.timeout_secs == Some(0) {
                return Err(ConvertError::ConfigParse(
                    "docs.timeout_secs must be greater than 0".to_string(),
                ));
            }
            if let Some(base_url) = &docs.base_url {
                if !base_url.starts_with("http://") && !base_url.starts_with("https://") {
                    return Err(ConvertError::ConfigParse(format!(
                        "docs.base_url must be an http(s) URL: {base_url}"
                    )));
                }
            }
        }

        Ok(())
    }
}
