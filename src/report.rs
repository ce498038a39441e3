use crate::error::{ConvertError, Result};
use crate::types::sarif::SarifLog;
use std::fs;
use std::path::Path;

pub fn to_json(log: &SarifLog) -> std::result::Result<String, serde_json::Error> {
    serde_json::to_string_pretty(log)
}

/// Serialize the log and write it to `path`. Both failure modes are fatal
/// and carry enough context to diagnose them.
pub fn write_sarif(path: &Path, log: &SarifLog) -> Result<()> {
    let mut rendered = to_json(log).map_err(|source| ConvertError::OutputSerialize {
        path: path.to_path_buf(),
        source,
    })?;
    rendered.push('\n');
    fs::write(path, rendered).map_err(|source| ConvertError::OutputWrite {
        path: path.to_path_buf(),
        source,
    })
}
