use crate::error::{ConvertError, Result};
use crate::types::config::ConverterConfig;
use std::path::{Path, PathBuf};
use toml::map::Map;
use toml::Value;

pub const DEFAULT_CONFIG_FILE: &str = "shellcheck-sarif.toml";
pub const DEFAULT_GLOBAL_CONFIG_FILE: &str = ".config/shellcheck-sarif/config.toml";

/// Load the layered configuration: the user-global file first, the project
/// file on top. An explicit path must exist; discovered files are optional.
pub fn load_config(explicit: Option<&Path>) -> Result<ConverterConfig> {
    let global = std::env::var_os("HOME")
        .map(PathBuf::from)
        .map(|home| home.join(DEFAULT_GLOBAL_CONFIG_FILE));
    load_config_with_global(explicit, global.as_deref())
}

pub(crate) fn load_config_with_global(
    explicit: Option<&Path>,
    global_path: Option<&Path>,
) -> Result<ConverterConfig> {
    let project_path = match explicit {
        Some(path) => {
            if !path.exists() {
                return Err(ConvertError::PathNotFound(path.display().to_string()));
            }
            path.to_path_buf()
        }
        None => PathBuf::from(DEFAULT_CONFIG_FILE),
    };

    let mut merged = Value::Table(Map::new());
    if let Some(path) = global_path {
        merge_file_if_exists(&mut merged, path)?;
    }
    merge_file_if_exists(&mut merged, &project_path)?;

    let cfg: ConverterConfig = merged
        .try_into()
        .map_err(|e: toml::de::Error| ConvertError::ConfigParse(e.to_string()))?;
    cfg.validate()?;
    Ok(cfg)
}

fn merge_file_if_exists(merged: &mut Value, path: &Path) -> Result<()> {
    if !path.exists() {
        return Ok(());
    }
    let value = read_toml_value(path)?;
    merge_toml(merged, value);
    Ok(())
}

fn read_toml_value(path: &Path) -> Result<Value> {
    let content = std::fs::read_to_string(path)?;
    toml::from_str(&content)
        .map_err(|e| ConvertError::ConfigParse(format!("{}: {}", path.display(), e)))
}

fn merge_toml(base: &mut Value, overlay: Value) {
    match (base, overlay) {
        (Value::Table(base_table), Value::Table(overlay_table)) => {
            for (key, value) in overlay_table {
                match base_table.get_mut(&key) {
                    Some(existing) => merge_toml(existing, value),
                    None => {
                        base_table.insert(key, value);
                    }
                }
            }
        }
        (slot, value) => {
            *slot = value;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn load_config_yields_defaults_when_no_file_exists() {
        let cfg = load_config_with_global(None, None).expect("load should not fail");
        assert_eq!(cfg.linter_command(), "shellcheck");
        assert!(cfg.docs_enabled());
    }

    #[test]
    fn load_config_rejects_missing_explicit_path() {
        let dir = TempDir::new().expect("temp dir should be created");
        let missing = dir.path().join("absent.toml");
        let err = load_config_with_global(Some(&missing), None)
            .expect_err("missing explicit config should fail");
        assert!(err.to_string().contains("does not exist"));
    }

    #[test]
    fn load_config_merges_global_under_project() {
        let dir = TempDir::new().expect("temp dir should be created");
        let global_path = dir.path().join("global.toml");
        let project_path = dir.path().join("project.toml");

        fs::write(
            &global_path,
            r#"
[linter]
command = "/usr/local/bin/shellcheck"

[docs]
timeout_secs = 10
"#,
        )
        .expect("global config should write");

        fs::write(
            &project_path,
            r#"
[docs]
timeout_secs = 2
"#,
        )
        .expect("project config should write");

        let cfg = load_config_with_global(Some(&project_path), Some(&global_path))
            .expect("load should succeed");

        assert_eq!(cfg.linter_command(), "/usr/local/bin/shellcheck");
        assert_eq!(cfg.docs_timeout(), std::time::Duration::from_secs(2));
    }

    #[test]
    fn load_config_surfaces_validation_errors() {
        let dir = TempDir::new().expect("temp dir should be created");
        let path = dir.path().join("bad.toml");
        fs::write(&path, "[docs]\ntimeout_secs = 0\n").expect("config should write");

        let err = load_config_with_global(Some(&path), None)
            .expect_err("invalid config should fail");
        assert!(err.to_string().contains("timeout_secs"));
    }
}
