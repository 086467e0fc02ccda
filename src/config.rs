use crate::error::{Result, TypecodeError};
use crate::types::config::TypecodeConfig;
use std::path::{Path, PathBuf};
use toml::map::Map;
use toml::Value;

pub const DEFAULT_CONFIG_FILE: &str = "typecode.toml";
pub const DEFAULT_LOCAL_FILE: &str = ".typecode/local.toml";
pub const DEFAULT_GLOBAL_CONFIG_FILE: &str = ".config/typecode/config.toml";

pub fn load_config(root: &Path) -> Result<Option<TypecodeConfig>> {
    let global = std::env::var_os("HOME")
        .map(PathBuf::from)
        .map(|home| home.join(DEFAULT_GLOBAL_CONFIG_FILE));
    load_config_with_global(root, global.as_deref())
}

/// Like [`load_config`], but a missing project file is an error.
pub fn require_config(root: &Path) -> Result<TypecodeConfig> {
    if !root.exists() {
        return Err(TypecodeError::PathNotFound(root.display().to_string()));
    }
    load_config(root)?.ok_or_else(|| {
        TypecodeError::ConfigNotFound(root.join(DEFAULT_CONFIG_FILE).display().to_string())
    })
}

pub(crate) fn load_config_with_global(
    root: &Path,
    global_path: Option<&Path>,
) -> Result<Option<TypecodeConfig>> {
    let repo_path = root.join(DEFAULT_CONFIG_FILE);
    if !repo_path.exists() {
        tracing::debug!(path = %repo_path.display(), "no project config");
        return Ok(None);
    }

    let mut merged = Value::Table(Map::new());
    if let Some(path) = global_path {
        merge_file_if_exists(&mut merged, path)?;
    }
    merge_file_if_exists(&mut merged, &repo_path)?;
    merge_file_if_exists(&mut merged, &root.join(DEFAULT_LOCAL_FILE))?;

    let cfg: TypecodeConfig = merged
        .try_into()
        .map_err(|e: toml::de::Error| TypecodeError::ConfigParse(e.to_string()))?;
    Ok(Some(cfg))
}

fn merge_file_if_exists(merged: &mut Value, path: &Path) -> Result<()> {
    if !path.exists() {
        return Ok(());
    }
    let value = read_toml_value(path)?;
    tracing::debug!(path = %path.display(), "merging config layer");
    merge_toml(merged, value);
    Ok(())
}

fn read_toml_value(path: &Path) -> Result<Value> {
    let content = std::fs::read_to_string(path)?;
    toml::from_str(&content)
        .map_err(|e| TypecodeError::ConfigParse(format!("{}: {}", path.display(), e)))
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
