use serde::{Deserialize, Serialize};
use std::fs;

use crate::paths;
use crate::perm::DEFAULT_CHMOD_TARGET;

/// Root configuration structure for util.json
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct UtilConfig {
    #[serde(default)]
    pub defaults: Defaults,
}

/// All configurable defaults that can be overridden via util.json
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Defaults {
    #[serde(default = "default_output")]
    pub output: OutputConfig,

    #[serde(default = "default_perm")]
    pub perm: PermConfig,
}

impl Default for Defaults {
    fn default() -> Self {
        Self {
            output: default_output(),
            perm: default_perm(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    Text,
    Json,
}

/// How command results are printed when `--json` is not passed
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutputConfig {
    #[serde(default = "default_output_format")]
    pub format: OutputFormat,
}

/// Settings for the perm command family
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PermConfig {
    /// File argument shown in the `perm explain` chmod hint
    #[serde(default = "default_chmod_target")]
    pub chmod_target: String,
}

// =============================================================================
// Default value functions
// =============================================================================

fn default_output() -> OutputConfig {
    OutputConfig {
        format: default_output_format(),
    }
}

fn default_output_format() -> OutputFormat {
    OutputFormat::Text
}

fn default_perm() -> PermConfig {
    PermConfig {
        chmod_target: default_chmod_target(),
    }
}

fn default_chmod_target() -> String {
    DEFAULT_CHMOD_TARGET.to_string()
}

// =============================================================================
// Loading functions
// =============================================================================

/// Load defaults, merging file config with built-in defaults.
/// If util.json is missing or invalid, returns built-in defaults.
pub fn load_defaults() -> Defaults {
    load_config().defaults
}

/// Load the full util.json config, falling back to defaults on any error.
pub fn load_config() -> UtilConfig {
    match load_config_from_file() {
        Ok(Some(config)) => config,
        Ok(None) => UtilConfig::default(),
        Err(err) => {
            crate::log_status!("config", "Ignoring util.json: {}", err);
            UtilConfig::default()
        }
    }
}

/// Read util.json if it exists.
fn load_config_from_file() -> crate::Result<Option<UtilConfig>> {
    let path = paths::util_json()?;

    if !path.exists() {
        return Ok(None);
    }

    let content = fs::read_to_string(&path).map_err(|e| {
        crate::Error::internal_io(e.to_string(), Some(format!("read {}", path.display())))
    })?;

    let config: UtilConfig = serde_json::from_str(&content)
        .map_err(|e| crate::Error::config_invalid_json(path.display().to_string(), e))?;

    Ok(Some(config))
}

/// Save config to util.json file (creates if missing).
pub fn save_config(config: &UtilConfig) -> crate::Result<()> {
    let path = paths::util_json()?;

    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).map_err(|e| {
            crate::Error::internal_io(e.to_string(), Some(format!("create {}", parent.display())))
        })?;
    }

    let content = serde_json::to_string_pretty(config).map_err(|e| {
        crate::Error::internal_json(e.to_string(), Some("serialize util.json".to_string()))
    })?;

    fs::write(&path, content).map_err(|e| {
        crate::Error::internal_io(e.to_string(), Some(format!("write {}", path.display())))
    })?;

    Ok(())
}

/// Set one value by JSON pointer (e.g. `/defaults/perm/chmod_target`).
///
/// The pointer must name a key that already exists in the merged config, and
/// the resulting document must still deserialize.
pub fn set_value(
    config: &UtilConfig,
    pointer: &str,
    value: serde_json::Value,
) -> crate::Result<UtilConfig> {
    if !pointer.starts_with('/') {
        return Err(crate::Error::validation_invalid_argument(
            "pointer",
            format!("JSON pointer must start with '/': {}", pointer),
        ));
    }

    let mut json = serde_json::to_value(config).map_err(|e| {
        crate::Error::internal_json(e.to_string(), Some("serialize config".to_string()))
    })?;

    let slot = json.pointer_mut(pointer).ok_or_else(|| {
        crate::Error::config_invalid_value(pointer, None, format!("unknown key {}", pointer))
    })?;
    *slot = value.clone();

    serde_json::from_value(json).map_err(|e| {
        crate::Error::config_invalid_value(pointer, Some(value.to_string()), e.to_string())
    })
}

/// Check if util.json file exists
pub fn config_exists() -> bool {
    paths::util_json().map(|p| p.exists()).unwrap_or(false)
}

/// Delete util.json file (reset to defaults)
pub fn reset_config() -> crate::Result<bool> {
    let path = paths::util_json()?;

    if path.exists() {
        fs::remove_file(&path).map_err(|e| {
            crate::Error::internal_io(e.to_string(), Some(format!("delete {}", path.display())))
        })?;
        Ok(true)
    } else {
        Ok(false)
    }
}

/// Get the path to util.json (for display purposes)
pub fn config_path() -> crate::Result<String> {
    Ok(paths::util_json()?.display().to_string())
}

/// Get built-in defaults (ignoring any file config)
pub fn builtin_defaults() -> Defaults {
    Defaults::default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorCode;
    use serde_json::json;

    #[test]
    fn missing_sections_use_builtins() {
        let config: UtilConfig = serde_json::from_str("{}").unwrap();
        assert_eq!(config.defaults.output.format, OutputFormat::Text);
        assert_eq!(config.defaults.perm.chmod_target, "<file>");

        let config: UtilConfig =
            serde_json::from_str(r#"{"defaults":{"output":{"format":"json"}}}"#).unwrap();
        assert_eq!(config.defaults.output.format, OutputFormat::Json);
        assert_eq!(config.defaults.perm.chmod_target, "<file>");
    }

    #[test]
    fn set_value_updates_known_key() {
        let config = set_value(
            &UtilConfig::default(),
            "/defaults/perm/chmod_target",
            json!("script.sh"),
        )
        .unwrap();
        assert_eq!(config.defaults.perm.chmod_target, "script.sh");
    }

    #[test]
    fn set_value_rejects_unknown_key() {
        let err = set_value(&UtilConfig::default(), "/defaults/nope", json!(1)).unwrap_err();
        assert_eq!(err.code, ErrorCode::ConfigInvalidValue);
    }

    #[test]
    fn set_value_rejects_wrong_type() {
        let err = set_value(
            &UtilConfig::default(),
            "/defaults/output/format",
            json!("yaml"),
        )
        .unwrap_err();
        assert_eq!(err.code, ErrorCode::ConfigInvalidValue);
    }

    #[test]
    fn set_value_requires_leading_slash() {
        let err = set_value(&UtilConfig::default(), "defaults", json!({})).unwrap_err();
        assert_eq!(err.code, ErrorCode::ValidationInvalidArgument);
    }
}
