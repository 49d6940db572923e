use clap::{Args, Subcommand};
use serde::Serialize;
use serde_json::Value;

use util::defaults::{self, Defaults, UtilConfig};

use super::{CmdResult, GlobalArgs};
use crate::output::TextOutput;

#[derive(Args)]
pub struct ConfigArgs {
    #[command(subcommand)]
    command: ConfigCommand,
}

#[derive(Subcommand)]
enum ConfigCommand {
    /// Display configuration (merged defaults + file)
    Show {
        /// Show only built-in defaults (ignore util.json)
        #[arg(long)]
        builtin: bool,
    },
    /// Set a configuration value at a JSON pointer path
    Set {
        /// JSON pointer path (e.g., /defaults/perm/chmod_target)
        pointer: String,
        /// Value to set (JSON; bare words are taken as strings)
        value: String,
    },
    /// Reset configuration to built-in defaults (deletes util.json)
    Reset,
    /// Show the path to util.json
    Path,
}

#[derive(Debug, Serialize)]
pub struct ConfigOutput {
    command: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    config: Option<UtilConfig>,
    #[serde(skip_serializing_if = "Option::is_none")]
    defaults: Option<Defaults>,
    #[serde(skip_serializing_if = "Option::is_none")]
    path: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    exists: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pointer: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    value: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    deleted: Option<bool>,
}

impl ConfigOutput {
    fn new(command: &str) -> Self {
        Self {
            command: command.to_string(),
            config: None,
            defaults: None,
            path: None,
            exists: None,
            pointer: None,
            value: None,
            deleted: None,
        }
    }
}

impl TextOutput for ConfigOutput {
    fn to_text(&self) -> String {
        if let Some(deleted) = self.deleted {
            let path = self.path.as_deref().unwrap_or_default();
            return if deleted {
                format!("Removed {}", path)
            } else {
                format!("No config file at {}", path)
            };
        }

        if let Some(path) = &self.path {
            return path.clone();
        }

        let body = match (&self.config, &self.defaults) {
            (Some(config), _) => serde_json::to_string_pretty(config),
            (None, Some(defaults)) => serde_json::to_string_pretty(defaults),
            (None, None) => Ok(String::new()),
        };
        body.unwrap_or_default()
    }
}

pub fn run(args: ConfigArgs, _global: &GlobalArgs) -> CmdResult<ConfigOutput> {
    match args.command {
        ConfigCommand::Show { builtin } => show(builtin),
        ConfigCommand::Set { pointer, value } => set(&pointer, &value),
        ConfigCommand::Reset => reset(),
        ConfigCommand::Path => path(),
    }
}

fn show(builtin: bool) -> CmdResult<ConfigOutput> {
    let mut output = ConfigOutput::new("config.show");
    if builtin {
        output.defaults = Some(defaults::builtin_defaults());
    } else {
        output.config = Some(defaults::load_config());
    }
    Ok((output, 0))
}

fn set(pointer: &str, value_str: &str) -> CmdResult<ConfigOutput> {
    // Bare words such as `script.sh` are accepted as JSON strings
    let value: Value =
        serde_json::from_str(value_str).unwrap_or_else(|_| Value::String(value_str.to_string()));

    let config = defaults::set_value(&defaults::load_config(), pointer, value.clone())?;
    defaults::save_config(&config)?;

    let mut output = ConfigOutput::new("config.set");
    output.config = Some(config);
    output.pointer = Some(pointer.to_string());
    output.value = Some(value);
    Ok((output, 0))
}

fn reset() -> CmdResult<ConfigOutput> {
    let deleted = defaults::reset_config()?;

    let mut output = ConfigOutput::new("config.reset");
    output.defaults = Some(defaults::builtin_defaults());
    output.path = Some(defaults::config_path()?);
    output.deleted = Some(deleted);
    Ok((output, 0))
}

fn path() -> CmdResult<ConfigOutput> {
    let mut output = ConfigOutput::new("config.path");
    output.path = Some(defaults::config_path()?);
    output.exists = Some(defaults::config_exists());
    Ok((output, 0))
}
