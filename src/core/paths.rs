use crate::error::{Error, Result};
use std::env;
use std::path::PathBuf;

/// Base config directory (~/.config/util/ on Unix, %APPDATA%\util on Windows)
pub fn util() -> Result<PathBuf> {
    #[cfg(windows)]
    {
        let appdata = env::var("APPDATA").map_err(|_| {
            Error::internal_unexpected("APPDATA environment variable not set on Windows")
        })?;
        Ok(PathBuf::from(appdata).join("util"))
    }

    #[cfg(not(windows))]
    {
        let home = env::var("HOME").map_err(|_| {
            Error::internal_unexpected("HOME environment variable not set on Unix-like system")
        })?;
        Ok(PathBuf::from(home).join(".config").join("util"))
    }
}

/// Global util.json config file path
pub fn util_json() -> Result<PathBuf> {
    Ok(util()?.join("util.json"))
}
