use crate::error::{Error, Result};
use std::env;
use std::path::PathBuf;

/// Base rebrand config directory (universal ~/.config/rebrand/ on all platforms)
pub fn rebrand() -> Result<PathBuf> {
    #[cfg(windows)]
    {
        let appdata = env::var("APPDATA").map_err(|_| {
            Error::internal_unexpected(
                "APPDATA environment variable not set on Windows".to_string(),
            )
        })?;
        Ok(PathBuf::from(appdata).join("rebrand"))
    }

    #[cfg(not(windows))]
    {
        let home = env::var("HOME").map_err(|_| {
            Error::internal_unexpected(
                "HOME environment variable not set on Unix-like system".to_string(),
            )
        })?;
        Ok(PathBuf::from(home).join(".config").join("rebrand"))
    }
}

/// Global rebrand.json config file path
pub fn rebrand_json() -> Result<PathBuf> {
    Ok(rebrand()?.join("rebrand.json"))
}

/// Config file path, honoring an explicit `--config` override (with `~` expansion).
pub fn config_file(override_path: Option<&str>) -> Result<PathBuf> {
    match override_path {
        Some(raw) => {
            let expanded = shellexpand::tilde(raw);
            Ok(PathBuf::from(expanded.as_ref()))
        }
        None => rebrand_json(),
    }
}
