use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::paths;

/// Root configuration structure for rebrand.json
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct RebrandConfig {
    #[serde(default)]
    pub defaults: Defaults,
}

/// All configurable defaults that can be overridden via rebrand.json
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Defaults {
    #[serde(default = "default_rename_rules")]
    pub rename: RenameRules,
}

impl Default for Defaults {
    fn default() -> Self {
        Self {
            rename: default_rename_rules(),
        }
    }
}

/// Which directories are skipped and which files get their content rewritten.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RenameRules {
    /// Directory names never descended into, matched exactly at any depth.
    #[serde(default = "default_ignored_dirs")]
    pub ignored_dirs: Vec<String>,

    /// Extensions (with leading dot) whose content is rewritten.
    #[serde(default = "default_extensions")]
    pub extensions: Vec<String>,

    /// Exact file names whose content is rewritten regardless of extension.
    #[serde(default = "default_file_names")]
    pub file_names: Vec<String>,

    /// Mode used when rewriting a file whose metadata could not be read.
    #[serde(default = "default_fallback_file_mode")]
    pub fallback_file_mode: u32,
}

impl Default for RenameRules {
    fn default() -> Self {
        default_rename_rules()
    }
}

impl RenameRules {
    pub fn is_ignored_dir(&self, name: &str) -> bool {
        self.ignored_dirs.iter().any(|d| d == name)
    }

    /// A file is processable when its exact name or its extension is listed.
    pub fn is_processable(&self, file_name: &str) -> bool {
        if self.file_names.iter().any(|n| n == file_name) {
            return true;
        }
        match crate::refactor::extension_of(file_name) {
            Some(ext) => self.extensions.iter().any(|e| e == ext),
            None => false,
        }
    }
}

// =============================================================================
// Default value functions
// =============================================================================

fn default_rename_rules() -> RenameRules {
    RenameRules {
        ignored_dirs: default_ignored_dirs(),
        extensions: default_extensions(),
        file_names: default_file_names(),
        fallback_file_mode: default_fallback_file_mode(),
    }
}

fn default_ignored_dirs() -> Vec<String> {
    [".git", ".vscode", ".idea", "bin", "obj", "node_modules"]
        .iter()
        .map(|s| s.to_string())
        .collect()
}

fn default_extensions() -> Vec<String> {
    [".sln", ".csproj", ".cs", ".json"]
        .iter()
        .map(|s| s.to_string())
        .collect()
}

fn default_file_names() -> Vec<String> {
    vec!["Dockerfile".to_string()]
}

fn default_fallback_file_mode() -> u32 {
    0o644
}

// =============================================================================
// Loading functions
// =============================================================================

/// Load the config at `path`, falling back to built-in defaults when the file is absent.
///
/// Unlike a missing file, an unreadable or malformed file is an error so the
/// caller can decide whether to surface it or fall back.
pub fn load_config(path: &Path) -> crate::Result<RebrandConfig> {
    if !path.exists() {
        return Ok(RebrandConfig::default());
    }

    let content = fs::read_to_string(path).map_err(|e| {
        crate::Error::internal_io(e.to_string(), Some(format!("read {}", path.display())))
    })?;

    serde_json::from_str(&content)
        .map_err(|e| crate::Error::config_invalid_json(path.display().to_string(), e))
}

/// Load config, logging and falling back to built-in defaults on any error.
pub fn load_config_or_default(path: &Path) -> RebrandConfig {
    match load_config(path) {
        Ok(config) => config,
        Err(err) => {
            log_status!(
                "config",
                "Ignoring {} ({}: {}), using built-in defaults",
                path.display(),
                err.message,
                err.details
            );
            RebrandConfig::default()
        }
    }
}

/// Save config to `path` (creates parent directories if missing).
pub fn save_config(path: &Path, config: &RebrandConfig) -> crate::Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).map_err(|e| {
            crate::Error::internal_io(e.to_string(), Some(format!("create {}", parent.display())))
        })?;
    }

    let content = serde_json::to_string_pretty(config).map_err(|e| {
        crate::Error::internal_json(e.to_string(), Some("serialize rebrand.json".to_string()))
    })?;

    fs::write(path, content).map_err(|e| {
        crate::Error::internal_io(e.to_string(), Some(format!("write {}", path.display())))
    })?;

    Ok(())
}

/// Delete the config file (reset to defaults). Returns whether a file was removed.
pub fn reset_config(path: &Path) -> crate::Result<bool> {
    if path.exists() {
        fs::remove_file(path).map_err(|e| {
            crate::Error::internal_io(e.to_string(), Some(format!("delete {}", path.display())))
        })?;
        Ok(true)
    } else {
        Ok(false)
    }
}

/// Resolve the config file location, honoring a `--config` override.
pub fn config_file(override_path: Option<&str>) -> crate::Result<PathBuf> {
    paths::config_file(override_path)
}

/// Get built-in defaults (ignoring any file config)
pub fn builtin_defaults() -> Defaults {
    Defaults::default()
}
