use clap::{Args, Subcommand};
use serde::Serialize;

use rebrand::defaults::{self, Defaults, RebrandConfig};

use super::{CmdResult, GlobalArgs};

#[derive(Args)]
pub struct ConfigArgs {
    #[command(subcommand)]
    command: ConfigCommand,
}

#[derive(Subcommand)]
enum ConfigCommand {
    /// Display configuration (merged defaults + file)
    Show {
        /// Show only built-in defaults (ignore rebrand.json)
        #[arg(long)]
        builtin: bool,
    },
    /// Write the built-in defaults to rebrand.json
    Init {
        /// Overwrite an existing rebrand.json
        #[arg(long)]
        force: bool,
    },
    /// Reset configuration to built-in defaults (deletes rebrand.json)
    Reset,
    /// Show the path to rebrand.json
    Path,
}

#[derive(Debug, Serialize)]
pub struct ConfigOutput {
    command: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    config: Option<RebrandConfig>,
    #[serde(skip_serializing_if = "Option::is_none")]
    defaults: Option<Defaults>,
    #[serde(skip_serializing_if = "Option::is_none")]
    path: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    exists: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    deleted: Option<bool>,
}

impl ConfigOutput {
    fn new(command: &str) -> Self {
        ConfigOutput {
            command: command.to_string(),
            config: None,
            defaults: None,
            path: None,
            exists: None,
            deleted: None,
        }
    }
}

pub fn run(args: ConfigArgs, global: &GlobalArgs) -> CmdResult<ConfigOutput> {
    let config_path = defaults::config_file(global.config.as_deref())?;

    match args.command {
        ConfigCommand::Show { builtin } => show(&config_path, builtin),
        ConfigCommand::Init { force } => init(&config_path, force),
        ConfigCommand::Reset => reset(&config_path),
        ConfigCommand::Path => path(&config_path),
    }
}

fn show(config_path: &std::path::Path, builtin: bool) -> CmdResult<ConfigOutput> {
    let mut output = ConfigOutput::new("config.show");

    if builtin {
        output.defaults = Some(defaults::builtin_defaults());
    } else {
        // Surface a broken file here instead of silently falling back.
        output.config = Some(defaults::load_config(config_path)?);
        output.path = Some(config_path.display().to_string());
    }

    Ok((output, 0))
}

fn init(config_path: &std::path::Path, force: bool) -> CmdResult<ConfigOutput> {
    if config_path.exists() && !force {
        return Err(rebrand::Error::config_already_exists(
            config_path.display().to_string(),
        ));
    }

    let config = RebrandConfig::default();
    defaults::save_config(config_path, &config)?;

    let mut output = ConfigOutput::new("config.init");
    output.config = Some(config);
    output.path = Some(config_path.display().to_string());
    Ok((output, 0))
}

fn reset(config_path: &std::path::Path) -> CmdResult<ConfigOutput> {
    let deleted = defaults::reset_config(config_path)?;

    let mut output = ConfigOutput::new("config.reset");
    output.defaults = Some(defaults::builtin_defaults());
    output.path = Some(config_path.display().to_string());
    output.deleted = Some(deleted);
    Ok((output, 0))
}

fn path(config_path: &std::path::Path) -> CmdResult<ConfigOutput> {
    let mut output = ConfigOutput::new("config.path");
    output.path = Some(config_path.display().to_string());
    output.exists = Some(config_path.exists());
    Ok((output, 0))
}
