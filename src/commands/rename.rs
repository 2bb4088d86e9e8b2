use clap::Args;
use std::path::Path;

use rebrand::defaults;
use rebrand::refactor::{self, RenameSpec};

use super::{CmdResult, GlobalArgs};
use crate::output::summary;
use crate::tty;

#[derive(Args)]
pub struct RenameArgs {
    /// Token to replace (exact, case-sensitive substring)
    #[arg(long = "old", value_name = "OLD")]
    old: String,

    /// Replacement token
    #[arg(long = "new", value_name = "NEW")]
    new: String,

    /// Skip the confirmation prompt
    #[arg(short, long)]
    yes: bool,
}

pub fn run(args: RenameArgs, global: &GlobalArgs) -> CmdResult<String> {
    let spec = RenameSpec::new(&args.old, &args.new)?;

    let root = std::env::current_dir().map_err(|e| {
        rebrand::Error::internal_io(e.to_string(), Some("resolve working directory".to_string()))
    })?;

    let config_path = defaults::config_file(global.config.as_deref())?;
    let config = defaults::load_config_or_default(&config_path);

    if !args.yes && !confirm(&spec, &root)? {
        return Ok(("Aborted by user. Nothing was changed.\n".to_string(), 0));
    }

    let report = refactor::run_rename(&spec, &root, &config.defaults.rename);

    Ok((summary::render(&report, &spec), 0))
}

fn confirm(spec: &RenameSpec, root: &Path) -> rebrand::Result<bool> {
    if !tty::is_stdin_tty() {
        return Err(rebrand::Error::validation_missing_argument(vec![
            "--yes".to_string(),
        ])
        .with_hint("stdin is not a terminal; pass --yes to confirm without a prompt"));
    }

    eprintln!("Renaming '{}' -> '{}' in {}", spec.from, spec.to, root.display());
    eprintln!();
    eprintln!("---------------------------------- WARNING ----------------------------------");
    eprintln!("File contents, file names and directory names are modified IN PLACE.");
    eprintln!("Make sure you have a backup or the tree is under version control (git).");
    eprintln!("-----------------------------------------------------------------------------");

    let answer = tty::prompt("Continue? [y/N]: ")?;
    Ok(is_affirmative(&answer))
}

/// `y`, `yes` and `s` confirm, case-insensitively. Anything else declines.
fn is_affirmative(answer: &str) -> bool {
    matches!(
        answer.trim().to_lowercase().as_str(),
        "y" | "yes" | "s"
    )
}
