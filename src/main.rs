use clap::{Parser, Subcommand};

use commands::GlobalArgs;

mod commands;
mod output;
mod tty;

use commands::{config, rename};

const VERSION: &str = env!("CARGO_PKG_VERSION");

#[derive(Parser)]
#[command(name = "rebrand")]
#[command(version = VERSION)]
#[command(about = "Rename a token across file contents, file names and directory names")]
struct Cli {
    /// Path to rebrand.json (default: ~/.config/rebrand/rebrand.json)
    #[arg(long, global = true, value_name = "PATH")]
    config: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Rename OLD to NEW in the current directory tree
    Rename(rename::RenameArgs),
    /// Manage rebrand configuration
    Config(config::ConfigArgs),
}

fn main() -> std::process::ExitCode {
    let cli = Cli::parse();

    let global = GlobalArgs {
        config: cli.config.clone(),
    };

    let exit_code = match cli.command {
        // Renames print a text report; config commands answer with a JSON envelope.
        Commands::Rename(args) => {
            let (result, exit_code) = output::map_cmd_result(rename::run(args, &global));
            match result {
                Ok(content) => print!("{}", content),
                Err(err) => output::print_error_plain(&err),
            }
            exit_code
        }
        Commands::Config(args) => {
            let (json_result, exit_code) = output::map_cmd_result_to_json(config::run(args, &global));
            let _ = output::print_json_result(json_result);
            exit_code
        }
    };

    std::process::ExitCode::from(exit_code_to_u8(exit_code))
}

fn exit_code_to_u8(code: i32) -> u8 {
    if code <= 0 {
        0
    } else if code >= 255 {
        255
    } else {
        code as u8
    }
}
