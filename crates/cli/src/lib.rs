//! Command-line front end for `fru-codegen`.
//!
//! Parses arguments, layers them over the optional TOML configuration and
//! dispatches to the core generators. Every command returns a process exit
//! code instead of a `Result`, so `main` stays a one-liner.

mod check;
mod generate;
mod logging;

use std::path::PathBuf;

use clap::{Parser, Subcommand};

pub use logging::init_tracing;

use generate::{GenerateArgs, Target};

#[derive(Parser, Debug)]
#[command(
    name = "fru-codegen",
    version,
    about = "Generate VPD inventory accessor headers from FRU descriptions"
)]
struct Cli {
    /// TOML configuration file; command-line flags take precedence over it
    #[arg(short, long, global = true, value_name = "FILE")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Generate the writeFru accessor header (the default command)
    Writefru(GenerateArgs),
    /// Generate the extra-properties header
    ExtraProperties(GenerateArgs),
}

/// Parse `args` (including the program name) and run the selected command.
pub fn run_cli(args: Vec<String>) -> i32 {
    match Cli::try_parse_from(args) {
        Ok(cli) => {
            let config = cli.config.as_deref();
            match cli.command {
                Some(Commands::Writefru(args)) => generate::run(Target::WriteFru, config, args),
                Some(Commands::ExtraProperties(args)) => {
                    generate::run(Target::ExtraProperties, config, args)
                }
                None => generate::run(Target::WriteFru, config, GenerateArgs::default()),
            }
        }
        Err(e) => {
            let code = e.exit_code();
            let _ = e.print();
            code
        }
    }
}
