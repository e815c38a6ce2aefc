use std::fs;
use std::io::{self, IsTerminal};
use std::path::{Path, PathBuf};

use clap::Args;
use fru_codegen_core::config::Paths;
use fru_codegen_core::{
    EmptyPolicy, GeneratorConfig, generate_extra_properties, generate_writefru, parse_namespace,
    write_output,
};
use tracing::{debug, error, info};

use crate::check::generate_diff;

#[derive(Args, Debug, Clone, Default)]
pub struct GenerateArgs {
    /// Description document to read
    #[arg(short, long, value_name = "FILE")]
    pub input: Option<PathBuf>,
    /// Header to write
    #[arg(short, long, value_name = "FILE")]
    pub output: Option<PathBuf>,
    /// Namespace for generated code, e.g. openpower::vpd::inventory
    #[arg(long, value_name = "NS")]
    pub namespace: Option<String>,
    /// Skip entries with empty names or values instead of failing
    #[arg(long)]
    pub lenient: bool,
    /// Compare with the existing header instead of writing it
    #[arg(long)]
    pub check: bool,
}

/// Which header a command produces.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Target {
    WriteFru,
    ExtraProperties,
}

impl Target {
    fn paths(self, config: &GeneratorConfig) -> &Paths {
        match self {
            Target::WriteFru => &config.writefru,
            Target::ExtraProperties => &config.extra_properties,
        }
    }

    fn paths_mut(self, config: &mut GeneratorConfig) -> &mut Paths {
        match self {
            Target::WriteFru => &mut config.writefru,
            Target::ExtraProperties => &mut config.extra_properties,
        }
    }

    fn generate(self, config: &GeneratorConfig) -> fru_codegen_core::Result<String> {
        match self {
            Target::WriteFru => generate_writefru(config),
            Target::ExtraProperties => generate_extra_properties(config),
        }
    }
}

pub fn run(target: Target, config_path: Option<&Path>, args: GenerateArgs) -> i32 {
    match run_inner(target, config_path, args) {
        Ok(()) => 0,
        Err(err) => {
            error!(?target, error = %err, "Generation failed.");
            eprintln!("{err}");
            1
        }
    }
}

fn run_inner(target: Target, config_path: Option<&Path>, args: GenerateArgs) -> Result<(), String> {
    let check = args.check;
    let config = resolve_config(target, config_path, args)?;
    let output = target.paths(&config).output.clone();

    let contents = target.generate(&config).map_err(|e| e.to_string())?;

    if check {
        return check_output(&output, &contents);
    }

    write_output(&output, &contents).map_err(|e| e.to_string())?;
    info!(output = %output.display(), "Generated header.");
    println!("generated {}", output.display());
    Ok(())
}

/// Built-in defaults, then the config file, then command-line flags.
fn resolve_config(
    target: Target,
    config_path: Option<&Path>,
    args: GenerateArgs,
) -> Result<GeneratorConfig, String> {
    let mut config = match config_path {
        Some(path) => GeneratorConfig::load(path).map_err(|e| e.to_string())?,
        None => GeneratorConfig::default(),
    };

    let paths = target.paths_mut(&mut config);
    if let Some(input) = args.input {
        paths.input = input;
    }
    if let Some(output) = args.output {
        paths.output = output;
    }
    if let Some(namespace) = args.namespace {
        config.namespace = parse_namespace(&namespace)?;
    }
    if args.lenient {
        config.empty_policy = EmptyPolicy::Skip;
    }

    debug!(?config, "Resolved configuration.");
    Ok(config)
}

fn check_output(output: &Path, contents: &str) -> Result<(), String> {
    let existing = match fs::read_to_string(output) {
        Ok(existing) => Some(existing),
        Err(e) if e.kind() == io::ErrorKind::NotFound => None,
        Err(e) => return Err(format!("Failed to read {}: {e}", output.display())),
    };

    match existing {
        Some(existing) if existing == contents => {
            info!(output = %output.display(), "Header is up to date.");
            Ok(())
        }
        Some(existing) => {
            let label = output.display().to_string();
            let color = io::stderr().is_terminal();
            if let Some(diff) = generate_diff(&label, &existing, contents, color) {
                eprint!("{diff}");
            }
            Err(format!("{} is out of date", output.display()))
        }
        None => Err(format!("{} does not exist", output.display())),
    }
}
