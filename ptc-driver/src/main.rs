//! Typed numeric translator driver
//!
//! Reads a serialized input tree, translates it to C and reports
//! diagnostics on stderr.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use log::info;
use ptc_common::ErrorReporter;
use ptc_frontend::{Frontend, TranslateConfig, Translation};
use std::fs;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

#[derive(Parser)]
#[command(name = "ptc")]
#[command(about = "Typed numeric translator: Python-like trees to C")]
#[command(version = "0.1.0")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Translate an input tree into a C program
    Translate {
        /// Input tree in JSON format
        input: PathBuf,

        /// Output C file (defaults to stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Translation settings in JSON format
        #[arg(long)]
        config: Option<PathBuf>,

        /// Override the indentation width
        #[arg(long)]
        indent: Option<usize>,

        /// Print the function signature table to stderr
        #[arg(long)]
        print_signatures: bool,

        /// Fail when any warning is reported
        #[arg(long)]
        deny_warnings: bool,

        /// Verbose output
        #[arg(short, long)]
        verbose: bool,
    },

    /// Decode an input tree and print it back in normalized form
    DumpAst {
        /// Input tree in JSON format
        input: PathBuf,
    },
}

fn main() -> Result<ExitCode> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Translate { input, output, config, indent, print_signatures, deny_warnings, verbose } => {
            init_logging(verbose);
            let config = load_config(config.as_deref(), indent)?;
            let translation = translate_file(&input, &config)?;

            let input_name = input.display().to_string();
            let reporter = ErrorReporter::from(translation.diagnostics.clone());
            reporter.print_diagnostics(&input_name);

            if print_signatures {
                let table = serde_json::to_string_pretty(&translation.signatures)?;
                eprintln!("{}", table);
            }

            match output {
                Some(path) => {
                    fs::write(&path, &translation.code)
                        .with_context(|| format!("Failed to write {}", path.display()))?;
                    info!("C code written to {}", path.display());
                }
                None => print!("{}", translation.code),
            }

            if failed(&translation, deny_warnings) {
                eprintln!("{}: {}", input_name, reporter.summary());
                return Ok(ExitCode::FAILURE);
            }
            Ok(ExitCode::SUCCESS)
        }
        Commands::DumpAst { input } => {
            init_logging(false);
            let source = read_input(&input)?;
            let module = Frontend::load_module(&source)
                .with_context(|| format!("Failed to decode {}", input.display()))?;
            println!("{}", serde_json::to_string_pretty(&module)?);
            Ok(ExitCode::SUCCESS)
        }
    }
}

/// `-v` forces debug output, otherwise RUST_LOG decides with warn as the floor
fn init_logging(verbose: bool) {
    let mut builder = env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn"));
    if verbose {
        builder.filter_level(log::LevelFilter::Debug);
    }
    builder.init();
}

fn load_config(path: Option<&Path>, indent: Option<usize>) -> Result<TranslateConfig> {
    let mut config = match path {
        Some(path) => TranslateConfig::load(path)
            .with_context(|| format!("Failed to load config {}", path.display()))?,
        None => TranslateConfig::default(),
    };
    if let Some(width) = indent {
        config.indent_width = width;
        config.validate().context("Invalid --indent")?;
    }
    Ok(config)
}

fn read_input(path: &Path) -> Result<String> {
    fs::read_to_string(path).with_context(|| format!("Failed to read {}", path.display()))
}

fn translate_file(path: &Path, config: &TranslateConfig) -> Result<Translation> {
    info!("Translating {}", path.display());
    let source = read_input(path)?;
    Frontend::translate_json(&source, config).with_context(|| format!("Failed to decode {}", path.display()))
}

fn failed(translation: &Translation, deny_warnings: bool) -> bool {
    translation.has_errors() || (deny_warnings && translation.warning_count() > 0)
}
