//! sopsgen CLI entry point.
//!
//! Invoked by kustomize as an exec-plugin generator: one positional
//! argument (the descriptor file), Secret manifest on stdout. Exit codes
//! are part of the contract: 0 success, 1 argument errors, 2 processing
//! failures.

use std::path::PathBuf;

use clap::error::ErrorKind;
use clap::Parser;
use colored::Colorize;
use sopsgen_core::GeneratorDescriptor;
use sopsgen_sops::SopsClient;
use sopsgen_types::Result;

#[derive(Parser)]
#[command(name = "sopsgen")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Generate Kubernetes Secrets from SOPS-encrypted sources", long_about = None)]
struct Cli {
    /// Path to the SopsSecretGenerator descriptor file
    file: PathBuf,
}

fn main() {
    init_logging();

    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(err) => {
            // clap routes help/version to stdout and errors to stderr
            let code = match err.kind() {
                ErrorKind::DisplayHelp | ErrorKind::DisplayVersion => 0,
                _ => 1,
            };
            let _ = err.print();
            std::process::exit(code);
        }
    };

    match run(&cli) {
        Ok(output) => print!("{}", output),
        Err(err) => {
            eprintln!("{} {}", "Error:".red().bold(), err);
            if let Some(detail) = err.user_detail() {
                eprintln!("{}", detail);
            }
            std::process::exit(2);
        }
    }
}

fn run(cli: &Cli) -> Result<String> {
    let descriptor = GeneratorDescriptor::load(&cli.file)?;
    let secret = sopsgen_core::generate(&descriptor, &SopsClient::new())?;
    secret.to_yaml()
}

fn init_logging() {
    use tracing_subscriber::{fmt, EnvFilter};

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("sopsgen=warn"));

    // stdout carries the manifest, so everything else goes to stderr
    fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_level(true)
        .init();
}
