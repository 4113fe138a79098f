//! Command-line front end: reads a saved copy of the pastraiser page and
//! writes the generated Go source.

use std::fs;
use std::io::{self, Write};
use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use log::debug;
use scraper::Html;
use thiserror::Error;

use gboptab::extractor::{self, ExtractError};
use gboptab::generator;

/// Generates the gameboy mnemonic tables for the emulator's cpu package.
///
/// Expects a saved copy of
/// http://www.pastraiser.com/cpu/gameboy/gameboy_opcodes.html and prints the
/// Go source holding the `mnemonics` and `prefixMnemonics` maps.
#[derive(Parser, Debug)]
struct Args {
    /// Saved copy of the opcode matrix page.
    #[arg(default_value = "opcodes.html")]
    input: PathBuf,
    /// Write the generated source here instead of stdout.
    #[arg(short, long)]
    output: Option<PathBuf>,
}

#[derive(Debug, Error)]
enum CliError {
    #[error("failed to read {}: {source}", .path.display())]
    ReadInput { path: PathBuf, source: io::Error },
    #[error(transparent)]
    Extract(#[from] ExtractError),
    #[error("failed to write {}: {source}", .path.display())]
    WriteOutput { path: PathBuf, source: io::Error },
    #[error("failed to write to stdout: {0}")]
    Stdout(#[from] io::Error),
}

fn run(args: Args) -> Result<(), CliError> {
    debug!("reading {}", args.input.display());
    let text = fs::read_to_string(&args.input).map_err(|err| CliError::ReadInput {
        path: args.input.clone(),
        source: err,
    })?;

    let doc = Html::parse_document(&text);
    let tables = extractor::extract_document(&doc)?;
    let source = generator::generate_source(&tables);

    match &args.output {
        Some(path) => fs::write(path, &source).map_err(|err| CliError::WriteOutput {
            path: path.clone(),
            source: err,
        })?,
        None => io::stdout().write_all(source.as_bytes())?,
    }
    Ok(())
}

fn main() -> ExitCode {
    env_logger::init();
    let args = Args::parse();

    if let Err(err) = run(args) {
        eprintln!("error: {err}");
        return ExitCode::FAILURE;
    }
    ExitCode::SUCCESS
}
