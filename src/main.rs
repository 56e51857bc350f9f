//! linkkey CLI - Installation Code to Link Key
//!
//! Converts an installation code into its link key and prints it as lowercase hex.
//! Can also process a list of codes from a file, or generate a fresh random code.

use std::path::{Path, PathBuf};
use std::process::ExitCode;

use clap::Parser;
use rand::rngs::OsRng;
use tracing_subscriber::{fmt, EnvFilter};

use linkkey::{CodeLength, CodeList, InstallCode, KeyReport, LinkKeyError};

/// linkkey - convert install code to link key
#[derive(Parser, Debug)]
#[command(name = "linkkey")]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Installation code (dashes, spaces and other separators are ignored)
    #[arg(
        required_unless_present_any = ["file", "generate"],
        conflicts_with_all = ["file", "generate"]
    )]
    code: Option<String>,

    /// Derive keys for every code in a code list file
    #[arg(short, long, conflicts_with = "generate")]
    file: Option<PathBuf>,

    /// Generate a random installation code of 48, 64, 96 or 128 bits
    #[arg(short, long, value_name = "BITS")]
    generate: Option<CodeLength>,

    /// Print JSON reports instead of plain text
    #[arg(long)]
    json: bool,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> ExitCode {
    let args = Args::parse();

    // Set up logging (stderr, so stdout only carries results)
    let filter = if args.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("info")
    };

    fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    match run(&args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {}", e.user_message());
            ExitCode::from(e.exit_code())
        }
    }
}

fn run(args: &Args) -> Result<(), LinkKeyError> {
    if let Some(length) = args.generate {
        return run_generate(length, args.json);
    }

    if let Some(path) = &args.file {
        return run_batch(path, args.json);
    }

    match &args.code {
        Some(raw) => run_single(raw, args.json),
        // clap enforces one of code/file/generate
        None => Ok(()),
    }
}

/// Derive and print a single link key
fn run_single(raw: &str, json: bool) -> Result<(), LinkKeyError> {
    let code = InstallCode::parse(raw)?;
    let key = code.link_key();

    if json {
        let report = KeyReport::derived(None, &code, &key);
        println!("{}", report.to_json().map_err(std::io::Error::from)?);
    } else {
        println!("{}", hex::encode(key));
    }
    Ok(())
}

/// Derive keys for every entry in a code list, continuing past bad entries
fn run_batch(path: &Path, json: bool) -> Result<(), LinkKeyError> {
    tracing::info!("Loading code list from: {}", path.display());
    let list = CodeList::from_file(path)?;
    let batch = list.derive_all();

    for report in &batch.reports {
        if json {
            println!("{}", report.to_json().map_err(std::io::Error::from)?);
        } else if report.is_ok() {
            println!("{}", report.to_text());
        } else {
            eprintln!("{}", report.to_text());
        }
    }

    batch.status()
}

/// Generate a random install code and print it with its link key
fn run_generate(length: CodeLength, json: bool) -> Result<(), LinkKeyError> {
    let code = InstallCode::random(length, &mut OsRng);
    let key = code.link_key();
    tracing::debug!("Generated {} install code", length);

    if json {
        let report = KeyReport::derived(None, &code, &key);
        println!("{}", report.to_json().map_err(std::io::Error::from)?);
    } else {
        println!("install code: {}", code);
        println!("link key:     {}", hex::encode(key));
    }
    Ok(())
}
