//! Stdin/stdout front end for `star_tie::wire`.
//!
//! Default mode answers newline-delimited JSON requests until EOF. With
//! `--once`, all of stdin is one request and the process exits non-zero
//! if it is rejected. Logs go to stderr; stdout carries only responses.

use clap::Parser;
use star_tie::wire::{respond_bytes, serve_lines};
use std::io::{self, Read, Write};
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(name = "star-tie", version, about = "STAR-TIE-512-v1 tie-break permutations over JSON")]
struct Args {
    /// Read a single request from all of stdin instead of one per line.
    #[arg(long)]
    once: bool,

    /// Log filter used when RUST_LOG is unset.
    #[arg(long, default_value = "warn")]
    log: String,
}

fn main() -> ExitCode {
    let args = Args::parse();

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&args.log));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();

    let outcome = if args.once { run_once() } else { run_lines() };
    match outcome {
        Ok(code) => code,
        Err(err) => {
            tracing::error!(error = %err, "i/o failure");
            ExitCode::FAILURE
        }
    }
}

fn run_lines() -> io::Result<ExitCode> {
    let stdin = io::stdin().lock();
    let stdout = io::stdout().lock();
    serve_lines(stdin, stdout)?;
    Ok(ExitCode::SUCCESS)
}

fn run_once() -> io::Result<ExitCode> {
    let mut input = Vec::new();
    io::stdin().read_to_end(&mut input)?;

    let response = respond_bytes(&input);
    let mut stdout = io::stdout().lock();
    serde_json::to_writer(&mut stdout, &response)?;
    stdout.flush()?;

    if response.is_error() {
        tracing::warn!("request rejected");
        Ok(ExitCode::FAILURE)
    } else {
        Ok(ExitCode::SUCCESS)
    }
}
