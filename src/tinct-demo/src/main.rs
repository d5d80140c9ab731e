//! Tour of the tinct crates.
//!
//! ```text
//! tinct-demo <mode> [-n] [-c <path>] [-l <count>]
//! ```
//!
//! Internal diagnostics go through `tracing`: set `RUST_LOG` to choose the
//! filter and `TINCT_TRACE_FILE` to write them to a file instead of stderr.

mod args_cmd;
mod cli;
mod colors_cmd;
mod keys_cmd;
mod logging_cmd;
mod window_cmd;

use anyhow::{Context, Result};
use cli::{Mode, Settings};
use std::io::{self, Write};
use std::process::ExitCode;
use tinct::args::Outcome;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::EnvFilter;

/// Environment variable naming a file for diagnostic output.
const ENV_TRACE_FILE: &str = "TINCT_TRACE_FILE";

fn main() -> ExitCode {
    let _guard = init_tracing();

    match run() {
        Ok(code) => code,
        Err(error) => {
            tracing::error!(error = %format!("{error:#}"), "demo failed");
            eprintln!("Error: {error:#}");
            ExitCode::FAILURE
        }
    }
}

fn run() -> Result<ExitCode> {
    let formatter = cli::definition().context("invalid command-line definition")?;
    let result = match formatter.run_env()? {
        Outcome::Continue(result) => result,
        Outcome::Exit(code) => return Ok(ExitCode::from(u8::try_from(code).unwrap_or(1))),
    };
    let settings = Settings::from_result(&result)?;
    tracing::debug!(mode = %settings.mode, color_mode = ?settings.color_mode, "starting demo");

    let stdout = io::stdout();
    let mut out = stdout.lock();
    match settings.mode {
        Mode::Args => args_cmd::run(&settings, &mut out)?,
        Mode::Colors => colors_cmd::run(&settings, &mut out)?,
        Mode::Logging => {
            // The logger writes to the terminal itself.
            drop(out);
            logging_cmd::run(&settings, &mut io::stdout())?;
            return Ok(ExitCode::SUCCESS);
        }
        Mode::Keys => keys_cmd::run(&settings, &mut out)?,
        Mode::Window => {
            drop(out);
            window_cmd::run(&settings)?;
            return Ok(ExitCode::SUCCESS);
        }
    }
    out.flush()?;
    Ok(ExitCode::SUCCESS)
}

/// Installs the global subscriber.
///
/// The returned guard flushes the file writer on drop and must outlive `run`.
fn init_tracing() -> Option<WorkerGuard> {
    let trace_file = std::env::var_os(ENV_TRACE_FILE);
    let default_filter = if trace_file.is_some() { "debug" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));

    if let Some(path) = trace_file {
        match std::fs::File::create(&path) {
            Ok(file) => {
                let (writer, guard) = tracing_appender::non_blocking(file);
                tracing_subscriber::fmt()
                    .with_env_filter(filter)
                    .with_writer(writer)
                    .with_ansi(false)
                    .with_thread_names(true)
                    .init();
                return Some(guard);
            }
            Err(error) => {
                eprintln!(
                    "Warning: cannot create trace file {}: {error}",
                    std::path::Path::new(&path).display()
                );
            }
        }
    }

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
    None
}
