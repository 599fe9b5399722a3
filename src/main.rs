use std::fs::File;
use std::path::PathBuf;
use std::sync::Mutex;

use anyhow::{Context, Result};
use tracing_subscriber::EnvFilter;

use supportbank::cli;

const DEFAULT_LOG_FILE: &str = "supportbank.log";

fn main() -> Result<()> {
  init_tracing()?;
  let startup_import = std::env::args().nth(1).map(PathBuf::from);
  cli::run(startup_import)
}

/// Sends the log to a file so the prompt stays clean. The file is truncated
/// on every start; `SUPPORTBANK_LOG` overrides its location and `RUST_LOG`
/// the filter.
fn init_tracing() -> Result<()> {
  let path = std::env::var("SUPPORTBANK_LOG").unwrap_or_else(|_| DEFAULT_LOG_FILE.to_string());
  let log_file =
    File::create(&path).with_context(|| format!("failed to create log file {}", path))?;

  let filter = EnvFilter::from_default_env().add_directive("supportbank=info".parse()?);
  tracing_subscriber::fmt()
    .with_env_filter(filter)
    .with_writer(Mutex::new(log_file))
    .with_ansi(false)
    .init();
  Ok(())
}
