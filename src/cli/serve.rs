//! Bot command implementation.

use super::CliError;
use skirmish::bot::{SampleBot, serve_stdio};
use std::io;

/// Serve the sample bot on stdin/stdout until stdin closes.
///
/// # Errors
///
/// Returns an error if stdin or stdout fails.
pub(crate) fn execute() -> Result<(), CliError> {
    tracing::info!("sample bot listening on stdin");
    let stdin = io::stdin().lock();
    let stdout = io::stdout().lock();
    serve_stdio(&mut SampleBot::new(), stdin, stdout)?;
    Ok(())
}
