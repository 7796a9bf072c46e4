//! Run command implementation.

use super::output::{JsonRunSummary, format_text};
use super::{CliError, GameArgs, OutputFormat};
use skirmish::engine::TurnEngine;
use skirmish::game::Status;
use skirmish::render::render_ascii;
use std::io::IsTerminal;
use std::path::Path;

/// Execute the run command.
///
/// # Errors
///
/// Returns an error if the map cannot be loaded or the bot fails.
pub(crate) fn execute(
    map: &Path,
    game: &GameArgs,
    format: OutputFormat,
    show: bool,
) -> Result<Status, CliError> {
    let config = game.config()?;
    let state = game.load(map, &config)?;
    let bot = game.bot()?;

    let color = std::io::stdout().is_terminal();
    let mut engine = TurnEngine::new(state, config, bot);
    if show {
        print!("{}", render_ascii(engine.state(), 0, color));
    }

    let summary = engine.run_with(|state, report| {
        if show {
            println!();
            print!("{}", render_ascii(state, report.turn, color));
        }
    })?;

    match format {
        OutputFormat::Text => {
            if show {
                println!();
            }
            print!("{}", format_text(&summary));
        }
        OutputFormat::Json => {
            let json = serde_json::to_string_pretty(&JsonRunSummary::from_summary(&summary))
                .map_err(|e| CliError::new(format!("JSON serialization failed: {e}")))?;
            println!("{json}");
        }
    }

    Ok(summary.status)
}
