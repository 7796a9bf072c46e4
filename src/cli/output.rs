//! Output formatting utilities for CLI.

use serde::Serialize;
use skirmish::engine::RunSummary;
use skirmish::game::{Status, WinReason};
use std::fmt::Write as _;

/// JSON-serializable run summary.
#[derive(Debug, Serialize)]
pub(super) struct JsonRunSummary {
    /// `"won"` or `"lost"`.
    pub(super) outcome: &'static str,
    /// Why the game was won (null if lost).
    pub(super) reason: Option<&'static str>,
    /// Total turns played.
    pub(super) turns_played: u32,
    /// Turns left unused.
    pub(super) turns_remaining: u32,
    /// Actions the engine applied.
    pub(super) applied: u32,
    /// Actions the engine rejected.
    pub(super) rejected: u32,
    /// Turns whose answer was discarded.
    pub(super) forfeited: u32,
}

impl JsonRunSummary {
    /// Create from a run summary.
    pub(super) fn from_summary(summary: &RunSummary) -> Self {
        Self {
            outcome: outcome(summary.status),
            reason: reason(summary.status),
            turns_played: summary.turns_played,
            turns_remaining: summary.turns_remaining,
            applied: summary.applied,
            rejected: summary.rejected,
            forfeited: summary.forfeited,
        }
    }
}

fn outcome(status: Status) -> &'static str {
    match status {
        Status::Won(_) => "won",
        Status::Lost => "lost",
        Status::Running => "running",
    }
}

fn reason(status: Status) -> Option<&'static str> {
    match status {
        Status::Won(WinReason::GoalCaptured) => Some("goal captured"),
        Status::Won(WinReason::EnemiesEliminated) => Some("all enemies eliminated"),
        Status::Lost | Status::Running => None,
    }
}

/// The one-line verdict for a status.
pub(super) fn headline(status: Status) -> String {
    match (status, reason(status)) {
        (Status::Won(_), Some(why)) => format!("You win!! ({why})"),
        (Status::Lost, _) => "Game over".to_string(),
        _ => "Game stopped".to_string(),
    }
}

/// Format a run summary as human-readable text.
pub(super) fn format_text(summary: &RunSummary) -> String {
    let mut output = String::new();

    let _ = writeln!(output, "{}", headline(summary.status));
    let _ = writeln!(
        output,
        "  Turns: {} played, {} remaining",
        summary.turns_played, summary.turns_remaining
    );
    let _ = writeln!(
        output,
        "  Actions: {} applied, {} rejected",
        summary.applied, summary.rejected
    );
    if summary.forfeited > 0 {
        let _ = writeln!(output, "  Forfeited turns: {}", summary.forfeited);
    }

    output
}
