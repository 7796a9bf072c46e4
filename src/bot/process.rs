//! JSON-lines transport for bots running in another process.
//!
//! One request per line on the bot's stdin, one response per line on its
//! stdout. [`serve_stdio`] is the other end of the pipe.

use std::io::{BufRead, BufReader, Write};
use std::process::{Child, ChildStdin, Command, Stdio};
use std::sync::mpsc::{self, Receiver, RecvTimeoutError};
use std::thread;
use std::time::{Duration, Instant};

use crate::bot::Bot;
use crate::error::BotError;
use crate::protocol::{TurnRequest, TurnResponse};

/// A bot running as a child process.
#[derive(Debug)]
pub struct ProcessBot {
    child: Child,
    stdin: ChildStdin,
    responses: Receiver<std::io::Result<String>>,
    budget: Option<Duration>,
    /// Requests that timed out and whose answers are still owed.
    pending: usize,
}

impl ProcessBot {
    /// Spawn `command` (program followed by whitespace-separated arguments).
    ///
    /// With a `budget`, each turn waits at most that long for an answer.
    ///
    /// # Errors
    ///
    /// Returns [`BotError::Io`] if the command is empty or cannot be spawned.
    pub fn spawn(command: &str, budget: Option<Duration>) -> Result<Self, BotError> {
        let mut parts = command.split_whitespace();
        let program = parts.next().ok_or_else(|| {
            BotError::Io(std::io::Error::new(std::io::ErrorKind::InvalidInput, "empty bot command"))
        })?;

        let mut child = Command::new(program)
            .args(parts)
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::inherit())
            .spawn()?;

        let stdin = child.stdin.take().ok_or(BotError::Disconnected)?;
        let stdout = child.stdout.take().ok_or(BotError::Disconnected)?;

        let (tx, responses) = mpsc::channel();
        thread::spawn(move || {
            for line in BufReader::new(stdout).lines() {
                if tx.send(line).is_err() {
                    break;
                }
            }
        });

        tracing::debug!(%command, pid = child.id(), "spawned bot process");
        Ok(Self {
            child,
            stdin,
            responses,
            budget,
            pending: 0,
        })
    }

    /// Next line from the bot, waiting until `deadline` at most.
    fn receive(&self, deadline: Option<Instant>) -> Result<String, BotError> {
        let line = match deadline {
            Some(deadline) => {
                let wait = deadline.saturating_duration_since(Instant::now());
                self.responses.recv_timeout(wait).map_err(|e| match e {
                    RecvTimeoutError::Timeout => BotError::Timeout,
                    RecvTimeoutError::Disconnected => BotError::Disconnected,
                })?
            }
            None => self.responses.recv().map_err(|_| BotError::Disconnected)?,
        };
        Ok(line?)
    }

    /// Discard one owed answer per timed-out request.
    ///
    /// The bot stays a turn behind until every owed answer has arrived, so
    /// running out of time here forfeits the current turn without sending it.
    fn drain_late(&mut self, deadline: Option<Instant>) -> Result<(), BotError> {
        while self.pending > 0 {
            let stale = self.receive(deadline)?;
            self.pending -= 1;
            tracing::debug!(len = stale.len(), pending = self.pending, "dropping late bot answer");
        }
        Ok(())
    }
}

impl Bot for ProcessBot {
    fn on_turn(&mut self, request: &TurnRequest) -> Result<TurnResponse, BotError> {
        let deadline = self.budget.map(|budget| Instant::now() + budget);
        self.drain_late(deadline)?;

        let line = serde_json::to_string(request)?;
        writeln!(self.stdin, "{line}")?;
        self.stdin.flush()?;

        let answer = match self.receive(deadline) {
            Err(BotError::Timeout) => {
                self.pending += 1;
                return Err(BotError::Timeout);
            }
            answer => answer?,
        };
        Ok(serde_json::from_str(&answer)?)
    }
}

impl Drop for ProcessBot {
    fn drop(&mut self) {
        let _ = self.child.kill();
        let _ = self.child.wait();
    }
}

/// Serve `bot` over JSON lines until `input` ends.
///
/// Requests that fail to parse are answered with an empty response.
///
/// # Errors
///
/// Returns [`BotError::Io`] if reading or writing fails, or any error the
/// bot itself reports.
pub fn serve_stdio<B: Bot>(bot: &mut B, input: impl BufRead, mut output: impl Write) -> Result<(), BotError> {
    for line in input.lines() {
        let line = line?;
        if line.trim().is_empty() {
            continue;
        }

        let response = match serde_json::from_str::<TurnRequest>(&line) {
            Ok(request) => bot.on_turn(&request)?,
            Err(e) => {
                tracing::warn!(error = %e, "malformed turn request");
                TurnResponse::empty()
            }
        };

        serde_json::to_writer(&mut output, &response)?;
        writeln!(output)?;
        output.flush()?;
    }
    Ok(())
}
