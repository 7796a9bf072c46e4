//! Watch command implementation - Interactive TUI viewer.

use super::{CliError, GameArgs};
use crossterm::{
    event::{self, Event, KeyCode, KeyEventKind},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{
    Frame, Terminal,
    backend::CrosstermBackend,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
};
use skirmish::bot::Bot;
use skirmish::engine::{Forfeit, Tick, TurnEngine, TurnReport};
use skirmish::game::Status;
use skirmish::render::{Allegiance, Glyph, glyph_rows};
use std::collections::VecDeque;
use std::io::stdout;
use std::path::Path;
use std::time::{Duration, Instant};

/// Event lines kept in the side panel.
const LOG_LINES: usize = 12;

/// Execute the watch command.
///
/// # Errors
///
/// Returns an error if the map cannot be loaded, the bot fails, or the TUI
/// fails.
pub(crate) fn execute(map: &Path, game: &GameArgs, speed: u64) -> Result<Status, CliError> {
    let config = game.config()?;
    let state = game.load(map, &config)?;
    let bot = game.bot()?;
    let engine = TurnEngine::new(state, config, bot);

    run_tui(engine, speed)
}

/// App state for the TUI.
struct App {
    engine: TurnEngine<Box<dyn Bot>>,
    paused: bool,
    speed_ms: u64,
    last_step: Instant,
    log: VecDeque<String>,
    failure: Option<CliError>,
}

impl App {
    fn new(engine: TurnEngine<Box<dyn Bot>>, speed_ms: u64) -> Self {
        Self {
            engine,
            paused: true, // Start paused
            speed_ms,
            last_step: Instant::now(),
            log: VecDeque::with_capacity(LOG_LINES),
            failure: None,
        }
    }

    fn is_over(&self) -> bool {
        self.engine.status().is_terminal() || self.failure.is_some()
    }

    fn step_forward(&mut self) {
        if self.is_over() {
            return;
        }
        match self.engine.tick() {
            Ok(Tick::Played(report)) => self.record(&report),
            Ok(Tick::Finished(status)) => self.push_log(format!("finished: {status:?}")),
            Err(e) => {
                self.push_log(format!("error: {e}"));
                self.failure = Some(e.into());
            }
        }
        self.last_step = Instant::now();
    }

    fn record(&mut self, report: &TurnReport) {
        let mut line = format!(
            "T{}: {} applied, {} rejected",
            report.turn,
            report.applied.len(),
            report.rejected.len()
        );
        match &report.forfeit {
            Some(Forfeit::Overrun(elapsed)) => line.push_str(&format!(", overran {}ms", elapsed.as_millis())),
            Some(Forfeit::Bot(e)) => line.push_str(&format!(", forfeited ({e})")),
            None => {}
        }
        self.push_log(line);
        for (action, reason) in &report.rejected {
            self.push_log(format!("  {action:?}: {reason}"));
        }
    }

    fn push_log(&mut self, line: String) {
        if self.log.len() == LOG_LINES {
            self.log.pop_front();
        }
        self.log.push_back(line);
    }

    fn toggle_pause(&mut self) {
        self.paused = !self.paused;
    }

    fn increase_speed(&mut self) {
        self.speed_ms = self.speed_ms.saturating_sub(100).max(50);
    }

    fn decrease_speed(&mut self) {
        self.speed_ms = (self.speed_ms + 100).min(2000);
    }

    fn should_auto_step(&self) -> bool {
        !self.paused && !self.is_over() && self.last_step.elapsed() >= Duration::from_millis(self.speed_ms)
    }
}

fn tui_error(e: impl std::fmt::Display) -> CliError {
    CliError::new(e.to_string())
}

fn run_tui(engine: TurnEngine<Box<dyn Bot>>, speed: u64) -> Result<Status, CliError> {
    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend).map_err(tui_error)?;

    let mut app = App::new(engine, speed);
    let outcome = event_loop(&mut terminal, &mut app);

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;

    outcome?;
    match app.failure {
        Some(e) => Err(e),
        None => Ok(app.engine.status()),
    }
}

fn event_loop<W: std::io::Write>(terminal: &mut Terminal<CrosstermBackend<W>>, app: &mut App) -> Result<(), CliError> {
    loop {
        terminal.draw(|f| ui(f, app)).map_err(tui_error)?;

        if app.should_auto_step() {
            app.step_forward();
        }

        // Handle input with timeout
        if event::poll(Duration::from_millis(50)).map_err(tui_error)?
            && let Event::Key(key) = event::read().map_err(tui_error)?
            && key.kind == KeyEventKind::Press
        {
            match key.code {
                KeyCode::Char('q') | KeyCode::Esc => return Ok(()),
                KeyCode::Char(' ') => app.toggle_pause(),
                KeyCode::Right | KeyCode::Char('l') => {
                    app.paused = true;
                    app.step_forward();
                }
                KeyCode::Char('+' | '=') => app.increase_speed(),
                KeyCode::Char('-') => app.decrease_speed(),
                _ => {}
            }
        }
    }
}

fn ui(f: &mut Frame, app: &App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Header
            Constraint::Min(10),   // Main content
            Constraint::Length(3), // Footer
        ])
        .split(f.area());

    render_header(f, chunks[0], app);

    let main_chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(65), Constraint::Percentage(35)])
        .split(chunks[1]);

    render_map(f, main_chunks[0], app);
    render_stats(f, main_chunks[1], app);

    render_footer(f, chunks[2], app);
}

fn render_header(f: &mut Frame, area: Rect, app: &App) {
    let summary = app.engine.summary();

    let status = match app.engine.status() {
        Status::Won(_) => "YOU WIN",
        Status::Lost => "GAME OVER",
        Status::Running if app.failure.is_some() => "BOT FAILED",
        Status::Running if app.paused => "PAUSED",
        Status::Running => "RUNNING",
    };

    let title = format!(
        " Skirmish Viewer | Turn {} | {} left | {} | Speed: {}ms ",
        summary.turns_played, summary.turns_remaining, status, app.speed_ms
    );

    let header = Paragraph::new(title)
        .style(Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD))
        .block(Block::default().borders(Borders::ALL));

    f.render_widget(header, area);
}

fn render_map(f: &mut Frame, area: Rect, app: &App) {
    // Show the portion of the map that fits
    let visible_width = usize::from(area.width).saturating_sub(2);
    let visible_height = usize::from(area.height).saturating_sub(2);

    let lines: Vec<Line> = glyph_rows(app.engine.state())
        .into_iter()
        .take(visible_height)
        .map(|row| {
            row.into_iter()
                .take(visible_width)
                .map(|glyph| Span::styled(glyph.symbol().to_string(), glyph_style(glyph)))
                .collect::<Vec<_>>()
                .into()
        })
        .collect();

    let map_widget = Paragraph::new(lines).block(Block::default().borders(Borders::ALL).title(" Map "));

    f.render_widget(map_widget, area);
}

fn glyph_style(glyph: Glyph) -> Style {
    match glyph.allegiance() {
        Allegiance::Own => Style::default().fg(Color::Green),
        Allegiance::Enemy => Style::default().fg(Color::Red),
        Allegiance::Neutral if glyph == Glyph::Blocked => Style::default().fg(Color::White).add_modifier(Modifier::BOLD),
        Allegiance::Neutral => Style::default().fg(Color::DarkGray),
    }
}

fn render_stats(f: &mut Frame, area: Rect, app: &App) {
    let state = app.engine.state();
    let summary = app.engine.summary();
    let label = Style::default().add_modifier(Modifier::BOLD);

    let mut lines = vec![
        Line::from(""),
        Line::from(vec![Span::styled("Units:    ", label), Span::raw(state.units.len().to_string())]),
        Line::from(vec![Span::styled("Enemies:  ", label), Span::raw(state.enemies.len().to_string())]),
        Line::from(vec![Span::styled("Applied:  ", label), Span::raw(summary.applied.to_string())]),
        Line::from(vec![Span::styled("Rejected: ", label), Span::raw(summary.rejected.to_string())]),
        Line::from(vec![Span::styled("Forfeits: ", label), Span::raw(summary.forfeited.to_string())]),
        Line::from(""),
    ];
    lines.extend(app.log.iter().map(|entry| Line::from(entry.as_str())));

    let stats_widget = Paragraph::new(lines)
        .block(Block::default().borders(Borders::ALL).title(" Game "))
        .wrap(Wrap { trim: false });

    f.render_widget(stats_widget, area);
}

fn render_footer(f: &mut Frame, area: Rect, app: &App) {
    let controls = if app.is_over() {
        " [q] Quit "
    } else {
        " [q] Quit  [Space] Pause  [→] Step  [+/-] Speed "
    };

    let footer = Paragraph::new(controls)
        .style(Style::default().fg(Color::Gray))
        .block(Block::default().borders(Borders::ALL));

    f.render_widget(footer, area);
}
