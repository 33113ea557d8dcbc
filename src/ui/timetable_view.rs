use crate::calc::date_range::{DateDescriptor, date_key};
use crate::calc::workday::business_days_in_month;
use crate::data::{AppSettings, CourseIndex, CourseSession};
use crate::nav::{self, Command, ViewMode, ViewModeController};
use anyhow::{Result, anyhow};
use chrono::{Datelike, NaiveDate};
use crossterm::event::{self, Event as CEvent, KeyCode, KeyEventKind, KeyModifiers};
use ratatui::{
    Frame, Terminal,
    backend::Backend,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Cell, Paragraph, Row, Table},
};
use std::path::PathBuf;
use std::time::Duration as StdDuration;

use super::signals::ShutdownSignal;

const CURSOR_BG: Color = Color::Yellow;

// Header row style
const SECTION_BG: Color = Color::Rgb(40, 44, 52);

const WEEKDAY_NAMES: [&str; 5] = ["Mon", "Tue", "Wed", "Thu", "Fri"];

pub struct App<'a> {
    index: &'a dyn CourseIndex,
    controller: ViewModeController,
    today: NaiveDate,
    /// Shown in the footer.
    timetable_path: PathBuf,
}

impl<'a> App<'a> {
    pub fn new(
        index: &'a dyn CourseIndex,
        settings: &AppSettings,
        today: NaiveDate,
        timetable_path: PathBuf,
    ) -> Self {
        let controller = ViewModeController::with_mode(today, settings.start_view)
            .skip_weekends(settings.skip_weekends);
        App {
            index,
            controller,
            today,
            timetable_path,
        }
    }

    pub fn controller(&self) -> &ViewModeController {
        &self.controller
    }

    /// Returns true if the app should quit.
    pub fn handle_key(&mut self, code: KeyCode, modifiers: KeyModifiers) -> bool {
        let command = match code {
            KeyCode::Char('q') | KeyCode::Esc => return true,
            KeyCode::Char('c') if modifiers.contains(KeyModifiers::CONTROL) => return true,
            KeyCode::Char('d') => Command::SwitchMode(ViewMode::Day),
            KeyCode::Char('w') => Command::SwitchMode(ViewMode::Week),
            KeyCode::Char('m') => Command::SwitchMode(ViewMode::Month),
            KeyCode::Char('n') | KeyCode::PageDown => Command::Advance,
            KeyCode::Char('p') | KeyCode::PageUp => Command::Retreat,
            KeyCode::Left | KeyCode::Char('h') => Command::Move(nav::Direction::Left),
            KeyCode::Right | KeyCode::Char('l') => Command::Move(nav::Direction::Right),
            KeyCode::Up | KeyCode::Char('k') => Command::Move(nav::Direction::Up),
            KeyCode::Down | KeyCode::Char('j') => Command::Move(nav::Direction::Down),
            KeyCode::Enter | KeyCode::Char(' ') => Command::Select,
            KeyCode::Char('t') => Command::GoTo(self.today),
            _ => return false,
        };
        self.controller.apply(command);
        false
    }

    pub fn render(&self, f: &mut Frame) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(2), // title
                Constraint::Min(6),    // view body
                Constraint::Length(5), // help table + footer
            ])
            .split(f.area());

        self.render_title(f, chunks[0]);
        match self.controller.mode() {
            ViewMode::Day => self.render_day(f, chunks[1]),
            ViewMode::Week => self.render_week(f, chunks[1]),
            ViewMode::Month => self.render_month(f, chunks[1]),
        }
        self.render_help(f, chunks[2]);
    }

    fn render_title(&self, f: &mut Frame, area: Rect) {
        let mode = self.controller.mode();
        let title = range_title(mode, self.controller.anchor());
        let line = Line::from(vec![
            Span::styled(
                format!(" {} ", mode.label()),
                Style::default()
                    .fg(Color::Black)
                    .bg(Color::Cyan)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::raw("  "),
            Span::styled(title, Style::default().add_modifier(Modifier::BOLD)),
            Span::styled(
                format!("  {}", session_count_label(self.range_session_count())),
                Style::default().fg(Color::DarkGray),
            ),
        ]);
        f.render_widget(Paragraph::new(line), area);
    }

    fn range_session_count(&self) -> usize {
        self.controller
            .visible_range()
            .iter()
            .map(|dd| self.index.lookup(&dd.key).len())
            .sum()
    }

    fn render_day(&self, f: &mut Frame, area: Rect) {
        let key = date_key(self.controller.anchor());
        let sessions = self.index.lookup(&key);
        let block = Block::default()
            .borders(Borders::ALL)
            .title(format!(" Sessions for {key} "));

        if sessions.is_empty() {
            f.render_widget(Paragraph::new("  (no sessions)").block(block), area);
            return;
        }

        let header = Row::new(vec!["Time", "Course", "Id", "Location"]).style(
            Style::default()
                .fg(Color::White)
                .bg(SECTION_BG)
                .add_modifier(Modifier::BOLD),
        );
        let rows: Vec<Row> = sessions
            .iter()
            .map(|s| {
                Row::new(vec![
                    Cell::from(s.start.clone()).style(Style::default().fg(Color::Cyan)),
                    Cell::from(s.course_name.clone()),
                    Cell::from(s.course_id.clone()).style(Style::default().fg(Color::DarkGray)),
                    Cell::from(s.location.clone()),
                ])
            })
            .collect();
        let table = Table::new(
            rows,
            [
                Constraint::Length(12),
                Constraint::Percentage(45),
                Constraint::Length(14),
                Constraint::Min(10),
            ],
        )
        .header(header)
        .block(block);
        f.render_widget(table, area);
    }

    fn render_week(&self, f: &mut Frame, area: Rect) {
        let columns = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Ratio(1, 5); 5])
            .split(area);
        let grid = self.controller.grid();
        let Some(row) = grid.rows().first() else {
            return;
        };

        for (col, cell) in row.iter().enumerate().take(columns.len()) {
            let Some(dd) = cell.date() else {
                continue;
            };
            let is_cursor = grid.is_cursor_at(0, col);
            let border_style = if is_cursor {
                Style::default().fg(CURSOR_BG).add_modifier(Modifier::BOLD)
            } else {
                Style::default()
            };
            let title_style = day_cell_style(is_cursor, dd.date == self.today, false);
            let block = Block::default()
                .borders(Borders::ALL)
                .border_style(border_style)
                .title(Span::styled(column_title(dd), title_style));
            let lines = session_lines(self.index.lookup(&dd.key));
            f.render_widget(Paragraph::new(lines).block(block), columns[col]);
        }
    }

    fn render_month(&self, f: &mut Frame, area: Rect) {
        let grid = self.controller.grid();
        let anchor = self.controller.anchor();
        let table_height = grid.rows().len() as u16 + 3;
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Length(table_height), Constraint::Min(3)])
            .split(area);

        let header = Row::new(WEEKDAY_NAMES.to_vec()).style(
            Style::default()
                .fg(Color::White)
                .bg(SECTION_BG)
                .add_modifier(Modifier::BOLD),
        );
        let rows: Vec<Row> = grid
            .rows()
            .iter()
            .enumerate()
            .map(|(r, row)| {
                let cells: Vec<Cell> = row
                    .iter()
                    .enumerate()
                    .map(|(c, cell)| match cell.date() {
                        Some(dd) => {
                            let count = self.index.lookup(&dd.key).len();
                            let style = day_cell_style(
                                grid.is_cursor_at(r, c),
                                dd.date == self.today,
                                count > 0,
                            );
                            Cell::from(month_cell_text(dd, count)).style(style)
                        }
                        None => Cell::from(""),
                    })
                    .collect();
                Row::new(cells)
            })
            .collect();
        let table = Table::new(rows, [Constraint::Ratio(1, 5); 5])
            .header(header)
            .block(Block::default().borders(Borders::ALL).title(format!(
                " {} business days ",
                business_days_in_month(anchor.year(), anchor.month())
            )));
        f.render_widget(table, chunks[0]);

        // Preview of the date under the cursor
        let preview = match grid.selected() {
            Some(dd) => {
                let mut lines = vec![Line::from(format!("Sessions for {}:", dd.key))];
                lines.extend(session_lines(self.index.lookup(&dd.key)));
                lines
            }
            None => vec![Line::from(Span::styled(
                "Move the cursor to preview a day, Enter opens it.",
                Style::default().add_modifier(Modifier::DIM),
            ))],
        };
        f.render_widget(Paragraph::new(preview), chunks[1]);
    }

    fn render_help(&self, f: &mut Frame, area: Rect) {
        let key_rows: Vec<Row> = vec![
            Row::new(vec!["d / w / m", "Day / Week / Month", "n / p", "Next / previous"]),
            Row::new(vec!["← → ↑ ↓", "Move cursor", "Enter", "Open day"]),
            Row::new(vec!["t", "Today", "q/Ctrl+C", "Quit"]),
        ];
        let help_table = Table::new(
            key_rows,
            [
                Constraint::Length(12),
                Constraint::Length(24),
                Constraint::Length(12),
                Constraint::Length(24),
            ],
        )
        .column_spacing(1);

        let help_chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Min(3),    // help table
                Constraint::Length(1), // timetable footer
            ])
            .split(area);
        f.render_widget(help_table, help_chunks[0]);

        let footer = Paragraph::new(Line::from(vec![
            Span::styled("Timetable  ", Style::default().add_modifier(Modifier::DIM)),
            Span::styled(
                self.timetable_path.to_string_lossy().to_string(),
                Style::default().fg(Color::DarkGray),
            ),
        ]));
        f.render_widget(footer, help_chunks[1]);
    }
}

// ── App event loop ────────────────────────────────────────────────────────────

/// Runs until a quit key or a terminate signal, always returning normally so
/// the caller can restore the terminal.
pub fn run_app<B: Backend>(
    terminal: &mut Terminal<B>,
    app: &mut App,
    shutdown: &ShutdownSignal,
) -> Result<()> {
    while !shutdown.requested() {
        terminal
            .draw(|f| app.render(f))
            .map_err(|e| anyhow!("failed to draw: {e}"))?;
        if event::poll(StdDuration::from_millis(16))? {
            if let CEvent::Key(key) = event::read()? {
                if key.kind == KeyEventKind::Press && app.handle_key(key.code, key.modifiers) {
                    return Ok(());
                }
            }
        }
    }
    log::info!("terminate signal received, closing the view");
    Ok(())
}

// ── Rendering helpers ─────────────────────────────────────────────────────────

pub(crate) fn month_name(month: u32) -> &'static str {
    match month {
        1 => "January",
        2 => "February",
        3 => "March",
        4 => "April",
        5 => "May",
        6 => "June",
        7 => "July",
        8 => "August",
        9 => "September",
        10 => "October",
        11 => "November",
        12 => "December",
        _ => "Unknown",
    }
}

pub(crate) fn session_count_label(count: usize) -> String {
    match count {
        1 => "1 session".to_string(),
        n => format!("{n} sessions"),
    }
}

/// Title line text for the range a mode shows around `anchor`.
pub(crate) fn range_title(mode: ViewMode, anchor: NaiveDate) -> String {
    match mode {
        ViewMode::Day => format!("{} {}", anchor.format("%A"), date_key(anchor)),
        ViewMode::Week => {
            let week = crate::calc::date_range::week(anchor);
            match (week.first(), week.last()) {
                (Some(first), Some(last)) => format!(
                    "Week {}: {} – {}",
                    anchor.iso_week().week(),
                    first.key,
                    last.key
                ),
                _ => format!("Week {}", anchor.iso_week().week()),
            }
        }
        ViewMode::Month => format!("{} {}", month_name(anchor.month()), anchor.year()),
    }
}

fn column_title(dd: &DateDescriptor) -> String {
    let name = WEEKDAY_NAMES
        .get(dd.weekday as usize)
        .copied()
        .unwrap_or_default();
    format!(" {} {} ", name, dd.date.format("%d.%m."))
}

pub(crate) fn month_cell_text(dd: &DateDescriptor, sessions: usize) -> String {
    if sessions == 0 {
        format!("{:>2}", dd.date.day())
    } else {
        format!("{:>2}  ({sessions})", dd.date.day())
    }
}

fn session_lines(sessions: &[CourseSession]) -> Vec<Line<'static>> {
    if sessions.is_empty() {
        return vec![Line::from(Span::styled(
            "  (no sessions)",
            Style::default().add_modifier(Modifier::DIM),
        ))];
    }
    let mut lines = Vec::new();
    for s in sessions {
        lines.push(Line::from(vec![
            Span::styled(format!("{} ", s.start), Style::default().fg(Color::Cyan)),
            Span::raw(s.course_name.clone()),
        ]));
        if !s.location.is_empty() {
            lines.push(Line::from(Span::styled(
                format!("  {}", s.location),
                Style::default().fg(Color::DarkGray),
            )));
        }
    }
    lines
}

/// Style of a date cell in the week titles and the month table.
pub(crate) fn day_cell_style(is_cursor: bool, is_today: bool, has_sessions: bool) -> Style {
    if is_cursor {
        Style::default()
            .fg(Color::Black)
            .bg(CURSOR_BG)
            .add_modifier(Modifier::BOLD)
    } else if is_today {
        Style::default().add_modifier(Modifier::REVERSED | Modifier::BOLD)
    } else if has_sessions {
        Style::default().fg(Color::Cyan)
    } else {
        Style::default()
    }
}
