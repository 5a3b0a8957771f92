//! Application state, event loop, and rendering.

use std::io::{self, Stdout};
use std::sync::mpsc::{self, Receiver, Sender};
use std::time::{Duration, Instant};

use chrono::Local;
use crossterm::{
    event::{self, Event, KeyCode, KeyEventKind, KeyModifiers},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    backend::CrosstermBackend,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Cell, Gauge, List, ListItem, Paragraph, Row, Table},
    Frame, Terminal,
};

use crate::config::Config;
use crate::debounce::Debounce;
use crate::fetch::{spawn_fetch_worker, FetchOutcome, FetchRequest};
use crate::format::{format_date, format_time};
use crate::icon;
use crate::units::Unit;
use crate::views;
use crate::visualcrossing::{Client, DayRecord, WeatherResponse};

/// Looked up on start when no location argument is given.
pub const DEFAULT_LOCATION: &str = "Brighton";

/// Keystroke bursts quieter than this collapse into one fetch.
const DEBOUNCE_DELAY: Duration = Duration::from_millis(500);

/// Queries shorter than this never arm the timer.
const MIN_QUERY_LEN: usize = 3;

/// Event poll timeout; also the debounce timer resolution.
const TICK: Duration = Duration::from_millis(50);

const MISSING: &str = "--";

/// Single-line text input with a cursor.
#[derive(Default, Clone)]
struct TextInput {
    text: String,
    cursor: usize,
}

impl TextInput {
    fn with_text(text: &str) -> Self {
        Self {
            text: text.to_string(),
            cursor: text.len(),
        }
    }

    fn insert_char(&mut self, c: char) {
        self.text.insert(self.cursor, c);
        self.cursor += c.len_utf8();
    }

    fn delete_char_before(&mut self) {
        if self.cursor > 0 {
            let prev = self.text[..self.cursor]
                .char_indices()
                .next_back()
                .map(|(i, _)| i)
                .unwrap_or(0);
            self.text.drain(prev..self.cursor);
            self.cursor = prev;
        }
    }

    fn delete_char_at(&mut self) {
        if self.cursor < self.text.len() {
            let next = self.text[self.cursor..]
                .chars()
                .next()
                .map(|c| self.cursor + c.len_utf8())
                .unwrap_or(self.cursor);
            self.text.drain(self.cursor..next);
        }
    }

    fn move_left(&mut self) {
        if self.cursor > 0 {
            self.cursor = self.text[..self.cursor]
                .char_indices()
                .next_back()
                .map(|(i, _)| i)
                .unwrap_or(0);
        }
    }

    fn move_right(&mut self) {
        if self.cursor < self.text.len() {
            self.cursor = self.text[self.cursor..]
                .chars()
                .next()
                .map(|c| self.cursor + c.len_utf8())
                .unwrap_or(self.text.len());
        }
    }

    fn clear(&mut self) {
        self.text.clear();
        self.cursor = 0;
    }

    /// Handle a key event, returns true if the event was consumed.
    fn handle_key(&mut self, code: KeyCode, modifiers: KeyModifiers) -> bool {
        let has_ctrl = modifiers.contains(KeyModifiers::CONTROL);

        match code {
            KeyCode::Char('u') if has_ctrl => self.clear(),
            KeyCode::Home => self.cursor = 0,
            KeyCode::End => self.cursor = self.text.len(),
            KeyCode::Left => self.move_left(),
            KeyCode::Right => self.move_right(),
            KeyCode::Backspace => self.delete_char_before(),
            KeyCode::Delete => self.delete_char_at(),
            KeyCode::Char(c) if !has_ctrl => self.insert_char(c),
            _ => return false,
        }
        true
    }
}

/// Application state: the query being composed, the derived panels, and the
/// plumbing to the fetch worker.
pub struct App {
    input: TextInput,
    unit: Unit,
    address: Option<String>,
    today: Option<DayRecord>,
    forecast: Vec<DayRecord>,
    debounce: Debounce,
    /// Sequence number of the newest issued request; older outcomes are stale.
    latest_seq: u64,
    req_tx: Sender<FetchRequest>,
    outcome_rx: Receiver<FetchOutcome>,
    should_quit: bool,
}

impl App {
    pub fn new(client: Client, location: String) -> Self {
        let (req_tx, req_rx) = mpsc::channel();
        let (outcome_tx, outcome_rx) = mpsc::channel();
        spawn_fetch_worker(client, req_rx, outcome_tx);
        Self::with_channels(req_tx, outcome_rx, location)
    }

    /// The initial load fires immediately: no debounce, no length gate.
    fn with_channels(
        req_tx: Sender<FetchRequest>,
        outcome_rx: Receiver<FetchOutcome>,
        location: String,
    ) -> Self {
        let mut app = Self {
            input: TextInput::with_text(&location),
            unit: Unit::default(),
            address: None,
            today: None,
            forecast: Vec::new(),
            debounce: Debounce::new(DEBOUNCE_DELAY),
            latest_seq: 0,
            req_tx,
            outcome_rx,
            should_quit: false,
        };
        app.issue_fetch();
        app
    }

    /// Send a request for the current query and unit, superseding any
    /// response still in flight.
    fn issue_fetch(&mut self) {
        self.latest_seq += 1;
        let _ = self.req_tx.send(FetchRequest {
            seq: self.latest_seq,
            location: self.input.text.clone(),
            unit: self.unit,
        });
    }

    /// Keystroke/submit path: restart the timer, or disarm it when the query
    /// is too short.
    fn handle_search(&mut self, now: Instant) {
        self.debounce.cancel();
        if self.input.text.chars().count() >= MIN_QUERY_LEN {
            self.debounce.schedule(now);
        }
    }

    /// Unit toggles refetch immediately, bypassing the timer.
    fn set_unit(&mut self, unit: Unit) {
        self.unit = unit;
        self.issue_fetch();
    }

    fn quit(&mut self) {
        self.debounce.cancel();
        self.should_quit = true;
    }

    pub fn handle_event(&mut self, ev: Event, now: Instant) {
        let Event::Key(key) = ev else { return };
        if key.kind != KeyEventKind::Press {
            return;
        }

        match key.code {
            KeyCode::Esc => self.quit(),
            KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => self.quit(),
            KeyCode::Enter => self.handle_search(now),
            KeyCode::F(2) => self.set_unit(Unit::Metric),
            KeyCode::F(3) => self.set_unit(Unit::Imperial),
            code => {
                let before = self.input.text.clone();
                if self.input.handle_key(code, key.modifiers) && self.input.text != before {
                    self.handle_search(now);
                }
            }
        }
    }

    /// Fire the debounce timer once its quiet period has elapsed.
    pub fn tick(&mut self, now: Instant) {
        if self.debounce.fire(now) {
            self.issue_fetch();
        }
    }

    /// Drain worker outcomes. Stale and failed fetches leave the current
    /// panels untouched.
    pub fn poll_outcomes(&mut self) {
        while let Ok(outcome) = self.outcome_rx.try_recv() {
            if outcome.seq != self.latest_seq {
                continue;
            }
            match outcome.result {
                Ok(response) => self.apply_response(response),
                Err(err) => log::warn!("weather fetch failed: {err}"),
            }
        }
    }

    fn apply_response(&mut self, response: WeatherResponse) {
        let today = Local::now().date_naive();
        self.today = views::today_view(&response.days, today).cloned();
        self.forecast = views::forecast_view(&response.days, today)
            .into_iter()
            .cloned()
            .collect();
        self.address = Some(response.address);
    }
}

/// Run the dashboard: terminal setup, the event loop, terminal restore.
pub fn run(config: Config, location: String) -> anyhow::Result<()> {
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let mut app = App::new(Client::new(config), location);
    let result = run_loop(&mut terminal, &mut app);

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    result
}

fn run_loop(
    terminal: &mut Terminal<CrosstermBackend<Stdout>>,
    app: &mut App,
) -> anyhow::Result<()> {
    loop {
        terminal.draw(|f| ui(f, app))?;

        if event::poll(TICK)? {
            app.handle_event(event::read()?, Instant::now());
        }
        if app.should_quit {
            return Ok(());
        }

        app.tick(Instant::now());
        app.poll_outcomes();
    }
}

fn panel_block(title: &str) -> Block<'static> {
    Block::default()
        .borders(Borders::ALL)
        .title(Span::styled(
            title.to_string(),
            Style::default().fg(Color::Yellow),
        ))
        .title_alignment(Alignment::Left)
        .border_style(Style::default().fg(Color::Cyan))
        .border_type(BorderType::Rounded)
}

fn value_style() -> Style {
    Style::default().fg(Color::Green)
}

fn ui(f: &mut Frame, app: &App) {
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .margin(1)
        .constraints([
            Constraint::Length(3),
            Constraint::Min(0),
            Constraint::Length(1),
        ])
        .split(f.area());

    draw_search_bar(f, app, rows[0]);

    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(34), Constraint::Percentage(66)])
        .split(rows[1]);

    draw_current_conditions(f, app, columns[0]);

    let right = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(9), Constraint::Min(0)])
        .split(columns[1]);

    draw_day_overview(f, app, right[0]);
    draw_forecast(f, app, right[1]);
    draw_footer(f, rows[2]);
}

fn draw_search_bar(f: &mut Frame, app: &App, area: Rect) {
    let input = Paragraph::new(app.input.text.as_str()).block(panel_block(" Location "));
    f.render_widget(input, area);

    let cursor_cols = app.input.text[..app.input.cursor].chars().count() as u16;
    let max_col = area.x + area.width.saturating_sub(2);
    f.set_cursor_position(((area.x + 1 + cursor_cols).min(max_col), area.y + 1));
}

fn draw_current_conditions(f: &mut Frame, app: &App, area: Rect) {
    let block = panel_block(" Current Conditions ");

    let Some(ref today) = app.today else {
        let placeholder = Paragraph::new("Loading weather data...")
            .block(block)
            .alignment(Alignment::Center);
        f.render_widget(placeholder, area);
        return;
    };

    let address = app.address.clone().unwrap_or_else(|| MISSING.to_string());
    let conditions = if today.conditions.is_empty() {
        MISSING.to_string()
    } else {
        today.conditions.clone()
    };
    let temp = match today.temp {
        Some(temp) => format!("{temp:.1} {}", app.unit.suffix()),
        None => MISSING.to_string(),
    };

    let lines = vec![
        Line::from(""),
        Line::from(Span::styled(
            address,
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
        )),
        Line::from(format_date(&today.datetime)),
        Line::from(""),
        Line::from(vec![
            Span::raw(format!("{} ", icon::glyph(&today.icon))),
            Span::styled(conditions, value_style()),
        ]),
        Line::from(""),
        Line::from(Span::styled(
            temp,
            value_style().add_modifier(Modifier::BOLD),
        )),
    ];

    let panel = Paragraph::new(lines)
        .block(block)
        .alignment(Alignment::Center);
    f.render_widget(panel, area);
}

fn draw_day_overview(f: &mut Frame, app: &App, area: Rect) {
    let block = panel_block(" Day Overview ");
    let inner = block.inner(area);
    f.render_widget(block, area);

    let sections = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(1), Constraint::Min(0)])
        .split(inner);

    let gauges = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(sections[0]);

    let today = app.today.as_ref();
    draw_pct_gauge(
        f,
        gauges[0],
        "Humidity",
        today.and_then(|d| d.humidity),
        Color::Green,
    );
    draw_pct_gauge(
        f,
        gauges[1],
        "Cloud cover",
        today.and_then(|d| d.cloudcover),
        Color::Yellow,
    );

    let temp_cell = |value: Option<f64>| match value {
        Some(v) => format!("{v:.1} {}", app.unit.suffix()),
        None => MISSING.to_string(),
    };
    let time_cell = |value: &str| {
        if value.is_empty() {
            MISSING.to_string()
        } else {
            format_time(value).to_string()
        }
    };

    let mut rows = vec![Row::new(vec![Cell::from("")])];
    rows.push(Row::new(vec![
        Cell::from(" Max temp"),
        Cell::from(temp_cell(today.and_then(|d| d.tempmax))).style(value_style()),
    ]));
    rows.push(Row::new(vec![
        Cell::from(" Min temp"),
        Cell::from(temp_cell(today.and_then(|d| d.tempmin))).style(value_style()),
    ]));
    rows.push(Row::new(vec![
        Cell::from(" Sunrise"),
        Cell::from(time_cell(today.map(|d| d.sunrise.as_str()).unwrap_or(""))).style(value_style()),
    ]));
    rows.push(Row::new(vec![
        Cell::from(" Sunset"),
        Cell::from(time_cell(today.map(|d| d.sunset.as_str()).unwrap_or(""))).style(value_style()),
    ]));

    let table = Table::new(rows, [Constraint::Length(12), Constraint::Length(15)]);
    f.render_widget(table, sections[1]);
}

fn draw_pct_gauge(f: &mut Frame, area: Rect, label: &str, value: Option<f64>, color: Color) {
    let pct = value
        .map(|v| v.clamp(0.0, 100.0).round() as u16)
        .unwrap_or(0);
    let text = match value {
        Some(v) => format!(" {label} {v:.0}%"),
        None => format!(" {label} {MISSING}"),
    };

    let gauge = Gauge::default()
        .gauge_style(Style::default().fg(color).bg(Color::DarkGray))
        .percent(pct)
        .label(text);
    f.render_widget(gauge, area);
}

fn draw_forecast(f: &mut Frame, app: &App, area: Rect) {
    let block = panel_block(" 5 Day Forecast ");

    let mut list_items = vec![];
    if app.forecast.is_empty() {
        list_items.push(ListItem::new("\n  Loading forecast...".to_string()));
    } else {
        for day in &app.forecast {
            list_items.push(ListItem::new(forecast_entry(day, app.unit)));
        }
    }

    let list = List::new(list_items).block(block);
    f.render_widget(list, area);
}

fn forecast_entry(day: &DayRecord, unit: Unit) -> Vec<Line<'static>> {
    let conditions = if day.conditions.is_empty() {
        MISSING.to_string()
    } else {
        day.conditions.clone()
    };
    let range = match (day.tempmin, day.tempmax) {
        (Some(min), Some(max)) => format!("{min:.1} .. {max:.1} {}", unit.suffix()),
        _ => MISSING.to_string(),
    };

    vec![
        Line::from(""),
        Line::from(vec![
            Span::raw(" "),
            Span::styled(
                format_date(&day.datetime),
                Style::default()
                    .fg(Color::Yellow)
                    .add_modifier(Modifier::BOLD),
            ),
        ]),
        Line::from(vec![
            Span::raw(format!(" {} ", icon::glyph(&day.icon))),
            Span::styled(conditions, value_style()),
        ]),
        Line::from(vec![
            Span::raw(format!(" {:13}", "Temperature")),
            Span::styled(range, value_style()),
        ]),
    ]
}

fn draw_footer(f: &mut Frame, area: Rect) {
    let key_style = Style::default().fg(Color::Cyan);
    let hints = Line::from(vec![
        Span::styled(" Esc", key_style),
        Span::raw(" quit   "),
        Span::styled("Enter", key_style),
        Span::raw(" search   "),
        Span::styled("F2", key_style),
        Span::raw(" °C   "),
        Span::styled("F3", key_style),
        Span::raw(" °F"),
    ]);
    f.render_widget(
        Paragraph::new(hints).style(Style::default().fg(Color::DarkGray)),
        area,
    );
}
