use std::io;
use std::sync::mpsc;
use std::thread;
use std::time::Duration;

use crossterm::event::{self, Event, KeyCode, KeyEventKind};
use ratatui::{
    backend::Backend,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Cell, Paragraph, Row, Table},
    Frame, Terminal,
};

use crate::api::{ApiError, PageResponse, Record, RecordsClient, Stats};
use crate::format;
use crate::pages::{visible_pages, PageToken};
use crate::session::{Session, SortDirection, SortField};

const TICK: Duration = Duration::from_millis(100);
const MISSING: &str = "--";

/// User intent, decoupled from whichever key produced it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    SortBy(SortField),
    GoToPage(u32),
    Retry,
    Quit,
}

/// The table region is always in exactly one of these states; each one fully
/// determines the table body, the pagination strip and the summary line.
#[derive(Debug)]
pub enum View {
    Loading,
    Error(String),
    Empty(PageResponse),
    Populated(PageResponse),
}

impl View {
    fn from_response(response: PageResponse) -> Self {
        if response.records.is_empty() {
            View::Empty(response)
        } else {
            View::Populated(response)
        }
    }

    fn page_data(&self) -> Option<&PageResponse> {
        match self {
            View::Empty(data) | View::Populated(data) => Some(data),
            View::Loading | View::Error(_) => None,
        }
    }
}

type FetchReply = (u64, Result<PageResponse, ApiError>);

pub struct App {
    client: RecordsClient,
    session: Session,
    view: View,
    latest_token: u64,
    reply_tx: mpsc::Sender<FetchReply>,
    reply_rx: mpsc::Receiver<FetchReply>,
}

impl App {
    pub fn new(client: RecordsClient, session: Session) -> Self {
        let (reply_tx, reply_rx) = mpsc::channel();
        Self {
            client,
            session,
            view: View::Loading,
            latest_token: 0,
            reply_tx,
            reply_rx,
        }
    }

    fn page_data(&self) -> Option<&PageResponse> {
        self.view.page_data()
    }

    /// Issue a fetch for `page` with the current sort config. Every request
    /// carries a token one past the previous; `accept` drops replies bearing
    /// an older token, so a slow stale response never overwrites a newer
    /// view.
    fn request(&mut self, page: u32) {
        self.session.go_to(page);
        self.latest_token += 1;
        let token = self.latest_token;
        let client = self.client.clone();
        let session = self.session;
        let tx = self.reply_tx.clone();
        thread::spawn(move || {
            let _ = tx.send((token, client.fetch_page(session)));
        });
        self.view = View::Loading;
    }

    fn dispatch(&mut self, command: Command) {
        match command {
            Command::SortBy(field) => {
                self.session.sort_by(field);
                self.request(1);
            }
            Command::GoToPage(page) => self.request(page),
            Command::Retry => self.request(1),
            Command::Quit => {} // handled by the event loop
        }
    }

    fn drain_replies(&mut self) {
        while let Ok((token, result)) = self.reply_rx.try_recv() {
            self.accept(token, result);
        }
    }

    fn accept(&mut self, token: u64, result: Result<PageResponse, ApiError>) {
        if token != self.latest_token {
            return; // a newer request is already in flight
        }
        self.view = match result {
            Ok(response) => View::from_response(response),
            Err(err) => View::Error(err.to_string()),
        };
    }

    fn command_for(&self, code: KeyCode) -> Option<Command> {
        match code {
            KeyCode::Char('q') | KeyCode::Esc => Some(Command::Quit),
            KeyCode::Char('r') => Some(Command::Retry),
            KeyCode::Char('d') => Some(Command::SortBy(SortField::DateTime)),
            KeyCode::Char('c') => Some(Command::SortBy(SortField::Condition)),
            KeyCode::Char('t') => Some(Command::SortBy(SortField::Temperature)),
            KeyCode::Char('h') => Some(Command::SortBy(SortField::Humidity)),
            KeyCode::Char('p') => Some(Command::SortBy(SortField::Pressure)),
            KeyCode::Left => self
                .page_data()
                .filter(|data| data.current_page > 1)
                .map(|data| Command::GoToPage(data.current_page - 1)),
            KeyCode::Right => self
                .page_data()
                .filter(|data| data.current_page < data.total_pages)
                .map(|data| Command::GoToPage(data.current_page + 1)),
            KeyCode::Home => self.page_data().map(|_| Command::GoToPage(1)),
            KeyCode::End => self
                .page_data()
                .filter(|data| data.total_pages >= 1)
                .map(|data| Command::GoToPage(data.total_pages)),
            _ => None,
        }
    }
}

pub fn run_app<B: Backend>(
    terminal: &mut Terminal<B>,
    client: RecordsClient,
    per_page: u32,
) -> io::Result<()> {
    let mut app = App::new(client, Session::new(per_page));
    app.request(1);

    loop {
        terminal.draw(|f| ui(f, &app))?;

        if event::poll(TICK)? {
            if let Event::Key(key) = event::read()? {
                if key.kind == KeyEventKind::Press {
                    match app.command_for(key.code) {
                        Some(Command::Quit) => return Ok(()),
                        Some(command) => app.dispatch(command),
                        None => {}
                    }
                }
            }
        }

        app.drain_replies();
    }
}

fn ui(f: &mut Frame, app: &App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .margin(1)
        .constraints([
            Constraint::Length(4),
            Constraint::Min(5),
            Constraint::Length(1),
            Constraint::Length(1),
            Constraint::Length(1),
        ])
        .split(f.area());

    f.render_widget(headline(app), chunks[0]);
    render_table_region(f, chunks[1], app);
    f.render_widget(
        Paragraph::new(summary_line(&app.view)).style(Style::default().fg(Color::Gray)),
        chunks[2],
    );
    f.render_widget(
        Paragraph::new(pagination_line(app.page_data())).alignment(Alignment::Center),
        chunks[3],
    );
    f.render_widget(help_line(), chunks[4]);
}

fn headline(app: &App) -> Paragraph<'static> {
    let stats = app.page_data().and_then(|data| data.stats.as_ref());
    let (temp, humidity, pressure) = stat_values(stats);
    let green = Style::default().fg(Color::Green);

    Paragraph::new(vec![
        Line::from(vec![
            Span::raw(" "),
            Span::styled("wxrec", Style::default().fg(Color::Blue)),
            Span::raw(" : "),
            Span::styled(
                app.client.base_url().to_string(),
                Style::default().fg(Color::Yellow),
            ),
        ]),
        Line::from(vec![
            Span::raw(" Avg Temp "),
            Span::styled(temp, green),
            Span::raw("   Avg Humidity "),
            Span::styled(humidity, green),
            Span::raw("   Avg Pressure "),
            Span::styled(pressure, green),
        ]),
    ])
    .block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Cyan))
            .border_type(BorderType::Rounded),
    )
}

fn stat_values(stats: Option<&Stats>) -> (String, String, String) {
    match stats {
        Some(stats) => (
            stats
                .avg_temp
                .map(|v| format!("{v}°C"))
                .unwrap_or_else(|| MISSING.to_string()),
            stats
                .avg_humidity
                .map(|v| format!("{v}%"))
                .unwrap_or_else(|| MISSING.to_string()),
            stats
                .avg_pressure
                .map(|v| format!("{v} mB"))
                .unwrap_or_else(|| MISSING.to_string()),
        ),
        None => (
            MISSING.to_string(),
            MISSING.to_string(),
            MISSING.to_string(),
        ),
    }
}

fn render_table_region(f: &mut Frame, area: Rect, app: &App) {
    let block = Block::default()
        .borders(Borders::ALL)
        .title(Span::styled(
            " Observations ",
            Style::default().fg(Color::Yellow),
        ))
        .title_alignment(Alignment::Left)
        .border_style(Style::default().fg(Color::Cyan))
        .border_type(BorderType::Rounded);

    match &app.view {
        View::Loading => {
            let message = Paragraph::new("\nLoading weather data...")
                .alignment(Alignment::Center)
                .block(block);
            f.render_widget(message, area);
        }
        View::Error(message) => {
            let lines = vec![
                Line::from(""),
                Line::from(Span::styled(
                    "Failed to load weather data",
                    Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
                )),
                Line::from(Span::styled(
                    message.clone(),
                    Style::default().fg(Color::DarkGray),
                )),
                Line::from(""),
                Line::from("press r to retry"),
            ];
            let message = Paragraph::new(lines)
                .alignment(Alignment::Center)
                .block(block);
            f.render_widget(message, area);
        }
        View::Empty(_) => {
            let message = Paragraph::new("\nNo weather records found")
                .alignment(Alignment::Center)
                .block(block);
            f.render_widget(message, area);
        }
        View::Populated(data) => {
            let table = records_table(&data.records, &app.session).block(block);
            f.render_widget(table, area);
        }
    }
}

fn sort_marker(field: SortField, session: &Session) -> &'static str {
    if session.sort_field != field {
        return "";
    }
    match session.sort_direction {
        SortDirection::Asc => " ▲",
        SortDirection::Desc => " ▼",
    }
}

fn records_table(records: &[Record], session: &Session) -> Table<'static> {
    let sortable = |field: SortField| -> Cell<'static> {
        Cell::from(format!("{}{}", field.label(), sort_marker(field, session)))
    };
    let header = Row::new([
        sortable(SortField::DateTime),
        Cell::from("Time"),
        sortable(SortField::Condition),
        sortable(SortField::Temperature),
        sortable(SortField::Humidity),
        sortable(SortField::Pressure),
    ])
    .style(
        Style::default()
            .fg(Color::Yellow)
            .add_modifier(Modifier::BOLD),
    );

    let rows: Vec<Row> = records.iter().map(record_row).collect();

    Table::new(
        rows,
        [
            Constraint::Length(12),
            Constraint::Length(6),
            Constraint::Min(18),
            Constraint::Length(14),
            Constraint::Length(10),
            Constraint::Length(12),
        ],
    )
    .header(header)
    .column_spacing(2)
}

fn record_row(record: &Record) -> Row<'static> {
    let timestamp = record.datetime_utc.as_deref();

    let condition = match record.condition.as_deref() {
        Some(text) => Cell::from(format!(
            "{} {}",
            format::condition_icon(text).glyph(),
            text
        )),
        None => no_data_cell(),
    };

    let temperature = match record.temperature {
        Some(temp) => Cell::from(format!(
            "{} {}",
            format::temp_trend(temp).glyph(),
            format::temperature_text(Some(temp))
        ))
        .style(Style::default().fg(format::temp_band(temp).color())),
        None => no_data_cell(),
    };

    let humidity = match record.humidity {
        Some(_) => Cell::from(format::humidity_text(record.humidity)),
        None => no_data_cell(),
    };

    let pressure = match record.pressure {
        Some(_) => Cell::from(format::pressure_text(record.pressure)),
        None => no_data_cell(),
    };

    Row::new(vec![
        Cell::from(format::format_date(timestamp)),
        Cell::from(format::format_time(timestamp)),
        condition,
        temperature,
        humidity,
        pressure,
    ])
}

fn no_data_cell() -> Cell<'static> {
    Cell::from(format::NO_DATA).style(Style::default().fg(Color::DarkGray))
}

fn summary_line(view: &View) -> Line<'static> {
    let text = match view {
        View::Loading => "Loading records...".to_string(),
        View::Error(_) => "Failed to load data".to_string(),
        View::Empty(data) => format!("Showing 0 of {} records", data.total_records),
        View::Populated(data) => {
            let start =
                (data.current_page as u64).saturating_sub(1) * data.per_page as u64 + 1;
            let end = (start + data.records.len() as u64 - 1).min(data.total_records);
            format!(
                "Showing {start}-{end} of {} records (Page {} of {})",
                data.total_records, data.current_page, data.total_pages
            )
        }
    };
    Line::from(format!(" {text}"))
}

fn pagination_line(data: Option<&PageResponse>) -> Line<'static> {
    let mut spans: Vec<Span> = Vec::new();
    let Some(data) = data else {
        return Line::from(spans);
    };
    if data.total_pages <= 1 {
        return Line::from(spans);
    }

    if data.current_page > 1 {
        spans.push(Span::styled("‹ Prev", Style::default().fg(Color::Cyan)));
        spans.push(Span::raw("  "));
    }

    for token in visible_pages(data.current_page, data.total_pages) {
        match token {
            PageToken::Page(p) if p == data.current_page => spans.push(Span::styled(
                format!("[{p}]"),
                Style::default()
                    .fg(Color::Yellow)
                    .add_modifier(Modifier::BOLD),
            )),
            PageToken::Page(p) => spans.push(Span::raw(p.to_string())),
            PageToken::Ellipsis => {
                spans.push(Span::styled("…", Style::default().fg(Color::DarkGray)))
            }
        }
        spans.push(Span::raw(" "));
    }

    if data.current_page < data.total_pages {
        spans.push(Span::raw(" "));
        spans.push(Span::styled("Next ›", Style::default().fg(Color::Cyan)));
    }

    Line::from(spans)
}

fn help_line() -> Paragraph<'static> {
    Paragraph::new(" q quit · ←/→ page · Home/End first/last · d/c/t/h/p sort · r reload")
        .style(Style::default().fg(Color::DarkGray))
}
