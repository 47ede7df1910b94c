use clap::Parser;
use crossterm::{
    event::{DisableMouseCapture, EnableMouseCapture},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use std::io;

mod api;
mod app;
mod cli;
mod format;
mod pages;
mod session;

use crate::api::RecordsClient;
use crate::app::run_app;
use crate::cli::Args;

const DEFAULT_URL: &str = "http://127.0.0.1:5000";

fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    let base_url = args.url.as_deref().unwrap_or(DEFAULT_URL);
    let client = RecordsClient::new(base_url)?;

    // setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    // run the browser loop
    let res = run_app(&mut terminal, client, args.per_page);

    // restore terminal
    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    res?;

    Ok(())
}
