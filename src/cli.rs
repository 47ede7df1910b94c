use clap::builder::{styling::AnsiColor, Styles};
use clap::Parser;

const ABOUT: &str = "Weather records TUI";

const LONG_ABOUT: &str = "
TUI for browsing historical weather observations served by a records API.

Point it at a server exposing GET /api/records with page/per_page/sort/order query
parameters. Pages, sort column and sort direction are driven from the keyboard and the
table updates in place as responses arrive.
";

const STYLES: Styles = Styles::styled()
    .header(AnsiColor::Yellow.on_default())
    .usage(AnsiColor::Green.on_default())
    .literal(AnsiColor::Green.on_default())
    .placeholder(AnsiColor::Green.on_default());

#[derive(Parser, Debug)]
#[command(version, styles=STYLES, about=ABOUT, long_about = LONG_ABOUT)]
pub struct Args {
    #[arg(help = "Base URL of the records API (e.g. http://127.0.0.1:5000)")]
    pub url: Option<String>,

    #[arg(short, long, default_value_t = 20, help = "Records fetched per page")]
    pub per_page: u32,
}
