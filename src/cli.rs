use clap::builder::{styling::AnsiColor, Styles};
use clap::Parser;

const ABOUT: &str = "Terminal weather dashboard";

const LONG_ABOUT: &str = "
TUI showing current conditions and a five-day forecast for a location.

Type to search for a place (three characters or more), press Enter to search
right away, and switch between Celsius and Fahrenheit with F2/F3.

The API key and forecast endpoint are read once at startup from the
SKYWX_API_KEY and SKYWX_API_URL environment variables.
";

const STYLES: Styles = Styles::styled()
    .header(AnsiColor::Yellow.on_default())
    .usage(AnsiColor::Green.on_default())
    .literal(AnsiColor::Green.on_default())
    .placeholder(AnsiColor::Green.on_default());

#[derive(Parser, Debug)]
#[command(version, styles=STYLES, about=ABOUT, long_about = LONG_ABOUT)]
pub struct Args {
    #[arg(help = "Initial location to look up (e.g. Brighton, \"New York\")")]
    pub location: Option<String>,
}
