use std::fs::File;
use std::io;
use std::path::PathBuf;

use clap::Parser;
use simplelog::{ConfigBuilder, LevelFilter, WriteLogger};
use vtui::core::config;
use vtui::core::scroll::ScrollStrategy;

#[derive(Parser)]
#[command(name = "vtui", about = "Keyboard-driven terminal widget demo")]
struct Args {
    /// Config file (defaults to ~/.vtui/config.toml)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// How the category list scrolls to keep the selection visible
    #[arg(short, long, value_enum)]
    scroll: Option<ScrollStrategy>,

    /// Log file path
    #[arg(long, default_value = "vtui.log")]
    log_file: PathBuf,

    /// Log verbosity (off, error, warn, info, debug, trace)
    #[arg(long, default_value_t = LevelFilter::Debug)]
    log_level: LevelFilter,
}

fn main() -> io::Result<()> {
    let args = Args::parse();
    dotenv::dotenv().ok();

    // Initialize file logger; the terminal itself is owned by the UI
    let log_config = ConfigBuilder::new().set_time_format_rfc3339().build();

    if let Ok(log_file) = File::create(&args.log_file) {
        let _ = WriteLogger::init(args.log_level, log_config, log_file);
    }

    log::info!("vtui starting up");

    let file_config = config::load_config(args.config.as_deref()).map_err(io::Error::other)?;
    let resolved = config::resolve(&file_config, args.scroll).map_err(io::Error::other)?;
    log::info!(
        "Resolved config: scroll={}, pulse={:?}, idle={:?}",
        resolved.scroll_strategy,
        resolved.click_pulse,
        resolved.idle_poll
    );

    vtui::tui::run(resolved)
}
