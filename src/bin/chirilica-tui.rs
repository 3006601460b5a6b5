// Chirilica Terminal Host
// Interactive text field with an on-screen transliteration panel

#[path = "../tui/mod.rs"]
mod tui;

use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;

use chirilica_core::Settings;

/// Type Romanian transitional Cyrillic in the terminal
#[derive(Parser, Debug)]
#[command(name = "chirilica-tui")]
#[command(version)]
#[command(about = "Type Romanian transitional Cyrillic in the terminal", long_about = None)]
struct Args {
    /// TOML settings file (default: ~/.config/chirilica/settings.toml)
    #[arg(short, long, value_name = "CONFIG")]
    config: Option<PathBuf>,
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    // The alternate screen owns the terminal, so only log when asked to
    if std::env::var_os("RUST_LOG").is_some() {
        env_logger::init();
    }

    let settings = match &args.config {
        Some(path) => Settings::from_file(path)
            .with_context(|| format!("failed to load settings from {}", path.display()))?,
        None => Settings::load_default().context("failed to load default settings")?,
    };

    tui::run(settings).context("terminal session failed")
}
