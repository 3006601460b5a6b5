// Chirilica CLI
// Transliterates Latin text into Romanian transitional Cyrillic

use std::io::{self, BufRead, Write};
use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;

use chirilica_core::glyph::lower_char;
use chirilica_core::settings::default_settings_content;
use chirilica_core::{Engine, MarkKey, PanelKey, Settings, Switch, TextField};

/// Latin -> Romanian transitional Cyrillic transliterator
#[derive(Parser, Debug)]
#[command(name = "chirilica")]
#[command(version)]
#[command(about = "Latin -> Romanian transitional Cyrillic transliterator", long_about = None)]
struct Args {
    /// Text to transliterate (reads stdin lines when omitted)
    #[arg(value_name = "TEXT")]
    text: Vec<String>,

    /// TOML settings file (default: ~/.config/chirilica/settings.toml)
    #[arg(short, long, value_name = "CONFIG")]
    config: Option<PathBuf>,

    /// Hold the case switch for the whole input
    #[arg(short, long)]
    upper: bool,

    /// Hold the alternate switch for the whole input
    #[arg(short, long)]
    alternate: bool,

    /// Keep ' and ` as text instead of composing acute and grave
    #[arg(long)]
    literal_accents: bool,

    /// Enable debug logging
    #[arg(short, long)]
    verbose: bool,

    /// Validate settings and exit
    #[arg(long)]
    check_config: bool,

    /// Print a commented settings template and exit
    #[arg(long)]
    print_default_config: bool,

    /// Print the resolved glyph tables and exit
    #[arg(long)]
    table: bool,
}

fn load_settings(args: &Args) -> anyhow::Result<Settings> {
    match &args.config {
        Some(path) => Settings::from_file(path)
            .with_context(|| format!("failed to load settings from {}", path.display())),
        None => Settings::load_default().context("failed to load default settings"),
    }
}

fn build_engine(settings: &Settings, args: &Args) -> Engine {
    let mut engine = Engine::new(settings.engine_config());
    engine.set_held(Switch::Case, args.upper);
    engine.set_held(Switch::Alternate, args.alternate);
    engine
}

/// Feed `text` to the engine as panel clicks and return the field contents.
///
/// Latches left armed at the end of `text` are dropped, so each call stands
/// on its own. Held switches are kept.
fn transliterate(engine: &mut Engine, text: &str, literal_accents: bool) -> String {
    let mut field = TextField::new();

    for ch in text.chars() {
        let accent = MarkKey::from_trigger_char(ch).filter(|_| !literal_accents);
        let key = if let Some(mark) = accent {
            PanelKey::Accent(mark)
        } else if ch == ' ' {
            PanelKey::Space
        } else if engine.tables().maps(lower_char(ch)) {
            if ch != lower_char(ch) && !engine.is_case_active() {
                engine.toggle_latch(Switch::Case);
            }
            PanelKey::Standard(ch)
        } else {
            let mut buf = [0u8; 4];
            engine.insert(&mut field, ch.encode_utf8(&mut buf));
            continue;
        };
        engine.press_virtual(&mut field, key);
    }

    engine.clear_latches();
    field.text()
}

fn print_tables(settings: &Settings) {
    let tables = settings.build_tables();

    println!("[primary]");
    for (source, glyph) in tables.primary.iter() {
        println!("{} = {}", source, glyph);
    }
    println!();
    println!("[alternate]");
    for (source, glyph) in tables.alternate.iter() {
        println!("{} = {}", source, glyph);
    }
    println!();
    println!("[accentable]");
    println!("{}", tables.accentable.iter().collect::<Vec<_>>().join(" "));
}

fn check_config(settings: &Settings) {
    let config = settings.engine_config();
    match settings.source_path() {
        Some(path) => println!("Configuration is valid: {}", path.display()),
        None => println!("Configuration is valid (built-in)"),
    }
    println!(
        "  {} primary, {} alternate, {} accentable glyphs",
        config.tables.primary.len(),
        config.tables.alternate.len(),
        config.tables.accentable.len()
    );
    println!(
        "  {} dead keys, {} trigger codes",
        config.triggers.dead_keys().count(),
        config.triggers.codes().count()
    );
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    let level = if args.verbose {
        log::LevelFilter::Debug
    } else {
        log::LevelFilter::Warn
    };
    env_logger::Builder::from_default_env()
        .filter_level(level)
        .init();

    if args.print_default_config {
        print!("{}", default_settings_content());
        return Ok(());
    }

    let settings = load_settings(&args)?;

    if args.check_config {
        check_config(&settings);
        return Ok(());
    }

    if args.table {
        print_tables(&settings);
        return Ok(());
    }

    let mut engine = build_engine(&settings, &args);

    if !args.text.is_empty() {
        let text = args.text.join(" ");
        println!("{}", transliterate(&mut engine, &text, args.literal_accents));
        return Ok(());
    }

    let stdin = io::stdin();
    let mut stdout = io::stdout().lock();
    for line in stdin.lock().lines() {
        let line = line.context("failed to read stdin")?;
        writeln!(stdout, "{}", transliterate(&mut engine, &line, args.literal_accents))?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn engine() -> Engine {
        Engine::builtin()
    }

    #[test]
    fn test_args_parsing() {
        let args = Args::parse_from(["chirilica", "--config", "/tmp/test.toml", "salut"]);

        assert_eq!(args.config, Some(PathBuf::from("/tmp/test.toml")));
        assert_eq!(args.text, vec!["salut".to_string()]);
        assert!(!args.upper);
        assert!(!args.alternate);
        assert!(!args.verbose);
        assert!(!args.check_config);
        assert!(!args.table);
    }

    #[test]
    fn test_args_with_options() {
        let args = Args::parse_from(["chirilica", "-u", "-a", "--literal-accents", "a", "b"]);
        assert!(args.upper);
        assert!(args.alternate);
        assert!(args.literal_accents);
        assert_eq!(args.text.len(), 2);
    }

    #[test]
    fn test_transliterate_words() {
        assert_eq!(transliterate(&mut engine(), "bine ai venit", false), "бинє аи вєнит");
    }

    #[test]
    fn test_transliterate_keeps_case_per_letter() {
        assert_eq!(transliterate(&mut engine(), "Ion Ș", false), "Иѡн Ш");
    }

    #[test]
    fn test_transliterate_accents_either_side() {
        let mut engine = engine();
        assert_eq!(transliterate(&mut engine, "a'", false), "а\u{0301}");
        assert_eq!(transliterate(&mut engine, "`e", false), "є\u{0300}");
        assert_eq!(engine.active_diacritic(), None);
    }

    #[test]
    fn test_unspent_accent_does_not_leak_into_next_line() {
        let mut engine = engine();
        assert_eq!(transliterate(&mut engine, "n'", false), "н");
        assert_eq!(engine.active_diacritic(), None);
        assert_eq!(transliterate(&mut engine, "a", false), "а");
    }

    #[test]
    fn test_held_switches_survive_between_lines() {
        let settings = Settings::new();
        let args = Args::parse_from(["chirilica", "-u"]);
        let mut engine = build_engine(&settings, &args);
        assert_eq!(transliterate(&mut engine, "da", false), "ДА");
        assert_eq!(transliterate(&mut engine, "nu", false), "НꙊ");
    }

    #[test]
    fn test_transliterate_literal_accents() {
        assert_eq!(transliterate(&mut engine(), "a'", true), "а'");
    }

    #[test]
    fn test_transliterate_passes_other_text() {
        assert_eq!(transliterate(&mut engine(), "2 + 2, ok?", false), "2 + 2, ѡк?");
    }

    #[test]
    fn test_held_switches() {
        let settings = Settings::new();
        let args = Args::parse_from(["chirilica", "-u", "-a"]);
        let mut engine = build_engine(&settings, &args);
        assert_eq!(transliterate(&mut engine, "tot", false), "ѲОѲ");
        assert!(engine.is_case_active());
    }
}
