//! thinslider-demo - a column of thin sliders in the terminal.
//!
//! Usage:
//!   thinslider-demo [--config sliders.toml] [--log-file demo.log] [--log-level debug] [--json]

use clap::{Parser, ValueEnum};
use simplelog::{Config, LevelFilter, WriteLogger};
use std::fs::File;
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use thinslider_terminal::{run, DemoConfig, SliderApp, TuiError};

/// Interactive thin block-glyph sliders
#[derive(Parser, Debug)]
#[command(name = "thinslider-demo", version, about)]
struct Cli {
    /// TOML file describing the sliders (built-in set when absent)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Write logs to this file; the terminal itself is the UI
    #[arg(long)]
    log_file: Option<PathBuf>,

    /// Log verbosity
    #[arg(long, value_enum, default_value_t = LogLevel::Info)]
    log_level: LogLevel,

    /// Print the final slider values as JSON on exit
    #[arg(long)]
    json: bool,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
enum LogLevel {
    Off,
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl From<LogLevel> for LevelFilter {
    fn from(level: LogLevel) -> Self {
        match level {
            LogLevel::Off => Self::Off,
            LogLevel::Error => Self::Error,
            LogLevel::Warn => Self::Warn,
            LogLevel::Info => Self::Info,
            LogLevel::Debug => Self::Debug,
            LogLevel::Trace => Self::Trace,
        }
    }
}

fn init_logging(path: &Path, level: LevelFilter) -> Result<(), TuiError> {
    let log_file = File::create(path).map_err(|source| TuiError::LogFile {
        path: path.to_path_buf(),
        source,
    })?;
    WriteLogger::init(level, Config::default(), log_file)?;
    Ok(())
}

fn try_main(cli: &Cli) -> Result<(), TuiError> {
    if let Some(path) = &cli.log_file {
        init_logging(path, cli.log_level.into())?;
    }

    let config = match &cli.config {
        Some(path) => DemoConfig::load(path)?,
        None => DemoConfig::default(),
    };

    let mut app = SliderApp::from_config(&config)?;
    run(&mut app, &config)?;

    if cli.json {
        println!("{}", serde_json::to_string_pretty(&app.values())?);
    }
    Ok(())
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    match try_main(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("thinslider-demo: {e}");
            ExitCode::FAILURE
        }
    }
}
