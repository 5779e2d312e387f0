//! wordcount CLI
//!
//! Loads a text file into a word counter, then answers count queries.
//!
//! # Usage
//!
//! ```bash
//! # Query words given on the command line
//! wordcount --file book.txt the whale
//!
//! # One query per stdin line, JSON answers
//! printf 'the\nwhale\n' | wordcount --file book.txt --json
//!
//! # Settings from a config file
//! wordcount --config wordcount.toml ishmael
//! ```

use std::io::{self, BufRead, Write};
use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};
use wordcount::{serve, Config};

/// Count words in a text file and answer count queries
#[derive(Parser)]
#[command(name = "wordcount")]
#[command(version)]
#[command(about, long_about = None)]
struct Cli {
    /// Verbosity level (-v, -vv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Configuration file path
    #[arg(short, long, env = "WORDCOUNT_CONFIG")]
    config: Option<PathBuf>,

    /// Text file to ingest (overrides the config file)
    #[arg(short, long, env = "WORDCOUNT_FILE")]
    file: Option<PathBuf>,

    /// Log level when RUST_LOG is unset (overrides the config file)
    #[arg(long)]
    log_level: Option<String>,

    /// Print answers as JSON objects
    #[arg(long)]
    json: bool,

    /// Words to look up; read one per line from stdin when omitted
    words: Vec<String>,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let mut config = match &cli.config {
        Some(path) => Config::load(path)
            .with_context(|| format!("loading config from {}", path.display()))?,
        None => Config::default(),
    };
    if let Some(file) = cli.file {
        config.file_path = Some(file);
    }
    if let Some(level) = cli.log_level {
        config.log_level = level;
    }

    // Setup logging
    let log_level = match cli.verbose {
        0 => config.log_level.as_str(),
        1 => "debug",
        _ => "trace",
    };
    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(io::stderr))
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(log_level)))
        .init();

    let counter = serve::load(&config);

    let stdout = io::stdout();
    let mut out = stdout.lock();
    if cli.words.is_empty() {
        for line in io::stdin().lock().lines() {
            let line = line.context("reading query from stdin")?;
            let word = line.trim();
            if word.is_empty() {
                continue;
            }
            serve::answer(&mut out, &counter, word, cli.json)?;
        }
    } else {
        for word in &cli.words {
            serve::answer(&mut out, &counter, word, cli.json)?;
        }
    }
    out.flush()?;
    Ok(())
}
