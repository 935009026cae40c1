//! Command-line front end for spellseg.
//!
//! Loads a frequency table (a dictionary file, or the embedded one), builds a
//! [`ScratchChecker`] and runs one of the subcommands over its arguments. With
//! no text arguments, `check` reads lines from standard input.

use clap::{Parser, Subcommand};
use env_logger::Builder;
use log::{debug, warn, LevelFilter};
use spellseg::{dictionary, Checker, Config, ScratchChecker};
use std::io::{self, BufRead, Write};
use std::path::PathBuf;
use std::sync::Arc;

#[derive(Parser, Debug)]
#[command(name = "spellseg")]
#[command(about = "Frequency-based spelling correction and word segmentation")]
#[command(version)]
struct Args {
    /// Dictionary file with `word count` lines
    #[arg(short, long, global = true)]
    dictionary: Option<PathBuf>,

    /// Minimum look-ahead for the first piece of a split
    #[arg(long, global = true)]
    lookahead: Option<usize>,

    /// Increase log verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Normalize, segment and correct text
    Check {
        /// Text to check; reads stdin lines when omitted
        text: Vec<String>,
    },
    /// Correct single words
    Correct { words: Vec<String> },
    /// Segment run-on strings without correcting the pieces
    Segment { text: Vec<String> },
    /// List ranked correction candidates for a word
    Suggest {
        word: String,

        /// Maximum number of candidates to print
        #[arg(short, long, default_value_t = 5)]
        limit: usize,
    },
}

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => LevelFilter::Warn,
        1 => LevelFilter::Info,
        2 => LevelFilter::Debug,
        _ => LevelFilter::Trace,
    };

    Builder::new()
        .filter_level(level)
        .format(|buf, record| writeln!(buf, "[{}] {}", record.level(), record.args()))
        .init();
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();
    init_logging(args.verbose);

    let mut config = Config::load()?;

    // Persist the settings so users get a concrete config file on first run.
    if let Err(err) = config.save() {
        warn!("Failed to persist config: {err}");
    }

    if let Some(path) = args.dictionary {
        config.dictionary_path = Some(path);
    }
    if let Some(lookahead) = args.lookahead {
        config.lookahead = lookahead;
    }
    debug!("{:?}", config);

    let table = match &config.dictionary_path {
        Some(path) => dictionary::load_path(path)?,
        None => dictionary::builtin()?,
    };
    let checker = ScratchChecker::new_with_config(Arc::new(table), &config);

    let stdout = io::stdout();
    let mut out = stdout.lock();

    match args.command {
        Command::Check { text } => {
            if text.is_empty() {
                for line in io::stdin().lock().lines() {
                    let line = line?;
                    check_line(&checker, &config, &line, &mut out)?;
                }
            } else {
                for line in &text {
                    check_line(&checker, &config, line, &mut out)?;
                }
            }
        }
        Command::Correct { words } => {
            for word in &words {
                config.check_length(word)?;
                writeln!(out, "{}", checker.corrector().correction(word))?;
            }
        }
        Command::Segment { text } => {
            for line in &text {
                config.check_length(line)?;
                writeln!(out, "{}", checker.segmentor().segment(line).join(" "))?;
            }
        }
        Command::Suggest { word, limit } => {
            config.check_length(&word)?;
            for (candidate, p) in checker.corrector().suggestions(&word, limit) {
                match p.value() {
                    Some(p) => writeln!(out, "{candidate}\t{p:.6}")?,
                    None => writeln!(out, "{candidate}\t-")?,
                }
            }
        }
    }

    Ok(())
}

fn check_line(
    checker: &ScratchChecker,
    config: &Config,
    line: &str,
    out: &mut impl Write,
) -> Result<(), Box<dyn std::error::Error>> {
    for token in line.split_whitespace() {
        config.check_length(token)?;
    }
    writeln!(out, "{}", checker.check(line).join(" "))?;
    Ok(())
}
