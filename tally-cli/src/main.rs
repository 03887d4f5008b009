use anyhow::{Context, Result, bail};
use chrono::{DateTime, Utc};
use chrono_tz::Tz;
use clap::{Parser, Subcommand};
use std::fs;
use std::path::PathBuf;
use tally_core::{ParsedTransaction, Vocabulary};
use tally_parse::Extractor;
use tracing::{debug, info};

mod config;
mod export;
mod log;
mod state;

#[derive(Parser, Debug)]
#[command(name = "tally", version, about = "Offline bookkeeping entry parser")]
struct Cli {
    /// Print debug logs to stderr
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(clap::Args, Debug)]
struct ClockArgs {
    /// Reference time as "YYYY-MM-DD HH:MM" (default: now)
    #[arg(long)]
    now: Option<String>,

    /// IANA timezone (default: from config)
    #[arg(long)]
    tz: Option<String>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Parse one utterance, e.g. `tally parse 昨天中午吃饭30`
    Parse {
        text: String,

        #[command(flatten)]
        clock: ClockArgs,

        /// Print the record as JSON
        #[arg(long)]
        json: bool,
    },

    /// Parse one utterance per line and export the records as CSV
    Batch {
        file: PathBuf,

        #[command(flatten)]
        clock: ClockArgs,

        /// Output CSV path (default: stdout)
        #[arg(long)]
        out: Option<PathBuf>,
    },

    /// Print the active keyword tables
    Vocab {
        /// Print as JSON instead of TOML
        #[arg(long)]
        json: bool,
    },

    /// Manage ~/.tally/config.toml
    Config {
        #[command(subcommand)]
        command: ConfigCommand,
    },
}

#[derive(Subcommand, Debug)]
enum ConfigCommand {
    /// Write the default config if none exists
    Init,
    /// Print the effective config
    Show,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    log::init_logging(cli.verbose);

    match cli.command {
        Command::Config { command } => match command {
            ConfigCommand::Init => config::init_config()?,
            ConfigCommand::Show => config::show_config()?,
        },

        Command::Vocab { json } => {
            let cfg = config::load_config()?;
            let vocab = cfg.load_vocabulary()?;
            let vocab = vocab.as_ref().unwrap_or(Vocabulary::builtin());
            if json {
                println!("{}", serde_json::to_string_pretty(vocab)?);
            } else {
                print!("{}", vocab.to_toml_string()?);
            }
        }

        Command::Parse { text, clock, json } => {
            let cfg = config::load_config()?;
            let vocab = cfg.load_vocabulary()?;
            let extractor = Extractor::new(vocab.as_ref().unwrap_or(Vocabulary::builtin()))?;
            let now = reference_now(&clock, &cfg.parser.timezone)?;

            let Some(txn) = extractor.parse(&text, &now) else {
                eprintln!("could not detect an amount in: {text}");
                std::process::exit(1);
            };

            if json {
                println!("{}", serde_json::to_string_pretty(&txn)?);
            } else {
                print_record(&txn);
            }
        }

        Command::Batch { file, clock, out } => {
            let cfg = config::load_config()?;
            let vocab = cfg.load_vocabulary()?;
            let extractor = Extractor::new(vocab.as_ref().unwrap_or(Vocabulary::builtin()))?;
            let now = reference_now(&clock, &cfg.parser.timezone)?;

            if !file.exists() {
                bail!("input not found: {}", file.display());
            }
            let input = fs::read_to_string(&file).with_context(|| format!("read {}", file.display()))?;

            let mut records = Vec::new();
            let mut skipped = 0usize;
            for line in input.lines().map(str::trim).filter(|l| !l.is_empty()) {
                match extractor.parse(line, &now) {
                    Some(txn) => records.push((line.to_string(), txn)),
                    None => {
                        debug!(line, "skipped");
                        skipped += 1;
                    }
                }
            }

            match out {
                Some(path) => {
                    let f = fs::File::create(&path).with_context(|| format!("create {}", path.display()))?;
                    export::write_csv(f, &records)?;
                    info!(path = %path.display(), "wrote csv");
                    eprintln!("Wrote {} records to {}", records.len(), path.display());
                }
                None => export::write_csv(std::io::stdout().lock(), &records)?,
            }

            if skipped > 0 {
                eprintln!("{skipped} line(s) had no recognizable amount");
            }
        }
    }

    Ok(())
}

/// The only place the system clock is read.
fn reference_now(clock: &ClockArgs, default_tz: &str) -> Result<DateTime<Tz>> {
    let tz_name = clock.tz.as_deref().unwrap_or(default_tz);
    match &clock.now {
        Some(local) => tally_core::parse_local_datetime(local, tz_name),
        None => {
            let tz = tally_core::parse_timezone(tz_name)?;
            Ok(Utc::now().with_timezone(&tz))
        }
    }
}

fn print_record(txn: &ParsedTransaction) {
    println!("type:        {}", txn.kind.label());
    println!("amount:      {}", txn.signed_amount());
    println!("category:    {}", txn.category);
    println!("description: {}", txn.description);
    match &txn.time_label {
        Some(label) => println!("time:        {} ({label})", txn.timestamp.format("%Y-%m-%d %H:%M")),
        None => println!("time:        {}", txn.timestamp.format("%Y-%m-%d %H:%M")),
    }
}
