use anyhow::{Context, Result, bail};
use brokee_ingest::{
    ImportStats, InMemoryText, PlainTextFile, StatementImporter, TextSource, TransactionRecord,
    line_parser::{parse_line, try_parse_line},
};
use brokee_ledger::{ImportReport, ImportService, ImportSummary, MemoryCategories, MemoryLedger};
use clap::{Parser, Subcommand};
use std::io::{self, Read};
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;

mod config;
mod output;
mod state;

use config::Config;
use output::Format;

#[derive(Parser, Debug)]
#[command(
    name = "brokee",
    version,
    about = "Bank statement ingestion for the brokee finance tracker"
)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Parse extracted statement text files and print the transactions
    Parse {
        /// Statement text files (`-` reads stdin)
        #[arg(required = true)]
        files: Vec<PathBuf>,

        /// Output format (defaults to config output.format)
        #[arg(long, value_enum)]
        format: Option<Format>,

        /// Print per-file line counts to stderr
        #[arg(long)]
        stats: bool,
    },

    /// Import a statement into an in-memory ledger and print the entries
    Import {
        /// Statement text file (`-` reads stdin)
        file: PathBuf,

        /// User subject to file entries under (defaults to config import.default_user)
        #[arg(long)]
        user: Option<String>,

        #[arg(long, value_enum)]
        format: Option<Format>,
    },

    /// Show how a single statement line is read
    CheckLine {
        line: String,
    },

    /// Manage ~/.brokee/config.toml
    Config {
        #[command(subcommand)]
        command: ConfigCommand,
    },
}

impl Command {
    /// Whether the command reads settings a default config cannot stand in for.
    fn needs_config(&self) -> bool {
        matches!(
            self,
            Command::Import { .. }
                | Command::Config {
                    command: ConfigCommand::Show
                }
        )
    }
}

#[derive(Subcommand, Debug)]
enum ConfigCommand {
    /// Write a default config file if none exists
    Init,
    /// Print the effective config
    Show,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let loaded = config::load_config();
    init_logging(loaded.as_ref().ok());
    let cfg = config::resolve(loaded, cli.command.needs_config())?;

    match cli.command {
        Command::Parse {
            files,
            format,
            stats,
        } => {
            let format = format.unwrap_or(cfg.output.format);
            let parsed = parse_files(files).await?;

            if stats {
                for (name, _, file_stats) in &parsed {
                    eprintln!(
                        "{}: {} lines, {} transactions, {} skipped",
                        name, file_stats.lines, file_stats.matched, file_stats.skipped
                    );
                }
            }
            let batches: Vec<_> = parsed
                .iter()
                .map(|(name, records, _)| (name.as_str(), records.as_slice()))
                .collect();
            output::write_record_batches(&mut io::stdout().lock(), &batches, format)?;
        }

        Command::Import { file, user, format } => {
            let format = format.unwrap_or(cfg.output.format);
            let user = user.unwrap_or_else(|| cfg.import.default_user.clone());
            let source = load_source(&file)?;

            let mut svc = ImportService::new(
                MemoryCategories::new(cfg.import.category_name.clone()),
                MemoryLedger::new(),
            );
            let report = svc.import_statement(&user, &source);

            match &report {
                ImportReport::Success { entries, message } => {
                    let mut stdout = io::stdout().lock();
                    output::write_entries(&mut stdout, entries, format)?;
                    if format == Format::Table {
                        output::write_summary(&mut stdout, &ImportSummary::from_entries(entries))?;
                    }
                    eprintln!("{}", message);
                }
                ImportReport::Failure { message } => {
                    bail!("{} ({})", message, file.display());
                }
            }
        }

        Command::CheckLine { line } => check_line(&line),

        Command::Config { command } => match command {
            ConfigCommand::Init => config::init_config()?,
            ConfigCommand::Show => show_config(&cfg)?,
        },
    }

    Ok(())
}

fn init_logging(cfg: Option<&Config>) {
    let level = cfg.map_or("info", |c| c.log.level.as_str());
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(level))
        .unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

/// Text files on disk, or stdin for `-`.
enum Source {
    File(PlainTextFile),
    Stdin(InMemoryText),
}

impl TextSource for Source {
    fn name(&self) -> String {
        match self {
            Source::File(f) => f.name(),
            Source::Stdin(s) => s.name(),
        }
    }

    fn extract_text(&self) -> brokee_ingest::Result<String> {
        match self {
            Source::File(f) => f.extract_text(),
            Source::Stdin(s) => s.extract_text(),
        }
    }
}

fn load_source(path: &Path) -> Result<Source> {
    if path.as_os_str() == "-" {
        let mut text = String::new();
        io::stdin()
            .read_to_string(&mut text)
            .context("read statement from stdin")?;
        return Ok(Source::Stdin(InMemoryText::new("<stdin>", text)));
    }
    if !path.exists() {
        bail!("statement not found: {}", path.display());
    }
    Ok(Source::File(PlainTextFile::new(path)))
}

type ParsedFile = (String, Vec<TransactionRecord>, ImportStats);

/// Statements are independent, so each one is parsed on its own blocking task.
async fn parse_files(files: Vec<PathBuf>) -> Result<Vec<ParsedFile>> {
    tracing::debug!(count = files.len(), "parsing statements");
    let mut handles = Vec::with_capacity(files.len());
    for path in &files {
        let source = load_source(path)?;
        handles.push(tokio::task::spawn_blocking(move || {
            let name = source.name();
            StatementImporter::new()
                .import_with_stats(&source)
                .map(|(records, stats)| (name, records, stats))
        }));
    }

    let mut out = Vec::with_capacity(handles.len());
    for handle in handles {
        let parsed = handle.await.context("statement parser task panicked")??;
        out.push(parsed);
    }
    Ok(out)
}

fn check_line(line: &str) {
    let Some(parsed) = try_parse_line(line) else {
        println!("no match: line is not a transaction row");
        return;
    };

    println!("date token:   {}", parsed.date_token);
    println!("description:  {}", parsed.description);
    println!("sent raw:     {}", parsed.sent_raw);
    println!("received raw: {}", parsed.received_raw);

    match parse_line(line) {
        Some(record) => {
            println!("\ndate:         {}", record.date);
            println!("sent:         {}", record.sent_amount);
            println!("received:     {}", record.received_amount);
        }
        None => println!("\nskipped: date or amount did not normalize"),
    }
}

fn show_config(cfg: &Config) -> Result<()> {
    println!("# {}", config::config_path()?.display());
    print!("{}", toml::to_string_pretty(cfg).context("serialize config")?);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
        assert_eq!(Cli::command().get_version(), Some(env!("CARGO_PKG_VERSION")));
    }

    #[test]
    fn test_only_import_and_show_need_config() {
        let needs = |args: &[&str]| Cli::try_parse_from(args).unwrap().command.needs_config();

        assert!(needs(&["brokee", "import", "aug.txt"]));
        assert!(needs(&["brokee", "config", "show"]));
        assert!(!needs(&["brokee", "config", "init"]));
        assert!(!needs(&["brokee", "parse", "aug.txt"]));
        assert!(!needs(&["brokee", "check-line", "01.08.2025 Shop €1,00 €0,00"]));
    }
}
