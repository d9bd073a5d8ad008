use std::io::Write;
use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use tax_cli::app::{self, Command};
use tax_cli::config::AppConfig;
use tax_cli::logging;
use tax_core::WizardSession;
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::{debug, error};

// ─── CLI definition ──────────────────────────────────────────────────────────

/// Step-by-step German income tax declaration.
///
/// Runs a single command, or an interactive shell when no command is given.
#[derive(Debug, Parser)]
#[command(name = "steuer-wizard", version)]
struct Cli {
    /// TOML configuration file.
    #[arg(long, short)]
    config: Option<PathBuf>,

    /// Storage backend (`sqlite` or `memory`).
    #[arg(long)]
    backend: Option<String>,

    /// Storage connection string.
    /// For SQLite this is a file path (e.g. `steuer.db`) or `:memory:`.
    #[arg(long)]
    db: Option<String>,

    /// Tax year to work on.
    #[arg(long)]
    year: Option<i32>,

    /// Gemini API key; defaults to GEMINI_API_KEY / API_KEY.
    #[arg(long)]
    api_key: Option<String>,

    /// Log filter, e.g. `info` or `warn,tax_core=debug`.
    #[arg(long)]
    log_level: Option<String>,

    /// Append log output to this file.
    #[arg(long)]
    log_file: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Command>,
}

impl Cli {
    fn into_config(self) -> anyhow::Result<(AppConfig, Option<Command>)> {
        let mut config = AppConfig::load(self.config.as_deref())?;
        if let Some(backend) = self.backend {
            config.store.backend = backend;
        }
        if let Some(db) = self.db {
            config.store.connection_string = db;
        }
        if let Some(year) = self.year {
            config.wizard.default_year = year;
        }
        if let Some(key) = self.api_key {
            config.ai.api_key = Some(key);
        }
        if let Some(level) = self.log_level {
            config.logging.level = level;
        }
        if let Some(file) = self.log_file {
            config.logging.file = Some(file);
        }
        config.apply_env(|var| std::env::var(var).ok());
        config.validate()?;
        Ok((config, self.command))
    }
}

// ─── interactive shell ───────────────────────────────────────────────────────

async fn run_shell(session: &mut WizardSession) -> anyhow::Result<()> {
    println!("{}", tax_cli::render::status(session.state()));
    println!("Befehle: status, start, submit, goto, next, previous, restart, example, tour, explain, suggest, summary, exit");

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    loop {
        print!("> ");
        std::io::stdout().flush().context("cannot write to stdout")?;

        let Some(line) = lines.next_line().await.context("cannot read stdin")? else {
            break;
        };
        if matches!(line.trim(), "exit" | "quit") {
            break;
        }

        match app::parse_shell_line(&line) {
            Ok(None) => {}
            Ok(Some(command)) => match app::execute(session, command).await {
                Ok(output) => print!("{output}"),
                Err(e) => eprintln!("Fehler: {e:#}"),
            },
            Err(e) => eprintln!("{e}"),
        }
    }
    Ok(())
}

// ─── entry point ─────────────────────────────────────────────────────────────

async fn run(cli: Cli) -> anyhow::Result<()> {
    let (config, command) = cli.into_config()?;
    logging::init_logging(&config.logging.level, config.logging.file.as_deref())?;
    debug!(store = ?config.store, year = config.wizard.default_year, "configuration loaded");

    let mut session = app::open_session(&config, config.wizard.default_year).await?;

    match command {
        Some(command) => {
            let output = app::execute(&mut session, command).await?;
            print!("{output}");
        }
        None => run_shell(&mut session).await?,
    }
    Ok(())
}

#[tokio::main]
async fn main() -> std::process::ExitCode {
    let cli = Cli::parse();

    match run(cli).await {
        Ok(()) => std::process::ExitCode::SUCCESS,
        Err(e) => {
            error!("{e:#}");
            eprintln!("Fehler: {e:#}");
            std::process::ExitCode::FAILURE
        }
    }
}
