use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result, bail};
use clap::{Parser, Subcommand};
use tax_ai::{GeminiAssistant, GeminiConfig};
use tax_core::store::MemoryStoreFactory;
use tax_core::validation::validate_section;
use tax_core::{
    AssistantService, Section, StoreRegistry, TaxDataStore, WizardError, WizardSession,
};
use tax_db_sqlite::SqliteStoreFactory;
use tracing::{debug, info, warn};

use crate::config::AppConfig;
use crate::{export, render};

pub const EXAMPLE_FAILED: &str =
    "Beispieldaten konnten nicht geladen werden. Bitte versuchen Sie es erneut.";

/// One wizard command. Used both as CLI subcommand and as a shell line.
#[derive(Debug, Clone, PartialEq, Eq, Subcommand)]
pub enum Command {
    /// Show progress for the active tax year.
    Status,
    /// Switch to another tax year (2022, 2023 or 2024).
    Year { year: i32 },
    /// Leave the intro screen and begin entering data.
    Start,
    /// Submit one section from a JSON file, or `-` for stdin.
    Submit {
        /// personalData, income, expenses, insurances or householdServices.
        section: String,
        source: String,
    },
    /// Jump to a step (1-5 sections, 6 summary).
    Goto { step: u8 },
    Next,
    Previous,
    /// Discard the active year's data and start over.
    Restart,
    /// Show or hide the help panel.
    ToggleHelp,
    /// Replace the declaration with AI-generated example data.
    Example,
    /// Play the guided tour with demo data.
    Tour,
    /// Ask the assistant to explain a tax term.
    Explain {
        #[arg(required = true, num_args = 1..)]
        topic: Vec<String>,
    },
    /// Ask the assistant for suggestions on one section.
    Suggest { section: String },
    /// Print the summary, optionally exporting it as CSV.
    Summary {
        /// Target file, or a directory to use the default file name.
        #[arg(long)]
        csv: Option<PathBuf>,
    },
}

#[derive(Debug, Parser)]
#[command(no_binary_name = true, disable_help_subcommand = true)]
struct ShellLine {
    #[command(subcommand)]
    command: Command,
}

/// Parse one interactive line. Blank lines yield `None`.
pub fn parse_shell_line(line: &str) -> Result<Option<Command>, clap::Error> {
    let words: Vec<&str> = line.split_whitespace().collect();
    if words.is_empty() {
        return Ok(None);
    }
    ShellLine::try_parse_from(words).map(|parsed| Some(parsed.command))
}

// ─── wiring ──────────────────────────────────────────────────────────────────

/// Build a [`StoreRegistry`] with every backend compiled into this binary.
pub fn build_registry() -> StoreRegistry {
    let mut registry = StoreRegistry::new();
    registry.register(Box::new(MemoryStoreFactory));
    registry.register(Box::new(SqliteStoreFactory));
    registry
}

pub fn build_assistant(config: &GeminiConfig) -> Result<AssistantService> {
    let gemini = GeminiAssistant::new(config.clone()).context("cannot set up AI client")?;
    if !gemini.is_configured() {
        info!("no API key configured; assistant answers with fixed messages");
    }
    Ok(AssistantService::new(Arc::new(gemini)))
}

pub async fn open_session(
    config: &AppConfig,
    year: i32,
) -> Result<WizardSession> {
    let store_config = config.store_config();
    debug!("connecting to {} backend", store_config.backend);

    let store: Arc<dyn TaxDataStore> = Arc::from(
        build_registry()
            .create(&store_config)
            .await
            .with_context(|| format!("cannot open '{}' store", store_config.backend))?,
    );
    let assistant = build_assistant(&config.ai)?;

    Ok(WizardSession::open(store, assistant, year).await?)
}

// ─── commands ────────────────────────────────────────────────────────────────

fn parse_section(name: &str) -> Result<Section> {
    Section::parse(name).ok_or_else(|| WizardError::InvalidSection(name.to_string()).into())
}

fn moved(
    session: &WizardSession,
    accepted: bool,
) -> String {
    if accepted {
        render::status(session.state())
    } else {
        format!(
            "Dieser Schritt ist gerade nicht möglich (aktuell Schritt {}).\n",
            session.current_step()
        )
    }
}

/// Run `command` against `session` and return the text to show.
pub async fn execute(
    session: &mut WizardSession,
    command: Command,
) -> Result<String> {
    match command {
        Command::Status => Ok(render::status(session.state())),

        Command::Year { year } => {
            session.select_year(year).await?;
            Ok(render::status(session.state()))
        }

        Command::Start => {
            session.dismiss_intro();
            Ok(render::status(session.state()))
        }

        Command::Submit { section, source } => {
            let parsed = parse_section(&section)?;
            let data = export::read_section_from(parsed, &source)?;
            if let Err(errors) = validate_section(&data) {
                let details: Vec<String> = errors.errors.iter().map(ToString::to_string).collect();
                bail!("{errors}:\n  {}", details.join("\n  "));
            }
            session.submit_section(&section, data).await?;
            Ok(render::status(session.state()))
        }

        Command::Goto { step } => {
            let accepted = session.go_to_step(step);
            Ok(moved(session, accepted))
        }

        Command::Next => {
            let accepted = session.next();
            Ok(moved(session, accepted))
        }

        Command::Previous => {
            let accepted = session.previous();
            Ok(moved(session, accepted))
        }

        Command::Restart => {
            session.restart().await;
            Ok(render::status(session.state()))
        }

        Command::ToggleHelp => {
            session.toggle_help();
            Ok(if session.state().show_help {
                "Hilfe eingeblendet.\n".to_string()
            } else {
                "Hilfe ausgeblendet.\n".to_string()
            })
        }

        Command::Example => match session.request_example_data().await {
            Ok(()) => Ok(render::status(session.state())),
            Err(WizardError::Ai(error)) => {
                warn!(%error, "example data unavailable");
                Ok(format!("{EXAMPLE_FAILED}\n"))
            }
            Err(other) => Err(other.into()),
        },

        Command::Tour => {
            let mut out = String::new();
            session.tour().start().await;
            loop {
                let Some(step) = session.tour().current() else {
                    break;
                };
                out.push_str(&render::tour_step(session.state().tour_step, step));
                session.tour().advance().await?;
            }
            out.push_str(&render::summary(&session.summary()));
            Ok(out)
        }

        Command::Explain { topic } => {
            let text = session.assistant().explain(&topic.join(" ")).await;
            Ok(format!("{text}\n"))
        }

        Command::Suggest { section } => {
            let parsed = parse_section(&section)?;
            let data = session.tax_data().section(parsed);
            let text = session
                .assistant()
                .suggestions(&data, session.tax_year())
                .await;
            if text.is_empty() {
                Ok("Keine Vorschläge verfügbar.\n".to_string())
            } else {
                Ok(format!("{text}\n"))
            }
        }

        Command::Summary { csv } => {
            let summary = session.summary();
            let mut out = render::summary(&summary);
            if let Some(target) = csv {
                let path = export::export_summary_csv(&summary, &target)?;
                info!(path = %path.display(), "summary exported");
                out.push_str(&format!("Exportiert nach {}\n", path.display()));
            }
            Ok(out)
        }
    }
}
