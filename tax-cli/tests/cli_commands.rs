use std::path::PathBuf;

use pretty_assertions::assert_eq;
use rust_decimal_macros::dec;
use tax_cli::app::{self, Command, EXAMPLE_FAILED};
use tax_cli::config::{AppConfig, StoreSection};
use tax_core::WizardSession;
use tax_core::ai::service::EXPLANATION_UNAVAILABLE;
use tax_core::wizard::tour_script;

// =============================================================================
// Helpers
// =============================================================================

fn fixture(name: &str) -> String {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
        .join(name)
        .to_string_lossy()
        .into_owned()
}

/// Memory backend, no API key.
fn offline_config() -> AppConfig {
    AppConfig {
        store: StoreSection {
            backend: "memory".to_string(),
            connection_string: String::new(),
        },
        ..Default::default()
    }
}

async fn session() -> WizardSession {
    app::open_session(&offline_config(), 2024)
        .await
        .expect("memory session should open")
}

async fn run(
    session: &mut WizardSession,
    line: &str,
) -> anyhow::Result<String> {
    let command = app::parse_shell_line(line)?.expect("non-blank command line");
    app::execute(session, command).await
}

// =============================================================================
// Sections
// =============================================================================

#[tokio::test]
async fn submit_from_file_completes_the_section() {
    let mut session = session().await;
    run(&mut session, "start").await.unwrap();

    let out = run(
        &mut session,
        &format!("submit personalData {}", fixture("personal_data.json")),
    )
    .await
    .unwrap();

    assert!(out.contains("Schritt 2/6: Einnahmen"), "{out}");
    assert!(out.contains("[x] 1. Persönliche Daten"), "{out}");
    assert_eq!(
        session.tax_data().personal_data.last_name.as_deref(),
        Some("Mustermann")
    );
}

#[tokio::test]
async fn submitted_amounts_keep_their_precision() {
    let mut session = session().await;

    run(&mut session, &format!("submit income {}", fixture("income.json")))
        .await
        .unwrap();

    assert_eq!(session.tax_data().income.income_tax, Some(dec!(10230.50)));
    assert_eq!(session.summary().gross_salary, dec!(58400));
}

#[tokio::test]
async fn invalid_input_lists_every_failing_field() {
    let mut session = session().await;

    let err = run(
        &mut session,
        &format!("submit personalData {}", fixture("personal_data_invalid.json")),
    )
    .await
    .unwrap_err()
    .to_string();

    assert!(err.starts_with("2 field(s) failed validation"), "{err}");
    assert!(err.contains("lastName: is required"), "{err}");
    assert!(err.contains("postalCode: must be 5 digits"), "{err}");
    assert!(session.tax_data().personal_data.is_empty());
}

#[tokio::test]
async fn input_for_another_section_fails_validation() {
    let mut session = session().await;

    let err = run(
        &mut session,
        &format!("submit income {}", fixture("personal_data.json")),
    )
    .await
    .unwrap_err()
    .to_string();

    assert!(err.starts_with("3 field(s) failed validation"), "{err}");
}

#[tokio::test]
async fn unknown_section_name_is_rejected() {
    let mut session = session().await;

    let err = run(
        &mut session,
        &format!("submit summary {}", fixture("income.json")),
    )
    .await
    .unwrap_err();

    assert!(err.to_string().contains("summary"), "{err}");
}

#[tokio::test]
async fn missing_input_file_is_reported() {
    let mut session = session().await;

    let err = run(&mut session, "submit income /nonexistent/income.json")
        .await
        .unwrap_err();

    assert!(err.to_string().contains("/nonexistent/income.json"), "{err}");
}

// =============================================================================
// Navigation and years
// =============================================================================

#[tokio::test]
async fn forward_jump_past_empty_sections_is_refused() {
    let mut session = session().await;
    run(&mut session, "start").await.unwrap();

    let out = run(&mut session, "goto 3").await.unwrap();

    assert_eq!(
        out,
        "Dieser Schritt ist gerade nicht möglich (aktuell Schritt 1).\n"
    );
    assert_eq!(session.current_step(), 1);
}

#[tokio::test]
async fn next_and_previous_move_one_step() {
    let mut session = session().await;
    run(&mut session, "start").await.unwrap();

    let out = run(&mut session, "next").await.unwrap();
    assert!(out.contains("Schritt 2/6"), "{out}");

    let out = run(&mut session, "previous").await.unwrap();
    assert!(out.contains("Schritt 1/6"), "{out}");

    let out = run(&mut session, "previous").await.unwrap();
    assert!(out.contains("nicht möglich"), "{out}");
}

#[tokio::test]
async fn year_switch_changes_the_active_declaration() {
    let mut session = session().await;

    let out = run(&mut session, "year 2022").await.unwrap();

    assert!(out.starts_with("Steuerjahr 2022\n"), "{out}");
    assert!(run(&mut session, "year 2021").await.is_err());
    assert_eq!(session.tax_year(), 2022);
}

#[tokio::test]
async fn restart_clears_entered_data() {
    let mut session = session().await;
    run(&mut session, &format!("submit income {}", fixture("income.json")))
        .await
        .unwrap();

    let out = run(&mut session, "restart").await.unwrap();

    assert!(out.contains("Willkommen"), "{out}");
    assert!(session.tax_data().income.is_empty());
}

#[tokio::test]
async fn help_panel_toggles() {
    let mut session = session().await;

    assert_eq!(
        run(&mut session, "toggle-help").await.unwrap(),
        "Hilfe eingeblendet.\n"
    );
    assert_eq!(
        run(&mut session, "toggle-help").await.unwrap(),
        "Hilfe ausgeblendet.\n"
    );
}

// =============================================================================
// Guided tour
// =============================================================================

#[tokio::test]
async fn tour_prints_every_step_then_the_summary() {
    let mut session = session().await;

    let out = app::execute(&mut session, Command::Tour).await.unwrap();

    for (index, step) in tour_script().iter().enumerate() {
        let header = format!("[Tour {}] {}", index + 1, step.title);
        assert!(out.contains(&header), "missing '{header}' in:\n{out}");
    }
    assert!(out.contains("Zusammenfassung Steuerjahr 2024"), "{out}");
    assert!(!session.state().is_tour_active());
    assert!(session.tax_data().is_complete());
}

// =============================================================================
// Assistant without API key
// =============================================================================

#[tokio::test]
async fn explain_without_key_answers_with_fixed_message() {
    let mut session = session().await;

    let out = run(&mut session, "explain Entfernungspauschale").await.unwrap();

    assert_eq!(out, format!("{EXPLANATION_UNAVAILABLE}\n"));
}

#[tokio::test]
async fn suggestions_for_empty_section_are_skipped() {
    let mut session = session().await;

    let out = run(&mut session, "suggest expenses").await.unwrap();

    assert_eq!(out, "Keine Vorschläge verfügbar.\n");
}

#[tokio::test]
async fn example_without_key_reports_failure_and_keeps_data() {
    let mut session = session().await;
    run(&mut session, &format!("submit income {}", fixture("income.json")))
        .await
        .unwrap();

    let out = run(&mut session, "example").await.unwrap();

    assert_eq!(out, format!("{EXAMPLE_FAILED}\n"));
    assert_eq!(session.tax_data().income.gross_salary, Some(dec!(58400)));
}

// =============================================================================
// Summary export
// =============================================================================

#[tokio::test]
async fn summary_exports_csv_named_after_the_declaration() {
    let mut session = session().await;
    run(
        &mut session,
        &format!("submit personalData {}", fixture("personal_data.json")),
    )
    .await
    .unwrap();
    run(&mut session, &format!("submit income {}", fixture("income.json")))
        .await
        .unwrap();
    let dir = tempfile::tempdir().unwrap();

    let out = run(
        &mut session,
        &format!("summary --csv {}", dir.path().display()),
    )
    .await
    .unwrap();

    let path = dir.path().join("Steuererklaerung_2024_Mustermann.csv");
    assert!(out.contains("Erika Mustermann"), "{out}");
    assert!(out.contains(&path.display().to_string()), "{out}");

    let csv = std::fs::read_to_string(&path).unwrap();
    let mut lines = csv.lines();
    assert_eq!(lines.next(), Some("steuerjahr,position,betrag"));
    assert_eq!(lines.next(), Some("2024,Bruttoarbeitslohn,58400"));
    assert_eq!(lines.next(), Some("2024,Lohnsteuer,10230.50"));
}
