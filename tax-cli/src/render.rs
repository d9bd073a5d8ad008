//! Plain-text views of the wizard for the terminal.

use std::fmt::Write;

use rust_decimal::Decimal;
use tax_core::calculations::common::round_cents;
use tax_core::wizard::{SUMMARY_STEP, TourStep};
use tax_core::{DeclarationSummary, Section, WizardState};

fn step_title(step: u8) -> &'static str {
    Section::from_step(step)
        .map(|section| section.title())
        .unwrap_or("Zusammenfassung")
}

fn euro(amount: Decimal) -> String {
    let mut cents = round_cents(amount);
    cents.rescale(2);
    format!("{cents} €")
}

/// Progress overview: year, current step and which sections hold data.
pub fn status(state: &WizardState) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "Steuerjahr {}", state.tax_year);
    let _ = writeln!(
        out,
        "Schritt {}/{}: {}",
        state.current_step,
        SUMMARY_STEP,
        step_title(state.current_step)
    );

    for section in Section::ALL {
        let mark = if state.tax_data.is_section_complete(section) {
            "x"
        } else {
            " "
        };
        let _ = writeln!(out, "  [{mark}] {}. {}", section.step(), section.title());
    }

    if state.show_intro {
        let _ = writeln!(out, "Willkommen! Mit `start` beginnen Sie die Erfassung.");
    }
    if state.is_tour_active() {
        let _ = writeln!(out, "Geführte Tour läuft (Schritt {}).", state.tour_step);
    }
    out
}

pub fn summary(summary: &DeclarationSummary) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "Zusammenfassung Steuerjahr {}", summary.tax_year);
    if let Some(name) = summary.full_name() {
        let _ = writeln!(out, "{name}");
    }

    let width = summary
        .rows()
        .iter()
        .map(|(label, _)| label.chars().count())
        .max()
        .unwrap_or(0);
    for (label, amount) in summary.rows() {
        let _ = writeln!(out, "  {label:<width$}  {:>14}", euro(amount));
    }
    out
}

pub fn tour_step(
    position: u8,
    step: &TourStep,
) -> String {
    format!(
        "[Tour {position}] {}\n{}\n→ {}\n",
        step.title, step.explanation, step.button_text
    )
}
