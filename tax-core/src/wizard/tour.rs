//! Guided tour: a scripted walk through all six steps with demo data.
//!
//! While a tour runs it is the only thing that moves the wizard: the session
//! rejects manual submissions, year switches and navigation until the tour
//! finishes or is exited.

use std::sync::OnceLock;

use rust_decimal_macros::dec;
use tracing::info;

use super::error::WizardError;
use super::gate::{FIRST_STEP, SUMMARY_STEP};
use super::session::WizardSession;
use crate::models::{
    Expenses, HouseholdServices, Income, Insurances, MaritalStatus, PersonalData, Religion,
    SectionData,
};

/// Number of scripted steps; one per wizard step.
pub const TOUR_LENGTH: u8 = SUMMARY_STEP;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TourStep {
    pub title: &'static str,
    pub explanation: &'static str,
    pub button_text: &'static str,
    /// Sections filled in when the user advances past this step.
    pub payload: Vec<SectionData>,
}

/// The fixed tour script, in order.
pub fn tour_script() -> &'static [TourStep] {
    static SCRIPT: OnceLock<Vec<TourStep>> = OnceLock::new();
    SCRIPT.get_or_init(build_script)
}

fn build_script() -> Vec<TourStep> {
    vec![
        TourStep {
            title: "Persönliche Daten",
            explanation: "Zuerst kommen die persönlichen Angaben, mit denen das Finanzamt Sie \
                          zuordnet. Wir tragen die Daten unseres Beispielbürgers Max Mustermann ein.",
            button_text: "Daten ausfüllen & Weiter",
            payload: vec![
                PersonalData {
                    first_name: Some("Max".to_string()),
                    last_name: Some("Mustermann".to_string()),
                    date_of_birth: Some("1985-05-20".to_string()),
                    street: Some("Beispielstraße".to_string()),
                    house_number: Some("123".to_string()),
                    postal_code: Some("10115".to_string()),
                    city: Some("Berlin".to_string()),
                    tax_id: Some("12345678901".to_string()),
                    iban: Some("DE89370400440532013000".to_string()),
                    marital_status: Some(MaritalStatus::Single),
                    religion: Some(Religion::None),
                }
                .into(),
            ],
        },
        TourStep {
            title: "Einnahmen",
            explanation: "Die Einnahmen stehen auf Ihrer Lohnsteuerbescheinigung. Für Max nehmen \
                          wir ein typisches Jahresgehalt an.",
            button_text: "Einnahmen eintragen & Weiter",
            payload: vec![
                Income {
                    gross_salary: Some(dec!(62000)),
                    income_tax: Some(dec!(12500)),
                    solidarity_surcharge: Some(dec!(0)),
                }
                .into(),
            ],
        },
        TourStep {
            title: "Ausgaben (Werbungskosten)",
            explanation: "Berufsbedingte Kosten mindern die Steuer. Max pendelt zur Arbeit und \
                          arbeitet an einigen Tagen im Homeoffice, damit nutzt er beide Pauschalen.",
            button_text: "Ausgaben eintragen & Weiter",
            payload: vec![
                Expenses {
                    commute_days: Some(220),
                    commute_distance: Some(dec!(18)),
                    home_office_days: Some(50),
                    work_equipment: Some(dec!(150)),
                    training_costs: Some(dec!(0)),
                    application_costs: Some(dec!(0)),
                    work_related_travel: Some(dec!(0)),
                    account_fees: Some(dec!(16)),
                }
                .into(),
            ],
        },
        TourStep {
            title: "Vorsorgeaufwendungen",
            explanation: "Versicherungsbeiträge senken die Steuerlast. Wir tragen Max' Kranken- \
                          und Haftpflichtversicherung ein.",
            button_text: "Vorsorge eintragen & Weiter",
            payload: vec![
                Insurances {
                    health_insurance: Some(dec!(5500)),
                    liability_insurance: Some(dec!(85)),
                }
                .into(),
            ],
        },
        TourStep {
            title: "Haushaltsnahe Ausgaben",
            explanation: "Auch Hilfe im Haushalt ist absetzbar. Wir ergänzen eine Rechnung für \
                          eine Fensterreinigung.",
            button_text: "Haushalt eintragen & Weiter",
            payload: vec![
                HouseholdServices {
                    services: Some(dec!(250)),
                    tradesmen: Some(dec!(0)),
                }
                .into(),
            ],
        },
        TourStep {
            title: "Zusammenfassung",
            explanation: "Alle Daten sind erfasst. Hier sehen Sie die komplette Übersicht der \
                          Steuererklärung von Max Mustermann.",
            button_text: "Tour beenden",
            payload: Vec::new(),
        },
    ]
}

/// Drives a [`WizardSession`] through the tour script.
pub struct TourEngine<'s> {
    session: &'s mut WizardSession,
}

impl<'s> TourEngine<'s> {
    pub(super) fn new(session: &'s mut WizardSession) -> Self {
        Self { session }
    }

    pub fn is_active(&self) -> bool {
        self.session.state.is_tour_active()
    }

    /// Script entry for the current tour position, if a tour is running.
    pub fn current(&self) -> Option<&'static TourStep> {
        match self.session.state.tour_step {
            0 => None,
            step => tour_script().get(usize::from(step - 1)),
        }
    }

    /// Restart the wizard and begin the tour at its first step. A pending
    /// example request is abandoned.
    pub async fn start(&mut self) {
        self.session.drop_pending_example();
        self.session.restart().await;

        let state = &mut self.session.state;
        state.tour_step = 1;
        state.current_step = FIRST_STEP;
        state.show_intro = false;
        info!("guided tour started");
    }

    /// Apply the current step's demo data and move to the next step; past the
    /// last step the tour ends and the wizard stays on the summary.
    pub async fn advance(&mut self) -> Result<(), WizardError> {
        let step = self.current().ok_or(WizardError::TourInactive)?;

        if !step.payload.is_empty() {
            let mut data = self.session.state.tax_data.clone();
            for section in &step.payload {
                data = data.merge_section(section.clone());
            }
            self.session.state.tax_data = data;
            self.session.persist().await;
        }

        let state = &mut self.session.state;
        if state.tour_step < TOUR_LENGTH {
            state.tour_step += 1;
            state.current_step = (state.current_step + 1).min(SUMMARY_STEP);
        } else {
            self.exit();
        }
        Ok(())
    }

    /// End the tour immediately; data applied so far stays.
    pub fn exit(&mut self) {
        if self.session.state.is_tour_active() {
            info!(at = self.session.state.tour_step, "guided tour ended");
        }
        self.session.state.tour_step = 0;
    }
}
