//! In-memory wizard state for the active tax year.

use serde::{Deserialize, Serialize};

use super::gate::{FIRST_STEP, SUMMARY_STEP};
use crate::models::TaxData;

/// Everything the host needs to render the wizard.
///
/// Only [`super::WizardSession`] mutates this; hosts get a shared reference.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WizardState {
    /// 1..=5 edit a section, 6 is the read-only summary.
    pub current_step: u8,
    pub tax_year: i32,
    pub tax_data: TaxData,
    pub show_intro: bool,
    /// Transient help panel flag; cleared by successful navigation.
    pub show_help: bool,
    /// Set while an example data request is outstanding.
    pub is_loading_example: bool,
    /// 0 when no tour runs, otherwise the 1-based tour position.
    pub tour_step: u8,
}

impl WizardState {
    pub fn new(tax_year: i32) -> Self {
        Self {
            current_step: FIRST_STEP,
            tax_year,
            tax_data: TaxData::empty(),
            show_intro: true,
            show_help: false,
            is_loading_example: false,
            tour_step: 0,
        }
    }

    pub fn is_tour_active(&self) -> bool {
        self.tour_step > 0
    }

    /// Whether the current step takes manual input. False during the tour.
    pub fn accepts_input(&self) -> bool {
        !self.is_tour_active()
    }

    pub fn is_on_summary(&self) -> bool {
        self.current_step == SUMMARY_STEP
    }
}
