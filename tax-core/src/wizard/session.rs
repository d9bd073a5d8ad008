//! The wizard session: the single owner of [`WizardState`].
//!
//! Every command is a method taking `&mut self`, so commands run one at a
//! time and each one finishes before the next starts. Derived values
//! (current step, intro visibility) are recomputed explicitly inside the
//! mutating methods, and every change to the declaration data or the tax
//! year is saved before the method returns.
//!
//! Storage problems never abort a command: a failed load behaves like
//! "nothing stored", a failed save is logged and skipped.

use std::sync::Arc;

use tracing::{debug, info, warn};

use super::error::WizardError;
use super::gate::{
    FIRST_STEP, SUMMARY_STEP, can_navigate_to, determine_current_step, navigation_block,
};
use super::state::WizardState;
use super::tour::TourEngine;
use crate::ai::{AiError, AssistantService};
use crate::calculations::ExpenseBreakdown;
use crate::models::{Section, SectionData, TaxData, is_supported_tax_year};
use crate::store::TaxDataStore;
use crate::summary::DeclarationSummary;

/// Handle for an outstanding example data fetch.
///
/// Obtained from [`WizardSession::begin_example_request`] and handed back to
/// [`WizardSession::complete_example_request`] together with the fetch result.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExampleRequest {
    ticket: u64,
    year: i32,
}

impl ExampleRequest {
    /// The tax year that was active when the request was issued.
    pub fn year(&self) -> i32 {
        self.year
    }
}

/// What happened to a completed example data request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExampleOutcome {
    Applied,
    /// The result arrived for a year that is no longer selected, while a
    /// tour was running, or for a request that is no longer pending.
    Discarded,
}

pub struct WizardSession {
    pub(super) state: WizardState,
    store: Arc<dyn TaxDataStore>,
    assistant: AssistantService,
    pending_example: Option<u64>,
    next_ticket: u64,
}

impl WizardSession {
    /// Create a session and load `year`.
    pub async fn open(
        store: Arc<dyn TaxDataStore>,
        assistant: AssistantService,
        year: i32,
    ) -> Result<Self, WizardError> {
        if !is_supported_tax_year(year) {
            return Err(WizardError::UnsupportedYear(year));
        }

        let mut session = Self {
            state: WizardState::new(year),
            store,
            assistant,
            pending_example: None,
            next_ticket: 1,
        };
        session.select_year(year).await?;
        Ok(session)
    }

    // ── read access ──────────────────────────────────────────────────────

    pub fn state(&self) -> &WizardState {
        &self.state
    }

    pub fn current_step(&self) -> u8 {
        self.state.current_step
    }

    pub fn tax_year(&self) -> i32 {
        self.state.tax_year
    }

    pub fn tax_data(&self) -> &TaxData {
        &self.state.tax_data
    }

    pub fn accepts_input(&self) -> bool {
        self.state.accepts_input()
    }

    pub fn assistant(&self) -> &AssistantService {
        &self.assistant
    }

    /// Allowance preview for the expenses step.
    pub fn expense_breakdown(&self) -> ExpenseBreakdown {
        ExpenseBreakdown::from_expenses(&self.state.tax_data.expenses)
    }

    pub fn summary(&self) -> DeclarationSummary {
        DeclarationSummary::build(self.state.tax_year, &self.state.tax_data)
    }

    pub fn tour(&mut self) -> TourEngine<'_> {
        TourEngine::new(self)
    }

    // ── commands ─────────────────────────────────────────────────────────

    /// Switch to `year`, loading its stored data or starting empty.
    pub async fn select_year(
        &mut self,
        year: i32,
    ) -> Result<(), WizardError> {
        if self.state.is_tour_active() {
            return Err(WizardError::TourActive);
        }
        if !is_supported_tax_year(year) {
            return Err(WizardError::UnsupportedYear(year));
        }

        let data = self.load_year(year).await;

        self.state.tax_year = year;
        self.state.current_step = determine_current_step(&data);
        self.state.show_intro = data.personal_data.is_empty();
        self.state.show_help = false;
        self.state.tax_data = data;
        info!(year, step = self.state.current_step, "tax year selected");

        self.persist().await;
        Ok(())
    }

    /// Store a section entered by the user and move on by one step.
    ///
    /// `name` is the section's wire name (e.g. `"income"`) and must match the
    /// payload.
    pub async fn submit_section(
        &mut self,
        name: &str,
        data: SectionData,
    ) -> Result<(), WizardError> {
        if self.state.is_tour_active() {
            return Err(WizardError::TourActive);
        }
        let section =
            Section::parse(name).ok_or_else(|| WizardError::InvalidSection(name.to_string()))?;
        if data.section() != section {
            return Err(WizardError::SectionMismatch {
                name: name.to_string(),
                payload: data.section(),
            });
        }

        self.state.tax_data = self.state.tax_data.merge_section(data);
        if self.state.current_step < SUMMARY_STEP {
            self.state.current_step += 1;
        }
        debug!(%section, step = self.state.current_step, "section submitted");

        self.persist().await;
        Ok(())
    }

    /// Jump to `target` if the gate allows it. Refusals are silent apart from
    /// the `false` return value.
    pub fn go_to_step(
        &mut self,
        target: u8,
    ) -> bool {
        if let Some(block) = navigation_block(&self.state) {
            debug!(target, %block, "navigation refused");
            return false;
        }
        if !can_navigate_to(target, self.state.current_step, &self.state.tax_data) {
            debug!(target, current = self.state.current_step, "navigation refused by gate");
            return false;
        }

        self.state.current_step = target;
        self.state.show_help = false;
        true
    }

    pub fn next(&mut self) -> bool {
        if self.state.is_tour_active() || self.state.current_step >= SUMMARY_STEP {
            return false;
        }
        self.state.current_step += 1;
        true
    }

    pub fn previous(&mut self) -> bool {
        if self.state.is_tour_active() || self.state.current_step <= FIRST_STEP {
            return false;
        }
        self.state.current_step -= 1;
        true
    }

    /// Throw away the active year's data and start over at the intro.
    pub async fn restart(&mut self) {
        let year = self.state.tax_year;
        if let Err(error) = self.store.clear(year).await {
            warn!(year, %error, "clearing stored data failed");
        }

        self.state.tax_data = TaxData::empty();
        self.state.current_step = FIRST_STEP;
        self.state.show_intro = true;
        self.state.show_help = false;
        self.state.tour_step = 0;
        info!(year, "wizard restarted");

        self.persist().await;
    }

    pub fn dismiss_intro(&mut self) {
        self.state.show_intro = false;
    }

    pub fn toggle_help(&mut self) {
        self.state.show_help = !self.state.show_help;
    }

    // ── example data ─────────────────────────────────────────────────────

    /// Fetch a complete example declaration and replace the current data
    /// with it.
    ///
    /// # Errors
    /// [`WizardError::Ai`] when the provider fails; the session state is then
    /// exactly what it was before the call.
    pub async fn request_example_data(&mut self) -> Result<(), WizardError> {
        let request = self.begin_example_request()?;
        let result = self.assistant.generate_example_data(request.year()).await;
        self.complete_example_request(request, result).await?;
        Ok(())
    }

    /// First half of [`Self::request_example_data`] for hosts that run the
    /// fetch themselves. Raises the loading flag.
    pub fn begin_example_request(&mut self) -> Result<ExampleRequest, WizardError> {
        if self.state.is_tour_active() {
            return Err(WizardError::TourActive);
        }
        if self.pending_example.is_some() {
            return Err(WizardError::ExampleRequestPending);
        }

        let ticket = self.next_ticket;
        self.next_ticket += 1;
        self.pending_example = Some(ticket);
        self.state.is_loading_example = true;

        Ok(ExampleRequest {
            ticket,
            year: self.state.tax_year,
        })
    }

    /// Forget the outstanding example request, if any; its completion will be
    /// discarded.
    pub(super) fn drop_pending_example(&mut self) {
        if let Some(ticket) = self.pending_example.take() {
            debug!(ticket, "pending example request dropped");
        }
        self.state.is_loading_example = false;
    }

    /// Second half of [`Self::request_example_data`].
    ///
    /// A result is only applied to the year it was requested for; if that
    /// year is no longer selected, or a tour has started in the meantime, it
    /// is dropped. A failure of a still-current request clears the loading
    /// flag and is returned as [`WizardError::Ai`].
    pub async fn complete_example_request(
        &mut self,
        request: ExampleRequest,
        result: Result<TaxData, AiError>,
    ) -> Result<ExampleOutcome, WizardError> {
        if self.pending_example != Some(request.ticket) {
            debug!(year = request.year, "ignoring result of a request that is not pending");
            return Ok(ExampleOutcome::Discarded);
        }
        self.pending_example = None;
        self.state.is_loading_example = false;

        if request.year != self.state.tax_year || self.state.is_tour_active() {
            info!(
                requested_for = request.year,
                active = self.state.tax_year,
                "discarding example data for a year that is no longer active"
            );
            return Ok(ExampleOutcome::Discarded);
        }

        let data = result.inspect_err(|error| {
            warn!(year = request.year, %error, "example data request failed");
        })?;

        self.state.tax_data = data;
        self.state.current_step = FIRST_STEP;
        self.state.show_intro = false;
        info!(year = request.year, "example data applied");

        self.persist().await;
        Ok(ExampleOutcome::Applied)
    }

    // ── persistence ──────────────────────────────────────────────────────

    async fn load_year(
        &self,
        year: i32,
    ) -> TaxData {
        match self.store.load(year).await {
            Ok(Some(data)) => data,
            Ok(None) => TaxData::empty(),
            Err(error) => {
                warn!(year, %error, "loading stored data failed; starting empty");
                TaxData::empty()
            }
        }
    }

    pub(super) async fn persist(&self) {
        let year = self.state.tax_year;
        if let Err(error) = self.store.save(year, &self.state.tax_data).await {
            warn!(year, %error, "saving data failed; save skipped");
        }
    }
}

impl std::fmt::Debug for WizardSession {
    fn fmt(
        &self,
        f: &mut std::fmt::Formatter<'_>,
    ) -> std::fmt::Result {
        f.debug_struct("WizardSession")
            .field("state", &self.state)
            .field("pending_example", &self.pending_example)
            .finish_non_exhaustive()
    }
}
