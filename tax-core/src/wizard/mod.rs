//! Step wizard: gating rules, the session state machine and the guided tour.

pub mod error;
pub mod gate;
pub mod session;
pub mod state;
pub mod tour;

pub use error::WizardError;
pub use gate::{
    FIRST_STEP, NavigationBlock, SUMMARY_STEP, can_navigate_to, determine_current_step,
    navigation_block,
};
pub use session::{ExampleOutcome, ExampleRequest, WizardSession};
pub use state::WizardState;
pub use tour::{TOUR_LENGTH, TourEngine, TourStep, tour_script};
