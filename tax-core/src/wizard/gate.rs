//! Step gating: where the wizard should be, and where it may go.
//!
//! Both decisions are pure functions of the current data, recomputed by the
//! session whenever it needs them.

use std::fmt;

use super::state::WizardState;
use crate::models::{Section, TaxData};

pub const FIRST_STEP: u8 = 1;
/// The read-only summary that follows the five sections.
pub const SUMMARY_STEP: u8 = 6;

/// First step whose section is still empty, or the summary when every
/// section has data.
pub fn determine_current_step(data: &TaxData) -> u8 {
    Section::ALL
        .iter()
        .find(|section| !data.is_section_complete(**section))
        .map(Section::step)
        .unwrap_or(SUMMARY_STEP)
}

/// Whether the wizard may jump from `current` to `target`.
///
/// Going back to an already reached step is always allowed; going forward
/// requires the section right before `target` to be complete. Targets outside
/// the wizard are refused.
pub fn can_navigate_to(
    target: u8,
    current: u8,
    data: &TaxData,
) -> bool {
    if !(FIRST_STEP..=SUMMARY_STEP).contains(&target) {
        return false;
    }
    if target <= current {
        return true;
    }

    Section::from_step(target - 1).is_some_and(|previous| data.is_section_complete(previous))
}

/// Why navigation is refused regardless of the data.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavigationBlock {
    TourActive,
    /// The intro screen covers step 1 until the user starts.
    IntroShowing,
}

impl fmt::Display for NavigationBlock {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        match self {
            Self::TourActive => f.write_str("guided tour is active"),
            Self::IntroShowing => f.write_str("intro screen is showing"),
        }
    }
}

pub fn navigation_block(state: &WizardState) -> Option<NavigationBlock> {
    if state.is_tour_active() {
        Some(NavigationBlock::TourActive)
    } else if state.show_intro && state.current_step == FIRST_STEP {
        Some(NavigationBlock::IntroShowing)
    } else {
        None
    }
}
