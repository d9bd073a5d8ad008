//! Allowance calculations for the expenses section.
//!
//! All functions here are pure: they never touch wizard state and return the
//! same result for the same input.

pub mod allowances;
pub mod common;

pub use allowances::{
    AllowanceRates, AllowanceRatesError, ExpenseBreakdown, commute_allowance,
    home_office_allowance, total_expenses,
};
