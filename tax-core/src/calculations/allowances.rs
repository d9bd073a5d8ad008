//! Flat-rate allowances derived from the expenses section.
//!
//! # Rules
//!
//! | Allowance    | Formula |
//! |--------------|---------|
//! | Commute      | `days × km × 0.30` up to 20 km; beyond that `days × (20 × 0.30 + (km − 20) × 0.38)` |
//! | Home office  | `days × 6`, capped at 1260 |
//!
//! The commute allowance is rounded half-up to the cent; the home-office
//! allowance is a whole-euro product and needs no rounding.
//!
//! Every caller that displays these figures (the entry-form preview and the
//! final summary) goes through [`ExpenseBreakdown`], so both always show the
//! same numbers for the same input.
//!
//! # Example
//!
//! ```
//! use rust_decimal_macros::dec;
//! use tax_core::calculations::allowances::{commute_allowance, home_office_allowance};
//!
//! assert_eq!(commute_allowance(220, dec!(18)), dec!(1188.00));
//! assert_eq!(commute_allowance(220, dec!(40)), dec!(2992.00));
//! assert_eq!(home_office_allowance(210), dec!(1260));
//! ```

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::calculations::common::{capped, round_cents};
use crate::models::Expenses;

/// Errors reported by [`AllowanceRates::validate`].
#[derive(Debug, Error, PartialEq, Eq)]
pub enum AllowanceRatesError {
    #[error("commute rate must not be negative, got {0}")]
    NegativeCommuteRate(Decimal),

    #[error("commute distance threshold must be positive, got {0}")]
    InvalidDistanceThreshold(Decimal),

    #[error("home office daily rate must not be negative, got {0}")]
    NegativeHomeOfficeRate(Decimal),

    #[error("home office cap must not be negative, got {0}")]
    NegativeHomeOfficeCap(Decimal),
}

/// Rates and limits behind the allowance formulas.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AllowanceRates {
    /// Per-km rate for the first [`Self::commute_threshold_km`] kilometres.
    pub commute_rate_near: Decimal,

    /// Per-km rate for every kilometre beyond the threshold.
    pub commute_rate_far: Decimal,

    pub commute_threshold_km: Decimal,

    pub home_office_daily_rate: Decimal,

    /// Annual maximum for the home-office allowance.
    pub home_office_cap: Decimal,
}

impl Default for AllowanceRates {
    fn default() -> Self {
        Self {
            commute_rate_near: dec!(0.30),
            commute_rate_far: dec!(0.38),
            commute_threshold_km: dec!(20),
            home_office_daily_rate: dec!(6),
            home_office_cap: dec!(1260),
        }
    }
}

impl AllowanceRates {
    pub fn validate(&self) -> Result<(), AllowanceRatesError> {
        for rate in [self.commute_rate_near, self.commute_rate_far] {
            if rate < Decimal::ZERO {
                return Err(AllowanceRatesError::NegativeCommuteRate(rate));
            }
        }
        if self.commute_threshold_km <= Decimal::ZERO {
            return Err(AllowanceRatesError::InvalidDistanceThreshold(
                self.commute_threshold_km,
            ));
        }
        if self.home_office_daily_rate < Decimal::ZERO {
            return Err(AllowanceRatesError::NegativeHomeOfficeRate(
                self.home_office_daily_rate,
            ));
        }
        if self.home_office_cap < Decimal::ZERO {
            return Err(AllowanceRatesError::NegativeHomeOfficeCap(
                self.home_office_cap,
            ));
        }
        Ok(())
    }

    /// Commuter allowance for `days` trips over a one-way `distance_km`.
    ///
    /// Returns zero for a non-positive distance. Amounts beyond the decimal
    /// range saturate at [`Decimal::MAX`].
    pub fn commute_allowance(
        &self,
        days: u32,
        distance_km: Decimal,
    ) -> Decimal {
        if distance_km <= Decimal::ZERO {
            return Decimal::ZERO;
        }

        let per_trip = if distance_km <= self.commute_threshold_km {
            distance_km.saturating_mul(self.commute_rate_near)
        } else {
            let near = self.commute_threshold_km * self.commute_rate_near;
            let far =
                (distance_km - self.commute_threshold_km).saturating_mul(self.commute_rate_far);
            near.saturating_add(far)
        };

        round_cents(Decimal::from(days).saturating_mul(per_trip))
    }

    pub fn home_office_allowance(
        &self,
        days: u32,
    ) -> Decimal {
        capped(
            Decimal::from(days) * self.home_office_daily_rate,
            self.home_office_cap,
        )
    }
}

/// Commuter allowance using the default rates.
pub fn commute_allowance(
    days: u32,
    distance_km: Decimal,
) -> Decimal {
    AllowanceRates::default().commute_allowance(days, distance_km)
}

/// Home-office allowance using the default rates.
pub fn home_office_allowance(days: u32) -> Decimal {
    AllowanceRates::default().home_office_allowance(days)
}

/// Both allowances plus all itemized expenses; unset fields count as zero.
pub fn total_expenses(expenses: &Expenses) -> Decimal {
    ExpenseBreakdown::from_expenses(expenses).total
}

/// The expense figures shown to the user, computed in one place.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExpenseBreakdown {
    pub commute_allowance: Decimal,
    pub home_office_allowance: Decimal,
    /// Equipment, training, applications, travel and account fees.
    pub itemized: Decimal,
    pub total: Decimal,
}

impl ExpenseBreakdown {
    pub fn from_expenses(expenses: &Expenses) -> Self {
        Self::with_rates(&AllowanceRates::default(), expenses)
    }

    pub fn with_rates(
        rates: &AllowanceRates,
        expenses: &Expenses,
    ) -> Self {
        let commute = rates.commute_allowance(
            expenses.commute_days.unwrap_or(0),
            expenses.commute_distance.unwrap_or_default(),
        );
        let home_office = rates.home_office_allowance(expenses.home_office_days.unwrap_or(0));
        let itemized = expenses.itemized_total();

        Self {
            commute_allowance: commute,
            home_office_allowance: home_office,
            itemized,
            total: commute.saturating_add(home_office).saturating_add(itemized),
        }
    }
}
