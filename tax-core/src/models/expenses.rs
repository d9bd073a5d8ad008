use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::calculations::common::sum_amounts;

/// Work-related expenses (Werbungskosten).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Expenses {
    /// Days the commute to the first place of work was made.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub commute_days: Option<u32>,
    /// One-way distance in km.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub commute_distance: Option<Decimal>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub home_office_days: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub work_equipment: Option<Decimal>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub training_costs: Option<Decimal>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub application_costs: Option<Decimal>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub work_related_travel: Option<Decimal>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub account_fees: Option<Decimal>,
}

impl Expenses {
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    /// Sum of the itemized amounts, i.e. everything except the two allowances.
    pub fn itemized_total(&self) -> Decimal {
        sum_amounts([
            self.work_equipment,
            self.training_costs,
            self.application_costs,
            self.work_related_travel,
            self.account_fees,
        ])
    }
}
