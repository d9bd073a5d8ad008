use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::calculations::common::sum_amounts;

/// Household-related services and tradesmen's labour costs.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HouseholdServices {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub services: Option<Decimal>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tradesmen: Option<Decimal>,
}

impl HouseholdServices {
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    pub fn total(&self) -> Decimal {
        sum_amounts([self.services, self.tradesmen])
    }
}
