use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::calculations::common::sum_amounts;

/// Provident expenses (Vorsorgeaufwendungen).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Insurances {
    /// Self-paid health and long-term care contributions.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub health_insurance: Option<Decimal>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub liability_insurance: Option<Decimal>,
}

impl Insurances {
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    pub fn total(&self) -> Decimal {
        sum_amounts([self.health_insurance, self.liability_insurance])
    }
}
