use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Figures from the employer's annual wage tax certificate.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Income {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gross_salary: Option<Decimal>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub income_tax: Option<Decimal>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub solidarity_surcharge: Option<Decimal>,
}

impl Income {
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}
