use std::fmt;

use serde::{Deserialize, Serialize};

/// The five sections of a declaration, in wizard order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Section {
    PersonalData,
    Income,
    Expenses,
    Insurances,
    HouseholdServices,
}

impl Section {
    pub const ALL: [Section; 5] = [
        Self::PersonalData,
        Self::Income,
        Self::Expenses,
        Self::Insurances,
        Self::HouseholdServices,
    ];

    /// Wire name, as used in stored documents and by hosts submitting data.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::PersonalData => "personalData",
            Self::Income => "income",
            Self::Expenses => "expenses",
            Self::Insurances => "insurances",
            Self::HouseholdServices => "householdServices",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "personalData" => Some(Self::PersonalData),
            "income" => Some(Self::Income),
            "expenses" => Some(Self::Expenses),
            "insurances" => Some(Self::Insurances),
            "householdServices" => Some(Self::HouseholdServices),
            _ => None,
        }
    }

    /// 1-based wizard step that edits this section.
    pub fn step(&self) -> u8 {
        match self {
            Self::PersonalData => 1,
            Self::Income => 2,
            Self::Expenses => 3,
            Self::Insurances => 4,
            Self::HouseholdServices => 5,
        }
    }

    pub fn from_step(step: u8) -> Option<Self> {
        match step {
            1..=5 => Some(Self::ALL[usize::from(step - 1)]),
            _ => None,
        }
    }

    pub fn title(&self) -> &'static str {
        match self {
            Self::PersonalData => "Persönliche Daten",
            Self::Income => "Einnahmen",
            Self::Expenses => "Ausgaben",
            Self::Insurances => "Vorsorge",
            Self::HouseholdServices => "Haushalt",
        }
    }
}

impl fmt::Display for Section {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
