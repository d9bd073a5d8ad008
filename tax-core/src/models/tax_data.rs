use serde::{Deserialize, Serialize};

use super::{Expenses, HouseholdServices, Income, Insurances, PersonalData, Section};

/// The declaration aggregate for one tax year.
///
/// All five sections are always present; a section nobody has filled in yet
/// is simply empty. Stored documents that lack a section deserialize with
/// that section empty.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct TaxData {
    pub personal_data: PersonalData,
    pub income: Income,
    pub expenses: Expenses,
    pub insurances: Insurances,
    pub household_services: HouseholdServices,
}

impl TaxData {
    pub fn empty() -> Self {
        Self::default()
    }

    /// A section counts as complete as soon as any one of its fields is set,
    /// whatever the value.
    pub fn is_section_complete(
        &self,
        section: Section,
    ) -> bool {
        !self.section(section).is_empty()
    }

    pub fn is_complete(&self) -> bool {
        Section::ALL
            .iter()
            .all(|section| self.is_section_complete(*section))
    }

    /// Returns a copy of `self` with the payload's section replaced wholesale.
    pub fn merge_section(
        &self,
        data: SectionData,
    ) -> TaxData {
        let mut merged = self.clone();
        match data {
            SectionData::PersonalData(v) => merged.personal_data = v,
            SectionData::Income(v) => merged.income = v,
            SectionData::Expenses(v) => merged.expenses = v,
            SectionData::Insurances(v) => merged.insurances = v,
            SectionData::HouseholdServices(v) => merged.household_services = v,
        }
        merged
    }

    pub fn section(
        &self,
        section: Section,
    ) -> SectionData {
        match section {
            Section::PersonalData => SectionData::PersonalData(self.personal_data.clone()),
            Section::Income => SectionData::Income(self.income.clone()),
            Section::Expenses => SectionData::Expenses(self.expenses.clone()),
            Section::Insurances => SectionData::Insurances(self.insurances.clone()),
            Section::HouseholdServices => {
                SectionData::HouseholdServices(self.household_services.clone())
            }
        }
    }
}

/// One section's worth of data, tagged with the section it belongs to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SectionData {
    PersonalData(PersonalData),
    Income(Income),
    Expenses(Expenses),
    Insurances(Insurances),
    HouseholdServices(HouseholdServices),
}

impl SectionData {
    pub fn section(&self) -> Section {
        match self {
            Self::PersonalData(_) => Section::PersonalData,
            Self::Income(_) => Section::Income,
            Self::Expenses(_) => Section::Expenses,
            Self::Insurances(_) => Section::Insurances,
            Self::HouseholdServices(_) => Section::HouseholdServices,
        }
    }

    pub fn is_empty(&self) -> bool {
        match self {
            Self::PersonalData(v) => v.is_empty(),
            Self::Income(v) => v.is_empty(),
            Self::Expenses(v) => v.is_empty(),
            Self::Insurances(v) => v.is_empty(),
            Self::HouseholdServices(v) => v.is_empty(),
        }
    }

    /// Decodes a JSON object holding the fields of `section`.
    pub fn from_json(
        section: Section,
        value: serde_json::Value,
    ) -> Result<Self, serde_json::Error> {
        Ok(match section {
            Section::PersonalData => Self::PersonalData(serde_json::from_value(value)?),
            Section::Income => Self::Income(serde_json::from_value(value)?),
            Section::Expenses => Self::Expenses(serde_json::from_value(value)?),
            Section::Insurances => Self::Insurances(serde_json::from_value(value)?),
            Section::HouseholdServices => Self::HouseholdServices(serde_json::from_value(value)?),
        })
    }

    /// The section's fields as a JSON object; unset fields are omitted.
    pub fn to_json(&self) -> Result<serde_json::Value, serde_json::Error> {
        match self {
            Self::PersonalData(v) => serde_json::to_value(v),
            Self::Income(v) => serde_json::to_value(v),
            Self::Expenses(v) => serde_json::to_value(v),
            Self::Insurances(v) => serde_json::to_value(v),
            Self::HouseholdServices(v) => serde_json::to_value(v),
        }
    }
}

impl From<PersonalData> for SectionData {
    fn from(value: PersonalData) -> Self {
        Self::PersonalData(value)
    }
}

impl From<Income> for SectionData {
    fn from(value: Income) -> Self {
        Self::Income(value)
    }
}

impl From<Expenses> for SectionData {
    fn from(value: Expenses) -> Self {
        Self::Expenses(value)
    }
}

impl From<Insurances> for SectionData {
    fn from(value: Insurances) -> Self {
        Self::Insurances(value)
    }
}

impl From<HouseholdServices> for SectionData {
    fn from(value: HouseholdServices) -> Self {
        Self::HouseholdServices(value)
    }
}
