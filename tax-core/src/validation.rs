//! Field constraints for submitted sections.
//!
//! Hosts run [`validate_section`] before calling
//! [`crate::wizard::WizardSession::submit_section`]; the session itself
//! assumes it receives valid payloads.

use std::sync::OnceLock;

use regex::Regex;
use rust_decimal::Decimal;
use thiserror::Error;

use crate::models::{
    Expenses, HouseholdServices, Income, Insurances, PersonalData, SectionData,
};

const MAX_DAYS_PER_YEAR: u32 = 366;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{field}: {message}")]
pub struct ValidationError {
    /// Wire name of the offending field.
    pub field: &'static str,
    pub message: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{} field(s) failed validation", .errors.len())]
pub struct ValidationErrors {
    pub errors: Vec<ValidationError>,
}

impl ValidationErrors {
    pub fn fields(&self) -> Vec<&'static str> {
        self.errors.iter().map(|e| e.field).collect()
    }
}

#[derive(Default)]
struct Collector {
    errors: Vec<ValidationError>,
}

impl Collector {
    fn push(
        &mut self,
        field: &'static str,
        message: impl Into<String>,
    ) {
        self.errors.push(ValidationError {
            field,
            message: message.into(),
        });
    }

    fn required_text<'a>(
        &mut self,
        field: &'static str,
        value: &'a Option<String>,
    ) -> Option<&'a str> {
        match value.as_deref().map(str::trim) {
            Some(text) if !text.is_empty() => Some(text),
            _ => {
                self.push(field, "is required");
                None
            }
        }
    }

    fn matching(
        &mut self,
        field: &'static str,
        value: &Option<String>,
        pattern: &Regex,
        message: &str,
    ) {
        if let Some(text) = self.required_text(field, value) {
            if !pattern.is_match(text) {
                self.push(field, message);
            }
        }
    }

    fn required_amount(
        &mut self,
        field: &'static str,
        value: Option<Decimal>,
    ) {
        match value {
            Some(_) => self.non_negative(field, value),
            None => self.push(field, "is required"),
        }
    }

    fn non_negative(
        &mut self,
        field: &'static str,
        value: Option<Decimal>,
    ) {
        if value.is_some_and(|amount| amount < Decimal::ZERO) {
            self.push(field, "must not be negative");
        }
    }

    fn finish(self) -> Result<(), ValidationErrors> {
        if self.errors.is_empty() {
            Ok(())
        } else {
            Err(ValidationErrors {
                errors: self.errors,
            })
        }
    }
}

fn postal_code_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"^\d{5}$").expect("valid postal code pattern"))
}

fn tax_id_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"^\d{11}$").expect("valid tax id pattern"))
}

fn iban_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(r"^[A-Z]{2}[0-9]{2}[a-zA-Z0-9]{1,30}$").expect("valid IBAN pattern")
    })
}

/// Check every field constraint of `data`, reporting all failures at once.
pub fn validate_section(data: &SectionData) -> Result<(), ValidationErrors> {
    match data {
        SectionData::PersonalData(v) => validate_personal_data(v),
        SectionData::Income(v) => validate_income(v),
        SectionData::Expenses(v) => validate_expenses(v),
        SectionData::Insurances(v) => validate_insurances(v),
        SectionData::HouseholdServices(v) => validate_household_services(v),
    }
}

pub fn validate_personal_data(data: &PersonalData) -> Result<(), ValidationErrors> {
    let mut c = Collector::default();
    c.required_text("firstName", &data.first_name);
    c.required_text("lastName", &data.last_name);
    c.required_text("dateOfBirth", &data.date_of_birth);
    c.required_text("street", &data.street);
    c.required_text("houseNumber", &data.house_number);
    c.matching(
        "postalCode",
        &data.postal_code,
        postal_code_pattern(),
        "must be 5 digits",
    );
    c.required_text("city", &data.city);
    c.matching("taxId", &data.tax_id, tax_id_pattern(), "must be 11 digits");
    c.matching("iban", &data.iban, iban_pattern(), "is not a valid IBAN");
    if data.marital_status.is_none() {
        c.push("maritalStatus", "is required");
    }
    if data.religion.is_none() {
        c.push("religion", "is required");
    }
    c.finish()
}

pub fn validate_income(data: &Income) -> Result<(), ValidationErrors> {
    let mut c = Collector::default();
    c.required_amount("grossSalary", data.gross_salary);
    c.required_amount("incomeTax", data.income_tax);
    c.required_amount("solidaritySurcharge", data.solidarity_surcharge);
    c.finish()
}

pub fn validate_expenses(data: &Expenses) -> Result<(), ValidationErrors> {
    let mut c = Collector::default();
    match data.commute_days {
        Some(days) if days > MAX_DAYS_PER_YEAR => {
            c.push("commuteDays", format!("must be at most {MAX_DAYS_PER_YEAR}"))
        }
        Some(_) => {}
        None => c.push("commuteDays", "is required"),
    }
    c.required_amount("commuteDistance", data.commute_distance);
    c.non_negative("workEquipment", data.work_equipment);
    c.non_negative("trainingCosts", data.training_costs);
    c.non_negative("applicationCosts", data.application_costs);
    c.non_negative("workRelatedTravel", data.work_related_travel);
    c.non_negative("accountFees", data.account_fees);
    c.finish()
}

pub fn validate_insurances(data: &Insurances) -> Result<(), ValidationErrors> {
    let mut c = Collector::default();
    c.required_amount("healthInsurance", data.health_insurance);
    c.required_amount("liabilityInsurance", data.liability_insurance);
    c.finish()
}

pub fn validate_household_services(data: &HouseholdServices) -> Result<(), ValidationErrors> {
    let mut c = Collector::default();
    c.required_amount("services", data.services);
    c.required_amount("tradesmen", data.tradesmen);
    c.finish()
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;

    use super::*;
    use crate::models::{MaritalStatus, Religion};

    fn valid_person() -> PersonalData {
        PersonalData {
            first_name: Some("Erika".to_string()),
            last_name: Some("Musterfrau".to_string()),
            date_of_birth: Some("1990-01-31".to_string()),
            street: Some("Hauptstraße".to_string()),
            house_number: Some("7a".to_string()),
            postal_code: Some("80331".to_string()),
            city: Some("München".to_string()),
            tax_id: Some("98765432109".to_string()),
            iban: Some("DE02120300000000202051".to_string()),
            marital_status: Some(MaritalStatus::Married),
            religion: Some(Religion::Catholic),
        }
    }

    #[test]
    fn complete_personal_data_passes() {
        assert_eq!(validate_section(&valid_person().into()), Ok(()));
    }

    #[test]
    fn empty_personal_data_reports_every_field() {
        let err = validate_personal_data(&PersonalData::default()).unwrap_err();

        assert_eq!(err.errors.len(), 11);
    }

    #[test]
    fn malformed_identifiers_are_rejected() {
        let person = PersonalData {
            postal_code: Some("8033".to_string()),
            tax_id: Some("1234567890A".to_string()),
            iban: Some("de02120300000000202051".to_string()),
            ..valid_person()
        };

        let err = validate_personal_data(&person).unwrap_err();

        assert_eq!(err.fields(), vec!["postalCode", "taxId", "iban"]);
    }

    #[test]
    fn blank_text_counts_as_missing() {
        let person = PersonalData {
            city: Some("   ".to_string()),
            ..valid_person()
        };

        let err = validate_personal_data(&person).unwrap_err();

        assert_eq!(err.fields(), vec!["city"]);
        assert_eq!(err.errors[0].to_string(), "city: is required");
    }

    #[test]
    fn income_requires_all_amounts() {
        let income = Income {
            gross_salary: Some(dec!(50000)),
            income_tax: None,
            solidarity_surcharge: Some(dec!(-1)),
        };

        let err = validate_income(&income).unwrap_err();

        assert_eq!(err.fields(), vec!["incomeTax", "solidaritySurcharge"]);
    }

    #[test]
    fn zero_amounts_are_valid() {
        let services = HouseholdServices {
            services: Some(dec!(0)),
            tradesmen: Some(dec!(0)),
        };

        assert_eq!(validate_household_services(&services), Ok(()));
    }

    #[test]
    fn commute_days_are_bounded_by_the_calendar() {
        let expenses = Expenses {
            commute_days: Some(367),
            commute_distance: Some(dec!(12)),
            ..Default::default()
        };

        let err = validate_expenses(&expenses).unwrap_err();

        assert_eq!(err.fields(), vec!["commuteDays"]);
    }

    #[test]
    fn optional_expense_amounts_may_be_unset_but_not_negative() {
        let ok = Expenses {
            commute_days: Some(366),
            commute_distance: Some(dec!(0)),
            ..Default::default()
        };
        let bad = Expenses {
            training_costs: Some(dec!(-20)),
            ..ok.clone()
        };

        assert_eq!(validate_expenses(&ok), Ok(()));
        assert_eq!(validate_expenses(&bad).unwrap_err().fields(), vec!["trainingCosts"]);
    }

    #[test]
    fn insurances_require_both_amounts() {
        let err = validate_insurances(&Insurances::default()).unwrap_err();

        assert_eq!(err.to_string(), "2 field(s) failed validation");
    }
}
