//! Read-only view backing the summary step.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::calculations::ExpenseBreakdown;
use crate::models::TaxData;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeclarationSummary {
    pub tax_year: i32,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub gross_salary: Decimal,
    pub income_tax: Decimal,
    pub solidarity_surcharge: Decimal,
    pub expenses: ExpenseBreakdown,
    pub insurances_total: Decimal,
    pub household_services_total: Decimal,
}

impl DeclarationSummary {
    pub fn build(
        tax_year: i32,
        data: &TaxData,
    ) -> Self {
        Self {
            tax_year,
            first_name: data.personal_data.first_name.clone(),
            last_name: data.personal_data.last_name.clone(),
            gross_salary: data.income.gross_salary.unwrap_or_default(),
            income_tax: data.income.income_tax.unwrap_or_default(),
            solidarity_surcharge: data.income.solidarity_surcharge.unwrap_or_default(),
            expenses: ExpenseBreakdown::from_expenses(&data.expenses),
            insurances_total: data.insurances.total(),
            household_services_total: data.household_services.total(),
        }
    }

    pub fn full_name(&self) -> Option<String> {
        match (&self.first_name, &self.last_name) {
            (Some(first), Some(last)) => Some(format!("{first} {last}")),
            (Some(name), None) | (None, Some(name)) => Some(name.clone()),
            (None, None) => None,
        }
    }

    /// Base file name for exported summaries, e.g. `Steuererklaerung_2024_Mustermann`.
    ///
    /// Only letters, digits and `-` of the last name are kept, so the result
    /// is always a plain file name.
    pub fn document_name(&self) -> String {
        let last_name: String = self
            .last_name
            .as_deref()
            .unwrap_or_default()
            .chars()
            .filter(|c| c.is_alphanumeric() || *c == '-')
            .collect();
        let last_name = if last_name.is_empty() {
            "Unbekannt"
        } else {
            last_name.as_str()
        };
        format!("Steuererklaerung_{}_{}", self.tax_year, last_name)
    }

    /// Labelled amounts in display order.
    pub fn rows(&self) -> Vec<(&'static str, Decimal)> {
        vec![
            ("Bruttoarbeitslohn", self.gross_salary),
            ("Lohnsteuer", self.income_tax),
            ("Solidaritätszuschlag", self.solidarity_surcharge),
            ("Entfernungspauschale", self.expenses.commute_allowance),
            ("Homeoffice-Pauschale", self.expenses.home_office_allowance),
            ("Weitere Werbungskosten", self.expenses.itemized),
            ("Werbungskosten gesamt", self.expenses.total),
            ("Vorsorgeaufwendungen", self.insurances_total),
            ("Haushaltsnahe Ausgaben", self.household_services_total),
        ]
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;

    use super::*;
    use crate::calculations::total_expenses;
    use crate::models::{Expenses, Income, Insurances, PersonalData};

    fn sample() -> TaxData {
        TaxData::empty()
            .merge_section(
                PersonalData {
                    first_name: Some("Max".to_string()),
                    last_name: Some("Mustermann".to_string()),
                    ..Default::default()
                }
                .into(),
            )
            .merge_section(
                Income {
                    gross_salary: Some(dec!(62000)),
                    income_tax: Some(dec!(12500)),
                    solidarity_surcharge: None,
                }
                .into(),
            )
            .merge_section(
                Expenses {
                    commute_days: Some(220),
                    commute_distance: Some(dec!(40)),
                    home_office_days: Some(210),
                    account_fees: Some(dec!(16)),
                    ..Default::default()
                }
                .into(),
            )
            .merge_section(
                Insurances {
                    health_insurance: Some(dec!(5500)),
                    liability_insurance: Some(dec!(85)),
                }
                .into(),
            )
    }

    #[test]
    fn summary_uses_the_same_expense_figures_as_the_calculator() {
        let data = sample();

        let summary = DeclarationSummary::build(2024, &data);

        assert_eq!(summary.expenses, ExpenseBreakdown::from_expenses(&data.expenses));
        assert_eq!(summary.expenses.total, total_expenses(&data.expenses));
        assert_eq!(summary.expenses.total, dec!(4268.00));
    }

    #[test]
    fn unset_amounts_show_as_zero() {
        let summary = DeclarationSummary::build(2024, &sample());

        assert_eq!(summary.solidarity_surcharge, dec!(0));
        assert_eq!(summary.household_services_total, dec!(0));
        assert_eq!(summary.insurances_total, dec!(5585));
    }

    #[test]
    fn document_name_falls_back_without_last_name() {
        let named = DeclarationSummary::build(2023, &sample());
        let anonymous = DeclarationSummary::build(2023, &TaxData::empty());

        assert_eq!(named.document_name(), "Steuererklaerung_2023_Mustermann");
        assert_eq!(anonymous.document_name(), "Steuererklaerung_2023_Unbekannt");
        assert_eq!(anonymous.full_name(), None);
    }

    #[test]
    fn document_name_keeps_only_file_name_characters() {
        let with_last_name = |last_name: &str| DeclarationSummary {
            last_name: Some(last_name.to_string()),
            ..DeclarationSummary::build(2024, &TaxData::empty())
        };

        assert_eq!(
            with_last_name("Müller-Lüdenscheidt").document_name(),
            "Steuererklaerung_2024_Müller-Lüdenscheidt"
        );
        assert_eq!(
            with_last_name("../../etc/passwd").document_name(),
            "Steuererklaerung_2024_etcpasswd"
        );
        assert_eq!(
            with_last_name("von Stein\\x").document_name(),
            "Steuererklaerung_2024_vonSteinx"
        );
        assert_eq!(with_last_name("/..").document_name(), "Steuererklaerung_2024_Unbekannt");
    }

    #[test]
    fn rows_list_every_figure_once() {
        let rows = DeclarationSummary::build(2024, &sample()).rows();

        assert_eq!(rows.len(), 9);
        assert_eq!(rows[6], ("Werbungskosten gesamt", dec!(4268.00)));
    }
}
