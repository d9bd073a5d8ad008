mod expenses;
mod household_services;
mod income;
mod insurances;
mod personal_data;
mod section;
mod tax_data;
mod tax_year;

pub use expenses::Expenses;
pub use household_services::HouseholdServices;
pub use income::Income;
pub use insurances::Insurances;
pub use personal_data::{MaritalStatus, PersonalData, Religion};
pub use section::Section;
pub use tax_data::{SectionData, TaxData};
pub use tax_year::{DEFAULT_TAX_YEAR, SUPPORTED_TAX_YEARS, is_supported_tax_year};
