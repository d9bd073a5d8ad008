/// Tax years the wizard offers, newest first.
pub const SUPPORTED_TAX_YEARS: [i32; 3] = [2024, 2023, 2022];

pub const DEFAULT_TAX_YEAR: i32 = 2024;

pub fn is_supported_tax_year(year: i32) -> bool {
    SUPPORTED_TAX_YEARS.contains(&year)
}
