//! Decimal helpers shared by the allowance and section totals.

use rust_decimal::{Decimal, RoundingStrategy};

/// Round a euro amount to whole cents, half away from zero.
///
/// ```
/// use rust_decimal_macros::dec;
/// use tax_core::calculations::common::round_cents;
///
/// assert_eq!(round_cents(dec!(1093.005)), dec!(1093.01));
/// assert_eq!(round_cents(dec!(-0.125)), dec!(-0.13));
/// ```
pub fn round_cents(amount: Decimal) -> Decimal {
    amount.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
}

/// Limit `amount` to a statutory maximum.
pub fn capped(
    amount: Decimal,
    cap: Decimal,
) -> Decimal {
    amount.min(cap)
}

/// Sum of the entered amounts; unset fields count as zero. Saturates at
/// [`Decimal::MAX`].
pub fn sum_amounts<I>(amounts: I) -> Decimal
where
    I: IntoIterator<Item = Option<Decimal>>,
{
    amounts
        .into_iter()
        .flatten()
        .fold(Decimal::ZERO, Decimal::saturating_add)
}
