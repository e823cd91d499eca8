//! Money arithmetic helpers using decimal arithmetic.
//!
//! The backend exchanges monetary values as JSON numbers; locally they are
//! held as [`rust_decimal::Decimal`] to avoid float drift. Line subtotals
//! are always recomputed to two decimal places.

use rust_decimal::Decimal;

/// Decimal places used for all monetary values.
pub const MONEY_DP: u32 = 2;

/// Round a monetary amount to two decimal places.
#[must_use]
pub fn round_money(amount: Decimal) -> Decimal {
    amount.round_dp(MONEY_DP)
}

/// Compute a line subtotal: `unit_price * quantity`, rounded to two
/// decimal places.
#[must_use]
pub fn line_subtotal(unit_price: Decimal, quantity: u32) -> Decimal {
    round_money(unit_price * Decimal::from(quantity))
}
