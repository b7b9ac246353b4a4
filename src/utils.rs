//! Loan economics helpers.
//!
//! Loan terms arrive from the chain as wei-denominated [`U256`] values. These helpers
//! convert them to ether-denominated [`Decimal`]s and derive the annualised rate a
//! borrower pays.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use crate::Result;
use crate::error::Error;
use crate::types::U256;

/// Number of decimals between wei and ether.
pub const ETHER_DECIMALS: u32 = 18;

const DAYS_PER_YEAR: Decimal = dec!(365);

/// Converts a wei amount to ether.
///
/// Fails when the amount does not fit the 96-bit mantissa of [`Decimal`], i.e. above
/// roughly 79 billion ether.
pub fn format_ether(wei: U256) -> Result<Decimal> {
    let wei = i128::try_from(wei)
        .map_err(|_err| Error::validation(format!("wei amount {wei} out of range")))?;

    Ok(Decimal::try_from_i128_with_scale(wei, ETHER_DECIMALS)?.normalize())
}

/// Annual percentage rate of a loan, as a percentage.
///
/// `(repayment - principal) / principal * 365 / duration_days * 100`
pub fn calc_apr(principal: Decimal, repayment: Decimal, duration_days: u32) -> Result<Decimal> {
    if principal.is_zero() {
        return Err(Error::validation("principal must not be zero"));
    }
    if duration_days == 0 {
        return Err(Error::validation("loan duration must be at least one day"));
    }

    let interest = repayment
        .checked_sub(principal)
        .ok_or_else(|| Error::validation("repayment out of range"))?;
    let periods_per_year = DAYS_PER_YEAR / Decimal::from(duration_days);

    interest
        .checked_div(principal)
        .and_then(|rate| rate.checked_mul(periods_per_year))
        .and_then(|rate| rate.checked_mul(Decimal::ONE_HUNDRED))
        .ok_or_else(|| Error::validation("APR out of range"))
}
