use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use crate::error::{Result, ValuationError};

pub fn market_value(quantity: Decimal, price: Decimal) -> Result<Decimal> {
    quantity
        .checked_mul(price)
        .ok_or(ValuationError::Overflow("market value"))
}

pub fn checked_sum<I>(values: I, what: &'static str) -> Result<Decimal>
where
    I: IntoIterator<Item = Decimal>,
{
    values.into_iter().try_fold(Decimal::ZERO, |sum, value| {
        sum.checked_add(value).ok_or(ValuationError::Overflow(what))
    })
}

/// Percent change from `base` to `value`, `Ok(None)` when `base` is zero.
pub fn percent_change(base: Decimal, value: Decimal) -> Result<Option<Decimal>> {
    if base.is_zero() {
        return Ok(None);
    }
    value
        .checked_sub(base)
        .ok_or(ValuationError::Overflow("pnl percent"))
        .and_then(|gain| gain_percent(gain, base))
}

/// Gain relative to `base` in percent, `Ok(None)` when `base` is zero.
pub fn gain_percent(gain: Decimal, base: Decimal) -> Result<Option<Decimal>> {
    if base.is_zero() {
        return Ok(None);
    }
    gain.checked_div(base)
        .and_then(|ratio| ratio.checked_mul(dec!(100)))
        .map(Some)
        .ok_or(ValuationError::Overflow("pnl percent"))
}

pub fn share_of(part: Decimal, whole: Decimal) -> Decimal {
    if whole.is_zero() {
        return Decimal::ZERO;
    }
    part.checked_div(whole).unwrap_or(Decimal::ZERO)
}
