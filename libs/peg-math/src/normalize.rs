use peg_types::{BASE_DECIMALS, MAX_DECIMALS};

use crate::MathError;

/// Scale factors projecting both tokens onto a common precision
///
/// Returns `(scale0, scale1, precision)` with
/// `precision = max(BASE_DECIMALS, decimals0, decimals1)` and
/// `scale_i = 10^(precision - decimals_i)`. `None` if a token reports
/// more than `MAX_DECIMALS` decimals.
pub fn decimal_scales(decimals0: u32, decimals1: u32) -> Option<(u128, u128, u32)> {
    if decimals0 > MAX_DECIMALS || decimals1 > MAX_DECIMALS {
        return None;
    }
    let precision = BASE_DECIMALS.max(decimals0).max(decimals1);
    let scale0 = 10u128.checked_pow(precision - decimals0)?;
    let scale1 = 10u128.checked_pow(precision - decimals1)?;
    Some((scale0, scale1, precision))
}

/// Raw token amount expressed at the pair's internal precision
///
/// The normalized figure has to fit 128 bits; that is the only size limit on a
/// reserve beyond the token's own `i128` balance.
pub fn normalize(amount: i128, scale: u128) -> Result<u128, MathError> {
    if amount < 0 {
        return Err(MathError::InsufficientAmount);
    }
    (amount as u128)
        .checked_mul(scale)
        .ok_or(MathError::Overflow)
}
