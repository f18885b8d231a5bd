use peg_types::{BPS_DENOMINATOR, FEE_DENOMINATOR};
use soroban_sdk::{Env, U256};

use crate::full_math::mul_wide;
use crate::MathError;

/// Amount of B worth `amount_a` at the current reserve ratio (rounds down)
pub fn quote(env: &Env, amount_a: i128, reserve_a: i128, reserve_b: i128) -> Result<i128, MathError> {
    if amount_a <= 0 {
        return Err(MathError::InsufficientAmount);
    }
    if reserve_a <= 0 || reserve_b <= 0 {
        return Err(MathError::InsufficientLiquidity);
    }
    let amount_b = u256(env, amount_a)
        .mul(&u256(env, reserve_b))
        .div(&u256(env, reserve_a));
    i128_from_u256(&amount_b)
}

/// Output for an exact input, net of the per-mille `fee` (rounds down)
///
/// out = in * (1000 - fee) * r_out / (r_in * 1000 + in * (1000 - fee))
pub fn get_amount_out(
    env: &Env,
    amount_in: i128,
    reserve_in: i128,
    reserve_out: i128,
    fee: u32,
) -> Result<i128, MathError> {
    if amount_in <= 0 {
        return Err(MathError::InsufficientAmount);
    }
    if reserve_in <= 0 || reserve_out <= 0 {
        return Err(MathError::InsufficientLiquidity);
    }
    let amount_in_with_fee = u256(env, amount_in).mul(&U256::from_u32(env, FEE_DENOMINATOR - fee));
    let numerator = amount_in_with_fee.mul(&u256(env, reserve_out));
    let denominator = u256(env, reserve_in)
        .mul(&U256::from_u32(env, FEE_DENOMINATOR))
        .add(&amount_in_with_fee);
    i128_from_u256(&numerator.div(&denominator))
}

/// Input required for an exact output (rounds up)
///
/// in = r_in * out * 1000 / ((r_out - out) * (1000 - fee)) + 1
pub fn get_amount_in(
    env: &Env,
    amount_out: i128,
    reserve_in: i128,
    reserve_out: i128,
    fee: u32,
) -> Result<i128, MathError> {
    if amount_out <= 0 {
        return Err(MathError::InsufficientAmount);
    }
    if reserve_in <= 0 || reserve_out <= 0 || amount_out >= reserve_out {
        return Err(MathError::InsufficientLiquidity);
    }
    let numerator = u256(env, reserve_in)
        .mul(&u256(env, amount_out))
        .mul(&U256::from_u32(env, FEE_DENOMINATOR));
    let denominator =
        u256(env, reserve_out - amount_out).mul(&U256::from_u32(env, FEE_DENOMINATOR - fee));
    let amount_in = i128_from_u256(&numerator.div(&denominator))?;
    amount_in.checked_add(1).ok_or(MathError::Overflow)
}

/// Whether `amount_out` stays within `max_output_bps` of `reserve_out`
///
/// Both sides scale by the same factor, so raw amounts give the same answer
/// as normalized ones.
pub fn within_liquidity_unit(env: &Env, amount_out: u128, reserve_out: u128, max_output_bps: u32) -> bool {
    let taken = U256::from_u128(env, amount_out).mul(&U256::from_u32(env, BPS_DENOMINATOR));
    let allowed = U256::from_u128(env, reserve_out).mul(&U256::from_u32(env, max_output_bps));
    taken <= allowed
}

/// Fee-adjusted balance used by the invariant check: balance * 1000 - amount_in * fee
pub fn adjusted_balance(env: &Env, balance: u128, amount_in: u128, fee: u32) -> U256 {
    U256::from_u128(env, balance)
        .mul(&U256::from_u32(env, FEE_DENOMINATOR))
        .sub(&U256::from_u128(env, amount_in).mul(&U256::from_u32(env, fee)))
}

/// Constant-product check net of fees
///
/// (b0 * 1000 - in0 * fee) * (b1 * 1000 - in1 * fee) >= r0 * r1 * 1000^2
///
/// Multiplying every term of one side by its scale multiplies both products by
/// `scale0 * scale1`, so raw amounts decide it exactly like normalized ones.
/// Products are compared at 512 bits, which covers any pair of 128-bit balances.
pub fn k_holds(
    env: &Env,
    balances: (u128, u128),
    amounts_in: (u128, u128),
    reserves: (u128, u128),
    fee: u32,
) -> bool {
    let adjusted0 = adjusted_balance(env, balances.0, amounts_in.0, fee);
    let adjusted1 = adjusted_balance(env, balances.1, amounts_in.1, fee);
    let scaled0 = adjusted_balance(env, reserves.0, 0, 0);
    let scaled1 = adjusted_balance(env, reserves.1, 0, 0);
    mul_wide(env, &adjusted0, &adjusted1) >= mul_wide(env, &scaled0, &scaled1)
}

fn u256(env: &Env, value: i128) -> U256 {
    U256::from_u128(env, value as u128)
}

fn i128_from_u256(value: &U256) -> Result<i128, MathError> {
    value
        .to_u128()
        .and_then(|v| i128::try_from(v).ok())
        .ok_or(MathError::Overflow)
}
