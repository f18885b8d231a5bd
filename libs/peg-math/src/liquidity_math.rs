use crate::full_math::{mul_div, mul_u256, sqrt};
use crate::MathError;
use peg_types::MINIMUM_LIQUIDITY;
use soroban_sdk::{Env, U256};

/// Shares for the first deposit: sqrt(amount0 * amount1) - MINIMUM_LIQUIDITY
///
/// Amounts are normalized. Zero when the deposit cannot cover the locked shares.
pub fn initial_liquidity(env: &Env, amount0: u128, amount1: u128) -> u128 {
    sqrt(env, &mul_u256(env, amount0, amount1)).saturating_sub(MINIMUM_LIQUIDITY as u128)
}

/// Shares for a later deposit, the smaller of the two ratios
///
/// Normalized amounts and reserves give the same ratios as raw ones; only the
/// result has to fit 128 bits.
pub fn proportional_liquidity(
    env: &Env,
    amounts: (u128, u128),
    reserves: (u128, u128),
    total_supply: u128,
) -> Result<u128, MathError> {
    if reserves.0 == 0 || reserves.1 == 0 {
        return Ok(0);
    }
    let liquidity0 = mul_u256(env, amounts.0, total_supply).div(&U256::from_u128(env, reserves.0));
    let liquidity1 = mul_u256(env, amounts.1, total_supply).div(&U256::from_u128(env, reserves.1));
    let liquidity = if liquidity0 < liquidity1 { liquidity0 } else { liquidity1 };
    liquidity.to_u128().ok_or(MathError::Overflow)
}

/// Pro-rata share of `balance` redeemed by `liquidity` (rounds down)
pub fn redeemable(env: &Env, liquidity: u128, balance: u128, total_supply: u128) -> u128 {
    mul_div(env, liquidity, balance, total_supply)
}

/// Shares owed to the protocol for the invariant growth since `k_last`
///
/// total_supply * (sqrt(k) - sqrt(k_last)) / (5 * sqrt(k) + sqrt(k_last)),
/// i.e. one sixth of the growth.
pub fn protocol_fee_liquidity(env: &Env, total_supply: u128, k: &U256, k_last: &U256) -> u128 {
    let root_k = sqrt(env, k);
    let root_k_last = sqrt(env, k_last);
    if root_k <= root_k_last {
        return 0;
    }
    let denominator = root_k * 5 + root_k_last;
    mul_div(env, total_supply, root_k - root_k_last, denominator)
}
