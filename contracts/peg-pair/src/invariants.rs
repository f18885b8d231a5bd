// ============================================================================
// INVARIANTS
// ============================================================================
//
// Properties every completed call must leave behind. They back debug
// assertions in the swap path and the checks in the test suite.
//
// 1. ORDERING      token0 < token1
// 2. BOUNDS        normalized reserves fit 128 bits
// 3. PRODUCT       reserve0 * reserve1 never decreases on a swap
// 4. SUPPLY        total supply includes the locked MINIMUM_LIQUIDITY once minted
//
// ============================================================================

use peg_math::mul_u256;
use peg_types::{zero_address, PairConfig, PairState, MINIMUM_LIQUIDITY};
use soroban_sdk::Env;

use crate::storage::get_balance;

/// Invariant: tokens are stored in ascending order
pub fn tokens_ordered(config: &PairConfig) -> bool {
    config.token0 < config.token1
}

/// Invariant: both normalized reserves fit 128 bits
///
/// Property:
///   0 <= reserve_i * scale_i <= u128::MAX
pub fn reserves_in_bounds(config: &PairConfig, state: &PairState) -> bool {
    let within = |reserve: i128, scale: u128| {
        reserve >= 0 && (reserve as u128).checked_mul(scale).is_some()
    };
    within(state.reserve0, config.scale0) && within(state.reserve1, config.scale1)
}

/// Invariant: the product did not shrink
///
/// Property:
///   after.0 * after.1 >= before.0 * before.1
///
/// Scaling both sides by `scale0 * scale1` keeps the comparison, so raw
/// reserves stand in for normalized ones.
pub fn k_non_decreasing(env: &Env, before: (u128, u128), after: (u128, u128)) -> bool {
    mul_u256(env, after.0, after.1) >= mul_u256(env, before.0, before.1)
}

/// Invariant: once shares exist, the locked minimum is part of them and unspent
pub fn minimum_liquidity_locked(env: &Env, state: &PairState) -> bool {
    if state.total_supply == 0 {
        return true;
    }
    state.total_supply >= MINIMUM_LIQUIDITY
        && get_balance(env, &zero_address(env)) >= MINIMUM_LIQUIDITY
}
