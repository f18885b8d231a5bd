use peg_math::{k_holds, within_liquidity_unit};
use peg_types::SwapCalleeClient;
use soroban_sdk::{log, token, Address, Bytes, Env};

use crate::errors::PairError;
use crate::events;
use crate::invariants;
use crate::reserves::{balances, update};
use crate::storage::{get_config, get_state, set_state};

/// Optimistic swap: pay out first, then check that the pair was paid
///
/// With non-empty `data` the recipient's `on_swap` hook runs between the
/// payout and the check, which is where a flash borrower settles.
pub fn execute_swap(
    env: &Env,
    amount0_out: i128,
    amount1_out: i128,
    to: &Address,
    data: &Bytes,
) -> Result<(), PairError> {
    if amount0_out < 0 || amount1_out < 0 || (amount0_out == 0 && amount1_out == 0) {
        return Err(PairError::InsufficientOutputAmount);
    }

    let config = get_config(env)?;
    let mut state = get_state(env)?;
    if amount0_out >= state.reserve0 || amount1_out >= state.reserve1 {
        return Err(PairError::InsufficientLiquidity);
    }
    if *to == config.token0 || *to == config.token1 {
        return Err(PairError::InvalidTo);
    }

    let this = env.current_contract_address();
    if amount0_out > 0 {
        token::Client::new(env, &config.token0).transfer(&this, to, &amount0_out);
    }
    if amount1_out > 0 {
        token::Client::new(env, &config.token1).transfer(&this, to, &amount1_out);
    }
    if !data.is_empty() {
        log!(env, "flash swap callback", to.clone());
        SwapCalleeClient::new(env, to).on_swap(&this, &amount0_out, &amount1_out, data);
    }

    let (balance0, balance1) = balances(env, &config);
    let amount0_in = surplus(balance0, state.reserve0 - amount0_out);
    let amount1_in = surplus(balance1, state.reserve1 - amount1_out);
    if amount0_in == 0 && amount1_in == 0 {
        return Err(PairError::InsufficientInputAmount);
    }

    // Both checks are unchanged by the decimal scales, so they run on raw amounts
    let reserves = (state.reserve0 as u128, state.reserve1 as u128);
    if !within_liquidity_unit(env, amount0_out as u128, reserves.0, config.max_output_bps)
        || !within_liquidity_unit(env, amount1_out as u128, reserves.1, config.max_output_bps)
    {
        return Err(PairError::LiquidityUnitExceeded);
    }

    let balances = (balance0 as u128, balance1 as u128);
    let amounts_in = (amount0_in as u128, amount1_in as u128);
    if !k_holds(env, balances, amounts_in, reserves, config.swap_fee) {
        return Err(PairError::KInvariant);
    }
    debug_assert!(invariants::k_non_decreasing(env, reserves, balances));

    update(env, &config, &mut state, balance0, balance1)?;
    set_state(env, &state);

    events::swap(env, to, (amount0_in, amount1_in), (amount0_out, amount1_out));
    Ok(())
}

/// Send any balance above the reserves to `to`
pub fn skim(env: &Env, to: &Address) -> Result<(), PairError> {
    let config = get_config(env)?;
    let state = get_state(env)?;
    let this = env.current_contract_address();

    let (balance0, balance1) = balances(env, &config);
    let excess0 = surplus(balance0, state.reserve0);
    let excess1 = surplus(balance1, state.reserve1);
    if excess0 > 0 {
        token::Client::new(env, &config.token0).transfer(&this, to, &excess0);
    }
    if excess1 > 0 {
        token::Client::new(env, &config.token1).transfer(&this, to, &excess1);
    }
    Ok(())
}

/// Force the reserves to match the balances
pub fn sync(env: &Env) -> Result<(), PairError> {
    let config = get_config(env)?;
    let mut state = get_state(env)?;
    let (balance0, balance1) = balances(env, &config);
    update(env, &config, &mut state, balance0, balance1)?;
    set_state(env, &state);
    Ok(())
}

fn surplus(balance: i128, floor: i128) -> i128 {
    if balance > floor {
        balance - floor
    } else {
        0
    }
}
