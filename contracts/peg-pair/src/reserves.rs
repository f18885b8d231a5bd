use peg_math::{accumulate, encode_price, mul_u256, normalize, protocol_fee_liquidity};
use peg_types::{FactoryClient, PairConfig, PairState};
use soroban_sdk::{log, token, Env, U256};

use crate::errors::PairError;
use crate::events;
use crate::invariants;
use crate::share::mint_shares;

/// Token balances currently held by the pair
pub fn balances(env: &Env, config: &PairConfig) -> (i128, i128) {
    let this = env.current_contract_address();
    (
        token::Client::new(env, &config.token0).balance(&this),
        token::Client::new(env, &config.token1).balance(&this),
    )
}

/// Reserves projected onto the internal precision
pub fn normalized_reserves(config: &PairConfig, state: &PairState) -> Result<(u128, u128), PairError> {
    Ok((
        normalize(state.reserve0, config.scale0)?,
        normalize(state.reserve1, config.scale1)?,
    ))
}

/// Integrate the previous price over the elapsed time, then adopt `balance0`/`balance1`
/// as the new reserves
pub fn update(
    env: &Env,
    config: &PairConfig,
    state: &mut PairState,
    balance0: i128,
    balance1: i128,
) -> Result<(), PairError> {
    normalize(balance0, config.scale0)?;
    normalize(balance1, config.scale1)?;

    let now = env.ledger().timestamp();
    // Accumulators only need the interval modulo 2^32
    let elapsed = (now as u32).wrapping_sub(state.block_timestamp_last as u32);
    if elapsed > 0 && state.reserve0 != 0 && state.reserve1 != 0 {
        let (reserve0, reserve1) = normalized_reserves(config, state)?;
        state.price0_cumulative_last = accumulate(
            env,
            &state.price0_cumulative_last,
            &encode_price(env, reserve1, reserve0),
            elapsed,
        );
        state.price1_cumulative_last = accumulate(
            env,
            &state.price1_cumulative_last,
            &encode_price(env, reserve0, reserve1),
            elapsed,
        );
    }

    state.reserve0 = balance0;
    state.reserve1 = balance1;
    state.block_timestamp_last = now;
    debug_assert!(invariants::reserves_in_bounds(config, state));
    events::sync(env, balance0, balance1);
    Ok(())
}

/// Mint the protocol's cut of the invariant growth since `k_last`
///
/// Returns whether the protocol fee is switched on.
pub fn mint_fee(env: &Env, config: &PairConfig, state: &mut PairState) -> Result<bool, PairError> {
    let fee_to = FactoryClient::new(env, &config.factory).fee_to();
    let zero = U256::from_u32(env, 0);

    match fee_to {
        Some(fee_to) => {
            if state.k_last != zero {
                let (reserve0, reserve1) = normalized_reserves(config, state)?;
                let k = mul_u256(env, reserve0, reserve1);
                let liquidity =
                    protocol_fee_liquidity(env, state.total_supply as u128, &k, &state.k_last);
                if liquidity > 0 {
                    let liquidity = i128::try_from(liquidity).map_err(|_| PairError::Overflow)?;
                    log!(env, "protocol fee minted", fee_to, liquidity);
                    mint_shares(env, state, &fee_to, liquidity)?;
                }
            }
            Ok(true)
        }
        None => {
            if state.k_last != zero {
                state.k_last = zero;
            }
            Ok(false)
        }
    }
}

/// Snapshot the invariant after a liquidity event when the protocol fee is on
pub fn record_k_last(env: &Env, config: &PairConfig, state: &mut PairState, fee_on: bool) -> Result<(), PairError> {
    if fee_on {
        let (reserve0, reserve1) = normalized_reserves(config, state)?;
        state.k_last = mul_u256(env, reserve0, reserve1);
    }
    Ok(())
}
