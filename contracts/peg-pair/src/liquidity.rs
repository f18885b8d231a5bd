use peg_math::{initial_liquidity, normalize, proportional_liquidity, redeemable};
use peg_types::{zero_address, MINIMUM_LIQUIDITY};
use soroban_sdk::{log, token, Address, Env};

use crate::errors::PairError;
use crate::events;
use crate::invariants;
use crate::reserves::{balances, mint_fee, normalized_reserves, record_k_last, update};
use crate::share::{burn_shares, mint_shares};
use crate::storage::{get_balance, get_config, get_state, set_state};

/// Mint shares for the tokens sent to the pair since the last sync
pub fn mint(env: &Env, to: &Address) -> Result<i128, PairError> {
    let config = get_config(env)?;
    let mut state = get_state(env)?;

    let (balance0, balance1) = balances(env, &config);
    let amount0 = balance0 - state.reserve0;
    let amount1 = balance1 - state.reserve1;
    if amount0 < 0 || amount1 < 0 {
        return Err(PairError::InsufficientLiquidityMinted);
    }

    let fee_on = mint_fee(env, &config, &mut state)?;

    // Normalized figures fit 128 bits, so the products below fit 256 bits
    let amount0_n = normalize(amount0, config.scale0)?;
    let amount1_n = normalize(amount1, config.scale1)?;
    let reserves_n = normalized_reserves(&config, &state)?;

    let liquidity = if state.total_supply == 0 {
        let liquidity = initial_liquidity(env, amount0_n, amount1_n);
        if liquidity > 0 {
            log!(env, "first deposit", amount0, amount1);
            mint_shares(env, &mut state, &zero_address(env), MINIMUM_LIQUIDITY)?;
        }
        liquidity
    } else {
        proportional_liquidity(
            env,
            (amount0_n, amount1_n),
            reserves_n,
            state.total_supply as u128,
        )?
    };
    if liquidity == 0 {
        return Err(PairError::InsufficientLiquidityMinted);
    }
    let liquidity = i128::try_from(liquidity).map_err(|_| PairError::Overflow)?;

    mint_shares(env, &mut state, to, liquidity)?;
    update(env, &config, &mut state, balance0, balance1)?;
    record_k_last(env, &config, &mut state, fee_on)?;
    set_state(env, &state);
    debug_assert!(invariants::minimum_liquidity_locked(env, &state));

    events::mint(env, to, amount0, amount1, liquidity);
    Ok(liquidity)
}

/// Redeem the shares sent to the pair for a pro-rata slice of both reserves
pub fn burn(env: &Env, to: &Address) -> Result<(i128, i128), PairError> {
    let config = get_config(env)?;
    let mut state = get_state(env)?;
    let this = env.current_contract_address();

    let (balance0, balance1) = balances(env, &config);
    let liquidity = get_balance(env, &this);

    let fee_on = mint_fee(env, &config, &mut state)?;
    let total_supply = state.total_supply as u128;
    if total_supply == 0 {
        return Err(PairError::InsufficientLiquidityBurned);
    }

    let amount0 = redeemable(env, liquidity as u128, balance0 as u128, total_supply) as i128;
    let amount1 = redeemable(env, liquidity as u128, balance1 as u128, total_supply) as i128;
    if amount0 == 0 || amount1 == 0 {
        return Err(PairError::InsufficientLiquidityBurned);
    }

    burn_shares(env, &mut state, &this, liquidity)?;
    token::Client::new(env, &config.token0).transfer(&this, to, &amount0);
    token::Client::new(env, &config.token1).transfer(&this, to, &amount1);

    let (balance0, balance1) = balances(env, &config);
    update(env, &config, &mut state, balance0, balance1)?;
    record_k_last(env, &config, &mut state, fee_on)?;
    set_state(env, &state);

    events::burn(env, to, amount0, amount1, liquidity);
    Ok((amount0, amount1))
}
