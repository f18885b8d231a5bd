//! Pair lookup and path pricing shared by the router entry points.

use peg_math::MathError;
use peg_types::{sort_tokens, FactoryClient, PairClient};
use soroban_sdk::{Address, Bytes, Env, Vec};

use crate::RouterError;

impl From<MathError> for RouterError {
    fn from(err: MathError) -> Self {
        match err {
            MathError::InsufficientAmount => RouterError::InsufficientAmount,
            MathError::InsufficientLiquidity => RouterError::InsufficientLiquidity,
            MathError::Overflow => RouterError::Overflow,
        }
    }
}

pub fn check_deadline(env: &Env, deadline: u64) -> Result<(), RouterError> {
    if env.ledger().timestamp() > deadline {
        return Err(RouterError::Expired);
    }
    Ok(())
}

pub fn check_amounts(amounts: &[i128]) -> Result<(), RouterError> {
    if amounts.iter().any(|amount| *amount < 0) {
        return Err(RouterError::NegativeAmount);
    }
    Ok(())
}

pub fn swap_fee(env: &Env, factory: &Address) -> u32 {
    FactoryClient::new(env, factory).pair_params().swap_fee
}

pub fn pair_for(
    env: &Env,
    factory: &Address,
    token_a: &Address,
    token_b: &Address,
) -> Result<Address, RouterError> {
    FactoryClient::new(env, factory)
        .get_pair(token_a, token_b)
        .ok_or(RouterError::PairNotFound)
}

/// Reserves of the `(token_a, token_b)` pair, in that order
pub fn get_reserves(
    env: &Env,
    factory: &Address,
    token_a: &Address,
    token_b: &Address,
) -> Result<(i128, i128), RouterError> {
    let (token0, _) = sort_tokens(token_a, token_b).ok_or(RouterError::InvalidPath)?;
    let pair = pair_for(env, factory, token_a, token_b)?;
    let (reserve0, reserve1, _) = PairClient::new(env, &pair).get_reserves();
    if *token_a == token0 {
        Ok((reserve0, reserve1))
    } else {
        Ok((reserve1, reserve0))
    }
}

/// Amounts along `path` for an exact input; the first entry is `amount_in`
pub fn get_amounts_out(
    env: &Env,
    factory: &Address,
    amount_in: i128,
    path: &Vec<Address>,
) -> Result<Vec<i128>, RouterError> {
    if path.len() < 2 {
        return Err(RouterError::InvalidPath);
    }
    let fee = swap_fee(env, factory);

    let mut amounts = Vec::new(env);
    amounts.push_back(amount_in);
    let mut amount = amount_in;
    for i in 0..path.len() - 1 {
        let (reserve_in, reserve_out) =
            get_reserves(env, factory, &path.get_unchecked(i), &path.get_unchecked(i + 1))?;
        amount = peg_math::get_amount_out(env, amount, reserve_in, reserve_out, fee)?;
        amounts.push_back(amount);
    }
    Ok(amounts)
}

/// Amounts along `path` for an exact output; the last entry is `amount_out`
pub fn get_amounts_in(
    env: &Env,
    factory: &Address,
    amount_out: i128,
    path: &Vec<Address>,
) -> Result<Vec<i128>, RouterError> {
    if path.len() < 2 {
        return Err(RouterError::InvalidPath);
    }
    let fee = swap_fee(env, factory);

    let mut amounts = Vec::new(env);
    amounts.push_front(amount_out);
    let mut amount = amount_out;
    for i in (1..path.len()).rev() {
        let (reserve_in, reserve_out) =
            get_reserves(env, factory, &path.get_unchecked(i - 1), &path.get_unchecked(i))?;
        amount = peg_math::get_amount_in(env, amount, reserve_in, reserve_out, fee)?;
        amounts.push_front(amount);
    }
    Ok(amounts)
}

/// Run the hops of `path`; the input must already sit in the first pair
///
/// Each intermediate output goes straight to the next pair.
pub fn execute_swaps(
    env: &Env,
    factory: &Address,
    amounts: &Vec<i128>,
    path: &Vec<Address>,
    to: &Address,
) -> Result<(), RouterError> {
    let empty = Bytes::new(env);
    let hops = path.len() - 1;
    let mut pair = pair_for(env, factory, &path.get_unchecked(0), &path.get_unchecked(1))?;

    for i in 0..hops {
        let input = path.get_unchecked(i);
        let output = path.get_unchecked(i + 1);
        let (token0, _) = sort_tokens(&input, &output).ok_or(RouterError::InvalidPath)?;
        let amount_out = amounts.get_unchecked(i + 1);
        let (amount0_out, amount1_out) = if input == token0 {
            (0, amount_out)
        } else {
            (amount_out, 0)
        };

        let next_pair = if i + 1 < hops {
            Some(pair_for(env, factory, &output, &path.get_unchecked(i + 2))?)
        } else {
            None
        };
        let recipient = next_pair.clone().unwrap_or_else(|| to.clone());

        PairClient::new(env, &pair).swap(&amount0_out, &amount1_out, &recipient, &empty);
        if let Some(next_pair) = next_pair {
            pair = next_pair;
        }
    }
    Ok(())
}
