//! Liquidity-share ledger of the pair.

use peg_types::PairState;
use soroban_sdk::{Address, Env};

use crate::errors::PairError;
use crate::events;
use crate::storage::{get_allowance, get_balance, set_allowance, set_balance, AllowanceValue};

pub fn mint_shares(env: &Env, state: &mut PairState, to: &Address, amount: i128) -> Result<(), PairError> {
    state.total_supply = state
        .total_supply
        .checked_add(amount)
        .ok_or(PairError::Overflow)?;
    let balance = get_balance(env, to);
    set_balance(env, to, balance + amount);
    events::transfer(env, &peg_types::zero_address(env), to, amount);
    Ok(())
}

pub fn burn_shares(env: &Env, state: &mut PairState, from: &Address, amount: i128) -> Result<(), PairError> {
    let balance = get_balance(env, from);
    if balance < amount {
        return Err(PairError::InsufficientBalance);
    }
    set_balance(env, from, balance - amount);
    state.total_supply -= amount;
    events::transfer(env, from, &peg_types::zero_address(env), amount);
    Ok(())
}

pub fn move_shares(env: &Env, from: &Address, to: &Address, amount: i128) -> Result<(), PairError> {
    if amount < 0 {
        return Err(PairError::NegativeAmount);
    }
    let from_balance = get_balance(env, from);
    if from_balance < amount {
        return Err(PairError::InsufficientBalance);
    }
    set_balance(env, from, from_balance - amount);
    let to_balance = get_balance(env, to);
    set_balance(env, to, to_balance + amount);
    events::transfer(env, from, to, amount);
    Ok(())
}

/// Spendable allowance; zero once the expiration ledger has passed
pub fn allowance(env: &Env, from: &Address, spender: &Address) -> i128 {
    let value = get_allowance(env, from, spender);
    if value.expiration_ledger < env.ledger().sequence() {
        0
    } else {
        value.amount
    }
}

pub fn approve(
    env: &Env,
    from: &Address,
    spender: &Address,
    amount: i128,
    expiration_ledger: u32,
) -> Result<(), PairError> {
    if amount < 0 {
        return Err(PairError::NegativeAmount);
    }
    if amount > 0 && expiration_ledger < env.ledger().sequence() {
        return Err(PairError::InvalidParams);
    }
    set_allowance(
        env,
        from,
        spender,
        &AllowanceValue {
            amount,
            expiration_ledger,
        },
    );
    events::approve(env, from, spender, amount, expiration_ledger);
    Ok(())
}

/// An allowance of `i128::MAX` is never decremented
pub fn spend_allowance(env: &Env, from: &Address, spender: &Address, amount: i128) -> Result<(), PairError> {
    if amount < 0 {
        return Err(PairError::NegativeAmount);
    }
    let available = allowance(env, from, spender);
    if available < amount {
        return Err(PairError::InsufficientAllowance);
    }
    if available != i128::MAX && amount > 0 {
        let value = get_allowance(env, from, spender);
        set_allowance(
            env,
            from,
            spender,
            &AllowanceValue {
                amount: available - amount,
                expiration_ledger: value.expiration_ledger,
            },
        );
    }
    Ok(())
}
