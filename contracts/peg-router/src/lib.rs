#![no_std]

mod library;
mod native;

#[cfg(test)]
mod test;

use library::{
    check_amounts, check_deadline, execute_swaps, get_reserves, pair_for, swap_fee,
};
use native::{deposit_native, withdraw_native};
use peg_types::{sort_tokens, FactoryClient, PairClient, PermitSignature};
use soroban_sdk::{
    contract, contracterror, contractimpl, contracttype, token, Address, Env, Vec,
};

#[contract]
pub struct PegRouter;

#[contracterror]
#[derive(Copy, Clone, Debug, Eq, PartialEq, PartialOrd, Ord)]
#[repr(u32)]
pub enum RouterError {
    AlreadyInitialized = 1,
    NotInitialized = 2,
    Expired = 3,
    InsufficientAmount = 4,
    InsufficientAAmount = 5,
    InsufficientBAmount = 6,
    InsufficientOutputAmount = 7,
    ExcessiveInputAmount = 8,
    InsufficientLiquidity = 9,
    InvalidPath = 10,
    PairNotFound = 11,
    NegativeAmount = 12,
    Overflow = 13,
}

/// Storage keys
#[contracttype]
#[derive(Clone)]
pub enum DataKey {
    Factory,
    /// The network's native asset contract
    Native,
    /// Wrapped form of the native asset, tradable in pairs
    WrappedNative,
}

const INSTANCE_TTL_THRESHOLD: u32 = 17280;
const INSTANCE_TTL_EXTEND: u32 = 518400;

#[contractimpl]
impl PegRouter {
    /// Initialize router with factory and native asset addresses
    pub fn initialize(
        env: Env,
        factory: Address,
        native: Address,
        wrapped_native: Address,
    ) -> Result<(), RouterError> {
        if env.storage().instance().has(&DataKey::Factory) {
            return Err(RouterError::AlreadyInitialized);
        }
        env.storage().instance().set(&DataKey::Factory, &factory);
        env.storage().instance().set(&DataKey::Native, &native);
        env.storage()
            .instance()
            .set(&DataKey::WrappedNative, &wrapped_native);
        extend_instance_ttl(&env);
        Ok(())
    }

    // ========================================================================
    // Liquidity
    // ========================================================================

    /// Deposit both tokens at the pair's current ratio, creating the pair if needed
    ///
    /// Returns (amount_a, amount_b, liquidity).
    pub fn add_liquidity(
        env: Env,
        sender: Address,
        token_a: Address,
        token_b: Address,
        amount_a_desired: i128,
        amount_b_desired: i128,
        amount_a_min: i128,
        amount_b_min: i128,
        to: Address,
        deadline: u64,
    ) -> Result<(i128, i128, i128), RouterError> {
        sender.require_auth();
        check_deadline(&env, deadline)?;
        check_amounts(&[amount_a_desired, amount_b_desired, amount_a_min, amount_b_min])?;

        let factory = get_factory(&env)?;
        let (amount_a, amount_b) = optimal_amounts(
            &env,
            &factory,
            &token_a,
            &token_b,
            (amount_a_desired, amount_b_desired),
            (amount_a_min, amount_b_min),
        )?;

        let pair = pair_for(&env, &factory, &token_a, &token_b)?;
        token::Client::new(&env, &token_a).transfer(&sender, &pair, &amount_a);
        token::Client::new(&env, &token_b).transfer(&sender, &pair, &amount_b);
        let liquidity = PairClient::new(&env, &pair).mint(&to);

        extend_instance_ttl(&env);
        Ok((amount_a, amount_b, liquidity))
    }

    /// Like `add_liquidity` with the native asset on one side
    ///
    /// Pulls `amount_native_desired`, wraps what the pair takes and returns the rest.
    pub fn add_liquidity_native(
        env: Env,
        sender: Address,
        token: Address,
        amount_token_desired: i128,
        amount_token_min: i128,
        amount_native_desired: i128,
        amount_native_min: i128,
        to: Address,
        deadline: u64,
    ) -> Result<(i128, i128, i128), RouterError> {
        sender.require_auth();
        check_deadline(&env, deadline)?;
        check_amounts(&[
            amount_token_desired,
            amount_token_min,
            amount_native_desired,
            amount_native_min,
        ])?;

        let factory = get_factory(&env)?;
        let native = get_native(&env)?;
        let wrapped = get_wrapped_native(&env)?;
        let router = env.current_contract_address();

        let (amount_token, amount_native) = optimal_amounts(
            &env,
            &factory,
            &token,
            &wrapped,
            (amount_token_desired, amount_native_desired),
            (amount_token_min, amount_native_min),
        )?;

        let pair = pair_for(&env, &factory, &token, &wrapped)?;
        token::Client::new(&env, &token).transfer(&sender, &pair, &amount_token);

        let native_client = token::Client::new(&env, &native);
        native_client.transfer(&sender, &router, &amount_native_desired);
        deposit_native(&env, &native, &wrapped, amount_native);
        token::Client::new(&env, &wrapped).transfer(&router, &pair, &amount_native);
        if amount_native_desired > amount_native {
            native_client.transfer(&router, &sender, &(amount_native_desired - amount_native));
        }

        let liquidity = PairClient::new(&env, &pair).mint(&to);
        extend_instance_ttl(&env);
        Ok((amount_token, amount_native, liquidity))
    }

    /// Burn `liquidity` shares of `sender` and pay both tokens to `to`
    ///
    /// The router moves the shares with `transfer_from`, so `sender` must have
    /// approved it first (or use the permit variant).
    pub fn remove_liquidity(
        env: Env,
        sender: Address,
        token_a: Address,
        token_b: Address,
        liquidity: i128,
        amount_a_min: i128,
        amount_b_min: i128,
        to: Address,
        deadline: u64,
    ) -> Result<(i128, i128), RouterError> {
        sender.require_auth();
        check_deadline(&env, deadline)?;
        remove(&env, &sender, &token_a, &token_b, liquidity, (amount_a_min, amount_b_min), &to)
    }

    pub fn remove_liquidity_native(
        env: Env,
        sender: Address,
        token: Address,
        liquidity: i128,
        amount_token_min: i128,
        amount_native_min: i128,
        to: Address,
        deadline: u64,
    ) -> Result<(i128, i128), RouterError> {
        sender.require_auth();
        check_deadline(&env, deadline)?;
        remove_native(&env, &sender, &token, liquidity, (amount_token_min, amount_native_min), &to)
    }

    /// `remove_liquidity` with the share approval given by a signed permit
    pub fn remove_liquidity_with_permit(
        env: Env,
        sender: Address,
        token_a: Address,
        token_b: Address,
        liquidity: i128,
        amount_a_min: i128,
        amount_b_min: i128,
        to: Address,
        deadline: u64,
        permit: PermitSignature,
    ) -> Result<(i128, i128), RouterError> {
        sender.require_auth();
        check_deadline(&env, deadline)?;
        let factory = get_factory(&env)?;
        let pair = pair_for(&env, &factory, &token_a, &token_b)?;
        apply_permit(&env, &pair, &sender, liquidity, deadline, &permit);
        remove(&env, &sender, &token_a, &token_b, liquidity, (amount_a_min, amount_b_min), &to)
    }

    pub fn remove_liq_native_with_permit(
        env: Env,
        sender: Address,
        token: Address,
        liquidity: i128,
        amount_token_min: i128,
        amount_native_min: i128,
        to: Address,
        deadline: u64,
        permit: PermitSignature,
    ) -> Result<(i128, i128), RouterError> {
        sender.require_auth();
        check_deadline(&env, deadline)?;
        let factory = get_factory(&env)?;
        let wrapped = get_wrapped_native(&env)?;
        let pair = pair_for(&env, &factory, &token, &wrapped)?;
        apply_permit(&env, &pair, &sender, liquidity, deadline, &permit);
        remove_native(&env, &sender, &token, liquidity, (amount_token_min, amount_native_min), &to)
    }

    // ========================================================================
    // Swaps
    // ========================================================================

    /// Swap an exact input along `path`; returns the amount at every hop
    pub fn swap_exact_tokens_for_tokens(
        env: Env,
        sender: Address,
        amount_in: i128,
        amount_out_min: i128,
        path: Vec<Address>,
        to: Address,
        deadline: u64,
    ) -> Result<Vec<i128>, RouterError> {
        sender.require_auth();
        check_deadline(&env, deadline)?;
        check_amounts(&[amount_in, amount_out_min])?;

        let factory = get_factory(&env)?;
        let amounts = library::get_amounts_out(&env, &factory, amount_in, &path)?;
        check_output(&amounts, amount_out_min)?;

        pay_first_pair(&env, &factory, &sender, &path, amounts.get_unchecked(0))?;
        execute_swaps(&env, &factory, &amounts, &path, &to)?;
        Ok(amounts)
    }

    /// Swap for an exact output along `path`, paying at most `amount_in_max`
    pub fn swap_tokens_for_exact_tokens(
        env: Env,
        sender: Address,
        amount_out: i128,
        amount_in_max: i128,
        path: Vec<Address>,
        to: Address,
        deadline: u64,
    ) -> Result<Vec<i128>, RouterError> {
        sender.require_auth();
        check_deadline(&env, deadline)?;
        check_amounts(&[amount_out, amount_in_max])?;

        let factory = get_factory(&env)?;
        let amounts = library::get_amounts_in(&env, &factory, amount_out, &path)?;
        check_input(&amounts, amount_in_max)?;

        pay_first_pair(&env, &factory, &sender, &path, amounts.get_unchecked(0))?;
        execute_swaps(&env, &factory, &amounts, &path, &to)?;
        Ok(amounts)
    }

    /// Swap an exact amount of native currency; `path` starts at the wrapped native asset
    pub fn swap_exact_native_for_tokens(
        env: Env,
        sender: Address,
        amount_in: i128,
        amount_out_min: i128,
        path: Vec<Address>,
        to: Address,
        deadline: u64,
    ) -> Result<Vec<i128>, RouterError> {
        sender.require_auth();
        check_deadline(&env, deadline)?;
        check_amounts(&[amount_in, amount_out_min])?;

        let factory = get_factory(&env)?;
        let wrapped = get_wrapped_native(&env)?;
        check_path_start(&path, &wrapped)?;
        let amounts = library::get_amounts_out(&env, &factory, amount_in, &path)?;
        check_output(&amounts, amount_out_min)?;

        pay_first_pair_native(&env, &factory, &sender, &path, amounts.get_unchecked(0))?;
        execute_swaps(&env, &factory, &amounts, &path, &to)?;
        Ok(amounts)
    }

    /// Swap tokens for an exact amount of native currency; `path` ends at the wrapped native asset
    pub fn swap_tokens_for_exact_native(
        env: Env,
        sender: Address,
        amount_out: i128,
        amount_in_max: i128,
        path: Vec<Address>,
        to: Address,
        deadline: u64,
    ) -> Result<Vec<i128>, RouterError> {
        sender.require_auth();
        check_deadline(&env, deadline)?;
        check_amounts(&[amount_out, amount_in_max])?;

        let factory = get_factory(&env)?;
        let wrapped = get_wrapped_native(&env)?;
        check_path_end(&path, &wrapped)?;
        let amounts = library::get_amounts_in(&env, &factory, amount_out, &path)?;
        check_input(&amounts, amount_in_max)?;

        pay_first_pair(&env, &factory, &sender, &path, amounts.get_unchecked(0))?;
        swap_to_native(&env, &factory, &amounts, &path, &to)?;
        Ok(amounts)
    }

    /// Swap an exact amount of tokens for native currency
    pub fn swap_exact_tokens_for_native(
        env: Env,
        sender: Address,
        amount_in: i128,
        amount_out_min: i128,
        path: Vec<Address>,
        to: Address,
        deadline: u64,
    ) -> Result<Vec<i128>, RouterError> {
        sender.require_auth();
        check_deadline(&env, deadline)?;
        check_amounts(&[amount_in, amount_out_min])?;

        let factory = get_factory(&env)?;
        let wrapped = get_wrapped_native(&env)?;
        check_path_end(&path, &wrapped)?;
        let amounts = library::get_amounts_out(&env, &factory, amount_in, &path)?;
        check_output(&amounts, amount_out_min)?;

        pay_first_pair(&env, &factory, &sender, &path, amounts.get_unchecked(0))?;
        swap_to_native(&env, &factory, &amounts, &path, &to)?;
        Ok(amounts)
    }

    /// Swap native currency for an exact output, spending at most `amount_in_max`
    pub fn swap_native_for_exact_tokens(
        env: Env,
        sender: Address,
        amount_out: i128,
        amount_in_max: i128,
        path: Vec<Address>,
        to: Address,
        deadline: u64,
    ) -> Result<Vec<i128>, RouterError> {
        sender.require_auth();
        check_deadline(&env, deadline)?;
        check_amounts(&[amount_out, amount_in_max])?;

        let factory = get_factory(&env)?;
        let wrapped = get_wrapped_native(&env)?;
        check_path_start(&path, &wrapped)?;
        let amounts = library::get_amounts_in(&env, &factory, amount_out, &path)?;
        check_input(&amounts, amount_in_max)?;

        // Only the required input is pulled, nothing is left to refund
        pay_first_pair_native(&env, &factory, &sender, &path, amounts.get_unchecked(0))?;
        execute_swaps(&env, &factory, &amounts, &path, &to)?;
        Ok(amounts)
    }

    // ========================================================================
    // Pricing
    // ========================================================================

    pub fn quote(env: Env, amount_a: i128, reserve_a: i128, reserve_b: i128) -> Result<i128, RouterError> {
        Ok(peg_math::quote(&env, amount_a, reserve_a, reserve_b)?)
    }

    /// Output for an exact input at the factory's swap fee
    pub fn get_amount_out(env: Env, amount_in: i128, reserve_in: i128, reserve_out: i128) -> Result<i128, RouterError> {
        let fee = swap_fee(&env, &get_factory(&env)?);
        Ok(peg_math::get_amount_out(&env, amount_in, reserve_in, reserve_out, fee)?)
    }

    /// Input required for an exact output at the factory's swap fee
    pub fn get_amount_in(env: Env, amount_out: i128, reserve_in: i128, reserve_out: i128) -> Result<i128, RouterError> {
        let fee = swap_fee(&env, &get_factory(&env)?);
        Ok(peg_math::get_amount_in(&env, amount_out, reserve_in, reserve_out, fee)?)
    }

    pub fn get_amounts_out(env: Env, amount_in: i128, path: Vec<Address>) -> Result<Vec<i128>, RouterError> {
        library::get_amounts_out(&env, &get_factory(&env)?, amount_in, &path)
    }

    pub fn get_amounts_in(env: Env, amount_out: i128, path: Vec<Address>) -> Result<Vec<i128>, RouterError> {
        library::get_amounts_in(&env, &get_factory(&env)?, amount_out, &path)
    }

    pub fn factory(env: Env) -> Result<Address, RouterError> {
        get_factory(&env)
    }

    pub fn native(env: Env) -> Result<Address, RouterError> {
        get_native(&env)
    }

    pub fn wrapped_native(env: Env) -> Result<Address, RouterError> {
        get_wrapped_native(&env)
    }
}

fn extend_instance_ttl(env: &Env) {
    env.storage()
        .instance()
        .extend_ttl(INSTANCE_TTL_THRESHOLD, INSTANCE_TTL_EXTEND);
}

fn get_factory(env: &Env) -> Result<Address, RouterError> {
    env.storage()
        .instance()
        .get(&DataKey::Factory)
        .ok_or(RouterError::NotInitialized)
}

fn get_native(env: &Env) -> Result<Address, RouterError> {
    env.storage()
        .instance()
        .get(&DataKey::Native)
        .ok_or(RouterError::NotInitialized)
}

fn get_wrapped_native(env: &Env) -> Result<Address, RouterError> {
    env.storage()
        .instance()
        .get(&DataKey::WrappedNative)
        .ok_or(RouterError::NotInitialized)
}

/// Amounts to deposit so that nothing beyond the desired maxima is used
fn optimal_amounts(
    env: &Env,
    factory: &Address,
    token_a: &Address,
    token_b: &Address,
    desired: (i128, i128),
    min: (i128, i128),
) -> Result<(i128, i128), RouterError> {
    let factory_client = FactoryClient::new(env, factory);
    if factory_client.get_pair(token_a, token_b).is_none() {
        factory_client.create_pair(token_a, token_b);
    }

    let (reserve_a, reserve_b) = get_reserves(env, factory, token_a, token_b)?;
    if reserve_a == 0 && reserve_b == 0 {
        return Ok(desired);
    }

    let amount_b_optimal = peg_math::quote(env, desired.0, reserve_a, reserve_b)?;
    if amount_b_optimal <= desired.1 {
        if amount_b_optimal < min.1 {
            return Err(RouterError::InsufficientBAmount);
        }
        return Ok((desired.0, amount_b_optimal));
    }

    let amount_a_optimal = peg_math::quote(env, desired.1, reserve_b, reserve_a)?;
    if amount_a_optimal > desired.0 {
        return Err(RouterError::InsufficientAmount);
    }
    if amount_a_optimal < min.0 {
        return Err(RouterError::InsufficientAAmount);
    }
    Ok((amount_a_optimal, desired.1))
}

/// Move `sender`'s shares into the pair and burn them; returns (amount_a, amount_b)
fn remove(
    env: &Env,
    sender: &Address,
    token_a: &Address,
    token_b: &Address,
    liquidity: i128,
    min: (i128, i128),
    to: &Address,
) -> Result<(i128, i128), RouterError> {
    check_amounts(&[liquidity, min.0, min.1])?;
    let factory = get_factory(env)?;
    let pair = pair_for(env, &factory, token_a, token_b)?;
    let pair_client = PairClient::new(env, &pair);

    pair_client.transfer_from(&env.current_contract_address(), sender, &pair, &liquidity);
    let (amount0, amount1) = pair_client.burn(to);

    let (token0, _) = sort_tokens(token_a, token_b).ok_or(RouterError::InvalidPath)?;
    let (amount_a, amount_b) = if *token_a == token0 {
        (amount0, amount1)
    } else {
        (amount1, amount0)
    };
    if amount_a < min.0 {
        return Err(RouterError::InsufficientAAmount);
    }
    if amount_b < min.1 {
        return Err(RouterError::InsufficientBAmount);
    }
    Ok((amount_a, amount_b))
}

fn remove_native(
    env: &Env,
    sender: &Address,
    token: &Address,
    liquidity: i128,
    min: (i128, i128),
    to: &Address,
) -> Result<(i128, i128), RouterError> {
    let native = get_native(env)?;
    let wrapped = get_wrapped_native(env)?;
    let router = env.current_contract_address();

    let (amount_token, amount_native) = remove(env, sender, token, &wrapped, liquidity, min, &router)?;
    token::Client::new(env, token).transfer(&router, to, &amount_token);
    withdraw_native(env, &native, &wrapped, amount_native, to);
    Ok((amount_token, amount_native))
}

fn apply_permit(
    env: &Env,
    pair: &Address,
    owner: &Address,
    liquidity: i128,
    deadline: u64,
    permit: &PermitSignature,
) {
    let value = if permit.approve_max { i128::MAX } else { liquidity };
    PairClient::new(env, pair).permit(
        owner,
        &env.current_contract_address(),
        &value,
        &deadline,
        &permit.public_key,
        &permit.signature,
    );
}

fn check_output(amounts: &Vec<i128>, amount_out_min: i128) -> Result<(), RouterError> {
    let amount_out = amounts.last().ok_or(RouterError::InvalidPath)?;
    if amount_out < amount_out_min {
        return Err(RouterError::InsufficientOutputAmount);
    }
    Ok(())
}

fn check_input(amounts: &Vec<i128>, amount_in_max: i128) -> Result<(), RouterError> {
    let amount_in = amounts.first().ok_or(RouterError::InvalidPath)?;
    if amount_in > amount_in_max {
        return Err(RouterError::ExcessiveInputAmount);
    }
    Ok(())
}

fn check_path_start(path: &Vec<Address>, wrapped: &Address) -> Result<(), RouterError> {
    match path.first() {
        Some(first) if first == *wrapped => Ok(()),
        _ => Err(RouterError::InvalidPath),
    }
}

fn check_path_end(path: &Vec<Address>, wrapped: &Address) -> Result<(), RouterError> {
    match path.last() {
        Some(last) if last == *wrapped => Ok(()),
        _ => Err(RouterError::InvalidPath),
    }
}

fn pay_first_pair(
    env: &Env,
    factory: &Address,
    sender: &Address,
    path: &Vec<Address>,
    amount: i128,
) -> Result<(), RouterError> {
    let token_in = path.get_unchecked(0);
    let pair = pair_for(env, factory, &token_in, &path.get_unchecked(1))?;
    token::Client::new(env, &token_in).transfer(sender, &pair, &amount);
    Ok(())
}

fn pay_first_pair_native(
    env: &Env,
    factory: &Address,
    sender: &Address,
    path: &Vec<Address>,
    amount: i128,
) -> Result<(), RouterError> {
    let native = get_native(env)?;
    let wrapped = path.get_unchecked(0);
    let router = env.current_contract_address();
    let pair = pair_for(env, factory, &wrapped, &path.get_unchecked(1))?;

    token::Client::new(env, &native).transfer(sender, &router, &amount);
    deposit_native(env, &native, &wrapped, amount);
    token::Client::new(env, &wrapped).transfer(&router, &pair, &amount);
    Ok(())
}

/// Run the swaps into the router, then unwrap the output for `to`
fn swap_to_native(
    env: &Env,
    factory: &Address,
    amounts: &Vec<i128>,
    path: &Vec<Address>,
    to: &Address,
) -> Result<(), RouterError> {
    let native = get_native(env)?;
    let wrapped = get_wrapped_native(env)?;
    let amount_out = amounts.last().ok_or(RouterError::InvalidPath)?;

    execute_swaps(env, factory, amounts, path, &env.current_contract_address())?;
    withdraw_native(env, &native, &wrapped, amount_out, to);
    Ok(())
}
