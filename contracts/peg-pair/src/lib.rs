#![no_std]

mod errors;
mod events;
mod invariants;
mod liquidity;
mod permit;
mod reserves;
mod share;
mod storage;
mod swap;


pub use errors::PairError;

use peg_math::decimal_scales;
use peg_types::{sort_tokens, PairConfig, PairParams, PairState, LP_NAME, LP_SYMBOL};
use soroban_sdk::{contract, contractimpl, token, Address, Bytes, BytesN, Env, String, U256};
use storage::{get_config, get_nonce, get_state, has_config, lock, set_config, set_state, unlock};

#[contract]
pub struct PegPair;

#[contractimpl]
impl PegPair {
    /// Initialize the pair. Only the deploying factory can call this, once.
    pub fn initialize(
        env: Env,
        factory: Address,
        token_a: Address,
        token_b: Address,
        params: PairParams,
    ) -> Result<(), PairError> {
        if has_config(&env) {
            return Err(PairError::AlreadyInitialized);
        }
        factory.require_auth();

        if !params.is_valid() {
            return Err(PairError::InvalidParams);
        }
        let (token0, token1) =
            sort_tokens(&token_a, &token_b).ok_or(PairError::IdenticalAddresses)?;

        let decimals0 = token::Client::new(&env, &token0).decimals();
        let decimals1 = token::Client::new(&env, &token1).decimals();
        let (scale0, scale1, decimals) =
            decimal_scales(decimals0, decimals1).ok_or(PairError::UnsupportedDecimals)?;

        let config = PairConfig {
            factory,
            token0,
            token1,
            scale0,
            scale1,
            decimals,
            swap_fee: params.swap_fee,
            max_output_bps: params.max_output_bps,
        };
        debug_assert!(invariants::tokens_ordered(&config));
        set_config(&env, &config);

        let mut state = PairState::new(&env);
        state.block_timestamp_last = env.ledger().timestamp();
        set_state(&env, &state);
        Ok(())
    }

    /// Mint liquidity shares to `to` for the tokens transferred in beforehand
    pub fn mint(env: Env, to: Address) -> Result<i128, PairError> {
        lock(&env)?;
        let liquidity = liquidity::mint(&env, &to)?;
        unlock(&env);
        Ok(liquidity)
    }

    /// Burn the shares held by the pair and pay both tokens to `to`
    ///
    /// # Returns
    /// (amount0, amount1) - Token amounts withdrawn
    pub fn burn(env: Env, to: Address) -> Result<(i128, i128), PairError> {
        lock(&env)?;
        let amounts = liquidity::burn(&env, &to)?;
        unlock(&env);
        Ok(amounts)
    }

    /// Execute a swap
    ///
    /// # Arguments
    /// * `amount0_out` - token0 to send to `to`
    /// * `amount1_out` - token1 to send to `to`
    /// * `to` - Recipient, and flash-swap callee when `data` is non-empty
    /// * `data` - Opaque payload forwarded to `on_swap`
    pub fn swap(
        env: Env,
        amount0_out: i128,
        amount1_out: i128,
        to: Address,
        data: Bytes,
    ) -> Result<(), PairError> {
        lock(&env)?;
        swap::execute_swap(&env, amount0_out, amount1_out, &to, &data)?;
        unlock(&env);
        Ok(())
    }

    pub fn skim(env: Env, to: Address) -> Result<(), PairError> {
        lock(&env)?;
        swap::skim(&env, &to)?;
        unlock(&env);
        Ok(())
    }

    pub fn sync(env: Env) -> Result<(), PairError> {
        lock(&env)?;
        swap::sync(&env)?;
        unlock(&env);
        Ok(())
    }

    /// Approve `spender` through an ed25519 signature of the owner's key
    pub fn permit(
        env: Env,
        owner: Address,
        spender: Address,
        value: i128,
        deadline: u64,
        public_key: BytesN<32>,
        signature: BytesN<64>,
    ) -> Result<(), PairError> {
        permit::consume(&env, &owner, &spender, value, deadline, &public_key, &signature)?;
        share::approve(&env, &owner, &spender, value, u32::MAX)
    }

    // === Share token ===

    pub fn allowance(env: Env, from: Address, spender: Address) -> i128 {
        share::allowance(&env, &from, &spender)
    }

    pub fn approve(
        env: Env,
        from: Address,
        spender: Address,
        amount: i128,
        expiration_ledger: u32,
    ) -> Result<(), PairError> {
        from.require_auth();
        share::approve(&env, &from, &spender, amount, expiration_ledger)
    }

    pub fn balance(env: Env, id: Address) -> i128 {
        storage::get_balance(&env, &id)
    }

    pub fn transfer(env: Env, from: Address, to: Address, amount: i128) -> Result<(), PairError> {
        from.require_auth();
        share::move_shares(&env, &from, &to, amount)
    }

    pub fn transfer_from(
        env: Env,
        spender: Address,
        from: Address,
        to: Address,
        amount: i128,
    ) -> Result<(), PairError> {
        spender.require_auth();
        share::spend_allowance(&env, &from, &spender, amount)?;
        share::move_shares(&env, &from, &to, amount)
    }

    pub fn total_supply(env: Env) -> Result<i128, PairError> {
        Ok(get_state(&env)?.total_supply)
    }

    pub fn decimals(env: Env) -> Result<u32, PairError> {
        Ok(get_config(&env)?.decimals)
    }

    pub fn name(env: Env) -> String {
        String::from_str(&env, LP_NAME)
    }

    pub fn symbol(env: Env) -> String {
        String::from_str(&env, LP_SYMBOL)
    }

    // === View Functions ===

    /// (reserve0, reserve1, block_timestamp_last)
    pub fn get_reserves(env: Env) -> Result<(i128, i128, u64), PairError> {
        let state = get_state(&env)?;
        Ok((state.reserve0, state.reserve1, state.block_timestamp_last))
    }

    pub fn get_config(env: Env) -> Result<PairConfig, PairError> {
        get_config(&env)
    }

    pub fn get_state(env: Env) -> Result<PairState, PairError> {
        get_state(&env)
    }

    pub fn factory(env: Env) -> Result<Address, PairError> {
        Ok(get_config(&env)?.factory)
    }

    pub fn token0(env: Env) -> Result<Address, PairError> {
        Ok(get_config(&env)?.token0)
    }

    pub fn token1(env: Env) -> Result<Address, PairError> {
        Ok(get_config(&env)?.token1)
    }

    pub fn price0_cumulative_last(env: Env) -> Result<U256, PairError> {
        Ok(get_state(&env)?.price0_cumulative_last)
    }

    pub fn price1_cumulative_last(env: Env) -> Result<U256, PairError> {
        Ok(get_state(&env)?.price1_cumulative_last)
    }

    pub fn k_last(env: Env) -> Result<U256, PairError> {
        Ok(get_state(&env)?.k_last)
    }

    pub fn nonces(env: Env, owner: Address) -> u64 {
        get_nonce(&env, &owner)
    }

    pub fn domain_separator(env: Env) -> BytesN<32> {
        permit::domain_separator(&env)
    }

    /// Digest an owner signs to authorize `permit`
    pub fn permit_digest(
        env: Env,
        owner: Address,
        spender: Address,
        value: i128,
        nonce: u64,
        deadline: u64,
    ) -> Result<BytesN<32>, PairError> {
        permit::digest(&env, &owner, &spender, value, nonce, deadline)
    }
}
