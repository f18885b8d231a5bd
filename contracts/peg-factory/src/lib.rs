#![no_std]

use peg_types::{pair_address, pair_salt, sort_tokens, zero_address, PairParams};
use soroban_sdk::{
    contract, contracterror, contractimpl, contracttype, log, Address, BytesN, Env, IntoVal,
    Symbol, Vec,
};

#[contract]
pub struct PegFactory;

#[contracterror]
#[derive(Copy, Clone, Debug, Eq, PartialEq, PartialOrd, Ord)]
#[repr(u32)]
pub enum FactoryError {
    AlreadyInitialized = 1,
    NotInitialized = 2,
    IdenticalAddresses = 3,
    ZeroAddress = 4,
    PairExists = 5,
    Forbidden = 6,
    InvalidParams = 7,
}

/// Storage keys for Factory contract
#[contracttype]
#[derive(Clone)]
pub enum DataKey {
    /// Protocol fee recipient, unset while the fee is off
    FeeTo,
    /// Address allowed to change the fee settings
    FeeToSetter,
    /// Pair WASM hash for deployment
    PairWasmHash,
    /// Parameters handed to every new pair
    Params,
    /// (token0, token1) -> pair address
    Pair(Address, Address),
    /// Total number of pairs created
    PairCount,
    /// Pair address at index
    PairAt(u32),
}

// TTL constants
const INSTANCE_TTL_THRESHOLD: u32 = 17280;
const INSTANCE_TTL_EXTEND: u32 = 518400;
const PERSISTENT_TTL_THRESHOLD: u32 = 17280;
const PERSISTENT_TTL_EXTEND: u32 = 518400;

/// Upper bound on entries returned by one paginated query
const MAX_PAGE: u32 = 50;

// The registry is kept as one persistent entry per pair (PairCount + PairAt)
// rather than a Vec, so no single ledger entry grows with the number of pairs.

#[contractimpl]
impl PegFactory {
    /// Initialize factory with the fee setter, pair WASM hash and pair parameters
    pub fn initialize(
        env: Env,
        fee_to_setter: Address,
        pair_wasm_hash: BytesN<32>,
        params: PairParams,
    ) -> Result<(), FactoryError> {
        if env.storage().instance().has(&DataKey::FeeToSetter) {
            return Err(FactoryError::AlreadyInitialized);
        }
        fee_to_setter.require_auth();
        if !params.is_valid() {
            return Err(FactoryError::InvalidParams);
        }

        let storage = env.storage().instance();
        storage.set(&DataKey::FeeToSetter, &fee_to_setter);
        storage.set(&DataKey::PairWasmHash, &pair_wasm_hash);
        storage.set(&DataKey::Params, &params);
        storage.set(&DataKey::PairCount, &0u32);

        extend_instance_ttl(&env);
        Ok(())
    }

    /// Deploy and initialize the pair for two tokens. Anyone may call this.
    pub fn create_pair(env: Env, token_a: Address, token_b: Address) -> Result<Address, FactoryError> {
        let (token0, token1) =
            sort_tokens(&token_a, &token_b).ok_or(FactoryError::IdenticalAddresses)?;
        let zero = zero_address(&env);
        if token0 == zero || token1 == zero {
            return Err(FactoryError::ZeroAddress);
        }

        let pair_key = DataKey::Pair(token0.clone(), token1.clone());
        if env.storage().persistent().has(&pair_key) {
            return Err(FactoryError::PairExists);
        }

        let pair_wasm_hash = get_pair_wasm_hash(&env)?;
        let params = get_params(&env)?;
        let salt = pair_salt(&env, &token0, &token1, &pair_wasm_hash);
        let pair = deploy_pair(&env, salt, pair_wasm_hash);

        init_pair(&env, &pair, &env.current_contract_address(), &token0, &token1, &params);

        env.storage().persistent().set(&pair_key, &pair);
        extend_persistent_ttl(&env, &pair_key);

        let pair_count = Self::all_pairs_length(env.clone());
        let pair_at_key = DataKey::PairAt(pair_count);
        env.storage().persistent().set(&pair_at_key, &pair);
        extend_persistent_ttl(&env, &pair_at_key);
        env.storage()
            .instance()
            .set(&DataKey::PairCount, &(pair_count + 1));

        log!(&env, "pair created", pair.clone(), pair_count + 1);
        env.events().publish(
            (Symbol::new(&env, "pair_created"), token0, token1),
            (pair.clone(), pair_count + 1),
        );

        extend_instance_ttl(&env);
        Ok(pair)
    }

    /// Pair for two tokens, in either order
    pub fn get_pair(env: Env, token_a: Address, token_b: Address) -> Option<Address> {
        let (token0, token1) = sort_tokens(&token_a, &token_b)?;
        env.storage()
            .persistent()
            .get(&DataKey::Pair(token0, token1))
    }

    /// Address the pair for two tokens has, or will get from `create_pair`
    pub fn pair_address(env: Env, token_a: Address, token_b: Address) -> Result<Address, FactoryError> {
        let (token0, token1) =
            sort_tokens(&token_a, &token_b).ok_or(FactoryError::IdenticalAddresses)?;
        let pair_wasm_hash = get_pair_wasm_hash(&env)?;
        Ok(pair_address(
            &env,
            &env.current_contract_address(),
            &token0,
            &token1,
            &pair_wasm_hash,
        ))
    }

    pub fn sort_tokens(_env: Env, token_a: Address, token_b: Address) -> Result<(Address, Address), FactoryError> {
        sort_tokens(&token_a, &token_b).ok_or(FactoryError::IdenticalAddresses)
    }

    /// Get pair address at specific index
    pub fn all_pairs(env: Env, index: u32) -> Option<Address> {
        env.storage().persistent().get(&DataKey::PairAt(index))
    }

    /// Get total number of pairs created
    pub fn all_pairs_length(env: Env) -> u32 {
        env.storage()
            .instance()
            .get(&DataKey::PairCount)
            .unwrap_or(0)
    }

    /// Get pairs with pagination
    /// Returns up to `limit` pairs starting from `start_index`, at most 50
    pub fn get_pairs_paginated(env: Env, start_index: u32, limit: u32) -> Vec<Address> {
        let limit = limit.min(MAX_PAGE);
        let pair_count = Self::all_pairs_length(env.clone());
        let end_index = start_index.saturating_add(limit).min(pair_count);

        let mut pairs: Vec<Address> = Vec::new(&env);
        for i in start_index..end_index {
            if let Some(pair) = env.storage().persistent().get(&DataKey::PairAt(i)) {
                pairs.push_back(pair);
            }
        }
        pairs
    }

    pub fn fee_to(env: Env) -> Option<Address> {
        extend_instance_ttl(&env);
        env.storage().instance().get(&DataKey::FeeTo)
    }

    pub fn fee_to_setter(env: Env) -> Result<Address, FactoryError> {
        extend_instance_ttl(&env);
        get_fee_to_setter(&env)
    }

    /// Turn the protocol fee on (`Some`) or off (`None`)
    pub fn set_fee_to(env: Env, caller: Address, fee_to: Option<Address>) -> Result<(), FactoryError> {
        require_fee_to_setter(&env, &caller)?;

        match &fee_to {
            Some(fee_to) => env.storage().instance().set(&DataKey::FeeTo, fee_to),
            None => env.storage().instance().remove(&DataKey::FeeTo),
        }
        env.events()
            .publish((Symbol::new(&env, "fee_to"),), fee_to);
        extend_instance_ttl(&env);
        Ok(())
    }

    pub fn set_fee_to_setter(env: Env, caller: Address, fee_to_setter: Address) -> Result<(), FactoryError> {
        require_fee_to_setter(&env, &caller)?;

        env.storage()
            .instance()
            .set(&DataKey::FeeToSetter, &fee_to_setter);
        env.events()
            .publish((Symbol::new(&env, "fee_to_setter"),), fee_to_setter);
        extend_instance_ttl(&env);
        Ok(())
    }

    pub fn pair_params(env: Env) -> Result<PairParams, FactoryError> {
        get_params(&env)
    }

    pub fn pair_wasm_hash(env: Env) -> Result<BytesN<32>, FactoryError> {
        get_pair_wasm_hash(&env)
    }
}

fn extend_instance_ttl(env: &Env) {
    env.storage()
        .instance()
        .extend_ttl(INSTANCE_TTL_THRESHOLD, INSTANCE_TTL_EXTEND);
}

fn extend_persistent_ttl(env: &Env, key: &DataKey) {
    env.storage()
        .persistent()
        .extend_ttl(key, PERSISTENT_TTL_THRESHOLD, PERSISTENT_TTL_EXTEND);
}

fn get_fee_to_setter(env: &Env) -> Result<Address, FactoryError> {
    env.storage()
        .instance()
        .get(&DataKey::FeeToSetter)
        .ok_or(FactoryError::NotInitialized)
}

fn get_pair_wasm_hash(env: &Env) -> Result<BytesN<32>, FactoryError> {
    env.storage()
        .instance()
        .get(&DataKey::PairWasmHash)
        .ok_or(FactoryError::NotInitialized)
}

fn get_params(env: &Env) -> Result<PairParams, FactoryError> {
    env.storage()
        .instance()
        .get(&DataKey::Params)
        .ok_or(FactoryError::NotInitialized)
}

fn require_fee_to_setter(env: &Env, caller: &Address) -> Result<(), FactoryError> {
    caller.require_auth();
    if *caller != get_fee_to_setter(env)? {
        return Err(FactoryError::Forbidden);
    }
    Ok(())
}

#[cfg(not(any(test, feature = "testutils")))]
fn deploy_pair(env: &Env, salt: BytesN<32>, pair_wasm_hash: BytesN<32>) -> Address {
    env.deployer()
        .with_current_contract(salt)
        .deploy_v2(pair_wasm_hash, ())
}

// Test builds have no compiled pair wasm: register the native contract at
// the address the deployer would have used.
#[cfg(any(test, feature = "testutils"))]
fn deploy_pair(env: &Env, salt: BytesN<32>, _pair_wasm_hash: BytesN<32>) -> Address {
    let pair = env.deployer().with_current_contract(salt).deployed_address();
    env.register_at(&pair, peg_pair::PegPair, ());
    pair
}

// Pair initialization via invoke
fn init_pair(
    env: &Env,
    pair: &Address,
    factory: &Address,
    token0: &Address,
    token1: &Address,
    params: &PairParams,
) {
    env.invoke_contract::<()>(
        pair,
        &Symbol::new(env, "initialize"),
        (factory, token0, token1, params.clone()).into_val(env),
    );
}
