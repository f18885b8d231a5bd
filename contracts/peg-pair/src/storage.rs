use peg_types::{PairConfig, PairState};
use soroban_sdk::{contracttype, Address, Env};

use crate::errors::PairError;

/// Storage keys for the pair contract
#[contracttype]
#[derive(Clone)]
pub enum DataKey {
    /// Pair configuration (Instance storage)
    Config,
    /// Reserves, accumulators and share supply (Instance storage)
    State,
    /// Set while a mutating call is in flight (Instance storage)
    Locked,
    /// Share balance of a holder (Persistent storage)
    Balance(Address),
    /// (owner, spender) -> AllowanceValue (Persistent storage)
    Allowance(Address, Address),
    /// Permit nonce of an owner (Persistent storage)
    Nonce(Address),
}

#[contracttype]
#[derive(Clone, Debug)]
pub struct AllowanceValue {
    pub amount: i128,
    /// Last ledger at which the allowance can be spent
    pub expiration_ledger: u32,
}

// TTL constants
const INSTANCE_TTL_THRESHOLD: u32 = 17280; // ~1 day
const INSTANCE_TTL_EXTEND: u32 = 518400; // ~30 days
const PERSISTENT_TTL_THRESHOLD: u32 = 17280;
const PERSISTENT_TTL_EXTEND: u32 = 518400;

/// Extend instance storage TTL
pub fn extend_instance_ttl(env: &Env) {
    env.storage()
        .instance()
        .extend_ttl(INSTANCE_TTL_THRESHOLD, INSTANCE_TTL_EXTEND);
}

/// Extend persistent storage TTL for a key
pub fn extend_persistent_ttl(env: &Env, key: &DataKey) {
    env.storage()
        .persistent()
        .extend_ttl(key, PERSISTENT_TTL_THRESHOLD, PERSISTENT_TTL_EXTEND);
}

// === Config ===

pub fn has_config(env: &Env) -> bool {
    env.storage().instance().has(&DataKey::Config)
}

pub fn get_config(env: &Env) -> Result<PairConfig, PairError> {
    extend_instance_ttl(env);
    env.storage()
        .instance()
        .get(&DataKey::Config)
        .ok_or(PairError::NotInitialized)
}

pub fn set_config(env: &Env, config: &PairConfig) {
    env.storage().instance().set(&DataKey::Config, config);
    extend_instance_ttl(env);
}

// === State ===

pub fn get_state(env: &Env) -> Result<PairState, PairError> {
    env.storage()
        .instance()
        .get(&DataKey::State)
        .ok_or(PairError::NotInitialized)
}

pub fn set_state(env: &Env, state: &PairState) {
    env.storage().instance().set(&DataKey::State, state);
    extend_instance_ttl(env);
}

// === Lock ===

pub fn lock(env: &Env) -> Result<(), PairError> {
    if env.storage().instance().has(&DataKey::Locked) {
        return Err(PairError::Locked);
    }
    env.storage().instance().set(&DataKey::Locked, &true);
    Ok(())
}

pub fn unlock(env: &Env) {
    env.storage().instance().remove(&DataKey::Locked);
}

// === Share ledger ===

pub fn get_balance(env: &Env, id: &Address) -> i128 {
    let key = DataKey::Balance(id.clone());
    env.storage().persistent().get(&key).unwrap_or(0)
}

pub fn set_balance(env: &Env, id: &Address, amount: i128) {
    let key = DataKey::Balance(id.clone());
    if amount == 0 {
        env.storage().persistent().remove(&key);
    } else {
        env.storage().persistent().set(&key, &amount);
        extend_persistent_ttl(env, &key);
    }
}

pub fn get_allowance(env: &Env, from: &Address, spender: &Address) -> AllowanceValue {
    let key = DataKey::Allowance(from.clone(), spender.clone());
    env.storage()
        .persistent()
        .get(&key)
        .unwrap_or(AllowanceValue {
            amount: 0,
            expiration_ledger: 0,
        })
}

pub fn set_allowance(env: &Env, from: &Address, spender: &Address, value: &AllowanceValue) {
    let key = DataKey::Allowance(from.clone(), spender.clone());
    if value.amount == 0 {
        env.storage().persistent().remove(&key);
    } else {
        env.storage().persistent().set(&key, value);
        extend_persistent_ttl(env, &key);
    }
}

// === Nonces ===

pub fn get_nonce(env: &Env, owner: &Address) -> u64 {
    let key = DataKey::Nonce(owner.clone());
    env.storage().persistent().get(&key).unwrap_or(0)
}

pub fn set_nonce(env: &Env, owner: &Address, nonce: u64) {
    let key = DataKey::Nonce(owner.clone());
    env.storage().persistent().set(&key, &nonce);
    extend_persistent_ttl(env, &key);
}
