#![no_std]

//! Fungible test asset with arbitrary decimals.
//!
//! With an underlying asset set it also behaves as the wrapped form of that
//! asset: `deposit` pulls the underlying in and credits the same amount,
//! `withdraw` burns and pays it back.

use soroban_sdk::{contract, contractimpl, contracttype, token, Address, Env, String};

#[contract]
pub struct MockToken;

#[contracttype]
#[derive(Clone)]
pub enum DataKey {
    Admin,
    Decimals,
    Name,
    Symbol,
    Underlying,
    TotalSupply,
    Balance(Address),
    Allowance(Address, Address),
}

#[contractimpl]
impl MockToken {
    pub fn initialize(env: Env, admin: Address, decimals: u32, name: String, symbol: String) {
        if env.storage().instance().has(&DataKey::Admin) {
            panic!("Already initialized");
        }
        env.storage().instance().set(&DataKey::Admin, &admin);
        env.storage().instance().set(&DataKey::Decimals, &decimals);
        env.storage().instance().set(&DataKey::Name, &name);
        env.storage().instance().set(&DataKey::Symbol, &symbol);
    }

    /// Turn this token into the wrapped form of `underlying`
    pub fn set_underlying(env: Env, underlying: Address) {
        admin(&env).require_auth();
        env.storage().instance().set(&DataKey::Underlying, &underlying);
    }

    pub fn mint(env: Env, to: Address, amount: i128) {
        admin(&env).require_auth();
        credit(&env, &to, amount);
        add_supply(&env, amount);
    }

    pub fn deposit(env: Env, from: Address, amount: i128) {
        from.require_auth();
        let underlying = underlying(&env);
        token::Client::new(&env, &underlying).transfer(&from, &env.current_contract_address(), &amount);
        credit(&env, &from, amount);
        add_supply(&env, amount);
    }

    pub fn withdraw(env: Env, from: Address, amount: i128) {
        from.require_auth();
        debit(&env, &from, amount);
        add_supply(&env, -amount);
        let underlying = underlying(&env);
        token::Client::new(&env, &underlying).transfer(&env.current_contract_address(), &from, &amount);
    }

    pub fn allowance(env: Env, from: Address, spender: Address) -> i128 {
        env.storage()
            .persistent()
            .get(&DataKey::Allowance(from, spender))
            .unwrap_or(0)
    }

    pub fn approve(env: Env, from: Address, spender: Address, amount: i128, _expiration_ledger: u32) {
        from.require_auth();
        env.storage()
            .persistent()
            .set(&DataKey::Allowance(from, spender), &amount);
    }

    pub fn balance(env: Env, id: Address) -> i128 {
        env.storage()
            .persistent()
            .get(&DataKey::Balance(id))
            .unwrap_or(0)
    }

    pub fn transfer(env: Env, from: Address, to: Address, amount: i128) {
        from.require_auth();
        debit(&env, &from, amount);
        credit(&env, &to, amount);
    }

    pub fn transfer_from(env: Env, spender: Address, from: Address, to: Address, amount: i128) {
        spender.require_auth();
        let allowance = Self::allowance(env.clone(), from.clone(), spender.clone());
        if allowance < amount {
            panic!("Insufficient allowance");
        }
        env.storage()
            .persistent()
            .set(&DataKey::Allowance(from.clone(), spender), &(allowance - amount));
        debit(&env, &from, amount);
        credit(&env, &to, amount);
    }

    pub fn burn(env: Env, from: Address, amount: i128) {
        from.require_auth();
        debit(&env, &from, amount);
        add_supply(&env, -amount);
    }

    pub fn decimals(env: Env) -> u32 {
        env.storage().instance().get(&DataKey::Decimals).unwrap_or(7)
    }

    pub fn name(env: Env) -> String {
        env.storage()
            .instance()
            .get(&DataKey::Name)
            .unwrap_or(String::from_str(&env, "Mock"))
    }

    pub fn symbol(env: Env) -> String {
        env.storage()
            .instance()
            .get(&DataKey::Symbol)
            .unwrap_or(String::from_str(&env, "MOCK"))
    }

    pub fn total_supply(env: Env) -> i128 {
        env.storage().instance().get(&DataKey::TotalSupply).unwrap_or(0)
    }
}

fn admin(env: &Env) -> Address {
    env.storage()
        .instance()
        .get(&DataKey::Admin)
        .expect("Not initialized")
}

fn underlying(env: &Env) -> Address {
    env.storage()
        .instance()
        .get(&DataKey::Underlying)
        .expect("Not a wrapped token")
}

fn credit(env: &Env, id: &Address, amount: i128) {
    if amount < 0 {
        panic!("Negative amount");
    }
    let key = DataKey::Balance(id.clone());
    let balance: i128 = env.storage().persistent().get(&key).unwrap_or(0);
    env.storage().persistent().set(&key, &(balance + amount));
}

fn debit(env: &Env, id: &Address, amount: i128) {
    if amount < 0 {
        panic!("Negative amount");
    }
    let key = DataKey::Balance(id.clone());
    let balance: i128 = env.storage().persistent().get(&key).unwrap_or(0);
    if balance < amount {
        panic!("Insufficient balance");
    }
    env.storage().persistent().set(&key, &(balance - amount));
}

fn add_supply(env: &Env, delta: i128) {
    let supply: i128 = env.storage().instance().get(&DataKey::TotalSupply).unwrap_or(0);
    env.storage().instance().set(&DataKey::TotalSupply, &(supply + delta));
}
