use soroban_sdk::{contractclient, Address, Bytes, BytesN, Env};

use crate::PairParams;

/// Pair surface used by the router
#[contractclient(name = "PairClient")]
pub trait PairInterface {
    fn get_reserves(env: Env) -> (i128, i128, u64);
    fn token0(env: Env) -> Address;
    fn token1(env: Env) -> Address;
    fn mint(env: Env, to: Address) -> i128;
    fn burn(env: Env, to: Address) -> (i128, i128);
    fn swap(env: Env, amount0_out: i128, amount1_out: i128, to: Address, data: Bytes);
    fn transfer_from(env: Env, spender: Address, from: Address, to: Address, amount: i128);
    fn permit(
        env: Env,
        owner: Address,
        spender: Address,
        value: i128,
        deadline: u64,
        public_key: BytesN<32>,
        signature: BytesN<64>,
    );
}

/// Factory surface used by pairs and the router
#[contractclient(name = "FactoryClient")]
pub trait FactoryInterface {
    fn fee_to(env: Env) -> Option<Address>;
    fn get_pair(env: Env, token_a: Address, token_b: Address) -> Option<Address>;
    fn create_pair(env: Env, token_a: Address, token_b: Address) -> Address;
    fn pair_params(env: Env) -> PairParams;
}

/// Wrapped form of the network's native asset
#[contractclient(name = "WrappedNativeClient")]
pub trait WrappedNativeInterface {
    /// Pull `amount` native from `from` and credit the same amount of wrapped asset
    fn deposit(env: Env, from: Address, amount: i128);
    /// Burn `amount` wrapped asset of `from` and pay the native back
    fn withdraw(env: Env, from: Address, amount: i128);
}

/// Settlement hook invoked by a pair during a flash swap
#[contractclient(name = "SwapCalleeClient")]
pub trait SwapCallee {
    fn on_swap(env: Env, pair: Address, amount0_out: i128, amount1_out: i128, data: Bytes);
}
