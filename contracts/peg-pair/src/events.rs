use soroban_sdk::{symbol_short, Address, Env};

pub fn mint(env: &Env, to: &Address, amount0: i128, amount1: i128, liquidity: i128) {
    env.events()
        .publish((symbol_short!("mint"), to.clone()), (amount0, amount1, liquidity));
}

pub fn burn(env: &Env, to: &Address, amount0: i128, amount1: i128, liquidity: i128) {
    env.events()
        .publish((symbol_short!("burn"), to.clone()), (amount0, amount1, liquidity));
}

pub fn swap(
    env: &Env,
    to: &Address,
    amounts_in: (i128, i128),
    amounts_out: (i128, i128),
) {
    env.events().publish(
        (symbol_short!("swap"), to.clone()),
        (amounts_in.0, amounts_in.1, amounts_out.0, amounts_out.1),
    );
}

pub fn sync(env: &Env, reserve0: i128, reserve1: i128) {
    env.events()
        .publish((symbol_short!("sync"),), (reserve0, reserve1));
}

pub fn transfer(env: &Env, from: &Address, to: &Address, amount: i128) {
    env.events()
        .publish((symbol_short!("transfer"), from.clone(), to.clone()), amount);
}

pub fn approve(env: &Env, from: &Address, spender: &Address, amount: i128, expiration_ledger: u32) {
    env.events().publish(
        (symbol_short!("approve"), from.clone(), spender.clone()),
        (amount, expiration_ledger),
    );
}
