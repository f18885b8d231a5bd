//! Moving the network's native asset in and out of its wrapped form.

use peg_types::WrappedNativeClient;
use soroban_sdk::auth::{ContractContext, InvokerContractAuthEntry, SubContractInvocation};
use soroban_sdk::{token, vec, Address, Env, IntoVal, Symbol};

/// Wrap `amount` of native held by the router
pub fn deposit_native(env: &Env, native: &Address, wrapped: &Address, amount: i128) {
    let router = env.current_contract_address();

    // `deposit` pulls the native from the router, one call below us
    env.authorize_as_current_contract(vec![
        env,
        InvokerContractAuthEntry::Contract(SubContractInvocation {
            context: ContractContext {
                contract: native.clone(),
                fn_name: Symbol::new(env, "transfer"),
                args: (router.clone(), wrapped.clone(), amount).into_val(env),
            },
            sub_invocations: vec![env],
        }),
    ]);
    WrappedNativeClient::new(env, wrapped).deposit(&router, &amount);
}

/// Unwrap `amount` held by the router and pay the native to `to`
pub fn withdraw_native(env: &Env, native: &Address, wrapped: &Address, amount: i128, to: &Address) {
    let router = env.current_contract_address();
    WrappedNativeClient::new(env, wrapped).withdraw(&router, &amount);
    token::Client::new(env, native).transfer(&router, to, &amount);
}
