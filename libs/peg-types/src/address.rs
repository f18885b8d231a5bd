use soroban_sdk::xdr::{FromXdr, ToXdr};
use soroban_sdk::{Address, Bytes, BytesN, Env};

/// XDR prefix of an `ScVal::Address(ScAddress::Account(PublicKey::Ed25519(..)))`:
/// the SCV_ADDRESS tag, then the account and ed25519 discriminants
const ACCOUNT_XDR_PREFIX: [u8; 12] = [0, 0, 0, 18, 0, 0, 0, 0, 0, 0, 0, 0];

/// Order two distinct tokens ascending. `None` when they are the same token.
pub fn sort_tokens(token_a: &Address, token_b: &Address) -> Option<(Address, Address)> {
    if token_a == token_b {
        return None;
    }
    if token_a < token_b {
        Some((token_a.clone(), token_b.clone()))
    } else {
        Some((token_b.clone(), token_a.clone()))
    }
}

/// Deployment salt of the pair for two sorted tokens
///
/// sha256(xdr(token0) || xdr(token1) || pair_wasm_hash)
pub fn pair_salt(
    env: &Env,
    token0: &Address,
    token1: &Address,
    pair_wasm_hash: &BytesN<32>,
) -> BytesN<32> {
    let mut data = Bytes::new(env);
    data.append(&token0.clone().to_xdr(env));
    data.append(&token1.clone().to_xdr(env));
    data.extend_from_array(&pair_wasm_hash.to_array());
    env.crypto().sha256(&data).to_bytes()
}

/// Address the pair for `(token0, token1)` has, or will have, under `factory`
pub fn pair_address(
    env: &Env,
    factory: &Address,
    token0: &Address,
    token1: &Address,
    pair_wasm_hash: &BytesN<32>,
) -> Address {
    let salt = pair_salt(env, token0, token1, pair_wasm_hash);
    env.deployer()
        .with_address(factory.clone(), salt)
        .deployed_address()
}

/// Stellar account address controlled by an ed25519 public key
pub fn account_address(env: &Env, public_key: &BytesN<32>) -> Address {
    let mut xdr = Bytes::from_array(env, &ACCOUNT_XDR_PREFIX);
    xdr.extend_from_array(&public_key.to_array());
    Address::from_xdr(env, &xdr).unwrap_or_else(|_| panic!("Invalid account key"))
}

/// Account of the all-zero key. Nobody can sign for it, so shares sent here are gone.
pub fn zero_address(env: &Env) -> Address {
    account_address(env, &BytesN::from_array(env, &[0u8; 32]))
}
