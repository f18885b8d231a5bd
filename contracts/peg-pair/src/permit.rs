//! Signature-based approvals.
//!
//! The digest follows the typed-structured-data layout
//! `keccak256(0x19 0x01 || domain_separator || struct_hash)` so that off-chain
//! signers can build it byte for byte. Addresses enter the hashes as the
//! keccak of their XDR encoding, integers as 32-byte big-endian words.

use peg_types::{account_address, LP_NAME};
use soroban_sdk::{xdr::ToXdr, Address, Bytes, BytesN, Env};

use crate::errors::PairError;
use crate::storage::{get_nonce, set_nonce};

const DOMAIN_TYPE: &[u8] =
    b"EIP712Domain(string name,string version,uint256 chainId,address verifyingContract)";
const PERMIT_TYPE: &[u8] =
    b"Permit(address owner,address spender,uint256 value,uint256 nonce,uint256 deadline)";
const VERSION: &[u8] = b"1";

pub fn domain_separator(env: &Env) -> BytesN<32> {
    let mut data = Bytes::new(env);
    data.extend_from_array(&keccak_bytes(env, DOMAIN_TYPE));
    data.extend_from_array(&keccak_bytes(env, LP_NAME.as_bytes()));
    data.extend_from_array(&keccak_bytes(env, VERSION));
    data.extend_from_array(&env.ledger().network_id().to_array());
    data.extend_from_array(&keccak_address(env, &env.current_contract_address()));
    env.crypto().keccak256(&data).to_bytes()
}

pub fn digest(
    env: &Env,
    owner: &Address,
    spender: &Address,
    value: i128,
    nonce: u64,
    deadline: u64,
) -> Result<BytesN<32>, PairError> {
    if value < 0 {
        return Err(PairError::NegativeAmount);
    }

    let mut message = Bytes::new(env);
    message.extend_from_array(&keccak_bytes(env, PERMIT_TYPE));
    message.extend_from_array(&keccak_address(env, owner));
    message.extend_from_array(&keccak_address(env, spender));
    message.extend_from_array(&word(value as u128));
    message.extend_from_array(&word(nonce as u128));
    message.extend_from_array(&word(deadline as u128));
    let struct_hash = env.crypto().keccak256(&message).to_array();

    let mut data = Bytes::from_array(env, &[0x19, 0x01]);
    data.extend_from_array(&domain_separator(env).to_array());
    data.extend_from_array(&struct_hash);
    Ok(env.crypto().keccak256(&data).to_bytes())
}

/// Check a permit and consume the owner's nonce
///
/// An invalid ed25519 signature traps inside the host and aborts the call.
pub fn consume(
    env: &Env,
    owner: &Address,
    spender: &Address,
    value: i128,
    deadline: u64,
    public_key: &BytesN<32>,
    signature: &BytesN<64>,
) -> Result<(), PairError> {
    if env.ledger().timestamp() > deadline {
        return Err(PairError::Expired);
    }
    if account_address(env, public_key) != *owner {
        return Err(PairError::InvalidSignature);
    }

    let nonce = get_nonce(env, owner);
    let digest = digest(env, owner, spender, value, nonce, deadline)?;
    env.crypto()
        .ed25519_verify(public_key, &Bytes::from_array(env, &digest.to_array()), signature);

    set_nonce(env, owner, nonce + 1);
    Ok(())
}

fn keccak_bytes(env: &Env, data: &[u8]) -> [u8; 32] {
    env.crypto()
        .keccak256(&Bytes::from_slice(env, data))
        .to_array()
}

fn keccak_address(env: &Env, address: &Address) -> [u8; 32] {
    env.crypto()
        .keccak256(&address.clone().to_xdr(env))
        .to_array()
}

fn word(value: u128) -> [u8; 32] {
    let mut word = [0u8; 32];
    word[16..].copy_from_slice(&value.to_be_bytes());
    word
}
