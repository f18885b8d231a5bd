use peg_types::RESOLUTION;
use soroban_sdk::{Env, U256};

use crate::full_math::split;

/// numerator / denominator as UQ112x112
pub fn encode_price(env: &Env, numerator: u128, denominator: u128) -> U256 {
    U256::from_u128(env, numerator)
        .shl(RESOLUTION)
        .div(&U256::from_u128(env, denominator))
}

/// Advance a price accumulator by `price * elapsed`, wrapping at 2^256
///
/// A price can take up to 240 bits, so the product is formed modulo 2^256:
/// the high limb only keeps the part of `high * elapsed` that lands below 2^256.
pub fn accumulate(env: &Env, cumulative: &U256, price: &U256, elapsed: u32) -> U256 {
    let (high, low) = split(price);
    let elapsed = elapsed as u128;
    let low_part = U256::from_u128(env, low).mul(&U256::from_u128(env, elapsed));
    let high_part = U256::from_u128(env, high.wrapping_mul(elapsed)).shl(128);
    wrapping_add(env, cumulative, &wrapping_add(env, &high_part, &low_part))
}

/// a + b modulo 2^256
pub fn wrapping_add(env: &Env, a: &U256, b: &U256) -> U256 {
    let max = U256::from_parts(env, u64::MAX, u64::MAX, u64::MAX, u64::MAX);
    let headroom = max.sub(a);
    if *b > headroom {
        b.sub(&headroom).sub(&U256::from_u32(env, 1))
    } else {
        a.add(b)
    }
}
