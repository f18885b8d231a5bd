use soroban_sdk::{Env, U256};

/// Multiply and divide with 256-bit intermediate precision (rounds down)
/// Returns (a * b) / denominator
pub fn mul_div(env: &Env, a: u128, b: u128, denominator: u128) -> u128 {
    if denominator == 0 {
        panic!("Division by zero");
    }

    let a_256 = U256::from_u128(env, a);
    let b_256 = U256::from_u128(env, b);
    let denom_256 = U256::from_u128(env, denominator);

    let result = a_256.mul(&b_256).div(&denom_256);
    u128_from_u256(&result)
}

/// Floor of the square root of a 256-bit value
///
/// Newton iteration seeded with a power of two that is never below the root,
/// so the sequence decreases monotonically onto the floor.
pub fn sqrt(env: &Env, value: &U256) -> u128 {
    let zero = U256::from_u32(env, 0);
    if *value == zero {
        return 0;
    }

    // floor(log2(value))
    let mut rest = value.clone();
    let mut log2 = 0u32;
    let mut shift = 128u32;
    while shift > 0 {
        let shifted = rest.shr(shift);
        if shifted > zero {
            rest = shifted;
            log2 += shift;
        }
        shift /= 2;
    }

    let mut x = U256::from_u32(env, 1).shl(log2 / 2 + 1);
    loop {
        let y = x.add(&value.div(&x)).shr(1);
        if y >= x {
            break;
        }
        x = y;
    }
    u128_from_u256(&x)
}

/// Product of two u128 values without overflow
pub fn mul_u256(env: &Env, a: u128, b: u128) -> U256 {
    U256::from_u128(env, a).mul(&U256::from_u128(env, b))
}

/// Full 512-bit product of two 256-bit values as `(high, low)` halves
///
/// Schoolbook multiplication over 128-bit limbs. Every partial product fits
/// 256 bits, so nothing overflows. Tuples compare lexicographically, which
/// makes the result directly comparable.
pub fn mul_wide(env: &Env, a: &U256, b: &U256) -> (U256, U256) {
    let (a1, a0) = split(a);
    let (b1, b0) = split(b);
    let (p00_hi, p00_lo) = split(&mul_u256(env, a0, b0));
    let (p01_hi, p01_lo) = split(&mul_u256(env, a0, b1));
    let (p10_hi, p10_lo) = split(&mul_u256(env, a1, b0));
    let (p11_hi, p11_lo) = split(&mul_u256(env, a1, b1));

    let limb = |value: u128| U256::from_u128(env, value);
    let col1 = limb(p00_hi).add(&limb(p01_lo)).add(&limb(p10_lo));
    let (carry1, col1) = split(&col1);
    let col2 = limb(p01_hi)
        .add(&limb(p10_hi))
        .add(&limb(p11_lo))
        .add(&limb(carry1));
    let (carry2, col2) = split(&col2);
    // The full product is below 2^512, so the top limb cannot carry
    let col3 = p11_hi + carry2;

    let low = limb(p00_lo).add(&limb(col1).shl(128));
    let high = limb(col2).add(&limb(col3).shl(128));
    (high, low)
}

/// Upper and lower 128-bit halves of a 256-bit value
pub fn split(value: &U256) -> (u128, u128) {
    let high = value.shr(128);
    let low = value.sub(&high.shl(128));
    (u128_from_u256(&high), u128_from_u256(&low))
}

/// Convert U256 to u128, panics if overflow
pub fn u128_from_u256(value: &U256) -> u128 {
    match value.to_u128() {
        Some(v) => v,
        None => panic!("U256 overflow when converting to u128"),
    }
}
