use peg_math::MathError;
use soroban_sdk::contracterror;

#[contracterror]
#[derive(Copy, Clone, Debug, Eq, PartialEq, PartialOrd, Ord)]
#[repr(u32)]
pub enum PairError {
    AlreadyInitialized = 1,
    NotInitialized = 2,
    IdenticalAddresses = 3,
    InvalidParams = 4,
    UnsupportedDecimals = 5,
    InsufficientLiquidityMinted = 6,
    InsufficientLiquidityBurned = 7,
    InsufficientOutputAmount = 8,
    InsufficientLiquidity = 9,
    InvalidTo = 10,
    InsufficientInputAmount = 11,
    /// Swap Liquidity Unit: one swap may not take more than the configured share of a reserve
    LiquidityUnitExceeded = 12,
    KInvariant = 13,
    Overflow = 14,
    Locked = 15,
    Expired = 16,
    InvalidSignature = 17,
    InsufficientBalance = 18,
    InsufficientAllowance = 19,
    NegativeAmount = 20,
}

impl From<MathError> for PairError {
    fn from(err: MathError) -> Self {
        match err {
            MathError::InsufficientAmount => PairError::NegativeAmount,
            MathError::InsufficientLiquidity => PairError::InsufficientLiquidity,
            MathError::Overflow => PairError::Overflow,
        }
    }
}
