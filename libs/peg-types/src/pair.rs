use soroban_sdk::{contracttype, Address, BytesN, Env, U256};

use crate::{BPS_DENOMINATOR, DEFAULT_MAX_OUTPUT_BPS, DEFAULT_SWAP_FEE, FEE_DENOMINATOR};

/// Per-pair trading parameters, chosen by the factory
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct PairParams {
    /// Swap fee per mille of the input amount
    pub swap_fee: u32,
    /// Largest share of the output reserve one swap may take, in bps
    pub max_output_bps: u32,
}

impl PairParams {
    pub fn is_valid(&self) -> bool {
        self.swap_fee < FEE_DENOMINATOR
            && self.max_output_bps > 0
            && self.max_output_bps <= BPS_DENOMINATOR
    }
}

impl Default for PairParams {
    fn default() -> Self {
        Self {
            swap_fee: DEFAULT_SWAP_FEE,
            max_output_bps: DEFAULT_MAX_OUTPUT_BPS,
        }
    }
}

/// Pair configuration - immutable after initialization
#[contracttype]
#[derive(Clone, Debug)]
pub struct PairConfig {
    /// Factory that created the pair
    pub factory: Address,
    /// Token0 address (lower address)
    pub token0: Address,
    /// Token1 address (higher address)
    pub token1: Address,
    /// Multiplier bringing token0 amounts to the internal precision
    pub scale0: u128,
    /// Multiplier bringing token1 amounts to the internal precision
    pub scale1: u128,
    /// Internal precision, also the decimals of the liquidity share
    pub decimals: u32,
    pub swap_fee: u32,
    pub max_output_bps: u32,
}

/// Mutable pair state - stored in Instance storage
#[contracttype]
#[derive(Clone, Debug)]
pub struct PairState {
    /// Raw token0 balance as of the last sync
    pub reserve0: i128,
    /// Raw token1 balance as of the last sync
    pub reserve1: i128,
    pub block_timestamp_last: u64,
    /// Sum of (reserve1 / reserve0) * elapsed as UQ112x112, wraps
    pub price0_cumulative_last: U256,
    /// Sum of (reserve0 / reserve1) * elapsed as UQ112x112, wraps
    pub price1_cumulative_last: U256,
    /// Normalized reserve0 * reserve1 after the last liquidity event
    pub k_last: U256,
    pub total_supply: i128,
}

impl PairState {
    pub fn new(env: &Env) -> Self {
        Self {
            reserve0: 0,
            reserve1: 0,
            block_timestamp_last: 0,
            price0_cumulative_last: U256::from_u32(env, 0),
            price1_cumulative_last: U256::from_u32(env, 0),
            k_last: U256::from_u32(env, 0),
            total_supply: 0,
        }
    }
}

/// Off-chain approval handed to the router's `*_with_permit` entry points
#[contracttype]
#[derive(Clone, Debug)]
pub struct PermitSignature {
    /// ed25519 key of the share owner
    pub public_key: BytesN<32>,
    pub signature: BytesN<64>,
    /// Approve `i128::MAX` instead of the exact liquidity amount
    pub approve_max: bool,
}
