#![no_std]

mod address;
mod interfaces;
mod pair;

pub use address::*;
pub use interfaces::*;
pub use pair::*;

/// Shares locked forever on the first mint of every pair
pub const MINIMUM_LIQUIDITY: i128 = 1_000;

/// Fixed-point resolution of the price accumulators (UQ112x112)
pub const RESOLUTION: u32 = 112;

/// Swap fee denominator (fee is expressed per mille)
pub const FEE_DENOMINATOR: u32 = 1_000;

/// Basis point denominator for the liquidity-unit cap
pub const BPS_DENOMINATOR: u32 = 10_000;

/// 0.3%
pub const DEFAULT_SWAP_FEE: u32 = 3;

/// A single swap may take at most half of the output reserve
pub const DEFAULT_MAX_OUTPUT_BPS: u32 = 5_000;

/// Highest asset precision a pair accepts
pub const MAX_DECIMALS: u32 = 30;

/// Internal precision never drops below this
pub const BASE_DECIMALS: u32 = 18;

pub const LP_NAME: &str = "Pegged Swap LP";
pub const LP_SYMBOL: &str = "PEG-LP";
