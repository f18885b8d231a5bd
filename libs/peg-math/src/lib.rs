#![no_std]

pub mod full_math;
pub mod liquidity_math;
pub mod normalize;
pub mod oracle;
pub mod swap_math;

pub use full_math::*;
pub use liquidity_math::*;
pub use normalize::*;
pub use oracle::*;
pub use swap_math::*;

/// Recoverable failures of the pricing and share formulas
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum MathError {
    /// Zero or negative amount where a positive one is required
    InsufficientAmount,
    /// A reserve is empty, or the requested output would drain it
    InsufficientLiquidity,
    /// Result does not fit the target integer
    Overflow,
}
