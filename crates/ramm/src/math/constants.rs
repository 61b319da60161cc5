use crate::math::bignumber::U256;

/// Internal precision of the fixed-point kernel. Every kernel value is an
/// unsigned integer interpreted as `value * 10^PRECISION_DECIMAL_PLACES`.
pub const PRECISION_DECIMAL_PLACES: u8 = 12;

/// Operand ceiling for `mul`/`div`/`pow_n`; inputs at or above
/// `10^MAX_PRECISION_DECIMAL_PLACES` abort instead of wrapping.
pub const MAX_PRECISION_DECIMAL_PLACES: u8 = 25;

/// Decimal places of every LP token, regardless of the underlying asset.
pub const LP_TOKENS_DECIMAL_PLACES: u8 = 9;

/// 10^12, the kernel's unit value.
pub const ONE: U256 = U256([1_000_000_000_000, 0, 0, 0]);

/// ONE / 2, the round-to-nearest offset used inside `pow_d`.
pub const HALF_ONE: U256 = U256([500_000_000_000, 0, 0, 0]);

/// 10^25, the operand ceiling.
pub const MAX_OPERAND: U256 = U256([1590897978359414784, 542101, 0, 0]);

/// 10^37, the pre-division product ceiling of `mul`.
pub const MAX_PRODUCT: U256 = U256([68739955140067328, 542101086242752217, 0, 0]);

/// Largest integer exponent accepted by `pow_n`.
pub const MAX_POW_N_EXPONENT: u8 = 127;

/// Binary digits of the fractional exponent expanded by `pow_d`. 32 digits
/// resolve 2^-32, below the kernel's 10^-12 unit.
pub const POW_D_MAX_ITERATIONS: u8 = 32;

/// Lower bound of the `pow_d` base domain, 0.67.
pub const POW_D_BASE_MIN: U256 = U256([670_000_000_000, 0, 0, 0]);

/// Upper bound of the `pow_d` base domain, 1.5.
pub const POW_D_BASE_MAX: U256 = U256([1_500_000_000_000, 0, 0, 0]);

// Trade-economics constants, fixed at pool construction.

/// Base trading fee, 0.001.
pub const BASE_FEE: U256 = U256([1_000_000_000, 0, 0, 0]);

/// Share of the total trade fee kept by the protocol, 0.30.
pub const PROTOCOL_FEE: U256 = U256([300_000_000_000, 0, 0, 0]);

/// Base leverage parameter, 100.
pub const BASE_LEVERAGE: U256 = U256([100_000_000_000_000, 0, 0, 0]);

/// Base withdrawal fee, 0.004.
pub const BASE_WITHDRAWAL_FEE: U256 = U256([4_000_000_000, 0, 0, 0]);

/// Allowed imbalance-ratio deviation from one, 0.25.
pub const DELTA: U256 = U256([250_000_000_000, 0, 0, 0]);

/// Per-trade cap as a fraction of the inbound/outbound balance, 0.05.
pub const MU: U256 = U256([50_000_000_000, 0, 0, 0]);

/// Staleness window of the volatility state, in milliseconds.
pub const TAU_MS: u64 = 300_000;

/// Staleness window of an oracle price, in milliseconds.
pub const MAX_ORACLE_AGE_MS: u64 = 3_600_000;

/// 10^exp as a kernel integer.
pub fn pow10(exp: u8) -> U256 {
    U256::from(10u64).pow(U256::from(exp))
}
