use num_derive::FromPrimitive;
use thiserror::Error;

pub type RammResult<T = ()> = std::result::Result<T, ErrorCode>;

/// Every failure mode of the pool maps to a distinct abort code; nothing is
/// recovered locally, the whole operation unwinds and state is untouched.
#[derive(Error, Clone, Copy, PartialEq, Eq, Debug, FromPrimitive)]
pub enum ErrorCode {
    #[error("Pool arity does not match the operation arity")]
    InvalidSize,
    #[error("Oracle is bound to a different asset than the one priced")]
    InvalidAggregator,
    #[error("Oracle price is older than the staleness window")]
    StalePrice,
    #[error("Oracle reported a negative signed decimal")]
    NegativeSbD,
    #[error("Trade amount is below the per-asset minimum")]
    TradeAmountTooSmall,
    #[error("Computed output is below the caller's minimum")]
    TradeBelowMinimumOut,
    #[error("Inbound asset has no LP tokens in circulation")]
    NoLPTokensInCirculation,
    #[error("Pool balance is insufficient for the outbound amount")]
    RAMMInsufficientBalance,
    #[error("Inbound amount exceeds the per-trade fraction of the pool")]
    TradeExcessAmountIn,
    #[error("Outbound amount exceeds the per-trade fraction of the pool")]
    TradeExcessAmountOut,
    #[error("Trade would drain a balance with LP tokens still circulating")]
    InsufBalForCirculatingLPToken,
    #[error("Trade would push imbalance ratios out of bounds")]
    ImbalanceCheckFailed,
    #[error("Deposit amount is zero or mints no LP tokens")]
    InvalidDeposit,
    #[error("Withdrawal amount is zero or exceeds the circulating supply")]
    InvalidWithdrawal,
    #[error("Capability is not bound to this pool")]
    NotAdmin,
    #[error("Asset is not registered in this pool")]
    UnknownAsset,
    #[error("Asset is already registered in this pool")]
    DuplicateAsset,
    #[error("Pool is already initialized")]
    PoolAlreadyInitialized,
    #[error("Pool is not initialized yet")]
    PoolNotInitialized,
    #[error("Multiplication operand or product exceeds the precision ceiling")]
    MulOverflow,
    #[error("Quotient exceeds the precision ceiling")]
    DivOverflow,
    #[error("Dividend exceeds the precision ceiling")]
    DividendTooLarge,
    #[error("Integer exponent exceeds the supported range")]
    PowNExponentTooLarge,
    #[error("Power base exceeds the precision ceiling")]
    PowNBaseTooLarge,
    #[error("Fractional power base is outside [0.67, 1.5]")]
    PowDBaseOutOfBounds,
    #[error("Fractional power exponent is not below one")]
    PowDExpTooLarge,
    #[error("Math Error: Unable to perform operation")]
    MathError,
    #[error("Unable to convert big number due to an underflow or an overflow")]
    BigNumberConversionError,
    #[error("Unable to cast datatype")]
    CastingFailure,
    #[error("Inbound and outbound assets must differ")]
    SameAssetTrade,
}

impl ErrorCode {
    /// Numeric abort code surfaced to callers.
    pub fn abort_code(self) -> u32 {
        self as u32
    }

    /// Inverse of [`ErrorCode::abort_code`].
    pub fn from_abort_code(code: u32) -> Option<Self> {
        <ErrorCode as num_traits::FromPrimitive>::from_u32(code)
    }
}

#[cfg(test)]
mod test {
    use super::ErrorCode;

    #[test]
    fn abort_codes_round_trip() {
        for code in 0..=29u32 {
            let kind = ErrorCode::from_abort_code(code).unwrap();
            assert_eq!(kind.abort_code(), code);
        }
        assert!(ErrorCode::from_abort_code(30).is_none());
    }
}
