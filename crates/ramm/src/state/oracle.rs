//! Oracle price adapter.
//!
//! A feed reports a signed decimal as `(mantissa, scale, negative)` plus a
//! publish timestamp; the adapter normalizes it into the kernel's precision
//! and rejects negative, stale or wrongly-bound feeds. The core treats a feed
//! as a pure function of the query time.

use borsh::{BorshDeserialize, BorshSerialize};

use crate::{
    error::{ErrorCode, RammResult},
    math::{
        bignumber::U256,
        constants::{pow10, MAX_ORACLE_AGE_MS, PRECISION_DECIMAL_PLACES},
        safe_math::SafeMath,
    },
    state::asset::AssetId,
    validate,
};

/// A price observation from an external aggregator, bound to one asset.
#[derive(Clone, Copy, PartialEq, Eq, Debug, BorshSerialize, BorshDeserialize)]
pub struct PriceFeed {
    /// Asset this aggregator is bound to.
    pub asset: AssetId,

    /// Unsigned mantissa of the reported price.
    pub mantissa: u128,

    /// Whether the reported value is negative.
    pub negative: bool,

    /// Number of decimal places encoded in `mantissa`.
    pub scale: u8,

    /// Publish time of the observation, milliseconds.
    pub timestamp_ms: u64,
}

/// A feed value normalized for the kernel: the mantissa at oracle scale plus
/// the factor lifting it to kernel precision.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct ScaledPrice {
    /// Price mantissa at the oracle's scale.
    pub price: U256,

    /// `10^(PRECISION_DECIMAL_PLACES - scale)`.
    pub factor: U256,
}

impl ScaledPrice {
    /// The price in kernel precision.
    pub fn kernel(&self) -> RammResult<U256> {
        self.price.safe_mul(self.factor)
    }
}

impl PriceFeed {
    pub fn new(asset: AssetId, mantissa: u128, scale: u8, timestamp_ms: u64) -> Self {
        PriceFeed {
            asset,
            mantissa,
            negative: false,
            scale,
            timestamp_ms,
        }
    }

    /// Validates the feed against the asset it is expected to price and the
    /// query time, then normalizes it.
    pub fn price_at(&self, expected: AssetId, now_ms: u64) -> RammResult<ScaledPrice> {
        validate!(self.asset == expected, ErrorCode::InvalidAggregator)?;
        validate!(
            self.scale <= PRECISION_DECIMAL_PLACES,
            ErrorCode::InvalidAggregator
        )?;
        validate!(!self.negative, ErrorCode::NegativeSbD)?;
        validate!(
            now_ms.saturating_sub(self.timestamp_ms) <= MAX_ORACLE_AGE_MS,
            ErrorCode::StalePrice
        )?;

        Ok(ScaledPrice {
            price: U256::from(self.mantissa),
            factor: pow10(PRECISION_DECIMAL_PLACES - self.scale),
        })
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::math::constants::ONE;

    const ETH: AssetId = AssetId(1);

    #[test]
    fn normalizes_to_kernel_precision() {
        // 1800 at scale 9
        let feed = PriceFeed::new(ETH, 1_800_000_000_000, 9, 1_000);
        let scaled = feed.price_at(ETH, 1_000).unwrap();
        assert_eq!(scaled.factor, U256::from(1_000u64));
        assert_eq!(scaled.kernel().unwrap(), U256::from(1_800u64) * ONE);
    }

    #[test]
    fn rejects_wrong_binding() {
        let feed = PriceFeed::new(ETH, 1_800_000_000_000, 9, 1_000);
        assert_eq!(
            feed.price_at(AssetId(2), 1_000),
            Err(ErrorCode::InvalidAggregator)
        );
    }

    #[test]
    fn rejects_negative_value() {
        let mut feed = PriceFeed::new(ETH, 1_800_000_000_000, 9, 1_000);
        feed.negative = true;
        assert_eq!(feed.price_at(ETH, 1_000), Err(ErrorCode::NegativeSbD));
    }

    #[test]
    fn rejects_stale_price() {
        let feed = PriceFeed::new(ETH, 1_800_000_000_000, 9, 1_000);
        assert!(feed.price_at(ETH, 1_000 + MAX_ORACLE_AGE_MS).is_ok());
        assert_eq!(
            feed.price_at(ETH, 1_001 + MAX_ORACLE_AGE_MS),
            Err(ErrorCode::StalePrice)
        );
    }

    #[test]
    fn rejects_unsupported_scale() {
        let feed = PriceFeed::new(ETH, 1_800_000_000_000, 13, 1_000);
        assert_eq!(feed.price_at(ETH, 1_000), Err(ErrorCode::InvalidAggregator));
    }
}
