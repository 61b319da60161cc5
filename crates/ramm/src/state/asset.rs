use borsh::{BorshDeserialize, BorshSerialize};

use crate::math::{bignumber::U256, volatility::VolatilityState};

/// Opaque identifier of a fungible asset. Pools key their slots by it and
/// coins carry it, so the engine can check that a coin, an oracle and a slot
/// all refer to the same asset.
#[derive(
    Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Debug, Default, BorshSerialize,
    BorshDeserialize,
)]
pub struct AssetId(pub u64);

/// One asset slot of a pool. The slot index is stable for the pool's
/// lifetime; iteration order over slots is the registration order, which
/// keeps serialization and event emission deterministic.
#[derive(Default, Clone, Copy, PartialEq, Eq, Debug, BorshSerialize, BorshDeserialize)]
pub struct AssetState {
    /// Asset bound to this slot.
    pub asset: AssetId,

    /// Declared decimal count of the asset's raw units.
    pub decimals: u8,

    /// Raw-unit amount below which a trade of this asset fails.
    pub min_trade: u64,

    /// Tradable liquidity in raw units. Never includes collected fees.
    pub balance: u128,

    /// Circulating LP tokens for this asset, in LP raw units.
    pub lp_supply: u128,

    /// Protocol fees owed in this asset, held apart from `balance`.
    pub collected_fees: u128,

    /// `10^(PRECISION_DECIMAL_PLACES - decimals)`; scales raw units into the
    /// kernel's precision.
    pub factor_balance: U256,

    /// Rolling volatility observation for this asset's oracle.
    pub volatility: VolatilityState,
}
