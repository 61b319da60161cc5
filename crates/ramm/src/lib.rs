//! An oracle-priced multi-asset liquidity pool.
//!
//! Pools hold two or three assets, price trades from external oracle feeds
//! through a leverage-concentrated curve, and charge fees that scale with
//! pool imbalance and recent oracle volatility. Liquidity providers deposit
//! one asset at a time and hold per-asset LP tokens.
//!
//! The arity-suffixed free functions below are the canonical entry points;
//! they delegate to the generic engine on [`state::pool::Pool`]. Every
//! operation takes the pool by exclusive reference and either commits its
//! full state diff or aborts with a typed [`error::ErrorCode`] leaving pool
//! and coins untouched.

pub mod error;
pub mod events;
pub mod macros;
pub mod math;
pub mod operations;
pub mod state;

pub use error::{ErrorCode, RammResult};
pub use events::ImbalanceRatiosEvent;
pub use math::bignumber::U256;
pub use state::{
    asset::AssetId,
    caps::{AdminCap, NewAssetCap, PoolId},
    coin::{Coin, LpCoin},
    oracle::PriceFeed,
    pool::Pool,
};

/// Trade a fixed input in a two-asset pool.
pub fn trade_amount_in_2(
    pool: &mut Pool<2>,
    now_ms: u64,
    coin_in: &mut Coin,
    asset_out: AssetId,
    min_amount_out: u64,
    oracles: &[PriceFeed; 2],
) -> RammResult<Coin> {
    pool.trade_amount_in(now_ms, coin_in, asset_out, min_amount_out, oracles)
}

/// Trade a fixed input in a three-asset pool.
pub fn trade_amount_in_3(
    pool: &mut Pool<3>,
    now_ms: u64,
    coin_in: &mut Coin,
    asset_out: AssetId,
    min_amount_out: u64,
    oracles: &[PriceFeed; 3],
) -> RammResult<Coin> {
    pool.trade_amount_in(now_ms, coin_in, asset_out, min_amount_out, oracles)
}

/// Trade for a fixed output in a two-asset pool; the input is charged
/// against `max_in`, which keeps the remainder.
pub fn trade_amount_out_2(
    pool: &mut Pool<2>,
    now_ms: u64,
    amount_out: u64,
    max_in: &mut Coin,
    asset_out: AssetId,
    oracles: &[PriceFeed; 2],
) -> RammResult<Coin> {
    pool.trade_amount_out(now_ms, amount_out, max_in, asset_out, oracles)
}

/// Trade for a fixed output in a three-asset pool.
pub fn trade_amount_out_3(
    pool: &mut Pool<3>,
    now_ms: u64,
    amount_out: u64,
    max_in: &mut Coin,
    asset_out: AssetId,
    oracles: &[PriceFeed; 3],
) -> RammResult<Coin> {
    pool.trade_amount_out(now_ms, amount_out, max_in, asset_out, oracles)
}

/// Deposit one asset into a two-asset pool for LP tokens.
pub fn liquidity_deposit_2(
    pool: &mut Pool<2>,
    now_ms: u64,
    coin_in: &mut Coin,
    oracles: &[PriceFeed; 2],
) -> RammResult<LpCoin> {
    pool.liquidity_deposit(now_ms, coin_in, oracles)
}

/// Deposit one asset into a three-asset pool for LP tokens.
pub fn liquidity_deposit_3(
    pool: &mut Pool<3>,
    now_ms: u64,
    coin_in: &mut Coin,
    oracles: &[PriceFeed; 3],
) -> RammResult<LpCoin> {
    pool.liquidity_deposit(now_ms, coin_in, oracles)
}

/// Redeem LP tokens from a two-asset pool.
pub fn liquidity_withdrawal_2(
    pool: &mut Pool<2>,
    now_ms: u64,
    lp_coin: &mut LpCoin,
    oracles: &[PriceFeed; 2],
) -> RammResult<Vec<Coin>> {
    pool.liquidity_withdrawal(now_ms, lp_coin, oracles)
}

/// Redeem LP tokens from a three-asset pool.
pub fn liquidity_withdrawal_3(
    pool: &mut Pool<3>,
    now_ms: u64,
    lp_coin: &mut LpCoin,
    oracles: &[PriceFeed; 3],
) -> RammResult<Vec<Coin>> {
    pool.liquidity_withdrawal(now_ms, lp_coin, oracles)
}

/// Drain the protocol fees of a two-asset pool to its admin.
pub fn collect_fees_2(pool: &mut Pool<2>, admin: &AdminCap) -> RammResult<Vec<Coin>> {
    pool.collect_fees(admin)
}

/// Drain the protocol fees of a three-asset pool to its admin.
pub fn collect_fees_3(pool: &mut Pool<3>, admin: &AdminCap) -> RammResult<Vec<Coin>> {
    pool.collect_fees(admin)
}

/// Snapshot the imbalance ratios of a two-asset pool.
pub fn imbalance_ratios_event_2(
    pool: &Pool<2>,
    now_ms: u64,
    oracles: &[PriceFeed; 2],
) -> RammResult<ImbalanceRatiosEvent<2>> {
    pool.imbalance_ratios_event(now_ms, oracles)
}

/// Snapshot the imbalance ratios of a three-asset pool.
pub fn imbalance_ratios_event_3(
    pool: &Pool<3>,
    now_ms: u64,
    oracles: &[PriceFeed; 3],
) -> RammResult<ImbalanceRatiosEvent<3>> {
    pool.imbalance_ratios_event(now_ms, oracles)
}
