//! Per-asset volatility tracking.
//!
//! Each asset keeps the last observed oracle price and a volatility
//! parameter, the largest fractional price move seen inside the `TAU`
//! window. The parameter is charged as an extra fee while fresh; a stale
//! parameter is charged one final time before being replaced.

use crate::{
    error::RammResult,
    math::{bignumber::U256, constants::TAU_MS, fixed_point::div},
};
use borsh::{BorshDeserialize, BorshSerialize};

#[derive(
    Default, Clone, Copy, PartialEq, Eq, Debug, BorshSerialize, BorshDeserialize,
)]
pub struct VolatilityState {
    /// Last oracle price observed for the asset, kernel precision.
    pub prev_price: U256,

    /// Timestamp of `prev_price`, milliseconds.
    pub prev_price_ts: u64,

    /// Largest fractional price move inside the last `TAU` window,
    /// kernel precision.
    pub vol_param: U256,

    /// Timestamp at which `vol_param` was last raised, milliseconds.
    pub vol_ts: u64,
}

impl VolatilityState {
    /// Folds a fresh oracle observation into the state and returns the
    /// volatility fee the observation carries.
    ///
    /// A price observation older than `TAU` (or a first observation) yields
    /// no fee and leaves the volatility parameter untouched; the price and
    /// its timestamp are still recorded so the tracker can re-arm.
    pub fn update(&mut self, price: U256, now_ms: u64) -> RammResult<U256> {
        let mut fee = U256::zero();

        if now_ms <= self.prev_price_ts + TAU_MS && !self.prev_price.is_zero() {
            let delta = if price >= self.prev_price {
                price - self.prev_price
            } else {
                self.prev_price - price
            };
            let movement = div(delta, self.prev_price)?;

            if now_ms <= self.vol_ts + TAU_MS {
                if movement <= self.vol_param {
                    fee = self.vol_param;
                } else {
                    fee = movement;
                    self.vol_param = movement;
                    self.vol_ts = now_ms;
                }
            } else {
                // a stale parameter is charged one last time, then replaced
                fee = self.vol_param;
                self.vol_param = movement;
                self.vol_ts = now_ms;
            }
        }

        self.prev_price = price;
        self.prev_price_ts = now_ms;
        Ok(fee)
    }
}
