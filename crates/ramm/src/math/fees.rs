//! Dynamic fee and leverage scaling.
//!
//! Trading against the pool's drift gets cubically more expensive: the fee
//! multiplier is `pressure^3` where `pressure` is the larger of the inbound
//! ratio and the reciprocal of the outbound ratio, and leverage shrinks by
//! the same factor. Trades that rebalance the pool (`pressure < 1`) are
//! discounted and quoted with extra leverage.

use crate::{
    error::RammResult,
    math::{
        bignumber::U256,
        constants::{BASE_FEE, BASE_LEVERAGE, ONE},
        fixed_point::{div, mul, pow_n},
    },
};

/// Fee and leverage for a trade, from the pre-trade imbalance ratios of the
/// inbound and outbound assets. Both equal their base values at equilibrium;
/// the fee is capped at one and the leverage floored at one.
pub fn scaled_fee_and_leverage(imb_in: U256, imb_out: U256) -> RammResult<(U256, U256)> {
    let pressure = imb_in.max(div(ONE, imb_out)?);
    let scale = pow_n(pressure, 3)?;

    let fee = mul(BASE_FEE, scale)?.min(ONE);
    let leverage = div(BASE_LEVERAGE, scale)?.max(ONE);
    Ok((fee, leverage))
}
