//! Trade-amount primitives.
//!
//! The curve is a weighted power function over virtual balances scaled by the
//! leverage parameter: small trades execute at the oracle price ratio and
//! slippage shrinks as leverage grows, while low leverage degrades toward a
//! constant-product shape. The forward and inverse forms are algebraic duals,
//! so quoting an output and charging for an input stay consistent.

use crate::{
    error::RammResult,
    math::{
        bignumber::U256,
        constants::ONE,
        fixed_point::{div, mul, power},
        safe_math::SafeMath,
    },
};

/// Output amount for a fixed input:
/// `ao = L*B_o * (1 - (L*B_i / (L*B_i + ai))^(W_i / W_o))`.
///
/// All quantities in kernel precision; `amount_in` is the effective inbound
/// amount after fees.
pub fn trade_output_amount(
    balance_in: U256,
    balance_out: U256,
    weight_in: U256,
    weight_out: U256,
    amount_in: U256,
    leverage: U256,
) -> RammResult<U256> {
    let lev_in = mul(leverage, balance_in)?;
    let lev_out = mul(leverage, balance_out)?;

    let ratio = div(lev_in, lev_in.safe_add(amount_in)?)?;
    let exponent = div(weight_in, weight_out)?;
    let factor = power(ratio, exponent)?;

    mul(lev_out, ONE.safe_sub(factor)?)
}

/// Input amount required for a fixed output:
/// `ai = L*B_i * ((L*B_o / (L*B_o - ao))^(W_o / W_i) - 1)`.
pub fn trade_input_amount(
    balance_in: U256,
    balance_out: U256,
    weight_in: U256,
    weight_out: U256,
    amount_out: U256,
    leverage: U256,
) -> RammResult<U256> {
    let lev_in = mul(leverage, balance_in)?;
    let lev_out = mul(leverage, balance_out)?;

    let ratio = div(lev_out, lev_out.safe_sub(amount_out)?)?;
    let exponent = div(weight_out, weight_in)?;
    let factor = power(ratio, exponent)?;

    mul(lev_in, factor.safe_sub(ONE)?)
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::math::{
        constants::{BASE_FEE, BASE_LEVERAGE},
        weights::weights,
    };

    fn kernel(x: u64) -> U256 {
        U256::from(x) * ONE
    }

    // 200 ETH / 200k MATIC / 400k USDT at 1800 / 1.2 / 1: selling ~10 ETH
    // for USDT lands within 0.15% of the oracle price at base leverage.
    #[test]
    fn forward_three_asset_first_trade() {
        let balances = [kernel(200), kernel(200_000), kernel(400_000)];
        let prices = [
            kernel(1_800),
            U256::from(1_200_000_000_000u64),
            ONE,
        ];
        let w = weights(&balances, &prices).unwrap();
        assert_eq!(w[0], U256::from(360_000_000_000u64));
        assert_eq!(w[2], U256::from(400_000_000_000u64));

        let amount_in = mul(kernel(10), ONE - BASE_FEE).unwrap();
        let out = trade_output_amount(
            balances[0],
            balances[2],
            w[0],
            w[2],
            amount_in,
            BASE_LEVERAGE,
        )
        .unwrap();
        assert_eq!(out, U256::from(17_973_471_480_000_000u128));
    }

    // 500 ETH / 900k USDT at 2000: buying 20 ETH requires ~40,017 USDT of
    // curve input, a 0.04% premium over the oracle's 40,000.
    #[test]
    fn inverse_two_asset_buy() {
        let balances = [kernel(500), kernel(900_000)];
        let prices = [kernel(2_000), ONE];
        let w = weights(&balances, &prices).unwrap();
        assert_eq!(w[0] + w[1], ONE - U256::from(1u8));

        let input = trade_input_amount(
            balances[1],
            balances[0],
            w[1],
            w[0],
            kernel(20),
            BASE_LEVERAGE,
        )
        .unwrap();
        assert_eq!(input, U256::from(40_016_895_210_000_000u128));
    }

    #[test]
    fn small_trades_track_the_oracle_price() {
        let balances = [kernel(200), kernel(200_000), kernel(400_000)];
        let prices = [kernel(1_800), U256::from(1_200_000_000_000u64), ONE];
        let w = weights(&balances, &prices).unwrap();

        // 1 ETH in: within 0.005% of 1800 USDT out
        let out =
            trade_output_amount(balances[0], balances[2], w[0], w[2], ONE, BASE_LEVERAGE)
                .unwrap();
        assert_eq!(out, U256::from(1_799_914_840_000_000u128));
    }

    #[test]
    fn lower_leverage_means_more_slippage() {
        let balances = [kernel(200), kernel(200_000), kernel(400_000)];
        let prices = [kernel(1_800), U256::from(1_200_000_000_000u64), ONE];
        let w = weights(&balances, &prices).unwrap();
        let amount_in = mul(kernel(10), ONE - BASE_FEE).unwrap();

        let at_base = trade_output_amount(
            balances[0],
            balances[2],
            w[0],
            w[2],
            amount_in,
            BASE_LEVERAGE,
        )
        .unwrap();
        let at_one =
            trade_output_amount(balances[0], balances[2], w[0], w[2], amount_in, ONE)
                .unwrap();
        assert_eq!(at_one, U256::from(17_167_997_371_200_000u128));
        assert!(at_one < at_base);
    }

    #[test]
    fn forward_and_inverse_are_consistent() {
        let balances = [kernel(500), kernel(900_000)];
        let prices = [kernel(2_000), ONE];
        let w = weights(&balances, &prices).unwrap();

        let input = trade_input_amount(
            balances[1],
            balances[0],
            w[1],
            w[0],
            kernel(20),
            BASE_LEVERAGE,
        )
        .unwrap();
        let back = trade_output_amount(
            balances[1],
            balances[0],
            w[1],
            w[0],
            input,
            BASE_LEVERAGE,
        )
        .unwrap();
        // round-trip lands within a few kernel units of the requested 20 ETH
        let requested = kernel(20);
        let distance = if back >= requested {
            back - requested
        } else {
            requested - back
        };
        assert!(distance <= U256::from(10_000_000u64));
    }
}
