//! Portfolio weights and imbalance ratios.
//!
//! All inputs are kernel-precision values: balances and LP supplies already
//! scaled by their decimal factors, prices already scaled by the oracle
//! factor. Sums accumulate in kernel precision and divide once at the end, so
//! rounding is deterministic across call sites.

use crate::{
    error::{ErrorCode, RammResult},
    math::{
        bignumber::U256,
        constants::{DELTA, ONE},
        fixed_point::{div, mul},
        safe_math::SafeMath,
    },
    validate,
};

/// Per-asset share of pool value: `W_i = B_i * P_i / sum_j B_j * P_j`.
pub fn weights<const N: usize>(
    balances: &[U256; N],
    prices: &[U256; N],
) -> RammResult<[U256; N]> {
    let mut values = [U256::zero(); N];
    let mut total = U256::zero();
    for k in 0..N {
        values[k] = mul(balances[k], prices[k])?;
        total = total.safe_add(values[k])?;
    }
    validate!(!total.is_zero(), ErrorCode::MathError)?;

    let mut out = [U256::zero(); N];
    for k in 0..N {
        out[k] = div(values[k], total)?;
    }
    Ok(out)
}

/// Imbalance ratio of each asset: value-per-LP-token of the asset divided by
/// the pool-wide value-per-LP-token.
///
/// Assets with no circulating LP contribute nothing to either sum and their
/// own ratio is defined as one, as is every ratio when no LP circulates at
/// all.
pub fn imbalance_ratios<const N: usize>(
    balances: &[U256; N],
    lp_tokens: &[U256; N],
    prices: &[U256; N],
) -> RammResult<[U256; N]> {
    let mut lp_value = U256::zero();
    let mut balance_value = U256::zero();
    for k in 0..N {
        if !lp_tokens[k].is_zero() {
            lp_value = lp_value.safe_add(mul(lp_tokens[k], prices[k])?)?;
            balance_value = balance_value.safe_add(mul(balances[k], prices[k])?)?;
        }
    }

    let mut out = [ONE; N];
    for k in 0..N {
        if lp_tokens[k].is_zero() || lp_value.is_zero() {
            continue;
        }
        out[k] = div(
            mul(balances[k], lp_value)?,
            mul(lp_tokens[k], balance_value)?,
        )?;
    }
    Ok(out)
}

/// Whether a hypothetical trade keeps the inbound and outbound ratios
/// acceptable.
///
/// A post-trade ratio inside `[1 - DELTA, 1 + DELTA]` always passes. A ratio
/// that ends outside the band passes only if it started outside, stayed on
/// the same side, and moved strictly closer to one.
pub fn check_imbalance_ratios<const N: usize>(
    pre: &[U256; N],
    post: &[U256; N],
    idx_in: usize,
    idx_out: usize,
) -> bool {
    let lo = ONE - DELTA;
    let hi = ONE + DELTA;
    let in_band = |x: U256| lo <= x && x <= hi;
    let distance = |x: U256| if x >= ONE { x - ONE } else { ONE - x };

    for k in [idx_in, idx_out] {
        let before = pre[k];
        let after = post[k];
        if in_band(after) {
            continue;
        }
        if in_band(before) {
            return false;
        }
        // both outside: reject a flip to the opposite side of the band
        if (before > hi && after < lo) || (before < lo && after > hi) {
            return false;
        }
        if distance(after) >= distance(before) {
            return false;
        }
    }
    true
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::math::constants::pow10;

    // The whitepaper's initial three-asset state: 200 ETH, 200k MATIC,
    // 400k USDT at prices 1800 / 1.2 / 1, LP issued one-for-one.
    fn whitepaper_state() -> ([U256; 3], [U256; 3], [U256; 3]) {
        let balances = [
            U256::from(200u64) * ONE,
            U256::from(200_000u64) * ONE,
            U256::from(400_000u64) * ONE,
        ];
        let lp_tokens = balances;
        let prices = [
            U256::from(1_800u64) * ONE,
            U256::from(1_200u64) * pow10(9),
            ONE,
        ];
        (balances, lp_tokens, prices)
    }

    #[test]
    fn weights_sum_to_one() {
        let (balances, _, prices) = whitepaper_state();
        let w = weights(&balances, &prices).unwrap();
        assert_eq!(w[0], U256::from(360_000_000_000u64));
        assert_eq!(w[1], U256::from(240_000_000_000u64));
        assert_eq!(w[2], U256::from(400_000_000_000u64));
        assert_eq!(w[0] + w[1] + w[2], ONE);
    }

    #[test]
    fn balanced_pool_has_unit_ratios() {
        let (balances, lp_tokens, prices) = whitepaper_state();
        let ratios = imbalance_ratios(&balances, &lp_tokens, &prices).unwrap();
        assert_eq!(ratios, [ONE; 3]);
    }

    #[test]
    fn zero_lp_assets_are_neutral() {
        let (mut balances, mut lp_tokens, prices) = whitepaper_state();
        balances[0] = U256::zero();
        lp_tokens[0] = U256::zero();
        let ratios = imbalance_ratios(&balances, &lp_tokens, &prices).unwrap();
        assert_eq!(ratios[0], ONE);
        assert_eq!(ratios[1], ONE);
        assert_eq!(ratios[2], ONE);
    }

    #[test]
    fn no_circulating_lp_defaults_to_one() {
        let (balances, _, prices) = whitepaper_state();
        let ratios = imbalance_ratios(&balances, &[U256::zero(); 3], &prices).unwrap();
        assert_eq!(ratios, [ONE; 3]);
    }

    #[test]
    fn band_check_case_table() {
        let lo_out = U256::from(700_000_000_000u64); // 0.70, below band
        let hi_out = U256::from(1_300_000_000_000u64); // 1.30, above band
        let lo_edge = U256::from(760_000_000_000u64); // 0.76, inside
        let closer = U256::from(720_000_000_000u64); // 0.72, still out but closer

        // both stay in band
        assert!(check_imbalance_ratios(&[ONE, ONE], &[ONE, ONE], 0, 1));
        // in band -> out of band
        assert!(!check_imbalance_ratios(&[ONE, ONE], &[hi_out, ONE], 0, 1));
        // out of band -> into band
        assert!(check_imbalance_ratios(&[lo_out, ONE], &[lo_edge, ONE], 0, 1));
        // out of band, same side, strictly closer
        assert!(check_imbalance_ratios(&[lo_out, ONE], &[closer, ONE], 0, 1));
        // out of band, same side, not closer
        assert!(!check_imbalance_ratios(&[closer, ONE], &[lo_out, ONE], 0, 1));
        // out of band, unchanged
        assert!(!check_imbalance_ratios(&[lo_out, ONE], &[lo_out, ONE], 0, 1));
        // flips to the opposite side of the band
        assert!(!check_imbalance_ratios(&[lo_out, ONE], &[hi_out, ONE], 0, 1));
    }

    // A drifted pool trading further in the drained direction: both ratios
    // jump across the band and the trade must be refused.
    #[test]
    fn band_check_rejects_side_flip_scenario() {
        let prices = [
            U256::from(1_800u64) * ONE,
            U256::from(1_200u64) * pow10(9),
            ONE,
        ];
        let lp_tokens = [
            U256::from(200u64) * ONE,
            U256::from(200_000u64) * ONE,
            U256::from(400_000u64) * ONE,
        ];
        let pre_balances = [
            U256::from(250u64) * ONE,
            U256::from(200_000u64) * ONE,
            U256::from(29_215_918u64) * pow10(10),
        ];
        let post_balances = [
            U256::from(140u64) * ONE,
            U256::from(200_000u64) * ONE,
            U256::from(53_315_918u64) * pow10(10),
        ];

        let pre = imbalance_ratios(&pre_balances, &lp_tokens, &prices).unwrap();
        let post = imbalance_ratios(&post_balances, &lp_tokens, &prices).unwrap();

        assert_eq!(
            pre,
            [
                U256::from(1_272_706_120_814u64),
                U256::from(1_018_164_896_651u64),
                U256::from(743_665_553_276u64),
            ]
        );
        assert_eq!(
            post,
            [
                U256::from(682_820_788_865u64),
                U256::from(975_458_269_807u64),
                U256::from(1_300_186_328_136u64),
            ]
        );
        // USDT flows in, ETH flows out
        assert!(!check_imbalance_ratios(&pre, &post, 2, 0));
    }
}
