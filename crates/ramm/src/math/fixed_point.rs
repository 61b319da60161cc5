//! Fixed-point kernel at 12 decimal places.
//!
//! Every value is an unsigned integer read as `value * ONE`. Operations abort
//! on inputs at or above the `10^25` operand ceiling instead of wrapping, and
//! results truncate toward zero. `pow_d` is the one exception to truncation:
//! it rounds its internal square roots and products to nearest, which is what
//! keeps the binary-expansion error inside one kernel unit.

use crate::{
    error::{ErrorCode, RammResult},
    math::{
        bignumber::U256,
        constants::{
            HALF_ONE, MAX_OPERAND, MAX_POW_N_EXPONENT, MAX_PRODUCT, ONE, POW_D_BASE_MAX,
            POW_D_BASE_MIN, POW_D_MAX_ITERATIONS,
        },
        safe_math::SafeMath,
    },
    validate,
};

/// `a * b / ONE`, truncated.
pub fn mul(a: U256, b: U256) -> RammResult<U256> {
    validate!(
        a < MAX_OPERAND && b < MAX_OPERAND,
        ErrorCode::MulOverflow
    )?;
    let product = a.safe_mul(b)?;
    validate!(product < MAX_PRODUCT, ErrorCode::MulOverflow)?;
    Ok(product / ONE)
}

/// `a * ONE / b`, truncated.
pub fn div(a: U256, b: U256) -> RammResult<U256> {
    validate!(a < MAX_OPERAND, ErrorCode::DividendTooLarge)?;
    let quotient = a.safe_mul(ONE)?.safe_div(b)?;
    validate!(quotient < MAX_OPERAND, ErrorCode::DivOverflow)?;
    Ok(quotient)
}

/// `a^n` for an integer exponent, by binary exponentiation through [`mul`].
pub fn pow_n(a: U256, n: u8) -> RammResult<U256> {
    validate!(n <= MAX_POW_N_EXPONENT, ErrorCode::PowNExponentTooLarge)?;
    validate!(a < MAX_OPERAND, ErrorCode::PowNBaseTooLarge)?;

    let mut result = ONE;
    let mut base = a;
    let mut exponent = n;
    while exponent > 0 {
        if exponent & 1 == 1 {
            result = mul(result, base)?;
        }
        exponent >>= 1;
        if exponent > 0 {
            base = mul(base, base)?;
        }
    }
    Ok(result)
}

/// `a^e` for a fractional exponent `e in [0, 1)` and base `a in [0.67, 1.5]`.
///
/// Expands `e` one binary digit at a time: the remaining exponent doubles
/// each round, the running root halves (`a^(1/2^k)`), and set digits multiply
/// into the accumulator. 32 digits resolve past the kernel precision and the
/// exponent's expansion may not terminate, so the loop is capped there.
pub fn pow_d(a: U256, e: U256) -> RammResult<U256> {
    validate!(
        POW_D_BASE_MIN <= a && a <= POW_D_BASE_MAX,
        ErrorCode::PowDBaseOutOfBounds
    )?;
    validate!(e < ONE, ErrorCode::PowDExpTooLarge)?;

    let mut acc = ONE;
    let mut root = a;
    let mut remaining = e;
    for _ in 0..POW_D_MAX_ITERATIONS {
        if remaining.is_zero() {
            break;
        }
        root = sqrt_round(root)?;
        remaining = remaining.safe_mul(U256::from(2u8))?;
        if remaining >= ONE {
            acc = mul_round(acc, root)?;
            remaining = remaining.safe_sub(ONE)?;
        }
    }
    Ok(acc)
}

/// General real power, composed as `pow_n(a, floor(e)) * pow_d(a, frac(e))`.
pub fn power(a: U256, e: U256) -> RammResult<U256> {
    let integer = (e / ONE).try_to_u64()?;
    validate!(
        integer <= MAX_POW_N_EXPONENT as u64,
        ErrorCode::PowNExponentTooLarge
    )?;
    let fraction = e % ONE;

    let mut result = pow_n(a, integer as u8)?;
    if !fraction.is_zero() {
        result = mul(result, pow_d(a, fraction)?)?;
    }
    Ok(result)
}

/// `a * b / ONE`, rounded to nearest. Only reachable from `pow_d`, whose
/// operands are bounded by its base domain.
fn mul_round(a: U256, b: U256) -> RammResult<U256> {
    Ok(a.safe_mul(b)?.safe_add(HALF_ONE)? / ONE)
}

/// Fixed-point square root, rounded to nearest.
fn sqrt_round(x: U256) -> RammResult<U256> {
    let scaled = x.safe_mul(ONE)?;
    let floor = scaled.integer_sqrt();
    let next = floor.safe_add(U256::from(1u8))?;
    // nearest of the two bracketing integers
    if next.safe_mul(next)?.safe_add(floor.safe_mul(floor)?)?
        < scaled.safe_mul(U256::from(2u8))?
    {
        Ok(next)
    } else {
        Ok(floor)
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::math::constants::pow10;

    fn fixed(units: u64, millis: u64) -> U256 {
        U256::from(units) * ONE + U256::from(millis) * pow10(9)
    }

    #[test]
    fn mul_truncates() {
        assert_eq!(mul(fixed(2, 0), fixed(3, 0)).unwrap(), fixed(6, 0));
        assert_eq!(
            mul(U256::from(1u8), U256::from(999_999_999_999u64)).unwrap(),
            U256::zero()
        );
    }

    #[test]
    fn mul_rejects_large_operands() {
        assert_eq!(
            mul(MAX_OPERAND, ONE),
            Err(ErrorCode::MulOverflow)
        );
        // operands below the ceiling whose product is still too large
        let near = MAX_OPERAND - U256::from(1u8);
        assert_eq!(mul(near, near), Err(ErrorCode::MulOverflow));
    }

    #[test]
    fn div_truncates_and_guards() {
        assert_eq!(div(fixed(6, 0), fixed(3, 0)).unwrap(), fixed(2, 0));
        assert_eq!(div(ONE, U256::from(3u8) * ONE).unwrap(), U256::from(333_333_333_333u64));
        assert_eq!(div(MAX_OPERAND, ONE), Err(ErrorCode::DividendTooLarge));
        assert_eq!(div(ONE, U256::zero()), Err(ErrorCode::MathError));
        assert_eq!(
            div(MAX_OPERAND - U256::from(1u8), U256::from(1u8)),
            Err(ErrorCode::DivOverflow)
        );
    }

    #[test]
    fn pow_n_anchors() {
        assert_eq!(pow_n(fixed(1, 100), 3).unwrap(), U256::from(1_331_000_000_000u64));
        assert_eq!(pow_n(fixed(0, 750), 5).unwrap(), U256::from(237_304_687_500u64));
        assert_eq!(pow_n(ONE, 127).unwrap(), ONE);
        assert_eq!(pow_n(ONE, 128), Err(ErrorCode::PowNExponentTooLarge));
        assert_eq!(pow_n(MAX_OPERAND, 2), Err(ErrorCode::PowNBaseTooLarge));
    }

    #[test]
    fn pow_d_anchors() {
        assert_eq!(
            pow_d(fixed(0, 750), U256::from(450u64) * pow10(9)).unwrap(),
            U256::from(878_572_425_436u64)
        );
        // sqrt(1.5) to kernel precision
        assert_eq!(
            pow_d(fixed(1, 500), HALF_ONE).unwrap(),
            U256::from(1_224_744_871_392u64)
        );
        assert_eq!(
            pow_d(fixed(0, 670), U256::from(999u64) * pow10(9)).unwrap(),
            U256::from(670_268_373_747u64)
        );
    }

    #[test]
    fn pow_d_domain() {
        assert_eq!(
            pow_d(fixed(0, 500), HALF_ONE),
            Err(ErrorCode::PowDBaseOutOfBounds)
        );
        assert_eq!(
            pow_d(fixed(1, 600), HALF_ONE),
            Err(ErrorCode::PowDBaseOutOfBounds)
        );
        assert_eq!(pow_d(ONE, ONE), Err(ErrorCode::PowDExpTooLarge));
    }

    /// The kernel regression anchor: 0.75^5.45.
    #[test]
    fn power_regression_anchor() {
        assert_eq!(
            power(fixed(0, 750), fixed(5, 450)).unwrap(),
            U256::from(208_489_354_864u64)
        );
    }

    #[test]
    fn power_composes() {
        assert_eq!(
            power(fixed(1, 52), fixed(1, 500)).unwrap(),
            U256::from(1_079_005_379_041u64)
        );
        // integer-only exponent skips pow_d and its base domain
        assert_eq!(power(fixed(2, 0), fixed(3, 0)).unwrap(), fixed(8, 0));
        assert_eq!(
            power(ONE, U256::from(128u64) * ONE),
            Err(ErrorCode::PowNExponentTooLarge)
        );
    }
}
