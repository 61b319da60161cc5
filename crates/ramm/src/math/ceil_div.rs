use crate::math::bignumber::U256;
use num_traits::{One, Zero};

pub trait CheckedCeilDiv: Sized {
    /// Perform ceiling division
    fn checked_ceil_div(&self, rhs: Self) -> Option<Self>;
}

macro_rules! checked_impl {
    ($t:ty) => {
        impl CheckedCeilDiv for $t {
            #[track_caller]
            #[inline]
            fn checked_ceil_div(&self, rhs: $t) -> Option<$t> {
                let quotient = self.checked_div(rhs)?;

                let remainder = self.checked_rem(rhs)?;

                // round up whenever the division was inexact
                if remainder > <$t>::zero() {
                    quotient.checked_add(<$t>::one())
                } else {
                    Some(quotient)
                }
            }
        }
    };
}

checked_impl!(U256);
checked_impl!(u128);
checked_impl!(u64);
checked_impl!(u32);
checked_impl!(u16);
checked_impl!(u8);

#[cfg(test)]
mod test {
    use super::CheckedCeilDiv;
    use crate::math::bignumber::U256;

    #[test]
    fn rounds_up_on_remainder() {
        assert_eq!(7_u64.checked_ceil_div(2), Some(4));
        assert_eq!(8_u64.checked_ceil_div(2), Some(4));
        assert_eq!(1_u64.checked_ceil_div(0), None);
        assert_eq!(
            U256::from(10_001u64).checked_ceil_div(U256::from(100u64)),
            Some(U256::from(101u64))
        );
    }
}
