use crate::{
    error::{ErrorCode, RammResult},
    math::{bignumber::U256, ceil_div::CheckedCeilDiv},
};
use std::panic::Location;

pub trait SafeMath: Sized {
    /// Add two numbers, erroring on overflow
    fn safe_add(self, rhs: Self) -> RammResult<Self>;

    /// Subtract two numbers, erroring on underflow
    fn safe_sub(self, rhs: Self) -> RammResult<Self>;

    /// Multiply two numbers, erroring on overflow
    fn safe_mul(self, rhs: Self) -> RammResult<Self>;

    /// Divide two numbers, erroring on division by zero
    fn safe_div(self, rhs: Self) -> RammResult<Self>;

    /// Ceiling-divide two numbers, erroring on division by zero
    fn safe_ceil_div(self, rhs: Self) -> RammResult<Self>;
}

macro_rules! checked_impl {
    ($t:ty) => {
        impl SafeMath for $t {
            #[track_caller]
            #[inline(always)]
            fn safe_add(self, v: $t) -> RammResult<$t> {
                match self.checked_add(v) {
                    Some(result) => Ok(result),
                    None => {
                        let caller = Location::caller();
                        log::error!(
                            "Addition error thrown at {}:{}",
                            caller.file(),
                            caller.line()
                        );
                        Err(ErrorCode::MathError)
                    }
                }
            }

            #[track_caller]
            #[inline(always)]
            fn safe_sub(self, v: $t) -> RammResult<$t> {
                match self.checked_sub(v) {
                    Some(result) => Ok(result),
                    None => {
                        let caller = Location::caller();
                        log::error!(
                            "Subtraction error thrown at {}:{}",
                            caller.file(),
                            caller.line()
                        );
                        Err(ErrorCode::MathError)
                    }
                }
            }

            #[track_caller]
            #[inline(always)]
            fn safe_mul(self, v: $t) -> RammResult<$t> {
                match self.checked_mul(v) {
                    Some(result) => Ok(result),
                    None => {
                        let caller = Location::caller();
                        log::error!(
                            "Multiplication error thrown at {}:{}",
                            caller.file(),
                            caller.line()
                        );
                        Err(ErrorCode::MathError)
                    }
                }
            }

            #[track_caller]
            #[inline(always)]
            fn safe_div(self, v: $t) -> RammResult<$t> {
                match self.checked_div(v) {
                    Some(result) => Ok(result),
                    None => {
                        let caller = Location::caller();
                        log::error!(
                            "Division error thrown at {}:{}",
                            caller.file(),
                            caller.line()
                        );
                        Err(ErrorCode::MathError)
                    }
                }
            }

            #[track_caller]
            #[inline(always)]
            fn safe_ceil_div(self, v: $t) -> RammResult<$t> {
                match self.checked_ceil_div(v) {
                    Some(result) => Ok(result),
                    None => {
                        let caller = Location::caller();
                        log::error!(
                            "Ceiling division error thrown at {}:{}",
                            caller.file(),
                            caller.line()
                        );
                        Err(ErrorCode::MathError)
                    }
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
