pub mod bignumber;
pub mod casting;
pub mod ceil_div;
pub mod constants;
pub mod fees;
pub mod fixed_point;
pub mod pricing;
pub mod safe_math;
pub mod volatility;
pub mod weights;
