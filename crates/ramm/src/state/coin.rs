//! Fungible-token surfaces the engine touches at operation boundaries.

use borsh::{BorshDeserialize, BorshSerialize};

use crate::{
    error::{ErrorCode, RammResult},
    math::safe_math::SafeMath,
    state::asset::AssetId,
    validate,
};

/// A quantity of an underlying pool asset.
#[derive(Clone, PartialEq, Eq, Debug, BorshSerialize, BorshDeserialize)]
pub struct Coin {
    asset: AssetId,
    amount: u64,
}

impl Coin {
    pub fn mint(asset: AssetId, amount: u64) -> Self {
        Coin { asset, amount }
    }

    pub fn zero(asset: AssetId) -> Self {
        Coin { asset, amount: 0 }
    }

    pub fn asset(&self) -> AssetId {
        self.asset
    }

    pub fn value(&self) -> u64 {
        self.amount
    }

    /// Splits `amount` off, leaving the remainder in `self`.
    pub fn split(&mut self, amount: u64) -> RammResult<Coin> {
        self.amount = self
            .amount
            .checked_sub(amount)
            .ok_or(ErrorCode::RAMMInsufficientBalance)?;
        Ok(Coin {
            asset: self.asset,
            amount,
        })
    }

    /// Merges another coin of the same asset into `self`.
    pub fn join(&mut self, other: Coin) -> RammResult<()> {
        validate!(self.asset == other.asset, ErrorCode::UnknownAsset)?;
        self.amount = self.amount.safe_add(other.amount)?;
        Ok(())
    }

    /// Destroys the coin, returning its raw amount.
    pub fn burn(self) -> u64 {
        self.amount
    }
}

/// A quantity of the per-asset LP token. LP tokens always carry
/// `LP_TOKENS_DECIMAL_PLACES` decimals regardless of the underlying asset.
#[derive(Clone, PartialEq, Eq, Debug, BorshSerialize, BorshDeserialize)]
pub struct LpCoin {
    asset: AssetId,
    amount: u64,
}

impl LpCoin {
    pub fn mint(asset: AssetId, amount: u64) -> Self {
        LpCoin { asset, amount }
    }

    pub fn asset(&self) -> AssetId {
        self.asset
    }

    pub fn value(&self) -> u64 {
        self.amount
    }

    pub fn split(&mut self, amount: u64) -> RammResult<LpCoin> {
        self.amount = self
            .amount
            .checked_sub(amount)
            .ok_or(ErrorCode::RAMMInsufficientBalance)?;
        Ok(LpCoin {
            asset: self.asset,
            amount,
        })
    }

    pub fn join(&mut self, other: LpCoin) -> RammResult<()> {
        validate!(self.asset == other.asset, ErrorCode::UnknownAsset)?;
        self.amount = self.amount.safe_add(other.amount)?;
        Ok(())
    }

    pub fn burn(self) -> u64 {
        self.amount
    }
}
