//! Pool state container and lifecycle.
//!
//! A pool owns `N` asset slots (`N` is 2 or 3), filled one at a time through
//! the new-asset capability and frozen by `initialize`. The slots hold the
//! only mutable state of the system: balances, LP supplies, collected fees
//! and volatility observations. Every public operation takes the pool by
//! exclusive reference and commits its full diff or nothing.

use borsh::{BorshDeserialize, BorshSerialize};

use crate::{
    error::{ErrorCode, RammResult},
    math::{
        bignumber::U256,
        constants::{pow10, LP_TOKENS_DECIMAL_PLACES, PRECISION_DECIMAL_PLACES},
        safe_math::SafeMath,
        volatility::VolatilityState,
    },
    state::{
        asset::{AssetId, AssetState},
        caps::{AdminCap, NewAssetCap, PoolId},
        enums::PoolStatus,
    },
    validate,
};

#[derive(Clone, PartialEq, Eq, Debug)]
pub struct Pool<const N: usize> {
    id: PoolId,

    /// Identity the admin capability must present to collect fees.
    admin_id: PoolId,

    status: PoolStatus,

    /// Slots filled so far; equals `N` once initialized.
    registered: u8,

    /// Decimal places of this pool's LP tokens.
    lp_decimals: u8,

    assets: [AssetState; N],
}

impl<const N: usize> Pool<N> {
    /// Creates an empty pool and the two capabilities governing it.
    pub fn new(id: PoolId) -> (Self, AdminCap, NewAssetCap) {
        let pool = Pool {
            id,
            admin_id: id,
            status: PoolStatus::Uninitialized,
            registered: 0,
            lp_decimals: LP_TOKENS_DECIMAL_PLACES,
            assets: [AssetState::default(); N],
        };
        (
            pool,
            AdminCap { pool_id: id },
            NewAssetCap { pool_id: id },
        )
    }

    /// Registers an asset into the next free slot. Only possible before
    /// `initialize` and with the pool's own new-asset capability.
    pub fn add_asset(
        &mut self,
        asset: AssetId,
        decimals: u8,
        min_trade: u64,
        cap: &NewAssetCap,
    ) -> RammResult<()> {
        validate!(cap.pool_id == self.id, ErrorCode::NotAdmin)?;
        validate!(
            self.status == PoolStatus::Uninitialized,
            ErrorCode::PoolAlreadyInitialized
        )?;
        validate!((self.registered as usize) < N, ErrorCode::InvalidSize)?;
        validate!(
            decimals <= PRECISION_DECIMAL_PLACES,
            ErrorCode::InvalidSize,
            "asset decimals {} exceed the kernel precision",
            decimals
        )?;
        validate!(
            !self.assets[..self.registered as usize]
                .iter()
                .any(|slot| slot.asset == asset),
            ErrorCode::DuplicateAsset
        )?;

        self.assets[self.registered as usize] = AssetState {
            asset,
            decimals,
            min_trade,
            factor_balance: pow10(PRECISION_DECIMAL_PLACES - decimals),
            ..AssetState::default()
        };
        self.registered = self.registered.safe_add(1)?;
        Ok(())
    }

    /// Freezes the asset set. Consumes the new-asset capability, so no asset
    /// can be added or removed afterwards.
    pub fn initialize(&mut self, cap: NewAssetCap) -> RammResult<()> {
        validate!(cap.pool_id == self.id, ErrorCode::NotAdmin)?;
        validate!(
            self.status == PoolStatus::Uninitialized,
            ErrorCode::PoolAlreadyInitialized
        )?;
        validate!(self.registered as usize == N, ErrorCode::InvalidSize)?;
        self.status = PoolStatus::Initialized;
        Ok(())
    }

    pub fn id(&self) -> PoolId {
        self.id
    }

    pub fn admin_id(&self) -> PoolId {
        self.admin_id
    }

    pub fn status(&self) -> PoolStatus {
        self.status
    }

    pub fn lp_decimals(&self) -> u8 {
        self.lp_decimals
    }

    /// Overrides the LP token decimals. Only meaningful before any deposit
    /// has minted LP tokens.
    pub fn set_lp_decimals(&mut self, decimals: u8) -> RammResult<()> {
        validate!(
            decimals <= PRECISION_DECIMAL_PLACES,
            ErrorCode::InvalidSize
        )?;
        validate!(
            self.assets.iter().all(|slot| slot.lp_supply == 0),
            ErrorCode::PoolAlreadyInitialized
        )?;
        self.lp_decimals = decimals;
        Ok(())
    }

    pub fn ensure_initialized(&self) -> RammResult<()> {
        validate!(
            self.status == PoolStatus::Initialized,
            ErrorCode::PoolNotInitialized
        )
    }

    /// Slot index of an asset.
    pub fn index_of(&self, asset: AssetId) -> RammResult<usize> {
        self.assets[..self.registered as usize]
            .iter()
            .position(|slot| slot.asset == asset)
            .ok_or(ErrorCode::UnknownAsset)
    }

    pub fn asset_ids(&self) -> [AssetId; N] {
        let mut out = [AssetId::default(); N];
        for (slot, id) in self.assets.iter().zip(out.iter_mut()) {
            *id = slot.asset;
        }
        out
    }

    pub fn slot(&self, index: usize) -> &AssetState {
        &self.assets[index]
    }

    pub(crate) fn slot_mut(&mut self, index: usize) -> &mut AssetState {
        &mut self.assets[index]
    }

    /// `10^(PRECISION_DECIMAL_PLACES - lp_decimals)`, the LP analogue of
    /// `factor_balance`.
    pub fn factor_lp(&self) -> U256 {
        pow10(PRECISION_DECIMAL_PLACES - self.lp_decimals)
    }

    /// Balances lifted into kernel precision.
    pub fn kernel_balances(&self) -> RammResult<[U256; N]> {
        let mut out = [U256::zero(); N];
        for (value, slot) in out.iter_mut().zip(self.assets.iter()) {
            *value = U256::from(slot.balance).safe_mul(slot.factor_balance)?;
        }
        Ok(out)
    }

    /// LP supplies lifted into kernel precision.
    pub fn kernel_lp_supplies(&self) -> RammResult<[U256; N]> {
        let factor = self.factor_lp();
        let mut out = [U256::zero(); N];
        for (value, slot) in out.iter_mut().zip(self.assets.iter()) {
            *value = U256::from(slot.lp_supply).safe_mul(factor)?;
        }
        Ok(out)
    }

    /// Copy of the per-asset volatility states, for staging updates that
    /// must only land when the whole operation succeeds.
    pub(crate) fn volatility_states(&self) -> [VolatilityState; N] {
        let mut out = [VolatilityState::default(); N];
        for (state, slot) in out.iter_mut().zip(self.assets.iter()) {
            *state = slot.volatility;
        }
        out
    }

    pub(crate) fn commit_volatility(&mut self, states: [VolatilityState; N]) {
        for (slot, state) in self.assets.iter_mut().zip(states.into_iter()) {
            slot.volatility = state;
        }
    }
}

impl<const N: usize> BorshSerialize for Pool<N> {
    fn serialize<W: std::io::Write>(&self, writer: &mut W) -> std::io::Result<()> {
        self.id.serialize(writer)?;
        self.admin_id.serialize(writer)?;
        self.status.serialize(writer)?;
        self.registered.serialize(writer)?;
        self.lp_decimals.serialize(writer)?;
        self.assets.serialize(writer)
    }
}

impl<const N: usize> BorshDeserialize for Pool<N> {
    fn deserialize(buf: &mut &[u8]) -> std::io::Result<Self> {
        Ok(Pool {
            id: BorshDeserialize::deserialize(buf)?,
            admin_id: BorshDeserialize::deserialize(buf)?,
            status: BorshDeserialize::deserialize(buf)?,
            registered: BorshDeserialize::deserialize(buf)?,
            lp_decimals: BorshDeserialize::deserialize(buf)?,
            assets: BorshDeserialize::deserialize(buf)?,
        })
    }

    fn deserialize_reader<R: std::io::Read>(reader: &mut R) -> std::io::Result<Self> {
        Ok(Pool {
            id: BorshDeserialize::deserialize_reader(reader)?,
            admin_id: BorshDeserialize::deserialize_reader(reader)?,
            status: BorshDeserialize::deserialize_reader(reader)?,
            registered: BorshDeserialize::deserialize_reader(reader)?,
            lp_decimals: BorshDeserialize::deserialize_reader(reader)?,
            assets: BorshDeserialize::deserialize_reader(reader)?,
        })
    }
}
