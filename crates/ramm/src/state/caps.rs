use borsh::{BorshDeserialize, BorshSerialize};

/// Opaque identity of a pool; capability objects carry it to prove which
/// pool they were minted for.
#[derive(
    Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Debug, Default, BorshSerialize,
    BorshDeserialize,
)]
pub struct PoolId(pub u64);

/// Authority to collect the pool's accrued protocol fees.
#[derive(Clone, Debug, PartialEq, Eq, BorshSerialize, BorshDeserialize)]
pub struct AdminCap {
    pub pool_id: PoolId,
}

/// Authority to register assets while the pool is uninitialized. Consumed by
/// `initialize`, after which no asset may be added or removed.
#[derive(Debug, PartialEq, Eq, BorshSerialize, BorshDeserialize)]
pub struct NewAssetCap {
    pub pool_id: PoolId,
}
