use borsh::{BorshDeserialize, BorshSerialize};

/// Lifecycle of a pool. Assets can only be registered before initialization;
/// every trading and liquidity operation requires `Initialized`. There is no
/// transition out of `Initialized`.
#[derive(Clone, Copy, BorshSerialize, BorshDeserialize, PartialEq, Eq, Debug)]
pub enum PoolStatus {
    /// Assets are being registered through the new-asset capability.
    Uninitialized,

    /// All slots filled; trades, liquidity operations and fee collection run.
    Initialized,
}

impl Default for PoolStatus {
    fn default() -> Self {
        PoolStatus::Uninitialized
    }
}
