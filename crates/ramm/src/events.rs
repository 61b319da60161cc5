//! Snapshot events emitted by read operations.

use borsh::{BorshDeserialize, BorshSerialize};

use crate::{
    math::bignumber::U256,
    state::{asset::AssetId, caps::PoolId},
};

/// A consistent snapshot of every imbalance ratio of a pool, priced at the
/// given query time. Emitting it performs no state mutation.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct ImbalanceRatiosEvent<const N: usize> {
    pub pool_id: PoolId,
    pub timestamp_ms: u64,
    pub assets: [AssetId; N],
    pub ratios: [U256; N],
}

impl<const N: usize> BorshSerialize for ImbalanceRatiosEvent<N> {
    fn serialize<W: std::io::Write>(&self, writer: &mut W) -> std::io::Result<()> {
        self.pool_id.serialize(writer)?;
        self.timestamp_ms.serialize(writer)?;
        self.assets.serialize(writer)?;
        self.ratios.serialize(writer)
    }
}

impl<const N: usize> BorshDeserialize for ImbalanceRatiosEvent<N> {
    fn deserialize(buf: &mut &[u8]) -> std::io::Result<Self> {
        Ok(ImbalanceRatiosEvent {
            pool_id: BorshDeserialize::deserialize(buf)?,
            timestamp_ms: BorshDeserialize::deserialize(buf)?,
            assets: BorshDeserialize::deserialize(buf)?,
            ratios: BorshDeserialize::deserialize(buf)?,
        })
    }

    fn deserialize_reader<R: std::io::Read>(reader: &mut R) -> std::io::Result<Self> {
        Ok(ImbalanceRatiosEvent {
            pool_id: BorshDeserialize::deserialize_reader(reader)?,
            timestamp_ms: BorshDeserialize::deserialize_reader(reader)?,
            assets: BorshDeserialize::deserialize_reader(reader)?,
            ratios: BorshDeserialize::deserialize_reader(reader)?,
        })
    }
}
