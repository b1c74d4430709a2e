use hashes::Hash;

use crate::hash_types::{BlockHash, ProTxHash, QuorumHash};

impl BlockHash {
    /// Create a deterministic test block hash from a u32 identifier
    pub fn dummy(id: u32) -> Self {
        let mut bytes = [0u8; 32];
        bytes[..4].copy_from_slice(&id.to_le_bytes());
        bytes[31] = 0xbb;
        BlockHash::from_byte_array(bytes)
    }
}

impl ProTxHash {
    pub fn dummy(id: u32) -> Self {
        let mut bytes = [0u8; 32];
        bytes[..4].copy_from_slice(&id.to_le_bytes());
        bytes[31] = 0x77;
        ProTxHash::from_byte_array(bytes)
    }
}

impl QuorumHash {
    /// The quorum hash of a quorum based on the block `BlockHash::dummy(id)`.
    pub fn dummy(id: u32) -> Self {
        QuorumHash::from_byte_array(BlockHash::dummy(id).to_byte_array())
    }
}
