use thiserror::Error;

use crate::hash_types::{BlockHash, QuorumHash};
use crate::sml::llmq_type::LLMQType;

/// Errors building a simplified masternode list diff.
///
/// Any error discards the diff being built; no partial diff is ever returned.
#[derive(Debug, Error)]
pub enum SmlError {
    #[error("block {0} not found")]
    BlockNotFound(BlockHash),

    #[error("block {base} and {block} are not in the same chain")]
    NotInSameChain { base: BlockHash, block: BlockHash },

    #[error("base block {base} is higher than block {block}")]
    BaseBlockHigherThanBlock { base: BlockHash, block: BlockHash },

    #[error("failed to build quorums diff: no mined commitment for quorum {quorum_hash} of type {llmq_type}")]
    CommitmentResolution { llmq_type: LLMQType, quorum_hash: QuorumHash },

    #[error("failed to build quorums chainlocks info for quorum {quorum_hash} of type {llmq_type}: {reason}")]
    CommitteeResolution { llmq_type: LLMQType, quorum_hash: QuorumHash, reason: String },

    #[error("failed to read block {0} from disk")]
    BlockReadFailed(BlockHash),

    #[error("block {0} has no coinbase transaction")]
    MissingCoinbase(BlockHash),
}
