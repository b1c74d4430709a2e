use crate::blockdata::transaction::special_transaction::quorum_commitment::{
    INDEXED_QUORUM_VERSION, QuorumFinalizationCommitment,
};
use crate::bls_sig_utils::{BLSPublicKey, BLSSignature};
use crate::hash_types::{QuorumHash, QuorumVVecHash};
use crate::sml::llmq_type::LLMQType;
use hashes::Hash;

impl QuorumFinalizationCommitment {
    /// A commitment of a quorum of `llmq_type` with every member signing.
    ///
    /// Rotating types get an indexed commitment at `quorum_index`.
    pub fn dummy(llmq_type: LLMQType, quorum_hash: QuorumHash, quorum_index: i16) -> Self {
        let size = llmq_type.size() as usize;
        let seed = quorum_hash.as_byte_array()[0];
        let indexed = llmq_type.is_rotating_quorum_type();
        QuorumFinalizationCommitment {
            version: if indexed { INDEXED_QUORUM_VERSION } else { 1 },
            llmq_type,
            quorum_hash,
            quorum_index: indexed.then_some(quorum_index),
            signers: vec![true; size],
            valid_members: vec![true; size],
            quorum_public_key: BLSPublicKey::from([seed; 48]),
            quorum_vvec_hash: QuorumVVecHash::from_byte_array([seed; 32]),
            quorum_sig: BLSSignature::from([seed; 96]),
            sig: BLSSignature::from([seed.wrapping_add(1); 96]),
        }
    }
}
