//! Simplified masternode list messages (`getmnlistd` / `mnlistdiff`).

use std::collections::{BTreeMap, BTreeSet};
use std::io::{self, Read};

use hashes::Hash;

use crate::blockdata::transaction::Transaction;
use crate::blockdata::transaction::special_transaction::quorum_commitment::QuorumFinalizationCommitment;
use crate::bls_sig_utils::BLSSignature;
use crate::consensus::encode::{self, VarInt, impl_vec, read_vec_len};
use crate::consensus::{Decodable, Encodable};
use crate::hash_types::{BlockHash, ProTxHash, QuorumHash};
use crate::internal_macros::impl_consensus_encoding;
use crate::merkle_tree::PartialMerkleTree;
use crate::sml::llmq_type::LLMQType;
use crate::sml::masternode_list_entry::MasternodeListEntry;

/// Current `mnlistdiff` format version.
pub const MN_LIST_DIFF_VERSION: u16 = 1;

/// The getmnlistd message requests a mnlistdiff message that provides either:
/// - A full masternode list (if baseBlockHash is all-zero)
/// - An update to a previously requested masternode list
///
/// https://docs.dash.org/en/stable/docs/core/reference/p2p-network-data-messages.html#getmnlistd
#[derive(PartialEq, Eq, Clone, Copy, Debug)]
pub struct GetMnListDiff {
    pub base_block_hash: BlockHash,
    pub block_hash: BlockHash,
}

impl_consensus_encoding!(GetMnListDiff, base_block_hash, block_hash);

impl GetMnListDiff {
    /// Whether the request asks for the full list rather than an update.
    pub fn is_full_list_request(&self) -> bool {
        self.base_block_hash == BlockHash::all_zeros()
    }
}

/// The mnlistdiff message is a reply to a getmnlistd message which requested
/// either a full masternode list or a diff for a range of blocks.
///
/// https://docs.dash.org/en/stable/docs/core/reference/p2p-network-data-messages.html#mnlistdiff
#[derive(Clone, PartialEq, Eq, Debug)]
pub struct MnListDiff {
    pub version: u16,
    /// The base block hash exactly as requested; all-zero for a full list.
    pub base_block_hash: BlockHash,
    pub block_hash: BlockHash,
    /// Proof that `coinbase_tx` is the first transaction of `block_hash`.
    pub coinbase_merkle_tree: PartialMerkleTree,
    pub coinbase_tx: Transaction,
    pub deleted_masternodes: Vec<ProTxHash>,
    pub new_masternodes: Vec<MasternodeListEntry>,
    pub deleted_quorums: Vec<DeletedQuorum>,
    pub new_quorums: Vec<QuorumFinalizationCommitment>,
    /// Chainlock signature to the indexes, in `new_quorums`, of the quorums it applies to.
    pub quorums_chainlock_signatures: BTreeMap<BLSSignature, BTreeSet<u16>>,
}

impl MnListDiff {
    /// A diff with no content between two blocks.
    pub fn empty(base_block_hash: BlockHash, block_hash: BlockHash) -> Self {
        MnListDiff {
            version: MN_LIST_DIFF_VERSION,
            base_block_hash,
            block_hash,
            coinbase_merkle_tree: PartialMerkleTree::from_txids(&[], &[]),
            coinbase_tx: Transaction {
                version: 0,
                lock_time: 0,
                input: vec![],
                output: vec![],
                special_transaction_payload: None,
            },
            deleted_masternodes: vec![],
            new_masternodes: vec![],
            deleted_quorums: vec![],
            new_quorums: vec![],
            quorums_chainlock_signatures: BTreeMap::new(),
        }
    }
}

impl Encodable for MnListDiff {
    fn consensus_encode<W: io::Write + ?Sized>(&self, w: &mut W) -> Result<usize, io::Error> {
        let mut len = 0;
        len += self.version.consensus_encode(w)?;
        len += self.base_block_hash.consensus_encode(w)?;
        len += self.block_hash.consensus_encode(w)?;
        len += self.coinbase_merkle_tree.consensus_encode(w)?;
        len += self.coinbase_tx.consensus_encode(w)?;
        len += self.deleted_masternodes.consensus_encode(w)?;
        len += self.new_masternodes.consensus_encode(w)?;
        len += self.deleted_quorums.consensus_encode(w)?;
        len += self.new_quorums.consensus_encode(w)?;
        // Diffs without chainlock information end here.
        if !self.quorums_chainlock_signatures.is_empty() {
            len += VarInt(self.quorums_chainlock_signatures.len() as u64).consensus_encode(w)?;
            for (signature, indexes) in &self.quorums_chainlock_signatures {
                len += signature.consensus_encode(w)?;
                len += VarInt(indexes.len() as u64).consensus_encode(w)?;
                for index in indexes {
                    len += index.consensus_encode(w)?;
                }
            }
        }
        Ok(len)
    }
}

impl Decodable for MnListDiff {
    fn consensus_decode<R: io::Read + ?Sized>(r: &mut R) -> Result<Self, encode::Error> {
        let version = u16::consensus_decode(r)?;
        let base_block_hash = BlockHash::consensus_decode(r)?;
        let block_hash = BlockHash::consensus_decode(r)?;
        let coinbase_merkle_tree = PartialMerkleTree::consensus_decode(r)?;
        let coinbase_tx = Transaction::consensus_decode(r)?;
        let deleted_masternodes = Vec::<ProTxHash>::consensus_decode(r)?;
        let new_masternodes = Vec::<MasternodeListEntry>::consensus_decode(r)?;
        let deleted_quorums = Vec::<DeletedQuorum>::consensus_decode(r)?;
        let new_quorums = Vec::<QuorumFinalizationCommitment>::consensus_decode(r)?;
        let quorums_chainlock_signatures = decode_chainlock_signatures(r)?;
        Ok(MnListDiff {
            version,
            base_block_hash,
            block_hash,
            coinbase_merkle_tree,
            coinbase_tx,
            deleted_masternodes,
            new_masternodes,
            deleted_quorums,
            new_quorums,
            quorums_chainlock_signatures,
        })
    }
}

/// Reads the trailing chainlock signature map, which is absent (end of
/// message) when the diff carries none.
fn decode_chainlock_signatures<R: io::Read + ?Sized>(
    r: &mut R,
) -> Result<BTreeMap<BLSSignature, BTreeSet<u16>>, encode::Error> {
    let mut first = [0u8; 1];
    loop {
        match r.read(&mut first) {
            Ok(0) => return Ok(BTreeMap::new()),
            Ok(_) => break,
            Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
            Err(e) => return Err(e.into()),
        }
    }
    let mut r = (&first[..]).chain(r);

    let count = read_vec_len(&mut r, BLSSignature::LEN)?;
    let mut signatures = BTreeMap::new();
    for _ in 0..count {
        let signature = BLSSignature::consensus_decode(&mut r)?;
        let index_count = read_vec_len(&mut r, 2)?;
        let mut indexes = BTreeSet::new();
        for _ in 0..index_count {
            indexes.insert(u16::consensus_decode(&mut r)?);
        }
        signatures.entry(signature).or_insert_with(BTreeSet::new).extend(indexes);
    }
    Ok(signatures)
}

/// A quorum removed from the active set, identified by type and quorum hash.
#[derive(PartialEq, Eq, PartialOrd, Ord, Clone, Copy, Debug, Hash)]
pub struct DeletedQuorum {
    pub llmq_type: LLMQType,
    pub quorum_hash: QuorumHash,
}

impl_consensus_encoding!(DeletedQuorum, llmq_type, quorum_hash);
impl_vec!(DeletedQuorum);
