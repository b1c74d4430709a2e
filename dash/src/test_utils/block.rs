use hashes::Hash;

use crate::blockdata::block::{Block, Header};
use crate::blockdata::transaction::Transaction;
use crate::blockdata::transaction::special_transaction::coinbase::CoinbasePayload;
use crate::hash_types::{BlockHash, TxMerkleNode};

impl Block {
    /// A block at `height` holding only a coinbase without payload.
    pub fn dummy(height: u32) -> Self {
        Block::dummy_with_transactions(height, vec![Transaction::dummy_coinbase(height, None)])
    }

    /// A block at `height` whose coinbase carries `payload`, followed by `extra_transactions` plain transactions.
    pub fn dummy_with_coinbase(
        height: u32,
        payload: CoinbasePayload,
        extra_transactions: u8,
    ) -> Self {
        let mut txdata = vec![Transaction::dummy_coinbase(height, Some(payload))];
        txdata.extend((1..=extra_transactions).map(Transaction::dummy));
        Block::dummy_with_transactions(height, txdata)
    }

    pub fn dummy_with_transactions(height: u32, transactions: Vec<Transaction>) -> Block {
        let mut block = Block {
            header: Header {
                version: 0x20000000,
                prev_blockhash: BlockHash::dummy(height.saturating_sub(1)),
                merkle_root: TxMerkleNode::all_zeros(),
                time: height,
                bits: 0x1d00ffff,
                nonce: 0,
            },
            txdata: transactions,
        };
        block.header.merkle_root = block.compute_merkle_root();
        block
    }
}
