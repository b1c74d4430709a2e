pub mod address;
pub mod deterministic;
pub mod error;
pub mod llmq_type;
pub mod masternode_list;
pub mod masternode_list_entry;
pub mod mn_list_diff;
pub mod providers;
pub mod store;
