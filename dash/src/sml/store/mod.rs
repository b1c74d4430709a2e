//! Implementations of the chain-state collaborators.

pub mod memory;

pub use memory::InMemoryChainState;
