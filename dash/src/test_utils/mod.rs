//! Deterministic builders for tests.
//!
//! Each type gets a `dummy` constructor whose output depends only on its arguments.

mod block;
mod blockhash;
mod commitment;
mod masternode;
mod transaction;
