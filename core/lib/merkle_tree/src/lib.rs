//! Sparse binary Merkle tree over a bit-indexed serial-number keyspace.
//!
//! `node`/`zero_hash` hold the representation (arena + precomputed all-zero
//! subtree hashes); `tree` is the tree itself (`AddNode`, `GetRevocationValue`,
//! `GetInclusionProof`, `IntegrateQueue`); `sequencer` is the MMD-driven
//! integration loop that runs on its own thread in the server binary.

pub mod error;
pub mod node;
pub mod sequencer;
pub mod tree;
pub mod zero_hash;

pub use error::TreeError;
pub use node::{Node, NodeId};
pub use tree::{tree_height, SparseMerkleTree};
