//! RFC6962 tree hashing: domain-separated SHA-256 over leaves and internal
//! nodes, plus the empty-tree root.

use sha2::{Digest, Sha256};

/// Domain separation prefixes from RFC6962 §2.1.
const LEAF_HASH_PREFIX: u8 = 0x00;
const NODE_HASH_PREFIX: u8 = 0x01;

/// The Merkle hash of a tree's contents, fixed-width at the SHA-256 output
/// size. The hash algorithm is fixed for interoperability; it is not
/// negotiated per log.
pub type Hash = [u8; 32];

/// `HashLeaf`/`HashChildren`/`EmptyRoot` per RFC6962, `§3.11`.
#[derive(Debug, Default, Clone, Copy)]
pub struct Rfc6962Hasher;

impl Rfc6962Hasher {
    pub fn new() -> Self {
        Self
    }

    /// `SHA-256(0x00 || b)`.
    pub fn hash_leaf(&self, b: &[u8]) -> Hash {
        let mut h = Sha256::new();
        h.update([LEAF_HASH_PREFIX]);
        h.update(b);
        h.finalize().into()
    }

    /// `SHA-256(0x01 || l || r)`.
    pub fn hash_children(&self, l: &Hash, r: &Hash) -> Hash {
        let mut h = Sha256::new();
        h.update([NODE_HASH_PREFIX]);
        h.update(l);
        h.update(r);
        h.finalize().into()
    }

    /// The hash of an empty tree: `SHA-256("")`.
    pub fn empty_root(&self) -> Hash {
        Sha256::new().finalize().into()
    }
}
