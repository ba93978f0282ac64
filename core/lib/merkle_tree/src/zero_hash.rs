//! Precomputed hashes of all-zero subtrees, one per depth.
//!
//! `zero_hashes[height]` is the hash of an absent leaf: `H(0x00 || 0x00)`.
//! Each shallower entry is the hash of two copies of the one below it:
//! `zero_hashes[i-1] = H(0x01 || zero_hashes[i] || zero_hashes[i])`. Indexed
//! by subtree depth (root depth = 0), not by absolute tree level, so a
//! missing child at depth `d` always contributes `zero_hashes[d+1]`
//! regardless of where in the tree it sits.

use revocation_crypto::{Hash, Rfc6962Hasher};

pub fn precompute(hasher: &Rfc6962Hasher, height: u32) -> Vec<Hash> {
    let mut zero_hashes = vec![Hash::default(); height as usize + 1];
    zero_hashes[height as usize] = hasher.hash_leaf(&[0]);
    for depth in (1..=height).rev() {
        let child = zero_hashes[depth as usize];
        zero_hashes[depth as usize - 1] = hasher.hash_children(&child, &child);
    }
    zero_hashes
}
