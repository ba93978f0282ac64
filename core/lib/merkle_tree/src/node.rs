//! Arena-backed node storage.
//!
//! Spec.md's Design Notes call for this explicitly: each node needs a
//! `parent` back-reference to support upward hash recomputation after leaf
//! insertion, which makes the node graph cyclic by reference. Rather than
//! model that with `Rc`/`Weak`, nodes are allocated from a growable vector
//! and `parent`/`left`/`right` are arena indices (`NodeId`), with `None` as
//! the "absent" sentinel. This also matches the invariant that nodes are
//! never freed during the process lifetime: the arena only grows.

use revocation_crypto::Hash;

/// Index into a tree's node arena.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NodeId(pub u32);

/// The root is always the first node allocated in the arena.
pub const ROOT: NodeId = NodeId(0);

/// An interior or leaf point in the tree. `left`/`right` absent means
/// "all-zero subtree"; `parent` absent means this is the root.
#[derive(Debug, Clone, Copy)]
pub struct Node {
    pub parent: Option<NodeId>,
    pub left: Option<NodeId>,
    pub right: Option<NodeId>,
    pub hash: Hash,
}

impl Node {
    pub fn root(hash: Hash) -> Self {
        Self {
            parent: None,
            left: None,
            right: None,
            hash,
        }
    }

    pub fn child_of(parent: NodeId) -> Self {
        Self {
            parent: Some(parent),
            left: None,
            right: None,
            hash: Hash::default(),
        }
    }
}
