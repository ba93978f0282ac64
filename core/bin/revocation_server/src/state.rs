use std::sync::Arc;

use revocation_merkle_tree::SparseMerkleTree;

/// State shared by every handler. The tree is the single source of truth for
/// both the sequencer thread and every HTTP reader; there is no other
/// global state threaded through requests.
#[derive(Clone)]
pub struct AppState {
    pub tree: Arc<SparseMerkleTree>,
}
