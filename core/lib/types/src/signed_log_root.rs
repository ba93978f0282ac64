use serde::{Deserialize, Serialize};

/// A serialized [`crate::logroot::LogRootV1`] plus a signature computed over
/// those exact bytes. Revision is the tree's `updated_times` counter at the
/// moment of signing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SignedLogRoot {
    pub log_root: Vec<u8>,
    pub log_root_signature: Vec<u8>,
}
