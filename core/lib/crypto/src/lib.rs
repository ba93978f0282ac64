//! RFC6962 hashing and log-root signing, independent of the tree structure
//! that uses them.

pub mod hasher;
pub mod pem_loader;
pub mod signer;

pub use hasher::{Hash, Rfc6962Hasher};
pub use signer::{Signer, SigningError, SigningKey};
