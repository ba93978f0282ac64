//! Wire-level data model shared by the revocation log's tree, signer, and
//! HTTP boundary: the `LogRootV1` TLS codec, `SignedLogRoot`, key hints, and
//! the server's startup `Config`.

pub mod config;
pub mod error;
pub mod key_hint;
pub mod logroot;
pub mod signed_log_root;

pub use config::{parse_mmd, Config};
pub use error::{CodecError, ConfigError};
pub use key_hint::{parse_key_hint, serialize_key_hint};
pub use logroot::{LogRootV1, LOG_ROOT_FORMAT_V1};
pub use signed_log_root::SignedLogRoot;
