//! RFC 6960 OCSP request/response codec for the revocation log: builds and
//! parses `OCSPRequest`/`OCSPResponse` DER, and carries the Merkle inclusion
//! proof in a custom `1.3.101.75` response extension.

pub mod asn1;
pub mod cert_id;
pub mod error;
pub mod extension;
pub mod request;
pub mod response;

pub use error::OcspCodecError;
pub use request::{create_request, parse_request, parse_request_serial};
pub use response::{build_response, parse_response, ParsedResponse, RevocationAnswer};
