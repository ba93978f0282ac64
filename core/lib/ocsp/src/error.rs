use thiserror::Error;

/// Errors raised while building or parsing OCSP messages. Surfaced to the
/// HTTP boundary as 400s (malformed input) since these always indicate a
/// problem with the request/response bytes, never with server state.
#[derive(Debug, Error)]
pub enum OcspCodecError {
    #[error("failed to DER-decode {what}: {source}")]
    Der {
        what: &'static str,
        #[source]
        source: der::Error,
    },
    #[error("failed to DER-encode {what}: {source}")]
    DerEncode {
        what: &'static str,
        #[source]
        source: der::Error,
    },
    #[error("OCSPRequest must contain exactly one Request, found {found}")]
    NotSingleRequest { found: usize },
    #[error("CertID.serialNumber does not fit in a u64")]
    SerialOutOfRange,
    #[error("response carries no BasicOCSPResponse payload")]
    MissingResponseBytes,
    #[error("response extension {oid} is not valid JSON: {source}")]
    ProofJson {
        oid: String,
        #[source]
        source: serde_json::Error,
    },
    #[error("response is missing the transparency-proof extension")]
    MissingProofExtension,
    #[error("response carries {found} SingleResponses, expected 1")]
    NotSingleResponse { found: usize },
    #[error("{what} BIT STRING is not byte-aligned")]
    UnalignedBitString { what: &'static str },
    #[error("failed to sign OCSP response: {0}")]
    Signing(String),
}
