//! RFC 6960 `OCSPRequest`/`OCSPResponse` ASN.1 module, transcribed directly
//! from the RFC's ASN.1 (not from `original_source/`, which vendors a
//! third-party `crypto/ocsp`-style package rather than defining these types
//! itself). Built on `der`'s derive macros the same way `x509-cert` defines
//! its own `TbsCertificate`/`Extension` types, so this stays in the same
//! idiom as the rest of the pack's DER code rather than hand-rolling TLV
//! bytes.
//!
//! `requestorName` (TBSRequest) and `certs` (Signature/BasicOCSPResponse) are
//! intentionally omitted: this log neither requires signed requests nor
//! embeds the responder's certificate chain in responses, and no handler
//! here reads or writes either field.

use der::asn1::{BitString, GeneralizedTime, ObjectIdentifier, OctetString, Uint};
use der::{Choice, Enumerated, Sequence};
use spki::AlgorithmIdentifierOwned;
use x509_cert::ext::Extensions;
use x509_cert::name::Name;

/// `CertID ::= SEQUENCE { hashAlgorithm, issuerNameHash, issuerKeyHash, serialNumber }`
#[derive(Clone, Debug, Eq, PartialEq, Sequence)]
pub struct CertId {
    pub hash_algorithm: AlgorithmIdentifierOwned,
    pub issuer_name_hash: OctetString,
    pub issuer_key_hash: OctetString,
    pub serial_number: Uint,
}

/// `Request ::= SEQUENCE { reqCert, singleRequestExtensions [0] EXPLICIT OPTIONAL }`
#[derive(Clone, Debug, Eq, PartialEq, Sequence)]
pub struct Request {
    pub req_cert: CertId,
    #[asn1(context_specific = "0", optional = "true")]
    pub single_request_extensions: Option<Extensions>,
}

/// `TBSRequest ::= SEQUENCE { version [0] DEFAULT v1, requestList, requestExtensions [2] OPTIONAL }`
#[derive(Clone, Debug, Eq, PartialEq, Sequence)]
pub struct TbsRequest {
    #[asn1(context_specific = "0", default = "Default::default")]
    pub version: u8,
    pub request_list: Vec<Request>,
    #[asn1(context_specific = "2", optional = "true")]
    pub request_extensions: Option<Extensions>,
}

/// `OCSPRequest ::= SEQUENCE { tbsRequest, optionalSignature [0] EXPLICIT OPTIONAL }`
///
/// `optionalSignature` is never populated by this log's request builder or
/// client demo; it is omitted entirely rather than modeled as `Option<_>`
/// since nothing here ever reads it.
#[derive(Clone, Debug, Eq, PartialEq, Sequence)]
pub struct OcspRequest {
    pub tbs_request: TbsRequest,
}

/// `OCSPResponseStatus ::= ENUMERATED { successful(0), malformedRequest(1), ... }`
#[derive(Copy, Clone, Debug, Eq, PartialEq, Enumerated)]
#[repr(u32)]
pub enum OcspResponseStatus {
    Successful = 0,
    MalformedRequest = 1,
    InternalError = 2,
    TryLater = 3,
    SigRequired = 5,
    Unauthorized = 6,
}

/// `ResponseBytes ::= SEQUENCE { responseType, response }`
#[derive(Clone, Debug, Eq, PartialEq, Sequence)]
pub struct ResponseBytes {
    pub response_type: ObjectIdentifier,
    pub response: OctetString,
}

/// `OCSPResponse ::= SEQUENCE { responseStatus, responseBytes [0] EXPLICIT OPTIONAL }`
#[derive(Clone, Debug, Eq, PartialEq, Sequence)]
pub struct OcspResponse {
    pub response_status: OcspResponseStatus,
    #[asn1(context_specific = "0", optional = "true")]
    pub response_bytes: Option<ResponseBytes>,
}

/// `ResponderID ::= CHOICE { byName [1] Name, byKey [2] KeyHash }`
///
/// This log only ever produces `byKey` (§4.6: "responderID = by-key (SHA-1
/// of responder public key)"); `ByName` is implemented so a parser here can
/// still read responses that use it.
#[derive(Clone, Debug, Eq, PartialEq, Choice)]
pub enum ResponderId {
    #[asn1(context_specific = "1")]
    ByName(Name),
    #[asn1(context_specific = "2")]
    ByKey(OctetString),
}

/// `RevokedInfo ::= SEQUENCE { revocationTime, revocationReason [0] EXPLICIT OPTIONAL }`
#[derive(Clone, Debug, Eq, PartialEq, Sequence)]
pub struct RevokedInfo {
    pub revocation_time: GeneralizedTime,
    #[asn1(context_specific = "0", optional = "true")]
    pub revocation_reason: Option<RevocationReason>,
}

/// `CRLReason`, restricted to the single value this log ever emits: it
/// records that a serial is revoked, not why.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Enumerated)]
#[repr(u32)]
pub enum RevocationReason {
    Unspecified = 0,
}

/// `CertStatus ::= CHOICE { good [0] IMPLICIT NULL, revoked [1] IMPLICIT RevokedInfo, unknown [2] IMPLICIT NULL }`
#[derive(Clone, Debug, Eq, PartialEq, Choice)]
pub enum CertStatus {
    #[asn1(context_specific = "0", tag_mode = "IMPLICIT")]
    Good(()),
    #[asn1(context_specific = "1", tag_mode = "IMPLICIT")]
    Revoked(RevokedInfo),
}

/// `SingleResponse ::= SEQUENCE { certID, certStatus, thisUpdate, nextUpdate [0] EXPLICIT OPTIONAL, singleExtensions [1] OPTIONAL }`
#[derive(Clone, Debug, Eq, PartialEq, Sequence)]
pub struct SingleResponse {
    pub cert_id: CertId,
    pub cert_status: CertStatus,
    pub this_update: GeneralizedTime,
    #[asn1(context_specific = "0", optional = "true")]
    pub next_update: Option<GeneralizedTime>,
    #[asn1(context_specific = "1", optional = "true")]
    pub single_extensions: Option<Extensions>,
}

/// `ResponseData ::= SEQUENCE { version [0] DEFAULT v1, responderID, producedAt, responses, responseExtensions [1] OPTIONAL }`
#[derive(Clone, Debug, Eq, PartialEq, Sequence)]
pub struct ResponseData {
    #[asn1(context_specific = "0", default = "Default::default")]
    pub version: u8,
    pub responder_id: ResponderId,
    pub produced_at: GeneralizedTime,
    pub responses: Vec<SingleResponse>,
    #[asn1(context_specific = "1", optional = "true")]
    pub response_extensions: Option<Extensions>,
}

/// `BasicOCSPResponse ::= SEQUENCE { tbsResponseData, signatureAlgorithm, signature, certs [0] EXPLICIT OPTIONAL }`
///
/// `certs` (the optional responder certificate chain) is omitted for the
/// same reason as `OCSPRequest.optionalSignature`: this log never populates
/// it.
#[derive(Clone, Debug, Eq, PartialEq, Sequence)]
pub struct BasicOcspResponse {
    pub tbs_response_data: ResponseData,
    pub signature_algorithm: AlgorithmIdentifierOwned,
    pub signature: BitString,
}

/// OID for `id-pkix-ocsp-basic`, the `responseType` for `BasicOCSPResponse`.
pub const ID_PKIX_OCSP_BASIC: ObjectIdentifier =
    ObjectIdentifier::new_unwrap("1.3.6.1.5.5.7.48.1.1");

/// OID `1.3.101.75`, the borrowed slot this log uses for its
/// transparency-proof response extension.
pub const ID_TRANSPARENCY_PROOF: ObjectIdentifier = ObjectIdentifier::new_unwrap("1.3.101.75");

/// SHA-256's AlgorithmIdentifier, with absent (not NULL) parameters, as used
/// for `CertID.hashAlgorithm`.
pub fn sha256_algorithm_identifier() -> AlgorithmIdentifierOwned {
    AlgorithmIdentifierOwned {
        oid: ObjectIdentifier::new_unwrap("2.16.840.1.101.3.4.2.1"),
        parameters: None,
    }
}
