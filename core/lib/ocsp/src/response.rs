//! Builds and parses `OCSPResponse`s: one `SingleResponse` per request, the
//! by-key `ResponderID`, and the `1.3.101.75` inclusion-proof extension.
//! No direct Rust-translatable source exists for the response-building
//! handler this mirrors; `original_source` only shows the pre-ASN.1-codec
//! `handler.go` stub, so this follows RFC 6960 directly for the ASN.1 shape.

use chrono::{DateTime, Utc};
use der::asn1::{BitString, DateTime as Asn1DateTime, GeneralizedTime, OctetString};
use der::{Decode, Encode};

use crate::asn1::{
    BasicOcspResponse, CertId, CertStatus, OcspResponse, OcspResponseStatus, ResponderId,
    ResponseBytes, ResponseData, RevokedInfo, SingleResponse, ID_PKIX_OCSP_BASIC,
};
use crate::error::OcspCodecError;
use crate::extension::{build_proof_extension, find_proof_extension};

/// Everything the HTTP boundary needs to hand the codec in order to answer
/// one `GetOcsp` request: the request's own `CertID` (echoed back verbatim,
/// per RFC 6960), the looked-up revocation status, and the inclusion proof
/// and SLR timestamps the answer is anchored to.
pub struct RevocationAnswer {
    pub cert_id: CertId,
    pub revoked: bool,
    pub proof: Vec<[u8; 32]>,
    pub this_update: DateTime<Utc>,
    pub next_update: DateTime<Utc>,
}

/// Builds a single-`SingleResponse` DER-encoded `OCSPResponse`, signed with
/// `sign`. `responder_spki_bitstring` is the raw `SubjectPublicKeyInfo` BIT
/// STRING contents of the signing key (see
/// `revocation_crypto::Signer::public_key_bitstring`), used for the by-key
/// `ResponderID` (SHA-1, per RFC 6960, independent of the CertID hash algorithm).
pub fn build_response(
    answer: &RevocationAnswer,
    responder_spki_bitstring: &[u8],
    signature_algorithm: spki::AlgorithmIdentifierOwned,
    sign: impl FnOnce(&[u8]) -> Result<Vec<u8>, OcspCodecError>,
) -> Result<Vec<u8>, OcspCodecError> {
    let cert_id = answer.cert_id.clone();

    let cert_status = if answer.revoked {
        CertStatus::Revoked(RevokedInfo {
            // No revocation time is recorded (§1 Non-goals: all revocations
            // are "unspecified", at time zero) — always the Unix epoch, not
            // a live timestamp.
            revocation_time: epoch_zero_generalized_time()?,
            revocation_reason: Some(crate::asn1::RevocationReason::Unspecified),
        })
    } else {
        CertStatus::Good(())
    };

    let single_response = SingleResponse {
        cert_id,
        cert_status,
        this_update: to_generalized_time(answer.this_update)?,
        next_update: Some(to_generalized_time(answer.next_update)?),
        single_extensions: None,
    };

    let responder_key_hash = key_hash_from_sha1(responder_spki_bitstring);

    let response_extensions = vec![build_proof_extension(&answer.proof)?];

    let response_data = ResponseData {
        version: 0,
        responder_id: ResponderId::ByKey(
            OctetString::new(responder_key_hash.to_vec())
                .map_err(|source| OcspCodecError::DerEncode { what: "responderID", source })?,
        ),
        produced_at: to_generalized_time(answer.this_update)?,
        responses: vec![single_response],
        response_extensions: Some(response_extensions),
    };

    let tbs_bytes = response_data
        .to_der()
        .map_err(|source| OcspCodecError::DerEncode { what: "ResponseData", source })?;
    let signature = sign(&tbs_bytes)?;

    let basic_response = BasicOcspResponse {
        tbs_response_data: response_data,
        signature_algorithm,
        signature: BitString::from_bytes(&signature)
            .map_err(|source| OcspCodecError::DerEncode { what: "signature", source })?,
    };
    let basic_response_der = basic_response
        .to_der()
        .map_err(|source| OcspCodecError::DerEncode { what: "BasicOCSPResponse", source })?;

    let response = OcspResponse {
        response_status: OcspResponseStatus::Successful,
        response_bytes: Some(ResponseBytes {
            response_type: ID_PKIX_OCSP_BASIC,
            response: OctetString::new(basic_response_der)
                .map_err(|source| OcspCodecError::DerEncode { what: "ResponseBytes", source })?,
        }),
    };

    response
        .to_der()
        .map_err(|source| OcspCodecError::DerEncode { what: "OCSPResponse", source })
}

/// The status and inclusion proof carried by a parsed `OCSPResponse`'s sole
/// `SingleResponse`.
pub struct ParsedResponse {
    pub revoked: bool,
    pub cert_id: CertId,
    pub proof: Vec<[u8; 32]>,
}

pub fn parse_response(der_bytes: &[u8]) -> Result<ParsedResponse, OcspCodecError> {
    let response = OcspResponse::from_der(der_bytes)
        .map_err(|source| OcspCodecError::Der { what: "OCSPResponse", source })?;
    let response_bytes = response.response_bytes.ok_or(OcspCodecError::MissingResponseBytes)?;

    let basic: BasicOcspResponse = BasicOcspResponse::from_der(response_bytes.response.as_bytes())
        .map_err(|source| OcspCodecError::Der { what: "BasicOCSPResponse", source })?;

    let responses = &basic.tbs_response_data.responses;
    if responses.len() != 1 {
        return Err(OcspCodecError::NotSingleResponse { found: responses.len() });
    }
    let single = &responses[0];

    let revoked = matches!(single.cert_status, CertStatus::Revoked(_));
    let extensions = basic
        .tbs_response_data
        .response_extensions
        .clone()
        .unwrap_or_default();
    let proof = find_proof_extension(&extensions)?;

    Ok(ParsedResponse {
        revoked,
        cert_id: single.cert_id.clone(),
        proof,
    })
}

fn key_hash_from_sha1(spki_bitstring: &[u8]) -> [u8; 20] {
    use sha1::{Digest, Sha1};
    Sha1::digest(spki_bitstring).into()
}

fn to_generalized_time(t: DateTime<Utc>) -> Result<GeneralizedTime, OcspCodecError> {
    let secs = t.timestamp().max(0) as u64;
    let dt = Asn1DateTime::from_unix_duration(std::time::Duration::from_secs(secs))
        .map_err(|source| OcspCodecError::DerEncode { what: "GeneralizedTime", source })?;
    Ok(GeneralizedTime::from_date_time(dt))
}

/// `generalizedTime(0)`: the fixed Unix-epoch placeholder every revoked
/// `SingleResponse`'s `revocationTime` carries, since this log records no
/// actual time of revocation.
fn epoch_zero_generalized_time() -> Result<GeneralizedTime, OcspCodecError> {
    let dt = Asn1DateTime::from_unix_duration(std::time::Duration::from_secs(0))
        .map_err(|source| OcspCodecError::DerEncode { what: "GeneralizedTime", source })?;
    Ok(GeneralizedTime::from_date_time(dt))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::OsRng;

    fn answer(revoked: bool) -> RevocationAnswer {
        let now = Utc::now();
        RevocationAnswer {
            cert_id: crate::cert_id::build_cert_id([1u8; 32], [2u8; 32], 5).unwrap(),
            revoked,
            proof: vec![[3u8; 32], [4u8; 32], [5u8; 32]],
            this_update: now,
            next_update: now + chrono::Duration::hours(24),
        }
    }

    fn ecdsa_algorithm_identifier() -> spki::AlgorithmIdentifierOwned {
        spki::AlgorithmIdentifierOwned {
            oid: der::asn1::ObjectIdentifier::new_unwrap("1.2.840.10045.4.3.2"),
            parameters: None,
        }
    }

    #[test]
    fn response_round_trips_revoked_status_and_proof() {
        let key = p256::ecdsa::SigningKey::random(&mut OsRng);
        let spki_bitstring = vec![0u8; 33]; // placeholder public-key bytes for the test

        let a = answer(true);
        let der_bytes = build_response(&a, &spki_bitstring, ecdsa_algorithm_identifier(), |msg| {
            use p256::ecdsa::signature::Signer;
            let sig: p256::ecdsa::Signature = key.sign(msg);
            Ok(sig.to_der().as_bytes().to_vec())
        })
        .unwrap();

        let parsed = parse_response(&der_bytes).unwrap();
        assert!(parsed.revoked);
        assert_eq!(parsed.proof, a.proof);
        assert_eq!(crate::cert_id::serial_from_cert_id(&parsed.cert_id).unwrap(), 5);
    }

    #[test]
    fn response_round_trips_good_status() {
        let key = p256::ecdsa::SigningKey::random(&mut OsRng);
        let spki_bitstring = vec![0u8; 33];

        let a = answer(false);
        let der_bytes = build_response(&a, &spki_bitstring, ecdsa_algorithm_identifier(), |msg| {
            use p256::ecdsa::signature::Signer;
            let sig: p256::ecdsa::Signature = key.sign(msg);
            Ok(sig.to_der().as_bytes().to_vec())
        })
        .unwrap();

        let parsed = parse_response(&der_bytes).unwrap();
        assert!(!parsed.revoked);
    }
}
