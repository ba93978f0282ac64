//! Builds and matches `CertID`s: SHA-256 issuer-name/issuer-key hashes per
//! RFC 6960 §4.1.1, plus the u64<->DER-INTEGER conversion needed to turn a
//! `CertID.serialNumber` back into the 8-byte big-endian key the tree is
//! indexed by.

use der::asn1::Uint;
use der::Encode;
use sha2::{Digest, Sha256};
use spki::SubjectPublicKeyInfoRef;
use x509_cert::Certificate;

use crate::asn1::{sha256_algorithm_identifier, CertId};
use crate::error::OcspCodecError;

/// `issuerNameHash`: SHA-256 of the issuer's DER-encoded `Name` (RDNSequence).
pub fn issuer_name_hash(issuer: &Certificate) -> Result<[u8; 32], OcspCodecError> {
    let der_bytes = issuer
        .tbs_certificate
        .subject
        .to_der()
        .map_err(|source| OcspCodecError::DerEncode { what: "issuer Name", source })?;
    Ok(Sha256::digest(der_bytes).into())
}

/// `issuerKeyHash`: SHA-256 of the issuer's `SubjectPublicKeyInfo` BIT STRING
/// contents (not the whole SPKI structure).
pub fn issuer_key_hash(issuer: &Certificate) -> Result<[u8; 32], OcspCodecError> {
    let spki = &issuer.tbs_certificate.subject_public_key_info;
    let bits = spki
        .subject_public_key
        .as_bytes()
        .ok_or(OcspCodecError::UnalignedBitString { what: "issuer SubjectPublicKeyInfo" })?;
    Ok(Sha256::digest(bits).into())
}

/// SHA-256 of a raw `SubjectPublicKeyInfo` BIT STRING's contents, for
/// responses (where the "issuer" is this log's own responder key rather
/// than an `x509_cert::Certificate`).
pub fn key_hash_from_bitstring_contents(spki_bitstring: &[u8]) -> [u8; 32] {
    Sha256::digest(spki_bitstring).into()
}

pub fn build_cert_id(
    issuer_name_hash: [u8; 32],
    issuer_key_hash: [u8; 32],
    serial: u64,
) -> Result<CertId, OcspCodecError> {
    Ok(CertId {
        hash_algorithm: sha256_algorithm_identifier(),
        issuer_name_hash: der::asn1::OctetString::new(issuer_name_hash.to_vec())
            .map_err(|source| OcspCodecError::DerEncode { what: "issuerNameHash", source })?,
        issuer_key_hash: der::asn1::OctetString::new(issuer_key_hash.to_vec())
            .map_err(|source| OcspCodecError::DerEncode { what: "issuerKeyHash", source })?,
        serial_number: u64_to_uint(serial)?,
    })
}

/// Re-extracts the 64-bit serial the server indexes its tree by, rejecting
/// `CertID`s that can't fit in 8 bytes.
pub fn serial_from_cert_id(cert_id: &CertId) -> Result<u64, OcspCodecError> {
    uint_to_u64(&cert_id.serial_number)
}

pub fn u64_to_uint(v: u64) -> Result<Uint, OcspCodecError> {
    let bytes = v.to_be_bytes();
    let first_nonzero = bytes.iter().position(|&b| b != 0).unwrap_or(bytes.len() - 1);
    Uint::new(&bytes[first_nonzero..])
        .map_err(|source| OcspCodecError::DerEncode { what: "serialNumber", source })
}

pub fn uint_to_u64(u: &Uint) -> Result<u64, OcspCodecError> {
    let bytes = u.as_bytes();
    // A DER INTEGER may carry one leading 0x00 pad byte to keep the sign bit
    // clear; strip it before checking length against a u64.
    let bytes = match bytes {
        [0x00, rest @ ..] if rest.len() == 8 => rest,
        other => other,
    };
    if bytes.len() > 8 {
        return Err(OcspCodecError::SerialOutOfRange);
    }
    let mut buf = [0u8; 8];
    buf[8 - bytes.len()..].copy_from_slice(bytes);
    Ok(u64::from_be_bytes(buf))
}

/// Parses the public-key bit string out of a full SPKI DER document (used by
/// the responder side, which only has the signer's raw key bytes, not a
/// `Certificate`).
pub fn spki_bitstring_contents(spki_der: &[u8]) -> Result<Vec<u8>, OcspCodecError> {
    use der::Decode;
    let spki = SubjectPublicKeyInfoRef::from_der(spki_der)
        .map_err(|source| OcspCodecError::Der { what: "SubjectPublicKeyInfo", source })?;
    spki.subject_public_key
        .as_bytes()
        .map(|b| b.to_vec())
        .ok_or(OcspCodecError::UnalignedBitString { what: "responder SubjectPublicKeyInfo" })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn serial_round_trips_through_uint() {
        for v in [0u64, 1, 5, 255, 256, u64::MAX, u64::MAX / 2] {
            let uint = u64_to_uint(v).unwrap();
            assert_eq!(uint_to_u64(&uint).unwrap(), v);
        }
    }
}
