//! The non-critical `1.3.101.75` response extension: a JSON-encoded
//! `{"Proof":[<base64 sibling>, ...]}` object carrying the Merkle inclusion
//! proof. Spec.md §4.6 documents this as a deliberate deviation from RFC
//! 6962-bis's `TransItem` wire shape, kept for compatibility with existing
//! clients (see `original_source/cmd/revocation-server/parseResponse.go`,
//! which decodes this exact shape via `encoding/json`).

use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine;
use der::asn1::OctetString;
use serde::{Deserialize, Serialize};
use x509_cert::ext::Extension;

use crate::asn1::ID_TRANSPARENCY_PROOF;
use crate::error::OcspCodecError;

/// The JSON body of the transparency-proof extension. Field casing (`Proof`,
/// capitalized) matches the original Go struct tag-free default, which the
/// existing `parseResponse.go` client relies on.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProofResponse {
    #[serde(rename = "Proof")]
    pub proof: Vec<String>,
}

impl ProofResponse {
    pub fn from_hashes(proof: &[[u8; 32]]) -> Self {
        Self {
            proof: proof.iter().map(|h| BASE64.encode(h)).collect(),
        }
    }

    pub fn into_hashes(self) -> Result<Vec<[u8; 32]>, OcspCodecError> {
        self.proof
            .iter()
            .map(|b64| {
                let bytes = BASE64
                    .decode(b64)
                    .map_err(|_| OcspCodecError::MissingProofExtension)?;
                bytes
                    .try_into()
                    .map_err(|_| OcspCodecError::MissingProofExtension)
            })
            .collect()
    }
}

/// Builds the non-critical `1.3.101.75` extension carrying `proof`.
pub fn build_proof_extension(proof: &[[u8; 32]]) -> Result<Extension, OcspCodecError> {
    let json = serde_json::to_vec(&ProofResponse::from_hashes(proof)).map_err(|source| {
        OcspCodecError::ProofJson {
            oid: ID_TRANSPARENCY_PROOF.to_string(),
            source,
        }
    })?;
    Ok(Extension {
        extn_id: ID_TRANSPARENCY_PROOF,
        critical: false,
        extn_value: OctetString::new(json)
            .map_err(|source| OcspCodecError::DerEncode { what: "proof extension value", source })?,
    })
}

/// Finds and decodes the proof extension among `extensions`.
pub fn find_proof_extension(extensions: &[Extension]) -> Result<Vec<[u8; 32]>, OcspCodecError> {
    let ext = extensions
        .iter()
        .find(|e| e.extn_id == ID_TRANSPARENCY_PROOF)
        .ok_or(OcspCodecError::MissingProofExtension)?;

    let parsed: ProofResponse = serde_json::from_slice(ext.extn_value.as_bytes())
        .map_err(|source| OcspCodecError::ProofJson {
            oid: ID_TRANSPARENCY_PROOF.to_string(),
            source,
        })?;
    parsed.into_hashes()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn round_trips_through_json() {
        let proof = vec![[1u8; 32], [2u8; 32], [3u8; 32]];
        let ext = build_proof_extension(&proof).unwrap();
        assert_eq!(ext.extn_id, ID_TRANSPARENCY_PROOF);
        assert!(!ext.critical);

        let decoded = find_proof_extension(std::slice::from_ref(&ext)).unwrap();
        assert_eq!(decoded, proof);
    }
}
