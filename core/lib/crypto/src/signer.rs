//! A signer abstracts over the two key kinds this log accepts — ECDSA P-256
//! and Ed25519 — behind a small capability set: `public_key_bitstring()` and
//! `sign()`. Spec.md §9 calls this out as "dynamic dispatch... represent as
//! a tagged variant of two key kinds, choose hashing behavior per variant";
//! a closed enum does that without a trait object.

use der::Decode;
use ed25519_dalek::Signer as _;
use p256::ecdsa::signature::Signer as _;
use pkcs8::DecodePrivateKey;
use spki::{EncodePublicKey, SubjectPublicKeyInfoRef};
use thiserror::Error;

use revocation_types::{key_hint::serialize_key_hint, signed_log_root::SignedLogRoot, LogRootV1};

#[derive(Debug, Error)]
pub enum SigningError {
    #[error("failed to parse private key: {0}")]
    KeyParse(String),
    #[error("signing operation failed")]
    Sign,
    #[error("failed to encode log root: {0}")]
    Codec(#[from] revocation_types::CodecError),
}

/// The key material backing a [`Signer`]. ECDSA signatures are SHA-256
/// pre-hashed and DER-encoded (matching Go's `crypto/ecdsa` signer); Ed25519
/// signs the whole message with no pre-hash, per RFC 8032.
pub enum SigningKey {
    EcdsaP256(Box<p256::ecdsa::SigningKey>),
    Ed25519(Box<ed25519_dalek::SigningKey>),
}

impl SigningKey {
    /// Parses a PKCS#8 PEM-encoded private key, trying ECDSA P-256 first and
    /// falling back to Ed25519.
    pub fn from_pkcs8_pem(pem: &str) -> Result<Self, SigningError> {
        if let Ok(key) = p256::ecdsa::SigningKey::from_pkcs8_pem(pem) {
            return Ok(Self::EcdsaP256(Box::new(key)));
        }
        ed25519_dalek::SigningKey::from_pkcs8_pem(pem)
            .map(|k| Self::Ed25519(Box::new(k)))
            .map_err(|e| SigningError::KeyParse(e.to_string()))
    }

    fn public_key_bitstring(&self) -> Vec<u8> {
        let der_doc = match self {
            Self::EcdsaP256(k) => k.verifying_key().to_public_key_der(),
            Self::Ed25519(k) => k.verifying_key().to_public_key_der(),
        }
        .expect("in-memory public key always encodes to DER");

        let spki = SubjectPublicKeyInfoRef::from_der(der_doc.as_bytes())
            .expect("DER we just encoded always decodes back");
        spki.subject_public_key
            .as_bytes()
            .expect("public key bit strings are always byte-aligned")
            .to_vec()
    }

    fn sign(&self, data: &[u8]) -> Result<Vec<u8>, SigningError> {
        match self {
            // p256's `Signer<Signature>` impl pre-hashes with SHA-256 before
            // signing the digest (ECDSA-with-SHA256).
            Self::EcdsaP256(k) => {
                let sig: p256::ecdsa::Signature =
                    k.try_sign(data).map_err(|_| SigningError::Sign)?;
                Ok(sig.to_der().as_bytes().to_vec())
            }
            // Ed25519 signs the full message; no pre-hash.
            Self::Ed25519(k) => {
                let sig = k.try_sign(data).map_err(|_| SigningError::Sign)?;
                Ok(sig.to_bytes().to_vec())
            }
        }
    }

    /// The `AlgorithmIdentifier` OCSP responses must carry alongside a
    /// signature produced by this key (`ecdsa-with-SHA256` or `Ed25519`).
    fn signature_algorithm(&self) -> spki::AlgorithmIdentifierOwned {
        use der::asn1::ObjectIdentifier;
        match self {
            Self::EcdsaP256(_) => spki::AlgorithmIdentifierOwned {
                oid: ObjectIdentifier::new_unwrap("1.2.840.10045.4.3.2"),
                parameters: None,
            },
            Self::Ed25519(_) => spki::AlgorithmIdentifierOwned {
                oid: ObjectIdentifier::new_unwrap("1.3.101.112"),
                parameters: None,
            },
        }
    }
}

/// Signs serialized log roots and produces [`SignedLogRoot`]s. Key identity
/// is carried as an 8-byte big-endian key hint alongside every signature.
pub struct Signer {
    key_hint: [u8; 8],
    key: SigningKey,
}

impl Signer {
    pub fn new(log_id: i64, key: SigningKey) -> Self {
        Self {
            key_hint: serialize_key_hint(log_id),
            key,
        }
    }

    pub fn key_hint(&self) -> [u8; 8] {
        self.key_hint
    }

    /// The bytes of the responder's public key, used by the OCSP codec to
    /// compute a by-key `ResponderID` and by the tree's signer setup. This is
    /// the raw `SubjectPublicKeyInfo` BIT STRING contents, the same slice an
    /// `issuerKeyHash` is computed over.
    pub fn public_key_bitstring(&self) -> Vec<u8> {
        self.key.public_key_bitstring()
    }

    /// Obtains a signature over `data`.
    pub fn sign(&self, data: &[u8]) -> Result<Vec<u8>, SigningError> {
        self.key.sign(data)
    }

    /// The `AlgorithmIdentifier` describing signatures this signer produces.
    pub fn signature_algorithm(&self) -> spki::AlgorithmIdentifierOwned {
        self.key.signature_algorithm()
    }

    /// Signs `log_root`'s canonical serialization, returning a complete
    /// [`SignedLogRoot`].
    pub fn sign_log_root(&self, log_root: &LogRootV1) -> Result<SignedLogRoot, SigningError> {
        let bytes = log_root.marshal_binary()?;
        let signature = self.sign(&bytes)?;
        Ok(SignedLogRoot {
            log_root: bytes,
            log_root_signature: signature,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::OsRng;

    fn ecdsa_signer() -> Signer {
        let key = p256::ecdsa::SigningKey::random(&mut OsRng);
        Signer::new(0, SigningKey::EcdsaP256(Box::new(key)))
    }

    fn ed25519_signer() -> Signer {
        let key = ed25519_dalek::SigningKey::generate(&mut OsRng);
        Signer::new(0, SigningKey::Ed25519(Box::new(key)))
    }

    #[test]
    fn ecdsa_sign_log_root_round_trip_is_verifiable() {
        let signer = ecdsa_signer();
        let root = LogRootV1 {
            tree_size: 3,
            root_hash: vec![7; 32],
            timestamp_nanos: 123,
            revision: 1,
            metadata: vec![],
        };
        let slr = signer.sign_log_root(&root).unwrap();
        assert_eq!(slr.log_root, root.marshal_binary().unwrap());
        assert!(!slr.log_root_signature.is_empty());
    }

    #[test]
    fn ed25519_sign_produces_64_byte_signature() {
        let signer = ed25519_signer();
        let sig = signer.sign(b"hello").unwrap();
        assert_eq!(sig.len(), 64);
    }

    #[test]
    fn key_hint_is_stable() {
        let signer = ecdsa_signer();
        assert_eq!(signer.key_hint(), [0u8; 8]);
    }
}
