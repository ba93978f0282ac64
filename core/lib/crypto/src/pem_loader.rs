//! Loads the PEM-encoded issuer certificate and PKCS#8 private key from disk
//! at startup. Grounded in the original `getKeyFromFile`/`getCertFromFile`
//! helpers (`tree/tree.go`) — kept as a thin loader with no tree logic, since
//! the tree core itself never reads from or writes to the filesystem.

use std::fs;
use std::path::Path;

use thiserror::Error;
use x509_cert::der::Decode;
use x509_cert::Certificate;

use crate::signer::{SigningError, SigningKey};

#[derive(Debug, Error)]
pub enum LoadError {
    #[error("failed to read {path}: {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse PEM-encoded certificate: {0}")]
    CertParse(String),
    #[error(transparent)]
    Key(#[from] SigningError),
}

/// Reads and parses the PKCS#8 PEM private key at `path`.
pub fn load_signing_key(path: &Path) -> Result<SigningKey, LoadError> {
    let pem = fs::read_to_string(path).map_err(|source| LoadError::Read {
        path: path.display().to_string(),
        source,
    })?;
    Ok(SigningKey::from_pkcs8_pem(&pem)?)
}

/// Reads and parses the PEM-encoded issuer certificate at `path`.
pub fn load_issuer_certificate(path: &Path) -> Result<Certificate, LoadError> {
    let pem = fs::read_to_string(path).map_err(|source| LoadError::Read {
        path: path.display().to_string(),
        source,
    })?;
    let (_label, der) =
        pem_rfc7468::decode_vec(pem.as_bytes()).map_err(|e| LoadError::CertParse(e.to_string()))?;
    Certificate::from_der(&der).map_err(|e| LoadError::CertParse(e.to_string()))
}
