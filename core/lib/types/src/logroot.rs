//! TLS-presentation-language (RFC 5246 §4) wire codec for `LogRootV1`.
//!
//! ```text
//! struct {
//!   uint64 tree_size;
//!   opaque root_hash<0..128>;
//!   uint64 timestamp_nanos;
//!   uint64 revision;
//!   opaque metadata<0..65535>;
//! } LogRootV1;
//! ```
//!
//! The serialized form carries a 2-byte version prefix ahead of the struct
//! above; this mirrors the original `LogRoot { version, V1 }` selector
//! collapsed to its single live variant.

use crate::error::CodecError;

/// Tag for the only wire format this log speaks.
pub const LOG_ROOT_FORMAT_V1: u16 = 1;

const MAX_ROOT_HASH_LEN: usize = 128;
const MAX_METADATA_LEN: usize = 65535;

/// The (partially) TLS-deserialized form of a signed log root.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogRootV1 {
    pub tree_size: u64,
    pub root_hash: Vec<u8>,
    pub timestamp_nanos: u64,
    pub revision: u64,
    pub metadata: Vec<u8>,
}

impl LogRootV1 {
    /// Returns a canonical TLS serialization, version-tagged.
    pub fn marshal_binary(&self) -> Result<Vec<u8>, CodecError> {
        if self.root_hash.len() > MAX_ROOT_HASH_LEN {
            return Err(CodecError::OpaqueTooLong {
                len: self.root_hash.len(),
                max: MAX_ROOT_HASH_LEN,
            });
        }
        if self.metadata.len() > MAX_METADATA_LEN {
            return Err(CodecError::OpaqueTooLong {
                len: self.metadata.len(),
                max: MAX_METADATA_LEN,
            });
        }

        let mut out = Vec::with_capacity(2 + 8 + 1 + self.root_hash.len() + 8 + 8 + 2 + self.metadata.len());
        out.extend_from_slice(&LOG_ROOT_FORMAT_V1.to_be_bytes());
        out.extend_from_slice(&self.tree_size.to_be_bytes());
        out.push(self.root_hash.len() as u8);
        out.extend_from_slice(&self.root_hash);
        out.extend_from_slice(&self.timestamp_nanos.to_be_bytes());
        out.extend_from_slice(&self.revision.to_be_bytes());
        out.extend_from_slice(&(self.metadata.len() as u16).to_be_bytes());
        out.extend_from_slice(&self.metadata);
        Ok(out)
    }

    /// Verifies the version tag and populates `self` from `bytes`.
    ///
    /// Rejects any trailing bytes left over after the struct is fully
    /// consumed, and any version other than [`LOG_ROOT_FORMAT_V1`].
    pub fn unmarshal_binary(bytes: &[u8]) -> Result<Self, CodecError> {
        if bytes.len() < 3 {
            return Err(CodecError::TooShort);
        }

        let mut cursor = Cursor::new(bytes);
        let version = cursor.take_u16()?;
        if version != LOG_ROOT_FORMAT_V1 {
            return Err(CodecError::BadVersion {
                found: version,
                want: LOG_ROOT_FORMAT_V1,
            });
        }

        let tree_size = cursor.take_u64()?;
        let root_hash = cursor.take_opaque_u8_len()?;
        let timestamp_nanos = cursor.take_u64()?;
        let revision = cursor.take_u64()?;
        let metadata = cursor.take_opaque_u16_len()?;

        if !cursor.is_empty() {
            return Err(CodecError::TrailingBytes);
        }

        Ok(Self {
            tree_size,
            root_hash,
            timestamp_nanos,
            revision,
            metadata,
        })
    }
}

struct Cursor<'a> {
    rest: &'a [u8],
}

impl<'a> Cursor<'a> {
    fn new(bytes: &'a [u8]) -> Self {
        Self { rest: bytes }
    }

    fn is_empty(&self) -> bool {
        self.rest.is_empty()
    }

    fn take(&mut self, n: usize) -> Result<&'a [u8], CodecError> {
        if self.rest.len() < n {
            return Err(CodecError::TooShort);
        }
        let (head, tail) = self.rest.split_at(n);
        self.rest = tail;
        Ok(head)
    }

    fn take_u16(&mut self) -> Result<u16, CodecError> {
        let b = self.take(2)?;
        Ok(u16::from_be_bytes([b[0], b[1]]))
    }

    fn take_u64(&mut self) -> Result<u64, CodecError> {
        let b = self.take(8)?;
        Ok(u64::from_be_bytes(b.try_into().unwrap()))
    }

    fn take_opaque_u8_len(&mut self) -> Result<Vec<u8>, CodecError> {
        let len = self.take(1)?[0] as usize;
        Ok(self.take(len)?.to_vec())
    }

    fn take_opaque_u16_len(&mut self) -> Result<Vec<u8>, CodecError> {
        let len = self.take_u16()? as usize;
        Ok(self.take(len)?.to_vec())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> LogRootV1 {
        LogRootV1 {
            tree_size: 42,
            root_hash: vec![0xab; 32],
            timestamp_nanos: 1_700_000_000_000_000_000,
            revision: 7,
            metadata: vec![1, 2, 3],
        }
    }

    #[test]
    fn round_trip() {
        let l = sample();
        let bytes = l.marshal_binary().unwrap();
        let parsed = LogRootV1::unmarshal_binary(&bytes).unwrap();
        assert_eq!(l, parsed);
    }

    #[test]
    fn empty_root_round_trip() {
        let l = LogRootV1 {
            tree_size: 0,
            root_hash: vec![],
            timestamp_nanos: 0,
            revision: 0,
            metadata: vec![],
        };
        let bytes = l.marshal_binary().unwrap();
        assert_eq!(&bytes[0..2], &[0x00, 0x01]);
        let parsed = LogRootV1::unmarshal_binary(&bytes).unwrap();
        assert_eq!(l, parsed);
    }

    #[test]
    fn rejects_bad_version() {
        let mut bytes = sample().marshal_binary().unwrap();
        bytes[1] = 2;
        let err = LogRootV1::unmarshal_binary(&bytes).unwrap_err();
        assert!(matches!(err, CodecError::BadVersion { found: 2, want: 1 }));
    }

    #[test]
    fn rejects_trailing_bytes() {
        let mut bytes = sample().marshal_binary().unwrap();
        bytes.push(0xff);
        let err = LogRootV1::unmarshal_binary(&bytes).unwrap_err();
        assert!(matches!(err, CodecError::TrailingBytes));
    }

    #[test]
    fn rejects_too_short() {
        let err = LogRootV1::unmarshal_binary(&[0x00]).unwrap_err();
        assert!(matches!(err, CodecError::TooShort));
    }
}
