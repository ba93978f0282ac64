//! Serialization helpers for the 8-byte big-endian key hint carried alongside
//! every signature, so a verifier with multiple known keys can pick the right
//! public key without guessing.

use crate::error::CodecError;

/// Serializes `log_id` as a big-endian `u64` key hint.
pub fn serialize_key_hint(log_id: i64) -> [u8; 8] {
    (log_id as u64).to_be_bytes()
}

/// Recovers the key id from a serialized hint.
pub fn parse_key_hint(hint: &[u8]) -> Result<i64, CodecError> {
    if hint.len() != 8 {
        return Err(CodecError::BadKeyHintLength { len: hint.len() });
    }
    let bytes: [u8; 8] = hint.try_into().unwrap();
    Ok(u64::from_be_bytes(bytes) as i64)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn round_trip() {
        let hint = serialize_key_hint(0);
        assert_eq!(parse_key_hint(&hint).unwrap(), 0);

        let hint = serialize_key_hint(12345);
        assert_eq!(parse_key_hint(&hint).unwrap(), 12345);
    }

    #[test]
    fn rejects_wrong_length() {
        assert!(matches!(
            parse_key_hint(&[0; 7]),
            Err(CodecError::BadKeyHintLength { len: 7 })
        ));
    }
}
