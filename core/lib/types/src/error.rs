use thiserror::Error;

/// Errors produced while (de)serializing wire-level types (`LogRootV1`, key hints).
#[derive(Debug, Error)]
pub enum CodecError {
    #[error("logRootBytes too short")]
    TooShort,
    #[error("invalid LogRoot.Version: {found}, want {want}")]
    BadVersion { found: u16, want: u16 },
    #[error("opaque field exceeds its maximum length: {len} > {max}")]
    OpaqueTooLong { len: usize, max: usize },
    #[error("trailing bytes after decoding LogRootV1")]
    TrailingBytes,
    #[error("hint is {len} bytes, want 8")]
    BadKeyHintLength { len: usize },
}

/// Errors produced while parsing the CLI/startup configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to parse mmd duration {raw:?}: {reason}")]
    BadDuration { raw: String, reason: String },
    #[error("max_certs must be at least 1")]
    MaxCertsZero,
}
